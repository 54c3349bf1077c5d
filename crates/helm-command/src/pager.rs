//! First-occurrence marker splitting for help templates.
//!
//! A header or footer template may contain one previous-page and one
//! next-page marker, in either order. Splitting is positional: the template
//! is cut at the first prev-marker, then each remaining half is cut at its
//! first next-marker. Repeated markers past the first occurrence are left in
//! the text verbatim.

/// Marks where the previous-page control is spliced in.
pub const PREV_MARKER: &str = "%prev_clickable%";

/// Marks where the next-page control is spliced in.
pub const NEXT_MARKER: &str = "%next_clickable%";

/// The up-to-four text segments of a split template.
#[derive(Debug, PartialEq, Eq)]
pub struct MarkerSegments {
    /// Text before every marker. Rendered as unformatted base text.
    pub head: String,
    /// Present iff a next-marker occurred before the prev-marker: the text
    /// between them. A next control precedes it on render.
    pub next_tail: Option<String>,
    /// Present iff a prev-marker occurred: the text after it, up to that
    /// half's own next-marker. A prev control precedes it.
    pub after_head: Option<String>,
    /// Present iff the post-prev half contained a next-marker: the text after
    /// it. A second next control precedes it.
    pub after_next_tail: Option<String>,
}

/// Split a template into its marker segments.
pub fn split_markers(text: &str) -> MarkerSegments {
    let (before, after) = match text.find(PREV_MARKER) {
        Some(i) => (&text[..i], Some(&text[i + PREV_MARKER.len()..])),
        None => (text, None),
    };
    let (head, next_tail) = split_next(before);
    let (after_head, after_next_tail) = match after {
        Some(after) => {
            let (head, tail) = split_next(after);
            (Some(head), tail)
        }
        None => (None, None),
    };
    MarkerSegments {
        head,
        next_tail,
        after_head,
        after_next_tail,
    }
}

fn split_next(text: &str) -> (String, Option<String>) {
    match text.find(NEXT_MARKER) {
        Some(i) => (
            text[..i].to_string(),
            Some(text[i + NEXT_MARKER.len()..].to_string()),
        ),
        None => (text.to_string(), None),
    }
}
