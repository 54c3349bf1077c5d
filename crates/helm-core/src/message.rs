use crate::sender::Sender;

/// Resolves dotted message keys into final, sender-localized strings.
///
/// Implementations own the catalog format and the per-sender locale choice;
/// callers supply a default used when the key is absent. Lookups run on the
/// invocation path and must be fast and non-blocking.
pub trait MessageSource {
    fn resolve(
        &self,
        key: &str,
        default: &str,
        sender: Option<&dyn Sender>,
        placeholders: &[(&str, &str)],
    ) -> String;

    /// List-valued variant, used for multi-line message blocks.
    fn resolve_list(
        &self,
        key: &str,
        default: &[&str],
        sender: Option<&dyn Sender>,
        placeholders: &[(&str, &str)],
    ) -> Vec<String>;
}

/// Apply ordered `(name, value)` placeholder pairs by literal substitution.
pub fn apply_placeholders(text: &str, placeholders: &[(&str, &str)]) -> String {
    let mut out = text.to_string();
    for (name, value) in placeholders {
        out = out.replace(name, value);
    }
    out
}

/// A message source that always answers with the caller-supplied default.
///
/// Useful for tests and for hosts that have no message catalog at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMessages;

impl MessageSource for StaticMessages {
    fn resolve(
        &self,
        _key: &str,
        default: &str,
        _sender: Option<&dyn Sender>,
        placeholders: &[(&str, &str)],
    ) -> String {
        apply_placeholders(default, placeholders)
    }

    fn resolve_list(
        &self,
        _key: &str,
        default: &[&str],
        _sender: Option<&dyn Sender>,
        placeholders: &[(&str, &str)],
    ) -> Vec<String> {
        default
            .iter()
            .map(|line| apply_placeholders(line, placeholders))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_apply_in_order() {
        let out = apply_placeholders(
            "go to page %target% of %max_page%",
            &[("%target%", "2"), ("%max_page%", "5")],
        );
        assert_eq!(out, "go to page 2 of 5");
    }

    #[test]
    fn static_messages_echo_defaults() {
        let src = StaticMessages;
        assert_eq!(
            src.resolve("any.key", "hello %who%", None, &[("%who%", "world")]),
            "hello world"
        );
        assert_eq!(
            src.resolve_list("any.key", &["a", "b"], None, &[]),
            vec!["a", "b"]
        );
    }
}
