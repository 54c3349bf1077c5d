/// Case-insensitive prefix filtering over tab-completion candidates.
///
/// Candidate order is preserved; the partial token is lowercased once.
pub fn filter_prefix<I, S>(partial: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let partial = partial.to_lowercase();
    candidates
        .into_iter()
        .map(Into::into)
        .filter(|c| c.to_lowercase().starts_with(&partial))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_prefix_case_insensitively() {
        let out = filter_prefix("G", ["give", "help", "gamemode"]);
        assert_eq!(out, vec!["give", "gamemode"]);
    }

    #[test]
    fn empty_partial_keeps_everything() {
        let out = filter_prefix("", ["a", "b"]);
        assert_eq!(out, vec!["a", "b"]);
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter_prefix("z", ["give", "help"]).is_empty());
    }
}
