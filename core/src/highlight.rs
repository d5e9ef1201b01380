use regex::{Captures, RegexBuilder};

/// Wrap every case-insensitive occurrence of `query` in `text` with `**`.
///
/// The query is matched as one literal phrase, not term by term, and the matched
/// text keeps its original casing.
pub fn highlight(text: &str, query: &str) -> String {
    highlight_with(text, query, "**", "**")
}

/// Like [`highlight`] with caller-chosen markers, e.g. `<em>` and `</em>`.
pub fn highlight_with(text: &str, query: &str, open: &str, close: &str) -> String {
    if query.is_empty() {
        return text.to_string();
    }
    let pat = match RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build() {
        Ok(pat) => pat,
        Err(err) => {
            tracing::warn!(%err, "highlight pattern rejected; returning text unmarked");
            return text.to_string();
        }
    };
    pat.replace_all(text, |caps: &Captures| format!("{open}{}{close}", &caps[0]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_match() {
        assert_eq!(highlight("cat sat", "cat"), "**cat** sat");
    }

    #[test]
    fn case_insensitive_keeps_casing() {
        assert_eq!(highlight("Cat and CAT", "cat"), "**Cat** and **CAT**");
    }

    #[test]
    fn whole_phrase_only() {
        assert_eq!(highlight("black cat, black dog", "black cat"), "**black cat**, black dog");
        assert_eq!(highlight("cat dog", "dog cat"), "cat dog");
    }

    #[test]
    fn metacharacters_are_literal() {
        assert_eq!(highlight("cost is $5.00 (approx)", "$5.00 (approx)"), "cost is **$5.00 (approx)**");
        assert_eq!(highlight("a+b", "a.b"), "a+b");
    }

    #[test]
    fn no_match_is_unchanged() {
        assert_eq!(highlight("nothing here", "cat"), "nothing here");
        assert_eq!(highlight("anything", ""), "anything");
    }

    #[test]
    fn repeated_application_does_not_corrupt() {
        let once = highlight("cat sat", "cat");
        let twice = highlight(&once, "**cat** sat");
        assert_eq!(twice, "****cat** sat**");
        assert_eq!(highlight(&once, "dog"), once);
    }

    #[test]
    fn custom_markers() {
        assert_eq!(highlight_with("Rust is fun", "rust", "<em>", "</em>"), "<em>Rust</em> is fun");
    }
}
