//! Word lists for the vocabulary-driven artifact kinds

/// Ordered list of non-empty, whitespace-trimmed words
///
/// Duplicates are kept as given; the list is opaque input to prompt
/// formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList(Vec<String>);

impl WordList {
    /// Create a word list, trimming each entry and dropping empty ones
    ///
    /// # Examples
    ///
    /// ```
    /// use studykit_domain::WordList;
    ///
    /// let words = WordList::new(vec![" photosynthesis ".to_string(), "".to_string()]);
    /// assert_eq!(words.as_slice(), &["photosynthesis".to_string()]);
    /// ```
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_string())
                .filter(|w| !w.is_empty())
                .collect(),
        )
    }

    /// Parse a comma-separated line such as `"cell, nucleus ,,ribosome"`
    pub fn parse(line: &str) -> Self {
        Self::new(line.split(','))
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no words
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the words
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate over the words
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Words joined the way prompts present them: `"a, b, c"`
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<String>> for WordList {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

impl From<&[&str]> for WordList {
    fn from(words: &[&str]) -> Self {
        Self::new(words.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_trims_and_drops_empty() {
        let words = WordList::new(["  alpha", "", "   ", "beta  "]);
        assert_eq!(words.as_slice(), &["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let words = WordList::new(["echo", "echo"]);
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_parse_comma_line() {
        let words = WordList::parse("cell, nucleus ,,ribosome");
        assert_eq!(words.joined(), "cell, nucleus, ribosome");
    }

    #[test]
    fn test_empty_list() {
        let words = WordList::parse(" , ,");
        assert!(words.is_empty());
        assert_eq!(words.joined(), "");
    }

    proptest! {
        #[test]
        fn prop_entries_are_trimmed_and_non_empty(raw in proptest::collection::vec(".{0,12}", 0..8)) {
            let words = WordList::new(&raw);
            for word in words.iter() {
                prop_assert!(!word.is_empty());
                prop_assert_eq!(word, word.trim());
            }
        }
    }
}
