/// A normalised search query: trimmed and lower-cased once, then matched
/// against candidate names as a substring.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// An empty query matches every name.
    pub fn matches(
        &self,
        name: &str,
    ) -> bool {
        name.to_lowercase().contains(&self.needle)
    }

    /// Keeps the items whose key matches, in their original order.
    ///
    /// ```
    /// use pocket_core::search::SearchQuery;
    ///
    /// let animals = ["Red Panda", "Panther", "Koala"];
    /// let hits = SearchQuery::new(" pan").filter(animals, |a| *a);
    ///
    /// assert_eq!(hits, vec!["Red Panda", "Panther"]);
    /// ```
    pub fn filter<T, I, F>(
        &self,
        items: I,
        key: F,
    ) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> &str,
    {
        items
            .into_iter()
            .filter(|item| self.matches(key(item)))
            .collect()
    }
}
