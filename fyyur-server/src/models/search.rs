//! Name search term and results
//!
//! Matching is a case-insensitive substring match. LIKE wildcards in the
//! term are escaped so `%` and `_` only ever match themselves.

use serde::{Deserialize, Serialize};

/// Escape character used in the generated LIKE pattern
pub const LIKE_ESCAPE: char = '\\';

/// Search form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

/// Search term (trimmed; may be empty, which matches everything)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(s: &str) -> Self {
        Self(s.trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pattern for `ILIKE ... ESCAPE '\'`.
    ///
    /// # Example
    /// ```
    /// use fyyur_server::models::SearchTerm;
    ///
    /// assert_eq!(SearchTerm::new("hop").like_pattern(), "%hop%");
    /// assert_eq!(SearchTerm::new("100%").like_pattern(), "%100\\%%");
    /// ```
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | LIKE_ESCAPE) {
                pattern.push(LIKE_ESCAPE);
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// Same rule as the SQL match, for in-memory checks.
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.0.to_lowercase())
    }
}

impl From<SearchForm> for SearchTerm {
    fn from(form: SearchForm) -> Self {
        Self::new(&form.search_term)
    }
}

/// Search results page data
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
    pub search_term: String,
}

impl<T> SearchResults<T> {
    pub fn new(term: &SearchTerm, data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
            search_term: term.as_str().to_owned(),
        }
    }
}
