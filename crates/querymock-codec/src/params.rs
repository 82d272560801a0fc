//! The flat, path-keyed parameter space decoded from an HTTP form.

use std::collections::BTreeMap;
use std::ops::Bound;

use url::form_urlencoded;

/// Ordered multimap from dotted parameter paths to their values.
///
/// Paths look like `GroupName`, `Users.member.1.UserName`, or `Tags.1.key`.
/// A present path, even one with an empty value, is distinct from an absent
/// path.
///
/// # Example
///
/// ```
/// use querymock_codec::ParamSpace;
///
/// let params = ParamSpace::from_form(b"Action=GetUser&Tags.member.1.Key=a");
/// assert_eq!(params.get("Action"), Some("GetUser"));
/// assert!(params.contains_subtree("Tags"));
/// assert!(!params.contains("Tags"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSpace {
    entries: BTreeMap<String, Vec<String>>,
}

impl ParamSpace {
    /// Creates an empty parameter space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `application/x-www-form-urlencoded` bytes.
    #[must_use]
    pub fn from_form(input: &[u8]) -> Self {
        let mut params = Self::new();
        params.extend_from_form(input);
        params
    }

    /// Appends the pairs of another encoded form after existing values.
    pub fn extend_from_form(&mut self, input: &[u8]) {
        for (key, value) in form_urlencoded::parse(input) {
            self.append(key.into_owned(), value.into_owned());
        }
    }

    /// Appends a value under `path`.
    pub fn append(&mut self, path: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(path.into()).or_default().push(value.into());
    }

    /// Returns the first value stored under the exact `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .get(path)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns every value stored under the exact `path`.
    #[must_use]
    pub fn get_all(&self, path: &str) -> &[String] {
        self.entries.get(path).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` when the exact `path` is present.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Returns `true` when `path` or any path nested below it is present.
    ///
    /// The empty path denotes the root and matches any non-empty space.
    #[must_use]
    pub fn contains_subtree(&self, path: &str) -> bool {
        if path.is_empty() {
            return !self.entries.is_empty();
        }
        if self.contains(path) {
            return true;
        }
        let prefix = format!("{path}.");
        self.entries
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .next()
            .is_some_and(|(key, _)| key.starts_with(&prefix))
    }

    /// Number of distinct paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no path is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over paths and their first values in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(key, values)| {
            values
                .first()
                .map(|value| (key.as_str(), value.as_str()))
        })
    }
}

impl<K, V> FromIterator<(K, V)> for ParamSpace
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_and_plus_escapes() {
        let params = ParamSpace::from_form(b"Path=%2Fadmins%2F&Name=a+b");
        assert_eq!(params.get("Path"), Some("/admins/"));
        assert_eq!(params.get("Name"), Some("a b"));
    }

    #[test]
    fn first_value_wins_and_later_sources_append() {
        let mut params = ParamSpace::from_form(b"Action=GetUser");
        params.extend_from_form(b"Action=ListUsers");
        assert_eq!(params.get("Action"), Some("GetUser"));
        assert_eq!(params.get_all("Action"), ["GetUser", "ListUsers"]);
    }

    #[test]
    fn empty_value_is_present() {
        let params = ParamSpace::from_form(b"Tags=");
        assert!(params.contains("Tags"));
        assert_eq!(params.get("Tags"), Some(""));
    }

    #[test]
    fn subtree_requires_a_dot_boundary() {
        let params: ParamSpace = [("TagsExtra", "x"), ("Tag.1", "y")].into_iter().collect();
        assert!(!params.contains_subtree("Tags"));
        assert!(params.contains_subtree("Tag"));
        assert!(params.contains_subtree("TagsExtra"));
    }

    #[test]
    fn root_subtree_matches_any_entry() {
        assert!(!ParamSpace::new().contains_subtree(""));
        assert!(ParamSpace::from_form(b"A=1").contains_subtree(""));
    }
}
