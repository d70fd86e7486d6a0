use serde::{Deserialize, Serialize};

/// A set of free-text genre tags.
///
/// Tags are trimmed, blank tags are dropped and duplicates collapse onto the
/// first occurrence, so insertion order is kept. There is no controlled
/// vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Genres(Vec<String>);

impl Genres {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag. Returns `false` when the tag was blank or already present.
    pub fn insert(&mut self, tag: impl AsRef<str>) -> bool {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Encode for the `genres` column: a JSON array of strings.
    pub(crate) fn to_storage(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.0)
    }

    /// Decode the `genres` column.
    ///
    /// Besides the JSON array written by [`Genres::to_storage`], rows imported
    /// from older databases hold a PostgreSQL array literal such as
    /// `{Jazz,"Hip Hop"}`, a bracketed list that is not valid JSON such as
    /// `['Jazz', 'Swing']`, or a bare comma-separated list. Quoted elements
    /// may contain commas; unquoted `NULL` elements are skipped.
    pub(crate) fn from_storage(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::new();
        }
        if raw.starts_with('[') {
            if let Ok(tags) = serde_json::from_str::<Vec<String>>(raw) {
                return tags.into_iter().collect();
            }
        }
        let inner = if let Some(list) = raw.strip_prefix('[') {
            list.strip_suffix(']').unwrap_or(list)
        } else {
            raw.strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .unwrap_or(raw)
        };
        split_list(inner).into_iter().collect()
    }
}

/// Split a delimited list. An element that opens with a double or single
/// quote runs to the matching quote, commas and backslash escapes included.
fn split_list(inner: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut was_quoted = false;
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(_), '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            (Some(open), c) if c == open => quote = None,
            (None, '"' | '\'') if current.trim().is_empty() => {
                quote = Some(c);
                was_quoted = true;
            }
            (None, ',') => {
                push_element(&mut tags, &current, was_quoted);
                current.clear();
                was_quoted = false;
            }
            (_, c) => current.push(c),
        }
    }
    push_element(&mut tags, &current, was_quoted);
    tags
}

fn push_element(tags: &mut Vec<String>, element: &str, was_quoted: bool) {
    if !was_quoted && element.trim().eq_ignore_ascii_case("NULL") {
        return;
    }
    tags.push(element.to_string());
}

impl<S: AsRef<str>> FromIterator<S> for Genres {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut genres = Self::new();
        for tag in iter {
            genres.insert(tag);
        }
        genres
    }
}

impl From<Vec<String>> for Genres {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<Genres> for Vec<String> {
    fn from(genres: Genres) -> Self {
        genres.0
    }
}

impl<'a> IntoIterator for &'a Genres {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
