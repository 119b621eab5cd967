//! Per-contact message personalization.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Insertion-ordered attribute bag attached to a contact.
///
/// Keys are unique; inserting an existing key replaces its value in place.
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// Attribute keys filled by [`derive_name_attributes`].
pub const DERIVED_NAME_KEYS: [&str; 2] = ["name", "username"];

/// Replace every `{key}` in `template` with the matching attribute value.
///
/// Replacement is literal and single-pass per key: values are not scanned again
/// for placeholders of the same key, and placeholders without an attribute are
/// left untouched. Keys are applied in insertion order, so a value that itself
/// contains a later key's placeholder would be substituted by that later key.
pub fn render(template: &str, attributes: &Attributes) -> String {
    attributes
        .iter()
        .fold(template.to_owned(), |rendered, (key, value)| {
            rendered.replace(&format!("{{{key}}}"), value)
        })
}

/// First whitespace-delimited token of `value`, or the whole value when it has none.
pub fn first_name(value: &str) -> &str {
    value.split_whitespace().next().unwrap_or(value)
}

/// Add `name` and `username` derived from the `source` attribute.
///
/// Both get [`first_name`] of the source value: a blank value is kept whole and an
/// absent source yields an empty string.
pub fn derive_name_attributes(attributes: &mut Attributes, source: &str) {
    let derived = attributes
        .get(source)
        .map(first_name)
        .unwrap_or("")
        .to_owned();
    for key in DERIVED_NAME_KEYS {
        attributes.insert(key, derived.clone());
    }
}
