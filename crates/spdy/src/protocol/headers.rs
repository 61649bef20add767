//! Header collections accepted by the header block encoder.
//!
//! A SPDY header block maps each unique name to an ordered list of values. The
//! encoder reads that shape through the [`HeaderCollection`] trait, which is
//! implemented for the crate's own [`SpdyHeaders`] and for [`http::HeaderMap`].

use std::collections::HashMap;

use http::{HeaderMap, HeaderValue};

/// Read access to an ordered `name -> values` collection.
///
/// Implementations must yield every name once, and the order of
/// [`names`](HeaderCollection::names) must not change while the encoder walks it.
pub trait HeaderCollection {
    /// Number of unique names.
    fn name_count(&self) -> usize;

    /// Iterates the unique names, in the collection's order.
    fn names(&self) -> impl Iterator<Item = &str>;

    /// Iterates the values of `name` in insertion order. Values may be empty.
    fn values_for(&self, name: &str) -> impl Iterator<Item = &[u8]>;
}

/// An insertion ordered multimap of SPDY headers.
///
/// Names are matched ignoring ASCII case, and keep the spelling of their first
/// insertion. A name can be present with no values at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpdyHeaders {
    entries: Vec<(String, Vec<String>)>,
    /// lowercased name -> position in `entries`
    index: HashMap<String, usize>,
}

impl SpdyHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity), index: HashMap::with_capacity(capacity) }
    }

    /// Appends `value` to the values of `name`, adding `name` at the end if absent.
    pub fn add<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => self.entries[index].1.push(value),
            None => {
                self.push_entry(name, vec![value]);
            }
        }
        self
    }

    /// Appends every value of `values` to `name`.
    ///
    /// The name is added even if `values` is empty.
    pub fn add_all<N, I, V>(&mut self, name: N, values: I) -> &mut Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        let index = match self.position(&name) {
            Some(index) => index,
            None => self.push_entry(name, Vec::new()),
        };
        self.entries[index].1.extend(values.into_iter().map(Into::into));
        self
    }

    /// Replaces all values of `name` with `value`.
    pub fn set<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) -> &mut Self {
        self.set_all(name, [value])
    }

    /// Replaces all values of `name`. An existing name keeps its position.
    pub fn set_all<N, I, V>(&mut self, name: N, values: I) -> &mut Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        let values = values.into_iter().map(Into::into).collect();
        match self.position(&name) {
            Some(index) => self.entries[index].1 = values,
            None => {
                self.push_entry(name, values);
            }
        }
        self
    }

    /// Returns the first value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// Returns all values of `name`, or an empty slice if it is absent.
    pub fn get_all(&self, name: &str) -> &[String] {
        match self.position(name) {
            Some(index) => &self.entries[index].1,
            None => &[],
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes `name`, returning its values if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let position = self.index.remove(&name.to_ascii_lowercase())?;
        let (_, values) = self.entries.remove(position);
        for index in self.index.values_mut() {
            if *index > position {
                *index -= 1;
            }
        }
        Some(values)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of unique names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    fn position(&self, name: &str) -> Option<usize> {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.index.get(&name.to_ascii_lowercase()).copied()
        } else {
            self.index.get(name).copied()
        }
    }

    fn push_entry(&mut self, name: String, values: Vec<String>) -> usize {
        let position = self.entries.len();
        self.index.insert(name.to_ascii_lowercase(), position);
        self.entries.push((name, values));
        position
    }
}

impl<N: Into<String>, V: Into<String>> Extend<(N, V)> for SpdyHeaders {
    fn extend<T: IntoIterator<Item = (N, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.add(name, value);
        }
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for SpdyHeaders {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = SpdyHeaders::new();
        headers.extend(iter);
        headers
    }
}

impl HeaderCollection for SpdyHeaders {
    fn name_count(&self) -> usize {
        self.len()
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        SpdyHeaders::names(self)
    }

    fn values_for(&self, name: &str) -> impl Iterator<Item = &[u8]> {
        self.get_all(name).iter().map(String::as_bytes)
    }
}

impl HeaderCollection for HeaderMap {
    fn name_count(&self) -> usize {
        self.keys_len()
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.keys().map(http::HeaderName::as_str)
    }

    fn values_for(&self, name: &str) -> impl Iterator<Item = &[u8]> {
        self.get_all(name).into_iter().map(HeaderValue::as_bytes)
    }
}
