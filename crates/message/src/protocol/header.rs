//! Case-insensitive header collection.
//!
//! Header names are matched case-insensitively but keep the casing they were
//! stored with, so serialization and enumeration reproduce what the caller wrote.
//! Entries keep their insertion order.

use std::fmt;

use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderEntry {
    name: String,
    values: Vec<String>,
}

/// An ordered mapping from header name to its values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: IndexMap<String, HeaderEntry>,
}

#[inline]
fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize(name))
    }

    /// All values of `name`, empty if the header is absent.
    pub fn get(&self, name: &str) -> &[String] {
        self.entries.get(&normalize(name)).map(|entry| entry.values.as_slice()).unwrap_or_default()
    }

    /// All values of `name` joined with `", "`, empty if the header is absent.
    pub fn line(&self, name: &str) -> String {
        self.get(name).join(", ")
    }

    /// Replaces every value of `name`. The entry takes the casing of `name` and
    /// keeps its position if it already existed.
    pub fn set<N: Into<String>>(&mut self, name: N, values: Vec<String>) {
        let name = name.into();
        self.entries.insert(normalize(&name), HeaderEntry { name, values });
    }

    /// Appends values to `name`. An existing entry keeps its casing.
    pub fn append<N: Into<String>>(&mut self, name: N, values: Vec<String>) {
        let name = name.into();
        self.entries
            .entry(normalize(&name))
            .or_insert_with(|| HeaderEntry { name, values: Vec::new() })
            .values
            .extend(values);
    }

    /// Removes `name`, returning its values. The remaining entries keep their order.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.entries.shift_remove(&normalize(name)).map(|entry| entry.values)
    }

    /// Iterates `(name, values)` pairs in insertion order, with stored casing.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.values().map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }

    /// Header names in insertion order, with stored casing.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.name.as_str())
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Writes the raw header block, one `Name: value, value\r\n` line per entry.
impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, values) in self {
            write!(f, "{name}: {}\r\n", values.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn lookup_ignores_case() {
        let mut headers = Headers::new();
        headers.set("Content-Type", values(&["text/plain"]));

        for name in ["content-type", "CONTENT-TYPE", "Content-Type", "cOnTeNt-TyPe"] {
            assert!(headers.contains(name));
            assert_eq!(headers.get(name), ["text/plain"]);
        }
        assert!(headers.get("accept").is_empty());
        assert_eq!(headers.line("accept"), "");
    }

    #[test]
    fn set_takes_new_casing_and_keeps_position() {
        let mut headers = Headers::new();
        headers.set("x-first", values(&["1"]));
        headers.set("Accept", values(&["a"]));
        headers.set("X-FIRST", values(&["2"]));

        assert_eq!(headers.names().collect::<Vec<_>>(), ["X-FIRST", "Accept"]);
        assert_eq!(headers.get("x-first"), ["2"]);
    }

    #[test]
    fn append_keeps_existing_casing() {
        let mut headers = Headers::new();
        headers.append("Accept", values(&["text/html"]));
        headers.append("ACCEPT", values(&["application/json", "*/*"]));

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.names().collect::<Vec<_>>(), ["Accept"]);
        assert_eq!(headers.line("accept"), "text/html, application/json, */*");
    }

    #[test]
    fn remove_keeps_order() {
        let mut headers = Headers::new();
        headers.set("A", values(&["1"]));
        headers.set("B", values(&["2"]));
        headers.set("C", values(&["3"]));

        assert_eq!(headers.remove("b"), Some(values(&["2"])));
        assert_eq!(headers.remove("b"), None);
        assert_eq!(headers.names().collect::<Vec<_>>(), ["A", "C"]);
    }

    #[test]
    fn display_writes_header_block() {
        let mut headers = Headers::new();
        headers.set("Host", values(&["example.com"]));
        headers.append("Accept", values(&["text/html", "*/*"]));

        assert_eq!(headers.to_string(), "Host: example.com\r\nAccept: text/html, */*\r\n");
        assert_eq!(Headers::new().to_string(), "");
    }
}
