use std::collections::HashMap;

/// Named string properties attached to a map, parsed on demand into
/// typed values.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    /// Creates an empty property collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the raw string value of a property.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns a property parsed as an integer.
    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get_str(name)?.trim().parse().ok()
    }

    /// Returns a property parsed as a float.
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get_str(name)?.trim().parse().ok()
    }

    /// Returns a property parsed as a boolean ("true"/"false", any case).
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get_str(name)?.trim() {
            v if v.eq_ignore_ascii_case("true") => Some(true),
            v if v.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    /// Returns a property parsed as an "x,y" coordinate pair.
    pub fn get_point(&self, name: &str) -> Option<(i32, i32)> {
        let raw = self.get_str(name)?;
        let (x, y) = raw.split_once(',')?;
        Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
    }

    /// Number of properties in the collection.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the collection holds no properties.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over all name/value pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
