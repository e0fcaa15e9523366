//! Template rendering context.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Something that collects data for the template renderer.
pub trait ViewContext {
    /// Make `value` available to templates under `key`.
    fn assign(&mut self, key: &str, value: Value);
}

/// Data handed to the view layer once the handler renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ViewData {
    data: HashMap<String, Value>,
}

impl ViewData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Merge several entries at once, later keys winning.
    pub fn append_data<I, K>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.data
            .extend(entries.into_iter().map(|(key, value)| (key.into(), value)));
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ViewContext for ViewData {
    fn assign(&mut self, key: &str, value: Value) {
        self.data.insert(key.to_string(), value);
    }
}
