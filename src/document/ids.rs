//! Session-scoped element ID generation

use std::collections::HashMap;

/// Generates document-unique IDs of the form `<prefix><n>`.
///
/// Each prefix has its own counter starting at 1. Prefixes are element
/// names that never end in a digit, so IDs from different prefixes cannot
/// collide.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counters: HashMap<String, usize>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        format!("{}{}", prefix, counter)
    }
}
