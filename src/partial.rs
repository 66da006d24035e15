//! Partial results for loops that isolate per-item failures

use serde::Serialize;

/// Successful values of a loop plus the items that were skipped
#[derive(Debug, Clone, Serialize)]
pub struct Partial<T> {
    pub items: Vec<T>,
    pub skipped: Vec<Skipped>,
}

/// An item dropped from a loop because its external call failed
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Skipped {
    pub item: String,
    pub reason: String,
}

impl<T> Partial<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    pub fn skip(&mut self, item: impl Into<String>, reason: impl ToString) {
        self.skipped.push(Skipped {
            item: item.into(),
            reason: reason.to_string(),
        });
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Replace the successful values, keeping the skip record
    pub fn map_items<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> Partial<U> {
        Partial {
            items: f(self.items),
            skipped: self.skipped,
        }
    }
}

impl<T> Default for Partial<T> {
    fn default() -> Self {
        Self::new()
    }
}
