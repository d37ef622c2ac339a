// SPDX-License-Identifier: MIT

//! Name-based spec selection.

/// Selects specs by substring containment on their fully-qualified names.
///
/// An empty filter string selects everything, so a filterless run and a
/// run with `--filter ""` behave identically.
#[derive(Debug, Clone)]
pub struct NameFilter {
    filter: String,
}

impl NameFilter {
    pub fn new(filter: impl Into<String>) -> Self {
        Self { filter: filter.into() }
    }

    /// True iff the filter is empty or `full_name` contains it.
    pub fn matches(&self, full_name: &str) -> bool {
        self.filter.is_empty() || full_name.contains(&self.filter)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
