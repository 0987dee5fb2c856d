//! Allow-list filtering over a resource catalog.
//!
//! The allow-list is a comma-separated set of wildcard patterns from
//! configuration. A descriptor is retained when any pattern matches its
//! name or its display name. An empty list retains nothing: the filter
//! fails closed rather than silently allowing everything.

use super::matcher::{Anchor, WildcardPattern};
use crate::catalog::ResourceDescriptor;

#[derive(Debug, Clone)]
pub struct AllowList {
    patterns: Vec<WildcardPattern>,
}

impl AllowList {
    /// Parse a comma-separated pattern list; empty entries are discarded.
    pub fn parse(csv: &str) -> Self {
        let patterns = csv
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| WildcardPattern::compile(entry, Anchor::Start))
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Union across all patterns and across both identifying names.
    pub fn permits(&self, descriptor: &ResourceDescriptor) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches(&descriptor.name) || p.matches(&descriptor.display_name))
    }

    /// Retain the permitted subset of the catalog. Always a subset of the
    /// input; empty allow-list yields an empty result.
    pub fn filter(&self, catalog: Vec<ResourceDescriptor>) -> Vec<ResourceDescriptor> {
        catalog
            .into_iter()
            .filter(|descriptor| self.permits(descriptor))
            .collect()
    }
}
