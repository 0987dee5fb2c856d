//! # Name Resolution
//!
//! Combines the wildcard matcher and the allow-list filter over a catalog
//! snapshot, deduplicates the match set, and classifies it as not-found,
//! unique, or ambiguous. Resolution is pure set computation and never
//! fails; the transport layer decides how non-unique outcomes surface.

pub mod filter;
pub mod matcher;

pub use filter::AllowList;
pub use matcher::{Anchor, WildcardPattern};

use std::collections::HashSet;

use crate::catalog::ResourceDescriptor;

/// Tagged result of resolving a pattern against a catalog. Every resolution
/// yields exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    NotFound,
    Unique(ResourceDescriptor),
    Ambiguous(usize),
}

/// Collect every descriptor whose name or display name satisfies the
/// pattern, after allow-list filtering. Deduplicated by identity equality
/// over all descriptor fields; input order is preserved.
pub fn find_matches(
    pattern: &str,
    anchor: Anchor,
    catalog: Vec<ResourceDescriptor>,
    allow_list: &AllowList,
) -> Vec<ResourceDescriptor> {
    let compiled = WildcardPattern::compile(pattern, anchor);
    let mut seen = HashSet::new();

    allow_list
        .filter(catalog)
        .into_iter()
        .filter(|d| compiled.matches(&d.name) || compiled.matches(&d.display_name))
        .filter(|d| seen.insert(d.clone()))
        .collect()
}

/// Resolve a pattern to zero, one, or many resources.
pub fn resolve(
    pattern: &str,
    anchor: Anchor,
    catalog: Vec<ResourceDescriptor>,
    allow_list: &AllowList,
) -> ResolutionOutcome {
    let mut matches = find_matches(pattern, anchor, catalog, allow_list);
    match matches.len() {
        0 => ResolutionOutcome::NotFound,
        1 => ResolutionOutcome::Unique(matches.remove(0)),
        n => ResolutionOutcome::Ambiguous(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ResourceStatus;

    fn spooler_catalog() -> Vec<ResourceDescriptor> {
        vec![
            ResourceDescriptor::new("Spooler", "Print Spooler", ResourceStatus::Running),
            ResourceDescriptor::new("Spool2", "Secondary Spooler", ResourceStatus::Stopped),
            ResourceDescriptor::new("sshd", "OpenSSH", ResourceStatus::Running),
        ]
    }

    fn allow_all() -> AllowList {
        AllowList::parse("*")
    }

    #[test]
    fn test_unique_resolution() {
        let allow = AllowList::parse("Spool*");
        let catalog = vec![ResourceDescriptor::new(
            "Spooler",
            "Print Spooler",
            ResourceStatus::Running,
        )];
        match resolve("Spool*", Anchor::Start, catalog, &allow) {
            ResolutionOutcome::Unique(d) => assert_eq!(d.name, "Spooler"),
            other => panic!("expected Unique, got {other:?}"),
        }
    }

    #[test]
    fn test_ambiguous_resolution() {
        let outcome = resolve("Spool*", Anchor::Start, spooler_catalog(), &allow_all());
        assert_eq!(outcome, ResolutionOutcome::Ambiguous(2));
    }

    #[test]
    fn test_not_found() {
        let outcome = resolve("nginx*", Anchor::Start, spooler_catalog(), &allow_all());
        assert_eq!(outcome, ResolutionOutcome::NotFound);
    }

    #[test]
    fn test_allow_list_applies_before_matching() {
        let allow = AllowList::parse("sshd");
        let outcome = resolve("Spool*", Anchor::Start, spooler_catalog(), &allow);
        assert_eq!(outcome, ResolutionOutcome::NotFound);
    }

    #[test]
    fn test_full_anchor_disambiguates() {
        // "Spool*" is ambiguous, but an exact name with full anchoring is
        // unique even though it is a prefix of another unit.
        let outcome = resolve("Spooler", Anchor::Full, spooler_catalog(), &allow_all());
        match outcome {
            ResolutionOutcome::Unique(d) => assert_eq!(d.name, "Spooler"),
            other => panic!("expected Unique, got {other:?}"),
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let first = resolve("Spool*", Anchor::Start, spooler_catalog(), &allow_all());
        let second = resolve("Spool*", Anchor::Start, spooler_catalog(), &allow_all());
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_descriptors_collapse() {
        let d = ResourceDescriptor::new("Spooler", "Print Spooler", ResourceStatus::Running);
        let matches = find_matches(
            "Spool*",
            Anchor::Start,
            vec![d.clone(), d],
            &allow_all(),
        );
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_display_name_participates_in_matching() {
        let matches = find_matches("Print*", Anchor::Start, spooler_catalog(), &allow_all());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Spooler");
    }
}
