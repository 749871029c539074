//! Deletion planning
//!
//! Turns the set of paths reported missing on the source into the smallest
//! set of recursive deletes that removes them, without touching anything an
//! exclusion pattern protects.
//!
//! Planning runs in four passes over an in-memory set of candidates:
//!
//! 1. Candidates matching an exclusion pattern are excluded explicitly.
//! 2. Every candidate beneath an explicit exclusion is excluded, however deep.
//! 3. Every candidate above an excluded path is excluded, since deleting it
//!    would take the protected content with it. This runs to a fixed point
//!    over a worklist.
//! 4. Of what remains, a path is dropped when one of its ancestors is also
//!    going to be deleted.
//!
//! The resulting plan is sorted and no planned path lies beneath another.

pub mod glob;
pub mod paths;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::debug;

use crate::error::Result;
use glob::ExclusionRules;
use paths::ancestors;

/// Unique candidate paths, iterated in sorted order
pub type CandidateSet = BTreeSet<String>;

/// Why a candidate was excluded without matching a pattern itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImplicitReason {
    /// Lies beneath the explicitly excluded path `of`
    Descendant { of: String },
    /// Lies above the excluded path `of`
    Ancestor { of: String },
}

/// Candidates withheld from deletion, keyed by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionResult {
    /// Path to the first pattern that matched it
    pub explicit: BTreeMap<String, String>,
    pub implicit: BTreeMap<String, ImplicitReason>,
}

impl ExclusionResult {
    pub fn explicit_count(&self) -> usize {
        self.explicit.len()
    }

    pub fn implicit_count(&self) -> usize {
        self.implicit.len()
    }
}

/// Outcome of planning
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Paths to delete recursively, sorted
    pub paths: Vec<String>,
    pub exclusions: ExclusionResult,
    /// Deletable paths left out because a planned ancestor covers them,
    /// mapped to the nearest such ancestor
    pub covered: BTreeMap<String, String>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

/// Plans deletions against a fixed set of exclusion rules
#[derive(Debug, Clone, Default)]
pub struct Planner {
    rules: ExclusionRules,
}

impl Planner {
    pub fn new(rules: ExclusionRules) -> Self {
        Self { rules }
    }

    pub fn plan(&self, candidates: &CandidateSet) -> Plan {
        let mut remaining = candidates.clone();
        let mut exclusions = ExclusionResult::default();

        if !self.rules.is_empty() {
            self.exclude_matching(&mut remaining, &mut exclusions);
            exclude_descendants(&mut remaining, &mut exclusions);
            exclude_ancestors(&mut remaining, &mut exclusions);
        }

        let (paths, covered) = eliminate_covered(&remaining);

        Plan {
            paths,
            exclusions,
            covered,
        }
    }

    fn exclude_matching(&self, remaining: &mut CandidateSet, exclusions: &mut ExclusionResult) {
        let mut hits = vec![0usize; self.rules.len()];

        for path in remaining.iter() {
            let mut first = None;
            for (idx, pattern) in self.rules.iter().enumerate() {
                if pattern.matches(path) {
                    hits[idx] += 1;
                    if first.is_none() {
                        first = Some(pattern);
                    }
                }
            }
            if let Some(pattern) = first {
                debug!(%path, %pattern, "EXPLICITLY_EXCLUDED");
                exclusions
                    .explicit
                    .insert(path.clone(), pattern.as_str().to_string());
            }
        }

        for (pattern, count) in self.rules.iter().zip(&hits) {
            if *count == 0 {
                debug!(%pattern, "exclusion pattern matched no candidate paths");
            }
        }

        remaining.retain(|path| !exclusions.explicit.contains_key(path));
    }
}

/// Plan deletions for `candidates`, compiling `patterns` first
///
/// Fails only when a pattern cannot be compiled.
pub fn plan<S: AsRef<str>>(candidates: &CandidateSet, patterns: &[S]) -> Result<Plan> {
    let rules = ExclusionRules::new(patterns)?;
    Ok(Planner::new(rules).plan(candidates))
}

fn exclude_descendants(remaining: &mut CandidateSet, exclusions: &mut ExclusionResult) {
    let explicit = &exclusions.explicit;
    let implicit = &mut exclusions.implicit;

    remaining.retain(|path| {
        let Some(excluded) = ancestors(path)
            .into_iter()
            .find(|ancestor| explicit.contains_key(*ancestor))
        else {
            return true;
        };
        debug!(%path, of = %excluded, "CHILD_IMPLICITLY_EXCLUDED");
        implicit.insert(
            path.clone(),
            ImplicitReason::Descendant {
                of: excluded.to_string(),
            },
        );
        false
    });
}

fn exclude_ancestors(remaining: &mut CandidateSet, exclusions: &mut ExclusionResult) {
    let mut frontier: Vec<String> = exclusions
        .explicit
        .keys()
        .chain(exclusions.implicit.keys())
        .cloned()
        .collect();
    let mut visited: HashSet<String> = frontier.iter().cloned().collect();

    while !frontier.is_empty() {
        let mut next = Vec::new();

        for path in &frontier {
            for ancestor in ancestors(path) {
                if !remaining.remove(ancestor) {
                    continue;
                }
                debug!(path = %ancestor, of = %path, "PARENT_IMPLICITLY_EXCLUDED");
                exclusions.implicit.insert(
                    ancestor.to_string(),
                    ImplicitReason::Ancestor { of: path.clone() },
                );
                if visited.insert(ancestor.to_string()) {
                    next.push(ancestor.to_string());
                }
            }
        }

        frontier = next;
    }
}

fn eliminate_covered(remaining: &CandidateSet) -> (Vec<String>, BTreeMap<String, String>) {
    let mut paths = Vec::new();
    let mut covered = BTreeMap::new();

    for path in remaining {
        match ancestors(path)
            .into_iter()
            .find(|ancestor| remaining.contains(*ancestor))
        {
            Some(ancestor) => {
                debug!(%path, by = %ancestor, "PARENT_TO_BE_DELETED");
                covered.insert(path.clone(), ancestor.to_string());
            }
            None => paths.push(path.clone()),
        }
    }

    (paths, covered)
}
