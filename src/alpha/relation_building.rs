use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::footprint::{FootprintMatrix, FootprintRelation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Role of a relation set: which side of the causal relation the anchor sits on
pub enum RelationRole {
    /// One anchor activity causally precedes all member activities
    Start,
    /// All member activities causally precede the one anchor activity
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// A group of mutually choice-related activities anchored to one causal partner
///
/// For [`RelationRole::Start`], the anchor directly causes every member; for
/// [`RelationRole::End`], every member directly causes the anchor. Members are kept
/// canonically sorted, so equality (and ordering, for deterministic iteration) is
/// structural: role, anchor and membership.
pub struct RelationSet {
    /// Role of the anchor
    pub role: RelationRole,
    /// The single causal partner of the member group
    pub anchor: usize,
    /// Sorted member activities, pairwise in a choice relation
    pub members: Vec<usize>,
}

impl RelationSet {
    /// All participating activities: the anchor and every member
    pub fn participants(&self) -> BTreeSet<usize> {
        let mut all: BTreeSet<usize> = self.members.iter().copied().collect();
        all.insert(self.anchor);
        all
    }
}

/// Enumerate all relation sets offered by a footprint matrix
///
/// For every anchor activity, the base candidates are the activities it directly causes
/// ([`RelationRole::Start`], the anchor's `Follows` row) respectively the activities
/// directly causing it ([`RelationRole::End`], the anchor's `Follows` column). Base
/// candidates are then merged into every mutually choice-compatible subset; each
/// resulting subset becomes one [`RelationSet`] with its anchor.
pub fn build_relation_sets(matrix: &FootprintMatrix) -> BTreeSet<RelationSet> {
    let mut sets: BTreeSet<RelationSet> = BTreeSet::new();
    for anchor in 0..matrix.size() {
        let caused_by_anchor: Vec<usize> = (0..matrix.size())
            .filter(|&b| matrix.relation(anchor, b) == FootprintRelation::Follows)
            .collect();
        for members in merge_compatible_subsets(&caused_by_anchor, matrix) {
            sets.insert(RelationSet {
                role: RelationRole::Start,
                anchor,
                members,
            });
        }
        let causing_anchor: Vec<usize> = (0..matrix.size())
            .filter(|&a| matrix.relation(a, anchor) == FootprintRelation::Follows)
            .collect();
        for members in merge_compatible_subsets(&causing_anchor, matrix) {
            sets.insert(RelationSet {
                role: RelationRole::End,
                anchor,
                members,
            });
        }
    }
    sets
}

/// Whether two activity subsets may be merged: every cross pair must be in a choice
/// relation (a subset of size k is only valid if all its internal pairs are, which
/// holds inductively from the singleton seeds)
fn subsets_compatible(matrix: &FootprintMatrix, a: &[usize], b: &[usize]) -> bool {
    a.iter()
        .all(|&x| b.iter().all(|&y| matrix.is_choice(x, y)))
}

/// Compute all mutually choice-compatible subsets of the base candidates
///
/// Worklist fixed point over canonical sorted index vectors: every subset created by a
/// merge is itself re-queued for merging against everything found so far, until no pass
/// produces a new subset. The result contains the singleton seeds and every merged
/// subset of any size.
fn merge_compatible_subsets(base: &[usize], matrix: &FootprintMatrix) -> BTreeSet<Vec<usize>> {
    let mut subsets: BTreeSet<Vec<usize>> = base.iter().map(|&act| vec![act]).collect();
    let mut worklist: VecDeque<Vec<usize>> = subsets.iter().cloned().collect();
    while let Some(current) = worklist.pop_front() {
        let merged: Vec<Vec<usize>> = subsets
            .iter()
            .filter(|other| subsets_compatible(matrix, &current, other.as_slice()))
            .map(|other| {
                let mut union: Vec<usize> =
                    current.iter().chain(other.iter()).copied().collect();
                union.sort_unstable();
                union.dedup();
                union
            })
            .collect();
        for subset in merged {
            if !subsets.contains(&subset) {
                worklist.push_back(subset.clone());
                subsets.insert(subset);
            }
        }
    }
    subsets
}
