use std::collections::BTreeSet;

use super::footprint::FootprintMatrix;
use super::relation_building::RelationSet;

/// Remove redundant relation sets before they become places
///
/// Two passes, in order:
/// 1. Strict-superset subsumption: a set is dropped if another set of the same role
///    spans more than two activities in total and strictly contains its participants.
///    A maximal choice group already implies the causal relation of all its sub-groups.
/// 2. Self-loop exclusion (only with `exclude_self_loop_sets`): a set is dropped
///    entirely if any participant, anchor included, is self-looping. An activity that
///    can repeat immediately is not in a choice relation with itself and breaks the
///    non-causal precondition the group was built on.
///
/// An empty result is valid; the discovered net then only carries the universal
/// start/end places.
pub fn prune_relation_sets(
    sets: &BTreeSet<RelationSet>,
    matrix: &FootprintMatrix,
    exclude_self_loop_sets: bool,
) -> BTreeSet<RelationSet> {
    let retained: BTreeSet<RelationSet> = sets
        .iter()
        .filter(|candidate| !is_subsumed(candidate, sets))
        .cloned()
        .collect();
    if !exclude_self_loop_sets {
        return retained;
    }
    retained
        .into_iter()
        .filter(|set| !set.participants().iter().any(|&act| matrix.has_self_loop(act)))
        .collect()
}

fn is_subsumed(candidate: &RelationSet, sets: &BTreeSet<RelationSet>) -> bool {
    let participants = candidate.participants();
    sets.iter().any(|other| {
        if other.role != candidate.role {
            return false;
        }
        let other_participants = other.participants();
        other_participants.len() > 2
            && other_participants.len() > participants.len()
            && other_participants.is_superset(&participants)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alpha::relation_building::{build_relation_sets, RelationRole};
    use crate::event_log::activity_projection::ActivityProjection;

    fn pruned_sets_of(log: &[Vec<&str>], exclude_self_loop_sets: bool) -> BTreeSet<RelationSet> {
        let proj = ActivityProjection::from_traces(log).unwrap();
        let matrix = FootprintMatrix::from_projection(&proj);
        prune_relation_sets(&build_relation_sets(&matrix), &matrix, exclude_self_loop_sets)
    }

    fn set(role: RelationRole, anchor: usize, members: &[usize]) -> RelationSet {
        RelationSet {
            role,
            anchor,
            members: members.to_vec(),
        }
    }

    #[test]
    fn subsumed_sets_are_dropped() {
        // a = 0, b = 1, c = 2, d = 3
        let sets = pruned_sets_of(&[vec!["a", "b", "d"], vec!["a", "c", "d"]], true);
        assert!(sets.contains(&set(RelationRole::Start, 0, &[1, 2])));
        assert!(!sets.contains(&set(RelationRole::Start, 0, &[1])));
        assert!(!sets.contains(&set(RelationRole::Start, 0, &[2])));
        assert!(sets.contains(&set(RelationRole::End, 3, &[1, 2])));
        assert!(!sets.contains(&set(RelationRole::End, 3, &[1])));
        // participants {b, d} vs. {b, c, d}: different role families, both stay
        assert!(sets.contains(&set(RelationRole::Start, 1, &[3])));
        assert!(sets.contains(&set(RelationRole::Start, 2, &[3])));
    }

    #[test]
    fn no_retained_strict_superset_pair_within_a_role() {
        let sets = pruned_sets_of(
            &[
                vec!["a", "b", "e"],
                vec!["a", "c", "e"],
                vec!["a", "d", "e"],
            ],
            true,
        );
        for s1 in &sets {
            for s2 in &sets {
                if s1 == s2 || s1.role != s2.role {
                    continue;
                }
                let (p1, p2) = (s1.participants(), s2.participants());
                assert!(!(p1.len() > p2.len() && p1.is_superset(&p2)));
            }
        }
        assert!(sets.contains(&set(RelationRole::Start, 0, &[1, 2, 3])));
    }

    #[test]
    fn two_member_sets_never_subsume_each_other() {
        // a = 0, b = 1, c = 2: both ({a}, {b}) and ({a}, {b}) / ({a}, {c}) are
        // 2-participant sets and must all survive pass 1
        let sets = pruned_sets_of(&[vec!["a", "b", "c"], vec!["a", "c", "b"]], true);
        let expected: BTreeSet<RelationSet> = [
            set(RelationRole::Start, 0, &[1]),
            set(RelationRole::Start, 0, &[2]),
            set(RelationRole::End, 1, &[0]),
            set(RelationRole::End, 2, &[0]),
        ]
        .into_iter()
        .collect();
        assert_eq!(sets, expected);
    }

    #[test]
    fn self_loop_participants_discard_the_whole_set() {
        // a = 0 self-loops; both the start-anchored and the end-anchored set contain it
        let log = vec![vec!["a", "a", "b"]];
        assert!(pruned_sets_of(&log, true).is_empty());

        let classic = pruned_sets_of(&log, false);
        assert!(classic.contains(&set(RelationRole::Start, 0, &[1])));
        assert!(classic.contains(&set(RelationRole::End, 1, &[0])));
    }

    #[test]
    fn self_loop_elsewhere_keeps_clean_sets() {
        // c = 2 self-loops, but the ({a}, {b}) relation does not involve it
        let sets = pruned_sets_of(&[vec!["a", "b"], vec!["c", "c"]], true);
        assert!(sets.contains(&set(RelationRole::Start, 0, &[1])));
        assert!(sets.contains(&set(RelationRole::End, 1, &[0])));
        assert_eq!(sets.len(), 2);
    }
}
