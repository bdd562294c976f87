use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::event_log::activity_projection::{ActivityProjection, DiscoveryError};
use crate::petri_net::petri_net_struct::{ArcType, Marking, PetriNet, TransitionID};

use super::footprint::FootprintMatrix;
use super::relation_building::{build_relation_sets, RelationRole, RelationSet};
use super::relation_pruning::prune_relation_sets;

/// Label of the universal start place
pub const START_PLACE_LABEL: &str = "start";
/// Label of the universal end place
pub const END_PLACE_LABEL: &str = "end";

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
/// Algorithm parameters for Alpha-style discovery
pub struct AlphaConfig {
    /// Token count placed on the universal start place in the initial marking
    pub initial_tokens: u64,
    /// Token count expected on the universal end place in the final marking
    pub final_tokens: u64,
    /// Discard relation sets containing a self-looping activity (the refined variant)
    pub exclude_self_loop_sets: bool,
}

impl Default for AlphaConfig {
    fn default() -> Self {
        Self {
            initial_tokens: 1,
            final_tokens: 1,
            exclude_self_loop_sets: true,
        }
    }
}

impl AlphaConfig {
    /// Serialize discovery parameters to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
    /// Deserialize discovery parameters from JSON string
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap()
    }
}

///
/// Discover a [`PetriNet`] from a log of activity-label traces
///
/// Runs the full pipeline: activity indexing, footprint matrix construction, relation
/// set building, redundancy pruning and net assembly. The returned net carries its
/// initial marking (tokens on the universal start place) and final marking (tokens on
/// the universal end place). Every call builds fresh state.
///
pub fn alpha_discover_petri_net<S: AsRef<str>>(
    log: &[Vec<S>],
    config: &AlphaConfig,
) -> Result<PetriNet, DiscoveryError> {
    let proj = ActivityProjection::from_traces(log)?;
    Ok(alpha_discover_petri_net_from_projection(&proj, config))
}

/// Run Alpha-style discovery on an already-projected log
pub fn alpha_discover_petri_net_from_projection(
    proj: &ActivityProjection,
    config: &AlphaConfig,
) -> PetriNet {
    let matrix = FootprintMatrix::from_projection(proj);
    let sets = build_relation_sets(&matrix);
    let sets = prune_relation_sets(&sets, &matrix, config.exclude_self_loop_sets);

    let mut pn = PetriNet::new();
    let transitions: Vec<TransitionID> = proj
        .activities
        .iter()
        .map(|act_name| pn.add_transition(Some(act_name.clone()), None))
        .collect();

    for set in &sets {
        add_relation_place(&mut pn, proj, set, &transitions);
    }

    let start_place = pn.add_place(Some(START_PLACE_LABEL.into()), None);
    for act in proj.start_activities() {
        pn.add_arc(ArcType::place_to_transition(start_place, transitions[act]), None);
    }
    let end_place = pn.add_place(Some(END_PLACE_LABEL.into()), None);
    for act in proj.end_activities() {
        pn.add_arc(ArcType::transition_to_place(transitions[act], end_place), None);
    }

    let mut initial_marking = Marking::new();
    initial_marking.insert(start_place, config.initial_tokens);
    let mut final_marking = Marking::new();
    final_marking.insert(end_place, config.final_tokens);
    pn.initial_marking = Some(initial_marking);
    pn.final_markings = Some(vec![final_marking]);
    pn
}

/// Turn one relation set into a place and wire its arcs
///
/// The anchor side depends on the role: a [`RelationRole::Start`] anchor feeds the
/// place that feeds every member, a [`RelationRole::End`] anchor is fed by the place
/// that every member feeds.
fn add_relation_place(
    pn: &mut PetriNet,
    proj: &ActivityProjection,
    set: &RelationSet,
    transitions: &[TransitionID],
) {
    let (predecessors, successors): (Vec<usize>, Vec<usize>) = match set.role {
        RelationRole::Start => (vec![set.anchor], set.members.clone()),
        RelationRole::End => (set.members.clone(), vec![set.anchor]),
    };
    let label = format!(
        "({{{}}}, {{{}}})",
        label_group(proj, &predecessors),
        label_group(proj, &successors)
    );
    let place = pn.add_place(Some(label), None);
    for &pred in &predecessors {
        pn.add_arc(ArcType::transition_to_place(transitions[pred], place), None);
    }
    for &succ in &successors {
        pn.add_arc(ArcType::place_to_transition(place, transitions[succ]), None);
    }
}

fn label_group(proj: &ActivityProjection, acts: &[usize]) -> String {
    acts.iter()
        .map(|&act| format!("'{}'", proj.activities[act]))
        .join(", ")
}
