use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
/// Place in a Petri net
pub struct Place {
    /// Place label
    ///
    /// Discovered places carry the braced predecessor/successor groups they connect
    /// (e.g., `({'a'}, {'b', 'c'})`); the universal source and sink places are labeled
    /// `start` and `end`.
    pub label: Option<String>,
    id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
/// Transition in a Petri net
pub struct Transition {
    /// Transition label (None if this transition is _invisible_)
    pub label: Option<String>,
    id: Uuid,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type", content = "nodes")]
/// Arc type in a Petri net
pub enum ArcType {
    /// From Place to Transition
    PlaceTransition(Uuid, Uuid),
    /// From Transition to Place
    TransitionPlace(Uuid, Uuid),
}

impl ArcType {
    /// Create new from place to transition
    pub fn place_to_transition(from: PlaceID, to: TransitionID) -> ArcType {
        ArcType::PlaceTransition(from.0, to.0)
    }
    /// Create new from transition to place
    pub fn transition_to_place(from: TransitionID, to: PlaceID) -> ArcType {
        ArcType::TransitionPlace(from.0, to.0)
    }
}

#[derive(Debug, Deserialize, Serialize)]
/// Arc in a Petri net
///
/// Connecting a transition and a place (or the other way around)
pub struct Arc {
    /// Source and target of Arc
    pub from_to: ArcType,
    /// Weight (i.e., how many tokens this arc moves)
    pub weight: u32,
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize, Eq, Hash)]
/// Place ID
pub struct PlaceID(pub Uuid);
impl PlaceID {
    /// Get UUID
    pub fn get_uuid(self) -> Uuid {
        self.0
    }
}
impl From<&Place> for PlaceID {
    fn from(value: &Place) -> Self {
        PlaceID(value.id)
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize, Eq, Hash)]
/// Transition ID
pub struct TransitionID(pub Uuid);
impl From<&Transition> for TransitionID {
    fn from(value: &Transition) -> Self {
        TransitionID(value.id)
    }
}
impl TransitionID {
    /// Get UUID
    pub fn get_uuid(self) -> Uuid {
        self.0
    }
}

/// Marking of a Petri net: Assigning [`PlaceID`]s to a number of tokens
pub type Marking = HashMap<PlaceID, u64>;

#[derive(Debug, Deserialize, Serialize)]
///
/// A Petri net of [`Place`]s and [`Transition`]s
///
/// Bipartite graph of [`Place`]s and [`Transition`]s with [`Arc`]s connecting them, as well as an initial and final [`Marking`]s
pub struct PetriNet {
    /// Places
    pub places: HashMap<Uuid, Place>,
    /// Transitions
    pub transitions: HashMap<Uuid, Transition>,
    /// Arcs
    pub arcs: Vec<Arc>,
    /// Initial marking
    pub initial_marking: Option<Marking>,
    /// Final markings (any of them are accepted as a final marking)
    pub final_markings: Option<Vec<Marking>>,
}

impl Default for PetriNet {
    fn default() -> Self {
        Self::new()
    }
}
impl PetriNet {
    /// Create new [`PetriNet`] with no places or transitions
    pub fn new() -> Self {
        Self {
            places: HashMap::new(),
            transitions: HashMap::new(),
            arcs: Vec::new(),
            initial_marking: None,
            final_markings: None,
        }
    }
    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self).unwrap()
    }
    /// Add a place with a label (and with an optional passed UUID)
    ///
    /// If no ID is passed, a new UUID will be generated
    pub fn add_place(&mut self, label: Option<String>, place_id: Option<Uuid>) -> PlaceID {
        let place_id = place_id.unwrap_or(Uuid::new_v4());
        let place = Place {
            id: place_id,
            label,
        };
        self.places.insert(place_id, place);
        PlaceID(place_id)
    }

    /// Add a transition with a label (and with an optional passed UUID)
    ///
    /// If no ID is passed, a new UUID will be generated
    pub fn add_transition(
        &mut self,
        label: Option<String>,
        transition_id: Option<Uuid>,
    ) -> TransitionID {
        let transition_id = transition_id.unwrap_or(Uuid::new_v4());
        let transition = Transition {
            id: transition_id,
            label,
        };
        self.transitions.insert(transition_id, transition);
        TransitionID(transition_id)
    }
    /// Add an arc
    pub fn add_arc(&mut self, from_to: ArcType, weight: Option<u32>) {
        self.arcs.push(Arc {
            from_to,
            weight: weight.unwrap_or(1),
        });
    }

    /// Find the transition carrying the passed label
    ///
    /// Transition labels are unique in discovered nets (one transition per activity)
    pub fn transition_by_label(&self, label: &str) -> Option<TransitionID> {
        self.transitions
            .values()
            .find(|t| t.label.as_deref() == Some(label))
            .map(|t| t.into())
    }

    /// Find all places carrying the passed label
    ///
    /// Place labels are not necessarily unique: a start-anchored and an end-anchored
    /// relation over the same activities render to the same label
    pub fn places_by_label(&self, label: &str) -> Vec<PlaceID> {
        self.places
            .values()
            .filter(|p| p.label.as_deref() == Some(label))
            .map(|p| p.into())
            .collect()
    }

    /// Get the preset of a [`PetriNet`] place
    pub fn preset_of_place(&self, p: PlaceID) -> Vec<TransitionID> {
        self.arcs
            .iter()
            .filter_map(|x: &Arc| match x.from_to {
                ArcType::TransitionPlace(from, to) if to == p.0 => Some(TransitionID(from)),
                _ => None,
            })
            .collect()
    }

    /// Get the preset of a [`PetriNet`] transition
    pub fn preset_of_transition(&self, t: TransitionID) -> Vec<PlaceID> {
        self.arcs
            .iter()
            .filter_map(|x: &Arc| match x.from_to {
                ArcType::PlaceTransition(from, to) if to == t.0 => Some(PlaceID(from)),
                _ => None,
            })
            .collect()
    }

    /// Get the postset of a [`PetriNet`] place
    pub fn postset_of_place(&self, p: PlaceID) -> Vec<TransitionID> {
        self.arcs
            .iter()
            .filter_map(|x: &Arc| match x.from_to {
                ArcType::PlaceTransition(from, to) if from == p.0 => Some(TransitionID(to)),
                _ => None,
            })
            .collect()
    }

    /// Get the postset of a [`PetriNet`] transition
    pub fn postset_of_transition(&self, t: TransitionID) -> Vec<PlaceID> {
        self.arcs
            .iter()
            .filter_map(|x: &Arc| match x.from_to {
                ArcType::TransitionPlace(from, to) if from == t.0 => Some(PlaceID(to)),
                _ => None,
            })
            .collect()
    }

    /// Check if place is in initial marking
    pub fn is_in_initial_marking(&self, p: &PlaceID) -> bool {
        self.initial_marking.as_ref().is_some_and(|m| m.contains_key(p))
    }

    /// Check if place is in _any_ final marking
    pub fn is_in_a_final_marking(&self, p: &PlaceID) -> bool {
        self.final_markings
            .as_ref()
            .is_some_and(|ms| ms.iter().any(|m| m.contains_key(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn petri_nets() {
        let mut net = PetriNet::new();
        let p1 = net.add_place(Some("start".into()), None);
        let t1 = net.add_transition(Some("register".into()), None);
        let t2 = net.add_transition(Some("archive".into()), None);
        net.add_arc(ArcType::place_to_transition(p1, t1), None);
        net.add_arc(ArcType::transition_to_place(t2, p1), None);

        assert!(net.postset_of_transition(t1).is_empty());
        assert!(net.preset_of_transition(t1) == vec![p1]);
        assert!(net.postset_of_place(p1) == vec![t1]);
        assert!(net.preset_of_place(p1) == vec![t2]);
        assert!(net.preset_of_transition(t2).is_empty());
        assert_eq!(net.transition_by_label("register"), Some(t1));
        assert_eq!(net.transition_by_label("discard"), None);
        assert_eq!(net.places_by_label("start"), vec![p1]);
    }

    #[test]
    fn markings() {
        let mut net = PetriNet::new();
        let start = net.add_place(Some("start".into()), None);
        let end = net.add_place(Some("end".into()), None);
        let other = net.add_place(None, None);
        net.initial_marking = Some(Marking::from_iter([(start, 2)]));
        net.final_markings = Some(vec![Marking::from_iter([(end, 1)])]);

        assert!(net.is_in_initial_marking(&start));
        assert!(!net.is_in_initial_marking(&end));
        assert!(net.is_in_a_final_marking(&end));
        assert!(!net.is_in_a_final_marking(&other));
    }

    #[test]
    fn serialize_petri_net() {
        let mut net = PetriNet::new();
        let p = net.add_place(Some("({'a'}, {'b'})".into()), None);
        let t = net.add_transition(Some("a".into()), None);
        net.add_arc(ArcType::transition_to_place(t, p), None);

        let json = net.to_json();
        let parsed: PetriNet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.places.len(), 1);
        assert_eq!(parsed.transitions.len(), 1);
        assert_eq!(parsed.preset_of_place(p), vec![t]);
        assert_eq!(
            parsed.places.values().next().unwrap().label.as_deref(),
            Some("({'a'}, {'b'})")
        );
    }
}
