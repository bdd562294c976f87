use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

///
/// Error encountered while preparing a log for discovery
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// An activity label was empty or whitespace-only (with trace and event position included)
    BlankActivityLabel {
        /// Index of the offending trace in the input log
        trace: usize,
        /// Position of the offending event inside the trace
        position: usize,
    },
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryError::BlankActivityLabel { trace, position } => write!(
                f,
                "Blank activity label at position {position} of trace {trace}"
            ),
        }
    }
}

impl std::error::Error for DiscoveryError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Projection of an event log on just activity labels
///
/// Activities are indexed in ascending lexicographic order of their label, so the same
/// set of labels always yields the same index assignment. Traces are kept in input order
/// as sequences of activity indices.
pub struct ActivityProjection {
    /// Distinct activity labels; the position of a label is its activity index
    pub activities: Vec<String>,
    /// Inverse of [`ActivityProjection::activities`]: label to activity index
    pub act_to_index: HashMap<String, usize>,
    /// Traces as sequences of activity indices
    pub traces: Vec<Vec<usize>>,
}

impl ActivityProjection {
    /// Project a log (traces of activity labels) onto activity indices
    ///
    /// Fails with [`DiscoveryError::BlankActivityLabel`] if any label is empty or
    /// whitespace-only. An empty log is valid and yields an empty projection.
    pub fn from_traces<S: AsRef<str>>(traces: &[Vec<S>]) -> Result<Self, DiscoveryError> {
        for (trace, t) in traces.iter().enumerate() {
            for (position, act) in t.iter().enumerate() {
                if act.as_ref().trim().is_empty() {
                    return Err(DiscoveryError::BlankActivityLabel { trace, position });
                }
            }
        }
        let activity_set: BTreeSet<&str> = traces
            .iter()
            .flatten()
            .map(|act| act.as_ref())
            .collect();
        let activities: Vec<String> = activity_set.into_iter().map(String::from).collect();
        let act_to_index: HashMap<String, usize> = activities
            .iter()
            .enumerate()
            .map(|(i, act)| (act.clone(), i))
            .collect();
        let traces: Vec<Vec<usize>> = traces
            .iter()
            .map(|t| t.iter().map(|act| act_to_index[act.as_ref()]).collect())
            .collect();
        Ok(Self {
            activities,
            act_to_index,
            traces,
        })
    }

    /// Activities appearing first in at least one trace (sorted by index)
    pub fn start_activities(&self) -> Vec<usize> {
        let acts: BTreeSet<usize> = self.traces.iter().filter_map(|t| t.first().copied()).collect();
        acts.into_iter().collect()
    }

    /// Activities appearing last in at least one trace (sorted by index)
    pub fn end_activities(&self) -> Vec<usize> {
        let acts: BTreeSet<usize> = self.traces.iter().filter_map(|t| t.last().copied()).collect();
        acts.into_iter().collect()
    }

    /// Map a list of activity indices to their (sorted) labels
    pub fn acts_to_names(&self, acts: &[usize]) -> Vec<String> {
        let mut ret: Vec<String> = acts
            .iter()
            .map(|act| self.activities[*act].clone())
            .collect();
        ret.sort();
        ret
    }
}
