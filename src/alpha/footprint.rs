use serde::{Deserialize, Serialize};

use crate::event_log::activity_projection::ActivityProjection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Footprint classification of an ordered activity pair
pub enum FootprintRelation {
    /// No direct adjacency observed in either order
    #[default]
    None,
    /// The first activity directly precedes the second in some trace, never the reverse
    Follows,
    /// The second activity directly precedes the first in some trace, never the reverse
    Precedes,
    /// Both orders observed: the pair is concurrent/causally ambiguous
    Parallel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Square footprint relation matrix over activity indices
///
/// Cell `(a, b)` classifies the observed ordering behavior of `a` and `b` across the
/// whole log. Classification is monotone: [`FootprintRelation::Parallel`] is absorbing
/// and never regresses once both orders have been observed. A
/// [`FootprintRelation::Parallel`] diagonal cell marks a self-looping activity (the
/// activity was directly followed by itself in some trace).
pub struct FootprintMatrix {
    size: usize,
    cells: Vec<FootprintRelation>,
}

impl FootprintMatrix {
    /// Create a new matrix of the given size with all cells set to [`FootprintRelation::None`]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![FootprintRelation::None; size * size],
        }
    }

    /// Build the footprint matrix of a projected log
    ///
    /// Walks every adjacent activity pair of every trace, recording a forward
    /// observation for the pair and a backward observation for its mirror. Traces of
    /// length 0 or 1 contribute no adjacency data.
    pub fn from_projection(proj: &ActivityProjection) -> Self {
        let mut matrix = Self::new(proj.activities.len());
        for trace in &proj.traces {
            for pair in trace.windows(2) {
                matrix.observe_forward(pair[0], pair[1]);
                matrix.observe_backward(pair[1], pair[0]);
            }
        }
        matrix
    }

    /// Number of activities (rows/columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Relation recorded for the ordered pair `(a, b)`
    pub fn relation(&self, a: usize, b: usize) -> FootprintRelation {
        self.cells[a * self.size + b]
    }

    /// Whether activity `a` was ever directly followed by itself
    ///
    /// A self-adjacency fires both the forward and the backward observation for the
    /// same diagonal cell, so a self-looping activity always ends up
    /// [`FootprintRelation::Parallel`] with itself.
    pub fn has_self_loop(&self, a: usize) -> bool {
        self.relation(a, a) == FootprintRelation::Parallel
    }

    /// Whether `a` and `b` are in a choice relation (no adjacency in either order)
    pub fn is_choice(&self, a: usize, b: usize) -> bool {
        self.relation(a, b) == FootprintRelation::None
    }

    fn observe_forward(&mut self, a: usize, b: usize) {
        let cell = &mut self.cells[a * self.size + b];
        *cell = match *cell {
            FootprintRelation::None | FootprintRelation::Follows => FootprintRelation::Follows,
            FootprintRelation::Precedes | FootprintRelation::Parallel => {
                FootprintRelation::Parallel
            }
        };
    }

    fn observe_backward(&mut self, a: usize, b: usize) {
        let cell = &mut self.cells[a * self.size + b];
        *cell = match *cell {
            FootprintRelation::None | FootprintRelation::Precedes => FootprintRelation::Precedes,
            FootprintRelation::Follows | FootprintRelation::Parallel => {
                FootprintRelation::Parallel
            }
        };
    }
}
