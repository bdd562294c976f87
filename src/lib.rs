#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]
#![doc = include_str!("../README.md")]

///
/// Event logs as plain activity sequences
///
pub mod event_log {
    /// Activity projection of event logs (label↔index mappings and index traces)
    pub mod activity_projection;

    pub use activity_projection::{ActivityProjection, DiscoveryError};
}

///
/// Alpha-style process discovery
///
pub mod alpha {
    /// Footprint relation matrix construction
    pub mod footprint;
    /// Config, pipeline and net assembly
    pub mod full;
    /// Relation set building (worklist fixed-point merge of choice groups)
    pub mod relation_building;
    /// Redundancy pruning of relation sets
    pub mod relation_pruning;
}

///
/// Petri nets
///
pub mod petri_net {
    /// [`PetriNet`] struct
    pub mod petri_net_struct;

    #[doc(inline)]
    pub use petri_net_struct::PetriNet;
}

#[doc(inline)]
pub use alpha::full::{alpha_discover_petri_net, AlphaConfig};
#[doc(inline)]
pub use event_log::activity_projection::{ActivityProjection, DiscoveryError};
#[doc(inline)]
pub use petri_net::petri_net_struct::PetriNet;
