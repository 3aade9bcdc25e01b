//! Error types for specification generation.

use heatgrid_image::SpecError;
use thiserror::Error;

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors that abort one core's generation.
///
/// Every variant is a configuration defect: deterministic, carrying enough
/// context to diagnose without re-running, and never retried. A failing core
/// never aborts the rest of a batch.
#[derive(Debug, Error)]
pub enum GenError {
    /// More than one outgoing edge targets a gatherer.
    #[error(
        "Heat element {vertex} has more than one output channel \
         (first {first}, second {second}); buckets: {context}"
    )]
    MultipleOutputChannels {
        /// Label of the element.
        vertex: String,
        /// Label of the first output edge found.
        first: String,
        /// Label of the offending second edge.
        second: String,
        /// Full classification context.
        context: String,
    },

    /// No directional and no injected input slot is bound.
    #[error(
        "Heat element {vertex} receives no data from neighbours or \
         injectors; buckets: {context}"
    )]
    NoLiveInputs {
        /// Label of the element.
        vertex: String,
        /// Full classification context.
        context: String,
    },

    /// The command channel resolved to the wrong number of keys.
    #[error(
        "Command channel of {vertex} resolved {actual} key(s), expected \
         exactly {expected}"
    )]
    CommandKeyCount {
        /// Label of the element.
        vertex: String,
        /// Required key count.
        expected: usize,
        /// Resolved key count.
        actual: usize,
    },

    /// A bound edge has no routing key.
    #[error("No routing key for edge {edge} of {vertex}")]
    MissingEdgeKey {
        /// Label of the element.
        vertex: String,
        /// Label of the keyless edge.
        edge: String,
    },

    /// Specification generation was requested for a non-element vertex.
    #[error("Vertex {vertex} does not generate a data specification")]
    NotASpecSource {
        /// Label of the vertex.
        vertex: String,
    },

    /// Image writing failed.
    #[error(transparent)]
    Spec(#[from] SpecError),
}
