/// Error types for graph validation, mesh access and conversion
use thiserror::Error;

/// Result type used throughout the core crate
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a polygon refuses to be built
///
/// Checks run in declaration order, so the first rule an input breaks is the
/// one reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon needs at least 3 edges, got {0}")]
    TooFewEdges(usize),

    #[error("polygon has {edges} edges but {vertices} vertices")]
    LengthMismatch { edges: usize, vertices: usize },

    #[error("adjacent vertices {index} and {next} share id {id}")]
    SameAdjacentId { index: usize, next: usize, id: i32 },

    #[error("edge {index} connects {found:?}, expected vertices {expected:?}")]
    UnknownVertex {
        index: usize,
        expected: [i32; 2],
        found: [i32; 2],
    },

    #[error("vertex {0} connects more than two edges")]
    SharedVertex(i32),

    #[error("edge id {0} used more than once")]
    DuplicateEdgeId(i32),
}

/// Core errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A property-mode mesh was asked for a name it does not carry
    #[error("mesh property not found: {0}")]
    MissingProperty(String),

    #[error("expected a {expected} mesh, found {found}")]
    WrongMeshKind {
        expected: &'static str,
        found: &'static str,
    },

    #[error("entity {entity} references vertex {index}, mesh has {count} vertices")]
    IndexOutOfRange {
        entity: usize,
        index: usize,
        count: usize,
    },
}

impl Error {
    /// Create a missing property error
    pub fn missing_property(name: impl Into<String>) -> Self {
        Error::MissingProperty(name.into())
    }
}
