pub mod adjacency;
pub mod algorithm;
pub mod binomial;
pub mod edge_writer;
pub mod error;
pub mod logging;
pub mod nearest_neighbor;
pub mod parameters;
pub mod sampling;

pub type Node = usize;
pub type Edge = (Node, Node);

pub use error::{Error, Result};

pub mod prelude {
    use super::*;

    pub use super::{Edge, Error, Node, Result};
    pub use adjacency::AdjacencyMatrix;
    pub use algorithm::{scale_free, Algorithm};
    pub use binomial::Binom;
    pub use edge_writer::EdgeWriter;
    pub use nearest_neighbor::{nearest_neighbors, Matches};
}
