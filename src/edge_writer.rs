use super::*;
use itertools::Itertools;
use std::io::Write;

/// Sink for the undirected edges produced by a graph generator.
pub trait EdgeWriter {
    fn add_edge(&mut self, u: Node, v: Node);
}

/// Plain edge list in emission order.
impl EdgeWriter for Vec<Edge> {
    fn add_edge(&mut self, u: Node, v: Node) {
        self.push((u, v));
    }
}

impl<W: EdgeWriter + ?Sized> EdgeWriter for &mut W {
    fn add_edge(&mut self, u: Node, v: Node) {
        (**self).add_edge(u, v);
    }
}

/// Forwards every edge to both sinks, first `.0` then `.1`.
impl<A: EdgeWriter, B: EdgeWriter> EdgeWriter for (A, B) {
    fn add_edge(&mut self, u: Node, v: Node) {
        self.0.add_edge(u, v);
        self.1.add_edge(u, v);
    }
}

/// Counts edges and node degrees without storing the graph.
#[derive(Clone, Debug)]
pub struct DegreeCount {
    edges: usize,
    degrees: Vec<Node>,
}

impl DegreeCount {
    pub fn new(num_nodes: Node) -> Self {
        Self {
            edges: 0,
            degrees: vec![0; num_nodes],
        }
    }

    pub fn degrees(&self) -> &[Node] {
        &self.degrees
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges
    }

    /// Pairs `(degree, number of nodes with that degree)` in ascending degree.
    pub fn degree_distribution(&self) -> Vec<(Node, usize)> {
        self.degrees
            .iter()
            .copied()
            .counts()
            .into_iter()
            .sorted_unstable()
            .collect()
    }

    /// Writes one `#DD degree, count` line per distinct degree.
    pub fn write_distribution(&self, writer: &mut impl Write) -> Result<()> {
        for (degree, nodes) in self.degree_distribution() {
            writeln!(writer, "#DD {:>10}, {:>10}", degree, nodes)?;
        }
        Ok(())
    }
}

impl EdgeWriter for DegreeCount {
    fn add_edge(&mut self, u: Node, v: Node) {
        self.edges += 1;
        self.degrees[u] += 1;
        self.degrees[v] += 1;
    }
}

/// One `u v` line per edge.
pub fn write_edge_list(edges: &[Edge], writer: &mut impl Write) -> Result<()> {
    for &(u, v) in edges {
        writeln!(writer, "{} {}", u, v)?;
    }
    Ok(())
}
