use super::*;
use crate::edge_writer::EdgeWriter;
use itertools::Itertools;
use std::io::Write;

/// Dense 0/1 adjacency matrix of an undirected graph, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    num_nodes: Node,
    cells: Vec<u8>,
}

impl AdjacencyMatrix {
    pub fn new(num_nodes: Node) -> Self {
        Self {
            num_nodes,
            cells: vec![0; num_nodes * num_nodes],
        }
    }

    pub fn num_nodes(&self) -> Node {
        self.num_nodes
    }

    pub fn get(&self, u: Node, v: Node) -> u8 {
        self.cells[u * self.num_nodes + v]
    }

    pub fn has_edge(&self, u: Node, v: Node) -> bool {
        self.get(u, v) != 0
    }

    pub fn row(&self, u: Node) -> &[u8] {
        &self.cells[u * self.num_nodes..(u + 1) * self.num_nodes]
    }

    /// Column sum of `u`, which equals the row sum since the matrix is symmetric.
    pub fn degree(&self, u: Node) -> Node {
        (0..self.num_nodes).map(|v| self.get(v, u) as Node).sum()
    }

    pub fn degrees(&self) -> Vec<Node> {
        (0..self.num_nodes).map(|u| self.degree(u)).collect()
    }

    pub fn number_of_edges(&self) -> usize {
        self.cells.iter().map(|&c| c as usize).sum::<usize>() / 2
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.num_nodes)
            .tuple_combinations()
            .all(|(u, v)| self.get(u, v) == self.get(v, u))
    }

    /// Edges `(u, v)` with `u > v`, ordered by `u` then `v`.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.num_nodes)
            .flat_map(move |u| (0..u).map(move |v| (u, v)))
            .filter(move |&(u, v)| self.has_edge(u, v))
    }

    /// Writes one space separated row per line.
    pub fn write_dense(&self, writer: &mut impl Write) -> std::io::Result<()> {
        for u in 0..self.num_nodes {
            writeln!(writer, "{}", self.row(u).iter().join(" "))?;
        }
        Ok(())
    }
}

impl EdgeWriter for AdjacencyMatrix {
    fn add_edge(&mut self, u: Node, v: Node) {
        debug_assert_ne!(u, v);
        let n = self.num_nodes;
        self.cells[u * n + v] = 1;
        self.cells[v * n + u] = 1;
    }
}
