use super::*;
use rand::prelude::SliceRandom;
use tracing::{debug, info};

/// Keeps one list entry per edge endpoint, so a uniform draw from the list
/// selects a node with probability proportional to its degree. Nodes already
/// chosen for the current new node are rejected and redrawn.
pub struct AlgoEndpointList<R: Rng> {
    rng: R,
    num_nodes: Node,
    initial_degree: Node,

    degrees: Vec<Node>,
    endpoints: Vec<Node>,
    hosts: Vec<Node>,

    num_samples: usize,
}

impl<R: Rng> Algorithm<R> for AlgoEndpointList<R> {
    const NAME: &'static str = "endpoints";

    fn new(rng: R, num_nodes: Node, initial_degree: Node) -> Result<Self> {
        check_dimensions(num_nodes, initial_degree)?;

        Ok(Self {
            rng,
            num_nodes,
            initial_degree,

            degrees: vec![0; num_nodes],
            endpoints: Vec::with_capacity(2 * num_nodes * initial_degree),
            hosts: Vec::with_capacity(initial_degree),

            num_samples: 0,
        })
    }

    fn run(&mut self, writer: &mut impl EdgeWriter) -> Result<()> {
        info!(
            algorithm = Self::NAME,
            nodes = self.num_nodes,
            initial_degree = self.initial_degree,
            "generating scale-free graph"
        );

        self.degrees.iter_mut().for_each(|d| *d = 0);
        self.endpoints.clear();
        self.num_samples = 0;

        emit_seed_clique(self.initial_degree, &mut self.degrees, writer);
        for u in 0..self.initial_degree {
            for _ in 0..self.degrees[u] {
                self.endpoints.push(u);
            }
        }

        for new_node in self.initial_degree..self.num_nodes {
            self.hosts.clear();
            for _ in 0..self.initial_degree {
                let host = self.sample_host(new_node);
                self.hosts.push(host);
            }

            // update neighbors
            for &h in &self.hosts {
                self.degrees[h] += 1;
                self.endpoints.push(h);
                self.endpoints.push(new_node);
                writer.add_edge(new_node, h);
            }

            self.degrees[new_node] = self.initial_degree;
            debug!(node = new_node, hosts = ?self.hosts, "attached");
        }

        let num_hosts = self.num_nodes.saturating_sub(self.initial_degree) * self.initial_degree;
        info!(
            nodes = self.num_nodes,
            samples_per_host = self.num_samples as f64 / num_hosts.max(1) as f64,
            "done"
        );
        Ok(())
    }

    fn degrees(&self) -> &[Node] {
        &self.degrees
    }
}

impl<R: Rng> AlgoEndpointList<R> {
    /// Draws a node from `0..new_node` that is not yet a host of `new_node`.
    ///
    /// The endpoint list is empty only while the total degree is zero, which
    /// happens for `initial_degree <= 1`; then the draw is uniform. For
    /// `initial_degree >= 2` every existing node has positive degree, so
    /// rejection always terminates.
    fn sample_host(&mut self, new_node: Node) -> Node {
        loop {
            self.num_samples += 1;

            let proposal = match self.endpoints.choose(&mut self.rng) {
                Some(&u) => u,
                None => self.rng.gen_range(0..new_node),
            };

            if !self.hosts.contains(&proposal) {
                break proposal;
            }
        }
    }
}
