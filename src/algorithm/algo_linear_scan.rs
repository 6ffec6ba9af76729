use super::*;
use crate::sampling::sample_without_replacement;
use tracing::{debug, info};

pub struct AlgoLinearScan<R: Rng> {
    rng: R,
    num_nodes: Node,
    initial_degree: Node,

    degrees: Vec<Node>,
    weights: Vec<u64>,
    hosts: Vec<Node>,
}

impl<R: Rng> Algorithm<R> for AlgoLinearScan<R> {
    const NAME: &'static str = "scan";

    fn new(rng: R, num_nodes: Node, initial_degree: Node) -> Result<Self> {
        check_dimensions(num_nodes, initial_degree)?;

        Ok(Self {
            rng,
            num_nodes,
            initial_degree,

            degrees: vec![0; num_nodes],
            weights: Vec::with_capacity(num_nodes),
            hosts: Vec::with_capacity(initial_degree),
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
        emit_seed_clique(self.initial_degree, &mut self.degrees, writer);

        for new_node in self.initial_degree..self.num_nodes {
            self.weights.clear();
            self.weights
                .extend(self.degrees[..new_node].iter().map(|&d| d as u64));

            sample_without_replacement(
                &mut self.rng,
                &self.weights,
                self.initial_degree,
                &mut self.hosts,
            )?;

            // update neighbors
            for &h in &self.hosts {
                self.degrees[h] += 1;
                writer.add_edge(new_node, h);
            }

            self.degrees[new_node] = self.initial_degree;
            debug!(node = new_node, hosts = ?self.hosts, "attached");
        }

        info!(nodes = self.num_nodes, "done");
        Ok(())
    }

    fn degrees(&self) -> &[Node] {
        &self.degrees
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pcg_rand::Pcg64;

    #[test]
    fn run_twice_starts_over() {
        let mut algo = AlgoLinearScan::new(Pcg64::seed_from_u64(11), 20, 2).unwrap();

        let mut first: Vec<Edge> = Vec::new();
        algo.run(&mut first).unwrap();
        let mut second: Vec<Edge> = Vec::new();
        algo.run(&mut second).unwrap();

        assert_eq!(first.len(), second.len());
        assert_eq!(algo.degrees().iter().sum::<Node>(), 2 * second.len());
    }

    #[test]
    fn seed_edges_come_first() {
        let mut algo = AlgoLinearScan::new(Pcg64::seed_from_u64(1), 5, 3).unwrap();
        let mut edges: Vec<Edge> = Vec::new();
        algo.run(&mut edges).unwrap();

        assert_eq!(&edges[..3], &[(1, 0), (2, 0), (2, 1)]);
        assert!(edges[3..].iter().all(|&(u, v)| u >= 3 && v < u));
    }
}
