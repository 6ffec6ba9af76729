use super::prelude::*;
use crate::parameters::ScaleFreeParameters;
use pcg_rand::Pcg64;
use rand::{Rng, SeedableRng};

pub mod algo_endpoint_list;
pub mod algo_linear_scan;

/// Seed used when the caller does not provide one.
pub const DEFAULT_SEED: u64 = 3312;

/// A preferential attachment generator.
///
/// The graph starts as a complete graph on `initial_degree` nodes. Every
/// further node picks `initial_degree` distinct earlier nodes, each with
/// probability proportional to its current degree, and connects to them.
pub trait Algorithm<R: Rng>: Sized {
    const NAME: &'static str;

    fn new(rng: R, num_nodes: Node, initial_degree: Node) -> Result<Self>;

    /// Emits all edges of a fresh graph into `writer`.
    fn run(&mut self, writer: &mut impl EdgeWriter) -> Result<()>;

    /// Degrees after the last call to [`Algorithm::run`].
    fn degrees(&self) -> &[Node];

    fn from_parameters(rng: R, opt: &ScaleFreeParameters) -> Result<Self> {
        Self::new(rng, opt.nodes, opt.initial_degree)
    }
}

pub(crate) fn check_dimensions(num_nodes: Node, initial_degree: Node) -> Result<()> {
    if initial_degree > num_nodes {
        return Err(Error::invalid(
            "initial_degree",
            format!(
                "seed graph of {} nodes does not fit into {} nodes",
                initial_degree, num_nodes
            ),
        ));
    }
    Ok(())
}

/// Writes the complete graph on nodes `0..num_seed_nodes` and sets their degrees.
pub(crate) fn emit_seed_clique(
    num_seed_nodes: Node,
    degrees: &mut [Node],
    writer: &mut impl EdgeWriter,
) {
    for u in 0..num_seed_nodes {
        for v in 0..u {
            writer.add_edge(u, v);
        }
        degrees[u] = num_seed_nodes - 1;
    }
}

/// Runs algorithm `A` and collects the result as a dense matrix.
pub fn generate<R: Rng, A: Algorithm<R>>(
    rng: R,
    num_nodes: Node,
    initial_degree: Node,
) -> Result<AdjacencyMatrix> {
    let mut algorithm = A::new(rng, num_nodes, initial_degree)?;
    let mut matrix = AdjacencyMatrix::new(num_nodes);
    algorithm.run(&mut matrix)?;
    Ok(matrix)
}

/// Scale-free graph on `num_nodes` nodes where each new node attaches to
/// `initial_degree` existing ones; reproducible for a given `seed`.
///
/// # Example
/// ```
/// use rust_compstat::algorithm::scale_free;
///
/// let g = scale_free(50, 2, 3312).unwrap();
/// assert!(g.is_symmetric());
/// assert_eq!(g.number_of_edges(), 1 + 48 * 2);
/// assert_eq!(g, scale_free(50, 2, 3312).unwrap());
/// ```
pub fn scale_free(num_nodes: Node, initial_degree: Node, seed: u64) -> Result<AdjacencyMatrix> {
    generate::<_, algo_linear_scan::AlgoLinearScan<_>>(
        Pcg64::seed_from_u64(seed),
        num_nodes,
        initial_degree,
    )
}

#[cfg(test)]
mod test {
    use super::algo_endpoint_list::AlgoEndpointList;
    use super::algo_linear_scan::AlgoLinearScan;
    use super::*;
    use crate::edge_writer::DegreeCount;

    fn build<A: Algorithm<Pcg64>>(n: Node, m: Node, seed: u64) -> AdjacencyMatrix {
        generate::<_, A>(Pcg64::seed_from_u64(seed), n, m).unwrap()
    }

    fn validate(g: &AdjacencyMatrix, m: Node) {
        let n = g.num_nodes();
        assert!(g.is_symmetric());

        for u in 0..n {
            assert_eq!(g.get(u, u), 0, "self loop at {}", u);

            let earlier = g.row(u)[..u].iter().map(|&c| c as Node).sum::<Node>();
            if u < m {
                assert_eq!(earlier, u, "seed node {} not fully connected", u);
            } else {
                assert_eq!(earlier, m, "node {} has {} edges to prior nodes", u, earlier);
            }
        }

        let expected_edges = m * m.saturating_sub(1) / 2 + n.saturating_sub(m) * m;
        assert_eq!(g.number_of_edges(), expected_edges);
    }

    fn structure<A: Algorithm<Pcg64>>() {
        for &(n, m) in &[(0, 0), (5, 0), (1, 1), (10, 1), (2, 2), (30, 2), (40, 3), (25, 5)] {
            for seed in 0..5 {
                validate(&build::<A>(n, m, seed), m);
            }
        }
    }

    fn reproducible<A: Algorithm<Pcg64>>() {
        assert_eq!(build::<A>(100, 3, 42), build::<A>(100, 3, 42));
        assert_ne!(build::<A>(100, 3, 42), build::<A>(100, 3, 43));
    }

    fn degrees_match_matrix<A: Algorithm<Pcg64>>() {
        let mut algorithm = A::new(Pcg64::seed_from_u64(7), 60, 2).unwrap();
        let mut matrix = AdjacencyMatrix::new(60);
        algorithm.run(&mut matrix).unwrap();
        assert_eq!(algorithm.degrees(), matrix.degrees().as_slice());
    }

    fn uniform_when_degrees_tie<A: Algorithm<Pcg64>>() {
        // after node 2 every node has degree 2, so node 3 picks each pair with p = 1/3
        const RUNS: u64 = 3000;
        let mut pairs = [0usize; 3];
        for seed in 0..RUNS {
            let g = build::<A>(4, 2, seed);
            match (g.has_edge(3, 0), g.has_edge(3, 1), g.has_edge(3, 2)) {
                (true, true, false) => pairs[0] += 1,
                (true, false, true) => pairs[1] += 1,
                (false, true, true) => pairs[2] += 1,
                other => panic!("unexpected attachment {:?}", other),
            }
        }

        for count in pairs {
            let freq = count as f64 / RUNS as f64;
            assert!((freq - 1.0 / 3.0).abs() < 0.04, "{:?}", pairs);
        }
    }

    fn prefers_high_degree<A: Algorithm<Pcg64>>() {
        // star-like start: node 0 collects the early edges with m = 1
        const RUNS: u64 = 2000;
        let mut hits = 0;
        for seed in 0..RUNS {
            let g = build::<A>(4, 1, seed);
            // node 0 has degree 2 and node 1 degree 1 whenever node 2 attached to 0
            if g.has_edge(2, 0) && g.has_edge(3, 0) {
                hits += 1;
            }
        }

        // P(2->0) = 1/2, P(3->0 | 2->0) = 2/4
        let freq = hits as f64 / RUNS as f64;
        assert!((freq - 0.25).abs() < 0.04, "{}", freq);
    }

    fn rejects_oversized_seed<A: Algorithm<Pcg64>>() {
        let res = A::new(Pcg64::seed_from_u64(0), 3, 4);
        assert!(matches!(
            res,
            Err(Error::InvalidArgument {
                name: "initial_degree",
                ..
            })
        ));
    }

    macro_rules! algorithm_tests {
        ($module:ident, $algo:ty) => {
            mod $module {
                use super::*;

                #[test]
                fn structure() {
                    super::structure::<$algo>();
                }

                #[test]
                fn reproducible() {
                    super::reproducible::<$algo>();
                }

                #[test]
                fn degrees_match_matrix() {
                    super::degrees_match_matrix::<$algo>();
                }

                #[test]
                fn uniform_when_degrees_tie() {
                    super::uniform_when_degrees_tie::<$algo>();
                }

                #[test]
                fn prefers_high_degree() {
                    super::prefers_high_degree::<$algo>();
                }

                #[test]
                fn rejects_oversized_seed() {
                    super::rejects_oversized_seed::<$algo>();
                }
            }
        };
    }

    algorithm_tests!(linear_scan, AlgoLinearScan<Pcg64>);
    algorithm_tests!(endpoint_list, AlgoEndpointList<Pcg64>);

    #[test]
    fn single_seed_node_falls_back_to_uniform() {
        let g = scale_free(2, 1, 1).unwrap();
        assert!(g.has_edge(1, 0));
    }

    #[test]
    fn seed_only() {
        let g = scale_free(4, 4, 1).unwrap();
        assert_eq!(g.number_of_edges(), 6);
    }

    #[test]
    fn seed_graph_degrees_via_writer() {
        let mut count = DegreeCount::new(5);
        let mut degrees = vec![0; 5];
        emit_seed_clique(3, &mut degrees, &mut count);
        assert_eq!(count.degrees(), &[2, 2, 2, 0, 0]);
        assert_eq!(degrees, vec![2, 2, 2, 0, 0]);
    }
}
