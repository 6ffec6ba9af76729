//! Nearest neighbor of every point in a one-dimensional sample.
//!
//! For each index `i` the match is the index `j != i` minimising
//! `|x[i] - x[j]|`; among equally close candidates the lowest `j` wins.

use super::*;
use itertools::Itertools;
use std::str::FromStr;
use tracing::debug;

/// Parallel sequences, one entry per input point.
#[derive(Clone, Debug, PartialEq)]
pub struct Matches {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
    pub distances: Vec<f64>,
}

impl Matches {
    fn with_capacity(n: usize) -> Self {
        Self {
            indices: Vec::with_capacity(n),
            values: Vec::with_capacity(n),
            distances: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, x: &[f64], i: usize, j: usize) {
        self.indices.push(j);
        self.values.push(x[j]);
        self.distances.push((x[i] - x[j]).abs());
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[derive(Eq, Clone, Copy, PartialEq, Debug)]
pub enum Strategy {
    /// Full pairwise distance matrix, `O(n^2)`.
    Matrix,
    /// Sort once and compare adjacent runs of equal values, `O(n log n)`.
    Sorted,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "matrix" => Ok(Strategy::Matrix),
            "sorted" => Ok(Strategy::Sorted),
            _ => Err(format!("Unknown neighbor strategy: {}", s)),
        }
    }
}

/// Symmetric matrix of absolute differences with `f64::MAX` on the diagonal.
#[derive(Clone, Debug)]
pub struct DistanceMatrix {
    n: usize,
    cells: Vec<f64>,
}

impl DistanceMatrix {
    pub fn new(x: &[f64]) -> Self {
        let n = x.len();
        let mut cells = vec![0.0; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let d = (x[i] - x[j]).abs();
                cells[i * n + j] = d;
                cells[j * n + i] = d;
            }
            cells[i * n + i] = f64::MAX;
        }

        Self { n, cells }
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }

    /// Column of the smallest off-diagonal entry in row `i`, first one on ties.
    ///
    /// Requires at least two points.
    pub fn argmin_row(&self, i: usize) -> usize {
        let row = self.row(i);
        let mut best = usize::from(i == 0);
        for (j, &d) in row.iter().enumerate().skip(best + 1) {
            if j != i && d < row[best] {
                best = j;
            }
        }
        best
    }
}

/// Nearest neighbors via the full distance matrix.
///
/// # Example
/// ```
/// use rust_compstat::nearest_neighbor::nearest_neighbors;
///
/// let m = nearest_neighbors(&[1.0, 5.0, 9.0, 2.0]).unwrap();
/// assert_eq!(m.indices, vec![3, 3, 1, 0]);
/// assert_eq!(m.values, vec![2.0, 2.0, 5.0, 1.0]);
/// ```
pub fn nearest_neighbors(x: &[f64]) -> Result<Matches> {
    nearest_neighbors_with(x, Strategy::Matrix)
}

pub fn nearest_neighbors_with(x: &[f64], strategy: Strategy) -> Result<Matches> {
    check_input(x)?;
    debug!(points = x.len(), ?strategy, "matching nearest neighbors");

    Ok(match strategy {
        Strategy::Matrix => by_matrix(x),
        Strategy::Sorted => by_sorting(x),
    })
}

fn check_input(x: &[f64]) -> Result<()> {
    match x.len() {
        0 => return Err(Error::EmptyInput),
        1 => {
            return Err(Error::invalid(
                "x",
                "a single point has no neighbor other than itself",
            ))
        }
        _ => {}
    }

    if let Some(pos) = x.iter().position(|v| !v.is_finite()) {
        return Err(Error::invalid(
            "x",
            format!("value {} at index {} is not finite", x[pos], pos),
        ));
    }

    Ok(())
}

fn by_matrix(x: &[f64]) -> Matches {
    let dist = DistanceMatrix::new(x);
    let mut matches = Matches::with_capacity(x.len());

    for i in 0..x.len() {
        matches.push(x, i, dist.argmin_row(i));
    }

    matches
}

/// A maximal group of equal values; `first` and `second` are its two lowest indices.
#[derive(Clone, Copy, Debug)]
struct Run {
    value: f64,
    first: usize,
    second: Option<usize>,
}

fn by_sorting(x: &[f64]) -> Matches {
    let order = (0..x.len())
        .sorted_by(|&a, &b| x[a].total_cmp(&x[b]).then(a.cmp(&b)))
        .collect_vec();

    let mut runs: Vec<Run> = Vec::new();
    let mut run_of = vec![0; x.len()];

    for &i in &order {
        match runs.last_mut() {
            Some(run) if run.value == x[i] => {
                if run.second.is_none() {
                    run.second = Some(i);
                }
            }
            _ => runs.push(Run {
                value: x[i],
                first: i,
                second: None,
            }),
        }
        run_of[i] = runs.len() - 1;
    }

    let mut matches = Matches::with_capacity(x.len());
    for i in 0..x.len() {
        let r = run_of[i];
        let run = runs[r];

        let j = if let Some(second) = run.second {
            // a duplicate is at distance zero
            if run.first == i {
                second
            } else {
                run.first
            }
        } else {
            let d_lo = r.checked_sub(1).map_or(f64::INFINITY, |k| x[i] - runs[k].value);
            let d_hi = runs.get(r + 1).map_or(f64::INFINITY, |hi| hi.value - x[i]);
            let d = d_lo.min(d_hi);

            // distant values can round to the same difference, so every run
            // at distance `d` is a candidate
            let below = runs[..r]
                .iter()
                .rev()
                .take_while(|run| x[i] - run.value <= d);
            let above = runs[r + 1..]
                .iter()
                .take_while(|run| run.value - x[i] <= d);

            below
                .chain(above)
                .map(|run| run.first)
                .min()
                .unwrap_or(run.first)
        };

        matches.push(x, i, j);
    }

    matches
}

#[cfg(test)]
mod test {
    use super::*;
    use pcg_rand::Pcg64;
    use rand::{Rng, SeedableRng};

    fn brute_force_distance(x: &[f64], i: usize) -> f64 {
        (0..x.len())
            .filter(|&j| j != i)
            .map(|j| (x[i] - x[j]).abs())
            .fold(f64::INFINITY, f64::min)
    }

    fn validate(x: &[f64], m: &Matches) {
        assert_eq!(m.len(), x.len());
        for i in 0..x.len() {
            assert_ne!(m.indices[i], i);
            assert_eq!(m.values[i], x[m.indices[i]]);
            assert_eq!(m.distances[i], brute_force_distance(x, i));

            // lowest index among the equally close
            let first = (0..x.len())
                .find(|&j| j != i && (x[i] - x[j]).abs() == m.distances[i])
                .unwrap();
            assert_eq!(m.indices[i], first);
        }
    }

    #[test]
    fn small_example() {
        let x = [1.0, 5.0, 9.0, 2.0];
        for strategy in [Strategy::Matrix, Strategy::Sorted] {
            let m = nearest_neighbors_with(&x, strategy).unwrap();
            assert_eq!(m.indices, vec![3, 3, 1, 0]);
            assert_eq!(m.distances, vec![1.0, 3.0, 4.0, 1.0]);
            validate(&x, &m);
        }
    }

    #[test]
    fn not_mutual() {
        let x = [0.0, 3.0, 4.0];
        let m = nearest_neighbors(&x).unwrap();
        assert_eq!(m.indices, vec![1, 2, 1]);
        assert_ne!(m.indices[m.indices[0]], 0);
    }

    #[test]
    fn ties_pick_lowest_index() {
        let x = [5.0, 4.0, 6.0, 5.0, 4.0];
        for strategy in [Strategy::Matrix, Strategy::Sorted] {
            let m = nearest_neighbors_with(&x, strategy).unwrap();
            assert_eq!(m.indices, vec![3, 4, 0, 0, 1]);
        }

        let x = [2.0, 1.0, 3.0];
        for strategy in [Strategy::Matrix, Strategy::Sorted] {
            let m = nearest_neighbors_with(&x, strategy).unwrap();
            assert_eq!(m.indices, vec![1, 0, 0]);
        }
    }

    #[test]
    fn rounded_distances_tie() {
        // 1.0 - 1e-20 and 1.0 - 2e-20 both round to 1.0
        let x = [1.0, 1e-20, 2e-20];
        for strategy in [Strategy::Matrix, Strategy::Sorted] {
            let m = nearest_neighbors_with(&x, strategy).unwrap();
            assert_eq!(m.indices, vec![1, 2, 1]);
            validate(&x, &m);
        }

        let x = [3e-20, 1.0, 1e-20, 2e-20];
        for strategy in [Strategy::Matrix, Strategy::Sorted] {
            let m = nearest_neighbors_with(&x, strategy).unwrap();
            assert_eq!(m.indices[1], 0);
            validate(&x, &m);
        }
    }

    #[test]
    fn strategies_agree_on_random_input() {
        let mut rng = Pcg64::seed_from_u64(17);
        for round in 0..200 {
            let n = rng.gen_range(2..40);
            let x: Vec<f64> = if round % 2 == 0 {
                (0..n).map(|_| rng.gen_range(-10..10) as f64).collect()
            } else {
                (0..n).map(|_| rng.gen_range(-1e3..1e3)).collect()
            };

            let by_matrix = nearest_neighbors_with(&x, Strategy::Matrix).unwrap();
            let by_sorting = nearest_neighbors_with(&x, Strategy::Sorted).unwrap();

            validate(&x, &by_matrix);
            assert_eq!(by_matrix, by_sorting, "input: {:?}", x);
        }
    }

    #[test]
    fn distance_matrix_layout() {
        let dist = DistanceMatrix::new(&[1.0, 4.0, -2.0]);
        assert_eq!(dist.get(0, 0), f64::MAX);
        assert_eq!(dist.get(0, 1), 3.0);
        assert_eq!(dist.get(1, 0), 3.0);
        assert_eq!(dist.get(1, 2), 6.0);
        assert_eq!(dist.row(2), &[3.0, 6.0, f64::MAX]);
        assert_eq!(dist.argmin_row(2), 0);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(matches!(nearest_neighbors(&[]), Err(Error::EmptyInput)));
        assert!(matches!(
            nearest_neighbors(&[1.0]),
            Err(Error::InvalidArgument { name: "x", .. })
        ));
        assert!(matches!(
            nearest_neighbors(&[1.0, f64::NAN]),
            Err(Error::InvalidArgument { name: "x", .. })
        ));
        assert!(matches!(
            nearest_neighbors_with(&[f64::INFINITY, 1.0], Strategy::Sorted),
            Err(Error::InvalidArgument { name: "x", .. })
        ));
    }

    #[test]
    fn strategy_names() {
        assert_eq!("Matrix".parse::<Strategy>().unwrap(), Strategy::Matrix);
        assert_eq!("sorted".parse::<Strategy>().unwrap(), Strategy::Sorted);
        assert!("kd-tree".parse::<Strategy>().is_err());
    }
}
