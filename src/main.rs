use rust_compstat::algorithm::algo_endpoint_list::AlgoEndpointList;
use rust_compstat::algorithm::algo_linear_scan::AlgoLinearScan;
use rust_compstat::algorithm::Algorithm;
use rust_compstat::binomial::{write_report, Binom};
use rust_compstat::edge_writer::{write_edge_list, DegreeCount};
use rust_compstat::logging;
use rust_compstat::nearest_neighbor::{nearest_neighbors_with, Strategy};
use rust_compstat::parameters::{
    get_options, Command, GraphOutput, SamplingAlgorithm, ScaleFreeParameters,
};
use rust_compstat::prelude::*;
use std::io::{stdout, Write};
use std::time::Instant;

use pcg_rand::Pcg64;
use rand::SeedableRng;
use tracing::info;

fn execute<T: Algorithm<Pcg64>>(opt: &ScaleFreeParameters) -> Result<()> {
    let rng = Pcg64::seed_from_u64(opt.seed());
    let mut algorithm = T::from_parameters(rng, opt)?;
    let mut count = DegreeCount::new(opt.nodes);

    let start = Instant::now();
    match opt.output {
        GraphOutput::Matrix => {
            let mut matrix = AdjacencyMatrix::new(opt.nodes);
            algorithm.run(&mut (&mut matrix, &mut count))?;
            matrix.write_dense(&mut stdout().lock())?;
        }
        GraphOutput::Edges => {
            let mut edges: Vec<Edge> = Vec::new();
            algorithm.run(&mut (&mut edges, &mut count))?;
            write_edge_list(&edges, &mut stdout().lock())?;
        }
        GraphOutput::None => algorithm.run(&mut count)?,
    }
    let runtime = start.elapsed();

    if opt.report_degree_distribution {
        count.write_distribution(&mut stdout().lock())?;
    }

    info!(
        edges = count.number_of_edges(),
        seed = opt.seed(),
        runtime_s = runtime.as_secs_f64(),
        "scale-free graph written"
    );
    Ok(())
}

fn nearest(strategy: Strategy, values: &[f64]) -> Result<()> {
    let matches = nearest_neighbors_with(values, strategy)?;

    let mut out = stdout().lock();
    writeln!(out, "index,value,matched_index,matched_value,distance")?;
    for (i, &x) in values.iter().enumerate() {
        writeln!(
            out,
            "{},{},{},{},{}",
            i, x, matches.indices[i], matches.values[i], matches.distances[i]
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let opt = get_options();
    logging::init(opt.verbose);

    match opt.command {
        Command::Nearest { strategy, values } => nearest(strategy, &values),
        Command::Binom {
            trials,
            probability,
        } => write_report(&Binom::new(trials, probability)?, &mut stdout().lock()),
        Command::ScaleFree(sf) => match sf.algorithm {
            SamplingAlgorithm::LinearScan => execute::<AlgoLinearScan<_>>(&sf),
            SamplingAlgorithm::EndpointList => execute::<AlgoEndpointList<_>>(&sf),
        },
    }
}
