use crate::algorithm::DEFAULT_SEED;
use crate::nearest_neighbor::Strategy;
use std::str::FromStr;
use structopt::clap::AppSettings;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "rust-compstat",
    about = "Nearest neighbors, binomial probabilities and scale-free graphs"
)]
pub struct Parameters {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[structopt(short = "v", long, parse(from_occurrences))]
    pub verbose: u8,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Match every value to its closest other value
    #[structopt(name = "nearest", setting = AppSettings::AllowNegativeNumbers)]
    Nearest {
        #[structopt(short = "s", long, default_value = "matrix")]
        strategy: Strategy,

        #[structopt(required = true, allow_hyphen_values = true)]
        values: Vec<f64>,
    },

    /// Print factorials, coefficients and probability masses of Binom(n, p)
    #[structopt(name = "binom")]
    Binom {
        #[structopt(short = "n", long, default_value = "10")]
        trials: u64,

        #[structopt(short = "p", long, default_value = "0.5")]
        probability: f64,
    },

    /// Generate a graph by preferential attachment
    #[structopt(name = "scale-free")]
    ScaleFree(ScaleFreeParameters),
}

#[derive(Debug, StructOpt)]
pub struct ScaleFreeParameters {
    #[structopt(short = "a", long, default_value = "scan")]
    pub algorithm: SamplingAlgorithm,

    #[structopt(short = "n", long)]
    pub nodes: usize,

    #[structopt(short = "m", long, default_value = "2")]
    pub initial_degree: usize,

    #[structopt(short = "s", long)]
    pub seed_value: Option<u64>,

    #[structopt(short = "r", long)]
    pub report_degree_distribution: bool,

    #[structopt(short = "o", long, default_value = "matrix")]
    pub output: GraphOutput,
}

impl ScaleFreeParameters {
    pub fn seed(&self) -> u64 {
        self.seed_value.unwrap_or(DEFAULT_SEED)
    }
}

#[derive(Eq, Clone, Copy, PartialEq, Debug)]
pub enum SamplingAlgorithm {
    LinearScan,
    EndpointList,
}

impl FromStr for SamplingAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scan" => Ok(SamplingAlgorithm::LinearScan),
            "endpoints" => Ok(SamplingAlgorithm::EndpointList),
            _ => Err(format!("Unknown algorithm type: {}", s)),
        }
    }
}

#[derive(Eq, Clone, Copy, PartialEq, Debug)]
pub enum GraphOutput {
    Matrix,
    Edges,
    None,
}

impl FromStr for GraphOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "matrix" => Ok(GraphOutput::Matrix),
            "edges" => Ok(GraphOutput::Edges),
            "none" => Ok(GraphOutput::None),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

pub fn get_options() -> Parameters {
    Parameters::from_args()
}
