use super::*;
use searchlib::game_tree::SearchMode;
use searchlib::graph_search::Algorithm;
use searchlib::io::*;
use searchlib::Ply;

mod search;
pub use search::*;

mod play;
pub use play::*;

mod list;
pub use list::*;

/// All CLI commands available in this binary.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run a graph search task.
    #[command(alias = "s")]
    Search(Search),

    /// Play an episode of the pursuit game.
    #[command(alias = "p")]
    Play(Play),

    /// Eat all food in a layout by walking to the closest food repeatedly.
    ClosestDot(ClosestDot),

    /// Print the names accepted in task files as JSON.
    ListAlgorithms,
}

#[derive(clap::Args, Debug)]
pub struct Search {
    /// Path to the JSON or YAML file containing the task.
    path: PathBuf,
    /// Override the algorithm of the task.
    #[arg(short, long)]
    algorithm: Option<Algorithm>,
    /// Print the results as JSON (Hint: redirect stdout)
    #[arg(short, long, default_value_t = false)]
    json: bool,
    /// Also save the JSON results to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct Play {
    /// Path to the JSON or YAML file containing the task.
    path: PathBuf,
    /// Override the agent of the task.
    #[arg(long)]
    agent: Option<AgentKind>,
    /// Override the search mode of the task.
    #[arg(short, long)]
    mode: Option<SearchMode>,
    /// Override the search depth of the task.
    #[arg(short, long)]
    depth: Option<Ply>,
    /// Override the random seed of the task.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Print the results as JSON (Hint: redirect stdout)
    #[arg(short, long, default_value_t = false)]
    json: bool,
    /// Also save the JSON results to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ClosestDot {
    /// Path to the layout file.
    path: PathBuf,
}

impl Command {
    pub fn run(self) {
        match self {
            Command::Search(args) => args.run(),
            Command::Play(args) => args.run(),
            Command::ClosestDot(args) => args.run(),
            Command::ListAlgorithms => list_algorithms(),
        }
    }
}

/// Print JSON to stdout and optionally save it to a file.
fn output_json<T: serde::Serialize>(value: &T, print: bool, output: Option<PathBuf>) {
    if print {
        match serde_json::to_string(value) {
            Ok(json) => println!("{}", json),
            Err(err) => fatal_error!(1, "Cannot serialize the results: {}", err),
        }
    }
    if let Some(path) = output {
        if let Err(err) = searchlib::io::fs::save_json(value, &path) {
            fatal_error!(1, "Cannot save the results to {}: {}", path.display(), err);
        }
    }
}
