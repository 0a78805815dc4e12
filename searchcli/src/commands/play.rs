/// Commands related to game episodes.
use super::*;
use searchlib::SearchFailure;

fn print_episode_report(name: &str, result: &Result<EpisodeReport, SearchFailure>) {
    println!("{:18}{}", "Task Name:".bold(), name);
    match result {
        Ok(report) => {
            let episode = &report.result;
            let outcome = match episode.outcome {
                Some(outcome) => format!("{:?}", outcome),
                None => "Turn limit reached".to_string(),
            };
            println!("{:18}{}", "Agent:".bold(), report.agent);
            if let (Some(mode), Some(depth)) = (report.mode, report.depth) {
                println!("{:18}{}", "Mode:".bold(), mode);
                println!("{:18}{}", "Depth:".bold(), depth);
            }
            println!("{:18}{:?}", "Evaluation:".bold(), report.evaluation);
            println!("{:18}{}", "Seed:".bold(), report.seed);
            println!("{:18}{}", "Outcome:".bold(), outcome);
            println!("{:18}{}", "Score:".bold(), episode.score);
            println!("{:18}{}", "Turns:".bold(), episode.turns);
            println!("{:18}{}", "Food Left:".bold(), episode.food_left);
            println!("{:18}{}", "Nodes:".bold(), episode.stats.nodes);
            println!("{:18}{}", "Evaluations:".bold(), episode.stats.evaluations);
            println!("{:18}{}", "Pruned:".bold(), episode.stats.pruned);
            println!("{:18}{}", "Search time:".bold(), episode.stats.time);
        }
        Err(failure) => {
            println!("{}", "Episode failed!".red().bold());
            println!("{}", failure);
        }
    }
}

impl Play {
    pub fn run(self) {
        log::info!("Reading game task {}", self.path.display());
        let mut task = match GameTask::read_from_file(&self.path) {
            Ok(x) => x,
            Err(err) => fatal_error!(1, "Cannot read game task: {}", err),
        };
        if let Some(agent) = self.agent {
            task.agent = agent;
        }
        if let Some(mode) = self.mode {
            task.mode = Some(mode);
        }
        if let Some(depth) = self.depth {
            task.depth = Some(depth);
        }
        if let Some(seed) = self.seed {
            task.seed = seed;
        }
        let name = task.name.clone().unwrap_or_else(|| "-".to_string());
        let result = task.play();
        if !self.json {
            print_episode_report(&name, &result);
        }
        output_json(&ResultSerializer(&result), self.json, self.output);
        if result.is_err() {
            std::process::exit(2);
        }
    }
}
