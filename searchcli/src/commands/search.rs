/// Commands related to graph search tasks.
use super::*;
use searchlib::grid::{closest_dot_path, Direction, Layout};
use searchlib::SearchFailure;

fn format_actions(actions: &[Direction]) -> String {
    actions
        .iter()
        .map(|action| action.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_search_report(name: &str, result: &Result<SearchReport, SearchFailure>) {
    println!("{:18}{}", "Task Name:".bold(), name);
    match result {
        Ok(report) => {
            println!("{:18}{}", "Algorithm:".bold(), report.algorithm);
            println!("{:18}{}", "Problem:".bold(), report.problem);
            if let Some(heuristic) = report.heuristic {
                println!("{:18}{:?}", "Heuristic:".bold(), heuristic);
            }
            println!("{:18}{}", "Path Cost:".bold(), report.cost);
            println!("{:18}{}", "Path Length:".bold(), report.actions.len());
            println!("{:18}{}", "Expanded:".bold(), report.stats.expanded);
            println!("{:18}{}", "Generated:".bold(), report.stats.generated);
            println!("{:18}{}", "Max Frontier:".bold(), report.stats.max_frontier);
            println!("{:18}{}", "Max memory usage:".bold(), report.stats.max_memory);
            println!("{:18}{}", "Total time:".bold(), report.stats.time);
            println!("{:18}{}", "Actions:".bold(), format_actions(&report.actions));
        }
        Err(failure) => {
            println!("{}", "Search failed!".red().bold());
            println!("{}", failure);
        }
    }
}

impl Search {
    pub fn run(self) {
        log::info!("Reading search task {}", self.path.display());
        let mut task = match SearchTask::read_from_file(&self.path) {
            Ok(x) => x,
            Err(err) => fatal_error!(1, "Cannot read search task: {}", err),
        };
        if let Some(algorithm) = self.algorithm {
            task.algorithm = algorithm;
        }
        let name = task.name.clone().unwrap_or_else(|| "-".to_string());
        let result = task.solve();
        if !self.json {
            print_search_report(&name, &result);
        }
        output_json(&ResultSerializer(&result), self.json, self.output);
        if result.is_err() {
            std::process::exit(2);
        }
    }
}

impl ClosestDot {
    pub fn run(self) {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(x) => x,
            Err(err) => fatal_error!(1, "Cannot read layout: {}", err),
        };
        let layout = match Layout::parse(&text) {
            Ok(x) => x,
            Err(err) => fatal_error!(1, "Cannot parse layout: {}", err),
        };
        match closest_dot_path(&layout) {
            Ok(path) => {
                println!("{:18}{}", "Path Length:".bold(), path.len());
                println!("{:18}{}", "Actions:".bold(), format_actions(&path));
            }
            Err(err) => fatal_error!(2, "{}", err),
        }
    }
}
