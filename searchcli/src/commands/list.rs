/// Printing the names accepted in task files.
use super::*;

pub fn list_algorithms() {
    let names = serde_json::json!({
        "algorithms": Algorithm::ALL.map(|algorithm| algorithm.name()),
        "modes": SearchMode::ALL.map(|mode| mode.name()),
        "agents": AgentKind::ALL,
        "heuristics": HeuristicKind::ALL,
        "evaluations": EvaluationKind::ALL,
    });
    match serde_json::to_string_pretty(&names) {
        Ok(s) => println!("{}", s),
        Err(err) => fatal_error!(1, "Cannot serialize the names: {}", err),
    }
}
