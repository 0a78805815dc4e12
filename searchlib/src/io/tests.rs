use super::*;

const TASKS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../tasks/");

fn task_path(name: &str) -> PathBuf {
    PathBuf::from(TASKS_DIR).join(name)
}

fn inline_task(json: &str) -> SearchTask {
    serde_json::from_str(json).unwrap()
}

#[test]
fn layout_source() {
    let source = LayoutSource::from(String::from("layouts/tinyMaze.lay"));
    assert_eq!(source, LayoutSource::File(PathBuf::from("layouts/tinyMaze.lay")));
    let source = LayoutSource::from(String::from("%%%\n%P%\n%%%"));
    assert!(matches!(source, LayoutSource::Inline(_)));
    assert_eq!(source.load().unwrap().agent_start(), (1, 1));

    let json = serde_json::to_string(&source).unwrap();
    assert_eq!(json, r#""%%%\n%P%\n%%%""#);
    let parsed: LayoutSource = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, source);

    let mut source = LayoutSource::File(PathBuf::from("a.lay"));
    source.resolve("some/dir/task.json");
    assert_eq!(source, LayoutSource::File(PathBuf::from("some/dir/a.lay")));
}

#[test]
fn search_task_files() {
    let task = SearchTask::read_from_file(task_path("tinyMaze-bfs.json")).unwrap();
    assert_eq!(task.algorithm, Algorithm::Bfs);
    assert_eq!(task.problem, ProblemKind::Position { goal: (1, 1) });
    assert_eq!(task.heuristic, HeuristicKind::Null);
    assert_eq!(task.max_memory, None);
    let report = task.solve().unwrap();
    assert_eq!(report.cost, 8.0);
    assert_eq!(report.actions.len(), 8);
    assert_eq!(report.problem, "position");

    let report = SearchTask::read_from_file(task_path("tinyMaze-astar.json"))
        .unwrap()
        .solve()
        .unwrap();
    assert_eq!(report.heuristic, Some(HeuristicKind::Manhattan));
    assert_eq!(report.cost, 8.0);

    let task = SearchTask::read_from_file(task_path("tinyCorners-astar.yaml")).unwrap();
    assert_eq!(task.problem, ProblemKind::Corners);
    assert_eq!(task.solve().unwrap().cost, 28.0);

    let task = SearchTask::read_from_file(task_path("tinySearch-food.yaml")).unwrap();
    assert_eq!(task.max_memory, Some(1_000_000_000));
    let report = task.solve().unwrap();
    assert_eq!(report.cost, 27.0);
    assert_eq!(report.name.as_deref(), Some("Eat all food"));
}

#[test]
fn search_task_errors() {
    let task = inline_task(
        r#"{
            "layout": "%%%%%\n%P .%\n%%%%%",
            "problem": { "type": "position", "goal": [3, 1] },
            "algorithm": "astar",
            "heuristic": "corners"
        }"#,
    );
    assert!(matches!(task.solve(), Err(SearchFailure::BadInput(_))));

    // The heuristic is ignored by other algorithms.
    let task = SearchTask {
        algorithm: Algorithm::Ucs,
        ..task
    };
    let report = task.solve().unwrap();
    assert_eq!(report.cost, 2.0);
    assert_eq!(report.heuristic, None);
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["heuristic"].is_null());

    let task = SearchTask {
        problem: ProblemKind::Position { goal: (0, 0) },
        ..task
    };
    assert!(matches!(task.solve(), Err(SearchFailure::BadInput(_))));

    let task = SearchTask {
        problem: ProblemKind::AnyFood,
        layout: LayoutSource::File(PathBuf::from("does/not/exist.lay")),
        ..task
    };
    assert!(matches!(task.solve(), Err(SearchFailure::BadInput(_))));

    let task = inline_task(
        r#"{
            "layout": "%%%%%\n%P%.%\n%%%%%",
            "problem": { "type": "anyFood" },
            "algorithm": "dfs"
        }"#,
    );
    assert_eq!(
        task.solve().unwrap_err(),
        SearchFailure::NoPath { expanded: 1 }
    );

    assert!(SearchTask::read_from_file(task_path("missing.json")).is_err());
}

#[test]
fn game_task_files() {
    let task = GameTask::read_from_file(task_path("pursuitSmall-alphabeta.yaml")).unwrap();
    assert_eq!(task.agent, AgentKind::Search);
    assert_eq!(task.mode, Some(SearchMode::AlphaBeta));
    assert_eq!(task.depth, Some(2));
    assert_eq!(task.seed, 42);
    assert_eq!(task.max_turns, 100);
    let report = task.play().unwrap();
    assert!(report.result.turns <= 100);
    assert!(report.result.turns > 0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mode"], "alphabeta");
    assert_eq!(json["agent"], "search");
    assert_eq!(json["evaluation"], "pursuit");
    assert_eq!(json["turns"], report.result.turns);
    assert!(json.get("result").is_none());

    let task = GameTask::read_from_file(task_path("corridor-expectimax.yaml")).unwrap();
    assert!(matches!(task.layout, LayoutSource::Inline(_)));
    assert_eq!(task.evaluation, None);
    assert_eq!(task.evaluation(), EvaluationKind::Pursuit);
    assert_eq!(task.max_turns, 1000);
    let first = task.play().unwrap();
    let second = task.play().unwrap();
    assert_eq!(first.result.actions, second.result.actions);
    assert_eq!(first.result.score, second.result.score);

    let task = GameTask {
        evaluation: Some(EvaluationKind::Score),
        max_turns: 3,
        ..task
    };
    assert!(task.play().unwrap().result.turns <= 3);
}

#[test]
fn reflex_task_files() {
    let task = GameTask::read_from_file(task_path("corridor-reflex.yaml")).unwrap();
    assert_eq!(task.agent, AgentKind::Reflex);
    assert_eq!(task.mode, None);
    assert_eq!(task.evaluation(), EvaluationKind::Reflex);
    let report = task.play().unwrap();
    assert_eq!(report.mode, None);
    assert_eq!(report.depth, None);
    assert_eq!(report.evaluation, EvaluationKind::Reflex);
    assert!(report.result.turns > 0);
    assert!(report.result.turns <= 200);
    assert_eq!(report.result.stats, GameTreeStats::default());
    // The first food is three steps east and no chaser is near.
    assert_eq!(report.result.actions[..3], [Direction::East; 3]);

    let again = task.play().unwrap();
    assert_eq!(again.result.actions, report.result.actions);
    assert_eq!(again.result.score, report.result.score);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["agent"], "reflex");
    assert!(json["mode"].is_null());

    // Reflex agents also work with state evaluations.
    let task = GameTask {
        evaluation: Some(EvaluationKind::Pursuit),
        max_turns: 5,
        ..task
    };
    assert!(task.play().unwrap().result.turns <= 5);

    // Search agents need a mode and can't score actions.
    let task = GameTask {
        agent: AgentKind::Search,
        ..task
    };
    assert!(matches!(task.play(), Err(SearchFailure::BadInput(_))));
    let task = GameTask {
        mode: Some(SearchMode::Minimax),
        evaluation: Some(EvaluationKind::Reflex),
        ..task
    };
    assert!(matches!(task.play(), Err(SearchFailure::BadInput(_))));
    assert!("reflex".parse::<AgentKind>().is_ok());
    assert!("greedy".parse::<AgentKind>().is_err());
}

#[test]
fn result_serialization() {
    let ok: Result<u32, SearchFailure> = Ok(3);
    assert_eq!(
        serde_json::to_string(&ResultSerializer(&ok)).unwrap(),
        r#"{"success":3}"#
    );
    let err: Result<u32, SearchFailure> = Err(SearchFailure::NoPath { expanded: 3 });
    let json = serde_json::to_value(ResultSerializer(&err)).unwrap();
    assert_eq!(json["error"]["type"], "NoPath");
    assert_eq!(json["error"]["content"]["expanded"], 3);
    assert_eq!(
        json["description"],
        "No path to a goal state after 3 expansions."
    );

    let err: Result<u32, SearchFailure> = Err(SearchFailure::BadInput("no P".to_string()));
    let json = serde_json::to_value(ResultSerializer(&err)).unwrap();
    assert_eq!(json["error"]["type"], "BadInput");
    assert_eq!(json["error"]["content"], "no P");
    let err: Result<u32, SearchFailure> = Err(SearchFailure::OutOfMemory { used: 2, limit: 1 });
    let json = serde_json::to_value(ResultSerializer(&err)).unwrap();
    assert_eq!(json["error"]["content"]["limit"], 1);
}

#[test]
fn read_and_save_files() {
    let dir = std::env::temp_dir().join(format!("searchlib-io-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let yaml = dir.join("broken.yaml");
    std::fs::write(&yaml, "layout: [unclosed").unwrap();
    let error = SearchTask::read_from_file(&yaml).unwrap_err();
    assert_eq!(error.kind(), std::io::ErrorKind::Other);

    let report = dir.join("report.json");
    let _ = std::fs::remove_file(&report);
    fs::save_json(&serde_json::json!({"cost": 8}), &report).unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(saved["cost"], 8);
    assert!(fs::save_json(&serde_json::json!({}), &report).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
