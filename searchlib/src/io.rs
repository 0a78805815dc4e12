//! Input output module.
//!
//! Contains task descriptions that can be read from JSON or YAML files, and serializable reports
//! of their results.
use crate::game_tree::*;
use crate::graph_search::*;
use crate::grid::*;
use crate::problem::NullHeuristic;
use crate::pursuit::*;
use crate::types::*;
use crate::SearchFailure;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;
use std::rc::Rc;

pub mod fs;

#[cfg(test)]
mod tests;

/// Where a layout comes from.
///
/// Serialized as a single string: text containing a line break is an inline layout, anything
/// else is a path. Relative paths are resolved against the directory of the task file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(from = "String", into = "String")]
pub enum LayoutSource {
    Inline(String),
    File(PathBuf),
}

impl From<String> for LayoutSource {
    fn from(value: String) -> Self {
        if value.contains('\n') {
            LayoutSource::Inline(value)
        } else {
            LayoutSource::File(PathBuf::from(value))
        }
    }
}

impl From<LayoutSource> for String {
    fn from(value: LayoutSource) -> Self {
        match value {
            LayoutSource::Inline(text) => text,
            LayoutSource::File(path) => path.to_string_lossy().into_owned(),
        }
    }
}

/// The search problem to build on the layout.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ProblemKind {
    /// Reach the given cell from the starting position.
    Position { goal: Position },
    AnyFood,
    Corners,
    Food,
}

impl ProblemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProblemKind::Position { .. } => "position",
            ProblemKind::AnyFood => "anyFood",
            ProblemKind::Corners => "corners",
            ProblemKind::Food => "food",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HeuristicKind {
    #[default]
    Null,
    /// Only for [`ProblemKind::Position`].
    Manhattan,
    /// Only for [`ProblemKind::Position`].
    Euclidean,
    /// Only for [`ProblemKind::Corners`].
    Corners,
    /// Only for [`ProblemKind::Food`].
    Food,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 5] = [
        HeuristicKind::Null,
        HeuristicKind::Manhattan,
        HeuristicKind::Euclidean,
        HeuristicKind::Corners,
        HeuristicKind::Food,
    ];
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EvaluationKind {
    /// [`PursuitEvaluation`]
    #[default]
    Pursuit,
    /// [`ScoreEvaluation`]
    Score,
    /// [`ReflexEvaluation`], scores actions instead of states. Only for [`AgentKind::Reflex`].
    Reflex,
}

impl EvaluationKind {
    pub const ALL: [EvaluationKind; 3] = [
        EvaluationKind::Pursuit,
        EvaluationKind::Score,
        EvaluationKind::Reflex,
    ];
}

/// How the collector chooses its moves.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AgentKind {
    /// [`GameTreeSearch`]
    #[default]
    Search,
    /// [`ReflexAgent`]
    Reflex,
}

impl AgentKind {
    pub const ALL: [AgentKind; 2] = [AgentKind::Search, AgentKind::Reflex];

    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::Search => "search",
            AgentKind::Reflex => "reflex",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentKind::ALL
            .into_iter()
            .find(|agent| agent.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Undefined agent: {}", s))
    }
}

/// A graph search task.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchTask {
    pub name: Option<String>,
    pub layout: LayoutSource,
    pub problem: ProblemKind,
    pub algorithm: Algorithm,
    /// Only used by A*.
    #[serde(default)]
    pub heuristic: HeuristicKind,
    /// Memory limit in bytes.
    pub max_memory: Option<usize>,
}

/// Result of a [`SearchTask`].
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub name: Option<String>,
    pub algorithm: Algorithm,
    pub problem: String,
    /// `None` if the algorithm doesn't use a heuristic.
    pub heuristic: Option<HeuristicKind>,
    pub cost: Cost,
    pub actions: Vec<Direction>,
    pub stats: SearchStats,
}

fn incompatible_heuristic(heuristic: HeuristicKind, problem: &ProblemKind) -> SearchFailure {
    SearchFailure::BadInput(format!(
        "Heuristic {:?} cannot be used with the {} problem",
        heuristic,
        problem.name()
    ))
}

impl SearchTask {
    pub fn solve(&self) -> Result<SearchReport, SearchFailure> {
        let layout = self.layout.load()?;
        let config = Config {
            max_memory: self.max_memory.unwrap_or(usize::MAX),
        };
        let algorithm = self.algorithm;
        let heuristic = if algorithm == Algorithm::AStar {
            self.heuristic
        } else {
            if self.heuristic != HeuristicKind::Null {
                log::warn!(
                    "Heuristic {:?} is ignored by {}",
                    self.heuristic,
                    algorithm
                );
            }
            HeuristicKind::Null
        };

        let solution = match &self.problem {
            ProblemKind::Position { goal } => {
                if layout.is_wall(*goal) {
                    return Err(SearchFailure::BadInput(format!(
                        "Goal ({}, {}) is a wall",
                        goal.0, goal.1
                    )));
                }
                let problem = PositionProblem::from_layout(&layout, *goal);
                match heuristic {
                    HeuristicKind::Null => search(&problem, algorithm, &NullHeuristic, &config),
                    HeuristicKind::Manhattan => {
                        search(&problem, algorithm, &manhattan_heuristic, &config)
                    }
                    HeuristicKind::Euclidean => {
                        search(&problem, algorithm, &euclidean_heuristic, &config)
                    }
                    other => Err(incompatible_heuristic(other, &self.problem)),
                }
            }
            ProblemKind::AnyFood => {
                let problem = AnyFoodProblem::new(&layout);
                match heuristic {
                    HeuristicKind::Null => search(&problem, algorithm, &NullHeuristic, &config),
                    other => Err(incompatible_heuristic(other, &self.problem)),
                }
            }
            ProblemKind::Corners => {
                let problem = CornersProblem::new(&layout)?;
                match heuristic {
                    HeuristicKind::Null => search(&problem, algorithm, &NullHeuristic, &config),
                    HeuristicKind::Corners => {
                        search(&problem, algorithm, &corners_heuristic, &config)
                    }
                    other => Err(incompatible_heuristic(other, &self.problem)),
                }
            }
            ProblemKind::Food => {
                let problem = FoodProblem::new(&layout);
                match heuristic {
                    HeuristicKind::Null => search(&problem, algorithm, &NullHeuristic, &config),
                    HeuristicKind::Food => search(&problem, algorithm, &food_heuristic, &config),
                    other => Err(incompatible_heuristic(other, &self.problem)),
                }
            }
        }?;

        log::info!(
            "{} found a path of cost {} after {} expansions",
            algorithm,
            solution.cost,
            solution.stats.expanded
        );
        Ok(SearchReport {
            name: self.name.clone(),
            algorithm,
            problem: self.problem.name().to_string(),
            heuristic: (algorithm == Algorithm::AStar).then_some(heuristic),
            cost: solution.cost,
            actions: solution.actions,
            stats: solution.stats,
        })
    }
}

fn default_max_turns() -> usize {
    1000
}

/// An episode of the pursuit game.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameTask {
    pub name: Option<String>,
    pub layout: LayoutSource,
    #[serde(default)]
    pub agent: AgentKind,
    /// Required by [`AgentKind::Search`].
    pub mode: Option<SearchMode>,
    /// Search depth in plies, 2 if not given.
    pub depth: Option<Ply>,
    /// Defaults to [`EvaluationKind::Pursuit`] for search agents and [`EvaluationKind::Reflex`]
    /// for reflex agents.
    pub evaluation: Option<EvaluationKind>,
    /// Seed of the chasers' random moves.
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
}

/// Result of a [`GameTask`].
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeReport {
    pub name: Option<String>,
    pub agent: AgentKind,
    /// `None` for reflex agents.
    pub mode: Option<SearchMode>,
    pub depth: Option<Ply>,
    pub evaluation: EvaluationKind,
    pub seed: u64,
    #[serde(flatten)]
    pub result: EpisodeResult,
}

const DEFAULT_DEPTH: Ply = 2;

impl GameTask {
    /// The evaluation in effect for this task's agent.
    pub fn evaluation(&self) -> EvaluationKind {
        self.evaluation.unwrap_or(match self.agent {
            AgentKind::Search => EvaluationKind::Pursuit,
            AgentKind::Reflex => EvaluationKind::Reflex,
        })
    }

    pub fn play(&self) -> Result<EpisodeReport, SearchFailure> {
        use rand::SeedableRng;

        let layout = Rc::new(self.layout.load()?);
        let state = PursuitState::new(layout);
        let mut rng = rand::rngs::StdRng::seed_from_u64(self.seed);
        let evaluation = self.evaluation();
        let (mode, depth, result) = match self.agent {
            AgentKind::Search => {
                let mode = self.mode.ok_or_else(|| {
                    SearchFailure::BadInput("Search agents need a mode".to_string())
                })?;
                let depth = self.depth.unwrap_or(DEFAULT_DEPTH);
                let result = match evaluation {
                    EvaluationKind::Pursuit => play_episode(
                        state,
                        &GameTreeSearch::new(mode, depth, PursuitEvaluation),
                        self.max_turns,
                        &mut rng,
                    ),
                    EvaluationKind::Score => play_episode(
                        state,
                        &GameTreeSearch::new(mode, depth, ScoreEvaluation),
                        self.max_turns,
                        &mut rng,
                    ),
                    EvaluationKind::Reflex => {
                        return Err(SearchFailure::BadInput(
                            "The reflex evaluation scores actions and needs a reflex agent"
                                .to_string(),
                        ))
                    }
                };
                (Some(mode), Some(depth), result)
            }
            AgentKind::Reflex => {
                if self.mode.is_some() || self.depth.is_some() {
                    log::warn!("Search mode and depth are ignored by reflex agents");
                }
                let result = match evaluation {
                    EvaluationKind::Pursuit => play_reflex_episode(
                        state,
                        &ReflexAgent::new(PursuitEvaluation),
                        self.max_turns,
                        &mut rng,
                    ),
                    EvaluationKind::Score => play_reflex_episode(
                        state,
                        &ReflexAgent::new(ScoreEvaluation),
                        self.max_turns,
                        &mut rng,
                    ),
                    EvaluationKind::Reflex => play_reflex_episode(
                        state,
                        &ReflexAgent::with_action_evaluator(ReflexEvaluation),
                        self.max_turns,
                        &mut rng,
                    ),
                };
                (None, None, result)
            }
        };
        Ok(EpisodeReport {
            name: self.name.clone(),
            agent: self.agent,
            mode,
            depth,
            evaluation,
            seed: self.seed,
            result,
        })
    }
}

/// Helper for result serialization.
///
/// `Ok` is serialized as `{"success": ...}` and `Err` as `{"error": ..., "description": ...}`.
pub struct ResultSerializer<'a, T>(pub &'a Result<T, SearchFailure>);

impl<'a, T: Serialize> Serialize for ResultSerializer<'a, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Ok(result) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("success", result)?;
                map.end()
            }
            Err(failure) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("error", failure)?;
                map.serialize_entry("description", format!("{}", failure).as_str())?;
                map.end()
            }
        }
    }
}
