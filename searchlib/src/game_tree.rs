//! Depth-limited game-tree search for turn-based games.
//!
//! Agent 0 is always the decision maker and maximizes the evaluation. The remaining agents
//! either minimize it ([`SearchMode::Minimax`], [`SearchMode::AlphaBeta`]) or choose uniformly
//! at random among their legal actions ([`SearchMode::Expectimax`]).
mod reflex;

pub use reflex::{ActionEvaluator, Lookahead, ReflexAgent};

use crate::types::*;

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A turn-based game state shared by all agents.
pub trait GameState: Sized {
    type Action: Clone;

    /// Legal actions of the given agent. Non-empty in any state that is not over.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;
    /// The state after the given agent takes the given action.
    fn generate_successor(&self, agent: AgentIndex, action: &Self::Action) -> Self;
    fn is_win(&self) -> bool;
    fn is_lose(&self) -> bool;
    /// True if the game has ended.
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
    /// Number of agents, at least 1.
    fn num_agents(&self) -> usize;
}

/// Scores a state from the perspective of agent 0. Only the relative order of scores matters.
///
/// Must be a total function of the current state, including terminal states.
pub trait Evaluator<G: ?Sized> {
    fn evaluate(&self, state: &G) -> Value;
}

impl<G: ?Sized, F: Fn(&G) -> Value> Evaluator<G> for F {
    #[inline]
    fn evaluate(&self, state: &G) -> Value {
        self(state)
    }
}

/// Game-tree search algorithms.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Minimax,
    /// Minimax with alpha-beta pruning.
    AlphaBeta,
    /// Non-zero agents are chance nodes with a uniform distribution over their actions.
    Expectimax,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [
        SearchMode::Minimax,
        SearchMode::AlphaBeta,
        SearchMode::Expectimax,
    ];

    /// Name of the mode as used in task files.
    pub fn name(&self) -> &'static str {
        match self {
            SearchMode::Minimax => "minimax",
            SearchMode::AlphaBeta => "alphabeta",
            SearchMode::Expectimax => "expectimax",
        }
    }

    /// Role of the given agent in this mode.
    #[inline]
    pub fn role(&self, agent: AgentIndex) -> AgentRole {
        if agent == 0 {
            AgentRole::Max
        } else if *self == SearchMode::Expectimax {
            AgentRole::Chance
        } else {
            AgentRole::Min
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Undefined search mode: {}", s))
    }
}

/// How a node combines the values of its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentRole {
    Max,
    Min,
    /// Arithmetic mean.
    Chance,
}

/// Statistics of game-tree search. Scoped to one decision unless merged.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameTreeStats {
    /// Number of interior nodes whose children were generated.
    pub nodes: usize,
    /// Number of evaluation function calls.
    pub evaluations: usize,
    /// Number of sibling subtrees skipped by alpha-beta cutoffs.
    pub pruned: usize,
    /// Search time in seconds.
    pub time: f64,
}

impl GameTreeStats {
    /// Accumulate the statistics of another search into this one.
    pub fn merge(&mut self, other: &GameTreeStats) {
        self.nodes += other.nodes;
        self.evaluations += other.evaluations;
        self.pruned += other.pruned;
        self.time += other.time;
    }
}

/// The action chosen at the root, with its backed-up value.
#[derive(Clone, Debug)]
pub struct Decision<A> {
    pub action: A,
    pub value: Value,
    pub stats: GameTreeStats,
}

/// Bounds of alpha-beta pruning. Passed by value down the recursion.
#[derive(Clone, Copy, Debug)]
struct Window {
    /// Best value the maximizer can already guarantee.
    alpha: Value,
    /// Best value the minimizer can already guarantee.
    beta: Value,
}

impl Window {
    const FULL: Window = Window {
        alpha: Value::NEG_INFINITY,
        beta: Value::INFINITY,
    };
}

/// Depth-limited game-tree search.
///
/// Among root actions with equal values, the first one in legal action order is chosen.
pub struct GameTreeSearch<E> {
    mode: SearchMode,
    /// Maximum search depth in plies.
    depth: Ply,
    evaluator: E,
}

impl<E> GameTreeSearch<E> {
    pub fn new(mode: SearchMode, depth: Ply, evaluator: E) -> Self {
        GameTreeSearch {
            mode,
            depth,
            evaluator,
        }
    }

    #[inline]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    #[inline]
    pub fn depth(&self) -> Ply {
        self.depth
    }

    #[inline]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Choose the best action for agent 0.
    ///
    /// Returns `None` if agent 0 has no legal actions.
    pub fn choose_action<G>(&self, state: &G) -> Option<G::Action>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        self.decide(state).map(|decision| decision.action)
    }

    /// Choose the best action for agent 0 and report its value and search statistics.
    pub fn decide<G>(&self, state: &G) -> Option<Decision<G::Action>>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let start_time = Instant::now();
        let mut stats = GameTreeStats::default();
        let mut window = Window::FULL;
        let (next_agent, next_plies) = next_turn(state.num_agents(), 0, self.depth);

        let mut best: Option<(G::Action, Value)> = None;
        stats.nodes += 1;
        for action in state.legal_actions(0) {
            let successor = state.generate_successor(0, &action);
            let value = self.value(&successor, next_agent, next_plies, window, &mut stats);
            // Strictly greater: ties keep the earlier action, and a pruned child (which reports
            // an upper bound no greater than alpha) never replaces the current best.
            if best.as_ref().map_or(true, |(_, best_value)| value > *best_value) {
                best = Some((action, value));
            }
            if self.mode == SearchMode::AlphaBeta {
                window.alpha = window.alpha.max(value);
            }
        }
        stats.time = start_time.elapsed().as_secs_f64();

        match best {
            Some((action, value)) => {
                log::debug!(
                    "{} decision with value {} ({} nodes, {} evaluations, {} pruned)",
                    self.mode,
                    value,
                    stats.nodes,
                    stats.evaluations,
                    stats.pruned
                );
                Some(Decision {
                    action,
                    value,
                    stats,
                })
            }
            None => {
                log::warn!("Agent 0 has no legal actions, no decision is made");
                None
            }
        }
    }

    /// Backed-up value of `state` when it's `agent`'s turn and `plies` plies remain.
    fn value<G>(
        &self,
        state: &G,
        agent: AgentIndex,
        plies: Ply,
        mut window: Window,
        stats: &mut GameTreeStats,
    ) -> Value
    where
        G: GameState,
        E: Evaluator<G>,
    {
        if plies == 0 || state.is_over() {
            stats.evaluations += 1;
            return self.evaluator.evaluate(state);
        }
        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            log::warn!("Agent {agent} has no legal actions in a state that is not over");
            stats.evaluations += 1;
            return self.evaluator.evaluate(state);
        }
        stats.nodes += 1;

        let role = self.mode.role(agent);
        let prune = self.mode == SearchMode::AlphaBeta;
        let (next_agent, next_plies) = next_turn(state.num_agents(), agent, plies);
        let weight = 1.0 / actions.len() as Value;
        let mut result = match role {
            AgentRole::Max => Value::NEG_INFINITY,
            AgentRole::Min => Value::INFINITY,
            AgentRole::Chance => 0.0,
        };

        for (i, action) in actions.iter().enumerate() {
            let successor = state.generate_successor(agent, action);
            let value = self.value(&successor, next_agent, next_plies, window, stats);
            match role {
                AgentRole::Max => {
                    result = result.max(value);
                    if prune {
                        window.alpha = window.alpha.max(result);
                        if window.alpha >= window.beta {
                            stats.pruned += actions.len() - i - 1;
                            break;
                        }
                    }
                }
                AgentRole::Min => {
                    result = result.min(value);
                    if prune {
                        window.beta = window.beta.min(result);
                        if window.beta <= window.alpha {
                            stats.pruned += actions.len() - i - 1;
                            break;
                        }
                    }
                }
                AgentRole::Chance => result += weight * value,
            }
        }
        result
    }
}

/// Agent and remaining plies after `agent` moves. The ply ends when the turn wraps to agent 0.
#[inline]
fn next_turn(num_agents: usize, agent: AgentIndex, plies: Ply) -> (AgentIndex, Ply) {
    let next = (agent + 1) % num_agents.max(1);
    if next == 0 {
        (0, plies.saturating_sub(1))
    } else {
        (next, plies)
    }
}
