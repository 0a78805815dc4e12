//! Pursuit game on a grid layout.
//!
//! Agent 0, the collector, tries to eat all food while agents `1..N`, the chasers, try to catch
//! it. Every collector move costs [`STEP_PENALTY`] points and each eaten food gives
//! [`FOOD_REWARD`]. Eating the last food wins the game even if a chaser is on the same cell;
//! otherwise sharing a cell with a chaser loses it.
use crate::game_tree::*;
use crate::grid::*;
use crate::types::*;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

pub const STEP_PENALTY: i64 = 1;
pub const FOOD_REWARD: i64 = 10;
pub const WIN_REWARD: i64 = 500;
pub const LOSE_PENALTY: i64 = 500;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Clone, Debug)]
pub struct PursuitState {
    layout: Rc<Layout>,
    collector: Position,
    chasers: Vec<Position>,
    /// Remaining food, indexed by `(x, y)`.
    food: Array2<bool>,
    food_left: usize,
    score: i64,
    outcome: Option<Outcome>,
}

impl PursuitState {
    /// Initial state of the layout. Food under the collector's starting position is removed.
    pub fn new(layout: Rc<Layout>) -> Self {
        let collector = layout.agent_start();
        let mut food = layout.food().clone();
        food[collector] = false;
        let food_left = food.iter().filter(|&&f| f).count();
        let chasers = layout.chaser_starts().to_vec();
        let outcome = if chasers.contains(&collector) {
            Some(Outcome::Lose)
        } else if food_left == 0 {
            Some(Outcome::Win)
        } else {
            None
        };
        PursuitState {
            layout,
            collector,
            chasers,
            food,
            food_left,
            score: 0,
            outcome,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn collector(&self) -> Position {
        self.collector
    }

    pub fn chasers(&self) -> &[Position] {
        &self.chasers
    }

    pub fn food(&self) -> &Array2<bool> {
        &self.food
    }

    #[inline]
    pub fn food_left(&self) -> usize {
        self.food_left
    }

    #[inline]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn check_collision(&mut self) {
        if self.outcome.is_none() && self.chasers.contains(&self.collector) {
            self.score -= LOSE_PENALTY;
            self.outcome = Some(Outcome::Lose);
        }
    }
}

impl GameState for PursuitState {
    type Action = Direction;

    /// The collector can't stay still. A chaser without any move keeps still.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        if agent == 0 {
            self.layout.legal_directions(self.collector)
        } else if let Some(&chaser) = self.chasers.get(agent - 1) {
            let directions = self.layout.legal_directions(chaser);
            if directions.is_empty() {
                vec![Direction::Stop]
            } else {
                directions
            }
        } else {
            Vec::new()
        }
    }

    fn generate_successor(&self, agent: AgentIndex, action: &Direction) -> Self {
        let mut next = self.clone();
        if next.outcome.is_some() {
            return next;
        }
        if agent == 0 {
            next.collector = self
                .layout
                .neighbor(self.collector, *action)
                .unwrap_or(self.collector);
            next.score -= STEP_PENALTY;
            if next.food[next.collector] {
                next.food[next.collector] = false;
                next.food_left -= 1;
                next.score += FOOD_REWARD;
                if next.food_left == 0 {
                    next.score += WIN_REWARD;
                    next.outcome = Some(Outcome::Win);
                }
            }
        } else if let Some(chaser) = next.chasers.get_mut(agent - 1) {
            *chaser = self.layout.neighbor(*chaser, *action).unwrap_or(*chaser);
        }
        next.check_collision();
        next
    }

    fn is_win(&self) -> bool {
        self.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.outcome == Some(Outcome::Lose)
    }

    fn num_agents(&self) -> usize {
        1 + self.chasers.len()
    }
}

/// Distances of zero are replaced with this before taking reciprocals.
const MIN_DISTANCE: f64 = 0.001;

/// Blend of chaser proximity, distance to the nearest food and the game score.
///
/// `0.1 * (1 - 1/dChaser) + 0.8 * (1/dFood) + 0.1 * score` where `dChaser` is the Manhattan
/// distance to the closest chaser and `dFood` is the maze distance to the closest food.
#[derive(Clone, Copy, Debug, Default)]
pub struct PursuitEvaluation;

impl Evaluator<PursuitState> for PursuitEvaluation {
    fn evaluate(&self, state: &PursuitState) -> Value {
        let collector = state.collector();
        let chaser_distance = state
            .chasers()
            .iter()
            .map(|&chaser| manhattan(collector, chaser) as f64)
            .fold(f64::INFINITY, f64::min)
            .max(MIN_DISTANCE);
        let food_distance = if state.food_left() == 0 {
            MIN_DISTANCE
        } else {
            let distances = state.layout().distances_from(collector);
            state
                .food()
                .indexed_iter()
                .filter(|&(_, &food)| food)
                .filter_map(|(position, _)| distances[position])
                .min()
                .map_or(f64::INFINITY, |d| (d as f64).max(MIN_DISTANCE))
        };
        0.1 * (1.0 - 1.0 / chaser_distance)
            + 0.8 * (1.0 / food_distance)
            + 0.1 * state.score() as f64
    }
}

/// Action score of the reflex agent: `(1 - 1/dChaser) + 1/dFood`.
///
/// Both distances are measured from the collector's position after the move. `dChaser` is the
/// Manhattan distance to the closest chaser. `dFood` is the maze distance to the food that was
/// closest in Manhattan distance before the move, so eating a food scores highest.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReflexEvaluation;

impl ActionEvaluator<PursuitState> for ReflexEvaluation {
    fn evaluate_action(&self, state: &PursuitState, action: &Direction) -> Value {
        let successor = state.generate_successor(0, action);
        let position = successor.collector();
        let chaser_distance = successor
            .chasers()
            .iter()
            .map(|&chaser| manhattan(position, chaser) as f64)
            .fold(f64::INFINITY, f64::min)
            .max(MIN_DISTANCE);
        // Among equally close food, the last one in (x, y) order.
        let target = state
            .food()
            .indexed_iter()
            .filter(|&(_, &food)| food)
            .map(|(food, _)| food)
            .fold(None, |closest: Option<Position>, food| match closest {
                Some(c) if manhattan(position, c) < manhattan(position, food) => Some(c),
                _ => Some(food),
            })
            .unwrap_or(position);
        let food_distance = maze_distance(state.layout(), position, target)
            .map_or(f64::INFINITY, |d| d as f64)
            .max(MIN_DISTANCE);
        (1.0 - 1.0 / chaser_distance) + 1.0 / food_distance
    }
}

/// The game score.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreEvaluation;

impl Evaluator<PursuitState> for ScoreEvaluation {
    #[inline]
    fn evaluate(&self, state: &PursuitState) -> Value {
        state.score() as Value
    }
}

/// Summary of a played episode.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeResult {
    /// `None` if the turn limit was reached first.
    pub outcome: Option<Outcome>,
    pub score: i64,
    /// Number of collector moves.
    pub turns: usize,
    pub food_left: usize,
    /// Moves of the collector.
    pub actions: Vec<Direction>,
    /// Game-tree statistics merged over all decisions. Empty for reflex agents.
    pub stats: GameTreeStats,
}

/// Play until the game ends or `max_turns` collector moves were made.
///
/// The collector decides with `search` and each chaser picks one of its legal moves uniformly at
/// random.
pub fn play_episode<E>(
    state: PursuitState,
    search: &GameTreeSearch<E>,
    max_turns: usize,
    rng: &mut StdRng,
) -> EpisodeResult
where
    E: Evaluator<PursuitState>,
{
    play_generic(state, max_turns, rng, |state, _, stats| {
        let decision = search.decide(state)?;
        stats.merge(&decision.stats);
        log::debug!(
            "{} with value {:.3}",
            decision.action,
            decision.value
        );
        Some(decision.action)
    })
}

/// Like [`play_episode`], but the collector is a [`ReflexAgent`].
///
/// The agent's tie-breaks and the chasers' moves are drawn from the same generator.
pub fn play_reflex_episode<A>(
    state: PursuitState,
    agent: &ReflexAgent<A>,
    max_turns: usize,
    rng: &mut StdRng,
) -> EpisodeResult
where
    A: ActionEvaluator<PursuitState>,
{
    play_generic(state, max_turns, rng, |state, rng, _| {
        agent.choose_action(state, rng)
    })
}

/// Episode loop shared by all collector agents.
///
/// `decide` returns the collector's move and may record search statistics.
fn play_generic<F>(
    mut state: PursuitState,
    max_turns: usize,
    rng: &mut StdRng,
    mut decide: F,
) -> EpisodeResult
where
    F: FnMut(&PursuitState, &mut StdRng, &mut GameTreeStats) -> Option<Direction>,
{
    let mut stats = GameTreeStats::default();
    let mut actions = Vec::new();
    while !state.is_over() && actions.len() < max_turns {
        let action = match decide(&state, rng, &mut stats) {
            Some(action) => action,
            None => break,
        };
        state = state.generate_successor(0, &action);
        log::debug!(
            "Turn {}: {}, score {}",
            actions.len(),
            action,
            state.score()
        );
        actions.push(action);

        for agent in 1..state.num_agents() {
            if state.is_over() {
                break;
            }
            if let Some(action) = state.legal_actions(agent).choose(rng) {
                state = state.generate_successor(agent, action);
            }
        }
    }

    log::info!(
        "Episode finished after {} turns: {:?} with score {}",
        actions.len(),
        state.outcome(),
        state.score()
    );
    EpisodeResult {
        outcome: state.outcome(),
        score: state.score(),
        turns: actions.len(),
        food_left: state.food_left(),
        actions,
        stats,
    }
}
