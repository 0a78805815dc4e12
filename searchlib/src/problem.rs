//! Contract between the graph search engine and the state spaces it explores.
use crate::types::*;

use std::hash::Hash;

/// Cost reported by [`SearchProblem::actions_cost`] for action sequences that cannot be executed.
pub const INFEASIBLE_COST: Cost = 999_999.0;

/// A deterministic single-agent state space.
pub trait SearchProblem {
    type State: Clone + Eq + Hash;
    type Action: Clone;

    /// The state from which the search starts.
    fn starting_state(&self) -> Self::State;
    /// Returns true if the given state satisfies the goal condition.
    fn is_goal(&self, state: &Self::State) -> bool;
    /// Successor states with the actions leading to them and their non-negative step costs.
    fn successor_states(&self, state: &Self::State) -> Vec<(Self::State, Self::Action, Cost)>;
    /// Total cost of executing the given actions from the starting state.
    ///
    /// Returns [`INFEASIBLE_COST`] if the sequence contains an illegal action.
    fn actions_cost(&self, actions: &[Self::Action]) -> Cost;
}

/// Estimate of the remaining cost from a state to the nearest goal, used by A*.
///
/// The estimate must be non-negative. A* returns optimal paths only if the heuristic is
/// admissible, i.e., it never overestimates the true remaining cost.
pub trait Heuristic<P: SearchProblem + ?Sized> {
    fn estimate(&self, state: &P::State, problem: &P) -> Cost;
}

/// The trivial heuristic. A* with this heuristic behaves as uniform cost search.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHeuristic;

impl<P: SearchProblem + ?Sized> Heuristic<P> for NullHeuristic {
    #[inline]
    fn estimate(&self, _state: &P::State, _problem: &P) -> Cost {
        0.0
    }
}

impl<P, F> Heuristic<P> for F
where
    P: SearchProblem + ?Sized,
    F: Fn(&P::State, &P) -> Cost,
{
    #[inline]
    fn estimate(&self, state: &P::State, problem: &P) -> Cost {
        self(state, problem)
    }
}
