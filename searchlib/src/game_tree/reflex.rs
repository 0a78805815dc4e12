use super::*;

use rand::seq::SliceRandom;
use rand::Rng;

/// Scores an action of agent 0 in the given state.
pub trait ActionEvaluator<G: GameState> {
    fn evaluate_action(&self, state: &G, action: &G::Action) -> Value;
}

/// Scores an action by evaluating the successor it leads to.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lookahead<E>(pub E);

impl<G: GameState, E: Evaluator<G>> ActionEvaluator<G> for Lookahead<E> {
    #[inline]
    fn evaluate_action(&self, state: &G, action: &G::Action) -> Value {
        self.0.evaluate(&state.generate_successor(0, action))
    }
}

/// One-step lookahead agent: scores each legal action of agent 0 and picks uniformly at random
/// among the best ones.
///
/// The random source is injected so that choices are reproducible with a seeded generator.
pub struct ReflexAgent<A> {
    evaluator: A,
}

impl<E> ReflexAgent<Lookahead<E>> {
    /// Agent that scores actions by the evaluation of their successors.
    pub fn new(evaluator: E) -> Self {
        ReflexAgent {
            evaluator: Lookahead(evaluator),
        }
    }
}

impl<A> ReflexAgent<A> {
    pub fn with_action_evaluator(evaluator: A) -> Self {
        ReflexAgent { evaluator }
    }

    /// Choose an action for agent 0, `None` if there are no legal actions.
    pub fn choose_action<G, R>(&self, state: &G, rng: &mut R) -> Option<G::Action>
    where
        G: GameState,
        A: ActionEvaluator<G>,
        R: Rng + ?Sized,
    {
        let scored: Vec<(G::Action, Value)> = state
            .legal_actions(0)
            .into_iter()
            .map(|action| {
                let value = self.evaluator.evaluate_action(state, &action);
                (action, value)
            })
            .collect();
        let best = scored
            .iter()
            .map(|(_, value)| *value)
            .fold(Value::NEG_INFINITY, Value::max);
        let ties: Vec<&G::Action> = scored
            .iter()
            .filter(|(_, value)| *value == best)
            .map(|(action, _)| action)
            .collect();
        ties.choose(rng).map(|&action| action.clone())
    }
}
