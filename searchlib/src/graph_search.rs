//! Frontier-based graph search.
//!
//! Depth-first, breadth-first, uniform cost and A* search share one traversal skeleton,
//! [`search_generic`], and differ only in the [`Frontier`] they use and whether the heuristic
//! contributes to node priorities.
mod frontier;
mod node;

pub use frontier::*;
pub use node::*;

use crate::problem::*;
use crate::types::*;
use crate::{SearchFailure, ALLOCATOR};

use serde::{Deserialize, Serialize};
use std::time::Instant;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashSet;

#[cfg(feature = "hashbrown")]
use hashbrown::HashSet;

/// Graph search algorithms.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Depth-first search, LIFO frontier. Returns any path.
    Dfs,
    /// Breadth-first search, FIFO frontier. Optimal if all step costs are equal.
    Bfs,
    /// Uniform cost search, ordered by path cost.
    Ucs,
    /// A* search, ordered by path cost plus heuristic.
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dfs,
        Algorithm::Bfs,
        Algorithm::Ucs,
        Algorithm::AStar,
    ];

    /// Name of the algorithm as used in task files.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dfs => "dfs",
            Algorithm::Bfs => "bfs",
            Algorithm::Ucs => "ucs",
            Algorithm::AStar => "astar",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Undefined search algorithm: {}", s))
    }
}

/// Settings for a single graph search invocation.
#[derive(Clone, Debug)]
pub struct Config {
    /// Memory limit in bytes. When the memory usage reported by the global allocator exceeds
    /// this, the search fails with [`SearchFailure::OutOfMemory`].
    pub max_memory: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_memory: usize::MAX,
        }
    }
}

/// Statistics of a single graph search invocation.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Number of expanded states, i.e., calls to the successor function.
    pub expanded: usize,
    /// Number of nodes pushed to the frontier, excluding the starting node.
    pub generated: usize,
    /// Number of popped nodes discarded because their state was already expanded.
    pub stale: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
    /// Maximum memory usage in bytes.
    pub max_memory: usize,
    /// Total search time in seconds.
    pub time: f64,
}

/// A path found by graph search.
#[derive(Clone, Debug)]
pub struct Solution<A> {
    /// Actions from the starting state to a goal state.
    /// Empty if the starting state is a goal.
    pub actions: Vec<A>,
    /// Sum of the step costs along the path.
    pub cost: Cost,
    pub stats: SearchStats,
}

/// Graph search skeleton shared by all algorithms.
///
/// A state is marked visited when it's popped for expansion, not when it's first discovered.
/// Hence, a state may be in the frontier more than once, but it's expanded at most once: later
/// occurrences are discarded on pop.
pub fn search_generic<P, F, H>(
    problem: &P,
    heuristic: &H,
    config: &Config,
) -> Result<Solution<P::Action>, SearchFailure>
where
    P: SearchProblem,
    F: Frontier<P::State, P::Action>,
    H: Heuristic<P>,
{
    const MEMORY_SAMPLE_PERIOD: usize = 2_usize.pow(12);
    let start_time = Instant::now();
    let mut stats = SearchStats::default();

    let start = problem.starting_state();
    if problem.is_goal(&start) {
        stats.time = start_time.elapsed().as_secs_f64();
        return Ok(Solution {
            actions: Vec::new(),
            cost: 0.0,
            stats,
        });
    }

    let priority = |node: &SearchNode<P::State, P::Action>| -> Cost {
        if F::PRIORITIZED {
            node.cost + heuristic.estimate(&node.state, problem)
        } else {
            node.cost
        }
    };

    let mut visited: HashSet<P::State> = HashSet::new();
    let mut frontier = F::new();
    let root = SearchNode::root(start);
    let root_priority = priority(&root);
    frontier.push(root, root_priority);

    while let Some(node) = frontier.pop() {
        if !visited.insert(node.state.clone()) {
            stats.stale += 1;
            continue;
        }

        if problem.is_goal(&node.state) {
            stats.max_memory = std::cmp::max(stats.max_memory, ALLOCATOR.allocated());
            stats.time = start_time.elapsed().as_secs_f64();
            log::debug!(
                "Found a path of length {} and cost {} after {} expansions",
                node.path.len(),
                node.cost,
                stats.expanded
            );
            return Ok(Solution {
                actions: node.path.to_vec(),
                cost: node.cost,
                stats,
            });
        }

        stats.expanded += 1;
        for (successor, action, step_cost) in problem.successor_states(&node.state) {
            let child = node.child(successor, action, step_cost);
            let child_priority = priority(&child);
            frontier.push(child, child_priority);
            stats.generated += 1;
        }
        stats.max_frontier = std::cmp::max(stats.max_frontier, frontier.len());

        if stats.expanded % MEMORY_SAMPLE_PERIOD == 0 {
            let allocated = ALLOCATOR.allocated();
            stats.max_memory = std::cmp::max(stats.max_memory, allocated);
            if allocated > config.max_memory {
                return Err(SearchFailure::OutOfMemory {
                    used: stats.max_memory,
                    limit: config.max_memory,
                });
            }
        }
    }

    log::debug!(
        "Frontier exhausted after {} expansions ({} stale nodes)",
        stats.expanded,
        stats.stale
    );
    Err(SearchFailure::NoPath {
        expanded: stats.expanded,
    })
}

/// Search the deepest nodes first.
pub fn depth_first_search<P: SearchProblem>(
    problem: &P,
) -> Result<Solution<P::Action>, SearchFailure> {
    search_generic::<P, StackFrontier<P::State, P::Action>, _>(
        problem,
        &NullHeuristic,
        &Config::default(),
    )
}

/// Search the shallowest nodes first.
pub fn breadth_first_search<P: SearchProblem>(
    problem: &P,
) -> Result<Solution<P::Action>, SearchFailure> {
    search_generic::<P, QueueFrontier<P::State, P::Action>, _>(
        problem,
        &NullHeuristic,
        &Config::default(),
    )
}

/// Search the node with the least path cost first.
pub fn uniform_cost_search<P: SearchProblem>(
    problem: &P,
) -> Result<Solution<P::Action>, SearchFailure> {
    search_generic::<P, PriorityFrontier<P::State, P::Action>, _>(
        problem,
        &NullHeuristic,
        &Config::default(),
    )
}

/// Search the node with the least path cost plus heuristic first.
pub fn a_star_search<P: SearchProblem, H: Heuristic<P>>(
    problem: &P,
    heuristic: &H,
) -> Result<Solution<P::Action>, SearchFailure> {
    search_generic::<P, PriorityFrontier<P::State, P::Action>, _>(
        problem,
        heuristic,
        &Config::default(),
    )
}

/// Search with the given algorithm. The heuristic is only used by [`Algorithm::AStar`].
pub fn search<P: SearchProblem, H: Heuristic<P>>(
    problem: &P,
    algorithm: Algorithm,
    heuristic: &H,
    config: &Config,
) -> Result<Solution<P::Action>, SearchFailure> {
    match algorithm {
        Algorithm::Dfs => search_generic::<P, StackFrontier<P::State, P::Action>, _>(
            problem,
            &NullHeuristic,
            config,
        ),
        Algorithm::Bfs => search_generic::<P, QueueFrontier<P::State, P::Action>, _>(
            problem,
            &NullHeuristic,
            config,
        ),
        Algorithm::Ucs => search_generic::<P, PriorityFrontier<P::State, P::Action>, _>(
            problem,
            &NullHeuristic,
            config,
        ),
        Algorithm::AStar => search_generic::<P, PriorityFrontier<P::State, P::Action>, _>(
            problem, heuristic, config,
        ),
    }
}
