//! # State-Space Search Library
//!
//! Graph search (DFS, BFS, UCS, A*) over single-agent state spaces and depth-limited game-tree
//! search (Minimax, Alpha-Beta, Expectimax) over turn-based games, together with grid world
//! problems and a pursuit game that implement the provider contracts.

use serde::{Deserialize, Serialize};

pub mod game_tree;
pub mod graph_search;
pub mod grid;
pub mod io;
pub mod problem;
pub mod pursuit;
pub mod types;

pub use types::*;

#[global_allocator]
static ALLOCATOR: cap::Cap<std::alloc::System> = cap::Cap::new(std::alloc::System, usize::MAX);

/// Represents the reasons why a search attempt might fail.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "content")] // content is the reason string or the variant fields
pub enum SearchFailure {
    /// The frontier was exhausted without reaching a goal state.
    NoPath { expanded: usize },
    BadInput(String),
    OutOfMemory { used: usize, limit: usize },
}

impl std::error::Error for SearchFailure {}

impl std::fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SearchFailure::NoPath { expanded } => {
                write!(f, "No path to a goal state after {} expansions.", expanded)
            }
            SearchFailure::BadInput(reason) => write!(f, "Bad input: {}", reason),
            SearchFailure::OutOfMemory { used, limit } => {
                write!(f, "Out of memory! Used {} of {}.", used, limit)
            }
        }
    }
}
