//! Primitive data types.

/// Data type for step and path costs.
pub type Cost = f64;
/// Data type for state evaluations. Higher values are better for agent 0.
pub type Value = f64;
/// Data type for agent indices in a turn-based game.
pub type AgentIndex = usize;
/// Data type for search depth, measured in plies.
/// A ply is complete when every agent has moved once.
pub type Ply = usize;
