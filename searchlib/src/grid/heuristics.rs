use super::*;
use crate::graph_search::uniform_cost_search;
use crate::problem::INFEASIBLE_COST;
use crate::types::*;

/// Manhattan distance to the goal. Admissible since every move costs 1.
pub fn manhattan_heuristic(state: &Position, problem: &PositionProblem) -> Cost {
    manhattan(*state, problem.goal()) as Cost
}

/// Straight line distance to the goal.
pub fn euclidean_heuristic(state: &Position, problem: &PositionProblem) -> Cost {
    let (x, y) = state;
    let (gx, gy) = problem.goal();
    let dx = *x as f64 - gx as f64;
    let dy = *y as f64 - gy as f64;
    (dx * dx + dy * dy).sqrt()
}

fn farthest(distances: impl Iterator<Item = Option<usize>>) -> Cost {
    distances
        .map(|distance| distance.map_or(INFEASIBLE_COST, |d| d as Cost))
        .fold(0.0, Cost::max)
}

/// Maze distance to the farthest unvisited corner.
///
/// Admissible: all corners must be visited, including the farthest one.
pub fn corners_heuristic(state: &CornersState, problem: &CornersProblem) -> Cost {
    farthest(
        (0..state.visited.len())
            .filter(|&corner| !state.visited[corner])
            .map(|corner| problem.distance_to_corner(corner, state.position)),
    )
}

/// Maze distance to the farthest remaining food.
pub fn food_heuristic(state: &FoodState, problem: &FoodProblem) -> Cost {
    farthest(
        state
            .food
            .iter_ones()
            .map(|food| problem.distance_to_food(food, state.position)),
    )
}

/// Eat all food by repeatedly walking to the closest one with uniform cost search.
pub fn closest_dot_path(layout: &Layout) -> Result<Vec<Direction>, SearchFailure> {
    let mut position = layout.agent_start();
    let mut food = layout.food().clone();
    food[position] = false;
    let mut path = Vec::new();
    while food.iter().any(|&f| f) {
        let problem = AnyFoodProblem::with_food(layout, position, food.clone());
        let segment = uniform_cost_search(&problem)?.actions;
        for &direction in &segment {
            position = layout.neighbor(position, direction).ok_or_else(|| {
                SearchFailure::BadInput(format!("Illegal move {} in path segment", direction))
            })?;
            food[position] = false;
        }
        path.extend(segment);
    }
    log::info!("Path found with cost {}", path.len());
    Ok(path)
}
