//! Search problems on grid layouts. Every move costs 1.
use super::*;
use crate::problem::*;
use crate::types::*;

use bitvec::prelude::*;

/// Successors of a cell in [`Direction::CARDINAL`] order.
fn grid_successors(layout: &Layout, position: Position) -> Vec<(Position, Direction, Cost)> {
    Direction::CARDINAL
        .into_iter()
        .filter_map(|direction| {
            layout
                .neighbor(position, direction)
                .map(|next| (next, direction, 1.0))
        })
        .collect()
}

/// Number of moves, or [`INFEASIBLE_COST`] if any of them runs into a wall.
fn grid_actions_cost(layout: &Layout, start: Position, actions: &[Direction]) -> Cost {
    match layout.follow(start, actions) {
        Some(_) => actions.len() as Cost,
        None => INFEASIBLE_COST,
    }
}

/// Reach a given cell.
pub struct PositionProblem<'a> {
    layout: &'a Layout,
    start: Position,
    goal: Position,
}

impl<'a> PositionProblem<'a> {
    pub fn new(layout: &'a Layout, start: Position, goal: Position) -> Self {
        PositionProblem {
            layout,
            start,
            goal,
        }
    }

    /// Start from the agent's starting position in the layout.
    pub fn from_layout(layout: &'a Layout, goal: Position) -> Self {
        Self::new(layout, layout.agent_start(), goal)
    }

    #[inline]
    pub fn goal(&self) -> Position {
        self.goal
    }
}

impl<'a> SearchProblem for PositionProblem<'a> {
    type State = Position;
    type Action = Direction;

    fn starting_state(&self) -> Position {
        self.start
    }

    fn is_goal(&self, state: &Position) -> bool {
        *state == self.goal
    }

    fn successor_states(&self, state: &Position) -> Vec<(Position, Direction, Cost)> {
        grid_successors(self.layout, *state)
    }

    fn actions_cost(&self, actions: &[Direction]) -> Cost {
        grid_actions_cost(self.layout, self.start, actions)
    }
}

/// Reach any cell that contains food.
pub struct AnyFoodProblem<'a> {
    layout: &'a Layout,
    start: Position,
    food: Array2<bool>,
}

impl<'a> AnyFoodProblem<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self::with_food(layout, layout.agent_start(), layout.food().clone())
    }

    /// Start from `start` with a food grid that may differ from the layout's.
    pub fn with_food(layout: &'a Layout, start: Position, food: Array2<bool>) -> Self {
        AnyFoodProblem {
            layout,
            start,
            food,
        }
    }
}

impl<'a> SearchProblem for AnyFoodProblem<'a> {
    type State = Position;
    type Action = Direction;

    fn starting_state(&self) -> Position {
        self.start
    }

    fn is_goal(&self, state: &Position) -> bool {
        self.food.get(*state).copied().unwrap_or(false)
    }

    fn successor_states(&self, state: &Position) -> Vec<(Position, Direction, Cost)> {
        grid_successors(self.layout, *state)
    }

    fn actions_cost(&self, actions: &[Direction]) -> Cost {
        grid_actions_cost(self.layout, self.start, actions)
    }
}

/// Position together with the corners that were visited on the way.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CornersState {
    pub position: Position,
    /// Same order as [`CornersProblem::corners`].
    pub visited: [bool; 4],
}

/// Visit all four inner corners of the layout.
pub struct CornersProblem<'a> {
    layout: &'a Layout,
    corners: [Position; 4],
    /// Maze distances from each corner.
    corner_distances: Vec<Array2<Option<usize>>>,
}

impl<'a> CornersProblem<'a> {
    pub fn new(layout: &'a Layout) -> Result<Self, SearchFailure> {
        if layout.width() < 3 || layout.height() < 3 {
            return Err(SearchFailure::BadInput(format!(
                "Layout of size {}x{} has no inner corners",
                layout.width(),
                layout.height()
            )));
        }
        let top = layout.height() - 2;
        let right = layout.width() - 2;
        let corners = [(1, 1), (1, top), (right, 1), (right, top)];
        for corner in corners {
            if !layout.has_food(corner) {
                log::warn!("No food in corner ({}, {})", corner.0, corner.1);
            }
        }
        let corner_distances = corners
            .iter()
            .map(|&corner| layout.distances_from(corner))
            .collect();
        Ok(CornersProblem {
            layout,
            corners,
            corner_distances,
        })
    }

    /// Bottom left, top left, bottom right, top right.
    pub fn corners(&self) -> &[Position; 4] {
        &self.corners
    }

    /// Maze distance between a cell and the corner at the given index.
    pub fn distance_to_corner(&self, corner: usize, position: Position) -> Option<usize> {
        self.corner_distances[corner].get(position).copied().flatten()
    }

    fn visit(&self, position: Position, mut visited: [bool; 4]) -> [bool; 4] {
        for (flag, corner) in visited.iter_mut().zip(self.corners.iter()) {
            if *corner == position {
                *flag = true;
            }
        }
        visited
    }
}

impl<'a> SearchProblem for CornersProblem<'a> {
    type State = CornersState;
    type Action = Direction;

    fn starting_state(&self) -> CornersState {
        let position = self.layout.agent_start();
        CornersState {
            position,
            visited: self.visit(position, [false; 4]),
        }
    }

    fn is_goal(&self, state: &CornersState) -> bool {
        state.visited.iter().all(|&visited| visited)
    }

    fn successor_states(&self, state: &CornersState) -> Vec<(CornersState, Direction, Cost)> {
        grid_successors(self.layout, state.position)
            .into_iter()
            .map(|(position, direction, cost)| {
                let next = CornersState {
                    position,
                    visited: self.visit(position, state.visited),
                };
                (next, direction, cost)
            })
            .collect()
    }

    fn actions_cost(&self, actions: &[Direction]) -> Cost {
        grid_actions_cost(self.layout, self.layout.agent_start(), actions)
    }
}

/// Position together with the food that's left.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FoodState {
    pub position: Position,
    /// One bit per entry of [`FoodProblem::food_positions`], set if the food is still there.
    pub food: BitVec,
}

/// Eat all food in the layout.
pub struct FoodProblem<'a> {
    layout: &'a Layout,
    food_positions: Vec<Position>,
    /// Index into `food_positions` for each cell.
    food_index: Array2<Option<usize>>,
    /// Maze distances from each food cell.
    food_distances: Vec<Array2<Option<usize>>>,
}

impl<'a> FoodProblem<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        let food_positions = layout.food_positions();
        let mut food_index = Array2::from_elem((layout.width(), layout.height()), None);
        for (i, &position) in food_positions.iter().enumerate() {
            food_index[position] = Some(i);
        }
        let food_distances = food_positions
            .iter()
            .map(|&position| layout.distances_from(position))
            .collect();
        FoodProblem {
            layout,
            food_positions,
            food_index,
            food_distances,
        }
    }

    pub fn food_positions(&self) -> &[Position] {
        &self.food_positions
    }

    /// Maze distance between a cell and the food at the given index.
    pub fn distance_to_food(&self, food: usize, position: Position) -> Option<usize> {
        self.food_distances[food].get(position).copied().flatten()
    }

    fn eat(&self, position: Position, food: &mut BitVec) {
        if let Some(i) = self.food_index[position] {
            food.set(i, false);
        }
    }
}

impl<'a> SearchProblem for FoodProblem<'a> {
    type State = FoodState;
    type Action = Direction;

    fn starting_state(&self) -> FoodState {
        let position = self.layout.agent_start();
        let mut food = bitvec![1; self.food_positions.len()];
        self.eat(position, &mut food);
        FoodState { position, food }
    }

    fn is_goal(&self, state: &FoodState) -> bool {
        state.food.not_any()
    }

    fn successor_states(&self, state: &FoodState) -> Vec<(FoodState, Direction, Cost)> {
        grid_successors(self.layout, state.position)
            .into_iter()
            .map(|(position, direction, cost)| {
                let mut food = state.food.clone();
                self.eat(position, &mut food);
                (FoodState { position, food }, direction, cost)
            })
            .collect()
    }

    fn actions_cost(&self, actions: &[Direction]) -> Cost {
        grid_actions_cost(self.layout, self.layout.agent_start(), actions)
    }
}
