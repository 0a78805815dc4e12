//! Grid world: text layouts, movement and distances.
//!
//! Layouts use the following characters:
//! - `%`: wall
//! - `.` or `o`: food (capsules are treated as food)
//! - `P`: starting position of agent 0
//! - `G` or `1`-`4`: starting position of a chaser
//! - space: free cell
//!
//! Cells are addressed with `(x, y)` where `y = 0` is the bottom row of the text.
mod heuristics;
pub mod problems;

pub use heuristics::*;
pub use problems::*;

use crate::graph_search::breadth_first_search;
use crate::SearchFailure;

use itertools::iproduct;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Cell coordinates `(x, y)`.
pub type Position = (usize, usize);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// Movement directions in the order successors are generated.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// `(dx, dy)` vector of this direction.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }

    pub fn reverse(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Stop => Direction::Stop,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub fn manhattan(a: Position, b: Position) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// A rectangular grid of walls with food and starting positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Indexed by `(x, y)`.
    walls: Array2<bool>,
    /// Indexed by `(x, y)`.
    food: Array2<bool>,
    agent_start: Position,
    chaser_starts: Vec<Position>,
}

impl Layout {
    pub fn parse(text: &str) -> Result<Layout, SearchFailure> {
        let mut rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .skip_while(|line| line.is_empty())
            .collect();
        // Rows of spaces are free cells, only empty lines are dropped.
        while rows.last().map_or(false, |line| line.is_empty()) {
            rows.pop();
        }
        let height = rows.len();
        if height == 0 {
            return Err(SearchFailure::BadInput("Layout is empty".to_string()));
        }
        let width = rows[0].chars().count();
        if let Some(row) = rows.iter().find(|row| row.chars().count() != width) {
            return Err(SearchFailure::BadInput(format!(
                "Layout is not rectangular: expected width {}, found row {:?}",
                width, row
            )));
        }

        let mut walls = Array2::from_elem((width, height), false);
        let mut food = Array2::from_elem((width, height), false);
        let mut agent_start: Option<Position> = None;
        let mut chaser_starts = Vec::new();
        for (row_index, row) in rows.iter().enumerate() {
            let y = height - 1 - row_index;
            for (x, c) in row.chars().enumerate() {
                match c {
                    '%' => walls[(x, y)] = true,
                    '.' | 'o' => food[(x, y)] = true,
                    'P' => {
                        if agent_start.replace((x, y)).is_some() {
                            return Err(SearchFailure::BadInput(
                                "Layout has more than one starting position".to_string(),
                            ));
                        }
                    }
                    'G' | '1'..='4' => chaser_starts.push((x, y)),
                    ' ' => {}
                    _ => {
                        return Err(SearchFailure::BadInput(format!(
                            "Unknown layout character {:?} at ({}, {})",
                            c, x, y
                        )))
                    }
                }
            }
        }
        // Sort chasers in (x, y) order as the rest of the layout is indexed.
        chaser_starts.sort();

        let agent_start = agent_start.ok_or_else(|| {
            SearchFailure::BadInput("Layout has no starting position".to_string())
        })?;
        Ok(Layout {
            walls,
            food,
            agent_start,
            chaser_starts,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.walls.nrows()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.walls.ncols()
    }

    /// Cells outside of the grid count as walls.
    #[inline]
    pub fn is_wall(&self, position: Position) -> bool {
        self.walls.get(position).copied().unwrap_or(true)
    }

    #[inline]
    pub fn has_food(&self, position: Position) -> bool {
        self.food.get(position).copied().unwrap_or(false)
    }

    /// Food grid indexed by `(x, y)`.
    pub fn food(&self) -> &Array2<bool> {
        &self.food
    }

    /// Food cells in `(x, y)` order.
    pub fn food_positions(&self) -> Vec<Position> {
        iproduct!(0..self.width(), 0..self.height())
            .filter(|&position| self.food[position])
            .collect()
    }

    pub fn food_count(&self) -> usize {
        self.food.iter().filter(|&&food| food).count()
    }

    #[inline]
    pub fn agent_start(&self) -> Position {
        self.agent_start
    }

    pub fn chaser_starts(&self) -> &[Position] {
        &self.chaser_starts
    }

    /// The cell reached by moving one step in `direction`, `None` if it's a wall.
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let next = (
            position.0.checked_add_signed(dx)?,
            position.1.checked_add_signed(dy)?,
        );
        if self.is_wall(next) {
            None
        } else {
            Some(next)
        }
    }

    /// Cardinal directions that don't run into a wall.
    pub fn legal_directions(&self, position: Position) -> Vec<Direction> {
        Direction::CARDINAL
            .into_iter()
            .filter(|&direction| self.neighbor(position, direction).is_some())
            .collect()
    }

    /// Follow the given moves from `start`. `None` if any of them runs into a wall.
    pub fn follow(&self, start: Position, moves: &[Direction]) -> Option<Position> {
        moves
            .iter()
            .try_fold(start, |position, &direction| self.neighbor(position, direction))
    }

    /// Maze distances from `source` to every cell. Walls and unreachable cells are `None`.
    pub fn distances_from(&self, source: Position) -> Array2<Option<usize>> {
        let mut distances = Array2::from_elem(self.walls.raw_dim(), None);
        if self.is_wall(source) {
            return distances;
        }
        distances[source] = Some(0);
        let mut queue = VecDeque::from([(source, 0)]);
        while let Some((position, distance)) = queue.pop_front() {
            for direction in Direction::CARDINAL {
                if let Some(next) = self.neighbor(position, direction) {
                    if distances[next].is_none() {
                        distances[next] = Some(distance + 1);
                        queue.push_back((next, distance + 1));
                    }
                }
            }
        }
        distances
    }
}

impl std::str::FromStr for Layout {
    type Err = SearchFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::parse(s)
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                let c = if self.walls[(x, y)] {
                    '%'
                } else if (x, y) == self.agent_start {
                    'P'
                } else if self.chaser_starts.contains(&(x, y)) {
                    'G'
                } else if self.food[(x, y)] {
                    '.'
                } else {
                    ' '
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Length of the shortest path between two free cells, found with breadth-first search.
pub fn maze_distance(layout: &Layout, a: Position, b: Position) -> Result<usize, SearchFailure> {
    for position in [a, b] {
        if layout.is_wall(position) {
            return Err(SearchFailure::BadInput(format!(
                "({}, {}) is a wall",
                position.0, position.1
            )));
        }
    }
    let problem = PositionProblem::new(layout, a, b);
    Ok(breadth_first_search(&problem)?.actions.len())
}

#[cfg(test)]
mod tests;
