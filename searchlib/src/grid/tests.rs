use super::*;
use crate::graph_search::*;
use crate::problem::*;
use crate::Cost;

use itertools::{iproduct, Itertools};

const TINY_MAZE: &str = include_str!("../../../layouts/tinyMaze.lay");
const TINY_SEARCH: &str = include_str!("../../../layouts/tinySearch.lay");
const TINY_CORNERS: &str = include_str!("../../../layouts/tinyCorners.lay");
const PURSUIT_SMALL: &str = include_str!("../../../layouts/pursuitSmall.lay");

fn tiny_maze() -> Layout {
    TINY_MAZE.parse().unwrap()
}

#[test]
fn parse_tiny_maze() {
    let layout = tiny_maze();
    assert_eq!(layout.width(), 7);
    assert_eq!(layout.height(), 7);
    assert_eq!(layout.agent_start(), (5, 5));
    assert_eq!(layout.food_positions(), vec![(1, 1)]);
    assert_eq!(layout.food_count(), 1);
    assert!(layout.chaser_starts().is_empty());
    assert!(layout.is_wall((0, 0)));
    assert!(layout.is_wall((6, 3)));
    assert!(!layout.is_wall((1, 1)));
    // Outside of the grid
    assert!(layout.is_wall((7, 1)));
    assert!(!layout.has_food((7, 1)));
}

#[test]
fn parse_chasers() {
    let layout = Layout::parse(PURSUIT_SMALL).unwrap();
    assert_eq!(layout.agent_start(), (2, 3));
    assert_eq!(layout.chaser_starts(), &[(1, 1), (5, 2), (7, 3)]);
    assert_eq!(layout.food_positions(), vec![(1, 3), (3, 2)]);

    let layout = Layout::parse("%%%%%\n%P1G%\n%%%%%").unwrap();
    assert_eq!(layout.chaser_starts(), &[(2, 1), (3, 1)]);
}

#[test]
fn parse_errors() {
    for text in [
        "",
        "\n\n",
        "%%%%\n%P%\n%%%%",
        "%%%\n% %\n%%%",
        "%%%%\n%PP%\n%%%%",
        "%%%%\n%PX%\n%%%%",
    ] {
        assert!(
            matches!(Layout::parse(text), Err(SearchFailure::BadInput(_))),
            "{:?}",
            text
        );
    }
}

#[test]
fn parse_rows_of_spaces() {
    // Without a border, rows of spaces at the edges are free cells.
    let layout = Layout::parse("   \nP .\n   \n").unwrap();
    assert_eq!(layout.height(), 3);
    assert_eq!(layout.width(), 3);
    assert_eq!(layout.agent_start(), (0, 1));
    assert!(layout.has_food((2, 1)));
    assert!(!layout.is_wall((1, 0)));
    assert!(!layout.is_wall((1, 2)));

    // Empty lines around the layout are ignored.
    let layout = Layout::parse("\n\n%%%\n%P%\n%%%\n\n").unwrap();
    assert_eq!(layout.height(), 3);
    assert_eq!(layout.agent_start(), (1, 1));
}

#[test]
fn display_round_trip() {
    for text in [TINY_MAZE, TINY_SEARCH, PURSUIT_SMALL] {
        let layout = Layout::parse(text).unwrap();
        assert_eq!(Layout::parse(&layout.to_string()).unwrap(), layout);
        assert_eq!(layout.to_string(), text);
    }
}

#[test]
fn movement() {
    let layout = tiny_maze();
    let start = layout.agent_start();
    assert_eq!(layout.neighbor(start, Direction::North), None);
    assert_eq!(layout.neighbor(start, Direction::East), None);
    assert_eq!(layout.neighbor(start, Direction::West), Some((4, 5)));
    assert_eq!(layout.neighbor(start, Direction::South), Some((5, 4)));
    assert_eq!(layout.neighbor(start, Direction::Stop), Some(start));
    assert_eq!(
        layout.legal_directions(start),
        vec![Direction::South, Direction::West]
    );
    assert_eq!(layout.follow(start, &[Direction::West; 4]), Some((1, 5)));
    assert_eq!(layout.follow(start, &[Direction::West; 5]), None);
    assert_eq!(layout.follow(start, &[]), Some(start));
    // Never leaves the grid from the border
    assert_eq!(layout.neighbor((0, 0), Direction::South), None);

    for direction in Direction::CARDINAL {
        let (dx, dy) = direction.offset();
        let (rx, ry) = direction.reverse().offset();
        assert_eq!((dx + rx, dy + ry), (0, 0));
        assert_eq!(direction.reverse().reverse(), direction);
    }
    assert_eq!(Direction::Stop.reverse(), Direction::Stop);
}

#[test]
fn distances() {
    let layout = tiny_maze();
    assert_eq!(manhattan((1, 2), (4, 0)), 5);
    assert_eq!(manhattan((4, 0), (1, 2)), 5);
    assert_eq!(maze_distance(&layout, layout.agent_start(), (1, 1)), Ok(8));
    assert_eq!(maze_distance(&layout, (1, 1), (1, 1)), Ok(0));
    assert!(maze_distance(&layout, (0, 0), (1, 1)).is_err());

    let field = layout.distances_from(layout.agent_start());
    for position in iproduct!(0..layout.width(), 0..layout.height()) {
        if layout.is_wall(position) {
            assert_eq!(field[position], None);
        } else {
            let distance = maze_distance(&layout, layout.agent_start(), position).unwrap();
            assert_eq!(field[position], Some(distance));
            assert!(manhattan(layout.agent_start(), position) <= distance);
        }
    }
}

#[test]
fn position_problem() {
    let layout = tiny_maze();
    let problem = PositionProblem::from_layout(&layout, (1, 1));
    for algorithm in Algorithm::ALL {
        let solution = search(&problem, algorithm, &manhattan_heuristic, &Config::default()).unwrap();
        assert_eq!(layout.follow(layout.agent_start(), &solution.actions), Some((1, 1)));
        assert_eq!(problem.actions_cost(&solution.actions), solution.cost);
        if algorithm != Algorithm::Dfs {
            assert_eq!(solution.actions.len(), 8, "{algorithm}");
        }
    }
    let euclidean = a_star_search(&problem, &euclidean_heuristic).unwrap();
    assert_eq!(euclidean.cost, 8.0);
    assert_eq!(problem.actions_cost(&[Direction::North]), INFEASIBLE_COST);
    assert_eq!(
        problem.actions_cost(&[Direction::West, Direction::South]),
        INFEASIBLE_COST
    );
}

#[test]
fn any_food_problem() {
    let layout = Layout::parse(TINY_SEARCH).unwrap();
    let solution = breadth_first_search(&AnyFoodProblem::new(&layout)).unwrap();
    assert_eq!(solution.actions, vec![Direction::North]);

    let no_food = Array2::from_elem((layout.width(), layout.height()), false);
    let problem = AnyFoodProblem::with_food(&layout, layout.agent_start(), no_food);
    assert!(matches!(
        uniform_cost_search(&problem),
        Err(SearchFailure::NoPath { .. })
    ));
}

#[test]
fn corners_problem() {
    let layout = Layout::parse(TINY_CORNERS).unwrap();
    let problem = CornersProblem::new(&layout).unwrap();
    assert_eq!(problem.corners(), &[(1, 1), (1, 6), (6, 1), (6, 6)]);

    let bfs = breadth_first_search(&problem).unwrap();
    assert_eq!(bfs.actions.len(), 28);
    assert_eq!(problem.actions_cost(&bfs.actions), 28.0);

    let ucs = uniform_cost_search(&problem).unwrap();
    let astar = a_star_search(&problem, &corners_heuristic).unwrap();
    assert_eq!(ucs.cost, 28.0);
    assert_eq!(astar.cost, 28.0);
    assert!(astar.stats.expanded < ucs.stats.expanded);

    // Every corner is on the path.
    let mut position = layout.agent_start();
    let mut visited = vec![position];
    for &direction in &astar.actions {
        position = layout.neighbor(position, direction).unwrap();
        visited.push(position);
    }
    for corner in problem.corners() {
        assert!(visited.contains(corner));
    }
}

#[test]
fn corners_problem_edge_cases() {
    // One corner of the maze is a wall.
    let layout = tiny_maze();
    let problem = CornersProblem::new(&layout).unwrap();
    assert!(matches!(
        breadth_first_search(&problem),
        Err(SearchFailure::NoPath { .. })
    ));

    // All corners are the starting position.
    let layout = Layout::parse("%%%\n%P%\n%%%").unwrap();
    let problem = CornersProblem::new(&layout).unwrap();
    assert!(problem.is_goal(&problem.starting_state()));
    assert!(breadth_first_search(&problem).unwrap().actions.is_empty());

    let layout = Layout::parse("P").unwrap();
    assert!(CornersProblem::new(&layout).is_err());
}

#[test]
fn food_problem() {
    let layout = Layout::parse(TINY_SEARCH).unwrap();
    let problem = FoodProblem::new(&layout);
    assert_eq!(problem.food_positions().len(), 10);

    let ucs = uniform_cost_search(&problem).unwrap();
    let astar = a_star_search(&problem, &food_heuristic).unwrap();
    assert_eq!(ucs.cost, 27.0);
    assert_eq!(astar.cost, 27.0);
    assert_eq!(problem.actions_cost(&astar.actions), 27.0);
    assert!(astar.stats.expanded < ucs.stats.expanded);
}

#[test]
fn heuristics_are_admissible_along_optimal_path() {
    let layout = Layout::parse(TINY_SEARCH).unwrap();
    let problem = FoodProblem::new(&layout);
    let solution = a_star_search(&problem, &food_heuristic).unwrap();
    let mut state = problem.starting_state();
    let states = solution
        .actions
        .iter()
        .map(|action| {
            state = problem
                .successor_states(&state)
                .into_iter()
                .find(|(_, a, _)| a == action)
                .unwrap()
                .0;
            state.clone()
        })
        .collect_vec();
    assert!(food_heuristic(&problem.starting_state(), &problem) <= solution.cost);
    for (i, state) in states.iter().enumerate() {
        let remaining = solution.cost - (i + 1) as Cost;
        assert!(food_heuristic(state, &problem) <= remaining);
    }
    assert!(problem.is_goal(&state));
    assert_eq!(food_heuristic(&state, &problem), 0.0);

    let layout = Layout::parse(TINY_CORNERS).unwrap();
    let problem = CornersProblem::new(&layout).unwrap();
    assert!(corners_heuristic(&problem.starting_state(), &problem) <= 28.0);
}

#[test]
fn closest_dot() {
    let layout = Layout::parse(TINY_SEARCH).unwrap();
    let path = closest_dot_path(&layout).unwrap();
    assert!(path.len() >= 27);
    let mut position = layout.agent_start();
    let mut eaten = vec![position];
    for &direction in &path {
        position = layout.neighbor(position, direction).unwrap();
        eaten.push(position);
    }
    assert!(layout
        .food_positions()
        .iter()
        .all(|food| eaten.contains(food)));

    let layout = Layout::parse("%%%%\n%P %\n%%%%").unwrap();
    assert!(closest_dot_path(&layout).unwrap().is_empty());

    let layout = Layout::parse("%%%%%\n%P%.%\n%%%%%").unwrap();
    assert!(closest_dot_path(&layout).is_err());
}
