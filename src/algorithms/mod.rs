//! Implementation of search algorithms.
//!
//! These algorithms can do path-finding on generic search problems. Each one
//! is advanced one expansion at a time through
//! [`IncrementalSearch`](crate::search::IncrementalSearch), so callers can
//! observe (or animate) its progress.

pub mod astar;
pub mod bfs;
pub mod dfs;

use derive_more::Display;

use crate::problems::maze_2d::Maze2DCost;
use crate::problems::maze_2d::Maze2DHeuristicManhattanDistance;
use crate::problems::maze_2d::Maze2DProblem;
use crate::problems::maze_2d::Maze2DSpace;
use crate::problems::maze_2d::Maze2DState;
use crate::search::IncrementalSearch;
use crate::search::SearchError;

pub type Maze2DAStar<'s> = astar::AStarSearch<
    Maze2DHeuristicManhattanDistance,
    Maze2DProblem<'s>,
    Maze2DSpace,
    Maze2DState,
    Maze2DCost,
>;
pub type Maze2DBreadthFirst<'s> =
    bfs::BreadthFirstSearch<Maze2DProblem<'s>, Maze2DSpace, Maze2DState, Maze2DCost>;
pub type Maze2DDepthFirst<'s> =
    dfs::DepthFirstSearch<Maze2DProblem<'s>, Maze2DSpace, Maze2DState, Maze2DCost>;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    /// Best-first by `g + h`, with the Manhattan distance as `h`.
    #[display("A*")]
    #[value(name = "astar")]
    AStar,
    /// Fewest steps first.
    #[display("BFS")]
    #[value(name = "bfs")]
    BreadthFirst,
    /// Deepest first, in neighbour order.
    #[display("DFS")]
    #[value(name = "dfs")]
    DepthFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::AStar,
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
    ];
}

/// Starts a search over `space` that can then be stepped through.
///
/// Fails when either endpoint lies outside of `space`.
pub fn run_search<'s>(
    algorithm: Algorithm,
    space: &'s Maze2DSpace,
    start: Maze2DState,
    goal: Maze2DState,
) -> Result<Box<dyn IncrementalSearch<Maze2DState> + 's>, SearchError<Maze2DState>> {
    let problem = Maze2DProblem::new(space, start, goal);
    log::debug!("Running {algorithm} on {space:?} from {start} to {goal}");

    let search: Box<dyn IncrementalSearch<Maze2DState> + 's> = match algorithm {
        Algorithm::AStar => Box::new(Maze2DAStar::new(problem)?),
        Algorithm::BreadthFirst => Box::new(Maze2DBreadthFirst::new(problem)?),
        Algorithm::DepthFirst => Box::new(Maze2DDepthFirst::new(problem)?),
    };
    Ok(search)
}
