use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use thiserror::Error;

use crate::problems::maze_2d::Coord;
use crate::problems::maze_2d::DEFAULT_COLS;
use crate::problems::maze_2d::DEFAULT_ROWS;
use crate::problems::maze_2d::Maze2DDirection;
use crate::problems::maze_2d::Maze2DInstance;
use crate::problems::maze_2d::Maze2DSpace;
use crate::problems::maze_2d::Maze2DState;

/// Chance of knocking down each interior wall after carving.
pub const DEFAULT_LOOP_PROBABILITY: f64 = 0.20;

#[derive(Debug, Error, PartialEq)]
pub enum GeneratorError {
    #[error("Invalid maze size {rows}x{cols}")]
    InvalidSize { rows: usize, cols: usize },
    #[error("A {rows}x{cols} maze has no room for distinct start and goal cells")]
    TooFewCells { rows: usize, cols: usize },
    #[error("Loop probability {0} is not within [0, 1]")]
    InvalidLoopProbability(f64),
}

/// Carves a random spanning tree and then adds loops to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze2DGenerator {
    rows: usize,
    cols: usize,
    loop_probability: f64,
}

impl Default for Maze2DGenerator {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            loop_probability: DEFAULT_LOOP_PROBABILITY,
        }
    }
}

/// A cell on the carving stack along with the directions left to try.
struct CarveFrame {
    cell: Maze2DState,
    directions: [Maze2DDirection; 4],
    next: usize,
}

impl CarveFrame {
    fn new<R: Rng + ?Sized>(cell: Maze2DState, rng: &mut R) -> Self {
        let mut directions = Maze2DDirection::ALL;
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            next: 0,
        }
    }

    fn next_direction(&mut self) -> Option<Maze2DDirection> {
        let d = self.directions.get(self.next).copied();
        self.next += 1;
        d
    }
}

impl Maze2DGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimensions(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_loop_probability(mut self, loop_probability: f64) -> Self {
        self.loop_probability = loop_probability;
        self
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    pub fn loop_probability(&self) -> f64 {
        self.loop_probability
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        let (rows, cols) = self.dimensions();
        if rows == 0 || cols == 0 || !Maze2DState::safe_dimensions(rows, cols) {
            return Err(GeneratorError::InvalidSize { rows, cols });
        }
        if rows * cols < 2 {
            return Err(GeneratorError::TooFewCells { rows, cols });
        }
        if !(0.0..=1.0).contains(&self.loop_probability) {
            return Err(GeneratorError::InvalidLoopProbability(
                self.loop_probability,
            ));
        }
        Ok(())
    }

    /// Builds a maze and picks two distinct endpoints on it.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Maze2DInstance, GeneratorError> {
        self.validate()?;

        let mut space = Maze2DSpace::new_closed(self.rows, self.cols);
        let origin = self.random_state(rng);
        self.carve(&mut space, origin, rng);
        debug_assert_eq!(space.passages(), space.len() - 1);
        let spanning_passages = space.passages();

        self.add_loops(&mut space, rng);
        debug_assert!(space.walls_are_symmetric());

        let start = self.random_state(rng);
        let goal = loop {
            let goal = self.random_state(rng);
            if goal != start {
                break goal;
            }
        };

        log::debug!(
            "Generated {}x{} maze from {origin}: {} tree passages, {} after loops. {start} -> {goal}",
            self.rows,
            self.cols,
            spanning_passages,
            space.passages(),
        );

        Ok(Maze2DInstance { space, start, goal })
    }

    /// Reproducible generation from a seed.
    pub fn generate_seeded(&self, seed: u64) -> Result<Maze2DInstance, GeneratorError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(&mut rng)
    }

    fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> Maze2DState {
        Maze2DState::new(
            rng.random_range(0..self.rows as Coord),
            rng.random_range(0..self.cols as Coord),
        )
    }

    /// Randomised depth-first carve over every cell.
    ///
    /// Leaves a spanning tree: each cell but `origin` gets exactly one wall
    /// opened towards the cell that discovered it.
    fn carve<R: Rng + ?Sized>(&self, space: &mut Maze2DSpace, origin: Maze2DState, rng: &mut R) {
        let mut visited = vec![false; space.len()];
        let index = |s: &Maze2DState| s.row() as usize * self.cols + s.col() as usize;

        visited[index(&origin)] = true;
        let mut stack = Vec::with_capacity(space.len());
        stack.push(CarveFrame::new(origin, rng));

        while let Some(frame) = stack.last_mut() {
            let cell = frame.cell;
            let Some(d) = frame.next_direction() else {
                // Dead end, backtrack
                stack.pop();
                continue;
            };
            let Some(next) = space.neighbour(&cell, d) else {
                continue;
            };
            if visited[index(&next)] {
                continue;
            }

            log::trace!("Carving {cell}{d}{next}");
            visited[index(&next)] = true;
            space.open_wall(&cell, d);
            stack.push(CarveFrame::new(next, rng));
        }

        debug_assert!(visited.iter().all(|v| *v));
    }

    /// Independently opens each interior wall with `loop_probability`.
    fn add_loops<R: Rng + ?Sized>(&self, space: &mut Maze2DSpace, rng: &mut R) {
        let (rows, cols) = (self.rows as Coord, self.cols as Coord);
        for row in 0..rows {
            for col in 0..cols {
                let s = Maze2DState::new(row, col);
                if row + 1 < rows && rng.random_bool(self.loop_probability) {
                    space.open_wall(&s, Maze2DDirection::Down);
                }
                if col + 1 < cols && rng.random_bool(self.loop_probability) {
                    space.open_wall(&s, Maze2DDirection::Right);
                }
            }
        }
    }
}

/// Generates a default sized maze with the thread-local RNG.
pub fn generate_maze() -> Result<Maze2DInstance, GeneratorError> {
    Maze2DGenerator::default().generate(&mut rand::rng())
}
