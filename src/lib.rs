use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod cost;
pub mod data_structures;
pub mod logging;

// Search space and problems
// -------------------------
pub mod problem;
pub mod search;
pub mod space;

// Problems
// --------
pub mod generators;
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;

pub use algorithms::Algorithm;
pub use algorithms::run_search;
pub use generators::maze_2d::generate_maze;
