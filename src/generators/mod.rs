//! Random maze generators.
//!
//! Generators build a fully connected maze and pick the endpoints a search
//! has to connect.

pub mod maze_2d;
