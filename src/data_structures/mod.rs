//! Containers backing the search algorithms.

pub mod heap;
