use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::cost::Cost;

/// Neighbourhoods up to this size stay on the stack.
pub const INLINE_NEIGHBOURS: usize = 4;

pub type Neighbours<St> = SmallVec<[St; INLINE_NEIGHBOURS]>;

pub trait State: Copy + Clone + Debug + PartialEq + Eq + Hash {}

/// A sequence of states from a start to an end, both inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<St>
where
    St: State,
{
    pub states: Vec<St>,
}

const MAX_STATES_DISPLAYED: usize = 20;

impl<St> Path<St>
where
    St: State,
{
    #[inline(always)]
    pub fn new_from_start(start: St) -> Self {
        Self {
            states: vec![start],
        }
    }

    #[inline(always)]
    pub fn empty() -> Self {
        Self { states: vec![] }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of states, including both ends.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Number of steps taken.
    #[inline(always)]
    pub fn cost(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<&St> {
        self.states.first()
    }
    pub fn end(&self) -> Option<&St> {
        self.states.last()
    }

    #[inline(always)]
    pub fn append(&mut self, s: St) {
        self.states.push(s);
    }

    /// Reverses the Path.
    ///
    /// Useful when naturally reconstructing paths in reverse.
    pub fn reverse(&mut self) {
        self.states.reverse();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, St> {
        self.states.iter()
    }
}

impl<St> std::fmt::Display for Path<St>
where
    St: State,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => {
                write!(
                    f,
                    "Path({}, {:?}:{:?}:{:?})",
                    self.cost(),
                    start,
                    self.states
                        .iter()
                        .take(MAX_STATES_DISPLAYED)
                        .collect::<Vec<_>>(),
                    end
                )
            }
            _ => write!(f, "Path()"),
        }
    }
}

pub trait Space<St, C>: Debug
where
    St: State,
    C: Cost,
{
    /// Cost of moving from `s` into the neighbour `next`.
    fn cost(&self, _s: &St, _next: &St) -> C {
        C::one()
    }
    /// Expands a State.
    ///
    /// The order of the neighbours is part of the contract, uninformed
    /// searches use it to break ties.
    fn neighbours(&self, s: &St) -> Neighbours<St>;
    /// Verify is a State is valid.
    fn valid(&self, s: &St) -> bool;

    /// Verifies that every step of the path moves into a neighbour.
    fn valid_path(&self, p: &Path<St>) -> bool {
        if p.is_empty() {
            // Empty paths are fine
            return true;
        }
        if !p.iter().all(|s| self.valid(s)) {
            return false;
        }
        p.states
            .windows(2)
            .all(|w| self.neighbours(&w[0]).contains(&w[1]))
    }

    fn size(&self) -> Option<usize> {
        None
    }
}

/// A heuristic that estimates the cost between two states.
pub trait ObjectiveHeuristic<Sp, St, C>: std::fmt::Debug
where
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    fn h(_a: &St, _b: &St) -> C {
        C::zero()
    }
}
