use nonmax::NonMaxUsize;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use size::Size;
use thiserror::Error;
use thousands::Separable;

use crate::cost::Cost;
use crate::problem::ObjectiveProblem;
use crate::space::Path;
use crate::space::Space;
use crate::space::State;

/// A reference to a `SearchTreeNode<St, C>`.
///
/// `NonMaxUsize` leaves a niche so `Option<SearchTreeIndex>` is still one
/// word wide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchTreeIndex {
    index: NonMaxUsize,
}

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self {
            index: NonMaxUsize::new(index).expect("SearchTree ran out of indices"),
        }
    }

    #[inline(always)]
    pub fn get(&self) -> usize {
        self.index.get()
    }
}

#[derive(Clone, Debug)]
pub struct SearchTreeNode<St, C>
where
    St: State,
    C: Cost,
{
    pub(crate) parent: Option<SearchTreeIndex>,
    pub(crate) state: St,
    pub(crate) g: C,
    pub(crate) h: C,
}

impl<St, C> SearchTreeNode<St, C>
where
    St: State,
    C: Cost,
{
    pub fn new(s: St, parent: Option<SearchTreeIndex>, g: C, h: C) -> Self {
        Self {
            parent,
            state: s,
            g,
            h,
        }
    }

    pub fn state(&self) -> &St {
        &self.state
    }
    pub fn parent(&self) -> Option<SearchTreeIndex> {
        self.parent
    }
    pub fn g(&self) -> C {
        self.g
    }
    pub fn h(&self) -> C {
        self.h
    }
    pub fn f(&self) -> C {
        self.g.saturating_add(&self.h)
    }
}

/// All the Search Nodes created by one search run.
///
/// Nodes are only ever appended, so indices stay valid until the tree is
/// dropped together with the run that owns it.
pub(crate) struct SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    nodes: Vec<SearchTreeNode<St, C>>,
}

impl<St, C> SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self { nodes: vec![] }
    }

    #[inline(always)]
    pub(crate) fn push(&mut self, node: SearchTreeNode<St, C>) -> SearchTreeIndex {
        let index = SearchTreeIndex::new(self.nodes.len());
        self.nodes.push(node);
        index
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[must_use]
    pub fn path(&self, node_index: SearchTreeIndex) -> Path<St> {
        reconstruct_path(
            node_index,
            |i| self[i].parent,
            |i| *self[i].state(),
        )
    }
}

impl<St, C> Default for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, C> std::ops::Index<SearchTreeIndex> for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    type Output = SearchTreeNode<St, C>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.get()]
    }
}

impl<St, C> std::fmt::Debug for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

/// Walks a parent chain from `terminal` back to its root and returns the
/// states from the root to `terminal`.
///
/// ```
/// use mazesearch::search::reconstruct_path;
/// use mazesearch::space::State;
///
/// #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// struct Room(usize);
/// impl State for Room {}
///
/// let parents = [None, Some(0usize), Some(1), Some(1)];
/// let path = reconstruct_path(3usize, |i| parents[i], Room);
/// assert_eq!(path.states, vec![Room(0), Room(1), Room(3)]);
/// ```
pub fn reconstruct_path<K, St>(
    terminal: K,
    parent_of: impl Fn(K) -> Option<K>,
    state_of: impl Fn(K) -> St,
) -> Path<St>
where
    K: Copy,
    St: State,
{
    let mut path = Path::new_from_start(state_of(terminal));
    let mut k = terminal;
    while let Some(parent) = parent_of(k) {
        path.append(state_of(parent));
        k = parent;
    }

    path.reverse();
    path
}

/// Reconstructs a path out of a `state -> parent state` map.
///
/// The root maps to `None`. States missing from the map are treated as roots.
pub fn path_from_parents<St>(parents: &FxHashMap<St, Option<St>>, end: St) -> Path<St>
where
    St: State,
{
    reconstruct_path(end, |s| parents.get(&s).copied().flatten(), |s| s)
}

/// One observable increment of a search run.
///
/// The explored set is borrowed from the run, so a snapshot has to be
/// dropped before the next step can be requested.
#[derive(Debug, PartialEq, Eq)]
pub struct Snapshot<'s, St>
where
    St: State,
{
    /// States already finalised by the search.
    pub explored: &'s FxHashSet<St>,
    /// Only present on the last snapshot, and only when the goal was reached.
    pub path: Option<Path<St>>,
}

impl<'s, St> Snapshot<'s, St>
where
    St: State,
{
    pub(crate) fn progress(explored: &'s FxHashSet<St>) -> Self {
        Self {
            explored,
            path: None,
        }
    }
    pub(crate) fn solution(explored: &'s FxHashSet<St>, path: Path<St>) -> Self {
        Self {
            explored,
            path: Some(path),
        }
    }

    pub fn is_solution(&self) -> bool {
        self.path.is_some()
    }
}

/// The result of driving a search run to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome<St>
where
    St: State,
{
    /// Number of snapshots produced.
    pub steps: usize,
    /// Size of the explored set after the last snapshot.
    pub explored: usize,
    pub path: Option<Path<St>>,
}

/// A search that can be advanced one expansion at a time.
pub trait IncrementalSearch<St>
where
    St: State,
{
    /// Advances the search and returns the resulting snapshot.
    ///
    /// Returns `None` once the final snapshot (either carrying a path, or
    /// reporting exhaustion) has been handed out.
    fn step(&mut self) -> Option<Snapshot<'_, St>>;

    fn is_finished(&self) -> bool;

    fn explored(&self) -> &FxHashSet<St>;

    fn write_memory_stats(&self, out: &mut dyn std::io::Write) -> std::io::Result<()>;

    /// Steps until the search finishes.
    fn run(&mut self) -> Outcome<St> {
        let mut steps = 0usize;
        let mut path = None;
        while let Some(snapshot) = self.step() {
            steps += 1;
            if snapshot.path.is_some() {
                path = snapshot.path;
            }
        }

        Outcome {
            steps,
            explored: self.explored().len(),
            path,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError<St>
where
    St: State,
{
    #[error("Start {state:?} is outside the search space")]
    InvalidStart { state: St },
    #[error("Goal {state:?} is outside the search space")]
    InvalidGoal { state: St },
}

/// Rejects problems whose endpoints are not part of their space.
pub(crate) fn validate_endpoints<OP, Sp, St, C>(problem: &OP) -> Result<(), SearchError<St>>
where
    OP: ObjectiveProblem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    let start = problem.start();
    if !problem.space().valid(&start) {
        return Err(SearchError::InvalidStart { state: start });
    }
    let goal = problem.goal();
    if !problem.space().valid(&goal) {
        return Err(SearchError::InvalidGoal { state: goal });
    }
    Ok(())
}

/// Writes the length and capacity of a collection, and the memory they take.
pub(crate) fn write_collection_stats<T>(
    out: &mut dyn std::io::Write,
    name: &str,
    len: usize,
    capacity: usize,
) -> std::io::Result<()> {
    let s = std::mem::size_of::<T>();
    writeln!(
        out,
        "  - |{name}|:  {} ({})",
        len.separate_with_commas(),
        Size::from_bytes(len * s)
    )?;
    writeln!(
        out,
        "  - |{name}|*: {} ({})",
        capacity.separate_with_commas(),
        Size::from_bytes(capacity * s)
    )
}
