use std::marker::PhantomData;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use thousands::Separable;

use crate::cost::Cost;
use crate::problem::ObjectiveProblem;
use crate::search::IncrementalSearch;
use crate::search::SearchError;
use crate::search::Snapshot;
use crate::search::path_from_parents;
use crate::search::validate_endpoints;
use crate::search::write_collection_stats;
use crate::space::Space;
use crate::space::State;

/// Depth-first search.
///
/// States are marked as visited when popped. Copies of already visited
/// States are discarded without producing a snapshot.
///
/// The parent of a State is whichever State pushed it last, so a later push
/// can replace the parent recorded by an earlier one. Paths are valid, but
/// make no claim of being short.
#[derive(Debug)]
pub struct DepthFirstSearch<OP, Sp, St, C>
where
    OP: ObjectiveProblem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    stack: Vec<St>,
    visited: FxHashSet<St>,
    parents: FxHashMap<St, Option<St>>,

    pending_expansion: Option<St>,
    finished: bool,

    problem: OP,

    _phantom_space: PhantomData<Sp>,
    _phantom_cost: PhantomData<C>,
}

impl<OP, Sp, St, C> DepthFirstSearch<OP, Sp, St, C>
where
    OP: ObjectiveProblem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    pub fn new(op: OP) -> Result<Self, SearchError<St>> {
        validate_endpoints(&op)?;
        let start = op.start();
        log::debug!("DFS from {:?} to {:?}", start, op.goal());

        let mut parents = FxHashMap::default();
        parents.insert(start, None);

        Ok(Self {
            stack: vec![start],
            visited: FxHashSet::default(),
            parents,
            pending_expansion: None,
            finished: false,

            problem: op,

            _phantom_space: PhantomData,
            _phantom_cost: PhantomData,
        })
    }

    /// Number of entries in the stack, visited copies included.
    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    fn expand(&mut self, state: St) {
        // Reversed so the first neighbour ends up on top.
        for s in self.problem.space().neighbours(&state).into_iter().rev() {
            if !self.visited.contains(&s) {
                self.parents.insert(s, Some(state));
                self.stack.push(s);
            }
        }
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "DepthFirstSearch Stats:")?;
        write_collection_stats::<St>(
            &mut out,
            "Stack",
            self.stack.len(),
            self.stack.capacity(),
        )?;
        write_collection_stats::<St>(
            &mut out,
            "Visited",
            self.visited.len(),
            self.visited.capacity(),
        )?;
        write_collection_stats::<(St, Option<St>)>(
            &mut out,
            "Parents",
            self.parents.len(),
            self.parents.capacity(),
        )?;
        writeln!(
            out,
            "  - Expanded nodes: {}",
            self.visited.len().separate_with_commas()
        )?;

        Ok(())
    }
}

impl<OP, Sp, St, C> IncrementalSearch<St> for DepthFirstSearch<OP, Sp, St, C>
where
    OP: ObjectiveProblem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    fn step(&mut self) -> Option<Snapshot<'_, St>> {
        if self.finished {
            return None;
        }
        if let Some(state) = self.pending_expansion.take() {
            self.expand(state);
        }

        while let Some(state) = self.stack.pop() {
            if !self.visited.insert(state) {
                log::trace!("DFS skipping visited {state:?}");
                continue;
            }
            log::trace!("DFS popped {state:?}");

            if self.problem.is_goal(&state) {
                self.finished = true;
                let path = path_from_parents(&self.parents, state);
                log::debug!(
                    "DFS reached {state:?} after visiting {} states. {path}",
                    self.visited.len()
                );
                return Some(Snapshot::solution(&self.visited, path));
            }

            self.pending_expansion = Some(state);
            return Some(Snapshot::progress(&self.visited));
        }

        self.finished = true;
        log::debug!(
            "DFS exhausted the stack after visiting {} states",
            self.visited.len()
        );
        Some(Snapshot::progress(&self.visited))
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn explored(&self) -> &FxHashSet<St> {
        &self.visited
    }

    fn write_memory_stats(&self, out: &mut dyn std::io::Write) -> std::io::Result<()> {
        DepthFirstSearch::write_memory_stats(self, out)
    }
}
