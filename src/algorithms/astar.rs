use std::marker::PhantomData;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use thousands::Separable;

use crate::cost::Cost;
use crate::data_structures::heap::Heap;
use crate::problem::ObjectiveProblem;
use crate::search::IncrementalSearch;
use crate::search::SearchError;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::search::Snapshot;
use crate::search::validate_endpoints;
use crate::search::write_collection_stats;
use crate::space::ObjectiveHeuristic;
use crate::space::Space;
use crate::space::State;

/// The ranking tuple for A*
///
/// We prefer better f-values, and tie break by insertion order so equally
/// ranked nodes come out in the order they were found.
///
/// ```
/// use mazesearch::algorithms::astar::AStarRank;
///
/// assert!(AStarRank::new(2u32, 0u32, 9) < AStarRank::new(2u32, 1u32, 0));
/// assert!(AStarRank::new(1u32, 1u32, 0) < AStarRank::new(0u32, 2u32, 1));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarRank<C: Cost> {
    f: C,
    order: usize,
}
impl<C> AStarRank<C>
where
    C: Cost,
{
    pub fn new(g: C, h: C, order: usize) -> Self {
        Self {
            f: g.saturating_add(&h),
            order,
        }
    }
    pub fn f(&self) -> C {
        self.f
    }
}

#[derive(Debug)]
pub struct AStarHeapNode<C>
where
    C: Cost,
{
    /// The rank of this node that defines how good it is.
    pub rank: AStarRank<C>,
    /// The index of this node in the Search Tree
    pub node_index: SearchTreeIndex,
}

impl<C: Cost> PartialEq for AStarHeapNode<C> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl<C: Cost> Eq for AStarHeapNode<C> {}

impl<C: Cost> PartialOrd for AStarHeapNode<C> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<C: Cost> Ord for AStarHeapNode<C> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// Best-first search guided by `f = g + h`.
///
/// A State may sit in the open list more than once. Only strictly better
/// copies get pushed, and copies of closed States are dropped when popped.
#[derive(Debug)]
pub struct AStarSearch<OH, OP, Sp, St, C>
where
    OH: ObjectiveHeuristic<Sp, St, C>,
    OP: ObjectiveProblem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    /// All the Search Nodes. Naturally forms a Search Tree as each node may
    /// have a parent Node.
    search_tree: SearchTree<St, C>,

    /// Min-heap of `(AStarRank, SearchTreeIndex)`.
    open: Heap<AStarHeapNode<C>>,

    /// The best `g` among the copies of a State in `open`.
    queued_g: FxHashMap<St, C>,

    /// The "Closed Set".
    closed: FxHashSet<St>,

    /// Number of nodes pushed so far. Tie-breaks equal f-values.
    pushed: usize,
    /// A node whose snapshot was handed out, but hasn't been expanded yet.
    pending_expansion: Option<SearchTreeIndex>,
    finished: bool,

    problem: OP,

    _phantom_heuristic: PhantomData<OH>,
    _phantom_space: PhantomData<Sp>,
}

impl<OH, OP, Sp, St, C> AStarSearch<OH, OP, Sp, St, C>
where
    OH: ObjectiveHeuristic<Sp, St, C>,
    OP: ObjectiveProblem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    pub fn new(op: OP) -> Result<Self, SearchError<St>> {
        validate_endpoints(&op)?;
        let start = op.start();
        log::debug!("A* from {:?} to {:?}", start, op.goal());

        let mut search = Self {
            search_tree: SearchTree::<St, C>::new(),
            open: Heap::with_capacity(op.space().size().unwrap_or(64)),
            queued_g: FxHashMap::default(),
            closed: FxHashSet::default(),
            pushed: 0usize,
            pending_expansion: None,
            finished: false,

            problem: op,

            _phantom_heuristic: PhantomData,
            _phantom_space: PhantomData,
        };

        let h: C = search.h(&start);
        search.push_new(&start, None, C::zero(), h);

        Ok(search)
    }

    #[inline(always)]
    #[must_use]
    pub(crate) fn h(&self, s: &St) -> C {
        OH::h(s, &self.problem.goal())
    }

    #[inline(always)]
    #[must_use]
    pub fn is_closed(&self, s: &St) -> bool {
        self.closed.contains(s)
    }

    /// Number of entries in the open list, stale copies included.
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// The node that the next pop would return, if any.
    pub fn peek_node(&self) -> Option<&SearchTreeNode<St, C>> {
        self.open.peek().map(|n| &self.search_tree[n.node_index])
    }

    #[inline(always)]
    fn push_new(&mut self, s: &St, parent: Option<SearchTreeIndex>, g: C, h: C) {
        debug_assert!(!self.is_closed(s));

        let node_index = self
            .search_tree
            .push(SearchTreeNode::<St, C>::new(*s, parent, g, h));
        self.queued_g.insert(*s, g);
        self.open.push(AStarHeapNode {
            rank: AStarRank::new(g, h, self.pushed),
            node_index,
        });
        self.pushed += 1;
    }

    /// Queues the neighbours of an already closed node.
    fn expand(&mut self, node_index: SearchTreeIndex) {
        let state = *self.search_tree[node_index].state();
        let g: C = self.search_tree[node_index].g();
        debug_assert!(self.is_closed(&state));

        for s in self.problem.space().neighbours(&state) {
            if self.is_closed(&s) {
                continue;
            }

            let c: C = self.problem.space().cost(&state, &s);
            let neigh_g = g + c;
            // A copy that's at least as good is already queued.
            if self.queued_g.get(&s).is_some_and(|queued| *queued <= neigh_g) {
                continue;
            }

            let neigh_h = self.h(&s);
            self.push_new(&s, Some(node_index), neigh_g, neigh_h);
        }
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "AStarSearch Stats:")?;
        write_collection_stats::<SearchTreeNode<St, C>>(
            &mut out,
            "Nodes",
            self.search_tree.len(),
            self.search_tree.capacity(),
        )?;
        write_collection_stats::<AStarHeapNode<C>>(
            &mut out,
            "Open",
            self.open.len(),
            self.open.capacity(),
        )?;
        write_collection_stats::<(St, C)>(
            &mut out,
            "Queued",
            self.queued_g.len(),
            self.queued_g.capacity(),
        )?;
        write_collection_stats::<St>(
            &mut out,
            "Closed",
            self.closed.len(),
            self.closed.capacity(),
        )?;
        writeln!(
            out,
            "  - Expanded nodes: {}",
            self.closed.len().separate_with_commas()
        )?;

        Ok(())
    }
}

impl<OH, OP, Sp, St, C> IncrementalSearch<St> for AStarSearch<OH, OP, Sp, St, C>
where
    OH: ObjectiveHeuristic<Sp, St, C>,
    OP: ObjectiveProblem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    fn step(&mut self) -> Option<Snapshot<'_, St>> {
        if self.finished {
            return None;
        }
        if let Some(node_index) = self.pending_expansion.take() {
            self.expand(node_index);
        }

        while let Some(heap_node) = self.open.pop() {
            let node_index = heap_node.node_index;
            let state = *self.search_tree[node_index].state();
            if !self.closed.insert(state) {
                // Stale copy of an already closed State
                continue;
            }
            log::trace!("A* closed {state:?} ({:?})", heap_node.rank);

            if self.problem.is_goal(&state) {
                self.finished = true;
                let path = self.search_tree.path(node_index);
                log::debug!(
                    "A* reached {state:?} after closing {} states. {path}",
                    self.closed.len()
                );
                return Some(Snapshot::solution(&self.closed, path));
            }

            self.pending_expansion = Some(node_index);
            return Some(Snapshot::progress(&self.closed));
        }

        self.finished = true;
        log::debug!(
            "A* exhausted the open list after closing {} states",
            self.closed.len()
        );
        Some(Snapshot::progress(&self.closed))
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn explored(&self) -> &FxHashSet<St> {
        &self.closed
    }

    fn write_memory_stats(&self, out: &mut dyn std::io::Write) -> std::io::Result<()> {
        AStarSearch::write_memory_stats(self, out)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::algorithms::Maze2DAStar;
    use crate::problems::maze_2d::Maze2DCost;
    use crate::problems::maze_2d::Maze2DInstance;
    use crate::problems::maze_2d::Maze2DState;

    #[test]
    fn ranking_maze2d() {
        let c0: Maze2DCost = 0u32;
        let c1: Maze2DCost = 1u32;
        let c2: Maze2DCost = 2u32;

        assert!(AStarRank::new(c2, c0, 0) < AStarRank::new(c2, c1, 0));
        assert!(AStarRank::new(c2, c1, 3) == AStarRank::new(c2, c1, 3));

        // Same f-value, needs tie-breaking on insertion order
        let first = AStarRank::new(c0, c2, 0);
        let second = AStarRank::new(c2, c0, 1);
        assert!(first < second);
        assert_eq!(first.f(), second.f());
    }

    #[test]
    fn detour_snapshots() {
        // The straight line to the goal is walled off.
        let instance = Maze2DInstance::try_from(indoc! {"
            +-+-+-+
            |S|G  |
            + +-+ +
            |     |
            +-+-+-+
        "})
        .unwrap();
        let mut search = Maze2DAStar::new(instance.problem()).unwrap();

        let mut closed_sizes = vec![];
        let mut path = None;
        while let Some(snapshot) = search.step() {
            closed_sizes.push(snapshot.explored.len());
            if snapshot.path.is_some() {
                path = snapshot.path;
            }
        }

        // Each snapshot closes exactly one more State.
        assert_eq!(closed_sizes, (1..=closed_sizes.len()).collect::<Vec<_>>());
        let path = path.unwrap();
        assert_eq!(
            path.states,
            vec![
                Maze2DState::new(0, 0),
                Maze2DState::new(1, 0),
                Maze2DState::new(1, 1),
                Maze2DState::new(1, 2),
                Maze2DState::new(0, 2),
                Maze2DState::new(0, 1),
            ]
        );
        assert!(search.is_finished());
        assert!(search.step().is_none());
    }

    #[test]
    fn open_list_prefers_lower_f() {
        let instance = Maze2DInstance::try_from(indoc! {"
            +-+-+-+
            |     |
            + + + +
            |S   G|
            +-+-+-+
        "})
        .unwrap();
        let mut search = Maze2DAStar::new(instance.problem()).unwrap();
        assert_eq!(search.open_len(), 1);
        assert_eq!(search.peek_node().unwrap().f(), 2);

        // Closing the start queues both of its neighbours.
        assert!(search.step().unwrap().path.is_none());
        assert!(search.step().unwrap().path.is_none());
        assert_eq!(search.open_len(), 1);
        let next = search.peek_node().unwrap();
        assert_eq!(*next.state(), Maze2DState::new(0, 0));
        assert_eq!((next.g(), next.h(), next.f()), (1, 3, 4));

        let outcome = search.run();
        assert_eq!(outcome.path.unwrap().cost(), 2);
    }

    #[test]
    fn stale_copies_are_skipped() {
        // (0,2) is queued through (1,2) first, and then again with a better g
        // through (0,1) before either copy is popped.
        let instance = Maze2DInstance::try_from(indoc! {"
            +-+-+-+-+-+
            |     |   |
            + + + + + +
            |S|       |
            + + + +-+ +
            |     |G  |
            +-+-+-+-+-+
        "})
        .unwrap();
        let mut search = Maze2DAStar::new(instance.problem()).unwrap();
        let twice_queued = Maze2DState::new(0, 2);

        for expected in 1..=9 {
            assert_eq!(search.step().unwrap().explored.len(), expected);
        }
        assert_eq!(search.open_len(), 2);
        let mut queued: Vec<(Maze2DState, Maze2DCost)> = search
            .open
            .iter()
            .map(|n| {
                let node = &search.search_tree[n.node_index];
                (*node.state(), node.g())
            })
            .collect();
        queued.sort();
        assert_eq!(queued, vec![(twice_queued, 3), (twice_queued, 5)]);

        // The better copy closes it.
        let snapshot = search.step().unwrap();
        assert_eq!(snapshot.explored.len(), 10);
        assert!(snapshot.explored.contains(&twice_queued));

        // The worse copy is dropped on the way to the next State.
        let snapshot = search.step().unwrap();
        assert_eq!(snapshot.explored.len(), 11);
        assert!(snapshot.explored.contains(&Maze2DState::new(0, 3)));
        assert!(
            search
                .open
                .iter()
                .all(|n| *search.search_tree[n.node_index].state() != twice_queued)
        );

        let outcome = search.run();
        assert_eq!(outcome.steps, 3);
        assert_eq!(outcome.explored, 14);
        let path = outcome.path.unwrap();
        assert_eq!(path.cost(), 8);
        assert_eq!(
            path.states,
            vec![
                Maze2DState::new(1, 0),
                Maze2DState::new(2, 0),
                Maze2DState::new(2, 1),
                Maze2DState::new(2, 2),
                Maze2DState::new(1, 2),
                Maze2DState::new(1, 3),
                Maze2DState::new(1, 4),
                Maze2DState::new(2, 4),
                Maze2DState::new(2, 3),
            ]
        );
    }

    #[test]
    fn memory_stats() {
        let instance = Maze2DInstance::try_from("+-+-+\n|S G|\n+-+-+\n").unwrap();
        let mut search = Maze2DAStar::new(instance.problem()).unwrap();
        search.run();

        let mut out = vec![];
        AStarSearch::write_memory_stats(&search, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("AStarSearch Stats:\n"));
        assert!(out.contains("  - Expanded nodes: 2\n"));
    }
}
