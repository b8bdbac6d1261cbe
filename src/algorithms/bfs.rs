use std::collections::VecDeque;
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

/// Breadth-first search.
///
/// States are marked as visited when they are discovered, so each one is
/// queued at most once and the first path found has the fewest steps.
#[derive(Debug)]
pub struct BreadthFirstSearch<OP, Sp, St, C>
where
    OP: ObjectiveProblem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    queue: VecDeque<St>,
    visited: FxHashSet<St>,
    /// The State each State was discovered from. `None` for the start.
    parents: FxHashMap<St, Option<St>>,

    /// A State whose snapshot was handed out, but hasn't been expanded yet.
    pending_expansion: Option<St>,
    finished: bool,

    problem: OP,

    _phantom_space: PhantomData<Sp>,
    _phantom_cost: PhantomData<C>,
}

impl<OP, Sp, St, C> BreadthFirstSearch<OP, Sp, St, C>
where
    OP: ObjectiveProblem<Sp, St, C>,
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    pub fn new(op: OP) -> Result<Self, SearchError<St>> {
        validate_endpoints(&op)?;
        let start = op.start();
        log::debug!("BFS from {:?} to {:?}", start, op.goal());

        let mut parents = FxHashMap::default();
        parents.insert(start, None);

        Ok(Self {
            queue: VecDeque::from([start]),
            visited: FxHashSet::from_iter([start]),
            parents,
            pending_expansion: None,
            finished: false,

            problem: op,

            _phantom_space: PhantomData,
            _phantom_cost: PhantomData,
        })
    }

    /// Number of discovered States waiting to be visited.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    fn expand(&mut self, state: St) {
        for s in self.problem.space().neighbours(&state) {
            if self.visited.insert(s) {
                self.parents.insert(s, Some(state));
                self.queue.push_back(s);
            }
        }
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "BreadthFirstSearch Stats:")?;
        write_collection_stats::<St>(
            &mut out,
            "Queue",
            self.queue.len(),
            self.queue.capacity(),
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
            (self.visited.len() - self.queue.len()).separate_with_commas()
        )?;

        Ok(())
    }
}

impl<OP, Sp, St, C> IncrementalSearch<St> for BreadthFirstSearch<OP, Sp, St, C>
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

        let Some(state) = self.queue.pop_front() else {
            self.finished = true;
            log::debug!(
                "BFS exhausted the queue after visiting {} states",
                self.visited.len()
            );
            return Some(Snapshot::progress(&self.visited));
        };
        log::trace!("BFS dequeued {state:?}");

        if self.problem.is_goal(&state) {
            self.finished = true;
            let path = path_from_parents(&self.parents, state);
            log::debug!(
                "BFS reached {state:?} after visiting {} states. {path}",
                self.visited.len()
            );
            return Some(Snapshot::solution(&self.visited, path));
        }

        self.pending_expansion = Some(state);
        Some(Snapshot::progress(&self.visited))
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn explored(&self) -> &FxHashSet<St> {
        &self.visited
    }

    fn write_memory_stats(&self, out: &mut dyn std::io::Write) -> std::io::Result<()> {
        BreadthFirstSearch::write_memory_stats(self, out)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::algorithms::Maze2DBreadthFirst;
    use crate::problems::maze_2d::Maze2DInstance;
    use crate::problems::maze_2d::Maze2DState;

    #[test]
    fn visited_grows_at_discovery() {
        let instance = Maze2DInstance::try_from(indoc! {"
            +-+-+-+
            |  S  |
            + +-+ +
            |    G|
            +-+-+-+
        "})
        .unwrap();
        let mut search = Maze2DBreadthFirst::new(instance.problem()).unwrap();

        // Start is visited before it's expanded.
        let first = search.step().unwrap();
        assert_eq!(first.explored.len(), 1);
        assert!(first.path.is_none());

        // Expanding the start discovers both sides.
        let second = search.step().unwrap();
        assert_eq!(
            *second.explored,
            FxHashSet::from_iter([
                Maze2DState::new(0, 0),
                Maze2DState::new(0, 1),
                Maze2DState::new(0, 2),
            ])
        );
        assert_eq!(search.queue_len(), 1);

        let outcome = search.run();
        assert_eq!(
            outcome.path.unwrap().states,
            vec![
                Maze2DState::new(0, 1),
                Maze2DState::new(0, 2),
                Maze2DState::new(1, 2),
            ]
        );
    }

    #[test]
    fn dequeues_in_discovery_order() {
        // Open room, the goal is in the far corner.
        let instance = Maze2DInstance::try_from(indoc! {"
            +-+-+
            |S  |
            + + +
            |  G|
            +-+-+
        "})
        .unwrap();
        let mut search = Maze2DBreadthFirst::new(instance.problem()).unwrap();

        let mut steps = 0;
        let mut path = None;
        while let Some(snapshot) = search.step() {
            steps += 1;
            path = snapshot.path;
        }
        // (0,0), then (0,1) and (1,0), then (1,1).
        assert_eq!(steps, 4);
        // Right is expanded before Down.
        assert_eq!(
            path.unwrap().states,
            vec![
                Maze2DState::new(0, 0),
                Maze2DState::new(0, 1),
                Maze2DState::new(1, 1),
            ]
        );
    }

    #[test]
    fn memory_stats() {
        let instance = Maze2DInstance::try_from("+-+-+\n|S G|\n+-+-+\n").unwrap();
        let mut search = Maze2DBreadthFirst::new(instance.problem()).unwrap();
        search.run();

        let mut out = vec![];
        BreadthFirstSearch::write_memory_stats(&search, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("BreadthFirstSearch Stats:\n"));
        assert!(out.contains("|Parents|:  2"));
    }
}
