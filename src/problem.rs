use crate::cost::Cost;
use crate::space::Space;
use crate::space::State;

/// A search problem with a single start and a single goal.
pub trait ObjectiveProblem<Sp, St, C>: std::fmt::Debug
where
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    fn space(&self) -> &Sp;
    fn start(&self) -> St;
    fn goal(&self) -> St;

    #[inline(always)]
    fn is_goal(&self, s: &St) -> bool {
        *s == self.goal()
    }
}
