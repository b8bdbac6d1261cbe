use derive_more::Display;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::problem::ObjectiveProblem;
use crate::space::Neighbours;
use crate::space::ObjectiveHeuristic;
use crate::space::Path;
use crate::space::Space;
use crate::space::State;

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 20;

// Layout characters
const CORNER: char = '+';
const HORIZONTAL_WALL: char = '-';
const VERTICAL_WALL: char = '|';
const OPEN: char = ' ';
const START: char = 'S';
const GOAL: char = 'G';
const ON_PATH: char = '*';
const EXPLORED: char = '.';

pub type Coord = u32;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("({row},{col})")]
pub struct Maze2DState {
    pub(crate) row: Coord,
    pub(crate) col: Coord,
}

impl Maze2DState {
    pub const fn new(row: Coord, col: Coord) -> Maze2DState {
        Maze2DState { row, col }
    }
    pub fn row(&self) -> Coord {
        self.row
    }
    pub fn col(&self) -> Coord {
        self.col
    }
    /// Whether both coordinates fit in a `Coord`.
    pub(crate) fn safe_dimensions(rows: usize, cols: usize) -> bool {
        (rows < Coord::MAX as usize) && (cols < Coord::MAX as usize)
    }
}
impl State for Maze2DState {}

impl From<(Coord, Coord)> for Maze2DState {
    fn from((row, col): (Coord, Coord)) -> Self {
        Maze2DState::new(row, col)
    }
}

/// The four sides of a cell.
///
/// The declaration order is the canonical expansion order.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Maze2DDirection {
    #[display("↑")]
    Up = 0, // row--
    #[display("→")]
    Right = 1, // col++
    #[display("↓")]
    Down = 2, // row++
    #[display("←")]
    Left = 3, // col--
}

impl Maze2DDirection {
    pub const ALL: [Maze2DDirection; 4] = [
        Maze2DDirection::Up,
        Maze2DDirection::Right,
        Maze2DDirection::Down,
        Maze2DDirection::Left,
    ];

    pub fn opposite(&self) -> Maze2DDirection {
        match self {
            Maze2DDirection::Up => Maze2DDirection::Down,
            Maze2DDirection::Right => Maze2DDirection::Left,
            Maze2DDirection::Down => Maze2DDirection::Up,
            Maze2DDirection::Left => Maze2DDirection::Right,
        }
    }

    /// Moves one cell, without checking the upper bounds of any maze.
    #[inline(always)]
    pub fn apply(&self, s: &Maze2DState) -> Option<Maze2DState> {
        let Maze2DState { row, col } = *s;

        #[rustfmt::skip]
        let (row, col) = match self {
            Maze2DDirection::Up    => (row.checked_sub(1)?, col                ),
            Maze2DDirection::Right => (row,                 col.checked_add(1)?),
            Maze2DDirection::Down  => (row.checked_add(1)?, col                ),
            Maze2DDirection::Left  => (row,                 col.checked_sub(1)?),
        };

        Some(Maze2DState { row, col })
    }
}

/// The wall flags of a single cell, `true` meaning there's a wall.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Maze2DCell {
    walls: [bool; 4],
}

impl Maze2DCell {
    pub const CLOSED: Maze2DCell = Maze2DCell { walls: [true; 4] };

    #[inline(always)]
    pub fn has_wall(&self, d: Maze2DDirection) -> bool {
        self.walls[d as usize]
    }
    #[inline(always)]
    pub(crate) fn open(&mut self, d: Maze2DDirection) {
        self.walls[d as usize] = false;
    }
}

impl Default for Maze2DCell {
    fn default() -> Self {
        Maze2DCell::CLOSED
    }
}

pub type Maze2DCost = u32;

/// A rectangular maze where every cell tracks a wall on each side.
///
/// Walls are kept symmetric: the only way of opening a wall also opens the
/// matching wall of the neighbouring cell.
#[derive(Clone, PartialEq, Eq)]
pub struct Maze2DSpace {
    rows: usize,
    cols: usize,
    cells: Vec<Maze2DCell>,
}

impl Maze2DSpace {
    /// A maze where every wall is up.
    pub fn new_closed(rows: usize, cols: usize) -> Self {
        debug_assert!(Maze2DState::safe_dimensions(rows, cols));
        Self {
            rows,
            cols,
            cells: vec![Maze2DCell::CLOSED; rows * cols],
        }
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline(always)]
    fn index(&self, s: &Maze2DState) -> usize {
        debug_assert!(self.valid(s));
        s.row as usize * self.cols + s.col as usize
    }

    #[inline(always)]
    pub fn cell(&self, s: &Maze2DState) -> Option<&Maze2DCell> {
        if self.valid(s) {
            Some(&self.cells[self.index(s)])
        } else {
            None
        }
    }

    /// Out of bounds cells are all walls.
    #[inline(always)]
    pub fn has_wall(&self, s: &Maze2DState, d: Maze2DDirection) -> bool {
        self.cell(s).is_none_or(|c| c.has_wall(d))
    }

    /// The adjacent cell in direction `d`, walls notwithstanding.
    #[inline(always)]
    pub fn neighbour(&self, s: &Maze2DState, d: Maze2DDirection) -> Option<Maze2DState> {
        d.apply(s).filter(|n| self.valid(n))
    }

    /// Cells reachable in one step, in `Up`, `Right`, `Down`, `Left` order.
    pub fn neighbours_open(&self, s: &Maze2DState) -> Neighbours<Maze2DState> {
        let mut v = Neighbours::<Maze2DState>::new();
        let Some(cell) = self.cell(s) else {
            return v;
        };
        for d in Maze2DDirection::ALL {
            if cell.has_wall(d) {
                continue;
            }
            if let Some(n) = self.neighbour(s, d) {
                v.push(n);
            }
        }
        v
    }

    /// Opens the wall between `s` and its neighbour in direction `d`.
    ///
    /// Returns whether there was a neighbour to connect to.
    pub(crate) fn open_wall(&mut self, s: &Maze2DState, d: Maze2DDirection) -> bool {
        let Some(n) = self.neighbour(s, d) else {
            return false;
        };
        let i = self.index(s);
        let j = self.index(&n);
        self.cells[i].open(d);
        self.cells[j].open(d.opposite());
        true
    }

    /// All the cells, row by row.
    pub fn states(&self) -> impl Iterator<Item = Maze2DState> + '_ {
        let cols = self.cols as Coord;
        (0..self.rows as Coord)
            .flat_map(move |row| (0..cols).map(move |col| Maze2DState { row, col }))
    }

    /// Number of open walls between pairs of cells.
    pub fn passages(&self) -> usize {
        self.states()
            .map(|s| {
                [Maze2DDirection::Right, Maze2DDirection::Down]
                    .into_iter()
                    .filter(|d| !self.has_wall(&s, *d) && self.neighbour(&s, *d).is_some())
                    .count()
            })
            .sum()
    }

    /// Checks that every wall agrees with the matching wall on the other side.
    pub fn walls_are_symmetric(&self) -> bool {
        self.states().all(|s| {
            Maze2DDirection::ALL.into_iter().all(|d| match self.neighbour(&s, d) {
                Some(n) => self.has_wall(&s, d) == self.has_wall(&n, d.opposite()),
                None => true,
            })
        })
    }
}

impl Space<Maze2DState, Maze2DCost> for Maze2DSpace {
    #[inline(always)]
    fn neighbours(&self, s: &Maze2DState) -> Neighbours<Maze2DState> {
        self.neighbours_open(s)
    }

    #[inline(always)]
    fn valid(&self, s: &Maze2DState) -> bool {
        (s.row as usize) < self.rows && (s.col as usize) < self.cols
    }

    fn size(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl std::fmt::Display for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", Maze2DFrame::new(self))
    }
}

impl std::fmt::Debug for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Maze2D{:?}", self.dimensions())
    }
}

/// A textual view of a maze, optionally overlaying search progress.
///
/// The layout uses `+` for corners, `-` and `|` for walls, and one character
/// per cell: `S` start, `G` goal, `*` path, `.` explored.
pub struct Maze2DFrame<'a> {
    space: &'a Maze2DSpace,
    start: Option<Maze2DState>,
    goal: Option<Maze2DState>,
    explored: Option<&'a FxHashSet<Maze2DState>>,
    path: Option<&'a Path<Maze2DState>>,
}

impl<'a> Maze2DFrame<'a> {
    pub fn new(space: &'a Maze2DSpace) -> Self {
        Self {
            space,
            start: None,
            goal: None,
            explored: None,
            path: None,
        }
    }
    pub fn with_endpoints(mut self, start: Maze2DState, goal: Maze2DState) -> Self {
        self.start = Some(start);
        self.goal = Some(goal);
        self
    }
    pub fn with_explored(mut self, explored: &'a FxHashSet<Maze2DState>) -> Self {
        self.explored = Some(explored);
        self
    }
    pub fn with_path(mut self, path: Option<&'a Path<Maze2DState>>) -> Self {
        self.path = path;
        self
    }

    fn content(&self, s: &Maze2DState) -> char {
        if self.start == Some(*s) {
            START
        } else if self.goal == Some(*s) {
            GOAL
        } else if self.path.is_some_and(|p| p.states.contains(s)) {
            ON_PATH
        } else if self.explored.is_some_and(|e| e.contains(s)) {
            EXPLORED
        } else {
            OPEN
        }
    }
}

impl std::fmt::Display for Maze2DFrame<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let space = self.space;
        let (rows, cols) = space.dimensions();
        let (rows, cols) = (rows as Coord, cols as Coord);

        for row in 0..=rows {
            // Horizontal walls above `row`
            for col in 0..cols {
                let wall = if row < rows {
                    space.has_wall(&Maze2DState { row, col }, Maze2DDirection::Up)
                } else {
                    space.has_wall(&Maze2DState { row: row - 1, col }, Maze2DDirection::Down)
                };
                let w = if wall { HORIZONTAL_WALL } else { OPEN };
                write!(f, "{CORNER}{w}")?;
            }
            writeln!(f, "{CORNER}")?;
            if row == rows {
                break;
            }

            // Cells and the vertical walls between them
            for col in 0..cols {
                let s = Maze2DState { row, col };
                let w = if space.has_wall(&s, Maze2DDirection::Left) {
                    VERTICAL_WALL
                } else {
                    OPEN
                };
                write!(f, "{w}{}", self.content(&s))?;
            }
            let last = Maze2DState {
                row,
                col: cols.saturating_sub(1),
            };
            let w = if cols == 0 || space.has_wall(&last, Maze2DDirection::Right) {
                VERTICAL_WALL
            } else {
                OPEN
            };
            writeln!(f, "{w}")?;
        }

        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Maze2DParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("A layout needs an odd number of lines and columns, got {lines}x{width}")]
    InvalidShape { lines: usize, width: usize },
    #[error("Line {line} has {found} characters, expected {expected}")]
    RaggedLine {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid character '{ch}' found at ({line},{column})")]
    InvalidCharacter { ch: char, line: usize, column: usize },
    #[error("The outer wall is open at ({line},{column})")]
    OpenBorder { line: usize, column: usize },
    #[error("More than one '{marker}' found, the second at ({line},{column})")]
    DuplicateMarker {
        marker: char,
        line: usize,
        column: usize,
    },
    #[error("No start ('S') found")]
    MissingStart,
    #[error("No goal ('G') found")]
    MissingGoal,
}

/// Parses the layout written by `Maze2DFrame`.
fn parse_layout(
    s: &str,
) -> Result<(Maze2DSpace, Option<Maze2DState>, Option<Maze2DState>), Maze2DParseError> {
    let lines: Vec<Vec<char>> = s.lines().map(|l| l.chars().collect()).collect();

    if lines.is_empty() || lines[0].is_empty() {
        return Err(Maze2DParseError::EmptyInput);
    }
    let width = lines[0].len();
    for (line, chars) in lines.iter().enumerate() {
        if chars.len() != width {
            return Err(Maze2DParseError::RaggedLine {
                line,
                expected: width,
                found: chars.len(),
            });
        }
    }
    if lines.len() < 3 || lines.len() % 2 == 0 || width < 3 || width % 2 == 0 {
        return Err(Maze2DParseError::InvalidShape {
            lines: lines.len(),
            width,
        });
    }

    let rows = (lines.len() - 1) / 2;
    let cols = (width - 1) / 2;
    let mut space = Maze2DSpace::new_closed(rows, cols);
    let mut start = None;
    let mut goal = None;

    for (line, chars) in lines.iter().enumerate() {
        for (column, &ch) in chars.iter().enumerate() {
            let invalid = Maze2DParseError::InvalidCharacter { ch, line, column };
            let on_border =
                line == 0 || line == lines.len() - 1 || column == 0 || column == width - 1;
            let row = (line / 2) as Coord;
            let col = (column / 2) as Coord;

            match (line % 2, column % 2) {
                // Corner
                (0, 0) => {
                    if ch != CORNER {
                        return Err(invalid);
                    }
                }
                // Wall between (row - 1, col) and (row, col)
                (0, 1) => match ch {
                    HORIZONTAL_WALL => {}
                    OPEN if on_border => {
                        return Err(Maze2DParseError::OpenBorder { line, column });
                    }
                    OPEN => {
                        space.open_wall(&Maze2DState { row: row - 1, col }, Maze2DDirection::Down);
                    }
                    _ => return Err(invalid),
                },
                // Wall between (row, col - 1) and (row, col)
                (1, 0) => match ch {
                    VERTICAL_WALL => {}
                    OPEN if on_border => {
                        return Err(Maze2DParseError::OpenBorder { line, column });
                    }
                    OPEN => {
                        space.open_wall(&Maze2DState { row, col: col - 1 }, Maze2DDirection::Right);
                    }
                    _ => return Err(invalid),
                },
                // Cell
                _ => {
                    let s = Maze2DState { row, col };
                    let marker = match ch {
                        START => &mut start,
                        GOAL => &mut goal,
                        OPEN | EXPLORED | ON_PATH => continue,
                        _ => return Err(invalid),
                    };
                    if marker.is_some() {
                        return Err(Maze2DParseError::DuplicateMarker {
                            marker: ch,
                            line,
                            column,
                        });
                    }
                    *marker = Some(s);
                }
            }
        }
    }

    Ok((space, start, goal))
}

impl std::convert::TryFrom<&str> for Maze2DSpace {
    type Error = Maze2DParseError;

    /// Parses a layout, ignoring any markers.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let (space, _start, _goal) = parse_layout(s)?;
        Ok(space)
    }
}

/// A maze together with the endpoints to connect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze2DInstance {
    pub space: Maze2DSpace,
    pub start: Maze2DState,
    pub goal: Maze2DState,
}

impl Maze2DInstance {
    pub fn problem(&self) -> Maze2DProblem<'_> {
        Maze2DProblem::new(&self.space, self.start, self.goal)
    }

    pub fn into_parts(self) -> (Maze2DSpace, Maze2DState, Maze2DState) {
        (self.space, self.start, self.goal)
    }
}

impl std::convert::TryFrom<&str> for Maze2DInstance {
    type Error = Maze2DParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let (space, start, goal) = parse_layout(s)?;
        Ok(Maze2DInstance {
            space,
            start: start.ok_or(Maze2DParseError::MissingStart)?,
            goal: goal.ok_or(Maze2DParseError::MissingGoal)?,
        })
    }
}

impl std::fmt::Display for Maze2DInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (rows, cols) = self.space.dimensions();
        writeln!(
            f,
            "Maze2DInstance({rows}x{cols}) (s:{}, g:{}):",
            self.start, self.goal
        )?;
        write!(
            f,
            "{}",
            Maze2DFrame::new(&self.space).with_endpoints(self.start, self.goal)
        )
    }
}

/// A search problem over a borrowed maze.
///
/// Many problems can share one maze, as searching never changes it.
#[derive(Copy, Clone, Debug)]
pub struct Maze2DProblem<'s> {
    space: &'s Maze2DSpace,
    start: Maze2DState,
    goal: Maze2DState,
}

impl<'s> Maze2DProblem<'s> {
    pub fn new(space: &'s Maze2DSpace, start: Maze2DState, goal: Maze2DState) -> Self {
        Self { space, start, goal }
    }
}

impl ObjectiveProblem<Maze2DSpace, Maze2DState, Maze2DCost> for Maze2DProblem<'_> {
    fn space(&self) -> &Maze2DSpace {
        self.space
    }
    fn start(&self) -> Maze2DState {
        self.start
    }
    fn goal(&self) -> Maze2DState {
        self.goal
    }
}

#[derive(Debug)]
pub struct Maze2DHeuristicManhattanDistance;

impl ObjectiveHeuristic<Maze2DSpace, Maze2DState, Maze2DCost>
    for Maze2DHeuristicManhattanDistance
{
    /// The distance of following straight lines
    #[inline(always)]
    fn h(a: &Maze2DState, b: &Maze2DState) -> Maze2DCost {
        a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    const CORRIDOR: &str = indoc! {"
        +-+-+-+
        |S    |
        +-+-+ +
        |G    |
        +-+-+-+
    "};

    #[test]
    fn neighbours_follow_canonical_order() {
        let mut space = Maze2DSpace::new_closed(3, 3);
        let center = Maze2DState::new(1, 1);
        for d in [
            Maze2DDirection::Left,
            Maze2DDirection::Down,
            Maze2DDirection::Right,
            Maze2DDirection::Up,
        ] {
            assert!(space.open_wall(&center, d));
        }

        assert_eq!(
            space.neighbours_open(&center).to_vec(),
            vec![
                Maze2DState::new(0, 1),
                Maze2DState::new(1, 2),
                Maze2DState::new(2, 1),
                Maze2DState::new(1, 0),
            ]
        );
        assert_eq!(
            space.neighbours_open(&Maze2DState::new(0, 1)).to_vec(),
            vec![center]
        );
    }

    #[test]
    fn closed_maze_has_no_neighbours() {
        let space = Maze2DSpace::new_closed(4, 5);
        assert_eq!(space.dimensions(), (4, 5));
        assert_eq!(space.len(), 20);
        assert_eq!(space.passages(), 0);
        for s in space.states() {
            assert!(space.neighbours_open(&s).is_empty());
        }
    }

    #[test]
    fn border_walls_cannot_be_opened() {
        let mut space = Maze2DSpace::new_closed(2, 2);
        assert!(!space.open_wall(&Maze2DState::new(0, 0), Maze2DDirection::Up));
        assert!(!space.open_wall(&Maze2DState::new(0, 0), Maze2DDirection::Left));
        assert!(!space.open_wall(&Maze2DState::new(1, 1), Maze2DDirection::Down));
        assert!(!space.open_wall(&Maze2DState::new(1, 1), Maze2DDirection::Right));
        assert_eq!(space.passages(), 0);
    }

    #[test]
    fn opening_walls_is_symmetric() {
        let mut space = Maze2DSpace::new_closed(2, 2);
        let a = Maze2DState::new(0, 0);
        let b = Maze2DState::new(0, 1);
        assert!(space.walls_are_symmetric());

        space.open_wall(&a, Maze2DDirection::Right);
        assert!(!space.has_wall(&a, Maze2DDirection::Right));
        assert!(!space.has_wall(&b, Maze2DDirection::Left));
        assert!(space.walls_are_symmetric());
        assert_eq!(space.passages(), 1);

        space.open_wall(&Maze2DState::new(1, 1), Maze2DDirection::Up);
        assert!(!space.has_wall(&b, Maze2DDirection::Down));
        assert!(space.walls_are_symmetric());
        assert_eq!(space.passages(), 2);
    }

    #[test]
    fn out_of_bounds_cells() {
        let space = Maze2DSpace::new_closed(2, 3);
        let outside = Maze2DState::new(2, 0);
        assert!(!space.valid(&outside));
        assert!(space.cell(&outside).is_none());
        assert!(space.has_wall(&outside, Maze2DDirection::Up));
        assert!(space.neighbours_open(&outside).is_empty());
        assert!(space.valid(&Maze2DState::new(1, 2)));
    }

    #[test]
    fn direction_apply() {
        let s = Maze2DState::new(0, 0);
        assert_eq!(Maze2DDirection::Up.apply(&s), None);
        assert_eq!(Maze2DDirection::Left.apply(&s), None);
        assert_eq!(Maze2DDirection::Down.apply(&s), Some(Maze2DState::new(1, 0)));
        assert_eq!(Maze2DDirection::Right.apply(&s), Some(Maze2DState::new(0, 1)));
        for d in Maze2DDirection::ALL {
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn parse_instance() {
        let instance = Maze2DInstance::try_from(CORRIDOR).unwrap();
        assert_eq!(instance.space.dimensions(), (2, 3));
        assert_eq!(instance.start, Maze2DState::new(0, 0));
        assert_eq!(instance.goal, Maze2DState::new(1, 0));
        assert_eq!(instance.space.passages(), 5);
        assert!(instance.space.walls_are_symmetric());
        assert!(instance
            .space
            .has_wall(&Maze2DState::new(0, 0), Maze2DDirection::Down));
        assert!(!instance
            .space
            .has_wall(&Maze2DState::new(0, 2), Maze2DDirection::Down));
    }

    #[test]
    fn display_matches_layout() {
        let instance = Maze2DInstance::try_from(CORRIDOR).unwrap();
        let frame = Maze2DFrame::new(&instance.space).with_endpoints(instance.start, instance.goal);
        assert_eq!(frame.to_string(), CORRIDOR);

        let plain = CORRIDOR.replace(['S', 'G'], " ");
        assert_eq!(instance.space.to_string(), plain);
    }

    #[test]
    fn frame_overlays_progress() {
        let instance = Maze2DInstance::try_from(CORRIDOR).unwrap();
        let explored = FxHashSet::from_iter([Maze2DState::new(0, 1), Maze2DState::new(1, 2)]);
        let path = Path {
            states: vec![Maze2DState::new(0, 0), Maze2DState::new(0, 1)],
        };
        let frame = Maze2DFrame::new(&instance.space)
            .with_endpoints(instance.start, instance.goal)
            .with_explored(&explored)
            .with_path(Some(&path));

        assert_eq!(
            frame.to_string(),
            indoc! {"
                +-+-+-+
                |S*   |
                +-+-+ +
                |G   .|
                +-+-+-+
            "}
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Maze2DSpace::try_from(""),
            Err(Maze2DParseError::EmptyInput)
        );
        assert_eq!(
            Maze2DSpace::try_from("+-+\n| |\n+-+-+\n"),
            Err(Maze2DParseError::RaggedLine {
                line: 2,
                expected: 3,
                found: 5
            })
        );
        assert_eq!(
            Maze2DSpace::try_from("+-+\n| |\n"),
            Err(Maze2DParseError::InvalidShape { lines: 2, width: 3 })
        );
        assert_eq!(
            Maze2DSpace::try_from("+-+\n|x|\n+-+\n"),
            Err(Maze2DParseError::InvalidCharacter {
                ch: 'x',
                line: 1,
                column: 1
            })
        );
        assert_eq!(
            Maze2DSpace::try_from("+ +\n| |\n+-+\n"),
            Err(Maze2DParseError::OpenBorder { line: 0, column: 1 })
        );
        assert_eq!(
            Maze2DInstance::try_from("+-+-+\n|S S|\n+-+-+\n"),
            Err(Maze2DParseError::DuplicateMarker {
                marker: 'S',
                line: 1,
                column: 3
            })
        );
        assert_eq!(
            Maze2DInstance::try_from("+-+-+\n|  G|\n+-+-+\n"),
            Err(Maze2DParseError::MissingStart)
        );
        assert_eq!(
            Maze2DInstance::try_from("+-+-+\n|S  |\n+-+-+\n"),
            Err(Maze2DParseError::MissingGoal)
        );
    }

    #[test]
    fn manhattan_distance() {
        let a = Maze2DState::new(1, 7);
        let b = Maze2DState::new(4, 2);
        assert_eq!(Maze2DHeuristicManhattanDistance::h(&a, &b), 8);
        assert_eq!(Maze2DHeuristicManhattanDistance::h(&b, &a), 8);
        assert_eq!(Maze2DHeuristicManhattanDistance::h(&a, &a), 0);
    }

    #[test]
    fn valid_paths_do_not_cross_walls() {
        let instance = Maze2DInstance::try_from(CORRIDOR).unwrap();
        let space = &instance.space;
        let through = Path {
            states: vec![
                Maze2DState::new(0, 0),
                Maze2DState::new(0, 1),
                Maze2DState::new(0, 2),
                Maze2DState::new(1, 2),
            ],
        };
        let across = Path {
            states: vec![Maze2DState::new(0, 0), Maze2DState::new(1, 0)],
        };
        assert!(space.valid_path(&through));
        assert!(!space.valid_path(&across));
        assert!(space.valid_path(&Path::empty()));
    }
}
