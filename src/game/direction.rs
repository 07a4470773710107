#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the displacement of one step in this direction on a grid with
    /// cells of side `cell_size`
    pub(super) fn offset(self, cell_size: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -cell_size),
            Direction::Down => (0, cell_size),
            Direction::Left => (-cell_size, 0),
            Direction::Right => (cell_size, 0),
        }
    }

    pub(super) fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// A snake travelling in `self` may only turn to face `other` if the two
    /// are at right angles
    pub(super) fn is_orthogonal_to(self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }
}
