use crate::consts;
use rand::Rng;
use ratatui::layout::{Position, Size};

/// A grid-aligned location, in playfield units.  The y coordinate counts from
/// the top of the screen, so the scoreboard strip occupies the smallest y
/// values.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(super) struct Cell {
    pub(super) x: i32,
    pub(super) y: i32,
}

impl Cell {
    pub(super) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Return the cell displaced by `(dx, dy)`
    pub(super) fn offset(self, (dx, dy): (i32, i32)) -> Cell {
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Cell {
        Cell { x, y }
    }
}

/// Geometry of the screen: a scoreboard strip across the top and the
/// playfield beneath it, all measured in the same units as [`Cell`]
/// coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Playfield {
    pub(super) width: i32,
    pub(super) height: i32,
    pub(super) cell_size: i32,
    pub(super) scoreboard_height: i32,
}

impl Playfield {
    pub(super) const STANDARD: Playfield = Playfield {
        width: consts::PLAYFIELD_WIDTH,
        height: consts::PLAYFIELD_HEIGHT,
        cell_size: consts::CELL_SIZE,
        scoreboard_height: consts::SCOREBOARD_HEIGHT,
    };

    /// The smallest legal y coordinate
    pub(super) fn top(self) -> i32 {
        self.scoreboard_height
    }

    /// One past the largest legal y coordinate
    pub(super) fn bottom(self) -> i32 {
        self.scoreboard_height + self.height
    }

    /// Number of cells across the playfield
    pub(super) fn columns(self) -> i32 {
        self.width / self.cell_size
    }

    /// Number of cells down the playfield
    pub(super) fn rows(self) -> i32 {
        self.height / self.cell_size
    }

    /// Is `cell` a legal location for the snake or the food?
    pub(super) fn contains(self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (self.top()..self.bottom()).contains(&cell.y)
    }

    /// Return the cell in the given zero-based column & row of the playfield
    pub(super) fn cell_at(self, column: i32, row: i32) -> Cell {
        Cell::new(column * self.cell_size, self.top() + row * self.cell_size)
    }

    /// Iterate over every cell of the playfield, row by row
    pub(super) fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.rows())
            .flat_map(move |row| (0..self.columns()).map(move |col| self.cell_at(col, row)))
    }

    /// Draw a uniformly random cell of the playfield
    pub(super) fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Cell {
        let column = rng.random_range(0..self.columns());
        let row = rng.random_range(0..self.rows());
        self.cell_at(column, row)
    }

    /// Return the column & row of `cell` in the playfield's grid, or `None`
    /// if it lies outside the playfield
    pub(super) fn grid_position(self, cell: Cell) -> Option<Position> {
        if !self.contains(cell) {
            return None;
        }
        let x = u16::try_from(cell.x / self.cell_size).ok()?;
        let y = u16::try_from((cell.y - self.top()) / self.cell_size).ok()?;
        Some(Position { x, y })
    }

    /// The playfield's size in grid cells
    pub(super) fn grid_size(self) -> Size {
        Size {
            width: u16::try_from(self.columns()).unwrap_or(u16::MAX),
            height: u16::try_from(self.rows()).unwrap_or(u16::MAX),
        }
    }

    /// Number of text rows taken up by the scoreboard strip
    pub(super) fn scoreboard_rows(self) -> u16 {
        u16::try_from(self.scoreboard_height / self.cell_size).unwrap_or(u16::MAX)
    }
}
