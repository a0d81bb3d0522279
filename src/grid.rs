use serde::Serialize;

use crate::input::Direction;

/// Grid position in board units; always a multiple of the cell size on a live board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position one `step` away in `direction`.
    #[must_use]
    pub fn shifted(self, direction: Direction, step: i32) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y - step),
            Direction::Down => Self::new(self.x, self.y + step),
            Direction::Left => Self::new(self.x - step, self.y),
            Direction::Right => Self::new(self.x + step, self.y),
        }
    }

    /// Returns true when the position lies inside the board.
    #[must_use]
    pub fn is_within(self, board: Board) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < board.width && self.y < board.height
    }

    /// Returns this position wrapped onto the board on both axes.
    #[must_use]
    pub fn wrapped(self, board: Board) -> Self {
        Self {
            x: self.x.rem_euclid(board.width),
            y: self.y.rem_euclid(board.height),
        }
    }
}

/// Playfield dimensions in board units.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Board {
    /// Number of cell columns.
    #[must_use]
    pub fn columns(self) -> i32 {
        self.width / self.cell_size
    }

    /// Number of cell rows.
    #[must_use]
    pub fn rows(self) -> i32 {
        self.height / self.cell_size
    }

    /// Returns the cell nearest the board center, snapped to the grid.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: (self.columns() / 2) * self.cell_size,
            y: (self.rows() / 2) * self.cell_size,
        }
    }

    /// Iterates over every grid-aligned position for a lattice of `step` units,
    /// row by row.
    pub fn lattice(self, step: i32) -> impl Iterator<Item = Position> {
        let columns = self.width / step;
        let rows = self.height / step;
        (0..rows)
            .flat_map(move |row| (0..columns).map(move |col| Position::new(col * step, row * step)))
    }
}

/// Axis-aligned rectangle in board units. Used for obstacles.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a square whose top-left corner is `origin`.
    #[must_use]
    pub fn square(origin: Position, side: i32) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: side,
            height: side,
        }
    }

    /// Returns true when the two rectangles share any area.
    #[must_use]
    pub fn intersects(self, other: Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Returns true when the cell at `position` overlaps this rectangle.
    #[must_use]
    pub fn overlaps_cell(self, position: Position, cell_size: i32) -> bool {
        self.intersects(Rect::square(position, cell_size))
    }

    /// Iterates over the top-left corners of every cell this rectangle covers.
    pub fn cells(self, cell_size: i32) -> impl Iterator<Item = Position> {
        let columns = self.width / cell_size;
        let rows = self.height / cell_size;
        (0..rows).flat_map(move |row| {
            (0..columns).map(move |col| {
                Position::new(self.x + col * cell_size, self.y + row * cell_size)
            })
        })
    }
}
