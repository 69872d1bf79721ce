//! Character grid geometry and cursor tracking
//!
//! Display memory is a row-major array of 30 columns by up to 16 rows.
//! The linear address of a cell is `row * 30 + col`.

use crate::config::VideoStandard;

/// Columns per row
pub const COLUMNS: u8 = 30;

/// Rows in the largest (PAL) format
pub const MAX_ROWS: u8 = 16;

/// Cells in display memory
pub const GRID_CAPACITY: usize = COLUMNS as usize * MAX_ROWS as usize;

/// A cursor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CursorPosition {
    /// Column
    pub x: u8,
    /// Row
    pub y: u8,
}

impl CursorPosition {
    /// Create a position (unchecked)
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Display memory address of this cell
    pub fn linear(&self) -> u16 {
        u16::from(self.y) * u16::from(COLUMNS) + u16::from(self.x)
    }
}

/// Usable cursor bounds (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Grid {
    x_min: u8,
    x_max: u8,
    y_min: u8,
    y_max: u8,
}

impl Grid {
    /// Full-width grid with `rows` rows
    ///
    /// `rows` is clamped to `1..=MAX_ROWS`.
    pub fn new(rows: u8) -> Self {
        Self::with_margins(rows, 0, 0)
    }

    /// Grid for a video standard
    pub fn for_standard(standard: VideoStandard) -> Self {
        Self::new(standard.rows())
    }

    /// Grid whose first usable column and row are `x_min` and `y_min`
    ///
    /// Margins are clamped so at least one cell stays usable.
    pub fn with_margins(rows: u8, x_min: u8, y_min: u8) -> Self {
        let rows = rows.clamp(1, MAX_ROWS);
        Self {
            x_min: x_min.min(COLUMNS - 1),
            x_max: COLUMNS - 1,
            y_min: y_min.min(rows - 1),
            y_max: rows - 1,
        }
    }

    /// First usable column
    pub fn x_min(&self) -> u8 {
        self.x_min
    }

    /// Last usable column
    pub fn x_max(&self) -> u8 {
        self.x_max
    }

    /// First usable row
    pub fn y_min(&self) -> u8 {
        self.y_min
    }

    /// Last usable row
    pub fn y_max(&self) -> u8 {
        self.y_max
    }

    /// Rows in the video format
    pub fn rows(&self) -> u8 {
        self.y_max + 1
    }

    /// Number of cells the cursor visits before wrapping
    pub fn usable_cells(&self) -> usize {
        usize::from(self.x_max - self.x_min + 1) * usize::from(self.y_max - self.y_min + 1)
    }

    /// Check that `(x, y)` lies inside the usable bounds
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (i32::from(self.x_min)..=i32::from(self.x_max)).contains(&x)
            && (i32::from(self.y_min)..=i32::from(self.y_max)).contains(&y)
    }

    /// Saturate `(x, y)` into the usable bounds
    pub fn clamp(&self, x: i32, y: i32) -> CursorPosition {
        CursorPosition {
            x: x.clamp(i32::from(self.x_min), i32::from(self.x_max)) as u8,
            y: y.clamp(i32::from(self.y_min), i32::from(self.y_max)) as u8,
        }
    }

    /// Top-left usable cell
    pub fn home(&self) -> CursorPosition {
        CursorPosition::new(self.x_min, self.y_min)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(MAX_ROWS)
    }
}

/// Logical write cursor
///
/// Every mutation keeps the position inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    grid: Grid,
    pos: CursorPosition,
}

impl Cursor {
    /// Cursor at the home cell of `grid`
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            pos: grid.home(),
        }
    }

    /// Grid bounds
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Current cell
    pub fn position(&self) -> CursorPosition {
        self.pos
    }

    /// Display memory address of the current cell
    pub fn linear(&self) -> u16 {
        self.pos.linear()
    }

    /// Move to `(x, y)`, saturating out-of-range coordinates
    pub fn set(&mut self, x: i32, y: i32) {
        self.pos = self.grid.clamp(x, y);
    }

    /// Move to the home cell
    pub fn home(&mut self) {
        self.pos = self.grid.home();
    }

    /// Step one cell right, wrapping to the next row and then to the top
    pub fn advance(&mut self) {
        if self.pos.x >= self.grid.x_max {
            self.pos.x = self.grid.x_min;
            if self.pos.y >= self.grid.y_max {
                self.pos.y = self.grid.y_min;
            } else {
                self.pos.y += 1;
            }
        } else {
            self.pos.x += 1;
        }
    }
}
