//! Character grid, cursor and attribute model
//!
//! Pure state, no bus access. The driver owns one [`Cursor`] and one
//! [`CharAttributes`] and turns them into register writes.

pub mod attributes;
pub mod cursor;

pub use attributes::CharAttributes;
pub use cursor::{Cursor, CursorPosition, Grid, COLUMNS, GRID_CAPACITY, MAX_ROWS};
