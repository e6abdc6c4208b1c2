//! Reading position tracking: the pagination engine and chapter progress.

pub mod engine;
pub mod progress;

pub use engine::{MeasureToken, PaginationEngine, Position, View};
pub use progress::{chapter_progress, position_label};
