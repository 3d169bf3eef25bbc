pub mod game;
pub mod types;

pub use game::{GameConfig, GameResult, MoveEvent, run_game};
pub use types::{GameOutcome, side_label};
