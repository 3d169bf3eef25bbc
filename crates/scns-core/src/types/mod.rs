//! 基本型

mod color;
mod stair;

pub use color::Color;
pub use stair::{
    N_VALUE_STAIRS, NUM_STAIRS, STAIR_WIDTH, Stair, VALUE_INF, clip, stairs, value_to_stair,
};
