//! どうぶつしょうぎ
//!
//! 3 筋 × 4 段の盤で、らいおん・きりん・ぞう・ひよこ（成ると にわとり）を使う。
//! SCNS 探索コアの `Position` / `Evaluator` を実装し、探索を盤面上で動かすための最小限の実装。
//!
//! - `types`: 升・駒種・駒
//! - `moves`: 指し手と USI 風の文字列表現
//! - `position`: 局面本体（SFEN 入出力・手の実行と巻き戻し・合法性判定）
//! - `movegen`: 指し手生成
//! - `eval`: 駒得による静的評価

mod eval;
mod movegen;
mod moves;
mod position;
mod types;

pub use eval::{MaterialEvaluator, WIN_SCORE};
pub use moves::{Move, MoveParseError};
pub use position::{Position, SFEN_STARTPOS, SfenError, StateInfo};
pub use types::{Piece, PieceType, Square};

pub use scns_core::Color;
