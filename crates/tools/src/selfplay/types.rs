use scns_core::Color;
use serde::Serialize;

/// 対局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    InProgress,
    BlackWin,
    WhiteWin,
    Draw,
}

impl GameOutcome {
    pub fn label(self) -> &'static str {
        match self {
            GameOutcome::InProgress => "in_progress",
            GameOutcome::BlackWin => "black_win",
            GameOutcome::WhiteWin => "white_win",
            GameOutcome::Draw => "draw",
        }
    }

    /// `color` の勝ち
    pub fn win_for(color: Color) -> GameOutcome {
        match color {
            Color::Black => GameOutcome::BlackWin,
            Color::White => GameOutcome::WhiteWin,
        }
    }
}

pub fn side_label(color: Color) -> char {
    color.to_sfen_char()
}
