//! 指し手

use std::fmt;

use thiserror::Error;

use crate::types::{PieceType, Square};

/// 指し手
///
/// 文字列表現は USI に倣う。移動は `2c2b`（成るときは `2b2a+`）、打ちは `C*2b`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Normal { from: Square, to: Square, promote: bool },
    Drop { kind: PieceType, to: Square },
}

impl Move {
    /// 移動先
    #[inline]
    pub const fn to(self) -> Square {
        match self {
            Move::Normal { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    #[inline]
    pub const fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    /// USI 風の文字列を構文だけ解析する（合法性は見ない）
    pub fn from_usi(s: &str) -> Result<Move, MoveParseError> {
        let syntax = || MoveParseError::Syntax(s.to_string());
        if let Some((piece, to)) = s.split_once('*') {
            let mut chars = piece.chars();
            let kind = chars
                .next()
                .filter(|c| c.is_ascii_uppercase())
                .and_then(PieceType::from_sfen_char)
                .filter(|k| k.hand_index().is_some())
                .ok_or_else(syntax)?;
            if chars.next().is_some() {
                return Err(syntax());
            }
            let to = Square::from_usi(to).ok_or_else(syntax)?;
            return Ok(Move::Drop { kind, to });
        }

        let (body, promote) = match s.strip_suffix('+') {
            Some(body) => (body, true),
            None => (s, false),
        };
        if body.len() != 4 || !body.is_ascii() {
            return Err(syntax());
        }
        let from = Square::from_usi(&body[..2]).ok_or_else(syntax)?;
        let to = Square::from_usi(&body[2..]).ok_or_else(syntax)?;
        Ok(Move::Normal { from, to, promote })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal { from, to, promote } => {
                write!(f, "{from}{to}")?;
                if promote {
                    f.write_str("+")?;
                }
                Ok(())
            }
            Move::Drop { kind, to } => write!(f, "{}*{to}", kind.to_sfen_char()),
        }
    }
}

/// 指し手文字列の解析エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid move syntax: {0}")]
    Syntax(String),

    #[error("illegal move in this position: {0}")]
    Illegal(String),
}
