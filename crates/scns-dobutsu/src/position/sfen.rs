//! SFEN 形式の解析・出力
//!
//! `<盤面> <手番> <持ち駒> <手数>` の 4 フィールド。盤面は段 a から順に `/` で区切り、
//! 各段は 3 筋から 1 筋の順に書く。平手は `gle/1c1/1C1/ELG b - 1`。

use std::fmt::Write as _;

use thiserror::Error;

use super::Position;
use crate::types::{FILE_NB, Piece, PieceType, RANK_NB, Square};
use scns_core::Color;

/// 平手初期局面の SFEN
pub const SFEN_STARTPOS: &str = "gle/1c1/1C1/ELG b - 1";

/// SFEN の解析エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SfenError {
    #[error("missing SFEN field: {0}")]
    MissingField(&'static str),

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("invalid piece character: {0:?}")]
    InvalidPiece(char),

    #[error("invalid side to move: {0}")]
    InvalidSideToMove(String),

    #[error("invalid hand: {0}")]
    InvalidHand(String),

    #[error("invalid ply: {0}")]
    InvalidPly(String),

    #[error("{0} lion is missing")]
    MissingLion(Color),

    #[error("{0} has more than one lion")]
    DuplicateLion(Color),

    #[error("too many pieces of kind {0:?}")]
    TooManyPieces(PieceType),
}

/// 各駒種（らいおん以外）の総数。成ったひよこは盤上でひよことして数える。
const PIECES_PER_KIND: usize = 2;

impl Position {
    /// SFEN 文字列から局面を作る（`startpos` も受け付ける）
    ///
    /// 手数は省略可能（省略時は 1）。
    pub fn from_sfen(sfen: &str) -> Result<Position, SfenError> {
        let sfen = sfen.trim();
        if sfen == "startpos" {
            return Ok(Position::startpos());
        }
        let mut fields = sfen.split_whitespace();
        let board = fields.next().ok_or(SfenError::MissingField("board"))?;
        let side = fields.next().ok_or(SfenError::MissingField("side to move"))?;
        let hand = fields.next().ok_or(SfenError::MissingField("hand"))?;
        let ply = fields.next();

        let mut pos = Position::empty();
        parse_board(&mut pos, board)?;
        pos.side_to_move = match side {
            "b" => Color::Black,
            "w" => Color::White,
            _ => return Err(SfenError::InvalidSideToMove(side.to_string())),
        };
        parse_hand(&mut pos, hand)?;
        if let Some(ply) = ply {
            pos.ply = ply
                .parse()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| SfenError::InvalidPly(ply.to_string()))?;
        }

        validate_piece_counts(&pos)?;
        Ok(pos)
    }

    /// SFEN 文字列に変換する
    pub fn to_sfen(&self) -> String {
        let mut s = String::new();
        for rank in 0..RANK_NB {
            if rank > 0 {
                s.push('/');
            }
            let mut empty = 0;
            for file in (0..FILE_NB).rev() {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            let _ = write!(s, "{empty}");
                            empty = 0;
                        }
                        s.push(piece.to_sfen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(s, "{empty}");
            }
        }

        s.push(' ');
        s.push(self.side_to_move.to_sfen_char());
        s.push(' ');

        let mut hand = String::new();
        for color in Color::ALL {
            for kind in PieceType::HAND {
                let n = self.hand_count(color, kind);
                if n == 0 {
                    continue;
                }
                if n > 1 {
                    let _ = write!(hand, "{n}");
                }
                hand.push(Piece::new(color, kind).to_sfen_char());
            }
        }
        s.push_str(if hand.is_empty() { "-" } else { &hand });

        let _ = write!(s, " {}", self.ply);
        s
    }
}

fn parse_board(pos: &mut Position, board: &str) -> Result<(), SfenError> {
    let rows: Vec<&str> = board.split('/').collect();
    if rows.len() != RANK_NB as usize {
        return Err(SfenError::InvalidBoard(board.to_string()));
    }
    for (rank, row) in rows.iter().enumerate() {
        // 3 筋から 1 筋へ
        let mut file = FILE_NB as i32 - 1;
        for c in row.chars() {
            if let Some(n) = c.to_digit(10) {
                file -= n as i32;
                continue;
            }
            let piece = Piece::from_sfen_char(c).ok_or(SfenError::InvalidPiece(c))?;
            let sq = u8::try_from(file)
                .ok()
                .and_then(|f| Square::new(f, rank as u8))
                .ok_or_else(|| SfenError::InvalidBoard(board.to_string()))?;
            pos.board[sq.index()] = Some(piece);
            file -= 1;
        }
        if file != -1 {
            return Err(SfenError::InvalidBoard(board.to_string()));
        }
    }
    Ok(())
}

fn parse_hand(pos: &mut Position, hand: &str) -> Result<(), SfenError> {
    if hand == "-" {
        return Ok(());
    }
    let invalid = || SfenError::InvalidHand(hand.to_string());
    let mut count: Option<u8> = None;
    for c in hand.chars() {
        if let Some(d) = c.to_digit(10) {
            let n = count.unwrap_or(0);
            let next = n.checked_mul(10).and_then(|n| n.checked_add(d as u8));
            count = Some(next.ok_or_else(invalid)?);
            continue;
        }
        let piece = Piece::from_sfen_char(c).ok_or_else(invalid)?;
        let idx = piece.kind.hand_index().ok_or_else(invalid)?;
        let n = count.take().unwrap_or(1);
        if n == 0 {
            return Err(invalid());
        }
        let slot = &mut pos.hands[piece.color.index()][idx];
        *slot = slot.checked_add(n).ok_or_else(invalid)?;
    }
    if count.is_some() {
        return Err(invalid());
    }
    Ok(())
}

/// らいおんは各手番 1 枚、他の駒種は盤上と両者の持ち駒を合わせて 2 枚まで
fn validate_piece_counts(pos: &Position) -> Result<(), SfenError> {
    let pieces = move || pos.board.iter().flatten();
    for color in Color::ALL {
        let lion = Piece::new(color, PieceType::Lion);
        match pieces().filter(|&&p| p == lion).count() {
            0 => return Err(SfenError::MissingLion(color)),
            1 => {}
            _ => return Err(SfenError::DuplicateLion(color)),
        }
    }
    for kind in PieceType::HAND {
        let on_board = pieces().filter(|p| p.kind.unpromoted() == kind).count();
        let in_hand: usize = Color::ALL
            .iter()
            .map(|&c| usize::from(pos.hand_count(c, kind)))
            .sum();
        if on_board + in_hand > PIECES_PER_KIND {
            return Err(SfenError::TooManyPieces(kind));
        }
    }
    Ok(())
}
