//! 駒得による静的評価

use scns_core::{Color, Evaluator};

use crate::position::Position;
use crate::types::{PieceType, RANK_NB, Square, far_rank};

/// 勝ち（トライ成立・相手の合法手なし）の評価値
pub const WIN_SCORE: i32 = 3000;

/// らいおんが 1 段前進するごとの加点
const LION_ADVANCE_BONUS: i32 = 15;

#[inline]
const fn board_value(kind: PieceType) -> i32 {
    match kind {
        PieceType::Chick => 100,
        PieceType::Elephant => 300,
        PieceType::Giraffe => 400,
        PieceType::Hen => 450,
        PieceType::Lion => 0,
    }
}

#[inline]
const fn hand_value(kind: PieceType) -> i32 {
    match kind {
        PieceType::Chick => 120,
        PieceType::Elephant => 330,
        PieceType::Giraffe => 440,
        PieceType::Hen | PieceType::Lion => 0,
    }
}

/// 駒割りとらいおんの前進度による評価関数
///
/// 評価値は直前に指した側（手番の相手）から見た値。
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    /// `color` から見た駒割り
    pub fn material(pos: &Position, color: Color) -> i32 {
        let mut score = 0;
        for sq in Square::all() {
            let Some(piece) = pos.piece_at(sq) else {
                continue;
            };
            let v = board_value(piece.kind) + lion_bonus(piece.kind, piece.color, sq);
            score += if piece.color == color { v } else { -v };
        }
        for kind in PieceType::HAND {
            score += hand_value(kind) * i32::from(pos.hand_count(color, kind));
            score -= hand_value(kind) * i32::from(pos.hand_count(!color, kind));
        }
        score
    }
}

fn lion_bonus(kind: PieceType, color: Color, sq: Square) -> i32 {
    if kind != PieceType::Lion {
        return 0;
    }
    let distance = sq.rank().abs_diff(far_rank(color));
    LION_ADVANCE_BONUS * i32::from(RANK_NB - 1 - distance)
}

impl Evaluator<Position> for MaterialEvaluator {
    fn evaluate(&self, pos: &Position) -> i32 {
        let mover = !scns_core::Position::side_to_move(pos);
        if pos.is_try(mover) || !pos.has_legal_move() {
            return WIN_SCORE;
        }
        Self::material(pos, mover)
    }
}
