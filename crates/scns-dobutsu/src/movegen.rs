//! 指し手生成器
//!
//! 疑似合法手（自分のらいおんへの利きを確認していない手）を生成する。
//! 対局が終わっている局面では何も生成しない。

use scns_core::Color;

use crate::moves::Move;
use crate::position::Position;
use crate::types::{Piece, PieceType, Square, far_rank};

/// 移動でひよこが最奥段に入るなら成りが強制される
#[inline]
pub(crate) fn must_promote(piece: Piece, to: Square) -> bool {
    piece.kind == PieceType::Chick && to.rank() == far_rank(piece.color)
}

/// 疑似合法手を `moves` に追加する
///
/// 盤上の駒の移動を升順に、続いて持ち駒の打ちを駒種順に生成する。
pub(crate) fn generate(pos: &Position, moves: &mut Vec<Move>) {
    if pos.is_game_over() {
        return;
    }
    let us = side_to_move(pos);

    for from in Square::all() {
        let Some(piece) = pos.piece_at(from).filter(|p| p.color == us) else {
            continue;
        };
        for (df, dr) in piece.attack_steps() {
            let Some(to) = from.offset(df, dr) else {
                continue;
            };
            if pos.piece_at(to).is_some_and(|p| p.color == us) {
                continue;
            }
            moves.push(Move::Normal {
                from,
                to,
                promote: must_promote(piece, to),
            });
        }
    }

    for kind in PieceType::HAND {
        if pos.hand_count(us, kind) == 0 {
            continue;
        }
        moves.extend(
            Square::all()
                .filter(|&to| pos.piece_at(to).is_none())
                .map(|to| Move::Drop { kind, to }),
        );
    }
}

#[inline]
fn side_to_move(pos: &Position) -> Color {
    scns_core::Position::side_to_move(pos)
}
