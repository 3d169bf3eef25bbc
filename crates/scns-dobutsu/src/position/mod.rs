//! 局面表現モジュール
//!
//! - `Position`: 局面本体（盤面配列・持ち駒・手番・手数）
//! - `StateInfo`: `undo_move` に必要な状態（取った駒）
//! - SFEN 形式の解析・出力
//!
//! 手の実行と巻き戻しは `scns_core::Position` の実装として提供する。

mod sfen;

use log::trace;

use crate::movegen;
use crate::moves::{Move, MoveParseError};
use crate::types::{Piece, PieceType, Square, far_rank};
use scns_core::Color;

pub use sfen::{SFEN_STARTPOS, SfenError};

/// 局面
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Option<Piece>; Square::NUM],
    /// 手番ごとの持ち駒（ひよこ・ぞう・きりんの枚数）
    hands: [[u8; 3]; Color::NUM],
    side_to_move: Color,
    /// 手数（1 始まり）
    ply: u32,
}

/// `undo_move` で局面を復元するための状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateInfo {
    /// 取った駒（成っていればそのまま）
    pub captured: Option<Piece>,
}

impl Position {
    /// 平手の初期局面
    pub fn startpos() -> Position {
        let mut pos = Position::empty();
        let place = [
            ("3a", Color::White, PieceType::Giraffe),
            ("2a", Color::White, PieceType::Lion),
            ("1a", Color::White, PieceType::Elephant),
            ("2b", Color::White, PieceType::Chick),
            ("2c", Color::Black, PieceType::Chick),
            ("3d", Color::Black, PieceType::Elephant),
            ("2d", Color::Black, PieceType::Lion),
            ("1d", Color::Black, PieceType::Giraffe),
        ];
        for (sq, color, kind) in place {
            if let Some(sq) = Square::from_usi(sq) {
                pos.board[sq.index()] = Some(Piece::new(color, kind));
            }
        }
        pos
    }

    fn empty() -> Position {
        Position {
            board: [None; Square::NUM],
            hands: [[0; 3]; Color::NUM],
            side_to_move: Color::Black,
            ply: 1,
        }
    }

    /// 升にある駒
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// 持ち駒の枚数
    #[inline]
    pub fn hand_count(&self, color: Color, kind: PieceType) -> u8 {
        kind.hand_index().map_or(0, |i| self.hands[color.index()][i])
    }

    /// 手数
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// らいおんの位置
    pub fn lion_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.piece_at(sq) == Some(Piece::new(color, PieceType::Lion)))
    }

    /// `sq` に `by` の駒の利きがあるか
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        Square::all().any(|from| match self.piece_at(from) {
            Some(piece) if piece.color == by => piece
                .attack_steps()
                .any(|(df, dr)| from.offset(df, dr) == Some(sq)),
            _ => false,
        })
    }

    /// `color` のらいおんが敵陣の最奥段に到達しているか（トライ）
    pub fn is_try(&self, color: Color) -> bool {
        self.lion_square(color)
            .is_some_and(|sq| sq.rank() == far_rank(color))
    }

    /// 対局が終わっているか
    ///
    /// 直前に指した側のトライが成立しているか、どちらかのらいおんが盤上にない。
    pub fn is_game_over(&self) -> bool {
        let us = self.side_to_move;
        self.is_try(!us) || self.lion_square(us).is_none() || self.lion_square(!us).is_none()
    }

    /// 合法手の一覧
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        movegen::generate(self, &mut moves);
        moves.retain(|&mv| self.is_legal_move(mv));
        moves
    }

    /// 合法手が 1 つでもあるか
    pub fn has_legal_move(&self) -> bool {
        let mut moves = Vec::new();
        movegen::generate(self, &mut moves);
        moves.into_iter().any(|mv| self.is_legal_move(mv))
    }

    /// 指し手文字列を、この局面の合法手として解析する
    ///
    /// ひよこの成りは強制なので、成りの `+` は省略してもよい。
    pub fn parse_move(&self, s: &str) -> Result<Move, MoveParseError> {
        let parsed = Move::from_usi(s)?;
        self.legal_moves()
            .into_iter()
            .find(|&mv| match (mv, parsed) {
                (Move::Normal { from, to, .. }, Move::Normal { from: f, to: t, .. }) => {
                    from == f && to == t
                }
                _ => mv == parsed,
            })
            .ok_or_else(|| MoveParseError::Illegal(s.to_string()))
    }

    /// 合法手を続けて指す
    pub fn play_moves<'a>(
        &mut self,
        moves: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), MoveParseError> {
        for s in moves {
            let mv = self.parse_move(s)?;
            self.apply(mv);
        }
        Ok(())
    }

    /// 疑似合法手か
    fn is_pseudo_legal_move(&self, mv: Move) -> bool {
        let us = self.side_to_move;
        match mv {
            Move::Normal { from, to, promote } => {
                let Some(piece) = self.piece_at(from) else {
                    return false;
                };
                piece.color == us
                    && self.piece_at(to).is_none_or(|p| p.color != us)
                    && piece
                        .attack_steps()
                        .any(|(df, dr)| from.offset(df, dr) == Some(to))
                    && promote == movegen::must_promote(piece, to)
            }
            Move::Drop { kind, to } => {
                self.piece_at(to).is_none() && self.hand_count(us, kind) > 0
            }
        }
    }

    /// 指した後に自分のらいおんに利きがなければ合法
    fn is_legal_move(&self, mv: Move) -> bool {
        let us = self.side_to_move;
        let mut next = self.clone();
        next.apply(mv);
        next.lion_square(us)
            .is_some_and(|sq| !next.is_attacked(sq, !us))
    }

    fn apply(&mut self, mv: Move) -> StateInfo {
        let us = self.side_to_move;
        let captured = match mv {
            Move::Normal { from, to, promote } => {
                let moved = self.board[from.index()].take();
                let captured = self.board[to.index()];
                if let Some(idx) = captured.and_then(|p| p.kind.unpromoted().hand_index()) {
                    self.hands[us.index()][idx] += 1;
                }
                self.board[to.index()] = moved.map(|p| {
                    if promote {
                        Piece::new(p.color, PieceType::Hen)
                    } else {
                        p
                    }
                });
                captured
            }
            Move::Drop { kind, to } => {
                if let Some(idx) = kind.hand_index() {
                    self.hands[us.index()][idx] = self.hands[us.index()][idx].saturating_sub(1);
                }
                self.board[to.index()] = Some(Piece::new(us, kind));
                None
            }
        };
        self.side_to_move = !us;
        self.ply += 1;
        StateInfo { captured }
    }

    fn unapply(&mut self, mv: Move, st: StateInfo) {
        let us = !self.side_to_move;
        match mv {
            Move::Normal { from, to, promote } => {
                let moved = self.board[to.index()].map(|p| {
                    if promote {
                        Piece::new(p.color, PieceType::Chick)
                    } else {
                        p
                    }
                });
                self.board[from.index()] = moved;
                self.board[to.index()] = st.captured;
                if let Some(idx) = st.captured.and_then(|p| p.kind.unpromoted().hand_index()) {
                    self.hands[us.index()][idx] = self.hands[us.index()][idx].saturating_sub(1);
                }
            }
            Move::Drop { kind, to } => {
                self.board[to.index()] = None;
                if let Some(idx) = kind.hand_index() {
                    self.hands[us.index()][idx] += 1;
                }
            }
        }
        self.side_to_move = us;
        self.ply -= 1;
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

impl scns_core::Position for Position {
    type Move = Move;
    type Square = Square;
    type StateInfo = StateInfo;

    #[inline]
    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn generate_moves(&self, moves: &mut Vec<Move>) {
        movegen::generate(self, moves);
    }

    fn is_pseudo_legal(&self, mv: Move) -> bool {
        self.is_pseudo_legal_move(mv)
    }

    fn is_legal(&self, mv: Move) -> bool {
        self.is_legal_move(mv)
    }

    fn do_move(&mut self, mv: Move) -> StateInfo {
        trace!("do_move {mv}");
        self.apply(mv)
    }

    fn undo_move(&mut self, mv: Move, st: StateInfo) {
        self.unapply(mv, st);
    }

    #[inline]
    fn move_to(&self, mv: Move) -> Square {
        mv.to()
    }

    #[inline]
    fn piece_on(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|p| p.color)
    }

    fn king_square(&self, color: Color) -> Option<Square> {
        self.lion_square(color)
    }
}
