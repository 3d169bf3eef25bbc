//! 外部の局面・評価関数とのインターフェース
//!
//! 探索コアは盤面表現や指し手生成を持たない。局面は [`Position`] を、
//! 静的評価は [`Evaluator`] を実装した外部の型から受け取る。
//!
//! 局面は展開中に 1 つのオブジェクトを `do_move` / `undo_move` で使い回す。
//! [`MoveGuard`] はこの対をスコープに閉じ込め、どの経路で抜けても
//! 局面が元に戻ることを保証する。

use std::fmt;
use std::ops::Deref;

use crate::types::Color;

/// 探索対象の局面
pub trait Position: Clone {
    /// 指し手
    type Move: Copy + Eq + fmt::Debug + fmt::Display;
    /// 升
    type Square: Copy + Eq + fmt::Debug;
    /// `undo_move` で局面を正確に復元するための状態
    type StateInfo;

    /// 手番
    fn side_to_move(&self) -> Color;

    /// 疑似合法手を `moves` に追加する
    fn generate_moves(&self, moves: &mut Vec<Self::Move>);

    /// 指し手が疑似合法か
    fn is_pseudo_legal(&self, mv: Self::Move) -> bool;

    /// 疑似合法手が合法か
    fn is_legal(&self, mv: Self::Move) -> bool;

    /// 指し手を実行する
    fn do_move(&mut self, mv: Self::Move) -> Self::StateInfo;

    /// `do_move` を取り消す
    fn undo_move(&mut self, mv: Self::Move, st: Self::StateInfo);

    /// 指し手の移動先
    fn move_to(&self, mv: Self::Move) -> Self::Square;

    /// 升にある駒の持ち主（空なら `None`）
    fn piece_on(&self, sq: Self::Square) -> Option<Color>;

    /// 玉の位置
    fn king_square(&self, color: Color) -> Option<Self::Square>;
}

/// 静的評価関数
///
/// 返す評価値は `pos` に至る指し手を指した側（`pos` の手番の相手）から見た値。
pub trait Evaluator<P: Position> {
    fn evaluate(&self, pos: &P) -> i32;
}

impl<P, F> Evaluator<P> for F
where
    P: Position,
    F: Fn(&P) -> i32,
{
    #[inline]
    fn evaluate(&self, pos: &P) -> i32 {
        self(pos)
    }
}

/// `do_move` した局面を借用し、drop 時に `undo_move` するガード
pub struct MoveGuard<'a, P: Position> {
    pos: &'a mut P,
    mv: P::Move,
    state: Option<P::StateInfo>,
}

impl<'a, P: Position> MoveGuard<'a, P> {
    /// `mv` を実行してガードを作る
    pub fn new(pos: &'a mut P, mv: P::Move) -> Self {
        let state = pos.do_move(mv);
        Self {
            pos,
            mv,
            state: Some(state),
        }
    }
}

impl<P: Position> Deref for MoveGuard<'_, P> {
    type Target = P;

    #[inline]
    fn deref(&self) -> &P {
        self.pos
    }
}

impl<P: Position> Drop for MoveGuard<'_, P> {
    fn drop(&mut self) {
        if let Some(st) = self.state.take() {
            self.pos.undo_move(self.mv, st);
        }
    }
}

/// 指し手が玉を取るなら、その玉の持ち主を返す
///
/// 合法性を完全には保証しない局面実装のための暫定フィルタで使う。
pub(crate) fn captured_king<P: Position>(pos: &P, mv: P::Move) -> Option<Color> {
    let to = pos.move_to(mv);
    let owner = pos.piece_on(to)?;
    (pos.king_square(owner) == Some(to)).then_some(owner)
}
