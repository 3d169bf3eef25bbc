//! search モジュールのテスト
//!
//! 木の形と各局面の評価値を表で与える `ScriptedPosition` を使う。

mod expansion;

use std::fmt;
use std::rc::Rc;

use crate::position::Position;
use crate::search::SearchConfig;
use crate::types::Color;

/// 表の 1 行（1 局面）
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct ScriptNode {
    /// この局面に至る手を指した側から見た評価値
    score: i32,
    children: Vec<usize>,
    /// 疑似合法だが合法でない手
    illegal: bool,
    /// この局面に至る手がその手番の玉を取る
    king_of: Option<Color>,
}

/// 表で定義したゲーム木を辿る局面
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ScriptedPosition {
    table: Rc<Vec<ScriptNode>>,
    current: usize,
    side: Color,
}

impl ScriptedPosition {
    pub(super) fn score(&self) -> i32 {
        self.table[self.current].score
    }

    pub(super) fn current(&self) -> usize {
        self.current
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ScriptMove(pub(super) usize);

impl fmt::Display for ScriptMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

impl Position for ScriptedPosition {
    type Move = ScriptMove;
    type Square = usize;
    type StateInfo = usize;

    fn side_to_move(&self) -> Color {
        self.side
    }

    fn generate_moves(&self, moves: &mut Vec<ScriptMove>) {
        moves.extend(self.table[self.current].children.iter().map(|&c| ScriptMove(c)));
    }

    fn is_pseudo_legal(&self, mv: ScriptMove) -> bool {
        self.table[self.current].children.contains(&mv.0)
    }

    fn is_legal(&self, mv: ScriptMove) -> bool {
        !self.table[mv.0].illegal
    }

    fn do_move(&mut self, mv: ScriptMove) -> usize {
        let prev = self.current;
        self.current = mv.0;
        self.side = !self.side;
        prev
    }

    fn undo_move(&mut self, _mv: ScriptMove, st: usize) {
        self.current = st;
        self.side = !self.side;
    }

    fn move_to(&self, mv: ScriptMove) -> usize {
        mv.0
    }

    fn piece_on(&self, sq: usize) -> Option<Color> {
        self.table[sq].king_of
    }

    fn king_square(&self, color: Color) -> Option<usize> {
        self.table[self.current]
            .children
            .iter()
            .copied()
            .find(|&c| self.table[c].king_of == Some(color))
    }
}

/// 表を組み立てるビルダー（0 番がルート、先手番から始まる）
pub(super) struct ScriptBuilder {
    nodes: Vec<ScriptNode>,
}

impl ScriptBuilder {
    pub(super) fn new() -> Self {
        Self {
            nodes: vec![ScriptNode::default()],
        }
    }

    fn push(&mut self, parent: usize, node: ScriptNode) -> usize {
        let id = self.nodes.len();
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        id
    }

    pub(super) fn add(&mut self, parent: usize, score: i32) -> usize {
        self.push(
            parent,
            ScriptNode {
                score,
                ..ScriptNode::default()
            },
        )
    }

    pub(super) fn add_illegal(&mut self, parent: usize, score: i32) -> usize {
        self.push(
            parent,
            ScriptNode {
                score,
                illegal: true,
                ..ScriptNode::default()
            },
        )
    }

    pub(super) fn add_king_capture(&mut self, parent: usize, victim: Color) -> usize {
        self.push(
            parent,
            ScriptNode {
                score: 9999,
                king_of: Some(victim),
                ..ScriptNode::default()
            },
        )
    }

    /// `parent` の下に 1 本道を `len` 手分つなげる
    pub(super) fn add_chain(&mut self, parent: usize, len: usize, score: i32) -> usize {
        (0..len).fold(parent, |p, _| self.add(p, score))
    }

    /// `parent` の下に幅 `width`・深さ `depth` の木を作る（評価値は番号から決める）
    pub(super) fn add_uniform(&mut self, parent: usize, depth: usize, width: usize) {
        if depth == 0 {
            return;
        }
        for i in 0..width {
            let salt = self.nodes.len() as i32;
            let score = (salt * 37 + i as i32 * 113) % 400 - 200;
            let child = self.add(parent, score);
            self.add_uniform(child, depth - 1, width);
        }
    }

    pub(super) fn build(self) -> ScriptedPosition {
        ScriptedPosition {
            table: Rc::new(self.nodes),
            current: 0,
            side: Color::Black,
        }
    }
}

/// 局面の表の評価値をそのまま返す評価関数
pub(super) fn script_eval(pos: &ScriptedPosition) -> i32 {
    pos.score()
}

/// 反復回数で打ち切る設定（時間は十分に取る）
pub(super) fn iterations(n: u64) -> SearchConfig {
    SearchConfig {
        time_budget_ms: 600_000,
        max_iterations: Some(n),
        ..SearchConfig::default()
    }
}
