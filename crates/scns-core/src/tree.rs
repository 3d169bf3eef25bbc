//! アリーナ上の探索木
//!
//! ノードは `Vec<Node>` に格納し、[`NodeId`] で参照する。親への参照もインデックスで持つため、
//! 子ノードの追加で格納先が再確保されても無効にならない。
//! 木全体は探索の呼び出しが終わるときにまとめて破棄される。

use std::ops::{Index, IndexMut};

use crate::distribution::ValueDistribution;
use crate::position::Position;
use crate::types::Stair;

/// ノードのインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// ルートノード
    pub const ROOT: NodeId = NodeId(0);

    /// 配列アクセス用のインデックス
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// 探索木のノード
#[derive(Debug, Clone)]
pub struct Node<P: Position> {
    /// このノードに至った指し手（ルートは `None`）
    pub(crate) mv: Option<P::Move>,
    /// 局面のスナップショット
    pub(crate) pos: P,
    /// 最後の指し手の評価値の段（量子化のみ、クランプなし）
    pub(crate) stair: Stair,
    /// 兄弟の最善手からの後悔（`clip(best_e - stair)`）
    pub(crate) regret: Stair,
    /// ルートから累積した相対評価値
    pub(crate) x: Stair,
    pub(crate) dist: ValueDistribution,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: u32,
    /// 伝播を受けた回数
    pub(crate) visits: u32,
    pub(crate) terminal: bool,
}

impl<P: Position> Node<P> {
    /// ルートノード（`x = 0`、葉として初期化）
    pub(crate) fn root(pos: P, delta: f64) -> Self {
        Self {
            mv: None,
            pos,
            stair: 0,
            regret: 0,
            x: 0,
            dist: ValueDistribution::leaf(0, delta),
            children: Vec::new(),
            parent: None,
            depth: 0,
            visits: 0,
            terminal: false,
        }
    }

    /// 展開で生成される子ノード
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn child(
        mv: P::Move,
        pos: P,
        parent: NodeId,
        depth: u32,
        stair: Stair,
        regret: Stair,
        x: Stair,
        delta: f64,
    ) -> Self {
        Self {
            mv: Some(mv),
            pos,
            stair,
            regret,
            x,
            dist: ValueDistribution::leaf(x, delta),
            children: Vec::new(),
            parent: Some(parent),
            depth,
            visits: 0,
            terminal: false,
        }
    }

    #[inline]
    pub fn mv(&self) -> Option<P::Move> {
        self.mv
    }

    #[inline]
    pub fn position(&self) -> &P {
        &self.pos
    }

    #[inline]
    pub fn stair(&self) -> Stair {
        self.stair
    }

    #[inline]
    pub fn regret(&self) -> Stair {
        self.regret
    }

    /// ルートから累積した相対評価値
    #[inline]
    pub fn x(&self) -> Stair {
        self.x
    }

    #[inline]
    pub fn distribution(&self) -> &ValueDistribution {
        &self.dist
    }

    /// 子ノード（生成順）
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// 伝播を受けた回数
    #[inline]
    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// 合法手がないことが判明したノードか
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// 子ノードを持たないか
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// ノードのアリーナ
#[derive(Debug, Clone)]
pub struct Tree<P: Position> {
    nodes: Vec<Node<P>>,
}

impl<P: Position> Tree<P> {
    /// ルートだけの木を作る
    pub fn new(root_pos: P, delta: f64) -> Self {
        Self {
            nodes: vec![Node::root(root_pos, delta)],
        }
    }

    /// ノード数
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// ルートは常に存在するので `false`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn root(&self) -> &Node<P> {
        &self[NodeId::ROOT]
    }

    /// ノードを追加してインデックスを返す
    pub(crate) fn push(&mut self, node: Node<P>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// 全ノードを ID 付きで走査する
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<P>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i as u32), n))
    }

    /// ルートから `id` までの指し手列
    pub fn moves_to(&self, id: NodeId) -> Vec<P::Move> {
        let mut moves = Vec::new();
        let mut cur = Some(id);
        while let Some(node) = cur.map(|i| &self[i]) {
            if let Some(mv) = node.mv {
                moves.push(mv);
            }
            cur = node.parent;
        }
        moves.reverse();
        moves
    }
}

impl<P: Position> Index<NodeId> for Tree<P> {
    type Output = Node<P>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<P> {
        &self.nodes[id.index()]
    }
}

impl<P: Position> IndexMut<NodeId> for Tree<P> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<P> {
        &mut self.nodes[id.index()]
    }
}
