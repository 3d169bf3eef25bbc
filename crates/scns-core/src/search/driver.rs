//! 反復探索ドライバ
//!
//! 時間内で「ウィンドウ計算 → 最有望ノード選択 → 展開 → ルートまで伝播」を繰り返し、
//! ルートの子のうち訪問回数が最大の手を返す。
//! 証明済みのルートでも打ち切らず、終了条件は時間（と任意の反復回数上限）のみ。

use std::fmt;
use std::time::Duration;

use log::info;

use super::config::{ConfigError, SearchConfig};
use super::context::SearchContext;
use super::expand::expand;
use super::propagate::propagate_to_root;
use super::select::select_most_proving;
use crate::distribution::vmin_by_def;
use crate::position::{Evaluator, Position};
use crate::tree::Tree;
use crate::types::Stair;

/// 探索結果の指し手
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestMove<M> {
    Move(M),
    /// ルートに合法手がない
    Resign,
}

impl<M: Copy> BestMove<M> {
    /// 指し手があれば返す
    #[inline]
    pub fn as_move(&self) -> Option<M> {
        match self {
            BestMove::Move(mv) => Some(*mv),
            BestMove::Resign => None,
        }
    }

    #[inline]
    pub fn is_resign(&self) -> bool {
        matches!(self, BestMove::Resign)
    }
}

impl<M: fmt::Display> fmt::Display for BestMove<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BestMove::Move(mv) => write!(f, "{mv}"),
            BestMove::Resign => f.write_str("resign"),
        }
    }
}

/// ルートの子ノードの要約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildSummary<M> {
    pub mv: M,
    pub visits: u32,
    /// 評価値の段（量子化のみ）
    pub stair: Stair,
    /// 累積相対評価値
    pub x: Stair,
    pub minimax: Stair,
    pub terminal: bool,
}

/// 探索結果と診断情報
#[derive(Debug, Clone)]
pub struct SearchReport<M> {
    pub best_move: BestMove<M>,
    pub iterations: u64,
    /// 生成した子ノードの総数
    pub move_count: u64,
    pub max_depth: u32,
    pub elapsed: Duration,
    /// 最後の反復で使った評価値ウィンドウ
    pub vmin: Stair,
    pub vmax: Stair,
    /// ルートの minimax 値
    pub root_value: Stair,
    /// ルートの子ノード（生成順）
    pub children: Vec<ChildSummary<M>>,
}

/// ルートの子のうち訪問回数が最大のノードの指し手（同数なら生成順で先）
pub fn best_child_move<P: Position>(tree: &Tree<P>) -> BestMove<P::Move> {
    let mut best = BestMove::Resign;
    let mut best_visits = None;
    for &c in tree.root().children() {
        let child = &tree[c];
        if best_visits.is_none_or(|v| child.visits() > v) {
            if let Some(mv) = child.mv() {
                best = BestMove::Move(mv);
                best_visits = Some(child.visits());
            }
        }
    }
    best
}

/// SCNS 探索器
#[derive(Debug, Clone)]
pub struct Searcher<E> {
    config: SearchConfig,
    evaluator: E,
}

impl<E> Searcher<E> {
    /// 設定を検証して探索器を作る
    pub fn new(config: SearchConfig, evaluator: E) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, evaluator })
    }

    /// `pos` から探索して指し手を選ぶ
    pub fn search<P>(&self, pos: &P) -> SearchReport<P::Move>
    where
        P: Position,
        E: Evaluator<P>,
    {
        self.search_tree(pos).1
    }

    /// 探索して、結果と一緒に探索木を返す
    pub fn search_tree<P>(&self, pos: &P) -> (Tree<P>, SearchReport<P::Move>)
    where
        P: Position,
        E: Evaluator<P>,
    {
        let config = &self.config;
        let mut ctx = SearchContext::new(pos.side_to_move(), config.delta);
        let mut tree = Tree::new(pos.clone(), config.delta);
        let budget = config.time_budget();

        let mut iterations = 0u64;
        let (mut vmin, mut vmax) = (0, 0);
        while ctx.elapsed() < budget && config.max_iterations.is_none_or(|max| iterations < max) {
            let root = tree.root().distribution();
            vmax = config.vmax_scan.vmax(root, config.p_max);
            vmin = vmin_by_def(root, config.d_max);

            let leaf = select_most_proving(&tree, vmin, vmax, &ctx);
            expand(&mut tree, leaf, &self.evaluator, &mut ctx);
            propagate_to_root(&mut tree, leaf, &ctx);

            iterations += 1;
        }

        let report = SearchReport {
            best_move: best_child_move(&tree),
            iterations,
            move_count: ctx.move_count(),
            max_depth: ctx.max_depth(),
            elapsed: ctx.elapsed(),
            vmin,
            vmax,
            root_value: tree.root().distribution().minimax_value(),
            children: root_children(&tree),
        };
        info!(
            "summary : iteration {} nodes = {} depth = {} v = ({}, {}) bestmove {}",
            report.iterations,
            report.move_count,
            report.max_depth,
            report.vmin,
            report.vmax,
            report.best_move
        );
        (tree, report)
    }
}

fn root_children<P: Position>(tree: &Tree<P>) -> Vec<ChildSummary<P::Move>> {
    tree.root()
        .children()
        .iter()
        .filter_map(|&c| {
            let node = &tree[c];
            Some(ChildSummary {
                mv: node.mv()?,
                visits: node.visits(),
                stair: node.stair(),
                x: node.x(),
                minimax: node.distribution().minimax_value(),
                terminal: node.is_terminal(),
            })
        })
        .collect()
}
