//! 兄弟共謀数探索（Sibling Conspiracy Number Search, SCNS）のコア
//!
//! 二人零和完全情報ゲーム向けの証明数・反証数探索を、勝ち/負けの 2 値から
//! 評価値の連続的な段（stair）へ一般化したもの。
//!
//! - `types`: 手番と評価値の段
//! - `distribution`: ノードごとの証明数・反証数分布（`ValueDistribution`）
//! - `position`: 外部の局面・評価関数とのインターフェース
//! - `tree`: アリーナ上の探索木（`Tree` / `Node` / `NodeId`）
//! - `search`: 展開・伝播・選択と反復探索ドライバ（`Searcher`）
//!
//! 局面表現・指し手生成・静的評価はこのクレートの外側にあり、
//! [`Position`] と [`Evaluator`] トレイトを介して呼び出す。

pub mod distribution;
pub mod position;
pub mod search;
pub mod tree;
pub mod types;

pub use distribution::{DistributionError, PD_INF, ValueDistribution, vmax_by_def, vmin_by_def};
pub use position::{Evaluator, MoveGuard, Position};
pub use search::{
    BestMove, ChildSummary, ConfigError, SearchConfig, SearchReport, Searcher, VmaxScan,
};
pub use tree::{Node, NodeId, Tree};
pub use types::{Color, N_VALUE_STAIRS, Stair, VALUE_INF, clip, value_to_stair};
