//! 探索
//!
//! - `config`: 探索設定（思考時間・閾値・葉の増加率）
//! - `context`: 探索 1 回分の状態（ルート手番・時計・統計）
//! - `expand`: ノードの展開
//! - `propagate`: 子から親への分布の合成
//! - `select`: 最有望ノードの選択
//! - `driver`: 反復探索ドライバ（`Searcher`）

mod config;
mod context;
mod driver;
mod expand;
mod propagate;
mod select;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, DEFAULT_TIME_BUDGET_MS, SearchConfig, VmaxScan};
pub use context::SearchContext;
pub use driver::{BestMove, ChildSummary, SearchReport, Searcher, best_child_move};
