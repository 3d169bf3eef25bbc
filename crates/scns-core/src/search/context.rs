//! 探索 1 回分の状態
//!
//! ルートの手番・経過時間・生成手数・最大深さを探索ごとに持ち、
//! 展開・伝播・選択に明示的に渡す。

use std::time::{Duration, Instant};

use crate::types::Color;

/// 探索コンテキスト
#[derive(Debug, Clone)]
pub struct SearchContext {
    root_color: Color,
    delta: f64,
    start: Instant,
    /// 生成した子ノードの総数
    pub(crate) move_count: u64,
    /// 生成した子ノードの最大深さ
    pub(crate) max_depth: u32,
}

impl SearchContext {
    pub fn new(root_color: Color, delta: f64) -> Self {
        Self {
            root_color,
            delta,
            start: Instant::now(),
            move_count: 0,
            max_depth: 0,
        }
    }

    #[inline]
    pub fn root_color(&self) -> Color {
        self.root_color
    }

    /// 手番 `side` のノードが max ノードか（ルートと同じ手番か）
    #[inline]
    pub fn is_max_node(&self, side: Color) -> bool {
        side == self.root_color
    }

    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// 探索開始からの経過時間
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn move_count(&self) -> u64 {
        self.move_count
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
