//! 証明数・反証数の分布（ValueDistribution）
//!
//! ノードごとに、全ての段 `e` について「真の値が `e` 以上であることの証明コスト」
//! と「真の値が `e` 以下であることの反証コスト」を 1 本の配列で保持する。
//! `minimax_value` より上側が証明数、下側が反証数として読まれる。
//!
//! 不変条件:
//! - `minimax_value` の位置の値は常に 0
//! - `minimax_value` より上では `e` の増加に対して単調非減少
//! - `minimax_value` より下では `e` の減少に対して単調非減少
//! - 全ての値は `PD_INF` 以下（初期値と AND 合成の和は `PD_INF` で飽和）

use std::fmt;

use crate::types::{NUM_STAIRS, Stair, VALUE_INF, stairs};

/// 証明数・反証数の無限大（到達不能）を表す番兵
pub const PD_INF: u32 = 1_000_000;

/// 葉ノードの初期分布で使う、段の距離あたりの増加率（2 の指数）
pub const DEFAULT_DELTA: f64 = 0.187;

/// 分布の不変条件違反
///
/// 合成ロジックの不具合を示すもので、実行時に回復する対象ではない。
/// `debug_assert!` から参照される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DistributionError {
    /// minimax 値が定義域の外にある
    #[error("invalid minimax value {0}")]
    InvalidMinimax(Stair),

    /// minimax 値の位置が 0 でない
    #[error("number {number} at minimax value {minimax} must be zero")]
    NonZeroAtMinimax { minimax: Stair, number: u32 },

    /// minimax 値より下側の単調性が崩れている
    #[error("non-monotonic lower values at stair {e}")]
    NonMonotonicLower { e: Stair },

    /// minimax 値より上側の単調性が崩れている
    #[error("non-monotonic upper values at stair {e}")]
    NonMonotonicUpper { e: Stair },

    /// `PD_INF` を超える値がある
    #[error("number {number} at stair {e} exceeds PD_INF")]
    Overflow { e: Stair, number: u32 },
}

/// 段ごとの証明数・反証数の分布
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ValueDistribution {
    numbers: [u32; NUM_STAIRS],
    minimax_value: Stair,
}

#[inline]
fn index(e: Stair) -> usize {
    debug_assert!((-VALUE_INF..=VALUE_INF).contains(&e), "stair {e} out of range");
    (e + VALUE_INF) as usize
}

/// minimax 値から `distance` 段離れた値の初期コスト `round(2^(distance * delta))`
///
/// `PD_INF` で飽和させる。
#[inline]
pub fn initial_number(distance: i32, delta: f64) -> u32 {
    let n = (f64::from(distance) * delta).exp2().round();
    if n >= f64::from(PD_INF) {
        PD_INF
    } else {
        n as u32
    }
}

impl ValueDistribution {
    /// 全て 0、minimax 値 0 の分布
    pub const fn new() -> Self {
        Self {
            numbers: [0; NUM_STAIRS],
            minimax_value: 0,
        }
    }

    /// 評価済み・未展開の葉ノードの分布
    pub fn leaf(x: Stair, delta: f64) -> Self {
        let mut dist = Self::new();
        dist.init(x, delta);
        dist
    }

    /// 合法手のない終端ノードの分布
    pub fn terminal(x: Stair) -> Self {
        let mut dist = Self::new();
        dist.init_terminal(x);
        dist
    }

    /// 葉ノードとして初期化する
    ///
    /// `x` から離れるほど指数的に証明（反証）が難しくなる。
    pub fn init(&mut self, x: Stair, delta: f64) {
        self.minimax_value = x;
        for e in stairs() {
            self.numbers[index(e)] = if e == x {
                0
            } else {
                initial_number((e - x).abs(), delta)
            };
        }
    }

    /// 終端ノードとして初期化する
    ///
    /// 値 `x` は確定しており、それ以上の値は証明できない。
    pub fn init_terminal(&mut self, x: Stair) {
        self.minimax_value = x;
        for e in stairs() {
            self.numbers[index(e)] = if e <= x { 0 } else { PD_INF };
        }
    }

    /// 現在の minimax 値
    #[inline]
    pub const fn minimax_value(&self) -> Stair {
        self.minimax_value
    }

    #[inline]
    pub(crate) fn set_minimax_value(&mut self, v: Stair) {
        self.minimax_value = v;
    }

    /// 段 `e` の生の値
    #[inline]
    pub fn at(&self, e: Stair) -> u32 {
        self.numbers[index(e)]
    }

    #[inline]
    pub(crate) fn set(&mut self, e: Stair, number: u32) {
        self.numbers[index(e)] = number;
    }

    /// 証明数: 真の値が `e` 以上であることを示すコスト
    #[inline]
    pub fn pn(&self, e: Stair) -> u32 {
        if e <= self.minimax_value { 0 } else { self.at(e) }
    }

    /// 反証数: 真の値が `e` 以下であることを示すコスト
    #[inline]
    pub fn dn(&self, e: Stair) -> u32 {
        if e >= self.minimax_value { 0 } else { self.at(e) }
    }

    /// 不変条件を検査し、最初に見つかった違反を返す
    pub fn check(&self) -> Result<(), DistributionError> {
        let m = self.minimax_value;
        if !(-VALUE_INF..=VALUE_INF).contains(&m) {
            return Err(DistributionError::InvalidMinimax(m));
        }
        if self.at(m) != 0 {
            return Err(DistributionError::NonZeroAtMinimax {
                minimax: m,
                number: self.at(m),
            });
        }
        for e in -VALUE_INF..m {
            if self.at(e) < self.at(e + 1) {
                return Err(DistributionError::NonMonotonicLower { e });
            }
        }
        for e in m..VALUE_INF {
            if self.at(e) > self.at(e + 1) {
                return Err(DistributionError::NonMonotonicUpper { e });
            }
        }
        if let Some(e) = stairs().find(|&e| self.at(e) > PD_INF) {
            return Err(DistributionError::Overflow {
                e,
                number: self.at(e),
            });
        }
        Ok(())
    }
}

impl Default for ValueDistribution {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValueDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, n) in self.numbers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{n}")?;
        }
        write!(f, "] minimax = {}", self.minimax_value)
    }
}

/// 反証数の閾値 `d` から評価値ウィンドウの下限を求める（定義通りの走査）
///
/// -∞ から上向きに走査し、`dn(e) <= d` となる最小の段を返す。
pub fn vmin_by_def(dist: &ValueDistribution, d: u32) -> Stair {
    if dist.dn(-VALUE_INF) <= d {
        return -VALUE_INF;
    }
    stairs().find(|&e| dist.dn(e) <= d).unwrap_or(-VALUE_INF)
}

/// 証明数の閾値 `p` から評価値ウィンドウの上限を求める
///
/// 走査範囲は +∞ の 1 段だけで、判定に失敗しても +∞ を返す。
/// 結果として常に +∞ になる。下向きに走査する版は [`vmax_descending`]。
pub fn vmax_by_def(dist: &ValueDistribution, p: u32) -> Stair {
    if dist.pn(VALUE_INF) <= p {
        return VALUE_INF;
    }
    (VALUE_INF..=VALUE_INF)
        .rev()
        .find(|&e| dist.pn(e) <= p)
        .unwrap_or(VALUE_INF)
}

/// 証明数の閾値 `p` から評価値ウィンドウの上限を求める（下向き走査）
///
/// +∞ から下向きに走査し、`pn(e) <= p` となる最大の段を返す。
/// `e <= minimax_value` では証明数が 0 なので、見つからないことはない。
pub fn vmax_descending(dist: &ValueDistribution, p: u32) -> Stair {
    stairs().rev().find(|&e| dist.pn(e) <= p).unwrap_or(-VALUE_INF)
}
