//! 探索設定

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::distribution::{self, DEFAULT_DELTA, ValueDistribution};
use crate::types::Stair;

/// 思考時間の既定値（ミリ秒）
pub const DEFAULT_TIME_BUDGET_MS: u64 = 9000;

/// 設定値の検証エラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// 葉ノードの増加率が正の有限値でない
    #[error("delta must be a positive finite number, got {0}")]
    InvalidDelta(f64),
}

/// 評価値ウィンドウ上限（Vmax）の求め方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmaxScan {
    /// +∞ の 1 段だけを判定する（常に +∞）
    #[default]
    Legacy,
    /// +∞ から下向きに走査し、閾値を満たす最大の段
    Descending,
}

impl VmaxScan {
    /// 分布と証明数の閾値から Vmax を求める
    pub fn vmax(self, dist: &ValueDistribution, p: u32) -> Stair {
        match self {
            VmaxScan::Legacy => distribution::vmax_by_def(dist, p),
            VmaxScan::Descending => distribution::vmax_descending(dist, p),
        }
    }
}

/// 探索設定
///
/// 証明数・反証数の閾値は探索中に変化しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// 思考時間（ミリ秒）
    pub time_budget_ms: u64,
    /// 証明数の閾値（Pmax）
    pub p_max: u32,
    /// 反証数の閾値（Dmax）
    pub d_max: u32,
    /// 葉ノードの分布の増加率
    pub delta: f64,
    pub vmax_scan: VmaxScan,
    /// 反復回数の上限（`None` なら時間のみで打ち切る）
    pub max_iterations: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            p_max: 1,
            d_max: 1,
            delta: DEFAULT_DELTA,
            vmax_scan: VmaxScan::Legacy,
            max_iterations: None,
        }
    }
}

impl SearchConfig {
    /// 思考時間
    #[inline]
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// 設定値を検証する
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(ConfigError::InvalidDelta(self.delta));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.time_budget(), Duration::from_millis(9000));
        assert_eq!((config.p_max, config.d_max), (1, 1));
        assert_eq!(config.vmax_scan, VmaxScan::Legacy);
        assert!(config.max_iterations.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_delta() {
        for delta in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let config = SearchConfig {
                delta,
                ..SearchConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidDelta(_))));
        }
    }

    #[test]
    fn test_vmax_scan_dispatch() {
        let dist = ValueDistribution::leaf(0, DEFAULT_DELTA);
        assert_eq!(VmaxScan::Legacy.vmax(&dist, 1), crate::types::VALUE_INF);
        assert_eq!(VmaxScan::Descending.vmax(&dist, 1), 3);
    }
}
