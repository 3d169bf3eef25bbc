//! 評価値の段（Stair）
//!
//! 評価関数が返す生の評価値を `STAIR_WIDTH` 刻みで量子化した整数。
//! ノードの値は [-63, 63] に収め、±64（`±VALUE_INF`）は確定負け/確定勝ちを表す。
//! 全ノードの分布は同じ 129 段の定義域を共有する。

use std::ops::RangeInclusive;

/// 評価値の段
pub type Stair = i32;

/// 片側の段数（+∞ を含む）
pub const N_VALUE_STAIRS: i32 = 64;

/// 無限大の段（確定勝ち）。負号を付けたものが確定負け。
pub const VALUE_INF: Stair = N_VALUE_STAIRS;

/// 定義域 [-VALUE_INF, VALUE_INF] の段数
pub const NUM_STAIRS: usize = (N_VALUE_STAIRS * 2 + 1) as usize;

/// 1 段あたりの評価値幅
pub const STAIR_WIDTH: i32 = 50;

/// 生の評価値を段に変換する（床関数による除算、クランプなし）
#[inline]
pub const fn value_to_stair(value: i32) -> Stair {
    value.div_euclid(STAIR_WIDTH)
}

/// 段を [-(N_VALUE_STAIRS - 1), N_VALUE_STAIRS - 1] に飽和させる
#[inline]
pub const fn clip(e: i32) -> Stair {
    if e > N_VALUE_STAIRS - 1 {
        N_VALUE_STAIRS - 1
    } else if e < -N_VALUE_STAIRS + 1 {
        -N_VALUE_STAIRS + 1
    } else {
        e
    }
}

/// -∞ から +∞ までの全ての段
#[inline]
pub const fn stairs() -> RangeInclusive<Stair> {
    -VALUE_INF..=VALUE_INF
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_value_to_stair_floors() {
        assert_eq!(value_to_stair(0), 0);
        assert_eq!(value_to_stair(49), 0);
        assert_eq!(value_to_stair(50), 1);
        assert_eq!(value_to_stair(120), 2);
        // 負値は 0 方向ではなく -∞ 方向に丸める
        assert_eq!(value_to_stair(-1), -1);
        assert_eq!(value_to_stair(-50), -1);
        assert_eq!(value_to_stair(-51), -2);
    }

    #[test]
    fn test_clip_bounds() {
        assert_eq!(clip(0), 0);
        assert_eq!(clip(63), 63);
        assert_eq!(clip(64), 63);
        assert_eq!(clip(-64), -63);
        assert_eq!(clip(i32::MAX), 63);
        assert_eq!(clip(i32::MIN), -63);
    }

    #[test]
    fn test_stairs_domain() {
        assert_eq!(stairs().count(), NUM_STAIRS);
        assert_eq!(*stairs().start(), -VALUE_INF);
        assert_eq!(*stairs().end(), VALUE_INF);
    }

    proptest! {
        #[test]
        fn test_clip_saturates_and_is_idempotent(v in any::<i32>()) {
            let c = clip(v);
            prop_assert!((-63..=63).contains(&c));
            prop_assert_eq!(clip(c), c);
            if (-63..=63).contains(&v) {
                prop_assert_eq!(c, v);
            }
        }
    }
}
