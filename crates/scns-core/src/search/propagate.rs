//! 子ノードから親ノードへの分布の伝播（minimax 合成）
//!
//! max ノード:
//! - minimax 値より上: 子の証明数の最小値（OR、どれか 1 つの子が証明できればよい）
//! - minimax 値より下: 子の反証数の和（AND、全ての子を反証する必要がある）
//!
//! min ノードでは OR と AND の役割が入れ替わる。

use log::trace;

use super::context::SearchContext;
use crate::distribution::{PD_INF, ValueDistribution};
use crate::position::Position;
use crate::tree::{NodeId, Tree};
use crate::types::{Stair, VALUE_INF};

/// 子ノード `changed` の更新を受けて `id` の minimax 値と分布を再計算する
///
/// `id` の全ての子の分布は最新である必要がある。
pub(crate) fn propagate<P: Position>(
    tree: &mut Tree<P>,
    id: NodeId,
    changed: NodeId,
    ctx: &SearchContext,
) {
    let node = &tree[id];
    debug_assert_eq!(tree[changed].parent, Some(id));

    let is_max = ctx.is_max_node(node.pos.side_to_move());
    let changed_value = tree[changed].dist.minimax_value();
    let current = node.dist.minimax_value();
    let children = &node.children;

    let improving = if is_max {
        changed_value >= current
    } else {
        changed_value <= current
    };
    let minimax = if improving {
        changed_value
    } else {
        // 極値が悪化した可能性があるので全ての子を見直す
        children_extremum(tree, id, is_max).unwrap_or(changed_value)
    };

    let mut dist = ValueDistribution::new();
    dist.set_minimax_value(minimax);
    for e in (minimax + 1)..=VALUE_INF {
        let pns = children.iter().map(|&c| tree[c].dist.pn(e));
        dist.set(e, if is_max { or_number(pns) } else { and_number(pns) });
    }
    for e in -VALUE_INF..minimax {
        let dns = children.iter().map(|&c| tree[c].dist.dn(e));
        dist.set(e, if is_max { and_number(dns) } else { or_number(dns) });
    }

    let node = &mut tree[id];
    node.dist = dist;
    node.visits += 1;
    trace!(
        "{} x = {} {}",
        if is_max { "max" } else { "min" },
        node.x,
        node.dist
    );
    debug_assert!(
        node.dist.check().is_ok(),
        "broken distribution after propagation: {:?}",
        node.dist.check()
    );
}

/// 子ノード `from` から親をたどってルートまで伝播する
pub(crate) fn propagate_to_root<P: Position>(
    tree: &mut Tree<P>,
    from: NodeId,
    ctx: &SearchContext,
) {
    let mut child = from;
    while let Some(parent) = tree[child].parent {
        propagate(tree, parent, child, ctx);
        child = parent;
    }
}

/// OR 合成（最小値）
#[inline]
fn or_number(numbers: impl Iterator<Item = u32>) -> u32 {
    numbers.min().unwrap_or(PD_INF)
}

/// AND 合成（和、`PD_INF` で飽和）
#[inline]
fn and_number(numbers: impl Iterator<Item = u32>) -> u32 {
    numbers.fold(0u32, u32::saturating_add).min(PD_INF)
}

/// 子ノードの minimax 値の極値（max ノードなら最大、min ノードなら最小）
pub(crate) fn children_extremum<P: Position>(
    tree: &Tree<P>,
    id: NodeId,
    is_max: bool,
) -> Option<Stair> {
    let values = tree[id].children.iter().map(|&c| tree[c].dist.minimax_value());
    if is_max { values.max() } else { values.min() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_and_numbers() {
        assert_eq!(or_number([5, 3, 9].into_iter()), 3);
        assert_eq!(or_number(std::iter::empty()), PD_INF);
        assert_eq!(and_number([5, 3, 9].into_iter()), 17);
        assert_eq!(and_number([PD_INF, PD_INF].into_iter()), PD_INF);
        assert_eq!(and_number([u32::MAX, 7].into_iter()), PD_INF);
    }
}
