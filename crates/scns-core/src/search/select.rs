//! 最有望ノード（most-proving node）の選択

use super::context::SearchContext;
use crate::position::Position;
use crate::tree::{NodeId, Tree};
use crate::types::Stair;

/// 評価値ウィンドウ `(vmin, vmax)` の下で次に展開する葉ノードを選ぶ
///
/// ルートから、max ノードでは `pn(child, vmax)` が最小の子、
/// min ノードでは `dn(child, vmin)` が最小の子へ降りる。
/// 同値なら生成順で先の子を選ぶ。
pub(crate) fn select_most_proving<P: Position>(
    tree: &Tree<P>,
    vmin: Stair,
    vmax: Stair,
    ctx: &SearchContext,
) -> NodeId {
    let mut id = NodeId::ROOT;
    loop {
        let node = &tree[id];
        let is_max = ctx.is_max_node(node.pos.side_to_move());
        // min_by_key は同値なら最初の要素を返す
        let chosen = node.children.iter().copied().min_by_key(|&c| {
            let dist = &tree[c].dist;
            if is_max { dist.pn(vmax) } else { dist.dn(vmin) }
        });
        match chosen {
            Some(child) => id = child,
            None => return id,
        }
    }
}
