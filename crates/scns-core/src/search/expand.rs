//! ノードの展開
//!
//! 合法手ごとに指し手を実行して評価し、すぐに戻す。
//! 各子ノードの評価値は兄弟の最善手との差（後悔）に変換し、
//! 親の累積評価値から max ノードなら引き、min ノードなら足す。

use log::{debug, trace};

use super::context::SearchContext;
use super::propagate::propagate;
use crate::position::{Evaluator, MoveGuard, Position, captured_king};
use crate::tree::{Node, NodeId, Tree};
use crate::types::{Stair, VALUE_INF, clip, value_to_stair};

/// 展開時に子ノード 1 つ分として集めた情報
struct Expanded<P: Position> {
    mv: P::Move,
    pos: P,
    stair: Stair,
}

/// 葉ノード `id` を展開し、子ノードの分布を `id` に伝播する
///
/// 合法手がなければ `id` を終端ノードにする。
/// 展開の前後で `id` の局面は同一に保たれる。
pub(crate) fn expand<P, E>(tree: &mut Tree<P>, id: NodeId, evaluator: &E, ctx: &mut SearchContext)
where
    P: Position,
    E: Evaluator<P>,
{
    debug_assert!(tree[id].is_leaf(), "expanding a node that already has children");

    // 終端ノードは再生成しても合法手がないので、分布だけ初期化し直す
    if tree[id].terminal {
        let node = &mut tree[id];
        node.dist.init_terminal(node.x);
        return;
    }

    let expanded = generate_children(&mut tree[id].pos, evaluator);

    if expanded.is_empty() {
        let node = &mut tree[id];
        node.terminal = true;
        node.dist.init_terminal(node.x);
        debug_assert!(node.dist.check().is_ok(), "{:?}", node.dist.check());
        debug!("terminal node at depth {} (x = {})", node.depth, node.x);
        return;
    }

    // 最善の子の後悔は常に 0
    let best_e = expanded.iter().map(|c| c.stair).max().unwrap_or(-VALUE_INF);
    let is_max = ctx.is_max_node(tree[id].pos.side_to_move());
    let parent_x = tree[id].x;
    let depth = tree[id].depth + 1;

    for Expanded { mv, pos, stair } in expanded {
        let regret = clip(best_e - stair);
        let x = clip(if is_max {
            parent_x - regret
        } else {
            parent_x + regret
        });
        let child = Node::child(mv, pos, id, depth, stair, regret, x, ctx.delta());
        trace!("child {mv} stair = {stair} x = {x} {}", child.dist);
        let cid = tree.push(child);
        tree[id].children.push(cid);
        ctx.move_count += 1;
    }
    ctx.max_depth = ctx.max_depth.max(depth);

    debug!(
        "expanded node at depth {} into {} children (best stair {best_e})",
        depth - 1,
        tree[id].children.len()
    );

    let first = tree[id].children[0];
    propagate(tree, id, first, ctx);
}

/// 合法手を実行・評価・復元して子ノードの材料を集める
fn generate_children<P, E>(pos: &mut P, evaluator: &E) -> Vec<Expanded<P>>
where
    P: Position,
    E: Evaluator<P>,
{
    let mut moves = Vec::new();
    pos.generate_moves(&mut moves);

    let us = pos.side_to_move();
    let mut expanded = Vec::with_capacity(moves.len());
    for mv in moves {
        // 玉を取る手は局面実装の合法性判定の代わりに除外する
        if let Some(owner) = captured_king(pos, mv) {
            trace!(
                "skip {mv}: captures {} king",
                if owner == us { "own" } else { "opponent" }
            );
            continue;
        }
        if !pos.is_pseudo_legal(mv) || !pos.is_legal(mv) {
            trace!("skip {mv}: illegal");
            continue;
        }

        let guard = MoveGuard::new(pos, mv);
        let stair = value_to_stair(evaluator.evaluate(&guard));
        expanded.push(Expanded {
            mv,
            pos: (*guard).clone(),
            stair,
        });
    }
    expanded
}
