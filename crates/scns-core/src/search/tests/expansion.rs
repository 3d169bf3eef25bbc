//! 展開と伝播のテスト

use super::{ScriptBuilder, ScriptMove, iterations, script_eval};
use crate::distribution::{DEFAULT_DELTA, PD_INF, initial_number};
use crate::position::Position;
use crate::search::Searcher;
use crate::search::context::SearchContext;
use crate::search::expand::expand;
use crate::search::propagate::{children_extremum, propagate_to_root};
use crate::search::select::select_most_proving;
use crate::tree::{NodeId, Tree};
use crate::types::{Color, VALUE_INF};

fn context() -> SearchContext {
    SearchContext::new(Color::Black, DEFAULT_DELTA)
}

#[test]
fn test_king_captures_and_illegal_moves_are_skipped() {
    let mut b = ScriptBuilder::new();
    let legal = b.add(0, 100);
    b.add_illegal(0, 500);
    b.add_king_capture(0, Color::White);
    b.add_king_capture(0, Color::Black);
    let pos = b.build();

    let mut ctx = context();
    let mut tree = Tree::new(pos, ctx.delta());
    expand(&mut tree, NodeId::ROOT, &script_eval, &mut ctx);

    let moves: Vec<_> = tree
        .root()
        .children()
        .iter()
        .filter_map(|&c| tree[c].mv())
        .collect();
    assert_eq!(moves, vec![ScriptMove(legal)]);
    assert_eq!(ctx.move_count(), 1);
}

#[test]
fn test_expansion_restores_position() {
    let mut b = ScriptBuilder::new();
    b.add_uniform(0, 1, 4);
    let pos = b.build();

    let mut ctx = context();
    let mut tree = Tree::new(pos.clone(), ctx.delta());
    expand(&mut tree, NodeId::ROOT, &script_eval, &mut ctx);

    assert_eq!(tree.root().position(), &pos);
    for &c in tree.root().children() {
        let child = &tree[c];
        let mv = child.mv().unwrap();
        assert_eq!(child.position().current(), mv.0);
        assert_eq!(child.position().side_to_move(), Color::White);
        assert_eq!(child.parent(), Some(NodeId::ROOT));
        assert_eq!(child.depth(), 1);
        assert!(child.is_leaf());
    }
}

#[test]
fn test_min_node_adds_regret() {
    // 後手番ノードの子は x に後悔を足す
    let mut b = ScriptBuilder::new();
    let reply = b.add(0, 0);
    b.add(reply, 150);
    b.add(reply, 50);
    let pos = b.build();

    let mut ctx = context();
    let mut tree = Tree::new(pos, ctx.delta());
    expand(&mut tree, NodeId::ROOT, &script_eval, &mut ctx);
    let first = tree.root().children()[0];
    expand(&mut tree, first, &script_eval, &mut ctx);
    propagate_to_root(&mut tree, first, &ctx);

    let xs: Vec<_> = tree[first].children().iter().map(|&c| tree[c].x()).collect();
    assert_eq!(xs, vec![0, 2]);
    // min ノードの minimax 値は子の最小値
    assert_eq!(tree[first].distribution().minimax_value(), 0);
    assert_eq!(tree.root().distribution().minimax_value(), 0);
    assert_eq!(ctx.max_depth(), 2);
}

/// `id` の分布が子の分布から OR/AND 合成した値と一致することを確かめる
fn assert_composed(tree: &Tree<super::ScriptedPosition>, id: NodeId, is_max: bool) {
    let node = &tree[id];
    let v = node.distribution().minimax_value();
    let children = node.children();
    for e in (v + 1)..=VALUE_INF {
        let pns = children.iter().map(|&c| tree[c].distribution().pn(e));
        let expected = if is_max {
            pns.min().unwrap()
        } else {
            pns.fold(0u32, u32::saturating_add).min(PD_INF)
        };
        assert_eq!(node.distribution().at(e), expected, "e = {e}");
    }
    for e in -VALUE_INF..v {
        let dns = children.iter().map(|&c| tree[c].distribution().dn(e));
        let expected = if is_max {
            dns.fold(0u32, u32::saturating_add).min(PD_INF)
        } else {
            dns.min().unwrap()
        };
        assert_eq!(node.distribution().at(e), expected, "e = {e}");
    }
}

#[test]
fn test_max_node_takes_min_pn_above_and_sums_dn_below() {
    let mut b = ScriptBuilder::new();
    b.add(0, 100);
    b.add(0, 0);
    let pos = b.build();

    let mut ctx = context();
    let mut tree = Tree::new(pos, ctx.delta());
    expand(&mut tree, NodeId::ROOT, &script_eval, &mut ctx);

    let xs: Vec<_> = tree.root().children().iter().map(|&c| tree[c].x()).collect();
    assert_eq!(xs, vec![0, -2]);
    let root = tree.root().distribution();
    assert_eq!(root.minimax_value(), 0);
    assert_composed(&tree, NodeId::ROOT, true);

    // 上側は min(n(e), n(e + 2)) = n(e)
    let n = |k| initial_number(k, DEFAULT_DELTA);
    assert_eq!(root.at(1), 1);
    assert_eq!(root.at(10), 4);
    assert_eq!(root.at(10), n(10));
    // 下側は n(-e) + n(-2 - e)
    assert_eq!(root.at(-1), 1);
    assert_eq!(root.at(-3), 2);
    assert_eq!(root.at(-10), 7);
    assert_eq!(root.at(-10), n(10) + n(8));
}

#[test]
fn test_min_node_sums_pn_above_and_takes_min_dn_below() {
    let mut b = ScriptBuilder::new();
    let reply = b.add(0, 0);
    let g1 = b.add(reply, 150);
    let g2 = b.add(reply, 50);
    let pos = b.build();

    let mut ctx = context();
    let mut tree = Tree::new(pos, ctx.delta());
    expand(&mut tree, NodeId::ROOT, &script_eval, &mut ctx);
    let min_node = tree.root().children()[0];
    expand(&mut tree, min_node, &script_eval, &mut ctx);
    propagate_to_root(&mut tree, min_node, &ctx);

    let dist = tree[min_node].distribution().clone();
    assert_eq!(dist.minimax_value(), 0);
    assert_composed(&tree, min_node, false);
    let n = |k| initial_number(k, DEFAULT_DELTA);
    // 上側は n(e) + n(e - 2)（e <= 2 では 2 番目の子の証明数は 0）
    assert_eq!(dist.at(1), 1);
    assert_eq!(dist.at(5), 3);
    assert_eq!(dist.at(10), n(10) + n(8));
    // 下側は min(n(-e), n(2 - e)) = n(-e)
    assert_eq!(dist.at(-10), 4);
    assert_eq!(dist.at(-10), n(10));

    // 孫を両方とも終端にすると上側の和は PD_INF で飽和する
    let grandchildren = tree[min_node].children().to_vec();
    for &g in &grandchildren {
        expand(&mut tree, g, &script_eval, &mut ctx);
        propagate_to_root(&mut tree, g, &ctx);
        assert!(tree[g].is_terminal());
    }
    let moves: Vec<_> = grandchildren.iter().filter_map(|&g| tree[g].mv()).collect();
    assert_eq!(moves, vec![ScriptMove(g1), ScriptMove(g2)]);

    let dist = tree[min_node].distribution();
    assert_eq!(dist.minimax_value(), 0);
    assert_composed(&tree, min_node, false);
    assert_eq!(dist.at(1), PD_INF);
    assert_eq!(dist.at(3), PD_INF);
    assert_eq!(dist.at(VALUE_INF), PD_INF);
    assert_eq!(dist.at(-5), 0);
    assert_eq!(tree.root().distribution().at(1), PD_INF);
    assert_composed(&tree, NodeId::ROOT, true);
}

#[test]
fn test_best_child_has_zero_regret_below_value_range() {
    let mut b = ScriptBuilder::new();
    b.add(0, -5000);
    b.add(0, -5100);
    let pos = b.build();

    let mut ctx = context();
    let mut tree = Tree::new(pos, ctx.delta());
    expand(&mut tree, NodeId::ROOT, &script_eval, &mut ctx);

    let children = tree.root().children();
    let regrets: Vec<_> = children.iter().map(|&c| tree[c].regret()).collect();
    let xs: Vec<_> = children.iter().map(|&c| tree[c].x()).collect();
    assert_eq!(regrets, vec![0, 2]);
    assert_eq!(xs, vec![0, -2]);
}

#[test]
fn test_terminal_leaf_keeps_terminal_distribution() {
    let mut b = ScriptBuilder::new();
    b.add(0, -100);
    let pos = b.build();

    let mut ctx = context();
    let mut tree = Tree::new(pos, ctx.delta());
    expand(&mut tree, NodeId::ROOT, &script_eval, &mut ctx);
    let leaf = tree.root().children()[0];
    for _ in 0..2 {
        expand(&mut tree, leaf, &script_eval, &mut ctx);
        propagate_to_root(&mut tree, leaf, &ctx);
    }

    let node = &tree[leaf];
    assert!(node.is_terminal());
    assert!(node.is_leaf());
    assert_eq!(node.visits(), 0);
    let x = node.x();
    assert_eq!(node.distribution().at(x), 0);
    assert_eq!(node.distribution().at(x + 1), PD_INF);
    assert_eq!(tree.root().visits(), 3);
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_distribution_invariants_hold_on_searched_tree() {
    let mut b = ScriptBuilder::new();
    b.add_uniform(0, 4, 3);
    let pos = b.build();

    let (tree, _) = Searcher::new(iterations(40), script_eval)
        .unwrap()
        .search_tree(&pos);
    let ctx = context();

    for (id, node) in tree.iter() {
        assert!(node.distribution().check().is_ok(), "{id:?}");
        if node.is_leaf() {
            continue;
        }
        let is_max = ctx.is_max_node(node.position().side_to_move());
        assert_eq!(
            Some(node.distribution().minimax_value()),
            children_extremum(&tree, id, is_max),
            "{id:?}"
        );
        assert!(node.visits() >= 1);
        // minimax 値では証明数・反証数ともに 0
        let v = node.distribution().minimax_value();
        assert_eq!(node.distribution().pn(v), 0);
        assert_eq!(node.distribution().dn(v), 0);
    }
}

#[test]
fn test_selection_descends_to_a_leaf() {
    let mut b = ScriptBuilder::new();
    b.add_uniform(0, 3, 2);
    let pos = b.build();

    let mut ctx = context();
    let mut tree = Tree::new(pos, ctx.delta());
    for _ in 0..5 {
        let leaf = select_most_proving(&tree, -VALUE_INF, VALUE_INF, &ctx);
        assert!(tree[leaf].is_leaf());
        expand(&mut tree, leaf, &script_eval, &mut ctx);
        propagate_to_root(&mut tree, leaf, &ctx);
    }
    assert_eq!(tree.root().visits(), 5);
}

#[test]
fn test_moves_to_follows_parent_links() {
    let mut b = ScriptBuilder::new();
    let first = b.add(0, 0);
    let second = b.add(first, 0);
    b.add(second, 0);
    let pos = b.build();

    let (tree, _) = Searcher::new(iterations(3), script_eval)
        .unwrap()
        .search_tree(&pos);
    let (deepest, _) = tree.iter().max_by_key(|(_, n)| n.depth()).unwrap();
    assert_eq!(
        tree.moves_to(deepest),
        vec![ScriptMove(first), ScriptMove(second), ScriptMove(second + 1)]
    );
}
