//! Randomized operation streams checked against the tree invariants.

use dockforge_core::geometry::LayoutRect;
use dockforge_dock::{DockSide, DockView, DockingContext, NodeId, ViewId};
use dockforge_test_utils::{Harness, assert_valid};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create { target: usize, side: DockSide },
    Move { view: usize, target: usize, side: DockSide, index: usize },
    Undock { view: usize },
    Remove { view: usize },
    Destroy { view: usize },
    Select { target: usize, index: usize },
}

fn side() -> impl Strategy<Value = DockSide> {
    prop_oneof![
        Just(DockSide::Left),
        Just(DockSide::Right),
        Just(DockSide::Top),
        Just(DockSide::Bottom),
        Just(DockSide::AsTab),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<usize>(), side()).prop_map(|(target, side)| Op::Create { target, side }),
        3 => (any::<usize>(), any::<usize>(), side(), 0usize..4)
            .prop_map(|(view, target, side, index)| Op::Move { view, target, side, index }),
        1 => any::<usize>().prop_map(|view| Op::Undock { view }),
        1 => any::<usize>().prop_map(|view| Op::Remove { view }),
        1 => any::<usize>().prop_map(|view| Op::Destroy { view }),
        1 => (any::<usize>(), 0usize..4).prop_map(|(target, index)| Op::Select { target, index }),
    ]
}

/// Every leaf of every registered root.
fn leaves(ctx: &DockingContext) -> Vec<NodeId> {
    ctx.roots()
        .into_iter()
        .flat_map(|root| ctx.tree().leaves(root))
        .collect()
}

fn pick<T: Copy>(items: &[T], seed: usize) -> Option<T> {
    (!items.is_empty()).then(|| items[seed % items.len()])
}

fn apply(h: &mut Harness, views: &mut Vec<ViewId>, op: Op) {
    let targets = leaves(&h.ctx);
    let before = h.ctx.save(&h.platform);

    let result = match op {
        Op::Create { target, side } => {
            let Some(target) = pick(&targets, target) else { return };
            let view = h.ctx.create_view(DockView::new(format!("V{}", views.len())));
            views.push(view);
            h.ctx.dock(&mut h.platform, view, target, side, usize::MAX)
        }
        Op::Move { view, target, side, index } => {
            let (Some(view), Some(target)) = (pick(views, view), pick(&targets, target)) else {
                return;
            };
            h.ctx.dock(&mut h.platform, view, target, side, index)
        }
        Op::Undock { view } => {
            let Some(view) = pick(views, view) else { return };
            h.ctx
                .undock(&mut h.platform, view, LayoutRect::new(20.0, 20.0, 240.0, 180.0))
                .map(|_| ())
        }
        Op::Remove { view } => {
            let Some(view) = pick(views, view) else { return };
            let Some(node) = h.ctx.view_node(view) else { return };
            h.ctx.remove_view(&mut h.platform, node, view)
        }
        Op::Destroy { view } => {
            let Some(index) = pick(&(0..views.len()).collect::<Vec<_>>(), view) else {
                return;
            };
            let view = views.swap_remove(index);
            h.ctx.destroy_view(&mut h.platform, view).map(|_| ())
        }
        Op::Select { target, index } => {
            let Some(target) = pick(&targets, target) else { return };
            h.ctx.select_tab(target, index)
        }
    };

    if result.is_err() {
        assert_eq!(h.ctx.save(&h.platform), before, "failed operation changed the tree");
    }
}

fn check_closure(ctx: &DockingContext, views: &[ViewId]) {
    for &view in views {
        let hosts: Vec<_> = ctx
            .tree()
            .nodes()
            .filter(|(_, node)| node.views().contains(&view))
            .map(|(id, _)| id)
            .collect();
        match ctx.view_node(view) {
            Some(node) => assert_eq!(hosts, vec![node]),
            None => assert!(hosts.is_empty()),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_operations_keep_invariants(ops in prop::collection::vec(op(), 1..40)) {
        let mut h = Harness::new(1024.0, 768.0);
        let mut views = Vec::new();

        for op in ops {
            apply(&mut h, &mut views, op);
            assert_valid(&h.ctx);
            check_closure(&h.ctx, &views);
        }

        h.layout();
        assert_eq!(h.ctx.main_root(), Some(h.root));
        prop_assert_eq!(h.platform.window_count(), h.ctx.registry().len());
    }

    #[test]
    fn prop_save_load_is_stable(ops in prop::collection::vec(op(), 1..30)) {
        let mut h = Harness::new(1024.0, 768.0);
        let mut views = Vec::new();
        for op in ops {
            apply(&mut h, &mut views, op);
        }
        h.layout();
        let bytes = h.ctx.save(&h.platform);

        let mut restored = Harness::new(1024.0, 768.0);
        restored.ctx.load(&mut restored.platform, &bytes).unwrap();
        prop_assert_eq!(restored.ctx.save(&restored.platform), bytes);
        assert_valid(&restored.ctx);
    }
}
