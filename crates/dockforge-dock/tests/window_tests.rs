//! Root window lifecycle and z-ordered hit-testing.

use dockforge_core::geometry::LayoutRect;
use dockforge_core::math::Vec2;
use dockforge_dock::{DockError, DockNodeKind, DockSide, DockView, WindowDescriptor};
use dockforge_test_utils::{Harness, PlatformCall, assert_valid};
use pretty_assertions::assert_eq;

#[test]
fn test_emptied_floating_window_is_destroyed() {
    let mut h = Harness::new(800.0, 600.0);
    let a = h.dock_new("A", h.root, DockSide::AsTab);
    let b = h.ctx.create_view(DockView::new("B"));
    let floating = h
        .ctx
        .undock(&mut h.platform, b, LayoutRect::new(50.0, 50.0, 200.0, 200.0))
        .unwrap();
    let handle = h.ctx.window_of(floating).unwrap();
    assert_eq!(h.ctx.registry().len(), 2);

    let target = h.leaf(a);
    h.ctx
        .dock(&mut h.platform, b, target, DockSide::Bottom, 0)
        .unwrap();

    assert!(h.ctx.node(floating).is_none());
    assert_eq!(h.ctx.registry().len(), 1);
    assert_eq!(h.ctx.registry().root_for(handle), None);
    assert!(h.platform.calls().contains(&PlatformCall::Destroy(handle)));
    assert!(!h.platform.is_open(handle));
    assert_valid(&h.ctx);
}

#[test]
fn test_main_root_is_emptied_not_destroyed() {
    let mut h = Harness::new(800.0, 600.0);
    let a = h.dock_new("A", h.root, DockSide::AsTab);

    h.ctx.remove_view(&mut h.platform, h.root, a).unwrap();

    let root = h.ctx.node(h.root).unwrap();
    assert_eq!(root.kind(), DockNodeKind::None);
    assert!(root.views().is_empty());
    assert!(h.platform.is_open(h.main));
    assert_eq!(h.ctx.main_root(), Some(h.root));
    assert_eq!(h.platform.count_destroys(), 0);

    // The empty root still accepts a dock from any side.
    h.ctx.dock(&mut h.platform, a, h.root, DockSide::Left, 0).unwrap();
    assert_eq!(h.ctx.tabs(h.root), &[a]);
    assert_valid(&h.ctx);
}

#[test]
fn test_delete_root_orphans_views() {
    let mut h = Harness::new(800.0, 600.0);
    let root = h
        .ctx
        .create_root_window(
            &mut h.platform,
            &WindowDescriptor::new("tools", LayoutRect::new(0.0, 0.0, 300.0, 300.0)),
        )
        .unwrap();
    let a = h.dock_new("A", root, DockSide::AsTab);
    let b = h.dock_new("B", h.leaf(a), DockSide::Top);

    h.ctx.delete_root(&mut h.platform, root).unwrap();

    assert_eq!(h.ctx.view_node(a), None);
    assert_eq!(h.ctx.view_node(b), None);
    assert!(h.ctx.view(a).is_some());
    assert_eq!(h.ctx.roots(), vec![h.root]);
    assert_valid(&h.ctx);
}

#[test]
fn test_delete_root_rejects_inner_node() {
    let mut h = Harness::new(800.0, 600.0);
    let a = h.dock_new("A", h.root, DockSide::AsTab);
    h.dock_new("B", h.leaf(a), DockSide::Right);

    let inner = h.leaf(a);
    assert_eq!(
        h.ctx.delete_root(&mut h.platform, inner),
        Err(DockError::NotARoot(inner))
    );
}

#[test]
fn test_top_window_wins_hit_test() {
    let mut h = Harness::new(800.0, 600.0);
    let a = h.dock_new("A", h.root, DockSide::AsTab);
    let b = h.ctx.create_view(DockView::new("B"));
    let floating = h
        .ctx
        .undock(&mut h.platform, b, LayoutRect::new(100.0, 100.0, 200.0, 200.0))
        .unwrap();
    h.layout();

    let overlap = Vec2::new(150.0, 150.0);
    assert_eq!(h.ctx.find_target_node_at(overlap), Some(floating));
    assert_eq!(h.ctx.find_target_node_at(Vec2::new(500.0, 500.0)), Some(h.leaf(a)));

    // Roots are listed bottom-most first.
    assert_eq!(h.ctx.roots(), vec![h.root, floating]);
}

#[test]
fn test_drop_into_other_window_raises_it() {
    let mut h = Harness::new(800.0, 600.0);
    let a = h.dock_new("A", h.root, DockSide::AsTab);
    let b = h.ctx.create_view(DockView::new("B"));
    let floating = h
        .ctx
        .undock(&mut h.platform, b, LayoutRect::new(1000.0, 0.0, 400.0, 300.0))
        .unwrap();
    let c = h.ctx.create_view(DockView::new("C"));
    h.ctx
        .undock(&mut h.platform, c, LayoutRect::new(1500.0, 0.0, 400.0, 300.0))
        .unwrap();
    h.layout();
    let floating_handle = h.ctx.window_of(floating).unwrap();
    assert_ne!(h.ctx.roots().last(), Some(&floating));

    let from = h.tab_center(a);
    h.drag(from, &[(1200.0, 150.0)]);

    assert_eq!(h.ctx.tabs(floating), &[b, a]);
    assert_eq!(h.ctx.roots().last(), Some(&floating));
    assert_eq!(h.platform.focused(), Some(floating_handle));
    assert_eq!(h.ctx.node(h.root).unwrap().kind(), DockNodeKind::None);
    assert_valid(&h.ctx);
}
