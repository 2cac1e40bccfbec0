use scrollspy::{IntersectionSource, LayoutResult, Rect, ViewportObserver};

fn create_layout(elements: &[(&str, Rect)]) -> LayoutResult {
    let mut layout = LayoutResult::new();
    for (id, rect) in elements {
        layout.insert(id.to_string(), *rect);
    }
    layout
}

/// Viewport at the given scroll offset, 80x24.
fn viewport(offset_y: u16) -> Rect {
    Rect::new(0, offset_y, 80, 24)
}

// ============================================================================
// Initial delivery and change-only batching
// ============================================================================

#[test]
fn test_initial_entry_delivered_for_new_target() {
    let mut observer = ViewportObserver::new();
    observer.observe("a");
    let layout = create_layout(&[("a", Rect::new(0, 0, 80, 5))]);

    let batch = observer.update(&layout, viewport(0), 16.0);

    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].target, "a");
    assert!(batch[0].is_intersecting);
    assert_eq!(batch[0].bounding, Rect::new(0, 0, 80, 5));
    assert_eq!(batch[0].time, 16.0);
}

#[test]
fn test_initial_entry_even_when_offscreen() {
    let mut observer = ViewportObserver::new();
    observer.observe("far");
    let layout = create_layout(&[("far", Rect::new(0, 500, 80, 5))]);

    let batch = observer.update(&layout, viewport(0), 0.0);

    assert_eq!(batch.len(), 1);
    assert!(!batch[0].is_intersecting);
}

#[test]
fn test_unchanged_state_produces_no_entries() {
    let mut observer = ViewportObserver::new();
    observer.observe("a");
    let layout = create_layout(&[("a", Rect::new(0, 0, 80, 5))]);

    observer.update(&layout, viewport(0), 0.0);
    let batch = observer.update(&layout, viewport(0), 16.0);

    assert!(batch.is_empty());
}

#[test]
fn test_enter_and_leave_produce_one_entry_each() {
    let mut observer = ViewportObserver::new();
    observer.observe("a");
    let layout = create_layout(&[("a", Rect::new(0, 30, 80, 5))]);

    // Below the fold at first.
    let batch = observer.update(&layout, viewport(0), 0.0);
    assert!(!batch[0].is_intersecting);

    // Scrolled into view.
    let batch = observer.update(&layout, viewport(20), 10.0);
    assert_eq!(batch.len(), 1);
    assert!(batch[0].is_intersecting);

    // Scrolled past it.
    let batch = observer.update(&layout, viewport(40), 20.0);
    assert_eq!(batch.len(), 1);
    assert!(!batch[0].is_intersecting);

    // And it stays out: no more entries.
    assert!(observer.update(&layout, viewport(60), 30.0).is_empty());
}

#[test]
fn test_batch_holds_all_changes_in_observation_order() {
    let mut observer = ViewportObserver::new();
    observer.observe("a");
    observer.observe("b");
    let layout = create_layout(&[
        ("a", Rect::new(0, 0, 80, 5)),
        ("b", Rect::new(0, 10, 80, 5)),
    ]);

    let batch = observer.update(&layout, viewport(0), 0.0);

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].target, "a");
    assert_eq!(batch[1].target, "b");
}

// ============================================================================
// Zero-threshold overlap semantics
// ============================================================================

#[test]
fn test_single_row_overlap_intersects() {
    let mut observer = ViewportObserver::new();
    observer.observe("a");
    // Last visible row of a 0..24 viewport.
    let layout = create_layout(&[("a", Rect::new(0, 23, 80, 10))]);

    let batch = observer.update(&layout, viewport(0), 0.0);
    assert!(batch[0].is_intersecting);
}

#[test]
fn test_edge_touching_rect_does_not_intersect() {
    let mut observer = ViewportObserver::new();
    observer.observe("a");
    // Starts exactly at the viewport's bottom edge.
    let layout = create_layout(&[("a", Rect::new(0, 24, 80, 10))]);

    let batch = observer.update(&layout, viewport(0), 0.0);
    assert!(!batch[0].is_intersecting);
}

#[test]
fn test_zero_size_rect_never_intersects() {
    let mut observer = ViewportObserver::new();
    observer.observe("a");
    let layout = create_layout(&[("a", Rect::new(0, 5, 80, 0))]);

    let batch = observer.update(&layout, viewport(0), 0.0);
    assert!(!batch[0].is_intersecting);
}

// ============================================================================
// Observe / unobserve lifecycle
// ============================================================================

#[test]
fn test_observe_is_deduplicated() {
    let mut observer = ViewportObserver::new();
    observer.observe("a");
    observer.observe("a");
    assert_eq!(observer.len(), 1);

    let layout = create_layout(&[("a", Rect::new(0, 0, 80, 5))]);
    assert_eq!(observer.update(&layout, viewport(0), 0.0).len(), 1);
}

#[test]
fn test_unobserve_stops_entries() {
    let mut observer = ViewportObserver::new();
    observer.observe("a");
    let layout = create_layout(&[("a", Rect::new(0, 0, 80, 5))]);
    observer.update(&layout, viewport(0), 0.0);

    observer.unobserve("a");
    assert!(observer.is_empty());

    // State change after release: nothing delivered.
    assert!(observer.update(&layout, viewport(100), 10.0).is_empty());
}

#[test]
fn test_reobserve_is_a_fresh_initial_observation() {
    let mut observer = ViewportObserver::new();
    observer.observe("a");
    let layout = create_layout(&[("a", Rect::new(0, 0, 80, 5))]);
    observer.update(&layout, viewport(0), 0.0);

    observer.unobserve("a");
    observer.observe("a");

    // Same state as before the release, but the initial entry fires again.
    let batch = observer.update(&layout, viewport(0), 10.0);
    assert_eq!(batch.len(), 1);
    assert!(batch[0].is_intersecting);
}

#[test]
fn test_target_missing_from_layout_is_held_back() {
    let mut observer = ViewportObserver::new();
    observer.observe("ghost");

    let empty = LayoutResult::new();
    assert!(observer.update(&empty, viewport(0), 0.0).is_empty());

    // Once laid out, the initial entry arrives.
    let layout = create_layout(&[("ghost", Rect::new(0, 0, 80, 5))]);
    let batch = observer.update(&layout, viewport(0), 5.0);
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].target, "ghost");
}
