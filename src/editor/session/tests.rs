use super::*;
use crate::map::Marker;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn two_markers() -> MarkerMap {
    MarkerMap::from_markers(vec![
        Marker::planar(0, 0.0, 0.0, 0.18),
        Marker::planar(1, 1.0, 0.0, 0.18),
    ])
}

fn session_with_box() -> (EditSession, ObstacleStore) {
    let mut obstacles = ObstacleStore::default();
    obstacles.place(ObstacleKind::Box, Vec2::new(2.0, 2.0));
    (EditSession::default(), obstacles)
}

#[test]
fn test_starts_idle() {
    let session = EditSession::default();
    assert_eq!(session.phase(), EditPhase::Idle);
    assert!(!session.placement_mode());
    assert_eq!(session.obstacle_kind(), ObstacleKind::Box);
    assert_eq!(session.drag_mode(), DragMode::None);
}

#[test]
fn test_placement_places_default_box() {
    let mut session = EditSession::default();
    let mut obstacles = ObstacleStore::default();
    session.toggle_placement_mode();
    assert_eq!(session.phase(), EditPhase::Placing);

    let outcome = session.pointer_down(Vec2::new(2.0, 2.0), &mut obstacles, &MarkerMap::default());
    assert_eq!(outcome, PointerDownOutcome::Placed { index: 0 });
    assert_eq!(
        obstacles.get(0),
        Some(&Obstacle::Box {
            position: Vec2::new(2.0, 2.0),
            size: 0.6
        })
    );
    // Placement never selects
    assert_eq!(session.selected_obstacle(), None);
    assert_eq!(session.phase(), EditPhase::Placing);
}

#[test]
fn test_placement_uses_current_kind() {
    let mut session = EditSession::default();
    let mut obstacles = ObstacleStore::default();
    session.set_obstacle_kind(ObstacleKind::Flag);
    session.toggle_placement_mode();
    session.pointer_down(Vec2::ZERO, &mut obstacles, &MarkerMap::default());
    assert_eq!(obstacles.get(0).map(|o| o.kind()), Some(ObstacleKind::Flag));
}

#[test]
fn test_toggle_placement_clears_selection() {
    let (mut session, mut obstacles) = session_with_box();
    session.pointer_down(Vec2::new(2.0, 2.0), &mut obstacles, &MarkerMap::default());
    session.pointer_up();
    assert_eq!(session.selected_obstacle(), Some(0));

    session.toggle_placement_mode();
    assert_eq!(session.selected_obstacle(), None);
    session.toggle_placement_mode();
    assert_eq!(session.phase(), EditPhase::Idle);
}

#[test]
fn test_click_body_drags_then_selects() {
    let (mut session, mut obstacles) = session_with_box();
    let outcome = session.pointer_down(Vec2::new(2.1, 2.0), &mut obstacles, &MarkerMap::default());
    assert_eq!(outcome, PointerDownOutcome::DragStarted { index: 0 });
    assert_eq!(session.drag_mode(), DragMode::Move);

    session.pointer_move(Vec2::new(4.0, 1.0), &mut obstacles);
    assert_eq!(obstacles.get(0).map(|o| o.position()), Some(Vec2::new(4.0, 1.0)));

    session.pointer_up();
    assert_eq!(session.phase(), EditPhase::Selected { index: 0 });
}

#[test]
fn test_resize_box_top_right_handle() {
    let (mut session, mut obstacles) = session_with_box();
    session.pointer_down(Vec2::new(2.0, 2.0), &mut obstacles, &MarkerMap::default());
    session.pointer_up();

    let outcome = session.pointer_down(Vec2::new(2.3, 2.3), &mut obstacles, &MarkerMap::default());
    assert_eq!(outcome, PointerDownOutcome::ResizeStarted { index: 0, handle: 0 });
    assert_eq!(session.drag_mode(), DragMode::Resize);

    session.pointer_move(Vec2::new(3.0, 3.0), &mut obstacles);
    session.pointer_up();

    match obstacles.get(0) {
        Some(Obstacle::Box { position, size }) => {
            assert_eq!(*position, Vec2::new(2.0, 2.0));
            // Left edge stays at 1.7
            assert!(approx(*size, 1.3));
        }
        other => panic!("unexpected obstacle: {:?}", other),
    }
    assert_eq!(session.phase(), EditPhase::Selected { index: 0 });
}

#[test]
fn test_resize_ignores_event_granularity() {
    let (mut a, mut first) = session_with_box();
    let (mut b, mut second) = session_with_box();
    for (session, store) in [(&mut a, &mut first), (&mut b, &mut second)] {
        session.pointer_down(Vec2::new(2.0, 2.0), store, &MarkerMap::default());
        session.pointer_up();
        session.pointer_down(Vec2::new(2.3, 2.3), store, &MarkerMap::default());
    }

    a.pointer_move(Vec2::new(3.0, 3.0), &mut first);
    for step in 1..=10 {
        let t = step as f32 / 10.0;
        b.pointer_move(Vec2::new(2.3, 2.3).lerp(Vec2::new(3.0, 3.0), t), &mut second);
    }

    match (first.get(0), second.get(0)) {
        (Some(Obstacle::Box { size: s1, .. }), Some(Obstacle::Box { size: s2, .. })) => {
            assert!(approx(*s1, *s2));
        }
        other => panic!("unexpected obstacles: {:?}", other),
    }
}

#[test]
fn test_resize_flag_enforces_floor() {
    let mut session = EditSession::default();
    let mut obstacles = ObstacleStore::default();
    obstacles.place(ObstacleKind::Flag, Vec2::ZERO);
    session.pointer_down(Vec2::ZERO, &mut obstacles, &MarkerMap::default());
    session.pointer_up();

    session.pointer_down(Vec2::new(0.25, 0.0), &mut obstacles, &MarkerMap::default());
    session.pointer_move(Vec2::new(0.01, 0.0), &mut obstacles);
    assert_eq!(
        obstacles.get(0),
        Some(&Obstacle::Flag {
            position: Vec2::ZERO,
            radius: 0.1
        })
    );
}

#[test]
fn test_handles_only_grab_for_selected_obstacle() {
    let (mut session, mut obstacles) = session_with_box();
    // (2.3, 2.3) is the corner of an unselected box: a body hit, not a resize
    let outcome = session.pointer_down(Vec2::new(2.3, 2.3), &mut obstacles, &MarkerMap::default());
    assert_eq!(outcome, PointerDownOutcome::DragStarted { index: 0 });
}

#[test]
fn test_overlap_selects_newest() {
    let mut session = EditSession::default();
    let mut obstacles = ObstacleStore::default();
    obstacles.place(ObstacleKind::Box, Vec2::ZERO);
    obstacles.place(ObstacleKind::Flag, Vec2::ZERO);

    let outcome = session.pointer_down(Vec2::ZERO, &mut obstacles, &MarkerMap::default());
    assert_eq!(outcome, PointerDownOutcome::DragStarted { index: 1 });
}

#[test]
fn test_background_click_clears_obstacle_and_picks_marker() {
    let (mut session, mut obstacles) = session_with_box();
    let markers = two_markers();
    session.pointer_down(Vec2::new(2.0, 2.0), &mut obstacles, &markers);
    session.pointer_up();

    let outcome = session.pointer_down(Vec2::new(1.05, 0.0), &mut obstacles, &markers);
    assert_eq!(outcome, PointerDownOutcome::Background { marker: Some(1) });
    assert_eq!(session.phase(), EditPhase::Idle);
    assert_eq!(session.selected_marker(), Some(1));
}

#[test]
fn test_far_background_click_keeps_marker_selection() {
    let mut session = EditSession::default();
    let mut obstacles = ObstacleStore::default();
    let markers = two_markers();
    session.pointer_down(Vec2::ZERO, &mut obstacles, &markers);
    assert_eq!(session.selected_marker(), Some(0));

    let outcome = session.pointer_down(Vec2::new(5.0, 5.0), &mut obstacles, &markers);
    assert_eq!(outcome, PointerDownOutcome::Background { marker: None });
    assert_eq!(session.selected_marker(), Some(0));
}

#[test]
fn test_delete_key_removes_selected() {
    let (mut session, mut obstacles) = session_with_box();
    obstacles.place(ObstacleKind::Flag, Vec2::new(5.0, 5.0));
    session.pointer_down(Vec2::new(2.0, 2.0), &mut obstacles, &MarkerMap::default());
    session.pointer_up();

    session.key_press(EditKey::Delete, &mut obstacles);
    assert_eq!(obstacles.len(), 1);
    assert_eq!(obstacles.get(0).map(|o| o.kind()), Some(ObstacleKind::Flag));
    assert_eq!(session.phase(), EditPhase::Idle);
}

#[test]
fn test_delete_without_selection_is_noop() {
    let (mut session, mut obstacles) = session_with_box();
    session.key_press(EditKey::Delete, &mut obstacles);
    assert_eq!(obstacles.len(), 1);
}

#[test]
fn test_escape_clears_selection() {
    let (mut session, mut obstacles) = session_with_box();
    session.pointer_down(Vec2::new(2.0, 2.0), &mut obstacles, &MarkerMap::default());
    session.key_press(EditKey::Escape, &mut obstacles);
    assert_eq!(session.phase(), EditPhase::Idle);
    assert_eq!(obstacles.len(), 1);
}

#[test]
fn test_non_finite_pointer_aborts_drag() {
    let (mut session, mut obstacles) = session_with_box();
    session.pointer_down(Vec2::new(2.0, 2.0), &mut obstacles, &MarkerMap::default());
    session.pointer_move(Vec2::new(f32::NAN, 0.0), &mut obstacles);

    assert_eq!(session.phase(), EditPhase::Selected { index: 0 });
    assert_eq!(obstacles.get(0).map(|o| o.position()), Some(Vec2::new(2.0, 2.0)));
}

#[test]
fn test_escape_keeps_placement_mode() {
    let mut session = EditSession::default();
    let mut obstacles = ObstacleStore::default();
    session.toggle_placement_mode();
    session.pointer_down(Vec2::ZERO, &mut obstacles, &MarkerMap::default());

    session.key_press(EditKey::Escape, &mut obstacles);
    assert!(session.placement_mode());
    assert_eq!(session.phase(), EditPhase::Placing);

    session.toggle_placement_mode();
    session.key_press(EditKey::Escape, &mut obstacles);
    assert_eq!(session.phase(), EditPhase::Idle);
}

#[test]
fn test_reset_selection_forgets_marker() {
    let mut session = EditSession::default();
    let mut obstacles = ObstacleStore::default();
    session.pointer_down(Vec2::ZERO, &mut obstacles, &two_markers());
    session.reset_selection();
    assert_eq!(session.selected_marker(), None);
}
