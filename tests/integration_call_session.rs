use std::sync::Arc;
use std::time::Duration;

use term_call::layout::{DragState, LayoutMode, OverlayGeometry, Viewport};
use term_call::media::{MediaToggleState, Participant};
use term_call::overlay::Surface;
use term_call::utils::TestClock;
use term_call::{CallKind, CallOverlay, ContactIdentity, OverlayChange, OverlayConfig};

fn overlay() -> (CallOverlay, Arc<TestClock>) {
    let clock = Arc::new(TestClock::new());
    let overlay =
        CallOverlay::with_clock(OverlayConfig::default(), Viewport::new(120, 40), clock.clone());
    (overlay, clock)
}

#[test]
fn end_call_from_busiest_state_resets_everything() {
    let (mut o, clock) = overlay();
    o.open(CallKind::Video, ContactIdentity::new("Ada Lovelace"));
    clock.advance(Duration::from_secs(3));
    assert_eq!(o.tick(), 3);

    assert_eq!(o.toggle_minimize(), Some(LayoutMode::Minimized));
    assert!(o.toggle_mute());
    assert!(o.toggle_camera());
    let header = o.header_rect().unwrap();
    assert!(o.pointer_down(header.x + 5, header.y + 1));
    assert_eq!(o.take_pointer_capture_change(), Some(true));
    assert!(o.pointer_move(header.x + 9, header.y + 3));
    assert!(o.pointer_capture_held());

    assert!(o.end_call());
    assert!(!o.is_active());
    assert!(!o.timer_running());
    assert_eq!(o.elapsed_secs(), 0);
    assert_eq!(o.mode(), LayoutMode::Expanded);
    assert_eq!(o.media(), MediaToggleState::default());
    assert_eq!(o.geometry(), OverlayGeometry::Uninitialized);
    assert_eq!(o.drag_state(), DragState::Idle);
    assert!(!o.pointer_capture_held());
    assert_eq!(o.take_pointer_capture_change(), Some(false));
    assert!(o.view().is_none());
    assert_eq!(o.drain_changes().last(), Some(&OverlayChange::Ended));

    // Late ticks after the end are ignored.
    clock.advance(Duration::from_secs(5));
    assert_eq!(o.tick(), 0);
    assert_eq!(o.elapsed_secs(), 0);
    assert!(!o.end_call());
}

#[test]
fn reopening_keeps_a_single_timer_source() {
    let (mut o, clock) = overlay();
    o.open(CallKind::Video, ContactIdentity::new("Ada Lovelace"));
    clock.advance(Duration::from_secs(5));
    o.tick();
    assert_eq!(o.formatted_duration(), "0:05");
    o.drain_changes();

    o.open(CallKind::Voice, ContactIdentity::new("Grace Hopper"));
    assert_eq!(
        o.drain_changes(),
        vec![OverlayChange::Ended, OverlayChange::Opened(CallKind::Voice)]
    );
    assert_eq!(o.elapsed_secs(), 0);

    clock.advance(Duration::from_secs(1));
    assert_eq!(o.tick(), 1);
    assert_eq!(o.elapsed_secs(), 1);
    assert_eq!(o.session().unwrap().target.title(), "Grace Hopper");
}

#[test]
fn long_sessions_format_with_hours() {
    let (mut o, clock) = overlay();
    o.open(CallKind::Voice, ContactIdentity::new("Ada Lovelace"));
    clock.advance(Duration::from_secs(3605));
    assert_eq!(o.tick(), 3605);
    assert_eq!(o.formatted_duration(), "1:00:05");
}

#[test]
fn minimize_twice_restores_position_and_mode() {
    let (mut o, _clock) = overlay();
    o.open(CallKind::Video, ContactIdentity::new("Ada Lovelace"));
    let before = o.geometry();
    o.toggle_minimize();
    o.toggle_minimize();
    assert_eq!(o.mode(), LayoutMode::Expanded);
    assert_eq!(o.geometry(), before);
}

#[test]
fn surfaces_follow_kind_mode_and_camera() {
    let (mut o, _clock) = overlay();
    o.open(CallKind::Video, ContactIdentity::new("Ada Lovelace"));
    let view = o.view().unwrap();
    assert_eq!(view.surface, Surface::LocalPreview);
    assert!(view.show_pip);

    o.toggle_camera();
    let view = o.view().unwrap();
    assert_eq!(view.surface, Surface::ContactAvatar);
    assert!(!view.show_pip);

    o.toggle_minimize();
    assert_eq!(o.view().unwrap().surface, Surface::VoiceIndicator);
    o.toggle_camera();
    assert_eq!(o.view().unwrap().surface, Surface::Thumbnails);
}

#[test]
fn group_calls_render_a_grid_and_request_hangups() {
    let (mut o, _clock) = overlay();
    let people = vec![
        Participant::parse_spec("p1", "Ada:video:audio:good").unwrap(),
        Participant::parse_spec("p2", "Grace:muted:poor").unwrap(),
        Participant::parse_spec("p3", "Linus:video").unwrap(),
    ];
    o.open(CallKind::Video, people.clone());
    let view = o.view().unwrap();
    assert_eq!(view.surface, Surface::ParticipantGrid);
    assert_eq!(view.title, "Ada + 2 others");
    let grid = view.grid.unwrap();
    assert_eq!((grid.columns, grid.rows), (2, 2));
    o.drain_changes();

    assert!(o.request_peer_hangup("p2"));
    assert!(!o.request_peer_hangup("nobody"));
    assert_eq!(
        o.drain_changes(),
        vec![OverlayChange::PeerHangupRequested("p2".to_string())]
    );
    // The list belongs to the signaling layer.
    assert_eq!(o.participants(), people.as_slice());

    assert!(o.update_participants(vec![people[0].clone()]));
    assert_eq!(o.participants().len(), 1);
    assert_eq!(o.view().unwrap().title, "Ada");
}
