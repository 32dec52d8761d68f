use glam::Vec2;
use lane_defence_core::{PixelPoint, PointerButton, PointerPress};
use lane_defence_rendering_macroquad::{
    frame_input_from_observations, FrameObservations, ScreenMetrics,
};

#[test]
fn clicks_are_reported_in_logical_pixels() {
    let metrics = ScreenMetrics::fit(1_600.0, 1_120.0);
    let input = frame_input_from_observations(
        &metrics,
        FrameObservations {
            cursor: Vec2::new(20.0, 180.0),
            left_pressed: true,
            right_pressed: true,
            ..FrameObservations::default()
        },
    );

    assert_eq!(
        input.presses,
        vec![
            PointerPress::new(PixelPoint::new(10, 90), PointerButton::Primary),
            PointerPress::new(PixelPoint::new(10, 90), PointerButton::Secondary),
        ]
    );
    assert!(!input.forfeit);
    assert!(!input.quit);
}

#[test]
fn clicks_in_the_letterbox_are_dropped() {
    let metrics = ScreenMetrics::fit(800.0, 760.0);
    let input = frame_input_from_observations(
        &metrics,
        FrameObservations {
            cursor: Vec2::new(400.0, 20.0),
            middle_pressed: true,
            forfeit_pressed: true,
            ..FrameObservations::default()
        },
    );

    assert!(input.presses.is_empty());
    assert!(input.forfeit, "keys do not depend on the cursor");
}

#[test]
fn quit_is_forwarded() {
    let metrics = ScreenMetrics::fit(800.0, 560.0);
    let input = frame_input_from_observations(
        &metrics,
        FrameObservations {
            quit_requested: true,
            ..FrameObservations::default()
        },
    );

    assert!(input.quit);
    assert!(input.presses.is_empty());
}
