use std::time::Duration;

use evade_core::{
    Aabb, Command, Direction, EntityColor, EntityKind, EntitySnapshot, HeldDirections, Position,
    WindowExtent,
};
use evade_system_player_control::{clamp_to_window, displace, PlayerControl};
use proptest::prelude::*;

const WINDOW: WindowExtent = WindowExtent::new(800.0, 600.0);

fn player_at(x: f32, y: f32) -> EntitySnapshot {
    EntitySnapshot {
        kind: EntityKind::Player,
        bounds: Aabb::from_rect(x, y, 50.0, 50.0),
        speed: 300.0,
        color: EntityColor::from_rgb(255, 50, 50),
    }
}

fn emitted_position(commands: &[Command]) -> Position {
    match commands {
        [Command::MovePlayer { to }] => *to,
        other => panic!("unexpected commands emitted: {other:?}"),
    }
}

#[test]
fn held_keys_move_along_their_axes() {
    let control = PlayerControl;
    let held = HeldDirections::none()
        .with(Direction::Right)
        .with(Direction::Down);
    let mut commands = Vec::new();

    control.handle(
        held,
        &player_at(100.0, 100.0),
        WINDOW,
        Duration::from_millis(100),
        &mut commands,
    );

    let to = emitted_position(&commands);
    assert!((to.x() - 130.0).abs() < 1e-3);
    assert!((to.y() - 130.0).abs() < 1e-3);
}

#[test]
fn opposite_keys_cancel() {
    let held = HeldDirections::from_flags(true, true, true, true);

    let to = displace(
        Position::new(200.0, 200.0),
        held,
        300.0,
        Duration::from_millis(16),
    );

    assert_eq!(to, Position::new(200.0, 200.0));
}

#[test]
fn idle_frame_still_emits_clamped_position() {
    let control = PlayerControl;
    let mut commands = Vec::new();

    control.handle(
        HeldDirections::none(),
        &player_at(780.0, 590.0),
        WINDOW,
        Duration::from_millis(16),
        &mut commands,
    );

    assert_eq!(emitted_position(&commands), Position::new(750.0, 550.0));
}

#[test]
fn shrinking_window_pulls_player_back_inside() {
    let shrunk = WindowExtent::new(320.0, 240.0);

    let to = clamp_to_window(
        Position::new(400.0, 300.0),
        player_at(0.0, 0.0).bounds.size(),
        shrunk,
    );

    assert_eq!(to, Position::new(270.0, 190.0));
}

#[test]
fn large_step_past_top_left_clamps_to_origin() {
    let held = HeldDirections::none()
        .with(Direction::Up)
        .with(Direction::Left);
    let displaced = displace(Position::new(10.0, 10.0), held, 300.0, Duration::from_secs(5));

    let to = clamp_to_window(displaced, player_at(0.0, 0.0).bounds.size(), WINDOW);

    assert_eq!(to, Position::new(0.0, 0.0));
}

fn held_strategy() -> impl Strategy<Value = HeldDirections> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(up, down, left, right)| HeldDirections::from_flags(up, down, left, right))
}

proptest! {
    #[test]
    fn player_always_ends_inside_window(
        x in -5_000.0f32..5_000.0,
        y in -5_000.0f32..5_000.0,
        width in 60.0f32..2_000.0,
        height in 60.0f32..2_000.0,
        held in held_strategy(),
        millis in 0u64..10_000,
    ) {
        let window = WindowExtent::new(width, height);
        let player = player_at(x, y);
        let mut commands = Vec::new();

        PlayerControl.handle(held, &player, window, Duration::from_millis(millis), &mut commands);

        let to = emitted_position(&commands);
        let bounds = player.bounds.with_origin(to);
        prop_assert!(window.bounds().contains(&bounds), "{bounds:?} escaped {window:?}");
    }

    #[test]
    fn idle_player_inside_window_never_moves(
        x in 0.0f32..750.0,
        y in 0.0f32..550.0,
        millis in 0u64..1_000,
    ) {
        let player = player_at(x, y);
        let mut commands = Vec::new();

        PlayerControl.handle(
            HeldDirections::none(),
            &player,
            WINDOW,
            Duration::from_millis(millis),
            &mut commands,
        );

        prop_assert_eq!(emitted_position(&commands), Position::new(x, y));
    }
}
