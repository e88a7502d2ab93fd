use std::time::Duration;

use bevy::prelude::*;
use bevy_tv_cursor::{
    AddressBar, AddressSubmitted, BackHistory, BackUnhandled, ContainerLayout, CursorSettings,
    CursorState, Direction, FallbackSurface, FocusRequested, GoBack, InteractiveTarget,
    LoadDestination, NavigationAction, OrientationChanged, OrientationMode, PointerPhase,
    ScreenBounds, SyntheticPointer, TargetAction, TargetActivated, TvCursorPlugin,
    TvCursorSystems,
};

const CONTAINER: Vec2 = Vec2::new(800.0, 600.0);
const CURSOR: Vec2 = Vec2::new(20.0, 20.0);

#[derive(Resource, Default)]
struct Captured {
    activated: Vec<Entity>,
    focused: Vec<FocusRequested>,
    pointer: Vec<SyntheticPointer>,
    loads: Vec<LoadDestination>,
    go_back: Vec<Entity>,
    back_unhandled: usize,
    orientation: Vec<OrientationMode>,
}

#[allow(clippy::too_many_arguments)]
fn capture(
    mut captured: ResMut<Captured>,
    mut activated: MessageReader<TargetActivated>,
    mut focused: MessageReader<FocusRequested>,
    mut pointer: MessageReader<SyntheticPointer>,
    mut loads: MessageReader<LoadDestination>,
    mut go_back: MessageReader<GoBack>,
    mut back_unhandled: MessageReader<BackUnhandled>,
    mut orientation: MessageReader<OrientationChanged>,
) {
    captured
        .activated
        .extend(activated.read().map(|msg| msg.target));
    captured.focused.extend(focused.read().copied());
    captured.pointer.extend(pointer.read().copied());
    captured.loads.extend(loads.read().cloned());
    captured.go_back.extend(go_back.read().map(|msg| msg.surface));
    captured.back_unhandled += back_unhandled.read().count();
    captured
        .orientation
        .extend(orientation.read().map(|msg| msg.mode));
}

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(TvCursorPlugin {
            settings: CursorSettings {
                step: 40.0,
                cursor_size: CURSOR,
                ..default()
            },
            ..default()
        })
        .init_resource::<Captured>()
        .add_systems(Update, capture.after(TvCursorSystems::Present));
    app
}

fn lay_out(app: &mut App) {
    app.world_mut().write_message(ContainerLayout {
        origin: Vec2::ZERO,
        size: CONTAINER,
    });
    app.update();
}

fn send(app: &mut App, action: NavigationAction) {
    app.world_mut().write_message(action);
    app.update();
}

fn cursor(app: &App) -> Vec2 {
    app.world().resource::<CursorState>().position
}

fn set_cursor(app: &mut App, position: Vec2) {
    app.world_mut().resource_mut::<CursorState>().position = position;
}

fn captured(app: &App) -> &Captured {
    app.world().resource::<Captured>()
}

#[test]
fn first_layout_centers_cursor() {
    let mut app = app();
    app.update();
    assert!(!app.world().resource::<CursorState>().is_placed());

    lay_out(&mut app);
    assert_eq!(cursor(&app), Vec2::new(390.0, 290.0));
}

#[test]
fn moves_before_layout_are_ignored() {
    let mut app = app();
    send(&mut app, NavigationAction::Move(Direction::Right));
    assert_eq!(cursor(&app), Vec2::ZERO);
}

#[test]
fn moves_are_clamped_to_container() {
    let mut app = app();
    lay_out(&mut app);

    for _ in 0..30 {
        send(&mut app, NavigationAction::Move(Direction::Right));
        let position = cursor(&app);
        assert!(position.x <= CONTAINER.x - CURSOR.x);
    }
    assert_eq!(cursor(&app).x, CONTAINER.x - CURSOR.x);

    send(&mut app, NavigationAction::Move(Direction::Left));
    assert_eq!(cursor(&app).x, CONTAINER.x - CURSOR.x - 40.0);
}

#[test]
fn arrow_keys_move_cursor() {
    let mut app = app();
    lay_out(&mut app);
    let start = cursor(&app);

    app.init_resource::<ButtonInput<KeyCode>>();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::ArrowUp);
    app.update();
    assert_eq!(cursor(&app), start + Vec2::new(0.0, -40.0));

    // What InputPlugin does at the start of each frame.
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
    app.update();
    assert_eq!(cursor(&app), start + Vec2::new(0.0, -40.0));
}

#[test]
fn runs_without_keyboard_input_resource() {
    let mut app = app();
    lay_out(&mut app);
    assert!(!app.world().contains_resource::<ButtonInput<KeyCode>>());

    let start = cursor(&app);
    app.update();
    assert_eq!(cursor(&app), start);
}

#[test]
fn actions_in_one_frame_apply_in_delivery_order() {
    let mut app = app();
    lay_out(&mut app);
    app.world_mut()
        .spawn((FallbackSurface, ScreenBounds::new(Vec2::ZERO, CONTAINER)));
    let start = cursor(&app);

    app.world_mut().write_message(NavigationAction::Activate);
    app.world_mut()
        .write_message(NavigationAction::Move(Direction::Left));
    app.world_mut().write_message(NavigationAction::Activate);
    app.update();

    let pointer = &captured(&app).pointer;
    assert_eq!(pointer.len(), 4);
    assert_eq!(pointer[0].position, start + CURSOR / 2.0);
    assert_eq!(
        pointer[2].position,
        start + CURSOR / 2.0 + Vec2::new(-40.0, 0.0)
    );
    assert_eq!(cursor(&app), start + Vec2::new(-40.0, 0.0));
}

#[test]
fn taps_in_one_frame_have_ordered_timestamps() {
    let mut app = app();
    lay_out(&mut app);
    app.world_mut()
        .spawn((FallbackSurface, ScreenBounds::new(Vec2::ZERO, CONTAINER)));

    send(&mut app, NavigationAction::Activate);
    app.world_mut().resource_mut::<Captured>().pointer.clear();
    app.world_mut().write_message(NavigationAction::Activate);
    app.world_mut().write_message(NavigationAction::Activate);
    app.update();

    let pointer = &captured(&app).pointer;
    let phases: Vec<_> = pointer.iter().map(|event| event.phase).collect();
    assert_eq!(
        phases,
        vec![
            PointerPhase::Press,
            PointerPhase::Release,
            PointerPhase::Press,
            PointerPhase::Release,
        ]
    );
    assert!(
        pointer
            .windows(2)
            .all(|pair| pair[0].timestamp < pair[1].timestamp),
        "{pointer:?}"
    );
}

#[test]
fn activation_before_layout_is_ignored() {
    let mut app = app();
    app.world_mut()
        .spawn((FallbackSurface, ScreenBounds::new(Vec2::ZERO, CONTAINER)));
    app.world_mut().spawn((
        InteractiveTarget::clickable(0),
        ScreenBounds::new(Vec2::ZERO, CONTAINER),
    ));

    send(&mut app, NavigationAction::Activate);

    let captured = captured(&app);
    assert!(captured.activated.is_empty());
    assert!(captured.focused.is_empty());
    assert!(captured.pointer.is_empty());
}

#[test]
fn unmeasured_surface_is_skipped_for_measured_one() {
    let mut app = app();
    lay_out(&mut app);
    app.world_mut().spawn((FallbackSurface, ScreenBounds::hidden()));
    let measured = app
        .world_mut()
        .spawn((
            FallbackSurface,
            ScreenBounds::new(Vec2::new(0.0, 60.0), Vec2::new(800.0, 540.0)),
        ))
        .id();
    app.world_mut().spawn((FallbackSurface, ScreenBounds::hidden()));
    set_cursor(&mut app, Vec2::new(100.0, 100.0));

    send(&mut app, NavigationAction::Activate);

    let pointer = &captured(&app).pointer;
    assert_eq!(pointer.len(), 2);
    assert!(pointer.iter().all(|event| event.surface == measured));
    assert_eq!(pointer[0].position, Vec2::new(110.0, 50.0));
}

#[test]
fn smaller_layout_reclamps_cursor() {
    let mut app = app();
    lay_out(&mut app);
    set_cursor(&mut app, Vec2::new(700.0, 500.0));

    app.world_mut().write_message(ContainerLayout {
        origin: Vec2::ZERO,
        size: Vec2::new(300.0, 400.0),
    });
    app.update();
    assert_eq!(cursor(&app), Vec2::new(280.0, 380.0));
}

#[test]
fn activation_on_target_does_not_tap_surface() {
    let mut app = app();
    lay_out(&mut app);
    app.world_mut().spawn((
        FallbackSurface,
        ScreenBounds::new(Vec2::new(0.0, 60.0), Vec2::new(800.0, 540.0)),
    ));
    let button = app
        .world_mut()
        .spawn((
            InteractiveTarget::clickable(0),
            ScreenBounds::new(Vec2::new(700.0, 10.0), Vec2::new(80.0, 40.0)),
        ))
        .id();
    set_cursor(&mut app, Vec2::new(720.0, 20.0));

    send(&mut app, NavigationAction::Activate);

    let captured = captured(&app);
    assert_eq!(captured.activated, vec![button]);
    assert!(captured.pointer.is_empty());
    assert!(captured.focused.is_empty());
}

#[test]
fn activation_on_text_input_requests_focus() {
    let mut app = app();
    lay_out(&mut app);
    let url_bar = app
        .world_mut()
        .spawn((
            InteractiveTarget::text_input(2),
            ScreenBounds::new(Vec2::new(0.0, 10.0), Vec2::new(600.0, 40.0)),
        ))
        .id();
    set_cursor(&mut app, Vec2::new(100.0, 20.0));

    send(&mut app, NavigationAction::Activate);

    assert_eq!(
        captured(&app).focused,
        vec![FocusRequested {
            target: url_bar,
            show_input_method: true,
        }]
    );
    assert!(captured(&app).activated.is_empty());
}

#[test]
fn overlapping_targets_activate_higher_priority_only() {
    let mut app = app();
    lay_out(&mut app);
    app.world_mut().spawn((
        InteractiveTarget::text_input(5),
        ScreenBounds::new(Vec2::ZERO, Vec2::new(400.0, 100.0)),
    ));
    let go = app
        .world_mut()
        .spawn((
            InteractiveTarget::clickable(1),
            ScreenBounds::new(Vec2::new(50.0, 0.0), Vec2::new(100.0, 100.0)),
        ))
        .id();
    set_cursor(&mut app, Vec2::new(60.0, 40.0));

    send(&mut app, NavigationAction::Activate);

    let captured = captured(&app);
    assert_eq!(captured.activated, vec![go]);
    assert!(captured.focused.is_empty());
}

#[test]
fn hidden_target_falls_through_to_surface() {
    let mut app = app();
    lay_out(&mut app);
    app.world_mut()
        .spawn((InteractiveTarget::clickable(0), ScreenBounds::hidden()));
    let surface = app
        .world_mut()
        .spawn((FallbackSurface, ScreenBounds::new(Vec2::ZERO, CONTAINER)))
        .id();
    set_cursor(&mut app, Vec2::new(10.0, 10.0));

    send(&mut app, NavigationAction::Activate);

    let captured = captured(&app);
    assert!(captured.activated.is_empty());
    assert_eq!(captured.pointer.len(), 2);
    assert!(captured.pointer.iter().all(|event| event.surface == surface));
}

#[test]
fn miss_taps_surface_with_press_then_release() {
    let mut app = app();
    lay_out(&mut app);
    app.world_mut().spawn((
        InteractiveTarget::clickable(0),
        ScreenBounds::new(Vec2::new(700.0, 0.0), Vec2::new(100.0, 50.0)),
    ));
    let surface = app
        .world_mut()
        .spawn((
            FallbackSurface,
            ScreenBounds::new(Vec2::new(0.0, 60.0), Vec2::new(800.0, 540.0)),
        ))
        .id();
    set_cursor(&mut app, Vec2::new(300.0, 200.0));

    send(&mut app, NavigationAction::Activate);

    let pointer = &captured(&app).pointer;
    assert_eq!(pointer.len(), 2);
    let (press, release) = (pointer[0], pointer[1]);
    assert_eq!(press.surface, surface);
    assert_eq!(press.phase, PointerPhase::Press);
    assert_eq!(release.phase, PointerPhase::Release);
    assert_eq!(press.position, Vec2::new(310.0, 150.0));
    assert_eq!(release.position, press.position);
    assert!(release.timestamp > press.timestamp);
    assert_eq!(
        release.timestamp - press.timestamp,
        Duration::from_millis(50)
    );
}

#[test]
fn surface_origin_is_read_at_activation_time() {
    let mut app = app();
    lay_out(&mut app);
    let surface = app
        .world_mut()
        .spawn((FallbackSurface, ScreenBounds::new(Vec2::ZERO, CONTAINER)))
        .id();
    set_cursor(&mut app, Vec2::new(100.0, 100.0));
    app.update();

    *app.world_mut().get_mut::<ScreenBounds>(surface).unwrap() =
        ScreenBounds::new(Vec2::new(0.0, 100.0), Vec2::new(800.0, 500.0));
    send(&mut app, NavigationAction::Activate);

    assert_eq!(captured(&app).pointer[0].position, Vec2::new(110.0, 10.0));
}

#[test]
fn activation_without_targets_or_surface_is_a_no_op() {
    let mut app = app();
    lay_out(&mut app);
    send(&mut app, NavigationAction::Activate);

    let captured = captured(&app);
    assert!(captured.activated.is_empty());
    assert!(captured.focused.is_empty());
    assert!(captured.pointer.is_empty());
}

#[test]
fn new_surface_loads_home_and_fills_address_bar() {
    let mut app = app();
    let bar = app.world_mut().spawn(AddressBar::default()).id();
    let surface = app.world_mut().spawn(FallbackSurface).id();
    app.update();

    assert_eq!(
        captured(&app).loads,
        vec![LoadDestination {
            surface,
            url: "https://www.google.com".to_owned(),
        }]
    );
    assert_eq!(
        app.world().get::<AddressBar>(bar).unwrap().text,
        "https://www.google.com"
    );
}

#[test]
fn go_button_submits_address_bar_text() {
    let mut app = app();
    lay_out(&mut app);
    let bar = app
        .world_mut()
        .spawn((
            AddressBar::default(),
            InteractiveTarget::text_input(2),
            ScreenBounds::new(Vec2::new(0.0, 0.0), Vec2::new(600.0, 50.0)),
        ))
        .id();
    app.world_mut().spawn((
        InteractiveTarget::clickable(0),
        TargetAction::SubmitAddress,
        ScreenBounds::new(Vec2::new(600.0, 0.0), Vec2::new(100.0, 50.0)),
    ));
    let surface = app
        .world_mut()
        .spawn((
            FallbackSurface,
            ScreenBounds::new(Vec2::new(0.0, 60.0), Vec2::new(800.0, 540.0)),
        ))
        .id();
    app.update();
    app.world_mut().resource_mut::<Captured>().loads.clear();

    app.world_mut().get_mut::<AddressBar>(bar).unwrap().text = "hello world".to_owned();
    set_cursor(&mut app, Vec2::new(620.0, 10.0));
    send(&mut app, NavigationAction::Activate);

    assert_eq!(
        captured(&app).loads,
        vec![LoadDestination {
            surface,
            url: "https://www.google.com/search?q=hello%20world".to_owned(),
        }]
    );
    assert_eq!(
        app.world().get::<AddressBar>(bar).unwrap().text,
        "https://www.google.com/search?q=hello%20world"
    );
}

#[test]
fn submitted_address_is_normalized() {
    let mut app = app();
    let surface = app.world_mut().spawn(FallbackSurface).id();
    app.update();
    app.world_mut().resource_mut::<Captured>().loads.clear();

    app.world_mut().write_message(AddressSubmitted {
        text: " example.com ".to_owned(),
    });
    app.update();

    assert_eq!(
        captured(&app).loads,
        vec![LoadDestination {
            surface,
            url: "https://example.com".to_owned(),
        }]
    );
}

#[test]
fn back_goes_back_only_with_history() {
    let mut app = app();
    let surface = app
        .world_mut()
        .spawn((FallbackSurface, BackHistory { can_go_back: false }))
        .id();
    send(&mut app, NavigationAction::Back);
    assert_eq!(captured(&app).back_unhandled, 1);
    assert!(captured(&app).go_back.is_empty());

    app.world_mut().get_mut::<BackHistory>(surface).unwrap().can_go_back = true;
    send(&mut app, NavigationAction::Back);
    assert_eq!(captured(&app).go_back, vec![surface]);
    assert_eq!(captured(&app).back_unhandled, 1);
}

#[test]
fn menu_and_toggle_button_flip_orientation_without_moving_cursor() {
    let mut app = app();
    lay_out(&mut app);
    let before = cursor(&app);

    send(&mut app, NavigationAction::Menu);
    assert_eq!(
        *app.world().resource::<OrientationMode>(),
        OrientationMode::Portrait
    );
    assert_eq!(cursor(&app), before);

    app.world_mut().spawn((
        InteractiveTarget::clickable(0),
        TargetAction::ToggleOrientation,
        ScreenBounds::new(Vec2::ZERO, CONTAINER),
    ));
    send(&mut app, NavigationAction::Activate);

    assert_eq!(
        captured(&app).orientation,
        vec![OrientationMode::Portrait, OrientationMode::SensorLandscape]
    );
    assert_eq!(cursor(&app), before);
}
