//! D-pad cursor demo with an address bar, two buttons and a content area.
//!
//! Arrow keys move, Enter activates, Escape is back, the context-menu key
//! toggles orientation. Activations are printed to the console.
//!
//! `cargo run --example tv_browser -- --step 25`

use bevy::{math::Isometry2d, prelude::*};
use bevy_tv_cursor::{
    AddressBar, ContainerLayout, CursorContainer, CursorSettings, CursorVisual, FallbackSurface,
    FocusRequested, GoBack, InteractiveTarget, LoadDestination, OrientationChanged, ScreenBounds,
    SyntheticPointer, TargetAction, TargetActivated, TvCursorPlugin,
};
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    /// Distance moved per arrow press.
    #[arg(long, default_value_t = 40.0)]
    step: f32,
    /// Cursor width and height.
    #[arg(long, default_value_t = 24.0)]
    cursor: f32,
    /// Page loaded at startup and for empty input.
    #[arg(long, default_value = "https://www.google.com")]
    home: String,
}

const BAR_HEIGHT: f32 = 56.0;

#[derive(Component)]
struct GoButton;

#[derive(Component)]
struct RotateButton;

fn main() {
    let args = Args::parse();

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(TvCursorPlugin {
            settings: CursorSettings {
                step: args.step,
                cursor_size: Vec2::splat(args.cursor),
                home: args.home,
                ..default()
            },
            follow_primary_window: true,
            ..default()
        })
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (layout_widgets, draw_widgets, log_outcomes).after(bevy_tv_cursor::TvCursorSystems::Present),
        )
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
    commands.spawn((
        Sprite::from_color(Color::srgb(1.0, 0.3, 0.3), Vec2::splat(12.0)),
        Transform::from_xyz(0.0, 0.0, 10.0),
        CursorVisual,
    ));

    commands.spawn((AddressBar::default(), InteractiveTarget::text_input(2)));
    commands.spawn((
        GoButton,
        InteractiveTarget::clickable(0),
        TargetAction::SubmitAddress,
    ));
    commands.spawn((
        RotateButton,
        InteractiveTarget::clickable(1),
        TargetAction::ToggleOrientation,
    ));
    commands.spawn(FallbackSurface);
}

/// Lays the widgets out along the top of the window, content below.
fn layout_widgets(
    container: Res<CursorContainer>,
    mut layouts: MessageReader<ContainerLayout>,
    mut widgets: Query<(
        &mut ScreenBounds,
        Has<AddressBar>,
        Has<GoButton>,
        Has<RotateButton>,
        Has<FallbackSurface>,
    )>,
) {
    if layouts.read().count() == 0 && !container.is_changed() {
        return;
    }
    let width = container.size.x;
    let content = (container.size.y - BAR_HEIGHT).max(0.0);
    for (mut bounds, is_bar, is_go, is_rotate, is_surface) in &mut widgets {
        *bounds = if is_bar {
            ScreenBounds::new(Vec2::ZERO, Vec2::new(width - 200.0, BAR_HEIGHT))
        } else if is_go {
            ScreenBounds::new(Vec2::new(width - 200.0, 0.0), Vec2::new(100.0, BAR_HEIGHT))
        } else if is_rotate {
            ScreenBounds::new(Vec2::new(width - 100.0, 0.0), Vec2::new(100.0, BAR_HEIGHT))
        } else if is_surface {
            ScreenBounds::new(Vec2::new(0.0, BAR_HEIGHT), Vec2::new(width, content))
        } else {
            continue;
        };
    }
}

fn draw_widgets(
    mut gizmos: Gizmos,
    container: Res<CursorContainer>,
    widgets: Query<(&ScreenBounds, Has<FallbackSurface>)>,
) {
    let half = container.size / 2.0;
    for (bounds, is_surface) in &widgets {
        let Some(rect) = bounds.0 else {
            continue;
        };
        // Screen space (Y down) to world space (Y up, centered).
        let center = Vec2::new(rect.center().x - half.x, half.y - rect.center().y);
        let color = if is_surface {
            Color::srgb(0.3, 0.3, 0.3)
        } else {
            Color::srgb(0.2, 0.6, 0.9)
        };
        gizmos.rect_2d(Isometry2d::from_translation(center), rect.size(), color);
    }
}

fn log_outcomes(
    bars: Query<&AddressBar>,
    mut activated: MessageReader<TargetActivated>,
    mut focus: MessageReader<FocusRequested>,
    mut pointer: MessageReader<SyntheticPointer>,
    mut loads: MessageReader<LoadDestination>,
    mut go_back: MessageReader<GoBack>,
    mut orientation: MessageReader<OrientationChanged>,
) {
    for msg in activated.read() {
        println!("activated {}", msg.target);
    }
    for msg in focus.read() {
        let text = bars.get(msg.target).map(|bar| bar.text.as_str()).unwrap_or("");
        println!("focus {} (keyboard: {}) text={text:?}", msg.target, msg.show_input_method);
    }
    for msg in pointer.read() {
        println!(
            "{:?} at {} on {} t={:?}",
            msg.phase, msg.position, msg.surface, msg.timestamp
        );
    }
    for msg in loads.read() {
        println!("load {}", msg.url);
    }
    for msg in go_back.read() {
        println!("back on {}", msg.surface);
    }
    for msg in orientation.read() {
        println!("orientation {:?}", msg.mode);
    }
}
