use bevy::{ecs::system::SystemParam, prelude::*};

use crate::{
    AddressBar, AddressSubmitted, BackHistory, CursorContainer, CursorSettings, CursorState,
    FallbackSurface, InteractiveTarget, NavigationAction, PointerPhase, ScreenBounds,
    SyntheticPointer, TargetAction, ToggleOrientation,
    cursor::max_position,
    hit_test::{Activation, resolve_activation},
    target::collect_candidates,
};

/// A clickable target was tapped through the cursor.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetActivated {
    pub target: Entity,
}

/// A text input was activated and should take focus.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusRequested {
    pub target: Entity,
    /// Ask the host to bring up its on-screen keyboard.
    pub show_input_method: bool,
}

/// Back was pressed while the surface had history.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoBack {
    pub surface: Entity,
}

/// Back was pressed with nothing to go back to; the host decides what happens.
#[derive(Message, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackUnhandled;

/// Outputs of [`dispatch_navigation`].
#[derive(SystemParam)]
pub(crate) struct RouterOutput<'w> {
    activated: MessageWriter<'w, TargetActivated>,
    focus: MessageWriter<'w, FocusRequested>,
    pointer: MessageWriter<'w, SyntheticPointer>,
    go_back: MessageWriter<'w, GoBack>,
    back_unhandled: MessageWriter<'w, BackUnhandled>,
    toggles: MessageWriter<'w, ToggleOrientation>,
}

/// Applies navigation actions one at a time, in delivery order.
///
/// Each activation sees the cursor as left by the actions before it and
/// resolves into exactly one target or surface outcome.
#[allow(clippy::too_many_arguments)]
pub(crate) fn dispatch_navigation(
    mut actions: MessageReader<NavigationAction>,
    mut cursor: ResMut<CursorState>,
    container: Res<CursorContainer>,
    settings: Res<CursorSettings>,
    time: Res<Time>,
    targets: Query<(Entity, &InteractiveTarget, &ScreenBounds)>,
    surfaces: Query<(Entity, &ScreenBounds, &BackHistory), With<FallbackSurface>>,
    mut out: RouterOutput,
) {
    // Later taps in the same frame start after the previous release.
    let mut next_press = time.elapsed();

    for action in actions.read() {
        match *action {
            NavigationAction::Move(direction) => {
                if !container.is_laid_out() {
                    debug!("Ignoring {direction:?} move before the container is laid out.");
                    continue;
                }
                let max = max_position(container.size, settings.cursor_size);
                cursor.step(direction, settings.step, max);
            }
            NavigationAction::Activate => {
                if !container.is_laid_out() {
                    debug!("Ignoring activation before the container is laid out.");
                    continue;
                }
                let cursor_rect = cursor.screen_rect(container.origin, settings.cursor_size);
                // Bounds are read per activation since targets and the surface may have moved.
                let candidates = collect_candidates(targets.iter());
                let fallback = fallback_surface(&surfaces);

                match resolve_activation(cursor_rect, candidates, fallback) {
                    Activation::Focus(target) => {
                        debug!("Focusing text input {target}");
                        out.focus.write(FocusRequested {
                            target,
                            show_input_method: true,
                        });
                    }
                    Activation::Click(target) => {
                        debug!("Activating target {target}");
                        out.activated.write(TargetActivated { target });
                    }
                    Activation::Tap { surface, local } => {
                        let released_at = next_press + settings.tap_duration;
                        debug!("Tapping surface {surface} at {local}");
                        out.pointer.write(SyntheticPointer {
                            surface,
                            phase: PointerPhase::Press,
                            position: local,
                            timestamp: next_press,
                        });
                        out.pointer.write(SyntheticPointer {
                            surface,
                            phase: PointerPhase::Release,
                            position: local,
                            timestamp: released_at,
                        });
                        next_press = released_at + settings.tap_duration;
                    }
                    Activation::Missed => {
                        debug!("Activation hit nothing and there is no fallback surface.");
                    }
                }
            }
            NavigationAction::Back => {
                match surfaces.iter().find(|(_, _, history)| history.can_go_back) {
                    Some((surface, _, _)) => {
                        out.go_back.write(GoBack { surface });
                    }
                    None => {
                        out.back_unhandled.write(BackUnhandled);
                    }
                }
            }
            NavigationAction::Menu => {
                out.toggles.write(ToggleOrientation);
            }
        }
    }
}

fn fallback_surface(
    surfaces: &Query<(Entity, &ScreenBounds, &BackHistory), With<FallbackSurface>>,
) -> Option<(Entity, Vec2)> {
    let mut measured = surfaces
        .iter()
        .filter_map(|(entity, bounds, _)| Some((entity, bounds.origin()?)));
    let first = measured.next()?;
    if measured.next().is_some() {
        warn!("Multiple fallback surfaces found, tapping {}.", first.0);
    }
    Some(first)
}

/// Runs the [`TargetAction`] of activated targets.
pub(crate) fn run_target_actions(
    mut activated: MessageReader<TargetActivated>,
    actions: Query<&TargetAction>,
    bars: Query<&AddressBar>,
    mut submissions: MessageWriter<AddressSubmitted>,
    mut toggles: MessageWriter<ToggleOrientation>,
) {
    for TargetActivated { target } in activated.read() {
        let Ok(action) = actions.get(*target) else {
            continue;
        };
        match action {
            TargetAction::SubmitAddress => {
                let text = bars
                    .iter()
                    .next()
                    .map(|bar| bar.text.clone())
                    .unwrap_or_default();
                submissions.write(AddressSubmitted { text });
            }
            TargetAction::ToggleOrientation => {
                toggles.write(ToggleOrientation);
            }
        }
    }
}
