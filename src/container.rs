use bevy::{
    prelude::*,
    window::{PrimaryWindow, WindowResized},
};

use crate::{CursorSettings, CursorState};

/// Screen region the cursor moves in, in logical coordinates.
///
/// Stays zero-sized until the host reports a layout, either by writing
/// [`ContainerLayout`] or by letting the plugin follow the primary window.
/// Moves and activations are ignored while the size is zero.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorContainer {
    /// Logical top-left of the container on screen.
    pub origin: Vec2,
    pub size: Vec2,
}

impl CursorContainer {
    pub fn set(&mut self, origin: Vec2, size: Vec2) {
        self.origin = origin;
        self.size = size.max(Vec2::ZERO);
    }

    pub fn is_laid_out(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }
}

/// Layout-complete notification for the container.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ContainerLayout {
    pub origin: Vec2,
    pub size: Vec2,
}

/// Applies layouts: the first valid one centers the cursor, later ones re-clamp it.
pub(crate) fn apply_container_layout(
    mut layouts: MessageReader<ContainerLayout>,
    mut container: ResMut<CursorContainer>,
    mut cursor: ResMut<CursorState>,
    settings: Res<CursorSettings>,
) {
    let Some(layout) = layouts.read().last().copied() else {
        return;
    };

    container.set(layout.origin, layout.size);
    if !container.is_laid_out() {
        debug!("Container reported an empty layout {:?}.", layout.size);
        return;
    }

    if cursor.is_placed() {
        cursor.clamp_to(crate::cursor::max_position(
            container.size,
            settings.cursor_size,
        ));
    } else {
        cursor.center_in(container.size, settings.cursor_size);
        info!(
            "Cursor placed at {:?} in a {:?} container.",
            cursor.position, container.size
        );
    }
}

#[derive(Default, Resource)]
pub(crate) struct PrimaryWindowTracker {
    /// Last size reported from the primary window.
    last_size: Option<Vec2>,
}

/// Reports the primary window as the container whenever its size changes.
pub(crate) fn sync_container_from_window(
    mut tracker: ResMut<PrimaryWindowTracker>,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut resized: MessageReader<WindowResized>,
    mut layouts: MessageWriter<ContainerLayout>,
) {
    let Some((window_entity, window)) = windows.iter().next() else {
        return;
    };

    // Prefer the resize event size when present, fall back to the current window size.
    let mut size = Vec2::new(window.width(), window.height());
    for evt in resized.read() {
        if evt.window != window_entity {
            continue;
        }
        size = Vec2::new(evt.width, evt.height);
    }

    if tracker.last_size == Some(size) {
        return;
    }
    tracker.last_size = Some(size);
    layouts.write(ContainerLayout {
        origin: Vec2::ZERO,
        size,
    });
}
