use std::time::Duration;

use bevy::prelude::*;

use crate::Direction;

/// Remote-control input, in delivery order.
///
/// Written by the keyboard mapping each frame; hosts with their own input
/// source (CEC, gamepad, network remote) can write these directly.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationAction {
    Move(Direction),
    /// Select / center / enter.
    Activate,
    Back,
    /// Toggles the orientation mode.
    Menu,
}

impl NavigationAction {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        let action = match key {
            KeyCode::ArrowLeft => Self::Move(Direction::Left),
            KeyCode::ArrowRight => Self::Move(Direction::Right),
            KeyCode::ArrowUp => Self::Move(Direction::Up),
            KeyCode::ArrowDown => Self::Move(Direction::Down),
            KeyCode::Enter | KeyCode::NumpadEnter => Self::Activate,
            KeyCode::Escape | KeyCode::BrowserBack => Self::Back,
            KeyCode::ContextMenu => Self::Menu,
            _ => return None,
        };
        Some(action)
    }
}

/// Maps newly pressed keys to actions.
///
/// Does nothing without `ButtonInput<KeyCode>`; clearing `just_pressed`
/// between frames is left to `InputPlugin`.
pub(crate) fn read_navigation_keys(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut actions: MessageWriter<NavigationAction>,
) {
    let Some(keys) = keys else {
        return;
    };
    for key in keys.get_just_pressed() {
        if let Some(action) = NavigationAction::from_key(*key) {
            actions.write(action);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Press,
    Release,
}

/// Synthetic pointer event for the fallback surface.
///
/// Emitted in press/release pairs by activation; the release timestamp is
/// always later than the press.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SyntheticPointer {
    pub surface: Entity,
    pub phase: PointerPhase,
    /// Surface-local logical position.
    pub position: Vec2,
    /// App time the event is stamped with.
    pub timestamp: Duration,
}
