use bevy::{prelude::*, window::PrimaryWindow};

/// Screen orientation requested from the host.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrientationMode {
    /// Fixed portrait.
    Portrait,
    /// Landscape, either way up, following the device sensor.
    #[default]
    SensorLandscape,
}

impl OrientationMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Portrait => Self::SensorLandscape,
            Self::SensorLandscape => Self::Portrait,
        }
    }
}

/// Written after every toggle with the newly requested mode.
///
/// The cursor is not moved; the next [`crate::ContainerLayout`] re-clamps it.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrientationChanged {
    pub mode: OrientationMode,
}

/// Toggle request, written for the Menu key and the orientation button.
#[derive(Message, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToggleOrientation;

pub(crate) fn toggle_orientation(
    mut toggles: MessageReader<ToggleOrientation>,
    mut mode: ResMut<OrientationMode>,
    mut changed: MessageWriter<OrientationChanged>,
) {
    for _ in toggles.read() {
        *mode = mode.toggled();
        info!("Orientation set to {:?}", *mode);
        changed.write(OrientationChanged { mode: *mode });
    }
}

/// Reshapes the primary window so its aspect matches the requested mode.
pub(crate) fn apply_orientation_to_window(
    mut changed: MessageReader<OrientationChanged>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Some(request) = changed.read().last().copied() else {
        return;
    };
    let Some(mut window) = windows.iter_mut().next() else {
        warn!("Orientation change requested but there is no primary window.");
        return;
    };

    let (width, height) = (window.width(), window.height());
    let portrait = height >= width;
    let wants_portrait = request.mode == OrientationMode::Portrait;
    if portrait != wants_portrait {
        window.resolution.set(height, width);
    }
}
