use bevy::prelude::*;

use crate::{
    AddressSubmitted, BackUnhandled, ContainerLayout, CursorContainer, CursorSettings,
    CursorState, FocusRequested, GoBack, LoadDestination, NavigationAction, OrientationChanged,
    OrientationMode, SyntheticPointer, TargetActivated, ToggleOrientation, address, container,
    cursor, input, orientation, router,
};

/// Adds D-pad cursor navigation and activation routing.
#[derive(Default)]
pub struct TvCursorPlugin {
    pub settings: CursorSettings,
    /// Initial orientation mode.
    pub orientation: OrientationMode,
    /// Use the primary window as the container and reshape it on orientation
    /// changes. When `false` the host writes [`ContainerLayout`] itself.
    pub follow_primary_window: bool,
}

/// Ordered stages of the router, all in `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TvCursorSystems {
    /// Keyboard mapping into [`NavigationAction`].
    Input,
    /// Container layout.
    Navigate,
    /// Moves, activation, back and orientation handling.
    Route,
    /// Address loading and the cursor visual.
    Present,
}

impl Plugin for TvCursorPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings.sanitized())
            .insert_resource(self.orientation)
            .init_resource::<CursorState>()
            .init_resource::<CursorContainer>()
            .init_resource::<Time>()
            .add_message::<NavigationAction>()
            .add_message::<ContainerLayout>()
            .add_message::<TargetActivated>()
            .add_message::<FocusRequested>()
            .add_message::<SyntheticPointer>()
            .add_message::<GoBack>()
            .add_message::<BackUnhandled>()
            .add_message::<ToggleOrientation>()
            .add_message::<OrientationChanged>()
            .add_message::<AddressSubmitted>()
            .add_message::<LoadDestination>()
            .configure_sets(
                Update,
                (
                    TvCursorSystems::Input,
                    TvCursorSystems::Navigate,
                    TvCursorSystems::Route,
                    TvCursorSystems::Present,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                input::read_navigation_keys.in_set(TvCursorSystems::Input),
            )
            .add_systems(
                Update,
                container::apply_container_layout.in_set(TvCursorSystems::Navigate),
            )
            .add_systems(
                Update,
                (
                    router::dispatch_navigation,
                    router::run_target_actions,
                    orientation::toggle_orientation,
                )
                    .chain()
                    .in_set(TvCursorSystems::Route),
            )
            .add_systems(
                Update,
                (
                    address::load_home_on_new_surface,
                    address::submit_address,
                    address::mirror_destination_in_address_bar,
                    cursor::project_cursor_visual,
                )
                    .chain()
                    .in_set(TvCursorSystems::Present),
            );

        if self.follow_primary_window {
            app.init_resource::<container::PrimaryWindowTracker>()
                .add_systems(
                    Update,
                    container::sync_container_from_window
                        .in_set(TvCursorSystems::Input)
                        .after(input::read_navigation_keys),
                )
                .add_systems(
                    Update,
                    orientation::apply_orientation_to_window
                        .in_set(TvCursorSystems::Route)
                        .after(orientation::toggle_orientation),
                );
        }
    }
}
