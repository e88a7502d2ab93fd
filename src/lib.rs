//! Bevy TV Cursor
//!
//! A Bevy plugin for remote-control navigation: arrow keys (or any host input
//! written as [`NavigationAction`]) move an on-screen cursor, and "activate"
//! is routed to the first overlapping [`InteractiveTarget`] in priority order
//! or, when nothing is hit, to a synthetic press/release on the
//! [`FallbackSurface`].
//!
//! The plugin never renders or loads anything itself. Outcomes are written as
//! messages ([`TargetActivated`], [`FocusRequested`], [`SyntheticPointer`],
//! [`LoadDestination`], [`GoBack`], [`OrientationChanged`]) for the host to
//! forward to its widgets and content view.

pub mod address;
pub mod container;
pub mod cursor;
pub mod input;
pub mod orientation;
pub mod plugin;
pub mod router;
pub mod settings;
pub mod target;

pub use plugin::{TvCursorPlugin, TvCursorSystems};

pub use address::{AddressBar, AddressSubmitted, LoadDestination, normalize_address};
pub use container::{ContainerLayout, CursorContainer};
pub use cursor::{CursorState, CursorVisual, Direction};
pub use input::{NavigationAction, PointerPhase, SyntheticPointer};
pub use orientation::{OrientationChanged, OrientationMode, ToggleOrientation};
pub use router::{BackUnhandled, FocusRequested, GoBack, TargetActivated};
pub use settings::CursorSettings;
pub use target::{
    BackHistory, FallbackSurface, InteractiveTarget, ScreenBounds, TargetAction,
    TargetCapability,
};
