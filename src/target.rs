use bevy::prelude::*;

use crate::hit_test::HitCandidate;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TargetCapability {
    /// Activation focuses the target and requests the on-screen keyboard.
    TextInput,
    /// Activation is a tap.
    #[default]
    Clickable,
}

/// A UI element eligible for direct activation.
///
/// Targets are checked in ascending `priority`, first overlap wins.
/// Entities with the same priority are checked in entity order.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[require(ScreenBounds)]
pub struct InteractiveTarget {
    pub priority: u32,
    pub capability: TargetCapability,
}

impl InteractiveTarget {
    pub fn clickable(priority: u32) -> Self {
        Self {
            priority,
            capability: TargetCapability::Clickable,
        }
    }

    pub fn text_input(priority: u32) -> Self {
        Self {
            priority,
            capability: TargetCapability::TextInput,
        }
    }
}

/// Current visible rectangle in logical screen coordinates.
///
/// Kept up to date by the host's layout pass. `None` (or an empty rect) means
/// the element is hidden or unmeasurable and never matches.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenBounds(pub Option<Rect>);

impl ScreenBounds {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self(Some(Rect::from_corners(origin, origin + size)))
    }

    pub fn hidden() -> Self {
        Self(None)
    }

    /// Top-left corner, when measured.
    pub fn origin(&self) -> Option<Vec2> {
        self.0.map(|rect| rect.min)
    }
}

/// The content surface that receives synthetic taps when no target is hit.
#[derive(Component, Clone, Copy, Debug, Default)]
#[require(ScreenBounds, BackHistory)]
pub struct FallbackSurface;

/// Whether the surface can navigate back, maintained by the host.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackHistory {
    pub can_go_back: bool,
}

/// Built-in behavior for a clickable target, run when it is activated.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetAction {
    /// Submits the address bar text to the fallback surface.
    SubmitAddress,
    ToggleOrientation,
}

/// Snapshot of every target's bounds, sorted by priority then entity.
pub(crate) fn collect_candidates<'a>(
    targets: impl IntoIterator<Item = (Entity, &'a InteractiveTarget, &'a ScreenBounds)>,
) -> Vec<HitCandidate<Entity>> {
    let mut ranked: Vec<_> = targets
        .into_iter()
        .map(|(entity, target, bounds)| {
            (
                target.priority,
                HitCandidate {
                    id: entity,
                    bounds: bounds.0,
                    capability: target.capability,
                },
            )
        })
        .collect();
    ranked.sort_by_key(|(priority, candidate)| (*priority, candidate.id));
    ranked.into_iter().map(|(_, candidate)| candidate).collect()
}
