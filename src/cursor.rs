use bevy::prelude::*;

use crate::{CursorContainer, CursorSettings};

/// One directional press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Offset for a single press of length `step`, in screen space (Y down).
    pub fn delta(self, step: f32) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-step, 0.0),
            Direction::Right => Vec2::new(step, 0.0),
            Direction::Up => Vec2::new(0.0, -step),
            Direction::Down => Vec2::new(0.0, step),
        }
    }
}

/// Cursor top-left anchor, relative to the container origin.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorState {
    pub position: Vec2,
    placed: bool,
}

impl CursorState {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            placed: true,
        }
    }

    /// `false` until the first valid container layout has positioned the cursor.
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Moves one step and clamps each axis to `[0, max]`.
    pub fn step(&mut self, direction: Direction, step: f32, max: Vec2) {
        self.position = (self.position + direction.delta(step)).clamp(Vec2::ZERO, max);
    }

    pub fn clamp_to(&mut self, max: Vec2) {
        self.position = self.position.clamp(Vec2::ZERO, max);
    }

    /// Centers the cursor in a container of `container_size`.
    pub fn center_in(&mut self, container_size: Vec2, cursor_size: Vec2) {
        let max = max_position(container_size, cursor_size);
        self.position = ((container_size - cursor_size) / 2.0).clamp(Vec2::ZERO, max);
        self.placed = true;
    }

    /// Cursor rectangle in screen space.
    pub fn screen_rect(&self, container_origin: Vec2, cursor_size: Vec2) -> Rect {
        let min = container_origin + self.position;
        Rect::from_corners(min, min + cursor_size)
    }
}

/// Largest valid top-left position, never negative on either axis.
pub fn max_position(container_size: Vec2, cursor_size: Vec2) -> Vec2 {
    (container_size - cursor_size).max(Vec2::ZERO)
}

/// Marks entities whose `Transform` mirrors the cursor.
///
/// The translation is the cursor center in a container-centered, Y-up space,
/// which is what a default `Camera2d` sees when it fills the container.
#[derive(Component, Default)]
pub struct CursorVisual;

pub(crate) fn project_cursor_visual(
    cursor: Res<CursorState>,
    container: Res<CursorContainer>,
    settings: Res<CursorSettings>,
    mut visuals: Query<&mut Transform, With<CursorVisual>>,
) {
    if !cursor.is_changed() && !container.is_changed() {
        return;
    }
    let center = cursor.position + settings.cursor_size / 2.0;
    let half = container.size / 2.0;
    for mut transform in &mut visuals {
        transform.translation.x = center.x - half.x;
        transform.translation.y = half.y - center.y;
    }
}
