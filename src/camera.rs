use glam::{UVec2, Vec2};

use crate::entity::EntityId;
use crate::geometry::{cell_center, screen_center};

/// Game ticks an eased camera move takes.
pub const EASE_TICKS: u64 = 60;
pub const MIN_ZOOM: f32 = 1.0;

/// What the camera is looking at.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CameraTarget {
    /// A fixed world point; the camera jumps to it.
    Position(Vec2),
    /// A live entity, looked up each tick.
    Entity(EntityId),
    /// An editor cursor cell; the camera aims at the cell center.
    Cursor(UVec2),
}

/// 2D camera: eases toward its target over [`EASE_TICKS`] and maps world
/// pixels to screen pixels with an integer-friendly zoom.
#[derive(Debug, Clone)]
pub struct Camera {
    current: Vec2,
    target: CameraTarget,
    /// Game tick at which the current target was set.
    target_set_at: u64,
    zoom: f32,
}

impl Camera {
    pub fn new(position: Vec2) -> Self {
        Self {
            current: position,
            target: CameraTarget::Position(position),
            target_set_at: 0,
            zoom: MIN_ZOOM,
        }
    }

    pub fn target(&self) -> CameraTarget {
        self.target
    }

    pub fn current_position(&self) -> Vec2 {
        self.current
    }

    pub fn target_position(&mut self, pos: Vec2, tick: u64) {
        self.target = CameraTarget::Position(pos);
        self.target_set_at = tick;
    }

    pub fn target_entity(&mut self, id: EntityId, tick: u64) {
        self.target = CameraTarget::Entity(id);
        self.target_set_at = tick;
    }

    pub fn target_cursor(&mut self, cell: UVec2, tick: u64) {
        self.target = CameraTarget::Cursor(cell);
        self.target_set_at = tick;
    }

    /// Follow a moving editor cursor without restarting the ease. Switches to
    /// a fresh cursor target if the camera was looking at something else.
    pub fn move_cursor(&mut self, cell: UVec2, tick: u64) {
        match &mut self.target {
            CameraTarget::Cursor(c) => *c = cell,
            _ => self.target_cursor(cell, tick),
        }
    }

    /// Advance one game tick. `resolve` maps an entity id to its current
    /// position; a vanished entity leaves the camera where it is.
    pub fn update(&mut self, tick: u64, resolve: impl FnOnce(EntityId) -> Option<Vec2>) {
        let goal = match self.target {
            CameraTarget::Position(p) => {
                self.current = p;
                return;
            }
            CameraTarget::Entity(id) => match resolve(id) {
                Some(p) => p,
                None => return,
            },
            CameraTarget::Cursor(cell) => cell_center(cell),
        };

        let elapsed = tick.saturating_sub(self.target_set_at);
        if elapsed < EASE_TICKS {
            let t = elapsed as f32 / EASE_TICKS as f32;
            self.current += (goal - self.current) * t;
        } else {
            self.current = goal;
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(MIN_ZOOM);
    }

    pub fn zoom_by(&mut self, delta: f32) {
        self.set_zoom(self.zoom + delta);
    }

    /// Screen-space position of a world point.
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        screen_center() - (self.current - p) * self.zoom
    }

    /// World-space position under a screen point.
    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        self.current - (screen_center() - p) / self.zoom
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_never_drops_below_one() {
        let mut cam = Camera::default();
        cam.set_zoom(0.25);
        assert_eq!(cam.zoom(), 1.0);
        cam.zoom_by(3.0);
        cam.zoom_by(-10.0);
        assert_eq!(cam.zoom(), 1.0);
    }

    #[test]
    fn screen_to_world_inverts_world_to_screen() {
        let mut cam = Camera::new(Vec2::new(100.0, 50.0));
        cam.set_zoom(4.0);
        let p = Vec2::new(123.0, 77.0);
        assert_eq!(cam.screen_to_world(cam.world_to_screen(p)), p);
    }
}
