//! Pointer picking resources: top-down camera + ground plane
//!
//! Headless stand-in'ы для camera ray construction и scene raycast.
//! Реальный движок подставит свои реализации `ViewCamera` / `SceneRaycast`.

use bevy::math::primitives::InfinitePlane3d;
use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::controller::{SceneRaycast, ViewCamera};

/// Ортографическая камера, смотрящая строго вниз
///
/// Screen space: (0, 0) — левый верхний угол, +x вправо (→ world +X),
/// +y вниз (→ world +Z). Центр viewport'а смотрит на `focus`.
#[derive(Resource, Debug, Clone, Copy)]
pub struct TopDownCamera {
    pub focus: Vec3,
    pub height: f32,
    pub viewport_size: Vec2,
    /// Сколько world метров в одном пикселе
    pub world_units_per_pixel: f32,
}

impl Default for TopDownCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            height: 20.0,
            viewport_size: Vec2::new(1280.0, 720.0),
            world_units_per_pixel: 0.02,
        }
    }
}

impl TopDownCamera {
    /// Обратное преобразование (для демо и тестов): world XZ → screen
    pub fn world_to_viewport(&self, world: Vec3) -> Vec2 {
        let offset = Vec2::new(world.x - self.focus.x, world.z - self.focus.z);
        offset / self.world_units_per_pixel + self.viewport_size / 2.0
    }
}

impl ViewCamera for TopDownCamera {
    fn viewport_to_ray(&self, screen_position: Vec2) -> Option<Ray3d> {
        let inside = screen_position.cmpge(Vec2::ZERO).all()
            && screen_position.cmple(self.viewport_size).all();
        if !inside {
            return None;
        }

        let offset = (screen_position - self.viewport_size / 2.0) * self.world_units_per_pixel;
        let origin = Vec3::new(
            self.focus.x + offset.x,
            self.focus.y + self.height,
            self.focus.z + offset.y,
        );
        Some(Ray3d::new(origin, Dir3::NEG_Y))
    }
}

/// Плоский пол ограниченного размера (walkable область)
#[derive(Resource, Debug, Clone, Copy)]
pub struct GroundPlane {
    pub origin: Vec3,
    /// Half extents по X/Z; за пределами луч ни во что не попадает
    pub half_size: Vec2,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            half_size: Vec2::splat(50.0),
        }
    }
}

impl SceneRaycast for GroundPlane {
    fn cast(&self, ray: Ray3d) -> Option<Vec3> {
        let plane = InfinitePlane3d { normal: Dir3::Y };
        let distance = ray.intersect_plane(self.origin, plane)?;
        let hit = ray.get_point(distance);

        let local = Vec2::new(hit.x - self.origin.x, hit.z - self.origin.z);
        local.abs().cmple(self.half_size).all().then_some(hit)
    }
}
