//! Hitbox geometry and intersection tests
//!
//! Every collidable entity carries either a circle (centred on the entity) or
//! an axis-aligned rectangle (centred on the entity plus an offset).
//!
//! Two families of tests live here and they deliberately disagree at the
//! edges:
//! - entity vs entity (`intersects`) uses strict comparisons, so shapes that
//!   only touch do not collide
//! - point vs entity (`contains_point`) is inclusive, so a cursor sitting
//!   exactly on the edge counts as "over" the entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Collision shape, positioned relative to its owner's centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Hitbox {
    /// Axis-aligned box; `offset` shifts the box centre away from the owner
    Rect {
        width: f32,
        height: f32,
        offset: Vec2,
    },
    /// Circle centred on the owner
    Circle { radius: f32 },
}

impl Hitbox {
    /// Centred square box with no offset
    pub fn square(side: f32) -> Self {
        Hitbox::Rect {
            width: side,
            height: side,
            offset: Vec2::ZERO,
        }
    }

    pub fn circle(radius: f32) -> Self {
        Hitbox::Circle { radius }
    }

    /// Bounds of a rect hitbox placed at `pos` (`None` for circles)
    pub fn aabb_at(&self, pos: Vec2) -> Option<Aabb> {
        match *self {
            Hitbox::Rect {
                width,
                height,
                offset,
            } => Some(Aabb::new(
                pos.x - width / 2.0 + offset.x,
                pos.y - height / 2.0 + offset.y,
                width,
                height,
            )),
            Hitbox::Circle { .. } => None,
        }
    }
}

/// Axis-aligned box stored as min corner plus extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Inclusive on all four sides
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Strict overlap: boxes sharing only an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Closest point inside the box to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }
}

/// Anything with a position and a hitbox
pub trait Collider {
    fn position(&self) -> Vec2;
    fn hitbox(&self) -> &Hitbox;
}

/// A bare positioned hitbox (used for hit testing without an entity)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub hitbox: Hitbox,
}

impl Body {
    pub fn new(pos: Vec2, hitbox: Hitbox) -> Self {
        Self { pos, hitbox }
    }
}

impl Collider for Body {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn hitbox(&self) -> &Hitbox {
        &self.hitbox
    }
}

/// Bounds of a rect-type collider, `None` for circles
pub fn axis_aligned_bounds<C: Collider + ?Sized>(entity: &C) -> Option<Aabb> {
    entity.hitbox().aabb_at(entity.position())
}

/// Check whether two colliders overlap
pub fn intersects<A, B>(a: &A, b: &B) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    let (pos_a, pos_b) = (a.position(), b.position());

    match (*a.hitbox(), *b.hitbox()) {
        (Hitbox::Circle { radius: ra }, Hitbox::Circle { radius: rb }) => {
            pos_a.distance(pos_b) < ra + rb
        }
        (Hitbox::Circle { radius }, rect @ Hitbox::Rect { .. }) => {
            rect.aabb_at(pos_b)
                .is_some_and(|bounds| circle_overlaps_aabb(pos_a, radius, &bounds))
        }
        (rect @ Hitbox::Rect { .. }, Hitbox::Circle { radius }) => {
            rect.aabb_at(pos_a)
                .is_some_and(|bounds| circle_overlaps_aabb(pos_b, radius, &bounds))
        }
        (rect_a @ Hitbox::Rect { .. }, rect_b @ Hitbox::Rect { .. }) => {
            match (rect_a.aabb_at(pos_a), rect_b.aabb_at(pos_b)) {
                (Some(box_a), Some(box_b)) => box_a.overlaps(&box_b),
                _ => false,
            }
        }
    }
}

/// Check whether a point lies on or inside a collider
pub fn contains_point<C: Collider + ?Sized>(point: Vec2, entity: &C) -> bool {
    match *entity.hitbox() {
        Hitbox::Circle { radius } => point.distance(entity.position()) <= radius,
        rect @ Hitbox::Rect { .. } => rect
            .aabb_at(entity.position())
            .is_some_and(|bounds| bounds.contains_point(point)),
    }
}

/// Closest-point test between a circle and a box
fn circle_overlaps_aabb(center: Vec2, radius: f32, bounds: &Aabb) -> bool {
    let closest = bounds.closest_point(center);
    center.distance_squared(closest) < radius * radius
}
