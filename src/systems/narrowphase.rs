//! Narrow-phase overlap tests and the per-kind dispatch table.
//!
//! The collider kinds form a closed set. A pair of kinds indexes
//! [`TEST_TABLE`] to find its test; adding a third kind means adding one row
//! and one column there. All tests treat touching boundaries as overlapping.

use nalgebra::Vector2;

use crate::components::collider::Collider;
use crate::entity::ComponentId;
use crate::world::World;

/// Tag of a collider geometry, used to index the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Aabb = 0,
    Circle = 1,
}

impl ShapeKind {
    pub const COUNT: usize = 2;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// World-space extents of a box (Y up, so `top > bottom`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Aabb {
    pub fn from_center(center: Vector2<f32>, half_width: f32, half_height: f32) -> Self {
        Self {
            left: center.x - half_width,
            right: center.x + half_width,
            bottom: center.y - half_height,
            top: center.y + half_height,
        }
    }

    pub fn center(&self) -> Vector2<f32> {
        Vector2::new((self.left + self.right) / 2.0, (self.bottom + self.top) / 2.0)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Point of the box closest to `point` (the point itself when inside).
    pub fn closest_point(&self, point: Vector2<f32>) -> Vector2<f32> {
        Vector2::new(
            point.x.clamp(self.left, self.right),
            point.y.clamp(self.bottom, self.top),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vector2<f32>,
    pub radius: f32,
}

/// Collider geometry resolved into world space for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacedShape {
    Aabb(Aabb),
    Circle(Circle),
}

impl PlacedShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            PlacedShape::Aabb(_) => ShapeKind::Aabb,
            PlacedShape::Circle(_) => ShapeKind::Circle,
        }
    }

    pub fn center(&self) -> Vector2<f32> {
        match self {
            PlacedShape::Aabb(b) => b.center(),
            PlacedShape::Circle(c) => c.center,
        }
    }
}

/// Signature shared by every entry of the dispatch table.
pub type TestFn = fn(&PlacedShape, &PlacedShape) -> bool;

/// Row = kind of the first collider, column = kind of the second.
pub const TEST_TABLE: [[Option<TestFn>; ShapeKind::COUNT]; ShapeKind::COUNT] = [
    [Some(aabb_vs_aabb), Some(aabb_vs_circle)],
    [Some(circle_vs_aabb), Some(circle_vs_circle)],
];

/// Look up the test for a pair of kinds. `None` is a configuration error the
/// caller logs and skips.
pub fn test_function(a: ShapeKind, b: ShapeKind) -> Option<TestFn> {
    TEST_TABLE
        .get(a.index())
        .and_then(|row| row.get(b.index()))
        .copied()
        .flatten()
}

/// Run the dispatched test on two placed shapes.
pub fn overlaps(a: &PlacedShape, b: &PlacedShape) -> Option<bool> {
    test_function(a.kind(), b.kind()).map(|test| test(a, b))
}

pub fn aabb_vs_aabb(a: &PlacedShape, b: &PlacedShape) -> bool {
    match (a, b) {
        (PlacedShape::Aabb(a), PlacedShape::Aabb(b)) => aabbs_overlap(a, b),
        _ => false,
    }
}

pub fn aabb_vs_circle(a: &PlacedShape, b: &PlacedShape) -> bool {
    match (a, b) {
        (PlacedShape::Aabb(a), PlacedShape::Circle(b)) => aabb_touches_circle(a, b),
        _ => false,
    }
}

pub fn circle_vs_aabb(a: &PlacedShape, b: &PlacedShape) -> bool {
    aabb_vs_circle(b, a)
}

pub fn circle_vs_circle(a: &PlacedShape, b: &PlacedShape) -> bool {
    match (a, b) {
        (PlacedShape::Circle(a), PlacedShape::Circle(b)) => circles_touch(a, b),
        _ => false,
    }
}

/// Separating-axis check with inclusive edges.
pub fn aabbs_overlap(a: &Aabb, b: &Aabb) -> bool {
    !(a.left > b.right || a.right < b.left || a.top < b.bottom || a.bottom > b.top)
}

pub fn aabb_touches_circle(aabb: &Aabb, circle: &Circle) -> bool {
    if point_in_aabb(circle.center, aabb) {
        return true;
    }
    point_in_circle(aabb.closest_point(circle.center), circle)
}

pub fn circles_touch(a: &Circle, b: &Circle) -> bool {
    (a.center - b.center).norm() <= a.radius + b.radius
}

pub fn point_in_aabb(point: Vector2<f32>, aabb: &Aabb) -> bool {
    point.x <= aabb.right && point.x >= aabb.left && point.y <= aabb.top && point.y >= aabb.bottom
}

pub fn point_in_circle(point: Vector2<f32>, circle: &Circle) -> bool {
    (circle.center - point).norm_squared() <= circle.radius * circle.radius
}

/// Resolve a registered collider into world space. `None` when the collider
/// is gone, checked out by a running hook, or its owner has no transform.
pub fn placed_shape(world: &World, collider: ComponentId) -> Option<PlacedShape> {
    let owner = world.owner(collider)?;
    let position = world.transform(owner)?.position;
    let collider = world.component::<Collider>(collider)?;
    Some(collider.placed(position))
}
