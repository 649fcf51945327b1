//! Pose transforms applied to everything drawn through a surface.

use crate::rect::ScreenRect;
use vek::*;


/// A 2D affine transform. Is a newtype around a matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2(pub Mat3<f32>);

impl Transform2 {
    /// Identity transform.
    pub fn identity() -> Self {
        Transform2(Mat3::identity())
    }

    /// Translate by `v`.
    pub fn translate<V: Into<Vec2<f32>>>(v: V) -> Self {
        Transform2(Mat3::translation_2d(v))
    }

    /// Component-wise scale by `v`.
    pub fn scale<V: Into<Vec2<f32>>>(v: V) -> Self {
        let v = v.into();
        Transform2(Mat3::scaling_3d([v.x, v.y, 1.0]))
    }

    /// Apply this transformation to a point.
    ///
    /// This maps from widget space to screen space, eg. for rendering.
    pub fn apply<V: Into<Vec2<f32>>>(&self, v: V) -> Vec2<f32> {
        (self.0 * Vec3::from_point_2d(v)).xy()
    }

    /// Attempt to apply this transformation to a point in reverse such
    /// that `a.reverse_apply(a.apply(v)) == v`.
    ///
    /// This maps from screen space to widget space, eg. for cursor
    /// positions. Returns `None` if the transformation is irreversible, such
    /// as scaling by 0.
    pub fn reverse_apply<V: Into<Vec2<f32>>>(&self, v: V) -> Option<Vec2<f32>> {
        if self.0.determinant() != 0.0 {
            let inverted = Mat3::from(Mat4::from(self.0).inverted());
            Some((inverted * Vec3::from_point_2d(v)).xy())
        } else {
            None
        }
    }

    /// Compose with another such that
    /// `b.apply(a.apply(v)) == a.then(b).apply(v)`.
    pub fn then(&self, other: &Self) -> Self {
        Transform2(other.0 * self.0)
    }

    /// Map a rectangle through this transform, producing the pixel-aligned
    /// bounding box of its transformed corners.
    pub fn apply_rect(&self, rect: &ScreenRect) -> ScreenRect {
        if rect.is_empty() {
            return ScreenRect::EMPTY;
        }
        let a = self.apply([rect.left() as f32, rect.top() as f32]);
        let b = self.apply([rect.right() as f32, rect.bottom() as f32]);
        ScreenRect::from_corners(
            [a.x.min(b.x).round() as i32, a.y.min(b.y).round() as i32],
            [a.x.max(b.x).round() as i32, a.y.max(b.y).round() as i32],
        )
    }
}


/// One level of the pose stack: a cumulative transform plus a cumulative
/// z offset.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    pub transform: Transform2,
    pub z: i32,
}

impl Default for Pose {
    fn default() -> Self {
        Pose {
            transform: Transform2::identity(),
            z: 0,
        }
    }
}

/// Stack of cumulative poses. Always has at least one (identity) level.
#[derive(Debug, Clone)]
pub struct PoseStack(Vec<Pose>);

impl Default for PoseStack {
    fn default() -> Self {
        PoseStack(vec![Pose::default()])
    }
}

impl PoseStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Pose {
        // the base level is never popped
        self.0[self.0.len() - 1]
    }

    pub fn push(&mut self) {
        let top = self.current();
        self.0.push(top);
    }

    /// Panics when trying to pop the base level.
    pub fn pop(&mut self) {
        if self.0.len() <= 1 {
            panic!("pose stack underflow: pop without matching push");
        }
        self.0.pop();
    }

    pub fn depth(&self) -> usize {
        self.0.len() - 1
    }

    fn top_mut(&mut self) -> &mut Pose {
        let i = self.0.len() - 1;
        &mut self.0[i]
    }

    /// Pre-compose a translation onto the current level.
    pub fn translate<V: Into<Vec2<f32>>>(&mut self, v: V) {
        let top = self.top_mut();
        top.transform = Transform2::translate(v).then(&top.transform);
    }

    /// Pre-compose a scale onto the current level.
    pub fn scale<V: Into<Vec2<f32>>>(&mut self, v: V) {
        let top = self.top_mut();
        top.transform = Transform2::scale(v).then(&top.transform);
    }

    /// Raise (or lower) the z order of everything drawn at this level.
    pub fn translate_z(&mut self, dz: i32) {
        self.top_mut().z += dz;
    }
}


#[test]
fn test_reverse_apply_round_trip() {
    let t = Transform2::translate([10.0, -4.0])
        .then(&Transform2::scale([2.0, 0.5]));
    let v = Vec2::new(3.0, 7.0);
    let back = t.reverse_apply(t.apply(v)).unwrap();
    assert!((back - v).magnitude() < 0.0001);
}

#[test]
fn test_pose_stack_nesting() {
    let mut stack = PoseStack::new();
    stack.push();
    stack.translate([5.0, 5.0]);
    stack.push();
    stack.translate([1.0, 2.0]);
    stack.translate_z(100);
    let r = stack.current().transform.apply_rect(&ScreenRect::new(0, 0, 10, 10));
    assert_eq!(r, ScreenRect::new(6, 7, 10, 10));
    assert_eq!(stack.current().z, 100);
    stack.pop();
    assert_eq!(stack.current().z, 0);
    let r = stack.current().transform.apply_rect(&ScreenRect::new(0, 0, 10, 10));
    assert_eq!(r, ScreenRect::new(5, 5, 10, 10));
    stack.pop();
    assert_eq!(stack.depth(), 0);
}
