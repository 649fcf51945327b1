//! Axis-aligned rectangles in GUI pixel space.

use std::fmt::{self, Formatter, Display};
use vek::*;


/// Axis-aligned rectangle in integer GUI pixels, covering the half-open
/// ranges `[x, x + w)` and `[y, y + h)`.
///
/// Width and height are never negative. A rectangle with zero width or zero
/// height is empty: it has no area and contains no point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl ScreenRect {
    /// The canonical empty rectangle, returned by operations which produce
    /// no area.
    pub const EMPTY: ScreenRect = ScreenRect { x: 0, y: 0, w: 0, h: 0 };

    /// Construct, clamping negative extents to zero.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        ScreenRect {
            x,
            y,
            w: w.max(0),
            h: h.max(0),
        }
    }

    /// Construct from a position and size.
    pub fn from_pos_size<P, S>(pos: P, size: S) -> Self
    where
        P: Into<Vec2<i32>>,
        S: Into<Extent2<i32>>,
    {
        let pos = pos.into();
        let size = size.into();
        ScreenRect::new(pos.x, pos.y, size.w, size.h)
    }

    /// Construct from the inclusive top-left and exclusive bottom-right
    /// corners. Inverted corners produce the empty rectangle.
    pub fn from_corners<A, B>(min: A, max: B) -> Self
    where
        A: Into<Vec2<i32>>,
        B: Into<Vec2<i32>>,
    {
        let min = min.into();
        let max = max.into();
        if max.x <= min.x || max.y <= min.y {
            ScreenRect::EMPTY
        } else {
            ScreenRect::new(min.x, min.y, max.x - min.x, max.y - min.y)
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn pos(&self) -> Vec2<i32> {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Extent2<i32> {
        Extent2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2<i32> {
        Vec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Whether the pixel at `p` lies within this rectangle.
    pub fn contains(&self, p: Vec2<i32>) -> bool {
        !self.is_empty()
            && p.x >= self.x
            && p.y >= self.y
            && p.x < self.right()
            && p.y < self.bottom()
    }

    /// Whether a sub-pixel position, such as a cursor position, lies within
    /// this rectangle.
    pub fn contains_f(&self, p: Vec2<f32>) -> bool {
        !self.is_empty()
            && p.x >= self.x as f32
            && p.y >= self.y as f32
            && p.x < self.right() as f32
            && p.y < self.bottom() as f32
    }

    /// The region covered by both rectangles, or `EMPTY` if they do not
    /// overlap.
    pub fn intersection(&self, other: &ScreenRect) -> ScreenRect {
        if self.is_empty() || other.is_empty() {
            return ScreenRect::EMPTY;
        }
        ScreenRect::from_corners(
            [self.x.max(other.x), self.y.max(other.y)],
            [self.right().min(other.right()), self.bottom().min(other.bottom())],
        )
    }

    /// Whether every pixel of self is also in `other`. The empty rectangle is
    /// a subset of everything.
    pub fn is_subset_of(&self, other: &ScreenRect) -> bool {
        self.is_empty()
            || (!other.is_empty()
                && self.x >= other.x
                && self.y >= other.y
                && self.right() <= other.right()
                && self.bottom() <= other.bottom())
    }

    /// Whether the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &ScreenRect) -> bool {
        !self.intersection(other).is_empty()
    }

    /// Move by `v`. Empty rectangles move too, they just stay empty.
    pub fn translate<V: Into<Vec2<i32>>>(&self, v: V) -> ScreenRect {
        let v = v.into();
        ScreenRect::new(self.x + v.x, self.y + v.y, self.w, self.h)
    }

    /// Grow outwards by `n` pixels on every side, or shrink if `n` is
    /// negative.
    pub fn inflate(&self, n: i32) -> ScreenRect {
        ScreenRect::new(self.x - n, self.y - n, self.w + 2 * n, self.h + 2 * n)
    }

    /// Convert to a float vek rect, for backends which want one.
    pub fn to_rect_f32(&self) -> Rect<f32, f32> {
        Rect::new(self.x as f32, self.y as f32, self.w as f32, self.h as f32)
    }
}

impl Display for ScreenRect {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[{},{} {}x{}]", self.x, self.y, self.w, self.h)
    }
}


#[test]
fn test_negative_extent_normalizes() {
    let r = ScreenRect::new(5, 5, -10, 3);
    assert_eq!(r.w, 0);
    assert!(r.is_empty());
    assert!(!r.contains(Vec2::new(5, 5)));
}

#[test]
fn test_intersection_overlap() {
    let a = ScreenRect::new(0, 0, 100, 100);
    let b = ScreenRect::new(50, 50, 200, 200);
    assert_eq!(a.intersection(&b), ScreenRect::new(50, 50, 50, 50));
    assert_eq!(b.intersection(&a), ScreenRect::new(50, 50, 50, 50));
}

#[test]
fn test_intersection_disjoint_is_empty() {
    let a = ScreenRect::new(0, 0, 10, 10);
    let b = ScreenRect::new(10, 0, 10, 10);
    let i = a.intersection(&b);
    assert_eq!(i, ScreenRect::EMPTY);
    assert_eq!(i.area(), 0);
    assert!(!i.contains(Vec2::new(0, 0)));
}

#[test]
fn test_contains_is_half_open() {
    let r = ScreenRect::new(10, 20, 5, 5);
    assert!(r.contains(Vec2::new(10, 20)));
    assert!(r.contains(Vec2::new(14, 24)));
    assert!(!r.contains(Vec2::new(15, 24)));
    assert!(r.contains_f(Vec2::new(14.9, 24.9)));
    assert!(!r.contains_f(Vec2::new(15.0, 20.0)));
}
