//! Stack of nested clip regions.

use crate::rect::ScreenRect;
use vek::*;


/// Stack of scissor rectangles.
///
/// Every rectangle on the stack is a subset of every rectangle beneath it:
/// a pushed region is intersected with the current top before it is stored,
/// so clipping can only ever narrow as nesting deepens.
#[derive(Debug, Clone, Default)]
pub struct ScissorStack(Vec<ScreenRect>);

impl ScissorStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a region, returning the region actually in effect afterwards.
    ///
    /// The first push is stored as-is. Later pushes store the intersection
    /// with the current top, even if that intersection is empty.
    pub fn push(&mut self, rect: ScreenRect) -> ScreenRect {
        let effective = match self.0.last() {
            Some(top) => rect.intersection(top),
            None => rect,
        };
        trace!(%rect, %effective, depth = self.0.len() + 1, "push scissor");
        self.0.push(effective);
        effective
    }

    /// Pop the top region, returning the new top, or `None` if no scissor
    /// remains in effect.
    ///
    /// Panics if the stack is empty, as that means push and pop calls are
    /// mismatched somewhere.
    pub fn pop(&mut self) -> Option<ScreenRect> {
        if self.0.pop().is_none() {
            panic!("scissor stack underflow: pop without matching push");
        }
        trace!(depth = self.0.len(), "pop scissor");
        self.0.last().copied()
    }

    /// The region currently in effect, if any.
    pub fn current(&self) -> Option<ScreenRect> {
        self.0.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a cursor position survives the current clip. With no scissor
    /// in effect everything does.
    pub fn contains(&self, pos: Vec2<f32>) -> bool {
        self.current().map(|r| r.contains_f(pos)).unwrap_or(true)
    }
}


#[test]
fn test_nested_push_intersects() {
    let mut stack = ScissorStack::new();
    assert_eq!(stack.push(ScreenRect::new(0, 0, 100, 100)), ScreenRect::new(0, 0, 100, 100));
    assert_eq!(stack.push(ScreenRect::new(50, 50, 200, 200)), ScreenRect::new(50, 50, 50, 50));
    assert_eq!(stack.current(), Some(ScreenRect::new(50, 50, 50, 50)));
    assert_eq!(stack.pop(), Some(ScreenRect::new(0, 0, 100, 100)));
    assert_eq!(stack.pop(), None);
    assert!(stack.is_empty());
}

#[test]
fn test_disjoint_push_stays_empty() {
    let mut stack = ScissorStack::new();
    stack.push(ScreenRect::new(0, 0, 10, 10));
    let r = stack.push(ScreenRect::new(20, 20, 10, 10));
    assert!(r.is_empty());
    // anything nested under an empty clip stays empty
    assert!(stack.push(ScreenRect::new(0, 0, 1000, 1000)).is_empty());
    assert!(!stack.contains(Vec2::new(5.0, 5.0)));
}

#[test]
fn test_no_scissor_contains_everything() {
    let stack = ScissorStack::new();
    assert!(stack.contains(Vec2::new(-1000.0, 99999.0)));
}

#[test]
#[should_panic(expected = "scissor stack underflow")]
fn test_pop_empty_panics() {
    ScissorStack::new().pop();
}
