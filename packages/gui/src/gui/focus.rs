//! Focus paths and focus navigation.
//!
//! Which widget has keyboard focus is recorded at every level of the tree:
//! each container knows which of its children holds focus, and the leaf
//! knows it is focused. A `FocusPath` names one such chain from some widget
//! down to a leaf, so moving focus is a matter of clearing the old path and
//! applying the new one.

use crate::gui::widget::Widget;


/// Chain of child indices from a widget down to a focused leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FocusPath {
    /// The widget itself.
    Leaf,
    /// The child at `index`, and then `path` within it.
    Child {
        index: usize,
        path: Box<FocusPath>,
    },
}

impl FocusPath {
    pub fn child(index: usize, path: FocusPath) -> Self {
        FocusPath::Child {
            index,
            path: Box::new(path),
        }
    }

    /// Path from a list-like widget to one of its entries.
    pub fn entry(index: usize) -> Self {
        FocusPath::child(index, FocusPath::Leaf)
    }

    /// The child indices along the path, outermost first.
    pub fn indices(&self) -> Vec<usize> {
        let mut indices = Vec::new();
        let mut path = self;
        while let &FocusPath::Child { index, path: ref rest } = path {
            indices.push(index);
            path = rest;
        }
        indices
    }

    /// The first step of the path, if it isn't a leaf.
    pub fn first_index(&self) -> Option<usize> {
        match self {
            &FocusPath::Leaf => None,
            &FocusPath::Child { index, .. } => Some(index),
        }
    }
}


#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScreenDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScreenDirection {
    pub fn is_vertical(self) -> bool {
        matches!(self, ScreenDirection::Up | ScreenDirection::Down)
    }

    /// Whether moving this way increases the coordinate along its axis.
    pub fn is_positive(self) -> bool {
        matches!(self, ScreenDirection::Down | ScreenDirection::Right)
    }
}

/// A request to move focus.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FocusNavigation {
    /// Sequential movement, as by Tab and Shift+Tab.
    Tab {
        forward: bool,
    },
    /// Directional movement, as by the arrow keys.
    Arrow(ScreenDirection),
}


/// Apply or clear focus along a path.
///
/// Containers along the way have their focused child index set (or cleared)
/// and the leaf at the end gets exactly one `set_focused` call. A path which
/// steps into a child index the widget doesn't expose as a widget, such as
/// a list entry, ends at that widget, which handles the rest through
/// `set_focused_child`.
pub fn apply_focus(widget: &mut dyn Widget, path: &FocusPath, focused: bool) {
    match path {
        &FocusPath::Leaf => widget.set_focused(focused),
        &FocusPath::Child { index, path: ref rest } => {
            if focused {
                widget.set_focused_child(Some(index));
            }
            match widget.child_mut(index) {
                Some(child) => apply_focus(child, rest, focused),
                None => if **rest != FocusPath::Leaf {
                    warn!(index, "focus path leads through missing child");
                },
            }
            if !focused {
                widget.set_focused_child(None);
            }
        }
    }
}

/// Clear whatever is focused under `root`.
pub fn clear_focus(root: &mut dyn Widget) {
    if let Some(path) = root.current_focus_path() {
        trace!(?path, "clearing focus");
        apply_focus(root, &path, false);
    }
}

/// Move focus under `root` to `path`.
pub fn change_focus(root: &mut dyn Widget, path: &FocusPath) {
    clear_focus(root);
    trace!(?path, "applying focus");
    apply_focus(root, path, true);
}


#[test]
fn test_path_indices() {
    let path = FocusPath::child(2, FocusPath::child(0, FocusPath::Leaf));
    assert_eq!(path.indices(), vec![2, 0]);
    assert_eq!(path.first_index(), Some(2));
    assert_eq!(FocusPath::Leaf.indices(), Vec::<usize>::new());
}
