//! Accessibility narration.
//!
//! Narration is rebuilt from scratch every time it's asked for, since focus,
//! hover and values change from frame to frame. Widgets append typed
//! fragments to a `NarrationOutput`; the output orders them by type.

use std::fmt::{self, Formatter, Display};


/// Kind of a narration fragment. Fragments are spoken in this order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NarratedElementType {
    /// What the element is, eg. "Button: Play".
    Title,
    /// Where the element is among its siblings.
    Position,
    /// Extra information, such as a tooltip.
    Hint,
    /// How to operate the element.
    Usage,
}

/// How strongly a widget wants to be narrated. Focus beats hover.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NarrationPriority {
    None,
    Hovered,
    Focused,
}

impl NarrationPriority {
    pub fn is_terminal(self) -> bool {
        self == NarrationPriority::Focused
    }
}

/// Collected narration fragments for one request.
#[derive(Debug, Clone, Default)]
pub struct NarrationOutput {
    fragments: Vec<(NarratedElementType, String)>,
}

impl NarrationOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<S: Into<String>>(&mut self, kind: NarratedElementType, text: S) {
        let text = text.into();
        if !text.is_empty() {
            self.fragments.push((kind, text));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The fragments in speaking order. Fragments of the same type keep the
    /// order they were added in.
    pub fn render(&self) -> Vec<String> {
        let mut fragments = self.fragments.clone();
        fragments.sort_by_key(|&(kind, _)| kind);
        fragments.into_iter().map(|(_, text)| text).collect()
    }
}

impl Display for NarrationOutput {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.render().join(". "))
    }
}


#[test]
fn test_narration_orders_by_type() {
    let mut out = NarrationOutput::new();
    out.add(NarratedElementType::Usage, "Press Enter to activate");
    out.add(NarratedElementType::Title, "Button: Play");
    out.add(NarratedElementType::Position, "Screen element 1 out of 3");
    out.add(NarratedElementType::Title, "");
    assert_eq!(out.render(), vec![
        "Button: Play",
        "Screen element 1 out of 3",
        "Press Enter to activate",
    ]);
    assert_eq!(
        out.to_string(),
        "Button: Play. Screen element 1 out of 3. Press Enter to activate",
    );
}
