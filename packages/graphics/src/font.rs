//! Boundary to whatever knows glyph metrics.
//!
//! Text layout in the GUI only ever needs advances and a line height, so
//! this is all a font has to provide. Wrapping and truncation are built on
//! top of those two.

use std::collections::HashMap;


/// Opaque handle to a font known to the backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(pub u32);

impl FontId {
    /// The font used when a caller doesn't care.
    pub const DEFAULT: FontId = FontId(0);
}


/// Glyph metrics for one or more fonts.
pub trait FontMetrics {
    /// Horizontal advance of `c`, in GUI pixels.
    fn char_width(&self, font: FontId, c: char) -> i32;

    /// Distance between consecutive baselines, in GUI pixels.
    fn line_height(&self, font: FontId) -> i32;

    /// Width of a single line of text.
    fn width(&self, font: FontId, text: &str) -> i32 {
        text.chars().map(|c| self.char_width(font, c)).sum()
    }

    /// Word-wrap `text` into lines no wider than `max_width`.
    ///
    /// Explicit newlines always break. Words which alone exceed the width
    /// are broken between characters. Every line holds at least one
    /// character, so this terminates even for absurd widths. An empty
    /// paragraph becomes an empty line.
    fn split_lines(&self, font: FontId, text: &str, max_width: i32) -> Vec<String> {
        let space = self.char_width(font, ' ');
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut line = String::new();
            let mut line_width = 0;
            for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
                let word_width = self.width(font, word);
                if !line.is_empty() && line_width + space + word_width <= max_width {
                    line.push(' ');
                    line.push_str(word);
                    line_width += space + word_width;
                    continue;
                }
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                if word_width <= max_width {
                    line.push_str(word);
                    line_width = word_width;
                } else {
                    // hard break
                    for c in word.chars() {
                        let w = self.char_width(font, c);
                        if !line.is_empty() && line_width + w > max_width {
                            lines.push(std::mem::take(&mut line));
                            line_width = 0;
                        }
                        line.push(c);
                        line_width += w;
                    }
                }
            }
            lines.push(line);
        }
        lines
    }

    /// Longest prefix of `text` that fits in `max_width`.
    fn truncate_to_width(&self, font: FontId, text: &str, max_width: i32) -> String {
        let mut width = 0;
        let mut end = 0;
        for (i, c) in text.char_indices() {
            width += self.char_width(font, c);
            if width > max_width {
                break;
            }
            end = i + c.len_utf8();
        }
        text[..end].to_owned()
    }
}


/// Font metrics with one advance for most characters and a handful of
/// narrow exceptions, shaped after the classic bitmap GUI font.
///
/// Every `FontId` maps to the same metrics.
#[derive(Debug, Clone)]
pub struct FixedWidthFont {
    pub advance: i32,
    pub line_height: i32,
    overrides: HashMap<char, i32>,
}

impl FixedWidthFont {
    /// Uniform advance, no exceptions.
    pub fn uniform(advance: i32, line_height: i32) -> Self {
        FixedWidthFont {
            advance,
            line_height,
            overrides: HashMap::new(),
        }
    }

    /// Override the advance of a single character.
    pub fn with_char(mut self, c: char, width: i32) -> Self {
        self.overrides.insert(c, width);
        self
    }
}

impl Default for FixedWidthFont {
    fn default() -> Self {
        let mut font = FixedWidthFont::uniform(6, 9);
        for c in ['!', '\'', ',', '.', ':', ';', 'i', '|'] {
            font.overrides.insert(c, 2);
        }
        for c in ['`', 'l'] {
            font.overrides.insert(c, 3);
        }
        for c in [' ', 'I', '[', ']', 't', '(', ')', '"', '*'] {
            font.overrides.insert(c, 4);
        }
        font.overrides.insert('k', 5);
        font.overrides.insert('f', 5);
        font.overrides.insert('@', 7);
        font.overrides.insert('~', 7);
        font
    }
}

impl FontMetrics for FixedWidthFont {
    fn char_width(&self, _font: FontId, c: char) -> i32 {
        if c == '\n' {
            return 0;
        }
        self.overrides.get(&c).copied().unwrap_or(self.advance)
    }

    fn line_height(&self, _font: FontId) -> i32 {
        self.line_height
    }
}


#[test]
fn test_width_sums_advances() {
    let font = FixedWidthFont::uniform(6, 9);
    assert_eq!(font.width(FontId::DEFAULT, "abc"), 18);
    assert_eq!(FixedWidthFont::default().width(FontId::DEFAULT, "hi!"), 6 + 2 + 2);
}

#[test]
fn test_split_lines_wraps_words() {
    let font = FixedWidthFont::uniform(1, 9);
    let lines = font.split_lines(FontId::DEFAULT, "aa bb cc\ndd", 5);
    assert_eq!(lines, vec!["aa bb", "cc", "dd"]);
}

#[test]
fn test_split_lines_hard_breaks_long_words() {
    let font = FixedWidthFont::uniform(1, 9);
    let lines = font.split_lines(FontId::DEFAULT, "abcdefg hi", 3);
    assert_eq!(lines, vec!["abc", "def", "g", "hi"]);
    // zero width still makes progress
    let lines = font.split_lines(FontId::DEFAULT, "abc", 0);
    assert_eq!(lines, vec!["a", "b", "c"]);
}

#[test]
fn test_split_lines_empty() {
    let font = FixedWidthFont::default();
    assert_eq!(font.split_lines(FontId::DEFAULT, "", 100), vec![String::new()]);
}

#[test]
fn test_truncate_to_width() {
    let font = FixedWidthFont::uniform(6, 9);
    assert_eq!(font.truncate_to_width(FontId::DEFAULT, "hello", 20), "hel");
    assert_eq!(font.truncate_to_width(FontId::DEFAULT, "hello", 1000), "hello");
    assert_eq!(font.truncate_to_width(FontId::DEFAULT, "hello", 0), "");
}
