//! Layout helpers.
//!
//! Layouts are pure: they take the intrinsic sizes of the things being laid
//! out and return where those things go. Applying the result to widgets is a
//! separate step, so nothing here holds state between calls.

use crate::gui::{
    container::ContainerWidget,
    widget::Widget,
};
use graphics::ScreenRect;
use vek::*;


/// Minimum height of the header and footer bands of a screen.
pub const DEFAULT_BAND_HEIGHT: i32 = 33;


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn main(self, size: Extent2<i32>) -> i32 {
        match self {
            Axis::Horizontal => size.w,
            Axis::Vertical => size.h,
        }
    }

    fn cross(self, size: Extent2<i32>) -> i32 {
        match self {
            Axis::Horizontal => size.h,
            Axis::Vertical => size.w,
        }
    }

    fn pos(self, main: i32, cross: i32) -> Vec2<i32> {
        match self {
            Axis::Horizontal => Vec2::new(main, cross),
            Axis::Vertical => Vec2::new(cross, main),
        }
    }

    fn size(self, main: i32, cross: i32) -> Extent2<i32> {
        match self {
            Axis::Horizontal => Extent2::new(main, cross),
            Axis::Vertical => Extent2::new(cross, main),
        }
    }
}

/// Where within some space a smaller extent is placed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Align {
    Start,
    Center,
    End,
    /// Fraction of the slack to leave before the extent, `0.0` being start
    /// and `1.0` being end.
    Fraction(f32),
}

impl Default for Align {
    fn default() -> Self {
        Align::Center
    }
}

impl Align {
    pub fn fraction(self) -> f32 {
        match self {
            Align::Start => 0.0,
            Align::Center => 0.5,
            Align::End => 1.0,
            Align::Fraction(f) => f,
        }
    }

    /// Offset of an extent within a space. Negative if it doesn't fit.
    pub fn offset(self, space: i32, extent: i32) -> i32 {
        match self {
            Align::Start => 0,
            Align::Center => (space - extent) / 2,
            Align::End => space - extent,
            Align::Fraction(f) => ((space - extent) as f32 * f) as i32,
        }
    }
}


/// Computed placement of a sequence of children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Arrangement {
    /// One rect per child, in input order.
    pub rects: Vec<ScreenRect>,
    /// Size of the whole group.
    pub size: Extent2<i32>,
}

impl Arrangement {
    /// The group's bounding rectangle.
    pub fn bounds(&self) -> ScreenRect {
        let pos = self.rects.iter()
            .map(|r| r.pos())
            .reduce(|a, b| Vec2::new(a.x.min(b.x), a.y.min(b.y)))
            .unwrap_or(Vec2::zero());
        ScreenRect::from_pos_size(pos, self.size)
    }

    /// Move every rect by `delta`.
    pub fn translate(&mut self, delta: Vec2<i32>) {
        for rect in &mut self.rects {
            *rect = rect.translate(delta);
        }
    }

    /// Position children `first_child..` of `container` per the arrangement.
    ///
    /// Panics if the container doesn't have that many children.
    pub fn apply_to(&self, container: &mut ContainerWidget, first_child: usize) {
        let len = container.len();
        for (i, rect) in self.rects.iter().enumerate() {
            match container.child_mut(first_child + i) {
                Some(child) => child.set_position(rect.pos()),
                None => panic!(
                    "arrangement of {} rects applied from child {} of {}",
                    self.rects.len(),
                    first_child,
                    len,
                ),
            }
        }
    }

    /// Position a single widget per rect `index`.
    pub fn apply_one(&self, index: usize, widget: &mut dyn Widget) {
        widget.set_position(self.rects[index].pos());
    }
}


/// Children placed one after another along an axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearLayout {
    pub axis: Axis,
    pub spacing: i32,
    /// Cross-axis alignment for children that don't specify their own.
    pub align: Align,
}

impl LinearLayout {
    pub fn horizontal(spacing: i32) -> Self {
        LinearLayout {
            axis: Axis::Horizontal,
            spacing,
            align: Align::Center,
        }
    }

    pub fn vertical(spacing: i32) -> Self {
        LinearLayout {
            axis: Axis::Vertical,
            spacing,
            align: Align::Center,
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Size of the group: main extents plus spacing by the largest cross
    /// extent.
    pub fn size(&self, sizes: &[Extent2<i32>]) -> Extent2<i32> {
        let main = sizes.iter().map(|&s| self.axis.main(s)).sum::<i32>()
            + self.spacing * (sizes.len() as i32 - 1).max(0);
        let cross = sizes.iter().map(|&s| self.axis.cross(s)).max().unwrap_or(0);
        self.axis.size(main, cross)
    }

    pub fn arrange(&self, origin: Vec2<i32>, sizes: &[Extent2<i32>]) -> Arrangement {
        let children = sizes.iter().map(|&s| (s, None)).collect::<Vec<_>>();
        self.arrange_aligned(origin, &children)
    }

    /// Arrange with a per-child cross-axis alignment override.
    pub fn arrange_aligned(
        &self,
        origin: Vec2<i32>,
        children: &[(Extent2<i32>, Option<Align>)],
    ) -> Arrangement {
        let sizes = children.iter().map(|&(s, _)| s).collect::<Vec<_>>();
        let size = self.size(&sizes);
        let cross_space = self.axis.cross(size);
        let mut main = 0;
        let mut rects = Vec::with_capacity(children.len());
        for &(child, align) in children {
            let cross = align.unwrap_or(self.align).offset(cross_space, self.axis.cross(child));
            let pos = origin + self.axis.pos(main, cross);
            rects.push(ScreenRect::from_pos_size(pos, child));
            main += self.axis.main(child) + self.spacing;
        }
        Arrangement { rects, size }
    }
}


/// Result of `HeaderAndFooterLayout::arrange`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HeaderAndFooterArrangement {
    pub header_band: ScreenRect,
    pub content_band: ScreenRect,
    pub footer_band: ScreenRect,
    /// The header group, centered in its band.
    pub header: ScreenRect,
    /// The content group, centered horizontally at the top of its band.
    pub content: ScreenRect,
    /// The footer group, centered in its band.
    pub footer: ScreenRect,
}

/// Screen-sized layout of three vertical bands: header, content, footer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HeaderAndFooterLayout {
    pub size: Extent2<i32>,
    /// Minimum header band height. The band grows to fit the header.
    pub header_height: i32,
    /// Minimum footer band height. The band grows to fit the footer.
    pub footer_height: i32,
}

impl HeaderAndFooterLayout {
    pub fn new(size: Extent2<i32>) -> Self {
        HeaderAndFooterLayout {
            size,
            header_height: DEFAULT_BAND_HEIGHT,
            footer_height: DEFAULT_BAND_HEIGHT,
        }
    }

    pub fn arrange(
        &self,
        header: Extent2<i32>,
        content: Extent2<i32>,
        footer: Extent2<i32>,
    ) -> HeaderAndFooterArrangement {
        let header_h = self.header_height.max(header.h).max(0);
        let footer_h = self.footer_height.max(footer.h).max(0);
        let content_h = (self.size.h - header_h - footer_h).max(0);
        let header_band = ScreenRect::new(0, 0, self.size.w, header_h);
        let content_band = ScreenRect::new(0, header_h, self.size.w, content_h);
        // the footer gives way to the header when both don't fit
        let footer_top = (self.size.h - footer_h).max(header_h);
        let footer_band = ScreenRect::new(0, footer_top, self.size.w, footer_h);
        HeaderAndFooterArrangement {
            header_band,
            content_band,
            footer_band,
            header: center_in(header, header_band),
            content: align_in(content, content_band, Align::Center, Align::Start),
            footer: center_in(footer, footer_band),
        }
    }
}


/// Place an extent within `area`.
pub fn align_in(extent: Extent2<i32>, area: ScreenRect, h: Align, v: Align) -> ScreenRect {
    ScreenRect::from_pos_size(
        area.pos() + Vec2::new(
            h.offset(area.w, extent.w),
            v.offset(area.h, extent.h),
        ),
        extent,
    )
}

pub fn center_in(extent: Extent2<i32>, area: ScreenRect) -> ScreenRect {
    align_in(extent, area, Align::Center, Align::Center)
}

/// Aligns children (each independently) within a rectangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameLayout {
    pub h_align: Align,
    pub v_align: Align,
}

impl Default for FrameLayout {
    fn default() -> Self {
        FrameLayout {
            h_align: Align::Center,
            v_align: Align::Center,
        }
    }
}

impl FrameLayout {
    pub fn new(h_align: Align, v_align: Align) -> Self {
        FrameLayout { h_align, v_align }
    }

    pub fn arrange(&self, area: ScreenRect, sizes: &[Extent2<i32>]) -> Arrangement {
        let rects = sizes.iter()
            .map(|&s| align_in(s, area, self.h_align, self.v_align))
            .collect();
        Arrangement {
            rects,
            size: area.size(),
        }
    }

    /// Align an already-arranged group as a whole within `area`.
    pub fn arrange_group(&self, area: ScreenRect, mut group: Arrangement) -> Arrangement {
        let target = align_in(group.size, area, self.h_align, self.v_align);
        let delta = target.pos() - group.bounds().pos();
        group.translate(delta);
        group
    }
}


/// Fixed-column grid. Each column is as wide as its widest child and each
/// row as tall as its tallest; children sit at the top-left of their cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub column_spacing: i32,
    pub row_spacing: i32,
}

impl GridLayout {
    /// Panics if `columns` is zero.
    pub fn new(columns: usize, spacing: i32) -> Self {
        assert!(columns > 0, "grid with no columns");
        GridLayout {
            columns,
            column_spacing: spacing,
            row_spacing: spacing,
        }
    }

    pub fn arrange(&self, origin: Vec2<i32>, sizes: &[Extent2<i32>]) -> Arrangement {
        let rows = (sizes.len() + self.columns - 1) / self.columns;
        let mut col_w = vec![0; self.columns];
        let mut row_h = vec![0; rows];
        for (i, s) in sizes.iter().enumerate() {
            col_w[i % self.columns] = col_w[i % self.columns].max(s.w);
            row_h[i / self.columns] = row_h[i / self.columns].max(s.h);
        }
        let col_x = offsets(&col_w, self.column_spacing);
        let row_y = offsets(&row_h, self.row_spacing);
        let rects = sizes.iter()
            .enumerate()
            .map(|(i, &s)| ScreenRect::from_pos_size(
                origin + Vec2::new(col_x[i % self.columns], row_y[i / self.columns]),
                s,
            ))
            .collect();
        let used_cols = sizes.len().min(self.columns);
        let size = Extent2::new(
            span(&col_w[..used_cols], self.column_spacing),
            span(&row_h, self.row_spacing),
        );
        Arrangement { rects, size }
    }
}

fn offsets(extents: &[i32], spacing: i32) -> Vec<i32> {
    let mut acc = 0;
    extents.iter()
        .map(|&e| {
            let at = acc;
            acc += e + spacing;
            at
        })
        .collect()
}

fn span(extents: &[i32], spacing: i32) -> i32 {
    extents.iter().sum::<i32>() + spacing * (extents.len() as i32 - 1).max(0)
}


#[test]
fn test_linear_layout_size_and_alignment() {
    let layout = LinearLayout::horizontal(4);
    let sizes = [Extent2::new(10, 20), Extent2::new(30, 10)];
    let a = layout.arrange(Vec2::new(5, 5), &sizes);
    assert_eq!(a.size, Extent2::new(44, 20));
    assert_eq!(a.rects, vec![
        ScreenRect::new(5, 5, 10, 20),
        ScreenRect::new(19, 10, 30, 10),
    ]);

    let a = LinearLayout::vertical(2).arrange_aligned(Vec2::zero(), &[
        (Extent2::new(10, 10), Some(Align::End)),
        (Extent2::new(40, 10), None),
        (Extent2::new(20, 10), Some(Align::Start)),
    ]);
    assert_eq!(a.size, Extent2::new(40, 34));
    assert_eq!(a.rects[0].pos(), Vec2::new(30, 0));
    assert_eq!(a.rects[1].pos(), Vec2::new(0, 12));
    assert_eq!(a.rects[2].pos(), Vec2::new(0, 24));
}

#[test]
fn test_header_and_footer_bands() {
    let layout = HeaderAndFooterLayout::new(Extent2::new(320, 240));
    let a = layout.arrange(Extent2::new(100, 9), Extent2::new(220, 150), Extent2::new(200, 44));
    assert_eq!(a.header_band, ScreenRect::new(0, 0, 320, 33));
    assert_eq!(a.footer_band, ScreenRect::new(0, 196, 320, 44));
    assert_eq!(a.content_band, ScreenRect::new(0, 33, 320, 163));
    assert_eq!(a.header, ScreenRect::new(110, 12, 100, 9));
    assert_eq!(a.content.pos(), Vec2::new(50, 33));

    // too small for both bands
    let layout = HeaderAndFooterLayout::new(Extent2::new(100, 50));
    let a = layout.arrange(Extent2::zero(), Extent2::zero(), Extent2::zero());
    assert_eq!(a.content_band.h, 0);
    assert_eq!(a.footer_band, ScreenRect::new(0, 33, 100, 33));
    assert_eq!(a.content_band.y, 33);
    assert!(a.header_band.intersection(&a.footer_band).is_empty());
}

#[test]
fn test_frame_layout_fractions() {
    let area = ScreenRect::new(0, 0, 100, 50);
    let a = FrameLayout::default().arrange(area, &[Extent2::new(20, 10)]);
    assert_eq!(a.rects[0], ScreenRect::new(40, 20, 20, 10));
    let a = FrameLayout::new(Align::Fraction(0.25), Align::End).arrange(area, &[Extent2::new(20, 10)]);
    assert_eq!(a.rects[0], ScreenRect::new(20, 40, 20, 10));

    let row = LinearLayout::horizontal(10).arrange(Vec2::zero(), &[Extent2::new(20, 10); 2]);
    let a = FrameLayout::default().arrange_group(area, row);
    assert_eq!(a.rects[0].pos(), Vec2::new(25, 20));
    assert_eq!(a.rects[1].pos(), Vec2::new(55, 20));
}

#[test]
fn test_grid_layout() {
    let grid = GridLayout::new(2, 4);
    let sizes = [
        Extent2::new(10, 10),
        Extent2::new(20, 5),
        Extent2::new(15, 8),
    ];
    let a = grid.arrange(Vec2::zero(), &sizes);
    assert_eq!(a.rects[1].pos(), Vec2::new(19, 0));
    assert_eq!(a.rects[2].pos(), Vec2::new(0, 14));
    assert_eq!(a.size, Extent2::new(39, 22));
}
