//! Geometry of mapping a sprite region onto a destination rectangle.
//!
//! These are pure functions from a resolved sprite and a destination to the
//! list of textured quads that cover it. The draw surface feeds the result to
//! the backend, tests inspect it directly.

use crate::{
    rect::ScreenRect,
    sprite::{
        SpriteRegion,
        SpriteScaling,
        NineSliceBorder,
    },
};
use vek::*;


/// One textured quad: where it lands and which part of the texture it shows.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteQuad {
    pub dest: ScreenRect,
    pub uv_min: Vec2<f32>,
    pub uv_max: Vec2<f32>,
}

/// Lay out quads for `region` covering `dest` according to the region's
/// scaling mode.
pub fn sprite_quads(region: &SpriteRegion, dest: ScreenRect) -> Vec<SpriteQuad> {
    if dest.is_empty() {
        return Vec::new();
    }
    match region.scaling {
        SpriteScaling::Stretch => stretch(region, dest),
        SpriteScaling::Tile { w, h } => {
            let mut quads = Vec::new();
            tile_sub(region, Extent2::new(w, h), ScreenRect::new(0, 0, w, h), dest, &mut quads);
            quads
        }
        SpriteScaling::NineSlice { w, h, border } => nine_slice(region, Extent2::new(w, h), border, dest),
    }
}

/// Whole source onto whole destination.
pub fn stretch(region: &SpriteRegion, dest: ScreenRect) -> Vec<SpriteQuad> {
    vec![SpriteQuad {
        dest,
        uv_min: region.uv_min,
        uv_max: region.uv_max,
    }]
}

/// Clamp nine-slice insets so that each is at most half the destination
/// extent along its axis.
pub fn clamp_border(border: NineSliceBorder, dest: Extent2<i32>) -> NineSliceBorder {
    let half_w = dest.w / 2;
    let half_h = dest.h / 2;
    NineSliceBorder {
        left: border.left.min(half_w).max(0),
        top: border.top.min(half_h).max(0),
        right: border.right.min(half_w).max(0),
        bottom: border.bottom.min(half_h).max(0),
    }
}

/// Nine-slice layout.
///
/// Corners are drawn at native scale (cropped from the outer edge inwards
/// when the insets had to be clamped), edges tile along their long axis and
/// the center tiles in both axes. Nothing is ever stretched.
pub fn nine_slice(
    region: &SpriteRegion,
    native: Extent2<i32>,
    border: NineSliceBorder,
    dest: ScreenRect,
) -> Vec<SpriteQuad> {
    if dest.size() == native {
        return stretch(region, dest);
    }

    let b = clamp_border(border, dest.size());

    // per-axis (source start, source extent, dest start, dest extent)
    let (center_x, center_w) = center_span(native.w, border.left, border.right);
    let (center_y, center_h) = center_span(native.h, border.top, border.bottom);
    let h_segs = [
        (0, b.left, dest.x, b.left),
        (center_x, center_w, dest.x + b.left, dest.w - b.left - b.right),
        (native.w - b.right, b.right, dest.right() - b.right, b.right),
    ];
    let v_segs = [
        (0, b.top, dest.y, b.top),
        (center_y, center_h, dest.y + b.top, dest.h - b.top - b.bottom),
        (native.h - b.bottom, b.bottom, dest.bottom() - b.bottom, b.bottom),
    ];

    let mut quads = Vec::new();
    for &(src_y, src_h, dest_y, dest_h) in &v_segs {
        for &(src_x, src_w, dest_x, dest_w) in &h_segs {
            tile_sub(
                region,
                native,
                ScreenRect::new(src_x, src_y, src_w, src_h),
                ScreenRect::new(dest_x, dest_y, dest_w, dest_h),
                &mut quads,
            );
        }
    }
    quads
}

/// Source start and extent of the middle band along one axis. Borders that
/// leave no middle fall back to repeating the single pixel where it would be.
fn center_span(native: i32, start: i32, end: i32) -> (i32, i32) {
    let extent = native - start - end;
    if extent > 0 {
        (start, extent)
    } else {
        (start.min(native - 1).max(0), 1)
    }
}

/// Cover `dest` with copies of the `src` sub-rectangle of a sprite whose
/// native size is `native`, at native scale, cropping the last column and
/// row.
pub fn tile_sub(
    region: &SpriteRegion,
    native: Extent2<i32>,
    src: ScreenRect,
    dest: ScreenRect,
    out: &mut Vec<SpriteQuad>,
) {
    if src.is_empty() || dest.is_empty() || native.w <= 0 || native.h <= 0 {
        return;
    }
    let native_f = Vec2::new(native.w as f32, native.h as f32);
    let mut ty = 0;
    while ty < dest.h {
        let h = src.h.min(dest.h - ty);
        let mut tx = 0;
        while tx < dest.w {
            let w = src.w.min(dest.w - tx);
            let from = Vec2::new(src.x as f32, src.y as f32) / native_f;
            let to = Vec2::new((src.x + w) as f32, (src.y + h) as f32) / native_f;
            let (uv_min, uv_max) = region.sub_uv(from, to);
            out.push(SpriteQuad {
                dest: ScreenRect::new(dest.x + tx, dest.y + ty, w, h),
                uv_min,
                uv_max,
            });
            tx += src.w;
        }
        ty += src.h;
    }
}


#[cfg(test)]
fn test_region(scaling: SpriteScaling) -> SpriteRegion {
    use crate::sprite::TextureId;
    SpriteRegion {
        texture: TextureId(0),
        uv_min: Vec2::new(0.0, 0.0),
        uv_max: Vec2::new(1.0, 1.0),
        scaling,
    }
}

#[test]
fn test_stretch_is_single_quad() {
    let region = test_region(SpriteScaling::Stretch);
    let quads = sprite_quads(&region, ScreenRect::new(3, 4, 300, 7));
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].dest, ScreenRect::new(3, 4, 300, 7));
    assert_eq!(quads[0].uv_max, Vec2::new(1.0, 1.0));
}

#[test]
fn test_tile_clips_last_partial_tile() {
    let region = test_region(SpriteScaling::Tile { w: 16, h: 16 });
    let quads = sprite_quads(&region, ScreenRect::new(0, 0, 40, 16));
    assert_eq!(quads.len(), 3);
    assert_eq!(quads[2].dest, ScreenRect::new(32, 0, 8, 16));
    assert_eq!(quads[2].uv_max, Vec2::new(0.5, 1.0));
    let covered: i64 = quads.iter().map(|q| q.dest.area()).sum();
    assert_eq!(covered, 40 * 16);
}

#[test]
fn test_nine_slice_corners_native() {
    let border = NineSliceBorder::uniform(4);
    let region = test_region(SpriteScaling::NineSlice { w: 20, h: 20, border });
    let dest = ScreenRect::new(10, 10, 100, 50);
    let quads = sprite_quads(&region, dest);

    let top_left = quads.iter().find(|q| q.dest.pos() == dest.pos()).unwrap();
    assert_eq!(top_left.dest.size(), Extent2::new(4, 4));
    assert_eq!(top_left.uv_max, Vec2::new(0.2, 0.2));

    let bottom_right = quads
        .iter()
        .find(|q| q.dest.right() == dest.right() && q.dest.bottom() == dest.bottom())
        .unwrap();
    assert_eq!(bottom_right.dest.size(), Extent2::new(4, 4));
    assert_eq!(bottom_right.uv_min, Vec2::new(0.8, 0.8));

    // nothing is scaled: every quad's dest size matches its source pixel size
    for q in &quads {
        let src_w = ((q.uv_max.x - q.uv_min.x) * 20.0).round() as i32;
        let src_h = ((q.uv_max.y - q.uv_min.y) * 20.0).round() as i32;
        assert_eq!((src_w, src_h), (q.dest.w, q.dest.h));
    }

    let covered: i64 = quads.iter().map(|q| q.dest.area()).sum();
    assert_eq!(covered, dest.area());
}

#[test]
fn test_nine_slice_clamps_small_destination() {
    let border = NineSliceBorder { left: 8, top: 8, right: 8, bottom: 8 };
    let clamped = clamp_border(border, Extent2::new(10, 6));
    assert_eq!(clamped, NineSliceBorder { left: 5, top: 3, right: 5, bottom: 3 });

    let region = test_region(SpriteScaling::NineSlice { w: 32, h: 32, border });
    let dest = ScreenRect::new(0, 0, 10, 6);
    let quads = sprite_quads(&region, dest);
    for q in &quads {
        assert!(q.dest.w >= 0 && q.dest.h >= 0);
        assert!(q.dest.is_subset_of(&dest));
    }
    let covered: i64 = quads.iter().map(|q| q.dest.area()).sum();
    assert_eq!(covered, dest.area());
}

#[test]
fn test_nine_slice_without_center_still_covers() {
    let border = NineSliceBorder { left: 4, top: 4, right: 4, bottom: 4 };
    assert_eq!(center_span(8, 4, 4), (4, 1));
    assert_eq!(center_span(8, 6, 6), (6, 1));

    let region = test_region(SpriteScaling::NineSlice { w: 8, h: 8, border });
    let dest = ScreenRect::new(3, 5, 40, 30);
    let quads = sprite_quads(&region, dest);
    for q in &quads {
        assert!(q.dest.is_subset_of(&dest));
    }
    let covered: i64 = quads.iter().map(|q| q.dest.area()).sum();
    assert_eq!(covered, dest.area());
}
