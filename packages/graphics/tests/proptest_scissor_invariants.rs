//! Property tests for clip and sprite geometry.

use graphics::{
    ScreenRect,
    ScissorStack,
    SpriteRegion,
    SpriteScaling,
    TextureId,
    sprite::NineSliceBorder,
    scaling::sprite_quads,
};
use proptest::prelude::*;
use vek::*;


fn rect_strategy() -> impl Strategy<Value = ScreenRect> {
    (-200i32..=200, -200i32..=200, -20i32..=300, -20i32..=300)
        .prop_map(|(x, y, w, h)| ScreenRect::new(x, y, w, h))
}

fn point_strategy() -> impl Strategy<Value = Vec2<i32>> {
    (-250i32..=550, -250i32..=550).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    #[test]
    fn intersection_commutative(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn intersection_contains_iff_both_contain(a in rect_strategy(), b in rect_strategy(), p in point_strategy()) {
        let i = a.intersection(&b);
        prop_assert_eq!(i.contains(p), a.contains(p) && b.contains(p));
        prop_assert!(i.w >= 0 && i.h >= 0);
    }

    #[test]
    fn scissor_push_only_narrows(rects in prop::collection::vec(rect_strategy(), 1..8)) {
        let mut stack = ScissorStack::new();
        let mut effective = Vec::new();
        for &r in &rects {
            effective.push(stack.push(r));
        }
        for pair in effective.windows(2) {
            prop_assert!(pair[1].is_subset_of(&pair[0]));
        }
        // popping walks back through exactly what was in effect
        for i in (0..effective.len()).rev() {
            prop_assert_eq!(stack.current(), Some(effective[i]));
            let below = stack.pop();
            prop_assert_eq!(below, if i == 0 { None } else { Some(effective[i - 1]) });
        }
        prop_assert!(stack.is_empty());
    }

    #[test]
    fn sprite_quads_cover_destination_exactly(
        dest in rect_strategy(),
        native in (1i32..=64, 1i32..=64),
        border in (0i32..=40, 0i32..=40, 0i32..=40, 0i32..=40),
        mode in 0u8..3,
    ) {
        let (nw, nh) = native;
        let (left, top, right, bottom) = border;
        let scaling = match mode {
            0 => SpriteScaling::Stretch,
            1 => SpriteScaling::Tile { w: nw, h: nh },
            _ => {
                // keep a center of at least one pixel
                let nw = nw.max(left + right + 1);
                let nh = nh.max(top + bottom + 1);
                SpriteScaling::NineSlice {
                    w: nw,
                    h: nh,
                    border: NineSliceBorder { left, top, right, bottom },
                }
            }
        };
        let region = SpriteRegion {
            texture: TextureId(0),
            uv_min: Vec2::zero(),
            uv_max: Vec2::one(),
            scaling,
        };
        let quads = sprite_quads(&region, dest);
        // every destination pixel is drawn exactly once
        let mut hits = vec![0u8; dest.area() as usize];
        for q in &quads {
            prop_assert!(!q.dest.is_empty());
            prop_assert!(q.dest.is_subset_of(&dest));
            for y in q.dest.top()..q.dest.bottom() {
                for x in q.dest.left()..q.dest.right() {
                    let i = ((y - dest.y) * dest.w + (x - dest.x)) as usize;
                    hits[i] = hits[i].saturating_add(1);
                }
            }
        }
        prop_assert!(hits.iter().all(|&n| n == 1));
    }

    #[test]
    fn nine_slice_corners_stay_native(
        border in (1i32..=8, 1i32..=8, 1i32..=8, 1i32..=8),
        center in (0i32..=20, 0i32..=20),
        extra in (0i32..=100, 0i32..=100),
        pos in (-50i32..=50, -50i32..=50),
    ) {
        let (left, top, right, bottom) = border;
        let nw = left + right + 1 + center.0;
        let nh = top + bottom + 1 + center.1;
        // large enough that no inset gets clamped
        let dest = ScreenRect::new(
            pos.0,
            pos.1,
            2 * left.max(right) + extra.0,
            2 * top.max(bottom) + extra.1,
        );
        prop_assume!(dest.size() != Extent2::new(nw, nh));

        let region = SpriteRegion {
            texture: TextureId(0),
            uv_min: Vec2::zero(),
            uv_max: Vec2::one(),
            scaling: SpriteScaling::NineSlice {
                w: nw,
                h: nh,
                border: NineSliceBorder { left, top, right, bottom },
            },
        };
        let quads = sprite_quads(&region, dest);
        let (fw, fh) = (nw as f32, nh as f32);
        let corners = [
            (
                ScreenRect::new(dest.x, dest.y, left, top),
                Vec2::new(0.0, 0.0),
                Vec2::new(left as f32 / fw, top as f32 / fh),
            ),
            (
                ScreenRect::new(dest.right() - right, dest.y, right, top),
                Vec2::new((nw - right) as f32 / fw, 0.0),
                Vec2::new(1.0, top as f32 / fh),
            ),
            (
                ScreenRect::new(dest.x, dest.bottom() - bottom, left, bottom),
                Vec2::new(0.0, (nh - bottom) as f32 / fh),
                Vec2::new(left as f32 / fw, 1.0),
            ),
            (
                ScreenRect::new(dest.right() - right, dest.bottom() - bottom, right, bottom),
                Vec2::new((nw - right) as f32 / fw, (nh - bottom) as f32 / fh),
                Vec2::new(1.0, 1.0),
            ),
        ];
        for (rect, uv_min, uv_max) in corners {
            let quad = quads.iter().find(|q| q.dest == rect);
            prop_assert!(quad.is_some(), "no corner quad at {:?}", rect);
            let quad = quad.unwrap();
            prop_assert_eq!(quad.uv_min, uv_min);
            prop_assert_eq!(quad.uv_max, uv_max);
        }
    }
}
