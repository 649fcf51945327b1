//! Sprite ids the built-in widgets draw with.
//!
//! The host's atlas must resolve all of these. `register_placeholder_sprites`
//! lays them out over a single widgets texture, for hosts without a resource
//! pack and for tests.

use graphics::{
    SpriteAtlas,
    SpriteId,
    SpriteScaling,
    TextureId,
    sprite::NineSliceBorder,
};
use vek::*;


pub const BUTTON: &'static str = "widget/button";
pub const BUTTON_DISABLED: &'static str = "widget/button_disabled";
pub const BUTTON_HIGHLIGHTED: &'static str = "widget/button_highlighted";
pub const CHECKBOX: &'static str = "widget/checkbox";
pub const CHECKBOX_SELECTED: &'static str = "widget/checkbox_selected";
pub const SLIDER: &'static str = "widget/slider";
pub const SLIDER_HANDLE: &'static str = "widget/slider_handle";
pub const SLIDER_HANDLE_HIGHLIGHTED: &'static str = "widget/slider_handle_highlighted";
pub const TEXT_FIELD: &'static str = "widget/text_field";
pub const TEXT_FIELD_HIGHLIGHTED: &'static str = "widget/text_field_highlighted";
pub const SCROLLER: &'static str = "widget/scroller";
pub const SCROLLER_BACKGROUND: &'static str = "widget/scroller_background";
pub const MENU_BACKGROUND: &'static str = "gui/menu_list_background";
pub const HEADER_SEPARATOR: &'static str = "gui/header_separator";
pub const FOOTER_SEPARATOR: &'static str = "gui/footer_separator";

/// Every sprite id above.
pub const ALL: &'static [&'static str] = &[
    BUTTON,
    BUTTON_DISABLED,
    BUTTON_HIGHLIGHTED,
    CHECKBOX,
    CHECKBOX_SELECTED,
    SLIDER,
    SLIDER_HANDLE,
    SLIDER_HANDLE_HIGHLIGHTED,
    TEXT_FIELD,
    TEXT_FIELD_HIGHLIGHTED,
    SCROLLER,
    SCROLLER_BACKGROUND,
    MENU_BACKGROUND,
    HEADER_SEPARATOR,
    FOOTER_SEPARATOR,
];

pub fn sprite(path: &str) -> SpriteId {
    SpriteId::new(path)
}


/// Size of the texture `register_placeholder_sprites` lays sprites out in.
pub const PLACEHOLDER_TEXTURE_SIZE: Extent2<u32> = Extent2 { w: 256, h: 256 };

/// Register every built-in sprite as a region of `texture`, assumed to be
/// `PLACEHOLDER_TEXTURE_SIZE`.
pub fn register_placeholder_sprites(atlas: &mut SpriteAtlas, texture: TextureId) {
    let button = SpriteScaling::NineSlice {
        w: 200,
        h: 20,
        border: NineSliceBorder { left: 20, top: 4, right: 20, bottom: 4 },
    };
    let field = SpriteScaling::NineSlice {
        w: 200,
        h: 20,
        border: NineSliceBorder::uniform(1),
    };
    let separator = SpriteScaling::Tile { w: 32, h: 2 };
    let layout: &[(&str, [u32; 4], SpriteScaling)] = &[
        (BUTTON, [0, 0, 200, 20], button),
        (BUTTON_DISABLED, [0, 20, 200, 20], button),
        (BUTTON_HIGHLIGHTED, [0, 40, 200, 20], button),
        (TEXT_FIELD, [0, 60, 200, 20], field),
        (TEXT_FIELD_HIGHLIGHTED, [0, 80, 200, 20], field),
        (SLIDER, [0, 100, 200, 20], button),
        (SLIDER_HANDLE, [200, 0, 8, 20], SpriteScaling::Stretch),
        (SLIDER_HANDLE_HIGHLIGHTED, [208, 0, 8, 20], SpriteScaling::Stretch),
        (CHECKBOX, [216, 0, 20, 20], SpriteScaling::Stretch),
        (CHECKBOX_SELECTED, [236, 0, 20, 20], SpriteScaling::Stretch),
        (SCROLLER, [200, 20, 6, 32], SpriteScaling::NineSlice {
            w: 6,
            h: 32,
            border: NineSliceBorder::uniform(1),
        }),
        (SCROLLER_BACKGROUND, [206, 20, 6, 32], SpriteScaling::NineSlice {
            w: 6,
            h: 32,
            border: NineSliceBorder::uniform(1),
        }),
        (MENU_BACKGROUND, [0, 128, 32, 32], SpriteScaling::Tile { w: 32, h: 32 }),
        (HEADER_SEPARATOR, [32, 128, 32, 2], separator),
        (FOOTER_SEPARATOR, [32, 130, 32, 2], separator),
    ];
    for &(path, [x, y, w, h], scaling) in layout {
        atlas.insert_pixels(
            sprite(path),
            texture,
            PLACEHOLDER_TEXTURE_SIZE,
            Vec2::new(x, y),
            Extent2::new(w, h),
            scaling,
        );
    }
    debug!(sprites = layout.len(), "registered placeholder sprites");
}


#[test]
fn test_placeholders_cover_all_sprites() {
    use graphics::SpriteResolver;

    let mut atlas = SpriteAtlas::new();
    register_placeholder_sprites(&mut atlas, TextureId(0));
    assert_eq!(atlas.len(), ALL.len());
    for &path in ALL {
        assert!(atlas.resolve(&sprite(path)).is_some(), "{} missing", path);
    }
}
