//! Symbolic sprite identifiers and their resolution to atlas regions.

use std::{
    collections::HashMap,
    fmt::{self, Formatter, Display},
};
use serde::Deserialize;
use vek::*;
use anyhow::*;


/// Namespace assumed for sprite ids written without one.
pub const DEFAULT_NAMESPACE: &'static str = "minecraft";


/// Opaque handle to a texture owned by the render backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Symbolic sprite name of the form `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(String);

impl SpriteId {
    /// Parse, inserting the default namespace if none is given.
    pub fn new(s: &str) -> Self {
        if s.contains(':') {
            SpriteId(s.to_owned())
        } else {
            SpriteId(format!("{}:{}", DEFAULT_NAMESPACE, s))
        }
    }

    pub fn namespace(&self) -> &str {
        self.0.split(':').next().unwrap_or(DEFAULT_NAMESPACE)
    }

    pub fn path(&self) -> &str {
        self.0.splitn(2, ':').nth(1).unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SpriteId {
    fn from(s: &str) -> Self {
        SpriteId::new(s)
    }
}

impl Display for SpriteId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}


/// Fixed border insets of a nine-slice sprite, in source pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct NineSliceBorder {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl NineSliceBorder {
    pub fn uniform(n: i32) -> Self {
        NineSliceBorder {
            left: n,
            top: n,
            right: n,
            bottom: n,
        }
    }
}

/// How a sprite's source region maps onto a destination rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SpriteScaling {
    /// Map the whole source region onto the destination, ignoring aspect
    /// ratio.
    Stretch,
    /// Repeat the source at its native `w`x`h` size, clipping the last
    /// partial tile.
    Tile {
        w: i32,
        h: i32,
    },
    /// Keep fixed-size corners, tile the edges and center.
    NineSlice {
        w: i32,
        h: i32,
        border: NineSliceBorder,
    },
}

/// A resolved sprite: which texture it lives in, its normalized uv bounds
/// within that texture, and how it scales.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteRegion {
    pub texture: TextureId,
    pub uv_min: Vec2<f32>,
    pub uv_max: Vec2<f32>,
    pub scaling: SpriteScaling,
}

impl SpriteRegion {
    /// Sub-region of this region's uv space, with `from` and `to` given as
    /// fractions of the region.
    pub fn sub_uv(&self, from: Vec2<f32>, to: Vec2<f32>) -> (Vec2<f32>, Vec2<f32>) {
        let extent = self.uv_max - self.uv_min;
        (self.uv_min + extent * from, self.uv_min + extent * to)
    }
}


/// Lookup service from sprite ids to regions.
pub trait SpriteResolver {
    fn resolve(&self, id: &SpriteId) -> Option<SpriteRegion>;
}


/// In-memory `SpriteResolver` over a set of registered regions.
#[derive(Debug, Clone, Default)]
pub struct SpriteAtlas {
    regions: HashMap<SpriteId, SpriteRegion>,
}

impl SpriteAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: SpriteId, region: SpriteRegion) {
        self.regions.insert(id, region);
    }

    /// Register a sprite by its pixel position within a texture of the given
    /// size.
    pub fn insert_pixels(
        &mut self,
        id: SpriteId,
        texture: TextureId,
        texture_size: Extent2<u32>,
        start: Vec2<u32>,
        extent: Extent2<u32>,
        scaling: SpriteScaling,
    ) {
        let tex = Vec2::new(texture_size.w as f32, texture_size.h as f32);
        let uv_min = Vec2::new(start.x as f32, start.y as f32) / tex;
        let uv_max = Vec2::new(
            (start.x + extent.w) as f32,
            (start.y + extent.h) as f32,
        ) / tex;
        self.insert(id, SpriteRegion {
            texture,
            uv_min,
            uv_max,
            scaling,
        });
    }

    /// Register a sprite whose scaling comes from a resource-pack style
    /// metadata document. Absent metadata means stretch.
    pub fn insert_with_meta(
        &mut self,
        id: SpriteId,
        texture: TextureId,
        uv_min: Vec2<f32>,
        uv_max: Vec2<f32>,
        meta_json: Option<&str>,
    ) -> Result<()> {
        let scaling = match meta_json {
            Some(json) => parse_scaling_meta(json)
                .with_context(|| format!("invalid gui metadata for sprite {}", id))?,
            None => SpriteScaling::Stretch,
        };
        self.insert(id, SpriteRegion {
            texture,
            uv_min,
            uv_max,
            scaling,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl SpriteResolver for SpriteAtlas {
    fn resolve(&self, id: &SpriteId) -> Option<SpriteRegion> {
        self.regions.get(id).copied()
    }
}


// ==== metadata ====

#[derive(Debug, Deserialize)]
struct SpriteMeta {
    #[serde(default)]
    gui: Option<GuiMeta>,
}

#[derive(Debug, Deserialize)]
struct GuiMeta {
    #[serde(default)]
    scaling: Option<ScalingMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ScalingMeta {
    Stretch,
    Tile {
        width: i32,
        height: i32,
    },
    NineSlice {
        width: i32,
        height: i32,
        border: BorderMeta,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BorderMeta {
    Uniform(i32),
    Sides(NineSliceBorder),
}

/// Parse the scaling section of a sprite metadata document.
pub fn parse_scaling_meta(json: &str) -> Result<SpriteScaling> {
    let meta: SpriteMeta = serde_json::from_str(json)?;
    let scaling = meta.gui.and_then(|gui| gui.scaling);
    Ok(match scaling {
        None | Some(ScalingMeta::Stretch) => SpriteScaling::Stretch,
        Some(ScalingMeta::Tile { width, height }) => {
            ensure!(width > 0 && height > 0, "tile size must be positive");
            SpriteScaling::Tile { w: width, h: height }
        }
        Some(ScalingMeta::NineSlice { width, height, border }) => {
            ensure!(width > 0 && height > 0, "nine slice size must be positive");
            let border = match border {
                BorderMeta::Uniform(n) => NineSliceBorder::uniform(n),
                BorderMeta::Sides(sides) => sides,
            };
            ensure!(
                border.left >= 0 && border.top >= 0 && border.right >= 0 && border.bottom >= 0,
                "nine slice border must not be negative",
            );
            ensure!(
                border.left + border.right < width && border.top + border.bottom < height,
                "nine slice border leaves no center",
            );
            SpriteScaling::NineSlice {
                w: width,
                h: height,
                border,
            }
        }
    })
}


#[test]
fn test_sprite_id_default_namespace() {
    let id = SpriteId::new("widget/button");
    assert_eq!(id.as_str(), "minecraft:widget/button");
    assert_eq!(id.namespace(), "minecraft");
    assert_eq!(id.path(), "widget/button");
    assert_eq!(SpriteId::new("realms:icon/news").namespace(), "realms");
}

#[test]
fn test_parse_nine_slice_meta() {
    let scaling = parse_scaling_meta(
        r#"{"gui":{"scaling":{"type":"nine_slice","width":200,"height":20,"border":3}}}"#,
    ).unwrap();
    assert_eq!(scaling, SpriteScaling::NineSlice {
        w: 200,
        h: 20,
        border: NineSliceBorder::uniform(3),
    });

    let scaling = parse_scaling_meta(
        r#"{"gui":{"scaling":{"type":"nine_slice","width":20,"height":20,
            "border":{"left":1,"top":2,"right":3,"bottom":4}}}}"#,
    ).unwrap();
    assert_eq!(scaling, SpriteScaling::NineSlice {
        w: 20,
        h: 20,
        border: NineSliceBorder { left: 1, top: 2, right: 3, bottom: 4 },
    });
}

#[test]
fn test_parse_meta_defaults_and_errors() {
    assert_eq!(parse_scaling_meta("{}").unwrap(), SpriteScaling::Stretch);
    assert_eq!(
        parse_scaling_meta(r#"{"gui":{"scaling":{"type":"tile","width":16,"height":8}}}"#).unwrap(),
        SpriteScaling::Tile { w: 16, h: 8 },
    );
    assert!(parse_scaling_meta(r#"{"gui":{"scaling":{"type":"tile","width":0,"height":8}}}"#).is_err());
    assert!(parse_scaling_meta(r#"{"gui":{"scaling":{"type":"spin"}}}"#).is_err());
    assert!(parse_scaling_meta("not json").is_err());
}
