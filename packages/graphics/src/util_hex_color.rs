
use vek::*;


/// Convert a `0xRRGGBBAA` literal to a float color.
pub fn hex_color(hex: u32) -> Rgba<f32> {
    Rgba {
        r: ((hex & 0xFF000000) >> 24) as f32 / 255.0,
        g: ((hex & 0x00FF0000) >> 16) as f32 / 255.0,
        b: ((hex & 0x0000FF00) >> 8) as f32 / 255.0,
        a: (hex & 0x000000FF) as f32 / 255.0,
    }
}

/// Same color with its alpha multiplied by `alpha`, for fading widgets.
pub fn with_alpha(color: Rgba<f32>, alpha: f32) -> Rgba<f32> {
    Rgba {
        a: color.a * alpha,
        ..color
    }
}


#[test]
fn test_hex_color_channels() {
    let c = hex_color(0xFF8000FF);
    assert_eq!(c.r, 1.0);
    assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
    assert_eq!(c.b, 0.0);
    assert_eq!(c.a, 1.0);
    assert_eq!(with_alpha(c, 0.5).a, 0.5);
}
