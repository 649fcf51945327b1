//! Persistent GUI preferences.

use std::{
    path::Path,
    fs::File,
    io::{
        BufReader,
        BufWriter,
    },
};
use serde::{Serialize, Deserialize};
use anyhow::*;


pub const SETTINGS_FILE_NAME: &'static str = "gui_settings.json";


/// What the screen reader is asked to speak.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarratorMode {
    Off,
    All,
    Chat,
    System,
}

impl NarratorMode {
    /// Whether widget narration should be produced at all.
    pub fn narrates_widgets(self) -> bool {
        matches!(self, NarratorMode::All | NarratorMode::System)
    }
}

/// GUI settings. A client-side global resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiSettings {
    /// Integer GUI scale, or 0 to pick the largest that fits.
    pub gui_scale: u32,
    pub narrator: NarratorMode,
    /// How long the cursor must rest on a widget before its tooltip shows.
    pub tooltip_delay_ms: u64,
    /// Multiplier applied to mouse wheel scrolling in lists.
    pub scroll_sensitivity: f32,
    /// Whether labels that don't fit scroll back and forth, rather than
    /// being cut off.
    pub marquee_text: bool,
    /// Opacity of the backdrop behind text, `0.0..=1.0`.
    pub text_background_opacity: f32,
}

impl Default for GuiSettings {
    fn default() -> Self {
        GuiSettings {
            gui_scale: 0,
            narrator: NarratorMode::Off,
            tooltip_delay_ms: 500,
            scroll_sensitivity: 1.0,
            marquee_text: true,
            text_background_opacity: 0.5,
        }
    }
}

impl GuiSettings {
    pub fn read(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::try_read(path).unwrap_or_else(|e| {
            debug!(%e, path=%path.display(), "using default gui settings");
            Self::default()
        })
    }

    pub fn try_read(path: impl AsRef<Path>) -> Result<Self> {
        let settings: Self = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), self)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.text_background_opacity),
            "text background opacity {} out of range",
            self.text_background_opacity,
        );
        ensure!(
            self.scroll_sensitivity.is_finite() && self.scroll_sensitivity > 0.0,
            "scroll sensitivity must be positive",
        );
        Ok(())
    }

    /// Largest integer scale at which a GUI of `min_size` logical pixels
    /// still fits in a window of `window` physical pixels, capped by the
    /// configured scale when it isn't auto.
    pub fn effective_scale(&self, window: vek::Extent2<u32>, min_size: vek::Extent2<u32>) -> u32 {
        let mut scale = 1;
        while (self.gui_scale == 0 || scale < self.gui_scale)
            && window.w >= min_size.w * (scale + 1)
            && window.h >= min_size.h * (scale + 1)
        {
            scale += 1;
        }
        scale
    }
}


#[cfg(test)]
fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("{}-{}-{}", name, std::process::id(), SETTINGS_FILE_NAME))
}

#[test]
fn test_settings_round_trip_file() {
    let path = temp_path("round-trip");
    let mut settings = GuiSettings::default();
    settings.narrator = NarratorMode::All;
    settings.gui_scale = 3;
    settings.write(&path).unwrap();
    assert_eq!(GuiSettings::try_read(&path).unwrap(), settings);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_settings_missing_or_invalid_defaults() {
    let path = temp_path("missing");
    assert_eq!(GuiSettings::read(&path), GuiSettings::default());

    let path = temp_path("invalid");
    std::fs::write(&path, r#"{"text_background_opacity": 4.0}"#).unwrap();
    assert!(GuiSettings::try_read(&path).is_err());
    assert_eq!(GuiSettings::read(&path), GuiSettings::default());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_settings_partial_file_fills_defaults() {
    let path = temp_path("partial");
    std::fs::write(&path, r#"{"narrator": "system"}"#).unwrap();
    let settings = GuiSettings::try_read(&path).unwrap();
    assert_eq!(settings.narrator, NarratorMode::System);
    assert_eq!(settings.tooltip_delay_ms, 500);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_effective_scale() {
    let auto = GuiSettings::default();
    let min = vek::Extent2::new(320, 240);
    assert_eq!(auto.effective_scale(vek::Extent2::new(1920, 1080), min), 4);
    assert_eq!(auto.effective_scale(vek::Extent2::new(100, 100), min), 1);
    let fixed = GuiSettings { gui_scale: 2, ..GuiSettings::default() };
    assert_eq!(fixed.effective_scale(vek::Extent2::new(1920, 1080), min), 2);
}
