//! Centralized viewport options with TOML preset support.
//!
//! Every tunable the showcase uses (camera, layout, interaction, motion,
//! marquee, lighting, display, assets) is consolidated here. Options
//! serialize to/from TOML so a host can ship a preset next to its models.

mod assets;
mod camera;
mod display;
mod interaction;
mod layout;
mod lighting;
mod marquee;
mod motion;

use std::path::Path;

pub use assets::AssetOptions;
pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use interaction::InteractionOptions;
pub use layout::LayoutOptions;
pub use lighting::{DirectionalLight, LightingOptions, MAX_DIRECTIONAL_LIGHTS};
pub use marquee::MarqueeOptions;
pub use motion::MotionOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::VitrineError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[motion]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Fixed camera projection.
    pub camera: CameraOptions,
    /// Responsive arrangement.
    pub layout: LayoutOptions,
    /// Drag and swipe mapping.
    pub interaction: InteractionOptions,
    /// Easing and idle auto-return.
    pub motion: MotionOptions,
    /// Marquee speed tiers.
    pub marquee: MarqueeOptions,
    /// Ambient and directional lights.
    pub lighting: LightingOptions,
    /// Output surface.
    pub display: DisplayOptions,
    /// Model lineup.
    #[schemars(skip)]
    pub assets: AssetOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VitrineError> {
        let content =
            std::fs::read_to_string(path).map_err(VitrineError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, VitrineError> {
        toml::from_str(content)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VitrineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VitrineError::Io)?;
        }
        std::fs::write(path, content).map_err(VitrineError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[motion]
ease_factor = 0.2
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.motion.ease_factor, 0.2);
        // Everything else should be default
        assert_eq!(opts.motion.idle_delay_ms, 1000);
        assert_eq!(opts.camera.fovy, 40.0);
        assert_eq!(opts.assets.models.len(), 3);
        assert_eq!(opts.lighting.directional.len(), MAX_DIRECTIONAL_LIGHTS);
    }

    #[test]
    fn custom_lineup_replaces_defaults() {
        let toml_str = r#"
[assets]
directory = "models"

[[assets.models]]
file_name = "crate.glb"

[[assets.models]]
file_name = "barrel.glb"
adjustment = { scale = [2.0, 2.0, 2.0] }
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.assets.models.len(), 2);
        assert_eq!(opts.assets.models[1].adjustment.scale.x, 2.0);
        assert_eq!(opts.assets.models[0].adjustment.scale.x, 1.0);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera\nfovy = ").unwrap_err();
        assert!(matches!(err, VitrineError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir()
            .join(format!("vitrine-options-{}", std::process::id()));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.layout.mobile_breakpoint = 820.0;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        for section in [
            "camera",
            "layout",
            "interaction",
            "motion",
            "marquee",
            "lighting",
            "display",
        ] {
            assert!(props.contains_key(section), "missing {section}");
        }
        assert!(!props.contains_key("assets"));

        let lighting = &props["lighting"]["properties"];
        assert!(lighting.get("ambient").is_some());
        assert!(lighting.get("directional").is_none());
    }
}
