//! Centralized scene options with TOML support.
//!
//! Asset paths, camera projection, scene composition, and display
//! settings are consolidated here. Options serialize to/from TOML; every
//! sub-struct uses `#[serde(default)]` so a partial file only overrides
//! what it names.

mod assets;
mod camera;
mod display;
mod scene;

use std::path::Path;

pub use assets::AssetOptions;
pub use camera::CameraOptions;
pub use display::{DisplayOptions, Material};
pub use scene::SceneOptions;
use serde::{Deserialize, Serialize};

use crate::error::MarqueeError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Font and texture file locations.
    pub assets: AssetOptions,
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Scene composition parameters.
    pub scene: SceneOptions,
    /// Display settings.
    pub display: DisplayOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MarqueeError> {
        let content = std::fs::read_to_string(path).map_err(MarqueeError::Io)?;
        toml::from_str(&content)
            .map_err(|e| MarqueeError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MarqueeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MarqueeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MarqueeError::Io)?;
        }
        std::fs::write(path, content).map_err(MarqueeError::Io)
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
        let toml_str = r#"
[scene]
pair_count = 12

[display]
material = "matcap"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.scene.pair_count, 12);
        assert_eq!(opts.display.material, Material::Matcap);
        // Everything else should be default
        assert_eq!(opts.scene.label, "Saul Newbury");
        assert_eq!(opts.camera.fovy, 75.0);
    }

    #[test]
    fn unknown_material_is_rejected() {
        let toml_str = r#"
[display]
material = "phong"
"#;
        assert!(toml::from_str::<Options>(toml_str).is_err());
    }
}
