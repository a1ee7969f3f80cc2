use serde::{Deserialize, Serialize};

/// Font and texture file locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetOptions {
    /// Typeface JSON font file.
    pub font_path: String,
    /// Matcap image sampled by the matcap material.
    pub matcap_path: String,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            font_path: "assets/fonts/helvetiker_regular.typeface.json"
                .to_owned(),
            matcap_path: "assets/textures/matcap.png".to_owned(),
        }
    }
}
