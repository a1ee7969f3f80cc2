use serde::{Deserialize, Serialize};

/// Which material every mesh is drawn with.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Color by view-space normal.
    #[default]
    Normal,
    /// Sample a sphere-capture image by view-space normal. Falls back to
    /// `Normal` when no matcap texture is available.
    Matcap,
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DisplayOptions {
    /// Material applied to every mesh in the scene.
    pub material: Material,
}
