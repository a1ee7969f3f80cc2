use serde::{Deserialize, Serialize};

/// Scene composition parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneOptions {
    /// Text rendered by the centered mesh.
    pub label: String,
    /// Number of scattered donut/cuboid pairs.
    pub pair_count: usize,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            label: "Saul Newbury".to_owned(),
            pair_count: 70,
        }
    }
}
