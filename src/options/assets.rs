use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::asset::{default_descriptors, AssetDescriptor};

/// Where models come from and how each is fine-tuned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetOptions {
    /// Directory descriptor file names are resolved against.
    pub directory: PathBuf,
    /// Ordered lineup; index is the display slot.
    pub models: Vec<AssetDescriptor>,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("assets/models"),
            models: default_descriptors(),
        }
    }
}
