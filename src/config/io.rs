use std::fs;
use std::path::Path;

use super::{LayoutSpec, Result};

fn is_yaml(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    matches!(extension.as_str(), "yaml" | "yml")
}

/// Reads a layout as YAML (`.yaml`/`.yml`) or JSON (anything else).
pub fn load_layout(path: impl AsRef<Path>) -> Result<LayoutSpec> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let layout = if is_yaml(path) {
        serde_yaml::from_str::<LayoutSpec>(&raw)?
    } else {
        serde_json::from_str::<LayoutSpec>(&raw)?
    };
    layout.validate()?;
    Ok(layout)
}

pub fn save_layout(path: impl AsRef<Path>, layout: &LayoutSpec) -> Result<()> {
    let path = path.as_ref();
    let serialized = if is_yaml(path) {
        serde_yaml::to_string(layout)?
    } else {
        serde_json::to_string_pretty(layout)?
    };
    fs::write(path, serialized)?;
    Ok(())
}
