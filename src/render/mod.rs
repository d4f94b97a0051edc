//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod legacy;

use crate::model::DocumentationModel;
use anyhow::{anyhow, Context, Result};

/// Trait for rendering the documentation model into a specific output format.
pub trait Renderer {
    fn render(&self, model: &DocumentationModel) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "compact" | "json" => Ok(Box::new(json::CompactJsonRenderer)),
        "pretty" => Ok(Box::new(json::PrettyJsonRenderer)),
        "legacy" => Ok(Box::new(legacy::LegacyJsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use compact, pretty, or legacy",
            format
        )),
    }
}

/// Compact payload bytes handed to the page assembler.
pub fn serialize(model: &DocumentationModel) -> Result<Vec<u8>> {
    serde_json::to_vec(model).context("failed to serialize documentation model")
}

/// Read a payload produced by [`serialize`] back into a model.
pub fn deserialize(bytes: &[u8]) -> Result<DocumentationModel> {
    serde_json::from_slice(bytes).context("failed to parse documentation model")
}
