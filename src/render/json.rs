//! JSON renderers — the model payload for the browser.
//!
//! Markup inside doc text is written as is; `serde_json` only escapes what
//! JSON itself requires, so `<b>` stays `<b>`.

use crate::model::DocumentationModel;
use crate::render::Renderer;
use anyhow::{Context, Result};

/// Single-line JSON, the production payload.
pub struct CompactJsonRenderer;

impl Renderer for CompactJsonRenderer {
    fn render(&self, model: &DocumentationModel) -> Result<String> {
        serde_json::to_string(model).context("failed to serialize documentation model")
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

/// Indented JSON for inspecting the model by hand.
pub struct PrettyJsonRenderer;

impl Renderer for PrettyJsonRenderer {
    fn render(&self, model: &DocumentationModel) -> Result<String> {
        serde_json::to_string_pretty(model).context("failed to serialize documentation model")
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
