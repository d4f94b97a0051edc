//! Legacy JSON renderer — `{"package": ["Type", ...]}` for the old tree script.

use crate::model::DocumentationModel;
use crate::render::Renderer;
use anyhow::{Context, Result};
use std::collections::BTreeMap;

pub struct LegacyJsonRenderer;

impl Renderer for LegacyJsonRenderer {
    fn render(&self, model: &DocumentationModel) -> Result<String> {
        let mut legacy: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for package in &model.packages {
            legacy
                .entry(package.name.as_str())
                .or_default()
                .extend(package.types.iter().map(|t| t.name()));
        }
        serde_json::to_string(&legacy).context("failed to serialize legacy package map")
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
