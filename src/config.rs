// Tue Jan 13 2026 - Alex

use crate::structure::{AnnotationContent, AnnotationPlacement, RenderOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub image: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    pub render: RenderOptions,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image: None,
            schema: None,
            render: RenderOptions::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&text)?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn with_image(mut self, image: PathBuf) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_schema(mut self, schema: PathBuf) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_annotations(mut self, content: AnnotationContent, placement: AnnotationPlacement) -> Self {
        self.render.content = content;
        self.render.placement = placement;
        self
    }

    pub fn with_fields_per_line(mut self, fields_per_line: usize) -> Self {
        self.render.fields_per_line = fields_per_line;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        self.render.validate()
    }
}
