// Tue Jan 13 2026 - Alex

use crate::structure::{AnnotationData, CompositeType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableLayout {
    pub name: String,
    pub size: usize,
    pub alignment: usize,
    pub format: String,
    pub synthetic: bool,
    pub fields: Vec<AnnotationData>,
}

impl From<&CompositeType> for SerializableLayout {
    fn from(layout: &CompositeType) -> Self {
        Self {
            name: layout.name().to_string(),
            size: layout.size(),
            alignment: layout.alignment(),
            format: layout.format().to_string(),
            synthetic: layout.is_synthetic(),
            fields: layout.annotations().to_vec(),
        }
    }
}
