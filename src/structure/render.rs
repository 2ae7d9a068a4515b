// Thu Jan 15 2026 - Alex

use crate::structure::annotation::{annotate, indentation};
use crate::structure::{
    AnnotationContent, AnnotationPlacement, CompositeType, PrimitiveValue, StructureError,
    ValueTree,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub content: AnnotationContent,
    pub placement: AnnotationPlacement,
    /// Indentation level of the values; braces sit one level out.
    pub indent: usize,
    pub fields_per_line: usize,
    /// Minimum hex digits per value. Values never use fewer than two per byte.
    pub min_digits: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            content: AnnotationContent::None,
            placement: AnnotationPlacement::None,
            indent: 1,
            fields_per_line: 1,
            min_digits: 0,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_annotations(mut self, content: AnnotationContent, placement: AnnotationPlacement) -> Self {
        self.content = content;
        self.placement = placement;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_fields_per_line(mut self, fields_per_line: usize) -> Self {
        self.fields_per_line = fields_per_line;
        self
    }

    pub fn with_min_digits(mut self, min_digits: usize) -> Self {
        self.min_digits = min_digits;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.fields_per_line == 0 {
            return Err("fields_per_line must be greater than 0".to_string());
        }
        if self.min_digits > 16 {
            return Err("min_digits must be at most 16".to_string());
        }
        if self.content != AnnotationContent::None && self.placement == AnnotationPlacement::None {
            return Err("annotation content requires a placement other than none".to_string());
        }
        Ok(())
    }
}

pub fn format_hex(value: &PrimitiveValue, min_digits: usize) -> String {
    let digits = (value.ty().size() * 2).max(min_digits);
    format!("0x{:0digits$X}", value.bits(), digits = digits)
}

/// Renders `tree` as a flat C initializer for `ty`.
pub fn render(tree: &ValueTree, ty: &CompositeType, options: &RenderOptions) -> Result<String, StructureError> {
    let notes = annotate(ty, options.content, options.placement, options.indent);
    render_with_annotations(tree, &notes, options)
}

/// Same as [`render`] with annotation prefixes computed ahead of time.
pub fn render_with_annotations(
    tree: &ValueTree,
    notes: &[String],
    options: &RenderOptions,
) -> Result<String, StructureError> {
    let leaves = tree.leaves();
    if leaves.len() != notes.len() {
        return Err(StructureError::ValueMismatch(format!(
            "{} values but {} annotations",
            leaves.len(),
            notes.len()
        )));
    }

    let outer = indentation(options.indent.saturating_sub(1));
    if leaves.is_empty() {
        return Ok(format!("{}{{}}", outer));
    }

    let indent = indentation(options.indent);
    let strip = |note: &str| -> String {
        note.strip_prefix(indent.as_str()).unwrap_or(note).to_string()
    };
    let hex: Vec<String> = leaves
        .iter()
        .map(|value| format_hex(value, options.min_digits))
        .collect();
    let per_line = options.fields_per_line.max(1);

    if per_line >= leaves.len() {
        let body = hex
            .iter()
            .zip(notes)
            .map(|(value, note)| format!("{}{}", strip(note.as_str()), value))
            .join(", ");
        return Ok(format!("{}{{ {} }}", outer, body));
    }

    // column alignment only matters when values share a line
    let width = if per_line > 1 {
        hex.iter().map(String::len).max().unwrap_or(0)
    } else {
        0
    };

    let lines = hex
        .iter()
        .zip(notes)
        .chunks(per_line)
        .into_iter()
        .map(|line| {
            line.enumerate()
                .map(|(i, (value, note))| {
                    let note = if i == 0 { note.clone() } else { strip(note.as_str()) };
                    format!("{}{:>width$}", note, value, width = width)
                })
                .join(", ")
        })
        .join(",\n");

    Ok(format!("{}{{\n{}\n{}}}", outer, lines, outer))
}
