// Thu Jan 15 2026 - Alex

use crate::structure::CompositeType;
use serde::{Deserialize, Serialize};

/// Name, size and offset of one leaf field, relative to the outermost struct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationData {
    pub name: String,
    pub size: usize,
    pub offset: usize,
}

impl AnnotationData {
    pub fn new(name: impl Into<String>, size: usize, offset: usize) -> Self {
        Self {
            name: name.into(),
            size,
            offset,
        }
    }
}

/// What each annotation says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationContent {
    #[default]
    None,
    Name,
    Offset,
    Size,
}

impl AnnotationContent {
    pub fn describe(self, data: &[AnnotationData]) -> Vec<String> {
        match self {
            Self::None => vec![String::new(); data.len()],
            Self::Name => data.iter().map(|entry| entry.name.to_uppercase()).collect(),
            Self::Offset => data
                .iter()
                .map(|entry| format!("Offset: 0x{:02X}", entry.offset))
                .collect(),
            Self::Size => data
                .iter()
                .map(|entry| format!("Size: 0x{:02X}", entry.size))
                .collect(),
        }
    }
}

/// Where each annotation goes relative to its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationPlacement {
    #[default]
    None,
    Inline,
    Above,
}

pub const INDENT_UNIT: &str = "\t";

pub fn indentation(level: usize) -> String {
    INDENT_UNIT.repeat(level)
}

impl AnnotationPlacement {
    /// Wraps each note so it can be prefixed directly to its value.
    pub fn place(self, notes: &[String], level: usize) -> Vec<String> {
        let indent = indentation(level);
        match self {
            Self::None => vec![indent; notes.len()],
            Self::Inline => {
                let width = notes.iter().map(|n| n.chars().count()).max().unwrap_or(0);
                notes
                    .iter()
                    .map(|note| format!("{}/* {} */ ", indent, center(note, width)))
                    .collect()
            }
            Self::Above => notes
                .iter()
                .enumerate()
                .map(|(i, note)| {
                    let separator = if i == 0 { "" } else { "\n" };
                    format!("{}{}// {}\n{}", separator, indent, note, indent)
                })
                .collect(),
        }
    }
}

/// Annotation prefixes for every leaf of `ty`, in layout order.
pub fn annotate(
    ty: &CompositeType,
    content: AnnotationContent,
    placement: AnnotationPlacement,
    level: usize,
) -> Vec<String> {
    let notes = content.describe(ty.annotations());
    placement.place(&notes, level)
}

/// Pads `text` with spaces to `width`; odd padding goes to the right unless `width` is odd.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{PrimitiveType, StructureBuilder};

    fn sample_data() -> Vec<AnnotationData> {
        vec![AnnotationData::new("a", 1, 0), AnnotationData::new("b", 4, 4)]
    }

    fn notes(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_content_modes() {
        let data = sample_data();
        assert_eq!(AnnotationContent::Name.describe(&data), notes(&["A", "B"]));
        assert_eq!(
            AnnotationContent::Offset.describe(&data),
            notes(&["Offset: 0x00", "Offset: 0x04"])
        );
        assert_eq!(AnnotationContent::Size.describe(&data), notes(&["Size: 0x01", "Size: 0x04"]));
        assert_eq!(AnnotationContent::None.describe(&data), notes(&["", ""]));
    }

    #[test]
    fn test_place_above() {
        let placed = AnnotationPlacement::Above.place(&notes(&["fieldA", "fieldB"]), 1);
        assert_eq!(placed, notes(&["\t// fieldA\n\t", "\n\t// fieldB\n\t"]));
        assert!(!placed[0].starts_with('\n'));
    }

    #[test]
    fn test_place_above_indents() {
        let placed = AnnotationPlacement::Above.place(&notes(&["a", "b", "c"]), 2);
        for note in &placed {
            assert!(note.trim_start_matches('\n').starts_with("\t\t"));
        }
    }

    #[test]
    fn test_place_inline() {
        let placed = AnnotationPlacement::Inline.place(&notes(&["fieldA", "fieldB"]), 1);
        assert_eq!(placed, notes(&["\t/* fieldA */ ", "\t/* fieldB */ "]));

        let placed = AnnotationPlacement::Inline.place(&notes(&["a", "bc"]), 3);
        assert!(placed.iter().all(|p| p.starts_with("\t\t\t")));
    }

    #[test]
    fn test_place_inline_centers() {
        let placed = AnnotationPlacement::Inline.place(&notes(&["ID", "COUNT"]), 0);
        assert_eq!(placed, notes(&["/*   ID  */ ", "/* COUNT */ "]));
    }

    #[test]
    fn test_place_none_is_indentation() {
        let placed = AnnotationPlacement::None.place(&notes(&["x", "y"]), 2);
        assert_eq!(placed, notes(&["\t\t", "\t\t"]));
    }

    #[test]
    fn test_center() {
        assert_eq!(center("A", 2), "A ");
        assert_eq!(center("ab", 5), "  ab ");
        assert_eq!(center("abc", 3), "abc");
    }

    #[test]
    fn test_annotate_struct() {
        let ty = StructureBuilder::new("B")
            .field("a", PrimitiveType::U8)
            .field("b", PrimitiveType::U16)
            .build()
            .unwrap();
        assert_eq!(
            annotate(&ty, AnnotationContent::Name, AnnotationPlacement::Inline, 1),
            notes(&["\t/* A */ ", "\t/* B */ "])
        );
        assert_eq!(
            annotate(&ty, AnnotationContent::Name, AnnotationPlacement::Above, 1),
            notes(&["\t// A\n\t", "\n\t// B\n\t"])
        );
    }
}
