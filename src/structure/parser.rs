// Wed Jan 14 2026 - Alex

use crate::structure::{
    CompositeType, FieldType, PrimitiveValue, StructureError, TruncatedInputError, ValueTree,
};
use indexmap::IndexMap;

/// Parses `data` into a value tree shaped like `ty`. Extra trailing bytes are ignored.
pub fn parse(data: &[u8], ty: &CompositeType) -> Result<ValueTree, TruncatedInputError> {
    if data.len() < ty.size() {
        return Err(TruncatedInputError {
            type_name: ty.name().to_string(),
            required: ty.size(),
            actual: data.len(),
        });
    }

    let values = ty.format().unpack(&data[..ty.size()]);
    let mut values = values.into_iter();
    // a format with fewer codes than leaves covers fewer bytes than the fields need
    build_tree(ty, &mut values).ok_or_else(|| TruncatedInputError {
        type_name: ty.name().to_string(),
        required: ty.size(),
        actual: ty.format().size(),
    })
}

fn build_tree(ty: &CompositeType, values: &mut impl Iterator<Item = PrimitiveValue>) -> Option<ValueTree> {
    let mut children = IndexMap::with_capacity(ty.fields().len());
    for field in ty.fields() {
        let node = match field.ty() {
            FieldType::Primitive(_) => ValueTree::Leaf(values.next()?),
            FieldType::Composite(nested) => build_tree(nested, values)?,
        };
        children.insert(field.name().to_string(), node);
    }
    Some(ValueTree::Struct(children))
}

/// Packs a value tree back into bytes. Padding bytes are written as zero.
pub fn encode(tree: &ValueTree, ty: &CompositeType) -> Result<Vec<u8>, StructureError> {
    let mut leaves = Vec::with_capacity(ty.leaf_count());
    collect(tree, ty, &mut leaves)?;
    ty.format()
        .pack(leaves)
        .map_err(StructureError::ValueMismatch)
}

fn collect<'a>(
    tree: &'a ValueTree,
    ty: &CompositeType,
    out: &mut Vec<&'a PrimitiveValue>,
) -> Result<(), StructureError> {
    let ValueTree::Struct(children) = tree else {
        return Err(StructureError::ValueMismatch(format!(
            "expected struct {}, found a leaf",
            ty.name()
        )));
    };
    if children.len() != ty.fields().len() {
        return Err(StructureError::ValueMismatch(format!(
            "{} has {} fields, value has {}",
            ty.name(),
            ty.fields().len(),
            children.len()
        )));
    }

    for field in ty.fields() {
        let child = children.get(field.name()).ok_or_else(|| {
            StructureError::ValueMismatch(format!("missing field {}.{}", ty.name(), field.name()))
        })?;
        match (field.ty(), child) {
            (FieldType::Primitive(prim), ValueTree::Leaf(value)) => {
                if value.ty() != *prim {
                    return Err(StructureError::ValueMismatch(format!(
                        "{}.{} is {}, value is {}",
                        ty.name(),
                        field.name(),
                        prim,
                        value.ty()
                    )));
                }
                out.push(value);
            }
            (FieldType::Composite(nested), _) => collect(child, nested, out)?,
            (FieldType::Primitive(_), ValueTree::Struct(_)) => {
                return Err(StructureError::ValueMismatch(format!(
                    "{}.{} expects a leaf value",
                    ty.name(),
                    field.name()
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{PrimitiveType, StructureBuilder};

    fn pair() -> std::sync::Arc<CompositeType> {
        StructureBuilder::new("B")
            .field("a", PrimitiveType::U8)
            .field("b", PrimitiveType::U16)
            .build()
            .unwrap()
    }

    #[test]
    fn test_parse() {
        let tree = parse(&[0x11, 0xFF, 0x22, 0x22], &pair()).unwrap();
        assert_eq!(tree.get("a").and_then(ValueTree::value), Some(0x11));
        assert_eq!(tree.get("b").and_then(ValueTree::value), Some(0x2222));
    }

    #[test]
    fn test_parse_little_endian() {
        let tree = parse(&[0xFF, 0xFF, 0x33, 0x22], &pair()).unwrap();
        assert_eq!(tree.get("b").and_then(ValueTree::value), Some(0x2233));
    }

    #[test]
    fn test_parse_truncated() {
        let err = parse(&[0x00; 3], &pair()).unwrap_err();
        assert_eq!(err.required, 4);
        assert_eq!(err.actual, 3);
    }

    #[test]
    fn test_parse_signed() {
        let ty = StructureBuilder::new("S")
            .field("s", PrimitiveType::I16)
            .build()
            .unwrap();
        let tree = parse(&[0xFE, 0xFF], &ty).unwrap();
        assert_eq!(tree.get("s").and_then(ValueTree::value), Some(-2));
    }

    #[test]
    fn test_parse_nested_and_arrays() {
        let inner = StructureBuilder::new("Inner")
            .field("x", PrimitiveType::U8)
            .field("y", PrimitiveType::U16)
            .build()
            .unwrap();
        let outer = StructureBuilder::new("Outer")
            .field("inner", inner)
            .array("ids", PrimitiveType::U8, 2)
            .build()
            .unwrap();

        let tree = parse(&[0x01, 0x00, 0x02, 0x00, 0x03, 0x04], &outer).unwrap();
        assert_eq!(tree.path("inner.x").and_then(ValueTree::value), Some(1));
        assert_eq!(tree.path("inner.y").and_then(ValueTree::value), Some(2));
        assert_eq!(tree.path("ids.0").and_then(ValueTree::value), Some(3));
        assert_eq!(tree.path("ids.1").and_then(ValueTree::value), Some(4));
    }

    #[test]
    fn test_build_tree_stops_when_values_run_out() {
        let ty = StructureBuilder::new("Pair")
            .field("a", PrimitiveType::U8)
            .field("b", PrimitiveType::U8)
            .build()
            .unwrap();
        let one = PrimitiveValue::new(PrimitiveType::U8, 1).unwrap();

        assert!(build_tree(&ty, &mut std::iter::once(one)).is_none());
        assert!(build_tree(&ty, &mut std::iter::empty::<PrimitiveValue>()).is_none());
        assert!(build_tree(&ty, &mut std::iter::repeat(one).take(2)).is_some());
    }

    #[test]
    fn test_encode_round_trip() {
        let data = [0x11, 0x00, 0x22, 0x22];
        let ty = pair();
        let tree = parse(&data, &ty).unwrap();
        assert_eq!(encode(&tree, &ty).unwrap(), data.to_vec());
    }

    #[test]
    fn test_encode_rejects_wrong_shape() {
        let ty = pair();
        let other = StructureBuilder::new("C")
            .field("a", PrimitiveType::U8)
            .build()
            .unwrap();
        let tree = parse(&[0x01], &other).unwrap();
        assert!(matches!(encode(&tree, &ty), Err(StructureError::ValueMismatch(_))));
    }
}
