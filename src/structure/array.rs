// Wed Jan 14 2026 - Alex

use crate::structure::layout::compile_declarations;
use crate::structure::{
    BuiltinTypes, CompositeType, DeclarationError, FieldDeclaration, FieldIssue, FieldType,
};
use std::sync::Arc;

/// Builds the struct type for `count` consecutive elements of `element`.
///
/// Elements are anonymous fields named by their index. When the result is nested
/// under a field `parent`, the flattened annotation names become `parent_i` for
/// primitive elements and `parent_i_inner` for struct elements.
pub fn synthesize_array(
    element: impl Into<FieldType>,
    count: usize,
) -> Result<Arc<CompositeType>, DeclarationError> {
    let element = element.into();
    let name = format!("{}[{}]", element.name(), count);

    if count == 0 {
        return Err(DeclarationError::new(
            name.clone(),
            vec![FieldIssue::InvalidCount { field: name, count: 0 }],
        ));
    }

    let elements: Vec<FieldDeclaration> = (0..count)
        .map(|i| FieldDeclaration::anonymous(i, element.clone()))
        .collect();

    compile_declarations(name, &elements, &BuiltinTypes, true)
}
