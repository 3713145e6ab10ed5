//! Field-by-field comparison of records.
//!
//! Two records descend into their fields only when their tags agree; a tag
//! mismatch is an ordinary unequal verdict, same as any other shape
//! difference. Fields pair by name, so declaration order never matters, and
//! a field present on one side but absent on the other ends the comparison
//! at that field's path.

use crate::errors::Result;
use crate::reflect::RecordView;
use crate::report::{describe, PathSegment};

use super::dispatch::Walk;

pub(crate) fn equal_records(
    walk: &mut Walk<'_>,
    left: &RecordView<'_>,
    right: &RecordView<'_>,
) -> Result<bool> {
    if left.tag != right.tag {
        walk.note_described(
            format!("record tagged {}", left.tag.name()),
            format!("record tagged {}", right.tag.name()),
        );
        return Ok(false);
    }
    if left.fields.len() != right.fields.len() {
        walk.note_described(
            format!("record with {} fields", left.fields.len()),
            format!("record with {} fields", right.fields.len()),
        );
        return Ok(false);
    }
    for field in &left.fields {
        let Some(counterpart) = right.field(field.name) else {
            walk.push(PathSegment::Field(field.name.to_string()));
            walk.note_described(describe(field.value), String::from("absent"));
            walk.pop();
            return Ok(false);
        };
        walk.push(PathSegment::Field(field.name.to_string()));
        let same = walk.compare(field.value, counterpart);
        walk.pop();
        match same {
            Ok(true) => continue,
            other => return other,
        }
    }
    Ok(true)
}
