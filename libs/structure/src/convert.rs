//! Structure → map conversion and related field walks.
//!
//! Every operation accepts a structure or exactly one level of pointer to a
//! structure (`&S`, `Box<S>`, ...). Anything else, including a pointer to a
//! pointer, is a [`TypeError`].

use crate::error::TypeError;
use crate::field::Field;
use crate::reflect::{Reflect, Structure};
use crate::value::{Map, Value};

/// Convert a structure into a map of resolved key → field value.
///
/// Keys come from `#[structure = "..."]` tags, falling back to the declared
/// field name. Only exported fields are included. When two fields resolve to
/// the same key, the later one wins.
pub fn to_map<T: Reflect + ?Sized>(input: &T) -> Result<Map<'_>, TypeError> {
    Ok(structure_map(resolve(input)?))
}

/// Exported field values in declaration order.
pub fn values<T: Reflect + ?Sized>(input: &T) -> Result<Vec<Value<'_>>, TypeError> {
    let mut out = Vec::new();
    walk(resolve(input)?, &mut |_, value| out.push(value.to_value()));
    Ok(out)
}

/// Declared names of the exported fields in declaration order.
pub fn fields<T: Reflect + ?Sized>(input: &T) -> Result<Vec<&'static str>, TypeError> {
    let mut out = Vec::new();
    walk(resolve(input)?, &mut |field, _| out.push(field.name()));
    Ok(out)
}

/// Declared type name of the structure.
pub fn name<T: Reflect + ?Sized>(input: &T) -> Result<&'static str, TypeError> {
    resolve(input).map(|s| s.name())
}

pub fn is_struct<T: Reflect + ?Sized>(input: &T) -> bool {
    resolve(input).is_ok()
}

/// Map of an already resolved structure. Used by derived `Reflect::to_value`
/// to convert nested structures.
pub fn structure_map(structure: &dyn Structure) -> Map<'_> {
    let mut map = Map::new();
    walk(structure, &mut |field, value| {
        let key = field.key();
        if map.insert(key.to_owned(), value.to_value()).is_some() {
            tracing::debug!(key, "duplicate structure key, earlier value overwritten");
        }
    });
    tracing::trace!(
        structure = structure.name(),
        entries = map.len(),
        "converted structure to map"
    );
    map
}

fn resolve<T: Reflect + ?Sized>(input: &T) -> Result<&dyn Structure, TypeError> {
    if let Some(structure) = input.as_structure() {
        return Ok(structure);
    }
    match input.pointee_kind() {
        Some(pointee) => input
            .pointee_structure()
            .ok_or(TypeError::NotStructPointer(pointee)),
        None => Err(TypeError::NotStruct(input.kind())),
    }
}

/// Visit exported fields in order, descending into flattened structures.
fn walk<'a>(structure: &'a dyn Structure, visit: &mut dyn FnMut(&Field<'a>, &'a dyn Reflect)) {
    for field in structure.fields() {
        let Some(value) = field.value() else {
            continue;
        };
        if field.is_flatten() {
            if let Ok(nested) = resolve(value) {
                walk(nested, visit);
                continue;
            }
        }
        visit(&field, value);
    }
}
