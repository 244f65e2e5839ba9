use std::fmt;

use crate::reflect::Reflect;

/// Descriptor of one declared field of a structure.
///
/// Built by `#[derive(Structure)]`. Exported fields carry a borrowed
/// accessor to the current value; hidden fields carry only their metadata.
pub struct Field<'a> {
    name: &'static str,
    tag: Option<&'static str>,
    flatten: bool,
    value: Option<&'a dyn Reflect>,
}

impl<'a> Field<'a> {
    pub fn exported(
        name: &'static str,
        tag: Option<&'static str>,
        flatten: bool,
        value: &'a dyn Reflect,
    ) -> Self {
        Self { name, tag, flatten, value: Some(value) }
    }

    pub fn hidden(name: &'static str, tag: Option<&'static str>) -> Self {
        Self { name, tag, flatten: false, value: None }
    }

    /// Declared field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    /// Output key: the tag when present and non-empty, else the declared name.
    pub fn key(&self) -> &'static str {
        match self.tag {
            Some(tag) if !tag.is_empty() => tag,
            _ => self.name,
        }
    }

    pub fn is_exported(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_flatten(&self) -> bool {
        self.flatten
    }

    /// Accessor to the current value. `None` for hidden fields.
    pub fn value(&self) -> Option<&'a dyn Reflect> {
        self.value
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("exported", &self.is_exported())
            .field("flatten", &self.flatten)
            .finish()
    }
}
