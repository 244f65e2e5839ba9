use crate::reflect::Kind;

/// Input did not resolve to a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("expected struct or pointer to struct, got {0}")]
    NotStruct(Kind),

    #[error("expected struct or pointer to struct, got pointer to {0}")]
    NotStructPointer(Kind),
}

impl TypeError {
    /// Kind of the value that was rejected (the pointee for pointers).
    pub fn kind(&self) -> Kind {
        match self {
            TypeError::NotStruct(kind) | TypeError::NotStructPointer(kind) => *kind,
        }
    }
}
