extern crate self as structure;

pub mod convert;
pub mod error;
pub mod field;
pub mod reflect;
pub mod value;

pub use structure_derive::Structure;

pub use convert::{fields, is_struct, name, to_map, values};
pub use error::TypeError;
pub use field::Field;
pub use reflect::{Kind, Reflect, Structure};
pub use value::{Map, Value};
