use std::borrow::Cow;
use std::collections::HashMap;

use serde::ser::{Serialize, Serializer};

use crate::reflect::Kind;

/// Result of converting a structure: resolved key → field value.
pub type Map<'a> = HashMap<String, Value<'a>>;

/// Dynamically typed field value.
///
/// Keeps the type family of the field it was read from:
/// - Scalars: copied, width preserved (`i32` stays `I32`)
/// - Strings: `Cow`, borrowed from the structure when possible
/// - Sequences, maps, nested structures: recursive
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),
    Char(char),
    Str(Cow<'a, str>),

    Seq(Vec<Value<'a>>),
    /// String-keyed map, or a nested structure converted to its map.
    Map(Map<'a>),

    /// `None`.
    Null,
}

impl<'a> Value<'a> {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) | Value::I128(_) => {
                Kind::Int
            }
            Value::U8(_) | Value::U16(_) | Value::U32(_) | Value::U64(_) | Value::U128(_) => {
                Kind::Uint
            }
            Value::F32(_) | Value::F64(_) => Kind::Float,
            Value::Char(_) => Kind::Char,
            Value::Str(_) => Kind::String,
            Value::Seq(_) => Kind::Seq,
            Value::Map(_) => Kind::Map,
            Value::Null => Kind::Option,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map<'a>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Detach the value from the structure it was read from.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Bool(v) => Value::Bool(v),
            Value::I8(v) => Value::I8(v),
            Value::I16(v) => Value::I16(v),
            Value::I32(v) => Value::I32(v),
            Value::I64(v) => Value::I64(v),
            Value::I128(v) => Value::I128(v),
            Value::U8(v) => Value::U8(v),
            Value::U16(v) => Value::U16(v),
            Value::U32(v) => Value::U32(v),
            Value::U64(v) => Value::U64(v),
            Value::U128(v) => Value::U128(v),
            Value::F32(v) => Value::F32(v),
            Value::F64(v) => Value::F64(v),
            Value::Char(v) => Value::Char(v),
            Value::Str(s) => Value::Str(Cow::Owned(s.into_owned())),
            Value::Seq(items) => Value::Seq(items.into_iter().map(Value::into_owned).collect()),
            Value::Map(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, v.into_owned()))
                    .collect(),
            ),
            Value::Null => Value::Null,
        }
    }
}

impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::I128(v) => serializer.serialize_i128(*v),
            Value::U8(v) => serializer.serialize_u8(*v),
            Value::U16(v) => serializer.serialize_u16(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::U128(v) => serializer.serialize_u128(*v),
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Char(v) => serializer.serialize_char(*v),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Seq(items) => serializer.collect_seq(items),
            Value::Map(map) => serializer.collect_map(map),
            Value::Null => serializer.serialize_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// From impls: plain Rust values → Value
// ---------------------------------------------------------------------------

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    f32 => F32,
    f64 => F64,
    char => Char,
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Str(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Str(Cow::Owned(s))
    }
}

impl<'a> From<Map<'a>> for Value<'a> {
    fn from(map: Map<'a>) -> Self {
        Value::Map(map)
    }
}

impl<'a, T: Into<Value<'a>>> From<Vec<T>> for Value<'a> {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_owned_keeps_content() {
        let text = String::from("borrowed");
        let value = Value::Seq(vec![Value::from(text.as_str()), Value::I32(7)]);
        let owned: Value<'static> = value.into_owned();
        drop(text);
        assert_eq!(
            owned,
            Value::Seq(vec![Value::from("borrowed".to_string()), Value::I32(7)])
        );
    }

    #[test]
    fn serializes_as_plain_json() {
        let mut map = Map::new();
        map.insert("name".into(), Value::from("Arslan"));
        map.insert("id".into(), Value::I32(123456));
        map.insert("tags".into(), Value::from(vec!["a", "b"]));
        map.insert("parent".into(), Value::Null);

        let json = serde_json::to_value(Value::Map(map)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Arslan",
                "id": 123456,
                "tags": ["a", "b"],
                "parent": null,
            })
        );
    }

    #[test]
    fn kind_follows_type_family() {
        assert_eq!(Value::U16(1).kind(), Kind::Uint);
        assert_eq!(Value::I8(-1).kind(), Kind::Int);
        assert_eq!(Value::U128(u128::MAX).kind(), Kind::Uint);
        assert_eq!(Value::from("x").kind(), Kind::String);
        assert_eq!(Value::from(None::<bool>).kind(), Kind::Option);
    }
}
