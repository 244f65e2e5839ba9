use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::field::Field;
use crate::value::{Map, Value};

/// Reflected kind of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Char,
    String,
    Seq,
    Map,
    Option,
    /// `&T`, `&mut T`, `Box<T>`, `Rc<T>`, `Arc<T>`.
    Pointer,
    Struct,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Seq => "sequence",
            Kind::Map => "map",
            Kind::Option => "option",
            Kind::Pointer => "pointer",
            Kind::Struct => "struct",
        };
        f.write_str(s)
    }
}

/// Field table of a structure. Usually derived with `#[derive(Structure)]`.
pub trait Structure {
    /// Type name as declared.
    fn name(&self) -> &'static str;

    /// All declared fields, in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Runtime view of a value: its kind, its shallow `Value`, and the
/// structure or pointee behind it, if any.
pub trait Reflect {
    fn kind(&self) -> Kind;

    fn to_value(&self) -> Value<'_>;

    fn as_structure(&self) -> Option<&dyn Structure> {
        None
    }

    /// Kind behind one level of indirection. `Some` only for pointers.
    fn pointee_kind(&self) -> Option<Kind> {
        None
    }

    /// Structure behind one level of indirection. Does not look further.
    fn pointee_structure(&self) -> Option<&dyn Structure> {
        None
    }
}

macro_rules! impl_reflect_scalar {
    ($($ty:ty => $kind:ident, $variant:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn kind(&self) -> Kind {
                    Kind::$kind
                }

                fn to_value(&self) -> Value<'_> {
                    Value::$variant(*self)
                }
            }
        )*
    };
}

impl_reflect_scalar! {
    bool => Bool, Bool,
    i8 => Int, I8,
    i16 => Int, I16,
    i32 => Int, I32,
    i64 => Int, I64,
    i128 => Int, I128,
    u8 => Uint, U8,
    u16 => Uint, U16,
    u32 => Uint, U32,
    u64 => Uint, U64,
    u128 => Uint, U128,
    f32 => Float, F32,
    f64 => Float, F64,
    char => Char, Char,
}

impl Reflect for isize {
    fn kind(&self) -> Kind {
        Kind::Int
    }

    fn to_value(&self) -> Value<'_> {
        Value::I64(*self as i64)
    }
}

impl Reflect for usize {
    fn kind(&self) -> Kind {
        Kind::Uint
    }

    fn to_value(&self) -> Value<'_> {
        Value::U64(*self as u64)
    }
}

impl Reflect for str {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn to_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self))
    }
}

impl Reflect for String {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn to_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self.as_str()))
    }
}

impl<T: Reflect> Reflect for [T] {
    fn kind(&self) -> Kind {
        Kind::Seq
    }

    fn to_value(&self) -> Value<'_> {
        Value::Seq(self.iter().map(Reflect::to_value).collect())
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::Seq
    }

    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn kind(&self) -> Kind {
        Kind::Seq
    }

    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn kind(&self) -> Kind {
        Kind::Option
    }

    fn to_value(&self) -> Value<'_> {
        self.as_ref().map_or(Value::Null, Reflect::to_value)
    }
}

impl<T: Reflect, S> Reflect for HashMap<String, T, S> {
    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn to_value(&self) -> Value<'_> {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect::<Map<'_>>(),
        )
    }
}

impl<T: Reflect> Reflect for BTreeMap<String, T> {
    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn to_value(&self) -> Value<'_> {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect::<Map<'_>>(),
        )
    }
}

macro_rules! impl_reflect_pointer {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $ptr {
                fn kind(&self) -> Kind {
                    Kind::Pointer
                }

                fn to_value(&self) -> Value<'_> {
                    (**self).to_value()
                }

                fn pointee_kind(&self) -> Option<Kind> {
                    Some((**self).kind())
                }

                fn pointee_structure(&self) -> Option<&dyn Structure> {
                    (**self).as_structure()
                }
            }
        )*
    };
}

impl_reflect_pointer!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);
