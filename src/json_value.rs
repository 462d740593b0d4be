use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::Index;

use indexmap::IndexMap;
use json_shape_lexer::{JsonNumber, ValueError};
use rustc_hash::{FxBuildHasher, FxHasher};

/// An object's members in the order they first appeared.
pub type JsonObject = IndexMap<String, JsonValue, FxBuildHasher>;

/// A parsed JSON document or a part of it.
///
/// Equality is structural. Two objects are equal if they have the same members, regardless of
/// member order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonValue {
    String(String),
    Number(JsonNumber),
    Boolean(bool),
    Null,
    Object(JsonObject),
    Array(Vec<JsonValue>),
}

macro_rules! is_xxx {
    ($name:ident, $variant:pat) => {
        pub fn $name(&self) -> bool {
            matches!(self, $variant)
        }
    };
}

macro_rules! as_xxx {
    ($name:ident, $ty:ty, $pat:pat => $val:expr, $err:ident) => {
        pub fn $name(&self) -> Result<$ty, ValueError> {
            match self {
                $pat => Ok($val),
                _ => Err(ValueError::$err),
            }
        }
    };
}

impl JsonValue {
    /// An object value; `None` gives an empty object.
    pub fn object_or_empty(members: Option<JsonObject>) -> Self {
        JsonValue::Object(members.unwrap_or_default())
    }

    /// An array value; `None` gives an empty array.
    pub fn array_or_empty(elements: Option<Vec<JsonValue>>) -> Self {
        JsonValue::Array(elements.unwrap_or_default())
    }

    is_xxx!(is_string, JsonValue::String(_));
    is_xxx!(is_number, JsonValue::Number(_));
    is_xxx!(is_boolean, JsonValue::Boolean(_));
    is_xxx!(is_null, JsonValue::Null);
    is_xxx!(is_object, JsonValue::Object(_));
    is_xxx!(is_array, JsonValue::Array(_));

    as_xxx!(as_string, &str, JsonValue::String(s) => s, NotAString);
    as_xxx!(as_number, &JsonNumber, JsonValue::Number(n) => n, NotANumber);
    as_xxx!(as_boolean, bool, JsonValue::Boolean(b) => *b, NotABoolean);
    as_xxx!(as_object, &JsonObject, JsonValue::Object(o) => o, NotAnObject);
    as_xxx!(as_array, &[JsonValue], JsonValue::Array(a) => a, NotAnArray);

    /// The member `key` if this is an object that has it.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(o) => o.get(key),
            _ => None,
        }
    }
}

impl Hash for JsonValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            JsonValue::String(s) => s.hash(state),
            JsonValue::Number(n) => n.hash(state),
            JsonValue::Boolean(b) => b.hash(state),
            JsonValue::Null => {}
            JsonValue::Array(a) => a.hash(state),
            JsonValue::Object(o) => {
                // Member order is not part of equality, so it must not change the hash.
                let members = o.iter().fold(0u64, |acc, (key, value)| {
                    let mut h = FxHasher::default();
                    key.hash(&mut h);
                    value.hash(&mut h);
                    acc.wrapping_add(h.finish())
                });
                o.len().hash(state);
                members.hash(state);
            }
        }
    }
}

/// Looks up an object member. Panics if this is not an object or the member is missing; use
/// [`JsonValue::get`] to avoid that.
impl Index<&str> for JsonValue {
    type Output = JsonValue;

    fn index(&self, key: &str) -> &JsonValue {
        match self {
            JsonValue::Object(members) => members
                .get(key)
                .unwrap_or_else(|| panic!("no member {key:?} among {:?}", members.keys())),
            other => panic!("cannot look up member {key:?} in a non-object: {other:?}"),
        }
    }
}

/// Looks up an array element. Panics if this is not an array or `index` is out of bounds.
impl Index<usize> for JsonValue {
    type Output = JsonValue;

    fn index(&self, index: usize) -> &JsonValue {
        match self {
            JsonValue::Array(elements) => elements.get(index).unwrap_or_else(|| {
                panic!("element {index} is out of bounds for an array of {}", elements.len())
            }),
            other => panic!("cannot take element {index} of a non-array: {other:?}"),
        }
    }
}

macro_rules! impl_from {
    ($ty:ty, $v:ident => $val:expr) => {
        impl From<$ty> for JsonValue {
            fn from($v: $ty) -> Self {
                $val
            }
        }
    };
}

impl_from!(String, s => JsonValue::String(s));
impl_from!(&str, s => JsonValue::String(s.to_string()));
impl_from!(JsonNumber, n => JsonValue::Number(n));
impl_from!(bool, b => JsonValue::Boolean(b));
impl_from!((), _u => JsonValue::Null);
impl_from!(JsonObject, o => JsonValue::Object(o));
impl_from!(Vec<JsonValue>, a => JsonValue::Array(a));
impl_from!(i32, n => JsonValue::Number(n.into()));
impl_from!(i64, n => JsonValue::Number(n.into()));
impl_from!(u64, n => JsonValue::Number(n.into()));

macro_rules! impl_try_from {
    ($ty:ty, $pat:pat => $val:expr, $err:ident) => {
        impl TryFrom<JsonValue> for $ty {
            type Error = ValueError;

            fn try_from(value: JsonValue) -> Result<$ty, ValueError> {
                match value {
                    $pat => Ok($val),
                    _ => Err(ValueError::$err),
                }
            }
        }
    };
}

impl_try_from!(String, JsonValue::String(s) => s, NotAString);
impl_try_from!(JsonNumber, JsonValue::Number(n) => n, NotANumber);
impl_try_from!(bool, JsonValue::Boolean(b) => b, NotABoolean);
impl_try_from!(JsonObject, JsonValue::Object(o) => o, NotAnObject);
impl_try_from!(Vec<JsonValue>, JsonValue::Array(a) => a, NotAnArray);
