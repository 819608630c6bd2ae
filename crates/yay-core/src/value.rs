//! The YAY value tree (spec.md §3.1).
//!
//! [`Value`] is a closed tagged union over YAY's eight value kinds. `Int`
//! and `Float` are disjoint kinds (spec.md §3.1, §8 P-6): `42` decodes to
//! `Int`, `42.0` to `Float`, and no amount of numeric range ever makes one
//! decode as the other.

use indexmap::IndexMap;
use num_bigint::BigInt;

/// An ordered, key-unique map. Order is preserved for deterministic output
/// (spec.md §3.1, §5) even though map equality is semantically unordered.
pub type Map = IndexMap<String, Value>;

/// An ordered sequence of values.
pub type List = Vec<Value>;

/// A decoded YAY value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    /// Arbitrary-precision signed integer.
    Int(BigInt),
    /// IEEE 754 binary64, including ±∞ and NaN. Distinguishes `+0.0` from
    /// `-0.0`.
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(List),
    Map(Map),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl PartialEq for Value {
    /// Structural equality with two deliberate deviations from IEEE 754
    /// `f64` equality: `NaN == NaN`, so that round-trip properties (spec.md
    /// §8 P-1) hold for documents containing `nan`, and `+0.0 != -0.0`, so
    /// that the value model's signed-zero distinction (spec.md §3.1) is
    /// actually observable through `Value` equality rather than being
    /// silently erased by native float comparison.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Self::List(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Map(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Value::Bool`].
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(..))
    }

    /// Returns `true` if the value is [`Value::Int`].
    #[must_use]
    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(..))
    }

    /// Returns `true` if the value is [`Value::Float`].
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(..))
    }

    /// Returns `true` if the value is [`Value::String`].
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Value::Bytes`].
    #[must_use]
    pub fn is_bytes(&self) -> bool {
        matches!(self, Self::Bytes(..))
    }

    /// Returns `true` if the value is [`Value::List`].
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(..))
    }

    /// Returns `true` if the value is [`Value::Map`].
    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(..))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}
