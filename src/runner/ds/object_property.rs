use crate::runner::ds::value::JsValue;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Str(String),
    Int(u32),
}
impl PropertyKey {
    /// Compares two keys. String keys ignore ASCII case when `case_sensitive`
    /// is false; integer keys always compare exactly.
    pub fn matches(&self, other: &PropertyKey, case_sensitive: bool) -> bool {
        match (self, other) {
            (PropertyKey::Str(a), PropertyKey::Str(b)) => {
                if case_sensitive {
                    a == b
                } else {
                    a.eq_ignore_ascii_case(b)
                }
            }
            _ => self == other,
        }
    }
}
impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::Str(s.to_string())
    }
}
impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Str(s) => write!(f, "{}", s),
            PropertyKey::Int(i) => write!(f, "{}", i),
        }
    }
}

/// Own data property. Accessors are not stored on objects; host getters are
/// dispatched through the registry instead.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDescriptor {
    pub value: JsValue,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}
impl PropertyDescriptor {
    pub fn data(value: JsValue) -> Self {
        PropertyDescriptor {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    pub fn read_only(value: JsValue) -> Self {
        PropertyDescriptor {
            value,
            writable: false,
            enumerable: true,
            configurable: false,
        }
    }

    pub fn is_configurable(&self) -> bool {
        self.configurable
    }

    pub fn is_enumerable(&self) -> bool {
        self.enumerable
    }
}
