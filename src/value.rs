// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Setting value types and their constant-buffer representation.
//!
//! Every field in a settings schema holds exactly one [`ValueType`]. Most value types have a
//! fixed byte size and alignment, so they can be copied into a GPU constant buffer.
//! [`ValueType::Text`] is the exception: it exists for UI-only settings and has no size.
//!
//! | type     | Rust value   | size | alignment |
//! |----------|--------------|------|-----------|
//! | `bool`   | `bool`       | 4    | 4         |
//! | `int`    | `i32`        | 4    | 4         |
//! | `float`  | `f32`        | 4    | 4         |
//! | `float2` | `[f32; 2]`   | 8    | 8         |
//! | `float3` | `[f32; 3]`   | 12   | 16        |
//! | `float4` | `[f32; 4]`   | 16   | 16        |
//! | `text`   | `String`     | n/a  | n/a       |
//!
//! Booleans are widened to a 32-bit integer, which is how shader languages represent them in
//! constant buffers.  All values are written little-endian.

use std::fmt::Display;

/// The type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValueType {
    /// A boolean, stored in a constant buffer as a 32-bit integer.
    Bool,
    /// A 32-bit signed integer.
    Int,
    /// A 32-bit float.
    Float,
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.  Aligned to 16 bytes so it never straddles a register.
    Float3,
    /// Four 32-bit floats.
    Float4,
    /// A string.  Only usable in the UI; it cannot be placed in a constant buffer.
    Text,
}

impl ValueType {
    /// Number of bytes the type occupies in a constant buffer, or `None` if it has no fixed size.
    pub const fn byte_size(self) -> Option<usize> {
        match self {
            ValueType::Bool | ValueType::Int | ValueType::Float => Some(4),
            ValueType::Float2 => Some(8),
            ValueType::Float3 => Some(12),
            ValueType::Float4 => Some(16),
            ValueType::Text => None,
        }
    }

    /// Byte alignment required in a constant buffer, or `None` if the type has no fixed size.
    pub const fn alignment(self) -> Option<usize> {
        match self {
            ValueType::Bool | ValueType::Int | ValueType::Float => Some(4),
            ValueType::Float2 => Some(8),
            ValueType::Float3 | ValueType::Float4 => Some(16),
            ValueType::Text => None,
        }
    }

    /// Whether bounds (`MinValue`/`MaxValue`) can be applied to the type.
    pub const fn is_numeric(self) -> bool {
        match self {
            ValueType::Int
            | ValueType::Float
            | ValueType::Float2
            | ValueType::Float3
            | ValueType::Float4 => true,
            ValueType::Bool | ValueType::Text => false,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Float2 => "float2",
            ValueType::Float3 => "float3",
            ValueType::Float4 => "float4",
            ValueType::Text => "text",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A default value as written in a settings definition.
///
/// Unlike [`Value`], a literal can be built in a `const` context, so whole settings
/// definitions can be `const` items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i32),
    Float(f32),
    Float2([f32; 2]),
    Float3([f32; 3]),
    Float4([f32; 4]),
    Text(&'static str),
}

impl Literal {
    pub const fn value_type(&self) -> ValueType {
        match self {
            Literal::Bool(_) => ValueType::Bool,
            Literal::Int(_) => ValueType::Int,
            Literal::Float(_) => ValueType::Float,
            Literal::Float2(_) => ValueType::Float2,
            Literal::Float3(_) => ValueType::Float3,
            Literal::Float4(_) => ValueType::Float4,
            Literal::Text(_) => ValueType::Text,
        }
    }

    pub fn to_value(&self) -> Value {
        match *self {
            Literal::Bool(v) => Value::Bool(v),
            Literal::Int(v) => Value::Int(v),
            Literal::Float(v) => Value::Float(v),
            Literal::Float2(v) => Value::Float2(v),
            Literal::Float3(v) => Value::Float3(v),
            Literal::Float4(v) => Value::Float4(v),
            Literal::Text(v) => Value::Text(v.to_string()),
        }
    }
}

/// The current value of a setting.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
    Float2([f32; 2]),
    Float3([f32; 3]),
    Float4([f32; 4]),
    Text(String),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Float2(_) => ValueType::Float2,
            Value::Float3(_) => ValueType::Float3,
            Value::Float4(_) => ValueType::Float4,
            Value::Text(_) => ValueType::Text,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The float components of a float or float vector value.
    pub fn as_floats(&self) -> Option<&[f32]> {
        match self {
            Value::Float(v) => Some(std::slice::from_ref(v)),
            Value::Float2(v) => Some(v),
            Value::Float3(v) => Some(v),
            Value::Float4(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Writes the constant-buffer representation of the value into `out`.
    ///
    /// `out` must be exactly [`ValueType::byte_size`] bytes long.  Text values have no
    /// representation; the layout never contains them.
    pub(crate) fn write_le(&self, out: &mut [u8]) {
        debug_assert_eq!(Some(out.len()), self.value_type().byte_size());
        match self {
            Value::Bool(v) => out.copy_from_slice(&u32::from(*v).to_le_bytes()),
            Value::Int(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::Float(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::Float2(v) => write_floats(v, out),
            Value::Float3(v) => write_floats(v, out),
            Value::Float4(v) => write_floats(v, out),
            Value::Text(_) => {}
        }
    }
}

fn write_floats(floats: &[f32], out: &mut [u8]) {
    for (float, chunk) in floats.iter().zip(out.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&float.to_le_bytes());
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Float2(v) => write!(f, "{v:?}"),
            Value::Float3(v) => write!(f, "{v:?}"),
            Value::Float4(v) => write!(f, "{v:?}"),
            Value::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}
impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}
impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}
impl From<[f32; 2]> for Value {
    fn from(value: [f32; 2]) -> Self {
        Value::Float2(value)
    }
}
impl From<[f32; 3]> for Value {
    fn from(value: [f32; 3]) -> Self {
        Value::Float3(value)
    }
}
impl From<[f32; 4]> for Value {
    fn from(value: [f32; 4]) -> Self {
        Value::Float4(value)
    }
}
impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}
impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}
