// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Bounds enforcement for writes.
//!
//! Out-of-range writes are not errors.  A field with declared bounds clamps every write
//! into `[min, max]` and reports that it did so; a field without bounds accepts any value
//! of its type.  Passing a value of the wrong type is a programming error and is reported
//! as a [`TypeMismatchError`].
//!
//! Details of the clamp:
//!
//! * integer fields clamp to `[ceil(min), floor(max)]`
//! * float vector fields clamp each component
//! * NaN written to a bounded float becomes `min` (or `max` when only `max` is declared)
//! * NaN written to an unbounded float is stored as-is

use crate::schema::Field;
use crate::value::{Value, ValueType};

/// A value of the wrong type was written to a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{path}` holds {expected} values, but a {found} value was written")]
pub struct TypeMismatchError {
    pub path: String,
    pub expected: ValueType,
    pub found: ValueType,
}

/// What happened to an accepted write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOutcome {
    /// Stored unchanged.
    Stored,
    /// Outside the field's bounds; the clamped value was stored instead.
    Clamped,
}

impl SetOutcome {
    pub fn is_clamped(self) -> bool {
        self == SetOutcome::Clamped
    }
}

/// Checks `value` against `field`, returning the value that should be stored.
pub fn validate(field: &Field, value: Value) -> Result<(Value, SetOutcome), TypeMismatchError> {
    if value.value_type() != field.value_type() {
        return Err(TypeMismatchError {
            path: field.path().to_string(),
            expected: field.value_type(),
            found: value.value_type(),
        });
    }
    let (value, clamped) = clamp(value, field.min(), field.max());
    let outcome = if clamped {
        SetOutcome::Clamped
    } else {
        SetOutcome::Stored
    };
    Ok((value, outcome))
}

/// Whether `value` already lies within the bounds.
pub(crate) fn is_within(value: &Value, min: Option<f64>, max: Option<f64>) -> bool {
    !clamp(value.clone(), min, max).1
}

/// Clamps `value` into the bounds.  The flag is set when the value moved.
pub(crate) fn clamp(value: Value, min: Option<f64>, max: Option<f64>) -> (Value, bool) {
    if min.is_none() && max.is_none() {
        return (value, false);
    }
    match value {
        Value::Int(v) => {
            let clamped = clamp_int(v, min, max);
            (Value::Int(clamped), clamped != v)
        }
        Value::Float(v) => {
            let (clamped, moved) = clamp_float(v, min, max);
            (Value::Float(clamped), moved)
        }
        Value::Float2(v) => {
            let (clamped, moved) = clamp_floats(v, min, max);
            (Value::Float2(clamped), moved)
        }
        Value::Float3(v) => {
            let (clamped, moved) = clamp_floats(v, min, max);
            (Value::Float3(clamped), moved)
        }
        Value::Float4(v) => {
            let (clamped, moved) = clamp_floats(v, min, max);
            (Value::Float4(clamped), moved)
        }
        //bounds on these are rejected when the schema is built
        other @ (Value::Bool(_) | Value::Text(_)) => (other, false),
    }
}

fn clamp_int(value: i32, min: Option<f64>, max: Option<f64>) -> i32 {
    let mut out = value as f64;
    if let Some(min) = min {
        out = out.max(min.ceil());
    }
    if let Some(max) = max {
        out = out.min(max.floor());
    }
    //saturating cast
    out as i32
}

fn clamp_float(value: f32, min: Option<f64>, max: Option<f64>) -> (f32, bool) {
    let min = min.map(|m| m as f32);
    let max = max.map(|m| m as f32);
    if value.is_nan() {
        return match (min, max) {
            (Some(min), _) => (min, true),
            (None, Some(max)) => (max, true),
            (None, None) => (value, false),
        };
    }
    let mut out = value;
    if let Some(min) = min {
        if out < min {
            out = min;
        }
    }
    if let Some(max) = max {
        if out > max {
            out = max;
        }
    }
    (out, out.to_bits() != value.to_bits())
}

fn clamp_floats<const N: usize>(
    mut values: [f32; N],
    min: Option<f64>,
    max: Option<f64>,
) -> ([f32; N], bool) {
    let mut any = false;
    for v in values.iter_mut() {
        let (clamped, moved) = clamp_float(*v, min, max);
        *v = clamped;
        any |= moved;
    }
    (values, any)
}
