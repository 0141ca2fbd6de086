// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Constant-buffer layout.

[`ConstantBufferLayout::pack`] visits the fields of a schema in declaration order, keeps the
ones marked `UseAsShaderConstant(true)`, and places each at the next offset aligned to its
natural alignment.  Fields are never reordered, so the offset of a field only depends on the
fields declared before it; this costs some padding but lets host code reason about offsets.
The total size is rounded up to [`CONSTANT_BUFFER_ALIGNMENT`].

The layout only depends on the schema shape.  It is computed once per schema build and
reused for every frame; [`ConstantBufferLayout::fill`] writes current values into it.

```
use cbuffer_settings::annotation::Annotation;
use cbuffer_settings::layout::ConstantBufferLayout;
use cbuffer_settings::schema::{FieldDef, GroupDef, Member, SettingsSchema};
use cbuffer_settings::store::ValueStore;
use cbuffer_settings::value::Literal;

const SETTINGS: GroupDef = GroupDef {
    name: "AppSettings",
    annotations: &[],
    members: &[Member::Field(FieldDef {
        name: "Brightness",
        default: Literal::Float(0.5),
        annotations: &[Annotation::UseAsShaderConstant(true)],
    })],
};

let schema = SettingsSchema::build(&SETTINGS).unwrap();
let layout = ConstantBufferLayout::pack(&schema).unwrap();
assert_eq!(layout.total_size(), 16);

let store = ValueStore::new(&schema);
let bytes = layout.to_bytes(&store);
assert_eq!(&bytes[0..4], &0.5f32.to_le_bytes());
```
*/

pub mod wgsl;

use crate::schema::{Field, FieldId, SettingsSchema};
use crate::store::ValueSource;
use crate::value::ValueType;

/// Constant buffers are sized in multiples of one 16-byte register.
pub const CONSTANT_BUFFER_ALIGNMENT: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LayoutError {
    #[error("shader constant `{path}` is a {value_type} field, which has no fixed size")]
    Unsized { path: String, value_type: ValueType },
    /// The member name chosen for a field is reserved in WGSL.
    #[error("shader constant `{path}` would be declared as `{name}`, which WGSL reserves")]
    ReservedShaderName { path: String, name: String },
}

/// Where one field lives in the constant buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEntry<'s> {
    field: &'s Field,
    byte_offset: usize,
    byte_size: usize,
}

impl<'s> LayoutEntry<'s> {
    pub fn field(&self) -> &'s Field {
        self.field
    }
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }
    /// The byte range `[offset, offset + size)`.
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.byte_offset..self.byte_offset + self.byte_size
    }
}

/// Byte layout of the shader-visible fields of a schema.
///
/// Borrows the schema it was packed from, so it cannot outlive it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantBufferLayout<'s> {
    entries: Vec<LayoutEntry<'s>>,
    total_size: usize,
}

impl<'s> ConstantBufferLayout<'s> {
    /// Computes the layout of `schema`.
    ///
    /// Fails if a shader-constant field has a type without a fixed size.
    pub fn pack(schema: &'s SettingsSchema) -> Result<Self, LayoutError> {
        let mut entries = Vec::new();
        let mut offset = 0;
        for field in schema.fields().filter(|f| f.is_shader_constant()) {
            let value_type = field.value_type();
            let (Some(byte_size), Some(alignment)) = (value_type.byte_size(), value_type.alignment())
            else {
                return Err(LayoutError::Unsized {
                    path: field.path().to_string(),
                    value_type,
                });
            };
            let byte_offset = align_up(offset, alignment);
            logwise::trace_sync!(
                "packed {path} at {offset} ({size} bytes)",
                path = logwise::privacy::LogIt(field.path()),
                offset = byte_offset,
                size = byte_size
            );
            entries.push(LayoutEntry {
                field,
                byte_offset,
                byte_size,
            });
            offset = byte_offset + byte_size;
        }
        let total_size = align_up(offset, CONSTANT_BUFFER_ALIGNMENT);
        logwise::info_sync!(
            "packed constant buffer: {entries} entries, {size} bytes",
            entries = entries.len(),
            size = total_size
        );
        Ok(ConstantBufferLayout {
            entries,
            total_size,
        })
    }

    /// Size of the buffer in bytes.  Always a multiple of [`CONSTANT_BUFFER_ALIGNMENT`].
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[LayoutEntry<'s>] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry for `field`, if it is a shader constant.
    pub fn entry(&self, field: FieldId) -> Option<&LayoutEntry<'s>> {
        self.entries.iter().find(|e| e.field.id() == field)
    }

    /// Writes the current values into `bytes`, overwriting it in place.  Padding is zeroed.
    ///
    /// # Panics
    /// Panics if `bytes` is not exactly [`Self::total_size`] bytes long.
    pub fn fill<V: ValueSource + ?Sized>(&self, values: &V, bytes: &mut [u8]) {
        assert_eq!(
            bytes.len(),
            self.total_size,
            "constant buffer must be {} bytes",
            self.total_size
        );
        bytes.fill(0);
        for entry in &self.entries {
            let value = values.value(entry.field.id());
            debug_assert_eq!(value.value_type(), entry.field.value_type());
            value.write_le(&mut bytes[entry.byte_range()]);
        }
    }

    /// Allocates a buffer and fills it.
    pub fn to_bytes<V: ValueSource + ?Sized>(&self, values: &V) -> Vec<u8> {
        let mut bytes = vec![0; self.total_size];
        self.fill(values, &mut bytes);
        bytes
    }
}

fn align_up(value: usize, alignment: usize) -> usize {
    value.div_ceil(alignment) * alignment
}

#[cfg(test)]
mod tests {
    use super::{ConstantBufferLayout, LayoutError, align_up};
    use crate::annotation::Annotation;
    use crate::schema::{FieldDef, GroupDef, Member, SettingsSchema};
    use crate::store::ValueStore;
    use crate::value::{Literal, Value, ValueType};

    macro_rules! constant {
        ($name:literal, $default:expr) => {
            Member::Field(FieldDef {
                name: $name,
                default: $default,
                annotations: &[Annotation::UseAsShaderConstant(true)],
            })
        };
    }

    const MIXED: GroupDef = GroupDef {
        name: "Root",
        annotations: &[],
        members: &[
            constant!("Exposure", Literal::Float(1.5)),
            Member::Field(FieldDef {
                name: "UiOnly",
                default: Literal::Float(3.0),
                annotations: &[],
            }),
            constant!("Tint", Literal::Float3([0.25, 0.5, 0.75])),
            constant!("Frames", Literal::Int(-7)),
            Member::Group(GroupDef {
                name: "Debug",
                annotations: &[],
                members: &[
                    constant!("Wireframe", Literal::Bool(true)),
                    constant!("Offset", Literal::Float2([1.0, 2.0])),
                    constant!("Color", Literal::Float4([1.0, 0.0, 0.0, 1.0])),
                ],
            }),
        ],
    };

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn alignment() {
        assert_eq!(align_up(0, 16), 0);
        assert_eq!(align_up(1, 16), 16);
        assert_eq!(align_up(16, 16), 16);
        assert_eq!(align_up(12, 8), 16);
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn packs_in_declaration_order() {
        let schema = SettingsSchema::build(&MIXED).unwrap();
        let layout = ConstantBufferLayout::pack(&schema).unwrap();
        let packed: Vec<(&str, usize, usize)> = layout
            .entries()
            .iter()
            .map(|e| (e.field().path(), e.byte_offset(), e.byte_size()))
            .collect();
        assert_eq!(
            packed,
            [
                ("Exposure", 0, 4),
                //float3 waits for the next register
                ("Tint", 16, 12),
                //but a scalar can use the rest of it
                ("Frames", 28, 4),
                ("Debug.Wireframe", 32, 4),
                ("Debug.Offset", 40, 8),
                ("Debug.Color", 48, 16),
            ]
        );
        assert_eq!(layout.total_size(), 64);
        assert!(layout.entry(schema.field_id("UiOnly").unwrap()).is_none());
        assert_eq!(
            layout
                .entry(schema.field_id("Debug.Offset").unwrap())
                .map(|e| e.byte_range()),
            Some(40..48)
        );
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn fills_values() {
        let schema = SettingsSchema::build(&MIXED).unwrap();
        let layout = ConstantBufferLayout::pack(&schema).unwrap();
        let mut store = ValueStore::new(&schema);
        store
            .set(schema.field_id("Exposure").unwrap(), Value::Float(2.0))
            .unwrap();

        let mut bytes = vec![0xFF; layout.total_size()];
        layout.fill(&store, &mut bytes);
        assert_eq!(&bytes[0..4], &2.0f32.to_le_bytes());
        //padding is zeroed
        assert_eq!(&bytes[4..16], &[0; 12]);
        assert_eq!(&bytes[16..20], &0.25f32.to_le_bytes());
        assert_eq!(&bytes[24..28], &0.75f32.to_le_bytes());
        assert_eq!(&bytes[28..32], &(-7i32).to_le_bytes());
        assert_eq!(&bytes[32..36], &[1, 0, 0, 0]);
        assert_eq!(&bytes[44..48], &2.0f32.to_le_bytes());
        assert_eq!(&bytes[48..52], &1.0f32.to_le_bytes());
        assert_eq!(layout.to_bytes(&store), bytes);
    }

    #[test]
    #[should_panic]
    fn fill_checks_length() {
        let schema = SettingsSchema::build(&MIXED).unwrap();
        let layout = ConstantBufferLayout::pack(&schema).unwrap();
        let store = ValueStore::new(&schema);
        let mut bytes = vec![0; 8];
        layout.fill(&store, &mut bytes);
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn text_cannot_be_a_shader_constant() {
        let schema = SettingsSchema::build(&GroupDef {
            name: "Root",
            annotations: &[],
            members: &[constant!("Label", Literal::Text("hello"))],
        })
        .unwrap();
        assert_eq!(
            ConstantBufferLayout::pack(&schema),
            Err(LayoutError::Unsized {
                path: "Label".to_string(),
                value_type: ValueType::Text,
            })
        );
    }

    #[test]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn text_is_fine_in_the_ui() {
        let schema = SettingsSchema::build(&GroupDef {
            name: "Root",
            annotations: &[],
            members: &[Member::Field(FieldDef {
                name: "Label",
                default: Literal::Text("hello"),
                annotations: &[Annotation::UseAsShaderConstant(false)],
            })],
        })
        .unwrap();
        let layout = ConstantBufferLayout::pack(&schema).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.total_size(), 0);
    }
}
