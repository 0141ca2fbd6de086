// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Static settings definitions.

A definition is the input to [`SettingsSchema::build`](crate::schema::SettingsSchema::build).
It is written as nested struct literals, so it can live in a `const`:

```
use cbuffer_settings::annotation::Annotation;
use cbuffer_settings::schema::{FieldDef, GroupDef, Member};
use cbuffer_settings::value::Literal;

const SETTINGS: GroupDef = GroupDef {
    name: "AppSettings",
    annotations: &[],
    members: &[Member::Group(GroupDef {
        name: "Lighting",
        annotations: &[Annotation::ExpandGroup(true)],
        members: &[Member::Field(FieldDef {
            name: "Exposure",
            default: Literal::Float(1.0),
            annotations: &[
                Annotation::UseAsShaderConstant(true),
                Annotation::MinValue(0.0),
                Annotation::MaxValue(8.0),
            ],
        })],
    })],
};
```
*/

use crate::annotation::Annotation;
use crate::value::Literal;

/// A group of settings: an organizational node with ordered members.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupDef {
    pub name: &'static str,
    pub annotations: &'static [Annotation],
    /// Members in declaration order.  Order is significant for packing and display.
    pub members: &'static [Member],
}

/// A single setting.  Its value type is the type of `default`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub default: Literal,
    pub annotations: &'static [Annotation],
}

/// A member of a [`GroupDef`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Member {
    Group(GroupDef),
    Field(FieldDef),
}

impl Member {
    pub const fn name(&self) -> &'static str {
        match self {
            Member::Group(g) => g.name,
            Member::Field(f) => f.name,
        }
    }
}
