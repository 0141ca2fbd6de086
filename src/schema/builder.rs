// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Turns a [`GroupDef`] into a [`SettingsSchema`].

use super::{
    Field, FieldDef, FieldId, Group, GroupDef, GroupId, Member, NodeId, SchemaError,
    SettingsSchema,
};
use crate::annotation::{Annotations, NodeKind};
use crate::validator;
use crate::value::ValueType;
use std::collections::{HashMap, HashSet};

pub(super) fn build(definition: &GroupDef) -> Result<SettingsSchema, SchemaError> {
    if !is_identifier(definition.name) {
        return Err(SchemaError::InvalidName {
            parent: String::new(),
            name: definition.name.to_string(),
        });
    }
    let mut builder = Builder::default();
    builder.group(definition, String::new())?;
    let schema = SettingsSchema {
        groups: builder.groups,
        fields: builder.fields,
        paths: builder.paths,
    };
    logwise::info_sync!(
        "built settings schema {name}: {groups} groups, {fields} fields",
        name = logwise::privacy::LogIt(definition.name),
        groups = schema.group_count(),
        fields = schema.field_count()
    );
    Ok(schema)
}

#[derive(Default)]
struct Builder {
    groups: Vec<Group>,
    fields: Vec<Field>,
    paths: HashMap<String, NodeId>,
}

impl Builder {
    fn group(&mut self, definition: &GroupDef, path: String) -> Result<GroupId, SchemaError> {
        //the root has an empty path, so errors about it use its name instead
        let label = if path.is_empty() {
            definition.name.to_string()
        } else {
            path.clone()
        };
        let annotations = Annotations::collect(&label, NodeKind::Group, definition.annotations)?;
        let id = GroupId(self.groups.len());
        self.groups.push(Group {
            id,
            name: definition.name,
            path: path.clone(),
            expanded: annotations.expand_group().unwrap_or(false),
            annotations,
            children: Vec::with_capacity(definition.members.len()),
        });

        let mut seen = HashSet::new();
        for member in definition.members {
            let name = member.name();
            if !is_identifier(name) {
                return Err(SchemaError::InvalidName {
                    parent: label,
                    name: name.to_string(),
                });
            }
            let child_path = if path.is_empty() {
                name.to_string()
            } else {
                format!("{path}.{name}")
            };
            if !seen.insert(name) {
                return Err(SchemaError::DuplicateName { path: child_path });
            }
            let child = match member {
                Member::Group(g) => NodeId::Group(self.group(g, child_path.clone())?),
                Member::Field(f) => NodeId::Field(self.field(f, child_path.clone(), id)?),
            };
            self.paths.insert(child_path, child);
            self.groups[id.0].children.push(child);
        }
        Ok(id)
    }

    fn field(
        &mut self,
        definition: &FieldDef,
        path: String,
        group: GroupId,
    ) -> Result<FieldId, SchemaError> {
        let annotations = Annotations::collect(&path, NodeKind::Field, definition.annotations)?;
        let value_type = definition.default.value_type();
        let default = definition.default.to_value();

        if annotations.has_bounds() {
            if !value_type.is_numeric() {
                return Err(SchemaError::BoundsOnNonNumeric { path, value_type });
            }
            let min = annotations.min_value();
            let max = annotations.max_value();
            //float fields clamp in f32, so their bounds must survive the narrowing
            let narrows = value_type != ValueType::Int;
            let finite = |m: f64| m.is_finite() && (!narrows || (m as f32).is_finite());
            if min.is_some_and(|m| !finite(m)) || max.is_some_and(|m| !finite(m)) {
                return Err(SchemaError::NonFiniteBound { path });
            }
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    return Err(SchemaError::InvertedBounds { path, min, max });
                }
                //ints clamp to the integral part of the range
                if value_type == ValueType::Int && min.ceil() > max.floor() {
                    return Err(SchemaError::InvertedBounds {
                        path,
                        min: min.ceil(),
                        max: max.floor(),
                    });
                }
            }
            if !validator::is_within(&default, min, max) {
                return Err(SchemaError::DefaultOutOfBounds { path, default });
            }
        }

        let id = FieldId(self.fields.len());
        self.fields.push(Field {
            id,
            group,
            name: definition.name,
            path,
            value_type,
            default,
            annotations,
        });
        Ok(id)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
