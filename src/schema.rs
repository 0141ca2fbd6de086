// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The settings tree.

A [`SettingsSchema`] is built once from a static [`GroupDef`] and never changes shape
afterwards.  Groups and fields are stored in two arenas and addressed by [`GroupId`] and
[`FieldId`].  Ids are assigned depth-first in declaration order, so iterating the field
arena visits fields in the same order as walking the tree.

Current values are not stored here; see [`crate::store::ValueStore`].
*/

mod builder;
mod definition;

pub use definition::{FieldDef, GroupDef, Member};

use crate::annotation::{AnnotationTag, Annotations, NodeKind};
use crate::value::{Value, ValueType};
use std::collections::HashMap;

/// Identifies a field within one schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(usize);

impl FieldId {
    /// Position of the field in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identifies a group within one schema.  The root group is always index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    pub const ROOT: GroupId = GroupId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A child of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Group(GroupId),
    Field(FieldId),
}

/// A borrowed schema node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'s> {
    Group(&'s Group),
    Field(&'s Field),
}

impl<'s> Node<'s> {
    pub fn name(&self) -> &'s str {
        match self {
            Node::Group(g) => g.name(),
            Node::Field(f) => f.name(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Group(_) => NodeKind::Group,
            Node::Field(_) => NodeKind::Field,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    id: GroupId,
    name: &'static str,
    path: String,
    expanded: bool,
    annotations: Annotations,
    children: Vec<NodeId>,
}

impl Group {
    pub fn id(&self) -> GroupId {
        self.id
    }
    pub fn name(&self) -> &str {
        self.name
    }
    /// Dotted path from the root.  Empty for the root group.
    pub fn path(&self) -> &str {
        &self.path
    }
    /// Whether the group starts expanded.  The live state is kept by the value store.
    pub fn expanded(&self) -> bool {
        self.expanded
    }
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }
    pub fn display_name(&self) -> &str {
        self.annotations.display_name().unwrap_or(self.name)
    }
    pub fn help_text(&self) -> Option<&str> {
        self.annotations.help_text()
    }
    /// Children in declaration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    id: FieldId,
    group: GroupId,
    name: &'static str,
    path: String,
    value_type: ValueType,
    default: Value,
    annotations: Annotations,
}

impl Field {
    pub fn id(&self) -> FieldId {
        self.id
    }
    /// The group that declares this field.
    pub fn group(&self) -> GroupId {
        self.group
    }
    pub fn name(&self) -> &str {
        self.name
    }
    /// Dotted path from the root, e.g. `General.TimelineZoom`.
    pub fn path(&self) -> &str {
        &self.path
    }
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
    pub fn default_value(&self) -> &Value {
        &self.default
    }
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }
    /// The `DisplayName` annotation, or the declared name.
    pub fn display_name(&self) -> &str {
        self.annotations.display_name().unwrap_or(self.name)
    }
    pub fn help_text(&self) -> Option<&str> {
        self.annotations.help_text()
    }
    pub fn min(&self) -> Option<f64> {
        self.annotations.min_value()
    }
    pub fn max(&self) -> Option<f64> {
        self.annotations.max_value()
    }
    pub fn is_shader_constant(&self) -> bool {
        self.annotations.use_as_shader_constant().unwrap_or(false)
    }
}

/// A definition could not be turned into a schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("`{name}` in `{parent}` is not a valid identifier")]
    InvalidName { parent: String, name: String },
    #[error("`{path}` is declared more than once")]
    DuplicateName { path: String },
    #[error("`{path}` carries {tag} more than once")]
    DuplicateAnnotation { path: String, tag: AnnotationTag },
    #[error("{tag} cannot be attached to {kind} `{path}`")]
    MisplacedAnnotation {
        path: String,
        tag: AnnotationTag,
        kind: NodeKind,
    },
    #[error("`{path}` is a {value_type} field, bounds need a numeric type")]
    BoundsOnNonNumeric { path: String, value_type: ValueType },
    #[error("`{path}` has a non-finite bound")]
    NonFiniteBound { path: String },
    #[error("`{path}` has min {min} greater than max {max}")]
    InvertedBounds { path: String, min: f64, max: f64 },
    #[error("default {default} of `{path}` is outside its bounds")]
    DefaultOutOfBounds { path: String, default: Value },
}

/// A path did not name a node of the requested kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LookupError {
    #[error("no field at `{0}`")]
    UnknownField(String),
    #[error("no group at `{0}`")]
    UnknownGroup(String),
}

/// An immutable tree of groups and fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsSchema {
    groups: Vec<Group>,
    fields: Vec<Field>,
    paths: HashMap<String, NodeId>,
}

impl SettingsSchema {
    /// Builds a schema from a definition.
    ///
    /// Building is deterministic: the same definition always produces an equal schema.
    pub fn build(definition: &GroupDef) -> Result<Self, SchemaError> {
        builder::build(definition)
    }

    pub fn root(&self) -> &Group {
        &self.groups[GroupId::ROOT.0]
    }

    /// # Panics
    /// Panics if `id` belongs to a different schema.
    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    /// # Panics
    /// Panics if `id` belongs to a different schema.
    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.0]
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        match id {
            NodeId::Group(g) => Node::Group(self.group(g)),
            NodeId::Field(f) => Node::Field(self.field(f)),
        }
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// All groups, root first, in declaration order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn children<'s>(&'s self, group: &'s Group) -> impl Iterator<Item = Node<'s>> {
        group.children.iter().map(move |child| self.node(*child))
    }

    pub fn field_id(&self, path: &str) -> Result<FieldId, LookupError> {
        match self.paths.get(path) {
            Some(NodeId::Field(id)) => Ok(*id),
            _ => Err(LookupError::UnknownField(path.to_string())),
        }
    }

    /// Looks up a group by path.  The empty path names the root.
    pub fn group_id(&self, path: &str) -> Result<GroupId, LookupError> {
        if path.is_empty() {
            return Ok(GroupId::ROOT);
        }
        match self.paths.get(path) {
            Some(NodeId::Group(id)) => Ok(*id),
            _ => Err(LookupError::UnknownGroup(path.to_string())),
        }
    }

    /// Visits every node depth-first in declaration order, starting with the root at depth 0.
    pub fn walk<'s, F: FnMut(usize, Node<'s>)>(&'s self, mut visit: F) {
        self.walk_group(self.root(), 0, &mut visit);
    }

    fn walk_group<'s, F: FnMut(usize, Node<'s>)>(&'s self, group: &'s Group, depth: usize, visit: &mut F) {
        visit(depth, Node::Group(group));
        for child in self.children(group) {
            match child {
                Node::Group(g) => self.walk_group(g, depth + 1, visit),
                Node::Field(_) => visit(depth + 1, child),
            }
        }
    }
}
