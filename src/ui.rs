// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Renderer-agnostic UI description.
//!
//! [`describe`] projects a schema and the current state of a [`ValueStore`] into a tree of
//! panels that mirrors the group/field structure.  A UI layer walks the tree and draws
//! whatever widgets it likes; it writes user edits back through the store.
//!
//! The description is rebuilt on every call and never cached, since values and expand state
//! may change between calls.  Collapsed groups still carry their children; whether to draw
//! them is up to the renderer.

use crate::schema::{FieldId, GroupId, Node};
use crate::store::ValueStore;
use crate::value::{Value, ValueType};

/// Suggested control for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    /// Booleans.
    Checkbox,
    /// Numbers with both bounds.
    Slider,
    /// Numbers with at most one bound.
    Spinner,
    /// Text.
    TextBox,
}

impl Widget {
    fn for_field(value_type: ValueType, min: Option<f64>, max: Option<f64>) -> Widget {
        match value_type {
            ValueType::Bool => Widget::Checkbox,
            ValueType::Text => Widget::TextBox,
            _ if min.is_some() && max.is_some() => Widget::Slider,
            _ => Widget::Spinner,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiDescription<'s> {
    /// Whether the settings window is open.
    pub window_opened: bool,
    pub root: GroupPanel<'s>,
}

impl<'s> UiDescription<'s> {
    /// Finds the panel for `field` anywhere in the tree.
    pub fn field(&self, field: FieldId) -> Option<&FieldPanel<'s>> {
        self.root.find_field(field)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelNode<'s> {
    Group(GroupPanel<'s>),
    Field(FieldPanel<'s>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupPanel<'s> {
    pub id: GroupId,
    pub name: &'s str,
    pub display_name: &'s str,
    pub help_text: Option<&'s str>,
    pub expanded: bool,
    pub children: Vec<PanelNode<'s>>,
}

impl<'s> GroupPanel<'s> {
    fn find_field(&self, field: FieldId) -> Option<&FieldPanel<'s>> {
        self.children.iter().find_map(|child| match child {
            PanelNode::Field(f) if f.id == field => Some(f),
            PanelNode::Field(_) => None,
            PanelNode::Group(g) => g.find_field(field),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldPanel<'s> {
    pub id: FieldId,
    pub name: &'s str,
    /// The `DisplayName` annotation, or the declared name.
    pub display_name: &'s str,
    pub help_text: Option<&'s str>,
    pub value_type: ValueType,
    pub value: Value,
    /// Bounds for sliders and spinners.  Always `None` for non-numeric fields.
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub widget: Widget,
}

/// Builds a fresh description from the store's schema and current state.
pub fn describe<'s>(store: &ValueStore<'s>) -> UiDescription<'s> {
    UiDescription {
        window_opened: store.window_opened(),
        root: group_panel(store, GroupId::ROOT),
    }
}

fn group_panel<'s>(store: &ValueStore<'s>, id: GroupId) -> GroupPanel<'s> {
    let schema = store.schema();
    let group = schema.group(id);
    let children = schema
        .children(group)
        .map(|child| match child {
            Node::Group(g) => PanelNode::Group(group_panel(store, g.id())),
            Node::Field(f) => PanelNode::Field(FieldPanel {
                id: f.id(),
                name: f.name(),
                display_name: f.display_name(),
                help_text: f.help_text(),
                value_type: f.value_type(),
                value: store.get(f.id()).clone(),
                min: f.min(),
                max: f.max(),
                widget: Widget::for_field(f.value_type(), f.min(), f.max()),
            }),
        })
        .collect();
    GroupPanel {
        id,
        name: group.name(),
        display_name: group.display_name(),
        help_text: group.help_text(),
        expanded: store.expanded(id),
        children,
    }
}
