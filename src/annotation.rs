// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! The annotation vocabulary.
//!
//! A settings definition attaches a list of [`Annotation`] tags to each group and field.
//! While building the schema, the tags of each node are folded into one [`Annotations`]
//! record, which is what the rest of the crate queries.
//!
//! The vocabulary is closed.  Some tags only make sense on one kind of node:
//!
//! | Tag                   | Group | Field              |
//! |-----------------------|-------|--------------------|
//! | `ExpandGroup`         | yes   | no                 |
//! | `UseAsShaderConstant` | no    | yes                |
//! | `DisplayName`         | yes   | yes                |
//! | `HelpText`            | yes   | yes                |
//! | `MinValue`            | no    | numeric types only |
//! | `MaxValue`            | no    | numeric types only |

use crate::schema::SchemaError;
use std::fmt::Display;

/// A metadata tag attached to a group or field in a settings definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Annotation {
    /// Whether the group starts expanded in the UI.  Groups start collapsed otherwise.
    ExpandGroup(bool),
    /// Whether the field is copied into the GPU constant buffer.
    UseAsShaderConstant(bool),
    /// Human-readable label.  Defaults to the declared name.
    DisplayName(&'static str),
    /// Tooltip text.
    HelpText(&'static str),
    /// Lower bound.  Writes below it are clamped.
    MinValue(f64),
    /// Upper bound.  Writes above it are clamped.
    MaxValue(f64),
}

impl Annotation {
    pub const fn tag(&self) -> AnnotationTag {
        match self {
            Annotation::ExpandGroup(_) => AnnotationTag::ExpandGroup,
            Annotation::UseAsShaderConstant(_) => AnnotationTag::UseAsShaderConstant,
            Annotation::DisplayName(_) => AnnotationTag::DisplayName,
            Annotation::HelpText(_) => AnnotationTag::HelpText,
            Annotation::MinValue(_) => AnnotationTag::MinValue,
            Annotation::MaxValue(_) => AnnotationTag::MaxValue,
        }
    }
}

/// The kind of an [`Annotation`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationTag {
    ExpandGroup,
    UseAsShaderConstant,
    DisplayName,
    HelpText,
    MinValue,
    MaxValue,
}

impl AnnotationTag {
    /// Whether the tag may be attached to a node of `kind` at all.
    ///
    /// Bounds are further restricted to numeric fields, which is checked by the schema builder.
    pub const fn applies_to(self, kind: NodeKind) -> bool {
        match (self, kind) {
            (AnnotationTag::ExpandGroup, NodeKind::Group) => true,
            (AnnotationTag::ExpandGroup, NodeKind::Field) => false,
            (AnnotationTag::UseAsShaderConstant, NodeKind::Group) => false,
            (AnnotationTag::UseAsShaderConstant, NodeKind::Field) => true,
            (AnnotationTag::DisplayName | AnnotationTag::HelpText, _) => true,
            (AnnotationTag::MinValue | AnnotationTag::MaxValue, NodeKind::Group) => false,
            (AnnotationTag::MinValue | AnnotationTag::MaxValue, NodeKind::Field) => true,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            AnnotationTag::ExpandGroup => "ExpandGroup",
            AnnotationTag::UseAsShaderConstant => "UseAsShaderConstant",
            AnnotationTag::DisplayName => "DisplayName",
            AnnotationTag::HelpText => "HelpText",
            AnnotationTag::MinValue => "MinValue",
            AnnotationTag::MaxValue => "MaxValue",
        }
    }
}

impl Display for AnnotationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a schema node is a group or a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Group,
    Field,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Group => f.write_str("group"),
            NodeKind::Field => f.write_str("field"),
        }
    }
}

/// The annotations of one schema node, folded into a record.
///
/// Every entry is optional; an absent entry means the tag was not attached.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Annotations {
    expand_group: Option<bool>,
    use_as_shader_constant: Option<bool>,
    display_name: Option<&'static str>,
    help_text: Option<&'static str>,
    min_value: Option<f64>,
    max_value: Option<f64>,
}

impl Annotations {
    /// Folds `tags` into a record for the node at `path`.
    ///
    /// Rejects tags that don't apply to `kind` and tags attached more than once.
    pub(crate) fn collect(
        path: &str,
        kind: NodeKind,
        tags: &[Annotation],
    ) -> Result<Self, SchemaError> {
        let mut out = Annotations::default();
        for annotation in tags {
            let tag = annotation.tag();
            if !tag.applies_to(kind) {
                return Err(SchemaError::MisplacedAnnotation {
                    path: path.to_string(),
                    tag,
                    kind,
                });
            }
            let already_set = match *annotation {
                Annotation::ExpandGroup(v) => out.expand_group.replace(v).is_some(),
                Annotation::UseAsShaderConstant(v) => {
                    out.use_as_shader_constant.replace(v).is_some()
                }
                Annotation::DisplayName(v) => out.display_name.replace(v).is_some(),
                Annotation::HelpText(v) => out.help_text.replace(v).is_some(),
                Annotation::MinValue(v) => out.min_value.replace(v).is_some(),
                Annotation::MaxValue(v) => out.max_value.replace(v).is_some(),
            };
            if already_set {
                return Err(SchemaError::DuplicateAnnotation {
                    path: path.to_string(),
                    tag,
                });
            }
        }
        Ok(out)
    }

    pub fn expand_group(&self) -> Option<bool> {
        self.expand_group
    }
    pub fn use_as_shader_constant(&self) -> Option<bool> {
        self.use_as_shader_constant
    }
    pub fn display_name(&self) -> Option<&'static str> {
        self.display_name
    }
    pub fn help_text(&self) -> Option<&'static str> {
        self.help_text
    }
    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }
    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    /// Whether any bound was declared.
    pub fn has_bounds(&self) -> bool {
        self.min_value.is_some() || self.max_value.is_some()
    }
}
