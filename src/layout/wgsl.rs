// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
WGSL declarations for a packed layout.

WGSL's uniform-buffer rules place `f32`, `i32`, `u32`, `vec2f`, `vec3f` and `vec4f` at the
same offsets as [`ConstantBufferLayout::pack`](super::ConstantBufferLayout::pack), so the
struct can be emitted member-for-member without explicit `@align`/`@size` attributes.

Booleans are not host-shareable in WGSL; they are declared as `u32` (0 or 1).
WGSL does not allow empty structs, so an empty layout gets a single `_dummy: u32` member.
*/

use super::{ConstantBufferLayout, LayoutError};
use crate::value::ValueType;
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

fn wgsl_type(value_type: ValueType) -> Option<&'static str> {
    match value_type {
        ValueType::Bool => Some("u32"),
        ValueType::Int => Some("i32"),
        ValueType::Float => Some("f32"),
        ValueType::Float2 => Some("vec2<f32>"),
        ValueType::Float3 => Some("vec3<f32>"),
        ValueType::Float4 => Some("vec4<f32>"),
        ValueType::Text => None,
    }
}

/// Emits a WGSL struct declaration for `layout`.
///
/// Members use the field name.  Fields whose name appears more than once in the layout use
/// their path with `.` replaced by `_` instead, with a numeric suffix if that is taken too.
///
/// # Errors
/// Fails if a member name is a WGSL keyword or reserved word, or starts with `__`.
pub fn struct_declaration(
    layout: &ConstantBufferLayout<'_>,
    struct_name: &str,
) -> Result<String, LayoutError> {
    let mut out = String::new();
    //writing to a String can't fail
    let _ = writeln!(out, "struct {struct_name} {{");
    if layout.is_empty() {
        let _ = writeln!(out, "    _dummy: u32,");
    }
    for (entry, member) in layout.entries().iter().zip(member_names(layout)) {
        let field = entry.field();
        if is_reserved(&member) {
            return Err(LayoutError::ReservedShaderName {
                path: field.path().to_string(),
                name: member,
            });
        }
        //the layout never contains unsized fields
        let Some(ty) = wgsl_type(field.value_type()) else {
            continue;
        };
        let _ = writeln!(
            out,
            "    {member}: {ty}, // offset {offset}",
            offset = entry.byte_offset()
        );
    }
    out.push_str("}\n");
    Ok(out)
}

/// One unique member name per entry, in layout order.
fn member_names(layout: &ConstantBufferLayout<'_>) -> Vec<String> {
    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for entry in layout.entries() {
        *name_counts.entry(entry.field().name()).or_default() += 1;
    }
    let shared = |name: &str| name_counts.get(name).copied().unwrap_or(0) > 1;

    //unshared names are emitted as-is, so reserve them before generating any others
    let mut taken: HashSet<String> = layout
        .entries()
        .iter()
        .map(|e| e.field().name())
        .filter(|name| !shared(name))
        .map(str::to_string)
        .collect();

    layout
        .entries()
        .iter()
        .map(|entry| {
            let field = entry.field();
            if !shared(field.name()) {
                return field.name().to_string();
            }
            let base = field.path().replace('.', "_");
            let mut candidate = base.clone();
            let mut suffix = 1;
            while taken.contains(&candidate) {
                candidate = format!("{base}_{suffix}");
                suffix += 1;
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn is_reserved(name: &str) -> bool {
    name == "_" || name.starts_with("__") || WGSL_RESERVED.binary_search(&name).is_ok()
}

/// WGSL keywords and reserved words, sorted.
const WGSL_RESERVED: &[&str] = &[
    "NULL", "Self", "abstract", "active", "alias", "alignas", "alignof", "as", "asm",
    "asm_fragment", "async", "attribute", "auto", "await", "become", "binding_array", "break",
    "case", "cast", "catch", "class", "co_await", "co_return", "co_yield", "coherent",
    "column_major", "common", "compile", "compile_fragment", "concept", "const", "const_assert",
    "const_cast", "consteval", "constexpr", "constinit", "continue", "continuing", "crate",
    "debugger", "decltype", "default", "delete", "demote", "demote_to_helper", "diagnostic",
    "discard", "do", "dynamic_cast", "else", "enable", "enum", "explicit", "export", "extends",
    "extern", "external", "fallthrough", "false", "filter", "final", "finally", "fn", "for",
    "friend", "from", "fxgroup", "get", "goto", "groupshared", "highp", "if", "impl",
    "implements", "import", "inline", "instanceof", "interface", "layout", "let", "loop",
    "lowp", "macro", "macro_rules", "match", "mediump", "meta", "mod", "module", "move", "mut",
    "mutable", "namespace", "new", "nil", "noexcept", "noinline", "nointerpolation",
    "non_coherent", "noncoherent", "noperspective", "null", "nullptr", "of", "operator",
    "override", "package", "packoffset", "partition", "pass", "patch", "pixelfragment",
    "precise", "precision", "premerge", "priv", "protected", "pub", "public", "readonly", "ref",
    "regardless", "register", "reinterpret_cast", "require", "requires", "resource", "restrict",
    "return", "self", "set", "shared", "sizeof", "smooth", "snorm", "static", "static_assert",
    "static_cast", "std", "struct", "subroutine", "super", "switch", "target", "template",
    "this", "thread_local", "throw", "trait", "true", "try", "type", "typedef", "typeid",
    "typename", "typeof", "union", "unless", "unorm", "unsafe", "unsized", "use", "using",
    "var", "varying", "virtual", "volatile", "wgsl", "where", "while", "with", "writeonly",
    "yield",
];

/// Emits a uniform binding for `layout`, preceded by its struct declaration.
///
/// # Errors
/// As for [`struct_declaration`].
pub fn uniform_declaration(
    layout: &ConstantBufferLayout<'_>,
    struct_name: &str,
    variable_name: &str,
    group: u32,
    binding: u32,
) -> Result<String, LayoutError> {
    let mut out = struct_declaration(layout, struct_name)?;
    let _ = writeln!(
        out,
        "@group({group}) @binding({binding}) var<uniform> {variable_name}: {struct_name};"
    );
    Ok(out)
}
