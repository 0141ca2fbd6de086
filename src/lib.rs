/*! cbuffer_settings turns an annotated, nested settings definition into the two things a
graphics demo needs from it: a GPU constant buffer and a UI.

Settings are declared once, as `const` struct literals, with a small closed vocabulary of
annotations:

| Annotation            | Applies to | Effect                                                 |
|-----------------------|------------|--------------------------------------------------------|
| `ExpandGroup`         | groups     | group starts expanded in the UI                        |
| `UseAsShaderConstant` | fields     | field is packed into the constant buffer               |
| `DisplayName`         | both       | UI label (defaults to the declared name)               |
| `HelpText`            | both       | UI tooltip                                             |
| `MinValue`/`MaxValue` | numeric fields | writes are clamped into the bounds                 |

From a definition, this crate builds

* a [`SettingsSchema`](schema::SettingsSchema): the immutable tree of groups and fields,
* a [`ConstantBufferLayout`](layout::ConstantBufferLayout): declaration-ordered, aligned
  offsets of the shader-visible fields, padded to 16 bytes,
* a [`ValueStore`](store::ValueStore): the current values, validated on every write, with
  observers and per-frame change tracking,
* a [`UiDescription`](ui::UiDescription): a fresh renderer-agnostic panel tree per call.

```
use cbuffer_settings::demo;
use cbuffer_settings::layout::ConstantBufferLayout;
use cbuffer_settings::schema::SettingsSchema;
use cbuffer_settings::store::ValueStore;
use cbuffer_settings::value::Value;

# fn main() -> Result<(), cbuffer_settings::Error> {
let schema = SettingsSchema::build(&demo::SETTINGS)?;
let layout = ConstantBufferLayout::pack(&schema)?;
let mut store = ValueStore::new(&schema);

let zoom = schema.field_id(demo::TIMELINE_ZOOM).unwrap();
let outcome = store.set(zoom, Value::Float(20.0)).unwrap();
assert!(outcome.is_clamped());
assert_eq!(store.get(zoom), &Value::Float(16.0));

let ui = cbuffer_settings::ui::describe(&store);
assert_eq!(ui.field(zoom).unwrap().max, Some(16.0));

//none of the demo settings are shader constants
assert_eq!(layout.total_size(), 0);
# Ok(())
# }
```

# Errors

Building a schema or packing a layout can fail; both are startup errors that should stop
the application, since an inconsistent schema would corrupt the GPU memory layout.
[`Error`] wraps both so startup code can use `?`.  Writing a value never fails because of
its range; only a value of the wrong type is rejected.

# Backends

With the `backend_wgpu` feature (on by default) the [`gpu`] module can create and refill a
wgpu uniform buffer from a layout.
*/

pub mod annotation;
pub mod demo;
#[cfg(feature = "backend_wgpu")]
pub mod gpu;
pub mod layout;
pub mod schema;
pub mod store;
pub mod ui;
pub mod validator;
pub mod value;

/// A startup error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Can't build settings schema: {0}")]
    Schema(#[from] schema::SchemaError),
    #[error("Can't lay out constant buffer: {0}")]
    Layout(#[from] layout::LayoutError),
}
