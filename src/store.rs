// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Current setting values.

A [`ValueStore`] holds one value per field of a schema, starting from the defaults.  Every
write goes through the [validator](crate::validator), so bounded fields are clamped before
they are stored.  Observers registered with [`ValueStore::observe`] are called synchronously
after every successful write and every change of a group's expand state.

The store also keeps the per-frame bookkeeping a render loop needs:

* [`ValueStore::changed`] reports fields written since the last [`ValueStore::begin_frame`].
  Every field starts out changed, so the first frame always uploads.
* [`ValueStore::shader_constants_dirty`] reports whether the constant buffer needs a refill.
* [`ValueStore::snapshot`] copies all values for a render thread.

# Threading

The store is meant to be owned by one thread.  A render thread should read a [`Snapshot`]
taken once per frame.  If settings can change mid-frame, wrap the store in a lock instead;
`ValueStore` is `Send`, because observers are required to be.
*/

use crate::schema::{Field, FieldId, Group, GroupId, LookupError, SettingsSchema};
use crate::validator::{self, SetOutcome, TypeMismatchError};
use crate::value::Value;

/// Anything that can supply the current value of each field.
pub trait ValueSource {
    /// # Panics
    /// May panic if `field` belongs to a different schema.
    fn value(&self, field: FieldId) -> &Value;
}

/// A change reported to observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingChange<'a> {
    /// A field was written.  `value` is what was stored, after clamping.
    Value {
        field: &'a Field,
        value: &'a Value,
        outcome: SetOutcome,
    },
    /// A group was expanded or collapsed.
    Expanded { group: &'a Group, expanded: bool },
    /// The settings window was opened or closed.
    WindowOpened(bool),
}

/// Identifies a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer<'s> = Box<dyn FnMut(&SettingChange<'_>) + Send + 's>;

/// Writes to a path that could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SetError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatchError),
}

/// Current values for one schema.
pub struct ValueStore<'s> {
    schema: &'s SettingsSchema,
    values: Vec<Value>,
    changed: Vec<bool>,
    expanded: Vec<bool>,
    window_opened: bool,
    observers: Vec<(ObserverId, Observer<'s>)>,
    next_observer: u64,
}

impl std::fmt::Debug for ValueStore<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueStore")
            .field("values", &self.values)
            .field("expanded", &self.expanded)
            .field("window_opened", &self.window_opened)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<'s> ValueStore<'s> {
    /// Creates a store holding the default value of every field.
    pub fn new(schema: &'s SettingsSchema) -> Self {
        ValueStore {
            schema,
            values: schema.fields().map(|f| f.default_value().clone()).collect(),
            changed: vec![true; schema.field_count()],
            expanded: schema.groups().map(|g| g.expanded()).collect(),
            window_opened: true,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn schema(&self) -> &'s SettingsSchema {
        self.schema
    }

    pub fn get(&self, field: FieldId) -> &Value {
        &self.values[field.index()]
    }

    pub fn get_by_path(&self, path: &str) -> Result<&Value, LookupError> {
        Ok(self.get(self.schema.field_id(path)?))
    }

    /// Writes `value`, clamping it into the field's bounds.
    ///
    /// Out-of-range values are not an error; the returned outcome says whether clamping
    /// happened.  Observers are notified of every successful write, even if the stored value
    /// did not change.
    pub fn set(&mut self, field: FieldId, value: Value) -> Result<SetOutcome, TypeMismatchError> {
        let schema = self.schema;
        let definition = schema.field(field);
        let (value, outcome) = validator::validate(definition, value)?;
        if outcome.is_clamped() {
            logwise::warn_sync!(
                "clamped write to {path} to {value}",
                path = logwise::privacy::LogIt(definition.path()),
                value = logwise::privacy::LogIt(&value)
            );
        } else {
            logwise::trace_sync!(
                "set {path} to {value}",
                path = logwise::privacy::LogIt(definition.path()),
                value = logwise::privacy::LogIt(&value)
            );
        }
        self.commit(field, value, outcome);
        Ok(outcome)
    }

    /// Stores an already validated value and notifies observers.
    fn commit(&mut self, field: FieldId, value: Value, outcome: SetOutcome) {
        let schema = self.schema;
        self.values[field.index()] = value;
        self.changed[field.index()] = true;

        let change = SettingChange::Value {
            field: schema.field(field),
            value: &self.values[field.index()],
            outcome,
        };
        for (_, observer) in self.observers.iter_mut() {
            observer(&change);
        }
    }

    pub fn set_by_path(&mut self, path: &str, value: Value) -> Result<SetOutcome, SetError> {
        let field = self.schema.field_id(path)?;
        Ok(self.set(field, value)?)
    }

    /// Writes `value` from a context that must not fail, like the frame loop.
    ///
    /// A type mismatch is a bug in the caller.  Debug builds panic; release builds log the
    /// error, ignore the write and return `None`.
    pub fn set_or_log(&mut self, field: FieldId, value: Value) -> Option<SetOutcome> {
        match self.set(field, value) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                logwise::error_sync!(
                    "ignoring write: {err}",
                    err = logwise::privacy::LogIt(&err)
                );
                if cfg!(debug_assertions) {
                    panic!("{err}");
                }
                None
            }
        }
    }

    /// Restores the default value of `field`.  Observers are notified as for [`Self::set`].
    pub fn reset(&mut self, field: FieldId) {
        let schema = self.schema;
        let definition = schema.field(field);
        logwise::trace_sync!(
            "reset {path}",
            path = logwise::privacy::LogIt(definition.path())
        );
        //defaults were checked against the field's type and bounds when the schema was built
        self.commit(field, definition.default_value().clone(), SetOutcome::Stored);
    }

    pub fn reset_all(&mut self) {
        let schema = self.schema;
        for field in schema.fields() {
            self.reset(field.id());
        }
    }

    /// Whether `group` is currently expanded in the UI.
    pub fn expanded(&self, group: GroupId) -> bool {
        self.expanded[group.index()]
    }

    pub fn set_expanded(&mut self, group: GroupId, expanded: bool) {
        self.expanded[group.index()] = expanded;
        let change = SettingChange::Expanded {
            group: self.schema.group(group),
            expanded,
        };
        for (_, observer) in self.observers.iter_mut() {
            observer(&change);
        }
    }

    /// Flips the expand state of `group` and returns the new state.
    pub fn toggle_expanded(&mut self, group: GroupId) -> bool {
        let expanded = !self.expanded(group);
        self.set_expanded(group, expanded);
        expanded
    }

    pub fn window_opened(&self) -> bool {
        self.window_opened
    }

    pub fn set_window_opened(&mut self, opened: bool) {
        self.window_opened = opened;
        let change = SettingChange::WindowOpened(opened);
        for (_, observer) in self.observers.iter_mut() {
            observer(&change);
        }
    }

    /// Registers a callback invoked synchronously after each change.
    pub fn observe(&mut self, observer: impl FnMut(&SettingChange<'_>) + Send + 's) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer.  Returns whether it was registered.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(other, _)| *other != id);
        self.observers.len() != before
    }

    /// Whether `field` was written since the last [`Self::begin_frame`].
    pub fn changed(&self, field: FieldId) -> bool {
        self.changed[field.index()]
    }

    /// Whether any shader-constant field was written since the last [`Self::begin_frame`].
    pub fn shader_constants_dirty(&self) -> bool {
        self.schema
            .fields()
            .any(|f| f.is_shader_constant() && self.changed[f.id().index()])
    }

    /// Clears the change flags.  Call once per frame, after consuming them.
    pub fn begin_frame(&mut self) {
        self.changed.fill(false);
    }

    /// Copies all current values.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            values: self.values.clone(),
        }
    }
}

impl ValueSource for ValueStore<'_> {
    fn value(&self, field: FieldId) -> &Value {
        self.get(field)
    }
}

/// An owned copy of every value in a store, for use on another thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    values: Vec<Value>,
}

impl Snapshot {
    pub fn get(&self, field: FieldId) -> &Value {
        &self.values[field.index()]
    }
}

impl ValueSource for Snapshot {
    fn value(&self, field: FieldId) -> &Value {
        self.get(field)
    }
}
