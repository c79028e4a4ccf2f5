//! Room repository functions for the domain layer.
//!
//! The store speaks loosely typed JSON documents keyed by room id and takes
//! partial updates as dotted paths (`"seat1.distance"`). Everything above this
//! module works on [`RoomState`]; documents are decoded (or rejected) here and
//! typed before/after states are turned into a [`FieldPatch`] only at the
//! `update` call.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::state::RoomState;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

/// Opaque room identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh sortable id.
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Raw room document as held by the store.
pub type Document = Value;

/// A single field change in a partial update.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Set(Value),
    /// Remove the field entirely.
    Delete,
}

/// Partial update keyed by dotted paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    fields: BTreeMap<String, FieldValue>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, path: impl Into<String>, value: Value) -> &mut Self {
        self.fields.insert(path.into(), FieldValue::Set(value));
        self
    }

    pub fn delete(&mut self, path: impl Into<String>) -> &mut Self {
        self.fields.insert(path.into(), FieldValue::Delete);
        self
    }

    pub fn get(&self, path: &str) -> Option<&FieldValue> {
        self.fields.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Change callback; receives the full document after the change.
pub type OnChange = Arc<dyn Fn(&Document) + Send + Sync>;

/// Live subscription. Dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Room State Gateway, implemented by the storage collaborator.
pub trait RoomStore: Send + Sync {
    fn get(&self, room_id: &RoomId) -> Result<Option<Document>, DomainError>;

    /// Full overwrite. Only used when a room is created.
    fn set(&self, room_id: &RoomId, document: Document) -> Result<(), DomainError>;

    /// Merge a partial update into an existing document.
    fn update(&self, room_id: &RoomId, patch: &FieldPatch) -> Result<(), DomainError>;

    fn subscribe(&self, room_id: &RoomId, on_change: OnChange)
        -> Result<Subscription, DomainError>;
}

fn corrupt(room_id: &RoomId, err: impl fmt::Display) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("Room {room_id} document rejected: {err}"),
    )
}

/// Decode a raw document into the typed aggregate, rejecting documents that
/// parse but break the room's structural invariants.
pub fn decode(room_id: &RoomId, document: Document) -> Result<RoomState, DomainError> {
    let room: RoomState = serde_json::from_value(document).map_err(|e| corrupt(room_id, e))?;
    room.check_invariants().map_err(|e| corrupt(room_id, e))?;
    Ok(room)
}

pub fn encode(room_id: &RoomId, room: &RoomState) -> Result<Document, DomainError> {
    serde_json::to_value(room).map_err(|e| corrupt(room_id, e))
}

pub fn find_by_id<S>(store: &S, room_id: &RoomId) -> Result<Option<RoomState>, DomainError>
where
    S: RoomStore + ?Sized,
{
    store
        .get(room_id)?
        .map(|doc| decode(room_id, doc))
        .transpose()
}

pub fn require_room<S>(store: &S, room_id: &RoomId) -> Result<RoomState, DomainError>
where
    S: RoomStore + ?Sized,
{
    find_by_id(store, room_id)?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Room, format!("Room {room_id} not found"))
    })
}

pub fn create_room<S>(store: &S, room_id: &RoomId, room: &RoomState) -> Result<(), DomainError>
where
    S: RoomStore + ?Sized,
{
    if store.get(room_id)?.is_some() {
        return Err(DomainError::conflict(
            ConflictKind::RoomExists,
            format!("Room {room_id} already exists"),
        ));
    }
    store.set(room_id, encode(room_id, room)?)
}

/// Persist the difference between two snapshots of the same room.
///
/// Returns the patch that was sent; an empty patch is not sent at all.
pub fn save_changes<S>(
    store: &S,
    room_id: &RoomId,
    before: &RoomState,
    after: &RoomState,
) -> Result<FieldPatch, DomainError>
where
    S: RoomStore + ?Sized,
{
    let patch = diff_patch(&encode(room_id, before)?, &encode(room_id, after)?);
    if !patch.is_empty() {
        store.update(room_id, &patch)?;
    }
    Ok(patch)
}

/// Dotted-path patch turning `before` into `after`.
///
/// Objects present on both sides are diffed field by field; anything else
/// (arrays, scalars, object vs null) is replaced whole. Keys that disappear
/// become deletes.
pub fn diff_patch(before: &Document, after: &Document) -> FieldPatch {
    let mut patch = FieldPatch::new();
    if let (Some(b), Some(a)) = (before.as_object(), after.as_object()) {
        diff_objects("", b, a, &mut patch);
    }
    patch
}

fn diff_objects(
    prefix: &str,
    before: &Map<String, Value>,
    after: &Map<String, Value>,
    patch: &mut FieldPatch,
) {
    let path = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };

    for (key, new) in after {
        match (before.get(key), new) {
            (Some(old), new) if old == new => {}
            (Some(Value::Object(old)), Value::Object(new)) => {
                diff_objects(&path(key), old, new, patch);
            }
            _ => {
                patch.set(path(key), new.clone());
            }
        }
    }
    for key in before.keys() {
        if !after.contains_key(key) {
            patch.delete(path(key));
        }
    }
}
