//! In-memory room store, safe to share across threads.
//!
//! Documents are plain JSON values. Partial updates merge dotted paths into
//! the stored document; subscribers are called after the lock is released so
//! a callback may read or write the same room again.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::trace;

use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::rooms::{
    Document, FieldPatch, FieldValue, OnChange, RoomId, RoomStore, Subscription,
};

#[derive(Default)]
struct Inner {
    docs: RwLock<HashMap<RoomId, Document>>,
    subscribers: RwLock<HashMap<RoomId, Vec<(u64, OnChange)>>>,
    next_subscriber: AtomicU64,
}

impl Inner {
    fn notify(&self, room_id: &RoomId, document: &Document) {
        let callbacks: Vec<OnChange> = self
            .subscribers
            .read()
            .get(room_id)
            .map(|subs| subs.iter().map(|(_, cb)| Arc::clone(cb)).collect())
            .unwrap_or_default();
        trace!(room_id = %room_id, subscribers = callbacks.len(), "Notifying room subscribers");
        for cb in callbacks {
            cb(document);
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryRoomStore {
    inner: Arc<Inner>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self, room_id: &RoomId) -> usize {
        self.inner
            .subscribers
            .read()
            .get(room_id)
            .map_or(0, Vec::len)
    }
}

/// Apply one dotted-path change, creating intermediate objects as needed.
fn apply_path(doc: &mut Value, path: &str, value: &FieldValue) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else {
        return;
    };

    let mut node = doc;
    for seg in segments {
        if !node.is_object() {
            if matches!(value, FieldValue::Delete) {
                return;
            }
            *node = Value::Object(Map::new());
        }
        node = match node {
            Value::Object(map) => map
                .entry(seg.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            _ => return,
        };
    }

    if !node.is_object() {
        if matches!(value, FieldValue::Delete) {
            return;
        }
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        match value {
            FieldValue::Set(v) => {
                map.insert(last.to_string(), v.clone());
            }
            FieldValue::Delete => {
                map.remove(last);
            }
        }
    }
}

impl RoomStore for MemoryRoomStore {
    fn get(&self, room_id: &RoomId) -> Result<Option<Document>, DomainError> {
        Ok(self.inner.docs.read().get(room_id).cloned())
    }

    fn set(&self, room_id: &RoomId, document: Document) -> Result<(), DomainError> {
        self.inner
            .docs
            .write()
            .insert(room_id.clone(), document.clone());
        self.inner.notify(room_id, &document);
        Ok(())
    }

    fn update(&self, room_id: &RoomId, patch: &FieldPatch) -> Result<(), DomainError> {
        let snapshot = {
            let mut docs = self.inner.docs.write();
            let doc = docs.get_mut(room_id).ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Room, format!("Room {room_id} not found"))
            })?;
            for (path, value) in patch.iter() {
                apply_path(doc, path, value);
            }
            doc.clone()
        };
        self.inner.notify(room_id, &snapshot);
        Ok(())
    }

    fn subscribe(
        &self,
        room_id: &RoomId,
        on_change: OnChange,
    ) -> Result<Subscription, DomainError> {
        let id = self.inner.next_subscriber.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .write()
            .entry(room_id.clone())
            .or_default()
            .push((id, on_change));

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let room_id = room_id.clone();
        Ok(Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut subs = inner.subscribers.write();
                if let Some(list) = subs.get_mut(&room_id) {
                    list.retain(|(sid, _)| *sid != id);
                    if list.is_empty() {
                        subs.remove(&room_id);
                    }
                }
            }
        }))
    }
}
