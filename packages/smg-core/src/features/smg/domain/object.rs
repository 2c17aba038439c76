//! Memory objects
//!
//! An object is a handle: a process-unique id plus an immutable shared
//! payload. Graph snapshots clone handles, never payloads.

use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

/// Unique object identifier
pub type ObjectId = u64;

const NULL_OBJECT_ID: ObjectId = 0;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(NULL_OBJECT_ID + 1);

static NULL_OBJECT: Lazy<SmgObject> = Lazy::new(|| SmgObject {
    id: NULL_OBJECT_ID,
    data: Arc::new(ObjectData {
        size_in_bytes: 0,
        label: "NULL".to_string(),
    }),
});

#[derive(Debug)]
struct ObjectData {
    size_in_bytes: u64,
    label: String,
}

/// Memory region: stack variable, global variable, heap allocation, or the
/// null region.
///
/// Identity is by allocation, not by contents: two objects created with the
/// same size and label are different objects.
#[derive(Clone)]
pub struct SmgObject {
    id: ObjectId,
    data: Arc<ObjectData>,
}

impl SmgObject {
    /// Allocate a fresh object
    pub fn new(size_in_bytes: u64, label: impl Into<String>) -> Self {
        Self {
            id: NEXT_OBJECT_ID.fetch_add(1, AtomicOrdering::Relaxed),
            data: Arc::new(ObjectData {
                size_in_bytes,
                label: label.into(),
            }),
        }
    }

    /// The distinguished null object (size 0, shared by every graph)
    pub fn null() -> &'static SmgObject {
        &NULL_OBJECT
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn size_in_bytes(&self) -> u64 {
        self.data.size_in_bytes
    }

    /// Debug name; for variables this is the variable name
    pub fn label(&self) -> &str {
        &self.data.label
    }

    pub fn is_null(&self) -> bool {
        self.id == NULL_OBJECT_ID
    }

    pub fn not_null(&self) -> bool {
        !self.is_null()
    }
}

impl PartialEq for SmgObject {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SmgObject {}

impl Hash for SmgObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for SmgObject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmgObject {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for SmgObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmgObject")
            .field("id", &self.id)
            .field("label", &self.data.label)
            .field("size_in_bytes", &self.data.size_in_bytes)
            .finish()
    }
}

impl fmt::Display for SmgObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "NULL")
        } else {
            write!(f, "{}#{}({}b)", self.label(), self.id, self.size_in_bytes())
        }
    }
}
