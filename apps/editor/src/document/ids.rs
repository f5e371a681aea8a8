use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable handle for a collection entity. Opaque string on the wire: ids
/// created elsewhere (timestamps, UUIDs) are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues entity ids for one editing session.
///
/// Every id it has issued or observed in a loaded document stays reserved for
/// the generator's lifetime, so deleted ids are never handed out again.
#[derive(Debug, Default)]
pub struct IdGenerator {
    seen: HashSet<EntityId>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> EntityId {
        loop {
            let candidate = EntityId(Uuid::new_v4().to_string());
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Reserves ids that arrived with a loaded document.
    pub fn observe<'a>(&mut self, ids: impl IntoIterator<Item = &'a EntityId>) {
        self.seen.extend(ids.into_iter().cloned());
    }

    pub fn is_reserved(&self, id: &EntityId) -> bool {
        self.seen.contains(id)
    }
}
