//! Collection Editor: one operation set for all seven entity collections.
//!
//! Each collection is a `Vec<T>` of some `T: Entity`; `EntityList` erases the
//! entity type so the store can address any collection by `CollectionName`.
//! Defaults for new entities come from `Entity::blank`, which every entity
//! type derives from its `Default` impl.

use std::fmt;
use std::str::FromStr;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::document::ids::EntityId;
use crate::errors::EditorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionName {
    Experiences,
    Internships,
    Hackathons,
    Events,
    Education,
    Skills,
    Projects,
}

impl CollectionName {
    pub const ALL: [CollectionName; 7] = [
        CollectionName::Experiences,
        CollectionName::Internships,
        CollectionName::Hackathons,
        CollectionName::Events,
        CollectionName::Education,
        CollectionName::Skills,
        CollectionName::Projects,
    ];

    /// Key of the collection inside the `data` payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Experiences => "experiences",
            CollectionName::Internships => "internships",
            CollectionName::Hackathons => "hackathons",
            CollectionName::Events => "events",
            CollectionName::Education => "education",
            CollectionName::Skills => "skills",
            CollectionName::Projects => "projects",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionName {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionName::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| EditorError::UnknownCollection(s.to_string()))
    }
}

/// A record stored in one of the collections.
pub trait Entity:
    Serialize + DeserializeOwned + Clone + Default + fmt::Debug + PartialEq + Send + Sync + 'static
{
    const COLLECTION: CollectionName;

    fn id(&self) -> &EntityId;

    /// A new entity carrying `id` and the collection's field defaults.
    fn blank(id: EntityId) -> Self;
}

/// Value written by a field-level update.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Number(i64),
    Flag(bool),
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => Value::String(s),
            FieldValue::List(items) => Value::Array(items.into_iter().map(Value::String).collect()),
            FieldValue::Number(n) => Value::from(n),
            FieldValue::Flag(b) => Value::Bool(b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<u8> for FieldValue {
    fn from(n: u8) -> Self {
        FieldValue::Number(i64::from(n))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// Type-erased view of one collection.
pub trait EntityList {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids in stored order.
    fn ids(&self) -> Vec<EntityId>;

    fn position_of(&self, id: &EntityId) -> Option<usize>;

    /// Appends a blank entity carrying `id`.
    fn push_blank(&mut self, id: EntityId);

    /// Replaces one field of the entity at `position`. The entity is left
    /// untouched when any check fails.
    fn set_field(&mut self, position: usize, field: &str, value: Value) -> Result<(), EditorError>;

    /// Removes the entity at `position` and returns its id.
    fn remove_at(&mut self, position: usize) -> Result<EntityId, EditorError>;
}

impl<T: Entity> EntityList for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|e| e.id().clone()).collect()
    }

    fn position_of(&self, id: &EntityId) -> Option<usize> {
        self.iter().position(|e| e.id() == id)
    }

    fn push_blank(&mut self, id: EntityId) {
        self.push(T::blank(id));
    }

    fn set_field(&mut self, position: usize, field: &str, value: Value) -> Result<(), EditorError> {
        let len = Vec::len(self);
        let entity = self
            .get_mut(position)
            .ok_or(EditorError::IndexOutOfRange {
                collection: T::COLLECTION,
                position,
                len,
            })?;

        if field == "id" {
            return Err(EditorError::ImmutableField(field.to_string()));
        }

        let mut record = serde_json::to_value(&*entity).map_err(|e| invalid(field, e))?;
        let slot = record
            .as_object_mut()
            .and_then(|fields| fields.get_mut(field))
            .ok_or_else(|| EditorError::UnknownField {
                target: T::COLLECTION.to_string(),
                field: field.to_string(),
            })?;
        *slot = value;

        *entity = serde_json::from_value(record).map_err(|e| invalid(field, e))?;
        Ok(())
    }

    fn remove_at(&mut self, position: usize) -> Result<EntityId, EditorError> {
        let len = Vec::len(self);
        if position >= len {
            return Err(EditorError::IndexOutOfRange {
                collection: T::COLLECTION,
                position,
                len,
            });
        }
        Ok(self.remove(position).id().clone())
    }
}

fn invalid(field: &str, err: serde_json::Error) -> EditorError {
    EditorError::InvalidFieldValue {
        field: field.to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entities::{Education, Skill};

    fn skills(names: &[&str]) -> Vec<Skill> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Skill {
                id: EntityId::from(format!("s{i}")),
                name: name.to_string(),
                ..Skill::default()
            })
            .collect()
    }

    #[test]
    fn test_collection_name_parse() {
        for name in CollectionName::ALL {
            assert_eq!(name.as_str().parse::<CollectionName>().unwrap(), name);
        }
        assert!(matches!(
            "awards".parse::<CollectionName>(),
            Err(EditorError::UnknownCollection(ref s)) if s == "awards"
        ));
    }

    #[test]
    fn test_set_field_text() {
        let mut list = skills(&["Rust", "Go"]);
        list.set_field(1, "name", FieldValue::from("Zig").into()).unwrap();
        assert_eq!(list[1].name, "Zig");
        assert_eq!(list[0].name, "Rust");
    }

    #[test]
    fn test_set_field_number_and_flag() {
        let mut list = skills(&["Rust"]);
        list.set_field(0, "proficiency", FieldValue::from(5u8).into()).unwrap();
        list.set_field(0, "verified", FieldValue::from(true).into()).unwrap();
        assert_eq!(list[0].proficiency, 5);
        assert!(list[0].verified);
    }

    #[test]
    fn test_set_field_rejects_id() {
        let mut list = skills(&["Rust"]);
        let err = list.set_field(0, "id", FieldValue::from("x").into()).unwrap_err();
        assert!(matches!(err, EditorError::ImmutableField(_)));
        assert_eq!(list[0].id.as_str(), "s0");
    }

    #[test]
    fn test_set_field_unknown_field() {
        let mut list = skills(&["Rust"]);
        let err = list.set_field(0, "colour", FieldValue::from("red").into()).unwrap_err();
        assert!(matches!(err, EditorError::UnknownField { ref field, .. } if field == "colour"));
    }

    #[test]
    fn test_set_field_wrong_type_leaves_entity_untouched() {
        let mut list = skills(&["Rust"]);
        let before = list.clone();
        let err = list
            .set_field(0, "proficiency", FieldValue::from("very").into())
            .unwrap_err();
        assert!(matches!(err, EditorError::InvalidFieldValue { .. }));
        assert_eq!(list, before);
    }

    #[test]
    fn test_set_field_out_of_range() {
        let mut list = skills(&["Rust"]);
        let err = list.set_field(1, "name", FieldValue::from("Go").into()).unwrap_err();
        assert!(matches!(
            err,
            EditorError::IndexOutOfRange { collection: CollectionName::Skills, position: 1, len: 1 }
        ));
    }

    #[test]
    fn test_list_field() {
        let mut list: Vec<crate::models::entities::Project> = Vec::new();
        list.push_blank(EntityId::from("p1"));
        list.set_field(0, "technologies", FieldValue::from(vec!["Rust", "Tokio"]).into())
            .unwrap();
        assert_eq!(list[0].technologies, vec!["Rust", "Tokio"]);
    }

    #[test]
    fn test_remove_at_shifts_left() {
        let mut list = skills(&["A", "B", "C"]);
        let removed = list.remove_at(1).unwrap();
        assert_eq!(removed.as_str(), "s1");
        assert_eq!(list.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["A", "C"]);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut list: Vec<Education> = Vec::new();
        assert!(matches!(
            list.remove_at(0),
            Err(EditorError::IndexOutOfRange { collection: CollectionName::Education, .. })
        ));
    }

    #[test]
    fn test_position_of() {
        let list = skills(&["A", "B"]);
        let dyn_list: &dyn EntityList = &list;
        assert_eq!(dyn_list.position_of(&EntityId::from("s1")), Some(1));
        assert_eq!(dyn_list.position_of(&EntityId::from("zz")), None);
        assert_eq!(dyn_list.ids(), vec![EntityId::from("s0"), EntityId::from("s1")]);
    }
}
