use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::document::collection::{CollectionName, FieldValue};
use crate::document::ids::{EntityId, IdGenerator};
use crate::errors::EditorError;
use crate::models::resume::{PersonalField, ResumeDocument};

/// Address of a scalar field outside the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Summary,
    PersonalInfo(PersonalField),
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Summary => f.write_str("summary"),
            FieldPath::PersonalInfo(field) => write!(f, "personal_info.{field}"),
        }
    }
}

impl FromStr for FieldPath {
    type Err = EditorError;

    /// Parses `"summary"` or `"personal_info.<field>"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "summary" {
            return Ok(FieldPath::Summary);
        }
        match s.split_once('.') {
            Some(("personal_info", field)) => Ok(FieldPath::PersonalInfo(field.parse()?)),
            _ => Err(EditorError::UnknownField {
                target: "data".to_string(),
                field: s.to_string(),
            }),
        }
    }
}

/// Owns the résumé open in the current editing session.
///
/// Mutations take `&mut self` and never suspend, so they cannot interleave.
/// `snapshot()` hands out the current `Arc`; the next mutation copies on
/// write, so a snapshot never observes later edits.
#[derive(Debug, Default)]
pub struct DocumentStore {
    current: Option<Arc<ResumeDocument>>,
    ids: IdGenerator,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn document_id(&self) -> Option<&str> {
        self.current.as_deref().map(|doc| doc.id.as_str())
    }

    /// Replaces the held document wholesale. Entity ids it carries are
    /// reserved so new entities never collide with them.
    pub fn install(&mut self, document: ResumeDocument) {
        for name in CollectionName::ALL {
            self.ids.observe(&document.data.collection(name).ids());
        }
        debug!("Installed document {}", document.id);
        self.current = Some(Arc::new(document));
    }

    /// Drops the held document. Issued ids stay reserved.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn snapshot(&self) -> Result<Arc<ResumeDocument>, EditorError> {
        self.current.clone().ok_or(EditorError::NoDocumentLoaded)
    }

    pub fn replace_field(
        &mut self,
        path: FieldPath,
        value: impl Into<String>,
    ) -> Result<(), EditorError> {
        let doc = self.document_mut()?;
        let value = value.into();
        match path {
            FieldPath::Summary => doc.data.summary = value,
            FieldPath::PersonalInfo(field) => doc.data.personal_info.set(field, value),
        }
        debug!("Replaced {path}");
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), EditorError> {
        let doc = self.document_mut()?;
        doc.title = title.into();
        debug!("Retitled {} to {:?}", doc.id, doc.title);
        Ok(())
    }

    /// Appends a blank entity to `collection` and returns its fresh id.
    pub fn append_entity(&mut self, collection: CollectionName) -> Result<EntityId, EditorError> {
        let doc = self
            .current
            .as_mut()
            .map(Arc::make_mut)
            .ok_or(EditorError::NoDocumentLoaded)?;
        let id = self.ids.next_id();
        doc.data.collection_mut(collection).push_blank(id.clone());
        debug!("Appended {id} to {collection}");
        Ok(id)
    }

    pub fn update_entity_field(
        &mut self,
        collection: CollectionName,
        position: usize,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), EditorError> {
        self.check_position(collection, position)?;
        let doc = self.document_mut()?;
        doc.data
            .collection_mut(collection)
            .set_field(position, field, value.into().into())?;
        debug!("Updated {collection}[{position}].{field}");
        Ok(())
    }

    /// Removes the entity at `position`, shifting later entities left.
    pub fn remove_entity(
        &mut self,
        collection: CollectionName,
        position: usize,
    ) -> Result<EntityId, EditorError> {
        self.check_position(collection, position)?;
        let doc = self.document_mut()?;
        let removed = doc.data.collection_mut(collection).remove_at(position)?;
        debug!("Removed {removed} from {collection} at {position}");
        Ok(removed)
    }

    pub fn position_of(
        &self,
        collection: CollectionName,
        id: &EntityId,
    ) -> Result<Option<usize>, EditorError> {
        Ok(self.document()?.data.collection(collection).position_of(id))
    }

    pub fn len(&self, collection: CollectionName) -> Result<usize, EditorError> {
        Ok(self.document()?.data.collection(collection).len())
    }

    fn document(&self) -> Result<&ResumeDocument, EditorError> {
        self.current.as_deref().ok_or(EditorError::NoDocumentLoaded)
    }

    /// Rejects a bad position on the shared document, before any copy-on-write.
    fn check_position(&self, collection: CollectionName, position: usize) -> Result<(), EditorError> {
        let len = self.len(collection)?;
        if position >= len {
            return Err(EditorError::IndexOutOfRange {
                collection,
                position,
                len,
            });
        }
        Ok(())
    }

    fn document_mut(&mut self) -> Result<&mut ResumeDocument, EditorError> {
        self.current
            .as_mut()
            .map(Arc::make_mut)
            .ok_or(EditorError::NoDocumentLoaded)
    }
}
