// Document Store and the uniform collection operation set.
// All mutations are synchronous; readers only ever see `Arc` snapshots.

pub mod collection;
pub mod ids;
pub mod store;

pub use collection::{CollectionName, Entity, EntityList, FieldValue};
pub use ids::{EntityId, IdGenerator};
pub use store::{DocumentStore, FieldPath};
