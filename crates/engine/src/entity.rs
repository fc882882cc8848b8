//! Behaviour shared by the five record types.

use std::fmt;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Row, Snapshot, Table, ValidationError};

/// Implements equality and hashing by `id`.
macro_rules! id_equality {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }
    };
}

pub(crate) use id_equality;

/// A record stored in one of the five collections.
///
/// Each implementor knows its [`Table`], how to reach its collection inside a
/// [`Snapshot`] and how to convert to and from a remote [`Row`].
pub trait Entity:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const TABLE: Table;

    fn id(&self) -> &str;

    /// Staff member this record points to, if any.
    fn staff_id(&self) -> Option<&str> {
        None
    }

    /// Canonical form of free-text fields; blank notes become `None`.
    fn normalize(&mut self) {}

    /// Field checks that the type system does not already guarantee.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Checks against records already stored, before `upsert_into`.
    fn check_unique(&self, _snapshot: &Snapshot) -> Result<(), ValidationError> {
        Ok(())
    }

    fn collection(snapshot: &Snapshot) -> &Vec<Self>;

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self>;

    /// Inserts or replaces (by id) `self` into its collection and returns the
    /// stored record.
    fn upsert_into(self, snapshot: &mut Snapshot) -> Self {
        let collection = Self::collection_mut(snapshot);
        match collection.iter_mut().find(|r| r.id() == self.id()) {
            Some(slot) => *slot = self.clone(),
            None => collection.push(self.clone()),
        }
        self
    }

    fn to_row(&self) -> Result<Row, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Decodes and validates a remote row.
    fn from_row(row: Row) -> Result<Self, ValidationError> {
        let mut record: Self =
            serde_json::from_value(row).map_err(|err| ValidationError::InvalidRow {
                table: Self::TABLE,
                reason: err.to_string(),
            })?;
        record.normalize();
        record.validate()?;
        Ok(record)
    }
}
