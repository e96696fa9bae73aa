//! Local mirror of a fetched list.
//!
//! Rows are removed only once the backend has confirmed the delete, so a
//! failed request never makes an item vanish from the view.

use crate::models::{Category, District, Image, OperatingHour, Place, Season, SeasonRelation};
use crate::types::DbId;

/// Records addressable by backend id.
pub trait Identified {
    fn id(&self) -> Option<DbId>;
}

macro_rules! identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> Option<DbId> {
                Some(self.id)
            }
        })*
    };
}

identified!(Place, District, Category, Season, SeasonRelation, Image);

impl Identified for OperatingHour {
    fn id(&self) -> Option<DbId> {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    items: Vec<T>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> ListState<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: DbId) -> Option<&T> {
        self.items.iter().find(|i| i.id() == Some(id))
    }

    /// Drop `id` if and only if the backend reported success.
    pub fn apply_delete<E>(&mut self, id: DbId, backend_result: Result<(), E>) -> Result<(), E> {
        backend_result?;
        self.items.retain(|i| i.id() != Some(id));
        Ok(())
    }

    /// Replace the row with the same id, or append a new one.
    pub fn upsert(&mut self, item: T) {
        match item
            .id()
            .and_then(|id| self.items.iter().position(|i| i.id() == Some(id)))
        {
            Some(pos) => self.items[pos] = item,
            None => self.items.push(item),
        }
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}
