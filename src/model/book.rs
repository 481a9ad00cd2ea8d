//! Catalog records and the lookup used to resolve recommended ids.
//!
//! The engine never stores book metadata. Callers hand in a [`Catalog`]
//! when they want displayable records back instead of raw ids.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::BookId;

/// Anything that knows its own catalog key.
pub trait CatalogEntry {
    fn book_id(&self) -> BookId;
}

/// Lookup from book id to a displayable record.
pub trait Catalog {
    type Record;

    fn resolve(&self, id: BookId) -> Option<&Self::Record>;
}

/// Linear scan; the first record with a matching id wins.
impl<R: CatalogEntry> Catalog for [R] {
    type Record = R;

    fn resolve(&self, id: BookId) -> Option<&R> {
        self.iter().find(|r| r.book_id() == id)
    }
}

impl<R: CatalogEntry> Catalog for Vec<R> {
    type Record = R;

    fn resolve(&self, id: BookId) -> Option<&R> {
        self.as_slice().resolve(id)
    }
}

impl<R, S: std::hash::BuildHasher> Catalog for HashMap<BookId, R, S> {
    type Record = R;

    fn resolve(&self, id: BookId) -> Option<&R> {
        self.get(&id)
    }
}

impl<R> Catalog for BTreeMap<BookId, R> {
    type Record = R;

    fn resolve(&self, id: BookId) -> Option<&R> {
        self.get(&id)
    }
}

/// A book as held by the library catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub published: Option<NaiveDate>,
    pub isbn: String,
    /// Copies currently on the shelf.
    pub quantity: u32,
}

impl BookRecord {
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            published: None,
            isbn: String::new(),
            quantity: 0,
        }
    }

    pub fn with_published(mut self, date: NaiveDate) -> Self {
        self.published = Some(date);
        self
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = isbn.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

impl CatalogEntry for BookRecord {
    fn book_id(&self) -> BookId {
        self.id
    }
}
