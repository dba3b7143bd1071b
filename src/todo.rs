use std::rc::Rc;

use crate::map::{HashSetExt, Map, Set};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToDoRecord {
    pub id: String,
    pub created_at: String,
}

impl ToDoRecord {
    pub fn new(id: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: created_at.into(),
        }
    }
}

/// The two entries every app starts with.
pub fn seed_records() -> Vec<ToDoRecord> {
    vec![
        ToDoRecord::new("todo1", "18:00"),
        ToDoRecord::new("todo2", "20:30"),
    ]
}

/// An immutable snapshot of the to-do sequence.
///
/// Cloning shares the records. Operations that change the order build a new
/// snapshot and leave every existing clone untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToDoList {
    records: Rc<[ToDoRecord]>,
}

impl Default for ToDoList {
    fn default() -> Self {
        Self {
            records: Rc::from(Vec::new()),
        }
    }
}

impl ToDoList {
    pub fn new(records: Vec<ToDoRecord>) -> Result<Self> {
        let mut seen = Set::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(Error::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self {
            records: records.into(),
        })
    }

    pub fn seeded() -> Self {
        Self {
            records: seed_records().into(),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&ToDoRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ToDoRecord> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|record| record.id.as_str())
    }

    pub fn reversed(&self) -> Self {
        Self {
            records: self.records.iter().rev().cloned().collect(),
        }
    }

    /// Whether `other` is the very same allocation, not just equal records.
    #[inline(always)]
    pub fn shares_records_with(&self, other: &ToDoList) -> bool {
        Rc::ptr_eq(&self.records, &other.records)
    }
}

impl<'a> IntoIterator for &'a ToDoList {
    type Item = &'a ToDoRecord;
    type IntoIter = std::slice::Iter<'a, ToDoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Drafts owned explicitly by record id rather than by row identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftBook {
    drafts: Map<String, String>,
}

impl DraftBook {
    pub fn get(&self, id: &str) -> &str {
        self.drafts.get(id).map(String::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.drafts.insert(id.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

/// Root state of the app.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub todos: ToDoList,
    pub drafts: DraftBook,
}

impl AppState {
    pub fn new(todos: ToDoList) -> Self {
        Self {
            todos,
            drafts: DraftBook::default(),
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            todos: self.todos.reversed(),
            drafts: self.drafts.clone(),
        }
    }

    pub fn with_draft(&self, id: impl Into<String>, text: impl Into<String>) -> Self {
        let mut drafts = self.drafts.clone();
        drafts.set(id, text);
        Self {
            todos: self.todos.clone(),
            drafts,
        }
    }
}
