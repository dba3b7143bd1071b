#![allow(clippy::new_without_default)]

mod loc;
pub use loc::Loc;

mod key;
pub use key::Key;

pub mod map;

mod composer;
pub use composer::{Composer, Node, NodeKey};

mod recomposer;
pub use recomposer::Recomposer;

mod state;
pub use state::{State, StateId};

mod scope;
pub use scope::{Root, Scope, ScopeId};

pub mod utils;

mod error;
pub use error::{Error, Result};

pub mod todo;
pub use todo::{seed_records, AppState, DraftBook, ToDoList, ToDoRecord};

pub mod view;
pub use view::{
    render_list, render_row, Action, DraftBinding, DraftSlot, Element, Html, IdentityKey,
    KeyPolicy, RowView,
};

mod app;
pub use app::{App, AppConfig, RowSnapshot};
