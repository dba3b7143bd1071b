use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::todo::{AppState, ToDoList, ToDoRecord};
use crate::{AppConfig, Error, Key, Root};

pub type Scope<S> = crate::Scope<S, Element>;
pub type State<T> = crate::State<T, Element>;

/// How a rendered row is identified across passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyPolicy {
    /// Position in the current sequence. Local row state stays with the position.
    #[default]
    Index,
    /// The record's own id. Local row state follows the record.
    Id,
}

impl KeyPolicy {
    pub fn key_for(self, index: usize, record: &ToDoRecord) -> IdentityKey {
        match self {
            KeyPolicy::Index => IdentityKey::Index(index),
            KeyPolicy::Id => IdentityKey::Id(record.id.clone()),
        }
    }
}

impl FromStr for KeyPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "index" | "position" => Ok(KeyPolicy::Index),
            "id" => Ok(KeyPolicy::Id),
            _ => Err(Error::UnknownKeyPolicy(s.to_string())),
        }
    }
}

impl Display for KeyPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KeyPolicy::Index => f.write_str("index"),
            KeyPolicy::Id => f.write_str("id"),
        }
    }
}

/// Where the editable text of a row lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DraftBinding {
    /// A state cell of the row node, so the key policy decides its fate.
    #[default]
    Local,
    /// The [`DraftBook`](crate::DraftBook) of the app state, looked up by record id.
    Record,
}

impl FromStr for DraftBinding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(DraftBinding::Local),
            "record" => Ok(DraftBinding::Record),
            _ => Err(Error::UnknownDraftBinding(s.to_string())),
        }
    }
}

impl Display for DraftBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DraftBinding::Local => f.write_str("local"),
            DraftBinding::Record => f.write_str("record"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Index(usize),
    Id(String),
}

impl From<&IdentityKey> for Key {
    fn from(key: &IdentityKey) -> Self {
        match key {
            IdentityKey::Index(index) => Key::from(*index),
            IdentityKey::Id(id) => Key::from(id.as_str()),
        }
    }
}

impl Display for IdentityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::Index(index) => write!(f, "#{}", index),
            IdentityKey::Id(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub key: IdentityKey,
    pub id_label: String,
    /// Always empty: the input is not bound to the record.
    pub draft: String,
    pub created_at_label: String,
}

pub fn render_row(record: &ToDoRecord, key: IdentityKey) -> RowView {
    RowView {
        key,
        id_label: record.id.clone(),
        draft: String::new(),
        created_at_label: record.created_at.clone(),
    }
}

pub fn render_list(todos: &ToDoList, policy: KeyPolicy) -> Vec<RowView> {
    todos
        .iter()
        .enumerate()
        .map(|(index, record)| render_row(record, policy.key_for(index, record)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reverse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftSlot {
    Local(State<String>),
    Record(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Container,
    Button { label: String, action: Action },
    Table,
    Row { key: IdentityKey },
    Label(String),
    Input { value: String, slot: DraftSlot },
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Element::Container => f.write_str("div"),
            Element::Button { label, .. } => write!(f, "button({})", label),
            Element::Table => f.write_str("table"),
            Element::Row { key } => write!(f, "tr[key={}]", key),
            Element::Label(text) => write!(f, "label({})", text),
            Element::Input { value, .. } => write!(f, "input({:?})", value),
        }
    }
}

pub struct Div;
pub struct Button;
pub struct Table;
pub struct Row;
pub struct Label;
pub struct Input;

pub trait Html {
    fn div<C>(&self, content: C)
    where
        C: FnOnce(Scope<Div>);

    fn button<T>(&self, label: T, action: Action)
    where
        T: Into<String>;

    fn table<C>(&self, content: C)
    where
        C: FnOnce(Scope<Table>);

    fn row<C>(&self, key: IdentityKey, content: C)
    where
        C: FnOnce(Scope<Row>);

    fn label<T>(&self, text: T)
    where
        T: Into<String>;

    fn input(&self, value: String, slot: DraftSlot);
}

impl<S> Html for Scope<S>
where
    S: 'static,
{
    #[track_caller]
    fn div<C>(&self, content: C)
    where
        C: FnOnce(Scope<Div>),
    {
        let scope = self.child::<Div>();
        self.create_node(scope, content, || (), |_| Element::Container, |_, _| {});
    }

    #[track_caller]
    fn button<T>(&self, label: T, action: Action)
    where
        T: Into<String>,
    {
        let scope = self.child::<Button>();
        let label = label.into();
        self.create_node(
            scope,
            |_| {},
            move || Element::Button { label, action },
            |button| button,
            |node, button| *node = button,
        );
    }

    #[track_caller]
    fn table<C>(&self, content: C)
    where
        C: FnOnce(Scope<Table>),
    {
        let scope = self.child::<Table>();
        self.create_node(scope, content, || (), |_| Element::Table, |_, _| {});
    }

    #[track_caller]
    fn row<C>(&self, key: IdentityKey, content: C)
    where
        C: FnOnce(Scope<Row>),
    {
        let scope = self.child::<Row>();
        self.create_node(
            scope,
            content,
            move || Element::Row { key },
            |row| row,
            |node, row| *node = row,
        );
    }

    #[track_caller]
    fn label<T>(&self, text: T)
    where
        T: Into<String>,
    {
        let scope = self.child::<Label>();
        let text = text.into();
        self.create_node(
            scope,
            |_| {},
            move || Element::Label(text),
            |label| label,
            |node, label| *node = label,
        );
    }

    #[track_caller]
    fn input(&self, value: String, slot: DraftSlot) {
        let scope = self.child::<Input>();
        self.create_node(
            scope,
            |_| {},
            move || Element::Input { value, slot },
            |input| input,
            |node, input| *node = input,
        );
    }
}

fn todo_row<S>(s: Scope<S>, row: RowView, binding: DraftBinding, record_draft: String)
where
    S: 'static,
{
    let RowView {
        key,
        id_label,
        created_at_label,
        ..
    } = row;
    s.row(key, move |s| {
        let record_id = id_label.clone();
        s.label(id_label);
        match binding {
            DraftBinding::Local => {
                let draft = s.use_state(String::new);
                s.input(draft.get(), DraftSlot::Local(draft));
            }
            DraftBinding::Record => s.input(record_draft, DraftSlot::Record(record_id)),
        }
        s.label(created_at_label);
    });
}

/// The reorder demo: a `Reverse` button above a table with one row per record.
pub fn app(s: Scope<Root>, state: State<AppState>, config: AppConfig) {
    s.div(move |s| {
        s.button("Reverse", Action::Reverse);
        s.table(move |s| {
            let AppState { todos, drafts } = state.get();
            for row in render_list(&todos, config.key_policy) {
                let key = Key::from(&row.key);
                let record_draft = drafts.get(&row.id_label).to_string();
                s.key(key, move |s| todo_row(s, row, config.draft_binding, record_draft));
            }
        });
    });
}
