use tracing::{debug, info};

use crate::todo::{AppState, ToDoList, ToDoRecord};
use crate::view::{self, Action, DraftBinding, DraftSlot, Element, IdentityKey, KeyPolicy};
use crate::{Composer, Error, NodeKey, Recomposer, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub key_policy: KeyPolicy,
    pub draft_binding: DraftBinding,
}

impl AppConfig {
    pub fn new(key_policy: KeyPolicy, draft_binding: DraftBinding) -> Self {
        Self {
            key_policy,
            draft_binding,
        }
    }

    pub fn keyed_by(key_policy: KeyPolicy) -> Self {
        Self {
            key_policy,
            ..Self::default()
        }
    }
}

/// What one rendered row shows, plus the node that renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    pub node_key: NodeKey,
    pub key: IdentityKey,
    pub id: String,
    pub draft: String,
    pub created_at: String,
}

/// Host for the reorder demo. Drives the composition the way a user would.
pub struct App {
    recomposer: Recomposer<AppState, Element>,
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self::from_list(config, ToDoList::seeded())
    }

    pub fn with_records(config: AppConfig, records: Vec<ToDoRecord>) -> Result<Self> {
        Ok(Self::from_list(config, ToDoList::new(records)?))
    }

    fn from_list(config: AppConfig, todos: ToDoList) -> Self {
        let len = todos.len();
        let recomposer = Composer::compose_with(
            move |s, state| view::app(s, state, config),
            move || AppState::new(todos),
        );
        info!(key_policy = %config.key_policy, draft_binding = %config.draft_binding, len, "app composed");
        Self { recomposer, config }
    }

    #[inline(always)]
    pub fn config(&self) -> AppConfig {
        self.config
    }

    /// The current snapshot. It stays valid and unchanged after later reverses.
    pub fn get_all(&self) -> ToDoList {
        self.recomposer.root_state().with(|state| state.todos.clone())
    }

    pub fn reverse(&mut self) {
        self.recomposer
            .update_root_state(|state| *state = state.reversed());
        self.recomposer.recompose();
        debug!("reversed");
    }

    pub fn click(&mut self, label: &str) -> Result<()> {
        let action = self
            .recomposer
            .with_composer(|c| {
                let node_key = c.find_node(c.root_node_key(), |element| {
                    matches!(element, Element::Button { label: l, .. } if l == label)
                })?;
                match c.nodes[node_key].data.as_ref() {
                    Some(Element::Button { action, .. }) => Some(*action),
                    _ => None,
                }
            })
            .ok_or_else(|| Error::NoSuchButton(label.to_string()))?;
        match action {
            Action::Reverse => self.reverse(),
        }
        Ok(())
    }

    /// Types `text` into the input of the row rendered at `position`,
    /// replacing its content.
    pub fn type_into(&mut self, position: usize, text: &str) -> Result<()> {
        let slot = self
            .recomposer
            .with_composer(|c| {
                let (row, _) = table_rows(c).nth(position)?;
                c.children_of(row).find_map(|(_, cell)| match cell {
                    Element::Input { slot, .. } => Some(slot.clone()),
                    _ => None,
                })
            })
            .ok_or(Error::NoSuchRow(position))?;
        match slot {
            DraftSlot::Local(draft) => draft.set(text.to_string()),
            DraftSlot::Record(id) => self
                .recomposer
                .update_root_state(|state| *state = state.with_draft(id, text)),
        }
        self.recomposer.recompose();
        Ok(())
    }

    pub fn rows(&self) -> Vec<RowSnapshot> {
        self.recomposer.with_composer(|c| {
            table_rows(c)
                .filter_map(|(node_key, element)| {
                    let Element::Row { key } = element else {
                        return None;
                    };
                    let mut labels = Vec::with_capacity(2);
                    let mut draft = String::new();
                    for (_, cell) in c.children_of(node_key) {
                        match cell {
                            Element::Label(text) => labels.push(text.clone()),
                            Element::Input { value, .. } => draft = value.clone(),
                            _ => {}
                        }
                    }
                    let mut labels = labels.into_iter();
                    Some(RowSnapshot {
                        node_key,
                        key: key.clone(),
                        id: labels.next().unwrap_or_default(),
                        draft,
                        created_at: labels.next().unwrap_or_default(),
                    })
                })
                .collect()
        })
    }

    pub fn render_tree(&self) -> String {
        self.recomposer.render_tree_with(display_element)
    }

    pub fn print_tree(&self) {
        self.recomposer.print_tree_with(display_element);
    }
}

fn display_element(element: Option<&Element>) -> String {
    match element {
        Some(element) => element.to_string(),
        None => String::from("root"),
    }
}

fn table_rows(c: &Composer<Element>) -> impl Iterator<Item = (NodeKey, &Element)> + '_ {
    let table = c.find_node(c.root_node_key(), |element| matches!(element, Element::Table));
    table
        .into_iter()
        .flat_map(move |table| c.children_of(table))
}
