use std::any::Any;
use std::fmt::{Debug, Formatter};

use generational_box::{AnyStorage, UnsyncStorage};
use slab::Slab;
use tracing::{debug, trace, warn};

use crate::map::{HashMapExt, HashSetExt, Map, Set};
use crate::{Key, Recomposer, Root, Scope, ScopeId, State, StateId};

pub type NodeKey = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<N> {
    pub scope_id: ScopeId,
    /// Distinguishes this mount from earlier nodes stored under the same key.
    pub generation: u64,
    pub parent: Option<NodeKey>,
    pub children: Vec<NodeKey>,
    pub data: Option<N>,
}

pub struct Composer<N> {
    pub nodes: Slab<Node<N>>,
    pub(crate) root_node_key: NodeKey,
    pub(crate) scopes: Map<ScopeId, NodeKey>,
    pub(crate) states: Map<NodeKey, Map<StateId, Box<dyn Any>>>,
    pub(crate) dirty_states: Set<StateId>,
    pub(crate) key_stack: Vec<Key>,
    pub(crate) current_node_key: NodeKey,
    pub(crate) child_stack: Vec<Vec<NodeKey>>,
    pub(crate) visited: Set<NodeKey>,
    pub(crate) generation: u64,
    pub(crate) initialized: bool,
}

impl<N> Composer<N>
where
    N: Debug + 'static,
{
    pub(crate) fn with_root(root: ScopeId, capacity: usize) -> Self {
        let mut nodes = Slab::with_capacity(capacity);
        let root_node_key = nodes.insert(Node {
            scope_id: root,
            generation: 0,
            parent: None,
            children: Vec::new(),
            data: None,
        });
        let mut scopes = Map::with_capacity(capacity);
        scopes.insert(root, root_node_key);
        Self {
            nodes,
            root_node_key,
            scopes,
            states: Map::new(),
            dirty_states: Set::new(),
            key_stack: Vec::new(),
            current_node_key: root_node_key,
            child_stack: Vec::new(),
            visited: Set::with_capacity(capacity),
            generation: 0,
            initialized: false,
        }
    }

    /// Builds a composition whose root composable receives a root state cell
    /// initialized by `init`, and runs the first pass.
    #[track_caller]
    pub fn compose_with<R, S, I>(root: R, init: I) -> Recomposer<S, N>
    where
        R: Fn(Scope<Root, N>, State<S, N>) + 'static,
        S: 'static,
        I: FnOnce() -> S,
    {
        let owner = UnsyncStorage::owner();
        let id = ScopeId::new();
        let composer = owner.insert(Composer::with_root(id, 64));
        let root_scope = Scope::new(id, composer);
        let root_state = root_scope.use_state(init);
        let mut recomposer = Recomposer {
            owner,
            composer,
            root_scope,
            root_state,
            root: Box::new(root),
        };
        recomposer.recompose();
        recomposer
    }

    #[inline(always)]
    pub fn root_node_key(&self) -> NodeKey {
        self.root_node_key
    }

    /// Data of the children of `node_key`, in composition order.
    pub fn children_of(&self, node_key: NodeKey) -> impl Iterator<Item = (NodeKey, &N)> + '_ {
        self.nodes
            .get(node_key)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|child| {
                let data = self.nodes.get(*child)?.data.as_ref()?;
                Some((*child, data))
            })
    }

    /// First node below `from`, in pre-order, whose data matches `predicate`.
    pub fn find_node<P>(&self, from: NodeKey, predicate: P) -> Option<NodeKey>
    where
        P: Fn(&N) -> bool,
    {
        let mut stack = vec![from];
        while let Some(node_key) = stack.pop() {
            let Some(node) = self.nodes.get(node_key) else {
                continue;
            };
            if node_key != from && node.data.as_ref().is_some_and(&predicate) {
                return Some(node_key);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    #[inline(always)]
    pub(crate) fn generation_of(&self, node_key: NodeKey) -> u64 {
        self.nodes.get(node_key).map_or(0, |node| node.generation)
    }

    pub(crate) fn is_dirty(&self) -> bool {
        !self.initialized || !self.dirty_states.is_empty()
    }

    pub(crate) fn start_pass(&mut self) {
        self.dirty_states.clear();
        self.key_stack.clear();
        self.visited.clear();
        self.visited.insert(self.root_node_key);
        self.current_node_key = self.root_node_key;
        self.child_stack.clear();
        self.child_stack.push(Vec::new());
    }

    pub(crate) fn end_pass(&mut self) {
        let children = self.child_stack.pop().unwrap_or_default();
        self.nodes[self.root_node_key].children = children;
        let unmounted = self
            .nodes
            .iter()
            .filter(|(node_key, _)| !self.visited.contains(node_key))
            .map(|(node_key, _)| node_key)
            .collect::<Vec<_>>();
        for node_key in unmounted {
            self.unmount(node_key);
        }
        self.initialized = true;
    }

    pub(crate) fn start_node<A, F, U>(
        &mut self,
        parent: NodeKey,
        scope_id: ScopeId,
        input: A,
        factory: F,
        update: U,
    ) -> NodeKey
    where
        F: FnOnce(A) -> N,
        U: FnOnce(&mut N, A),
    {
        let claimed = self.scopes.get(&scope_id).copied();
        let reusable = claimed.filter(|node_key| {
            !self.visited.contains(node_key)
                && self
                    .nodes
                    .get(*node_key)
                    .is_some_and(|node| node.parent == Some(parent))
        });
        let node_key = match reusable {
            Some(node_key) => {
                let node = &mut self.nodes[node_key];
                match node.data.as_mut() {
                    Some(data) => update(data, input),
                    None => node.data = Some(factory(input)),
                }
                trace!(?scope_id, node_key, "reuse node");
                node_key
            }
            None => {
                self.generation += 1;
                let node_key = self.nodes.insert(Node {
                    scope_id,
                    generation: self.generation,
                    parent: Some(parent),
                    children: Vec::new(),
                    data: Some(factory(input)),
                });
                match claimed {
                    Some(other) if self.visited.contains(&other) => {
                        warn!(?scope_id, node_key, "duplicate identity in one pass");
                    }
                    _ => {
                        self.scopes.insert(scope_id, node_key);
                    }
                }
                debug!(?scope_id, node_key, generation = self.generation, "mount node");
                node_key
            }
        };
        self.visited.insert(node_key);
        if let Some(siblings) = self.child_stack.last_mut() {
            siblings.push(node_key);
        }
        self.child_stack.push(Vec::new());
        self.current_node_key = node_key;
        node_key
    }

    pub(crate) fn end_node(&mut self, parent: NodeKey, node_key: NodeKey) {
        let children = self.child_stack.pop().unwrap_or_default();
        if let Some(node) = self.nodes.get_mut(node_key) {
            node.children = children;
        }
        self.current_node_key = parent;
    }

    fn unmount(&mut self, node_key: NodeKey) {
        let node = self.nodes.remove(node_key);
        if self.scopes.get(&node.scope_id) == Some(&node_key) {
            self.scopes.remove(&node.scope_id);
        }
        if let Some(node_states) = self.states.remove(&node_key) {
            for state in node_states.keys() {
                self.dirty_states.remove(state);
            }
        }
        debug!(scope_id = ?node.scope_id, node_key, "unmount node");
    }
}

impl<N> Debug for Composer<N>
where
    N: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("nodes", &self.nodes)
            .field("states", &self.states)
            .finish()
    }
}
