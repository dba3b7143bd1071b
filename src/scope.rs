use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use generational_box::GenerationalBox;

use crate::{Composer, Key, Loc, State, StateId};

pub struct Scope<S, N> {
    pub id: ScopeId,
    pub(crate) composer: GenerationalBox<Composer<N>>,
    ty: PhantomData<S>,
}

impl<S, N> Clone for Scope<S, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, N> Copy for Scope<S, N> {}

impl<S, N> Scope<S, N>
where
    S: 'static,
    N: Debug + 'static,
{
    #[inline(always)]
    pub(crate) fn new(id: ScopeId, composer: GenerationalBox<Composer<N>>) -> Self {
        Self {
            id,
            composer,
            ty: PhantomData,
        }
    }

    #[track_caller]
    #[inline(always)]
    pub fn child<C>(&self) -> Scope<C, N>
    where
        C: 'static,
    {
        Scope::new(ScopeId::new(), self.composer)
    }

    /// Returns the state cell declared at the caller's location, owned by the
    /// node currently being composed. `init` only runs when the node has no such
    /// cell yet, and may read other cells.
    #[track_caller]
    pub fn use_state<F, T>(&self, init: F) -> State<T, N>
    where
        T: 'static,
        F: FnOnce() -> T,
    {
        let (id, exists) = {
            let c = self.composer.read();
            let node_key = c.current_node_key;
            let id = StateId::new(node_key, c.generation_of(node_key), self.id);
            let exists = c
                .states
                .get(&node_key)
                .is_some_and(|node_states| node_states.contains_key(&id));
            (id, exists)
        };
        if !exists {
            let value = Box::new(init()) as Box<dyn Any>;
            let mut c = self.composer.write();
            c.states.entry(id.node_key).or_default().insert(id, value);
        }
        State::new(id, self.composer)
    }

    /// Composes `content` with `key` as the identity of every scope created
    /// inside it.
    #[inline(always)]
    pub fn key<K, C>(&self, key: K, content: C)
    where
        K: Into<Key>,
        C: FnOnce(Self),
    {
        self.composer.write().key_stack.push(key.into());
        content(*self);
        self.composer.write().key_stack.pop();
    }

    pub fn create_node<C, T, I, A, F, U>(
        &self,
        scope: Scope<T, N>,
        content: C,
        input: I,
        factory: F,
        update: U,
    ) where
        T: 'static,
        C: FnOnce(Scope<T, N>),
        I: FnOnce() -> A,
        F: FnOnce(A) -> N,
        U: FnOnce(&mut N, A),
    {
        let mut scope = scope;
        let input = input();
        let (parent_node_key, node_key) = {
            let mut c = self.composer.write();
            if let Some(key) = c.key_stack.last().copied() {
                scope.id.set_key(key);
            }
            let parent_node_key = c.current_node_key;
            let node_key = c.start_node(parent_node_key, scope.id, input, factory, update);
            (parent_node_key, node_key)
        };
        content(scope);
        self.composer.write().end_node(parent_node_key, node_key);
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId {
    loc: Loc,
    key: Option<Key>,
}

impl ScopeId {
    #[track_caller]
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            loc: Loc::new(),
            key: None,
        }
    }

    #[inline(always)]
    pub fn key(&self) -> Option<Key> {
        self.key
    }

    #[inline(always)]
    pub fn set_key(&mut self, key: Key) {
        self.key = Some(key);
    }
}

impl Debug for ScopeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.key {
            Some(key) => write!(f, "ScopeId({:?}, {:?})", self.loc, key),
            None => write!(f, "ScopeId({:?})", self.loc),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Root;
