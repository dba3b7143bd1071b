use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use generational_box::GenerationalBox;
use tracing::{trace, warn};

use crate::{Composer, Loc, NodeKey, ScopeId};

pub struct State<T, N> {
    pub id: StateId,
    composer: GenerationalBox<Composer<N>>,
    ty: PhantomData<T>,
}

impl<T, N> State<T, N>
where
    T: 'static,
    N: Debug + 'static,
{
    #[inline(always)]
    pub(crate) fn new(id: StateId, composer: GenerationalBox<Composer<N>>) -> Self {
        Self {
            id,
            composer,
            ty: PhantomData,
        }
    }

    /// # Panics
    ///
    /// Panics if the node owning this cell has been unmounted.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    pub fn try_get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.try_with(T::clone)
    }

    /// # Panics
    ///
    /// Panics if the node owning this cell has been unmounted.
    pub fn with<F, R>(&self, func: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        match self.try_with(func) {
            Some(value) => value,
            None => panic!("{:?} read after its node was unmounted", self.id),
        }
    }

    pub fn try_with<F, R>(&self, func: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        let c = self.composer.read();
        c.states
            .get(&self.id.node_key)
            .and_then(|node_states| node_states.get(&self.id))
            .and_then(|any_state| any_state.downcast_ref::<T>())
            .map(func)
    }

    pub fn set(&self, value: T) {
        self.update(move |state| *state = value);
    }

    /// Runs `func` on the value of the cell. The composition is not borrowed while
    /// `func` runs, so it may read other cells; this cell reads as absent
    /// until `func` returns.
    pub fn update<F>(&self, func: F)
    where
        F: FnOnce(&mut T),
    {
        let taken = {
            let mut c = self.composer.write();
            c.states
                .get_mut(&self.id.node_key)
                .and_then(|node_states| node_states.remove(&self.id))
        };
        let Some(mut any_state) = taken else {
            warn!(state = ?self.id, "write to a state whose node was unmounted");
            return;
        };
        if let Some(state) = any_state.downcast_mut::<T>() {
            func(state);
        }
        let mut c = self.composer.write();
        if let Some(node_states) = c.states.get_mut(&self.id.node_key) {
            node_states.insert(self.id, any_state);
            trace!(state = ?self.id, "state written");
            c.dirty_states.insert(self.id);
        }
    }
}

impl<T, N> Debug for State<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("State").field("id", &self.id).finish()
    }
}

impl<T, N> Clone for State<T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, N> Copy for State<T, N> {}

impl<T, N> PartialEq for State<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T, N> Eq for State<T, N> {}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId {
    pub(crate) node_key: NodeKey,
    generation: u64,
    scope_id: ScopeId,
    loc: Loc,
}

impl StateId {
    #[track_caller]
    #[inline(always)]
    pub(crate) fn new(node_key: NodeKey, generation: u64, scope_id: ScopeId) -> Self {
        Self {
            node_key,
            generation,
            scope_id,
            loc: Loc::new(),
        }
    }
}

impl Debug for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StateId({}#{}, {:?}, {:?})",
            self.node_key, self.generation, self.scope_id, self.loc
        )
    }
}
