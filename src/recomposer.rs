use std::fmt::{Debug, Formatter};
use std::ops::Deref;

use generational_box::{GenerationalBox, Owner};

use crate::{utils, Composer, NodeKey, Root, Scope, State};

pub struct Recomposer<S, N> {
    #[allow(dead_code)]
    pub(crate) owner: Owner,
    pub(crate) composer: GenerationalBox<Composer<N>>,
    pub(crate) root_scope: Scope<Root, N>,
    pub(crate) root_state: State<S, N>,
    #[allow(clippy::type_complexity)]
    pub(crate) root: Box<dyn Fn(Scope<Root, N>, State<S, N>)>,
}

impl<S, N> Recomposer<S, N>
where
    S: 'static,
    N: Debug + 'static,
{
    /// Re-runs the root composable if any state cell was written since the
    /// last pass. Nodes the pass does not visit are unmounted with their state.
    pub fn recompose(&mut self) {
        if !self.composer.read().is_dirty() {
            return;
        }
        self.composer.write().start_pass();
        (self.root)(self.root_scope, self.root_state);
        self.composer.write().end_pass();
    }

    #[inline(always)]
    pub fn recompose_with(&mut self, new_state: S) {
        self.root_state.set(new_state);
        self.recompose();
    }

    #[inline(always)]
    pub fn root_node_key(&self) -> NodeKey {
        self.composer.read().root_node_key
    }

    #[inline(always)]
    pub fn root_state(&self) -> State<S, N> {
        self.root_state
    }

    #[inline(always)]
    pub fn get_root_state(&self) -> S
    where
        S: Clone,
    {
        self.root_state.get()
    }

    #[inline(always)]
    pub fn update_root_state<F>(&mut self, func: F)
    where
        F: FnOnce(&mut S),
    {
        self.root_state.update(func);
    }

    #[inline(always)]
    pub fn with_composer<F, T>(&self, func: F) -> T
    where
        F: FnOnce(&Composer<N>) -> T,
    {
        let c = self.composer.read();
        func(c.deref())
    }

    pub fn render_tree_with<D>(&self, display_fn: D) -> String
    where
        D: Fn(Option<&N>) -> String,
    {
        let c = self.composer.read();
        utils::render_tree(c.deref(), c.root_node_key, display_fn)
    }

    #[inline(always)]
    pub fn print_tree_with<D>(&self, display_fn: D)
    where
        D: Fn(Option<&N>) -> String,
    {
        print!("{}", self.render_tree_with(display_fn));
    }
}

impl<S, N> Debug for Recomposer<S, N>
where
    N: Debug + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let c = self.composer.read();
        f.debug_struct("Recomposer")
            .field("nodes", &c.nodes)
            .field("states", &c.states)
            .field("dirty_states", &c.dirty_states)
            .finish()
    }
}
