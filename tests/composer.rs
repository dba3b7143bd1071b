use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use keyed_compose::{Composer, Key, NodeKey, Recomposer, Root, Scope, State};

#[derive(Debug, Clone, PartialEq, Eq)]
struct TestNode(String);

type TestScope<S> = Scope<S, TestNode>;
type Handles = Rc<RefCell<HashMap<&'static str, State<usize, TestNode>>>>;

struct Item;
struct Leaf;

fn item<S>(scope: TestScope<S>, name: &'static str, handles: Handles)
where
    S: 'static,
{
    scope.create_node(
        scope.child::<Item>(),
        move |scope| {
            let count = scope.use_state(|| 0usize);
            handles.borrow_mut().insert(name, count);
            let label = format!("{}={}", name, count.get());
            scope.create_node(
                scope.child::<Leaf>(),
                |_| {},
                move || TestNode(label),
                |node| node,
                |node, label| *node = label,
            );
        },
        move || TestNode(name.to_string()),
        |node| node,
        |node, name| *node = name,
    );
}

fn keyed_by_name(names: Vec<&'static str>, handles: Handles) -> Recomposer<Vec<&'static str>, TestNode> {
    Composer::compose_with(
        move |scope: TestScope<Root>, names: State<Vec<&'static str>, TestNode>| {
            for name in names.get() {
                let handles = handles.clone();
                scope.key(name, move |scope| item(scope, name, handles));
            }
        },
        move || names,
    )
}

fn keyed_by_index(names: Vec<&'static str>, handles: Handles) -> Recomposer<Vec<&'static str>, TestNode> {
    Composer::compose_with(
        move |scope: TestScope<Root>, names: State<Vec<&'static str>, TestNode>| {
            for (index, name) in names.get().into_iter().enumerate() {
                let handles = handles.clone();
                scope.key(index, move |scope| item(scope, name, handles));
            }
        },
        move || names,
    )
}

fn children<S>(recomposer: &Recomposer<S, TestNode>) -> Vec<(NodeKey, String)>
where
    S: 'static,
{
    recomposer.with_composer(|c| {
        c.children_of(c.root_node_key())
            .map(|(node_key, node)| (node_key, node.0.clone()))
            .collect()
    })
}

fn leaves<S>(recomposer: &Recomposer<S, TestNode>) -> Vec<String>
where
    S: 'static,
{
    recomposer.with_composer(|c| {
        c.children_of(c.root_node_key())
            .flat_map(|(node_key, _)| c.children_of(node_key))
            .map(|(_, leaf)| leaf.0.clone())
            .collect()
    })
}

#[test]
fn keyed_children_follow_their_key_when_reordered() {
    let handles = Handles::default();
    let mut recomposer = keyed_by_name(vec!["a", "b", "c"], handles);
    let before = children(&recomposer);
    assert_eq!(
        before.iter().map(|(_, name)| name.as_str()).collect::<Vec<_>>(),
        vec!["a", "b", "c"]
    );

    recomposer.recompose_with(vec!["c", "a", "b"]);
    let after = children(&recomposer);
    assert_eq!(after[0], before[2]);
    assert_eq!(after[1], before[0]);
    assert_eq!(after[2], before[1]);
}

#[test]
fn positional_children_are_relabelled_in_place() {
    let handles = Handles::default();
    let mut recomposer = keyed_by_index(vec!["a", "b"], handles);
    let before = children(&recomposer);

    recomposer.recompose_with(vec!["b", "a"]);
    let after = children(&recomposer);
    assert_eq!(after[0].0, before[0].0);
    assert_eq!(after[1].0, before[1].0);
    assert_eq!(after[0].1, "b");
    assert_eq!(after[1].1, "a");
}

#[test]
fn state_survives_while_its_node_is_reused() {
    let handles = Handles::default();
    let mut recomposer = keyed_by_name(vec!["a", "b"], handles.clone());
    let b = handles.borrow()["b"];
    b.set(5);
    recomposer.recompose();
    assert_eq!(leaves(&recomposer), vec!["a=0", "b=5"]);

    recomposer.recompose_with(vec!["b", "a"]);
    assert_eq!(leaves(&recomposer), vec!["b=5", "a=0"]);
    assert_eq!(b.get(), 5);
}

#[test]
fn positional_state_stays_with_the_position() {
    let handles = Handles::default();
    let mut recomposer = keyed_by_index(vec!["a", "b"], handles.clone());
    handles.borrow()["a"].set(7);
    recomposer.recompose();
    assert_eq!(leaves(&recomposer), vec!["a=7", "b=0"]);

    recomposer.recompose_with(vec!["b", "a"]);
    assert_eq!(leaves(&recomposer), vec!["b=7", "a=0"]);
}

#[test]
fn unmounted_nodes_drop_their_state() {
    let handles = Handles::default();
    let mut recomposer = keyed_by_name(vec!["a", "b"], handles.clone());
    let b = handles.borrow()["b"];
    b.set(3);
    recomposer.recompose();

    recomposer.recompose_with(vec!["a"]);
    assert_eq!(children(&recomposer).len(), 1);
    assert_eq!(b.try_get(), None);

    recomposer.recompose_with(vec!["a", "b"]);
    assert_eq!(leaves(&recomposer), vec!["a=0", "b=0"]);
}

#[test]
fn duplicate_keys_never_share_a_node() {
    let handles = Handles::default();
    let mut recomposer = keyed_by_name(vec!["a", "a"], handles);
    let before = children(&recomposer);
    assert_eq!(before.len(), 2);
    assert_ne!(before[0].0, before[1].0);

    recomposer.recompose_with(vec!["a", "a"]);
    let after = children(&recomposer);
    assert_eq!(after.len(), 2);
    assert_eq!(after[0].0, before[0].0);
    assert_ne!(after[1].0, before[1].0);
}

#[test]
fn recompose_skips_when_nothing_is_dirty() {
    let passes = Rc::new(Cell::new(0));
    let counter = passes.clone();
    let mut recomposer = Composer::compose_with(
        move |_scope: TestScope<Root>, count: State<usize, TestNode>| {
            counter.set(counter.get() + 1);
            let _ = count.get();
        },
        || 0usize,
    );
    assert_eq!(passes.get(), 1);

    recomposer.recompose();
    assert_eq!(passes.get(), 1);

    recomposer.recompose_with(1);
    assert_eq!(passes.get(), 2);
    assert_eq!(recomposer.get_root_state(), 1);
}

#[test]
fn index_and_text_keys_do_not_collide() {
    assert_ne!(Key::from(0usize), Key::from("0"));
    assert_eq!(Key::from("todo1"), Key::from(String::from("todo1")));
}

fn flat_cells(names: Vec<&'static str>, handles: Handles) -> Recomposer<Vec<&'static str>, TestNode> {
    Composer::compose_with(
        move |scope: TestScope<Root>, names: State<Vec<&'static str>, TestNode>| {
            for name in names.get() {
                let handles = handles.clone();
                scope.key(name, move |scope| {
                    scope.create_node(
                        scope.child::<Item>(),
                        move |scope| {
                            let count = scope.use_state(|| 0usize);
                            handles.borrow_mut().insert(name, count);
                        },
                        move || TestNode(name.to_string()),
                        |node| node,
                        |node, name| *node = name,
                    );
                });
            }
        },
        move || names,
    )
}

#[test]
fn stale_handles_do_not_reach_a_remounted_node() {
    let handles = Handles::default();
    let mut recomposer = flat_cells(vec!["a", "b"], handles.clone());
    let old = handles.borrow()["b"];
    old.set(3);
    recomposer.recompose();

    recomposer.recompose_with(vec!["a"]);
    recomposer.recompose_with(vec!["a", "b"]);
    let fresh = handles.borrow()["b"];
    assert_ne!(old, fresh);
    assert_eq!(old.try_get(), None);
    assert_eq!(fresh.try_get(), Some(0));

    old.set(42);
    assert_eq!(old.try_get(), None);
    assert_eq!(fresh.try_get(), Some(0));
}

#[test]
fn cells_can_read_other_cells_while_initializing_or_updating() {
    let other: Rc<Cell<Option<State<usize, TestNode>>>> = Rc::default();
    let derived: Rc<Cell<Option<State<usize, TestNode>>>> = Rc::default();
    let (other_slot, derived_slot) = (other.clone(), derived.clone());
    let mut recomposer = Composer::compose_with(
        move |scope: TestScope<Root>, _total: State<usize, TestNode>| {
            let base = scope.use_state(|| 10usize);
            let plus_one = scope.use_state(|| base.get() + 1);
            other_slot.set(Some(base));
            derived_slot.set(Some(plus_one));
        },
        || 0usize,
    );
    let base = other.get().unwrap();
    assert_eq!(derived.get().unwrap().get(), 11);

    recomposer.update_root_state(|total| *total = base.get() * 2);
    recomposer.recompose();
    assert_eq!(recomposer.get_root_state(), 20);
}
