use std::collections::BTreeSet;

use keyed_compose::{
    render_list, render_row, seed_records, AppState, DraftBinding, Error, IdentityKey, KeyPolicy,
    ToDoList, ToDoRecord,
};

fn list_of(len: usize) -> ToDoList {
    let records = (0..len)
        .map(|i| ToDoRecord::new(format!("todo{}", i + 1), format!("{:02}:00", i % 24)))
        .collect();
    ToDoList::new(records).unwrap()
}

fn records(list: &ToDoList) -> Vec<ToDoRecord> {
    list.iter().cloned().collect()
}

#[test]
fn double_reverse_is_identity() {
    for len in 0..8 {
        let list = list_of(len);
        assert_eq!(list.reversed().reversed(), list);
    }
}

#[test]
fn reverse_keeps_length_and_ids() {
    for len in 0..8 {
        let list = list_of(len);
        let reversed = list.reversed();
        assert_eq!(reversed.len(), list.len());
        assert_eq!(
            reversed.ids().collect::<BTreeSet<_>>(),
            list.ids().collect::<BTreeSet<_>>()
        );
    }
}

#[test]
fn reverse_inverts_positions() {
    for len in 1..8 {
        let list = list_of(len);
        let reversed = list.reversed();
        for i in 0..len {
            assert_eq!(reversed.get(i), list.get(len - 1 - i));
        }
    }
}

#[test]
fn reverse_leaves_the_previous_snapshot_alone() {
    let list = ToDoList::seeded();
    let held = list.clone();
    let reversed = list.reversed();

    assert!(held.shares_records_with(&list));
    assert!(!reversed.shares_records_with(&list));
    assert_eq!(records(&held), seed_records());
    assert_eq!(reversed.get(0).map(|r| r.id.as_str()), Some("todo2"));
}

#[test]
fn empty_list_reverses_to_empty() {
    let list = ToDoList::default();
    assert!(list.reversed().is_empty());
    assert!(render_list(&list.reversed(), KeyPolicy::Id).is_empty());
}

#[test]
fn seed_is_todo1_then_todo2() {
    let list = ToDoList::seeded();
    assert_eq!(
        records(&list),
        vec![
            ToDoRecord::new("todo1", "18:00"),
            ToDoRecord::new("todo2", "20:30"),
        ]
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = ToDoList::new(vec![
        ToDoRecord::new("todo1", "18:00"),
        ToDoRecord::new("todo1", "20:30"),
    ])
    .unwrap_err();
    assert_eq!(err, Error::DuplicateId("todo1".into()));
}

#[test]
fn render_row_copies_labels_and_leaves_the_draft_empty() {
    let record = ToDoRecord::new("todo1", "18:00");
    let row = render_row(&record, IdentityKey::Index(3));
    assert_eq!(row.key, IdentityKey::Index(3));
    assert_eq!(row.id_label, "todo1");
    assert_eq!(row.created_at_label, "18:00");
    assert!(row.draft.is_empty());
}

#[test]
fn render_list_assigns_keys_by_policy() {
    let reversed = ToDoList::seeded().reversed();

    let by_index = render_list(&reversed, KeyPolicy::Index);
    assert_eq!(by_index[0].key, IdentityKey::Index(0));
    assert_eq!(by_index[0].id_label, "todo2");

    let by_id = render_list(&reversed, KeyPolicy::Id);
    assert_eq!(by_id[0].key, IdentityKey::Id("todo2".into()));
    assert_eq!(by_id[1].key, IdentityKey::Id("todo1".into()));
}

#[test]
fn app_state_updates_are_pure() {
    let state = AppState::new(ToDoList::seeded());
    let drafted = state.with_draft("todo1", "hello");
    assert!(state.drafts.is_empty());
    assert_eq!(drafted.drafts.len(), 1);
    assert_eq!(drafted.drafts.get("todo1"), "hello");
    assert_eq!(drafted.drafts.get("todo2"), "");

    let reversed = drafted.reversed();
    assert_eq!(reversed.drafts, drafted.drafts);
    assert_eq!(drafted.todos, ToDoList::seeded());
}

#[test]
fn policies_parse_from_flags() {
    assert_eq!("index".parse::<KeyPolicy>(), Ok(KeyPolicy::Index));
    assert_eq!("ID".parse::<KeyPolicy>(), Ok(KeyPolicy::Id));
    assert_eq!(
        "row".parse::<KeyPolicy>(),
        Err(Error::UnknownKeyPolicy("row".into()))
    );
    assert_eq!("record".parse::<DraftBinding>(), Ok(DraftBinding::Record));
    assert_eq!(KeyPolicy::Id.to_string(), "id");
}
