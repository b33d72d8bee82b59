use keeper_core::{
    load_address_book, load_notebook, save_address_book, save_notebook, AddressBook, Notebook,
    StoreError,
};
use std::fs;

fn populated_book() -> AddressBook {
    let mut book = AddressBook::new();
    let bob = book.add_record("Bob").unwrap();
    bob.add_phone("0671234567").unwrap();
    bob.add_phone("0979876543").unwrap();
    bob.set_birthday("24.08.1991").unwrap();
    bob.set_address("5 Main St").unwrap();
    bob.set_email("bob@example.com").unwrap();
    book.add_record("Ann Lee").unwrap().add_phone("0501112233").unwrap();
    book.add_record("Empty").unwrap();
    book
}

#[test]
fn address_book_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    let book = populated_book();
    save_address_book(&path, &book).unwrap();
    let reloaded = load_address_book(&path).unwrap();
    assert_eq!(reloaded, book);
}

#[test]
fn notebook_round_trips_including_the_id_counter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");

    let mut notebook = Notebook::new();
    notebook.add_note("Call Bob", &["work".to_string()]).unwrap();
    notebook.add_note("Buy milk", &[]).unwrap();
    notebook.add_note("Ship release", &["work".to_string(), "urgent".to_string()]).unwrap();
    notebook.delete(2).unwrap();

    save_notebook(&path, &notebook).unwrap();
    let mut reloaded = load_notebook(&path).unwrap();
    assert_eq!(reloaded, notebook);

    // Ids issued after a reload never collide with deleted or surviving ones.
    assert_eq!(reloaded.add_note("after reload", &[]).unwrap().id(), 4);
}

#[test]
fn save_replaces_an_existing_snapshot_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    save_address_book(&path, &populated_book()).unwrap();
    let mut smaller = AddressBook::new();
    smaller.add_record("Solo").unwrap();
    save_address_book(&path, &smaller).unwrap();

    assert_eq!(load_address_book(&path).unwrap(), smaller);
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec!["contacts.json"]);
}

#[test]
fn missing_snapshots_are_reported_distinctly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    assert!(matches!(load_address_book(&path), Err(StoreError::Missing(_))));
    assert!(matches!(load_notebook(&path), Err(StoreError::Missing(_))));
}

#[test]
fn unparseable_documents_are_corrupt_not_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, b"{ not json").unwrap();
    assert!(matches!(load_address_book(&path), Err(StoreError::Corrupt(_))));
}

#[test]
fn load_rejects_values_the_mutation_api_would_reject() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    let nine_digit_phone = r#"[{"name":"Bob","phones":["067123456"]}]"#;
    fs::write(&path, nine_digit_phone).unwrap();
    assert!(matches!(load_address_book(&path), Err(StoreError::Corrupt(_))));

    let bad_birthday = r#"[{"name":"Bob","phones":[],"birthday":"1991-08-24"}]"#;
    fs::write(&path, bad_birthday).unwrap();
    assert!(matches!(load_address_book(&path), Err(StoreError::Corrupt(_))));

    let duplicate_names = r#"[{"name":"Bob","phones":[]},{"name":"Bob","phones":[]}]"#;
    fs::write(&path, duplicate_names).unwrap();
    assert!(matches!(load_address_book(&path), Err(StoreError::Corrupt(_))));
}

#[test]
fn notebook_load_enforces_the_id_invariants() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");

    let counter_behind = r#"{"next_id":2,"notes":[{"id":2,"text":"x","tags":[]}]}"#;
    fs::write(&path, counter_behind).unwrap();
    assert!(matches!(load_notebook(&path), Err(StoreError::Corrupt(_))));

    let duplicate_ids =
        r#"{"next_id":5,"notes":[{"id":1,"text":"x","tags":[]},{"id":1,"text":"y","tags":[]}]}"#;
    fs::write(&path, duplicate_ids).unwrap();
    assert!(matches!(load_notebook(&path), Err(StoreError::Corrupt(_))));

    let empty_text = r#"{"next_id":2,"notes":[{"id":1,"text":"   ","tags":[]}]}"#;
    fs::write(&path, empty_text).unwrap();
    assert!(matches!(load_notebook(&path), Err(StoreError::Corrupt(_))));
}

#[test]
fn optional_fields_absent_on_disk_stay_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, r#"[{"name":"Bob","phones":["0671234567"]}]"#).unwrap();

    let book = load_address_book(&path).unwrap();
    let bob = book.find("Bob").unwrap();
    assert!(bob.birthday().is_none());
    assert!(bob.address().is_none());
    assert!(bob.email().is_none());
}
