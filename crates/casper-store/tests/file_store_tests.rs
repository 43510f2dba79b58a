use assert_fs::prelude::*;
use casper_core::{Format, Reconciler, Store, flatten};
use casper_store::FileStore;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

fn yaml(s: &str) -> serde_yaml::Value {
    serde_yaml::from_str(s).unwrap()
}

#[test]
fn push_converges_file_to_desired_document() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("store.yaml");
    file.write_str("app:\n  name: old\n  stale: x\n").unwrap();

    let mut store = FileStore::new(file.path());
    let desired = yaml("app:\n  name: new\n  hosts: [a, b]\n");
    let reconciler = Reconciler::default();

    let changes = reconciler.changes(&store, &desired, None).unwrap();
    assert_eq!(changes.len(), 4);
    reconciler.push(&changes, &mut store).unwrap();

    assert_eq!(store.load().unwrap(), flatten(&desired).unwrap());
    assert!(reconciler.changes(&store, &desired, None).unwrap().is_empty());
    file.assert(predicate::str::contains("stale").not());
}

#[test]
fn ignored_subtree_survives_push() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("store.yaml");
    file.write_str("db:\n  password: secret\napp: old\n").unwrap();

    let mut store = FileStore::new(file.path());
    let desired = yaml("db: _ignore\napp: new\n");
    let reconciler = Reconciler::default();

    let changes = reconciler.changes(&store, &desired, None).unwrap();
    reconciler.push(&changes, &mut store).unwrap();

    let pairs = store.load().unwrap();
    assert_eq!(pairs.get("db/password"), Some("secret"));
    assert_eq!(pairs.get("app"), Some("new"));
}

#[test]
fn json_store_is_written_as_json() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("store.json");
    file.write_str("{}").unwrap();

    let mut store = FileStore::new(file.path());
    store.put("service/port", "8080").unwrap();

    file.assert(predicate::str::starts_with("{"));
    file.assert(predicate::str::contains("\"port\": \"8080\""));
    assert_eq!(store.list("service").unwrap().get("service/port"), Some("8080"));
}

#[test]
fn null_value_is_kept_distinct_from_empty_string() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("store.yaml");
    file.write_str("unset: null\nblank: ''\n").unwrap();

    let store = FileStore::new(file.path());
    let pairs = store.list("").unwrap();

    assert_eq!(pairs.get("unset/"), Some(""));
    assert_eq!(pairs.get("blank"), Some(""));
    assert!(!pairs.contains_key("unset"));
}

#[test]
fn fetch_renders_the_file_back() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("store.yaml");
    file.write_str("b: 2\na:\n  c: x\n").unwrap();

    let store = FileStore::new(file.path());
    let out = Reconciler::default().fetch(&store, Format::Yaml).unwrap();

    assert_eq!(yaml(&out), yaml("a:\n  c: x\nb: '2'\n"));
}

#[test]
fn unreadable_document_reports_parse_failure() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("store.yaml");
    file.write_str("a: [unclosed\n").unwrap();

    let store = FileStore::new(file.path());
    let err = Reconciler::default()
        .changes(&store, &yaml("a: 1"), None)
        .unwrap_err();

    assert!(err.to_string().starts_with("Store list failed"));
}

#[test]
fn delete_removes_only_the_named_leaf() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("store.yaml");
    file.write_str("a:\n  x: '1'\n  y: '2'\n").unwrap();

    let mut store = FileStore::new(file.path());
    store.delete("a/x").unwrap();

    let pairs = store.load().unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs.get("a/y"), Some("2"));
}

#[test]
fn subtree_replaced_by_leaf_is_pushed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("store.yaml");
    file.write_str("a:\n  b: x\n").unwrap();

    let mut store = FileStore::new(file.path());
    let desired = yaml("a: y\n");
    let reconciler = Reconciler::default();

    let changes = reconciler.changes(&store, &desired, None).unwrap();
    assert_eq!(changes.len(), 2);
    reconciler.push(&changes, &mut store).unwrap();

    assert_eq!(store.load().unwrap(), flatten(&desired).unwrap());
    file.assert("a: y\n");
}

#[test]
fn leaf_replaced_by_subtree_is_pushed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("store.yaml");
    file.write_str("a: y\n").unwrap();

    let mut store = FileStore::new(file.path());
    let desired = yaml("a:\n  b: x\n");
    let reconciler = Reconciler::default();

    let changes = reconciler.changes(&store, &desired, None).unwrap();
    reconciler.push(&changes, &mut store).unwrap();

    assert_eq!(store.load().unwrap(), flatten(&desired).unwrap());
}
