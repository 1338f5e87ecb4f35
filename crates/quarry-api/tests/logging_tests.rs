use quarry::logging::{LogConfig, LogFormat};
use quarry::{Context, Criteria, Database, Document, Error};
use std::fs;
use tempfile::tempdir;

fn read_logs(dir: &std::path::Path) -> String {
    let mut contents = String::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_file() {
            contents.push_str(&fs::read_to_string(path).unwrap());
        }
    }
    contents
}

// One global subscriber per process, so everything lives in one test
#[test]
fn test_file_logging() {
    // The configured level must apply, not an inherited one
    std::env::remove_var("RUST_LOG");

    let dir = tempdir().unwrap();
    let guard = LogConfig::debug()
        .with_file(dir.path().join("quarry.log"))
        .with_format(LogFormat::Compact)
        .with_query_tracing(true)
        .init()
        .unwrap();
    assert!(guard.is_some());

    let db = Database::in_memory();
    db.insert("Order", Document::new().with("id", 1).with("status", "open"))
        .unwrap();
    db.insert_many("Customer", vec![Document::new().with("id", 10)])
        .unwrap();
    let open = Criteria::new("Order").where_eq("status", "open");
    let none = Criteria::new("Order").none();
    assert_eq!(db.query(&open).count().unwrap(), 1);
    assert_eq!(db.query(&none).count().unwrap(), 0);

    let second = LogConfig::info().init();
    assert!(matches!(second, Err(Error::InvalidConfig(_))));

    drop(guard);
    let logs = read_logs(dir.path());
    assert!(logs.contains("criteria resolved to active context"));
    assert!(logs.contains("criteria resolved to null context"));
    assert!(logs.contains("executed criteria"));
    assert!(logs.contains("inserted one document"));
    assert!(logs.contains("inserted documents"));
}
