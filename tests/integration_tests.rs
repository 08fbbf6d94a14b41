//! End-to-end ingestion tests
//!
//! Drive the full pipeline against an in-memory object store and a
//! temporary DuckDB database file.

use archive_ingest::gateway::{DatabaseGateway, DryRunGateway, InsertGateway, Table};
use archive_ingest::source::SourceBucket;
use archive_ingest::{Error, IngestEngine, IngestStats, ParseErrorPolicy};
use bytes::Bytes;
use duckdb::Connection;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

const SCENARIO: &str = r#"{
  "content": {
    "results": [
      {
        "id": "2021667000",
        "title": "United States Reports, Volume 1",
        "item": {"call_number": ["KF1"]},
        "resources": [{"image": "a.jpg"}],
        "subject": ["Law", "History"]
      }
    ]
  }
}"#;

// ============================================================================
// Helpers
// ============================================================================

struct Fixture {
    _dir: TempDir,
    db_path: PathBuf,
    store: Arc<InMemory>,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("archive.duckdb");

        let gateway = DatabaseGateway::open_duckdb(&db_path.to_string_lossy()).unwrap();
        gateway.create_tables().unwrap();
        gateway.close().unwrap();

        Self {
            _dir: dir,
            db_path,
            store: Arc::new(InMemory::new()),
        }
    }

    async fn put(&self, key: &str, body: impl Into<String>) {
        let body: String = body.into();
        self.store
            .put(&ObjectPath::from(key), PutPayload::from(Bytes::from(body)))
            .await
            .unwrap();
    }

    fn source(&self) -> SourceBucket {
        SourceBucket::with_store(self.store.clone(), "processed_results", "")
    }

    fn engine(&self) -> IngestEngine<DatabaseGateway> {
        let gateway = DatabaseGateway::open_duckdb(&self.db_path.to_string_lossy()).unwrap();
        IngestEngine::new(self.source(), gateway)
    }

    async fn ingest(&self) -> IngestStats {
        self.engine().run().await.unwrap()
    }

    fn query(&self, sql: &str) -> Vec<Vec<Option<String>>> {
        query_rows(&self.db_path, sql)
    }

    fn count(&self, table: Table) -> i64 {
        let conn = Connection::open(&self.db_path).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table.name()), [], |row| {
            row.get(0)
        })
        .unwrap()
    }
}

/// Run a `SELECT a, b, ... FROM` query, every column read as nullable text
fn query_rows(db_path: &Path, sql: &str) -> Vec<Vec<Option<String>>> {
    let select_list = sql
        .trim_start_matches("SELECT ")
        .split(" FROM ")
        .next()
        .unwrap_or_default();
    let width = select_list.split(',').count();

    let conn = Connection::open(db_path).unwrap();
    let mut stmt = conn.prepare(sql).unwrap();
    let mut rows = stmt.query([]).unwrap();

    let mut out = Vec::new();
    while let Some(row) = rows.next().unwrap() {
        let values = (0..width)
            .map(|i| row.get::<_, Option<String>>(i).unwrap())
            .collect();
        out.push(values);
    }
    out
}

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn record(id: &str, extra: &str) -> String {
    format!(
        r#"{{"id": "{id}", "title": "Title {id}", "item": {{"call_number": ["KF-{id}"]}}{extra}}}"#
    )
}

fn document(records: &[String]) -> String {
    format!(r#"{{"content": {{"results": [{}]}}}}"#, records.join(","))
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[tokio::test]
async fn test_end_to_end_scenario() {
    let fixture = Fixture::new();
    fixture.put("batch-001.json", SCENARIO).await;

    let stats = fixture.ingest().await;
    assert_eq!(stats.objects_processed, 1);
    assert_eq!(stats.records_processed, 1);

    assert_eq!(
        fixture.query("SELECT external_id, call_number FROM CallNumbers"),
        vec![vec![s("2021667000"), s("KF1")]]
    );
    assert_eq!(fixture.count(Table::Contributors), 0);
    assert_eq!(
        fixture.query(
            "SELECT call_number, created_published, date, notes, source_collection, title, external_id FROM Items"
        ),
        vec![vec![
            s("KF1"),
            None,
            None,
            None,
            None,
            s("United States Reports, Volume 1"),
            s("2021667000"),
        ]]
    );
    assert_eq!(
        fixture.query("SELECT external_id, image, pdf FROM Resources"),
        vec![vec![s("2021667000"), s("a.jpg"), None]]
    );
    assert_eq!(
        fixture.query("SELECT external_id, subject FROM Subjects ORDER BY subject"),
        vec![
            vec![s("2021667000"), s("History")],
            vec![s("2021667000"), s("Law")],
        ]
    );
}

#[tokio::test]
async fn test_reingest_singleton_tables_idempotent() {
    let fixture = Fixture::new();
    let rec = record("2021667001", r#", "contributor": ["Dallas, Alexander James"]"#);
    fixture.put("batch-001.json", document(&[rec])).await;

    let first = fixture.ingest().await;
    let second = fixture.ingest().await;

    for table in [Table::CallNumbers, Table::Contributors, Table::Items] {
        assert_eq!(first.table(table).inserted, 1, "{table} first run");
        assert_eq!(second.table(table).inserted, 0, "{table} second run");
        assert_eq!(second.table(table).duplicates, 1, "{table} second run");
        assert_eq!(fixture.count(table), 1, "{table} row count");
    }
    assert_eq!(second.total_failed(), 0);
    assert_eq!(
        fixture.query("SELECT external_id, contributor FROM Contributors"),
        vec![vec![s("2021667001"), s("Dallas, Alexander James")]]
    );
}

#[tokio::test]
async fn test_reingest_detail_tables_duplicate_rows() {
    let fixture = Fixture::new();
    fixture.put("batch-001.json", SCENARIO).await;

    fixture.ingest().await;
    fixture.ingest().await;

    assert_eq!(fixture.count(Table::Resources), 2);
    assert_eq!(fixture.count(Table::Subjects), 4);
}

#[tokio::test]
async fn test_optional_item_fields_nullable() {
    let fixture = Fixture::new();
    let full = r#"{"id": "full", "title": "Full", "item": {
        "call_number": ["KF2"], "created_published": "Washington, 1790",
        "date": "1790", "notes": ["Bound", "Indexed"], "source_collection": "U.S. Reports"
    }}"#;
    let partial = r#"{"id": "partial", "title": "Partial", "item": {
        "call_number": ["KF3"], "date": null, "notes": "Loose"
    }}"#;
    fixture
        .put("a.json", document(&[full.to_string(), partial.to_string()]))
        .await;

    fixture.ingest().await;

    assert_eq!(
        fixture.query(
            "SELECT external_id, created_published, date, notes, source_collection FROM Items ORDER BY external_id"
        ),
        vec![
            vec![
                s("full"),
                s("Washington, 1790"),
                s("1790"),
                s(r#"["Bound","Indexed"]"#),
                s("U.S. Reports"),
            ],
            vec![s("partial"), None, None, s("Loose"), None],
        ]
    );
}

#[tokio::test]
async fn test_missing_call_number_fails_only_call_numbers_and_items() {
    let fixture = Fixture::new();
    let doc = r#"{"content": {"results": [{
        "id": "nocall", "title": "No call number", "item": {},
        "contributor": ["Holmes"], "resources": [{"pdf": "x.pdf"}], "subject": ["Law"]
    }]}}"#;
    fixture.put("a.json", doc).await;

    let stats = fixture.ingest().await;

    assert_eq!(stats.table(Table::CallNumbers).extraction_failures, 1);
    assert_eq!(stats.table(Table::Items).extraction_failures, 1);
    assert_eq!(stats.table(Table::Contributors).inserted, 1);
    assert_eq!(stats.table(Table::Resources).inserted, 1);
    assert_eq!(stats.table(Table::Subjects).inserted, 1);

    assert_eq!(fixture.count(Table::CallNumbers), 0);
    assert_eq!(fixture.count(Table::Items), 0);
    assert_eq!(fixture.count(Table::Contributors), 1);
}

#[tokio::test]
async fn test_resources_fan_out() {
    let fixture = Fixture::new();
    let rec = record(
        "fan",
        r#", "resources": [{"image": "1.jpg", "pdf": "1.pdf"}, {"image": "2.jpg"}, {"pdf": "3.pdf"}]"#,
    );
    fixture.put("a.json", document(&[rec])).await;

    fixture.ingest().await;

    assert_eq!(
        fixture.query("SELECT external_id, image, pdf FROM Resources ORDER BY COALESCE(image, pdf)"),
        vec![
            vec![s("fan"), s("1.jpg"), s("1.pdf")],
            vec![s("fan"), s("2.jpg"), None],
            vec![s("fan"), None, s("3.pdf")],
        ]
    );
}

#[tokio::test]
async fn test_contributor_first_entry_only() {
    let fixture = Fixture::new();
    let rec = record("multi", r#", "contributor": ["Dallas, A. J.", "Cranch, W."]"#);
    fixture.put("a.json", document(&[rec])).await;

    fixture.ingest().await;

    assert_eq!(
        fixture.query("SELECT external_id, contributor FROM Contributors"),
        vec![vec![s("multi"), s("Dallas, A. J.")]]
    );
}

#[tokio::test]
async fn test_objects_processed_in_listing_order() {
    let fixture = Fixture::new();
    // Same external_id in both objects: whichever is ingested first wins Items
    let first = r#"{"id": "shared", "title": "From A", "item": {"call_number": ["KF1"]}}"#;
    let second = r#"{"id": "shared", "title": "From B", "item": {"call_number": ["KF1"]}}"#;
    fixture.put("b.json", document(&[second.to_string()])).await;
    fixture.put("a.json", document(&[first.to_string()])).await;

    let stats = fixture.ingest().await;
    assert_eq!(stats.table(Table::Items).inserted, 1);
    assert_eq!(stats.table(Table::Items).duplicates, 1);
    assert_eq!(
        fixture.query("SELECT title FROM Items"),
        vec![vec![s("From A")]]
    );
}

// ============================================================================
// Parse Policy Tests
// ============================================================================

#[tokio::test]
async fn test_malformed_object_aborts_run() {
    let fixture = Fixture::new();
    fixture.put("a.json", SCENARIO).await;
    fixture.put("b.json", "{\"content\": ").await;
    fixture.put("c.json", document(&[record("late", "")])).await;

    let err = fixture.engine().run().await.unwrap_err();
    assert!(matches!(err, Error::Parse { ref object, .. } if object == "b.json"));

    assert_eq!(fixture.count(Table::Items), 1);
    assert!(fixture
        .query("SELECT external_id FROM Items WHERE external_id = 'late'")
        .is_empty());
}

#[tokio::test]
async fn test_malformed_object_skipped_when_configured() {
    let fixture = Fixture::new();
    fixture.put("a.json", SCENARIO).await;
    fixture.put("b.json", r#"{"results": []}"#).await;
    fixture.put("c.json", document(&[record("late", "")])).await;

    let stats = fixture
        .engine()
        .with_parse_error_policy(ParseErrorPolicy::Skip)
        .run()
        .await
        .unwrap();

    assert_eq!(stats.objects_skipped, 1);
    assert_eq!(stats.skipped_objects, vec!["b.json".to_string()]);
    assert_eq!(fixture.count(Table::Items), 2);
}

// ============================================================================
// Dry Run Tests
// ============================================================================

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let fixture = Fixture::new();
    fixture.put("batch-001.json", SCENARIO).await;

    let engine = IngestEngine::new(fixture.source(), DryRunGateway::new());
    let stats = engine.ingest().await.unwrap();

    assert_eq!(engine.gateway().attempted(), 5);
    assert_eq!(stats.total_inserted(), 5);
    for table in Table::ALL {
        assert_eq!(fixture.count(table), 0);
    }
}
