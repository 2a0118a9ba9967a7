//! Integration tests for `load_records` over single files and chunk
//! directories written into a temporary directory.

use std::fs;
use std::path::Path;

use evads_core::{Taxonomy, UNKNOWN};
use evads_ingest::{chunk_files, load_records, IngestError, TargetScope};

const HEADER: &str = "ad_archive_id,page_name,matched_cars,country,openai_analysis,start_date,spend";

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).expect("write fixture");
}

fn chunk(rows: &[&str]) -> String {
    let mut body = String::from(HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    body
}

#[test]
fn loads_single_file_and_normalizes_columns() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "ads.csv",
        &chunk(&[
            r#"1,Tesla,Tesla Model Y,DE,"**Performance:** Blazing acceleration and instant torque.",2024-02-01,120.5"#,
            "2,,VW ID.4,Portugal,,not a date,",
        ]),
    );

    let loaded = load_records(&dir.path().join("ads.csv"), &Taxonomy::default().markets)
        .expect("load single file");

    assert_eq!(loaded.files_read, 1);
    assert_eq!(loaded.rows_skipped, 0);
    assert_eq!(loaded.records.len(), 2);

    let tesla = &loaded.records[0];
    assert_eq!(tesla.market, "Germany");
    assert_eq!(tesla.advertiser_name, "Tesla");
    assert_eq!(tesla.ad_id.as_deref(), Some("1"));
    assert_eq!(tesla.spend, Some(120.5));
    assert!(tesla.annotation().is_some());

    let vw = &loaded.records[1];
    assert_eq!(vw.advertiser_name, UNKNOWN);
    assert_eq!(vw.annotation(), None);
    assert_eq!(vw.start_date, None);
}

#[test]
fn chunk_manifest_controls_order_and_skips_missing_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "part_b.csv", &chunk(&["b,Audi,Audi Q4 e-tron,NL,text,,"]));
    write(dir.path(), "part_a.csv", &chunk(&["a,Tesla,Tesla Model Y,PT,text,,"]));
    write(
        dir.path(),
        "chunks_metadata.json",
        r#"{"chunk_files": ["part_b.csv", "part_missing.csv", "part_a.csv"]}"#,
    );

    let loaded =
        load_records(dir.path(), &Taxonomy::default().markets).expect("load chunk directory");

    assert_eq!(loaded.files_read, 2);
    let ids: Vec<_> = loaded
        .records
        .iter()
        .filter_map(|r| r.ad_id.as_deref())
        .collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(loaded.records[0].market, "Netherlands");
}

#[test]
fn without_manifest_csv_files_load_in_name_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "02.csv", &chunk(&["second,,,,text,,"]));
    write(dir.path(), "01.csv", &chunk(&["first,,,,text,,"]));
    write(dir.path(), "notes.txt", "not a chunk");

    let files = chunk_files(dir.path()).expect("chunk files");
    let names: Vec<_> = files
        .iter()
        .filter_map(|f| f.file_name().and_then(|n| n.to_str()))
        .collect();
    assert_eq!(names, vec!["01.csv", "02.csv"]);
}

#[test]
fn malformed_manifest_falls_back_to_directory_listing() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "only.csv", &chunk(&["x,,,,text,,"]));
    write(dir.path(), "chunks_metadata.json", "{ not json");

    let loaded = load_records(dir.path(), &Taxonomy::default().markets).expect("fallback load");
    assert_eq!(loaded.records.len(), 1);
}

#[test]
fn empty_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_records(dir.path(), &Taxonomy::default().markets)
        .expect_err("no chunks to load");
    assert!(matches!(err, IngestError::NoCsvFiles { .. }));
}

#[test]
fn file_without_annotation_column_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "ads.csv", "page_name,matched_cars\nTesla,Tesla Model Y\n");

    let err = load_records(&dir.path().join("ads.csv"), &Taxonomy::default().markets)
        .expect_err("annotation column required");
    assert!(matches!(err, IngestError::MissingColumn { .. }));
    assert!(err.to_string().contains("ads.csv"));
}

#[test]
fn rows_with_wrong_field_count_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "ads.csv",
        &chunk(&["1,Tesla,Tesla Model Y,DE,text,,", "broken,row", "3,Audi,Audi Q4 e-tron,NL,text,,"]),
    );

    let loaded = load_records(&dir.path().join("ads.csv"), &Taxonomy::default().markets)
        .expect("load with bad row");
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.rows_skipped, 1);
}

#[test]
fn missing_path_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_records(&dir.path().join("nope.csv"), &Taxonomy::default().markets)
        .expect_err("missing path");
    assert!(matches!(err, IngestError::Io { .. }));
}

#[test]
fn scope_filters_loaded_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "ads.csv",
        &chunk(&[
            "1,Tesla,Tesla Model Y,Germany,**Range:** Up to 520 km of range on one charge.,,",
            "2,Tesla,Tesla Model Y,Sweden,**Range:** Up to 520 km of range on one charge.,,",
            "3,Kia,Kia EV6,Germany,**Range:** Up to 528 km of range on one charge.,,",
            "4,Tesla,Tesla Model Y,Germany,This ad does not include specific details.,,",
        ]),
    );

    let taxonomy = Taxonomy::default();
    let loaded = load_records(&dir.path().join("ads.csv"), &taxonomy.markets).expect("load");
    let kept = TargetScope::from_taxonomy(&taxonomy).apply(loaded.records);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].ad_id.as_deref(), Some("1"));
}
