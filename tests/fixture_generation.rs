//! End-to-end fixture generation: preset -> render -> write -> read back.

use quick_xml::events::Event;
use quick_xml::Reader;
use scan_fixtures::csv::TabularConfig;
use scan_fixtures::presets::{csv_preset, json_preset, xml_preset, Preset};
use scan_fixtures::{generate_presets, OutputOpts};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SEED: u64 = 42;

fn opts(dir: &Path) -> OutputOpts {
    OutputOpts {
        output_dir: dir.to_path_buf(),
        seed: Some(SEED),
    }
}

fn shrink(presets: Vec<Preset>, records: u64) -> Vec<Preset> {
    presets
        .into_iter()
        .map(|p| p.with_records(records))
        .collect()
}

/// Count elements named `name`, panicking on malformed markup.
fn count_elements(xml: &str, name: &str) -> usize {
    let mut reader = Reader::from_str(xml);
    let mut count = 0;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == name.as_bytes() => {
                count += 1
            }
            Event::Eof => break,
            _ => {}
        }
    }
    count
}

#[test]
fn test_csv_column_file_end_to_end() {
    let temp = TempDir::new().unwrap();
    let config = TabularConfig::from_file("tests/fixtures/columns.yaml").unwrap();

    let summaries = generate_presets(&[Preset::Tabular(config)], &opts(temp.path())).unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].path, temp.path().join("columns-test.csv"));
    assert_eq!(summaries[0].fields, 3);

    let text = fs::read_to_string(&summaries[0].path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "id,status,scanner");
    assert_eq!(lines[1], "id_000000,open,nessus");
    assert_eq!(lines[4], "id_000003,open,nessus");
    assert!(!text.ends_with('\n'));
}

#[test]
fn test_csv_zero_records_is_header_only() {
    let temp = TempDir::new().unwrap();
    let presets = shrink(csv_preset("large").unwrap(), 0);

    let summaries = generate_presets(&presets, &opts(temp.path())).unwrap();

    let text = fs::read_to_string(&summaries[0].path).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert_eq!(text.split(',').count(), 180);
    assert!(text.starts_with("unique_1,"));
}

#[test]
fn test_json_all_presets_parse() {
    let temp = TempDir::new().unwrap();
    let presets = shrink(json_preset("all").unwrap(), 4);

    let summaries = generate_presets(&presets, &opts(temp.path())).unwrap();

    assert_eq!(summaries.len(), 4);
    for summary in &summaries {
        let text = fs::read_to_string(&summary.path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let records = parsed.as_array().unwrap();
        assert_eq!(records.len(), 4, "{}", summary.path.display());
        assert!(records.iter().all(|r| r.is_object()));
        assert_eq!(summary.records, 4);
    }
}

#[test]
fn test_json_organization_shape() {
    let temp = TempDir::new().unwrap();
    let presets = json_preset("organization").unwrap();

    let summaries = generate_presets(&presets, &opts(temp.path())).unwrap();

    let text = fs::read_to_string(temp.path().join("test-organization-data.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len() as u64, summaries[0].records);
    for record in records {
        let id = record["organizationId"].as_str().unwrap();
        assert!(id.starts_with("ORG-"));
        assert_eq!(record["_id"].as_str().unwrap().len(), 24);
        assert!(record["departments"].is_array());
    }
}

#[test]
fn test_xml_all_presets_are_well_formed() {
    let temp = TempDir::new().unwrap();
    let presets = shrink(xml_preset("all").unwrap(), 3);

    let summaries = generate_presets(&presets, &opts(temp.path())).unwrap();

    let expected = [
        ("test-burp-scan.xml", "issue"),
        ("test-nessus-scan.xml", "ReportItem"),
        ("test-generic-data.xml", "record"),
        ("test-project-controls.xml", "control"),
        ("test-deep-nested.xml", "department"),
    ];
    assert_eq!(summaries.len(), expected.len());
    for (summary, (filename, element)) in summaries.iter().zip(expected) {
        assert_eq!(summary.path, temp.path().join(filename));
        let text = fs::read_to_string(&summary.path).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(count_elements(&text, element), 3, "{filename}");
    }
}

#[test]
fn test_same_seed_same_bytes() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let presets = shrink(xml_preset("generic").unwrap(), 10);

    let a = generate_presets(&presets, &opts(first.path())).unwrap();
    let b = generate_presets(&presets, &opts(second.path())).unwrap();

    // Timestamps are relative to the wall clock
    let without_clock = |path: &Path| -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .filter(|line| !line.contains("generated=") && !line.contains("<created>"))
            .map(str::to_string)
            .collect()
    };
    assert_eq!(without_clock(&a[0].path), without_clock(&b[0].path));
    assert!(without_clock(&a[0].path).len() > 10);
}

#[test]
fn test_output_dir_is_created() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("fixtures").join("scan");
    let presets = shrink(xml_preset("project").unwrap(), 1);

    let summaries = generate_presets(&presets, &opts(&dir)).unwrap();

    assert!(summaries[0].path.starts_with(&dir));
    assert!(summaries[0].path.exists());
}
