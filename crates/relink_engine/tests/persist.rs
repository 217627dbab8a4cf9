use std::fs;

use relink_core::Outcome;
use relink_engine::{ensure_output_dir, AtomicFileWriter, ReportJournal};

#[test]
fn report_file_is_written_and_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let writer = AtomicFileWriter::new(dir.path().to_path_buf());

    let path = writer.write("batch_report.txt", "first run\n").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "first run\n");

    let path = writer.write("batch_report.txt", "second run\n").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "second run\n");
}

#[test]
fn ensure_output_dir_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("reports").join("relink");
    ensure_output_dir(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn journal_appends_outcomes_in_decision_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch_report.journal");

    let journal = ReportJournal::create(path.clone()).unwrap();
    journal.append_outcome("vid1", &Outcome::Success).unwrap();
    journal
        .append_outcome("vid2", &Outcome::Skipped("Already updated".to_string()))
        .unwrap();
    journal
        .append_outcome("vid3", &Outcome::Failed("Editor timeout".to_string()))
        .unwrap();

    let lines: Vec<String> = fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    assert_eq!(
        lines,
        vec![
            "SUCCESS\tvid1",
            "SKIPPED\tvid2\tAlready updated",
            "FAILED\tvid3\tEditor timeout",
        ]
    );
}

#[test]
fn journal_is_truncated_per_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch_report.journal");

    let journal = ReportJournal::create(path.clone()).unwrap();
    journal.append_outcome("old", &Outcome::Success).unwrap();
    drop(journal);

    let journal = ReportJournal::create(path.clone()).unwrap();
    journal.append_outcome("new", &Outcome::Success).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "SUCCESS\tnew\n");
}
