// End-to-end tests: git repository -> log -> signatures -> files on disk

mod common;

use halcyon::history::SignatureScanner;
use halcyon::model::{ContentHash, VersionLabel};
use halcyon::output::{DirSink, OutputFormat, SignatureSink, render_yaml};
use halcyon::repository::{Git2LogSource, GitContentReader};

fn label(version: &str, commit: &str) -> VersionLabel {
    VersionLabel::from(format!("{}-commitid-{}", version, commit))
}

#[test]
fn test_three_commit_history() {
    let (_dir, repo_path, repo) = common::create_test_repo();
    let a = common::add_commit(
        &repo,
        &[("version.txt", &common::version_file("1.0")), ("core.ext", b"X")],
        "A",
    );
    let _b = common::add_commit(&repo, &[("core.ext", b"Y")], "B");
    let c = common::add_commit(&repo, &[("version.txt", &common::version_file("2.0"))], "C");

    let reader = GitContentReader::open(&repo_path).unwrap();
    let report = SignatureScanner::quiet(common::version_config(10))
        .scan(&Git2LogSource::new(&repo_path), &reader)
        .unwrap();

    assert_eq!(report.commits, 3);
    assert_eq!(report.versions, 2);
    assert_eq!(report.documents.len(), 1);

    let doc = &report.documents[0];
    assert_eq!(doc.check_file.as_str(), "core.ext");
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get(&label("1.0", &a)), Some(&ContentHash::of(b"X")));
    // B sits between C and A in the log and carries C's label
    assert_eq!(doc.get(&label("2.0", &c)), Some(&ContentHash::of(b"Y")));
}

#[test]
fn test_empty_repository() {
    let (_dir, repo_path, _repo) = common::create_test_repo();

    let reader = GitContentReader::open(&repo_path).unwrap();
    let report = SignatureScanner::quiet(common::version_config(10))
        .scan(&Git2LogSource::new(&repo_path), &reader)
        .unwrap();

    assert_eq!(report.commits, 0);
    assert_eq!(report.files_selected, 0);
    assert!(report.documents.is_empty());
}

#[test]
fn test_commits_before_latest_version_are_dropped() {
    let (_dir, repo_path, repo) = common::create_test_repo();
    let v1 = common::add_commit(
        &repo,
        &[("version.txt", &common::version_file("1.0")), ("app.js", b"one")],
        "release 1.0",
    );
    // Newer than every version bump: no label in log order
    common::add_commit(&repo, &[("app.js", b"unreleased")], "wip");

    let reader = GitContentReader::open(&repo_path).unwrap();
    let report = SignatureScanner::quiet(common::version_config(0))
        .scan(&Git2LogSource::new(&repo_path), &reader)
        .unwrap();

    let doc = &report.documents[0];
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.get(&label("1.0", &v1)), Some(&ContentHash::of(b"one")));
    assert_eq!(report.sign_stats.unlabeled, 1);
}

#[test]
fn test_deleted_file_has_no_entry_for_deletion() {
    let (_dir, repo_path, repo) = common::create_test_repo();
    common::add_commit(
        &repo,
        &[("version.txt", &common::version_file("1.0")), ("old.js", b"o")],
        "1.0",
    );
    let v2 = common::add_commit(&repo, &[("version.txt", &common::version_file("2.0"))], "2.0");
    common::remove_file_commit(&repo, "old.js", "drop old.js");
    let v3 = common::add_commit(&repo, &[("version.txt", &common::version_file("3.0"))], "3.0");

    let reader = GitContentReader::open(&repo_path).unwrap();
    let report = SignatureScanner::quiet(common::version_config(0))
        .scan(&Git2LogSource::new(&repo_path), &reader)
        .unwrap();

    let doc = &report.documents[0];
    assert_eq!(doc.check_file.as_str(), "old.js");
    assert_eq!(doc.len(), 1);
    assert!(doc.get(&label("3.0", &v3)).is_none());
    assert!(doc.get(&label("2.0", &v2)).is_none());
    assert_eq!(report.sign_stats.absent, 1);
}

#[test]
fn test_selection_filters_and_ranks() {
    let (_dir, repo_path, repo) = common::create_test_repo();
    common::add_commit(
        &repo,
        &[
            ("version.txt", &common::version_file("1.0")),
            ("js/a.js", b"a1"),
            ("js/b.js", b"b1"),
            ("vendor/lib.js", b"l1"),
            ("index.php", b"p1"),
        ],
        "1.0",
    );
    common::add_commit(
        &repo,
        &[("js/b.js", b"b2"), ("vendor/lib.js", b"l2"), ("index.php", b"p2")],
        "work",
    );
    common::add_commit(&repo, &[("version.txt", &common::version_file("1.1"))], "1.1");

    let mut config = common::version_config(1);
    config.omit = vec!["vendor/".to_string()];

    let reader = GitContentReader::open(&repo_path).unwrap();
    let report = SignatureScanner::quiet(config)
        .scan(&Git2LogSource::new(&repo_path), &reader)
        .unwrap();

    assert_eq!(report.files_touched, 4);
    assert_eq!(report.files_selected, 1);
    assert_eq!(report.documents[0].check_file.as_str(), "js/b.js");
    assert_eq!(report.documents[0].len(), 2);
}

#[test]
fn test_reverted_version_gets_distinct_labels() {
    let (_dir, repo_path, repo) = common::create_test_repo();
    let first = common::add_commit(
        &repo,
        &[("version.txt", &common::version_file("1.0")), ("app.js", b"x")],
        "1.0",
    );
    common::add_commit(&repo, &[("version.txt", &common::version_file("2.0"))], "2.0");
    let revert = common::add_commit(
        &repo,
        &[("version.txt", &common::version_file("1.0")), ("app.js", b"y")],
        "revert to 1.0",
    );

    let reader = GitContentReader::open(&repo_path).unwrap();
    let report = SignatureScanner::quiet(common::version_config(0))
        .scan(&Git2LogSource::new(&repo_path), &reader)
        .unwrap();

    assert_eq!(report.versions, 3);
    let doc = &report.documents[0];
    assert_eq!(doc.get(&label("1.0", &first)), Some(&ContentHash::of(b"x")));
    assert_eq!(doc.get(&label("1.0", &revert)), Some(&ContentHash::of(b"y")));
}

#[test]
fn test_documents_written_to_disk() {
    let (dir, repo_path, repo) = common::create_test_repo();
    let a = common::add_commit(
        &repo,
        &[("version.txt", &common::version_file("1.0")), ("js/core.js", b"X")],
        "A",
    );

    let reader = GitContentReader::open(&repo_path).unwrap();
    let report = SignatureScanner::quiet(common::version_config(10))
        .scan(&Git2LogSource::new(&repo_path), &reader)
        .unwrap();

    let sink = DirSink::new(dir.path().join("sigs"), OutputFormat::Yaml);
    let path = sink.write(&report.documents[0]).unwrap();

    assert_eq!(path.file_name().unwrap(), "demo-core.js");
    let body = std::fs::read_to_string(&path).unwrap();
    assert_eq!(body, render_yaml(&report.documents[0]));
    assert!(body.contains(&format!(
        "  1.0-commitid-{}: {}\n",
        a,
        ContentHash::of(b"X")
    )));
}
