// tests/deletion.rs — End-to-end deletion scenarios
//
// Port of: relmer/RCDir's tests/output_parity.rs placement and spirit
// (exercise the real entry point against a real filesystem), adapted to
// assert deletion outcomes — final counters and that the root no longer
// exists — instead of comparing two executables' stdout.

use std::fs;
use std::path::PathBuf;

use paratree::config::Config;
use paratree::supervisor;

fn unique_temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "paratree-test-{label}-{:?}",
        std::thread::current().id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn quick_config() -> Config {
    Config { threads: 8, report_period_ms: 50 }
}

////////////////////////////////////////////////////////////////////////////////
//
//  empty_directory_is_removed
//
////////////////////////////////////////////////////////////////////////////////

#[test]
fn empty_directory_is_removed() {
    let root = unique_temp_dir("empty");

    let outcome = supervisor::run(&root, quick_config(), true).unwrap();
    assert!(outcome.succeeded());
    assert_eq!(outcome.snapshot.deleted, 1);
    assert!(!root.exists());
}

////////////////////////////////////////////////////////////////////////////////
//
//  shallow_tree_is_fully_deleted
//
////////////////////////////////////////////////////////////////////////////////

#[test]
fn shallow_tree_is_fully_deleted() {
    let root = unique_temp_dir("shallow");
    fs::write(root.join("a.txt"), b"a").unwrap();
    fs::write(root.join("b.txt"), b"b").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("c.txt"), b"c").unwrap();

    let outcome = supervisor::run(&root, quick_config(), true).unwrap();
    assert!(outcome.succeeded());
    // root + a.txt + b.txt + sub + sub/c.txt
    assert_eq!(outcome.snapshot.deleted, 5);
    assert!(!root.exists());
}

////////////////////////////////////////////////////////////////////////////////
//
//  deep_narrow_chain_is_fully_deleted
//
////////////////////////////////////////////////////////////////////////////////

#[test]
fn deep_narrow_chain_is_fully_deleted() {
    let root = unique_temp_dir("deep");
    let mut cur = root.clone();
    for i in 0..40 {
        cur = cur.join(format!("d{i}"));
        fs::create_dir(&cur).unwrap();
    }
    fs::write(cur.join("leaf.txt"), b"leaf").unwrap();

    let outcome = supervisor::run(&root, quick_config(), true).unwrap();
    assert!(outcome.succeeded());
    assert_eq!(outcome.snapshot.deleted, 42); // root + 40 dirs + leaf.txt
    assert!(!root.exists());
}

////////////////////////////////////////////////////////////////////////////////
//
//  wide_directory_is_fully_deleted
//
////////////////////////////////////////////////////////////////////////////////

#[test]
fn wide_directory_is_fully_deleted() {
    let root = unique_temp_dir("wide");
    for i in 0..500 {
        fs::write(root.join(format!("f{i}.txt")), b"x").unwrap();
    }

    let outcome = supervisor::run(&root, quick_config(), true).unwrap();
    assert!(outcome.succeeded());
    assert_eq!(outcome.snapshot.deleted, 501);
    assert!(!root.exists());
}

////////////////////////////////////////////////////////////////////////////////
//
//  readonly_file_is_deleted
//
////////////////////////////////////////////////////////////////////////////////

#[test]
fn readonly_file_is_deleted() {
    let root = unique_temp_dir("readonly");
    let file = root.join("locked.txt");
    fs::write(&file, b"x").unwrap();
    let mut perms = fs::metadata(&file).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&file, perms).unwrap();

    let outcome = supervisor::run(&root, quick_config(), true).unwrap();
    assert!(outcome.succeeded());
    assert_eq!(outcome.snapshot.deleted, 2);
    assert!(!root.exists());
}

////////////////////////////////////////////////////////////////////////////////
//
//  rerun_after_success_reports_path_not_found
//
////////////////////////////////////////////////////////////////////////////////

#[test]
fn rerun_after_success_reports_path_not_found() {
    let root = unique_temp_dir("rerun");

    let first = supervisor::run(&root, quick_config(), true).unwrap();
    assert!(first.succeeded());
    assert!(!root.exists());

    let second = supervisor::run(&root, quick_config(), true);
    assert!(second.is_err());
    assert_eq!(second.unwrap_err().exit_code(), 3);
}
