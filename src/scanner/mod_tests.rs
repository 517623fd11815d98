use std::fs;

use super::*;
use tempfile::TempDir;

fn paths(entries: &[ScanEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.path.as_str()).collect()
}

fn parent_of(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(parent, _)| parent)
}

// =============================================================================
// Basic traversal
// =============================================================================

#[test]
fn scanner_yields_files_and_directories() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("scripts/bootstrap")).unwrap();
    fs::write(temp_dir.path().join("README.md"), "# project").unwrap();
    fs::write(temp_dir.path().join("scripts/bootstrap/bootstrap.sh"), "echo").unwrap();

    let entries: Vec<_> = DirectoryScanner::new().scan(temp_dir.path()).collect();
    let found = paths(&entries);

    assert_eq!(entries.len(), 4);
    assert!(found.contains(&"README.md"));
    assert!(found.contains(&"scripts"));
    assert!(found.contains(&"scripts/bootstrap"));
    assert!(found.contains(&"scripts/bootstrap/bootstrap.sh"));
}

#[test]
fn scanner_does_not_yield_root() {
    let temp_dir = TempDir::new().unwrap();
    let entries: Vec<_> = DirectoryScanner::new().scan(temp_dir.path()).collect();
    assert!(entries.is_empty());
}

#[test]
fn scanner_records_sizes_and_child_counts() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("docs")).unwrap();
    fs::write(temp_dir.path().join("docs/a.md"), "12345").unwrap();
    fs::write(temp_dir.path().join("docs/b.md"), "").unwrap();

    let entries: Vec<_> = DirectoryScanner::new().scan(temp_dir.path()).collect();

    let docs = entries.iter().find(|e| e.path.as_str() == "docs").unwrap();
    assert!(docs.is_dir);
    assert_eq!(docs.child_count, 2);
    assert_eq!(docs.size_bytes, 0);

    let a = entries.iter().find(|e| e.path.as_str() == "docs/a.md").unwrap();
    assert!(!a.is_dir);
    assert_eq!(a.size_bytes, 5);
}

#[test]
fn child_count_matches_yielded_children() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("configs/ansible/roles/base")).unwrap();
    fs::create_dir(temp_dir.path().join("logs")).unwrap();
    fs::write(temp_dir.path().join("configs/app.yml"), "a: 1").unwrap();
    fs::write(temp_dir.path().join("configs/ansible/ansible.cfg"), "[defaults]").unwrap();
    fs::write(temp_dir.path().join("configs/ansible/roles/base/main.yml"), "---").unwrap();

    let entries: Vec<_> = DirectoryScanner::new().scan(temp_dir.path()).collect();

    for dir in entries.iter().filter(|e| e.is_dir) {
        let yielded = entries
            .iter()
            .filter(|e| parent_of(e.path.as_str()) == Some(dir.path.as_str()))
            .count();
        assert_eq!(dir.child_count, yielded, "{}", dir.path);
    }
    let logs = entries.iter().find(|e| e.path.as_str() == "logs").unwrap();
    assert_eq!(logs.child_count, 0);
}

#[test]
fn scanner_excludes_version_control_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join(".git/objects")).unwrap();
    fs::write(temp_dir.path().join(".git/HEAD"), "ref").unwrap();
    fs::create_dir(temp_dir.path().join("docs")).unwrap();
    fs::create_dir_all(temp_dir.path().join("docs/.git")).unwrap();

    let entries: Vec<_> = DirectoryScanner::new().scan(temp_dir.path()).collect();

    assert_eq!(paths(&entries), vec!["docs"]);
    assert_eq!(entries[0].child_count, 0);
}

#[test]
fn sibling_order_follows_os_listing() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["c.txt", "a.txt", "b.txt"] {
        fs::write(temp_dir.path().join(name), "x").unwrap();
    }

    let expected: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    let entries: Vec<_> = DirectoryScanner::new().scan(temp_dir.path()).collect();
    let actual: Vec<String> = entries.iter().map(|e| e.path.to_string()).collect();

    assert_eq!(actual, expected);
}

#[test]
fn children_are_yielded_before_descendants() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("a/deep")).unwrap();
    fs::write(temp_dir.path().join("top.txt"), "x").unwrap();

    let entries: Vec<_> = DirectoryScanner::new().scan(temp_dir.path()).collect();
    let position = |p: &str| entries.iter().position(|e| e.path.as_str() == p).unwrap();

    assert!(position("top.txt") < position("a/deep"));
    assert!(position("a") < position("a/deep"));
}

#[test]
fn repeated_scans_are_identical() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("x/y")).unwrap();
    fs::write(temp_dir.path().join("x/y/z.txt"), "z").unwrap();
    fs::write(temp_dir.path().join("x/w.txt"), "w").unwrap();

    let first: Vec<_> = DirectoryScanner::new().scan(temp_dir.path()).collect();
    let second: Vec<_> = DirectoryScanner::new().scan(temp_dir.path()).collect();
    assert_eq!(first, second);
}

#[test]
fn scanning_missing_root_yields_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");
    assert_eq!(DirectoryScanner::new().scan(&missing).count(), 0);
}

// =============================================================================
// Symlinks
// =============================================================================

#[cfg(unix)]
#[test]
fn symlink_cycle_terminates() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("a")).unwrap();
    fs::write(temp_dir.path().join("a/file.txt"), "x").unwrap();
    std::os::unix::fs::symlink(temp_dir.path(), temp_dir.path().join("a/loop")).unwrap();

    let entries: Vec<_> = DirectoryScanner::new().scan(temp_dir.path()).collect();

    let found = paths(&entries);
    assert!(found.contains(&"a/loop"));
    assert!(!found.iter().any(|p| p.starts_with("a/loop/")));
}

#[cfg(unix)]
#[test]
fn directory_reached_twice_is_descended_once() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("real")).unwrap();
    fs::write(temp_dir.path().join("real/inner.txt"), "x").unwrap();
    std::os::unix::fs::symlink(temp_dir.path().join("real"), temp_dir.path().join("alias"))
        .unwrap();

    let entries: Vec<_> = DirectoryScanner::new().scan(temp_dir.path()).collect();
    let inner_count = entries
        .iter()
        .filter(|e| e.path.file_name() == "inner.txt")
        .count();

    assert_eq!(inner_count, 1);
}

#[cfg(unix)]
#[test]
fn broken_symlink_is_a_zero_size_entry() {
    let temp_dir = TempDir::new().unwrap();
    std::os::unix::fs::symlink(
        temp_dir.path().join("missing-target"),
        temp_dir.path().join("dangling"),
    )
    .unwrap();

    let entries: Vec<_> = DirectoryScanner::new().scan(temp_dir.path()).collect();

    assert_eq!(entries, vec![ScanEntry::file("dangling", 0)]);
}

// =============================================================================
// ScanStats
// =============================================================================

#[test]
fn scan_stats_accumulate_entries() {
    let mut stats = ScanStats::default();
    stats.record(&ScanEntry::file("a.txt", 10));
    stats.record(&ScanEntry::file("b.txt", 5));
    stats.record(&ScanEntry::directory("docs", 0));

    assert_eq!(stats.files_scanned, 2);
    assert_eq!(stats.directories_scanned, 1);
    assert_eq!(stats.total_size_bytes, 15);
}
