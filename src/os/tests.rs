#![cfg(test)]

use std::fs;
use std::os::unix::fs::symlink;

use super::*;

#[test]
fn test_entry_kind_classifies_without_following_links() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().to_str().unwrap();
    fs::create_dir(format!("{base}/real")).unwrap();
    fs::write(format!("{base}/plain.txt"), b"bytes").unwrap();
    symlink(format!("{base}/real"), format!("{base}/link")).unwrap();

    assert!(entry_kind(&format!("{base}/real")).is_directory());
    assert!(entry_kind(&format!("{base}/plain.txt")).is_file());
    assert!(
        entry_kind(&format!("{base}/link")).is_file(),
        "A link to a directory is a file to the tree walker."
    );
    assert!(
        is_dir(&format!("{base}/link")),
        "The boolean query resolves the link's target."
    );
}
