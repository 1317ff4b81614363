#![cfg(test)]

use std::fs;
use std::os::unix::fs::symlink;
use std::rc::Rc;
use std::sync::Mutex;

use super::*;
use crate::error::PathError;

/// The process working directory is global state; tests that read or move
/// it take this lock so they cannot observe each other mid-change.
static CWD_LOCK: Mutex<()> = Mutex::new(());

fn sandbox() -> (tempfile::TempDir, Path) {
    let dir = tempfile::tempdir().unwrap();
    let base = Path::absolute(dir.path().to_str().unwrap()).unwrap();
    (dir, base)
}

#[test]
fn test_absolute_normalizes_lexically() {
    for (raw, rendered, depth) in [
        ("/", "/", 0),
        ("/a", "/a", 1),
        ("/a/", "/a", 1),
        ("/a/1", "/a/1", 2),
        ("/./", "/", 0),
        ("/a/./", "/a", 1),
        ("/a/./1", "/a/1", 2),
        ("/a/..", "/", 0),
        ("/a/../1", "/1", 1),
        ("//a///b", "/a/b", 2),
    ] {
        let path = Path::absolute(raw).unwrap();
        assert_eq!(path.render(), rendered, "Parsing {raw:?} should normalize.");
        assert_eq!(path.depth(), depth, "Depth of {raw:?}.");
    }
}

#[test]
fn test_absolute_requires_a_root() {
    assert!(matches!(
        Path::absolute("relative/only"),
        Err(PathError::InvalidPath(_))
    ));
    assert!(matches!(Path::absolute(""), Err(PathError::InvalidPath(_))));
}

#[test]
fn test_absolute_takes_the_separator_from_the_input() {
    let path = Path::absolute("\\a\\b").unwrap();
    assert_eq!(
        path.render(),
        "\\a\\b",
        "The first character of the input becomes the rendering separator."
    );
    assert_eq!(path.depth(), 2);

    let mixed = Path::absolute("/a\\b").unwrap();
    assert_eq!(
        mixed.render(),
        "/a/b",
        "Both separator characters split during parsing."
    );
}

#[test]
fn test_escaping_the_root_fails() {
    let root = Path::absolute("/").unwrap();
    assert!(root.exit().is_err());
    assert!(matches!(
        root.enter_raw(".."),
        Err(PathError::RootEscape(_))
    ));
    assert!(matches!(
        Path::absolute("/a/../.."),
        Err(PathError::RootEscape(_))
    ));
}

#[test]
fn test_enter_pushes_one_literal_segment() {
    let base = Path::absolute("/srv").unwrap();

    let child = base.enter("data").unwrap();
    assert_eq!(child.depth(), base.depth() + 1);
    assert_eq!(child.filename(), "data");

    let dotted = base.enter("..").unwrap();
    assert_eq!(
        dotted.filename(),
        "..",
        "enter does not resolve; the segment is literal."
    );

    assert!(base.enter("nul\0here").is_err());
    assert!(matches!(
        base.enter_raw("ok/nul\0here"),
        Err(PathError::InvalidSegment(_))
    ));
}

#[test]
fn test_exit_returns_the_shared_parent() {
    let base = Path::absolute("/a/b").unwrap();
    let child = base.enter("c").unwrap();

    let back = child.exit().unwrap();
    assert!(Rc::ptr_eq(&back.node, &base.node));
    assert_eq!(back.depth(), 2);
}

#[test]
fn test_filename_directory_extension() {
    let file = Path::absolute("/a/b.txt").unwrap();
    assert_eq!(file.filename(), "b.txt");
    assert_eq!(file.directory(), "/a");
    assert_eq!(file.extension(), Some("txt"));

    let root = Path::absolute("/").unwrap();
    assert_eq!(root.filename(), "");
    assert_eq!(
        root.directory(),
        "/",
        "A root is its own directory; there is nothing above it."
    );
    assert_eq!(Path::absolute("/a").unwrap().directory(), "/");

    assert_eq!(Path::absolute("/x/archive.tar.gz").unwrap().extension(), Some("gz"));
    assert_eq!(Path::absolute("/x/.profile").unwrap().extension(), Some("profile"));
    assert_eq!(Path::absolute("/x/trailing.").unwrap().extension(), None);
    assert_eq!(Path::absolute("/x/plain").unwrap().extension(), None);
}

#[test]
fn test_contains_is_a_segment_prefix_check() {
    let root = Path::absolute("/").unwrap();
    let a = Path::absolute("/a").unwrap();
    let ab = Path::absolute("/a/b").unwrap();
    let a_sibling = Path::absolute("/ab").unwrap();

    assert!(a.contains(&a), "contains is reflexive.");
    assert!(root.contains(&ab));
    assert!(a.contains(&ab));
    assert!(!ab.contains(&a), "A deeper path contains no ancestor.");
    assert!(
        !a.contains(&a_sibling),
        "Prefix means segment-wise, not string-wise."
    );
    assert!(!a_sibling.contains(&ab));
}

#[test]
fn test_contains_requires_matching_roots() {
    let posix = Path::from_root(RootSettings::new(None, "/"));
    let dos = Path::from_root(RootSettings::new(Some("c:".to_string()), "\\"));

    let under_dos = dos.enter("a").unwrap();
    assert!(!posix.contains(&under_dos));
    assert!(dos.contains(&under_dos));
}

#[test]
fn test_equality_is_structural() {
    let plain = Path::absolute("/a/b").unwrap();
    let noisy = Path::absolute("//a/./b/").unwrap();
    let other = Path::absolute("/a/c").unwrap();

    assert_eq!(plain, noisy);
    assert_ne!(plain, other);
    assert_eq!(plain, plain.clone());
}

#[test]
fn test_drive_roots_render_with_their_prefix() {
    let dos = Path::from_root(RootSettings::new(Some("c:".to_string()), "\\"));
    assert_eq!(dos.render(), "c:\\");

    let fonts = dos.enter_raw("windows/fonts").unwrap();
    assert_eq!(fonts.render(), "c:\\windows\\fonts");
    assert_eq!(fonts.depth(), 2);
    assert_eq!(format!("{fonts}"), "c:\\windows\\fonts");
}

#[test]
fn test_handles_share_nodes_and_release_them() {
    let base = Path::absolute("/shared").unwrap();
    assert_eq!(Rc::strong_count(&base.node), 1);

    let first = base.enter("one").unwrap();
    let second = base.enter("two").unwrap();
    let alias = base.clone();
    assert_eq!(
        Rc::strong_count(&base.node),
        4,
        "Two children and one alias each hold a counted reference."
    );

    let reached = first.exit().unwrap();
    assert!(Rc::ptr_eq(&reached.node, &base.node));
    assert_eq!(Rc::strong_count(&base.node), 5);

    drop(reached);
    drop(alias);
    drop(first);
    drop(second);
    assert_eq!(
        Rc::strong_count(&base.node),
        1,
        "Releasing every derived handle returns the count to its start."
    );
}

#[test]
fn test_create_directory_builds_the_chain() {
    let (_dir, base) = sandbox();
    let deep = base.enter_raw("a/b/c").unwrap();

    assert!(deep.create_directory());
    assert!(deep.directory_exists());
    assert!(base.enter_raw("a/b").unwrap().directory_exists());
    assert!(
        deep.create_directory(),
        "Existing directories are not an error."
    );
    assert!(deep.exists());
    assert!(!deep.file_exists());
}

#[test]
fn test_exists_queries_never_fail_loudly() {
    let (_dir, base) = sandbox();
    let missing = base.enter("nowhere").unwrap();

    assert!(!missing.exists());
    assert!(!missing.file_exists());
    assert!(!missing.directory_exists());
}

#[test]
fn test_list_reports_names_and_kinds() {
    let (_dir, base) = sandbox();
    fs::write(base.enter("1.txt").unwrap().render(), b"one").unwrap();
    fs::write(base.enter("2.txt").unwrap().render(), b"two").unwrap();
    fs::create_dir(base.enter("d").unwrap().render()).unwrap();

    let mut seen = Vec::new();
    assert!(base.list(|child, kind| {
        seen.push((child.filename().to_string(), kind));
        true
    }));
    seen.sort_by(|left, right| left.0.cmp(&right.0));
    let expected = vec![
        ("1.txt".to_string(), EntryKind::File),
        ("2.txt".to_string(), EntryKind::File),
        ("d".to_string(), EntryKind::Directory),
    ];
    assert_eq!(seen, expected, "Order is OS-defined, so compare sorted.");
}

#[test]
fn test_list_stops_when_the_callback_declines() {
    let (_dir, base) = sandbox();
    for name in ["1.txt", "2.txt", "3.txt"] {
        fs::write(base.enter(name).unwrap().render(), b"x").unwrap();
    }

    let mut visits = 0;
    assert!(base.list(|_, _| {
        visits += 1;
        false
    }));
    assert_eq!(visits, 1, "A false return ends the walk immediately.");
}

#[test]
fn test_list_fails_only_when_the_directory_cannot_open() {
    let (_dir, base) = sandbox();
    assert!(!base.enter("absent").unwrap().list(|_, _| true));
}

#[test]
fn test_list_reports_links_as_files() {
    let (_dir, base) = sandbox();
    let real = base.enter("real").unwrap();
    assert!(real.create_directory());
    symlink(real.render(), base.enter("link").unwrap().render()).unwrap();

    let mut seen = Vec::new();
    assert!(base.list(|child, kind| {
        seen.push((child.filename().to_string(), kind));
        true
    }));
    seen.sort_by(|left, right| left.0.cmp(&right.0));
    let expected = vec![
        ("link".to_string(), EntryKind::File),
        ("real".to_string(), EntryKind::Directory),
    ];
    assert_eq!(seen, expected, "A link to a directory lists as a file.");
}

#[test]
fn test_delete_removes_a_file() {
    let (_dir, base) = sandbox();
    let victim = base.enter("victim.txt").unwrap();
    fs::write(victim.render(), b"bytes").unwrap();

    assert!(victim.delete());
    assert!(!victim.exists());
    assert!(!victim.delete(), "Deleting a missing file reports failure.");
}

#[test]
fn test_delete_directory_removes_the_whole_tree() {
    let (_dir, base) = sandbox();
    let top = base.enter("a").unwrap();
    let deep = top.enter_raw("b/c").unwrap();
    assert!(deep.create_directory());
    fs::write(top.enter("x.txt").unwrap().render(), b"top").unwrap();
    fs::write(deep.enter("y.txt").unwrap().render(), b"deep").unwrap();

    assert!(top.delete_directory());
    assert!(!top.exists());
    assert!(base.directory_exists(), "Only the target tree goes away.");
}

#[test]
fn test_delete_directory_tolerates_an_empty_tree() {
    let (_dir, base) = sandbox();
    let empty = base.enter("empty").unwrap();
    assert!(empty.create_directory());
    assert!(empty.delete_directory());
    assert!(!empty.exists());
}

#[test]
fn test_delete_directory_removes_links_without_entering_them() {
    let (_dir, base) = sandbox();
    let outside = base.enter("outside").unwrap();
    assert!(outside.create_directory());
    let keeper = outside.enter("keeper.txt").unwrap();
    fs::write(keeper.render(), b"still here").unwrap();

    let top = base.enter("top").unwrap();
    assert!(top.create_directory());
    symlink(outside.render(), top.enter("link").unwrap().render()).unwrap();

    assert!(top.delete_directory());
    assert!(!top.exists());
    assert!(
        keeper.file_exists(),
        "Deleting a tree never crosses into link targets."
    );
    assert!(outside.directory_exists());
}

#[test]
fn test_temp_entries_are_unique_and_placed_under_base() {
    let (_dir, base) = sandbox();

    let file = Path::temp_file(Some(&base)).unwrap();
    let twin = Path::temp_file(Some(&base)).unwrap();
    assert!(file.file_exists());
    assert!(base.contains(&file));
    assert_ne!(file, twin, "Each temp entry gets a fresh name.");

    let dir = Path::temp_dir(Some(&base)).unwrap();
    assert!(dir.directory_exists());
    assert!(base.contains(&dir));
}

#[test]
fn test_temp_defaults_to_the_platform_temp_directory() {
    let file = Path::temp_file(None).unwrap();
    assert!(file.file_exists());
    assert!(file.delete());
}

#[test]
fn test_temp_fails_cleanly_when_the_base_is_missing() {
    let (_dir, base) = sandbox();
    let gone = base.enter("never-created").unwrap();
    let result = Path::temp_file(Some(&gone));
    assert!(result.is_err());
}

#[test]
fn test_here_and_qualify_agree() {
    let _cwd = CWD_LOCK.lock().unwrap();

    let here = Path::here().unwrap();
    assert!(here.depth() > 0 || here.is_root());

    assert_eq!(Path::qualify("").unwrap(), here);
    assert_eq!(
        Path::qualify("sub/part").unwrap(),
        here.enter_raw("sub/part").unwrap()
    );
    assert_eq!(
        Path::qualify("/irrelevant/of/cwd").unwrap().render(),
        "/irrelevant/of/cwd"
    );
}

#[test]
fn test_go_to_moves_the_process() {
    let _cwd = CWD_LOCK.lock().unwrap();
    let original = Path::here().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let canonical = fs::canonicalize(dir.path()).unwrap();
    let target = Path::absolute(canonical.to_str().unwrap()).unwrap();

    assert!(target.go_to());
    assert_eq!(Path::here().unwrap(), target);

    assert!(original.go_to(), "The previous directory must restore.");
    assert_eq!(Path::here().unwrap(), original);
}

#[test]
fn test_go_to_missing_directory_fails() {
    let (_dir, base) = sandbox();
    assert!(!base.enter("absent").unwrap().go_to());
}
