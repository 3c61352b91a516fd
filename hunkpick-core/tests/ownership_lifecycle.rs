//! Integration test for selection reconciliation across branch reloads.
//!
//! Exercises: from_branch, update, ignore, select, is_selected,
//! clear_selection, nothing_selected, and the selection string round trip.

use hunkpick_core::format::{files_to_ownership, parse_ownership};
use hunkpick_core::{BranchFile, Hunk, SelectedOwnership, VirtualBranch};
use pretty_assertions::assert_eq;

fn file(path: &str, hunks: &[(&str, &str)]) -> BranchFile {
    BranchFile::new(path, hunks.iter().map(|(id, hash)| Hunk::local(*id, *hash)).collect())
}

fn branch(files: Vec<BranchFile>) -> VirtualBranch {
    VirtualBranch::new("feature", files)
}

fn hunk(ownership: &SelectedOwnership, path: &str, id: &str) -> Hunk {
    ownership.claims()[path][id].clone()
}

#[test]
fn single_hunk_scenario() {
    let b = branch(vec![file("a.txt", &[("h1", "x")])]);
    let mut ownership = SelectedOwnership::from_branch(&b);
    assert_eq!(ownership.to_string(), "a.txt:h1-x");

    ownership.ignore("a.txt", ["h1"]);
    assert_eq!(ownership.to_string(), "");
    assert!(ownership.nothing_selected());

    // h1 existed before so it stays ignored; h2 is new so it is selected.
    ownership.update(&branch(vec![file("a.txt", &[("h1", "x"), ("h2", "y")])]));
    assert_eq!(ownership.to_string(), "a.txt:h2-y");
}

#[test]
fn full_session_lifecycle() {
    let first = branch(vec![
        file("src/main.rs", &[("1-4", "aa"), ("20-25", "bb")]),
        file("src/lib.rs", &[("3-3", "cc")]),
    ]);
    let mut ownership = SelectedOwnership::from_branch(&first);
    assert_eq!(ownership.selection(), ownership.claims(), "first load selects everything");

    // Deselect one hunk and the whole lib.rs file.
    ownership.ignore("src/main.rs", ["20-25"]).ignore("src/lib.rs", ["3-3"]);
    assert!(ownership.is_selected("src/main.rs", ["1-4"]));
    assert!(!ownership.is_selected("src/main.rs", ["20-25"]));
    assert!(!ownership.selection().contains_key("src/lib.rs"));

    // Reload: main.rs hunk 1-4 edited in place (new hash), 20-25 shifted to 21-26,
    // lib.rs unchanged, README.md added.
    let second = branch(vec![
        file("src/main.rs", &[("1-4", "a2"), ("21-26", "bb")]),
        file("src/lib.rs", &[("3-3", "cc")]),
        file("README.md", &[("1-2", "dd")]),
    ]);
    ownership.update(&second);

    assert!(ownership.is_selected("src/main.rs", ["1-4", "21-26"]), "survivor plus re-identified hunk");
    assert!(!ownership.is_selected("src/lib.rs", ["3-3"]), "known hunk stays ignored");
    assert!(ownership.is_selected("README.md", ["1-2"]), "new file is selected");
    assert_eq!(ownership.to_string(), "src/main.rs:21-26-bb,1-4-a2\nREADME.md:1-2-dd");

    // Same snapshot again: nothing changes.
    let before = ownership.clone();
    ownership.update(&second);
    assert_eq!(ownership, before, "update is idempotent");

    // Ignoring then selecting the same hunk restores it.
    ownership.ignore("README.md", ["1-2"]);
    assert!(!ownership.is_selected("README.md", ["1-2"]));
    let readme = hunk(&ownership, "README.md", "1-2");
    ownership.select("README.md", [readme]);
    assert!(ownership.is_selected("README.md", ["1-2"]));

    // The selection string decodes back to the same records.
    let decoded = parse_ownership(&ownership.to_string()).unwrap();
    let encoded: Vec<String> = decoded.iter().map(ToString::to_string).collect();
    assert_eq!(encoded.join("\n"), ownership.to_string());

    // Removing a file from the branch drops its selection.
    ownership.update(&branch(vec![file("src/main.rs", &[("1-4", "a2")])]));
    assert!(!ownership.is_selected("README.md", ["1-2"]));
    assert_eq!(ownership.to_string(), "src/main.rs:1-4-a2");

    ownership.clear_selection();
    assert!(ownership.nothing_selected());
    assert!(!ownership.is_selected("src/main.rs", ["1-4"]));
}

#[test]
fn cleared_selection_still_picks_up_new_hunks() {
    let mut ownership = SelectedOwnership::from_branch(&branch(vec![file("a.txt", &[("h1", "x")])]));
    ownership.clear_selection();
    ownership.update(&branch(vec![file("a.txt", &[("h1", "x"), ("h2", "y")]), file("b.txt", &[("h3", "z")])]));
    assert_eq!(ownership.to_string(), "a.txt:h2-y\nb.txt:h3-z");
}

#[test]
fn full_ownership_ignores_selection() {
    let b = branch(vec![file("a.txt", &[("h1", "x"), ("h2", "y")])]);
    let mut ownership = SelectedOwnership::from_branch(&b);
    ownership.ignore("a.txt", ["h1"]);
    assert_eq!(files_to_ownership(&b.files), "a.txt:h1-x,h2-y");
    assert_eq!(ownership.to_string(), "a.txt:h2-y");
}
