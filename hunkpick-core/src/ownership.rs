//! Hunk selection tracking for a virtual branch.
//!
//! [`SelectedOwnership`] keeps two maps of the same shape: the claims (every
//! hunk present in the latest branch snapshot) and the selection (the hunks
//! the user wants in the next commit). Both are keyed by file id, then hunk
//! id, and preserve insertion order so the serialized selection is stable.
//!
//! When the branch is reloaded, [`SelectedOwnership::update`] reconciles the
//! selection against the previous claims: hunk ids that were already known
//! keep whatever state the user gave them, ids never seen before come back
//! selected, and ids that vanished from the branch are dropped.

use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use crate::types::{BranchFile, FileId, Hunk, HunkId, VirtualBranch};

/// Hunks of one file, keyed by hunk id.
pub type HunkClaims = IndexMap<HunkId, Hunk>;

/// Hunks of a whole branch, keyed by file id then hunk id.
pub type FileClaims = IndexMap<FileId, HunkClaims>;

/// How much of a file's claimed hunks are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSelection {
    None,
    Partial,
    All,
}

/// Claims and selection for one virtual branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedOwnership {
    claims: FileClaims,
    selection: FileClaims,
}

/// Collects a file's hunks into a map; a repeated id overwrites in place.
fn hunk_map<'a>(hunks: impl IntoIterator<Item = &'a Hunk>) -> HunkClaims {
    let mut map = HunkClaims::new();
    for hunk in hunks {
        map.insert(hunk.id(), hunk.clone());
    }
    map
}

/// Builds claims from a snapshot. Files without hunks claim nothing.
fn branch_files_to_claims(files: &[BranchFile]) -> FileClaims {
    let mut claims = FileClaims::new();
    for file in files.iter().filter(|f| !f.hunks.is_empty()) {
        let entry = claims.entry(file.id.clone()).or_default();
        for hunk in &file.hunks {
            entry.insert(hunk.id(), hunk.clone());
        }
    }
    claims
}

/// Selects files and hunk ids that the previous claims did not know about.
fn select_added_claims(branch: &VirtualBranch, previous: &FileClaims, selection: &mut FileClaims) {
    for file in branch.files.iter().filter(|f| !f.hunks.is_empty()) {
        match previous.get(&file.id) {
            None => {
                let entry = selection.entry(file.id.clone()).or_default();
                entry.extend(hunk_map(&file.hunks));
            }
            Some(known) => {
                for hunk in &file.hunks {
                    let id = hunk.id();
                    if !known.contains_key(&id) {
                        selection.entry(file.id.clone()).or_default().insert(id, hunk.clone());
                    }
                }
            }
        }
    }
}

/// Carries previously selected hunks that still exist in the new claims.
///
/// The new claim's hunk value replaces the old one so hashes stay current.
fn keep_surviving_selection(previous: &FileClaims, claims: &FileClaims, selection: &mut FileClaims) {
    for (file_id, hunks) in previous {
        let Some(current) = claims.get(file_id) else {
            continue;
        };
        for hunk_id in hunks.keys() {
            if let Some(hunk) = current.get(hunk_id) {
                selection
                    .entry(file_id.clone())
                    .or_default()
                    .insert(hunk_id.clone(), hunk.clone());
            }
        }
    }
}

impl SelectedOwnership {
    /// Builds claims from `branch` and selects every one of them.
    pub fn from_branch(branch: &VirtualBranch) -> Self {
        let claims = branch_files_to_claims(&branch.files);
        debug!(
            branch = %branch.name,
            files = claims.len(),
            "ownership initialised with everything selected"
        );
        Self { selection: claims.clone(), claims }
    }

    /// Replaces the claims with those of `branch` and reconciles the selection.
    ///
    /// Unknown file or hunk ids are selected; known ids keep their previous
    /// state; ids no longer on the branch are dropped.
    pub fn update(&mut self, branch: &VirtualBranch) -> &mut Self {
        let claims = branch_files_to_claims(&branch.files);
        let mut selection = FileClaims::new();
        select_added_claims(branch, &self.claims, &mut selection);
        keep_surviving_selection(&self.selection, &claims, &mut selection);

        debug!(
            branch = %branch.name,
            claimed_files = claims.len(),
            selected_files = selection.len(),
            "ownership reconciled"
        );
        self.claims = claims;
        self.selection = selection;
        self
    }

    /// Deselects the given hunks of `file_id`. Unknown ids are ignored.
    pub fn ignore<I, S>(&mut self, file_id: &str, hunk_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for hunk_id in hunk_ids {
            let Some(hunks) = self.selection.get_mut(file_id) else {
                break;
            };
            hunks.shift_remove(hunk_id.as_ref());
            if hunks.is_empty() {
                self.selection.shift_remove(file_id);
            }
        }
        self
    }

    /// Selects the given hunks under `file_id`, overwriting entries with the same id.
    ///
    /// The hunks are not checked against the claims.
    pub fn select<I>(&mut self, file_id: &str, hunks: I) -> &mut Self
    where
        I: IntoIterator<Item = Hunk>,
    {
        let mut hunks = hunks.into_iter().peekable();
        if hunks.peek().is_none() {
            return self;
        }
        let entry = self.selection.entry(file_id.to_owned()).or_default();
        for hunk in hunks {
            entry.insert(hunk.id(), hunk);
        }
        self
    }

    /// Returns `true` when every id in `hunk_ids` is selected under `file_id`.
    pub fn is_selected<I, S>(&self, file_id: &str, hunk_ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selected = self.selection.get(file_id);
        hunk_ids
            .into_iter()
            .all(|id| selected.is_some_and(|hunks| hunks.contains_key(id.as_ref())))
    }

    pub fn clear_selection(&mut self) -> &mut Self {
        self.selection.clear();
        self
    }

    pub fn nothing_selected(&self) -> bool {
        self.selection.is_empty()
    }

    /// Selects every claimed hunk of `file_id`.
    pub fn select_file(&mut self, file_id: &str) -> &mut Self {
        let hunks: Vec<Hunk> = self
            .claims
            .get(file_id)
            .map(|hunks| hunks.values().cloned().collect())
            .unwrap_or_default();
        self.select(file_id, hunks)
    }

    /// Selects every claimed hunk on the branch.
    pub fn select_all(&mut self) -> &mut Self {
        self.selection = self.claims.clone();
        self
    }

    pub fn claims(&self) -> &FileClaims {
        &self.claims
    }

    pub fn selection(&self) -> &FileClaims {
        &self.selection
    }

    pub fn selected_count(&self, file_id: &str) -> usize {
        self.selection.get(file_id).map_or(0, |hunks| hunks.len())
    }

    pub fn claimed_count(&self, file_id: &str) -> usize {
        self.claims.get(file_id).map_or(0, |hunks| hunks.len())
    }

    /// Tri-state summary of a file for checkbox rendering.
    pub fn file_state(&self, file_id: &str) -> FileSelection {
        let selected = self.selected_count(file_id);
        if selected == 0 {
            FileSelection::None
        } else if selected >= self.claimed_count(file_id) {
            FileSelection::All
        } else {
            FileSelection::Partial
        }
    }
}

/// Writes the selection as `file:hunk-hash,hunk-hash` lines in insertion order.
impl fmt::Display for SelectedOwnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (file_id, hunks)) in self.selection.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{file_id}:")?;
            for (j, hunk) in hunks.values().enumerate() {
                if j > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}-{}", hunk.id(), hunk.hash())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(files: Vec<BranchFile>) -> VirtualBranch {
        VirtualBranch::new("feature", files)
    }

    fn file(path: &str, hunks: &[(&str, &str)]) -> BranchFile {
        BranchFile::new(path, hunks.iter().map(|(id, hash)| Hunk::local(*id, *hash)).collect())
    }

    #[test]
    fn from_branch_selects_all_claims() {
        let b = branch(vec![
            file("a.txt", &[("h1", "x"), ("h2", "y")]),
            file("b.txt", &[("h3", "z")]),
        ]);
        let ownership = SelectedOwnership::from_branch(&b);
        assert_eq!(ownership.selection(), ownership.claims());
        assert_eq!(ownership.to_string(), "a.txt:h1-x,h2-y\nb.txt:h3-z");
    }

    #[test]
    fn duplicate_file_entries_merge_and_later_hunks_win() {
        let b = branch(vec![
            file("a.txt", &[("h1", "old"), ("h2", "y")]),
            file("a.txt", &[("h1", "new"), ("h3", "z")]),
        ]);
        let ownership = SelectedOwnership::from_branch(&b);
        assert_eq!(ownership.claims().len(), 1);
        assert_eq!(ownership.to_string(), "a.txt:h1-new,h2-y,h3-z");
    }

    #[test]
    fn files_without_hunks_are_not_claimed() {
        let b = branch(vec![file("image.png", &[]), file("a.txt", &[("h1", "x")])]);
        let mut ownership = SelectedOwnership::from_branch(&b);
        assert!(!ownership.claims().contains_key("image.png"));
        assert_eq!(ownership.selection(), ownership.claims());

        ownership.update(&branch(vec![file("a.txt", &[("h1", "x")]), file("other.bin", &[])]));
        assert_eq!(ownership.to_string(), "a.txt:h1-x");
    }

    #[test]
    fn ignore_last_hunk_removes_file_entry() {
        let mut ownership = SelectedOwnership::from_branch(&branch(vec![file("a.txt", &[("h1", "x")])]));
        ownership.ignore("a.txt", ["h1"]);
        assert_eq!(ownership.to_string(), "");
        assert!(ownership.nothing_selected());
        assert!(!ownership.selection().contains_key("a.txt"));
    }

    #[test]
    fn ignore_unknown_ids_is_a_no_op() {
        let mut ownership = SelectedOwnership::from_branch(&branch(vec![file("a.txt", &[("h1", "x")])]));
        ownership.ignore("missing.txt", ["h1"]).ignore("a.txt", ["nope"]);
        assert!(ownership.is_selected("a.txt", ["h1"]));
    }

    #[test]
    fn is_selected_requires_every_id() {
        let ownership =
            SelectedOwnership::from_branch(&branch(vec![file("a.txt", &[("h1", "x"), ("h2", "y")])]));
        assert!(ownership.is_selected("a.txt", ["h1", "h2"]));
        assert!(!ownership.is_selected("a.txt", ["h1", "h9"]));
        assert!(ownership.is_selected("a.txt", Vec::<String>::new()));
        assert!(ownership.is_selected("missing.txt", Vec::<&str>::new()));
    }

    #[test]
    fn select_with_no_hunks_keeps_selection_empty() {
        let mut ownership = SelectedOwnership::default();
        ownership.select("a.txt", Vec::new());
        assert!(ownership.nothing_selected());
    }

    #[test]
    fn update_keeps_ignored_hunk_and_selects_new_one() {
        let mut ownership = SelectedOwnership::from_branch(&branch(vec![file("a.txt", &[("h1", "x")])]));
        ownership.ignore("a.txt", ["h1"]);
        ownership.update(&branch(vec![file("a.txt", &[("h1", "x"), ("h2", "y")])]));
        assert_eq!(ownership.to_string(), "a.txt:h2-y");
    }

    #[test]
    fn update_refreshes_hash_of_surviving_hunk() {
        let mut ownership = SelectedOwnership::from_branch(&branch(vec![file("a.txt", &[("h1", "x")])]));
        ownership.update(&branch(vec![file("a.txt", &[("h1", "changed")])]));
        assert_eq!(ownership.to_string(), "a.txt:h1-changed");
    }

    #[test]
    fn update_drops_removed_hunks_and_files() {
        let mut ownership = SelectedOwnership::from_branch(&branch(vec![
            file("a.txt", &[("h1", "x"), ("h2", "y")]),
            file("b.txt", &[("h3", "z")]),
        ]));
        ownership.update(&branch(vec![file("a.txt", &[("h2", "y")])]));
        assert!(!ownership.is_selected("a.txt", ["h1"]));
        assert!(!ownership.is_selected("b.txt", ["h3"]));
        assert_eq!(ownership.to_string(), "a.txt:h2-y");
    }

    #[test]
    fn reidentified_hunk_comes_back_selected() {
        let mut ownership = SelectedOwnership::from_branch(&branch(vec![file("a.txt", &[("1-4", "x")])]));
        ownership.ignore("a.txt", ["1-4"]);
        ownership.update(&branch(vec![file("a.txt", &[("2-5", "x")])]));
        assert!(ownership.is_selected("a.txt", ["2-5"]));
    }

    #[test]
    fn file_state_reports_partial_selection() {
        let mut ownership =
            SelectedOwnership::from_branch(&branch(vec![file("a.txt", &[("h1", "x"), ("h2", "y")])]));
        assert_eq!(ownership.file_state("a.txt"), FileSelection::All);
        ownership.ignore("a.txt", ["h1"]);
        assert_eq!(ownership.file_state("a.txt"), FileSelection::Partial);
        ownership.ignore("a.txt", ["h2"]);
        assert_eq!(ownership.file_state("a.txt"), FileSelection::None);
        ownership.select_file("a.txt");
        assert_eq!(ownership.file_state("a.txt"), FileSelection::All);
    }

    #[test]
    fn remote_hunks_are_tracked_by_range() {
        let b = branch(vec![BranchFile::new("a.txt", vec![Hunk::remote(1, 3, "abc")])]);
        let mut ownership = SelectedOwnership::from_branch(&b);
        assert!(ownership.is_selected("a.txt", ["1-4"]));
        ownership.ignore("a.txt", ["1-4"]);
        assert!(ownership.nothing_selected());
    }
}
