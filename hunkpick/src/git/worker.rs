//! Background thread that owns git2::Repository for its lifetime.
//!
//! git2::Repository is !Send — it must be opened inside the thread, not passed in.
//! All communication is via channels: GitRequest in, AppEvent::GitResult out.
//!
//! Besides highlighting, this is where hunks get their ownership identity:
//! the id is the new-side line range and the hash is a SHA-1 of the hunk body.

use std::cell::RefCell;
use std::sync::LazyLock;

use crossbeam_channel::Receiver;
use git2::{Delta, Diff, DiffOptions, ErrorCode, Repository, Tree};
use hunkpick_core::{BranchFile, Hunk, VirtualBranch};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use sha1::{Digest, Sha1};
use similar::{ChangeTag, TextDiff};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::event::AppEvent;
use crate::git::types::{
    DiffMode, FileSummary, GitRequest, GitResultPayload, OwnedDiffHunk, OwnedDiffLine,
};

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Entry point for the background thread that owns the git Repository.
///
/// Opens the Repository at `path` and loops over incoming `GitRequest` messages
/// until the channel is closed (sender dropped). Results are sent back via `event_tx`
/// as `AppEvent::GitResult`. `base_branch` is the ref compared against HEAD in
/// `DiffMode::BranchComparison`.
pub fn git_worker_loop(
    path: String,
    base_branch: String,
    rx: Receiver<GitRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    // Eagerly initialize LazyLock statics to avoid first-request latency.
    let _ = &*PS;
    let _ = &*TS;

    let repo = match Repository::open(&path) {
        Ok(r) => r,
        Err(e) => {
            warn!(path = %path, error = %e, "cannot open repository");
            // Answer every request so the UI can show the error for its mode.
            for request in rx {
                let payload = GitResultPayload::failed(request.mode(), e.message().to_owned());
                if event_tx.send(AppEvent::GitResult(Box::new(payload))).is_err() {
                    break;
                }
            }
            return;
        }
    };

    for request in rx {
        let payload = handle_request(&repo, &base_branch, &request);
        if event_tx.send(AppEvent::GitResult(Box::new(payload))).is_err() {
            break;
        }
    }
    debug!("git worker exiting");
}

/// Dispatches a GitRequest and returns the payload.
///
/// On git2 errors, returns an empty payload for graceful degradation.
fn handle_request(repo: &Repository, base_branch: &str, request: &GitRequest) -> GitResultPayload {
    match diff_payload(repo, base_branch, request) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(?request, error = %e, "diff failed");
            GitResultPayload::failed(request.mode(), e.message().to_owned())
        }
    }
}

/// Runs the diff described by `request` and converts it into a payload.
pub fn diff_payload(
    repo: &Repository,
    base_branch: &str,
    request: &GitRequest,
) -> Result<GitResultPayload, git2::Error> {
    let diff = match request {
        GitRequest::LoadDiff(mode) => get_diff_for_mode(repo, *mode, base_branch)?,
        GitRequest::LoadDiffRange { from, to } => get_diff_for_range(repo, from, to)?,
    };
    let payload = process_diff(request.mode(), &diff)?;
    debug!(
        mode = payload.mode.label(),
        files = payload.files.len(),
        hunks = payload.hunk_keys.len(),
        "diff loaded"
    );
    Ok(payload)
}

/// Returns the tree HEAD points at, or `None` on an unborn branch.
fn head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, git2::Error> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_tree()?)),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Obtains a git2::Diff for simple diff modes (Worktree, Staged, BranchComparison).
fn get_diff_for_mode<'a>(
    repo: &'a Repository,
    mode: DiffMode,
    base_branch: &str,
) -> Result<Diff<'a>, git2::Error> {
    match mode {
        DiffMode::Worktree => {
            let head = head_tree(repo)?;
            let mut opts = DiffOptions::new();
            opts.include_untracked(true)
                .recurse_untracked_dirs(true)
                .show_untracked_content(true);
            repo.diff_tree_to_workdir_with_index(head.as_ref(), Some(&mut opts))
        }
        DiffMode::Staged => {
            let head = head_tree(repo)?;
            let mut opts = DiffOptions::new();
            repo.diff_tree_to_index(head.as_ref(), None, Some(&mut opts))
        }
        DiffMode::BranchComparison => {
            let base_tree = repo.revparse_single(base_branch)?.peel_to_commit()?.tree()?;
            let head_tree = repo.head()?.peel_to_commit()?.tree()?;
            let mut opts = DiffOptions::new();
            repo.diff_tree_to_tree(Some(&base_tree), Some(&head_tree), Some(&mut opts))
        }
        DiffMode::CommitRange => {
            // CommitRange requires explicit refs; LoadDiff(CommitRange) is a no-op.
            Err(git2::Error::from_str("CommitRange requires LoadDiffRange"))
        }
    }
}

/// Resolves two ref strings to trees and diffs them.
fn get_diff_for_range<'a>(
    repo: &'a Repository,
    from: &str,
    to: &str,
) -> Result<Diff<'a>, git2::Error> {
    let old_tree = repo.revparse_single(from)?.peel_to_commit()?.tree()?;
    let new_tree = repo.revparse_single(to)?.peel_to_commit()?.tree()?;
    let mut opts = DiffOptions::new();
    repo.diff_tree_to_tree(Some(&old_tree), Some(&new_tree), Some(&mut opts))
}

/// Extracts files + hunks from a Diff, derives the branch snapshot and
/// builds highlighted lines.
fn process_diff(mode: DiffMode, diff: &Diff<'_>) -> Result<GitResultPayload, git2::Error> {
    let (files, hunks) = extract_diff(diff)?;
    let branch = build_branch(mode, &files, &hunks);
    let hunk_keys = hunks
        .iter()
        .map(|h| (files[h.file_index].path.clone(), h.id()))
        .collect();
    let (highlighted_lines, hunk_offsets, file_line_offsets) = highlight_diff(&files, &hunks);

    Ok(GitResultPayload {
        mode,
        branch,
        files,
        highlighted_lines,
        hunk_offsets,
        hunk_keys,
        file_line_offsets,
        error: None,
    })
}

/// Walks the diff once, collecting per-file summaries and owned hunks.
///
/// RefCell allows the three closures to share mutable access to the same
/// vectors. git2 calls them sequentially on this thread, so the borrows
/// never overlap. The file callback fires before any of that file's hunks,
/// so `last_mut()` always refers to the current file or hunk.
///
/// A walk that stops early is an error: a partial snapshot would make the
/// ownership tracker forget the missing hunks.
fn extract_diff(diff: &Diff<'_>) -> Result<(Vec<FileSummary>, Vec<OwnedDiffHunk>), git2::Error> {
    let files: RefCell<Vec<FileSummary>> = RefCell::new(Vec::new());
    let hunks: RefCell<Vec<OwnedDiffHunk>> = RefCell::new(Vec::new());

    diff.foreach(
        &mut |delta, _progress| {
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .unwrap_or(std::path::Path::new("unknown"))
                .to_string_lossy()
                .into_owned();
            let status = match delta.status() {
                Delta::Added | Delta::Untracked => 'A',
                Delta::Deleted => 'D',
                Delta::Renamed => 'R',
                _ => 'M',
            };
            files.borrow_mut().push(FileSummary { path, status, added: 0, removed: 0 });
            true
        },
        None,
        Some(&mut |_delta, hunk| {
            let file_index = files.borrow().len().saturating_sub(1);
            hunks.borrow_mut().push(OwnedDiffHunk {
                file_index,
                header: String::from_utf8_lossy(hunk.header()).into_owned(),
                new_start: hunk.new_start(),
                new_lines: hunk.new_lines(),
                lines: Vec::new(),
            });
            true
        }),
        Some(&mut |_delta, _hunk, line| {
            let origin = line.origin();
            if let Some(f) = files.borrow_mut().last_mut() {
                match origin {
                    '+' => f.added += 1,
                    '-' => f.removed += 1,
                    _ => {}
                }
            }
            let content = String::from_utf8_lossy(line.content()).into_owned();
            if let Some(h) = hunks.borrow_mut().last_mut() {
                h.lines.push(OwnedDiffLine { origin, content });
            }
            true
        }),
    )?;

    Ok((files.into_inner(), hunks.into_inner()))
}

/// SHA-1 over every line's origin and content, as lowercase hex.
fn hunk_hash(hunk: &OwnedDiffHunk) -> String {
    let mut hasher = Sha1::new();
    for line in &hunk.lines {
        let mut origin = [0u8; 4];
        hasher.update(line.origin.encode_utf8(&mut origin).as_bytes());
        hasher.update(line.content.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// Converts the extracted diff into a branch snapshot.
///
/// Historical modes produce range-based hunks; the others identity-based ones.
/// Files without hunks are left out.
fn build_branch(mode: DiffMode, files: &[FileSummary], hunks: &[OwnedDiffHunk]) -> VirtualBranch {
    let mut branch_files: Vec<BranchFile> = Vec::new();
    for (index, summary) in files.iter().enumerate() {
        let file_hunks: Vec<Hunk> = hunks
            .iter()
            .filter(|h| h.file_index == index)
            .map(|h| {
                let hash = hunk_hash(h);
                if mode.is_historical() {
                    Hunk::remote(h.new_start, h.new_lines, hash)
                } else {
                    Hunk::local(h.id(), hash)
                }
            })
            .collect();
        if !file_hunks.is_empty() {
            branch_files.push(BranchFile::new(summary.path.clone(), file_hunks));
        }
    }
    VirtualBranch::new(mode.label().to_lowercase(), branch_files)
}

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    use syntect::highlighting::Color as SC;
    let to_color = |c: SC| -> Option<Color> {
        if c.a > 0 { Some(Color::Rgb(c.r, c.g, c.b)) } else { None }
    };
    let mut ratatui_style = Style::default();
    if let Some(fg) = to_color(style.foreground) {
        ratatui_style = ratatui_style.fg(fg);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

/// Builds syntect-highlighted spans for a single line of code.
///
/// Falls back to a plain unstyled span on error.
fn build_syntect_spans(
    code: &str,
    h: &mut HighlightLines,
    ps: &SyntaxSet,
) -> Vec<Span<'static>> {
    let ranges = h.highlight_line(code, ps).unwrap_or_default();
    let spans: Vec<Span<'static>> =
        ranges.into_iter().map(|(style, text)| syntect_to_span(style, text)).collect();
    if spans.is_empty() {
        vec![Span::raw(code.to_owned())]
    } else {
        spans
    }
}

/// Computes word-level diff spans for a removed/added line pair.
///
/// Changed words are rendered bold; unchanged words use the base diff color.
fn word_diff_spans(
    old_line: &str,
    new_line: &str,
) -> (Vec<Span<'static>>, Vec<Span<'static>>) {
    let diff = TextDiff::from_words(old_line, new_line);
    let mut old_spans: Vec<Span<'static>> = Vec::new();
    let mut new_spans: Vec<Span<'static>> = Vec::new();

    for op in diff.ops() {
        for change in diff.iter_inline_changes(op) {
            for (emphasized, value) in change.iter_strings_lossy() {
                let text = value.into_owned();
                let emphasis =
                    if emphasized { Modifier::BOLD } else { Modifier::empty() };
                match change.tag() {
                    ChangeTag::Delete => old_spans.push(Span::styled(
                        text,
                        Style::default().fg(Color::Red).add_modifier(emphasis),
                    )),
                    ChangeTag::Insert => new_spans.push(Span::styled(
                        text,
                        Style::default().fg(Color::Green).add_modifier(emphasis),
                    )),
                    ChangeTag::Equal => {
                        let span =
                            Span::styled(text.clone(), Style::default().fg(Color::DarkGray));
                        old_spans.push(span.clone());
                        new_spans.push(span);
                    }
                }
            }
        }
    }
    (old_spans, new_spans)
}

/// Renders every file header and hunk into highlighted ratatui Lines.
///
/// Returns the lines, the hunk-header offsets (parallel to `hunks`) and the
/// file-header offsets (parallel to `files`).
fn highlight_diff(
    files: &[FileSummary],
    hunks: &[OwnedDiffHunk],
) -> (Vec<Line<'static>>, Vec<usize>, Vec<usize>) {
    let theme = TS.themes.get("base16-ocean.dark").or_else(|| TS.themes.values().next());

    let mut highlighted_lines: Vec<Line<'static>> = Vec::new();
    let mut hunk_offsets: Vec<usize> = Vec::with_capacity(hunks.len());
    let mut file_line_offsets: Vec<usize> = Vec::with_capacity(files.len());
    let mut remaining = hunks.iter().peekable();

    for (index, file) in files.iter().enumerate() {
        file_line_offsets.push(highlighted_lines.len());
        highlighted_lines.push(Line::from(Span::styled(
            format!("{} {}", file.status, file.path),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));

        let syntax = PS
            .find_syntax_by_extension(file_ext(&file.path))
            .unwrap_or_else(|| PS.find_syntax_plain_text());

        while let Some(hunk) = remaining.next_if(|h| h.file_index == index) {
            hunk_offsets.push(highlighted_lines.len());
            highlighted_lines.push(Line::from(Span::styled(
                hunk.header.trim_end().to_owned(),
                Style::default().fg(Color::Cyan),
            )));

            // Fresh highlighter per hunk for simplicity (safe, predictable state).
            match theme {
                Some(t) => {
                    let mut h = HighlightLines::new(syntax, t);
                    emit_highlighted_hunk_lines(&hunk.lines, &mut h, &mut highlighted_lines);
                }
                None => emit_plain_hunk_lines(&hunk.lines, &mut highlighted_lines),
            }
        }
    }

    (highlighted_lines, hunk_offsets, file_line_offsets)
}

/// Emits syntax-highlighted lines for one hunk, pairing each removed line
/// with the following added line for word-level emphasis.
fn emit_highlighted_hunk_lines(
    lines: &[OwnedDiffLine],
    h: &mut HighlightLines,
    out: &mut Vec<Line<'static>>,
) {
    let mut pending_removed: Option<(String, Vec<Span<'static>>)> = None;

    for dl in lines {
        let code = dl.content.trim_end_matches('\n');
        let base_spans = build_syntect_spans(code, h, &PS);

        match dl.origin {
            '-' => {
                if let Some((_, spans)) = pending_removed.take() {
                    out.push(Line::from(spans));
                }
                let mut s = vec![Span::styled("- ", Style::default().fg(Color::Red))];
                s.extend(base_spans);
                pending_removed = Some((code.to_owned(), s));
            }
            '+' => {
                let mut new_s = vec![Span::styled("+ ", Style::default().fg(Color::Green))];
                if let Some((old_code, _)) = pending_removed.take() {
                    let (old_word, new_word) = word_diff_spans(&old_code, code);
                    let mut old_s = vec![Span::styled("- ", Style::default().fg(Color::Red))];
                    old_s.extend(old_word);
                    out.push(Line::from(old_s));
                    new_s.extend(new_word);
                } else {
                    new_s.extend(base_spans);
                }
                out.push(Line::from(new_s));
            }
            origin => {
                if let Some((_, spans)) = pending_removed.take() {
                    out.push(Line::from(spans));
                }
                let prefix = format!("{origin} ");
                let mut s = vec![Span::styled(prefix, Style::default().fg(Color::DarkGray))];
                s.extend(base_spans);
                out.push(Line::from(s));
            }
        }
    }
    // Flush any trailing unpaired removed line.
    if let Some((_, spans)) = pending_removed.take() {
        out.push(Line::from(spans));
    }
}

/// Emits plain (non-syntect) lines for a hunk when no theme is available.
fn emit_plain_hunk_lines(lines: &[OwnedDiffLine], out: &mut Vec<Line<'static>>) {
    for dl in lines {
        let color = match dl.origin {
            '+' => Color::Green,
            '-' => Color::Red,
            _ => Color::DarkGray,
        };
        let text = format!("{} {}", dl.origin, dl.content.trim_end_matches('\n'));
        out.push(Line::from(vec![Span::styled(text, Style::default().fg(color))]));
    }
}

/// Extracts the file extension from a repository-relative path.
///
/// Returns "txt" if the path has no extension.
fn file_ext(path: &str) -> &str {
    path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn numbered_lines(count: usize) -> String {
        (1..=count).map(|n| format!("line {n}\n")).collect()
    }

    fn commit_all(repo: &Repository, message: &str) {
        let mut index = repo.index().unwrap();
        index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git2::Signature::now("hunkpick", "hunkpick@example.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents).unwrap();
    }

    fn edit_lines(root: &Path, edits: &[(usize, &str)]) {
        let mut lines: Vec<String> = numbered_lines(20).lines().map(str::to_owned).collect();
        for (n, text) in edits {
            lines[n - 1] = (*text).to_owned();
        }
        fs::write(root.join("a.txt"), lines.join("\n") + "\n").unwrap();
    }

    fn repo_with_history() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), numbered_lines(20)).unwrap();
        commit_all(&repo, "initial");
        (dir, repo)
    }

    #[test]
    fn worktree_hunks_have_stable_identity() {
        let (dir, repo) = repo_with_history();
        edit_lines(dir.path(), &[(2, "changed two"), (18, "changed eighteen")]);

        let request = GitRequest::LoadDiff(DiffMode::Worktree);
        let first = diff_payload(&repo, "main", &request).unwrap();
        assert_eq!(first.branch.files.len(), 1);
        assert_eq!(first.branch.files[0].path, "a.txt");
        assert_eq!(first.branch.files[0].hunks.len(), 2);
        assert!(first.branch.files[0].hunks.iter().all(|h| matches!(h, Hunk::Local(_))));
        assert_eq!(first.hunk_offsets.len(), 2);
        assert_eq!(first.hunk_keys[0].0, "a.txt");
        assert_eq!(first.files[0].added, 2);
        assert_eq!(first.files[0].removed, 2);

        let again = diff_payload(&repo, "main", &request).unwrap();
        assert_eq!(again.branch, first.branch, "unchanged worktree reloads identically");

        // Rewording line 18 keeps both ranges but changes the second hash.
        edit_lines(dir.path(), &[(2, "changed two"), (18, "reworded eighteen")]);
        let edited = diff_payload(&repo, "main", &request).unwrap();
        let (old, new) = (&first.branch.files[0].hunks, &edited.branch.files[0].hunks);
        assert_eq!(new[0], old[0]);
        assert_eq!(new[1].id(), old[1].id());
        assert_ne!(new[1].hash(), old[1].hash());
    }

    #[test]
    fn untracked_files_show_up_in_worktree_mode() {
        let (dir, repo) = repo_with_history();
        fs::write(dir.path().join("new.rs"), "fn main() {}\n").unwrap();

        let payload = diff_payload(&repo, "main", &GitRequest::LoadDiff(DiffMode::Worktree)).unwrap();
        let paths: Vec<&str> = payload.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["new.rs"]);
        assert_eq!(payload.files[0].status, 'A');
        assert_eq!(payload.branch.files[0].hunks[0].id(), "1-2");
    }

    #[test]
    fn staged_mode_only_sees_the_index() {
        let (dir, repo) = repo_with_history();
        edit_lines(dir.path(), &[(2, "staged change")]);
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("a.txt")).unwrap();
        index.write().unwrap();
        edit_lines(dir.path(), &[(2, "staged change"), (18, "unstaged change")]);

        let staged = diff_payload(&repo, "main", &GitRequest::LoadDiff(DiffMode::Staged)).unwrap();
        assert_eq!(staged.branch.hunk_count(), 1);
        let worktree = diff_payload(&repo, "main", &GitRequest::LoadDiff(DiffMode::Worktree)).unwrap();
        assert_eq!(worktree.branch.hunk_count(), 2);
    }

    #[test]
    fn commit_range_yields_range_based_hunks() {
        let (dir, repo) = repo_with_history();
        edit_lines(dir.path(), &[(10, "committed change")]);
        commit_all(&repo, "second");

        let request = GitRequest::LoadDiffRange { from: "HEAD~1".to_owned(), to: "HEAD".to_owned() };
        let payload = diff_payload(&repo, "main", &request).unwrap();
        assert_eq!(payload.mode, DiffMode::CommitRange);
        let remote = payload.branch.remote_files();
        assert_eq!(remote.len(), 1);
        assert_eq!(remote[0].hunks.len(), 1);
        assert_eq!(remote[0].hunks[0].range(), payload.hunk_keys[0].1);
    }

    #[test]
    fn unknown_ref_degrades_to_failed_payload() {
        let (_dir, repo) = repo_with_history();
        let request = GitRequest::LoadDiffRange { from: "nope".to_owned(), to: "HEAD".to_owned() };
        let payload = handle_request(&repo, "main", &request);
        assert!(payload.error.is_some());
        assert!(payload.branch.files.is_empty());
        assert_eq!(payload.mode, DiffMode::CommitRange);
    }

    #[test]
    fn unopenable_repository_answers_each_request_in_its_mode() {
        let dir = tempfile::TempDir::new().unwrap();
        let (request_tx, request_rx) = crossbeam_channel::unbounded();
        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
        request_tx.send(GitRequest::LoadDiff(DiffMode::Staged)).unwrap();
        drop(request_tx);

        let missing = dir.path().join("missing").to_string_lossy().into_owned();
        git_worker_loop(missing, "main".to_owned(), request_rx, event_tx);

        match event_rx.try_recv().unwrap() {
            AppEvent::GitResult(payload) => {
                assert_eq!(payload.mode, DiffMode::Staged);
                assert!(payload.error.is_some());
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(event_rx.try_recv().is_err());
    }

    #[test]
    fn extract_diff_returns_every_hunk() {
        let (dir, repo) = repo_with_history();
        edit_lines(dir.path(), &[(2, "two"), (18, "eighteen")]);
        let diff = get_diff_for_mode(&repo, DiffMode::Worktree, "main").unwrap();
        let (files, hunks) = extract_diff(&diff).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(hunks.len(), 2);
        assert!(hunks.iter().all(|h| h.file_index == 0 && !h.lines.is_empty()));
    }

    #[test]
    fn file_ext_falls_back_to_txt() {
        assert_eq!(file_ext("src/main.rs"), "rs");
        assert_eq!(file_ext("Makefile"), "txt");
    }
}
