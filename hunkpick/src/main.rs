//! hunkpick — interactive hunk picker for git diffs.
//!
//! Entry point for the `hunkpick` binary. Wires together the terminal lifecycle
//! (`tui`), unified event bus (`event`), renderer (`ui`), theme system (`theme`),
//! the git worker thread (`git`) and the ownership tracker from `hunkpick-core`.
//!
//! # Startup sequence
//!
//! 1. Parse arguments and load the config — read-only, safe before terminal init.
//! 2. Open the repository, then start file logging under `<repo>/.hunkpick/`;
//!    stderr belongs to the TUI.
//! 3. `--list` short-circuits here: one diff, printed, no terminal setup.
//! 4. `install_panic_hook()` — installed first so it is the innermost hook.
//! 5. `register_sigterm()` — returns `Arc<AtomicBool>` polled in the event loop.
//! 6. `init_tui()` — enters alternate screen and enables raw mode.
//! 7. Spawn the event task and the git worker, then request the first diff.
//!
//! `restore_tui()` runs after the event loop exits (quit, commit, SIGTERM, or
//! channel close). The selection is printed to stdout only after the terminal
//! has been restored.

mod app;
mod cli;
mod config;
mod event;
mod git;
mod theme;
mod tui;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::time::Duration;

use clap::Parser;
use git2::Repository;
use hunkpick_core::format::{files_to_ownership, files_to_simple_ownership};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::git::types::{DiffMode, GitRequest};
use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};

/// Opens the repository, then creates `.hunkpick/` in its working directory
/// (the git dir for bare repositories). Nothing is created when `path` is
/// not a repository.
fn open_repository(path: &Path) -> io::Result<(Repository, PathBuf)> {
    let repo = Repository::open(path).map_err(io::Error::other)?;
    let dir = repo.workdir().unwrap_or_else(|| repo.path()).join(".hunkpick");
    std::fs::create_dir_all(&dir)?;
    // Keeps the log out of the worktree diff it would otherwise show up in.
    let ignore = dir.join(".gitignore");
    if !ignore.exists() {
        std::fs::write(&ignore, "*\n")?;
    }
    Ok((repo, dir))
}

/// Starts the file logger at `<dir>/hunkpick.log`.
///
/// `HUNKPICK_LOG` overrides `log_level` from the config. The returned guard
/// flushes buffered lines on drop and must live until exit.
fn init_logging(dir: &Path, log_level: &str) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, "hunkpick.log"));
    let filter = EnvFilter::try_from_env("HUNKPICK_LOG").unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn request_for(mode: DiffMode, range: Option<(String, String)>) -> GitRequest {
    match (mode, range) {
        (DiffMode::CommitRange, Some((from, to))) => GitRequest::LoadDiffRange { from, to },
        (mode, _) => GitRequest::LoadDiff(mode),
    }
}

/// `--list`: prints the full ownership of one diff and exits.
fn list(repo: &Repository, base_branch: &str, request: &GitRequest) -> io::Result<()> {
    let payload = git::worker::diff_payload(repo, base_branch, request).map_err(io::Error::other)?;
    let text = if payload.mode.is_historical() {
        files_to_simple_ownership(&payload.branch.remote_files())
    } else {
        files_to_ownership(&payload.branch.files)
    };
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = cli::Cli::parse();
    let mode = cli.initial_mode().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let range = cli.range();
    let (config, config_warning) = config::Config::load();

    let (repo, log_dir) = open_repository(&cli.repo)?;
    let _log_guard = init_logging(&log_dir, &config.log_level);
    if let Some(warning) = config_warning {
        warn!("{warning}");
    }
    info!(repo = %cli.repo.display(), mode = mode.label(), "hunkpick starting");

    if cli.list {
        return list(&repo, &config.base_branch, &request_for(mode, range));
    }
    // The worker thread opens its own handle.
    drop(repo);

    let theme = theme::Theme::from_name(&config.theme);
    let mut state = app::AppState {
        diff_mode: mode,
        range,
        ..app::AppState::default()
    };

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone(), config.refresh_interval());
    let mut rx = handler.rx;

    // The worker owns the Repository; it exits once `git_tx` is dropped.
    let (git_tx, git_rx) = crossbeam_channel::unbounded();
    let worker_tx = handler.tx.clone();
    let repo_path = cli.repo.to_string_lossy().into_owned();
    let base_branch = config.base_branch.clone();
    std::thread::spawn(move || git::worker::git_worker_loop(repo_path, base_branch, git_rx, worker_tx));
    state.git_tx = Some(git_tx);
    state.request_diff();

    // Exits only via `break` so `restore_tui()` below is always reached.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is checked at least every 50ms even when no
            // other event arrives.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            warn!(error = %e, "draw failed");
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        handle_mouse(mouse, &mut state);
                    }
                    Some(event::AppEvent::GitResult(payload)) => state.apply_git_result(*payload),
                    Some(event::AppEvent::Refresh) => state.refresh(),
                    Some(event::AppEvent::Tick) => state.tick(),
                    // ratatui picks up the new size on the next Render.
                    Some(event::AppEvent::Resize(_, _)) => {}
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;

    if state.commit_requested {
        let (selected, claimed) = state.selection_totals();
        info!(selected, claimed, "printing selection");
        println!("{}", state.selection_text());
    }
    Ok(())
}
