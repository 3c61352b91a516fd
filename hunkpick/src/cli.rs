//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::git::types::DiffMode;

/// hunkpick - pick hunks from a git diff and print them as an ownership string
#[derive(Debug, Parser)]
#[command(name = "hunkpick")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Repository to open
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Diff to start in (default: range when --from/--to are given, otherwise worktree)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Older ref of the commit range
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Newer ref of the commit range
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Print the full ownership of the diff and exit without starting the UI
    #[arg(long)]
    pub list: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Worktree,
    Staged,
    Branch,
    Range,
}

impl Cli {
    /// `(from, to)` when both refs were given.
    pub fn range(&self) -> Option<(String, String)> {
        self.from.clone().zip(self.to.clone())
    }

    /// The diff mode to load first.
    pub fn initial_mode(&self) -> Result<DiffMode, String> {
        match (self.mode, self.range()) {
            (Some(ModeArg::Worktree), _) => Ok(DiffMode::Worktree),
            (Some(ModeArg::Staged), _) => Ok(DiffMode::Staged),
            (Some(ModeArg::Branch), _) => Ok(DiffMode::BranchComparison),
            (Some(ModeArg::Range), None) => Err("--mode range needs --from and --to".to_owned()),
            (Some(ModeArg::Range), Some(_)) | (None, Some(_)) => Ok(DiffMode::CommitRange),
            (None, None) => Ok(DiffMode::Worktree),
        }
    }
}
