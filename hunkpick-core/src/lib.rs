//! Hunk ownership tracking for virtual branches.
//!
//! - [`types`]: branch snapshots, files and the two hunk shapes
//! - [`ownership`]: claims/selection tracker reconciled across reloads
//! - [`format`]: ownership string encoders and decoders
//! - [`error`]: decoding errors

pub mod error;
pub mod format;
pub mod ownership;
pub mod types;

pub use error::OwnershipError;
pub use ownership::{FileClaims, FileSelection, HunkClaims, SelectedOwnership};
pub use types::{BranchFile, FileId, Hunk, HunkId, LocalHunk, RemoteFile, RemoteHunk, VirtualBranch};
