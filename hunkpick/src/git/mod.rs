//! Git integration for hunkpick.
//!
//! A dedicated `std::thread` owns the `git2::Repository` for its lifetime and
//! answers `GitRequest`s with `GitResultPayload`s over channels. Repository is
//! `!Sync`, so it never leaves that thread.
pub mod types;
pub mod worker;
