//! Reporting and maintenance tools for a Google Drive folder tree.
//!
//! The crate talks to the Drive v3 REST API through the [`drive::DriveClient`]
//! trait and builds three operations on top of it: counting the children of a
//! folder (shallow or recursive), copying a folder's full contents into a
//! destination folder, and comparing two folder trees for structural parity.

pub mod auth;
pub mod commands;
pub mod drive;
pub mod error;
pub mod retry;
pub mod walk;

pub use error::DriveError;
