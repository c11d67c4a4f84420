//! # rulekit-core
//!
//! Pieces shared by every rulekit crate:
//!
//! - **Logging**: [`logging::init_subscriber`] installs the stderr `tracing` subscriber
//! - **Workspace**: [`workspace::WorkspaceRoots`] abstracts the host editor's
//!   list of open workspace folders

#![deny(unsafe_code)]

pub mod logging;
pub mod workspace;

pub use workspace::{StaticWorkspace, WorkspaceRoots, primary_root};
