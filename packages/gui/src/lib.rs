//! Widget tree, input dispatch and focus navigation for the game client's
//! menus, drawn through the `graphics` command layer.
//!
//! Everything in here runs on the one GUI thread. Work that can't, such as
//! talking to the hosted-server service, goes through `task` and comes back
//! as a completion drained once per frame.

#[macro_use]
extern crate tracing;

pub mod logging;
pub mod settings;
pub mod session;
pub mod sound;
pub mod util_abort_handle;
pub mod task;
pub mod gui;
