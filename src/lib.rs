//! Country browser (cbrowse)
//!
//! TUI application for browsing a remote countries API as a grid of cards,
//! filtered by name, region and timezone and loaded page by page as the
//! selection approaches the end of the list.
//!
//! Follows a Pure Core / Impure Shell split: `model` and `state` never
//! perform I/O; `source` and `view` own the network and the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
