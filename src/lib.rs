//! Web-based notebook console for memory forensics sessions.
//!
//! The crate is a thin launcher: it wires a persistent [`worksheet::Worksheet`]
//! and an externally-constructed [`session::Session`] into a web application
//! assembled from a fixed list of notebook [`plugins`], serves the prebuilt
//! frontend bundle under `/rekall-webconsole/`, and runs a blocking
//! WebSocket-capable server loop that opens the user's browser once the
//! listening socket is bound.
//!
//! The notebook execution model itself lives in the frontend and its plugin
//! framework; nothing here interprets cell contents.

pub mod command;
pub mod console;
pub mod error;
pub mod plugins;
pub mod server;
pub mod session;
pub mod worksheet;
