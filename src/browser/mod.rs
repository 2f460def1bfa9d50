//! Browser session management
//!
//! Launching or connecting to a Chrome/Chromium instance and driving one
//! page through it: navigation, snapshot capture, and id-addressed actions.

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::PageSession;
