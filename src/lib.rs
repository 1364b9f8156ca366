//! Circular-orbit solar system toy: the shared core behind the desktop viewer
//! and the position server.

pub mod cfg;
pub mod interaction;
pub mod logging;
pub mod server;
pub mod sim;
pub mod units;
