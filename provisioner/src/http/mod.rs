//! Control-plane HTTP access

pub mod client;
pub mod control_plane;
