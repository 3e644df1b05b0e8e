//! Control-plane provisioning API models
//!
//! Request and response shapes shared by the provisioner's HTTP client.

pub mod models;
