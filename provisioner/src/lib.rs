//! SDC Provisioner Library
//!
//! Core modules for creating SDC deployments on the control plane.

pub mod app;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod storage;
pub mod template;
pub mod utils;
