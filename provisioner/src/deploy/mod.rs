//! Deployment module

pub mod assets;
pub mod builder;
pub mod orchestrator;
