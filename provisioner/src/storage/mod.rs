//! Provisioning inputs

pub mod layout;
pub mod properties;
pub mod settings;
