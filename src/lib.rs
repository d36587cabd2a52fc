//! MediaGallery binary support: configuration, wiring, CLI commands and the
//! dataset server.

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod server;
