//! Background worker that owns network and storage access for the GUI.

pub mod commands;
pub mod runtime;
