//! UI layer for desktop GUI: app shell, panels, theme, and layout primitives.

pub mod app;
pub mod layout;
pub mod panels;
pub mod theme;

pub use app::{AppPaths, DesktopGuiApp, StartupConfig};
