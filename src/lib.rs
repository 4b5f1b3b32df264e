//! Teecraft - Terminal T-Shirt Customizer
//!
//! A TUI application for designing a printed t-shirt: enter measurements and
//! custom text, upload a design and preview it on a themed mockup.

pub mod color_space;
pub mod config;
pub mod form;
pub mod image_loader;
pub mod input;
pub mod logging;
pub mod render_engines;
pub mod shortcuts;
pub mod sink;
pub mod state;
pub mod terminal_capabilities;
pub mod theme;
pub mod ui;
pub mod unicode_handler;
pub mod upload;

// Re-export commonly used types
pub use config::Config;
pub use form::CustomizationData;
pub use state::AppShell;
pub use theme::Theme;
