//! Menu data files for Servery.
//!
//! A menu is read from `menu.ron`, `menu.toml` or `menu.json` (format picked
//! by extension), validated, and turned into an immutable
//! [`Menu`](servery_core::menu::Menu).

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, load_menu, load_menu_from};
