//! Serde data file structs for menus.
//!
//! The same shape is used for every format:
//!
//! ```toml
//! [[items]]
//! name = "Burger"
//! price = 250
//! ```

use serde::Deserialize;

/// A whole menu file.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuData {
    pub items: Vec<MenuItemData>,
}

/// One dish. Prices are read as floats and converted to fixed-point once,
/// when the menu is built.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemData {
    pub name: String,
    pub price: f64,
}
