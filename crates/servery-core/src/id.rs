use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a node in the takeaway queue arena.
    pub struct TakeAwayKey;

    /// Identifies a node in the dine-in queue arena.
    pub struct DineInKey;

    /// Identifies a node in the served-order index arena.
    pub struct ServedKey;
}

/// 1-based position of an item on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MenuIndex(pub usize);

/// Table a dine-in order is served at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableNumber(pub u32);

impl std::fmt::Display for MenuIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for TableNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
