use crate::error::OrderError;
use crate::id::MenuIndex;
use crate::money::{Amount, f64_to_amount};
use std::collections::HashSet;

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub name: String,
    pub price: Amount,
}

/// Builder for an immutable [`Menu`]. Items are numbered from 1 in the
/// order they are added.
#[derive(Debug, Default)]
pub struct MenuBuilder {
    items: Vec<MenuItem>,
}

impl MenuBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Returns the index it will have on the built menu.
    pub fn add(&mut self, name: &str, price: Amount) -> MenuIndex {
        self.items.push(MenuItem {
            name: name.to_string(),
            price,
        });
        MenuIndex(self.items.len())
    }

    /// Finalize. Rejects an empty menu, repeated names and negative prices.
    pub fn build(self) -> Result<Menu, MenuError> {
        if self.items.is_empty() {
            return Err(MenuError::Empty);
        }
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.name.as_str()) {
                return Err(MenuError::DuplicateItem(item.name.clone()));
            }
            if item.price < Amount::ZERO {
                return Err(MenuError::NegativePrice(item.name.clone()));
            }
        }
        Ok(Menu { items: self.items })
    }
}

/// Read-only price list, addressed by 1-based [`MenuIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn builder() -> MenuBuilder {
        MenuBuilder::new()
    }

    /// The house menu the console starts with when no menu file is given.
    pub fn house() -> Self {
        let items = [
            ("Burger", 250.0),
            ("Pasta", 450.0),
            ("Steak", 800.0),
            ("Pizza", 600.0),
            ("Lassi", 150.0),
        ];
        Self {
            items: items
                .iter()
                .map(|(name, price)| MenuItem {
                    name: name.to_string(),
                    price: f64_to_amount(*price),
                })
                .collect(),
        }
    }

    /// Look up an item. Valid indices are `1..=len()`.
    pub fn item(&self, index: MenuIndex) -> Result<&MenuItem, OrderError> {
        index
            .0
            .checked_sub(1)
            .and_then(|slot| self.items.get(slot))
            .ok_or(OrderError::InvalidIndex {
                index,
                len: self.items.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items with their 1-based indices, in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (MenuIndex, &MenuItem)> {
        self.items
            .iter()
            .enumerate()
            .map(|(slot, item)| (MenuIndex(slot + 1), item))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    #[error("menu has no items")]
    Empty,
    #[error("duplicate menu item: {0}")]
    DuplicateItem(String),
    #[error("negative price for menu item: {0}")]
    NegativePrice(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_menu_prices() {
        let menu = Menu::house();
        assert_eq!(menu.len(), 5);
        let burger = menu.item(MenuIndex(1)).unwrap();
        assert_eq!(burger.name, "Burger");
        assert_eq!(burger.price, f64_to_amount(250.0));
        assert_eq!(menu.item(MenuIndex(5)).unwrap().name, "Lassi");
    }

    #[test]
    fn index_zero_is_invalid() {
        let menu = Menu::house();
        assert_eq!(
            menu.item(MenuIndex(0)),
            Err(OrderError::InvalidIndex {
                index: MenuIndex(0),
                len: 5
            })
        );
    }

    #[test]
    fn index_past_end_is_invalid() {
        let menu = Menu::house();
        assert!(menu.item(MenuIndex(6)).is_err());
    }

    #[test]
    fn builder_numbers_from_one() {
        let mut b = Menu::builder();
        assert_eq!(b.add("Tea", f64_to_amount(20.0)), MenuIndex(1));
        assert_eq!(b.add("Coffee", f64_to_amount(35.0)), MenuIndex(2));
        let menu = b.build().unwrap();
        let names: Vec<_> = menu.iter().map(|(i, item)| (i.0, item.name.clone())).collect();
        assert_eq!(names, vec![(1, "Tea".to_string()), (2, "Coffee".to_string())]);
    }

    #[test]
    fn builder_rejects_empty() {
        assert_eq!(Menu::builder().build(), Err(MenuError::Empty));
    }

    #[test]
    fn builder_rejects_duplicate_names() {
        let mut b = Menu::builder();
        b.add("Tea", f64_to_amount(20.0));
        b.add("Tea", f64_to_amount(25.0));
        assert_eq!(b.build(), Err(MenuError::DuplicateItem("Tea".into())));
    }

    #[test]
    fn builder_rejects_negative_price() {
        let mut b = Menu::builder();
        b.add("Refund", f64_to_amount(-1.0));
        assert_eq!(b.build(), Err(MenuError::NegativePrice("Refund".into())));
    }
}
