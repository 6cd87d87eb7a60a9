use crate::id::TableNumber;
use crate::money::Amount;
use serde::{Deserialize, Serialize};

/// Which intake queue an order came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    TakeAway,
    DineIn,
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderKind::TakeAway => write!(f, "TakeAway"),
            OrderKind::DineIn => write!(f, "DineIn"),
        }
    }
}

/// One customer's order. Immutable once created; the bill is fixed at
/// placement time from the menu price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    name: String,
    item_name: String,
    quantity: u32,
    bill: Amount,
    age: u32,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        item_name: impl Into<String>,
        quantity: u32,
        bill: Amount,
        age: u32,
    ) -> Self {
        Self {
            name: name.into(),
            item_name: item_name.into(),
            quantity,
            bill,
            age,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn bill(&self) -> Amount {
        self.bill
    }

    pub fn age(&self) -> u32 {
        self.age
    }
}

/// A pending dine-in order: the customer plus the table it goes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DineInOrder {
    pub customer: Customer,
    pub table: TableNumber,
}

/// An entry of the served-order index: the customer and where the order came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServedRecord {
    pub customer: Customer,
    pub kind: OrderKind,
}

impl ServedRecord {
    pub fn name(&self) -> &str {
        self.customer.name()
    }
}
