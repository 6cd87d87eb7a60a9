//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::customer::{Customer, OrderKind};
use crate::id::{MenuIndex, TableNumber};
use crate::journal::MemoryJournal;
use crate::menu::Menu;
use crate::money::Amount;
use crate::service::OrderService;

// ===========================================================================
// Money
// ===========================================================================

pub fn amount(v: f64) -> Amount {
    Amount::from_num(v)
}

// ===========================================================================
// House menu indices
// ===========================================================================

pub fn burger() -> MenuIndex {
    MenuIndex(1)
}
pub fn pasta() -> MenuIndex {
    MenuIndex(2)
}
pub fn steak() -> MenuIndex {
    MenuIndex(3)
}
pub fn pizza() -> MenuIndex {
    MenuIndex(4)
}
pub fn lassi() -> MenuIndex {
    MenuIndex(5)
}

// ===========================================================================
// Builders
// ===========================================================================

/// A service on the house menu with a journal handle for inspection.
pub fn house_service() -> (OrderService, MemoryJournal) {
    let journal = MemoryJournal::new();
    let service = OrderService::with_journal(Menu::house(), Box::new(journal.clone()));
    (service, journal)
}

/// A customer with a flat 100 bill, for tests that only care about names and ages.
pub fn customer(name: &str, age: u32) -> Customer {
    Customer::new(name, "Burger", 1, amount(100.0), age)
}

/// Place the orders from the reference scenarios: Alice and Bob takeaway,
/// Dave and Eve dine-in.
pub fn place_reference_orders(service: &mut OrderService) {
    service
        .place_take_away("Alice", burger(), 2, 30)
        .expect("Alice");
    service.place_take_away("Bob", pasta(), 1, 50).expect("Bob");
    service
        .place_dine_in("Dave", steak(), 1, 40, TableNumber(5))
        .expect("Dave");
    service
        .place_dine_in("Eve", pizza(), 2, 22, TableNumber(2))
        .expect("Eve");
}

/// Sum of bills over served orders.
pub fn served_total(service: &OrderService) -> Amount {
    service
        .served_orders()
        .iter()
        .fold(Amount::ZERO, |acc, r| acc + r.customer.bill())
}

/// Names of served orders of one kind, ascending.
pub fn served_names(service: &OrderService, kind: OrderKind) -> Vec<String> {
    service
        .served_orders()
        .into_iter()
        .filter(|r| r.kind == kind)
        .map(|r| r.customer.name().to_string())
        .collect()
}
