//! Servery Core -- the in-memory order lifecycle engine.
//!
//! Orders enter through one of two intake queues and, once served, are
//! archived in a name-indexed AVL tree. The [`service::OrderService`] facade
//! is the only entry point callers need.
//!
//! # Order Lifecycle
//!
//! 1. **Place** -- price the order from the [`menu::Menu`] and enqueue it.
//!    Takeaway orders are kept sorted by descending customer age; dine-in
//!    orders are first come, first served.
//! 2. **Serve** -- dequeue the head order, record it in the
//!    [`served::ServedIndex`] and add its bill to the earnings total.
//! 3. **Query** -- pending bill, total earnings, served orders in name order,
//!    and lookup by name.
//!
//! For every reachable state, pending bills plus served bills equal the bills
//! of every order ever placed.
//!
//! # Key Types
//!
//! - [`service::OrderService`] -- Facade over queues, index and earnings.
//! - [`take_away::TakeAwayQueue`] -- Age-ordered linked list in a slot arena.
//! - [`dine_in::DineInQueue`] -- FIFO linked list in a slot arena.
//! - [`served::ServedIndex`] -- AVL tree keyed by customer name.
//! - [`money::Amount`] -- Q32.32 fixed-point money.
//! - [`event::Notifier`] -- Subscriber fan-out for committed events.
//! - [`journal::Journal`] -- Injected append-only log sink.

pub mod customer;
pub mod dine_in;
pub mod error;
pub mod event;
pub mod id;
pub mod journal;
pub mod menu;
pub mod money;
pub mod role;
pub mod served;
pub mod service;
pub mod take_away;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
