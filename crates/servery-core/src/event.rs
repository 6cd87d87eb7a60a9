//! Order events and the subscriber fan-out.
//!
//! The [`OrderService`](crate::service::OrderService) emits an event only
//! after the state change it describes has committed. Subscribers register
//! per [`EventKind`] and are called synchronously in registration order.

use crate::customer::OrderKind;
use crate::id::TableNumber;
use crate::money::Amount;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// Something that happened to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEvent {
    Placed {
        kind: OrderKind,
        name: String,
        table: Option<TableNumber>,
    },
    Served {
        kind: OrderKind,
        name: String,
        item: String,
        quantity: u32,
        bill: Amount,
    },
}

/// Discriminant tag for event types, used for subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Placed,
    Served,
}

const EVENT_KIND_COUNT: usize = 2;

impl OrderEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            OrderEvent::Placed { .. } => EventKind::Placed,
            OrderEvent::Served { .. } => EventKind::Served,
        }
    }
}

impl EventKind {
    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for OrderEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderEvent::Placed {
                kind,
                name,
                table: Some(table),
            } => write!(f, "{kind} order placed for {name} at table {table}"),
            OrderEvent::Placed { kind, name, .. } => write!(f, "{kind} order placed for {name}"),
            OrderEvent::Served { kind, name, .. } => write!(f, "{kind} order served: {name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// A subscriber receives events read-only.
pub type Subscriber = Box<dyn FnMut(&OrderEvent)>;

/// Subscriber lists indexed by event kind.
#[derive(Default)]
pub struct Notifier {
    subscribers: [Vec<Subscriber>; EVENT_KIND_COUNT],
    delivered: u64,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("placed_subscribers", &self.subscribers[0].len())
            .field("served_subscribers", &self.subscribers[1].len())
            .field("delivered", &self.delivered)
            .finish()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, subscriber: Subscriber) {
        self.subscribers[kind.index()].push(subscriber);
    }

    /// Deliver to every subscriber of the event's kind.
    pub fn notify(&mut self, event: &OrderEvent) {
        for subscriber in &mut self.subscribers[event.kind().index()] {
            subscriber(event);
            self.delivered += 1;
        }
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers[kind.index()].len()
    }

    /// Total subscriber calls made so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::f64_to_amount;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn served(name: &str) -> OrderEvent {
        OrderEvent::Served {
            kind: OrderKind::TakeAway,
            name: name.into(),
            item: "Burger".into(),
            quantity: 2,
            bill: f64_to_amount(500.0),
        }
    }

    #[test]
    fn display_matches_notification_wording() {
        assert_eq!(served("Bob").to_string(), "TakeAway order served: Bob");
        let placed = OrderEvent::Placed {
            kind: OrderKind::DineIn,
            name: "Dave".into(),
            table: Some(TableNumber(5)),
        };
        assert_eq!(placed.to_string(), "DineIn order placed for Dave at table 5");
        let placed = OrderEvent::Placed {
            kind: OrderKind::TakeAway,
            name: "Alice".into(),
            table: None,
        };
        assert_eq!(placed.to_string(), "TakeAway order placed for Alice");
    }

    #[test]
    fn subscribers_called_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();
        for tag in ["analytics", "notification"] {
            let log = Rc::clone(&log);
            notifier.subscribe(
                EventKind::Served,
                Box::new(move |e| log.borrow_mut().push(format!("[{tag}] {e}"))),
            );
        }

        notifier.notify(&served("Bob"));
        assert_eq!(
            *log.borrow(),
            vec![
                "[analytics] TakeAway order served: Bob".to_string(),
                "[notification] TakeAway order served: Bob".to_string(),
            ]
        );
        assert_eq!(notifier.delivered(), 2);
    }

    #[test]
    fn subscribers_only_see_their_kind() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = Notifier::new();
        let c = Rc::clone(&count);
        notifier.subscribe(EventKind::Placed, Box::new(move |_| *c.borrow_mut() += 1));

        notifier.notify(&served("Bob"));
        assert_eq!(*count.borrow(), 0);
        assert_eq!(notifier.subscriber_count(EventKind::Placed), 1);
        assert_eq!(notifier.subscriber_count(EventKind::Served), 0);
    }
}
