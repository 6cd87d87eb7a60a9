//! The console's two order observers.
//!
//! Observers run inside the service while it holds the session's output
//! borrow, so they write into a shared [`Outbox`] that the session flushes
//! after each command.

use servery_core::event::{EventKind, OrderEvent};
use servery_core::service::OrderService;
use std::cell::RefCell;
use std::rc::Rc;

/// Lines produced by observers, waiting to be printed.
#[derive(Debug, Clone, Default)]
pub struct Outbox(Rc<RefCell<Vec<String>>>);

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, line: String) {
        self.0.borrow_mut().push(line);
    }

    /// Remove and return every pending line.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observer {
    Analytics,
    Notification,
}

impl Observer {
    pub const ALL: [Observer; 2] = [Observer::Analytics, Observer::Notification];

    fn tag(self) -> &'static str {
        match self {
            Observer::Analytics => "Analytics",
            Observer::Notification => "Notification",
        }
    }

    fn render(self, event: &OrderEvent) -> String {
        format!("[{}] {event}", self.tag())
    }
}

/// Subscribe both observers to served-order events, in registration order.
pub fn register(service: &mut OrderService, outbox: &Outbox) {
    for observer in Observer::ALL {
        let outbox = outbox.clone();
        service.subscribe(
            EventKind::Served,
            Box::new(move |event| outbox.push(observer.render(event))),
        );
    }
}
