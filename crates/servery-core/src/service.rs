//! The order service facade.
//!
//! Owns the menu, both intake queues, the served-order index and the running
//! earnings total. Every public operation either commits completely or
//! returns an [`OrderError`] with no state changed. Journal lines and
//! subscriber notifications are emitted only after a commit.

use crate::customer::{Customer, DineInOrder, OrderKind, ServedRecord};
use crate::dine_in::DineInQueue;
use crate::error::OrderError;
use crate::event::{EventKind, Notifier, OrderEvent, Subscriber};
use crate::id::{MenuIndex, TableNumber};
use crate::journal::{Journal, TracingJournal};
use crate::menu::Menu;
use crate::money::{self, Amount};
use crate::served::ServedIndex;
use crate::take_away::TakeAwayQueue;
use tracing::debug;

pub struct OrderService {
    menu: Menu,
    take_away: TakeAwayQueue,
    dine_in: DineInQueue,
    served: ServedIndex,
    total_earnings: Amount,
    discarded_total: Amount,
    journal: Box<dyn Journal>,
    notifier: Notifier,
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService")
            .field("menu", &self.menu)
            .field("take_away", &self.take_away)
            .field("dine_in", &self.dine_in)
            .field("served", &self.served)
            .field("total_earnings", &self.total_earnings)
            .field("discarded_total", &self.discarded_total)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

impl OrderService {
    /// A service journaling through `tracing`.
    pub fn new(menu: Menu) -> Self {
        Self::with_journal(menu, Box::new(TracingJournal))
    }

    pub fn with_journal(menu: Menu, journal: Box<dyn Journal>) -> Self {
        journal.record("System Started");
        Self {
            menu,
            take_away: TakeAwayQueue::new(),
            dine_in: DineInQueue::new(),
            served: ServedIndex::new(),
            total_earnings: Amount::ZERO,
            discarded_total: Amount::ZERO,
            journal,
            notifier: Notifier::new(),
        }
    }

    pub fn subscribe(&mut self, kind: EventKind, subscriber: Subscriber) {
        self.notifier.subscribe(kind, subscriber);
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    // -----------------------------------------------------------------------
    // Placement
    // -----------------------------------------------------------------------

    /// Queue a takeaway order. Returns the computed bill.
    pub fn place_take_away(
        &mut self,
        name: &str,
        menu_index: MenuIndex,
        quantity: u32,
        age: u32,
    ) -> Result<Amount, OrderError> {
        let customer = self.price_order(name, menu_index, quantity, age)?;
        let bill = customer.bill();
        self.take_away.place(customer);

        debug!(name, %bill, pending = self.take_away.len(), "takeaway order queued");
        self.commit_placed(OrderKind::TakeAway, name, None);
        Ok(bill)
    }

    /// Queue a dine-in order for `table`. Returns the computed bill.
    pub fn place_dine_in(
        &mut self,
        name: &str,
        menu_index: MenuIndex,
        quantity: u32,
        age: u32,
        table: TableNumber,
    ) -> Result<Amount, OrderError> {
        let customer = self.price_order(name, menu_index, quantity, age)?;
        let bill = customer.bill();
        self.dine_in.place(customer, table);

        debug!(name, %bill, %table, pending = self.dine_in.len(), "dine-in order queued");
        self.commit_placed(OrderKind::DineIn, name, Some(table));
        Ok(bill)
    }

    fn price_order(
        &self,
        name: &str,
        menu_index: MenuIndex,
        quantity: u32,
        age: u32,
    ) -> Result<Customer, OrderError> {
        let item = self.menu.item(menu_index)?;
        if quantity == 0 {
            return Err(OrderError::InvalidField { field: "quantity" });
        }
        if age == 0 {
            return Err(OrderError::InvalidField { field: "age" });
        }
        let bill = money::checked_bill(item.price, quantity).ok_or(OrderError::BillOverflow {
            index: menu_index,
            quantity,
        })?;
        Ok(Customer::new(name, item.name.as_str(), quantity, bill, age))
    }

    fn commit_placed(&mut self, kind: OrderKind, name: &str, table: Option<TableNumber>) {
        let event = OrderEvent::Placed {
            kind,
            name: name.to_string(),
            table,
        };
        self.journal.record(&event.to_string());
        self.notifier.notify(&event);
    }

    // -----------------------------------------------------------------------
    // Serving
    // -----------------------------------------------------------------------

    /// Serve the oldest-customer takeaway order.
    pub fn serve_take_away(&mut self) -> Result<Customer, OrderError> {
        let head = self
            .take_away
            .peek()
            .ok_or(OrderError::EmptyQueue(OrderKind::TakeAway))?;
        self.ensure_unserved(head)?;

        let customer = self.take_away.serve_one()?;
        self.commit_served(customer, OrderKind::TakeAway)
    }

    /// Serve the earliest dine-in order.
    pub fn serve_dine_in(&mut self) -> Result<Customer, OrderError> {
        let head = self
            .dine_in
            .peek()
            .ok_or(OrderError::EmptyQueue(OrderKind::DineIn))?;
        self.ensure_unserved(&head.customer)?;

        let DineInOrder { customer, table } = self.dine_in.serve_one()?;
        debug!(name = customer.name(), %table, "dine-in order leaving table queue");
        self.commit_served(customer, OrderKind::DineIn)
    }

    /// Drain the takeaway queue, then the dine-in queue, calling `on_served`
    /// once per order. Stops at the first error; orders served before it stay
    /// served. Returns how many orders were served.
    pub fn serve_all<F>(&mut self, mut on_served: F) -> Result<usize, OrderError>
    where
        F: FnMut(&Customer),
    {
        let mut count = 0;
        while !self.take_away.is_empty() {
            let customer = self.serve_take_away()?;
            on_served(&customer);
            count += 1;
        }
        while !self.dine_in.is_empty() {
            let customer = self.serve_dine_in()?;
            on_served(&customer);
            count += 1;
        }
        Ok(count)
    }

    /// A name already in the index would be rejected on insert; check before
    /// dequeuing so the order stays at the head of its queue.
    fn ensure_unserved(&self, customer: &Customer) -> Result<(), OrderError> {
        if self.served.contains(customer.name()) {
            return Err(OrderError::DuplicateKey {
                name: customer.name().to_string(),
            });
        }
        Ok(())
    }

    fn commit_served(&mut self, customer: Customer, kind: OrderKind) -> Result<Customer, OrderError> {
        self.served.insert(customer.clone(), kind)?;
        self.total_earnings += customer.bill();

        self.journal
            .record(&format!("{kind} order served for {}", customer.name()));
        self.notifier.notify(&OrderEvent::Served {
            kind,
            name: customer.name().to_string(),
            item: customer.item_name().to_string(),
            quantity: customer.quantity(),
            bill: customer.bill(),
        });
        debug!(
            name = customer.name(),
            %kind,
            earnings = %self.total_earnings,
            "order served"
        );
        Ok(customer)
    }

    // -----------------------------------------------------------------------
    // Discarding
    // -----------------------------------------------------------------------

    /// Remove the head takeaway order without serving it. Clears a head
    /// that [`serve_take_away`](Self::serve_take_away) keeps rejecting as a
    /// duplicate. The bill moves to the discarded total, never to earnings.
    pub fn discard_take_away(&mut self) -> Result<Customer, OrderError> {
        let customer = self.take_away.serve_one()?;
        Ok(self.commit_discarded(customer, OrderKind::TakeAway))
    }

    /// Remove the head dine-in order without serving it.
    pub fn discard_dine_in(&mut self) -> Result<Customer, OrderError> {
        let DineInOrder { customer, table } = self.dine_in.serve_one()?;
        debug!(name = customer.name(), %table, "dine-in order leaving table queue");
        Ok(self.commit_discarded(customer, OrderKind::DineIn))
    }

    fn commit_discarded(&mut self, customer: Customer, kind: OrderKind) -> Customer {
        self.discarded_total += customer.bill();
        self.journal
            .record(&format!("{kind} order discarded for {}", customer.name()));
        debug!(
            name = customer.name(),
            %kind,
            discarded = %self.discarded_total,
            "order discarded"
        );
        customer
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Sum of bills of every order still waiting in either queue.
    pub fn pending_bill(&self) -> Amount {
        self.take_away.pending_total() + self.dine_in.pending_total()
    }

    /// Sum of bills of every order served so far.
    pub fn total_earnings(&self) -> Amount {
        self.total_earnings
    }

    /// Sum of bills of every discarded order. Pending bill, earnings and
    /// this total together account for every order placed.
    pub fn discarded_bill(&self) -> Amount {
        self.discarded_total
    }

    /// Every served order in ascending name order.
    pub fn served_orders(&self) -> Vec<ServedRecord> {
        self.served.in_order().cloned().collect()
    }

    /// Look up a served order by exact name.
    pub fn search_by_name(&self, name: &str) -> Option<&ServedRecord> {
        self.journal
            .record(&format!("Searched for served order: {name}"));
        self.served.find(name)
    }

    /// Pending takeaway orders, next to serve first.
    pub fn pending_take_away(&self) -> impl Iterator<Item = &Customer> + '_ {
        self.take_away.iter()
    }

    /// Pending dine-in orders, next to serve first.
    pub fn pending_dine_in(&self) -> impl Iterator<Item = &DineInOrder> + '_ {
        self.dine_in.iter()
    }

    /// Number of orders waiting in the given queue.
    pub fn pending_count(&self, kind: OrderKind) -> usize {
        match kind {
            OrderKind::TakeAway => self.take_away.len(),
            OrderKind::DineIn => self.dine_in.len(),
        }
    }

    pub fn served_count(&self) -> usize {
        self.served.len()
    }

    /// Read-only access to the index, for structural checks.
    pub fn served_index(&self) -> &ServedIndex {
        &self.served
    }
}

impl Drop for OrderService {
    fn drop(&mut self) {
        let released = self.served.destroy();
        debug!(released, "order service torn down");
        self.journal.record("System Closed");
    }
}

// ===========================================================================
// Tests
// ===========================================================================
