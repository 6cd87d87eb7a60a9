//! Takeaway intake queue.
//!
//! A singly linked list threaded through a [`SlotMap`] arena. The list is kept
//! sorted by descending customer age: older customers are served first, and
//! customers of equal age keep their arrival order.

use crate::customer::{Customer, OrderKind};
use crate::error::OrderError;
use crate::id::TakeAwayKey;
use crate::money::{self, Amount};
use slotmap::SlotMap;

#[derive(Debug)]
struct TakeAwayNode {
    customer: Customer,
    next: Option<TakeAwayKey>,
}

/// Pending takeaway orders, head = next to serve.
#[derive(Debug, Default)]
pub struct TakeAwayQueue {
    nodes: SlotMap<TakeAwayKey, TakeAwayNode>,
    head: Option<TakeAwayKey>,
}

impl TakeAwayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping the list non-increasing by age. A new customer goes in
    /// front of the head only when strictly older; otherwise it goes after
    /// every queued customer at least as old. O(n).
    pub fn place(&mut self, customer: Customer) {
        let age = customer.age();
        match self.head {
            Some(head) if self.nodes[head].customer.age() >= age => {
                let mut cursor = head;
                while let Some(next) = self.nodes[cursor].next {
                    if self.nodes[next].customer.age() < age {
                        break;
                    }
                    cursor = next;
                }
                let after = self.nodes[cursor].next;
                let key = self.nodes.insert(TakeAwayNode {
                    customer,
                    next: after,
                });
                self.nodes[cursor].next = Some(key);
            }
            _ => {
                let key = self.nodes.insert(TakeAwayNode {
                    customer,
                    next: self.head,
                });
                self.head = Some(key);
            }
        }
    }

    /// Remove and return the head order. O(1).
    pub fn serve_one(&mut self) -> Result<Customer, OrderError> {
        let head = self.head.ok_or(OrderError::EmptyQueue(OrderKind::TakeAway))?;
        let node = self
            .nodes
            .remove(head)
            .ok_or(OrderError::EmptyQueue(OrderKind::TakeAway))?;
        self.head = node.next;
        Ok(node.customer)
    }

    /// The order [`serve_one`](Self::serve_one) would return next.
    pub fn peek(&self) -> Option<&Customer> {
        self.head.map(|key| &self.nodes[key].customer)
    }

    /// Sum of bills of every queued order.
    pub fn pending_total(&self) -> Amount {
        money::total(self.iter().map(Customer::bill))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Walk the queue head to tail.
    pub fn iter(&self) -> TakeAwayIter<'_> {
        TakeAwayIter {
            queue: self,
            cursor: self.head,
        }
    }
}

/// Iterator over a [`TakeAwayQueue`], head to tail.
pub struct TakeAwayIter<'a> {
    queue: &'a TakeAwayQueue,
    cursor: Option<TakeAwayKey>,
}

impl<'a> Iterator for TakeAwayIter<'a> {
    type Item = &'a Customer;

    fn next(&mut self) -> Option<Self::Item> {
        let queue = self.queue;
        let node = &queue.nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.customer)
    }
}
