//! Dine-in intake queue: first come, first served, each order tagged with
//! its table. Linked through a [`SlotMap`] arena with head and tail keys so
//! both ends are O(1).

use crate::customer::{Customer, DineInOrder, OrderKind};
use crate::error::OrderError;
use crate::id::{DineInKey, TableNumber};
use crate::money::{self, Amount};
use slotmap::SlotMap;

#[derive(Debug)]
struct DineInNode {
    order: DineInOrder,
    next: Option<DineInKey>,
}

/// Pending dine-in orders in arrival order.
#[derive(Debug, Default)]
pub struct DineInQueue {
    nodes: SlotMap<DineInKey, DineInNode>,
    head: Option<DineInKey>,
    tail: Option<DineInKey>,
}

impl DineInQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the tail.
    pub fn place(&mut self, customer: Customer, table: TableNumber) {
        let key = self.nodes.insert(DineInNode {
            order: DineInOrder { customer, table },
            next: None,
        });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Remove and return the oldest order.
    pub fn serve_one(&mut self) -> Result<DineInOrder, OrderError> {
        let head = self.head.ok_or(OrderError::EmptyQueue(OrderKind::DineIn))?;
        let node = self
            .nodes
            .remove(head)
            .ok_or(OrderError::EmptyQueue(OrderKind::DineIn))?;
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        Ok(node.order)
    }

    pub fn peek(&self) -> Option<&DineInOrder> {
        self.head.map(|key| &self.nodes[key].order)
    }

    pub fn pending_total(&self) -> Amount {
        money::total(self.iter().map(|order| order.customer.bill()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn iter(&self) -> DineInIter<'_> {
        DineInIter {
            queue: self,
            cursor: self.head,
        }
    }
}

/// Iterator over a [`DineInQueue`], oldest first.
pub struct DineInIter<'a> {
    queue: &'a DineInQueue,
    cursor: Option<DineInKey>,
}

impl<'a> Iterator for DineInIter<'a> {
    type Item = &'a DineInOrder;

    fn next(&mut self) -> Option<Self::Item> {
        let queue = self.queue;
        let node = &queue.nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.order)
    }
}
