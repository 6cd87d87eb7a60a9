//! Served-order index.
//!
//! Every served order is recorded once, keyed by customer name, in an AVL
//! tree whose nodes live in a [`SlotMap`] arena. Child links are arena keys,
//! so rotations only rewrite keys and never move records.
//!
//! Heights are stored per node and refreshed bottom-up along the insertion
//! path, so an insert costs O(log n) including rebalancing.

use crate::customer::{Customer, OrderKind, ServedRecord};
use crate::error::OrderError;
use crate::id::ServedKey;
use slotmap::SlotMap;
use std::cmp::Ordering;
use tracing::{debug, trace};

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct ServedNode {
    record: ServedRecord,
    /// Height of the subtree rooted here; a leaf has height 1.
    height: u32,
    left: Option<ServedKey>,
    right: Option<ServedKey>,
}

/// A broken structural invariant found by [`ServedIndex::verify`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureViolation {
    #[error("'{name}' is out of order")]
    OutOfOrder { name: String },
    #[error("'{name}' stores height {stored}, actual {actual}")]
    StaleHeight {
        name: String,
        stored: u32,
        actual: u32,
    },
    #[error("'{name}' has balance factor {factor}")]
    Unbalanced { name: String, factor: i32 },
    #[error("{reachable} of {stored} nodes reachable from the root")]
    Orphaned { reachable: usize, stored: usize },
}

// ---------------------------------------------------------------------------
// ServedIndex
// ---------------------------------------------------------------------------

/// Name-indexed archive of served orders.
#[derive(Debug, Default)]
pub struct ServedIndex {
    nodes: SlotMap<ServedKey, ServedNode>,
    root: Option<ServedKey>,
}

impl ServedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a served order. A name already present is rejected before the
    /// tree is touched.
    pub fn insert(&mut self, customer: Customer, kind: OrderKind) -> Result<(), OrderError> {
        if self.contains(customer.name()) {
            return Err(OrderError::DuplicateKey {
                name: customer.name().to_string(),
            });
        }

        let key = self.nodes.insert(ServedNode {
            record: ServedRecord { customer, kind },
            height: 1,
            left: None,
            right: None,
        });
        let root = self.root;
        self.root = Some(self.insert_below(root, key));

        debug!(
            name = %self.nodes[key].record.name(),
            %kind,
            len = self.nodes.len(),
            height = self.height(),
            "served order indexed"
        );
        Ok(())
    }

    /// Look up a served order by exact name.
    pub fn find(&self, name: &str) -> Option<&ServedRecord> {
        let mut cursor = self.root;
        while let Some(key) = cursor {
            let node = &self.nodes[key];
            match name.cmp(node.record.name()) {
                Ordering::Equal => return Some(&node.record),
                Ordering::Less => cursor = node.left,
                Ordering::Greater => cursor = node.right,
            }
        }
        None
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Records in ascending name order. Lazy; call again to restart.
    pub fn in_order(&self) -> InOrder<'_> {
        InOrder {
            index: self,
            stack: Vec::new(),
            cursor: self.root,
        }
    }

    /// Release every node, children before parents. Returns the number of
    /// nodes released.
    pub fn destroy(&mut self) -> usize {
        let mut pending: Vec<ServedKey> = self.root.into_iter().collect();
        let mut visited = Vec::with_capacity(self.nodes.len());
        while let Some(key) = pending.pop() {
            visited.push(key);
            let node = &self.nodes[key];
            pending.extend(node.left);
            pending.extend(node.right);
        }

        let mut released = 0;
        for key in visited.into_iter().rev() {
            if self.nodes.remove(key).is_some() {
                released += 1;
            }
        }
        self.root = None;
        debug!(released, "served index released");
        released
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree; 0 when empty.
    pub fn height(&self) -> u32 {
        self.height_of(self.root)
    }

    /// Name stored at the root, if any.
    pub fn root_name(&self) -> Option<&str> {
        self.root.map(|key| self.nodes[key].record.name())
    }

    /// Check ordering, stored heights, balance factors and that every arena
    /// node hangs off the root.
    pub fn verify(&self) -> Result<(), StructureViolation> {
        let mut reachable = 0;
        self.verify_subtree(self.root, None, None, &mut reachable)?;
        if reachable != self.nodes.len() {
            return Err(StructureViolation::Orphaned {
                reachable,
                stored: self.nodes.len(),
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // AVL internals
    // -----------------------------------------------------------------------

    fn insert_below(&mut self, subtree: Option<ServedKey>, key: ServedKey) -> ServedKey {
        let Some(root) = subtree else {
            return key;
        };
        if self.nodes[key].record.name() < self.nodes[root].record.name() {
            let left = self.nodes[root].left;
            let new_left = self.insert_below(left, key);
            self.nodes[root].left = Some(new_left);
        } else {
            let right = self.nodes[root].right;
            let new_right = self.insert_below(right, key);
            self.nodes[root].right = Some(new_right);
        }
        self.rebalance(root)
    }

    fn height_of(&self, key: Option<ServedKey>) -> u32 {
        key.map_or(0, |k| self.nodes[k].height)
    }

    fn update_height(&mut self, key: ServedKey) {
        let node = &self.nodes[key];
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.nodes[key].height = height;
    }

    /// Left subtree height minus right subtree height.
    fn balance_factor(&self, key: ServedKey) -> i32 {
        let node = &self.nodes[key];
        self.height_of(node.left) as i32 - self.height_of(node.right) as i32
    }

    fn rotate_right(&mut self, top: ServedKey) -> ServedKey {
        let Some(pivot) = self.nodes[top].left else {
            return top;
        };
        trace!(pivot = %self.nodes[pivot].record.name(), "rotate right");
        self.nodes[top].left = self.nodes[pivot].right;
        self.nodes[pivot].right = Some(top);
        self.update_height(top);
        self.update_height(pivot);
        pivot
    }

    fn rotate_left(&mut self, top: ServedKey) -> ServedKey {
        let Some(pivot) = self.nodes[top].right else {
            return top;
        };
        trace!(pivot = %self.nodes[pivot].record.name(), "rotate left");
        self.nodes[top].right = self.nodes[pivot].left;
        self.nodes[pivot].left = Some(top);
        self.update_height(top);
        self.update_height(pivot);
        pivot
    }

    /// Refresh the height at `key` and apply whichever of the four AVL cases
    /// applies. Returns the new subtree root.
    fn rebalance(&mut self, key: ServedKey) -> ServedKey {
        self.update_height(key);
        let factor = self.balance_factor(key);

        if factor > 1 {
            // Left-right: straighten the left child first.
            if let Some(left) = self.nodes[key].left {
                if self.balance_factor(left) < 0 {
                    let rotated = self.rotate_left(left);
                    self.nodes[key].left = Some(rotated);
                }
            }
            return self.rotate_right(key);
        }

        if factor < -1 {
            // Right-left: straighten the right child first.
            if let Some(right) = self.nodes[key].right {
                if self.balance_factor(right) > 0 {
                    let rotated = self.rotate_right(right);
                    self.nodes[key].right = Some(rotated);
                }
            }
            return self.rotate_left(key);
        }

        key
    }

    fn verify_subtree(
        &self,
        key: Option<ServedKey>,
        lower: Option<&str>,
        upper: Option<&str>,
        reachable: &mut usize,
    ) -> Result<u32, StructureViolation> {
        let Some(key) = key else {
            return Ok(0);
        };
        *reachable += 1;
        let node = &self.nodes[key];
        let name = node.record.name();

        if lower.is_some_and(|l| name <= l) || upper.is_some_and(|u| name >= u) {
            return Err(StructureViolation::OutOfOrder {
                name: name.to_string(),
            });
        }

        let left = self.verify_subtree(node.left, lower, Some(name), reachable)?;
        let right = self.verify_subtree(node.right, Some(name), upper, reachable)?;
        let actual = 1 + left.max(right);
        if node.height != actual {
            return Err(StructureViolation::StaleHeight {
                name: name.to_string(),
                stored: node.height,
                actual,
            });
        }

        let factor = left as i32 - right as i32;
        if factor.abs() > 1 {
            return Err(StructureViolation::Unbalanced {
                name: name.to_string(),
                factor,
            });
        }
        Ok(actual)
    }
}

// ---------------------------------------------------------------------------
// In-order iterator
// ---------------------------------------------------------------------------

/// Iterator over a [`ServedIndex`] in ascending name order.
pub struct InOrder<'a> {
    index: &'a ServedIndex,
    stack: Vec<ServedKey>,
    cursor: Option<ServedKey>,
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a ServedRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        while let Some(key) = self.cursor {
            self.stack.push(key);
            self.cursor = index.nodes[key].left;
        }
        let key = self.stack.pop()?;
        let node = &index.nodes[key];
        self.cursor = node.right;
        Some(&node.record)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
