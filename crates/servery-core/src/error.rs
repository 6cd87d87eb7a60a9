use crate::customer::OrderKind;
use crate::id::MenuIndex;

/// Errors surfaced by order placement and serving. All of them are
/// recoverable: the service state is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// A serve was attempted on an empty queue.
    #[error("no {0} orders")]
    EmptyQueue(OrderKind),

    /// The served-order index already holds an order under this name.
    #[error("duplicate customer: {name}")]
    DuplicateKey { name: String },

    /// The menu index is outside `1..=len`.
    #[error("menu index {index} out of range 1..={len}")]
    InvalidIndex { index: MenuIndex, len: usize },

    /// A field that must be positive was zero.
    #[error("{field} must be greater than zero")]
    InvalidField { field: &'static str },

    /// Unit price times quantity does not fit in an Amount.
    #[error("bill overflows for {quantity} x item {index}")]
    BillOverflow { index: MenuIndex, quantity: u32 },
}
