//! Property-based tests for the order engine.
//!
//! Uses proptest to generate random operation sequences, then checks the
//! ordering, balance and conservation invariants after every step.

use proptest::prelude::*;
use servery_core::customer::{Customer, OrderKind};
use servery_core::error::OrderError;
use servery_core::id::{MenuIndex, TableNumber};
use servery_core::money::Amount;
use servery_core::served::ServedIndex;
use servery_core::service::OrderService;
use servery_core::take_away::TakeAwayQueue;
use servery_core::test_utils::*;
use std::collections::{BTreeSet, VecDeque};

// ===========================================================================
// Generators
// ===========================================================================

/// Operations against the service. Names are drawn from a small pool so
/// duplicate-name rejections actually happen.
#[derive(Debug, Clone)]
enum Op {
    PlaceTakeAway { name: u8, item: usize, qty: u32, age: u32 },
    PlaceDineIn { name: u8, item: usize, qty: u32, age: u32, table: u32 },
    ServeTakeAway,
    ServeDineIn,
    DiscardTakeAway,
    DiscardDineIn,
}

fn arb_ops(max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            (0..40u8, 0..7usize, 0..5u32, 0..90u32).prop_map(|(name, item, qty, age)| {
                Op::PlaceTakeAway { name, item, qty, age }
            }),
            (0..40u8, 0..7usize, 0..5u32, 0..90u32, 1..30u32).prop_map(
                |(name, item, qty, age, table)| Op::PlaceDineIn {
                    name,
                    item,
                    qty,
                    age,
                    table
                }
            ),
            Just(Op::ServeTakeAway),
            Just(Op::ServeDineIn),
            Just(Op::DiscardTakeAway),
            Just(Op::DiscardDineIn),
        ],
        1..=max_ops,
    )
}

fn name_of(n: u8) -> String {
    format!("guest{n:02}")
}

// ===========================================================================
// Checks
// ===========================================================================

fn assert_take_away_sorted(svc: &OrderService) -> Result<(), TestCaseError> {
    let ages: Vec<u32> = svc.pending_take_away().map(Customer::age).collect();
    for pair in ages.windows(2) {
        prop_assert!(pair[0] >= pair[1], "takeaway ages not descending: {:?}", ages);
    }
    Ok(())
}

fn assert_conserved(svc: &OrderService, placed: Amount) -> Result<(), TestCaseError> {
    prop_assert_eq!(
        svc.pending_bill() + served_total(svc) + svc.discarded_bill(),
        placed
    );
    prop_assert_eq!(svc.total_earnings(), served_total(svc));
    Ok(())
}

fn assert_in_order_ascending(svc: &OrderService) -> Result<(), TestCaseError> {
    let served = svc.served_orders();
    for pair in served.windows(2) {
        prop_assert!(pair[0].name() < pair[1].name());
    }
    Ok(())
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Every invariant holds after every operation, successful or not.
    #[test]
    fn service_invariants_hold(ops in arb_ops(120)) {
        let (mut svc, _) = house_service();
        let mut placed = Amount::ZERO;
        let mut dine_in_model: VecDeque<String> = VecDeque::new();
        let mut earnings_seen = Amount::ZERO;

        for op in ops {
            match op {
                Op::PlaceTakeAway { name, item, qty, age } => {
                    if let Ok(bill) = svc.place_take_away(&name_of(name), MenuIndex(item), qty, age) {
                        placed += bill;
                    }
                }
                Op::PlaceDineIn { name, item, qty, age, table } => {
                    let name = name_of(name);
                    if let Ok(bill) = svc.place_dine_in(&name, MenuIndex(item), qty, age, TableNumber(table)) {
                        placed += bill;
                        dine_in_model.push_back(name);
                    }
                }
                Op::ServeTakeAway => {
                    let pending_before = svc.pending_count(OrderKind::TakeAway);
                    let served_before = svc.served_count();
                    match svc.serve_take_away() {
                        Ok(_) => prop_assert_eq!(svc.served_count(), served_before + 1),
                        Err(OrderError::EmptyQueue(_)) => prop_assert_eq!(pending_before, 0),
                        Err(OrderError::DuplicateKey { .. }) => {
                            prop_assert_eq!(svc.pending_count(OrderKind::TakeAway), pending_before);
                            prop_assert_eq!(svc.served_count(), served_before);
                        }
                        Err(other) => prop_assert!(false, "unexpected error {other}"),
                    }
                }
                Op::ServeDineIn => {
                    match svc.serve_dine_in() {
                        Ok(customer) => {
                            let expected = dine_in_model.pop_front();
                            prop_assert_eq!(Some(customer.name().to_string()), expected);
                        }
                        Err(OrderError::EmptyQueue(_)) => prop_assert!(dine_in_model.is_empty()),
                        Err(OrderError::DuplicateKey { name }) => {
                            prop_assert_eq!(dine_in_model.front(), Some(&name));
                        }
                        Err(other) => prop_assert!(false, "unexpected error {other}"),
                    }
                }
                Op::DiscardTakeAway => {
                    let served_before = svc.served_count();
                    let expected = svc.pending_take_away().next().map(|c| c.name().to_string());
                    let dropped = svc.discard_take_away().ok().map(|c| c.name().to_string());
                    prop_assert_eq!(dropped, expected);
                    prop_assert_eq!(svc.served_count(), served_before);
                }
                Op::DiscardDineIn => {
                    let dropped = svc.discard_dine_in().ok().map(|c| c.name().to_string());
                    prop_assert_eq!(dropped, dine_in_model.pop_front());
                }
            }

            assert_take_away_sorted(&svc)?;
            let pending: Vec<String> = svc
                .pending_dine_in()
                .map(|o| o.customer.name().to_string())
                .collect();
            prop_assert_eq!(pending, dine_in_model.iter().cloned().collect::<Vec<_>>());
            assert_conserved(&svc, placed)?;
            assert_in_order_ascending(&svc)?;
            prop_assert!(svc.total_earnings() >= earnings_seen);
            earnings_seen = svc.total_earnings();
            prop_assert!(svc.served_index().verify().is_ok());
        }
    }

    /// Takeaway placement matches a stable sort by descending age.
    #[test]
    fn take_away_matches_stable_sort(ages in proptest::collection::vec(1..10u32, 0..60)) {
        let mut queue = TakeAwayQueue::new();
        for (i, &age) in ages.iter().enumerate() {
            queue.place(customer(&format!("c{i:02}"), age));
        }

        let mut expected: Vec<(usize, u32)> = ages.iter().copied().enumerate().collect();
        expected.sort_by(|a, b| b.1.cmp(&a.1));
        let expected: Vec<String> = expected.iter().map(|(i, _)| format!("c{i:02}")).collect();

        let mut actual = Vec::new();
        while let Ok(c) = queue.serve_one() {
            actual.push(c.name().to_string());
        }
        prop_assert_eq!(actual, expected);
    }

    /// Arbitrary insertion sequences keep the index balanced and sorted;
    /// duplicates are rejected without changing shape.
    #[test]
    fn index_balanced_after_every_insert(names in proptest::collection::vec("[a-e]{1,3}", 1..200)) {
        let mut index = ServedIndex::new();
        let mut model = BTreeSet::new();

        for name in names {
            let height_before = index.height();
            let root_before = index.root_name().map(str::to_string);
            let fresh = model.insert(name.clone());

            let result = index.insert(customer(&name, 30), OrderKind::DineIn);
            if fresh {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result, Err(OrderError::DuplicateKey { name: name.clone() }));
                prop_assert_eq!(index.height(), height_before);
                prop_assert_eq!(index.root_name().map(str::to_string), root_before);
            }

            prop_assert!(index.verify().is_ok(), "{:?}", index.verify());
            prop_assert_eq!(index.len(), model.len());
        }

        let in_order: Vec<String> = index.in_order().map(|r| r.name().to_string()).collect();
        let sorted: Vec<String> = model.into_iter().collect();
        prop_assert_eq!(in_order, sorted);
    }
}
