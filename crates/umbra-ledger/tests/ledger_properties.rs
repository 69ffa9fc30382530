//! Property tests for the balance ledger.
//!
//! These tests use `proptest` to drive random operation sequences through
//! both backends and check the economy's arithmetic rules and the
//! durability round-trip.

use proptest::prelude::*;
use umbra_ledger::{BalanceStore, InMemoryLedger, JsonFileLedger};
use umbra_types::UserId;

#[derive(Debug, Clone)]
enum LedgerOp {
    Ensure(usize),
    Credit(usize, i64),
    Debit(usize, i64),
    Balance(usize),
    Set(usize, i64),
}

const USERS: [&str; 5] = ["100", "200", "300", "400", "500"];

fn user(idx: usize) -> UserId {
    UserId::new(USERS[idx % USERS.len()]).unwrap()
}

fn ledger_op_strategy() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        (0..5usize).prop_map(LedgerOp::Ensure),
        (0..5usize, -1_000i64..1_000_000).prop_map(|(u, a)| LedgerOp::Credit(u, a)),
        (0..5usize, 0i64..1_000_000).prop_map(|(u, a)| LedgerOp::Debit(u, a)),
        (0..5usize).prop_map(LedgerOp::Balance),
        (0..5usize, -1_000i64..1_000_000).prop_map(|(u, a)| LedgerOp::Set(u, a)),
    ]
}

fn apply(ledger: &dyn BalanceStore, op: &LedgerOp) {
    match op {
        LedgerOp::Ensure(u) => {
            ledger.ensure_user(&user(*u)).unwrap();
        }
        LedgerOp::Credit(u, a) => {
            ledger.credit(&user(*u), *a).unwrap();
        }
        LedgerOp::Debit(u, a) => {
            ledger.debit(&user(*u), *a).unwrap();
        }
        LedgerOp::Balance(u) => {
            ledger.balance(&user(*u)).unwrap();
        }
        LedgerOp::Set(u, a) => {
            ledger.set_balance(&user(*u), *a).unwrap();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn credits_are_additive(a in 0i64..1_000_000_000, b in 0i64..1_000_000_000) {
        let split = InMemoryLedger::new();
        split.credit(&user(0), a).unwrap();
        split.credit(&user(0), b).unwrap();

        let single = InMemoryLedger::new();
        single.credit(&user(0), a + b).unwrap();

        prop_assert_eq!(split.balance(&user(0)).unwrap(), single.balance(&user(0)).unwrap());
    }

    #[test]
    fn debit_floors_at_zero(start in 0i64..1_000_000, amount in 0i64..2_000_000) {
        let ledger = InMemoryLedger::new();
        ledger.set_balance(&user(0), start).unwrap();
        let after = ledger.debit(&user(0), amount).unwrap();
        prop_assert_eq!(after, (start - amount).max(0));
        prop_assert!(after >= 0);
    }

    #[test]
    fn set_then_get_is_exact(n in any::<i64>()) {
        let ledger = InMemoryLedger::new();
        ledger.set_balance(&user(0), n).unwrap();
        prop_assert_eq!(ledger.balance(&user(0)).unwrap(), n);
    }

    #[test]
    fn backends_agree(ops in prop::collection::vec(ledger_op_strategy(), 0..40)) {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFileLedger::open(dir.path().join("economy.json")).unwrap();
        let memory = InMemoryLedger::new();

        for op in &ops {
            apply(&file, op);
            apply(&memory, op);
        }

        prop_assert_eq!(file.snapshot().unwrap(), memory.snapshot().unwrap());
    }

    #[test]
    fn reload_reproduces_mapping(ops in prop::collection::vec(ledger_op_strategy(), 1..40)) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("economy.json");

        let ledger = JsonFileLedger::open(&path).unwrap();
        for op in &ops {
            apply(&ledger, op);
        }
        let before = ledger.snapshot().unwrap();
        drop(ledger);

        let reopened = JsonFileLedger::open(&path).unwrap();
        prop_assert_eq!(reopened.snapshot().unwrap(), before);
    }
}

#[test]
fn untouched_user_is_zero_and_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("economy.json");

    let ledger = JsonFileLedger::open(&path).unwrap();
    assert_eq!(ledger.balance(&user(3)).unwrap(), 0);
    drop(ledger);

    let reopened = JsonFileLedger::open(&path).unwrap();
    assert_eq!(reopened.snapshot().unwrap().get(&user(3)), Some(&0));
    assert_eq!(reopened.balance(&user(3)).unwrap(), 0);
}
