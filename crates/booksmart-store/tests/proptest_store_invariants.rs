//! Property-based invariant tests for the store.
//!
//! 1. User ids are unique and strictly increasing in insertion order, across
//!    any mix of adds and removals.
//! 2. Once every delayed action has fired, no auth operation is in flight.
//! 3. Login succeeds iff the credentials equal the configured demo pair.

use booksmart_store::{Action, AppStore, NewUser, StoreConfig, StoreSimulator};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add,
    Remove(usize),
    Login(bool),
    Confirm(String),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        2 => (0usize..8).prop_map(Op::Remove),
        1 => any::<bool>().prop_map(Op::Login),
        1 => "[0-9a-z]{0,7}".prop_map(Op::Confirm),
    ]
}

fn apply(sim: &mut StoreSimulator<AppStore>, op: Op) {
    match op {
        Op::Add => sim.send(Action::AddUser(NewUser::new("Ana", "ana@example.com", 30))),
        Op::Remove(i) => {
            if let Some(user) = sim.model().state().users.get(i) {
                let id = user.id;
                sim.send(Action::RemoveUser(id));
            }
        }
        Op::Login(good) => {
            let password = if good { "password" } else { "wrong" };
            sim.send(Action::login("admin@booksmart.com", password));
        }
        Op::Confirm(code) => sim.send(Action::confirm_email("ana@example.com", code)),
    }
}

proptest! {
    #[test]
    fn ids_unique_and_increasing(ops in prop::collection::vec(op(), 0..40)) {
        let mut sim = StoreSimulator::new(AppStore::default());
        sim.init();
        for op in ops {
            apply(&mut sim, op);
        }
        let ids: Vec<_> = sim.model().state().users.iter().map(|u| u.id).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids {:?}", ids);
    }

    #[test]
    fn settled_store_is_idle(ops in prop::collection::vec(op(), 0..40)) {
        let mut sim = StoreSimulator::new(AppStore::default());
        sim.init();
        for op in ops {
            apply(&mut sim, op);
        }
        sim.settle();
        prop_assert_eq!(sim.pending_count(), 0);
        prop_assert!(!sim.model().state().session.auth_loading);
    }

    #[test]
    fn login_accepts_only_demo_pair(email in "[a-z]{1,8}@[a-z]{1,8}\\.com", password in "[a-z]{1,10}") {
        let mut sim = StoreSimulator::new(AppStore::new(StoreConfig::default().instant()));
        sim.send(Action::login(email.clone(), password.clone()));
        sim.settle();
        let expected = email == "admin@booksmart.com" && password == "password";
        prop_assert_eq!(sim.model().state().session.authenticated, expected);
    }
}
