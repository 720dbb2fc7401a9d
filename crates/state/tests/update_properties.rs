//! Property-based tests for sequences of store writes

use models::{Curriculum, Module};
use proptest::{collection::vec, prelude::*};
use state::CurriculumStore;
use std::{cell::RefCell, rc::Rc};

#[derive(Debug, Clone, Copy)]
enum Step {
    Add(u8),
    Subtract(u8),
    Scale(u8),
    /// A write that fails validation and must leave the store alone
    DuplicateModules,
}

impl Step {
    fn credits(self, credits: f64) -> f64 {
        match self {
            Self::Add(n) => credits + f64::from(n),
            Self::Subtract(n) => credits - f64::from(n),
            Self::Scale(n) => credits * f64::from(n),
            Self::DuplicateModules => credits,
        }
    }
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0u8..50).prop_map(Step::Add),
        (0u8..50).prop_map(Step::Subtract),
        (0u8..4).prop_map(Step::Scale),
        Just(Step::DuplicateModules),
    ]
}

fn start(credits: f64) -> Curriculum {
    Curriculum::new(credits, vec![Module::new("M1", "Module 1", 10.0)], Vec::new())
}

proptest! {
    #[test]
    fn test_updates_fold_in_order(initial in 0u8..200, steps in vec(step(), 0..20)) {
        let store = CurriculumStore::new();
        store.set(start(f64::from(initial)));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _subscription = store.subscribe(move |c| sink.borrow_mut().push(c.credits));

        let mut expected = f64::from(initial);
        let mut rounds = 1;
        for step in &steps {
            match *step {
                Step::DuplicateModules => {
                    let result = store.try_update(|c| {
                        let mut next = c.clone();
                        next.modules.extend(c.modules.iter().cloned());
                        next
                    });
                    prop_assert!(result.is_err());
                }
                step => {
                    store.update(|c| Curriculum {
                        credits: step.credits(c.credits),
                        ..c.clone()
                    });
                    rounds += 1;
                }
            }
            expected = step.credits(expected);
        }

        let current = store.get();
        prop_assert_eq!(current.credits, expected);
        prop_assert_eq!(current.modules.len(), 1);

        let seen = seen.borrow();
        prop_assert_eq!(seen.len(), rounds);
        prop_assert_eq!(seen.last().copied(), Some(current.credits));
    }
}
