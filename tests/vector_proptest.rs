// Vector property tests.
//
// Model: a plain Vec<i64> holding the same elements.
// Invariants after every op:
//  - len() == model.len() and elements match in order;
//  - len() <= capacity();
//  - capacity() == 0 exactly when nothing is allocated;
//  - push on a full vector lands on 1 or 2x the old capacity;
//  - pop shrinks only when len < old_capacity / 4, to max(old / 2, len).
use chain_collections::Vector;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Push(i64),
    Pop,
    Realloc(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i64>().prop_map(Op::Push),
        3 => Just(Op::Pop),
        1 => (0usize..40).prop_map(Op::Realloc),
    ]
}

proptest! {
    #[test]
    fn prop_vector_matches_model(init in 0usize..8, ops in proptest::collection::vec(arb_op(), 1..200)) {
        let mut v: Vector<i64> = Vector::with_capacity(init);
        let mut model: Vec<i64> = Vec::new();
        prop_assert_eq!(v.capacity(), init);

        for op in ops {
            let old_cap = v.capacity();
            match op {
                Op::Push(x) => {
                    v.push_back(x).unwrap();
                    let was_full = model.len() == old_cap;
                    model.push(x);
                    if was_full {
                        let expected = if old_cap == 0 { 1 } else { old_cap * 2 };
                        prop_assert_eq!(v.capacity(), expected);
                    } else {
                        prop_assert_eq!(v.capacity(), old_cap);
                    }
                }
                Op::Pop => {
                    let got = v.pop_back();
                    prop_assert_eq!(got, model.pop());
                    if got.is_some() && old_cap > 1 && model.len() < old_cap / 4 {
                        prop_assert_eq!(v.capacity(), (old_cap / 2).max(model.len()));
                    } else {
                        prop_assert_eq!(v.capacity(), old_cap);
                    }
                }
                Op::Realloc(n) => {
                    v.realloc(n).unwrap();
                    model.truncate(n);
                    prop_assert_eq!(v.capacity(), n);
                }
            }

            prop_assert_eq!(v.as_slice(), model.as_slice());
            prop_assert!(v.len() <= v.capacity());
            prop_assert_eq!(v.is_allocated(), v.capacity() != 0);
            for (i, x) in model.iter().enumerate() {
                prop_assert_eq!(v.get(i), Some(x));
            }
        }
    }
}
