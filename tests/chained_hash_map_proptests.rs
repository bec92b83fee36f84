// ChainedHashMap property tests.
//
// Property 1: state-machine equivalence against hashbrown::HashMap.
//  - Model: hashbrown::HashMap<String, i32> with insert-if-absent semantics.
//  - Operations: insert, get_or_insert_default (+ add), erase, remove,
//    get, contains, bucket_size, clear.
//  - Invariant after each step: len/is_empty parity; capacity is a power of
//    two >= MIN_CAPACITY; load factor <= high bound; an erase that leaves
//    the ratio below the low bound halved the capacity.
//  - Final: iteration yields exactly the model's entries, each once.
//
// Property 2: equality is order independent and symmetric.
//  - Two tables built from the same distinct pairs in opposite orders end
//    with the same capacity and compare equal both ways.
use chained_hashmap::{ChainedHashMap, MIN_CAPACITY};
use hashbrown::HashMap;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Bracket(usize, i32),
    Erase(usize),
    Remove(usize),
    Get(usize),
    Contains(String),
    BucketSize(usize),
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=40).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            8 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            3 => (idx.clone(), -100i32..100).prop_map(|(i, d)| Op::Bracket(i, d)),
            5 => idx.clone().prop_map(Op::Erase),
            2 => idx.clone().prop_map(Op::Remove),
            3 => idx.clone().prop_map(Op::Get),
            2 => "[a-z]{0,4}".prop_map(Op::Contains),
            2 => idx.clone().prop_map(Op::BucketSize),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ChainedHashMap<String, i32> = ChainedHashMap::new();
        let mut model: HashMap<String, i32> = HashMap::new();
        let high = sut.config().high_load_factor;
        let low = sut.config().low_load_factor;

        for op in ops {
            let cap_before = sut.capacity();
            let mut erased = false;
            match op {
                Op::Insert(i, v) => {
                    let k = pool[i].clone();
                    let absent = !model.contains_key(&k);
                    prop_assert_eq!(sut.insert(k.clone(), v), absent);
                    model.entry(k.clone()).or_insert(v);
                    prop_assert!(sut.contains_key(&k));
                    prop_assert_eq!(sut.get(&k).ok(), model.get(&k));
                }
                Op::Bracket(i, d) => {
                    let k = pool[i].clone();
                    let slot = sut.get_or_insert_default(k.clone());
                    *slot = slot.wrapping_add(d);
                    let expected = model.entry(k.clone()).or_default();
                    *expected = expected.wrapping_add(d);
                    prop_assert_eq!(sut.get(&k).ok(), model.get(&k));
                }
                Op::Erase(i) => {
                    let k = &pool[i];
                    let removed = sut.erase(k);
                    prop_assert_eq!(removed, model.remove(k).is_some());
                    prop_assert!(!sut.contains_key(k));
                    erased = removed;
                }
                Op::Remove(i) => {
                    let k = &pool[i];
                    let got = sut.remove(k);
                    prop_assert_eq!(got, model.remove(k));
                    erased = got.is_some();
                }
                Op::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k).ok(), model.get(k));
                }
                Op::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
                }
                Op::BucketSize(i) => {
                    let k = &pool[i];
                    match sut.bucket_size(k) {
                        Ok(n) => {
                            prop_assert!(model.contains_key(k));
                            prop_assert!(n >= 1 && n <= sut.len());
                        }
                        Err(_) => {
                            prop_assert!(!model.contains_key(k));
                        }
                    }
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.capacity(), cap_before);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert!(sut.capacity().is_power_of_two());
            prop_assert!(sut.capacity() >= MIN_CAPACITY);
            prop_assert!(sut.load_factor() <= high);
            if erased {
                let ratio = sut.len() as f64 / cap_before as f64;
                if ratio < low && cap_before > MIN_CAPACITY {
                    prop_assert_eq!(sut.capacity(), cap_before / 2);
                } else {
                    prop_assert_eq!(sut.capacity(), cap_before);
                }
            }
        }

        let mut seen: HashMap<String, i32> = HashMap::new();
        for (k, v) in sut.iter() {
            prop_assert!(seen.insert(k.clone(), *v).is_none(), "duplicate key {:?}", k);
        }
        prop_assert_eq!(seen, model);
    }
}

proptest! {
    #[test]
    fn prop_equality_order_independent(
        keys in proptest::collection::hash_set(any::<u16>(), 0..200),
        salt in any::<u32>(),
    ) {
        let pairs: Vec<(u16, u32)> = keys.into_iter().map(|k| (k, salt ^ k as u32)).collect();
        let mut forward = ChainedHashMap::new();
        for (k, v) in pairs.iter() {
            forward.insert(*k, *v);
        }
        let mut backward = ChainedHashMap::new();
        for (k, v) in pairs.iter().rev() {
            backward.insert(*k, *v);
        }
        prop_assert_eq!(forward.capacity(), backward.capacity());
        prop_assert!(forward == backward);
        prop_assert!(backward == forward);
        prop_assert!(forward == forward.clone());
        prop_assert_eq!(forward.iter().len(), pairs.len());
    }
}
