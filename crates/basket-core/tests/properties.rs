//! Properties that must hold for any sequence of cart operations.

use std::collections::{HashMap, HashSet};

use basket_core::codec;
use basket_core::prelude::*;
use basket_kv::{KvStore, MemoryStore};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u8, ProductRef),
    Increment(u8),
    Decrement(u8),
}

fn op() -> impl Strategy<Value = Op> {
    // A small id space so operations keep hitting the same items.
    prop_oneof![
        (0u8..6, price(), title()).prop_map(|(n, price, title)| {
            Op::Add(n, ProductRef::new(id(n), title, format!("https://img/{n}.png"), price))
        }),
        (0u8..6).prop_map(Op::Increment),
        (0u8..6).prop_map(Op::Decrement),
    ]
}

fn ordering() -> impl Strategy<Value = OrderingPolicy> {
    prop_oneof![Just(OrderingPolicy::Stable), Just(OrderingPolicy::MoveToEnd)]
}

/// Any finite price, including values with no short decimal form.
fn price() -> impl Strategy<Value = f64> {
    prop_oneof![
        prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO,
        (0u32..100_000).prop_map(|cents| f64::from(cents) / 100.0),
    ]
}

/// Titles with quotes, escapes, control characters and non-ASCII text.
fn title() -> impl Strategy<Value = String> {
    prop_oneof![any::<String>(), r#"[a-zA-Z"\\\n\t é🛒]{0,24}"#]
}

fn product(n: u8) -> ProductRef {
    ProductRef::new(format!("p{n}"), format!("Product {n}"), format!("u{n}"), f64::from(n) + 0.25)
}

fn id(n: u8) -> ProductId {
    ProductId::new(format!("p{n}"))
}

fn apply(cart: &Cart, op: &Op, ordering: OrderingPolicy) -> Cart {
    match op {
        Op::Add(_, product) => cart.with_product(product.clone(), ordering),
        Op::Increment(n) => cart
            .with_incremented(&id(*n), ordering)
            .unwrap_or_else(|| cart.clone()),
        Op::Decrement(n) => cart
            .with_decremented(&id(*n), ordering)
            .unwrap_or_else(|| cart.clone()),
    }
}

/// Expected quantities, tracked independently of `Cart`.
fn model(ops: &[Op]) -> HashMap<u8, u32> {
    let mut quantities = HashMap::new();
    for op in ops {
        match op {
            Op::Add(n, _) => *quantities.entry(*n).or_insert(0) += 1,
            Op::Increment(n) => {
                if let Some(q) = quantities.get_mut(n) {
                    *q += 1;
                }
            }
            Op::Decrement(n) => match quantities.get(n).copied() {
                Some(1) => {
                    quantities.remove(n);
                }
                Some(q) => {
                    quantities.insert(*n, q - 1);
                }
                None => {}
            },
        }
    }
    quantities
}

proptest! {
    #[test]
    fn prop_ids_unique_and_quantities_positive(
        ops in prop::collection::vec(op(), 0..60),
        ordering in ordering(),
    ) {
        let mut cart = Cart::new();
        for op in &ops {
            cart = apply(&cart, op, ordering);

            let mut seen = HashSet::new();
            for item in &cart {
                prop_assert!(seen.insert(item.id.clone()), "duplicate id {}", item.id);
                prop_assert!(item.quantity() >= 1);
            }
        }
    }

    #[test]
    fn prop_quantities_match_model(
        ops in prop::collection::vec(op(), 0..60),
        ordering in ordering(),
    ) {
        let cart = ops.iter().fold(Cart::new(), |cart, op| apply(&cart, op, ordering));
        let expected = model(&ops);

        prop_assert_eq!(cart.len(), expected.len());
        for (n, quantity) in expected {
            prop_assert_eq!(cart.quantity_of(&id(n)), Some(quantity));
        }
    }

    #[test]
    fn prop_add_existing_equals_increment(
        ops in prop::collection::vec(op(), 0..40),
        n in 0u8..6,
        ordering in ordering(),
    ) {
        let cart = ops.iter().fold(Cart::new(), |cart, op| apply(&cart, op, ordering));
        prop_assume!(cart.contains(&id(n)));

        let added = cart.with_product(product(n), ordering);
        let incremented = cart.with_incremented(&id(n), ordering).unwrap();
        prop_assert_eq!(added, incremented);
    }

    #[test]
    fn prop_codec_round_trip(
        ops in prop::collection::vec(op(), 0..60),
        ordering in ordering(),
    ) {
        let cart = ops.iter().fold(Cart::new(), |cart, op| apply(&cart, op, ordering));
        let decoded = codec::decode(&codec::encode(&cart).unwrap()).unwrap();
        prop_assert_eq!(decoded, cart);
    }

    #[test]
    fn prop_store_persists_every_mutation(ops in prop::collection::vec(op(), 1..30)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        runtime.block_on(async {
            let store = MemoryStore::new();
            let config = CartConfig::default();
            let carts = CartStore::open(store.clone(), config.clone()).await.unwrap();

            for op in &ops {
                match op {
                    Op::Add(_, product) => carts.add_to_cart(product.clone()).await.unwrap(),
                    Op::Increment(n) => carts.increment(&id(*n)).await.unwrap(),
                    Op::Decrement(n) => carts.decrement(&id(*n)).await.unwrap(),
                }

                if carts.revision() > 0 {
                    let raw = store.get(&config.key).await.unwrap().unwrap();
                    let stored = codec::decode(&raw).unwrap();
                    prop_assert_eq!(&stored, &*carts.snapshot());
                }
            }

            let reopened = CartStore::open(store, config).await.unwrap();
            prop_assert_eq!(reopened.snapshot(), carts.snapshot());
            Ok(())
        })?;
    }
}
