//! End-to-end behaviour of the cart store through its public API.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::executor::block_on;
use rocket_cache::{FileStore, KeyValueStore, MemoryStore};
use rocket_commerce::prelude::*;

fn sneaker(id: u64, price: f64) -> Product {
    Product::new(
        ProductId::new(id),
        format!("Tênis {id}"),
        price,
        format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/{id}.jpg"),
    )
}

fn catalog() -> Arc<InMemoryCatalog> {
    Arc::new(
        InMemoryCatalog::new()
            .with_product(sneaker(1, 179.9), 3)
            .with_product(sneaker(2, 139.9), 5)
            .with_product(sneaker(3, 219.9), 2)
            .with_product(sneaker(4, 99.9), 1),
    )
}

fn scratch_file() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir()
        .join(format!("rocket-commerce-it-{}-{}", std::process::id(), n))
        .join("cart.json")
}

#[test]
fn test_shopping_session_round_trips_through_file_storage() {
    let path = scratch_file();
    let catalog = catalog();

    {
        let store = CartStore::new(
            Arc::clone(&catalog),
            FileStore::open(&path).unwrap(),
            CollectingNotifier::new(),
        );
        block_on(store.add_product(ProductId::new(2)));
        block_on(store.add_product(ProductId::new(1)));
        block_on(store.add_product(ProductId::new(2)));
        block_on(store.update_product_amount(UpdateProductAmount::new(ProductId::new(2), 4)));
        assert!(store.notifier().notifications().is_empty());
    }

    let reopened = CartStore::new(
        Arc::clone(&catalog),
        FileStore::open(&path).unwrap(),
        CollectingNotifier::new(),
    );
    let cart = reopened.cart();
    assert_eq!(
        cart.amounts_by_product().into_iter().collect::<Vec<_>>(),
        vec![(ProductId::new(1), 1), (ProductId::new(2), 4)]
    );
    assert_eq!(cart.items()[0].id, ProductId::new(2));
    assert_eq!(cart.items()[1].title, "Tênis 1");
}

#[test]
fn test_corrupt_storage_file_recovers_on_next_mutation() {
    let path = scratch_file();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "garbage{").unwrap();

    let store = CartStore::new(
        catalog(),
        FileStore::open(&path).unwrap(),
        CollectingNotifier::new(),
    );
    assert!(store.cart().is_empty());

    block_on(store.add_product(ProductId::new(2)));
    store.remove_product(ProductId::new(9));
    block_on(store.add_product(ProductId::new(1)));

    assert!(store.notifier().notifications().is_empty());
    assert_eq!(store.cart().len(), 2);

    let reopened = CartStore::new(
        catalog(),
        FileStore::open(&path).unwrap(),
        CollectingNotifier::new(),
    );
    assert_eq!(reopened.cart(), store.cart());

    store.clear();
    assert!(store.notifier().notifications().is_empty());
}

#[test]
fn test_persisted_format_is_a_json_array_of_products() {
    let storage = Arc::new(MemoryStore::new());
    let store = CartStore::new(catalog(), Arc::clone(&storage), LogNotifier);

    block_on(store.add_product(ProductId::new(1)));

    let raw = storage.get_item("@RocketShoes:cart").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], 1);
    assert_eq!(entries[0]["amount"], 1);
    assert_eq!(entries[0]["price"], 179.9);
}

#[test]
fn test_every_entry_stays_below_stock() {
    let catalog = catalog();
    let store = CartStore::new(
        Arc::clone(&catalog),
        MemoryStore::new(),
        CollectingNotifier::new(),
    );

    for id in 1..=4 {
        for _ in 0..6 {
            block_on(store.add_product(ProductId::new(id)));
        }
    }

    for product in &store.cart() {
        let stock = block_on(catalog.stock(product.id)).unwrap();
        assert!(product.amount >= 1);
        assert!(product.amount < stock.amount);
    }
    // product 4 has a single unit in stock and never enters the cart
    assert!(!store.cart().contains(ProductId::new(4)));
}

#[test]
fn test_stock_drop_between_mutations_is_checked_on_next_update() {
    let catalog = catalog();
    let store = CartStore::new(
        Arc::clone(&catalog),
        MemoryStore::new(),
        CollectingNotifier::new(),
    );
    block_on(store.add_product(ProductId::new(2)));
    block_on(store.update_product_amount(UpdateProductAmount::new(ProductId::new(2), 4)));

    catalog.set_stock(ProductId::new(2), 3);
    block_on(store.update_product_amount(UpdateProductAmount::new(ProductId::new(2), 3)));

    assert_eq!(store.cart().amount_of(ProductId::new(2)), 4);
    assert_eq!(
        store.notifier().last().map(|n| n.kind),
        Some(NotificationKind::OutOfStockOnUpdate)
    );
}

#[test]
fn test_failures_reach_a_closure_notifier() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let store = CartStore::new(
        catalog(),
        MemoryStore::new(),
        FnNotifier(move |n: &Notification| sink.lock().unwrap().push(n.message().to_string())),
    );

    block_on(store.add_product(ProductId::new(99)));
    block_on(store.add_product(ProductId::new(4)));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "Something went wrong while adding the product to the cart.".to_string(),
            "There is no more stock of this product.".to_string(),
        ]
    );
}

#[test]
fn test_summary_after_mutations() {
    let store = CartStore::new(catalog(), MemoryStore::new(), LogNotifier);
    block_on(store.add_product(ProductId::new(1)));
    block_on(store.add_product(ProductId::new(2)));
    block_on(store.update_product_amount(UpdateProductAmount::new(ProductId::new(2), 3)));

    let summary = store.cart().summary(Currency::BRL).unwrap();
    assert_eq!(summary.item_count, 4);
    // 179,90 + 3 × 139,90
    assert_eq!(summary.total.amount_cents, 59960);
    assert_eq!(summary.total.display(), "R$ 599,60");
}

#[test]
fn test_shared_store_across_consumers() {
    let store = Arc::new(CartStore::new(
        catalog(),
        MemoryStore::new(),
        CollectingNotifier::new(),
    ));
    let listing = Arc::clone(&store);
    let header = Arc::clone(&store);

    block_on(listing.add_product(ProductId::new(2)));
    block_on(listing.add_product(ProductId::new(2)));

    assert_eq!(header.cart().item_count(), 2);
    store.clear();
    assert!(header.cart().is_empty());
}
