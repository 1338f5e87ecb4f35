// Common test utilities for context integration tests

use quarry_core::{Document, MemoryStore};

/// Test fixture holding a store seeded with orders and customers
pub struct StoreFixture {
    pub store: MemoryStore,
}

impl StoreFixture {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        store
            .insert_many(
                "Order",
                vec![
                    order(1, "open", 30, 10),
                    order(2, "paid", 12, 10),
                    order(3, "open", 45, 11),
                    order(4, "cancelled", 8, 12),
                ],
            )
            .expect("Failed to seed orders");
        store
            .insert_many(
                "Customer",
                vec![
                    Document::new().with("id", 10).with("name", "Ada"),
                    Document::new().with("id", 11).with("name", "Grace"),
                ],
            )
            .expect("Failed to seed customers");

        Self { store }
    }
}

impl Default for StoreFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn order(id: i64, status: &str, total: i64, customer_id: i64) -> Document {
    Document::new()
        .with("id", id)
        .with("status", status)
        .with("total", total)
        .with("customer_id", customer_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_seeds_collections() {
        let fixture = StoreFixture::new();
        assert_eq!(fixture.store.len("Order").unwrap(), 4);
        assert_eq!(fixture.store.len("Customer").unwrap(), 2);
    }
}
