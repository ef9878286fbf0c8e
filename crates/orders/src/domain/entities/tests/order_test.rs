use crate::domain::entities::{Order, OrderItem};
use crate::domain::value_objects::{Currency, Money, OrderId, ProductId, Quantity};
use chrono::Utc;
use shared_kernel::domain::events::{AggregateRoot, DomainEvent};
use shared_kernel::errors::DomainError;

fn order_id() -> OrderId {
    OrderId::try_new("ORD-TEST-001").unwrap()
}

fn product(code: &str) -> ProductId {
    ProductId::try_new(code).unwrap()
}

fn qty(n: f64) -> Quantity {
    Quantity::try_new(n).unwrap()
}

fn usd(amount: f64) -> Money {
    Money::try_new(amount, Currency::Usd).unwrap()
}

#[test]
fn test_create_emits_order_created() {
    let mut order = Order::create(order_id());

    let events = order.pull_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type(), "OrderCreated");
    assert_eq!(events[0].aggregate_type(), "Order");
    assert_eq!(events[0].aggregate_id(), "ORD-TEST-001");

    let payload = events[0].payload();
    assert_eq!(payload["data"]["orderId"], "ORD-TEST-001");
    assert_eq!(payload["aggregateId"], "ORD-TEST-001");
}

#[test]
fn test_reconstitute_emits_nothing() {
    let item = OrderItem::new(product("LAPTOP-001"), qty(2.0), usd(1299.99));
    let mut order = Order::reconstitute(order_id(), vec![item], Utc::now());

    assert!(order.pull_events().is_empty());
    assert_eq!(order.item_count(), 1);
}

#[test]
fn test_pull_events_drains_the_buffer() {
    let mut order = Order::create(order_id());
    order
        .add_item(product("LAPTOP-001"), qty(1.0), usd(10.0))
        .unwrap();

    assert_eq!(order.pull_events().len(), 2);
    // Second drain sans mutation : vide
    assert!(order.pull_events().is_empty());
}

#[test]
fn test_add_item_rejects_zero_unit_price() {
    let mut order = Order::create(order_id());

    let result = order.add_item(product("FREEBIE"), qty(1.0), usd(0.0));
    assert!(
        matches!(result, Err(DomainError::Validation { field, .. }) if field == "unit_price")
    );
    assert_eq!(order.item_count(), 0);
}

#[test]
fn test_add_item_rejects_currency_mismatch_naming_the_expected_code() {
    let mut order = Order::create(order_id());
    order
        .add_item(product("LAPTOP-001"), qty(1.0), usd(1299.99))
        .unwrap();

    let eur_price = Money::try_new(349.50, Currency::Eur).unwrap();
    let result = order.add_item(product("MONITOR-EU-001"), qty(1.0), eur_price);

    match result {
        Err(DomainError::Validation { field, reason }) => {
            assert_eq!(field, "currency");
            // Le message nomme la devise attendue
            assert!(reason.contains("USD"), "reason: {reason}");
        }
        other => panic!("Expected a currency validation error, got {other:?}"),
    }
    assert_eq!(order.item_count(), 1);
}

#[test]
fn test_currency_coherence_holds_after_any_successful_sequence() {
    let mut order = Order::create(order_id());
    order.add_item(product("A"), qty(1.0), usd(10.0)).unwrap();
    order.add_item(product("B"), qty(2.0), usd(5.0)).unwrap();
    order.add_item(product("A"), qty(3.0), usd(99.0)).unwrap();

    let currencies: std::collections::HashSet<&str> = order
        .items()
        .iter()
        .map(|item| item.unit_price().currency().code())
        .collect();
    assert_eq!(currencies.len(), 1);
}

#[test]
fn test_adding_same_product_merges_quantities_and_keeps_first_price() {
    let mut order = Order::create(order_id());
    order
        .add_item(product("LAPTOP-001"), qty(2.0), usd(1299.99))
        .unwrap();
    order.pull_events();

    // Même produit, prix différent : la quantité fusionne, le prix
    // d'origine reste
    order
        .add_item(product("LAPTOP-001"), qty(3.0), usd(999.0))
        .unwrap();

    assert_eq!(order.item_count(), 1);
    let line = &order.items()[0];
    assert_eq!(line.quantity().value(), 5);
    assert!((line.unit_price().amount() - 1299.99).abs() < 1e-9);

    let events = order.pull_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type(), "OrderItemQuantityIncreased");

    let payload = events[0].payload();
    assert_eq!(payload["data"]["previousQuantity"], 2);
    assert_eq!(payload["data"]["newQuantity"], 5);
}

#[test]
fn test_item_added_event_carries_the_unit_price() {
    let mut order = Order::create(order_id());
    order.pull_events();

    order
        .add_item(product("LAPTOP-001"), qty(2.0), usd(1299.99))
        .unwrap();

    let events = order.pull_events();
    assert_eq!(events.len(), 1);
    let payload = events[0].payload();
    assert_eq!(payload["data"]["productId"], "LAPTOP-001");
    assert_eq!(payload["data"]["quantity"], 2);
    assert_eq!(payload["data"]["unitPrice"]["amount"], 1299.99);
    assert_eq!(payload["data"]["unitPrice"]["currency"], "USD");
}

#[test]
fn test_calculate_total_happy_path() {
    let mut order = Order::create(order_id());
    order
        .add_item(product("LAPTOP-001"), qty(2.0), usd(1299.99))
        .unwrap();
    order.add_item(product("MOUSE-001"), qty(1.0), usd(49.99)).unwrap();

    let total = order.calculate_total().unwrap();
    assert!((total.amount() - 2649.97).abs() < 1e-9);
    assert_eq!(total.currency(), Currency::Usd);
}

#[test]
fn test_calculate_total_fails_on_empty_order() {
    let order = Order::create(order_id());
    assert!(matches!(
        order.calculate_total(),
        Err(DomainError::Validation { field: "items", .. })
    ));
}

#[test]
fn test_calculate_total_fails_across_currencies() {
    // Etat mixte uniquement atteignable par reconstitution
    let items = vec![
        OrderItem::new(product("A"), qty(1.0), usd(10.0)),
        OrderItem::new(
            product("B"),
            qty(1.0),
            Money::try_new(10.0, Currency::Eur).unwrap(),
        ),
    ];
    let order = Order::reconstitute(order_id(), items, Utc::now());

    assert!(matches!(
        order.calculate_total(),
        Err(DomainError::Validation { field: "currency", .. })
    ));

    let totals = order.totals_by_currency();
    assert_eq!(totals.len(), 2);
    assert!((totals[&Currency::Usd].amount() - 10.0).abs() < 1e-9);
    assert!((totals[&Currency::Eur].amount() - 10.0).abs() < 1e-9);
}

#[test]
fn test_queries() {
    let mut order = Order::create(order_id());
    order.add_item(product("A"), qty(2.0), usd(10.0)).unwrap();
    order.add_item(product("B"), qty(3.0), usd(5.0)).unwrap();

    assert_eq!(order.item_count(), 2);
    assert_eq!(order.total_quantity(), 5);
    assert!(order.has_product(&product("A")));
    assert!(!order.has_product(&product("MISSING")));
}

#[test]
fn test_order_item_display() {
    let item = OrderItem::new(product("LAPTOP-001"), qty(2.0), usd(1299.99));
    assert_eq!(item.to_string(), "LAPTOP-001 x2 @ $1299.99 = $2599.98");
}

#[test]
fn test_events_are_ordered_by_cause() {
    let mut order = Order::create(order_id());
    order.add_item(product("A"), qty(1.0), usd(10.0)).unwrap();
    order.add_item(product("A"), qty(1.0), usd(10.0)).unwrap();

    let types: Vec<String> = order
        .pull_events()
        .iter()
        .map(|e| e.event_type().into_owned())
        .collect();
    assert_eq!(
        types,
        vec![
            "OrderCreated",
            "OrderItemAdded",
            "OrderItemQuantityIncreased"
        ]
    );
}
