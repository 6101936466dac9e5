use super::*;
use crate::db::models::OrderChange;

fn item(name: &str, price: f64, changes: &[(&str, f64)]) -> OrderItem {
    OrderItem {
        dish_name: name.to_string(),
        dish_price: price,
        change_list: changes
            .iter()
            .map(|(n, p)| OrderChange {
                change_name: n.to_string(),
                change_price: *p,
            })
            .collect(),
    }
}

#[test]
fn test_to_decimal_precision() {
    // Classic floating point problem: 0.1 + 0.2 != 0.3
    let a = 0.1_f64;
    let b = 0.2_f64;
    let sum_f64 = a + b;

    // f64 fails
    assert_ne!(sum_f64, 0.3);

    // Decimal succeeds
    let sum_dec = to_decimal(a) + to_decimal(b);
    assert_eq!(to_f64(sum_dec), 0.3);
}

#[test]
fn test_accumulation_precision() {
    // An order of one thousand 0.01 changes sums exactly
    let changes: Vec<(&str, f64)> = (0..1000).map(|_| ("penny", 0.01)).collect();
    let items = vec![item("Base", 0.0, &changes)];
    assert_eq!(to_f64(order_total(&items)), 10.0);
}

#[test]
fn test_order_total_sums_dishes_and_changes() {
    let items = vec![
        item("Latte", 3.50, &[("Extra shot", 0.75)]),
        item("Croissant", 2.20, &[]),
    ];
    assert_eq!(to_f64(order_total(&items)), 6.45);
}

#[test]
fn test_order_total_excludes_tip_by_construction() {
    // The engine only ever sees items; tip rides on the order document
    let items = vec![item("Latte", 3.50, &[("Extra shot", 0.75)])];
    assert_eq!(to_f64(order_total(&items)), 4.25);
}

#[test]
fn test_negative_change_acts_as_discount() {
    let items = vec![item("Menu del dia", 12.00, &[("Sin postre", -1.50)])];
    assert_eq!(to_f64(order_total(&items)), 10.5);
}

#[test]
fn test_empty_order_totals_zero() {
    assert_eq!(order_total(&[]), Decimal::ZERO);
}

#[test]
fn test_validate_rejects_nan_dish_price() {
    let items = vec![item("Broken", f64::NAN, &[])];
    assert_eq!(
        validate_items(&items),
        Err(PriceError::NotFinite("dish_price"))
    );
}

#[test]
fn test_validate_rejects_negative_dish_price() {
    let items = vec![item("Broken", -1.0, &[])];
    assert_eq!(
        validate_items(&items),
        Err(PriceError::Negative("dish_price"))
    );
}

#[test]
fn test_validate_rejects_infinite_change_price() {
    let items = vec![item("Latte", 3.50, &[("Broken", f64::INFINITY)])];
    assert_eq!(
        validate_items(&items),
        Err(PriceError::NotFinite("change_price"))
    );
}

#[test]
fn test_validate_allows_negative_change_price() {
    let items = vec![item("Latte", 3.50, &[("Discount", -0.50)])];
    assert!(validate_items(&items).is_ok());
}

#[test]
fn test_validate_rejects_excessive_price() {
    let items = vec![item("Gold leaf", MAX_PRICE * 2.0, &[])];
    assert_eq!(
        validate_items(&items),
        Err(PriceError::TooLarge("dish_price"))
    );
}
