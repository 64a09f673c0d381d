//! Integration tests for a full counter session
//!
//! These tests drive the loose entry points the way a script caller does:
//! raw values in, sentinels or rendered text out.

use serde_json::{json, Value};
use tally_core::fare::{
    calculate_surge, find_cheapest_and_costliest, get_distance_difference, parse_fare, round_fare,
};
use tally_core::menu::{
    create_thali_description, generate_thali_receipt, get_thali_stats, search_thali_menu,
};
use tally_core::{FormatConfig, MenuFormatter, ThaliStats, INVALID_FARE, NO_SURGE};

fn todays_menu() -> Value {
    json!([
        {"name": "Rajasthani Thali", "items": ["dal baati", "churma", "papad"], "price": 250, "isVeg": true},
        {"name": "Hyderabadi Thali", "items": ["biryani", "mirchi salan", "raita"], "price": 350, "isVeg": false},
        {"name": "Bengali Thali", "items": ["machher jhol", "cholar dal"], "price": 299.5, "isVeg": false},
        {"name": "Gujarati Thali", "items": ["dhokla", "kadhi", "thepla"], "price": 200, "isVeg": true}
    ])
}

#[test]
fn test_meter_ride_from_spoken_fares() {
    let quoted = ["152.50", "98", "210.75 final", "abc"];
    let parsed: Vec<Value> = quoted.iter().map(|q| json!(parse_fare(&json!(q)))).collect();

    assert_eq!(parsed[3], json!(INVALID_FARE));

    let valid: Vec<Value> = parsed.into_iter().filter(|fare| fare != &json!(INVALID_FARE)).collect();
    let range = find_cheapest_and_costliest(&valid).unwrap();
    assert_eq!(range.cheapest, 98.0);
    assert_eq!(range.costliest, 210.75);

    assert_eq!(round_fare(&json!(range.costliest), &json!(1)), "210.8");
    assert_eq!(calculate_surge(&json!(range.cheapest), &json!(1.5)), 147.0);
}

#[test]
fn test_sentinels_for_wrong_kinds() {
    for bad in [json!(null), json!(true), json!([1]), json!({"fare": 1})] {
        assert_eq!(parse_fare(&bad), INVALID_FARE);
        assert_eq!(round_fare(&bad, &json!(2)), "");
        assert_eq!(calculate_surge(&bad, &json!(2)), NO_SURGE);
        assert_eq!(get_distance_difference(&bad, &json!(2)), INVALID_FARE);
        assert_eq!(create_thali_description(&bad), "");
        assert_eq!(generate_thali_receipt(&bad, &todays_menu()), "");
    }
}

#[test]
fn test_distance_between_markers() {
    assert_eq!(get_distance_difference(&json!("15"), &json!("8")), 7.0);
    assert_eq!(get_distance_difference(&json!(8), &json!("15")), 7.0);
    assert_eq!(get_distance_difference(&json!("x"), &json!(3)), INVALID_FARE);
}

#[test]
fn test_menu_board_descriptions() {
    let menu = todays_menu();
    let lines: Vec<String> = menu
        .as_array()
        .unwrap()
        .iter()
        .map(create_thali_description)
        .collect();

    assert_eq!(
        lines[0],
        "RAJASTHANI THALI (Veg) - Items: dal baati, churma, papad - Rs.250.00"
    );
    assert_eq!(
        lines[2],
        "BENGALI THALI (Non-Veg) - Items: machher jhol, cholar dal - Rs.299.50"
    );
}

#[test]
fn test_menu_stats() {
    let stats = get_thali_stats(&todays_menu()).unwrap();

    assert_eq!(
        stats,
        ThaliStats {
            total_thalis: 4,
            veg_count: 2,
            non_veg_count: 2,
            avg_price: "274.88".to_string(),
            cheapest: 200.0,
            costliest: 350.0,
            names: vec![
                "Rajasthani Thali".to_string(),
                "Hyderabadi Thali".to_string(),
                "Bengali Thali".to_string(),
                "Gujarati Thali".to_string(),
            ],
        }
    );
    assert_eq!(get_thali_stats(&json!([])), None);
}

#[test]
fn test_search_then_receipt() {
    let hits = search_thali_menu(&todays_menu(), &json!("DAL"));
    let names: Vec<&str> = hits.iter().map(|thali| thali.name.as_str()).collect();
    assert_eq!(names, vec!["Rajasthani Thali", "Bengali Thali"]);

    let order = serde_json::to_value(&hits).unwrap();
    let receipt = generate_thali_receipt(&json!("Amit"), &order);

    assert_eq!(
        receipt,
        "THALI RECEIPT\n---\nCustomer: AMIT\n- Rajasthani Thali x Rs.250\n- Bengali Thali x Rs.299.5\n---\nTotal: Rs.549.5\nItems: 2"
    );
    assert_eq!(receipt.lines().filter(|line| line.starts_with("- ")).count(), hits.len());
}

#[test]
fn test_search_invalid_input_and_no_match_look_the_same() {
    assert!(search_thali_menu(&todays_menu(), &json!("pizza")).is_empty());
    assert!(search_thali_menu(&todays_menu(), &json!(42)).is_empty());
    assert!(search_thali_menu(&json!(null), &json!("dal")).is_empty());
}

#[test]
fn test_receipt_with_configured_labels() {
    let config = FormatConfig::from_toml_str(
        r#"
        receipt_title = "HIGHWAY DHABA"
        separator = "=========="
        "#,
    )
    .unwrap();
    let formatter = MenuFormatter::new(config).unwrap();

    let thalis: Vec<_> = todays_menu()
        .as_array()
        .unwrap()
        .iter()
        .map(|record| tally_core::ComboItem::from_value(record).unwrap())
        .collect();
    let receipt = formatter.receipt("Riya", &thalis[..1]).unwrap();

    assert!(receipt.starts_with("HIGHWAY DHABA\n==========\nCustomer: RIYA\n"));
    assert!(receipt.ends_with("Total: Rs.250\nItems: 1"));
}
