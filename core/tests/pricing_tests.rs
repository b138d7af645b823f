// tests/pricing_tests.rs
mod common;
use common::*;
use printshop_core::{base_price, quote, Material, NewOrder, DEFAULT_BASE_PRICE, DESIGN_FEE};
use uuid::Uuid;

#[test]
fn test_quote_reference_values() {
  setup_tracing();
  assert_eq!(quote(&Material::parse("pla"), false), 10);
  assert_eq!(quote(&Material::parse("resin"), true), 75);
  assert_eq!(quote(&Material::parse("unknown"), false), 15);
}

#[test]
fn test_base_price_table() {
  let expected = [
    ("pla", 10),
    ("abs", 18),
    ("petg", 18),
    ("resin", 25),
    ("nylon", 25),
    ("metal", 25),
  ];
  for (name, price) in expected {
    assert_eq!(base_price(&Material::parse(name)), price, "material {}", name);
  }
}

#[test]
fn test_unknown_materials_use_default_price() {
  for name in ["wood", "", "carbon fiber", "pla+"] {
    let material = Material::parse(name);
    assert!(!material.is_known());
    assert_eq!(base_price(&material), DEFAULT_BASE_PRICE);
    assert_eq!(quote(&material, true), DEFAULT_BASE_PRICE + DESIGN_FEE);
  }
}

#[test]
fn test_material_parse_is_lenient_about_case_and_whitespace() {
  assert_eq!(Material::parse(" PLA "), Material::Pla);
  assert_eq!(Material::parse("Resin"), Material::Resin);
}

#[test]
fn test_design_fee_is_flat_across_materials() {
  for material in Material::KNOWN {
    assert_eq!(quote(&material, true) - quote(&material, false), DESIGN_FEE);
  }
}

#[test]
fn test_new_order_is_priced_and_pending() {
  let new_order = NewOrder {
    user_id: Uuid::new_v4(),
    service_type: "printing".to_string(),
    material: Material::Metal,
    description: "gear".to_string(),
    needs_design: true,
    file_path: Some("uploads/1-gear.stl".to_string()),
  };
  assert_eq!(new_order.total_price(), 75);

  let order = new_order.into_order(Uuid::new_v4(), t0());
  assert_eq!(order.total_price, 75);
  assert_eq!(order.material, "metal");
  assert_eq!(order.status, printshop_core::OrderStatus::Pending);
  assert_eq!(order.file_path.as_deref(), Some("uploads/1-gear.stl"));
}
