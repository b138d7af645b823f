// printshop_core/src/pricing.rs

//! The pricing engine. Pure and deterministic.
//!
//! Materials form a closed set with an explicit fallback: an unrecognised
//! material is priced at [`DEFAULT_BASE_PRICE`], never rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base price for any material outside the known set.
pub const DEFAULT_BASE_PRICE: i32 = 15;

/// Flat fee added when the customer asks the shop to design the model.
pub const DESIGN_FEE: i32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Material {
  Pla,
  Abs,
  Petg,
  Resin,
  Nylon,
  Metal,
  /// Anything else, kept verbatim (trimmed, lowercased).
  Other(String),
}

impl Material {
  /// Every material with its own price, in catalogue order.
  pub const KNOWN: [Material; 6] = [
    Material::Pla,
    Material::Abs,
    Material::Petg,
    Material::Resin,
    Material::Nylon,
    Material::Metal,
  ];

  /// Lenient parse: matching ignores surrounding whitespace and ASCII case.
  pub fn parse(raw: &str) -> Self {
    let normalized = raw.trim().to_ascii_lowercase();
    match normalized.as_str() {
      "pla" => Material::Pla,
      "abs" => Material::Abs,
      "petg" => Material::Petg,
      "resin" => Material::Resin,
      "nylon" => Material::Nylon,
      "metal" => Material::Metal,
      _ => Material::Other(normalized),
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      Material::Pla => "pla",
      Material::Abs => "abs",
      Material::Petg => "petg",
      Material::Resin => "resin",
      Material::Nylon => "nylon",
      Material::Metal => "metal",
      Material::Other(name) => name,
    }
  }

  pub fn is_known(&self) -> bool {
    !matches!(self, Material::Other(_))
  }
}

impl fmt::Display for Material {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Material {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Material::parse(s))
  }
}

impl Serialize for Material {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for Material {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(Material::parse(&raw))
  }
}

pub fn base_price(material: &Material) -> i32 {
  match material {
    Material::Pla => 10,
    Material::Abs | Material::Petg => 18,
    Material::Resin | Material::Nylon | Material::Metal => 25,
    Material::Other(_) => DEFAULT_BASE_PRICE,
  }
}

/// Total price for a print job. The value computed at order creation is the
/// one persisted; any client-side figure is an estimate of this.
pub fn quote(material: &Material, needs_design: bool) -> i32 {
  base_price(material) + if needs_design { DESIGN_FEE } else { 0 }
}

/// Itemised quote, as returned by the estimate endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
  pub material: Material,
  pub base_price: i32,
  pub design_fee: i32,
  pub total_price: i32,
}

impl Quote {
  pub fn for_material(material: Material, needs_design: bool) -> Self {
    let base = base_price(&material);
    let design_fee = if needs_design { DESIGN_FEE } else { 0 };
    Self {
      total_price: quote(&material, needs_design),
      base_price: base,
      design_fee,
      material,
    }
  }
}
