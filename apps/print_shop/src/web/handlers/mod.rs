// print_shop/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod contact_handlers;
pub mod dashboard_handlers;
pub mod order_handlers;
pub mod pricing_handlers;
pub mod profile_handlers;
pub mod shop_handlers;

/// Form and query flags: `yes`, `true`, `1` and `on` in any case are true,
/// everything else is false.
pub fn parse_flag(raw: &str) -> bool {
  matches!(raw.trim().to_ascii_lowercase().as_str(), "yes" | "true" | "1" | "on")
}
