//! WiX source templates.

pub const FIREWALL_TEMPLATE: &str = include_str!("templates/grafana-firewall.wxs.hbs");
pub const SERVICE_TEMPLATE: &str = include_str!("templates/grafana-service.wxs.hbs");
pub const PRODUCT_TEMPLATE: &str = include_str!("templates/product.wxs.hbs");
