//! Wire types shared by the gateway, the client and the terminal views.
//!
//! All of these are transient: they live for one fetch and carry no identity
//! beyond what the upstream backend sends.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(deserialize_with = "string_or_number")]
    pub store_id: String,
    #[serde(default)]
    pub store_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Store {
    /// Name to show and match against inventory; falls back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.store_name.trim().is_empty() {
            &self.store_id
        } else {
            &self.store_name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreList {
    #[serde(default)]
    pub stores: Vec<Store>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    #[serde(default, deserialize_with = "string_or_number")]
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_script: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthStrategy {
    #[serde(default)]
    pub recommendations: Vec<RecommendationItem>,
    #[serde(default)]
    pub fallback_used: bool,
    #[serde(default)]
    pub reasoning_log: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub total_sales: f64,
    #[serde(default)]
    pub product_count: u64,
}

/// A product frequently bought together with the store's best sellers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub lift: f64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub support: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub is_fallback: bool,
}

/// Store profile the recommendation engine weights its scoring for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StoreType {
    #[default]
    Standard,
    Premium,
    Outlet,
}

impl StoreType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StoreType::Standard => "STANDARD",
            StoreType::Premium => "PREMIUM",
            StoreType::Outlet => "OUTLET",
        }
    }
}

impl std::str::FromStr for StoreType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STANDARD" => Ok(StoreType::Standard),
            "PREMIUM" => Ok(StoreType::Premium),
            "OUTLET" => Ok(StoreType::Outlet),
            other => Err(format!("unknown store type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreRecommendations {
    #[serde(deserialize_with = "string_or_number")]
    pub store_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_summary: Option<StoreSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_strategy: Option<GrowthStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association: Option<Vec<AssociationRule>>,
}

impl StoreRecommendations {
    #[must_use]
    pub fn items(&self) -> &[RecommendationItem] {
        self.growth_strategy
            .as_ref()
            .map_or(&[][..], |g| g.recommendations.as_slice())
    }

    #[must_use]
    pub fn associations(&self) -> &[AssociationRule] {
        self.association.as_deref().unwrap_or(&[])
    }

    /// Fixed body the gateway answers with when no backend could serve
    /// recommendations for `store_id`.
    #[must_use]
    pub fn empty_for(store_id: &str) -> Self {
        Self {
            store_id: store_id.to_string(),
            store_summary: Some(StoreSummary::default()),
            growth_strategy: None,
            association: Some(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(rename = "Store_Name", default)]
    pub store_name: String,
    #[serde(rename = "Product_Name", default)]
    pub product_name: String,
    #[serde(rename = "Inventory", default, deserialize_with = "lenient_number")]
    pub inventory: f64,
    #[serde(rename = "Safety_Stock", default, deserialize_with = "lenient_number")]
    pub safety_stock: f64,
    #[serde(rename = "Status", default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

/// Upstream ids arrive as either JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Counts exported from pandas may be `null` or numeric strings; both read as
/// a number, with anything unreadable treated as zero.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_list_accepts_numeric_ids_and_missing_country() {
        let list: StoreList = serde_json::from_value(serde_json::json!({
            "stores": [
                { "store_id": 12, "store_name": "Apple Gangnam" },
                { "store_id": "ST-3", "store_name": "Apple SoHo", "country": "United States" }
            ]
        }))
        .expect("store list");

        assert_eq!(list.stores.len(), 2);
        assert_eq!(list.stores[0].store_id, "12");
        assert!(list.stores[0].country.is_none());
        assert_eq!(list.stores[1].country.as_deref(), Some("United States"));
    }

    #[test]
    fn store_list_without_stores_key_is_empty() {
        let list: StoreList = serde_json::from_str("{}").expect("empty object");
        assert!(list.stores.is_empty());
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let store = Store {
            store_id: "ST-9".to_string(),
            store_name: "  ".to_string(),
            country: None,
        };
        assert_eq!(store.display_name(), "ST-9");
    }

    #[test]
    fn inventory_item_uses_capitalised_wire_names() {
        let snapshot: InventorySnapshot = serde_json::from_value(serde_json::json!({
            "items": [{
                "Store_Name": "Apple Gangnam",
                "Product_Name": "iPhone 15",
                "Inventory": 4,
                "Safety_Stock": 10.5,
                "Status": "Danger"
            }]
        }))
        .expect("inventory");

        let item = &snapshot.items[0];
        assert_eq!(item.product_name, "iPhone 15");
        assert!((item.inventory - 4.0).abs() < f64::EPSILON);
        assert!((item.safety_stock - 10.5).abs() < f64::EPSILON);

        let json = serde_json::to_value(item).expect("serialize");
        assert_eq!(json["Store_Name"], "Apple Gangnam");
    }

    #[test]
    fn inventory_counts_tolerate_null_and_strings() {
        let item: InventoryItem = serde_json::from_value(serde_json::json!({
            "Product_Name": "iPad Air",
            "Inventory": "7",
            "Safety_Stock": null
        }))
        .expect("lenient inventory");
        assert!((item.inventory - 7.0).abs() < f64::EPSILON);
        assert!(item.safety_stock.abs() < f64::EPSILON);
    }

    #[test]
    fn recommendations_items_empty_without_growth_strategy() {
        let recs: StoreRecommendations =
            serde_json::from_value(serde_json::json!({ "store_id": "ST-1" })).expect("recs");
        assert!(recs.items().is_empty());
        assert!(recs.associations().is_empty());
    }

    #[test]
    fn association_rules_decode_with_partial_fields() {
        let recs: StoreRecommendations = serde_json::from_value(serde_json::json!({
            "store_id": "ST-1",
            "association": [{ "product_name": "MagSafe Charger", "lift": 2.4 }]
        }))
        .expect("recs");
        let rules = recs.associations();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].product_name, "MagSafe Charger");
        assert!(!rules[0].is_fallback);
    }

    #[test]
    fn store_type_parses_case_insensitively() {
        assert_eq!("premium".parse::<StoreType>(), Ok(StoreType::Premium));
        assert_eq!(" OUTLET ".parse::<StoreType>(), Ok(StoreType::Outlet));
        assert!("flagship".parse::<StoreType>().is_err());
        assert_eq!(StoreType::default().as_str(), "STANDARD");
    }

    #[test]
    fn empty_for_matches_gateway_default_shape() {
        let json = serde_json::to_value(StoreRecommendations::empty_for("ST-1")).expect("json");
        assert_eq!(json["store_id"], "ST-1");
        assert_eq!(json["store_summary"]["product_count"], 0);
        assert_eq!(json["association"], serde_json::json!([]));
        assert!(json.get("growth_strategy").is_none());
    }
}
