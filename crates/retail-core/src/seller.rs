//! Seller quick-dashboard session.
//!
//! Holds the store selection, the recommendation cursor and the local sale
//! counter, and derives everything the seller sees from them. Nothing here is
//! persisted or sent anywhere; a session lives as long as the view that owns
//! it.

use serde::Serialize;

use crate::signal::{find_inventory_match, StockSignal};
use crate::types::{InventoryItem, RecommendationItem, Store, StoreRecommendations};

/// Points added to the expected score for each sale the seller records.
const SOLD_BONUS: i64 = 10;

/// Points per remaining rank when an item carries no model score.
const RANK_STEP: i64 = 25;

/// Token tagging the fetches issued for one store selection.
///
/// Only the ticket from the most recent [`SellerSession::select_store`] is
/// accepted by [`SellerSession::apply_bundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    pub token: u64,
    pub store_id: String,
}

/// Result of the concurrent recommendation + inventory fetch for a store.
///
/// `recommendations` is `None` when that fetch failed. A failed inventory
/// fetch is represented by an empty `inventory`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SellerBundle {
    pub recommendations: Option<StoreRecommendations>,
    pub inventory: Vec<InventoryItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageTag {
    ClosingSoon,
    Bundle,
    TodaysPick,
}

impl MessageTag {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MessageTag::ClosingSoon => "Closing soon",
            MessageTag::Bundle => "Bundle deal",
            MessageTag::TodaysPick => "Today's pick",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketingMessage {
    pub tag: MessageTag,
    pub text: String,
}

/// Serialisable snapshot of a session, as rendered by the views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerView {
    pub store_id: Option<String>,
    pub store_name: Option<String>,
    pub cursor: usize,
    pub total: usize,
    pub current: Option<RecommendationItem>,
    pub signal: Option<StockSignal>,
    pub expected_score: i64,
    pub contribution_pct: Option<u8>,
    pub sold_count: u32,
    pub fallback_used: bool,
    pub message: Option<MarketingMessage>,
}

#[derive(Debug, Clone, Default)]
pub struct SellerSession {
    stores: Vec<Store>,
    selected: Option<String>,
    recommendations: Option<StoreRecommendations>,
    inventory: Vec<InventoryItem>,
    cursor: usize,
    sold_count: u32,
    latest_token: u64,
}

impl SellerSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    #[must_use]
    pub fn selected_store_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn sold_count(&self) -> u32 {
        self.sold_count
    }

    #[must_use]
    pub fn recommendations(&self) -> Option<&StoreRecommendations> {
        self.recommendations.as_ref()
    }

    /// Replaces the store list and selects the first store, if any.
    pub fn set_stores(&mut self, stores: Vec<Store>) -> Option<SelectionTicket> {
        self.stores = stores;
        let first = self.stores.first()?.store_id.clone();
        Some(self.select_store(&first))
    }

    /// Selects a store, resetting the cursor and dropping data fetched for
    /// any previous selection.
    pub fn select_store(&mut self, store_id: &str) -> SelectionTicket {
        self.latest_token += 1;
        self.selected = Some(store_id.to_string());
        self.recommendations = None;
        self.inventory.clear();
        self.cursor = 0;

        SelectionTicket {
            token: self.latest_token,
            store_id: store_id.to_string(),
        }
    }

    /// Applies fetched data for `ticket`. Returns `false` (and changes
    /// nothing) when a newer selection has been made since.
    pub fn apply_bundle(&mut self, ticket: &SelectionTicket, bundle: SellerBundle) -> bool {
        if ticket.token != self.latest_token {
            tracing::debug!(
                store_id = %ticket.store_id,
                token = ticket.token,
                latest = self.latest_token,
                "discarding stale seller bundle"
            );
            return false;
        }

        self.recommendations = bundle.recommendations;
        self.inventory = bundle.inventory;
        self.cursor = 0;
        true
    }

    fn items(&self) -> &[RecommendationItem] {
        self.recommendations
            .as_ref()
            .map_or(&[][..], StoreRecommendations::items)
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&RecommendationItem> {
        self.items().get(self.cursor)
    }

    /// Name of the selected store, from the store list or the bundle summary.
    #[must_use]
    pub fn current_store_name(&self) -> Option<&str> {
        let selected = self.selected.as_deref()?;
        self.stores
            .iter()
            .find(|s| s.store_id == selected)
            .map(Store::display_name)
            .or_else(|| {
                self.recommendations
                    .as_ref()
                    .and_then(|r| r.store_summary.as_ref())
                    .map(|s| s.store_name.as_str())
                    .filter(|name| !name.trim().is_empty())
            })
    }

    /// Advances the cursor, wrapping past the end. No-op when empty.
    pub fn next_recommendation(&mut self) {
        let len = self.items().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Restores counters carried by a stateless client. The cursor wraps into
    /// the current sequence and is 0 when it is empty.
    pub fn restore_counters(&mut self, cursor: usize, sold_count: u32) {
        let len = self.items().len();
        self.cursor = if len == 0 { 0 } else { cursor % len };
        self.sold_count = sold_count;
    }

    pub fn record_sale(&mut self) {
        self.sold_count = self.sold_count.saturating_add(1);
    }

    #[must_use]
    pub fn stock_signal(&self) -> Option<StockSignal> {
        let item = self.current_item()?;
        find_inventory_match(&self.inventory, &item.product_name, self.current_store_name())
            .map(StockSignal::for_item)
    }

    /// Model score as a 0-100 base when present, otherwise a rank-based
    /// fallback; each recorded sale adds a fixed bonus.
    #[must_use]
    pub fn expected_score(&self) -> i64 {
        let base = match self.current_item().and_then(|item| item.score) {
            #[allow(clippy::cast_possible_truncation)]
            Some(score) => (score * 100.0).round() as i64,
            None => {
                let remaining = self.items().len().saturating_sub(self.cursor);
                i64::try_from(remaining).unwrap_or(i64::MAX / RANK_STEP) * RANK_STEP
            }
        };
        base.saturating_add(i64::from(self.sold_count) * SOLD_BONUS)
    }

    /// Display heuristic, capped at 100. Only defined for scored items.
    #[must_use]
    pub fn contribution_pct(&self) -> Option<u8> {
        if self.current_item()?.score.is_none() {
            return None;
        }
        let pct = self.expected_score().clamp(0, 100);
        u8::try_from(pct).ok()
    }

    #[must_use]
    pub fn marketing_message(&self) -> Option<MarketingMessage> {
        let item = self.current_item()?;
        let name = if item.product_name.trim().is_empty() {
            item.product_id.as_str()
        } else {
            item.product_name.as_str()
        };

        if self.stock_signal().is_some_and(StockSignal::is_low) {
            return Some(MarketingMessage {
                tag: MessageTag::ClosingSoon,
                text: format!(
                    "Almost gone! Only a few {name} left in store. Grab yours today before it sells out."
                ),
            });
        }

        let associations = self
            .recommendations
            .as_ref()
            .map_or(&[][..], StoreRecommendations::associations);
        if !associations.is_empty() {
            let partner = associations
                .iter()
                .map(|rule| rule.product_name.trim())
                .find(|partner| !partner.is_empty() && *partner != name);
            let text = match partner {
                Some(partner) => {
                    format!("Better together: pair {name} with {partner} for more value today.")
                }
                None => format!("Better together: ask about bundle offers with {name} today."),
            };
            return Some(MarketingMessage {
                tag: MessageTag::Bundle,
                text,
            });
        }

        let text = item
            .seller_script
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(
                || format!("Today's pick: {name}. {}", item.reason.trim()).trim_end().to_string(),
                str::to_string,
            );
        Some(MarketingMessage {
            tag: MessageTag::TodaysPick,
            text,
        })
    }

    #[must_use]
    pub fn view(&self) -> SellerView {
        SellerView {
            store_id: self.selected.clone(),
            store_name: self.current_store_name().map(str::to_string),
            cursor: self.cursor,
            total: self.items().len(),
            current: self.current_item().cloned(),
            signal: self.stock_signal(),
            expected_score: self.expected_score(),
            contribution_pct: self.contribution_pct(),
            sold_count: self.sold_count,
            fallback_used: self
                .recommendations
                .as_ref()
                .and_then(|r| r.growth_strategy.as_ref())
                .is_some_and(|g| g.fallback_used),
            message: self.marketing_message(),
        }
    }
}
