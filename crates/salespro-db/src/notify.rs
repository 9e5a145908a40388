//! # Change Notification
//!
//! In-process fan-out of row-change signals, one event per successful
//! mutation. Subscribers get the affected entity's name and nothing else;
//! the contract is "re-fetch the list you care about", not "apply this row".
//!
//! ## Delivery Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Change Fan-Out                                     │
//! │                                                                         │
//! │  repository mutation ──► ChangeNotifier::notify(entity)                │
//! │                               │                                         │
//! │                 ┌─────────────┼─────────────┐                          │
//! │                 ▼             ▼             ▼                          │
//! │           subscriber A  subscriber B   (no subscribers: dropped)       │
//! │                                                                         │
//! │  • Best-effort, at-least-once from the subscriber's view:              │
//! │    a locally-issued write is followed by its own echo                  │
//! │  • No ordering guarantee relative to concurrent writes                 │
//! │  • Slow subscribers observe Lagged and should re-fetch everything      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;
use tracing::trace;

/// Buffered events per subscriber before the channel reports lag.
pub const CHANGE_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// Entity
// =============================================================================

/// The entity collections a change event can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    CatalogItems,
    InventoryItems,
    Sales,
    Expenses,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::CatalogItems => "catalog_items",
            Entity::InventoryItems => "inventory_items",
            Entity::Sales => "sales",
            Entity::Expenses => "expenses",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Change Event
// =============================================================================

/// A row-change signal. Carries no row payload; subscribers re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub entity: Entity,
}

// =============================================================================
// Change Notifier
// =============================================================================

/// Cloneable handle publishing change events to all current subscribers.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    /// Creates a notifier with the default per-subscriber buffer.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        ChangeNotifier { tx }
    }

    /// Publishes a change signal for the given entity.
    ///
    /// Never fails: with no subscribers the event is simply dropped.
    pub fn notify(&self, entity: Entity) {
        let delivered = self.tx.send(ChangeEvent { entity }).unwrap_or(0);
        trace!(entity = %entity, delivered, "change event published");
    }

    /// Subscribes to future change events.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        ChangeNotifier::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let notifier = ChangeNotifier::new();
        let mut rx = notifier.subscribe();

        notifier.notify(Entity::Sales);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.entity, Entity::Sales);
    }

    #[test]
    fn test_notify_without_subscribers_is_a_no_op() {
        let notifier = ChangeNotifier::new();
        notifier.notify(Entity::CatalogItems);
    }

    #[test]
    fn test_entity_names_match_table_names() {
        assert_eq!(Entity::CatalogItems.to_string(), "catalog_items");
        assert_eq!(Entity::Expenses.to_string(), "expenses");
    }

    #[test]
    fn test_event_serializes_entity_name() {
        let json = serde_json::to_string(&ChangeEvent {
            entity: Entity::InventoryItems,
        })
        .unwrap();
        assert_eq!(json, r#"{"entity":"inventory_items"}"#);
    }
}
