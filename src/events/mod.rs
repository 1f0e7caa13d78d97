use async_trait::async_trait;
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Domain events emitted by the catalog and order services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // Catalog events
    ProductCreated(i32),
    ProductUpdated(i32),
    ProductRemoved(i32),
    BrandCreated(i32),
    BrandUpdated(i32),
    BrandRemoved(i32),
    CategoryCreated(i32),
    CategoryUpdated(i32),
    CategoryRemoved(i32),
    SupplierCreated(i32),
    SupplierUpdated(i32),
    SupplierRemoved(i32),

    // Order events
    PendingOrderCreated {
        order_id: i32,
        product_id: i32,
    },
    PendingOrderUpdated(i32),
    PendingOrderRemoved(i32),
    OrderReceived {
        pending_order_id: i32,
        received_order_id: i32,
        product_id: i32,
        actually_received: f64,
        damaged: f64,
    },
    ReceivedOrderUpdated(i32),
    ReceivedOrderRemoved(i32),

    // Stock
    StockChanged {
        product_id: i32,
        old_amount: f64,
        new_amount: f64,
    },
}

impl Event {
    /// Short, stable name used for log fields and metric labels.
    pub fn name(&self) -> &'static str {
        match self {
            Event::ProductCreated(_) => "product_created",
            Event::ProductUpdated(_) => "product_updated",
            Event::ProductRemoved(_) => "product_removed",
            Event::BrandCreated(_) => "brand_created",
            Event::BrandUpdated(_) => "brand_updated",
            Event::BrandRemoved(_) => "brand_removed",
            Event::CategoryCreated(_) => "category_created",
            Event::CategoryUpdated(_) => "category_updated",
            Event::CategoryRemoved(_) => "category_removed",
            Event::SupplierCreated(_) => "supplier_created",
            Event::SupplierUpdated(_) => "supplier_updated",
            Event::SupplierRemoved(_) => "supplier_removed",
            Event::PendingOrderCreated { .. } => "pending_order_created",
            Event::PendingOrderUpdated(_) => "pending_order_updated",
            Event::PendingOrderRemoved(_) => "pending_order_removed",
            Event::OrderReceived { .. } => "order_received",
            Event::ReceivedOrderUpdated(_) => "received_order_updated",
            Event::ReceivedOrderRemoved(_) => "received_order_removed",
            Event::StockChanged { .. } => "stock_changed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing when the consumer is gone.
    pub async fn send_or_log(&self, event: Event) {
        let name = event.name();
        if let Err(e) = self.send(event).await {
            warn!(event = name, error = %e, "Dropping domain event");
            counter!("stockroom_events.dropped", 1);
        }
    }
}

/// Creates a bounded event channel.
pub fn channel(capacity: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (EventSender::new(tx), rx)
}

// Handlers implementing this trait receive every event after it is logged.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle_event(&self, event: &Event) -> Result<(), String>;
}

/// Logs every incoming event until all senders are dropped.
pub async fn process_events(rx: mpsc::Receiver<Event>) {
    process_events_with_handlers(rx, Vec::new()).await
}

/// Logs every incoming event and hands it to each registered handler.
pub async fn process_events_with_handlers(
    mut rx: mpsc::Receiver<Event>,
    handlers: Vec<Arc<dyn EventHandler>>,
) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        let name = event.name();
        counter!("stockroom_events.processed", 1, "event" => name);

        match &event {
            Event::OrderReceived {
                pending_order_id,
                received_order_id,
                product_id,
                actually_received,
                damaged,
            } => info!(
                pending_order_id,
                received_order_id,
                product_id,
                actually_received,
                damaged,
                "Order received"
            ),
            Event::StockChanged {
                product_id,
                old_amount,
                new_amount,
            } => info!(product_id, old_amount, new_amount, "Stock changed"),
            other => debug!(event = name, payload = ?other, "Domain event"),
        }

        for handler in &handlers {
            if let Err(e) = handler.handle_event(&event).await {
                error!(event = name, error = %e, "Event handler failed");
            }
        }
    }

    info!("Event processing loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Event>>,
    }

    #[async_trait]
    impl EventHandler for Recorder {
        async fn handle_event(&self, event: &Event) -> Result<(), String> {
            self.seen.lock().await.push(event.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn events_reach_registered_handlers_in_order() {
        let (sender, rx) = channel(8);
        let recorder = Arc::new(Recorder::default());
        let consumer = tokio::spawn(process_events_with_handlers(
            rx,
            vec![recorder.clone() as Arc<dyn EventHandler>],
        ));

        sender.send(Event::ProductCreated(1)).await.unwrap();
        sender
            .send(Event::StockChanged {
                product_id: 1,
                old_amount: 0.0,
                new_amount: 12.0,
            })
            .await
            .unwrap();
        drop(sender);
        consumer.await.unwrap();

        let seen = recorder.seen.lock().await;
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], Event::ProductCreated(1));
        assert_eq!(seen[1].name(), "stock_changed");
    }

    #[tokio::test]
    async fn send_fails_once_consumer_is_gone() {
        let (sender, rx) = channel(1);
        drop(rx);
        assert!(sender.send(Event::BrandRemoved(3)).await.is_err());
        // Must not panic.
        sender.send_or_log(Event::BrandRemoved(3)).await;
    }
}
