use crate::actor_framework::ResourceActor;
use crate::app_system::Config;
use crate::clients::{OrderClient, ProductClient, SessionClient};
use crate::domain::{Order, Product, Session};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub product_client: ProductClient,
    pub session_client: SessionClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    #[instrument(name = "order_system", skip(config))]
    pub fn new(config: &Config) -> Self {
        let buffer = config.actor_buffer_size;
        info!("Starting order system");

        // 1. Catalog and stock ledger
        let product_id_counter = Arc::new(AtomicU64::new(1));
        let next_product_id = move || {
            let id = product_id_counter.fetch_add(1, Ordering::SeqCst);
            format!("product_{}", id)
        };
        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(buffer, next_product_id);
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        // 2. Sessions; credentials are unguessable
        let (session_actor, session_resource_client) =
            ResourceActor::<Session>::new(buffer, || uuid::Uuid::new_v4().simple().to_string());
        let session_client = SessionClient::new(session_resource_client);
        let session_handle = tokio::spawn(session_actor.run());

        // 3. Order store, fronted by the lifecycle engine
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(buffer, || uuid::Uuid::new_v4().to_string());
        let order_client = OrderClient::new(
            order_resource_client,
            product_client.clone(),
            config.stock_on_reject,
        );
        let order_handle = tokio::spawn(order_actor.run());

        info!(stock_on_reject = ?config.stock_on_reject, "Order system started");

        Self {
            order_client,
            product_client,
            session_client,
            handles: vec![product_handle, session_handle, order_handle],
        }
    }

    /// Drops the clients and waits for the actors to drain.
    ///
    /// Actors stop once every client clone is gone, so callers must release
    /// the clones they handed out (e.g. the HTTP router state) first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.product_client);
        drop(self.session_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
