use crate::actor_framework::ResourceClient;
use crate::domain::{LineRequest, OrderLine, Product, ProductCreate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for the catalog and stock ledger actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    pub async fn create_product(&self, product: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(product).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await {
            Ok(ProductActionResult::StockLevel(level)) => Ok(level),
            Ok(_) => Err(ProductError::ActorCommunicationError("Unexpected result".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the catalog price. Placed orders keep their own snapshot.
    #[instrument(skip(self))]
    pub async fn set_price(&self, id: String, price: Decimal) -> Result<Product, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id.clone(), ProductAction::SetPrice(price)).await {
            Ok(ProductActionResult::PriceSet(_)) => {}
            Ok(_) => {
                return Err(ProductError::ActorCommunicationError("Unexpected result".to_string()))
            }
            Err(e) => return Err(e.into()),
        }
        self.get_product(id.clone())
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Takes stock for every line in one ledger message and snapshots each
    /// line's unit price. Either every line is reserved or none is.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn reserve_all(&self, lines: &[LineRequest]) -> Result<Vec<OrderLine>, ProductError> {
        debug!("Sending request");
        let actions = lines
            .iter()
            .map(|line| (line.item_id.clone(), ProductAction::ReserveStock(line.quantity)))
            .collect();
        let results = self.inner.perform_batch(actions).await?;

        lines
            .iter()
            .zip(results)
            .map(|(line, result)| match result {
                ProductActionResult::Reserved { unit_price, .. } => Ok(OrderLine {
                    item_id: line.item_id.clone(),
                    quantity: line.quantity,
                    price_at_order_time: unit_price,
                }),
                _ => Err(ProductError::ActorCommunicationError("Unexpected result".to_string())),
            })
            .collect()
    }

    /// Returns units to the ledger, all lines or none.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn restock_all(&self, lines: &[LineRequest]) -> Result<(), ProductError> {
        debug!("Sending request");
        let actions = lines
            .iter()
            .map(|line| (line.item_id.clone(), ProductAction::Restock(line.quantity)))
            .collect();
        self.inner.perform_batch(actions).await?;
        Ok(())
    }
}
