use crate::app_system::OrderSystem;
use crate::domain::{ProductCreate, SessionCreate};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument};

/// Startup data: catalog items and pre-issued sessions.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub products: Vec<ProductCreate>,
    #[serde(default)]
    pub sessions: Vec<SessionCreate>,
}

impl SeedData {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing seed file {}", path.display()))
    }

    #[instrument(skip_all, fields(products = self.products.len(), sessions = self.sessions.len()))]
    pub async fn apply(self, system: &OrderSystem) -> Result<()> {
        for product in self.products {
            let created = system.product_client.create_product(product).await?;
            info!(product_id = %created.id, stock = created.stock, "Seeded product");
        }

        for params in self.sessions {
            let generated = params.credential.is_none();
            let session = system.session_client.issue(params).await?;
            if generated {
                // Generated credentials are shown once so an operator can use them.
                info!(user_id = %session.user_id, credential = %session.credential, "Seeded session");
            } else {
                info!(user_id = %session.user_id, "Seeded session");
            }
        }
        Ok(())
    }
}
