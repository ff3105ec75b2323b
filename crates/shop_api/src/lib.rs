//! HTTP client for the shop API: catalog listing and order submission.
//!
//! Transport failures are expected to be logged and dropped by the caller
//! (the order stays un-submitted, the catalog stays stale); nothing here
//! retries or commits partial state.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::domain::{CatalogItem, OrderDraft, OrderResult};
use shared::error::{ApiError, ApiException};

/// Network boundary of the coordination core. Implemented over HTTP by
/// [`ShopApi`]; tests substitute their own.
#[async_trait]
pub trait ShopBackend: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>>;
    async fn fetch_item(&self, id: &str) -> Result<CatalogItem>;
    async fn submit_order(&self, draft: &OrderDraft) -> Result<OrderResult>;
}

/// List envelope used by the catalog endpoint.
#[derive(Debug, Deserialize)]
struct ApiListResponse<T> {
    #[allow(dead_code)]
    total: u64,
    items: Vec<T>,
}

pub struct ShopApi {
    http: Client,
    base_url: String,
    cdn_url: String,
}

impl ShopApi {
    pub fn new(base_url: impl Into<String>, cdn_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            cdn_url: cdn_url.into(),
        }
    }

    /// The API serves image paths as server-relative `.svg` references; the
    /// rendered assets live on the CDN as `.png`.
    fn cdn_image_url(&self, image_path: &str) -> String {
        format!("{}{}", self.cdn_url, image_path.replace(".svg", ".png"))
    }

    fn with_cdn_image(&self, mut item: CatalogItem) -> CatalogItem {
        item.image = self.cdn_image_url(&item.image);
        item
    }
}

/// Turns a non-success response into an error. When the server's own error
/// body decodes, it becomes a typed [`ApiException`] at the root of the chain
/// so callers can downcast to the error code.
async fn decode_error(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    match response.json::<ApiError>().await {
        Ok(body) => anyhow::Error::new(ApiException::from(body))
            .context(format!("shop api returned {status}")),
        Err(err) => {
            tracing::warn!(%status, %err, "shop api error body did not decode");
            anyhow!("shop api returned {status}")
        }
    }
}

#[async_trait]
impl ShopBackend for ShopApi {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>> {
        let response = self
            .http
            .get(format!("{}/product", self.base_url))
            .send()
            .await
            .context("failed to request catalog")?;
        if !response.status().is_success() {
            return Err(decode_error(response).await.context("catalog request rejected"));
        }
        let body: ApiListResponse<CatalogItem> = response
            .json()
            .await
            .context("failed to decode catalog response")?;
        Ok(body
            .items
            .into_iter()
            .map(|item| self.with_cdn_image(item))
            .collect())
    }

    async fn fetch_item(&self, id: &str) -> Result<CatalogItem> {
        let response = self
            .http
            .get(format!("{}/product/{id}", self.base_url))
            .send()
            .await
            .with_context(|| format!("failed to request item {id}"))?;
        if !response.status().is_success() {
            return Err(decode_error(response)
                .await
                .context(format!("item request for {id} rejected")));
        }
        let item: CatalogItem = response
            .json()
            .await
            .context("failed to decode item response")?;
        Ok(self.with_cdn_image(item))
    }

    async fn submit_order(&self, draft: &OrderDraft) -> Result<OrderResult> {
        let response = self
            .http
            .post(format!("{}/order", self.base_url))
            .json(draft)
            .send()
            .await
            .context("failed to submit order")?;
        if !response.status().is_success() {
            return Err(decode_error(response).await.context("order rejected"));
        }
        response
            .json()
            .await
            .context("failed to decode order response")
    }
}
