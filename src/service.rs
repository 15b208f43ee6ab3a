use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tower::Service;
use tracing::info;

use crate::config::{ListingType, ScrapeConfig};
use crate::ebay::{EbayScraper, ScrapeReport};
use crate::error::ScraperError;

/// スクレイピングリクエスト
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub query: String,
    pub max_pages: u32,
    pub items_per_page: u32,
    pub listing_type: ListingType,
    pub category: Option<String>,
    pub headless: bool,
}

impl ScrapeRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_pages: 10,
            items_per_page: 60,
            listing_type: ListingType::All,
            category: None,
            headless: true,
        }
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: u32) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    pub fn with_listing_type(mut self, listing_type: ListingType) -> Self {
        self.listing_type = listing_type;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }
}

impl From<ScrapeRequest> for ScrapeConfig {
    fn from(req: ScrapeRequest) -> Self {
        let mut config = ScrapeConfig::new(req.query)
            .with_max_pages(req.max_pages)
            .with_items_per_page(req.items_per_page)
            .with_listing_type(req.listing_type)
            .with_headless(req.headless);

        if let Some(category) = req.category {
            config = config.with_category(category);
        }
        config
    }
}

/// tower::Serviceを実装したスクレイパーサービス
#[derive(Debug, Clone, Default)]
pub struct ScraperService {
    // 将来的な拡張用（レートリミット、キャッシュなど）
}

impl ScraperService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service<ScrapeRequest> for ScraperService {
    type Response = ScrapeReport;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ScrapeRequest) -> Self::Future {
        info!("スクレイピングリクエスト受信: query={}", req.query);

        Box::pin(async move {
            let config: ScrapeConfig = req.into();
            config.validate()?;

            let mut scraper = EbayScraper::new(config);
            let report = scraper.run().await?;

            info!(
                "スクレイピング完了: pages={}, records={}",
                report.pages_scraped,
                report.total_records()
            );

            Ok(report)
        })
    }
}
