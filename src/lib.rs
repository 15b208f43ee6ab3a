//! eBay検索結果スクレイパーライブラリ
//!
//! - JSレンダリングされた検索結果ページからリストデータを抽出
//! - マークアップ変更に備えたセレクターフォールバックチェーン
//! - 擬人化遅延つきのページング制御
//!
//! # 使用例
//!
//! ```rust,ignore
//! use ebay_scraper_service::{EbayScraper, ListingType, ScrapeConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScrapeConfig::new("vintage camera")
//!         .with_max_pages(3)
//!         .with_listing_type(ListingType::Auction)
//!         .with_headless(true);
//!
//!     let mut scraper = EbayScraper::new(config);
//!     let report = scraper.run().await.unwrap();
//!     println!("records: {}", report.total_records());
//! }
//! ```
//!
//! # tower Service 使用例
//!
//! ```rust,ignore
//! use ebay_scraper_service::{ScraperService, ScrapeRequest};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = ScraperService::new();
//!     let request = ScrapeRequest::new("vintage camera").with_max_pages(2);
//!     let report = service.call(request).await.unwrap();
//!     println!("pages: {}", report.pages_scraped);
//! }
//! ```

pub mod config;
pub mod driver;
pub mod ebay;
pub mod error;
pub mod locator;
pub mod pacing;
pub mod service;
pub mod traits;

// 主要な型をリエクスポート
pub use config::{ListingType, ScrapeConfig};
pub use ebay::{EbayScraper, ListingRecord, ScrapeReport, StopReason};
pub use error::ScraperError;
pub use pacing::{HumanPacing, NoPacing, Pacing};
pub use service::{ScrapeRequest, ScraperService};
pub use traits::BrowserPage;
