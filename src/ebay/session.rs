//! スクレイプセッションのオーケストレーション
//!
//! ページの収集とページングを束ね、終了要因つきのサマリーを返す。
//! ブラウザリソースはセッションが唯一の所有者で、成功・失敗どちらの
//! 経路でも必ず解放する。

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::ScrapeConfig;
use crate::driver::BrowserDriver;
use crate::error::ScraperError;
use crate::pacing::{HumanPacing, Pacing};
use crate::traits::BrowserPage;

use super::collector::ListingCollector;
use super::pagination::PaginationController;
use super::types::{ScrapeReport, StopReason};

// 初回ページロード後の安定待ち
const INITIAL_SETTLE_MIN: Duration = Duration::from_secs(3);
const INITIAL_SETTLE_MAX: Duration = Duration::from_secs(5);

/// eBay検索結果のスクレイプセッション
pub struct EbayScraper {
    config: ScrapeConfig,
    pacing: Arc<dyn Pacing>,
    driver: Option<BrowserDriver>,
}

impl EbayScraper {
    pub fn new(config: ScrapeConfig) -> Self {
        Self {
            config,
            pacing: Arc::new(HumanPacing),
            driver: None,
        }
    }

    /// 遅延戦略を差し替える（テストでは `NoPacing`）
    pub fn with_pacing(mut self, pacing: Arc<dyn Pacing>) -> Self {
        self.pacing = pacing;
        self
    }

    /// ブラウザを起動
    pub async fn initialize(&mut self) -> Result<(), ScraperError> {
        self.config.validate()?;
        let driver = BrowserDriver::launch(&self.config).await?;
        self.driver = Some(driver);
        Ok(())
    }

    /// セッションを実行
    ///
    /// ドライバー取得後はクラッシュで終わらない: どの経路でも部分結果を
    /// 含むレポートを返し、ブラウザを解放する。
    pub async fn run(&mut self) -> Result<ScrapeReport, ScraperError> {
        if self.driver.is_none() {
            self.initialize().await?;
        }

        let report = {
            let driver = self
                .driver
                .as_ref()
                .ok_or_else(|| ScraperError::BrowserInit("ブラウザが初期化されていません".into()))?;

            match driver.open_page().await {
                Ok(page) => {
                    let url = self.config.search_url();
                    info!("Search URL: {}", url);

                    match page.navigate(&url).await {
                        Ok(()) => {
                            self.pacing
                                .pause(INITIAL_SETTLE_MIN, INITIAL_SETTLE_MAX)
                                .await;
                            self.scrape_pages(&page).await
                        }
                        Err(e) => {
                            error!("Failed to load first results page: {}", e);
                            ScrapeReport::failed(e.to_string())
                        }
                    }
                }
                Err(e) => {
                    error!("Failed to open results page: {}", e);
                    ScrapeReport::failed(e.to_string())
                }
            }
        };

        // 取得したリソースは全経路で解放する
        self.close().await;
        Ok(report)
    }

    /// 読み込み済みページからページループを駆動する
    ///
    /// `run` から呼ばれる本体。ブラウザなしで合成ページに対しても
    /// 実行できる。
    pub async fn scrape_pages(&self, page: &dyn BrowserPage) -> ScrapeReport {
        let collector = ListingCollector::new(&self.config, self.pacing.as_ref());
        let pager = PaginationController::new(self.pacing.as_ref());

        let mut records = Vec::new();
        let mut pages_scraped: u32 = 0;

        let stop = loop {
            info!(
                "Scraping page {}/{}",
                pages_scraped + 1,
                self.config.max_pages
            );

            match collector.collect(page, &mut records).await {
                Ok(added) => {
                    info!(
                        "Page {}: {} items added ({} collected so far)",
                        pages_scraped + 1,
                        added,
                        records.len()
                    );
                }
                Err(e) => {
                    // ページ単位のリトライはしない。部分結果を持って終了する
                    error!("Fatal extraction error: {}", e);
                    break StopReason::Fatal(e.to_string());
                }
            }
            pages_scraped += 1;

            if pages_scraped >= self.config.max_pages {
                info!("Reached maximum page limit ({})", self.config.max_pages);
                break StopReason::PageLimit;
            }

            match pager.has_next(page).await {
                Ok(true) => {}
                Ok(false) => {
                    info!("No more result pages available");
                    break StopReason::Exhausted;
                }
                Err(e) => {
                    error!("Fatal pagination error: {}", e);
                    break StopReason::Fatal(e.to_string());
                }
            }

            if !pager.advance(page).await {
                warn!("Could not navigate to the next page");
                break StopReason::NavigationFailed;
            }
        };

        info!(
            "Scraping complete: {} pages, {} records, stop={:?}",
            pages_scraped,
            records.len(),
            stop
        );

        ScrapeReport {
            records,
            pages_scraped,
            stop,
        }
    }

    /// ブラウザを解放（何度呼んでも安全）
    pub async fn close(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.close().await;
        }
    }
}
