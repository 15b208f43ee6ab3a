//! 検索結果1ページ分のレコード収集

use std::time::{Duration, Instant};

use scraper::{ElementRef, Html, Selector};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::ScrapeConfig;
use crate::error::ScraperError;
use crate::pacing::Pacing;
use crate::traits::BrowserPage;

use super::extract;
use super::selectors;
use super::types::{ItemOutcome, ListingRecord, SkipReason};

const CONTAINER_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// コンテナ要素1件を抽出結果に振り分ける
///
/// 実リスト未満のテキストしか持たない広告・区切りノードは、ロケーターを
/// 試す前に `EmptyNode` としてスキップ扱いにする。
fn classify(item: ElementRef) -> ItemOutcome {
    let text_len = item.text().collect::<String>().trim().len();
    if text_len < selectors::MIN_LISTING_TEXT_LEN {
        return ItemOutcome::Skipped(SkipReason::EmptyNode);
    }
    extract::build_record(item)
}

/// 読み込み済みの検索結果ページからリストを収集する
pub struct ListingCollector<'a> {
    config: &'a ScrapeConfig,
    pacing: &'a dyn Pacing,
}

impl<'a> ListingCollector<'a> {
    pub fn new(config: &'a ScrapeConfig, pacing: &'a dyn Pacing) -> Self {
        Self { config, pacing }
    }

    /// ページ上のリストを抽出してアキュムレータへ追記する
    ///
    /// 戻り値はこの呼び出しで追加した件数（累計ではない）。全ロケーター
    /// 不発はソフト失敗: ページソースを保存して0件を返し、セッションは
    /// 継続する。
    pub async fn collect(
        &self,
        page: &dyn BrowserPage,
        records: &mut Vec<ListingRecord>,
    ) -> Result<usize, ScraperError> {
        let Some(container_css) = self.wait_for_containers(page).await? else {
            warn!("No listing containers found with any locator");
            self.dump_page_source(page).await;
            return Ok(0);
        };

        self.trigger_lazy_content(page).await;

        let html = page.content().await?;
        let document = Html::parse_document(&html);
        let container = Selector::parse(container_css)
            .map_err(|e| ScraperError::Extraction(format!("コンテナセレクター: {:?}", e)))?;

        let mut added = 0;
        let mut skipped = 0;

        for item in document.select(&container) {
            match classify(item) {
                ItemOutcome::Scraped(record) => {
                    records.push(record);
                    added += 1;
                }
                ItemOutcome::Skipped(reason) => {
                    debug!("Skipped listing element: {:?}", reason);
                    skipped += 1;
                }
            }
        }

        info!(
            "Collected {} listings from page ({} elements skipped)",
            added, skipped
        );
        Ok(added)
    }

    /// コンテナロケーターを優先順に、各々に上限付きの出現待機を与えて試す
    ///
    /// 先頭ロケーターのタイムアウトで打ち切らず、必ず後続も試すこと。
    async fn wait_for_containers(
        &self,
        page: &dyn BrowserPage,
    ) -> Result<Option<&'static str>, ScraperError> {
        for &css in selectors::CONTAINERS {
            let start = Instant::now();
            loop {
                let count = page.count_elements(css).await?;
                if count > 0 {
                    debug!("Container locator matched: {} ({} elements)", css, count);
                    return Ok(Some(css));
                }
                if start.elapsed() >= self.config.container_wait {
                    debug!("Container locator timed out: {}", css);
                    break;
                }
                sleep(CONTAINER_POLL_INTERVAL).await;
            }
        }
        Ok(None)
    }

    /// スクロールパターンで遅延読み込みコンテンツを発火させる
    ///
    /// 画像のsrc等は要素が可視になるまで埋まらないため、抽出前に必須。
    async fn trigger_lazy_content(&self, page: &dyn BrowserPage) {
        let steps: [(&str, u64, u64); 3] = [
            (selectors::SCROLL_MIDDLE_JS, 500, 1500),
            (selectors::SCROLL_BOTTOM_JS, 500, 1500),
            (selectors::SCROLL_PARTIAL_UP_JS, 300, 800),
        ];

        for (js, min_ms, max_ms) in steps {
            if let Err(e) = page.run_script(js).await {
                debug!("Scroll script failed: {}", e);
            }
            self.pacing
                .pause(
                    Duration::from_millis(min_ms),
                    Duration::from_millis(max_ms),
                )
                .await;
        }
    }

    /// 診断用にページソースを保存（ベストエフォート）
    async fn dump_page_source(&self, page: &dyn BrowserPage) {
        let html = match page.content().await {
            Ok(html) => html,
            Err(e) => {
                warn!("Could not capture page source for diagnostics: {}", e);
                return;
            }
        };

        let path = &self.config.debug_dump_path;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(parent);
            }
        }

        match std::fs::write(path, html) {
            Ok(()) => info!("Saved page source to {:?}", path),
            Err(e) => warn!("Failed to save page source to {:?}: {}", path, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebay::testpage::{listing_card, noise_card, MockPage};
    use crate::pacing::NoPacing;

    fn test_config() -> ScrapeConfig {
        ScrapeConfig::new("test")
            .with_container_wait(Duration::ZERO)
            .with_debug_dump_path(std::env::temp_dir().join("collector_test_dump.html"))
    }

    #[test]
    fn test_classify_reports_skip_reasons() {
        let html = Html::parse_document(&format!(
            "<html><body><ul>{}{}<li class=\"s-card\"><div class=\"su-card-container__header\">Shop on eBay</div><span>sponsored placement filler text block</span></li></ul></body></html>",
            listing_card("Vintage Camera Lens 50mm f1.8 Excellent", "$120.00"),
            noise_card(),
        ));
        let selector = Selector::parse("li.s-card").unwrap();
        let outcomes: Vec<_> = html.select(&selector).map(classify).collect();

        assert!(matches!(outcomes[0], ItemOutcome::Scraped(_)));
        // ほぼ空のノードは理由つきでスキップされ、黙って消えない
        assert!(matches!(
            outcomes[1],
            ItemOutcome::Skipped(SkipReason::EmptyNode)
        ));
        assert!(matches!(
            outcomes[2],
            ItemOutcome::Skipped(SkipReason::MissingTitle)
        ));
    }

    #[tokio::test]
    async fn test_collect_filters_noise_elements() {
        let html = format!(
            "<html><body><ul>{}{}{}</ul></body></html>",
            listing_card("Vintage Camera Lens 50mm f1.8 Excellent", "$120.00"),
            noise_card(),
            listing_card("Another Perfectly Real Camera Listing", "$45.50"),
        );
        let page = MockPage::single(html);
        let config = test_config();
        let collector = ListingCollector::new(&config, &NoPacing);

        let mut records = Vec::new();
        let added = collector.collect(&page, &mut records).await.unwrap();

        assert_eq!(added, 2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price, "$120.00");
    }

    #[tokio::test]
    async fn test_collect_falls_back_to_legacy_container() {
        // 現行レイアウトのロケーターは不発、旧レイアウトのみマッチするページ
        let html = r#"<html><body><ul>
            <li class="s-item">
                <h3 class="s-item__title">Legacy Layout Camera Listing Item</h3>
                <span class="s-item__price">$99.00</span>
            </li>
        </ul></body></html>"#;
        let page = MockPage::single(html.to_string());
        let config = test_config();
        let collector = ListingCollector::new(&config, &NoPacing);

        let mut records = Vec::new();
        let added = collector.collect(&page, &mut records).await.unwrap();

        assert_eq!(added, 1);
        assert_eq!(records[0].title, "Legacy Layout Camera Listing Item");
        assert_eq!(records[0].price, "$99.00");
    }

    #[tokio::test]
    async fn test_collect_container_miss_is_soft_failure() {
        let dump_path = std::env::temp_dir().join("collector_miss_dump.html");
        let _ = std::fs::remove_file(&dump_path);

        let page = MockPage::single("<html><body><p>layout changed</p></body></html>".to_string());
        let config = ScrapeConfig::new("test")
            .with_container_wait(Duration::ZERO)
            .with_debug_dump_path(&dump_path);
        let collector = ListingCollector::new(&config, &NoPacing);

        let mut records = Vec::new();
        let added = collector.collect(&page, &mut records).await.unwrap();

        assert_eq!(added, 0);
        assert!(records.is_empty());
        // 診断アーティファクトが書かれていること
        let dumped = std::fs::read_to_string(&dump_path).unwrap();
        assert!(dumped.contains("layout changed"));
        let _ = std::fs::remove_file(&dump_path);
    }
}
