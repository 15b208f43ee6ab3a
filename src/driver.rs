//! chromiumoxide による `BrowserPage` 実装
//!
//! ボット検知対策（automationフラグ無効化・実在風User-Agent・通常のウィンドウ
//! サイズ）はここで完結させ、抽出コアには持ち込まない。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::ScrapeConfig;
use crate::error::ScraperError;
use crate::traits::BrowserPage;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// ブラウザプロセスのハンドル
///
/// セッションの寿命の間、ただ一つだけ保持される。
pub struct BrowserDriver {
    browser: Browser,
}

impl BrowserDriver {
    /// ブラウザを起動
    pub async fn launch(config: &ScrapeConfig) -> Result<Self, ScraperError> {
        info!("Launching browser...");

        let mut builder = BrowserConfig::builder()
            .window_size(1920, 1080)
            .request_timeout(Duration::from_secs(60))
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--no-sandbox")
            .arg(format!("--user-agent={}", USER_AGENT));

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ブラウザイベントハンドラをバックグラウンドで実行
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        info!("Browser launched");
        Ok(Self { browser })
    }

    /// 新しいページを開く
    pub async fn open_page(&self) -> Result<ChromiumPage, ScraperError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        Ok(ChromiumPage {
            page: Arc::new(page),
        })
    }

    /// ブラウザを終了
    pub async fn close(mut self) {
        info!("Closing browser...");
        if let Err(e) = self.browser.close().await {
            debug!("Browser close error: {}", e);
        }
        info!("Browser closed");
    }
}

/// 実ブラウザ上のページ
pub struct ChromiumPage {
    page: Arc<Page>,
}

#[async_trait]
impl BrowserPage for ChromiumPage {
    async fn navigate(&self, url: &str) -> Result<(), ScraperError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;

        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;

        Ok(())
    }

    async fn count_elements(&self, css: &str) -> Result<u32, ScraperError> {
        let js = format!(r#"document.querySelectorAll("{}").length"#, css);
        let result = self
            .page
            .evaluate(js.as_str())
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        Ok(result.into_value::<u32>().unwrap_or(0))
    }

    async fn run_script(&self, js: &str) -> Result<Value, ScraperError> {
        let result = self
            .page
            .evaluate(js)
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn content(&self) -> Result<String, ScraperError> {
        self.page
            .content()
            .await
            .map_err(|e| ScraperError::Extraction(e.to_string()))
    }
}
