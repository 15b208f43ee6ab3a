use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ScraperError;

const SEARCH_BASE_URL: &str = "https://www.ebay.com/sch/i.html";

/// 出品形式フィルター
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingType {
    #[default]
    All,
    Auction,
    BuyNow,
}

impl ListingType {
    /// 検索URLに付与するクエリパラメータ
    fn url_param(&self) -> Option<&'static str> {
        match self {
            ListingType::All => None,
            ListingType::Auction => Some("LH_Auction=1"),
            ListingType::BuyNow => Some("LH_BIN=1"),
        }
    }
}

impl FromStr for ListingType {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ListingType::All),
            "auction" => Ok(ListingType::Auction),
            "buy-now" | "buynow" => Ok(ListingType::BuyNow),
            other => Err(ScraperError::Config(format!(
                "不明な出品形式: {} (all | auction | buy-now)",
                other
            ))),
        }
    }
}

/// eBay検索スクレイプ設定
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// 検索クエリ
    pub query: String,
    /// 取得する最大ページ数
    pub max_pages: u32,
    /// 1ページあたりの件数 (_ipg)
    pub items_per_page: u32,
    /// 出品形式フィルター
    pub listing_type: ListingType,
    /// カテゴリコード (_dcat)
    pub category: Option<String>,
    /// ヘッドレスモード
    pub headless: bool,
    /// リストコンテナ出現待機の上限（ロケーターごと）
    pub container_wait: Duration,
    /// 全ロケーター不発時のページソース保存先
    pub debug_dump_path: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_pages: 10,
            items_per_page: 60,
            listing_type: ListingType::All,
            category: None,
            headless: true,
            container_wait: Duration::from_secs(10),
            debug_dump_path: PathBuf::from("ebay_debug.html"),
        }
    }
}

impl ScrapeConfig {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
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

    pub fn with_container_wait(mut self, wait: Duration) -> Self {
        self.container_wait = wait;
        self
    }

    pub fn with_debug_dump_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_dump_path = path.into();
        self
    }

    /// 設定の妥当性検証
    pub fn validate(&self) -> Result<(), ScraperError> {
        if self.query.trim().is_empty() {
            return Err(ScraperError::Config("検索クエリが空です".into()));
        }
        if self.max_pages == 0 {
            return Err(ScraperError::Config("max_pagesは1以上".into()));
        }
        if self.items_per_page == 0 {
            return Err(ScraperError::Config("items_per_pageは1以上".into()));
        }
        Ok(())
    }

    /// 検索結果ページのURLを構築
    pub fn search_url(&self) -> String {
        let mut params = vec![
            format!("_nkw={}", self.query.trim().replace(' ', "+")),
            format!("_ipg={}", self.items_per_page),
        ];

        if let Some(param) = self.listing_type.url_param() {
            params.push(param.to_string());
        }

        if let Some(category) = &self.category {
            params.push(format!("_dcat={}", category));
        }

        format!("{}?{}", SEARCH_BASE_URL, params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScrapeConfig::new("vintage camera")
            .with_max_pages(3)
            .with_items_per_page(100)
            .with_listing_type(ListingType::Auction)
            .with_category("625")
            .with_headless(false);

        assert_eq!(config.query, "vintage camera");
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.items_per_page, 100);
        assert_eq!(config.listing_type, ListingType::Auction);
        assert_eq!(config.category.as_deref(), Some("625"));
        assert!(!config.headless);
    }

    #[test]
    fn test_search_url_all_params() {
        let url = ScrapeConfig::new("vintage camera")
            .with_items_per_page(100)
            .with_listing_type(ListingType::Auction)
            .with_category("625")
            .search_url();

        assert_eq!(
            url,
            "https://www.ebay.com/sch/i.html?_nkw=vintage+camera&_ipg=100&LH_Auction=1&_dcat=625"
        );
    }

    #[test]
    fn test_search_url_defaults() {
        let url = ScrapeConfig::new("lens").search_url();
        assert_eq!(url, "https://www.ebay.com/sch/i.html?_nkw=lens&_ipg=60");
    }

    #[test]
    fn test_search_url_buy_now() {
        let url = ScrapeConfig::new("lens")
            .with_listing_type(ListingType::BuyNow)
            .search_url();
        assert!(url.contains("LH_BIN=1"));
        assert!(!url.contains("LH_Auction"));
    }

    #[test]
    fn test_listing_type_from_str() {
        assert_eq!("all".parse::<ListingType>().unwrap(), ListingType::All);
        assert_eq!(
            "auction".parse::<ListingType>().unwrap(),
            ListingType::Auction
        );
        assert_eq!(
            "buy-now".parse::<ListingType>().unwrap(),
            ListingType::BuyNow
        );
        assert_eq!(
            "BuyNow".parse::<ListingType>().unwrap(),
            ListingType::BuyNow
        );
        assert!("bid".parse::<ListingType>().is_err());
    }

    #[test]
    fn test_validate() {
        assert!(ScrapeConfig::new("lens").validate().is_ok());
        assert!(ScrapeConfig::new("  ").validate().is_err());
        assert!(ScrapeConfig::new("lens")
            .with_max_pages(0)
            .validate()
            .is_err());
        assert!(ScrapeConfig::new("lens")
            .with_items_per_page(0)
            .validate()
            .is_err());
    }
}
