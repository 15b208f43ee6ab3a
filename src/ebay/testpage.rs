//! テスト用の合成結果ページ
//!
//! `BrowserPage` を固定HTMLの列で実装する。`count_elements` は実CSSで
//! カウントするため、セレクターの妥当性もテストで保証される。

use std::sync::Mutex;

use async_trait::async_trait;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::ScraperError;
use crate::traits::BrowserPage;

use super::selectors;

pub(crate) struct MockPage {
    pages: Vec<String>,
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    index: usize,
    clicks: u32,
    fail_click: bool,
}

impl MockPage {
    pub(crate) fn new(pages: Vec<String>) -> Self {
        Self {
            pages,
            state: Mutex::new(MockState::default()),
        }
    }

    pub(crate) fn single(html: String) -> Self {
        Self::new(vec![html])
    }

    /// 次ページクリックが常に失敗するページ
    pub(crate) fn with_failing_click(self) -> Self {
        self.state.lock().unwrap().fail_click = true;
        self
    }

    pub(crate) fn clicks(&self) -> u32 {
        self.state.lock().unwrap().clicks
    }

    fn current_html(&self) -> String {
        let index = self.state.lock().unwrap().index;
        self.pages[index].clone()
    }

    fn count_in_current(&self, css: &str) -> u32 {
        let document = Html::parse_document(&self.current_html());
        let selector = Selector::parse(css).expect("invalid selector in test");
        document.select(&selector).count() as u32
    }

    fn has_enabled_next(&self) -> bool {
        self.count_in_current(selectors::NEXT_CONTROL) > 0
            && self.count_in_current(selectors::NEXT_CONTROL_DISABLED) == 0
    }
}

#[async_trait]
impl BrowserPage for MockPage {
    async fn navigate(&self, _url: &str) -> Result<(), ScraperError> {
        Ok(())
    }

    async fn count_elements(&self, css: &str) -> Result<u32, ScraperError> {
        Ok(self.count_in_current(css))
    }

    async fn run_script(&self, js: &str) -> Result<Value, ScraperError> {
        if js == selectors::NEXT_INTO_VIEW_JS {
            return Ok(Value::Bool(
                self.count_in_current(selectors::NEXT_CONTROL) > 0,
            ));
        }

        if js == selectors::NEXT_CLICK_JS {
            let clickable = self.has_enabled_next();
            let mut state = self.state.lock().unwrap();
            if state.fail_click || !clickable {
                return Ok(Value::Bool(false));
            }
            state.clicks += 1;
            if state.index + 1 < self.pages.len() {
                state.index += 1;
            }
            return Ok(Value::Bool(true));
        }

        // スクロール等は成功扱い
        Ok(Value::Null)
    }

    async fn content(&self) -> Result<String, ScraperError> {
        Ok(self.current_html())
    }
}

/// 本物に近いテキスト量を持つリスト1件分のHTML
pub(crate) fn listing_card(title: &str, price: &str) -> String {
    format!(
        r#"<li class="s-card">
            <div class="su-card-container__header">{title}</div>
            <span class="s-card__price">{price}</span>
            <span class="s-card__shipping">Free shipping</span>
            <a class="image-treatment" href="https://www.ebay.com/itm/1?cachebust=1"></a>
            <img class="s-card__image" src="https://i.ebayimg.com/images/g/1/s-l500.jpg">
        </li>"#
    )
}

/// 構造上は存在するがテキストをほぼ持たない広告・区切りノード
pub(crate) fn noise_card() -> String {
    r#"<li class="s-card"><hr></li>"#.to_string()
}

/// 次ページコントロール
pub(crate) fn next_control(disabled: bool) -> String {
    if disabled {
        r##"<a class="pagination__next disabled" aria-disabled="true" href="#">Next</a>"##.to_string()
    } else {
        r##"<a class="pagination__next" href="#">Next</a>"##.to_string()
    }
}
