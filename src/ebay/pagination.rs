//! ページング制御

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ScraperError;
use crate::pacing::Pacing;
use crate::traits::BrowserPage;

use super::selectors;

// 遷移前後の擬人化遅延レンジ
const PRE_CLICK_MIN: Duration = Duration::from_secs(3);
const PRE_CLICK_MAX: Duration = Duration::from_secs(6);
const RENDER_SETTLE_MIN: Duration = Duration::from_millis(800);
const RENDER_SETTLE_MAX: Duration = Duration::from_millis(1500);
const POST_NAV_MIN: Duration = Duration::from_secs(2);
const POST_NAV_MAX: Duration = Duration::from_secs(4);

/// 次ページの有無判定と遷移
pub struct PaginationController<'a> {
    pacing: &'a dyn Pacing,
}

impl<'a> PaginationController<'a> {
    pub fn new(pacing: &'a dyn Pacing) -> Self {
        Self { pacing }
    }

    /// 次ページが存在するか
    ///
    /// コントロールの不在と、存在するが無効化されている状態は別ケースなので
    /// 両方を確認する。
    pub async fn has_next(&self, page: &dyn BrowserPage) -> Result<bool, ScraperError> {
        if page.count_elements(selectors::NEXT_CONTROL).await? == 0 {
            debug!("Next-page control absent");
            return Ok(false);
        }

        if page.count_elements(selectors::NEXT_CONTROL_DISABLED).await? > 0 {
            debug!("Next-page control present but disabled");
            return Ok(false);
        }

        Ok(true)
    }

    /// 次ページへ遷移
    ///
    /// 失敗は例外ではなく `false` で返し、呼び出し側にページングの打ち切りを
    /// 伝える。オーバーレイによるクリック横取りを避けるため遷移は
    /// スクリプトレベルで発火させる。
    pub async fn advance(&self, page: &dyn BrowserPage) -> bool {
        // 固定間隔のリクエストシグネチャを避ける
        self.pacing.pause(PRE_CLICK_MIN, PRE_CLICK_MAX).await;

        let in_view = match page.run_script(selectors::NEXT_INTO_VIEW_JS).await {
            Ok(value) => value.as_bool().unwrap_or(false),
            Err(e) => {
                warn!("Scroll to next-page control failed: {}", e);
                return false;
            }
        };
        if !in_view {
            warn!("Next-page control could not be located");
            return false;
        }

        // レンダリング安定待ち
        self.pacing.pause(RENDER_SETTLE_MIN, RENDER_SETTLE_MAX).await;

        let clicked = match page.run_script(selectors::NEXT_CLICK_JS).await {
            Ok(value) => value.as_bool().unwrap_or(false),
            Err(e) => {
                warn!("Next-page activation failed: {}", e);
                return false;
            }
        };
        if !clicked {
            warn!("Next-page control did not accept activation");
            return false;
        }

        // 遷移後、抽出前にコンテンツの落ち着きを待つ
        self.pacing.pause(POST_NAV_MIN, POST_NAV_MAX).await;
        true
    }
}
