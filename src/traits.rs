use async_trait::async_trait;
use serde_json::Value;

use crate::error::ScraperError;

/// ブラウザドライバーの抽象化
///
/// レンダリング済みの検索結果ページに対する最小限の操作のみを公開する。
/// 本番実装は `driver::ChromiumPage`、テストでは合成HTMLを返すモックを使う。
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// URLへ遷移し、ナビゲーション完了まで待機
    async fn navigate(&self, url: &str) -> Result<(), ScraperError>;

    /// CSSセレクターにマッチする要素数を返す
    async fn count_elements(&self, css: &str) -> Result<u32, ScraperError>;

    /// ページコンテキストでスクリプトを実行し、評価結果を返す
    async fn run_script(&self, js: &str) -> Result<Value, ScraperError>;

    /// レンダリング済みHTML全体を取得
    async fn content(&self) -> Result<String, ScraperError>;
}
