//! eBayスクレイプ関連の型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// フィールドが取れなかったときのセンチネル値
pub const NA: &str = "N/A";

/// 検索結果1件分のレコード
///
/// serdeのフィールド名は外部ライターが出力するCSV/スプレッドシートの
/// 列名に合わせてある。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Shipping")]
    pub shipping: String,
    #[serde(rename = "Time Left")]
    pub time_left: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Image URL")]
    pub image_url: String,
    #[serde(rename = "Scraped At")]
    pub scraped_at: DateTime<Utc>,
}

/// 要素1件の抽出結果
///
/// 広告・区切りノードの混在が前提のため、1件の失敗はレコード損失ではなく
/// スキップとして集計する。
#[derive(Debug, Clone)]
pub enum ItemOutcome {
    Scraped(ListingRecord),
    Skipped(SkipReason),
}

/// 要素をスキップした理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// テキストがほぼ空（広告・区切りノード）
    EmptyNode,
    /// タイトル不在、またはプレースホルダーのみ
    MissingTitle,
}

/// ページループの終了要因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// max_pagesに到達（正常終了）
    PageLimit,
    /// 次ページコントロールが不在または無効（自然な結果末尾）
    Exhausted,
    /// 次ページへの遷移失敗
    NavigationFailed,
    /// セッション継続不能なエラー（収集済みレコードは保持される）
    Fatal(String),
}

/// セッション完了サマリー
#[derive(Debug)]
pub struct ScrapeReport {
    /// 収集レコード（挿入順 = スクレイプ順）
    pub records: Vec<ListingRecord>,
    /// 実際に処理したページ数
    pub pages_scraped: u32,
    /// 終了要因
    pub stop: StopReason,
}

impl ScrapeReport {
    /// ページ処理前に失敗した空レポート
    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            pages_scraped: 0,
            stop: StopReason::Fatal(reason.into()),
        }
    }

    pub fn total_records(&self) -> usize {
        self.records.len()
    }
}
