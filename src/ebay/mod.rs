//! eBay検索結果スクレイパーモジュール
//!
//! レイアウト変更に耐えるため、コンテナと各フィールドはロケーターの
//! フォールバックチェーンで引く。抽出はレンダリング済みHTMLの
//! スナップショットに対して行い、ブラウザ操作（待機・スクロール・
//! ページング）と分離してある。

mod collector;
pub mod extract;
mod pagination;
pub mod selectors;
mod session;
#[cfg(test)]
pub(crate) mod testpage;
mod types;

pub use collector::ListingCollector;
pub use pagination::PaginationController;
pub use session::EbayScraper;
pub use types::{ItemOutcome, ListingRecord, ScrapeReport, SkipReason, StopReason, NA};
