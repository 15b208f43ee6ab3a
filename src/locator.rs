//! セレクターフォールバックチェーン
//!
//! eBayはマークアップを予告なく変更するため、各フィールドを新しい規約から
//! 古い規約の順に並べたロケーター列で引く。最初に成功したものを採用する。

use scraper::Selector;
use tracing::debug;

/// 優先順位付きCSSロケーターの並び（新しいマークアップ規約が先頭）
pub type LocatorChain = &'static [&'static str];

/// チェーンを順に試し、最初に `Some` を返した結果を採用する
///
/// マッチしなかったロケーターはログにも残さない想定内の不発として扱う。
pub fn try_each<T>(
    chain: LocatorChain,
    mut attempt: impl FnMut(&Selector) -> Option<T>,
) -> Option<T> {
    for &css in chain {
        let selector = match Selector::parse(css) {
            Ok(selector) => selector,
            Err(_) => {
                debug!("Invalid selector in chain, skipping: {}", css);
                continue;
            }
        };

        if let Some(value) = attempt(&selector) {
            return Some(value);
        }
    }
    None
}
