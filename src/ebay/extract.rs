//! フィールド抽出とレコード組み立て
//!
//! レンダリング済みHTMLのスナップショットに対する純粋な処理。タイトル以外の
//! フィールドは個別に "N/A" へ縮退し、レコード自体は失わない。

use chrono::Utc;
use scraper::ElementRef;

use crate::locator::{self, LocatorChain};

use super::selectors;
use super::types::{ItemOutcome, ListingRecord, SkipReason, NA};

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// タイトルを抽出
///
/// プレースホルダー（"Shop on eBay" 等）しか持たない要素は実リストではない
/// ため `None` を返し、呼び出し側に要素ごとスキップさせる。
pub fn extract_title(item: ElementRef) -> Option<String> {
    locator::try_each(selectors::TITLE, |selector| {
        let raw = text_of(item.select(selector).next()?);

        // アクセシビリティ用サフィックスを除去
        let title = match raw.find(selectors::NEW_WINDOW_SUFFIX) {
            Some(pos) => raw[..pos].trim().to_string(),
            None => raw,
        };

        if title.is_empty() || selectors::PLACEHOLDER_TITLES.contains(&title.as_str()) {
            return None;
        }
        Some(title)
    })
}

/// テキストフィールドを抽出（不発なら "N/A"）
pub fn extract_field(item: ElementRef, chain: LocatorChain) -> String {
    locator::try_each(chain, |selector| {
        let text = text_of(item.select(selector).next()?);
        (!text.is_empty()).then_some(text)
    })
    .unwrap_or_else(|| NA.to_string())
}

/// クエリパラメータを除去してリンクを正規化
///
/// 同一商品がキャッシュバスター付きの複数URLで現れるため、後段の
/// リンクベース重複排除が成立するようここで揃える。冪等。
pub fn canonicalize_link(href: &str) -> String {
    href.split('?').next().unwrap_or(href).to_string()
}

/// 商品リンクを抽出（不発なら "N/A"）
pub fn extract_link(item: ElementRef) -> String {
    locator::try_each(selectors::LINK, |selector| {
        let href = item.select(selector).next()?.value().attr("href")?;
        (!href.is_empty()).then(|| canonicalize_link(href))
    })
    .unwrap_or_else(|| NA.to_string())
}

/// 商品画像URLを抽出（不発なら "N/A"）
///
/// 遅延読み込み前の要素は src が空で data-src 側に入っていることがある。
pub fn extract_image(item: ElementRef) -> String {
    locator::try_each(selectors::IMAGE, |selector| {
        let img = item.select(selector).next()?;
        let src = img
            .value()
            .attr("src")
            .filter(|s| !s.is_empty())
            .or_else(|| img.value().attr("data-src"))?;

        (src.contains("ebayimg") || src.contains("http")).then(|| src.to_string())
    })
    .unwrap_or_else(|| NA.to_string())
}

/// リスト要素1件からレコードを組み立てる
///
/// タイトルが門番: 取れなければ他フィールドは見ずにスキップする。
/// `scraped_at` はバッチ開始時刻ではなく組み立て成功時点の時刻。
pub fn build_record(item: ElementRef) -> ItemOutcome {
    let Some(title) = extract_title(item) else {
        return ItemOutcome::Skipped(SkipReason::MissingTitle);
    };

    ItemOutcome::Scraped(ListingRecord {
        title,
        price: extract_field(item, selectors::PRICE),
        shipping: extract_field(item, selectors::SHIPPING),
        time_left: extract_field(item, selectors::TIME_LEFT),
        link: extract_link(item),
        image_url: extract_image(item),
        scraped_at: Utc::now(),
    })
}
