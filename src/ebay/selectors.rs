//! eBay検索結果ページのロケーター定義
//!
//! 各チェーンは新しいマークアップ規約から古い規約の順。eBayはクラス名を
//! 予告なく変えるため、構造変更があったらここに先頭追加する。

use crate::locator::LocatorChain;

/// リスト1件分のコンテナ
pub const CONTAINERS: LocatorChain = &[
    "li.s-card",        // 現行カードレイアウト (2025-10時点)
    "li.s-item",        // 旧アイテムレイアウト
    "div.s-item__info", // 旧infoレイアウト
];

pub const TITLE: LocatorChain = &[
    ".su-card-container__header",
    ".su-card-container__content",
    "div.s-item__title",
    "h3.s-item__title",
    ".s-item__title",
];

pub const PRICE: LocatorChain = &[
    "span.s-card__price",
    ".su-styled-text.s-card__price",
    ".s-item__price",
    "span.s-item__price",
];

pub const SHIPPING: LocatorChain = &[
    ".s-card__shipping",
    ".s-item__shipping",
    "span.s-item__shipping",
];

/// オークション残り時間（固定価格出品では常に不発）
pub const TIME_LEFT: LocatorChain = &[
    ".s-card__time-left",
    ".s-item__time-left",
    "span.s-item__time-left",
];

pub const LINK: LocatorChain = &["a.image-treatment", "a.s-item__link"];

pub const IMAGE: LocatorChain = &[
    "img.s-card__image",
    ".s-item__image-wrapper img",
    "img",
];

/// 「次のページ」コントロール
pub const NEXT_CONTROL: &str = "a.pagination__next";

/// 存在するが無効化されたコントロール。要素の不在とは別ケースとして扱う
pub const NEXT_CONTROL_DISABLED: &str =
    "a.pagination__next[class*='disabled'], a.pagination__next[aria-disabled='true']";

/// 実リスト未満のテキストしか持たない要素は広告・区切りノードとみなす
pub const MIN_LISTING_TEXT_LEN: usize = 30;

/// 実際の商品ではない構造ノードが持つタイトル
pub const PLACEHOLDER_TITLES: &[&str] = &["Shop on eBay", "New Listing"];

/// スクリーンリーダー向けにタイトルへ付くサフィックス
pub const NEW_WINDOW_SUFFIX: &str = "Opens in a new window";

// 遅延読み込みコンテンツを発火させるスクロールパターン
pub const SCROLL_MIDDLE_JS: &str = "window.scrollTo(0, document.body.scrollHeight / 2);";
pub const SCROLL_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight);";
pub const SCROLL_PARTIAL_UP_JS: &str = "window.scrollTo(0, document.body.scrollHeight / 3);";

/// 次ページコントロールをビューポート中央へスクロール
pub const NEXT_INTO_VIEW_JS: &str = r#"
    (function() {
        var next = document.querySelector('a.pagination__next');
        if (!next) {
            return false;
        }
        next.scrollIntoView({block: 'center'});
        return true;
    })()
"#;

/// 次ページコントロールをスクリプトレベルでクリック
///
/// Cookieバナー等のオーバーレイが座標クリックを横取りするため、
/// ポインターイベントではなくJSのclick()で遷移させる。
pub const NEXT_CLICK_JS: &str = r#"
    (function() {
        var next = document.querySelector('a.pagination__next');
        if (!next) {
            return false;
        }
        next.click();
        return true;
    })()
"#;
