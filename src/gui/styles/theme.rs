//! テーマとスタイルヘルパー

/// CSS クラス名の定数
pub struct CssClasses;

impl CssClasses {
    // レイアウト
    pub const APP_LAYOUT: &'static str = "app-layout";
    pub const SIDEBAR_OPEN: &'static str = "sidebar-open";
    pub const MAIN_CONTENT: &'static str = "main-content";

    // 履歴
    pub const HISTORY_ITEM: &'static str = "history-item";
    pub const ACTIVE: &'static str = "active";
    pub const REMOVING: &'static str = "removing";

    // レポート
    pub const RESULT_CARD: &'static str = "result-card";
    pub const CHAT_MESSAGE: &'static str = "chat-message";
    pub const LANG_BUTTON: &'static str = "lang-btn";
}

fn with_modifiers(base: &str, modifiers: &[(&str, bool)]) -> String {
    let mut classes = base.to_string();
    for (modifier, enabled) in modifiers {
        if *enabled {
            classes.push(' ');
            classes.push_str(modifier);
        }
    }
    classes
}

/// ページ全体のクラス
pub fn get_layout_class(sidebar_open: bool) -> String {
    with_modifiers(
        CssClasses::APP_LAYOUT,
        &[(CssClasses::SIDEBAR_OPEN, sidebar_open)],
    )
}

/// 履歴行のクラス
pub fn get_history_item_class(active: bool, removing: bool) -> String {
    with_modifiers(
        CssClasses::HISTORY_ITEM,
        &[(CssClasses::ACTIVE, active), (CssClasses::REMOVING, removing)],
    )
}

/// 言語ボタンのクラス
pub fn get_language_button_class(selected: bool) -> String {
    with_modifiers(CssClasses::LANG_BUTTON, &[(CssClasses::ACTIVE, selected)])
}

/// CSSの埋め込み用ヘルパー
pub fn get_embedded_css() -> &'static str {
    include_str!("theme.css")
}
