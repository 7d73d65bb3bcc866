//! Webフォントの読み込み管理
//!
//! レポートに出てくるフォントをGoogle Fontsのスタイルシートとして登録する。
//! 同じフォント名は一度しか登録しない（ページ寿命の間、削除もしない）。

/// 登録済みのWebフォント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebFont {
    pub name: String,
    /// `<link>` 要素のID（`font-` + 空白を `-` に置換した名前）
    pub element_id: String,
    pub href: String,
}

impl WebFont {
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        Self {
            name: name.to_string(),
            element_id: format!("font-{}", join_words(name, "-")),
            href: format!(
                "https://fonts.googleapis.com/css2?family={}:wght@400;700&display=swap",
                join_words(name, "+")
            ),
        }
    }
}

/// 空白の連続を `separator` に置き換える
pub(crate) fn join_words(text: &str, separator: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(separator)
}

/// フォント登録簿
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontRegistry {
    fonts: Vec<WebFont>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// フォントを登録する。新規に登録した場合のみtrue
    pub fn request(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }

        let font = WebFont::new(name);
        if self.fonts.iter().any(|f| f.element_id == font.element_id) {
            return false;
        }

        tracing::debug!("🔤 フォントを登録: {} ({})", font.name, font.element_id);
        self.fonts.push(font);
        true
    }

    pub fn fonts(&self) -> &[WebFont] {
        &self.fonts
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
