//! 型付きの描画ツリー
//!
//! セッションから画面構造を組み立てる純粋関数群。文字列のHTMLは作らず、
//! テキストはすべて `Node::Text` として保持する（描画側でエスケープされる）。
//! アイコンも通常のノードなので、再描画のたびに正しく表示される。

use crate::api::types::BrandAnalysis;

use super::chat_session::ChatSession;
use super::dispatcher::{Intent, CHAT_INPUT_ID};
use super::history_store::HistoryStore;
use super::i18n::{Labels, Language};
use super::models::{ChatMessage, ChatSender, DisplayedReport, InputField, ViewMode};
use super::state_management::Session;
use super::styles::theme::{
    get_history_item_class, get_language_button_class, get_layout_class, CssClasses,
};

/// 要素の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    Aside,
    Header,
    Main,
    H1,
    H2,
    H3,
    H4,
    P,
    Em,
    Strong,
    Span,
    Ul,
    Li,
    Img,
    Button,
    Input,
    Textarea,
}

/// アイコン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Download,
    Send,
    Copy,
    Check,
    Speaker,
    Stop,
    Close,
    Menu,
    Plus,
    Spinner,
}

impl Icon {
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Download => "download",
            Icon::Send => "send",
            Icon::Copy => "copy",
            Icon::Check => "check",
            Icon::Speaker => "speaker",
            Icon::Stop => "stop",
            Icon::Close => "x",
            Icon::Menu => "menu",
            Icon::Plus => "plus",
            Icon::Spinner => "spinner",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Download => "⤓",
            Icon::Send => "➤",
            Icon::Copy => "⧉",
            Icon::Check => "✓",
            Icon::Speaker => "🔊",
            Icon::Stop => "■",
            Icon::Close => "×",
            Icon::Menu => "☰",
            Icon::Plus => "+",
            Icon::Spinner => "",
        }
    }
}

/// 入力欄の値とイベントの対応
#[derive(Debug, Clone, PartialEq)]
pub struct InputBinding {
    pub field: InputField,
    pub value: String,
    pub placeholder: String,
    /// Enterキーで送るインテント
    pub on_enter: Option<Intent>,
}

/// 要素ノード
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: Tag,
    pub id: Option<String>,
    pub class: Option<String>,
    pub style: Option<String>,
    pub title: Option<String>,
    pub src: Option<String>,
    pub alt: Option<String>,
    pub disabled: bool,
    pub on_click: Option<Intent>,
    pub binding: Option<InputBinding>,
    pub children: Vec<Node>,
}

/// 描画ツリーのノード
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(ElementNode),
    Text(String),
    Icon(Icon),
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Self {
        Node::Element(element)
    }
}

impl From<Icon> for Node {
    fn from(icon: Icon) -> Self {
        Node::Icon(icon)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

pub fn el(tag: Tag) -> ElementNode {
    ElementNode {
        tag,
        id: None,
        class: None,
        style: None,
        title: None,
        src: None,
        alt: None,
        disabled: false,
        on_click: None,
        binding: None,
        children: Vec::new(),
    }
}

impl ElementNode {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn image(mut self, src: impl Into<String>, alt: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self.alt = Some(alt.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_click(mut self, intent: Intent) -> Self {
        self.on_click = Some(intent);
        self
    }

    pub fn bind(mut self, binding: InputBinding) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

impl Node {
    /// テキストを連結して返す（アイコンは含めない）
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Icon(_) => {}
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// 深さ優先ですべての要素を列挙
    pub fn elements(&self) -> Vec<&ElementNode> {
        let mut out = Vec::new();
        self.collect_elements(&mut out);
        out
    }

    fn collect_elements<'a>(&'a self, out: &mut Vec<&'a ElementNode>) {
        if let Node::Element(element) = self {
            out.push(element);
            for child in &element.children {
                child.collect_elements(out);
            }
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ElementNode> {
        self.elements()
            .into_iter()
            .find(|e| e.id.as_deref() == Some(id))
    }

    pub fn find_by_class(&self, class: &str) -> Vec<&ElementNode> {
        self.elements()
            .into_iter()
            .filter(|e| e.has_class(class))
            .collect()
    }

    /// 子孫に含まれるアイコン
    pub fn icons(&self) -> Vec<Icon> {
        let mut out = Vec::new();
        self.collect_icons(&mut out);
        out
    }

    fn collect_icons(&self, out: &mut Vec<Icon>) {
        match self {
            Node::Icon(icon) => out.push(*icon),
            Node::Text(_) => {}
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_icons(out);
                }
            }
        }
    }
}

impl ElementNode {
    pub fn text_content(&self) -> String {
        Node::Element(self.clone()).text_content()
    }

    pub fn icons(&self) -> Vec<Icon> {
        Node::Element(self.clone()).icons()
    }
}

/// 履歴の作成日時をローカル時刻で表示（解釈できなければNone）
pub fn format_created_at(raw: &str) -> Option<String> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
}

/// CSSの `font-family` に埋め込めるようにフォント名から引用符などを除く
pub fn css_font_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '\'' | '"' | ';' | '\\' | '{' | '}' | '<' | '>'))
        .collect()
}

fn heading(tag: Tag, text: impl Into<String>) -> ElementNode {
    el(tag).child(text.into())
}

fn bullet_list<'a>(items: impl IntoIterator<Item = &'a String>) -> ElementNode {
    el(Tag::Ul).children(items.into_iter().map(|item| el(Tag::Li).child(item.as_str())))
}

fn card() -> ElementNode {
    el(Tag::Div).class(CssClasses::RESULT_CARD)
}

fn grid_item(title: &str, body: impl Into<Node>) -> ElementNode {
    el(Tag::Div)
        .class("grid-item")
        .child(heading(Tag::H4, title))
        .child(body)
}

/// ページ全体
pub fn dashboard_page(session: &Session) -> Node {
    let labels = session.labels();
    el(Tag::Div)
        .class(get_layout_class(session.sidebar_open))
        .child(history_sidebar(&session.history, session, labels))
        .child(
            el(Tag::Main)
                .class(CssClasses::MAIN_CONTENT)
                .child(page_header(session.language, labels))
                .child(main_panel(session, labels)),
        )
        .into()
}

fn page_header(language: Language, labels: &Labels) -> ElementNode {
    el(Tag::Header)
        .class("page-header")
        .child(
            el(Tag::Button)
                .class("sidebar-toggle")
                .title("History")
                .on_click(Intent::ToggleSidebar)
                .child(Icon::Menu),
        )
        .child(heading(Tag::H1, labels.header_title))
        .child(el(Tag::P).class("subtitle").child(labels.header_subtitle))
        .child(language_selector(language))
}

/// 言語セレクター
pub fn language_selector(current: Language) -> ElementNode {
    el(Tag::Div)
        .class("language-selector")
        .children(Language::ALL.into_iter().map(|language| {
            el(Tag::Button)
                .class(get_language_button_class(language == current))
                .title(language.code())
                .on_click(Intent::ChangeLanguage(language))
                .child(language.native_name())
        }))
}

fn main_panel(session: &Session, labels: &Labels) -> ElementNode {
    match (session.mode(), session.report.as_ref()) {
        (ViewMode::Loading, _) => loader(),
        (ViewMode::Results, Some(report)) => results_panel(report, session, labels),
        _ => input_section(&session.description, labels),
    }
}

/// 入力フォーム
pub fn input_section(description: &str, labels: &Labels) -> ElementNode {
    el(Tag::Div)
        .id("input-section")
        .class("input-section")
        .child(
            el(Tag::Textarea).id("brand-description").bind(InputBinding {
                field: InputField::Description,
                value: description.to_string(),
                placeholder: labels.input_placeholder.to_string(),
                on_enter: None,
            }),
        )
        .child(
            el(Tag::Button)
                .id("generate-btn")
                .class("primary-btn")
                .on_click(Intent::Generate)
                .child(labels.design_button),
        )
}

/// ローディング表示
pub fn loader() -> ElementNode {
    el(Tag::Div)
        .id("loader")
        .class("loader-container")
        .child(el(Tag::Div).class("loader").child(Icon::Spinner))
}

/// 履歴サイドバー
pub fn history_sidebar(history: &HistoryStore, session: &Session, labels: &Labels) -> ElementNode {
    let rows = history.rows().iter().map(|row| {
        let id = row.entry.id;
        let mut item = el(Tag::Li)
            .class(get_history_item_class(
                session.is_active_history_item(id),
                row.leaving,
            ))
            .on_click(Intent::SelectHistory(id))
            .child(el(Tag::P).child(row.entry.description.as_str()))
            .child(
                el(Tag::Button)
                    .class("delete-history-btn")
                    .title("Delete")
                    .on_click(Intent::DeleteHistory(id))
                    .child(Icon::Close),
            );
        if let Some(created) = row.entry.created_at.as_deref().and_then(format_created_at) {
            item = item.title(created);
        }
        item
    });

    el(Tag::Aside)
        .id("history-sidebar")
        .class("history-sidebar")
        .child(
            el(Tag::Div)
                .class("sidebar-header")
                .child(heading(Tag::H3, labels.history_title))
                .child(
                    el(Tag::Button)
                        .id("new-design-btn")
                        .class("new-design-btn")
                        .on_click(Intent::NewDesign)
                        .child(Icon::Plus)
                        .child(labels.new_design),
                ),
        )
        .child(el(Tag::Ul).id("history-list").class("history-list").children(rows))
}

/// 結果パネル（レポート一式 + チャット）
pub fn results_panel(report: &DisplayedReport, session: &Session, labels: &Labels) -> ElementNode {
    let analysis = &report.analysis;
    el(Tag::Div)
        .id("brand-output")
        .class("brand-output")
        .child(personality_card(analysis, labels))
        .child(logo_card(&report.logo_src, session.download_busy, labels))
        .child(font_card(analysis, labels))
        .child(
            card()
                .child(heading(Tag::H2, labels.brand_story_title))
                .child(el(Tag::P).child(el(Tag::Em).child(format!("\"{}\"", analysis.brand_story)))),
        )
        .child(
            card()
                .child(heading(Tag::H2, labels.brand_names_title))
                .child(bullet_list(&analysis.brand_names).class("suggestions-list")),
        )
        .child(
            card()
                .child(heading(Tag::H2, labels.slogans_title))
                .child(bullet_list(&analysis.slogans).class("suggestions-list")),
        )
        .child(persona_card(analysis, labels))
        .child(chat_panel(&session.chat, session, labels))
}

fn personality_card(analysis: &BrandAnalysis, labels: &Labels) -> ElementNode {
    let personality = &analysis.brand_personality;
    card().child(heading(Tag::H2, labels.report_title)).child(
        el(Tag::Div)
            .class("grid-2")
            .child(grid_item(
                labels.brand_archetype,
                el(Tag::P).child(personality.archetype.as_str()),
            ))
            .child(grid_item(
                labels.tone_of_voice,
                el(Tag::P).child(personality.tone_of_voice.as_str()),
            ))
            .child(grid_item(labels.core_values, bullet_list(&personality.values)).class("grid-item full-row")),
    )
}

/// ロゴカード。ダウンロード中はスピナーを出してボタンを無効化
pub fn logo_card(logo_src: &str, download_busy: bool, labels: &Labels) -> ElementNode {
    let icon = if download_busy {
        Icon::Spinner
    } else {
        Icon::Download
    };
    card().child(heading(Tag::H2, labels.logo_title)).child(
        el(Tag::Div)
            .id("main-logo-container")
            .class("logo-container")
            .child(el(Tag::Img).id("main-logo-img").image(logo_src, "Generated Brand Logo"))
            .child(
                el(Tag::Button)
                    .id("download-logo-btn")
                    .class("download-logo-btn")
                    .title("Download Logo")
                    .disabled(download_busy)
                    .on_click(Intent::DownloadLogo)
                    .child(icon),
            ),
    )
}

/// フォントのライブプレビュー
pub fn font_card(analysis: &BrandAnalysis, labels: &Labels) -> ElementNode {
    let heading_font = analysis.heading_font();
    let body_font = analysis.body_font();
    card()
        .child(heading(Tag::H2, labels.font_pairing_live))
        .child(
            el(Tag::Div)
                .class("font-preview-container")
                .child(
                    el(Tag::P)
                        .class("font-preview-heading")
                        .style(format!(
                            "font-family: '{}', var(--font-heading);",
                            css_font_name(heading_font)
                        ))
                        .child(labels.font_preview_heading_text),
                )
                .child(
                    el(Tag::P)
                        .class("font-preview-body")
                        .style(format!(
                            "font-family: '{}', var(--font-body);",
                            css_font_name(body_font)
                        ))
                        .child(labels.font_preview_body_text),
                ),
        )
        .child(el(Tag::P).class("font-info").child(format!(
            "{}: {} | {}: {}",
            labels.heading, heading_font, labels.body, body_font
        )))
}

fn labeled_fact(label: &str, value: &str) -> ElementNode {
    el(Tag::Div).class("grid-item").child(
        el(Tag::P)
            .child(el(Tag::Strong).child(format!("{}:", label)))
            .child(format!(" {}", value)),
    )
}

fn persona_card(analysis: &BrandAnalysis, labels: &Labels) -> ElementNode {
    let persona = &analysis.target_audience_persona;
    card()
        .child(heading(
            Tag::H3,
            format!("{}: {}", labels.target_audience, persona.name),
        ))
        .child(
            el(Tag::Div)
                .class("grid-2")
                .child(labeled_fact(labels.age, &persona.age_range))
                .child(labeled_fact(labels.occupation, &persona.occupation)),
        )
        .child(grid_item(labels.interests, bullet_list(&persona.interests)).class("grid-item spaced"))
        .child(grid_item(labels.pain_points, bullet_list(&persona.pain_points)).class("grid-item spaced"))
}

/// ペルソナチャット
pub fn chat_panel(chat: &ChatSession, session: &Session, labels: &Labels) -> ElementNode {
    card()
        .class("result-card persona-chat-container")
        .child(heading(Tag::H2, labels.chat_title))
        .child(
            el(Tag::Div)
                .id("chat-box")
                .class("chat-box")
                .children(chat.messages().iter().map(|m| chat_message(m, session))),
        )
        .child(
            el(Tag::Div)
                .class("chat-input-area")
                .child(
                    el(Tag::Input)
                        .id(CHAT_INPUT_ID)
                        .disabled(chat.sending)
                        .bind(InputBinding {
                            field: InputField::ChatMessage,
                            value: chat.input.clone(),
                            placeholder: labels.chat_placeholder.to_string(),
                            on_enter: Some(Intent::SendChat),
                        }),
                )
                .child(
                    el(Tag::Button)
                        .id("chat-send-btn")
                        .title(labels.chat_button)
                        .disabled(chat.sending)
                        .on_click(Intent::SendChat)
                        .child(Icon::Send),
                ),
        )
}

/// チャットメッセージ1件。ペルソナの発言にだけコピー・読み上げボタンを付ける
pub fn chat_message(message: &ChatMessage, session: &Session) -> ElementNode {
    let bubble = el(Tag::Div)
        .class("message-bubble")
        .child(message.text.as_str());
    let row = el(Tag::Div)
        .class(format!("{} {}", CssClasses::CHAT_MESSAGE, message.sender.as_str()))
        .child(bubble);

    if message.sender != ChatSender::Persona {
        return row;
    }

    let copy_icon = if message.copied {
        Icon::Check
    } else {
        Icon::Copy
    };
    let speak_icon = if session.audio.is_active(message.id) {
        Icon::Stop
    } else {
        Icon::Speaker
    };

    row.child(
        el(Tag::Div)
            .class("chat-message-actions")
            .child(
                el(Tag::Button)
                    .class("chat-action-btn copy-btn")
                    .title("Copy text")
                    .on_click(Intent::CopyMessage(message.id))
                    .child(copy_icon),
            )
            .child(
                el(Tag::Button)
                    .class("chat-action-btn speak-btn")
                    .title("Read aloud")
                    .on_click(Intent::ToggleSpeak(message.id))
                    .child(speak_icon),
            ),
    )
}
