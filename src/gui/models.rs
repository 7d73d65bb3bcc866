use crate::api::types::{BrandAnalysis, HistoryId};

/// 表示中のパネル（排他的）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// ブランド説明の入力フォーム
    #[default]
    Input,
    /// 生成中のローディング表示
    Loading,
    /// 分析レポート
    Results,
}

/// ビュー状態（表示パネル + アクティブな履歴ID）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub mode: ViewMode,
    pub active_history_id: Option<HistoryId>,
}

/// インテント処理前後のビュー状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub before: ViewState,
    pub after: ViewState,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// 表示中のレポート
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedReport {
    pub analysis: BrandAnalysis,
    /// 表示用に解決済みのロゴURL
    pub logo_src: String,
}

/// チャットメッセージの送信者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSender {
    User,
    Persona,
}

impl ChatSender {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatSender::User => "user",
            ChatSender::Persona => "persona",
        }
    }
}

/// チャットメッセージID（読み上げボタンの識別にも使う）
pub type MessageId = u64;

/// チャットメッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: ChatSender,
    pub text: String,
    /// コピー完了表示中
    pub copied: bool,
}

/// 入力欄の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Description,
    ChatMessage,
}
