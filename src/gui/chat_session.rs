//! ペルソナチャットのセッション
//!
//! 表示中のレポート1件に紐づく一時的な会話。レポートが変わると破棄される。
//! `epoch` はリセットのたびに進み、古いレポート宛ての返信を捨てるのに使う。

use std::collections::HashMap;

use super::models::{ChatMessage, ChatSender, MessageId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    /// 入力欄の内容
    pub input: String,
    /// 送信中（入力欄は無効化）
    pub sending: bool,
    epoch: u64,
    next_id: MessageId,
    /// コピー表示中のメッセージと、表示を出したクリックのトークン
    copy_marks: HashMap<MessageId, u64>,
    next_copy_token: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 会話を破棄する。IDは使い回さない
    pub fn reset(&mut self) {
        self.messages.clear();
        self.copy_marks.clear();
        self.input.clear();
        self.sending = false;
        self.epoch += 1;
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> MessageId {
        self.push(ChatSender::User, text.into())
    }

    pub fn push_persona(&mut self, text: impl Into<String>) -> MessageId {
        self.push(ChatSender::Persona, text.into())
    }

    fn push(&mut self, sender: ChatSender, text: String) -> MessageId {
        self.next_id += 1;
        let id = self.next_id;
        self.messages.push(ChatMessage {
            id,
            sender,
            text,
            copied: false,
        });
        id
    }

    pub fn message(&self, id: MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// コピー完了表示を出す。解除に使うトークンを返す
    pub fn mark_copied(&mut self, id: MessageId) -> Option<u64> {
        let message = self.messages.iter_mut().find(|m| m.id == id)?;
        message.copied = true;
        self.next_copy_token += 1;
        self.copy_marks.insert(id, self.next_copy_token);
        Some(self.next_copy_token)
    }

    /// コピー完了表示を消す。後からのクリックで出し直されていれば残す
    pub fn clear_copied(&mut self, id: MessageId, token: u64) {
        if self.copy_marks.get(&id) != Some(&token) {
            return;
        }
        self.copy_marks.remove(&id);
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == id) {
            message.copied = false;
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
