//! 読み上げ再生の状態管理
//!
//! 同時に鳴るのは1つだけ。再生のたびにトークンを発行し、
//! 停止や別メッセージの再生で置き換えられた後に届いた音声は捨てる。

use super::models::MessageId;

/// プラットフォーム側の再生ハンドル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioHandle(pub u64);

/// 再生トークン
pub type PlaybackToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// 音声を取得中
    Requesting,
    /// 再生中
    Playing(AudioHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePlayback {
    pub message_id: MessageId,
    pub token: PlaybackToken,
    pub phase: PlaybackPhase,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioPlayback {
    active: Option<ActivePlayback>,
    next_token: PlaybackToken,
}

impl AudioPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    /// このメッセージのボタンが「停止」表示か
    pub fn is_active(&self, message_id: MessageId) -> bool {
        self.active.is_some_and(|a| a.message_id == message_id)
    }

    pub fn active(&self) -> Option<ActivePlayback> {
        self.active
    }

    pub fn is_current(&self, token: PlaybackToken) -> bool {
        self.active.is_some_and(|a| a.token == token)
    }

    /// 新しい再生を開始する。前の再生は破棄され、そのハンドルを返す
    pub fn begin(&mut self, message_id: MessageId) -> (PlaybackToken, Option<AudioHandle>) {
        let previous = self.stop();
        self.next_token += 1;
        let token = self.next_token;
        self.active = Some(ActivePlayback {
            message_id,
            token,
            phase: PlaybackPhase::Requesting,
        });
        (token, previous)
    }

    /// 再生中の音声を停止状態にする。実際に鳴っていたらハンドルを返す
    pub fn stop(&mut self) -> Option<AudioHandle> {
        match self.active.take()?.phase {
            PlaybackPhase::Playing(handle) => Some(handle),
            PlaybackPhase::Requesting => None,
        }
    }

    /// 取得した音声の再生開始を記録する。置き換え済みならfalse
    pub fn attach(&mut self, token: PlaybackToken, handle: AudioHandle) -> bool {
        match self.active.as_mut() {
            Some(active) if active.token == token => {
                active.phase = PlaybackPhase::Playing(handle);
                true
            }
            _ => false,
        }
    }

    /// 再生終了（自然終了・失敗）。置き換え済みなら何もしない
    pub fn finish(&mut self, token: PlaybackToken) {
        if self.is_current(token) {
            self.active = None;
        }
    }
}
