use crate::features::requests::models::RequestStatus;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;

/// 通知イベントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// 申請が提出された
    RequestSubmitted,
    /// 申請が確定された（承認または却下）
    RequestDecided,
}

/// 外部メッセージング連携へ送られる通知イベント
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    /// イベントの種類
    pub event_type: NotificationKind,
    /// 対象の申請ID
    pub request_id: String,
    /// イベント時点の申請ステータス
    pub status: RequestStatus,
}

/// 通知ディスパッチャ
///
/// 提出・確定時のfire-and-forget通知を模す。配送は保証されず、
/// 呼び出し元を失敗させることもない。送出済みイベントは検証用に
/// 有界のアウトボックスへ保持される。
pub struct Notifier {
    outbox: Mutex<VecDeque<NotificationEvent>>,
    capacity: usize,
}

impl Notifier {
    /// 新しいNotifierを作成する
    ///
    /// # 引数
    /// * `capacity` - アウトボックスの最大保持件数
    pub fn new(capacity: usize) -> Self {
        Self {
            outbox: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    /// 通知イベントを送出する（fire-and-forget）
    ///
    /// # 引数
    /// * `event` - 送出するイベント
    pub fn dispatch(&self, event: NotificationEvent) {
        log::info!(
            "通知イベントを送出しました: type={:?}, request_id={}, status={}",
            event.event_type,
            event.request_id,
            event.status.as_str()
        );

        let mut outbox = self.outbox.lock().unwrap();
        if outbox.len() >= self.capacity {
            outbox.pop_front();
        }
        outbox.push_back(event);
    }

    /// アウトボックスの内容を取り出してクリアする
    ///
    /// # 戻り値
    /// 送出順のイベントリスト
    pub fn drain(&self) -> Vec<NotificationEvent> {
        self.outbox.lock().unwrap().drain(..).collect()
    }

    /// アウトボックスに保持されているイベント数を返す
    pub fn pending_count(&self) -> usize {
        self.outbox.lock().unwrap().len()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        // 既定では直近100件のみ保持する
        Self::new(100)
    }
}
