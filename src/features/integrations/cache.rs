use std::collections::VecDeque;
use std::sync::Mutex;

/// キャッシュ無効化シグナルの送出先
///
/// 確定時に外部キャッシュ連携へ申請IDをキーとした無効化を通知する。
/// fire-and-forgetであり、連携先が存在しなくても本体の更新は妨げない。
pub struct CacheInvalidator {
    recent: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl CacheInvalidator {
    /// 新しいCacheInvalidatorを作成する
    ///
    /// # 引数
    /// * `capacity` - 直近の無効化キーを保持する最大件数
    pub fn new(capacity: usize) -> Self {
        Self {
            recent: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    /// 申請IDをキーとした無効化シグナルを送出する
    ///
    /// # 引数
    /// * `request_id` - 無効化対象の申請ID
    pub fn invalidate(&self, request_id: &str) {
        log::info!("キャッシュ無効化シグナルを送出しました: request_id={request_id}");

        let mut recent = self.recent.lock().unwrap();
        if recent.len() >= self.capacity {
            recent.pop_front();
        }
        recent.push_back(request_id.to_string());
    }

    /// 直近の無効化キーを取り出してクリアする
    ///
    /// # 戻り値
    /// 送出順の申請IDリスト
    pub fn drain(&self) -> Vec<String> {
        self.recent.lock().unwrap().drain(..).collect()
    }
}

impl Default for CacheInvalidator {
    fn default() -> Self {
        // 既定では直近100件のみ保持する
        Self::new(100)
    }
}
