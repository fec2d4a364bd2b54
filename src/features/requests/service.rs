use crate::features::auth::{AuthService, UserRole};
use crate::features::integrations::{
    CacheInvalidator, NotificationEvent, NotificationKind, Notifier,
};
use crate::features::receipts;
use crate::features::requests::export::{self, CsvExport};
use crate::features::requests::filter;
use crate::features::requests::models::{
    Decision, ReimbursementRequest, RequestDraft, RequestFilters, RequestStatus, SortDirection,
    SortKey,
};
use crate::features::requests::repository;
use crate::features::requests::seed;
use crate::shared::errors::{AppError, AppResult};
use chrono::Utc;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 台帳が実行する操作の種類（最終エラースロットのキー）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOperation {
    /// コレクションの読み込み
    Load,
    /// 申請の提出
    Submit,
    /// 申請の確定
    Decide,
}

/// 操作種類ごとの最終エラー（表示バナー用）
#[derive(Debug, Default)]
struct LastErrors {
    load: Option<String>,
    submit: Option<String>,
    decide: Option<String>,
}

/// 申請台帳（リクエストレジャー）
///
/// 申請コレクションと絞り込み状態を所有し、提出・確定のライフサイクルを
/// 強制する。すべての変更操作は 疑似遅延 → 変更 → 全量永続化 の順で行い、
/// 永続化に失敗した場合はメモリ上の状態を呼び出し前にロールバックする。
pub struct RequestLedger {
    /// データベース接続（スナップショット保存用）
    conn: Arc<Mutex<Connection>>,
    /// 認証サービス（申請者・承認者の情報源）
    auth: Arc<AuthService>,
    /// 通知ディスパッチャ（助言的シグナル）
    notifier: Notifier,
    /// キャッシュ無効化の送出先（助言的シグナル）
    cache_invalidator: CacheInvalidator,
    /// 疑似バックエンドの遅延
    latency: Duration,
    /// 申請コレクション（新しい順）
    requests: Mutex<Vec<ReimbursementRequest>>,
    /// 現在の絞り込み条件（永続化しない）
    filters: Mutex<RequestFilters>,
    /// 操作種類ごとの最終エラー
    last_errors: Mutex<LastErrors>,
}

impl RequestLedger {
    /// 新しいRequestLedgerを作成する
    ///
    /// # 引数
    /// * `conn` - データベース接続
    /// * `auth` - 認証サービス
    /// * `latency` - 疑似バックエンドの遅延
    ///
    /// # 戻り値
    /// 空のコレクションを持つ台帳（loadで初期化する）
    pub fn new(conn: Arc<Mutex<Connection>>, auth: Arc<AuthService>, latency: Duration) -> Self {
        Self {
            conn,
            auth,
            notifier: Notifier::default(),
            cache_invalidator: CacheInvalidator::default(),
            latency,
            requests: Mutex::new(Vec::new()),
            filters: Mutex::new(RequestFilters::default()),
            last_errors: Mutex::new(LastErrors::default()),
        }
    }

    /// スナップショットからコレクションを読み込む（プロセス起動時）
    ///
    /// スナップショットが存在しない場合はサンプルデータを投入して永続化する。
    /// 保存データが破損している場合は破棄して再投入する。
    ///
    /// # 戻り値
    /// 読み込まれた申請件数、または失敗時はエラー
    pub async fn load(&self) -> AppResult<usize> {
        let result = self.load_inner().await;
        self.record_outcome(LedgerOperation::Load, &result);
        result
    }

    async fn load_inner(&self) -> AppResult<usize> {
        // 疑似ネットワーク遅延
        tokio::time::sleep(self.latency).await;

        let loaded = {
            let conn = self.conn.lock().unwrap();
            repository::load_requests(&conn)
        };

        let requests = match loaded {
            Ok(Some(requests)) => requests,
            Ok(None) => {
                // 初回起動: サンプルデータを投入して永続化する
                let requests = seed::sample_requests();
                let conn = self.conn.lock().unwrap();
                repository::store_requests(&conn, &requests)?;
                log::info!("サンプル申請データを投入しました: {}件", requests.len());
                requests
            }
            Err(AppError::Json(e)) => {
                // 破損データはセッションなしと同様に破棄して再投入する
                log::warn!("保存された申請コレクションの解析に失敗したため再投入します: {e}");
                let requests = seed::sample_requests();
                let conn = self.conn.lock().unwrap();
                repository::store_requests(&conn, &requests)?;
                requests
            }
            Err(e) => return Err(e),
        };

        let count = requests.len();
        *self.requests.lock().unwrap() = requests;

        log::info!("申請コレクションを読み込みました: {count}件");

        Ok(count)
    }

    /// 申請を提出する
    ///
    /// 認証済みの主体が必要。新しい申請はIDとタイムスタンプを採番し、
    /// 申請者情報を現在の認証主体からコピーして承認待ちで作成され、
    /// コレクションの先頭に追加される。永続化の完了をもって操作完了とし、
    /// 永続化失敗時はメモリを変更せずOperationFailedを返す。
    ///
    /// # 引数
    /// * `draft` - 申請ドラフト
    ///
    /// # 戻り値
    /// 作成された申請、または失敗時はエラー
    pub async fn submit_request(&self, draft: &RequestDraft) -> AppResult<ReimbursementRequest> {
        let result = self.submit_inner(draft).await;
        self.record_outcome(LedgerOperation::Submit, &result);
        result
    }

    async fn submit_inner(&self, draft: &RequestDraft) -> AppResult<ReimbursementRequest> {
        let user = self.auth.current_user().ok_or(AppError::NotAuthenticated)?;

        draft.validate()?;
        let attached = receipts::build_receipts(&draft.receipts)?;

        // 疑似ネットワーク遅延
        tokio::time::sleep(self.latency).await;

        let now = Utc::now().to_rfc3339();
        let request = ReimbursementRequest {
            id: format!("req-{}", uuid::Uuid::new_v4()),
            title: draft.title.clone(),
            amount: draft.amount,
            date: draft.date.clone(),
            category: draft.category,
            description: draft.description.clone(),
            status: RequestStatus::Pending,
            receipts: attached,
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_department: user.department.clone(),
            created_at: now.clone(),
            updated_at: now,
            approver_name: None,
            approver_comment: None,
            approved_or_rejected_at: None,
        };

        {
            let mut current = self.requests.lock().unwrap();

            // 先頭に追加したコレクションを別に構築し、永続化成功後に反映する
            let mut updated = current.clone();
            updated.insert(0, request.clone());

            {
                let conn = self.conn.lock().unwrap();
                repository::store_requests(&conn, &updated).map_err(|e| {
                    AppError::operation_failed(format!("申請の保存に失敗: {}", e.details()))
                })?;
            }

            *current = updated;
        }

        // 助言的シグナル（本体の成否に影響しない）
        self.notifier.dispatch(NotificationEvent {
            event_type: NotificationKind::RequestSubmitted,
            request_id: request.id.clone(),
            status: request.status,
        });

        log::info!(
            "申請を提出しました: id={}, user_id={}, amount={}",
            request.id,
            request.user_id,
            request.amount
        );

        Ok(request)
    }

    /// 申請を確定する（承認または却下）
    ///
    /// マネージャー以上の役割が必要。承認待ちの申請のみ確定でき、
    /// 確定済みの申請への再確定はAlreadyDecidedで拒否される。
    /// 成功時はステータス・承認者名・コメント・確定日時を記録する。
    ///
    /// # 引数
    /// * `id` - 申請ID
    /// * `decision` - 確定内容（承認/却下）
    /// * `comment` - 承認者コメント（任意）
    ///
    /// # 戻り値
    /// 更新後の申請、または失敗時はエラー
    pub async fn decide_request(
        &self,
        id: &str,
        decision: Decision,
        comment: Option<String>,
    ) -> AppResult<ReimbursementRequest> {
        let result = self.decide_inner(id, decision, comment).await;
        self.record_outcome(LedgerOperation::Decide, &result);
        result
    }

    async fn decide_inner(
        &self,
        id: &str,
        decision: Decision,
        comment: Option<String>,
    ) -> AppResult<ReimbursementRequest> {
        let user = self.auth.current_user().ok_or(AppError::NotAuthenticated)?;

        if !self.auth.has_permission(UserRole::Manager) {
            return Err(AppError::permission_denied("申請の承認・却下"));
        }

        // 疑似ネットワーク遅延
        tokio::time::sleep(self.latency).await;

        let decided = {
            let mut current = self.requests.lock().unwrap();

            let index = current
                .iter()
                .position(|request| request.id == id)
                .ok_or_else(|| AppError::not_found("申請"))?;

            if current[index].status.is_terminal() {
                return Err(AppError::AlreadyDecided(id.to_string()));
            }

            // 更新後のコレクションを別に構築し、永続化成功後に反映する
            let mut updated = current.clone();
            let now = Utc::now().to_rfc3339();
            {
                let target = &mut updated[index];
                target.status = decision.status();
                target.approver_name = Some(user.name.clone());
                target.approver_comment = comment;
                target.approved_or_rejected_at = Some(now.clone());
                target.updated_at = now;
            }
            let decided = updated[index].clone();

            {
                let conn = self.conn.lock().unwrap();
                repository::store_requests(&conn, &updated).map_err(|e| {
                    AppError::operation_failed(format!("申請の保存に失敗: {}", e.details()))
                })?;
            }

            *current = updated;
            decided
        };

        // 助言的シグナル（本体の成否に影響しない）
        self.notifier.dispatch(NotificationEvent {
            event_type: NotificationKind::RequestDecided,
            request_id: decided.id.clone(),
            status: decided.status,
        });
        self.cache_invalidator.invalidate(&decided.id);

        log::info!(
            "申請を確定しました: id={}, status={}, approver={}",
            decided.id,
            decided.status.as_str(),
            user.name
        );

        Ok(decided)
    }

    /// IDで申請を取得する
    ///
    /// # 引数
    /// * `id` - 申請ID
    ///
    /// # 戻り値
    /// 申請（存在する場合）。不在はエラーではなくNone
    pub fn get_request_by_id(&self, id: &str) -> Option<ReimbursementRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|request| request.id == id)
            .cloned()
    }

    /// コレクション全体の複製を取得する（新しい順）
    pub fn requests(&self) -> Vec<ReimbursementRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// 絞り込みと並び替えを適用したビューを取得する
    ///
    /// # 引数
    /// * `filters` - 絞り込み条件
    /// * `key` - 並び替えキー
    /// * `direction` - 並び替え方向
    ///
    /// # 戻り値
    /// 条件を満たす申請を並び替えたリスト
    pub fn filtered_and_sorted(
        &self,
        filters: &RequestFilters,
        key: SortKey,
        direction: SortDirection,
    ) -> Vec<ReimbursementRequest> {
        let requests = self.requests.lock().unwrap();
        filter::filtered_and_sorted(&requests, filters, key, direction)
    }

    /// 絞り込み条件を適用したCSVエクスポートを作成する
    ///
    /// 一覧表示と同じ絞り込みパイプラインを適用する。
    ///
    /// # 引数
    /// * `filters` - 絞り込み条件
    ///
    /// # 戻り値
    /// エクスポート成果物、または失敗時はエラー
    pub fn export_csv(&self, filters: &RequestFilters) -> AppResult<CsvExport> {
        let requests = self.requests.lock().unwrap();
        export::export_filtered(&requests, filters)
    }

    /// 現在の絞り込み条件を設定する
    pub fn set_filters(&self, filters: RequestFilters) {
        *self.filters.lock().unwrap() = filters;
    }

    /// 現在の絞り込み条件を取得する
    pub fn filters(&self) -> RequestFilters {
        self.filters.lock().unwrap().clone()
    }

    /// 操作種類ごとの最終エラーを取得する
    ///
    /// 同じ種類の操作が次に成功するまで保持される。
    ///
    /// # 引数
    /// * `operation` - 操作の種類
    ///
    /// # 戻り値
    /// ユーザー向けのエラーメッセージ（エラーがある場合）
    pub fn last_error(&self, operation: LedgerOperation) -> Option<String> {
        let slots = self.last_errors.lock().unwrap();
        match operation {
            LedgerOperation::Load => slots.load.clone(),
            LedgerOperation::Submit => slots.submit.clone(),
            LedgerOperation::Decide => slots.decide.clone(),
        }
    }

    /// 通知ディスパッチャへの参照を取得する（検証用）
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// キャッシュ無効化送出先への参照を取得する（検証用）
    pub fn cache_invalidator(&self) -> &CacheInvalidator {
        &self.cache_invalidator
    }

    /// 操作結果を最終エラースロットへ反映する
    fn record_outcome<T>(&self, operation: LedgerOperation, result: &AppResult<T>) {
        let mut slots = self.last_errors.lock().unwrap();
        let slot = match operation {
            LedgerOperation::Load => &mut slots.load,
            LedgerOperation::Submit => &mut slots.submit,
            LedgerOperation::Decide => &mut slots.decide,
        };

        match result {
            Ok(_) => *slot = None,
            Err(e) => {
                log::error!("台帳操作に失敗しました: {:?}: {}", operation, e.details());
                *slot = Some(e.user_message());
            }
        }
    }
}
