use crate::features::auth::directory;
use crate::features::auth::models::{AccountQuery, AuthError, User, UserAccount, UserRole};
use crate::shared::database::snapshots::{self, ACTIVE_PRINCIPAL_KEY};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 認証サービス（アイデンティティストア）
///
/// アクティブな認証主体を1人（または未認証）だけ保持し、
/// ログイン・ログアウト・権限判定・セッション復元を提供する。
pub struct AuthService {
    /// データベース接続（スナップショット保存用）
    conn: Arc<Mutex<Connection>>,
    /// 疑似バックエンドの遅延
    latency: Duration,
    /// アクティブな認証主体
    current: Mutex<Option<User>>,
}

impl AuthService {
    /// 新しいAuthServiceを作成する
    ///
    /// # 引数
    /// * `conn` - データベース接続
    /// * `latency` - 疑似バックエンドの遅延
    ///
    /// # 戻り値
    /// AuthServiceインスタンス（未認証状態）
    pub fn new(conn: Arc<Mutex<Connection>>, latency: Duration) -> Self {
        Self {
            conn,
            latency,
            current: Mutex::new(None),
        }
    }

    /// ログインする
    ///
    /// メールアドレスは大文字小文字を区別せずに固定ディレクトリを検索し、
    /// パスワードが一致した場合にアクティブな認証主体を設定して永続化する。
    /// 疑似ネットワーク遅延の後に1回だけ試行し、リトライは行わない。
    ///
    /// # 引数
    /// * `email` - メールアドレス
    /// * `password` - パスワード
    ///
    /// # 戻り値
    /// 認証されたユーザー情報、または失敗時はエラー
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        // 疑似ネットワーク遅延
        tokio::time::sleep(self.latency).await;

        let entry = directory::find_credential(email).ok_or(AuthError::InvalidCredentials)?;

        if entry.password != password {
            log::warn!("ログインに失敗しました: email={email}");
            return Err(AuthError::InvalidCredentials);
        }

        let user = entry.user.clone();

        // スナップショットへ永続化してからメモリへ反映する
        let serialized = serde_json::to_string(&user)
            .map_err(|e| AuthError::Storage(format!("認証主体のシリアライズに失敗: {e}")))?;
        {
            let conn = self.conn.lock().unwrap();
            snapshots::write_snapshot(&conn, ACTIVE_PRINCIPAL_KEY, &serialized)
                .map_err(|e| AuthError::Storage(e.details()))?;
        }

        *self.current.lock().unwrap() = Some(user.clone());

        log::info!("ログインしました: user_id={}, role={}", user.id, user.role.as_str());

        Ok(user)
    }

    /// ログアウトする
    ///
    /// アクティブな認証主体とその永続レコードをクリアする。常に成功する
    /// （スナップショット削除の失敗はログに残すのみ）。
    pub fn logout(&self) {
        *self.current.lock().unwrap() = None;

        let conn = self.conn.lock().unwrap();
        if let Err(e) = snapshots::delete_snapshot(&conn, ACTIVE_PRINCIPAL_KEY) {
            log::error!("認証主体スナップショットの削除に失敗しました: {}", e.details());
        }

        log::info!("ログアウトしました");
    }

    /// アクティブな認証主体を取得する
    ///
    /// # 戻り値
    /// 認証済みの場合はユーザー情報、未認証の場合はNone
    pub fn current_user(&self) -> Option<User> {
        self.current.lock().unwrap().clone()
    }

    /// 認証済みかどうかを返す
    pub fn is_authenticated(&self) -> bool {
        self.current.lock().unwrap().is_some()
    }

    /// 要求された役割を満たしているかを判定する
    ///
    /// 役割の階層は admin ⊇ manager ⊇ employee。未認証の場合は常にfalse。
    ///
    /// # 引数
    /// * `required` - 要求される役割
    ///
    /// # 戻り値
    /// 要求を満たす場合はtrue
    pub fn has_permission(&self, required: UserRole) -> bool {
        self.current
            .lock()
            .unwrap()
            .as_ref()
            .map(|user| user.role >= required)
            .unwrap_or(false)
    }

    /// 永続化された認証主体を復元する（プロセス起動時）
    ///
    /// スナップショットが存在しない場合は未認証のまま。保存データが
    /// 破損している場合はエラーにせず破棄し、スナップショットも削除する。
    ///
    /// # 戻り値
    /// 復元されたユーザー情報（復元できた場合）、またはストレージエラー
    pub fn restore_session(&self) -> Result<Option<User>, AuthError> {
        let stored = {
            let conn = self.conn.lock().unwrap();
            snapshots::read_snapshot(&conn, ACTIVE_PRINCIPAL_KEY)
                .map_err(|e| AuthError::Storage(e.details()))?
        };

        let Some(serialized) = stored else {
            return Ok(None);
        };

        match serde_json::from_str::<User>(&serialized) {
            Ok(user) => {
                *self.current.lock().unwrap() = Some(user.clone());
                log::info!("セッションを復元しました: user_id={}", user.id);
                Ok(Some(user))
            }
            Err(e) => {
                // 破損データはセッションなしとして扱う
                log::warn!("保存された認証主体の解析に失敗したため破棄します: {e}");
                let conn = self.conn.lock().unwrap();
                if let Err(delete_err) = snapshots::delete_snapshot(&conn, ACTIVE_PRINCIPAL_KEY) {
                    log::error!(
                        "破損スナップショットの削除に失敗しました: {}",
                        delete_err.details()
                    );
                }
                Ok(None)
            }
        }
    }

    /// アカウント一覧を取得する（管理者専用）
    ///
    /// # 引数
    /// * `query` - 絞り込み条件（役割・部署・検索語）
    ///
    /// # 戻り値
    /// 条件を満たすアカウントのリスト、または権限不足エラー
    pub fn list_user_accounts(&self, query: &AccountQuery) -> Result<Vec<UserAccount>, AuthError> {
        if !self.has_permission(UserRole::Admin) {
            return Err(AuthError::PermissionDenied(
                "ユーザー一覧の取得".to_string(),
            ));
        }

        let term = query.search_term.to_lowercase();

        let accounts = directory::user_accounts()
            .iter()
            .filter(|account| query.role.map_or(true, |role| account.role == role))
            .filter(|account| {
                query
                    .department
                    .as_ref()
                    .map_or(true, |dept| &account.department == dept)
            })
            .filter(|account| {
                term.is_empty()
                    || account.name.to_lowercase().contains(&term)
                    || account.email.to_lowercase().contains(&term)
            })
            .cloned()
            .collect();

        Ok(accounts)
    }
}
