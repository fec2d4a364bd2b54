pub mod features;
pub mod shared;

use features::auth::AuthService;
use features::requests::RequestLedger;
use features::settings::SettingsService;
use log::info;
use rusqlite::Connection;
use shared::config::EnvironmentConfig;
use shared::errors::AppResult;
use std::sync::{Arc, Mutex};

// 主要な型の再エクスポート
pub use features::auth::{AccountQuery, AuthError, User, UserAccount, UserRole};
pub use features::requests::{
    CsvExport, Decision, ExpenseCategory, LedgerOperation, ReimbursementRequest, RequestDraft,
    RequestFilters, RequestStatus, SortDirection, SortKey,
};
pub use features::settings::PortalSettings;
pub use shared::errors::{AppError, ErrorSeverity};

/// アプリケーション状態（各ストアを保持する）
///
/// ストアはグローバル変数ではなく、ここで明示的に構築・所有され、
/// ビュー層へ注入される。
pub struct Portal {
    /// 認証サービス（アイデンティティストア）
    pub auth: Arc<AuthService>,
    /// 申請台帳
    pub ledger: RequestLedger,
    /// ポータル設定
    pub settings: SettingsService,
}

impl Portal {
    /// アプリケーションを初期化する
    ///
    /// # 戻り値
    /// 初期化済みのPortal、または失敗時はエラー
    ///
    /// # 処理内容
    /// 1. 環境変数の読み込みとログシステムの初期化
    /// 2. データベースの初期化
    /// 3. 各ストアの構築と永続状態の復元
    pub async fn initialize() -> AppResult<Self> {
        // 環境変数を読み込み（.envファイルがある場合）
        shared::config::load_environment_variables();

        let config = EnvironmentConfig::from_env();

        // ログシステムを初期化
        shared::config::initialize_logging_system(&config);

        info!("アプリケーション初期化を開始します...");

        // アプリ起動時にデータベースを初期化
        let conn = shared::database::initialize_database(&config)?;

        let portal = Self::with_connection(conn, &config).await?;

        info!("アプリケーション初期化が完了しました");

        Ok(portal)
    }

    /// 既存のデータベース接続からPortalを構築する
    ///
    /// テストや組み込み用途のための入口。ログシステムの初期化は行わない。
    ///
    /// # 引数
    /// * `conn` - データベース接続（テーブル作成済み）
    /// * `config` - 環境設定
    ///
    /// # 戻り値
    /// 初期化済みのPortal、または失敗時はエラー
    pub async fn with_connection(conn: Connection, config: &EnvironmentConfig) -> AppResult<Self> {
        let conn = Arc::new(Mutex::new(conn));

        // 認証サービスを構築し、永続化されたセッションを復元する
        let auth = Arc::new(AuthService::new(Arc::clone(&conn), config.latency()));
        auth.restore_session()?;

        // 申請台帳を構築し、コレクションを読み込む
        let ledger = RequestLedger::new(Arc::clone(&conn), Arc::clone(&auth), config.latency());
        ledger.load().await?;

        // ポータル設定を構築し、保存済み設定を読み込む
        let settings = SettingsService::new(Arc::clone(&conn), Arc::clone(&auth));
        settings.load()?;

        Ok(Self {
            auth,
            ledger,
            settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::database::create_in_memory_connection;

    #[tokio::test]
    async fn test_portal_with_connection() {
        let conn = create_in_memory_connection().unwrap();
        let config = EnvironmentConfig::zero_latency();

        let portal = Portal::with_connection(conn, &config).await.unwrap();

        // 初期状態: 未認証・サンプルデータ5件・既定の設定
        assert!(!portal.auth.is_authenticated());
        assert_eq!(portal.ledger.requests().len(), 5);
        assert_eq!(portal.settings.get(), PortalSettings::default());
    }

    #[tokio::test]
    async fn test_portal_full_flow() {
        let conn = create_in_memory_connection().unwrap();
        let config = EnvironmentConfig::zero_latency();
        let portal = Portal::with_connection(conn, &config).await.unwrap();

        // ログイン → 提出 → ログアウト の一連の流れ
        portal
            .auth
            .login("employee@company.com", "password123")
            .await
            .unwrap();

        let draft = RequestDraft {
            title: "Taxi Fare".to_string(),
            amount: 32.50,
            date: "2023-06-01".to_string(),
            category: ExpenseCategory::Travel,
            description: "Client visit.".to_string(),
            receipts: Vec::new(),
        };
        let submitted = portal.ledger.submit_request(&draft).await.unwrap();
        assert_eq!(submitted.status, RequestStatus::Pending);

        portal.auth.logout();
        assert!(!portal.auth.is_authenticated());

        // ログアウト後は提出できない
        let result = portal.ledger.submit_request(&draft).await;
        assert!(matches!(result, Err(AppError::NotAuthenticated)));
    }
}
