use crate::features::auth::{AuthService, UserRole};
use crate::features::settings::models::PortalSettings;
use crate::shared::database::snapshots::{self, PORTAL_SETTINGS_KEY};
use crate::shared::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// ポータル設定サービス
///
/// 設定の読み書きを提供する。更新は管理者のみが行える。
pub struct SettingsService {
    /// データベース接続（スナップショット保存用）
    conn: Arc<Mutex<Connection>>,
    /// 認証サービス（権限判定用）
    auth: Arc<AuthService>,
    /// 現在の設定
    current: Mutex<PortalSettings>,
}

impl SettingsService {
    /// 新しいSettingsServiceを作成する
    ///
    /// # 引数
    /// * `conn` - データベース接続
    /// * `auth` - 認証サービス
    ///
    /// # 戻り値
    /// 既定値の設定を持つサービス（loadで初期化する）
    pub fn new(conn: Arc<Mutex<Connection>>, auth: Arc<AuthService>) -> Self {
        Self {
            conn,
            auth,
            current: Mutex::new(PortalSettings::default()),
        }
    }

    /// 永続化された設定を読み込む（プロセス起動時）
    ///
    /// スナップショットが存在しない場合や破損している場合は既定値を使う。
    ///
    /// # 戻り値
    /// 読み込まれた設定、またはストレージエラー
    pub fn load(&self) -> AppResult<PortalSettings> {
        let stored = {
            let conn = self.conn.lock().unwrap();
            snapshots::read_snapshot(&conn, PORTAL_SETTINGS_KEY)?
        };

        let settings = match stored {
            Some(serialized) => match serde_json::from_str::<PortalSettings>(&serialized) {
                Ok(settings) => settings,
                Err(e) => {
                    // 破損データは既定値で置き換える
                    log::warn!("保存された設定の解析に失敗したため既定値を使用します: {e}");
                    PortalSettings::default()
                }
            },
            None => PortalSettings::default(),
        };

        *self.current.lock().unwrap() = settings.clone();

        Ok(settings)
    }

    /// 現在の設定を取得する
    pub fn get(&self) -> PortalSettings {
        self.current.lock().unwrap().clone()
    }

    /// 設定を更新する（管理者専用）
    ///
    /// 永続化の完了をもって更新完了とし、失敗時はメモリを変更しない。
    ///
    /// # 引数
    /// * `settings` - 新しい設定
    ///
    /// # 戻り値
    /// 更新後の設定、または失敗時はエラー
    pub fn update(&self, settings: PortalSettings) -> AppResult<PortalSettings> {
        if !self.auth.has_permission(UserRole::Admin) {
            return Err(AppError::permission_denied("設定の変更"));
        }

        let serialized = serde_json::to_string(&settings)?;
        {
            let conn = self.conn.lock().unwrap();
            snapshots::write_snapshot(&conn, PORTAL_SETTINGS_KEY, &serialized)?;
        }

        *self.current.lock().unwrap() = settings.clone();

        log::info!("ポータル設定を更新しました");

        Ok(settings)
    }
}
