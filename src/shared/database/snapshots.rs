use crate::shared::errors::AppResult;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

/// アクティブな認証主体を保存するスナップショットキー
pub const ACTIVE_PRINCIPAL_KEY: &str = "active_principal";

/// 申請コレクション全体を保存するスナップショットキー
pub const REIMBURSEMENT_REQUESTS_KEY: &str = "reimbursement_requests";

/// ポータル設定を保存するスナップショットキー
pub const PORTAL_SETTINGS_KEY: &str = "portal_settings";

/// スナップショットを保存する（キーごとに全量上書き）
///
/// # 引数
/// * `conn` - データベース接続
/// * `key` - スナップショットキー
/// * `value` - シリアライズ済みの状態（JSON文字列）
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラー
pub fn write_snapshot(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    let now = Utc::now().to_rfc3339();

    conn.execute(
        "INSERT OR REPLACE INTO snapshots (key, value, updated_at) VALUES (?1, ?2, ?3)",
        params![key, value, now],
    )?;

    Ok(())
}

/// スナップショットを読み込む
///
/// # 引数
/// * `conn` - データベース接続
/// * `key` - スナップショットキー
///
/// # 戻り値
/// 保存されている値（存在する場合）、または失敗時はエラー
pub fn read_snapshot(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM snapshots WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    Ok(value)
}

/// スナップショットを削除する
///
/// # 引数
/// * `conn` - データベース接続
/// * `key` - スナップショットキー
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラー
pub fn delete_snapshot(conn: &Connection, key: &str) -> AppResult<()> {
    conn.execute("DELETE FROM snapshots WHERE key = ?1", params![key])?;

    Ok(())
}
