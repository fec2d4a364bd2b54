use crate::shared::config::{get_database_filename, EnvironmentConfig};
use crate::shared::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::PathBuf;

/// データベース接続を初期化し、テーブルを作成する
///
/// # 引数
/// * `config` - 環境設定
///
/// # 戻り値
/// データベース接続、または失敗時はエラー
///
/// # 処理内容
/// 1. アプリケーションデータディレクトリの確保
/// 2. データベースファイルパスの決定
/// 3. データベース接続の開設
/// 4. テーブル作成の実行
pub fn initialize_database(config: &EnvironmentConfig) -> AppResult<Connection> {
    // データベースファイルパスを取得
    let database_path = get_database_path(config)?;

    // データベース接続を開く
    let conn = Connection::open(&database_path)?;

    // テーブルを作成
    create_tables(&conn)?;

    log::info!("データベースを初期化しました: {:?}", database_path);

    Ok(conn)
}

/// アプリデータディレクトリ内のデータベースファイルパスを取得する
///
/// # 引数
/// * `config` - 環境設定
///
/// # 戻り値
/// データベースファイルのパス、または失敗時はエラー
pub fn get_database_path(config: &EnvironmentConfig) -> AppResult<PathBuf> {
    // アプリケーションデータディレクトリを取得
    let app_data_dir = resolve_app_data_dir(config)?;

    // ディレクトリが存在しない場合は作成
    if !app_data_dir.exists() {
        std::fs::create_dir_all(&app_data_dir).map_err(|e| {
            AppError::configuration(format!("アプリデータディレクトリの作成に失敗: {e}"))
        })?;
        log::info!(
            "アプリケーションデータディレクトリを作成: {:?}",
            app_data_dir
        );
    }

    // 環境に応じたデータベースファイル名を決定
    let db_filename = get_database_filename(&config.environment);
    let database_path = app_data_dir.join(db_filename);

    Ok(database_path)
}

/// アプリケーションデータディレクトリを解決する
///
/// # 引数
/// * `config` - 環境設定
///
/// # 戻り値
/// データディレクトリのパス、または失敗時はエラー
///
/// # 解決順序
/// 1. 設定による上書き（PORTAL_DATA_DIR）
/// 2. プラットフォーム既定のデータディレクトリ + "keihi-portal"
fn resolve_app_data_dir(config: &EnvironmentConfig) -> AppResult<PathBuf> {
    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }

    dirs::data_dir()
        .map(|d| d.join("keihi-portal"))
        .ok_or_else(|| {
            AppError::configuration("アプリデータディレクトリの取得に失敗しました".to_string())
        })
}

/// データベーステーブルを作成する
///
/// # 引数
/// * `conn` - データベース接続
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラー
///
/// # テーブル構成
/// スナップショットのキーバリューテーブルのみ。状態はキーごとに
/// 全量上書きで保存されるため、リレーショナルなスキーマは持たない。
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS snapshots (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// インメモリのデータベース接続を作成する（テスト用）
///
/// # 戻り値
/// テーブル作成済みのインメモリ接続、または失敗時はエラー
pub fn create_in_memory_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    create_tables(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::EnvironmentConfig;

    #[test]
    fn test_create_tables() {
        let conn = Connection::open_in_memory().unwrap();

        // テーブル作成が成功することを確認
        let result = create_tables(&conn);
        assert!(result.is_ok());

        // snapshotsテーブルが作成されていることを確認
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='snapshots'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "snapshotsテーブルが作成されていません");
    }

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        // 2回実行してもエラーにならないことを確認
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_in_memory_connection() {
        // インメモリ接続が利用可能であることを確認
        let conn = create_in_memory_connection().unwrap();
        conn.execute(
            "INSERT INTO snapshots (key, value, updated_at) VALUES ('k', 'v', 't')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_get_database_path_with_override() {
        // データディレクトリの上書きが反映されることを確認
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = EnvironmentConfig::zero_latency();
        config.data_dir = Some(temp_dir.path().to_path_buf());

        let path = get_database_path(&config).unwrap();
        assert!(path.starts_with(temp_dir.path()));
        assert_eq!(path.file_name().unwrap(), "dev_portal.db");
    }

    #[test]
    fn test_initialize_database_on_disk() {
        // ディスク上のデータベース初期化が成功することを確認
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = EnvironmentConfig::zero_latency();
        config.data_dir = Some(temp_dir.path().join("nested"));

        let conn = initialize_database(&config).unwrap();
        conn.execute(
            "INSERT INTO snapshots (key, value, updated_at) VALUES ('k', 'v', 't')",
            [],
        )
        .unwrap();
        assert!(temp_dir.path().join("nested").join("dev_portal.db").exists());
    }
}
