/// データベース接続管理
pub mod connection;

/// 永続スナップショット（キーバリュー）の操作
pub mod snapshots;

// 便利な再エクスポート
pub use connection::{
    create_in_memory_connection, create_tables, get_database_path, initialize_database,
};
pub use snapshots::{
    delete_snapshot, read_snapshot, write_snapshot, ACTIVE_PRINCIPAL_KEY, PORTAL_SETTINGS_KEY,
    REIMBURSEMENT_REQUESTS_KEY,
};
