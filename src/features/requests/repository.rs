use crate::features::requests::models::ReimbursementRequest;
use crate::shared::database::snapshots::{self, REIMBURSEMENT_REQUESTS_KEY};
use crate::shared::errors::AppResult;
use rusqlite::Connection;

/// 申請コレクション全体をスナップショットへ保存する
///
/// 毎回全量をシリアライズして上書きする（差分保存はしない）。
///
/// # 引数
/// * `conn` - データベース接続
/// * `requests` - 申請コレクション
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラー
pub fn store_requests(conn: &Connection, requests: &[ReimbursementRequest]) -> AppResult<()> {
    let serialized = serde_json::to_string(requests)?;
    snapshots::write_snapshot(conn, REIMBURSEMENT_REQUESTS_KEY, &serialized)
}

/// スナップショットから申請コレクションを読み込む
///
/// # 引数
/// * `conn` - データベース接続
///
/// # 戻り値
/// 保存されたコレクション（存在する場合）、または失敗時はエラー。
/// 保存データのJSON解析失敗はJsonエラーとして返す（呼び出し側で破棄を判断する）。
pub fn load_requests(conn: &Connection) -> AppResult<Option<Vec<ReimbursementRequest>>> {
    let Some(serialized) = snapshots::read_snapshot(conn, REIMBURSEMENT_REQUESTS_KEY)? else {
        return Ok(None);
    };

    let requests: Vec<ReimbursementRequest> = serde_json::from_str(&serialized)?;
    Ok(Some(requests))
}
