use crate::features::requests::filter::filter_requests;
use crate::features::requests::models::{ReimbursementRequest, RequestFilters};
use crate::shared::errors::{AppError, AppResult};
use chrono::Utc;

/// CSVの固定カラム（外部契約の一部）
const CSV_HEADERS: [&str; 9] = [
    "ID",
    "Title",
    "Amount",
    "Date",
    "Type",
    "Status",
    "Submitted By",
    "Department",
    "Created At",
];

/// ダウンロード用のエクスポート成果物
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    /// ファイル名（ISO-8601の日付サフィックス付き）
    pub file_name: String,
    /// MIMEタイプ
    pub mime_type: String,
    /// UTF-8のCSV本文（ヘッダ行 + 申請ごとの1行）
    pub content: String,
}

/// 申請リストをCSV文字列にレンダリングする
///
/// カンマや引用符を含む自由記述フィールドはRFC 4180の
/// 二重引用符エスケープで出力される。
///
/// # 引数
/// * `requests` - 出力対象の申請（参照リスト）
///
/// # 戻り値
/// CSV文字列、または失敗時はエラー
pub fn render_csv(requests: &[&ReimbursementRequest]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| AppError::operation_failed(format!("CSVヘッダの書き込みに失敗: {e}")))?;

    for request in requests {
        let amount = request.amount.to_string();
        // 作成日時は日付部分のみを出力する
        let created_date = request.created_at.split('T').next().unwrap_or("");

        writer
            .write_record([
                request.id.as_str(),
                request.title.as_str(),
                amount.as_str(),
                request.date.as_str(),
                request.category.as_str(),
                request.status.as_str(),
                request.user_name.as_str(),
                request.user_department.as_str(),
                created_date,
            ])
            .map_err(|e| AppError::operation_failed(format!("CSV行の書き込みに失敗: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::operation_failed(format!("CSVバッファの取り出しに失敗: {e}")))?;

    String::from_utf8(bytes)
        .map_err(|e| AppError::operation_failed(format!("CSVのUTF-8変換に失敗: {e}")))
}

/// 絞り込み条件を適用した申請をCSV成果物としてエクスポートする
///
/// # 引数
/// * `requests` - 申請コレクション
/// * `filters` - 絞り込み条件（一覧表示と同じパイプライン）
///
/// # 戻り値
/// エクスポート成果物、または失敗時はエラー
pub fn export_filtered(
    requests: &[ReimbursementRequest],
    filters: &RequestFilters,
) -> AppResult<CsvExport> {
    let filtered = filter_requests(requests, filters);
    let content = render_csv(&filtered)?;

    let date_suffix = Utc::now().format("%Y-%m-%d");

    Ok(CsvExport {
        file_name: format!("reimbursement_requests_{date_suffix}.csv"),
        mime_type: "text/csv".to_string(),
        content,
    })
}
