use crate::features::receipts::models::{Receipt, ReceiptDraft, ReceiptKind};
use crate::shared::errors::{AppError, AppResult};
use chrono::Utc;

/// 画像として扱う拡張子
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// ファイル名から領収書の大分類を推定する
///
/// 画像系の拡張子はImage、それ以外（PDF含む）はDocumentとする。
///
/// # 引数
/// * `file_name` - 元のファイル名
///
/// # 戻り値
/// 推定された大分類
pub fn infer_kind(file_name: &str) -> ReceiptKind {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        ReceiptKind::Image
    } else {
        ReceiptKind::Document
    }
}

/// ドラフトから領収書を作成する（提出時）
///
/// 新しいIDとアップロード日時を付与する。作成後の領収書は不変。
///
/// # 引数
/// * `draft` - 領収書ドラフト
///
/// # 戻り値
/// 作成された領収書、またはバリデーションエラー
pub fn build_receipt(draft: &ReceiptDraft) -> AppResult<Receipt> {
    if draft.file_name.trim().is_empty() {
        return Err(AppError::validation(
            "領収書のファイル名を指定してください".to_string(),
        ));
    }

    Ok(Receipt {
        id: format!("rec-{}", uuid::Uuid::new_v4()),
        file_name: draft.file_name.clone(),
        file_url: draft.file_url.clone(),
        file_type: infer_kind(&draft.file_name),
        uploaded_at: Utc::now().to_rfc3339(),
    })
}

/// 複数のドラフトから領収書のリストを作成する
///
/// # 引数
/// * `drafts` - 領収書ドラフトのスライス
///
/// # 戻り値
/// 作成された領収書のリスト、または最初のバリデーションエラー
pub fn build_receipts(drafts: &[ReceiptDraft]) -> AppResult<Vec<Receipt>> {
    drafts.iter().map(build_receipt).collect()
}
