use crate::features::receipts::{Receipt, ReceiptDraft};
use crate::shared::errors::{AppError, AppResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 経費カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    /// 出張・交通
    Travel,
    /// 飲食
    Meals,
    /// 備品
    Equipment,
    /// ソフトウェア
    Software,
    /// その他
    Other,
}

impl ExpenseCategory {
    /// 全カテゴリの一覧
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Travel,
        ExpenseCategory::Meals,
        ExpenseCategory::Equipment,
        ExpenseCategory::Software,
        ExpenseCategory::Other,
    ];

    /// カテゴリの表示用文字列を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Travel => "travel",
            ExpenseCategory::Meals => "meals",
            ExpenseCategory::Equipment => "equipment",
            ExpenseCategory::Software => "software",
            ExpenseCategory::Other => "other",
        }
    }
}

/// 申請のライフサイクルステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// 承認待ち（初期状態）
    Pending,
    /// 承認済み（終端状態）
    Approved,
    /// 却下済み（終端状態）
    Rejected,
}

impl RequestStatus {
    /// ステータスの表示用文字列を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// 終端状態かどうかを返す
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// 承認者の確定内容（承認または却下）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// 承認する
    Approve,
    /// 却下する
    Reject,
}

impl Decision {
    /// 確定後のステータスを取得する
    pub fn status(&self) -> RequestStatus {
        match self {
            Decision::Approve => RequestStatus::Approved,
            Decision::Reject => RequestStatus::Rejected,
        }
    }
}

/// 経費精算申請
///
/// 申請者・承認者の情報はイベント発生時点の値コピーであり、
/// 元のユーザーレコードが後から変わっても過去の申請は変化しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReimbursementRequest {
    /// 申請ID
    pub id: String,
    /// 件名
    pub title: String,
    /// 金額（正の数）
    pub amount: f64,
    /// 経費発生日（YYYY-MM-DD形式）
    pub date: String,
    /// カテゴリ
    #[serde(rename = "type")]
    pub category: ExpenseCategory,
    /// 説明
    pub description: String,
    /// ライフサイクルステータス
    pub status: RequestStatus,
    /// 添付された領収書
    pub receipts: Vec<Receipt>,
    /// 申請者のユーザーID（作成時点のコピー）
    pub user_id: String,
    /// 申請者の表示名（作成時点のコピー）
    pub user_name: String,
    /// 申請者の所属部署（作成時点のコピー）
    pub user_department: String,
    /// 作成日時（RFC3339形式）
    pub created_at: String,
    /// 最終更新日時（RFC3339形式）
    pub updated_at: String,
    /// 承認者の表示名（確定時点のコピー）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_name: Option<String>,
    /// 承認者のコメント
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_comment: Option<String>,
    /// 確定日時（RFC3339形式）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_or_rejected_at: Option<String>,
}

/// 申請作成用ドラフト
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDraft {
    /// 件名
    pub title: String,
    /// 金額
    pub amount: f64,
    /// 経費発生日（YYYY-MM-DD形式）
    pub date: String,
    /// カテゴリ
    #[serde(rename = "type")]
    pub category: ExpenseCategory,
    /// 説明
    pub description: String,
    /// 添付する領収書のドラフト
    #[serde(default)]
    pub receipts: Vec<ReceiptDraft>,
}

/// 経費発生日の形式チェック用正規表現
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

impl RequestDraft {
    /// ドラフトの内容を検証する
    ///
    /// # 戻り値
    /// 成功時はOk(())、失敗時はバリデーションエラー
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("件名を入力してください"));
        }

        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(AppError::validation("金額は正の数で入力してください"));
        }

        if !DATE_PATTERN.is_match(&self.date)
            || NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err()
        {
            return Err(AppError::validation(
                "経費発生日はYYYY-MM-DD形式で入力してください",
            ));
        }

        Ok(())
    }
}

/// 一覧表示・エクスポートの絞り込み条件
///
/// ビューのセッション内でのみ使用する一時的な状態で、永続化しない。
/// Noneのセレクタは「すべて」を意味する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFilters {
    /// ステータスでの絞り込み
    pub status: Option<RequestStatus>,
    /// カテゴリでの絞り込み
    pub category: Option<ExpenseCategory>,
    /// 件名・説明・申請者名・部署の部分一致検索（空文字は無条件）
    pub search_term: String,
    /// 経費発生日の下限
    pub date_from: Option<NaiveDate>,
    /// 経費発生日の上限
    pub date_to: Option<NaiveDate>,
}

/// 並び替えのキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// 作成日時
    CreatedAt,
    /// 確定日時（未確定はNone扱いで先頭に並ぶ）
    DecidedAt,
    /// 金額
    Amount,
    /// 件名
    Title,
    /// 申請者名
    Owner,
}

/// 並び替えの方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// 昇順
    Ascending,
    /// 降順
    Descending,
}
