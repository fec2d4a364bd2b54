use crate::features::requests::ExpenseCategory;
use serde::Serialize;

/// レポートの集計対象期間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    /// 直近30日
    Last30Days,
    /// 直近90日
    Last90Days,
    /// 年初から今日まで
    YearToDate,
    /// 全期間
    AllTime,
}

/// カテゴリごとの合計金額
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// カテゴリ
    pub category: ExpenseCategory,
    /// 合計金額
    pub amount: f64,
}

/// ステータスごとの件数分布
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusDistribution {
    /// 承認済み件数
    pub approved: usize,
    /// 却下済み件数
    pub rejected: usize,
    /// 承認待ち件数
    pub pending: usize,
}

/// 月ごとの合計金額（1月〜12月）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAmount {
    /// 月の表示名（Jan〜Dec）
    pub month: &'static str,
    /// 合計金額
    pub amount: f64,
}
