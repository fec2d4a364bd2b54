// レポート機能モジュール
//
// 申請コレクションに対する純粋な集計のみを提供し、状態は持たない。

pub mod models;
pub mod service;

pub use models::{CategoryTotal, MonthlyAmount, StatusDistribution, TimeRange};
pub use service::{filter_by_time_range, monthly_spending, status_distribution, totals_by_category};
