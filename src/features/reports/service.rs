use crate::features::reports::models::{
    CategoryTotal, MonthlyAmount, StatusDistribution, TimeRange,
};
use crate::features::requests::models::{ExpenseCategory, ReimbursementRequest, RequestStatus};
use chrono::{Datelike, Duration, NaiveDate};

/// 月の表示名（1月〜12月）
const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 経費発生日を解析する
fn parse_expense_date(request: &ReimbursementRequest) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&request.date, "%Y-%m-%d").ok()
}

/// 対象期間で申請を絞り込む
///
/// 期間は経費発生日に対して判定する。全期間以外では、
/// 日付が解析できない申請は対象外になる。
///
/// # 引数
/// * `requests` - 申請コレクション
/// * `range` - 集計対象期間
/// * `today` - 基準日
///
/// # 戻り値
/// 期間内の申請（コレクション順のまま）
pub fn filter_by_time_range<'a>(
    requests: &'a [ReimbursementRequest],
    range: TimeRange,
    today: NaiveDate,
) -> Vec<&'a ReimbursementRequest> {
    let cutoff = match range {
        TimeRange::Last30Days => Some(today - Duration::days(30)),
        TimeRange::Last90Days => Some(today - Duration::days(90)),
        TimeRange::YearToDate => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        TimeRange::AllTime => None,
    };

    requests
        .iter()
        .filter(|request| match cutoff {
            Some(cutoff) => parse_expense_date(request).map_or(false, |date| date >= cutoff),
            None => true,
        })
        .collect()
}

/// カテゴリごとの合計金額を集計する
///
/// # 引数
/// * `requests` - 申請コレクション
///
/// # 戻り値
/// 全カテゴリの合計金額（金額の降順）
pub fn totals_by_category(requests: &[ReimbursementRequest]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = ExpenseCategory::ALL
        .iter()
        .map(|&category| CategoryTotal {
            category,
            amount: requests
                .iter()
                .filter(|request| request.category == category)
                .map(|request| request.amount)
                .sum(),
        })
        .collect();

    totals.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    totals
}

/// ステータスごとの件数分布を集計する
///
/// # 引数
/// * `requests` - 申請コレクション
///
/// # 戻り値
/// ステータスごとの件数
pub fn status_distribution(requests: &[ReimbursementRequest]) -> StatusDistribution {
    let mut distribution = StatusDistribution::default();

    for request in requests {
        match request.status {
            RequestStatus::Approved => distribution.approved += 1,
            RequestStatus::Rejected => distribution.rejected += 1,
            RequestStatus::Pending => distribution.pending += 1,
        }
    }

    distribution
}

/// 指定した年の月別合計金額を集計する
///
/// # 引数
/// * `requests` - 申請コレクション
/// * `year` - 対象の年
///
/// # 戻り値
/// 1月から12月までの合計金額（12要素）
pub fn monthly_spending(requests: &[ReimbursementRequest], year: i32) -> Vec<MonthlyAmount> {
    MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(index, month)| {
            let amount = requests
                .iter()
                .filter_map(|request| {
                    let date = parse_expense_date(request)?;
                    (date.year() == year && date.month0() as usize == index)
                        .then_some(request.amount)
                })
                .sum();
            MonthlyAmount { month, amount }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::requests::seed::sample_requests;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 20).unwrap()
    }

    #[test]
    fn test_filter_by_time_range() {
        let requests = sample_requests();

        // 直近30日: 4/20以降の4件
        let recent = filter_by_time_range(&requests, TimeRange::Last30Days, today());
        assert_eq!(recent.len(), 4);

        // 直近90日: 全5件
        let quarter = filter_by_time_range(&requests, TimeRange::Last90Days, today());
        assert_eq!(quarter.len(), 5);

        // 年初から: 全5件（すべて2023年）
        let ytd = filter_by_time_range(&requests, TimeRange::YearToDate, today());
        assert_eq!(ytd.len(), 5);

        // 全期間
        let all = filter_by_time_range(&requests, TimeRange::AllTime, today());
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_totals_by_category() {
        let requests = sample_requests();
        let totals = totals_by_category(&requests);

        // 全カテゴリが含まれ、金額の降順に並ぶ
        assert_eq!(totals.len(), 5);
        assert_eq!(totals[0].category, ExpenseCategory::Equipment);
        assert_eq!(totals[0].amount, 1299.99);
        assert_eq!(totals[1].category, ExpenseCategory::Travel);
        assert!(totals.windows(2).all(|w| w[0].amount >= w[1].amount));
    }

    #[test]
    fn test_status_distribution() {
        let requests = sample_requests();
        let distribution = status_distribution(&requests);

        assert_eq!(distribution.approved, 2);
        assert_eq!(distribution.rejected, 1);
        assert_eq!(distribution.pending, 2);
    }

    #[test]
    fn test_monthly_spending() {
        let requests = sample_requests();
        let monthly = monthly_spending(&requests, 2023);

        assert_eq!(monthly.len(), 12);
        assert_eq!(monthly[0].month, "Jan");
        assert_eq!(monthly[0].amount, 0.0);

        // 4月: Team Lunch (85.25) + New Laptop (1299.99)
        assert_eq!(monthly[3].month, "Apr");
        assert!((monthly[3].amount - 1385.24).abs() < 1e-9);

        // 5月: Conference (599.00) + License (299.99) + Supplies (45.75)
        assert!((monthly[4].amount - 944.74).abs() < 1e-9);

        // 別の年は全月0
        let other_year = monthly_spending(&requests, 2024);
        assert!(other_year.iter().all(|m| m.amount == 0.0));
    }
}
