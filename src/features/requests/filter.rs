use crate::features::requests::models::{
    ReimbursementRequest, RequestFilters, SortDirection, SortKey,
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::cmp::Ordering;

/// 申請が絞り込み条件を満たすかを判定する
///
/// 条件は ステータス → カテゴリ → 検索語 → 日付範囲 の順に適用される。
///
/// # 引数
/// * `request` - 判定対象の申請
/// * `filters` - 絞り込み条件
///
/// # 戻り値
/// すべての有効な条件を満たす場合はtrue
pub fn matches_filters(request: &ReimbursementRequest, filters: &RequestFilters) -> bool {
    // ステータス（Noneは「すべて」）
    if let Some(status) = filters.status {
        if request.status != status {
            return false;
        }
    }

    // カテゴリ（Noneは「すべて」）
    if let Some(category) = filters.category {
        if request.category != category {
            return false;
        }
    }

    // 検索語（件名・説明・申請者名・部署の部分一致、大文字小文字を区別しない）
    if !filters.search_term.is_empty() {
        let term = filters.search_term.to_lowercase();
        let hit = request.title.to_lowercase().contains(&term)
            || request.description.to_lowercase().contains(&term)
            || request.user_name.to_lowercase().contains(&term)
            || request.user_department.to_lowercase().contains(&term);
        if !hit {
            return false;
        }
    }

    // 日付範囲（経費発生日に対する上下限）
    if filters.date_from.is_some() || filters.date_to.is_some() {
        let Ok(date) = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d") else {
            // 日付が解析できない申請は範囲条件を満たさない扱い
            return false;
        };

        if let Some(from) = filters.date_from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = filters.date_to {
            if date > to {
                return false;
            }
        }
    }

    true
}

/// 絞り込み条件を適用した申請の参照リストを返す
///
/// # 引数
/// * `requests` - 申請コレクション
/// * `filters` - 絞り込み条件
///
/// # 戻り値
/// 条件を満たす申請（コレクション順のまま）
pub fn filter_requests<'a>(
    requests: &'a [ReimbursementRequest],
    filters: &RequestFilters,
) -> Vec<&'a ReimbursementRequest> {
    requests
        .iter()
        .filter(|request| matches_filters(request, filters))
        .collect()
}

/// RFC3339タイムスタンプを比較する
///
/// 解析できない値同士は文字列として比較し、片方のみ解析できる場合は
/// 解析できた方を後ろへ並べない（文字列比較にフォールバック）。
fn compare_timestamps(a: &str, b: &str) -> Ordering {
    let parsed_a: Option<DateTime<FixedOffset>> = DateTime::parse_from_rfc3339(a).ok();
    let parsed_b: Option<DateTime<FixedOffset>> = DateTime::parse_from_rfc3339(b).ok();

    match (parsed_a, parsed_b) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// 並び替えキーに基づいて2件の申請を比較する（昇順）
fn compare_by_key(a: &ReimbursementRequest, b: &ReimbursementRequest, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAt => compare_timestamps(&a.created_at, &b.created_at),
        SortKey::DecidedAt => match (&a.approved_or_rejected_at, &b.approved_or_rejected_at) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => compare_timestamps(a, b),
        },
        SortKey::Amount => a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Owner => a.user_name.to_lowercase().cmp(&b.user_name.to_lowercase()),
    }
}

/// 申請の参照リストを安定ソートする
///
/// 比較結果が等しい要素はコレクション順を保つ。降順は比較器の反転で
/// 実現するため、同値要素の順序は昇順時と変わらない。
///
/// # 引数
/// * `requests` - 並び替え対象の参照リスト
/// * `key` - 並び替えキー
/// * `direction` - 並び替え方向
pub fn sort_requests(
    requests: &mut [&ReimbursementRequest],
    key: SortKey,
    direction: SortDirection,
) {
    requests.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// 絞り込みと並び替えを適用したコレクションの複製を返す
///
/// # 引数
/// * `requests` - 申請コレクション
/// * `filters` - 絞り込み条件
/// * `key` - 並び替えキー
/// * `direction` - 並び替え方向
///
/// # 戻り値
/// 条件を満たす申請を並び替えたリスト
pub fn filtered_and_sorted(
    requests: &[ReimbursementRequest],
    filters: &RequestFilters,
    key: SortKey,
    direction: SortDirection,
) -> Vec<ReimbursementRequest> {
    let mut filtered = filter_requests(requests, filters);
    sort_requests(&mut filtered, key, direction);
    filtered.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::requests::models::{ExpenseCategory, RequestStatus};
    use crate::features::requests::seed::sample_requests;
    use quickcheck_macros::quickcheck;

    /// プロパティテスト用に決定的な申請を生成する
    fn request_from_seed(seed: u8) -> ReimbursementRequest {
        let statuses = [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ];
        let categories = ExpenseCategory::ALL;
        let names = ["John Employee", "Sarah Manager", "Jessica Developer"];

        let status = statuses[(seed % 3) as usize];
        ReimbursementRequest {
            id: format!("req-{seed:03}"),
            title: format!("Expense {seed}"),
            amount: f64::from(seed) + 0.25,
            date: format!("2023-05-{:02}", (seed % 28) + 1),
            category: categories[(seed % 5) as usize],
            description: format!("Generated request {seed}"),
            status,
            receipts: Vec::new(),
            user_id: format!("{}", (seed % 3) + 1),
            user_name: names[(seed % 3) as usize].to_string(),
            user_department: "IT".to_string(),
            created_at: format!("2023-05-{:02}T10:00:00Z", (seed % 28) + 1),
            updated_at: format!("2023-05-{:02}T10:00:00Z", (seed % 28) + 1),
            approver_name: status.is_terminal().then(|| "Sarah Manager".to_string()),
            approver_comment: None,
            approved_or_rejected_at: status
                .is_terminal()
                .then(|| format!("2023-06-{:02}T09:00:00Z", (seed % 28) + 1)),
        }
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let requests = sample_requests();
        let filtered = filter_requests(&requests, &RequestFilters::default());
        assert_eq!(filtered.len(), requests.len());
    }

    #[test]
    fn test_status_filter() {
        let requests = sample_requests();
        let filters = RequestFilters {
            status: Some(RequestStatus::Approved),
            ..Default::default()
        };

        let filtered = filter_requests(&requests, &filters);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.status == RequestStatus::Approved));
    }

    #[test]
    fn test_category_filter() {
        let requests = sample_requests();
        let filters = RequestFilters {
            category: Some(ExpenseCategory::Meals),
            ..Default::default()
        };

        let filtered = filter_requests(&requests, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "req-001");
    }

    #[test]
    fn test_search_term_filter() {
        let requests = sample_requests();

        // 件名への部分一致（大文字小文字を区別しない）
        let filters = RequestFilters {
            search_term: "LAPTOP".to_string(),
            ..Default::default()
        };
        let filtered = filter_requests(&requests, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "req-002");

        // 申請者名への部分一致
        let filters = RequestFilters {
            search_term: "sarah".to_string(),
            ..Default::default()
        };
        let filtered = filter_requests(&requests, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "req-005");
    }

    #[test]
    fn test_status_and_search_combined() {
        let requests = sample_requests();

        // 承認済み かつ "laptop" を含む申請は存在しない
        let filters = RequestFilters {
            status: Some(RequestStatus::Approved),
            search_term: "laptop".to_string(),
            ..Default::default()
        };
        let filtered = filter_requests(&requests, &filters);
        assert!(filtered.is_empty());

        // 承認待ち かつ "laptop" はreq-002のみ
        let filters = RequestFilters {
            status: Some(RequestStatus::Pending),
            search_term: "laptop".to_string(),
            ..Default::default()
        };
        let filtered = filter_requests(&requests, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "req-002");
    }

    #[test]
    fn test_date_bounds() {
        let requests = sample_requests();
        let filters = RequestFilters {
            date_from: Some(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()),
            date_to: Some(NaiveDate::from_ymd_opt(2023, 5, 10).unwrap()),
            ..Default::default()
        };

        let filtered = filter_requests(&requests, &filters);
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["req-003", "req-004"]);
    }

    #[test]
    fn test_sort_by_amount() {
        let requests = sample_requests();
        let sorted = filtered_and_sorted(
            &requests,
            &RequestFilters::default(),
            SortKey::Amount,
            SortDirection::Ascending,
        );

        let amounts: Vec<f64> = sorted.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![45.75, 85.25, 299.99, 599.00, 1299.99]);
    }

    #[test]
    fn test_sort_by_created_at_descending() {
        let requests = sample_requests();
        let sorted = filtered_and_sorted(
            &requests,
            &RequestFilters::default(),
            SortKey::CreatedAt,
            SortDirection::Descending,
        );

        assert_eq!(sorted.first().unwrap().id, "req-005");
        assert_eq!(sorted.last().unwrap().id, "req-001");
    }

    #[test]
    fn test_sort_by_decided_at_places_pending_first() {
        let requests = sample_requests();
        let sorted = filtered_and_sorted(
            &requests,
            &RequestFilters::default(),
            SortKey::DecidedAt,
            SortDirection::Ascending,
        );

        // 未確定（確定日時なし）の申請が先頭に並ぶ
        assert!(sorted[0].approved_or_rejected_at.is_none());
        assert!(sorted[1].approved_or_rejected_at.is_none());
        assert!(sorted[2].approved_or_rejected_at.is_some());
    }

    #[test]
    fn test_sort_stability_on_ties() {
        // 同額の申請はコレクション順を保つ
        let mut a = request_from_seed(1);
        let mut b = request_from_seed(2);
        let mut c = request_from_seed(3);
        a.amount = 100.0;
        b.amount = 100.0;
        c.amount = 100.0;
        let requests = vec![a.clone(), b.clone(), c.clone()];

        let ascending = filtered_and_sorted(
            &requests,
            &RequestFilters::default(),
            SortKey::Amount,
            SortDirection::Ascending,
        );
        let descending = filtered_and_sorted(
            &requests,
            &RequestFilters::default(),
            SortKey::Amount,
            SortDirection::Descending,
        );

        let original: Vec<&str> = requests.iter().map(|r| r.id.as_str()).collect();
        let asc_ids: Vec<&str> = ascending.iter().map(|r| r.id.as_str()).collect();
        let desc_ids: Vec<&str> = descending.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(asc_ids, original);
        assert_eq!(desc_ids, original);
    }

    #[quickcheck]
    fn prop_filtering_is_a_projection(seeds: Vec<u8>, status_seed: u8, term_seed: u8) -> bool {
        let requests: Vec<ReimbursementRequest> =
            seeds.iter().copied().map(request_from_seed).collect();

        let statuses = [
            None,
            Some(RequestStatus::Pending),
            Some(RequestStatus::Approved),
            Some(RequestStatus::Rejected),
        ];
        let terms = ["", "expense", "sarah", "zzz-no-match"];
        let filters = RequestFilters {
            status: statuses[(status_seed % 4) as usize],
            search_term: terms[(term_seed % 4) as usize].to_string(),
            ..Default::default()
        };

        let filtered = filter_requests(&requests, &filters);

        // 射影であること（要素数が増えない）と、全要素が条件を満たすこと
        filtered.len() <= requests.len()
            && filtered.iter().all(|r| matches_filters(r, &filters))
    }

    #[quickcheck]
    fn prop_sort_reversal_without_ties(amount_seeds: Vec<u16>) -> bool {
        // 金額が重複しない入力を作る
        let mut unique = amount_seeds;
        unique.sort_unstable();
        unique.dedup();

        let requests: Vec<ReimbursementRequest> = unique
            .iter()
            .enumerate()
            .map(|(i, amount)| {
                let mut request = request_from_seed((i % 255) as u8);
                request.id = format!("req-{i}");
                request.amount = f64::from(*amount);
                request
            })
            .collect();

        let ascending = filtered_and_sorted(
            &requests,
            &RequestFilters::default(),
            SortKey::Amount,
            SortDirection::Ascending,
        );
        let mut descending = filtered_and_sorted(
            &requests,
            &RequestFilters::default(),
            SortKey::Amount,
            SortDirection::Descending,
        );

        // 重複がなければ昇順と降順は正確に逆順になる
        descending.reverse();
        ascending == descending
    }
}
