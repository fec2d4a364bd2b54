use crate::features::receipts::{Receipt, ReceiptKind};
use crate::features::requests::models::{ExpenseCategory, ReimbursementRequest, RequestStatus};

/// 初回起動時に投入されるサンプル申請データ
///
/// スナップショットが存在しない場合のみ使用される。
pub fn sample_requests() -> Vec<ReimbursementRequest> {
    vec![
        ReimbursementRequest {
            id: "req-001".to_string(),
            title: "Team Lunch".to_string(),
            amount: 85.25,
            date: "2023-04-15".to_string(),
            category: ExpenseCategory::Meals,
            description: "Team lunch with the IT department to discuss the new server infrastructure.".to_string(),
            status: RequestStatus::Approved,
            receipts: vec![Receipt {
                id: "rec-001".to_string(),
                file_name: "lunch_receipt.jpg".to_string(),
                file_url: "https://via.placeholder.com/150".to_string(),
                file_type: ReceiptKind::Image,
                uploaded_at: "2023-04-15T14:30:00Z".to_string(),
            }],
            user_id: "1".to_string(),
            user_name: "John Employee".to_string(),
            user_department: "IT".to_string(),
            created_at: "2023-04-15T15:00:00Z".to_string(),
            updated_at: "2023-04-16T09:30:00Z".to_string(),
            approver_name: Some("Sarah Manager".to_string()),
            approver_comment: Some("Approved. Valid team lunch expense.".to_string()),
            approved_or_rejected_at: Some("2023-04-16T09:30:00Z".to_string()),
        },
        ReimbursementRequest {
            id: "req-002".to_string(),
            title: "New Laptop".to_string(),
            amount: 1299.99,
            date: "2023-04-20".to_string(),
            category: ExpenseCategory::Equipment,
            description: "Replacement laptop for development work as per equipment policy.".to_string(),
            status: RequestStatus::Pending,
            receipts: vec![Receipt {
                id: "rec-002".to_string(),
                file_name: "laptop_receipt.pdf".to_string(),
                file_url: "https://via.placeholder.com/150".to_string(),
                file_type: ReceiptKind::Document,
                uploaded_at: "2023-04-20T10:15:00Z".to_string(),
            }],
            user_id: "1".to_string(),
            user_name: "John Employee".to_string(),
            user_department: "IT".to_string(),
            created_at: "2023-04-20T10:30:00Z".to_string(),
            updated_at: "2023-04-20T10:30:00Z".to_string(),
            approver_name: None,
            approver_comment: None,
            approved_or_rejected_at: None,
        },
        ReimbursementRequest {
            id: "req-003".to_string(),
            title: "Conference Tickets".to_string(),
            amount: 599.00,
            date: "2023-05-01".to_string(),
            category: ExpenseCategory::Travel,
            description: "Tickets for the annual tech conference in San Francisco.".to_string(),
            status: RequestStatus::Rejected,
            receipts: vec![Receipt {
                id: "rec-003".to_string(),
                file_name: "conf_tickets.pdf".to_string(),
                file_url: "https://via.placeholder.com/150".to_string(),
                file_type: ReceiptKind::Document,
                uploaded_at: "2023-05-01T09:45:00Z".to_string(),
            }],
            user_id: "1".to_string(),
            user_name: "John Employee".to_string(),
            user_department: "IT".to_string(),
            created_at: "2023-05-01T10:00:00Z".to_string(),
            updated_at: "2023-05-02T11:20:00Z".to_string(),
            approver_name: Some("Sarah Manager".to_string()),
            approver_comment: Some(
                "Rejected. We already have enough team members attending this conference.".to_string(),
            ),
            approved_or_rejected_at: Some("2023-05-02T11:20:00Z".to_string()),
        },
        ReimbursementRequest {
            id: "req-004".to_string(),
            title: "Software License".to_string(),
            amount: 299.99,
            date: "2023-05-10".to_string(),
            category: ExpenseCategory::Software,
            description: "Annual license for development IDE.".to_string(),
            status: RequestStatus::Approved,
            receipts: vec![Receipt {
                id: "rec-004".to_string(),
                file_name: "license_invoice.pdf".to_string(),
                file_url: "https://via.placeholder.com/150".to_string(),
                file_type: ReceiptKind::Document,
                uploaded_at: "2023-05-10T14:00:00Z".to_string(),
            }],
            user_id: "1".to_string(),
            user_name: "John Employee".to_string(),
            user_department: "IT".to_string(),
            created_at: "2023-05-10T14:30:00Z".to_string(),
            updated_at: "2023-05-11T09:15:00Z".to_string(),
            approver_name: Some("Sarah Manager".to_string()),
            approver_comment: Some("Approved. Standard software expense.".to_string()),
            approved_or_rejected_at: Some("2023-05-11T09:15:00Z".to_string()),
        },
        ReimbursementRequest {
            id: "req-005".to_string(),
            title: "Office Supplies".to_string(),
            amount: 45.75,
            date: "2023-05-15".to_string(),
            category: ExpenseCategory::Other,
            description: "Notebooks, pens and other office supplies.".to_string(),
            status: RequestStatus::Pending,
            receipts: vec![Receipt {
                id: "rec-005".to_string(),
                file_name: "office_supplies.jpg".to_string(),
                file_url: "https://via.placeholder.com/150".to_string(),
                file_type: ReceiptKind::Image,
                uploaded_at: "2023-05-15T11:30:00Z".to_string(),
            }],
            user_id: "2".to_string(),
            user_name: "Sarah Manager".to_string(),
            user_department: "IT".to_string(),
            created_at: "2023-05-15T12:00:00Z".to_string(),
            updated_at: "2023-05-15T12:00:00Z".to_string(),
            approver_name: None,
            approver_comment: None,
            approved_or_rejected_at: None,
        },
    ]
}
