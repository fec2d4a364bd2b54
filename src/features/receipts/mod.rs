// 領収書機能モジュール

pub mod models;
pub mod service;

pub use models::{Receipt, ReceiptDraft, ReceiptKind};
pub use service::{build_receipt, build_receipts, infer_kind};
