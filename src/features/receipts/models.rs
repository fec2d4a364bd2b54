use serde::{Deserialize, Serialize};

/// 領収書ファイルの大分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptKind {
    /// 画像ファイル（写真・スクリーンショットなど）
    Image,
    /// 文書ファイル（PDFなど）
    Document,
}

/// 申請に添付された領収書
///
/// 申請の提出時に作成され、以後は編集も削除もされない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// 領収書ID
    pub id: String,
    /// 元のファイル名
    pub file_name: String,
    /// 保存先ファイルへの参照
    pub file_url: String,
    /// ファイルの大分類
    pub file_type: ReceiptKind,
    /// アップロード日時（RFC3339形式）
    pub uploaded_at: String,
}

/// 領収書添付の入力（提出前のドラフト）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDraft {
    /// 元のファイル名
    pub file_name: String,
    /// 保存先ファイルへの参照
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_kind_serialization() {
        // 大分類が小文字の文字列にシリアライズされることを確認
        assert_eq!(
            serde_json::to_string(&ReceiptKind::Image).unwrap(),
            r#""image""#
        );
        assert_eq!(
            serde_json::to_string(&ReceiptKind::Document).unwrap(),
            r#""document""#
        );
    }

    #[test]
    fn test_receipt_roundtrip() {
        // 領収書のシリアライズ・デシリアライズをテスト
        let receipt = Receipt {
            id: "rec-001".to_string(),
            file_name: "lunch_receipt.jpg".to_string(),
            file_url: "https://via.placeholder.com/150".to_string(),
            file_type: ReceiptKind::Image,
            uploaded_at: "2023-04-15T14:30:00Z".to_string(),
        };

        let json = serde_json::to_string(&receipt).unwrap();
        // 外部契約のフィールド名がcamelCaseであることを確認
        assert!(json.contains("fileName"));
        assert!(json.contains("uploadedAt"));

        let deserialized: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, receipt);
    }
}
