use serde::{Deserialize, Serialize};

/// 外部連携ごとの有効フラグ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationStatus {
    /// メッセージキュー連携
    pub rabbitmq: bool,
    /// キャッシュ連携
    pub redis: bool,
    /// 決済連携
    pub stripe: bool,
    /// チャット連携
    pub slack: bool,
}

impl Default for IntegrationStatus {
    fn default() -> Self {
        Self {
            rabbitmq: true,
            redis: true,
            stripe: false,
            slack: false,
        }
    }
}

/// ポータル全体の設定
///
/// 設定はデータとして保持・永続化されるのみで、
/// 申請のライフサイクルには影響しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSettings {
    /// メール通知の有効フラグ
    pub email_enabled: bool,
    /// 自動承認の有効フラグ
    pub auto_approval: bool,
    /// 自動承認の金額しきい値
    pub auto_approval_threshold: f64,
    /// 外部連携ごとの有効フラグ
    #[serde(default)]
    pub integrations: IntegrationStatus,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            email_enabled: true,
            auto_approval: false,
            auto_approval_threshold: 50.0,
            integrations: IntegrationStatus::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = PortalSettings::default();
        assert!(settings.email_enabled);
        assert!(!settings.auto_approval);
        assert_eq!(settings.auto_approval_threshold, 50.0);
        assert!(settings.integrations.rabbitmq);
        assert!(settings.integrations.redis);
        assert!(!settings.integrations.stripe);
        assert!(!settings.integrations.slack);
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut settings = PortalSettings::default();
        settings.auto_approval = true;
        settings.integrations.slack = true;

        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("autoApprovalThreshold"));

        let deserialized: PortalSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, settings);
    }
}
