use serde::{Deserialize, Serialize};

/// ユーザーの役割を表す列挙型
///
/// 順序は権限の強さに対応する（Employee < Manager < Admin）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// 一般従業員
    Employee,
    /// マネージャー（申請の承認・却下が可能）
    Manager,
    /// 管理者（全操作が可能）
    Admin,
}

impl UserRole {
    /// 役割の表示用文字列を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Employee => "employee",
            UserRole::Manager => "manager",
            UserRole::Admin => "admin",
        }
    }
}

/// 認証されたユーザー（認証主体）を表す構造体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// ユーザーID
    pub id: String,
    /// 表示名
    pub name: String,
    /// メールアドレス
    pub email: String,
    /// 役割
    pub role: UserRole,
    /// 所属部署
    pub department: String,
    /// アバター画像URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// ユーザー管理画面向けのアカウント情報
///
/// 認証主体と異なり、アカウントの有効状態と最終ログイン日時を持つ。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// ユーザーID
    pub id: String,
    /// 表示名
    pub name: String,
    /// メールアドレス
    pub email: String,
    /// 役割
    pub role: UserRole,
    /// 所属部署
    pub department: String,
    /// アカウントが有効かどうか
    pub is_active: bool,
    /// 最終ログイン日時（RFC3339形式）
    pub last_login: String,
    /// アバター画像URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// アカウント一覧の絞り込み条件
#[derive(Debug, Clone, Default)]
pub struct AccountQuery {
    /// 役割での絞り込み（Noneは全件）
    pub role: Option<UserRole>,
    /// 部署での絞り込み（Noneは全件）
    pub department: Option<String>,
    /// 氏名・メールアドレスの部分一致検索（空文字は無条件）
    pub search_term: String,
}

/// 認証エラーの種類
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// 認証情報が不正
    #[error("メールアドレスまたはパスワードが正しくありません")]
    InvalidCredentials,

    /// 権限不足
    #[error("権限がありません: {0}")]
    PermissionDenied(String),

    /// ストレージエラー
    #[error("ストレージエラー: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for AuthError {
    fn from(error: rusqlite::Error) -> Self {
        AuthError::Storage(error.to_string())
    }
}

impl From<AuthError> for crate::shared::errors::AppError {
    fn from(error: AuthError) -> Self {
        use crate::shared::errors::AppError;
        match error {
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::PermissionDenied(msg) => AppError::PermissionDenied(msg),
            AuthError::Storage(msg) => AppError::Storage(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        // 役割の順序が employee < manager < admin であることを確認
        assert!(UserRole::Employee < UserRole::Manager);
        assert!(UserRole::Manager < UserRole::Admin);
        assert!(UserRole::Employee < UserRole::Admin);
    }

    #[test]
    fn test_role_serialization() {
        // 役割が小文字の文字列にシリアライズされることを確認
        assert_eq!(
            serde_json::to_string(&UserRole::Employee).unwrap(),
            r#""employee""#
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Manager).unwrap(),
            r#""manager""#
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Admin).unwrap(),
            r#""admin""#
        );

        // デシリアライズの確認
        let role: UserRole = serde_json::from_str(r#""manager""#).unwrap();
        assert_eq!(role, UserRole::Manager);
    }

    #[test]
    fn test_user_roundtrip() {
        // ユーザーのシリアライズ・デシリアライズをテスト
        let user = User {
            id: "1".to_string(),
            name: "John Employee".to_string(),
            email: "employee@company.com".to_string(),
            role: UserRole::Employee,
            department: "IT".to_string(),
            avatar: Some("https://i.pravatar.cc/150?img=1".to_string()),
        };

        let json = serde_json::to_string(&user).unwrap();
        let deserialized: User = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, user);
    }

    #[test]
    fn test_auth_error_conversion() {
        use crate::shared::errors::AppError;

        // AuthErrorからAppErrorへの変換をテスト
        let app_error: AppError = AuthError::InvalidCredentials.into();
        assert!(matches!(app_error, AppError::InvalidCredentials));

        let app_error: AppError = AuthError::PermissionDenied("操作".to_string()).into();
        assert!(matches!(app_error, AppError::PermissionDenied(_)));
    }
}
