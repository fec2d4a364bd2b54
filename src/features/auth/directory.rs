use crate::features::auth::models::{User, UserAccount, UserRole};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 認証ディレクトリの1エントリ（パスワードとユーザー情報）
#[derive(Debug, Clone)]
pub struct CredentialEntry {
    /// 平文パスワード（デモ用の固定ディレクトリのため暗号化しない）
    pub password: &'static str,
    /// 認証成功時に有効化されるユーザー情報
    pub user: User,
}

/// 固定の認証ディレクトリ（メールアドレス小文字 → エントリ）
static CREDENTIAL_DIRECTORY: Lazy<HashMap<&'static str, CredentialEntry>> = Lazy::new(|| {
    let mut directory = HashMap::new();

    directory.insert(
        "employee@company.com",
        CredentialEntry {
            password: "password123",
            user: User {
                id: "1".to_string(),
                name: "John Employee".to_string(),
                email: "employee@company.com".to_string(),
                role: UserRole::Employee,
                department: "IT".to_string(),
                avatar: Some("https://i.pravatar.cc/150?img=1".to_string()),
            },
        },
    );

    directory.insert(
        "manager@company.com",
        CredentialEntry {
            password: "password123",
            user: User {
                id: "2".to_string(),
                name: "Sarah Manager".to_string(),
                email: "manager@company.com".to_string(),
                role: UserRole::Manager,
                department: "IT".to_string(),
                avatar: Some("https://i.pravatar.cc/150?img=2".to_string()),
            },
        },
    );

    directory.insert(
        "admin@company.com",
        CredentialEntry {
            password: "password123",
            user: User {
                id: "3".to_string(),
                name: "Alex Admin".to_string(),
                email: "admin@company.com".to_string(),
                role: UserRole::Admin,
                department: "IT".to_string(),
                avatar: Some("https://i.pravatar.cc/150?img=3".to_string()),
            },
        },
    );

    directory
});

/// ユーザー管理画面向けのアカウント一覧
static USER_ACCOUNTS: Lazy<Vec<UserAccount>> = Lazy::new(|| {
    vec![
        UserAccount {
            id: "1".to_string(),
            name: "John Employee".to_string(),
            email: "employee@company.com".to_string(),
            role: UserRole::Employee,
            department: "IT".to_string(),
            is_active: true,
            last_login: "2023-05-15T10:30:00Z".to_string(),
            avatar: Some("https://i.pravatar.cc/150?img=1".to_string()),
        },
        UserAccount {
            id: "2".to_string(),
            name: "Sarah Manager".to_string(),
            email: "manager@company.com".to_string(),
            role: UserRole::Manager,
            department: "IT".to_string(),
            is_active: true,
            last_login: "2023-05-16T08:45:00Z".to_string(),
            avatar: Some("https://i.pravatar.cc/150?img=2".to_string()),
        },
        UserAccount {
            id: "3".to_string(),
            name: "Alex Admin".to_string(),
            email: "admin@company.com".to_string(),
            role: UserRole::Admin,
            department: "IT".to_string(),
            is_active: true,
            last_login: "2023-05-16T09:15:00Z".to_string(),
            avatar: Some("https://i.pravatar.cc/150?img=3".to_string()),
        },
        UserAccount {
            id: "4".to_string(),
            name: "Jessica Developer".to_string(),
            email: "jessica@company.com".to_string(),
            role: UserRole::Employee,
            department: "Development".to_string(),
            is_active: true,
            last_login: "2023-05-14T14:20:00Z".to_string(),
            avatar: Some("https://i.pravatar.cc/150?img=4".to_string()),
        },
        UserAccount {
            id: "5".to_string(),
            name: "Michael Support".to_string(),
            email: "michael@company.com".to_string(),
            role: UserRole::Employee,
            department: "Customer Support".to_string(),
            is_active: false,
            last_login: "2023-04-28T11:10:00Z".to_string(),
            avatar: Some("https://i.pravatar.cc/150?img=5".to_string()),
        },
    ]
});

/// メールアドレスで認証エントリを検索する（大文字小文字を区別しない）
///
/// # 引数
/// * `email` - メールアドレス
///
/// # 戻り値
/// エントリ（存在する場合）
pub fn find_credential(email: &str) -> Option<&'static CredentialEntry> {
    let normalized = email.to_lowercase();
    CREDENTIAL_DIRECTORY.get(normalized.as_str())
}

/// 登録済みアカウントの一覧を取得する
///
/// # 戻り値
/// アカウント情報のスライス
pub fn user_accounts() -> &'static [UserAccount] {
    &USER_ACCOUNTS
}
