use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// 認証情報が不正な場合のエラー
    #[error("メールアドレスまたはパスワードが正しくありません")]
    InvalidCredentials,

    /// 未認証で保護された操作を試みた場合のエラー
    #[error("認証が必要です")]
    NotAuthenticated,

    /// 権限が不足している場合のエラー
    #[error("権限がありません: {0}")]
    PermissionDenied(String),

    /// リソースが見つからない場合のエラー
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 確定済みの申請を再度確定しようとした場合のエラー
    #[error("申請は既に確定済みです: {0}")]
    AlreadyDecided(String),

    /// バリデーション関連のエラー
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 永続化・疑似バックエンド処理の失敗を包むエラー
    #[error("操作に失敗しました: {0}")]
    OperationFailed(String),

    /// ストレージ（スナップショット）関連のエラー
    #[error("ストレージエラー: {0}")]
    Storage(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（疑似バックエンド一時的エラーなど）
    Medium,
    /// 高重要度（ストレージエラーなど）
    High,
}

impl AppError {
    /// ユーザーに表示するためのフレンドリーなメッセージを取得
    ///
    /// # 戻り値
    /// ユーザーに表示可能なエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidCredentials => {
                "メールアドレスまたはパスワードが正しくありません".to_string()
            }
            AppError::NotAuthenticated => "ログインしてから操作してください".to_string(),
            AppError::PermissionDenied(_) => "この操作を行う権限がありません".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::AlreadyDecided(_) => "この申請は既に承認または却下されています".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::OperationFailed(_) => {
                "操作に失敗しました。もう一度お試しください".to_string()
            }
            AppError::Storage(_) => "データの保存でエラーが発生しました".to_string(),
            AppError::Configuration(_) => "設定エラーが発生しました".to_string(),
            AppError::Io(_) => "ファイル操作でエラーが発生しました".to_string(),
            AppError::Json(_) => "データ形式の解析でエラーが発生しました".to_string(),
        }
    }

    /// エラーの詳細情報を取得
    ///
    /// # 戻り値
    /// エラーの詳細情報（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// エラーの重要度を取得
    ///
    /// # 戻り値
    /// エラーの重要度レベル
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::InvalidCredentials => ErrorSeverity::Low,
            AppError::NotAuthenticated => ErrorSeverity::Low,
            AppError::PermissionDenied(_) => ErrorSeverity::Low,
            AppError::NotFound(_) => ErrorSeverity::Low,
            AppError::AlreadyDecided(_) => ErrorSeverity::Low,
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::OperationFailed(_) => ErrorSeverity::Medium,
            AppError::Storage(_) => ErrorSeverity::High,
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Io(_) => ErrorSeverity::Medium,
            AppError::Json(_) => ErrorSeverity::Medium,
        }
    }

    /// バリデーションエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - バリデーションエラーメッセージ
    ///
    /// # 戻り値
    /// バリデーションエラー
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// リソース未発見エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `resource` - 見つからなかったリソース名
    ///
    /// # 戻り値
    /// リソース未発見エラー
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        AppError::NotFound(format!("{}が見つかりません", resource.into()))
    }

    /// 権限不足エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `operation` - 許可されなかった操作の説明
    ///
    /// # 戻り値
    /// 権限不足エラー
    pub fn permission_denied<S: Into<String>>(operation: S) -> Self {
        AppError::PermissionDenied(operation.into())
    }

    /// 操作失敗エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - 失敗内容のメッセージ
    ///
    /// # 戻り値
    /// 操作失敗エラー
    pub fn operation_failed<S: Into<String>>(message: S) -> Self {
        AppError::OperationFailed(message.into())
    }

    /// ストレージエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - ストレージエラーメッセージ
    ///
    /// # 戻り値
    /// ストレージエラー
    pub fn storage<S: Into<String>>(message: S) -> Self {
        AppError::Storage(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - 設定エラーメッセージ
    ///
    /// # 戻り値
    /// 設定エラー
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}

/// AppErrorからStringへの変換（ビュー層境界での使用のため）
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.user_message()
    }
}

/// rusqlite::ErrorからAppErrorへの変換
impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        AppError::Storage(error.to_string())
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;
