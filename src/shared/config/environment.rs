use std::path::PathBuf;
use std::time::Duration;

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 現在の実行環境を判定する
///
/// # 戻り値
/// 現在の実行環境（Development または Production）
///
/// # 判定ロジック
/// 1. コンパイル時埋め込み環境変数を最優先
/// 2. 実行時環境変数 ENVIRONMENT を確認
/// 3. デバッグビルドの場合は Development
/// 4. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    // コンパイル時埋め込み環境変数を最優先
    if let Some(embedded_env) = option_env!("EMBEDDED_ENVIRONMENT") {
        return match embedded_env {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
    }

    // 実行時環境変数を確認
    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        return match env_var.as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
    }

    // フォールバック: ビルド設定に基づく判定
    if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    }
}

/// 環境に応じたデータベースファイル名を取得する
///
/// # 引数
/// * `env` - 実行環境
///
/// # 戻り値
/// データベースファイル名
///
/// # ファイル名の規則
/// - 開発環境: "dev_portal.db"
/// - プロダクション環境: "portal.db"
pub fn get_database_filename(env: &Environment) -> &'static str {
    match env {
        Environment::Development => "dev_portal.db",
        Environment::Production => "portal.db",
    }
}

/// 実行環境から読み込むアプリケーション設定
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: Environment,
    /// ログレベル（error/warn/info/debug/trace）
    pub log_level: String,
    /// 疑似バックエンドの遅延（ミリ秒）
    pub simulated_latency_ms: u64,
    /// データディレクトリの上書き（未設定時はプラットフォーム既定）
    pub data_dir: Option<PathBuf>,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # 戻り値
    /// 環境変数に基づく設定（未設定の項目は既定値）
    pub fn from_env() -> Self {
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let simulated_latency_ms = std::env::var("SIMULATED_LATENCY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(800);

        let data_dir = std::env::var("PORTAL_DATA_DIR").ok().map(PathBuf::from);

        Self {
            environment: get_environment(),
            log_level,
            simulated_latency_ms,
            data_dir,
        }
    }

    /// 疑似バックエンドの遅延をDurationとして取得する
    ///
    /// # 戻り値
    /// 疑似ネットワーク往復を模した遅延
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// 遅延なしの設定を作成する（テスト用）
    ///
    /// # 戻り値
    /// 疑似遅延を0msにした開発環境設定
    pub fn zero_latency() -> Self {
        Self {
            environment: Environment::Development,
            log_level: "info".to_string(),
            simulated_latency_ms: 0,
            data_dir: None,
        }
    }
}

/// 環境変数を読み込む（.envファイルがある場合）
pub fn load_environment_variables() {
    if dotenv::dotenv().is_err() {
        // .envファイルがない場合は無視（本番環境では環境変数が直接設定される）
        log::warn!(".envファイルが見つかりません。環境変数が直接設定されていることを確認してください。");
    } else {
        log::info!(".envファイルを読み込みました");
    }
}

/// ログシステムを初期化する
///
/// # 引数
/// * `config` - 環境設定
pub fn initialize_logging_system(config: &EnvironmentConfig) {
    // ログレベルを設定
    let log_level = match config.log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    // env_loggerを初期化（多重初期化は無視）
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init();

    log::info!(
        "ログシステムを初期化しました: level={}, environment={:?}",
        config.log_level,
        config.environment
    );
}
