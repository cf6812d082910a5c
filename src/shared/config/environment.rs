use crate::shared::errors::{AppError, AppResult};
use log::debug;
use url::Url;

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 現在の実行環境を判定する
///
/// # 判定ロジック
/// 1. 実行時環境変数 ENVIRONMENT を確認
/// 2. デバッグビルドの場合は Development
/// 3. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        let env = match env_var.as_str() {
            "production" => Environment::Production,
            _ => Environment::Development,
        };
        debug!("環境判定: 実行時環境変数を使用 -> {env_var} -> {env:?}");
        return env;
    }

    // フォールバック: ビルド設定に基づく判定
    if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    }
}

/// 開発環境で使用するストアの既定URL
const DEVELOPMENT_STORE_URL: &str = "http://localhost:5678";

/// ストア接続設定
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEVELOPMENT_STORE_URL.to_string(),
            timeout_seconds: 30,
            max_retries: 3,
        }
    }
}

impl StoreConfig {
    /// 環境変数からストア接続設定を作成する
    ///
    /// # 使用する環境変数
    /// * `STORE_BASE_URL` - ストアのベースURL（開発環境では省略可）
    /// * `STORE_TIMEOUT_SECONDS` - HTTPタイムアウト秒数（省略時30）
    /// * `STORE_MAX_RETRIES` - 接続失敗時の最大リトライ回数（省略時3）
    ///
    /// # 戻り値
    /// 検証済みの設定、または失敗時は設定エラー
    pub fn from_env() -> AppResult<Self> {
        Self::build(
            std::env::var("STORE_BASE_URL").ok(),
            std::env::var("STORE_TIMEOUT_SECONDS").ok(),
            std::env::var("STORE_MAX_RETRIES").ok(),
            get_environment(),
        )
    }

    /// 個々の設定値から構築する（検証込み）
    fn build(
        base_url: Option<String>,
        timeout_seconds: Option<String>,
        max_retries: Option<String>,
        environment: Environment,
    ) -> AppResult<Self> {
        let base_url = match base_url {
            Some(url) => url,
            // プロダクションではURLの明示を必須とする
            None => match environment {
                Environment::Development => DEVELOPMENT_STORE_URL.to_string(),
                Environment::Production => {
                    return Err(AppError::configuration(
                        "プロダクション環境では STORE_BASE_URL の設定が必須です",
                    ))
                }
            },
        };

        Url::parse(&base_url)
            .map_err(|e| AppError::configuration(format!("STORE_BASE_URL が不正です: {e}")))?;

        // 末尾のスラッシュはエンドポイント結合時に二重になるため除去する
        let base_url = base_url.trim_end_matches('/').to_string();

        let timeout_seconds = match timeout_seconds {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::configuration(format!("STORE_TIMEOUT_SECONDS が不正です: {e}"))
            })?,
            None => 30,
        };

        let max_retries = match max_retries {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::configuration(format!("STORE_MAX_RETRIES が不正です: {e}"))
            })?,
            None => 3,
        };

        Ok(Self {
            base_url,
            timeout_seconds,
            max_retries,
        })
    }
}
