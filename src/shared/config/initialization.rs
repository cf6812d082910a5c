use crate::shared::config::environment::StoreConfig;
use crate::shared::errors::AppResult;
use log::{info, warn};

/// アプリケーションの初期化を実行する
///
/// # 処理内容
/// 1. .envファイルの読み込み（存在する場合）
/// 2. ログシステムの初期化
/// 3. ストア接続設定の構築
///
/// # 戻り値
/// 検証済みのストア接続設定、または失敗時は設定エラー
pub fn init() -> AppResult<StoreConfig> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    init_logging();

    if dotenv_loaded {
        info!(".envファイルを読み込みました");
    } else {
        // .envファイルがない場合は無視（本番環境では環境変数が直接設定される）
        warn!(".envファイルが見つかりません。環境変数が直接設定されていることを確認してください。");
    }

    StoreConfig::from_env()
}

/// ログシステムを初期化する
///
/// ログレベルは環境変数 LOG_LEVEL から取得（省略時はinfo）
pub fn init_logging() {
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    // テストなどで複数回呼ばれた場合、2回目以降の初期化は無視する
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init();
}
