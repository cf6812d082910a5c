/// 設定モジュール
///
/// 実行環境の判定、ストア接続設定、ログ初期化を提供する
pub mod environment;
pub mod initialization;

pub use environment::{get_environment, Environment, StoreConfig};
pub use initialization::{init, init_logging};
