// 領収書ファイルの検証
//
// 却下はローカルで完結し、ネットワークやI/Oの副作用を持たない。

use crate::shared::errors::{AppError, AppResult};
use std::path::Path;

/// 受け付ける画像拡張子（小文字で比較する）
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// 拡張子が無い場合にフォールバックで確認するMIMEタイプ
const ACCEPTED_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// 形式が不正なときにユーザーへ表示する固定メッセージ
pub const INVALID_FORMAT_MESSAGE: &str =
    "Veuillez choisir un type d'image valide. Les formats acceptés sont : .jpg, .jpeg, .png.";

/// 領収書ファイルの形式を検証する
///
/// 拡張子がある場合は拡張子で判定し、無い場合のみMIMEタイプで判定する。
/// 拡張子とMIMEタイプが食い違う場合は拡張子を優先する。
///
/// # 引数
/// * `file_name` - 選択されたファイル名
/// * `mime_type` - 選択されたファイルのMIMEタイプ
///
/// # 戻り値
/// 受理時はOk(())、却下時は固定メッセージを持つバリデーションエラー
pub fn validate_receipt_file(file_name: &str, mime_type: &str) -> AppResult<()> {
    match extension_of(file_name) {
        Some(extension) if ACCEPTED_EXTENSIONS.contains(&extension.as_str()) => Ok(()),
        Some(_) => Err(AppError::validation(INVALID_FORMAT_MESSAGE)),
        None if ACCEPTED_MIME_TYPES.contains(&mime_type) => Ok(()),
        None => Err(AppError::validation(INVALID_FORMAT_MESSAGE)),
    }
}

/// ファイル名からContent-Typeを推定する
pub fn content_type(file_name: &str) -> &'static str {
    match extension_of(file_name).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// ファイル名から小文字化した拡張子を取り出す
fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}
