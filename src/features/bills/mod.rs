/// 経費精算書一覧機能モジュール
///
/// このモジュールは一覧表示に関連する機能を提供します：
/// - 経費精算書のデータモデルとステータスラベル
/// - ストアのlist結果の表示用射影（日付の正規化・降順ソート）
/// - UI層へ公開する出口状態（loading / error / ready）
// サブモジュールの宣言
pub mod models;
pub mod projection;

// モデル
pub use models::{Bill, BillRow, BillStatus, EXPENSE_TYPES};

// 射影
pub use projection::{project, BillListProjection, BillsViewState};
