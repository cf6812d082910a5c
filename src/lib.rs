//! 経費精算書（notes de frais）の提出・一覧表示コア
//!
//! 従業員が領収書画像付きの経費精算書を提出し、承認ステータス付きの
//! 一覧を新しい順で閲覧するためのロジックを提供する。画面描画・
//! ルーティング・認証は外部のアダプタ層の責務で、このクレートは
//! 検証・状態遷移・ストア連携のみを持つ。
//!
//! - ファイル検証: 領収書は .jpg / .jpeg / .png のみ受理
//! - 二段階の永続化: create（領収書アップロード）→ update（レコード確定）
//! - 日付の正規化: 混在する日付形式を比較可能な値へ変換して降順ソート
//! - エラー分類: ローカルのバリデーションとストア障害を区別して報告

pub mod features;
pub mod shared;

// 一覧表示
pub use features::bills::models::{Bill, BillRow, BillStatus, EXPENSE_TYPES};
pub use features::bills::projection::{project, BillListProjection, BillsViewState};

// 提出フロー
pub use features::new_bill::models::{NewBillForm, ReceiptRef, SelectedFile, SubmissionState};
pub use features::new_bill::workflow::{transition, BillSubmissionWorkflow, Effect, SubmissionEvent};

// 領収書検証
pub use features::receipts::validation::{
    content_type, validate_receipt_file, INVALID_FORMAT_MESSAGE,
};

// 共有基盤
pub use shared::config::{init, init_logging, Environment, StoreConfig};
pub use shared::dates::{format_display, normalize, NormalizedDate};
pub use shared::errors::{AppError, AppResult, ErrorSeverity};
pub use shared::session::Employee;
pub use shared::store::{ApiStoreClient, CreateBillPayload, CreateBillResponse, StoreGateway};
