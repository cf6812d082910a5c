use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// ローカルで完結するバリデーションエラー（ファイル形式・入力値）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// リモートストア（list / create / update）でのエラー
    #[error("ストアエラー: {0}")]
    Store(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（外部サービス一時的エラーなど）
    Medium,
    /// 高重要度（設定エラーなど）
    High,
}

impl AppError {
    /// ユーザーに表示するためのメッセージを取得
    ///
    /// バリデーションエラーとストアエラーは画面側が期待する文言を
    /// そのまま保持しているため、メッセージ本文を返す
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Validation(msg) => msg,
            AppError::Store(msg) => msg,
            AppError::Configuration(_) => "設定エラーが発生しました",
            AppError::Io(_) => "ファイル操作でエラーが発生しました",
        }
    }

    /// エラーの詳細情報を取得（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::Store(_) => ErrorSeverity::Medium,
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Io(_) => ErrorSeverity::Medium,
        }
    }

    /// バリデーションエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - バリデーションエラーメッセージ
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// ストアエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - ストアエラーメッセージ（画面にそのまま表示される）
    pub fn store<S: Into<String>>(message: S) -> Self {
        AppError::Store(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - 設定エラーメッセージ
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;
