use serde::{Deserialize, Serialize};

/// ログイン中の従業員コンテキスト
///
/// セッションストレージを直接読むのではなく、構築時に明示的に
/// 各コンポーネントへ渡す。認証そのものは外部コラボレータの責務。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub email: String,
}

impl Employee {
    /// 従業員コンテキストを作成する
    pub fn new<S: Into<String>>(email: S) -> Self {
        Self {
            email: email.into(),
        }
    }
}
