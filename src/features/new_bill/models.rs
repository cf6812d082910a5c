use crate::features::receipts::validation;
use crate::shared::errors::AppResult;
use serde::Deserialize;
use std::path::Path;

/// 新規経費精算フォームの入力値（UI層から渡される生の文字列）
///
/// フィールドは画面側の入力欄（expense-type, expense-name, datepicker,
/// amount, vat, pct, commentary）に対応する。数値の解釈は送信時に行う。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewBillForm {
    pub expense_type: String,
    pub expense_name: String,
    pub datepicker: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// 選択された領収書ファイル
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl SelectedFile {
    /// ファイル内容を指定して作成する
    pub fn new<S: Into<String>>(name: S, mime_type: S, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// パスからファイルを読み込む（MIMEタイプは拡張子から推定）
    ///
    /// # 引数
    /// * `path` - 読み込むファイルのパス
    ///
    /// # 戻り値
    /// 読み込んだファイル、または失敗時はI/Oエラー
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let mime_type = validation::content_type(&name).to_string();

        Ok(Self {
            name,
            mime_type,
            data,
        })
    }
}

/// createが解決した時点で確定する領収書参照
///
/// 以後この組は不変で、update呼び出しの前提条件になる
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptRef {
    /// ストアが割り当てた経費精算書の識別子
    pub bill_id: String,
    /// 保存された領収書画像のURL
    pub file_url: String,
    /// 元のファイル名
    pub file_name: String,
}

/// 提出フローの状態
///
/// DoneとFailedが終端。Failedは次のファイル選択で回復できる
/// （プロセスではなくその提出の失敗にすぎない）。
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    /// 初期状態（ファイル未選択）
    Idle,
    /// create呼び出し中
    Uploading { file_name: String },
    /// 領収書参照が確定し、フォーム送信を待っている
    ReadyToSubmit(ReceiptRef),
    /// update呼び出し中
    Submitting(ReceiptRef),
    /// 永続化が確認され、一覧への遷移が指示された
    Done,
    /// ストア障害で失敗した（メッセージは報告済み）
    Failed { message: String },
}
