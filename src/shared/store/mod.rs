/// ストアゲートウェイモジュール
///
/// リモート永続化サービスとの契約（list / create / update）と、
/// そのHTTP実装を提供する。ストア自体の実装は外部サービスに属する。
pub mod api_client;
#[cfg(test)]
pub mod mock;

pub use api_client::ApiStoreClient;

use crate::features::bills::models::Bill;
use crate::shared::errors::AppResult;
use serde::{Deserialize, Serialize};

/// create呼び出しのペイロード（領収書ファイルと所有者のメール）
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBillPayload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub email: String,
}

/// create成功時のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBillResponse {
    /// 保存された領収書画像のURL
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    /// ストアが割り当てた経費精算書の識別子
    pub key: String,
}

/// リモートストアの契約
///
/// 呼び出しはすべて非同期で、失敗時はストアエラーを返す。
/// タイムアウトやキャンセルはこの契約では定義しない。
#[allow(async_fn_in_trait)]
pub trait StoreGateway {
    /// 経費精算書の一覧を取得する
    async fn list(&self) -> AppResult<Vec<Bill>>;

    /// 領収書ファイルを添付した新規レコードを作成する
    async fn create(&self, payload: CreateBillPayload) -> AppResult<CreateBillResponse>;

    /// 既存レコードを更新して確定する
    async fn update(&self, id: &str, bill: &Bill) -> AppResult<Bill>;
}

/// 参照越しでも契約を満たす（所有権を渡さずストアを共有できる）
impl<T: StoreGateway> StoreGateway for &T {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        (**self).list().await
    }

    async fn create(&self, payload: CreateBillPayload) -> AppResult<CreateBillResponse> {
        (**self).create(payload).await
    }

    async fn update(&self, id: &str, bill: &Bill) -> AppResult<Bill> {
        (**self).update(id, bill).await
    }
}
