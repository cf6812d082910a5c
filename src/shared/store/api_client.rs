// ストアゲートウェイのHTTP実装
//
// ステータスエラーはそのままユーザー向けメッセージ（"Erreur 404" など）に
// 変換され、トランスポート障害のみ指数バックオフでリトライする。

use crate::features::bills::models::Bill;
use crate::shared::config::StoreConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::store::{CreateBillPayload, CreateBillResponse, StoreGateway};
use log::{error, info, warn};
use reqwest::{multipart, Client, StatusCode};
use std::time::Duration;
use uuid::Uuid;

/// HTTPベースのストアクライアント
pub struct ApiStoreClient {
    client: Client,
    config: StoreConfig,
    auth_token: Option<String>,
}

impl ApiStoreClient {
    /// 設定を指定してクライアントを作成する
    pub fn new(config: StoreConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self {
            client,
            config,
            auth_token: None,
        })
    }

    /// 環境変数の設定からクライアントを作成する
    pub fn from_env() -> AppResult<Self> {
        Self::new(StoreConfig::from_env()?)
    }

    /// 認証トークンを設定する（セッション管理自体は外部の責務）
    pub fn with_auth_token<S: Into<String>>(mut self, token: S) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// エンドポイントの完全なURLを組み立てる
    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// 認証トークンがあればリクエストへ付与する
    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// リトライ機能付きでリクエストを送信する
    ///
    /// multipartボディは再送時にクローンできないため、リクエストは
    /// 試行のたびにクロージャで組み立て直す。
    async fn send_with_retry<F>(
        &self,
        method: &str,
        path: &str,
        build: F,
    ) -> AppResult<reqwest::Response>
    where
        F: Fn() -> AppResult<reqwest::RequestBuilder>,
    {
        let request_id = Uuid::new_v4();
        let mut attempts = 0;

        loop {
            let request = self.apply_auth(build()?);
            info!("{method}リクエスト送信: endpoint={path}, request_id={request_id}");

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        info!("{method}リクエスト成功: endpoint={path}, request_id={request_id}");
                        return Ok(response);
                    }

                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());
                    warn!(
                        "ストアがエラーステータスを返しました: status={}, endpoint={path}, request_id={request_id}, body={body}",
                        status.as_u16()
                    );
                    return Err(status_error(status));
                }
                Err(_) if attempts < self.config.max_retries => {
                    attempts += 1;
                    // 指数バックオフ（2^attempts秒待機）
                    let delay = Duration::from_secs(2_u64.pow(attempts));
                    warn!(
                        "ストアへの接続に失敗、リトライします: attempt={attempts}/{}, delay={delay:?}, request_id={request_id}",
                        self.config.max_retries
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!(
                        "ストアへの接続に最終的に失敗しました: endpoint={path}, request_id={request_id}, error={e}"
                    );
                    return Err(AppError::store(format!("Erreur réseau: {e}")));
                }
            }
        }
    }
}

/// エラーステータスをユーザー向けメッセージへ変換する
///
/// 一覧取得に失敗したときのエラーページはこのメッセージをそのまま表示する
fn status_error(status: StatusCode) -> AppError {
    AppError::store(format!("Erreur {}", status.as_u16()))
}

impl StoreGateway for ApiStoreClient {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        let url = self.endpoint("/bills");
        let response = self
            .send_with_retry("GET", "/bills", || Ok(self.client.get(&url)))
            .await?;

        response
            .json()
            .await
            .map_err(|e| AppError::store(format!("レスポンス解析エラー: {e}")))
    }

    async fn create(&self, payload: CreateBillPayload) -> AppResult<CreateBillResponse> {
        let url = self.endpoint("/bills");
        let response = self
            .send_with_retry("POST", "/bills", || {
                let part = multipart::Part::bytes(payload.data.clone())
                    .file_name(payload.file_name.clone())
                    .mime_str(&payload.content_type)
                    .map_err(|e| {
                        AppError::validation(format!("Content-Typeが不正です: {e}"))
                    })?;
                let form = multipart::Form::new()
                    .part("file", part)
                    .text("email", payload.email.clone());
                Ok(self.client.post(&url).multipart(form))
            })
            .await?;

        response
            .json()
            .await
            .map_err(|e| AppError::store(format!("レスポンス解析エラー: {e}")))
    }

    async fn update(&self, id: &str, bill: &Bill) -> AppResult<Bill> {
        let path = format!("/bills/{id}");
        let url = self.endpoint(&path);
        let response = self
            .send_with_retry("PATCH", &path, || Ok(self.client.patch(&url).json(bill)))
            .await?;

        response
            .json()
            .await
            .map_err(|e| AppError::store(format!("レスポンス解析エラー: {e}")))
    }
}
