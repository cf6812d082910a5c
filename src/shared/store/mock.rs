// テスト用のストアダブル
//
// 既定ではcreateが固定の { fileUrl, key } を返し、呼び出し内容を
// 記録するため、ワークフローのテストから検証できる。

use crate::features::bills::models::{Bill, BillStatus};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::store::{CreateBillPayload, CreateBillResponse, StoreGateway};
use std::sync::Mutex;

/// createが返す固定の領収書URL
pub const MOCK_FILE_URL: &str = "https://localhost:3456/images/test.jpg";

/// createが返す固定の識別子
pub const MOCK_BILL_KEY: &str = "1234";

/// ストアのモック実装
pub struct MockStore {
    bills: Vec<Bill>,
    list_error: Option<String>,
    create_error: Option<String>,
    update_error: Option<String>,
    /// 記録されたcreate呼び出し
    pub created: Mutex<Vec<CreateBillPayload>>,
    /// 記録されたupdate呼び出し（id, 送信されたBill）
    pub updated: Mutex<Vec<(String, Bill)>>,
}

impl MockStore {
    /// 固定のフィクスチャ入りモックを作成する
    pub fn new() -> Self {
        Self::with_bills(fixture_bills())
    }

    /// 空のモックを作成する
    pub fn empty() -> Self {
        Self::with_bills(Vec::new())
    }

    /// 任意のレコードを持つモックを作成する
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills,
            list_error: None,
            create_error: None,
            update_error: None,
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
        }
    }

    /// listが指定メッセージで失敗するモックを作成する
    pub fn failing_list(message: &str) -> Self {
        let mut mock = Self::empty();
        mock.list_error = Some(message.to_string());
        mock
    }

    /// createが指定メッセージで失敗するモックを作成する
    pub fn failing_create(message: &str) -> Self {
        let mut mock = Self::empty();
        mock.create_error = Some(message.to_string());
        mock
    }

    /// updateが指定メッセージで失敗するモックを作成する
    pub fn failing_update(message: &str) -> Self {
        let mut mock = Self::empty();
        mock.update_error = Some(message.to_string());
        mock
    }

    /// create呼び出し回数を取得する
    pub fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    /// update呼び出し回数を取得する
    pub fn update_calls(&self) -> usize {
        self.updated.lock().unwrap().len()
    }

    /// 最後のupdate呼び出しを取得する
    pub fn last_update(&self) -> Option<(String, Bill)> {
        self.updated.lock().unwrap().last().cloned()
    }
}

impl StoreGateway for MockStore {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        if let Some(message) = &self.list_error {
            return Err(AppError::store(message.clone()));
        }
        Ok(self.bills.clone())
    }

    async fn create(&self, payload: CreateBillPayload) -> AppResult<CreateBillResponse> {
        if let Some(message) = &self.create_error {
            return Err(AppError::store(message.clone()));
        }
        self.created.lock().unwrap().push(payload);
        Ok(CreateBillResponse {
            file_url: MOCK_FILE_URL.to_string(),
            key: MOCK_BILL_KEY.to_string(),
        })
    }

    async fn update(&self, id: &str, bill: &Bill) -> AppResult<Bill> {
        if let Some(message) = &self.update_error {
            return Err(AppError::store(message.clone()));
        }
        self.updated.lock().unwrap().push((id.to_string(), bill.clone()));
        Ok(bill.clone())
    }
}

/// 一覧テスト用の固定レコード（4件、日付とステータスが分散している）
pub fn fixture_bills() -> Vec<Bill> {
    vec![
        Bill {
            id: "47qAXb6fIm2zOKkLzMro".to_string(),
            expense_type: "Hôtel et logement".to_string(),
            name: "encore".to_string(),
            amount: 400.0,
            date: "2004-04-04".to_string(),
            vat: Some(80.0),
            pct: Some(20),
            commentary: Some("séminaire billed".to_string()),
            file_url: Some("https://localhost:3456/images/test.jpg".to_string()),
            file_name: Some("preview-facture-free-201801-pdf-1.jpg".to_string()),
            status: BillStatus::Pending,
            email: "a@a".to_string(),
        },
        Bill {
            id: "BeKy5Mo4jkmdfPGYpTxZ".to_string(),
            expense_type: "Services en ligne".to_string(),
            name: "test1".to_string(),
            amount: 100.0,
            date: "2001-01-01".to_string(),
            vat: None,
            pct: Some(20),
            commentary: None,
            file_url: Some("https://localhost:3456/images/test.jpg".to_string()),
            file_name: Some("facture-client-php-exportee-dans-document-pdf.jpg".to_string()),
            status: BillStatus::Refused,
            email: "a@a".to_string(),
        },
        Bill {
            id: "UIUZtnPQvnbFnB0ozvJh".to_string(),
            expense_type: "Services en ligne".to_string(),
            name: "test3".to_string(),
            amount: 300.0,
            date: "2003-03-03".to_string(),
            vat: Some(60.0),
            pct: Some(20),
            commentary: None,
            file_url: Some("https://localhost:3456/images/test.jpg".to_string()),
            file_name: Some("facture-202301.jpg".to_string()),
            status: BillStatus::Accepted,
            email: "a@a".to_string(),
        },
        Bill {
            id: "qcCK3SzECmaZAGRrHjaC".to_string(),
            expense_type: "Restaurants et bars".to_string(),
            name: "test2".to_string(),
            amount: 200.0,
            date: "2002-02-02".to_string(),
            vat: Some(40.0),
            pct: Some(20),
            commentary: Some("test2".to_string()),
            file_url: Some("https://localhost:3456/images/test.jpg".to_string()),
            file_name: Some("facture-202212.jpg".to_string()),
            status: BillStatus::Refused,
            email: "a@a".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let mock = MockStore::empty();

        let payload = CreateBillPayload {
            file_name: "image.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![1, 2, 3],
            email: "employee@test.com".to_string(),
        };
        let response = mock.create(payload).await.unwrap();
        assert_eq!(response.file_url, MOCK_FILE_URL);
        assert_eq!(response.key, MOCK_BILL_KEY);
        assert_eq!(mock.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let mock = MockStore::failing_list("Erreur 404");
        let result = mock.list().await;
        assert_eq!(result.unwrap_err().user_message(), "Erreur 404");
    }

    #[test]
    fn test_fixture_bills_shape() {
        let bills = fixture_bills();
        assert_eq!(bills.len(), 4);
        // フィクスチャの日付は既知の4つ
        let dates: Vec<&str> = bills.iter().map(|b| b.date.as_str()).collect();
        assert!(dates.contains(&"2004-04-04"));
        assert!(dates.contains(&"2001-01-01"));
    }
}
