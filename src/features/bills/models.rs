use serde::{Deserialize, Serialize};

/// 経費カテゴリの閉集合（フォームの選択肢はここから作られる）
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// 経費精算書の承認ステータス（サーバー側が割り当てる）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// 画面表示用のラベルを取得する
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }
}

/// 経費精算書データモデル（ストアのワイヤ形式）
///
/// fileUrlとfileNameの両方が揃うまでレコードは「完成」とみなされない。
/// dateはユーザー入力のままの文字列で、形式は揃っていない。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Bill {
    pub id: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: Option<f64>,
    pub pct: Option<u32>,
    pub commentary: Option<String>,
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
    pub status: BillStatus,
    pub email: String,
}

/// 一覧画面の表示用行
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BillRow {
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub date: String,
    #[serde(rename = "formatedDate")]
    pub formated_date: String,
    pub amount: f64,
    /// 表示用のステータスラベル
    pub status: String,
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
}
