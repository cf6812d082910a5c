// 一覧表示用の射影
//
// ストアのlist結果を表示用の行列へ変換する。並べ替えは正規化した
// 日付の降順（新しいものが先頭）で、解析できない日付の行は落とさず
// 末尾へ回す。

use crate::features::bills::models::{Bill, BillRow};
use crate::shared::dates::{self, NormalizedDate};
use crate::shared::session::Employee;
use crate::shared::store::StoreGateway;
use log::{error, info};
use std::cmp::Ordering;

/// 一覧ビューの状態（UI層へ公開する出口状態）
#[derive(Debug, Clone, PartialEq)]
pub enum BillsViewState {
    /// 取得中
    Loading,
    /// ストア障害（表示用メッセージを保持する）
    Error(String),
    /// 表示可能な行列
    Ready(Vec<BillRow>),
}

/// 経費精算書一覧の射影
pub struct BillListProjection<S> {
    store: S,
    employee: Employee,
}

impl<S: StoreGateway> BillListProjection<S> {
    /// ストアと従業員コンテキストを指定して作成する
    pub fn new(store: S, employee: Employee) -> Self {
        Self { store, employee }
    }

    /// ストアから一覧を取得して表示用に整形する
    ///
    /// ストア呼び出しが失敗した場合は行を返さず、記録した上で
    /// 失敗メッセージを載せたエラー状態を返す
    pub async fn load(&self) -> BillsViewState {
        info!("経費精算書一覧を取得します: employee={}", self.employee.email);

        match self.store.list().await {
            Ok(bills) => {
                info!("一覧取得成功: {}件", bills.len());
                BillsViewState::Ready(project(bills))
            }
            Err(e) => {
                error!("一覧取得に失敗しました: {}", e.details());
                BillsViewState::Error(e.user_message().to_string())
            }
        }
    }
}

/// 生のレコード列を表示用の行列へ射影する（純粋関数）
///
/// 同じ入力は常に同じ出力になる。同日付の行は元の相対順を保つ（安定ソート）
pub fn project(bills: Vec<Bill>) -> Vec<BillRow> {
    let mut rows: Vec<(NormalizedDate, BillRow)> = bills
        .into_iter()
        .map(|bill| {
            let normalized = dates::normalize(&bill.date);
            (normalized, to_row(bill, normalized))
        })
        .collect();

    rows.sort_by(|(a, _), (b, _)| compare_descending(*a, *b));

    rows.into_iter().map(|(_, row)| row).collect()
}

/// 降順の比較（無効な日付は常に末尾）
fn compare_descending(a: NormalizedDate, b: NormalizedDate) -> Ordering {
    match (a, b) {
        (NormalizedDate::Valid(a), NormalizedDate::Valid(b)) => b.cmp(&a),
        (NormalizedDate::Valid(_), NormalizedDate::Invalid) => Ordering::Less,
        (NormalizedDate::Invalid, NormalizedDate::Valid(_)) => Ordering::Greater,
        (NormalizedDate::Invalid, NormalizedDate::Invalid) => Ordering::Equal,
    }
}

/// 1件のレコードを表示用の行へ変換する
fn to_row(bill: Bill, normalized: NormalizedDate) -> BillRow {
    let formated_date = match normalized {
        NormalizedDate::Valid(date) => dates::format_display(date),
        // 解析できない日付は原文のまま表示する
        NormalizedDate::Invalid => bill.date.clone(),
    };

    BillRow {
        expense_type: bill.expense_type,
        name: bill.name,
        date: bill.date,
        formated_date,
        amount: bill.amount,
        status: bill.status.label().to_string(),
        file_url: bill.file_url,
        file_name: bill.file_name,
    }
}
