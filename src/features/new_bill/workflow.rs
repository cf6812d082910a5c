// 提出フローの状態機械とドライバ
//
// 遷移は純粋関数として表現し、ストア呼び出し（create / update）は
// ドライバが作用として実行して完了イベントを遷移へ戻す。updateが
// createの解決より先に呼ばれることは状態機械の構造上ありえない。
//
// 既知の制限: createの解決後にフォームが放棄されると、ストア側に
// 領収書ファイルだけが残る。クライアント側では回収しない。

use crate::features::bills::models::{Bill, BillStatus};
use crate::features::new_bill::models::{NewBillForm, ReceiptRef, SelectedFile, SubmissionState};
use crate::features::receipts::validation;
use crate::shared::session::Employee;
use crate::shared::store::{CreateBillPayload, CreateBillResponse, StoreGateway};
use log::{error, info};

/// pctが数値として読めない場合に適用する既定のTVA率
const DEFAULT_VAT_PCT: u32 = 20;

/// 状態機械への入力イベント
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    /// ユーザーがファイルを選択した
    FileSelected(SelectedFile),
    /// createが解決した
    UploadCompleted(CreateBillResponse),
    /// createが失敗した
    UploadFailed(String),
    /// ユーザーがフォームを送信した
    SubmitRequested(NewBillForm),
    /// updateが解決した
    UpdateCompleted(Bill),
    /// updateが失敗した
    UpdateFailed(String),
}

/// 遷移が指示する作用
///
/// UploadとSaveBillはドライバがストアに対して実行する。
/// 残りはUI層（アダプタ）への描画・遷移指示。
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// ファイル入力欄を空に戻す
    ResetFileInput,
    /// ユーザーへメッセージを表示する（アラートチャネル）
    NotifyUser(String),
    /// 領収書ファイルをストアへ送る（create）
    Upload(SelectedFile),
    /// 組み立て済みレコードで確定する（update）
    SaveBill { bill_id: String, bill: Bill },
    /// 一覧画面へ遷移する
    NavigateToBills,
    /// 失敗を報告する（診断チャネル、握りつぶし禁止）
    ReportError(String),
}

/// 純粋な状態遷移関数
///
/// 想定外の（現在の状態で意味を持たない）イベントは無視され、
/// 状態は変わらず作用も発生しない。
///
/// # 引数
/// * `state` - 現在の状態
/// * `event` - 入力イベント
/// * `employee` - 提出者の従業員コンテキスト
///
/// # 戻り値
/// 次の状態と、実行すべき作用の列
pub fn transition(
    state: SubmissionState,
    event: SubmissionEvent,
    employee: &Employee,
) -> (SubmissionState, Vec<Effect>) {
    match (state, event) {
        // ファイル選択: 検証に通ればアップロードへ。Failedからの
        // やり直しも、別ファイルへの選び直しも同じ経路を通る
        (
            SubmissionState::Idle
            | SubmissionState::Failed { .. }
            | SubmissionState::ReadyToSubmit(_),
            SubmissionEvent::FileSelected(file),
        ) => match validation::validate_receipt_file(&file.name, &file.mime_type) {
            Ok(()) => {
                let file_name = file.name.clone();
                (
                    SubmissionState::Uploading { file_name },
                    vec![Effect::Upload(file)],
                )
            }
            // 却下はローカルで完結する: 入力欄を空へ戻し、固定文言を表示
            Err(e) => (
                SubmissionState::Idle,
                vec![
                    Effect::ResetFileInput,
                    Effect::NotifyUser(e.user_message().to_string()),
                ],
            ),
        },

        (SubmissionState::Uploading { file_name }, SubmissionEvent::UploadCompleted(response)) => {
            let receipt = ReceiptRef {
                bill_id: response.key,
                file_url: response.file_url,
                file_name,
            };
            (SubmissionState::ReadyToSubmit(receipt), vec![])
        }

        (SubmissionState::Uploading { .. }, SubmissionEvent::UploadFailed(message)) => (
            SubmissionState::Failed {
                message: message.clone(),
            },
            vec![Effect::ReportError(message)],
        ),

        (SubmissionState::ReadyToSubmit(receipt), SubmissionEvent::SubmitRequested(form)) => {
            match validate_form(&form) {
                Some(amount) => {
                    let bill = assemble_bill(&form, amount, &receipt, employee);
                    let bill_id = receipt.bill_id.clone();
                    (
                        SubmissionState::Submitting(receipt),
                        vec![Effect::SaveBill { bill_id, bill }],
                    )
                }
                // 必須項目が欠けている場合は何もしない:
                // ストア呼び出しも、遷移も、エラー報告も発生しない
                None => (SubmissionState::ReadyToSubmit(receipt), vec![]),
            }
        }

        (SubmissionState::Submitting(_), SubmissionEvent::UpdateCompleted(_)) => {
            // 永続化が確認できたときだけ一覧への遷移を指示する
            (SubmissionState::Done, vec![Effect::NavigateToBills])
        }

        (SubmissionState::Submitting(_), SubmissionEvent::UpdateFailed(message)) => (
            SubmissionState::Failed {
                message: message.clone(),
            },
            vec![Effect::ReportError(message)],
        ),

        // 領収書参照が無いままの送信要求なども含め、その他は無視
        (state, _) => (state, vec![]),
    }
}

/// 送信前の必須項目ゲート
///
/// カテゴリ・件名・日付・TVA率が空でなく、金額が数値として
/// 読めるときに限り、解析済みの金額を返す
fn validate_form(form: &NewBillForm) -> Option<f64> {
    if form.expense_type.trim().is_empty()
        || form.expense_name.trim().is_empty()
        || form.datepicker.trim().is_empty()
        || form.pct.trim().is_empty()
    {
        return None;
    }

    form.amount.trim().parse::<f64>().ok()
}

/// update用の完全なレコードを組み立てる
///
/// ステータスは常にpendingで送り、fileUrl / fileNameは確定済みの
/// 領収書参照から埋める
fn assemble_bill(
    form: &NewBillForm,
    amount: f64,
    receipt: &ReceiptRef,
    employee: &Employee,
) -> Bill {
    let commentary = form.commentary.trim();

    Bill {
        id: receipt.bill_id.clone(),
        expense_type: form.expense_type.trim().to_string(),
        name: form.expense_name.trim().to_string(),
        amount,
        date: form.datepicker.trim().to_string(),
        vat: form.vat.trim().parse().ok(),
        pct: Some(form.pct.trim().parse().unwrap_or(DEFAULT_VAT_PCT)),
        commentary: if commentary.is_empty() {
            None
        } else {
            Some(commentary.to_string())
        },
        file_url: Some(receipt.file_url.clone()),
        file_name: Some(receipt.file_name.clone()),
        status: BillStatus::Pending,
        email: employee.email.clone(),
    }
}

/// 提出フローを駆動するワークフロー
///
/// ストア呼び出し中の再入は`&mut self`により呼び出し側で防がれる
/// （同一提出に対する並行create / updateは未定義動作のため）。
pub struct BillSubmissionWorkflow<S> {
    store: S,
    employee: Employee,
    state: SubmissionState,
}

impl<S: StoreGateway> BillSubmissionWorkflow<S> {
    /// ストアと従業員コンテキストを指定して作成する
    pub fn new(store: S, employee: Employee) -> Self {
        Self {
            store,
            employee,
            state: SubmissionState::Idle,
        }
    }

    /// 現在の状態を取得する
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// ファイル選択イベントを処理する
    ///
    /// 検証に通ればcreateを実行し、領収書参照を確定させる。
    /// 却下時はストアに触れず、UIへの指示だけを返す。
    pub async fn handle_file_selected(&mut self, file: SelectedFile) -> Vec<Effect> {
        self.dispatch(SubmissionEvent::FileSelected(file)).await
    }

    /// フォーム送信イベントを処理する
    ///
    /// 必須項目ゲートを通過した場合のみupdateを実行する。
    /// 永続化が確認できたときだけ一覧への遷移指示を返す。
    pub async fn handle_submit(&mut self, form: NewBillForm) -> Vec<Effect> {
        self.dispatch(SubmissionEvent::SubmitRequested(form)).await
    }

    /// イベントを遷移関数へ送り、ストア作用を実行し、UI向けの作用を返す
    async fn dispatch(&mut self, event: SubmissionEvent) -> Vec<Effect> {
        let mut pending = vec![event];
        let mut instructions = Vec::new();

        while let Some(event) = pending.pop() {
            let (next, effects) = transition(self.state.clone(), event, &self.employee);
            self.state = next;

            for effect in effects {
                match effect {
                    Effect::Upload(file) => {
                        info!(
                            "領収書をアップロードします: file_name={}, size={} bytes",
                            file.name,
                            file.data.len()
                        );
                        let payload = CreateBillPayload {
                            content_type: validation::content_type(&file.name).to_string(),
                            file_name: file.name,
                            data: file.data,
                            email: self.employee.email.clone(),
                        };
                        let follow_up = match self.store.create(payload).await {
                            Ok(response) => {
                                info!(
                                    "アップロード成功: fileUrl={}, key={}",
                                    response.file_url, response.key
                                );
                                SubmissionEvent::UploadCompleted(response)
                            }
                            Err(e) => {
                                SubmissionEvent::UploadFailed(e.user_message().to_string())
                            }
                        };
                        pending.push(follow_up);
                    }
                    Effect::SaveBill { bill_id, bill } => {
                        info!("経費精算書を確定します: id={bill_id}");
                        let follow_up = match self.store.update(&bill_id, &bill).await {
                            Ok(saved) => {
                                info!("確定成功: id={bill_id}");
                                SubmissionEvent::UpdateCompleted(saved)
                            }
                            Err(e) => {
                                SubmissionEvent::UpdateFailed(e.user_message().to_string())
                            }
                        };
                        pending.push(follow_up);
                    }
                    Effect::ReportError(message) => {
                        // ストア障害は握りつぶさず、必ず記録した上でUIへ渡す
                        error!("提出フローが失敗しました: {message}");
                        instructions.push(Effect::ReportError(message));
                    }
                    other => instructions.push(other),
                }
            }
        }

        instructions
    }
}
