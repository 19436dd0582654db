use std::sync::Arc;

use log::{debug, error, warn};

use crate::{
    document::{Document, OnNavigate},
    model::{Bill, BillStatus, Email, NewBillForm},
    routes::Route,
    storage::{self, LocalStorage},
    store::{BillUpload, CreateRequest, ReceiptFile, RequestHeaders, Store, UpdateRequest},
};

use super::Context;

/// Расширения чеков, которые принимает сервер.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub const INVALID_FILE_MESSAGE: &str =
    "Seuls les fichiers au format jpg, jpeg ou png sont acceptés.";

/// Процент налога, если пользователь его не указал.
const DEFAULT_PCT: f64 = 20.0;

/// Проверяет что у файла подходящее расширение.
pub fn is_valid_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ACCEPTED_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Стадия заполнения формы.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Чек ещё не загружен.
    #[default]
    NoFile,

    /// Чек загружен, расход заведён на сервере.
    UploadSucceeded,

    /// Расход отправлен, дальше ничего не меняется.
    Submitted,
}

/// Чем закончилась смена файла.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    /// Неподходящее расширение, показан alert.
    Rejected,
    Uploaded,
    /// Ошибка загрузки, записана в лог.
    UploadFailed,
    /// Расход уже отправлен, файл ничего не меняет.
    Ignored,
}

/// Чем закончилась отправка формы.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Нет загруженного чека, либо расход уже отправлен.
    Blocked,
    Submitted,
    /// Ошибка отправки, записана в лог. Можно отправить ещё раз.
    Failed,
}

/// Контейнер страницы нового расхода.
pub struct NewBill {
    document: Arc<dyn Document>,
    on_navigate: OnNavigate,
    store: Arc<dyn Store>,
    local_storage: Arc<dyn LocalStorage>,

    phase: Phase,
    is_file_valid: bool,
    file_url: Option<String>,
    file_name: Option<String>,
    bill_id: Option<String>,
}

impl NewBill {
    pub fn new(ctx: &Context) -> Self {
        Self {
            document: ctx.document.clone(),
            on_navigate: ctx.on_navigate.clone(),
            store: ctx.store.clone(),
            local_storage: ctx.local_storage.clone(),
            phase: Phase::default(),
            is_file_valid: false,
            file_url: None,
            file_name: None,
            bill_id: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_file_valid(&self) -> bool {
        self.is_file_valid
    }

    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn bill_id(&self) -> Option<&str> {
        self.bill_id.as_deref()
    }

    /// Пользователь выбрал файл чека.
    ///
    /// Файл с неподходящим расширением никуда не отправляется. Подходящий
    /// сразу загружается, и в ответ сервер заводит черновик расхода.
    pub async fn handle_change_file(&mut self, file: ReceiptFile) -> FileChange {
        if self.phase == Phase::Submitted {
            warn!("Расход {:?} уже отправлен, файл {:?} пропущен", self.bill_id, file.name);
            return FileChange::Ignored;
        }

        if !is_valid_extension(&file.name) {
            debug!("Файл {:?} отклонён", file.name);
            // Прошлая загрузка остаётся, но отправить её нельзя.
            self.is_file_valid = false;
            self.phase = Phase::NoFile;
            self.document.alert(INVALID_FILE_MESSAGE);
            return FileChange::Rejected;
        }

        self.is_file_valid = true;

        let email = match self.email() {
            Some(email) => email,
            None => return FileChange::UploadFailed,
        };

        let file_name = file.name.clone();
        let request = CreateRequest {
            data: BillUpload { file, email },
            headers: RequestHeaders {
                no_content_type: true,
            },
        };

        match self.store.bills().create(request).await {
            Ok(created) => {
                debug!("Чек {} загружен, расход {}", file_name, created.key);
                self.file_url = created.file_url;
                self.file_name = Some(file_name);
                self.bill_id = Some(created.key);
                if self.phase == Phase::NoFile {
                    self.phase = Phase::UploadSucceeded;
                }
                FileChange::Uploaded
            }
            Err(e) => {
                error!("Не удалось загрузить чек {}: {}", file_name, e);
                FileChange::UploadFailed
            }
        }
    }

    /// Пользователь отправил форму.
    pub async fn handle_submit(&mut self, form: &NewBillForm) -> Submission {
        if self.phase == Phase::Submitted {
            warn!("Расход {:?} уже отправлен", self.bill_id);
            return Submission::Blocked;
        }

        let bill_id = match (&self.bill_id, self.is_file_valid) {
            (Some(id), true) => id.clone(),
            _ => {
                warn!("Отправка без загруженного чека");
                return Submission::Blocked;
            }
        };

        let email = match self.email() {
            Some(email) => email,
            None => return Submission::Failed,
        };

        let bill = match compose_bill(form, email, self.file_url.clone(), self.file_name.clone())
        {
            Ok(bill) => bill,
            Err(e) => {
                error!("Форма заполнена неверно: {}", e);
                return Submission::Failed;
            }
        };

        let request = UpdateRequest {
            data: bill,
            selector: bill_id,
        };

        match self.store.bills().update(request).await {
            Ok(_) => {
                self.phase = Phase::Submitted;
                (self.on_navigate)(&Route::Bills.to_string());
                Submission::Submitted
            }
            Err(e) => {
                error!("Не удалось отправить расход {:?}: {}", self.bill_id, e);
                Submission::Failed
            }
        }
    }

    fn email(&self) -> Option<Email> {
        storage::current_email(self.local_storage.as_ref())
            .map_err(|e| error!("Не удалось определить пользователя: {}", e))
            .ok()
    }
}

/// Собирает расход из формы. Статус всегда "pending".
fn compose_bill(
    form: &NewBillForm,
    email: Email,
    file_url: Option<String>,
    file_name: Option<String>,
) -> Result<Bill, FormError> {
    let amount =
        parse_amount(&form.amount).ok_or_else(|| FormError::Amount(form.amount.clone()))?;

    let pct: f64 = form.pct.trim().parse().unwrap_or(DEFAULT_PCT);

    let commentary = Some(form.commentary.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_owned);

    Ok(Bill {
        id: None,
        email: email.into(),
        expense_type: form.expense_type.clone(),
        name: form.name.clone(),
        date: form.date.clone(),
        amount: amount as f64,
        vat: form.vat.trim().to_owned(),
        pct,
        status: BillStatus::Pending,
        commentary,
        comment_admin: None,
        file_url,
        file_name,
    })
}

/// Целая часть суммы: ведущие цифры после необязательного знака.
/// `"12.5"` даёт 12, `"cent"` не разбирается.
pub fn parse_amount(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(s.len(), |(i, _)| i);

    s[..end].parse().ok()
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
enum FormError {
    #[error("amount \"{0}\" is not a number")]
    Amount(String),
}
