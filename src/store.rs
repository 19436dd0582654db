use async_trait::async_trait;
use serde::Deserialize;

use crate::model::{Bill, Email};

/// Удалённое хранилище расходов.
pub trait Store: Send + Sync {
    fn bills(&self) -> &dyn BillsResource;
}

/// Ресурс `bills` хранилища.
#[async_trait]
pub trait BillsResource: Send + Sync {
    /// Возвращает все расходы.
    async fn list(&self) -> Result<Vec<Bill>>;

    /// Загружает чек и заводит под него новый расход.
    async fn create(&self, request: CreateRequest) -> Result<CreatedBill>;

    /// Обновляет ранее заведённый расход.
    async fn update(&self, request: UpdateRequest) -> Result<Bill>;
}

/// Запрос на загрузку чека.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequest {
    pub data: BillUpload,
    pub headers: RequestHeaders,
}

/// Multipart тело запроса на загрузку: файл и почта сотрудника.
#[derive(Debug, Clone, PartialEq)]
pub struct BillUpload {
    pub file: ReceiptFile,
    pub email: Email,
}

/// Файл чека, выбранный пользователем.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl ReceiptFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// MIME тип, определённый по расширению.
    pub fn mime(&self) -> mime_guess::Mime {
        mime_guess::from_path(&self.name).first_or_octet_stream()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    /// Не выставлять `Content-Type: application/json`, его задаст multipart.
    pub no_content_type: bool,
}

/// Ответ на загрузку чека.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBill {
    #[serde(default)]
    pub file_url: Option<String>,

    /// Идентификатор заведённого расхода.
    pub key: String,
}

/// Запрос на обновление расхода.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub data: Bill,

    /// Идентификатор обновляемого расхода.
    pub selector: String,
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("request")]
    Http(#[from] reqwest::Error),

    #[error("got {status}: {body}")]
    Status { status: u16, body: String },

    #[error("decode response")]
    Decode(#[from] serde_json::Error),

    #[error("rejected: {0}")]
    Rejected(String),

    #[error("invalid API url {0:?}")]
    BaseUrl(String),
}
