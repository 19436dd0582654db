use anyhow::anyhow;
use serde::{Deserialize, Deserializer, Serialize};

use crate::newtype;

/// Расход (note de frais) в том виде, в котором его хранит сервер.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Bill {
    /// Идентификатор, назначается сервером.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Почта сотрудника, которому принадлежит расход.
    pub email: String,

    /// Категория расхода.
    #[serde(rename = "type")]
    pub expense_type: String,

    /// Название расхода.
    pub name: String,

    /// Дата расхода в формате ISO-8601.
    pub date: String,

    /// Сумма с учётом налога.
    pub amount: f64,

    /// Сумма НДС.
    #[serde(deserialize_with = "string_or_number")]
    pub vat: String,

    /// Процент налога.
    pub pct: f64,

    pub status: BillStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,

    /// Комментарий администратора.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,

    /// Ссылка на загруженный чек.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,

    /// Имя файла чека.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Статус расхода.
#[derive(
    Serialize,
    Deserialize,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    enum_iterator::Sequence,
)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

/// Расход, подготовленный к отображению.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedBill {
    /// Отформатированная дата, либо исходная если её не удалось разобрать.
    pub date: String,

    /// Подпись статуса.
    pub status: &'static str,

    /// Исходная запись.
    pub bill: Bill,
}

/// Пользователь, под которым выполнен вход.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "type")]
    pub user_type: UserType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UserType {
    #[default]
    Employee,
    Admin,
}

newtype!(Email, String, "String", email_validate);

fn email_validate(value: &str) -> anyhow::Result<()> {
    if value.is_empty() {
        return Err(anyhow!("shouldn't be empty"));
    }

    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(anyhow!("should be in form local@domain")),
    }
}

/// Значения полей формы нового расхода, как их ввёл пользователь.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// Сервер отдаёт НДС то строкой, то числом.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(serde_json::Number),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::String(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Null => String::new(),
    })
}
