use chrono::{DateTime, Datelike, NaiveDate};

use crate::model::BillStatus;

/// Подставляется вместо пустой даты, чтобы в таблице не было пустых ячеек.
pub const UNKNOWN_DATE: &str = "N/A";

/// Форматирует ISO дату в вид "4 Avr. 04".
pub fn format_date(raw: &str) -> Result {
    let date = parse_date(raw)?;

    Ok(format!(
        "{} {}. {}",
        date.day(),
        month(date.month0()),
        date.format("%y")
    ))
}

/// Как [`format_date`], но при ошибке возвращает исходное значение.
pub fn format_date_or_raw(raw: &str) -> String {
    format_date(raw).unwrap_or_else(|_| raw_or_unknown(raw))
}

pub(crate) fn raw_or_unknown(raw: &str) -> String {
    if raw.trim().is_empty() {
        UNKNOWN_DATE.to_owned()
    } else {
        raw.to_owned()
    }
}

/// Разбирает дату вида YYYY-MM-DD, либо RFC 3339 метку времени.
pub fn parse_date(raw: &str) -> std::result::Result<NaiveDate, Error> {
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| Error::MalformedDate(raw.to_owned()))
}

/// Подпись для статуса расхода.
pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refused",
    }
}

fn month(month0: u32) -> &'static str {
    match month0 {
        0 => "Jan",
        1 => "Fév",
        2 => "Mar",
        3 => "Avr",
        4 => "Mai",
        5 => "Jui",
        6 => "Jui",
        7 => "Aoû",
        8 => "Sep",
        9 => "Oct",
        10 => "Nov",
        11 => "Déc",
        _ => unreachable!("unknown month"),
    }
}

pub type Result = std::result::Result<String, Error>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("malformed date \"{0}\"")]
    MalformedDate(String),
}
