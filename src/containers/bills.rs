use std::{sync::Arc, vec};

use log::{debug, warn};

use crate::{
    document::{BillProof, Document, OnNavigate},
    format,
    model::{Bill, FormattedBill},
    routes::Route,
    store::{self, Store},
};

use super::Context;

/// Контейнер страницы со списком расходов.
pub struct Bills {
    document: Arc<dyn Document>,
    on_navigate: OnNavigate,
    store: Arc<dyn Store>,
}

impl Bills {
    pub fn new(ctx: &Context) -> Self {
        Self {
            document: ctx.document.clone(),
            on_navigate: ctx.on_navigate.clone(),
            store: ctx.store.clone(),
        }
    }

    /// Кнопка "Nouvelle note de frais".
    pub fn handle_click_new_bill(&self) {
        (self.on_navigate)(&Route::NewBill.to_string());
    }

    /// Иконка "глаз": показывает чек в модальном окне.
    pub fn handle_click_icon_eye(&self, bill_url: &str) {
        let proof = BillProof {
            url: bill_url.to_owned(),
            width: self.document.modal_width() / 2,
        };

        self.document.show_modal(&proof);
    }

    /// Получает расходы из хранилища и готовит их к отображению.
    ///
    /// Ошибка хранилища возвращается как есть. Расход с битой датой не
    /// прерывает список: дата остаётся исходной.
    pub async fn get_bills(&self) -> store::Result<FormattedBills> {
        let bills = self.store.bills().list().await?;

        debug!("Получено расходов: {}", bills.len());

        Ok(FormattedBills {
            inner: bills.into_iter(),
        })
    }
}

/// Одноразовая последовательность отформатированных расходов.
#[derive(Debug)]
pub struct FormattedBills {
    inner: vec::IntoIter<Bill>,
}

impl Iterator for FormattedBills {
    type Item = FormattedBill;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(format_bill)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for FormattedBills {}

fn format_bill(bill: Bill) -> FormattedBill {
    let date = match format::format_date(&bill.date) {
        Ok(date) => date,
        Err(e) => {
            warn!("Не удалось отформатировать дату расхода {:?}: {}", bill.id, e);
            format::raw_or_unknown(&bill.date)
        }
    };

    FormattedBill {
        date,
        status: format::format_status(bill.status),
        bill,
    }
}
