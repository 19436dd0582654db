mod bills;
mod new_bill;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use crate::{
    document::{Document, OnNavigate},
    storage::LocalStorage,
    store::Store,
};

pub use bills::{Bills, FormattedBills};
pub use new_bill::{
    is_valid_extension, parse_amount, FileChange, NewBill, Phase, Submission,
    ACCEPTED_EXTENSIONS, INVALID_FILE_MESSAGE,
};

/// Окружение, которое получает каждый контейнер при создании.
#[derive(Clone)]
pub struct Context {
    pub document: Arc<dyn Document>,
    pub on_navigate: OnNavigate,
    pub store: Arc<dyn Store>,
    pub local_storage: Arc<dyn LocalStorage>,
}
