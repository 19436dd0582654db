use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{
    document::{BillProof, Document},
    model::{Bill, BillStatus},
    storage::{LocalStorage, MemoryStorage, USER_KEY},
    store::{
        BillsResource, CreateRequest, CreatedBill, Result, Store, StoreError, UpdateRequest,
    },
};

use super::Context;

#[derive(Default)]
pub struct FakeStore {
    bills: FakeBills,
}

#[derive(Default)]
pub struct FakeBills {
    list: Option<Vec<Bill>>,
    created: Option<CreatedBill>,
    update_fails: bool,
    list_calls: Mutex<usize>,
    creates: Mutex<Vec<CreateRequest>>,
    updates: Mutex<Vec<UpdateRequest>>,
}

impl FakeStore {
    /// Хранилище, у которого каждый вызов завершается ошибкой.
    pub fn failing() -> Self {
        Self::default().with_failing_update()
    }

    pub fn with_list(mut self, bills: Vec<Bill>) -> Self {
        self.bills.list = Some(bills);
        self
    }

    pub fn with_created(mut self, file_url: Option<&str>, key: &str) -> Self {
        self.bills.created = Some(CreatedBill {
            file_url: file_url.map(str::to_owned),
            key: key.to_owned(),
        });
        self
    }

    pub fn with_failing_update(mut self) -> Self {
        self.bills.update_fails = true;
        self
    }

    pub fn list_calls(&self) -> usize {
        *self.bills.list_calls.lock().unwrap()
    }

    pub fn creates(&self) -> Vec<CreateRequest> {
        self.bills.creates.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<UpdateRequest> {
        self.bills.updates.lock().unwrap().clone()
    }
}

impl Store for FakeStore {
    fn bills(&self) -> &dyn BillsResource {
        &self.bills
    }
}

#[async_trait]
impl BillsResource for FakeBills {
    async fn list(&self) -> Result<Vec<Bill>> {
        *self.list_calls.lock().unwrap() += 1;
        self.list
            .clone()
            .ok_or_else(|| StoreError::Rejected("Erreur 404".into()))
    }

    async fn create(&self, request: CreateRequest) -> Result<CreatedBill> {
        self.creates.lock().unwrap().push(request);
        self.created
            .clone()
            .ok_or_else(|| StoreError::Rejected("Erreur 500".into()))
    }

    async fn update(&self, request: UpdateRequest) -> Result<Bill> {
        let mut bill = request.data.clone();
        bill.id = Some(request.selector.clone());
        self.updates.lock().unwrap().push(request);

        if self.update_fails {
            return Err(StoreError::Rejected("Erreur 500".into()));
        }
        Ok(bill)
    }
}

pub struct FakeDocument {
    pub width: u32,
    pub alerts: Mutex<Vec<String>>,
    pub modals: Mutex<Vec<BillProof>>,
}

impl Document for FakeDocument {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_owned());
    }

    fn modal_width(&self) -> u32 {
        self.width
    }

    fn show_modal(&self, proof: &BillProof) {
        self.modals.lock().unwrap().push(proof.clone());
    }
}

pub struct Harness {
    pub ctx: Context,
    pub store: Arc<FakeStore>,
    pub document: Arc<FakeDocument>,
    pub storage: Arc<MemoryStorage>,
    pub navigations: Arc<Mutex<Vec<String>>>,
}

impl Harness {
    pub fn new(store: FakeStore) -> Self {
        let store = Arc::new(store);
        let document = Arc::new(FakeDocument {
            width: 801,
            alerts: Mutex::default(),
            modals: Mutex::default(),
        });
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_item(
                USER_KEY,
                r#"{"type":"Employee","email":"employee@test.tld"}"#,
            )
            .unwrap();

        let navigations = Arc::new(Mutex::new(Vec::new()));
        let recorded = navigations.clone();

        let ctx = Context {
            document: document.clone(),
            on_navigate: Arc::new(move |path: &str| recorded.lock().unwrap().push(path.to_owned())),
            store: store.clone(),
            local_storage: storage.clone(),
        };

        Self {
            ctx,
            store,
            document,
            storage,
            navigations,
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.document.alerts.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

/// Набор расходов, с которым работают тесты.
pub fn bills() -> Vec<Bill> {
    vec![
        Bill {
            id: Some("47qAXb6fIm2zOKkLzMro".into()),
            email: "a@a".into(),
            expense_type: "Hôtel et logement".into(),
            name: "encore".into(),
            date: "2004-04-04".into(),
            amount: 400.0,
            vat: "80".into(),
            pct: 20.0,
            status: BillStatus::Pending,
            commentary: Some("séminaire billed".into()),
            file_url: Some("https://test.storage.tld/preview-facture-free-201801-pdf-1.jpg".into()),
            file_name: Some("preview-facture-free-201801-pdf-1.jpg".into()),
            ..Default::default()
        },
        Bill {
            id: Some("BeKy5Mo4jkmdfPGYpTxZ".into()),
            email: "a@a".into(),
            expense_type: "Transports".into(),
            name: "test1".into(),
            date: "2001-01-01".into(),
            amount: 100.0,
            vat: "".into(),
            pct: 20.0,
            status: BillStatus::Refused,
            commentary: Some("plop".into()),
            comment_admin: Some("en fait non".into()),
            file_url: Some("https://test.storage.tld/1592770761.jpeg".into()),
            file_name: Some("1592770761.jpeg".into()),
        },
        Bill {
            id: Some("UIUZtnPQvnbFnB0ozvJh".into()),
            email: "a@a".into(),
            expense_type: "Services en ligne".into(),
            name: "test3".into(),
            date: "2003-03-03".into(),
            amount: 300.0,
            vat: "60".into(),
            pct: 20.0,
            status: BillStatus::Accepted,
            comment_admin: Some("bon bah d'accord".into()),
            file_url: Some("https://test.storage.tld/facturefreemobile.jpg".into()),
            file_name: Some("facturefreemobile.jpg".into()),
            ..Default::default()
        },
        Bill {
            id: Some("qcCK3SzECmaZAGRrHjaC".into()),
            email: "a@a".into(),
            expense_type: "Restaurants et bars".into(),
            name: "test2".into(),
            date: "2002-02-02".into(),
            amount: 200.0,
            vat: "40".into(),
            pct: 20.0,
            status: BillStatus::Refused,
            commentary: Some("test2".into()),
            comment_admin: Some("pas la bonne facture".into()),
            file_url: Some("https://test.storage.tld/preview-facture-free-201801-pdf-1.jpg".into()),
            file_name: Some("preview-facture-free-201801-pdf-1.jpg".into()),
        },
    ]
}
