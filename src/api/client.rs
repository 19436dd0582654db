use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use log::debug;
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    multipart::Form,
    Method, RequestBuilder, Url,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    model::Bill,
    storage::{LocalStorage, JWT_KEY},
    store::{
        BillsResource, CreateRequest, CreatedBill, RequestHeaders, Result, Store, StoreError,
        UpdateRequest,
    },
};

use super::models::upload_form;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Внутренний клиент.
struct InnerClient {
    client: reqwest::Client,
    base_url: Url,
    storage: Arc<dyn LocalStorage>,
}

impl InnerClient {
    /// Создаёт новый инстанс внутреннего клиента.
    fn new(base_url: &str, timeout: Duration, storage: Arc<dyn LocalStorage>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        let parsed = Url::parse(base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| StoreError::BaseUrl(base_url.to_owned()))?;

        Ok(Self {
            client,
            base_url: parsed,
            storage,
        })
    }

    async fn get<R: DeserializeOwned>(&self, api_method: &[&str]) -> Result<R> {
        self.request::<(), R>(Method::GET, api_method, None, RequestHeaders::default())
            .await
    }

    async fn patch<B: Serialize, R: DeserializeOwned>(
        &self,
        api_method: &[&str],
        payload: &B,
    ) -> Result<R> {
        self.request(Method::PATCH, api_method, Some(payload), RequestHeaders::default())
            .await
    }

    async fn post_form<R: DeserializeOwned>(
        &self,
        api_method: &[&str],
        form: Form,
        headers: RequestHeaders,
    ) -> Result<R> {
        let req_builder = self.builder(Method::POST, api_method, headers).multipart(form);

        self.send(req_builder).await
    }

    async fn request<B: Serialize, R: DeserializeOwned>(
        &self,
        http_method: Method,
        api_method: &[&str],
        payload: Option<&B>,
        headers: RequestHeaders,
    ) -> Result<R> {
        let mut req_builder = self.builder(http_method, api_method, headers);

        if let Some(b) = payload {
            req_builder = req_builder.json(b)
        }

        self.send(req_builder).await
    }

    fn builder(
        &self,
        http_method: Method,
        api_method: &[&str],
        headers: RequestHeaders,
    ) -> RequestBuilder {
        let url = self.build_url(api_method);
        let mut req_builder = self.client.request(http_method.clone(), url.clone());

        if !headers.no_content_type {
            req_builder = req_builder.header(CONTENT_TYPE, "application/json")
        }

        let token = self.storage.get_item(JWT_KEY);
        if let Some(t) = &token {
            req_builder = req_builder.header(AUTHORIZATION, format!("Bearer {}", t))
        }

        debug!(
            "Запрос в АПИ: {} {} (токен: {})",
            http_method,
            url,
            if token.is_some() { "есть" } else { "нет" }
        );

        req_builder
    }

    async fn send<R: DeserializeOwned>(&self, req_builder: RequestBuilder) -> Result<R> {
        let resp = req_builder.send().await?;

        let status = resp.status();
        let url = resp.url().clone();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Тело ответа на {}: {}", url, body);

        let data = serde_json::from_str(&body)?;

        Ok(data)
    }

    /// Каждый сегмент пути экранируется отдельно.
    fn build_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Хранилище расходов поверх HTTP АПИ.
pub struct ApiStore {
    bills: ApiBills,
}

impl ApiStore {
    pub fn new(base_url: &str, timeout: Duration, storage: Arc<dyn LocalStorage>) -> Result<Self> {
        Ok(Self {
            bills: ApiBills {
                client: InnerClient::new(base_url, timeout, storage)?,
            },
        })
    }
}

impl Store for ApiStore {
    fn bills(&self) -> &dyn BillsResource {
        &self.bills
    }
}

/// Ресурс `/bills`.
pub struct ApiBills {
    client: InnerClient,
}

#[async_trait]
impl BillsResource for ApiBills {
    async fn list(&self) -> Result<Vec<Bill>> {
        self.client.get(&["bills"]).await
    }

    async fn create(&self, request: CreateRequest) -> Result<CreatedBill> {
        let form = upload_form(request.data)?;

        self.client.post_form(&["bills"], form, request.headers).await
    }

    async fn update(&self, request: UpdateRequest) -> Result<Bill> {
        self.client
            .patch(&["bills", request.selector.as_str()], &request.data)
            .await
    }
}
