use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use shared::domain::{Product, ProductId};

use crate::{
    dialog::{ConfirmDialog, ConfirmRequest},
    error::ServiceError,
    notifications::{Notification, Notifier},
    service::{mock::MockProductService, ProductService},
};

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub(crate) fn all(&self) -> Vec<Notification> {
        self.seen.lock().expect("notifier lock").clone()
    }

    pub(crate) fn last(&self) -> Option<Notification> {
        self.all().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().expect("notifier lock").push(notification);
    }
}

pub(crate) struct ScriptedDialog {
    answer: bool,
    asked: Mutex<Vec<ConfirmRequest>>,
}

impl ScriptedDialog {
    pub(crate) fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn asked(&self) -> Vec<ConfirmRequest> {
        self.asked.lock().expect("dialog lock").clone()
    }
}

#[async_trait]
impl ConfirmDialog for ScriptedDialog {
    async fn confirm(&self, request: &ConfirmRequest) -> bool {
        self.asked.lock().expect("dialog lock").push(request.clone());
        self.answer
    }
}

/// Wraps the mock backend and fails chosen operations on demand.
#[derive(Default)]
pub(crate) struct FaultyService {
    pub(crate) inner: MockProductService,
    pub(crate) fail_list: AtomicBool,
    pub(crate) fail_get: AtomicBool,
    pub(crate) fail_create: AtomicBool,
    pub(crate) fail_update: AtomicBool,
    pub(crate) fail_delete: AtomicBool,
}

impl FaultyService {
    pub(crate) fn wrapping(inner: MockProductService) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }
}

fn boom() -> ServiceError {
    ServiceError::Rejected {
        status: 500,
        message: "boom".to_string(),
    }
}

fn check(flag: &AtomicBool) -> Result<(), ServiceError> {
    if flag.load(Ordering::SeqCst) {
        Err(boom())
    } else {
        Ok(())
    }
}

#[async_trait]
impl ProductService for FaultyService {
    async fn list_all(&self) -> Result<Vec<Product>, ServiceError> {
        check(&self.fail_list)?;
        self.inner.list_all().await
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, ServiceError> {
        check(&self.fail_get)?;
        self.inner.get_by_id(id).await
    }

    async fn create(&self, product: Product) -> Result<Product, ServiceError> {
        check(&self.fail_create)?;
        self.inner.create(product).await
    }

    async fn update(&self, product: Product) -> Result<Product, ServiceError> {
        check(&self.fail_update)?;
        self.inner.update(product).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        check(&self.fail_delete)?;
        self.inner.delete(id).await
    }
}

pub(crate) fn laptop_only() -> MockProductService {
    MockProductService::with_products(vec![Product::new(
        "Laptop",
        "Gaming Laptop alta gama",
        1200.0,
        5,
    )
    .with_id(ProductId(1))])
}

pub(crate) fn arc<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
