//! Client side of the product catalog: the data access layer and the
//! controllers behind the list and form screens.

pub mod dialog;
pub mod error;
pub mod form_view;
pub mod list_view;
pub mod navigation;
pub mod notifications;
pub mod service;
pub mod settings;

pub use dialog::{ButtonColor, ConfirmDialog, ConfirmRequest, FixedAnswer};
pub use error::{ClientConfigError, ServiceError};
pub use form_view::{FormMode, ProductForm, ProductFormView, SubmitOutcome};
pub use list_view::{DeleteOutcome, ProductListView, SortDirection, SortKey};
pub use navigation::{Navigator, Route, RouteHistory};
pub use notifications::{Notification, NotificationCenter, NotificationKind, Notifier};
pub use service::{
    mock::MockProductService, product_service, remote::RemoteProductService, ProductService,
};
pub use settings::{BackendMode, ClientConfig};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
