use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

use shared::domain::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ProductList,
    NewProduct,
    EditProduct(ProductId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::ProductList => "/products".to_string(),
            Route::NewProduct => "/products/new".to_string(),
            Route::EditProduct(id) => format!("/products/edit/{id}"),
        }
    }

    /// The empty path redirects to the list. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };
        match segments.as_slice() {
            [] | ["products"] => Some(Route::ProductList),
            ["products", "new"] => Some(Route::NewProduct),
            ["products", "edit", id] => id.parse().ok().map(|id| Route::EditProduct(ProductId(id))),
            _ => None,
        }
    }

    /// The id the form view should load, if any.
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            Route::EditProduct(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Records every navigation; the last entry is the current route.
pub struct RouteHistory {
    entries: Mutex<Vec<Route>>,
}

impl RouteHistory {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: Mutex::new(vec![initial]),
        }
    }

    pub fn current(&self) -> Route {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.last().copied().unwrap_or(Route::ProductList)
    }

    pub fn entries(&self) -> Vec<Route> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for RouteHistory {
    fn default() -> Self {
        Self::new(Route::ProductList)
    }
}

impl Navigator for RouteHistory {
    fn navigate(&self, route: Route) {
        tracing::debug!(%route, "navigate");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::parse(""), Some(Route::ProductList));
        assert_eq!(Route::parse("/"), Some(Route::ProductList));
        assert_eq!(Route::parse("/products"), Some(Route::ProductList));
        assert_eq!(Route::parse("/products/new"), Some(Route::NewProduct));
        assert_eq!(
            Route::parse("/products/edit/12"),
            Some(Route::EditProduct(ProductId(12)))
        );
    }

    #[test]
    fn rejects_unknown_or_non_numeric_paths() {
        assert_eq!(Route::parse("/products/edit/abc"), None);
        assert_eq!(Route::parse("/orders"), None);
        assert_eq!(Route::parse("/products/edit"), None);
    }

    #[test]
    fn path_and_parse_agree() {
        for route in [
            Route::ProductList,
            Route::NewProduct,
            Route::EditProduct(ProductId(3)),
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
        assert_eq!(Route::EditProduct(ProductId(3)).product_id(), Some(ProductId(3)));
        assert_eq!(Route::NewProduct.product_id(), None);
    }

    #[test]
    fn history_tracks_current_route() {
        let history = RouteHistory::default();
        history.navigate(Route::NewProduct);
        history.navigate(Route::ProductList);
        assert_eq!(history.current(), Route::ProductList);
        assert_eq!(history.entries().len(), 3);
    }
}
