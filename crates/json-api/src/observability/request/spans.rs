//! Route labels for request spans and metrics.

/// Label shared by every path outside the served route set.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Map a request path onto its route template so metrics keep a bounded
/// label set.
pub(super) fn route_label(path: &str) -> &'static str {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.as_slice() {
        [] => "/",
        ["metrics"] => "/metrics",
        ["docs", ..] => "/docs",
        ["api-doc", "openapi.json"] => "/api-doc/openapi.json",
        ["api", "health"] => "/api/health",
        ["api", "products"] => "/api/products",
        ["api", "products", "search"] => "/api/products/search",
        ["api", "products", "category", _] => "/api/products/category/{category}",
        ["api", "products", _] => "/api/products/{id}",
        _ => UNMATCHED_ROUTE,
    }
}
