//! CORS middleware

use salvo::{
    http::{
        Method,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue,
        },
    },
    prelude::*,
};

const ALLOWED_ORIGIN: &str = "*";
const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept, Authorization";

/// Adds permissive CORS headers to every response and answers any
/// `OPTIONS` request with an empty 200.
///
/// Mounted on the service rather than a router so that preflight requests
/// for unmatched paths are answered too.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let headers = res.headers_mut();

    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOWED_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );

    if req.method() == Method::OPTIONS {
        res.status_code(StatusCode::OK);
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}
