//! Static shared-secret API-key middleware.
//!
//! When constructed with a key, every request must carry it in the
//! `X-API-Key` header: a missing header is rejected with 401, a mismatch
//! with 403. When no key is configured the middleware passes everything
//! through, which keeps local development and tests friction-free.

use std::task::{Context, Poll};

use actix_web::ResponseError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::domain::Error;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Middleware guard for a statically configured API key.
#[derive(Clone)]
pub struct ApiKeyAuth {
    key: Option<String>,
}

impl ApiKeyAuth {
    /// Create a guard for the given key. `None` or an empty string disables
    /// enforcement.
    pub fn new(key: Option<String>) -> Self {
        Self {
            key: key.filter(|k| !k.is_empty()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service,
            key: self.key.clone(),
        }))
    }
}

/// Service wrapper produced by [`ApiKeyAuth`]. Not used directly.
pub struct ApiKeyAuthMiddleware<S> {
    service: S,
    key: Option<String>,
}

fn check_key(expected: &str, req: &ServiceRequest) -> Result<(), Error> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if presented.is_empty() {
        return Err(Error::unauthorized("X-API-Key header is missing"));
    }
    if presented != expected {
        return Err(Error::forbidden("Invalid API key"));
    }
    Ok(())
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(expected) = self.key.as_deref() {
            if let Err(error) = check_key(expected, &req) {
                let response = error.error_response().map_into_right_body();
                return Box::pin(async move { Ok(req.into_response(response)) });
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    fn guarded_app(
        key: Option<&str>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<EitherBody<actix_web::body::BoxBody>>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(ApiKeyAuth::new(key.map(str::to_owned)))
            .route("/", web::get().to(|| async { HttpResponse::Ok().finish() }))
    }

    async fn message_of(res: ServiceResponse<EitherBody<actix_web::body::BoxBody>>) -> String {
        let body = test::read_body(res).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        value
            .get("message")
            .and_then(Value::as_str)
            .expect("message field")
            .to_owned()
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorised() {
        let app = test::init_service(guarded_app(Some("Les Cles de Fort Boyard"))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message_of(res).await, "X-API-Key header is missing");
    }

    #[actix_web::test]
    async fn wrong_key_is_forbidden() {
        let app = test::init_service(guarded_app(Some("Les Cles de Fort Boyard"))).await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((API_KEY_HEADER, "Telegram end-to-end encryption keys, 2 pcs"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(message_of(res).await, "Invalid API key");
    }

    #[actix_web::test]
    async fn correct_key_passes_through() {
        let app = test::init_service(guarded_app(Some("Les Cles de Fort Boyard"))).await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((API_KEY_HEADER, "Les Cles de Fort Boyard"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[actix_web::test]
    async fn enforcement_is_disabled_without_a_key(#[case] key: Option<&'static str>) {
        let app = test::init_service(guarded_app(key)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
