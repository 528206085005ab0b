use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures_util::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::infrastructure::config::Config;
use crate::infrastructure::logger::Logger;

pub const INTERNAL_REQUEST_HEADER: &str = "x-internal-request";

#[derive(Debug, Clone)]
pub struct InternalAuthConfig {
    pub internal_api_secret: String,
    pub environment: String,
    pub public_app_url: Option<String>,
}

impl InternalAuthConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            internal_api_secret: config.internal_api_secret.clone(),
            environment: config.environment.clone(),
            public_app_url: config.public_app_url.clone(),
        }
    }

    fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Validates that a request comes from our own application: the shared
/// secret must be present in `x-internal-request`, and in production the
/// origin/referer must match the serving host or the configured public URL.
#[derive(Clone)]
pub struct InternalRequestGuard {
    config: InternalAuthConfig,
}

impl InternalRequestGuard {
    pub fn new(config: InternalAuthConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for InternalRequestGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = InternalRequestGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(InternalRequestGuardService {
            service: Arc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct InternalRequestGuardService<S> {
    service: Arc<S>,
    config: InternalAuthConfig,
}

impl<S, B> Service<ServiceRequest> for InternalRequestGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(
        &self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Arc::clone(&self.service);
        let config = self.config.clone();

        Box::pin(async move {
            if config.internal_api_secret.is_empty() {
                log::error!("INTERNAL_API_SECRET is not configured");
                return Ok(forbidden(req, "Server configuration error"));
            }

            let provided = req
                .headers()
                .get(INTERNAL_REQUEST_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("");

            if provided != config.internal_api_secret {
                Logger::auth_rejected(req.path(), "invalid internal request token");
                return Ok(forbidden(req, "Unauthorized: Invalid internal request token"));
            }

            if config.is_production() && !has_valid_origin(&req, &config) {
                Logger::auth_rejected(req.path(), "invalid origin");
                return Ok(forbidden(req, "Unauthorized: Invalid origin"));
            }

            let res = service.call(req).await?;
            Ok(res.map_into_boxed_body())
        })
    }
}

fn forbidden(req: ServiceRequest, message: &str) -> ServiceResponse<BoxBody> {
    req.into_response(
        HttpResponse::Forbidden()
            .json(serde_json::json!({ "error": message }))
            .map_into_boxed_body(),
    )
}

fn has_valid_origin(req: &ServiceRequest, config: &InternalAuthConfig) -> bool {
    let host = req.connection_info().host().to_string();

    let mut allowed = vec![format!("https://{host}")];
    if let Some(url) = &config.public_app_url {
        allowed.push(url.clone());
    }

    let origin = req
        .headers()
        .get("origin")
        .and_then(|value| value.to_str().ok());
    let referer = req
        .headers()
        .get("referer")
        .and_then(|value| value.to_str().ok());

    let origin_ok = origin
        .map(|o| allowed.iter().any(|a| o == a))
        .unwrap_or(false);
    let referer_ok = referer
        .map(|r| allowed.iter().any(|a| r.starts_with(a.as_str())))
        .unwrap_or(false);

    origin_ok || referer_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, test, web, App, HttpResponse, Responder};

    #[get("/token-price")]
    async fn protected() -> impl Responder {
        HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
    }

    fn dev_guard() -> InternalRequestGuard {
        InternalRequestGuard::new(InternalAuthConfig {
            internal_api_secret: "test_secret".to_string(),
            environment: "development".to_string(),
            public_app_url: None,
        })
    }

    fn prod_guard() -> InternalRequestGuard {
        InternalRequestGuard::new(InternalAuthConfig {
            internal_api_secret: "test_secret".to_string(),
            environment: "production".to_string(),
            public_app_url: Some("https://swap.example.com".to_string()),
        })
    }

    #[actix_web::test]
    async fn test_missing_header_is_forbidden() {
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(dev_guard()).service(protected)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/token-price").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::FORBIDDEN);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Unauthorized: Invalid internal request token");
        assert!(body.get("tokenInfo").is_none());
    }

    #[actix_web::test]
    async fn test_wrong_secret_is_forbidden() {
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(dev_guard()).service(protected)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/token-price")
            .insert_header((INTERNAL_REQUEST_HEADER, "wrong"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_correct_secret_passes_in_development() {
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(dev_guard()).service(protected)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/token-price")
            .insert_header((INTERNAL_REQUEST_HEADER, "test_secret"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }

    #[actix_web::test]
    async fn test_empty_secret_config_is_forbidden() {
        let guard = InternalRequestGuard::new(InternalAuthConfig {
            internal_api_secret: String::new(),
            environment: "development".to_string(),
            public_app_url: None,
        });
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(guard).service(protected)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/token-price")
            .insert_header((INTERNAL_REQUEST_HEADER, "anything"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::FORBIDDEN);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Server configuration error");
    }

    #[actix_web::test]
    async fn test_production_rejects_foreign_origin() {
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(prod_guard()).service(protected)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/token-price")
            .insert_header((INTERNAL_REQUEST_HEADER, "test_secret"))
            .insert_header(("origin", "https://evil.example.net"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::FORBIDDEN);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Unauthorized: Invalid origin");
    }

    #[actix_web::test]
    async fn test_production_accepts_public_app_url_origin() {
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(prod_guard()).service(protected)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/token-price")
            .insert_header((INTERNAL_REQUEST_HEADER, "test_secret"))
            .insert_header(("origin", "https://swap.example.com"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }

    #[actix_web::test]
    async fn test_production_accepts_referer_prefix() {
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(prod_guard()).service(protected)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/token-price")
            .insert_header((INTERNAL_REQUEST_HEADER, "test_secret"))
            .insert_header(("referer", "https://swap.example.com/swap"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }
}
