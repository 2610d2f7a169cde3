use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use std::future::{ready, Ready};
use std::num::NonZeroU32;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::core::AppError;

use super::request_id::RequestIdValue;

/// Paths that are never throttled
const UNLIMITED_PATHS: [&str; 2] = ["/health", "/ready"];

/// Idle client entries are dropped once every this many checks
const PRUNE_INTERVAL: u64 = 1024;

/// Per-client rate limiting middleware using governor, keyed by client address
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
    checks: Arc<AtomicU64>,
    requests_per_minute: u32,
    trust_proxy_headers: bool,
}

impl RateLimiter {
    /// Allow `requests_per_minute` per client; zero is treated as one
    pub fn new(requests_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(GovernorRateLimiter::keyed(Quota::per_minute(per_minute)));

        Self {
            limiter,
            checks: Arc::new(AtomicU64::new(0)),
            requests_per_minute: per_minute.get(),
            trust_proxy_headers: false,
        }
    }

    /// Key clients by `Forwarded`/`X-Forwarded-For` instead of the socket peer.
    /// Only safe behind a proxy that overwrites those headers.
    pub fn trust_proxy_headers(mut self, trust: bool) -> Self {
        self.trust_proxy_headers = trust;
        self
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

fn client_key(req: &ServiceRequest, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        if let Some(addr) = req.connection_info().realip_remote_addr() {
            return addr.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<BoxBody, B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            config: self.clone(),
        }))
    }
}

pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    config: RateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<BoxBody, B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let config = self.config.clone();

        Box::pin(async move {
            if UNLIMITED_PATHS.contains(&req.path()) {
                return svc.call(req).await.map(|res| res.map_into_right_body());
            }

            let client = client_key(&req, config.trust_proxy_headers);

            let checked = config.checks.fetch_add(1, Ordering::Relaxed) + 1;
            if checked % PRUNE_INTERVAL == 0 {
                config.limiter.retain_recent();
                config.limiter.shrink_to_fit();
            }

            match config.limiter.check_key(&client) {
                Ok(_) => svc.call(req).await.map(|res| res.map_into_right_body()),
                Err(_) => {
                    tracing::warn!(
                        request_id = ?RequestIdValue::of(&req),
                        client = %client,
                        path = %req.path(),
                        "Rate limit exceeded"
                    );
                    let error = AppError::RateLimitExceeded(format!(
                        "Maximum {} requests per minute",
                        config.requests_per_minute
                    ));
                    let response = error.error_response();
                    Ok(req.into_response(response).map_into_left_body())
                }
            }
        })
    }
}
