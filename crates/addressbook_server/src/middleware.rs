//! Request timing middleware.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use std::time::Instant;

/// Response header carrying handler wall time in seconds.
pub const PROCESS_TIME_HEADER: &str = "process-time";

/// Adds a `Process-Time` header to every response, error responses included.
pub async fn process_time(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let started_at = Instant::now();
    let mut res = next.call(req).await?;

    let elapsed = started_at.elapsed().as_secs_f64();
    if let Ok(value) = HeaderValue::from_str(&elapsed.to_string()) {
        res.headers_mut()
            .insert(HeaderName::from_static(PROCESS_TIME_HEADER), value);
    }
    Ok(res)
}
