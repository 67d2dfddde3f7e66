use std::fmt;

use actix_web::{HttpMessage as _, HttpRequest, Responder, web};
use leaderboard_lib::Database;
use tracing_actix_web::{DefaultRootSpanBuilder, RequestId, RootSpanBuilder};

use crate::{ApiConfig, ApiError, ApiErrorKind, ApiResponse, FitRequestId as _};

/// The actix route handler for the Not Found response.
async fn not_found(req_id: RequestId) -> ApiResponse<impl Responder> {
    Err::<String, _>(ApiErrorKind::EndpointNotFound).fit(req_id)
}

/// Maps the rejection of a query string or a form to the JSON error response.
fn invalid_request<E: fmt::Display>(err: E, req: &HttpRequest) -> actix_web::Error {
    let kind = ApiErrorKind::InvalidRequest(err.to_string());
    // The request ID is missing if the app isn't wrapped by the tracing logger
    match req.extensions().get::<RequestId>().copied() {
        Some(request_id) => ApiError { request_id, kind }.into(),
        None => actix_web::error::ErrorBadRequest(kind),
    }
}

/// Returns the size of the connection pool, and its amount of idle connections.
fn pool_stats(db: &Database) -> (u32, usize) {
    #[allow(unreachable_patterns)]
    match db.sql_conn {
        #[cfg(feature = "sqlite")]
        sea_orm::DatabaseConnection::SqlxSqlitePoolConnection(_) => {
            let pool = db.sql_conn.get_sqlite_connection_pool();
            (pool.size(), pool.num_idle())
        }
        #[cfg(feature = "mysql")]
        sea_orm::DatabaseConnection::SqlxMySqlPoolConnection(_) => {
            let pool = db.sql_conn.get_mysql_connection_pool();
            (pool.size(), pool.num_idle())
        }
        #[cfg(feature = "postgres")]
        sea_orm::DatabaseConnection::SqlxPostgresPoolConnection(_) => {
            let pool = db.sql_conn.get_postgres_connection_pool();
            (pool.size(), pool.num_idle())
        }
        _ => (0, 0),
    }
}

pub struct CustomRootSpanBuilder;

impl RootSpanBuilder for CustomRootSpanBuilder {
    fn on_request_start(request: &actix_web::dev::ServiceRequest) -> tracing::Span {
        let (pool_size, pool_num_idle) = request
            .app_data::<Database>()
            .map(pool_stats)
            .unwrap_or_default();

        tracing_actix_web::root_span!(
            request,
            pool_size = pool_size,
            pool_num_idle = pool_num_idle,
        )
    }

    fn on_request_end<B: actix_web::body::MessageBody>(
        span: tracing::Span,
        outcome: &Result<actix_web::dev::ServiceResponse<B>, actix_web::Error>,
    ) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

/// Registers the routes of the API and their shared resources.
///
/// The session middleware and the tracing logger must be wrapped around the app by the caller.
pub fn configure(cfg: &mut web::ServiceConfig, db: Database, config: ApiConfig) {
    cfg.app_data(db)
        .app_data(config)
        .app_data(
            web::QueryConfig::default().error_handler(|err, req| invalid_request(err, req)),
        )
        .app_data(
            web::FormConfig::default().error_handler(|err, req| invalid_request(err, req)),
        )
        .service(crate::api_route())
        .default_service(web::to(not_found));
}
