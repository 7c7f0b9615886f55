use actix_web::{web, App, HttpServer};
use backend::config::app::Config;
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::jwt_extract::JwtExtract;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, db = ?config.db_kind, "starting pickup backend");

    let security_config = SecurityConfig::new(config.jwt_secret.as_bytes());

    let app_state = match build_state()
        .with_env(config.runtime_env)
        .with_db(config.db_kind)
        .with_security(security_config)
        .with_max_json_bytes(config.max_json_bytes)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!("database ready");

    let data = web::Data::new(app_state);

    // Registration order is innermost first: RequestTrace runs outermost so
    // every later layer sees the trace id.
    HttpServer::new(move || {
        App::new()
            .wrap(JwtExtract)
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
