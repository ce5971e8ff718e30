use crate::error::{RelayError, RelayResult};
use crate::io_struct::ChatTurn;
use crate::relay_state::RelayState;
use actix_web::{HttpRequest, HttpResponse, HttpServer, get, web};
use bytes::Bytes;
use serde_json::Value;
use std::io::Write;

#[get("/health")]
pub async fn health(_req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().body("Ok")
}

pub async fn chat(
    payload: web::Payload,
    app_state: web::Data<RelayState>,
) -> Result<HttpResponse, RelayError> {
    let turn = read_body(payload, app_state.config.max_payload_size)
        .await
        .and_then(|body| parse_turn(&body))
        .inspect_err(|e| log::warn!("Rejected chat request: {}", e))?;
    let response = app_state.chat(&turn).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Buffers the request body, refusing anything past `limit` bytes.
pub async fn read_body(payload: web::Payload, limit: usize) -> RelayResult<Bytes> {
    match payload.to_bytes_limited(limit).await {
        Ok(Ok(body)) => Ok(body),
        Ok(Err(e)) => Err(RelayError::InvalidBody(e.to_string())),
        Err(_) => Err(RelayError::PayloadTooLarge { limit }),
    }
}

pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, RelayError> {
    log::warn!("Rejected {} {}", req.method(), req.path());
    Err(RelayError::MethodNotAllowed)
}

/// An empty body, or any JSON value that is not an object, reads as `{}`,
/// so it fails on the missing message rather than on parsing.
pub fn parse_turn(body: &[u8]) -> RelayResult<ChatTurn> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ChatTurn::default());
    }
    let json: Value =
        serde_json::from_slice(body).map_err(|e| RelayError::InvalidBody(e.to_string()))?;
    if !json.is_object() {
        return Ok(ChatTurn::default());
    }
    serde_json::from_value(json).map_err(|e| RelayError::InvalidBody(e.to_string()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::resource("/api/chat")
            .route(web::post().to(chat))
            .default_service(web::route().to(method_not_allowed)),
    );
}

pub fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .init();
}

pub async fn startup(relay_state: RelayState) -> std::io::Result<()> {
    let host = relay_state.config.host.clone();
    let port = relay_state.config.port;
    let app_state = web::Data::new(relay_state);

    log::info!("Starting server at {}:{}", host, port);
    if app_state.config.api_key().is_none() {
        log::warn!("OPENAI_API_KEY is not set; chat requests will fail until it is configured");
    }

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(app_state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await?;

    std::io::Result::Ok(())
}
