// Mock completion provider for the integration tests
#![allow(dead_code)]

use std::{
    net::TcpListener,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use actix_web::{
    App, HttpRequest, HttpResponse, HttpServer, dev::ServerHandle, http::StatusCode, web,
};
use serde_json::{Value, json};

/// What the mock answers to every completion request.
#[derive(Clone, Debug)]
pub enum MockReply {
    /// 200 with a standard completion envelope whose message content is this string.
    Content(String),
    /// The given status with a JSON body.
    Json(u16, Value),
    /// The given status with a plain-text body.
    Text(u16, String),
}

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

struct MockState {
    reply: MockReply,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockProvider {
    pub url: String,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: ServerHandle,
}

impl MockProvider {
    /// Starts the mock on an ephemeral port. Must run inside an actix system.
    pub async fn start(reply: MockReply) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();

        let calls = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(MockState {
            reply,
            calls: calls.clone(),
            requests: requests.clone(),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .route("/v1/chat/completions", web::post().to(completions))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)?
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Ok(MockProvider {
            url: format!("http://127.0.0.1:{}/v1/chat/completions", port),
            calls,
            requests,
            handle,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn completions(
    req: HttpRequest,
    body: web::Json<Value>,
    state: web::Data<MockState>,
) -> HttpResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().unwrap().push(RecordedRequest {
        authorization,
        body: body.into_inner(),
    });

    match &state.reply {
        MockReply::Content(content) => HttpResponse::Ok().json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })),
        MockReply::Json(status, body) => {
            HttpResponse::build(StatusCode::from_u16(*status).unwrap()).json(body)
        }
        MockReply::Text(status, body) => HttpResponse::build(StatusCode::from_u16(*status).unwrap())
            .content_type("text/plain")
            .body(body.clone()),
    }
}

/// A port nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/v1/chat/completions", port)
}
