//! Demo backend for the PsyDesign dashboard.
//!
//! Serves the six `/api/*` endpoints with canned data: an in-memory history,
//! a fixed brand analysis, a placeholder logo, and a TTS endpoint that always
//! answers 501.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// Path of the only image the proxy knows about.
pub const PLACEHOLDER_LOGO_PATH: &str = "/static/placeholder_logo.png";

pub const TTS_UNAVAILABLE: &str = "Text-to-Speech is a feature available in the full version.";

// 1x1 transparent PNG
const PLACEHOLDER_LOGO_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Artificial delay before `generate-brand` answers.
    pub generate_latency: Duration,
    /// Artificial delay before `chat-with-persona` answers.
    pub chat_latency: Duration,
    /// Maximum number of rows returned by `GET /api/history`.
    pub history_limit: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            generate_latency: Duration::from_secs(3),
            chat_latency: Duration::from_secs(1),
            history_limit: 50,
        }
    }
}

impl MockConfig {
    /// No artificial latency, for tests.
    pub fn instant() -> Self {
        Self {
            generate_latency: Duration::ZERO,
            chat_latency: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct StoredDesign {
    id: i64,
    description: String,
    analysis: Value,
    logo_url: String,
    language: String,
    created_at: String,
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    items: Vec<StoredDesign>,
}

impl Store {
    fn insert(&mut self, description: String, analysis: Value, language: String) -> i64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(StoredDesign {
            id,
            description,
            analysis,
            logo_url: PLACEHOLDER_LOGO_PATH.to_string(),
            language,
            created_at: chrono::Utc::now().to_rfc3339(),
        });
        id
    }
}

/// Shared server state.
#[derive(Clone)]
pub struct MockState {
    config: MockConfig,
    store: Arc<Mutex<Store>>,
    logo: Arc<Vec<u8>>,
}

impl MockState {
    pub fn new(config: MockConfig) -> Self {
        Self {
            config,
            store: Arc::new(Mutex::new(Store::default())),
            logo: Arc::new(placeholder_logo()),
        }
    }

    /// Inserts a history row directly, bypassing the generate endpoint.
    ///
    /// Any JSON value is accepted so tests can store analyses the client
    /// cannot parse.
    pub async fn seed(&self, description: &str, analysis: Value) -> i64 {
        self.store
            .lock()
            .await
            .insert(description.to_string(), analysis, "en".to_string())
    }

    pub async fn history_len(&self) -> usize {
        self.store.lock().await.items.len()
    }
}

/// Bytes of the placeholder logo.
pub fn placeholder_logo() -> Vec<u8> {
    base64::engine::general_purpose::STANDARD
        .decode(PLACEHOLDER_LOGO_BASE64)
        .unwrap_or_default()
}

/// The analysis returned for every generate request.
pub fn mock_analysis() -> Value {
    json!({
        "brand_personality": {
            "archetype": "The Explorer",
            "tone_of_voice": "Curious, energetic and honest",
            "values": ["Sustainability", "Community", "Craft"]
        },
        "visual_identity": {
            "font_pairing": {
                "heading": { "name": "Playfair Display", "usage": "Headlines and packaging" },
                "body": { "name": "Lato", "usage": "Body copy" }
            },
            "color_palette": [
                { "name": "Forest", "hex": "#2F5D50" },
                { "name": "Oat", "hex": "#EDE3D1" }
            ]
        },
        "target_audience_persona": {
            "name": "Maya",
            "age_range": "22-30",
            "occupation": "UX Designer",
            "interests": ["Cycling", "Specialty coffee", "Thrifting"],
            "pain_points": ["Greenwashing", "Single-use packaging"]
        },
        "brand_names": ["Green Bean Co", "Urban Roots", "Leafbrew"],
        "slogans": ["Brewed for tomorrow.", "Good coffee, better planet."],
        "brand_story": "It started with a single bean and a promise to leave the city a little greener."
    })
}

fn persona_reply(language: &str) -> &'static str {
    match language {
        "es" => {
            "¡Gracias por preguntar! Como la persona de esta marca, creo que nuestro valor principal es la innovación. (Esta es una respuesta simulada)."
        }
        "fr" => {
            "Merci pour votre question ! En tant que persona de cette marque, je crois que notre valeur fondamentale est l'innovation. (Ceci est une réponse simulée)."
        }
        _ => {
            "Thank you for asking! As the persona for this brand, I believe our core value is innovation. (This is a simulated response)."
        }
    }
}

#[derive(Debug, Deserialize)]
struct BrandRequest {
    description: String,
    #[serde(default = "default_language")]
    language: String,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[allow(dead_code)]
    analysis: String,
    #[allow(dead_code)]
    message: String,
    #[serde(default = "default_language")]
    language: String,
}

#[derive(Debug, Deserialize)]
struct TtsRequest {
    #[allow(dead_code)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ProxyQuery {
    url: String,
}

fn default_language() -> String {
    "en".to_string()
}

fn json_response(status: StatusCode, body: &Value) -> Response {
    warp::reply::with_status(warp::reply::json(body), status).into_response()
}

async fn list_history(state: MockState) -> Result<Response, Infallible> {
    let store = state.store.lock().await;
    let mut items: Vec<&StoredDesign> = store.items.iter().collect();
    // newest first; ids break ties between rows created in the same instant
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    let rows: Vec<&StoredDesign> = items.into_iter().take(state.config.history_limit).collect();
    Ok(json_response(StatusCode::OK, &json!(rows)))
}

async fn delete_history(id: i64, state: MockState) -> Result<Response, Infallible> {
    let mut store = state.store.lock().await;
    let Some(index) = store.items.iter().position(|item| item.id == id) else {
        log::warn!("delete requested for unknown history item {id}");
        return Ok(json_response(
            StatusCode::NOT_FOUND,
            &json!({ "detail": "History item not found" }),
        ));
    };
    store.items.remove(index);
    log::info!("deleted history item {id}");
    Ok(json_response(
        StatusCode::OK,
        &json!({ "message": "Item deleted successfully" }),
    ))
}

async fn generate_brand(request: BrandRequest, state: MockState) -> Result<Response, Infallible> {
    tokio::time::sleep(state.config.generate_latency).await;

    let analysis = mock_analysis();
    let id = state.store.lock().await.insert(
        request.description,
        analysis.clone(),
        request.language,
    );
    log::info!("generated mock brand #{id}");

    Ok(json_response(
        StatusCode::OK,
        &json!({ "id": id, "analysis": analysis, "logo_url": PLACEHOLDER_LOGO_PATH }),
    ))
}

async fn chat_with_persona(request: ChatRequest, state: MockState) -> Result<Response, Infallible> {
    tokio::time::sleep(state.config.chat_latency).await;
    Ok(json_response(
        StatusCode::OK,
        &json!({ "reply": persona_reply(&request.language) }),
    ))
}

async fn text_to_speech(_request: TtsRequest) -> Result<Response, Infallible> {
    Ok(json_response(
        StatusCode::NOT_IMPLEMENTED,
        &json!({ "error": TTS_UNAVAILABLE }),
    ))
}

fn png_response(bytes: &[u8]) -> Response {
    let reply = warp::reply::with_header(bytes.to_vec(), "content-type", "image/png");
    reply.into_response()
}

async fn proxy_image(query: ProxyQuery, state: MockState) -> Result<Response, Infallible> {
    if query.url == PLACEHOLDER_LOGO_PATH {
        let reply = warp::reply::with_header(
            png_response(&state.logo),
            "content-disposition",
            "attachment; filename=\"logo.png\"",
        );
        return Ok(reply.into_response());
    }
    Ok(json_response(
        StatusCode::NOT_FOUND,
        &json!({ "detail": "Image not found in demo assets." }),
    ))
}

async fn static_logo(state: MockState) -> Result<Response, Infallible> {
    Ok(png_response(&state.logo))
}

/// All endpoints.
pub fn routes(
    state: MockState,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let with_state = warp::any().map(move || state.clone());

    let list = warp::path!("api" / "history")
        .and(warp::get())
        .and(with_state.clone())
        .and_then(list_history);

    let delete = warp::path!("api" / "history" / i64)
        .and(warp::delete())
        .and(with_state.clone())
        .and_then(delete_history);

    let generate = warp::path!("api" / "generate-brand")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state.clone())
        .and_then(generate_brand);

    let chat = warp::path!("api" / "chat-with-persona")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state.clone())
        .and_then(chat_with_persona);

    let tts = warp::path!("api" / "tts")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(text_to_speech);

    let proxy = warp::path!("api" / "proxy-image")
        .and(warp::get())
        .and(warp::query::<ProxyQuery>())
        .and(with_state.clone())
        .and_then(proxy_image);

    let logo = warp::path!("static" / "placeholder_logo.png")
        .and(warp::get())
        .and(with_state)
        .and_then(static_logo);

    list.or(delete)
        .unify()
        .or(generate)
        .unify()
        .or(chat)
        .unify()
        .or(tts)
        .unify()
        .or(proxy)
        .unify()
        .or(logo)
        .unify()
}

/// Starts the server on an ephemeral localhost port.
pub fn spawn(state: MockState) -> SocketAddr {
    let (addr, server) = warp::serve(routes(state)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}
