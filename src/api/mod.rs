//! JSON API mounted under `/api`

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::app::{self, DashboardEntry};
use crate::config::MamaeZenConfig;
use crate::cry::{AudioClip, CryAnalyzer};
use crate::gemini::GenerativeModel;
use crate::models::{
    ChatMessage, ChatRole, Coordinate, CryAnalysis, Place, PregnancyWeek, Recipe, SoundTrack,
    SpecialistType,
};
use crate::outcome::Outcome;
use crate::places::{CATEGORY_SHORTCUTS, PlaceSearchClient};
use crate::pregnancy::{self, PregnancyProgress, PregnancyTracker};
use crate::recipes::RecipeFinder;
use crate::sounds::{self, CategoryFilter};
use crate::specialist::SpecialistChat;
use crate::storage::PreferenceStore;
use crate::{MamaeZenError, VERSION};

/// Services shared by every request
pub struct AppState {
    pub default_coordinate: Coordinate,
    pub ai_configured: bool,
    pub places: PlaceSearchClient,
    pub chat: SpecialistChat,
    pub cry: CryAnalyzer,
    pub recipes: RecipeFinder,
    pub pregnancy: Mutex<PregnancyTracker>,
}

impl AppState {
    pub async fn new(
        config: &MamaeZenConfig,
        model: Arc<dyn GenerativeModel>,
        store: Arc<dyn PreferenceStore>,
    ) -> crate::Result<Self> {
        Ok(Self {
            default_coordinate: config.location.default_coordinate(),
            ai_configured: config.gemini.api_key.is_some(),
            places: PlaceSearchClient::new(model.clone(), config.navigation.max_places as usize),
            chat: SpecialistChat::new(model.clone()),
            cry: CryAnalyzer::new(model.clone()),
            recipes: RecipeFinder::new(model),
            pregnancy: Mutex::new(PregnancyTracker::load(store).await?),
        })
    }
}

/// Error body: the user-facing message only
pub struct ApiError(MamaeZenError);

impl From<MamaeZenError> for ApiError {
    fn from(e: MamaeZenError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            MamaeZenError::Validation { .. } => StatusCode::BAD_REQUEST,
            MamaeZenError::Permission { .. } => StatusCode::FORBIDDEN,
            MamaeZenError::InvalidState { .. } => StatusCode::CONFLICT,
            MamaeZenError::Api { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/dashboard", get(dashboard))
        .route("/places", get(search_places))
        .route("/places/sos", post(sos))
        .route("/places/categories", get(place_categories))
        .route("/chat", post(chat))
        .route("/cry", post(analyze_cry))
        .route("/recipes", get(find_recipe))
        .route("/recipes/tags", get(recipe_tags))
        .route("/pregnancy", get(get_pregnancy).post(onboard_pregnancy))
        .route("/pregnancy/weeks/{week}", get(pregnancy_week))
        .route("/sounds", get(list_sounds))
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": VERSION,
        "aiConfigured": state.ai_configured,
    }))
}

#[derive(Serialize)]
struct Dashboard {
    greeting: &'static str,
    tip: &'static str,
    entries: Vec<DashboardEntry>,
}

async fn dashboard() -> Json<Dashboard> {
    Json(Dashboard {
        greeting: app::GREETING,
        tip: app::DAILY_TIP,
        entries: app::dashboard(),
    })
}

#[derive(Debug, Deserialize)]
struct OriginParams {
    lat: Option<f64>,
    lng: Option<f64>,
}

impl OriginParams {
    fn resolve(&self, default: Coordinate) -> Result<Coordinate, MamaeZenError> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => {
                let coordinate = Coordinate::new(lat, lng);
                if coordinate.is_valid() {
                    Ok(coordinate)
                } else {
                    Err(MamaeZenError::validation("Coordenada fora do intervalo"))
                }
            }
            (None, None) => Ok(default),
            _ => Err(MamaeZenError::validation("Informe lat e lng juntos")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlaceQuery {
    #[serde(default)]
    q: String,
    lat: Option<f64>,
    lng: Option<f64>,
}

async fn search_places(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlaceQuery>,
) -> ApiResult<Outcome<Vec<Place>>> {
    let origin = OriginParams {
        lat: query.lat,
        lng: query.lng,
    }
    .resolve(state.default_coordinate)?;
    Ok(Json(state.places.search(&query.q, origin).await))
}

async fn sos(
    State(state): State<Arc<AppState>>,
    Json(origin): Json<OriginParams>,
) -> ApiResult<Outcome<Vec<Place>>> {
    let origin = origin.resolve(state.default_coordinate)?;
    Ok(Json(state.places.sos(origin).await))
}

async fn place_categories() -> Json<Value> {
    let categories: Vec<Value> = CATEGORY_SHORTCUTS
        .iter()
        .map(|(label, icon)| json!({ "label": label, "icon": icon }))
        .collect();
    Json(Value::Array(categories))
}

#[derive(Debug, Deserialize)]
struct ChatTurn {
    role: ChatRole,
    text: String,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    specialist: SpecialistType,
    #[serde(default)]
    history: Vec<ChatTurn>,
    message: String,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Outcome<String>> {
    let history: Vec<ChatMessage> = request
        .history
        .into_iter()
        .map(|turn| match turn.role {
            ChatRole::User => ChatMessage::user(turn.text),
            ChatRole::Model => ChatMessage::model(turn.text),
        })
        .collect();
    let outcome = state
        .chat
        .reply(request.specialist, &history, &request.message, |_| {})
        .await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CryRequest {
    /// Base64 audio
    audio: String,
    #[serde(default = "default_audio_mime")]
    mime_type: String,
}

fn default_audio_mime() -> String {
    "audio/webm".to_string()
}

async fn analyze_cry(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CryRequest>,
) -> ApiResult<Outcome<CryAnalysis>> {
    let bytes = STANDARD
        .decode(request.audio.trim())
        .map_err(|e| MamaeZenError::validation(format!("Áudio em base64 inválido: {e}")))?;
    let outcome = state
        .cry
        .analyze(&AudioClip::new(bytes, request.mime_type))
        .await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
struct RecipeQuery {
    #[serde(default)]
    q: String,
}

async fn find_recipe(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecipeQuery>,
) -> ApiResult<Outcome<Recipe>> {
    Ok(Json(state.recipes.find(&query.q).await?))
}

async fn recipe_tags() -> Json<Vec<&'static str>> {
    Json(crate::catalog::QUICK_TAGS.to_vec())
}

#[derive(Debug, Serialize)]
struct PregnancyView {
    onboarded: bool,
    progress: Option<PregnancyProgress>,
    week: Option<&'static PregnancyWeek>,
}

impl PregnancyView {
    fn from_progress(progress: Option<PregnancyProgress>) -> Self {
        Self {
            onboarded: progress.is_some(),
            week: progress.as_ref().map(|p| pregnancy::nearest_week(p.current_week)),
            progress,
        }
    }
}

async fn get_pregnancy(State(state): State<Arc<AppState>>) -> Json<PregnancyView> {
    let tracker = state.pregnancy.lock().await;
    Json(PregnancyView::from_progress(
        tracker.progress(Local::now().date_naive()),
    ))
}

#[derive(Debug, Deserialize)]
struct OnboardRequest {
    lmp: String,
}

async fn onboard_pregnancy(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OnboardRequest>,
) -> ApiResult<PregnancyView> {
    let mut tracker = state.pregnancy.lock().await;
    let progress = tracker
        .onboard(&request.lmp, Local::now().date_naive())
        .await?;
    Ok(Json(PregnancyView::from_progress(Some(progress))))
}

async fn pregnancy_week(Path(week): Path<u8>) -> ApiResult<&'static PregnancyWeek> {
    Ok(Json(pregnancy::week_info(week)?))
}

#[derive(Debug, Deserialize)]
struct SoundQuery {
    #[serde(default)]
    category: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SoundEntry {
    #[serde(flatten)]
    track: &'static SoundTrack,
    embed_url: String,
}

async fn list_sounds(Query(query): Query<SoundQuery>) -> ApiResult<Vec<SoundEntry>> {
    let filter: CategoryFilter = query.category.parse()?;
    Ok(Json(
        sounds::tracks(filter)
            .into_iter()
            .map(|track| SoundEntry {
                track,
                embed_url: sounds::embed_url(track.video_id),
            })
            .collect(),
    ))
}
