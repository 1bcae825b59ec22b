use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use tunnel_calc::{calculate, Calculation, Character, CharacterStore, LastEntry};

// Request/Response types

#[derive(Debug, Deserialize)]
struct CalculateRequest {
    player_id: u32,
    level: u32,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct CalculateResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    calculation: Option<Calculation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CharactersResponse {
    success: bool,
    characters: Vec<Character>,
}

#[derive(Debug, Serialize)]
struct RemoveCharacterResponse {
    success: bool,
    removed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct LastEntryResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_entry: Option<LastEntry>,
}

type SharedStore = web::Data<Mutex<CharacterStore>>;

fn lock_store(store: &SharedStore) -> std::sync::MutexGuard<'_, CharacterStore> {
    // Store methods never panic while holding the lock; recover the guard
    // if a lock was somehow poisoned
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// API Handlers

/// POST /api/calculate
/// Calculate the tunnel layout for a player and level
async fn calculate_layout(store: SharedStore, req: web::Json<CalculateRequest>) -> impl Responder {
    tracing::info!(
        "Received calculate request for player: {}, level: {}",
        req.player_id,
        req.level
    );

    match calculate(req.player_id, req.level) {
        Ok(calculation) => {
            tracing::info!(
                "Calculated layout for player: {}, seed: {}",
                req.player_id,
                calculation.seed
            );
            persist_submission(&store, &calculation, req.name.as_deref());
            HttpResponse::Ok().json(CalculateResponse {
                success: true,
                calculation: Some(calculation),
                error: None,
            })
        }
        Err(e) => {
            tracing::error!("Rejected calculate request: {}", e);
            HttpResponse::BadRequest().json(CalculateResponse {
                success: false,
                calculation: None,
                error: Some(e.to_string()),
            })
        }
    }
}

/// Persist the last entry and, when a name was supplied, the character
///
/// Persistence failures are logged but never fail the calculation that
/// produced a valid layout.
fn persist_submission(store: &SharedStore, calculation: &Calculation, name: Option<&str>) {
    let store = lock_store(store);

    let entry = LastEntry {
        player_id: calculation.player_id,
        level: calculation.level,
        name: name.unwrap_or("").to_string(),
    };
    if let Err(e) = store.set_last_entry(&entry) {
        tracing::warn!("Unable to save entry: {}", e);
    }

    let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) else {
        return;
    };

    let character = Character {
        name: name.to_string(),
        player_id: calculation.player_id,
        level: calculation.level,
    };
    if let Err(e) = store.save(&character) {
        tracing::warn!("Unable to save character '{}': {}", name, e);
    }
}

/// GET /api/characters
/// List saved characters, sorted by name
async fn list_characters(store: SharedStore) -> impl Responder {
    let characters = lock_store(&store).characters();

    tracing::info!("Listing {} saved characters", characters.len());

    HttpResponse::Ok().json(CharactersResponse {
        success: true,
        characters,
    })
}

/// DELETE /api/characters/{name}
/// Remove a saved character by name
async fn remove_character(store: SharedStore, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();
    tracing::info!("Received remove request for character: {}", name);

    match lock_store(&store).remove(&name) {
        Ok(removed) => {
            tracing::info!("Character '{}' removed: {}", name, removed);
            HttpResponse::Ok().json(RemoveCharacterResponse {
                success: true,
                removed,
                error: None,
            })
        }
        Err(e) => {
            tracing::error!("Failed to remove character '{}': {}", name, e);
            HttpResponse::InternalServerError().json(RemoveCharacterResponse {
                success: false,
                removed: false,
                error: Some(e.to_string()),
            })
        }
    }
}

/// GET /api/last-entry
/// The most recently submitted inputs, if any
async fn last_entry(store: SharedStore) -> impl Responder {
    let last_entry = lock_store(&store).last_entry();

    HttpResponse::Ok().json(LastEntryResponse {
        success: true,
        last_entry,
    })
}

/// GET /health
/// Health check endpoint
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "tunnel-layout-api"
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Tunnel Layout API Server");

    let store = web::Data::new(Mutex::new(CharacterStore::from_env()));

    let bind_address = "0.0.0.0:8080";
    tracing::info!("Binding to {}", bind_address);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(store.clone())
            .route("/health", web::get().to(health))
            .route("/api/calculate", web::post().to(calculate_layout))
            .route("/api/characters", web::get().to(list_characters))
            .route("/api/characters/{name}", web::delete().to(remove_character))
            .route("/api/last-entry", web::get().to(last_entry))
    })
    .bind(bind_address)?
    .run()
    .await
}
