//! JSON API over the bracket engine, backed by the in-memory store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set BRACKET_SEED to make bracket draws reproducible.

use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tournament_brackets::{
    BracketType, ErrorKind, MatchId, MemoryStore, NewTournament, Seeder, ServerConfig, TeamId,
    TournamentError, TournamentId, TournamentService, DEFAULT_ROUND_SPACING_HOURS,
};

type AppState = Data<TournamentService<MemoryStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    /// Parsed separately so an unknown type is reported as such rather than as bad JSON.
    bracket_type: String,
    capacity: usize,
    start_date: Option<DateTime<Utc>>,
    round_spacing_hours: Option<u32>,
    #[serde(default = "default_bracket_reset")]
    bracket_reset: bool,
}

fn default_bracket_reset() -> bool {
    true
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    team_id: TeamId,
}

#[derive(Deserialize)]
struct ReportWinnerBody {
    team_id: TeamId,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::Precondition | ErrorKind::Conflict => HttpResponse::Conflict().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::Configuration => HttpResponse::UnprocessableEntity().json(body),
        ErrorKind::Internal => {
            log::error!("{e}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn respond<T: serde::Serialize>(result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-brackets",
    })
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    respond(state.tournaments())
}

/// Create a tournament (registration open, bracket not generated).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let bracket_type: BracketType = match body.bracket_type.parse() {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    let req = NewTournament {
        name: body.name,
        bracket_type,
        capacity: body.capacity,
        start_date: body.start_date.unwrap_or_else(Utc::now),
        round_spacing_hours: body
            .round_spacing_hours
            .unwrap_or(DEFAULT_ROUND_SPACING_HOURS),
        bracket_reset: body.bracket_reset,
    };
    match state.create_tournament(req) {
        Ok(t) => HttpResponse::Created().json(t),
        Err(e) => error_response(e),
    }
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.tournament(path.id))
}

#[get("/api/tournaments/{id}/participants")]
async fn api_list_participants(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.participants(path.id))
}

/// Register one team (before the bracket is generated).
#[post("/api/tournaments/{id}/participants")]
async fn api_register_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterTeamBody>,
) -> HttpResponse {
    match state.register_team(path.id, body.team_id) {
        Ok(p) => HttpResponse::Created().json(p),
        Err(e) => error_response(e),
    }
}

/// Register teams from a CSV body with a `team_id` column. All or nothing.
#[post("/api/tournaments/{id}/participants/import")]
async fn api_import_participants(
    state: AppState,
    path: Path<TournamentPath>,
    body: web::Bytes,
) -> HttpResponse {
    match state.import_participants_csv(path.id, body.as_ref()) {
        Ok(p) => HttpResponse::Created().json(p),
        Err(e) => error_response(e),
    }
}

#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.generate_bracket(path.id))
}

/// Redraw the bracket; only before any result is reported.
#[post("/api/tournaments/{id}/bracket/regenerate")]
async fn api_regenerate_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.regenerate_bracket(path.id))
}

#[get("/api/tournaments/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.bracket(path.id))
}

#[get("/api/tournaments/{id}/matches")]
async fn api_list_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.matches(path.id))
}

/// Report the winner of a match and advance the bracket.
#[put("/api/tournaments/{id}/matches/{match_id}/winner")]
async fn api_report_winner(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ReportWinnerBody>,
) -> HttpResponse {
    respond(state.report_winner(path.id, path.match_id, body.team_id))
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.standings(path.id))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let seeder = match config.bracket_seed {
        Some(seed) => {
            log::warn!("BRACKET_SEED is set; bracket draws are reproducible");
            Seeder::with_seed(seed)
        }
        None => Seeder::from_entropy(),
    };
    let state = Data::new(TournamentService::new(MemoryStore::new(), seeder));

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_list_participants)
            .service(api_register_team)
            .service(api_import_participants)
            .service(api_generate_bracket)
            .service(api_regenerate_bracket)
            .service(api_get_bracket)
            .service(api_list_matches)
            .service(api_report_winner)
            .service(api_standings)
    })
    .bind(bind)?
    .run()
    .await
}
