//! Single binary web server: JSON API over in-memory tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with config/default.toml,
//! BRACKET__SERVER__HOST / BRACKET__SERVER__PORT, or plain HOST / PORT.
//!
//! Every write goes through the store's write lock and carries the tournament version it
//! was based on, so a stale client gets 409 instead of silently overwriting a result.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tennis_bracket::config::Settings;
use tennis_bracket::{
    advance_swiss_round, assign_tournament_slot, lock_tournament_slots, parse_roster_csv,
    start_tournament, start_tournament_match, submit_match_result, tournament_standings,
    tournament_summary, validate_tournament_slot, BracketError, Competitor, CompetitorId, MatchId,
    RosterKind, SlotId, Tournament, TournamentError, TournamentId, TournamentMode,
};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Idle entries are swept periodically.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    mode: TournamentMode,
}

#[derive(Deserialize)]
struct AddCompetitorBody {
    name: String,
    #[serde(default)]
    school: String,
    #[serde(default)]
    wins: u32,
    #[serde(default)]
    losses: u32,
    #[serde(default)]
    utr: Option<f64>,
    #[serde(default)]
    seed: Option<u32>,
}

#[derive(Deserialize)]
struct VersionBody {
    version: u64,
}

/// Score submission for one match.
#[derive(Deserialize)]
struct MatchResultUpdate {
    winner: CompetitorId,
    #[serde(default)]
    score: String,
    version: u64,
}

#[derive(Deserialize)]
struct SlotCandidateBody {
    competitor_id: CompetitorId,
}

#[derive(Deserialize)]
struct AssignSlotBody {
    competitor_id: CompetitorId,
    version: u64,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentCompetitorPath {
    id: TournamentId,
    competitor_id: CompetitorId,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct TournamentSlotPath {
    id: TournamentId,
    slot_id: SlotId,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::StaleVersion { .. } => HttpResponse::Conflict().json(body),
        TournamentError::CompetitorNotFound(_)
        | TournamentError::Bracket(BracketError::MatchNotFound(_) | BracketError::SlotNotFound(_)) => {
            HttpResponse::NotFound().json(body)
        }
        _ => {
            log::warn!("rejected: {}", e);
            HttpResponse::BadRequest().json(body)
        }
    }
}

/// Apply a mutation under the write lock and return the updated tournament.
fn mutate<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match f(&mut entry.tournament) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

/// Compute a read-only view of a tournament under the read lock.
fn view<T, F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(&Tournament) -> Result<T, TournamentError>,
{
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&id) {
        Some(entry) => match f(&entry.tournament) {
            Ok(body) => HttpResponse::Ok().json(body),
            Err(e) => error_response(&e),
        },
        None => not_found(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tennis-bracket",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let tournament = Tournament::new(body.name.trim(), body.mode);
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::info!("created tournament {}", id);
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, |_| Ok(()))
}

/// Add a competitor (Setup only). Team tournaments use wins/losses, player tournaments utr.
#[post("/api/tournaments/{id}/competitors")]
async fn api_add_competitor(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddCompetitorBody>,
) -> HttpResponse {
    let body = body.into_inner();
    mutate(&state, path.id, move |t| {
        let competitor = match t.mode {
            TournamentMode::Team { .. } => Competitor::team(body.name, body.school, body.wins, body.losses),
            TournamentMode::Player { .. } => Competitor::player(body.name, body.school, body.utr),
        };
        let competitor = match body.seed {
            Some(seed) => competitor.with_seed(seed),
            None => competitor,
        };
        t.add_competitor(competitor).map(|_| ())
    })
}

/// Import competitors from a CSV roster (Setup only). All rows are added or none.
#[post("/api/tournaments/{id}/competitors/csv")]
async fn api_import_roster(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let kind = match entry.tournament.mode {
        TournamentMode::Team { .. } => RosterKind::Teams,
        TournamentMode::Player { .. } => RosterKind::Players,
    };
    let competitors = match parse_roster_csv(body.as_bytes(), kind) {
        Ok(c) => c,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    let mut staged = entry.tournament.clone();
    for competitor in competitors {
        if let Err(e) = staged.add_competitor(competitor) {
            return error_response(&e);
        }
    }
    entry.tournament = staged;
    HttpResponse::Ok().json(&entry.tournament)
}

/// Remove a competitor by id (Setup only).
#[delete("/api/tournaments/{id}/competitors/{competitor_id}")]
async fn api_remove_competitor(state: AppState, path: Path<TournamentCompetitorPath>) -> HttpResponse {
    mutate(&state, path.id, |t| t.remove_competitor(path.competitor_id))
}

/// Start the tournament: generate the bracket (Setup -> InProgress).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, |t| start_tournament(t, &mut rand::thread_rng()))
}

/// Restart tournament: back to Setup with the same competitors.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart_tournament(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<VersionBody>,
) -> HttpResponse {
    mutate(&state, path.id, |t| t.restart_tournament(body.version))
}

/// Mark a match as in progress.
#[put("/api/tournaments/{id}/matches/{match_id}/start")]
async fn api_start_match(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<VersionBody>,
) -> HttpResponse {
    mutate(&state, path.id, |t| start_tournament_match(t, path.match_id, body.version))
}

/// Submit a match result; the winner advances into the next round.
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_submit_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<MatchResultUpdate>,
) -> HttpResponse {
    mutate(&state, path.id, |t| {
        submit_match_result(t, path.match_id, body.winner, &body.score, body.version)
    })
}

/// Pair the next Swiss round once the current one is finished.
#[post("/api/tournaments/{id}/swiss/next")]
async fn api_next_swiss_round(state: AppState, path: Path<TournamentPath>, body: Json<VersionBody>) -> HttpResponse {
    mutate(&state, path.id, |t| advance_swiss_round(t, body.version))
}

#[get("/api/tournaments/{id}/summary")]
async fn api_summary(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| Ok(tournament_summary(t)))
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| Ok(tournament_standings(t)))
}

/// Advisory warnings for a proposed slot change (player mode). Never modifies anything.
#[post("/api/tournaments/{id}/slots/{slot_id}/validate")]
async fn api_validate_slot(
    state: AppState,
    path: Path<TournamentSlotPath>,
    body: Json<SlotCandidateBody>,
) -> HttpResponse {
    view(&state, path.id, |t| validate_tournament_slot(t, path.slot_id, body.competitor_id))
}

/// Reassign a slot before the bracket is locked (player mode).
#[put("/api/tournaments/{id}/slots/{slot_id}")]
async fn api_assign_slot(
    state: AppState,
    path: Path<TournamentSlotPath>,
    body: Json<AssignSlotBody>,
) -> HttpResponse {
    mutate(&state, path.id, |t| {
        assign_tournament_slot(t, path.slot_id, body.competitor_id, body.version)
    })
}

/// Lock all slots against edits (player mode).
#[post("/api/tournaments/{id}/slots/lock")]
async fn api_lock_slots(state: AppState, path: Path<TournamentPath>, body: Json<VersionBody>) -> HttpResponse {
    mutate(&state, path.id, |t| lock_tournament_slots(t, body.version))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = Settings::load().map_err(std::io::Error::other)?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(settings.logging.level.as_str()));

    let bind = (settings.server.host.clone(), settings.server.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: drop tournaments nobody has touched within the inactivity timeout.
    let state_cleanup = state.clone();
    let inactivity_timeout = settings.store.inactivity_timeout();
    let sweep_every = settings.store.cleanup_interval().max(Duration::from_secs(1));
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_competitor)
            .service(api_import_roster)
            .service(api_remove_competitor)
            .service(api_start_tournament)
            .service(api_restart_tournament)
            .service(api_start_match)
            .service(api_submit_result)
            .service(api_next_swiss_round)
            .service(api_summary)
            .service(api_standings)
            .service(api_lock_slots)
            .service(api_validate_slot)
            .service(api_assign_slot)
    })
    .bind(bind)?
    .run()
    .await
}
