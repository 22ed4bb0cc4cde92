use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use qbm_core::health::{healthz, readyz};
use qbm_core::middleware::request_id_layer;

use crate::auth::authenticate;
use crate::handlers::{
    game::{create_game, delete_game, get_game, list_games, update_game},
    image::upload_image,
    onboarding::onboard,
    play::{get_current_game, get_history, get_progress, submit_answers},
    question::{
        create_answer, create_question, delete_answer, delete_question, list_answers,
        list_questions, update_answer, update_question,
    },
    section::{create_section, delete_section, get_section, list_sections, update_section},
    stage::{create_stage, delete_stage, get_stage, list_stages, update_stage},
    user::{delete_user, get_me, get_user, list_users, update_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz));

    let protected = Router::new()
        // Catalog
        .route("/stages", get(list_stages).post(create_stage))
        .route(
            "/stages/{id}",
            get(get_stage).put(update_stage).delete(delete_stage),
        )
        .route("/sections", get(list_sections).post(create_section))
        .route(
            "/sections/{id}",
            get(get_section).put(update_section).delete(delete_section),
        )
        .route("/games", get(list_games).post(create_game))
        .route(
            "/games/{id}",
            get(get_game).put(update_game).delete(delete_game),
        )
        .route("/questions", get(list_questions).post(create_question))
        .route(
            "/questions/{id}",
            axum::routing::put(update_question).delete(delete_question),
        )
        .route("/answers", get(list_answers).post(create_answer))
        .route(
            "/answers/{id}",
            axum::routing::put(update_answer).delete(delete_answer),
        )
        // Users
        .route("/users", get(list_users))
        .route("/users/@me", get(get_me))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        // Onboarding
        .route("/onboarding", post(onboard))
        // Player flow
        .route("/play/progress", get(get_progress))
        .route("/play/game", get(get_current_game))
        .route("/play/submit", post(submit_answers))
        .route("/play/history", get(get_history))
        // Uploads
        .route("/images", post(upload_image))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ));

    public
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
