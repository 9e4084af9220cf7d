use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    domain::{
        auth::{sessions::SessionService, users::UserService},
        messaging::messages::MessageService,
    },
    infrastructure::http::{open_api::ApiDocs, state::AppState},
};

pub mod auth;
pub mod messaging;
pub mod stoplight;
pub mod uptime;

pub fn router<U: UserService, S: SessionService, M: MessageService>(
) -> Router<AppState<U, S, M>> {
    Router::new()
        .route("/", get(stoplight::handler))
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route("/uptime", get(uptime::handler))
        .route("/users", post(auth::register::handler))
        .route("/users/verify", post(auth::verify_code::handler))
        .route(
            "/users/username-availability",
            get(auth::username_availability::handler),
        )
        .route(
            "/sessions",
            post(auth::sign_in::handler).delete(auth::sign_out::handler),
        )
        .route(
            "/users/me/accept-messages",
            get(messaging::accept_messages::get_handler)
                .put(messaging::accept_messages::put_handler),
        )
        .route("/users/me/messages", get(messaging::list_messages::handler))
        .route(
            "/users/me/messages/:id",
            delete(messaging::delete_message::handler),
        )
        .route("/messages", post(messaging::submit_message::handler))
}
