//! OpenAPI module

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::infrastructure::http::{errors::ErrorResponse, handlers::v1::*};

#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Anon Messenger"),
    modifiers(&BearerToken),
    paths(
        auth::register::handler,
        auth::verify_code::handler,
        auth::username_availability::handler,
        auth::sign_in::handler,
        auth::sign_out::handler,
        messaging::submit_message::handler,
        messaging::list_messages::handler,
        messaging::delete_message::handler,
        messaging::accept_messages::get_handler,
        messaging::accept_messages::put_handler,
        uptime::handler
    ),
    components(schemas(
        auth::register::RegisterBody,
        auth::register::RegisterResponse,
        auth::verify_code::VerifyCodeBody,
        auth::verify_code::VerifyCodeResponse,
        auth::username_availability::UsernameAvailabilityResponse,
        auth::sign_in::SignInBody,
        auth::sign_in::SignInResponse,
        messaging::submit_message::SubmitMessageBody,
        messaging::submit_message::SubmitMessageResponse,
        messaging::list_messages::MessageResponse,
        messaging::list_messages::ListMessagesResponse,
        messaging::accept_messages::AcceptMessagesBody,
        uptime::UptimeResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;

/// Registers the bearer token security scheme referenced by the
/// authenticated paths.
#[derive(Debug)]
struct BearerToken;

impl Modify for BearerToken {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .build(),
                ),
            );
        }
    }
}
