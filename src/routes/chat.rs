use actix_web::{HttpResponse, Responder, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use tera::Tera;

use crate::assistant::GeminiClient;
use crate::forms::chat::ChatForm;
use crate::repository::DieselRepository;
use crate::routes::{error_body, service_error_response};
use crate::services::chat::{ChatError, ask_assistant};

/// Assistant client, absent when no API key is configured.
pub type AssistantClient = Option<GeminiClient>;

#[post("/chat/gemini")]
pub async fn chat_with_assistant(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    assistant: web::Data<AssistantClient>,
    tera: web::Data<Tera>,
    form: web::Json<ChatForm>,
) -> impl Responder {
    let backend = assistant.get_ref().as_ref();
    match ask_assistant(repo.get_ref(), backend, &tera, &user, form.into_inner()).await {
        Ok(reply) => HttpResponse::Ok().json(reply),
        Err(ChatError::NotConfigured) => HttpResponse::ServiceUnavailable()
            .json(error_body("The menu assistant is not configured")),
        Err(ChatError::Assistant(err)) => {
            log::error!("Failed to get assistant reply: {err}");
            HttpResponse::BadGateway().json(error_body("The menu assistant is unavailable"))
        }
        Err(ChatError::Service(err)) => service_error_response(err, "answer chat message"),
        Err(err @ ChatError::Prompt(_)) => {
            log::error!("Failed to answer chat message: {err}");
            HttpResponse::InternalServerError().json(error_body("Internal server error"))
        }
    }
}
