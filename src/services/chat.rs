use pushkind_common::domain::auth::AuthenticatedUser;
use serde::Serialize;
use tera::{Context, Tera};

use crate::SERVICE_ACCESS_ROLE;
use crate::assistant::{AssistantError, ChatBackend};
use crate::domain::menu::Menu;
use crate::domain::product::Product;
use crate::domain::settings::CompanySettings;
use crate::forms::chat::ChatForm;
use crate::repository::{CategoryReader, ProductReader, SettingsReader, SubcategoryReader};
use crate::services::menu::fetch_menu;
use crate::services::{ServiceError, ensure_role};

/// Template rendered into the assistant's system instruction.
pub const SYSTEM_PROMPT_TEMPLATE: &str = "assistant/system_prompt.txt";

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("{0}")]
    Service(ServiceError),
    #[error(transparent)]
    Assistant(#[from] AssistantError),
    #[error("failed to render the assistant prompt: {0}")]
    Prompt(#[from] tera::Error),
    #[error("assistant is not configured")]
    NotConfigured,
}

impl From<ServiceError> for ChatError {
    fn from(err: ServiceError) -> Self {
        ChatError::Service(err)
    }
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Serialize)]
struct PromptSection {
    name: String,
    items: Vec<PromptItem>,
}

#[derive(Debug, Serialize)]
struct PromptItem {
    name: String,
    group: Option<String>,
    price: String,
    description: Option<String>,
}

impl PromptItem {
    fn new(product: &Product, group: Option<&str>) -> Self {
        Self {
            name: product.name.clone(),
            group: group.map(str::to_string),
            price: format_price(product.price_cents, &product.currency),
            description: product.description.clone(),
        }
    }
}

fn format_price(cents: i64, currency: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}{}.{:02} {currency}", cents / 100, cents % 100)
}

fn prompt_sections(menu: &Menu) -> Vec<PromptSection> {
    let mut sections: Vec<PromptSection> = menu
        .categories
        .iter()
        .map(|section| {
            let mut items: Vec<PromptItem> = section
                .products
                .iter()
                .map(|product| PromptItem::new(product, None))
                .collect();
            for sub in &section.subcategories {
                items.extend(
                    sub.products
                        .iter()
                        .map(|product| PromptItem::new(product, Some(&sub.subcategory.name))),
                );
            }
            PromptSection {
                name: section.category.name.clone(),
                items,
            }
        })
        .collect();

    if !menu.uncategorized.is_empty() {
        sections.push(PromptSection {
            name: "Other".to_string(),
            items: menu
                .uncategorized
                .iter()
                .map(|product| PromptItem::new(product, None))
                .collect(),
        });
    }

    sections
}

/// Renders the system instruction describing the restaurant and its menu.
pub fn render_system_prompt(
    tera: &Tera,
    settings: &CompanySettings,
    menu: &Menu,
) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert("restaurant", &settings.name);
    context.insert("currency", &settings.currency);
    context.insert("sections", &prompt_sections(menu));
    tera.render(SYSTEM_PROMPT_TEMPLATE, &context)
}

/// Answers a guest's question about the menu.
///
/// `backend` is `None` when no assistant API key is configured.
pub async fn ask_assistant<R, B>(
    repo: &R,
    backend: Option<&B>,
    tera: &Tera,
    user: &AuthenticatedUser,
    form: ChatForm,
) -> Result<ChatReply, ChatError>
where
    R: CategoryReader + SubcategoryReader + ProductReader + SettingsReader + ?Sized,
    B: ChatBackend,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let backend = backend.ok_or(ChatError::NotConfigured)?;

    let request = form
        .into_request()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let settings = repo
        .get_company_settings(user.hub_id)
        .map_err(ServiceError::from)?
        .unwrap_or_else(|| CompanySettings::defaults(user.hub_id));
    let menu = fetch_menu(repo, user.hub_id)?;
    log::debug!(
        "Asking assistant for hub {} with {} menu items",
        user.hub_id,
        menu.product_count()
    );

    let system_prompt = render_system_prompt(tera, &settings, &menu)?;

    let reply = backend
        .generate(&system_prompt, &request.history, &request.message)
        .await?;

    Ok(ChatReply { reply })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::assistant::{ChatRole, ChatTurn};
    use crate::forms::chat::ChatTurnForm;
    use crate::repository::mock::MockCatalogRepository;
    use crate::services::test_support::{category, product, user_with_roles};

    struct FakeBackend {
        reply: Result<String, u16>,
        seen: Mutex<Vec<(String, Vec<ChatTurn>, String)>>,
    }

    impl FakeBackend {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatBackend for FakeBackend {
        async fn generate(
            &self,
            system_prompt: &str,
            history: &[ChatTurn],
            message: &str,
        ) -> Result<String, AssistantError> {
            self.seen.lock().expect("lock").push((
                system_prompt.to_string(),
                history.to_vec(),
                message.to_string(),
            ));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(AssistantError::Api {
                    status: *status,
                    body: "quota exceeded".to_string(),
                }),
            }
        }
    }

    fn tera() -> Tera {
        let mut tera = Tera::default();
        tera.add_raw_template(
            SYSTEM_PROMPT_TEMPLATE,
            include_str!("../../templates/assistant/system_prompt.txt"),
        )
        .expect("template");
        tera
    }

    fn catalog() -> MockCatalogRepository {
        let mut repo = MockCatalogRepository::new();
        repo.expect_get_company_settings().returning(|hub_id| {
            let mut settings = CompanySettings::defaults(hub_id);
            settings.name = "Blue Fox".to_string();
            Ok(Some(settings))
        });
        repo.expect_list_categories()
            .returning(|_| Ok(vec![category(1, "Soups")]));
        repo.expect_list_subcategories()
            .returning(|_, _| Ok(Vec::new()));
        repo.expect_list_products().returning(|_| {
            let mut soup = product(1, "Tomato Soup", 650);
            soup.category_id = Some(1);
            Ok((1, vec![soup]))
        });
        repo
    }

    fn form(message: &str) -> ChatForm {
        ChatForm {
            message: message.to_string(),
            history: vec![ChatTurnForm {
                role: ChatRole::User,
                content: "Hello".to_string(),
            }],
        }
    }

    #[actix_web::test]
    async fn ask_assistant_sends_menu_in_prompt() {
        let repo = catalog();
        let backend = FakeBackend::replying("Try the tomato soup!");
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let reply = ask_assistant(&repo, Some(&backend), &tera(), &user, form("Any soup?"))
            .await
            .expect("reply");

        assert_eq!(reply.reply, "Try the tomato soup!");
        let seen = backend.seen.lock().expect("lock");
        let (prompt, history, message) = &seen[0];
        assert!(prompt.contains("Blue Fox"));
        assert!(prompt.contains("## Soups"));
        assert!(prompt.contains("Tomato Soup: 6.50 USD"));
        assert_eq!(history.len(), 1);
        assert_eq!(message, "Any soup?");
    }

    #[actix_web::test]
    async fn ask_assistant_without_backend_is_not_configured() {
        let repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let result =
            ask_assistant::<_, FakeBackend>(&repo, None, &tera(), &user, form("Hi")).await;

        assert!(matches!(result, Err(ChatError::NotConfigured)));
    }

    #[actix_web::test]
    async fn ask_assistant_rejects_empty_message() {
        let repo = MockCatalogRepository::new();
        let backend = FakeBackend::replying("unused");
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let result = ask_assistant(&repo, Some(&backend), &tera(), &user, form("   ")).await;

        assert!(matches!(
            result,
            Err(ChatError::Service(ServiceError::Form(_)))
        ));
    }

    #[actix_web::test]
    async fn ask_assistant_surfaces_upstream_errors() {
        let repo = catalog();
        let backend = FakeBackend::failing(429);
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let result = ask_assistant(&repo, Some(&backend), &tera(), &user, form("Hi")).await;

        assert!(matches!(
            result,
            Err(ChatError::Assistant(AssistantError::Api { status: 429, .. }))
        ));
    }

    #[test]
    fn format_price_pads_cents() {
        assert_eq!(format_price(5, "EUR"), "0.05 EUR");
        assert_eq!(format_price(1250, "USD"), "12.50 USD");
    }

    #[test]
    fn render_system_prompt_handles_empty_menu() {
        let prompt = render_system_prompt(
            &tera(),
            &CompanySettings::defaults(1),
            &Menu::default(),
        )
        .expect("prompt");

        assert!(prompt.contains("The menu is empty right now."));
    }
}
