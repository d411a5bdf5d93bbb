//! Breadcrumb trail assembly and locale rebuild.
//!
//! The trail lives in the session and tracks the language its labels were
//! rendered in. Per request there are three cases: no trail yet (start a
//! fresh one at Home), same language (leave it untouched), or a language
//! switch (re-resolve every step's label and URL against the new language,
//! dropping steps whose entity has vanished, and replace the session trail
//! wholesale). A rebuild failure keeps the previous trail for this request.

use tower_sessions::Session;

use quayside_core::{LanguageCode, Locale};

use crate::models::{
    Breadcrumb, BreadcrumbEntry, BreadcrumbTarget, HOME_LABEL_KEY, HOME_URL, session::keys,
};
use crate::services::{MessageCatalog, ServiceError, Services};

use super::{session_get, session_insert};

/// Assemble the request's breadcrumb trail.
pub async fn assemble_breadcrumb(
    services: &Services,
    session: &Session,
    language: &LanguageCode,
    locale: &Locale,
) -> Breadcrumb {
    let existing: Option<Breadcrumb> = session_get(session, keys::BREADCRUMB).await;

    match existing {
        None => {
            let fresh = Breadcrumb::starting_at_home(
                language.clone(),
                home_entry(services.messages.as_ref(), locale),
            );
            session_insert(session, keys::BREADCRUMB, &fresh).await;
            fresh
        }
        // Same language: the trail is left untouched.
        Some(trail) if trail.language == *language => trail,
        Some(trail) => match rebuild(services, &trail, language, locale).await {
            Ok(rebuilt) => {
                session_insert(session, keys::BREADCRUMB, &rebuilt).await;
                rebuilt
            }
            Err(err) => {
                tracing::error!(
                    from = %trail.language,
                    to = %language,
                    error = %err,
                    "breadcrumb rebuild failed, keeping previous trail"
                );
                trail
            }
        },
    }
}

/// Re-resolve every step of a trail against a new language.
///
/// Steps whose entity no longer resolves are dropped silently.
pub(crate) async fn rebuild(
    services: &Services,
    trail: &Breadcrumb,
    language: &LanguageCode,
    locale: &Locale,
) -> Result<Breadcrumb, ServiceError> {
    let mut entries = Vec::with_capacity(trail.entries.len());

    for entry in &trail.entries {
        match entry.target {
            BreadcrumbTarget::Home => {
                entries.push(home_entry(services.messages.as_ref(), locale));
            }
            BreadcrumbTarget::Product(id) => {
                if let Some(product) = services.catalog.product_for_language(id, language).await? {
                    entries.push(BreadcrumbEntry {
                        target: BreadcrumbTarget::Product(id),
                        label: product.name,
                        url: product.url,
                    });
                }
            }
            BreadcrumbTarget::Category(id) => {
                if let Some(category) = services.catalog.category_for_language(id, language).await?
                {
                    entries.push(BreadcrumbEntry {
                        target: BreadcrumbTarget::Category(id),
                        label: category.name,
                        url: category.url,
                    });
                }
            }
            BreadcrumbTarget::Page(id) => {
                if let Some(page) = services.content.page_for_language(id, language).await?
                    && let Some(description) = page.description_for(language)
                {
                    entries.push(BreadcrumbEntry {
                        target: BreadcrumbTarget::Page(id),
                        label: description.name.clone(),
                        url: description.url.clone(),
                    });
                }
            }
        }
    }

    Ok(Breadcrumb {
        language: language.clone(),
        entries,
    })
}

/// The localized home step.
fn home_entry(messages: &dyn MessageCatalog, locale: &Locale) -> BreadcrumbEntry {
    BreadcrumbEntry {
        target: BreadcrumbTarget::Home,
        label: messages.message(HOME_LABEL_KEY, locale),
        url: HOME_URL.to_owned(),
    }
}
