//! Context view handler.
//!
//! Serializes a summary of the assembled request context. Downstream
//! rendering consumes the same [`ShopContext`] extractor.

use std::collections::HashMap;

use axum::Json;
use serde::Serialize;

use crate::context::{RequestContext, ShopContext};
use crate::models::{CategoryNode, PageMeta};

/// Summary view of the assembled context.
#[derive(Debug, Serialize)]
pub struct ContextView {
    pub store: Option<StoreView>,
    pub language: String,
    pub locale: String,
    /// Display name of the reconciled customer, when one is bound.
    pub customer: Option<String>,
    /// Billing country of the session's guest profile.
    pub guest_country: Option<String>,
    pub breadcrumb: Vec<BreadcrumbView>,
    pub page: Option<PageMeta>,
    pub configs: HashMap<String, String>,
    pub content_codes: Vec<String>,
    pub pages: Vec<String>,
    pub categories: Vec<CategoryView>,
    pub cart_code: Option<String>,
}

/// The resolved store, as exposed to clients.
#[derive(Debug, Serialize)]
pub struct StoreView {
    pub code: String,
    pub name: String,
    pub template: Option<String>,
}

/// One breadcrumb step.
#[derive(Debug, Serialize)]
pub struct BreadcrumbView {
    pub label: String,
    pub url: String,
}

/// One navigation tree node.
#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub label: String,
    pub url: String,
    pub children: Vec<CategoryView>,
}

impl From<&CategoryNode> for CategoryView {
    fn from(node: &CategoryNode) -> Self {
        Self {
            label: node.label.clone(),
            url: node.url.clone(),
            children: node.children.iter().map(Self::from).collect(),
        }
    }
}

impl From<&RequestContext> for ContextView {
    fn from(context: &RequestContext) -> Self {
        let mut content_codes: Vec<String> = context.content.keys().cloned().collect();
        content_codes.sort();

        Self {
            store: context.store.as_ref().map(|store| StoreView {
                code: store.code.clone(),
                name: store.name.clone(),
                template: store.template.clone(),
            }),
            language: context.language.to_string(),
            locale: context.locale.to_string(),
            customer: context
                .customer
                .as_ref()
                .map(|customer| customer.display_name.clone()),
            guest_country: context
                .guest
                .as_ref()
                .map(|guest| guest.billing.country.to_string()),
            breadcrumb: context
                .breadcrumb
                .entries
                .iter()
                .map(|entry| BreadcrumbView {
                    label: entry.label.clone(),
                    url: entry.url.clone(),
                })
                .collect(),
            page: context.page.clone(),
            configs: context.configs.clone(),
            content_codes,
            pages: context.pages.iter().map(|page| page.name.clone()).collect(),
            categories: context.categories.iter().map(CategoryView::from).collect(),
            cart_code: context.cart_code.clone(),
        }
    }
}

/// Serve the assembled context as JSON.
pub async fn context_view(ShopContext(context): ShopContext) -> Json<ContextView> {
    Json(ContextView::from(context.as_ref()))
}
