//! Domain models for the storefront context pipeline.
//!
//! These are the shapes assembled per request and, for some of them, stored
//! in the session: the active [`Store`], the visitor identity
//! ([`Customer`] / [`Guest`]), CMS content descriptors, the category
//! navigation tree, the breadcrumb trail, and derived page metadata.

pub mod breadcrumb;
pub mod catalog;
pub mod content;
pub mod customer;
pub mod page;
pub mod session;
pub mod store;

pub use breadcrumb::{Breadcrumb, BreadcrumbEntry, BreadcrumbTarget, HOME_LABEL_KEY, HOME_URL};
pub use catalog::{CategoryNode, CategorySummary, ProductSummary};
pub use content::{ContentDescription, ContentItem, ContentKind, LANDING_PAGE_CODE};
pub use customer::{Address, Customer, Guest};
pub use page::PageMeta;
pub use store::Store;
