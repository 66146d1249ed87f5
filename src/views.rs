//! Server-side page rendering with Tera.
//!
//! Templates are embedded in the binary; user-supplied text is escaped by
//! Tera's autoescaping of `.html` templates.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::models::NewsPostResponse;

/// Every page the portal renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    News,
    Contact,
    Faq,
    CreatePost,
    EditPost,
}

impl Page {
    pub fn template(self) -> &'static str {
        match self {
            Page::Home | Page::News => "index.html",
            Page::Contact => "contact.html",
            Page::Faq => "faq.html",
            Page::CreatePost => "create.html",
            Page::EditPost => "edit.html",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Welcome to Local Community Portal",
            Page::News => "Community News",
            Page::Contact => "Contact Us",
            Page::Faq => "Frequently Asked Questions",
            Page::CreatePost => "Create New Post",
            Page::EditPost => "Edit Post",
        }
    }
}

/// Data handed to a page template besides its title
#[derive(Debug, Default)]
pub enum PageData {
    #[default]
    None,
    Posts(Vec<NewsPostResponse>),
    Post(NewsPostResponse),
}

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("templates/layout.html")),
            ("index.html", include_str!("templates/index.html")),
            ("contact.html", include_str!("templates/contact.html")),
            ("faq.html", include_str!("templates/faq.html")),
            ("create.html", include_str!("templates/create.html")),
            ("edit.html", include_str!("templates/edit.html")),
        ])?;

        tera.register_filter("display_date", display_date_filter);

        Ok(Self { tera })
    }

    pub fn render(&self, page: Page, data: PageData) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("pageTitle", page.title());
        match data {
            PageData::None => {}
            PageData::Posts(posts) => context.insert("newsPosts", &posts),
            PageData::Post(post) => context.insert("post", &post),
        }
        self.tera.render(page.template(), &context)
    }
}

/// Tera filter: RFC 3339 timestamp to a readable UTC date
fn display_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("display_date", "value", String, value);
    match DateTime::parse_from_rfc3339(&s) {
        Ok(ts) => Ok(tera::Value::String(
            ts.with_timezone(&Utc).format("%B %d, %Y %H:%M").to_string(),
        )),
        // Not a timestamp; show it unchanged
        Err(_) => Ok(tera::Value::String(s)),
    }
}
