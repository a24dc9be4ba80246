//! Blog post structured data.
//!
//! Blog posts carry their metadata as `data-*` attributes on the article
//! element; this module reads them, fills config-backed fallbacks, and
//! writes a `schema.org` `BlogPosting` object into the
//! `#blog-structured-data` script element as pretty-printed JSON-LD.
//!
//! Headline and publication date are required: without them the object
//! would be junk to crawlers, so emission logs a diagnostic and skips
//! instead. Everything else degrades: the modification date falls back to
//! the publication date, the author falls back to the site itself.

use log::debug;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::page::{Element, Page};

/// Id of the script element the JSON lands in. Created when absent.
pub const SCRIPT_ID: &str = "blog-structured-data";

const SCHEMA_CONTEXT: &str = "https://schema.org";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPosting {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub headline: String,
    #[serde(rename = "datePublished")]
    pub date_published: String,
    #[serde(rename = "dateModified")]
    pub date_modified: String,
    pub author: Person,
    pub publisher: Organization,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Organization {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub logo: ImageObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub url: String,
}

/// Build the `BlogPosting` for a page, or `None` when the page has no
/// article or the article lacks the required attributes. `root` is the
/// relative prefix from the page to the site root, where the publisher
/// logo lives.
pub fn build(page: &Page, cfg: &SiteConfig, root: &str) -> Option<BlogPosting> {
    let Some(article) = page.first_by_tag("article") else {
        debug!("no article element on {}; structured data skipped", page.pathname);
        return None;
    };
    let Some(headline) = article.attr("data-headline") else {
        debug!(
            "article on {} lacks data-headline; structured data skipped",
            page.pathname
        );
        return None;
    };
    let Some(published) = article.attr("data-date-published") else {
        debug!(
            "article on {} lacks data-date-published; structured data skipped",
            page.pathname
        );
        return None;
    };

    let modified = article
        .attr("data-date-modified")
        .unwrap_or(published)
        .to_string();
    let author_name = article
        .attr("data-author")
        .unwrap_or(&cfg.branding.site_name)
        .to_string();
    let author_url = article
        .attr("data-author-url")
        .map(str::to_string)
        .or_else(|| {
            (!cfg.social.linkedin.is_empty()).then(|| cfg.social.linkedin.clone())
        });

    Some(BlogPosting {
        context: SCHEMA_CONTEXT,
        kind: "BlogPosting",
        headline: headline.to_string(),
        date_published: published.to_string(),
        date_modified: modified,
        author: Person {
            kind: "Person",
            name: author_name,
            url: author_url,
        },
        publisher: Organization {
            kind: "Organization",
            name: cfg.branding.site_name.clone(),
            logo: ImageObject {
                kind: "ImageObject",
                url: format!("{root}images/logo.png"),
            },
        },
        description: article.attr("data-description").map(str::to_string),
        image: article.attr("data-image").map(str::to_string),
    })
}

/// Build and write the JSON-LD into [`SCRIPT_ID`]. Returns false when
/// nothing was emitted.
pub fn emit(page: &mut Page, cfg: &SiteConfig, root: &str) -> bool {
    let Some(posting) = build(page, cfg, root) else {
        return false;
    };
    let json = match serde_json::to_string_pretty(&posting) {
        Ok(json) => json,
        Err(err) => {
            debug!("structured data serialization failed: {err}");
            return false;
        }
    };
    if !page.contains(SCRIPT_ID) {
        page.insert(
            Element::new(SCRIPT_ID, "script").with_attr("type", "application/ld+json"),
        );
    }
    page.set_html(SCRIPT_ID, json);
    true
}
