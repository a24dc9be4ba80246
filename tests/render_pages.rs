//! Cross-template rendering checks: the injected chrome each page kind
//! gets, config-driven values (including a site.toml loaded from disk),
//! and escaping, asserted on the final markup strings.
//!
//! Run with: cargo test --test render_pages

use std::fs;

use sitewire::config::{self, ConfigError, SiteConfig};
use sitewire::engine::Engine;
use sitewire::fragments;
use sitewire::jsonld;
use sitewire::page::events::Event;
use sitewire::page::{BODY, Element, Page, PageKind};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers (Adapted from engine_flow.rs)
// ---------------------------------------------------------------------------

fn page_with_chrome(kind: PageKind, pathname: &str) -> Page {
    let mut page = Page::new(kind, pathname, "www.example.com");
    for (id, tag) in [
        (fragments::NAV_ID, "nav"),
        (fragments::HEADER_ID, "header"),
        (fragments::FOOTER_ID, "footer"),
        (fragments::CONTACT_ID, "div"),
    ] {
        page.insert(Element::new(id, tag).child_of(BODY));
    }
    page
}

/// Boot one template with the given config and inject all fragments.
fn boot(kind: PageKind, pathname: &str, cfg: SiteConfig) -> Engine {
    let mut engine = Engine::new(page_with_chrome(kind, pathname), cfg);
    engine.dispatch(Event::Ready);
    engine
}

fn fragment_html(engine: &Engine, id: &str) -> String {
    engine
        .page
        .element(id)
        .unwrap_or_else(|| panic!("fragment '{id}' missing"))
        .html
        .clone()
}

// ---------------------------------------------------------------------------
// Per-template link tables
// ---------------------------------------------------------------------------

#[test]
fn home_nav_markup() {
    let engine = boot(PageKind::Home, "/index.html", SiteConfig::default());
    let html = fragment_html(&engine, fragments::NAV_ID);
    assert!(html.contains(r##"class="link scrolly" href="#about""##));
    assert!(html.contains(r#"class="link" href="services/""#));
    assert!(html.contains(r#"href="blog/index.html""#));
    assert!(html.contains(r##"class="link scrolly" href="#contact""##));
    assert!(html.contains(r#"id="nav-logo" class="nav-logo" href="index.html""#));
    assert!(html.contains(r#"<img src="images/logo.png" alt="Example Secure logo">"#));
    assert!(!html.contains("current"));
}

#[test]
fn services_nav_markup() {
    let engine = boot(PageKind::Services, "/services/", SiteConfig::default());
    let html = fragment_html(&engine, fragments::NAV_ID);
    assert!(html.contains(r#"href="../index.html#about""#));
    assert!(html.contains(r#"<li id="nav-item-services" class="current">"#));
    assert!(html.contains(r#"href="../blog/index.html""#));
    assert!(html.contains(r#"id="nav-logo" class="nav-logo" href="../index.html""#));
    assert!(html.contains(r#"<img src="../images/logo.png""#));
    // Off the homepage the section links are plain document links.
    assert!(!html.contains("scrolly"));
}

#[test]
fn blog_index_nav_markup() {
    let engine = boot(PageKind::BlogIndex, "/blog/index.html", SiteConfig::default());
    let html = fragment_html(&engine, fragments::NAV_ID);
    assert!(html.contains(r#"href="../index.html#about""#));
    assert!(html.contains(r#"href="../services/""#));
    assert!(html.contains(r#"<li id="nav-item-blog" class="current">"#));
    assert!(html.contains(r#"id="nav-logo" class="nav-logo" href="../index.html""#));
    assert!(html.contains(r#"<img src="../images/logo.png""#));
}

#[test]
fn blog_post_nav_markup() {
    let engine = boot(
        PageKind::BlogPost,
        "/blog/2024/01/secure-deploys.html",
        SiteConfig::default(),
    );
    let html = fragment_html(&engine, fragments::NAV_ID);
    assert!(html.contains(r#"href="../../../index.html#about""#));
    assert!(html.contains(r#"href="../../../services/""#));
    // The blog link takes the short way back to /blog/.
    assert!(html.contains(r#"<li id="nav-item-blog" class="current"><a id="nav-link-blog" class="link" href="../../index.html">"#));
    assert!(html.contains(r#"id="nav-logo" class="nav-logo" href="../../../index.html""#));
    assert!(html.contains(r#"<img src="../../../images/logo.png""#));
}

#[test]
fn panel_mirrors_nav_per_template() {
    let engine = boot(
        PageKind::BlogPost,
        "/blog/2024/01/secure-deploys.html",
        SiteConfig::default(),
    );
    let html = fragment_html(&engine, fragments::PANEL_ID);
    // The panel carries the section marker on the link itself.
    assert!(html.contains(
        r#"id="panel-link-blog" class="link depth-0 current" href="../../index.html""#
    ));
    assert!(html.contains(r#"href="../../../services/""#));
    assert!(!html.contains("scrolly"));

    // On the homepage no link is current until the reader scrolls.
    let home = boot(PageKind::Home, "/index.html", SiteConfig::default());
    assert!(!fragment_html(&home, fragments::PANEL_ID).contains("current"));
}

#[test]
fn header_markup_is_template_independent() {
    for (kind, pathname) in [
        (PageKind::Home, "/index.html"),
        (PageKind::BlogIndex, "/blog/index.html"),
    ] {
        let engine = boot(kind, pathname, SiteConfig::default());
        let html = fragment_html(&engine, fragments::HEADER_ID);
        assert!(html.contains(r##"class="toggle" href="#navPanel""##));
        assert!(html.contains("Menu"));
    }
}

// ---------------------------------------------------------------------------
// Config-driven values
// ---------------------------------------------------------------------------

#[test]
fn config_file_drives_fragments() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("site.toml");
    fs::write(
        &path,
        r#"
[contact]
email = "security@mbsecure.example"

[social]
github = ""

[branding]
site_name = "MB Secure"
logo_alt = "MB Secure logo"
"#,
    )
    .unwrap();

    let cfg = config::load_config(&path).unwrap();
    let engine = boot(PageKind::Home, "/index.html", cfg);

    let nav = fragment_html(&engine, fragments::NAV_ID);
    assert!(nav.contains(">MB Secure</a>"));
    assert!(nav.contains(r#"alt="MB Secure logo""#));

    let footer = fragment_html(&engine, fragments::FOOTER_ID);
    assert!(!footer.contains("footer-github"));
    assert!(footer.contains("footer-linkedin"));
    assert!(footer.contains("© MB Secure. All rights reserved."));

    let contact = fragment_html(&engine, fragments::CONTACT_ID);
    assert!(contact.contains(r#"href="mailto:security@mbsecure.example""#));
    // Defaults survive for everything the file left out.
    assert!(contact.contains(r#"href="tel:+15550100123""#));
}

#[test]
fn missing_config_file_uses_stock_defaults() {
    let tmp = TempDir::new().unwrap();
    let cfg = config::load_config(&tmp.path().join("absent.toml")).unwrap();
    let engine = boot(PageKind::Home, "/index.html", cfg);
    let nav = fragment_html(&engine, fragments::NAV_ID);
    assert!(nav.contains(">Example Secure</a>"));
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();

    let bad_email = tmp.path().join("bad-email.toml");
    fs::write(&bad_email, "[contact]\nemail = \"not-an-address\"\n").unwrap();
    assert!(matches!(
        config::load_config(&bad_email),
        Err(ConfigError::Validation(_))
    ));

    let typo = tmp.path().join("typo.toml");
    fs::write(&typo, "[contct]\nemail = \"hello@example.com\"\n").unwrap();
    assert!(matches!(
        config::load_config(&typo),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn branding_is_escaped_in_every_fragment() {
    let mut cfg = SiteConfig::default();
    cfg.branding.site_name = "<b>Bold & Wired</b>".to_string();
    let engine = boot(PageKind::Home, "/index.html", cfg);

    for id in [
        fragments::NAV_ID,
        fragments::HEADER_ID,
        fragments::FOOTER_ID,
    ] {
        let html = fragment_html(&engine, id);
        assert!(!html.contains("<b>"), "unescaped markup in {id}");
        assert!(html.contains("&lt;b&gt;Bold &amp; Wired&lt;/b&gt;"));
    }
}

// ---------------------------------------------------------------------------
// Structured data
// ---------------------------------------------------------------------------

#[test]
fn structured_data_reflects_article_attributes() {
    let mut page = page_with_chrome(PageKind::BlogPost, "/blog/2024/01/secure-deploys.html");
    page.insert(
        Element::new("post", "article")
            .child_of(BODY)
            .with_attr("data-headline", "Hardening Deploy Pipelines")
            .with_attr("data-description", "Supply chain controls for small teams.")
            .with_attr("data-date-published", "2024-01-15")
            .with_attr("data-date-modified", "2024-02-01")
            .with_attr("data-author", "Dana Reyes")
            .with_attr("data-author-url", "https://example.com/dana")
            .with_attr("data-image", "../../../images/posts/deploys.png"),
    );
    let mut engine = Engine::new(page, SiteConfig::default());
    engine.dispatch(Event::Ready);

    let script = engine.page.element(jsonld::SCRIPT_ID).unwrap();
    assert_eq!(script.attr("type"), Some("application/ld+json"));

    let parsed: serde_json::Value = serde_json::from_str(&script.html).unwrap();
    assert_eq!(parsed["@context"], "https://schema.org");
    assert_eq!(parsed["@type"], "BlogPosting");
    assert_eq!(parsed["headline"], "Hardening Deploy Pipelines");
    assert_eq!(parsed["datePublished"], "2024-01-15");
    assert_eq!(parsed["dateModified"], "2024-02-01");
    assert_eq!(parsed["author"]["name"], "Dana Reyes");
    assert_eq!(parsed["author"]["url"], "https://example.com/dana");
    assert_eq!(parsed["publisher"]["name"], "Example Secure");
    assert_eq!(parsed["publisher"]["logo"]["url"], "../../../images/logo.png");
    assert_eq!(parsed["image"], "../../../images/posts/deploys.png");
}

#[test]
fn structured_data_only_on_blog_posts() {
    for (kind, pathname) in [
        (PageKind::Home, "/index.html"),
        (PageKind::Services, "/services/"),
        (PageKind::BlogIndex, "/blog/index.html"),
    ] {
        let engine = boot(kind, pathname, SiteConfig::default());
        assert!(
            !engine.page.contains(jsonld::SCRIPT_ID),
            "unexpected structured data on {pathname}"
        );
    }
}
