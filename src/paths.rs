//! Relative path resolution for pages served from arbitrary locations.
//!
//! Shared fragments (nav, header, footer) carry the same links on every
//! page, and the site has to work from a domain root, a deep filesystem
//! checkout (`file:///.../index.html`), and a GitHub Pages project URL
//! alike. Absolute links would break two of those three, so each page
//! computes a `base` prefix (zero or more `../`) from its own location and
//! all shared links are written relative to that prefix.
//!
//! ## How the prefix is counted
//!
//! The document name contributes no depth: a link inside `/blog/index.html`
//! already resolves against `/blog/`, so its prefix is empty, while the
//! directory form `/blog/` sits one hop from the root and gets `../`. For
//! documents nested deeper, the prefix climbs to the top-level section
//! directory: `/blog/2024/01/post.html` gets `../../`, which lands on
//! `/blog/`. Link tables in [`crate::fragments`] are written against that
//! convention.
//!
//! On `*.github.io` hosts the first path segment is the repository name,
//! not content, and is dropped before counting. A page at
//! `/project/blog/2024/01/post.html` on such a host resolves the same
//! prefix as `/blog/2024/01/post.html` on a custom domain.

/// Hosts whose first path segment is a project name rather than content.
fn is_project_host(hostname: &str) -> bool {
    hostname.ends_with(".github.io")
}

/// Compute the relative prefix from a page's pathname and hostname.
///
/// Returns `""` for root-adjacent documents, otherwise one `../` per level
/// between the document's top-level section and its own directory (for
/// directory-form paths, per level between the root and the directory).
pub fn base_path(pathname: &str, hostname: &str) -> String {
    let mut segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

    // `index.html` as the first segment means the site is served from the
    // host root itself, so there is no project segment to drop.
    if is_project_host(hostname) && segments.first().is_some_and(|s| *s != "index.html") {
        segments.remove(0);
    }

    let directory_form = pathname.ends_with('/');
    if !directory_form {
        segments.pop();
    }

    let depth = if directory_form {
        segments.len()
    } else {
        segments.len().saturating_sub(1)
    };
    "../".repeat(depth)
}

/// True for same-site document links: relative, not a bare fragment, and
/// not an external scheme. Only these get the exit transition on click;
/// in-page anchors and external targets navigate without it.
pub fn is_internal_href(href: &str) -> bool {
    !(href.is_empty()
        || href.starts_with('#')
        || href.starts_with("http://")
        || href.starts_with("https://")
        || href.starts_with("mailto:")
        || href.starts_with("tel:"))
}
