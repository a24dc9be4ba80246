use clap::{Parser, Subcommand};
use sitewire::config;
use sitewire::engine::Engine;
use sitewire::fragments;
use sitewire::jsonld;
use sitewire::page::events::Event;
use sitewire::page::{BODY, Element, Page, PageKind};
use std::fs;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let build = env!("SITEWIRE_BUILD");
    if build.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup, called exactly once
        Box::leak(format!("{} ({build})", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "sitewire")]
#[command(about = "Behavior layer for the site's static pages")]
#[command(long_about = "\
Behavior layer for the site's static pages

Every shipped page carries empty chrome elements; at boot the engine fills
them with shared markup and wires up the interactive behaviors:

  <nav id=\"nav\">               → shared nav bar with per-template links
  <header id=\"header\">         → mobile title bar with the panel toggle
  <footer id=\"footer\">         → social icon row plus copyright
  <div id=\"contact-content\">   → email, phone, and the CTA button
  (appended to body)           → #navPanel slide-in nav
  (blog posts only)            → BlogPosting JSON-LD script

Link hrefs are relative, resolved from the page's location, so the same
site works at the domain root and under a repository subpath.

Fragment values (contact details, social profile URLs, branding) come from
site.toml. Run 'sitewire gen-config' to generate a documented one.")]
#[command(version = version_string())]
struct Cli {
    /// Site configuration file
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Boot a sample page and print the injected fragment markup
    Render(RenderArgs),
    /// Validate site.toml and print the resolved configuration
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Page template to render
    #[arg(long, value_enum, default_value_t = PageArg::Home)]
    page: PageArg,

    /// Pathname the page is served at (defaults to the template's usual one)
    #[arg(long)]
    path: Option<String>,

    /// Host the sample page pretends to be served from
    #[arg(long, default_value = "www.example.com")]
    hostname: String,

    /// Write each fragment to <OUT>/<name>.html instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum PageArg {
    Home,
    Services,
    BlogIndex,
    BlogPost,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => {
            let cfg = config::load_config(&cli.config)?;
            let page = sample_page(args.page, args.path.as_deref(), &args.hostname);
            let mut engine = Engine::new(page, cfg);
            engine.dispatch(Event::Ready);

            println!(
                "==> {} (base \"{}\")",
                engine.page.pathname,
                engine.base()
            );
            let parts = [
                ("nav", fragments::NAV_ID),
                ("header", fragments::HEADER_ID),
                ("footer", fragments::FOOTER_ID),
                ("contact", fragments::CONTACT_ID),
                ("panel", fragments::PANEL_ID),
                ("structured-data", jsonld::SCRIPT_ID),
            ];
            match args.out {
                Some(dir) => {
                    fs::create_dir_all(&dir)?;
                    for (label, id) in parts {
                        if let Some(html) = fragment_html(&engine.page, id) {
                            let file = dir.join(format!("{label}.html"));
                            fs::write(&file, html)?;
                            println!("    wrote {}", file.display());
                        }
                    }
                }
                None => {
                    for (label, id) in parts {
                        print_fragment(&engine.page, label, id);
                    }
                }
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let cfg = config::load_config(&cli.config)?;
            print!("{}", toml::to_string_pretty(&cfg)?);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Injected markup for one fragment, or `None` when the fragment is absent
/// or empty (no structured data outside blog posts).
fn fragment_html<'a>(page: &'a Page, id: &str) -> Option<&'a str> {
    page.element(id)
        .map(|el| el.html.as_str())
        .filter(|html| !html.is_empty())
}

fn print_fragment(page: &Page, label: &str, id: &str) {
    if let Some(html) = fragment_html(page, id) {
        println!("--- {label}");
        println!("{html}");
    }
}

/// Build a demo page for one template: the empty chrome elements every
/// shipped document carries, plus that template's own content.
fn sample_page(arg: PageArg, path: Option<&str>, hostname: &str) -> Page {
    let (kind, default_path) = match arg {
        PageArg::Home => (PageKind::Home, "/index.html"),
        PageArg::Services => (PageKind::Services, "/services/"),
        PageArg::BlogIndex => (PageKind::BlogIndex, "/blog/index.html"),
        PageArg::BlogPost => (PageKind::BlogPost, "/blog/2024/03/zero-trust-rollout.html"),
    };

    let mut page = Page::new(kind, path.unwrap_or(default_path), hostname);
    for (id, tag) in [
        (fragments::NAV_ID, "nav"),
        (fragments::HEADER_ID, "header"),
        (fragments::FOOTER_ID, "footer"),
        (fragments::CONTACT_ID, "div"),
    ] {
        page.insert(Element::new(id, tag).child_of(BODY));
    }

    match kind {
        PageKind::Home => {
            page.insert(
                Element::new("about", "section")
                    .child_of(BODY)
                    .with_bounds(600.0, 900.0),
            );
            page.insert(
                Element::new("contact", "section")
                    .child_of(BODY)
                    .with_bounds(1500.0, 600.0),
            );
        }
        PageKind::BlogPost => {
            page.insert(
                Element::new("post", "article")
                    .child_of(BODY)
                    .with_attr(
                        "data-headline",
                        "Rolling Out Zero Trust Without Breaking Friday Deploys",
                    )
                    .with_attr(
                        "data-description",
                        "A staged rollout plan for small engineering teams.",
                    )
                    .with_attr("data-date-published", "2024-03-08"),
            );
        }
        PageKind::Services | PageKind::BlogIndex => {}
    }
    page
}
