//! scrollpath-nav: mount scroll path navs on a page and report what they show.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use scrollpath_nav::engine::pipeline::{NavEngine, PageError, PageResult};
use scrollpath_nav::engine::report::page_report;
use scrollpath_nav::engine::runtime::DEFAULT_CONTAINER_SELECTOR;
use scrollpath_nav::nav::config::{parse_heading_levels, ConfigOverrides, LineStyle};

#[derive(Parser)]
#[command(name = "scrollpath-nav")]
#[command(about = "Build scroll path navigation for an HTML page", long_about = None)]
struct Args {
    /// HTML file, or an http(s) URL
    #[arg(value_name = "INPUT")]
    input: String,

    /// Selector for the nav containers
    #[arg(long, default_value = DEFAULT_CONTAINER_SELECTOR)]
    container: String,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Scroll positions to simulate, in order
    #[arg(long, short = 's', value_name = "Y", value_delimiter = ',')]
    scroll: Vec<f32>,

    /// Write the annotated page here
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print a JSON report instead of a summary
    #[arg(long)]
    json: bool,

    /// Heading levels to collect, e.g. "h2,h3" (overrides data-heading-levels)
    #[arg(long, value_name = "LEVELS")]
    levels: Option<String>,

    /// Extra selectors to include as entries
    #[arg(long, value_name = "SELECTOR")]
    include: Vec<String>,

    /// Selectors whose matches are never entries
    #[arg(long, value_name = "SELECTOR")]
    exclude: Vec<String>,

    /// Use section-based visibility instead of the viewport band
    #[arg(long)]
    section: bool,

    /// Rounded corner radius for the path, 0-50
    #[arg(long, value_name = "PX")]
    corner_radius: Option<f32>,

    /// Path line style: solid, dashed or dotted
    #[arg(long, value_name = "STYLE")]
    line_style: Option<LineStyle>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            heading_levels: self.levels.as_deref().map(parse_heading_levels),
            include_selectors: self.include.clone(),
            exclude_selectors: self.exclude.clone(),
            section_detection: self.section.then_some(true),
            corner_radius: self.corner_radius,
            line_style: self.line_style,
        }
    }
}

#[cfg(feature = "fetch")]
fn load_remote(engine: &NavEngine, input: &str) -> Option<Result<PageResult, PageError>> {
    scrollpath_nav::net::fetch::is_remote(input).then(|| engine.load_page(input))
}

#[cfg(not(feature = "fetch"))]
fn load_remote(_engine: &NavEngine, _input: &str) -> Option<Result<PageResult, PageError>> {
    None
}

fn load(engine: &NavEngine, input: &str) -> Result<PageResult, PageError> {
    if let Some(result) = load_remote(engine, input) {
        return result;
    }

    let html = std::fs::read_to_string(input).map_err(|e| PageError {
        message: format!("{}: {}", input, e),
        phase: "read",
    })?;
    engine.process_html(&html, input, 200)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let engine = NavEngine::new(args.width, args.height)
        .with_overrides(args.overrides())
        .with_container_selector(args.container);
    let PageResult { mut runtime, url, .. } = load(&engine, &args.input)?;

    let positions = if args.scroll.is_empty() { vec![0.0] } else { args.scroll };
    let report = page_report(&mut runtime, &url, &positions);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} ({} nav(s), document height {})", report.url, report.navs.len(), report.document_height);
        for (i, nav) in report.navs.iter().enumerate() {
            println!("nav #{} at node {}: {} entries", i, nav.container, nav.entries.len());
            for entry in &nav.entries {
                println!("  {}{} (#{})", "  ".repeat(entry.depth), entry.label, entry.id);
            }
        }
        for scroll in &report.scrolls {
            let active: Vec<String> = scroll.navs.iter().map(|n| n.active_ids.join(", ")).collect();
            println!("scroll {}: [{}]", scroll.scroll_y, active.join(" | "));
        }
    }

    if let Some(path) = args.output {
        std::fs::write(&path, runtime.host().to_html())?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
