use crate::dom::parser::parse_html;
use crate::engine::page::StaticPage;
use crate::engine::runtime::{PageRuntime, DEFAULT_CONTAINER_SELECTOR};
use crate::host::Viewport;
use crate::nav::config::ConfigOverrides;

#[cfg(feature = "fetch")]
use crate::net::fetch::fetch_url;

/// A loaded page with its navs mounted
pub struct PageResult {
    pub runtime: PageRuntime<StaticPage>,
    pub url: String,
    pub fetch_status: u16,
}

/// Error during page loading
#[derive(Debug)]
pub struct PageError {
    pub message: String,
    pub phase: &'static str,
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

impl std::error::Error for PageError {}

/// Page pipeline: Fetch → Parse → Layout → Mount
pub struct NavEngine {
    viewport: Viewport,
    container_selector: String,
    overrides: ConfigOverrides,
}

impl NavEngine {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport: Viewport::new(viewport_width, viewport_height),
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            overrides: ConfigOverrides::default(),
        }
    }

    /// Mount on a different set of containers.
    pub fn with_container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    /// Force settings onto every widget, over their attributes.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Load a URL through the full pipeline
    #[cfg(feature = "fetch")]
    pub fn load_page(&self, url: &str) -> Result<PageResult, PageError> {
        let fetch_result = fetch_url(url).map_err(|e| PageError {
            message: e.message,
            phase: "fetch",
        })?;

        self.process_html(&fetch_result.html, &fetch_result.url, fetch_result.status)
    }

    /// Process raw HTML through the pipeline
    pub fn process_html(&self, html: &str, url: &str, status: u16) -> Result<PageResult, PageError> {
        let dom = parse_html(html, url);
        log::debug!("parsed {} ({} nodes)", url, dom.len());

        let page = StaticPage::new(dom, self.viewport.width);
        log::debug!("layout done, document height {}", page.layout.document_height);

        if !self.overrides.is_empty() {
            log::debug!("config overrides: {:?}", self.overrides);
        }
        let runtime = PageRuntime::mount_with_overrides(
            page,
            &self.container_selector,
            self.viewport,
            &self.overrides,
        )
        .map_err(|e| PageError {
            message: e.to_string(),
            phase: "mount",
        })?;

        Ok(PageResult {
            runtime,
            url: url.to_string(),
            fetch_status: status,
        })
    }
}
