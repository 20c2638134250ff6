//! Event loop glue between a page and its mounted navs.
//!
//! Scrolls only request an animation frame; the frame recomputes visibility
//! for every widget. Resizes go through a trailing debounce, after which the
//! page is relaid out and every path is re-rendered before it is re-synced.

use std::time::Instant;

use crate::dom::parser::SelectorError;
use crate::engine::scheduler::{Debounce, FrameCoalescer};
use crate::host::{Host, Viewport};
use crate::nav::config::{ConfigOverrides, NavConfig};
use crate::nav::widget::ScrollPathNav;

/// Class every nav container carries.
pub const DEFAULT_CONTAINER_SELECTOR: &str = ".scrollpath-nav";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    Scroll { y: f32 },
    Resize { width: f32, height: f32, at: Instant },
    AnimationFrame,
    Timer { now: Instant },
}

pub struct PageRuntime<H: Host> {
    host: H,
    widgets: Vec<ScrollPathNav>,
    viewport: Viewport,
    resize: Debounce,
    frame: FrameCoalescer,
    disposed: bool,
}

impl<H: Host> PageRuntime<H> {
    /// Mount a nav on every element matching `container_selector`.
    pub fn mount(host: H, container_selector: &str, viewport: Viewport) -> Result<Self, SelectorError> {
        Self::mount_with_overrides(host, container_selector, viewport, &ConfigOverrides::default())
    }

    /// Like [`PageRuntime::mount`], with `overrides` applied over each
    /// container's own attributes.
    pub fn mount_with_overrides(
        mut host: H,
        container_selector: &str,
        viewport: Viewport,
        overrides: &ConfigOverrides,
    ) -> Result<Self, SelectorError> {
        let containers = host.select(container_selector)?;
        let widgets: Vec<ScrollPathNav> = containers
            .into_iter()
            .map(|container| {
                let config = overrides.apply(NavConfig::from_element(&host, container));
                ScrollPathNav::mount_with_config(&mut host, container, config, &viewport)
            })
            .collect();
        log::debug!("mounted {} nav(s) for {:?}", widgets.len(), container_selector);

        Ok(Self {
            host,
            widgets,
            viewport,
            resize: Debounce::default(),
            frame: FrameCoalescer::default(),
            disposed: false,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn widgets(&self) -> &[ScrollPathNav] {
        &self.widgets
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_pending()
    }

    pub fn has_pending_resize(&self) -> bool {
        self.resize.is_pending()
    }

    pub fn dispatch(&mut self, event: PageEvent) {
        if self.disposed {
            return;
        }
        match event {
            PageEvent::Scroll { y } => {
                self.viewport.scroll_y = y.max(0.0);
                self.frame.request();
            }
            PageEvent::Resize { width, height, at } => {
                self.viewport.width = width;
                self.viewport.height = height;
                self.resize.schedule(at);
            }
            PageEvent::AnimationFrame => {
                if self.frame.take() {
                    self.sync_all();
                }
            }
            PageEvent::Timer { now } => {
                if self.resize.fire(now) {
                    self.redraw_all();
                }
            }
        }
    }

    /// Scroll and run the frame it requests.
    pub fn scroll_to(&mut self, y: f32) {
        self.dispatch(PageEvent::Scroll { y });
        self.dispatch(PageEvent::AnimationFrame);
    }

    fn sync_all(&mut self) {
        for widget in &mut self.widgets {
            if widget.update_visibility(&self.host, &self.viewport) {
                widget.render_into(&mut self.host);
            }
        }
    }

    fn redraw_all(&mut self) {
        log::debug!("resize settled at {}x{}", self.viewport.width, self.viewport.height);
        self.host.relayout(self.viewport.width);
        for widget in &mut self.widgets {
            widget.redraw(&self.host);
            widget.update_visibility(&self.host, &self.viewport);
            widget.render_into(&mut self.host);
        }
    }

    /// Dispose every widget and drop pending work.
    pub fn dispose(&mut self) {
        for widget in &mut self.widgets {
            widget.dispose();
        }
        self.resize.cancel();
        self.frame.take();
        self.disposed = true;
    }
}
