//! `wry` adapter: builds the chat webview and off-screen print webviews.
//!
//! wry has no load-error or certificate-error callback, so hosts on this
//! adapter never see [`ChatSession::on_load_error`] fire from the browser.
//! It also cannot save page state, so reattaching always reloads.

use std::sync::Arc;

use embedchat_common::SessionError;
use tracing::debug;
use wry::dpi::{PhysicalPosition, PhysicalSize};
use wry::raw_window_handle::HasWindowHandle;
use wry::{PageLoadEvent, Rect, WebView, WebViewBuilder};

use crate::control::ControlMessage;
use crate::ipc::BRIDGE_INIT_SCRIPT;
use crate::navigation::NavigationDecision;
use crate::print::{PrintSurface, PrintSurfaceFactory};
use crate::session::ChatSession;
use crate::surface::ChatSurface;

/// Browser settings for the chat webview.
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    pub transparent: bool,
    /// Always on in debug builds.
    pub devtools: bool,
    pub user_agent: Option<String>,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: Some(format!("EmbedChat/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

fn surface_error(e: wry::Error) -> SessionError {
    SessionError::Surface(e.to_string())
}

/// Bounds covering a `width` x `height` parent from its origin.
pub fn full_bounds(width: u32, height: u32) -> Rect {
    Rect {
        position: PhysicalPosition::new(0, 0).into(),
        size: PhysicalSize::new(width, height).into(),
    }
}

// =============================================================================
// CHAT SURFACE
// =============================================================================

pub struct WrySurface {
    webview: WebView,
}

impl WrySurface {
    pub fn inner(&self) -> &WebView {
        &self.webview
    }
}

impl ChatSurface for WrySurface {
    fn load_url(&mut self, url: &str) -> Result<(), SessionError> {
        self.webview.load_url(url).map_err(surface_error)
    }

    fn evaluate_script(&self, script: &str) -> Result<(), SessionError> {
        self.webview.evaluate_script(script).map_err(surface_error)
    }

    fn set_size(&self, width: u32, height: u32) -> Result<(), SessionError> {
        self.webview
            .set_bounds(full_bounds(width, height))
            .map_err(surface_error)
    }
}

/// Create the chat webview as a child of `window`, wired to `session`.
///
/// Nothing is loaded yet; pass the result to [`ChatSession::attach`].
pub fn build_chat_webview<W: HasWindowHandle>(
    session: &ChatSession,
    window: &W,
    bounds: Rect,
    options: &SurfaceOptions,
) -> Result<WrySurface, SessionError> {
    let mut builder = WebViewBuilder::new()
        .with_bounds(bounds)
        .with_transparent(options.transparent)
        .with_devtools(options.devtools)
        .with_initialization_script(BRIDGE_INIT_SCRIPT);

    if let Some(ua) = &options.user_agent {
        builder = builder.with_user_agent(ua);
    }

    // JS -> Rust bridge calls
    let bridge = session.bridge();
    builder = builder.with_ipc_handler(move |request| {
        bridge.handle_message(request.body());
    });

    let queue = session.queue().clone();
    builder = builder.with_on_page_load_handler(move |event, url| {
        match event {
            PageLoadEvent::Started => debug!(url = %url, "page load started"),
            PageLoadEvent::Finished => queue.post(ControlMessage::PageFinished { url }),
        }
    });

    let policy = session.navigation_policy().clone();
    builder = builder.with_navigation_handler(move |url| {
        policy.decide(&url) == NavigationDecision::Allow
    });

    // Popups never open a second webview.
    let policy = session.navigation_policy().clone();
    builder = builder.with_new_window_req_handler(move |url| {
        if policy.decide(&url) == NavigationDecision::Allow {
            debug!(url = %url, "popup to chat origin ignored");
        }
        false
    });

    let webview = builder.build_as_child(window).map_err(surface_error)?;
    debug!("chat webview created");
    Ok(WrySurface { webview })
}

// =============================================================================
// PRINT SURFACES
// =============================================================================

struct WryPrintSurface {
    webview: WebView,
}

impl PrintSurface for WryPrintSurface {
    fn print(&self) -> Result<(), SessionError> {
        self.webview.print().map_err(surface_error)
    }
}

/// Builds hidden child webviews of `window` for print jobs.
pub struct WryPrintSurfaces<W> {
    window: Arc<W>,
}

impl<W> WryPrintSurfaces<W> {
    pub fn new(window: Arc<W>) -> Self {
        Self { window }
    }
}

impl<W: HasWindowHandle> PrintSurfaceFactory for WryPrintSurfaces<W> {
    fn create(
        &self,
        url: &str,
        data: &str,
        on_ready: Box<dyn Fn() + Send + Sync>,
    ) -> Result<Box<dyn PrintSurface>, SessionError> {
        let webview = WebViewBuilder::new()
            .with_visible(false)
            .with_html(with_base_url(url, data))
            .with_on_page_load_handler(move |event, _| {
                if matches!(event, PageLoadEvent::Finished) {
                    on_ready();
                }
            })
            .build_as_child(self.window.as_ref())
            .map_err(surface_error)?;
        Ok(Box::new(WryPrintSurface { webview }))
    }
}

/// Prefix `html` with a `<base>` element so relative links resolve
/// against `url`.
fn with_base_url(url: &str, html: &str) -> String {
    if url.is_empty() {
        return html.to_string();
    }
    let escaped = url
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!("<base href=\"{escaped}\">{html}")
}
