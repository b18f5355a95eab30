use embedchat_webview::ExternalOpener;

/// Opens intercepted links in the system browser.
pub struct SystemBrowser;

impl ExternalOpener for SystemBrowser {
    fn open(&self, url: &str) {
        tracing::info!(url, "Opening link in system browser");
        if let Err(e) = webbrowser::open(url) {
            tracing::warn!(url, "Failed to open browser: {e}");
        }
    }
}
