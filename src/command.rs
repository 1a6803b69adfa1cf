//! The `webconsole` command object.
//!
//! Owns the launch configuration and the append-mode worksheet handle for
//! its lifetime, assembles the web application, and runs the server loop.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::console::{self, AppConfig};
use crate::error::WebConsoleError;
use crate::plugins;
use crate::server;
use crate::session::Session;
use crate::worksheet::Worksheet;

/// Launch options, mirroring the CLI surface.
#[derive(Debug, Clone)]
pub struct WebConsoleOptions {
    /// Path to the worksheet file. Required; opened append-mode.
    pub worksheet: String,
    pub host: String,
    /// 0 asks the OS for an ephemeral port.
    pub port: u16,
    pub debug: bool,
    pub no_browser: bool,
}

impl Default for WebConsoleOptions {
    fn default() -> Self {
        Self {
            worksheet: String::new(),
            host: "localhost".to_string(),
            port: 0,
            debug: false,
            no_browser: false,
        }
    }
}

/// Side effect that opens a URL in the user's browser. Injectable so tests
/// can count invocations instead of spawning a real browser.
pub type BrowserLauncher = Box<dyn FnMut(&str) + Send>;

/// Sink for the suppressed-browser diagnostic line. Defaults to stderr;
/// injectable so tests can capture the line.
pub type DiagnosticSink = Box<dyn FnMut(&str) + Send>;

fn default_launcher(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!("Failed to open browser at {}: {}", url, e);
    }
}

/// The web console command.
///
/// Construction validates configuration and acquires the worksheet handle;
/// [`WebConsole::render`] assembles the app and blocks on the server loop.
pub struct WebConsole {
    host: String,
    port: u16,
    debug: bool,
    no_browser: bool,
    worksheet: Worksheet,
    session: Arc<Session>,
    launcher: BrowserLauncher,
    diagnostics: DiagnosticSink,
}

impl std::fmt::Debug for WebConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebConsole")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("debug", &self.debug)
            .field("no_browser", &self.no_browser)
            .finish_non_exhaustive()
    }
}

impl WebConsole {
    /// Validate options, open the worksheet append-mode, and bind the
    /// session. A missing worksheet name fails here, before any file or
    /// socket is touched; a worksheet that cannot be opened propagates as
    /// an I/O error.
    pub fn new(options: WebConsoleOptions, session: Session) -> Result<Self, WebConsoleError> {
        if options.worksheet.is_empty() {
            return Err(WebConsoleError::Config(
                "a worksheet file name must be provided; it is used to save the worksheet"
                    .to_string(),
            ));
        }
        let worksheet = Worksheet::open(&options.worksheet)?;

        Ok(Self {
            host: options.host,
            port: options.port,
            debug: options.debug,
            no_browser: options.no_browser,
            worksheet,
            session: Arc::new(session),
            launcher: Box::new(default_launcher),
            diagnostics: Box::new(|line: &str| eprintln!("{line}")),
        })
    }

    /// Replace the browser-launch side effect.
    pub fn with_launcher(mut self, launcher: BrowserLauncher) -> Self {
        self.launcher = launcher;
        self
    }

    /// Replace the diagnostic sink.
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticSink) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The bind port: as requested until the server is up, resolved after.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn worksheet(&self) -> &Worksheet {
        &self.worksheet
    }

    /// Post-activation hook, invoked exactly once with the bound address.
    ///
    /// Records the resolved port (the OS picks one when 0 was requested),
    /// then either opens the browser at the console URL or, with
    /// `no_browser` set, writes the URL to stderr instead.
    pub fn post_activate(&mut self, addr: SocketAddr) {
        self.port = addr.port();
        let url = format!("http://{}:{}", self.host, self.port);
        if self.no_browser {
            (self.diagnostics)(&format!(
                "Suppressing web browser (--no-browser flag). Server running at {url}"
            ));
        } else {
            (self.launcher)(&url);
        }
    }

    /// Assemble the app and run the server loop. Blocks until the process
    /// is interrupted (Ctrl-c).
    pub async fn render(mut self) -> anyhow::Result<()> {
        println!("Starting the web console.");
        println!("Press Ctrl-c to return to the interactive shell.");

        let app = console::create_app(
            plugins::default_set(),
            AppConfig {
                session: self.session.clone(),
                worksheet: self.worksheet.clone(),
            },
            console::static_asset_dir(self.debug),
        )?;

        let host = self.host.clone();
        let port = self.port;
        server::serve(app, &host, port, |addr| self.post_activate(addr)).await
    }
}
