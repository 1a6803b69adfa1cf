use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webconsole::command::{WebConsole, WebConsoleOptions};
use webconsole::session::Session;

#[derive(Parser)]
#[command(name = "webconsole")]
#[command(about = "Launch the web-based memory forensics console")]
struct Cli {
    /// The worksheet file name to use.
    worksheet: String,

    /// Host for the web console to use.
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Port for the web console to use (0 picks an OS-assigned port).
    #[arg(long, default_value_t = 0)]
    port: u16,

    /// Start in debug mode (serves frontend assets from the source tree
    /// and raises the log level).
    #[arg(long)]
    debug: bool,

    /// Don't open the web console in the default browser.
    #[arg(long, alias = "no_browser")]
    no_browser: bool,
}

/// Initialize tracing; `--debug` lowers the default filter to debug.
fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "webconsole=debug,tower_http=debug"
    } else {
        "webconsole=info"
    };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    // The session is constructed by the enclosing analysis environment and
    // passed through to the console unmodified.
    let session = Session::new();

    let command = WebConsole::new(
        WebConsoleOptions {
            worksheet: cli.worksheet,
            host: cli.host,
            port: cli.port,
            debug: cli.debug,
            no_browser: cli.no_browser,
        },
        session,
    )?;

    command.render().await
}
