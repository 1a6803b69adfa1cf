use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use webconsole::command::{WebConsole, WebConsoleOptions};
use webconsole::error::WebConsoleError;
use webconsole::session::Session;

fn options(worksheet: String) -> WebConsoleOptions {
    WebConsoleOptions {
        worksheet,
        ..Default::default()
    }
}

fn worksheet_path(dir: &TempDir) -> String {
    dir.path()
        .join("test.worksheet")
        .to_string_lossy()
        .into_owned()
}

/// Launcher that records every URL it is asked to open.
fn recording_launcher() -> (webconsole::command::BrowserLauncher, Arc<Mutex<Vec<String>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let seen = calls.clone();
    let launcher = Box::new(move |url: &str| {
        seen.lock().unwrap().push(url.to_string());
    });
    (launcher, calls)
}

/// Diagnostic sink that records every line that would go to stderr.
fn recording_sink() -> (webconsole::command::DiagnosticSink, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let seen = lines.clone();
    let sink = Box::new(move |line: &str| {
        seen.lock().unwrap().push(line.to_string());
    });
    (sink, lines)
}

mod construction {
    use super::*;

    #[test]
    fn missing_worksheet_is_a_config_error() {
        let err = WebConsole::new(options(String::new()), Session::new()).unwrap_err();
        assert!(matches!(err, WebConsoleError::Config(_)));
    }

    #[test]
    fn opens_the_worksheet_append_mode() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = worksheet_path(&dir);
        std::fs::write(&path, "existing content\n").expect("Failed to seed worksheet");

        let command =
            WebConsole::new(options(path.clone()), Session::new()).expect("Failed to construct");

        // Construction must not truncate a pre-existing worksheet.
        let bytes = std::fs::read_to_string(&path).expect("Failed to read worksheet");
        assert_eq!(bytes, "existing content\n");
        assert_eq!(command.worksheet().path().to_string_lossy(), path);
    }

    #[test]
    fn unopenable_worksheet_propagates_as_io_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        // A directory cannot be opened as an append-mode file.
        let err = WebConsole::new(
            options(dir.path().to_string_lossy().into_owned()),
            Session::new(),
        )
        .unwrap_err();
        assert!(matches!(err, WebConsoleError::Io(_)));
    }
}

mod post_activation {
    use super::*;

    fn bound(port: u16) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port)
    }

    #[test]
    fn resolves_the_port_and_opens_the_browser_once() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (launcher, calls) = recording_launcher();
        let (sink, lines) = recording_sink();
        let mut command = WebConsole::new(options(worksheet_path(&dir)), Session::new())
            .expect("Failed to construct")
            .with_launcher(launcher)
            .with_diagnostics(sink);

        assert_eq!(command.port(), 0);
        command.post_activate(bound(41234));

        assert_eq!(command.port(), 41234);
        let calls = calls.lock().unwrap();
        assert_eq!(calls.as_slice(), ["http://localhost:41234"]);
        // No diagnostic line when the browser is launched.
        assert!(lines.lock().unwrap().is_empty());
    }

    #[test]
    fn no_browser_suppresses_the_launcher_and_reports_the_url() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (launcher, calls) = recording_launcher();
        let (sink, lines) = recording_sink();
        let mut command = WebConsole::new(
            WebConsoleOptions {
                worksheet: worksheet_path(&dir),
                no_browser: true,
                ..Default::default()
            },
            Session::new(),
        )
        .expect("Failed to construct")
        .with_launcher(launcher)
        .with_diagnostics(sink);

        command.post_activate(bound(41234));

        assert_eq!(command.port(), 41234);
        assert!(calls.lock().unwrap().is_empty());

        // Exactly one diagnostic line, carrying the resolved URL.
        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Server running at http://localhost:41234"));
    }

    #[test]
    fn uses_the_configured_host_in_the_url() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (launcher, calls) = recording_launcher();
        let mut command = WebConsole::new(
            WebConsoleOptions {
                worksheet: worksheet_path(&dir),
                host: "127.0.0.1".to_string(),
                ..Default::default()
            },
            Session::new(),
        )
        .expect("Failed to construct")
        .with_launcher(launcher);

        command.post_activate(bound(8080));

        assert_eq!(
            calls.lock().unwrap().as_slice(),
            ["http://127.0.0.1:8080"]
        );
    }
}
