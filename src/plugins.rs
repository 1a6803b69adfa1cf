//! Notebook plugin descriptors.
//!
//! Plugins themselves are frontend units: each one implements a cell content
//! type (plain text, markdown, forensics-command execution) rendered in the
//! web console. The server only needs to know which content types exist and
//! which scripts each plugin contributes to the bootstrap page, so this
//! module carries descriptors, not implementations.

/// Static description of one notebook plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Cell content type this plugin handles, if it handles one at all.
    /// Must be unique across a configured plugin set.
    pub content_type: Option<&'static str>,
    /// Logical frontend module name registered on the page.
    pub frontend_module: &'static str,
    /// Scripts the bootstrap page must load for this plugin.
    pub js_files: &'static [&'static str],
}

/// Plain text cells.
pub fn plain_text() -> PluginDescriptor {
    PluginDescriptor {
        content_type: Some("plaintext"),
        frontend_module: "manuskript.plainText",
        js_files: &[],
    }
}

/// Markdown cells.
pub fn markdown() -> PluginDescriptor {
    PluginDescriptor {
        content_type: Some("markdown"),
        frontend_module: "manuskript.markdown",
        js_files: &[],
    }
}

/// Cells that evaluate an analysis expression against the live session.
pub fn session_call() -> PluginDescriptor {
    PluginDescriptor {
        content_type: Some("sessioncall"),
        frontend_module: "rekall.sessioncall",
        js_files: &[],
    }
}

/// Cells that run a named forensics plugin and render its output.
pub fn run_plugin() -> PluginDescriptor {
    PluginDescriptor {
        content_type: Some("runplugin"),
        frontend_module: "rekall.runplugin",
        js_files: &[],
    }
}

/// The local console plugin. Carries no cell type; it only contributes the
/// prebuilt frontend bundle served from the static blueprint.
pub fn web_console() -> PluginDescriptor {
    PluginDescriptor {
        content_type: None,
        frontend_module: "rekall.webconsole",
        js_files: &["/rekall-webconsole/webconsole.js"],
    }
}

/// The fixed plugin set the `webconsole` command assembles the app with.
pub fn default_set() -> Vec<PluginDescriptor> {
    vec![
        plain_text(),
        markdown(),
        session_call(),
        run_plugin(),
        web_console(),
    ]
}
