//! Forensics analysis sessions passed through to the web console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An externally-constructed memory analysis session.
///
/// The console never mutates the session. It is injected into the app
/// configuration at assembly time and surfaced to plugins and the
/// `/session` endpoint as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    /// Path to the memory image under analysis, if one is attached.
    pub image_path: Option<String>,
    /// Detected profile name (e.g., "Win10x64_19041").
    pub profile: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// A fresh session with no memory image attached yet.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            image_path: None,
            profile: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_image(image_path: impl Into<String>) -> Self {
        Self {
            image_path: Some(image_path.into()),
            ..Self::new()
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
