use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Downloadable outputs. Each is a plain-text file named with a local timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    EnhancedResume,
    CoverLetter,
}

impl ArtifactKind {
    pub fn file_prefix(self) -> &'static str {
        match self {
            ArtifactKind::EnhancedResume => "enhanced_resume",
            ArtifactKind::CoverLetter => "cover_letter",
        }
    }

    /// `<prefix>_<YYYYMMDD_HHMMSS>.txt`
    pub fn file_name<Tz: TimeZone>(self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        format!("{}_{}.txt", self.file_prefix(), at.format("%Y%m%d_%H%M%S"))
    }

    pub fn file_name_now(self) -> String {
        self.file_name(&Local::now())
    }
}

/// A generated document ready to display or download.
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub content: String,
    pub degraded: bool,
}
