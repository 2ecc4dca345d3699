//! Pipeline diagnostic dump: writes each parsing stage's output to disk.
//!
//! Disabled unless a dump directory is configured (`PEMAKLUMAN_DUMP_DIR`).
//! Each run gets its own directory:
//!
//! ```text
//! {dump_dir}/{run_id}/
//!   01-lines.json
//!   02-meeting.json
//!   03-cases.json
//!   04-fields.json
//! ```
//!
//! Failures are logged and swallowed. A dump never breaks a run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

/// Parsing stages whose output can be dumped, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpStage {
    Lines,
    Meeting,
    Cases,
    Fields,
}

impl DumpStage {
    pub const ALL: [DumpStage; 4] = [Self::Lines, Self::Meeting, Self::Cases, Self::Fields];

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Lines => "01-lines.json",
            Self::Meeting => "02-meeting.json",
            Self::Cases => "03-cases.json",
            Self::Fields => "04-fields.json",
        }
    }
}

/// Dump target for one processing run. Inert when dumping is off or the
/// run directory could not be created.
#[derive(Debug)]
pub struct RunDump {
    dir: Option<PathBuf>,
}

impl RunDump {
    pub fn open(base: Option<&Path>, run_id: &Uuid) -> Self {
        let dir = base.map(|base| base.join(run_id.to_string())).and_then(|dir| {
            match std::fs::create_dir_all(&dir) {
                Ok(()) => Some(dir),
                Err(e) => {
                    tracing::warn!(
                        path = %dir.display(),
                        error = %e,
                        "Diagnostic dump: failed to create run directory"
                    );
                    None
                }
            }
        });
        Self { dir }
    }

    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Write one stage's output as pretty JSON. No-op when disabled.
    pub fn stage<T: Serialize + ?Sized>(&self, stage: DumpStage, value: &T) {
        let Some(dir) = &self.dir else {
            return;
        };
        let path = dir.join(stage.file_name());

        let written = serde_json::to_vec_pretty(value)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                std::fs::write(&path, &json)
                    .map(|()| json.len())
                    .map_err(|e| e.to_string())
            });

        match written {
            Ok(size) => tracing::debug!(stage = ?stage, path = %path.display(), size, "Diagnostic dump written"),
            Err(error) => tracing::warn!(stage = ?stage, path = %path.display(), %error, "Diagnostic dump failed"),
        }
    }
}
