use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::Serialize;

/// Application-level constants
pub const APP_NAME: &str = "Pemakluman";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Institutional file code embedded between the meeting and case numbers of
/// every Reference Number: `(1)MBSP/15/1551/(36)2026`.
pub const DEFAULT_INSTITUTION_CODE: &str = "MBSP/15/1551/";

/// Meeting number and date always sit in the agenda heading.
pub const DEFAULT_SCAN_LINES: usize = 20;

pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 8501);
pub const DEFAULT_MAX_UPLOAD_MB: usize = 20;
const BYTES_PER_MB: usize = 1024 * 1024;

/// Filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "pemakluman_lib=info,pemakluman=info"
}

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Letter rendering settings.
#[derive(Debug, Clone, Serialize)]
pub struct LetterConfig {
    pub institution_code: String,
    /// DOCX template with `{{PLACEHOLDER}}` markers. `None` renders from a blank canvas.
    pub template_path: Option<PathBuf>,
}

impl Default for LetterConfig {
    fn default() -> Self {
        Self {
            institution_code: DEFAULT_INSTITUTION_CODE.into(),
            template_path: None,
        }
    }
}

/// Agenda parsing settings.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    /// Leading lines searched for the meeting identifier and date.
    pub scan_lines: usize,
    /// Diagnostic dump directory. `None` disables dumping.
    pub dump_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scan_lines: DEFAULT_SCAN_LINES,
            dump_dir: None,
        }
    }
}

/// HTTP upload surface settings.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * BYTES_PER_MB,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AppConfig {
    pub letter: LetterConfig,
    pub pipeline: PipelineConfig,
    pub server: ServerConfig,
}

// ═══════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════

impl AppConfig {
    /// Read `PEMAKLUMAN_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key → value source.
    ///
    /// Unparseable values keep their default and log a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("PEMAKLUMAN_BIND") {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => config.server.bind_addr = addr,
                Err(e) => tracing::warn!(value = %raw, error = %e, "Ignoring invalid PEMAKLUMAN_BIND"),
            }
        }

        if let Some(raw) = lookup("PEMAKLUMAN_MAX_UPLOAD_MB") {
            let bytes = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|mb| *mb > 0)
                .and_then(|mb| mb.checked_mul(BYTES_PER_MB));
            match bytes {
                Some(bytes) => config.server.max_upload_bytes = bytes,
                None => tracing::warn!(value = %raw, "Ignoring invalid PEMAKLUMAN_MAX_UPLOAD_MB"),
            }
        }

        if let Some(raw) = lookup("PEMAKLUMAN_REF_CODE") {
            let code = raw.trim();
            if code.is_empty() {
                tracing::warn!("Ignoring empty PEMAKLUMAN_REF_CODE");
            } else {
                config.letter.institution_code = code.to_string();
            }
        }

        if let Some(raw) = lookup("PEMAKLUMAN_TEMPLATE") {
            if !raw.trim().is_empty() {
                config.letter.template_path = Some(PathBuf::from(raw.trim()));
            }
        }

        if let Some(raw) = lookup("PEMAKLUMAN_SCAN_LINES") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.pipeline.scan_lines = n,
                _ => tracing::warn!(value = %raw, "Ignoring invalid PEMAKLUMAN_SCAN_LINES"),
            }
        }

        if let Some(raw) = lookup("PEMAKLUMAN_DUMP_DIR") {
            if !raw.trim().is_empty() {
                config.pipeline.dump_dir = Some(PathBuf::from(raw.trim()));
            }
        }

        config
    }
}
