//! Asset loading with embedded fallbacks
//!
//! Illustrations and the config file follow the same rules:
//!
//! - If an env var is NOT set: use embedded assets only (no filesystem access)
//! - If an env var IS set and path is empty/missing: seed with embedded assets, then use filesystem
//! - If an env var IS set and path has files: use filesystem with embedded fallback

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Embedded story illustrations
#[derive(RustEmbed)]
#[folder = "illustrations/"]
#[include = "*.png"]
#[include = "*.jpg"]
#[include = "*.jpeg"]
#[include = "*.gif"]
#[include = "*.webp"]
#[include = "**/*.png"]
#[include = "**/*.jpg"]
#[include = "**/*.jpeg"]
#[include = "**/*.gif"]
#[include = "**/*.webp"]
struct EmbeddedIllustrations;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Report of seeding operations
#[derive(Debug, Default)]
pub struct SeedReport {
    pub illustrations_seeded: Vec<String>,
    pub config_seeded: bool,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.illustrations_seeded.is_empty() && !self.config_seeded
    }
}

/// Asset loader with merge behavior and optional filesystem override
pub struct AssetLoader {
    /// External illustrations directory (from ILLUSTRATIONS_DIR env var)
    illustrations_dir: Option<PathBuf>,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(illustrations_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            illustrations_dir,
            config_file,
        }
    }

    /// Create a loader from `ILLUSTRATIONS_DIR` and `CONFIG_FILE`.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("ILLUSTRATIONS_DIR").ok().map(PathBuf::from),
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
        )
    }

    /// Read an illustration by relative path
    ///
    /// Absolute paths and paths that climb out of the directory (`..`) are
    /// rejected with `InvalidInput`. If an external directory is configured
    /// it is tried first, then the embedded set.
    pub fn read_illustration(&self, relative_path: &Path) -> io::Result<Cow<'static, [u8]>> {
        if !is_contained(relative_path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Path escapes illustrations directory: {}", relative_path.display()),
            ));
        }

        if let Some(ref dir) = self.illustrations_dir {
            let full_path = dir.join(relative_path);
            if full_path.is_file() {
                tracing::trace!(path = %full_path.display(), "Loading illustration from filesystem");
                return Ok(Cow::Owned(fs::read(&full_path)?));
            }
        }

        let key = embedded_key(relative_path);
        EmbeddedIllustrations::get(&key)
            .map(|f| {
                tracing::trace!(path = %key, "Loading illustration from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Illustration not found: {key}"),
                )
            })
    }

    /// List all available illustrations (merged view of embedded + external)
    pub fn list_illustrations(&self) -> Vec<String> {
        let mut files: BTreeSet<String> = EmbeddedIllustrations::iter()
            .map(|s| s.to_string())
            .collect();

        if let Some(ref dir) = self.illustrations_dir {
            if let Ok(entries) = fs::read_dir(dir) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    let is_image = matches!(
                        path.extension().and_then(|e| e.to_str()),
                        Some("png" | "jpg" | "jpeg" | "gif" | "webp")
                    );
                    if is_image {
                        if let Some(name) = entry.file_name().to_str() {
                            files.insert(name.to_string());
                        }
                    }
                }
            }
        }

        files.into_iter().collect()
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Check if a directory exists and is empty (ignoring .gitkeep)
    fn is_empty_dir(path: &Path) -> bool {
        if !path.is_dir() {
            return false;
        }
        path.read_dir()
            .map(|mut entries| {
                entries.all(|e| {
                    e.map(|entry| entry.file_name() == ".gitkeep")
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false)
    }

    /// Seed empty/missing locations with embedded assets
    ///
    /// Only operates on paths that were configured (env var was set).
    pub fn seed_if_configured(&self) -> io::Result<SeedReport> {
        let mut report = SeedReport::default();

        if let Some(ref dir) = self.illustrations_dir {
            if !dir.exists() || Self::is_empty_dir(dir) {
                fs::create_dir_all(dir)?;
                for file in EmbeddedIllustrations::iter() {
                    if let Some(data) = EmbeddedIllustrations::get(&file) {
                        let path = dir.join(file.as_ref());
                        if let Some(parent) = path.parent() {
                            fs::create_dir_all(parent)?;
                        }
                        fs::write(&path, &*data.data)?;
                        report.illustrations_seeded.push(file.to_string());
                    }
                }
                if !report.illustrations_seeded.is_empty() {
                    tracing::info!(
                        dir = %dir.display(),
                        count = report.illustrations_seeded.len(),
                        "Seeded illustrations directory with embedded assets"
                    );
                }
            }
        }

        if let Some(ref path) = self.config_file {
            if !path.exists() {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                if let Some(data) = EmbeddedConfig::get("config.yaml") {
                    fs::write(path, &*data.data)?;
                    report.config_seeded = true;
                    tracing::info!(path = %path.display(), "Seeded config file with embedded default");
                }
            }
        }

        Ok(report)
    }
}

/// Whether `path` stays inside the directory it is joined onto.
fn is_contained(path: &Path) -> bool {
    let mut components = path.components().peekable();
    components.peek().is_some()
        && components.all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// rust-embed keys use forward slashes and no `./` prefix.
fn embedded_key(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
