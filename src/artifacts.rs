//! Local artifact cache boundary
//!
//! The platform artifacts (the downloaded application-platform builds a
//! session host loads before tests can run) are managed by external
//! tooling; the runner only needs to resolve a version to its install
//! folder and keep the last-used bookkeeping current. This module is
//! that boundary and nothing more: no downloads, no enumeration.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

/// Country segment naming the platform (country-neutral) artifact
pub const PLATFORM_IDENTIFIER: &str = "platform";

/// Marker file recording when an artifact folder was last used
const LAST_USED_FILE: &str = "lastused";

/// A locally cached artifact, addressed by version and country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformArtifact {
    cache_root: PathBuf,
    version: String,
    country: String,
}

impl PlatformArtifact {
    pub fn new(
        cache_root: impl Into<PathBuf>,
        version: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            cache_root: cache_root.into(),
            version: version.into(),
            country: country.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Whether this is the country-neutral platform artifact
    pub fn is_platform(&self) -> bool {
        self.country.eq_ignore_ascii_case(PLATFORM_IDENTIFIER)
    }

    /// The platform artifact for the same version
    pub fn to_platform(&self) -> Self {
        if self.is_platform() {
            return self.clone();
        }
        Self::new(
            self.cache_root.clone(),
            self.version.clone(),
            PLATFORM_IDENTIFIER,
        )
    }

    /// Install folder of this artifact inside the cache
    pub fn local_folder(&self) -> PathBuf {
        self.cache_root.join(&self.version).join(&self.country)
    }

    /// When the artifact was last used, `None` if never recorded or the
    /// folder does not exist
    pub fn last_used(&self) -> Option<DateTime<Utc>> {
        let marker = self.local_folder().join(LAST_USED_FILE);
        let content = std::fs::read_to_string(marker).ok()?;
        DateTime::parse_from_rfc3339(content.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Record a use of the artifact, returning whether the marker was
    /// written. Fails quietly when the install folder is missing.
    pub fn touch_last_used(&self, at: Option<DateTime<Utc>>) -> bool {
        let folder = self.local_folder();
        if !folder.is_dir() {
            return false;
        }
        let stamp = at
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        std::fs::write(folder.join(LAST_USED_FILE), stamp).is_ok()
    }
}

impl std::fmt::Display for PlatformArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.version, self.country)
    }
}

/// Resolve a cached artifact by version, `None` if not downloaded
pub fn resolve(cache_root: &Path, version: &str, country: &str) -> Option<PlatformArtifact> {
    let artifact = PlatformArtifact::new(cache_root, version, country);
    artifact.local_folder().is_dir().then_some(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_local_folder_layout() {
        let artifact = PlatformArtifact::new("/cache", "24.0.16410.18056", "w1");
        assert_eq!(
            artifact.local_folder(),
            PathBuf::from("/cache/24.0.16410.18056/w1")
        );
    }

    #[test]
    fn test_last_used_round_trip() {
        let root = tempfile::tempdir().unwrap();
        let artifact = PlatformArtifact::new(root.path(), "24.0", "w1");
        std::fs::create_dir_all(artifact.local_folder()).unwrap();

        assert_eq!(artifact.last_used(), None);

        let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert!(artifact.touch_last_used(Some(stamp)));
        assert_eq!(artifact.last_used(), Some(stamp));
    }

    #[test]
    fn test_touch_without_folder_fails_quietly() {
        let root = tempfile::tempdir().unwrap();
        let artifact = PlatformArtifact::new(root.path(), "24.0", "w1");
        assert!(!artifact.touch_last_used(None));
        assert_eq!(artifact.last_used(), None);
    }

    #[test]
    fn test_resolve_requires_folder() {
        let root = tempfile::tempdir().unwrap();
        assert!(resolve(root.path(), "24.0", "w1").is_none());

        let artifact = PlatformArtifact::new(root.path(), "24.0", "w1");
        std::fs::create_dir_all(artifact.local_folder()).unwrap();
        assert_eq!(resolve(root.path(), "24.0", "w1"), Some(artifact));
    }

    #[test]
    fn test_to_platform() {
        let artifact = PlatformArtifact::new("/cache", "24.0", "us");
        let platform = artifact.to_platform();
        assert!(platform.is_platform());
        assert_eq!(platform.version(), "24.0");
        assert_eq!(platform.to_platform(), platform);
    }
}
