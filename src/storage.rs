use crate::error::StoreError;
use crate::models::{CommunityRecord, LoadStatus, MissingFilePolicy};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE: &str = "communities.json";

/// JSON-file backed list of communities. The whole list is rewritten on every save.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    missing: MissingFilePolicy,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>, missing: MissingFilePolicy) -> Self {
        Store { path: path.into(), missing }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Same missing-file policy, different backing file.
    pub fn with_path(&self, path: impl Into<PathBuf>) -> Self {
        Store { path: path.into(), missing: self.missing }
    }

    /// Never fails: a missing file follows the missing-file policy, anything
    /// unreadable falls back to the seed list.
    pub fn load(&self) -> Vec<CommunityRecord> {
        self.load_with_status().0
    }

    pub fn load_with_status(&self) -> (Vec<CommunityRecord>, LoadStatus) {
        match self.read() {
            Ok(records) => {
                info!("loaded {} communities from {}", records.len(), self.path.display());
                (records, LoadStatus::Loaded)
            }
            Err(e) if e.is_not_found() => {
                let records = match self.missing {
                    MissingFilePolicy::Seed => seed_communities(),
                    MissingFilePolicy::Empty => Vec::new(),
                };
                info!(
                    "{} does not exist yet, starting with {} communities",
                    self.path.display(),
                    records.len()
                );
                (records, LoadStatus::Missing)
            }
            Err(e) => {
                warn!("{}; falling back to sample communities", e);
                (seed_communities(), LoadStatus::Recovered(e.to_string()))
            }
        }
    }

    pub fn read(&self) -> Result<Vec<CommunityRecord>, StoreError> {
        let s = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&s).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, records: &[CommunityRecord]) -> Result<(), StoreError> {
        let s = serde_json::to_string_pretty(records).map_err(StoreError::Serialize)?;
        let io_err = |source: std::io::Error| StoreError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, s).map_err(io_err)?;
        debug!("wrote {} communities to {}", records.len(), self.path.display());
        Ok(())
    }
}

pub fn seed_communities() -> Vec<CommunityRecord> {
    fn rec(name: &str, location: &str, description: &str, offers: &[&str], needs: &[&str]) -> CommunityRecord {
        CommunityRecord {
            name: name.to_string(),
            location: location.to_string(),
            description: description.to_string(),
            offers: offers.iter().map(|s| s.to_string()).collect(),
            needs: needs.iter().map(|s| s.to_string()).collect(),
        }
    }

    vec![
        rec(
            "Green Meadows Collective",
            "Oregon, USA",
            "A permaculture community cultivating organic produce and hosting learning events.",
            &["Organic vegetables", "Permaculture workshops", "Farm stays"],
            &["Seeds", "Volunteer builders", "Gardening tools"],
        ),
        rec(
            "Sunrise Ecovillage",
            "New South Wales, Australia",
            "Off-grid community focused on renewable energy and holistic living.",
            &["Solar power expertise", "Community gatherings"],
            &["Permaculture experts", "Solar equipment"],
        ),
        rec(
            "Riverstone Homestead",
            "British Columbia, Canada",
            "Family-run homestead sharing knowledge on natural building and herbal medicine.",
            &["Herbal tinctures", "Natural building courses"],
            &["Apprentices", "Building materials"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_policy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("communities.json");

        let (records, status) = Store::new(&path, MissingFilePolicy::Seed).load_with_status();
        assert_eq!(records, seed_communities());
        assert_eq!(status, LoadStatus::Missing);

        let records = Store::new(&path, MissingFilePolicy::Empty).load();
        assert!(records.is_empty());
        assert!(!path.exists(), "load must not create the file");
    }

    #[test]
    fn malformed_file_recovers_with_seed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("communities.json");
        fs::write(&path, "[{\"name\": \"half").unwrap();

        let store = Store::new(&path, MissingFilePolicy::Empty);
        assert!(matches!(store.read(), Err(StoreError::Parse { .. })));

        let (records, status) = store.load_with_status();
        assert_eq!(records, seed_communities());
        assert!(matches!(status, LoadStatus::Recovered(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[{\"name\": \"half");
    }

    #[test]
    fn legacy_seeks_key_is_read_as_needs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("communities.json");
        fs::write(
            &path,
            r#"[{"name":"Hill Farm","location":"Wales","description":"","offers":["Wool"],"seeks":["Shears"]}]"#,
        )
        .unwrap();

        let records = Store::new(&path, MissingFilePolicy::Seed).load();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].needs, vec!["Shears".to_string()]);
    }

    #[test]
    fn save_writes_canonical_indented_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("communities.json");
        let store = Store::new(&path, MissingFilePolicy::Seed);

        store.save(&seed_communities()[..1]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {\n    \"name\": \"Green Meadows Collective\""));
        assert!(text.contains("\"needs\""));
        assert!(!text.contains("\"seeks\""));
        let name = text.find("\"name\"").unwrap();
        let location = text.find("\"location\"").unwrap();
        let description = text.find("\"description\"").unwrap();
        let offers = text.find("\"offers\"").unwrap();
        let needs = text.find("\"needs\"").unwrap();
        assert!(name < location && location < description && description < offers && offers < needs);
    }

    #[test]
    fn save_into_directory_path_is_an_io_error() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path(), MissingFilePolicy::Seed);
        assert!(matches!(store.save(&seed_communities()), Err(StoreError::Io { .. })));
    }
}
