//! RON catalog loader
//!
//! Loads the engineering catalog from an external RON file, with fallback to
//! the built-in defaults.

use std::fs;
use std::path::Path;

use super::catalog::Catalog;
use super::defaults::default_catalog;

/// File name of the catalog inside the data directory
pub const CATALOG_FILE: &str = "catalog.ron";

impl Catalog {
    /// Load `catalog.ron` from `data_dir`, falling back to defaults if the
    /// file is missing or unreadable
    pub fn load_or_default(data_dir: &Path) -> Self {
        let path = data_dir.join(CATALOG_FILE);
        if !path.exists() {
            log::info!("No catalog at {}, using built-in defaults", path.display());
            return default_catalog();
        }

        match Self::load_from(data_dir) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!("{}. Using built-in defaults.", e);
                default_catalog()
            }
        }
    }

    /// Load `catalog.ron` from `data_dir`
    pub fn load_from(data_dir: &Path) -> Result<Self, String> {
        let path = data_dir.join(CATALOG_FILE);
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let catalog: Catalog = ron::from_str(&content)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

        for problem in catalog.validate() {
            log::warn!("Catalog {}: {}", path.display(), problem);
        }

        log::info!(
            "Loaded catalog: {} templates, {} effects, {} items",
            catalog.templates.len(),
            catalog.effects.len(),
            catalog.items.len()
        );
        Ok(catalog)
    }
}

/// Export the built-in catalog to `data_dir/catalog.ron` for editing
pub fn export_default_catalog(data_dir: &Path) -> Result<(), String> {
    if !data_dir.exists() {
        fs::create_dir_all(data_dir)
            .map_err(|e| format!("Failed to create {}: {}", data_dir.display(), e))?;
    }

    let catalog = default_catalog();
    let catalog_ron = ron::ser::to_string_pretty(&catalog, ron::ser::PrettyConfig::default())
        .map_err(|e| format!("Failed to serialize catalog: {}", e))?;
    fs::write(data_dir.join(CATALOG_FILE), catalog_ron)
        .map_err(|e| format!("Failed to write {}: {}", CATALOG_FILE, e))?;

    log::info!("Exported default catalog to {}", data_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("workbench-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_export_then_load() {
        let dir = scratch_dir("export");
        let result = export_default_catalog(&dir);
        assert!(result.is_ok(), "Failed to export catalog: {:?}", result.err());
        assert!(dir.join(CATALOG_FILE).exists(), "catalog.ron not created");

        let loaded = Catalog::load_from(&dir).unwrap();
        assert_eq!(loaded, default_catalog());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = scratch_dir("missing");
        assert_eq!(Catalog::load_or_default(&dir), default_catalog());
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = scratch_dir("broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CATALOG_FILE), "not ron at all (").unwrap();

        assert!(Catalog::load_from(&dir).is_err());
        assert_eq!(Catalog::load_or_default(&dir), default_catalog());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_duplicate_attribute_in_file_falls_back() {
        let dir = scratch_dir("duplicate");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CATALOG_FILE), r#"(
            templates: [],
            effects: [],
            classes: [(id: "weapon", templates: [])],
            items: [(
                id: "pulse_laser",
                class: "weapon",
                base_attributes: [("damage", 10.0), ("range", 500.0), ("range", 600.0)],
            )],
        )"#).unwrap();

        let err = Catalog::load_from(&dir).unwrap_err();
        assert!(err.contains("duplicate attribute 'range'"), "{}", err);
        assert_eq!(Catalog::load_or_default(&dir), default_catalog());

        let _ = fs::remove_dir_all(&dir);
    }
}
