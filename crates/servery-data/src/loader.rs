//! Menu loading: format detection (RON/JSON/TOML), file discovery,
//! deserialization and validation into a [`Menu`].

use crate::schema::MenuData;
use serde::de::DeserializeOwned;
use servery_core::menu::{Menu, MenuError};
use servery_core::money::f64_to_amount;
use std::path::{Path, PathBuf};
use tracing::debug;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a menu.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// No menu file was found in the given directory.
    #[error("no menu.ron, menu.toml or menu.json in {dir}")]
    MissingMenu { dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two menu files with different formats exist side by side.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A price is not a finite number.
    #[error("price for '{name}' in {file} is not a finite number")]
    InvalidPrice { file: PathBuf, name: String },

    /// The menu content is well-formed but not a valid menu.
    #[error("invalid menu in {file}: {source}")]
    Menu { file: PathBuf, source: MenuError },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Formats and discovery
// ===========================================================================

/// Menu file formats, in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Ron, Format::Toml, Format::Json];

    pub fn extension(self) -> &'static str {
        match self {
            Format::Ron => "ron",
            Format::Toml => "toml",
            Format::Json => "json",
        }
    }

    /// The format named by the extension of `path`.
    pub fn of(path: &Path) -> Result<Self, DataLoadError> {
        let ext = path.extension().and_then(|e| e.to_str());
        Self::ALL
            .into_iter()
            .find(|format| ext == Some(format.extension()))
            .ok_or_else(|| DataLoadError::UnsupportedFormat {
                file: path.to_path_buf(),
            })
    }
}

/// The one `menu.<ext>` file in `dir`.
fn menu_file_in(dir: &Path) -> Result<PathBuf, DataLoadError> {
    let mut present = Format::ALL
        .into_iter()
        .map(|format| dir.join(format!("menu.{}", format.extension())))
        .filter(|path| path.is_file());

    let first = present.next().ok_or_else(|| DataLoadError::MissingMenu {
        dir: dir.to_path_buf(),
    })?;
    match present.next() {
        Some(second) => Err(DataLoadError::ConflictingFormats { a: first, b: second }),
        None => Ok(first),
    }
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Read a file and deserialize it according to its format.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = Format::of(path)?;
    let content = std::fs::read_to_string(path)?;
    let parse_error = |detail: String| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    };

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
    }
}

// ===========================================================================
// Menu pipeline
// ===========================================================================

/// Load and validate a menu file.
pub fn load_menu(path: &Path) -> Result<Menu, DataLoadError> {
    let data: MenuData = deserialize_file(path)?;

    let mut builder = Menu::builder();
    for item in &data.items {
        if !item.price.is_finite() {
            return Err(DataLoadError::InvalidPrice {
                file: path.to_path_buf(),
                name: item.name.clone(),
            });
        }
        builder.add(&item.name, f64_to_amount(item.price));
    }
    let menu = builder.build().map_err(|source| DataLoadError::Menu {
        file: path.to_path_buf(),
        source,
    })?;

    debug!(file = %path.display(), items = menu.len(), "menu loaded");
    Ok(menu)
}

/// Load a menu from a file path, or from `menu.{ron,toml,json}` when `path`
/// is a directory.
pub fn load_menu_from(path: &Path) -> Result<Menu, DataLoadError> {
    if path.is_dir() {
        load_menu(&menu_file_in(path)?)
    } else {
        load_menu(path)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use servery_core::id::MenuIndex;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "servery_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    const MENU_RON: &str = r#"(items: [
        (name: "Burger", price: 250.0),
        (name: "Lassi", price: 150.0),
    ])"#;

    const MENU_TOML: &str = r#"
[[items]]
name = "Burger"
price = 250

[[items]]
name = "Lassi"
price = 150.5
"#;

    const MENU_JSON: &str =
        r#"{"items": [{"name": "Burger", "price": 250}, {"name": "Lassi", "price": 150}]}"#;

    // -----------------------------------------------------------------------
    // Format
    // -----------------------------------------------------------------------

    #[test]
    fn format_follows_extension() {
        for format in Format::ALL {
            let path = PathBuf::from(format!("menu.{}", format.extension()));
            assert_eq!(Format::of(&path).unwrap(), format);
        }
    }

    #[test]
    fn format_rejects_unknown_extensions() {
        assert!(matches!(
            Format::of(Path::new("menu.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(Format::of(Path::new("menu")).is_err());
        assert!(Format::of(Path::new("menu.RON")).is_err());
    }

    // -----------------------------------------------------------------------
    // load_menu
    // -----------------------------------------------------------------------

    #[test]
    fn load_menu_ron() {
        let dir = make_test_dir("ron");
        let path = dir.join("menu.ron");
        fs::write(&path, MENU_RON).unwrap();

        let menu = load_menu(&path).unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu.item(MenuIndex(1)).unwrap().name, "Burger");
        assert_eq!(menu.item(MenuIndex(2)).unwrap().price, f64_to_amount(150.0));
        cleanup(&dir);
    }

    #[test]
    fn load_menu_toml_accepts_integer_prices() {
        let dir = make_test_dir("toml");
        let path = dir.join("menu.toml");
        fs::write(&path, MENU_TOML).unwrap();

        let menu = load_menu(&path).unwrap();
        assert_eq!(menu.item(MenuIndex(1)).unwrap().price, f64_to_amount(250.0));
        assert_eq!(menu.item(MenuIndex(2)).unwrap().price, f64_to_amount(150.5));
        cleanup(&dir);
    }

    #[test]
    fn load_menu_json() {
        let dir = make_test_dir("json");
        let path = dir.join("menu.json");
        fs::write(&path, MENU_JSON).unwrap();

        let menu = load_menu(&path).unwrap();
        assert_eq!(menu.len(), 2);
        cleanup(&dir);
    }

    #[test]
    fn load_menu_parse_error_names_file() {
        let dir = make_test_dir("parse");
        let path = dir.join("menu.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_menu(&path).unwrap_err();
        match err {
            DataLoadError::Parse { file, .. } => assert_eq!(file, path),
            other => panic!("expected Parse, got {other:?}"),
        }
        cleanup(&dir);
    }

    #[test]
    fn load_menu_rejects_duplicate_items() {
        let dir = make_test_dir("dup");
        let path = dir.join("menu.json");
        fs::write(
            &path,
            r#"{"items": [{"name": "Tea", "price": 20}, {"name": "Tea", "price": 25}]}"#,
        )
        .unwrap();

        assert!(matches!(
            load_menu(&path),
            Err(DataLoadError::Menu {
                source: MenuError::DuplicateItem(_),
                ..
            })
        ));
        cleanup(&dir);
    }

    #[test]
    fn load_menu_rejects_empty_and_negative() {
        let dir = make_test_dir("invalid");
        let empty = dir.join("empty.json");
        fs::write(&empty, r#"{"items": []}"#).unwrap();
        assert!(matches!(
            load_menu(&empty),
            Err(DataLoadError::Menu {
                source: MenuError::Empty,
                ..
            })
        ));

        let negative = dir.join("negative.toml");
        fs::write(&negative, "[[items]]\nname = \"Refund\"\nprice = -5\n").unwrap();
        assert!(matches!(
            load_menu(&negative),
            Err(DataLoadError::Menu {
                source: MenuError::NegativePrice(_),
                ..
            })
        ));
        cleanup(&dir);
    }

    #[test]
    fn load_menu_missing_file_is_io_error() {
        let err = load_menu(Path::new("/definitely/not/here/menu.ron")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io(_)));
    }

    // -----------------------------------------------------------------------
    // load_menu_from (directory discovery)
    // -----------------------------------------------------------------------

    #[test]
    fn load_menu_from_directory() {
        let dir = make_test_dir("dir");
        fs::write(dir.join("menu.toml"), MENU_TOML).unwrap();

        let menu = load_menu_from(&dir).unwrap();
        assert_eq!(menu.len(), 2);
        cleanup(&dir);
    }

    #[test]
    fn bundled_menu_matches_house_menu() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        assert_eq!(load_menu_from(&dir).unwrap(), Menu::house());
    }

    #[test]
    fn load_menu_from_directory_without_menu() {
        let dir = make_test_dir("nomenu");
        assert!(matches!(
            load_menu_from(&dir),
            Err(DataLoadError::MissingMenu { .. })
        ));
        cleanup(&dir);
    }

    #[test]
    fn load_menu_from_directory_conflict() {
        let dir = make_test_dir("conflict");
        fs::write(dir.join("menu.ron"), MENU_RON).unwrap();
        fs::write(dir.join("menu.json"), MENU_JSON).unwrap();
        assert!(matches!(
            load_menu_from(&dir),
            Err(DataLoadError::ConflictingFormats { .. })
        ));
        cleanup(&dir);
    }
}
