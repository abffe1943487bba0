//! molfeat-test-data
//!
//! Test fixtures embedded in the crate.
//!
//! Each fixture is a `TestFile` holding the raw bytes of a file under `data/`.
//! Tests can read the contents directly or materialize a temporary file for
//! code that loads from a path.
use std::fs;
use tempfile::{Builder, NamedTempFile};

#[derive(Debug)]
/// Test File
///
/// Example usage:
///
/// ```ignore
/// // returns (filepath, _tempfile_handle).
/// // _handle ensures the tempfile remains in scope
/// use molfeat_test_data::TestFile;
/// let (config_file, _temp) = TestFile::config_01().create_temp().unwrap();
/// ```
pub struct TestFile {
    filebinary: &'static [u8],
    suffix: &'static str,
}

impl TestFile {
    /// Water, methane and bromochlorofluoromethane; two views each.
    /// Flat rows of 5 atom records, padded with zeros.
    pub fn geometry_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/geometry/small_molecules.json"),
            suffix: "json",
        }
    }
    /// Coulomb config with a reordered property subset and strict element lookup.
    pub fn config_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/config/coulomb_subset.json"),
            suffix: "json",
        }
    }
    /// Fixed-width config too narrow for all eight properties.
    pub fn config_02() -> Self {
        Self {
            filebinary: include_bytes!("../data/config/too_small.json"),
            suffix: "json",
        }
    }

    pub fn contents(&self) -> &'static [u8] {
        self.filebinary
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }
}
