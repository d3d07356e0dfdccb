//! JSON persistence for the pending stop list.
//!
//! Stops are kept as a JSON array of `{"lat": .., "lng": ..}` objects, with
//! optional `label` and `address` fields, in `<state_dir>/<key>.json`.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use nearstop_core::Stop;
use thiserror::Error;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "locations";

/// Errors raised by [`LocationStore`].
#[derive(Debug, Error)]
pub enum LocationStoreError {
    /// The storage key cannot be used as a file name.
    #[error("storage key {key:?} must be a non-empty file name")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },
    /// Reading, writing or removing the file failed.
    #[error("failed to access stored locations at {path}")]
    Io {
        /// File being accessed.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The file exists but does not hold a stop list.
    #[error("stored locations at {path} are not valid")]
    Parse {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The stops could not be encoded.
    #[error("failed to serialise locations")]
    Serialise(#[source] serde_json::Error),
}

/// File-backed list of stops.
///
/// # Examples
/// ```
/// use nearstop_core::{Coordinate, Stop};
/// use nearstop_data::store::LocationStore;
///
/// # let dir = tempfile::tempdir()?;
/// # let state_dir = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).map_err(|_| "utf-8")?;
/// let store = LocationStore::new(&state_dir);
/// assert!(store.load()?.is_empty());
///
/// store.append(Stop::new(Coordinate::new(51.5, -0.1)))?;
/// assert_eq!(store.load()?.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationStore {
    path: Utf8PathBuf,
}

impl LocationStore {
    /// Store under `state_dir` with the default key.
    #[must_use]
    pub fn new(state_dir: impl AsRef<Utf8Path>) -> Self {
        Self {
            path: state_dir
                .as_ref()
                .join(format!("{DEFAULT_STORAGE_KEY}.json")),
        }
    }

    /// Store under `state_dir` with a custom key.
    ///
    /// # Errors
    ///
    /// Returns [`LocationStoreError::InvalidKey`] when `key` is empty, a
    /// relative path component or contains a path separator.
    pub fn with_key(state_dir: impl AsRef<Utf8Path>, key: &str) -> Result<Self, LocationStoreError> {
        let usable = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\']);
        if !usable {
            return Err(LocationStoreError::InvalidKey {
                key: key.to_owned(),
            });
        }
        Ok(Self {
            path: state_dir.as_ref().join(format!("{key}.json")),
        })
    }

    /// File holding the stops.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read the stored stops; an absent file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`LocationStoreError::Io`] when the file cannot be read and
    /// [`LocationStoreError::Parse`] when it is not a stop list.
    pub fn load(&self) -> Result<Vec<Stop>, LocationStoreError> {
        let Some(contents) =
            nearstop_fs::read_to_string_if_exists(&self.path).map_err(|source| self.io(source))?
        else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&contents).map_err(|source| LocationStoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the stored stops.
    ///
    /// # Errors
    ///
    /// Returns [`LocationStoreError::Serialise`] or [`LocationStoreError::Io`]
    /// when the stops cannot be written.
    pub fn save(&self, stops: &[Stop]) -> Result<(), LocationStoreError> {
        let json = serde_json::to_vec(stops).map_err(LocationStoreError::Serialise)?;
        nearstop_fs::write_replacing(&self.path, &json).map_err(|source| self.io(source))?;
        log::debug!("saved {} locations to {}", stops.len(), self.path);
        Ok(())
    }

    /// Append `stop` and return the updated list.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`load`](Self::load) and [`save`](Self::save).
    pub fn append(&self, stop: Stop) -> Result<Vec<Stop>, LocationStoreError> {
        let mut stops = self.load()?;
        stops.push(stop);
        self.save(&stops)?;
        Ok(stops)
    }

    /// Remove the stored stops. Returns whether anything was stored.
    ///
    /// # Errors
    ///
    /// Returns [`LocationStoreError::Io`] when the file exists but cannot be
    /// removed.
    pub fn clear(&self) -> Result<bool, LocationStoreError> {
        nearstop_fs::remove_if_exists(&self.path).map_err(|source| self.io(source))
    }

    fn io(&self, source: io::Error) -> LocationStoreError {
        LocationStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nearstop_core::Coordinate;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct StoreFixture {
        store: LocationStore,
        _dir: TempDir,
    }

    #[fixture]
    fn fixture() -> StoreFixture {
        let dir = TempDir::new().expect("tempdir");
        let state_dir =
            Utf8PathBuf::from_path_buf(dir.path().join("state")).expect("utf-8 tempdir");
        StoreFixture {
            store: LocationStore::new(state_dir),
            _dir: dir,
        }
    }

    #[rstest]
    fn empty_store_loads_nothing(fixture: StoreFixture) {
        assert!(fixture.store.load().expect("load").is_empty());
    }

    #[rstest]
    fn saved_stops_load_back_in_order(fixture: StoreFixture) {
        let stops = vec![
            Stop::new(Coordinate::new(51.5, -0.1)),
            Stop::new(Coordinate::new(51.6, -0.2)).with_label("Shop"),
        ];

        fixture.store.save(&stops).expect("save");

        assert_eq!(fixture.store.load().expect("load"), stops);
    }

    #[rstest]
    fn file_holds_plain_lat_lng_objects(fixture: StoreFixture) {
        fixture
            .store
            .save(&[Stop::new(Coordinate::new(1.5, 2.5))])
            .expect("save");

        let raw = std::fs::read_to_string(fixture.store.path()).expect("read");
        assert_eq!(raw, r#"[{"lat":1.5,"lng":2.5}]"#);
    }

    #[rstest]
    fn append_extends_the_list(fixture: StoreFixture) {
        fixture
            .store
            .append(Stop::new(Coordinate::new(0.0, 0.0)))
            .expect("first");
        let stops = fixture
            .store
            .append(Stop::new(Coordinate::new(0.0, 1.0)))
            .expect("second");

        assert_eq!(stops.len(), 2);
        assert_eq!(fixture.store.load().expect("load"), stops);
    }

    #[rstest]
    fn clear_is_idempotent(fixture: StoreFixture) {
        fixture
            .store
            .save(&[Stop::new(Coordinate::new(0.0, 0.0))])
            .expect("save");

        assert!(fixture.store.clear().expect("first clear"));
        assert!(!fixture.store.clear().expect("second clear"));
        assert!(fixture.store.load().expect("load").is_empty());
    }

    #[rstest]
    fn corrupt_file_is_a_parse_error(fixture: StoreFixture) {
        nearstop_fs::write_replacing(fixture.store.path(), b"{not json").expect("write");

        let err = fixture.store.load().expect_err("should fail");

        assert!(matches!(err, LocationStoreError::Parse { .. }));
    }

    #[rstest]
    #[case("")]
    #[case("..")]
    #[case("nested/key")]
    fn unusable_keys_are_rejected(#[case] key: &str) {
        let err = LocationStore::with_key("/tmp", key).expect_err("should fail");
        assert!(matches!(err, LocationStoreError::InvalidKey { .. }));
    }

    #[rstest]
    fn custom_key_names_the_file() {
        let store = LocationStore::with_key("/var/lib/nearstop", "route-a").expect("key");
        assert_eq!(store.path(), Utf8Path::new("/var/lib/nearstop/route-a.json"));
    }
}
