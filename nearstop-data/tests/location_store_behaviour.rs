//! Behavioural tests for [`LocationStore`].

use std::cell::RefCell;

use camino::Utf8PathBuf;
use nearstop_core::{Coordinate, Stop};
use nearstop_data::store::{LocationStore, LocationStoreError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

struct StoreWorld {
    _dir: TempDir,
    store: LocationStore,
    loaded: RefCell<Option<Result<Vec<Stop>, LocationStoreError>>>,
}

impl StoreWorld {
    fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let state_dir =
            Utf8PathBuf::from_path_buf(dir.path().join("nearstop")).expect("utf-8 tempdir");
        Self {
            _dir: dir,
            store: LocationStore::new(state_dir),
            loaded: RefCell::new(None),
        }
    }

    fn coordinates(&self) -> Vec<Coordinate> {
        self.loaded
            .borrow()
            .as_ref()
            .expect("load attempted")
            .as_ref()
            .expect("expected stored locations")
            .iter()
            .map(|stop| stop.coordinate)
            .collect()
    }
}

fn stop(text: &str) -> Stop {
    Stop::new(Coordinate::parse(text).expect("valid coordinate"))
}

#[fixture]
fn world() -> StoreWorld {
    StoreWorld::new()
}

// --- Given steps ---

#[given("an empty state directory")]
fn empty_state_directory(#[from(world)] world: &StoreWorld) {
    assert!(!world.store.path().as_std_path().exists());
}

#[given("a state directory holding one location")]
fn one_location(#[from(world)] world: &StoreWorld) {
    world.store.save(&[stop("1,2")]).expect("save");
}

#[given("a state directory holding a corrupt locations file")]
fn corrupt_file(#[from(world)] world: &StoreWorld) {
    let path = world.store.path();
    std::fs::create_dir_all(path.parent().expect("parent").as_std_path()).expect("mkdir");
    std::fs::write(path.as_std_path(), "[{\"lat\": 1.0").expect("write");
}

// --- When steps ---

#[when("I load the stored locations")]
fn load(#[from(world)] world: &StoreWorld) {
    world.loaded.replace(Some(world.store.load()));
}

#[when("I store the locations \"51.5,-0.1\" and \"51.6,-0.2\"")]
fn store_two(#[from(world)] world: &StoreWorld) {
    world.store.append(stop("51.5,-0.1")).expect("append");
    world.store.append(stop("51.6,-0.2")).expect("append");
}

#[when("I clear the stored locations")]
fn clear(#[from(world)] world: &StoreWorld) {
    world.store.clear().expect("clear");
}

// --- Then steps ---

#[then("no locations are returned")]
fn nothing_returned(#[from(world)] world: &StoreWorld) {
    assert!(world.coordinates().is_empty());
}

#[then("the locations are \"51.5,-0.1\" and \"51.6,-0.2\"")]
fn two_returned(#[from(world)] world: &StoreWorld) {
    assert_eq!(
        world.coordinates(),
        vec![Coordinate::new(51.5, -0.1), Coordinate::new(51.6, -0.2)]
    );
}

#[then("a parse error is reported")]
fn parse_error(#[from(world)] world: &StoreWorld) {
    let borrowed = world.loaded.borrow();
    assert!(
        matches!(&*borrowed, Some(Err(LocationStoreError::Parse { .. }))),
        "expected a parse error, got {borrowed:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/location_store.feature", name = $title)]
        fn $fn_name(#[from(world)] world: StoreWorld) {
            let _ = world;
        }
    };
}

register_scenario!(loading_from_empty_directory, "loading from an empty state directory");
register_scenario!(appending_keeps_order, "appending locations keeps entry order");
register_scenario!(clearing_locations, "clearing stored locations");
register_scenario!(reading_corrupt_file, "reading a corrupt locations file");
