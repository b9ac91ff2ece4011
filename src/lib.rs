//! # Treasure Hunt Core
//!
//! Local storage and reward logic for a city treasure hunt game, built for FFI
//! (Foreign Function Interface) integration with Flutter and other mobile
//! front-ends. The catalog of ten locations lives in an embedded SQLite database
//! that survives restarts.
//!
//! ## Features
//!
//! - **SQLite-backed catalog**: one `locations` table, seeded on first use
//! - **Schema versioning**: `PRAGMA user_version`, destructive recreate on upgrade
//! - **Reward engine**: pure tier computation from found and total counts
//! - **Safe error handling**: No `unwrap()` calls in production code
//!
//! ## Quick Start
//!
//! ```no_run
//! use treasure_hunt_core::{create_db, get_all_locations, mark_found};
//! use std::ffi::CString;
//!
//! let db_name = CString::new("treasure_hunt").unwrap();
//! let db_state = create_db(db_name.as_ptr());
//!
//! let marked = mark_found(db_state, 1);
//! let locations = get_all_locations(db_state);
//! ```
//!
//! ## FFI Functions
//!
//! - [`create_db`] - Open (and seed) the location store
//! - [`get_all_locations`] - Every location in catalog order
//! - [`count_found`] - Number of found locations
//! - [`mark_found`] - Mark one location as found
//! - [`reset_all`] - Mark every location as unfound
//! - [`get_progress`] - Found count, total, reward and completion in one call
//! - [`compute_reward`] / [`is_complete`] - Pure reward helpers
//! - [`close_database`] - Explicit connection cleanup
//! - [`free_response`] - Release a string returned by this library
//!
//! Rust callers can skip the FFI layer and use [`LocationStore`] directly.

pub mod location_model;
pub mod location_store;
pub mod reward;
pub mod store_error;
mod app_response;

pub use crate::location_model::LocationRecord;
pub use crate::location_store::LocationStore;
pub use crate::reward::{CelebrationLatch, HuntProgress, RewardMessage, RewardTier};
pub use crate::store_error::StoreError;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use log::{info, warn};

use crate::app_response::AppResponse;

/// Opens the location store backed by `{name}.db`.
///
/// On first use the `locations` table is created and filled with the seed
/// catalog. On an older schema version the table is dropped and reseeded.
///
/// # Parameters
///
/// * `name` - A null-terminated C string containing the database name or path prefix
///
/// # Returns
///
/// Returns a pointer to the [`LocationStore`] on success, or a null pointer on failure.
/// A null pointer means storage is unavailable and the caller should show a
/// blocking error instead of an empty list.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use treasure_hunt_core::create_db;
///
/// let name = CString::new("treasure_hunt").unwrap();
/// let db_state = create_db(name.as_ptr());
///
/// if !db_state.is_null() {
///     // Store opened successfully
/// }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_db(name: *const c_char) -> *mut LocationStore {
    if name.is_null() {
        warn!("Null name pointer passed to create_db");
        return std::ptr::null_mut();
    }

    let name_str = match unsafe { CStr::from_ptr(name).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in name parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    match LocationStore::init(name_str.to_string()) {
        Ok(store) => {
            info!("✅ Location store initialized");
            Box::into_raw(Box::new(store))
        }
        Err(e) => {
            warn!("❌ Failed to initialize location store: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Retrieves every location in catalog order.
///
/// # Returns
///
/// A JSON `AppResponse` whose `Ok` payload is an array of records:
///
/// ```json
/// [{"id":1,"name":"Library","imageUrl":"https://...","isFound":false}]
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_all_locations(state: *mut LocationStore) -> *const c_char {
    let state = match store_ref(state, "get_all_locations") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    match state.get_all_locations() {
        Ok(locations) => response_to_c_string(&AppResponse::json(&locations)),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Returns the number of found locations as the `Ok` payload, e.g. `{"Ok":"4"}`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn count_found(state: *mut LocationStore) -> *const c_char {
    let state = match store_ref(state, "count_found") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    match state.count_found() {
        Ok(count) => response_to_c_string(&AppResponse::success(count.to_string())),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Marks the location with `id` as found.
///
/// Marking an already found location, or an id that does not exist, still
/// answers `Ok`. Only storage failures produce an error response.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use treasure_hunt_core::{create_db, mark_found};
///
/// let db_name = CString::new("treasure_hunt").unwrap();
/// let db_state = create_db(db_name.as_ptr());
///
/// let result = mark_found(db_state, 3);
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn mark_found(state: *mut LocationStore, id: i64) -> *const c_char {
    let state = match store_ref(state, "mark_found") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    match state.mark_found(id) {
        Ok(()) => response_to_c_string(&AppResponse::success(format!("mark_found processed for location {id}"))),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Marks every location as unfound.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn reset_all(state: *mut LocationStore) -> *const c_char {
    let state = match store_ref(state, "reset_all") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    match state.reset_all() {
        Ok(()) => response_to_c_string(&AppResponse::success("All locations reset")),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Reads the current [`HuntProgress`]: found count, total, reward and completion.
///
/// Intended to be called after every mutating call, since the store does not
/// push updates.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_progress(state: *mut LocationStore) -> *const c_char {
    let state = match store_ref(state, "get_progress") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    match state.progress() {
        Ok(progress) => response_to_c_string(&AppResponse::json(&progress)),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Computes the reward message for the given counts. Needs no store.
#[no_mangle]
pub extern "C" fn compute_reward(found: u32, total: u32) -> *const c_char {
    let reward = reward::compute_reward(found as usize, total as usize);
    response_to_c_string(&AppResponse::json(&reward))
}

/// True when `total > 0` and every location is found.
#[no_mangle]
pub extern "C" fn is_complete(found: u32, total: u32) -> bool {
    reward::is_complete(found as usize, total as usize)
}

/// Explicitly closes the database connection.
///
/// The pointer stays valid but every later call answers `StorageUnavailable`.
/// Useful before a Flutter hot restart.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_database(state: *mut LocationStore) -> *const c_char {
    if state.is_null() {
        let error = AppResponse::BadRequest("Null state pointer passed to close_database".to_string());
        return response_to_c_string(&error);
    }

    let state = unsafe { &mut *state };

    match state.close_database() {
        Ok(()) => response_to_c_string(&AppResponse::success("Database connection closed successfully")),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Releases a string previously returned by this library. Null is ignored.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr as *mut c_char) });
}

/// Borrows the store behind an FFI pointer, or builds the `BadRequest` reply.
fn store_ref<'a>(state: *mut LocationStore, caller: &str) -> Result<&'a LocationStore, *const c_char> {
    match unsafe { state.as_ref() } {
        Some(s) => Ok(s),
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}

/// Converts an `AppResponse` to a C string owned by the caller.
///
/// Returns a null pointer if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}
