//! FFI bindings for Stepwise
//!
//! This module provides C-compatible functions for calling Stepwise from other languages.
//! All functions use C strings (null-terminated) and return allocated memory that
//! must be freed by the caller using `stepwise_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::ActivityError;
use crate::pipeline::{day_summary, summarize};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Shared body of the report functions: decode the record, run `report`,
/// and translate the outcome into a C string or a recorded error.
unsafe fn run_report(
    record: *const c_char,
    weight_kg: f64,
    height_m: f64,
    report: fn(&str, f64, f64) -> Result<String, ActivityError>,
) -> *mut c_char {
    clear_last_error();

    let record_str = match cstr_to_string(record) {
        Some(s) => s,
        None => {
            set_last_error("Invalid record string pointer");
            return ptr::null_mut();
        }
    };

    match report(&record_str, weight_kg, height_m) {
        Ok(text) => string_to_cstr(&text),
        Err(e) => {
            set_last_error(&format!("{}: {}", e.code(), e));
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

/// Summarize a `steps,activity,duration` training record.
///
/// # Safety
/// - `record` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stepwise_free_string`.
/// - Returns NULL on error; call `stepwise_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn stepwise_summarize(
    record: *const c_char,
    weight_kg: f64,
    height_m: f64,
) -> *mut c_char {
    run_report(record, weight_kg, height_m, summarize)
}

/// Summarize a `steps,duration` day-steps record.
///
/// # Safety
/// - `record` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stepwise_free_string`.
/// - Returns NULL on error; call `stepwise_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn stepwise_day_summary(
    record: *const c_char,
    weight_kg: f64,
    height_m: f64,
) -> *mut c_char {
    run_report(record, weight_kg, height_m, day_summary)
}

/// Free a string returned by Stepwise functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Stepwise function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn stepwise_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message, prefixed with its error code.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Stepwise function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn stepwise_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the Stepwise library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn stepwise_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_ffi_summarize() {
        let record = CString::new("1000,Running,45m").unwrap();

        unsafe {
            let result = stepwise_summarize(record.as_ptr(), 75.0, 1.75);
            assert!(!result.is_null());
            assert!(stepwise_last_error().is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.starts_with("Training type: Running\n"));

            stepwise_free_string(result);
        }
    }

    #[test]
    fn test_ffi_day_summary() {
        let record = CString::new("1000,45m").unwrap();

        unsafe {
            let result = stepwise_day_summary(record.as_ptr(), 75.0, 1.75);
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.starts_with("Steps: 1000.\n"));

            stepwise_free_string(result);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        let record = CString::new("1000,Swimming,45m").unwrap();

        unsafe {
            let result = stepwise_summarize(record.as_ptr(), 75.0, 1.75);
            assert!(result.is_null());

            let error = stepwise_last_error();
            assert!(!error.is_null());

            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(error_str.starts_with("UNKNOWN_ACTIVITY: "));

            // A successful call clears the previous error
            let ok = CString::new("1000,45m").unwrap();
            let result = stepwise_day_summary(ok.as_ptr(), 75.0, 1.75);
            assert!(stepwise_last_error().is_null());
            stepwise_free_string(result);
        }
    }

    #[test]
    fn test_ffi_null_record() {
        unsafe {
            let result = stepwise_summarize(ptr::null(), 75.0, 1.75);
            assert!(result.is_null());
            assert!(!stepwise_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = stepwise_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert_eq!(version_str, env!("CARGO_PKG_VERSION"));
        }
    }
}
