//! C ABI for native hosts.
//!
//! Hosts own an opaque engine handle; there is no global engine. Results
//! are returned by value as the 1028-byte `WireResult`, and
//! `libviet_result_size` lets a host check its struct definition at
//! startup.

use crate::engine::Engine;
use libviet_core::{InputScheme, WireResult, WIRE_RESULT_SIZE};

/// Create an engine from the user's configuration.
#[no_mangle]
pub extern "C" fn libviet_engine_new() -> *mut Engine {
    Box::into_raw(Box::new(Engine::initialize()))
}

/// Free an engine created by `libviet_engine_new`.
///
/// # Safety
///
/// `engine` must be null or a pointer returned by `libviet_engine_new` that
/// has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn libviet_engine_free(engine: *mut Engine) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Process one key. `mapped_char` is a Unicode scalar value, 0 when unknown.
///
/// # Safety
///
/// `engine` must be null or a live handle from `libviet_engine_new`, not
/// used concurrently from another thread.
#[no_mangle]
pub unsafe extern "C" fn libviet_process_key(
    engine: *mut Engine,
    keycode: u16,
    caps: bool,
    ctrl: bool,
    mapped_char: u32,
) -> WireResult {
    let Some(engine) = engine.as_mut() else {
        return WireResult::empty();
    };
    let mapped = char::from_u32(mapped_char).filter(|&c| c != '\0');
    engine.process_key(keycode, caps, ctrl, mapped)
}

/// Drop all session state.
///
/// # Safety
///
/// Same contract as `libviet_process_key`.
#[no_mangle]
pub unsafe extern "C" fn libviet_clear_buffer(engine: *mut Engine) {
    if let Some(engine) = engine.as_mut() {
        engine.clear_buffer();
    }
}

/// Switch scheme: 0 = Telex, 1 = VNI. Returns false for unknown ids.
///
/// # Safety
///
/// Same contract as `libviet_process_key`.
#[no_mangle]
pub unsafe extern "C" fn libviet_set_scheme(engine: *mut Engine, scheme: u8) -> bool {
    match (engine.as_mut(), InputScheme::from_id(scheme)) {
        (Some(engine), Some(scheme)) => {
            engine.set_scheme(scheme);
            true
        }
        _ => false,
    }
}

#[no_mangle]
pub extern "C" fn libviet_result_size() -> usize {
    WIRE_RESULT_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycodes;

    fn handle() -> *mut Engine {
        Box::into_raw(Box::new(Engine::new()))
    }

    #[test]
    fn test_result_size() {
        assert_eq!(libviet_result_size(), std::mem::size_of::<WireResult>());
    }

    #[test]
    fn test_process_through_handle() {
        let engine = handle();
        unsafe {
            libviet_process_key(engine, keycodes::A, false, false, 0);
            let wire = libviet_process_key(engine, keycodes::S, false, false, 's' as u32);
            assert!(wire.key_consumed());
            assert_eq!(wire.text(), "á");

            assert!(libviet_set_scheme(engine, 1));
            assert!(!libviet_set_scheme(engine, 9));
            assert_eq!((*engine).scheme(), InputScheme::Vni);

            libviet_clear_buffer(engine);
            assert_eq!((*engine).get_full_buffer(), "");
            libviet_engine_free(engine);
        }
    }

    #[test]
    fn test_null_handle_is_pass_through() {
        unsafe {
            let wire = libviet_process_key(std::ptr::null_mut(), keycodes::A, false, false, 0);
            assert_eq!(wire, WireResult::empty());
            libviet_clear_buffer(std::ptr::null_mut());
            libviet_engine_free(std::ptr::null_mut());
        }
    }
}
