//! Browser capability and permission plumbing for device orientation
//!
//! Some platforms (iOS 13+) gate orientation sensors behind a user-triggered
//! permission prompt; the rest expose the events freely. The API shape is
//! probed once at startup and folded into an explicit activation strategy
//! instead of duck-typing at every call site.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

// JS shim: the permission API is non-standard and absent from most browsers,
// so it is probed and invoked from the JS side
#[wasm_bindgen(inline_js = "
    export function orientation_permission_gated() {
        return typeof DeviceOrientationEvent !== 'undefined'
            && typeof DeviceOrientationEvent.requestPermission === 'function';
    }

    export function orientation_permission_request() {
        return DeviceOrientationEvent.requestPermission();
    }
")]
extern "C" {
    fn orientation_permission_gated() -> bool;
    fn orientation_permission_request() -> js_sys::Promise;
}

/// How tilt activation must be performed on this platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationStrategy {
    /// Sensor access requires a user-granted permission (iOS 13+)
    Gated,
    /// Sensor events are freely available
    Ungated,
}

/// Probe the platform once and pick a strategy
pub fn detect_activation_strategy() -> ActivationStrategy {
    if orientation_permission_gated() {
        ActivationStrategy::Gated
    } else {
        ActivationStrategy::Ungated
    }
}

/// Result of the permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied,
}

/// Ask the user for orientation access. `Err` is a platform-level failure
/// distinct from denial: the prompt never resolved properly.
pub async fn request_orientation_permission() -> Result<PermissionOutcome, JsValue> {
    let response = JsFuture::from(orientation_permission_request()).await?;
    match response.as_string().as_deref() {
        Some("granted") => Ok(PermissionOutcome::Granted),
        _ => Ok(PermissionOutcome::Denied),
    }
}
