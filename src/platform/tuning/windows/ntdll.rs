//! Undocumented ntdll entry points, resolved at runtime.

use std::ffi::c_void;
use std::mem;

use windows_sys::Win32::System::LibraryLoader::{GetModuleHandleA, GetProcAddress};

use crate::core::tuning::{TimerCapabilities, TuningError, TuningResult};

type NtSetTimerResolution = unsafe extern "system" fn(u32, u8, *mut u32) -> i32;
type NtQueryTimerResolution = unsafe extern "system" fn(*mut u32, *mut u32, *mut u32) -> i32;
type NtSetSystemInformation = unsafe extern "system" fn(i32, *mut c_void, u32) -> i32;

const SYSTEM_MEMORY_LIST_INFORMATION: i32 = 0x50;
const MEMORY_PURGE_STANDBY_LIST: i32 = 4;
const STATUS_PRIVILEGE_NOT_HELD: u32 = 0xC000_0061;
const STATUS_ACCESS_DENIED: u32 = 0xC000_0022;

// Timer values are in 100ns units.
const UNITS_PER_MS: f64 = 10_000.0;

fn resolve(name: &'static [u8]) -> TuningResult<unsafe extern "system" fn() -> isize> {
    let display = String::from_utf8_lossy(&name[..name.len().saturating_sub(1)]).to_string();
    unsafe {
        let module = GetModuleHandleA(b"ntdll.dll\0".as_ptr());
        if module.is_null() {
            return Err(TuningError::unsupported("ntdll.dll is not loaded"));
        }
        GetProcAddress(module, name.as_ptr())
            .ok_or_else(|| TuningError::unsupported(format!("{} is not exported", display)))
    }
}

fn check(operation: &str, status: i32) -> TuningResult<()> {
    let code = status as u32;
    match code {
        0 => Ok(()),
        STATUS_PRIVILEGE_NOT_HELD | STATUS_ACCESS_DENIED => Err(TuningError::permission_denied(
            format!("{} (status 0x{:X})", operation, code),
        )),
        _ => Err(TuningError::os(operation, code)),
    }
}

pub fn query_timer_resolution() -> TuningResult<TimerCapabilities> {
    let query: NtQueryTimerResolution =
        unsafe { mem::transmute(resolve(b"NtQueryTimerResolution\0")?) };

    let (mut coarsest, mut finest, mut current) = (0u32, 0u32, 0u32);
    let status = unsafe { query(&mut coarsest, &mut finest, &mut current) };
    check("NtQueryTimerResolution", status)?;

    Ok(TimerCapabilities {
        min_ms: f64::from(finest) / UNITS_PER_MS,
        max_ms: f64::from(coarsest) / UNITS_PER_MS,
        current_ms: f64::from(current) / UNITS_PER_MS,
    })
}

/// Request `milliseconds`, or release the request when `set` is false.
/// Returns the resolution in effect afterwards.
pub fn set_timer_resolution(milliseconds: f64, set: bool) -> TuningResult<f64> {
    let set_resolution: NtSetTimerResolution =
        unsafe { mem::transmute(resolve(b"NtSetTimerResolution\0")?) };

    let desired = (milliseconds * UNITS_PER_MS) as u32;
    let mut actual = 0u32;
    let status = unsafe { set_resolution(desired, u8::from(set), &mut actual) };
    check("NtSetTimerResolution", status)?;
    Ok(f64::from(actual) / UNITS_PER_MS)
}

pub fn purge_standby_list() -> TuningResult<()> {
    let set_information: NtSetSystemInformation =
        unsafe { mem::transmute(resolve(b"NtSetSystemInformation\0")?) };

    let mut command = MEMORY_PURGE_STANDBY_LIST;
    let status = unsafe {
        set_information(
            SYSTEM_MEMORY_LIST_INFORMATION,
            &mut command as *mut i32 as *mut c_void,
            mem::size_of::<i32>() as u32,
        )
    };
    check("NtSetSystemInformation(MemoryPurgeStandbyList)", status)
}
