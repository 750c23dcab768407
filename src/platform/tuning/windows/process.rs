//! Process and thread scheduling through kernel32.

use std::ffi::c_void;
use std::mem;

use windows_sys::Win32::Foundation::{CloseHandle, GetLastError, HANDLE};
use windows_sys::Win32::System::ProcessStatus::K32EmptyWorkingSet;
use windows_sys::Win32::System::Threading::{
    OpenProcess, OpenThread, ProcessMemoryPriority, SetPriorityClass, SetProcessAffinityMask,
    SetProcessInformation, SetThreadAffinityMask, SetThreadPriority,
    MEMORY_PRIORITY_INFORMATION, PROCESS_QUERY_INFORMATION, PROCESS_QUERY_LIMITED_INFORMATION,
    PROCESS_SET_INFORMATION, PROCESS_SET_QUOTA, THREAD_QUERY_INFORMATION,
    THREAD_SET_INFORMATION,
};

use crate::core::tuning::{
    AffinityMask, MemoryPriority, PriorityClass, TuningError, TuningResult,
};

const ERROR_ACCESS_DENIED: u32 = 5;
const ERROR_INVALID_PARAMETER: u32 = 87;

struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        unsafe {
            CloseHandle(self.0);
        }
    }
}

fn last_error(operation: &str) -> TuningError {
    let code = unsafe { GetLastError() };
    match code {
        ERROR_ACCESS_DENIED => TuningError::permission_denied(operation.to_string()),
        ERROR_INVALID_PARAMETER => TuningError::invalid_parameter(operation.to_string()),
        _ => TuningError::os(operation, code),
    }
}

fn open_process(pid: u32, access: u32) -> TuningResult<OwnedHandle> {
    let handle = unsafe { OpenProcess(access, 0, pid) };
    if handle.is_null() {
        return Err(last_error(&format!("OpenProcess({})", pid)));
    }
    Ok(OwnedHandle(handle))
}

fn open_thread(tid: u32) -> TuningResult<OwnedHandle> {
    let handle =
        unsafe { OpenThread(THREAD_SET_INFORMATION | THREAD_QUERY_INFORMATION, 0, tid) };
    if handle.is_null() {
        return Err(last_error(&format!("OpenThread({})", tid)));
    }
    Ok(OwnedHandle(handle))
}

pub fn set_priority_class(pid: u32, class: PriorityClass) -> TuningResult<()> {
    let process = open_process(pid, PROCESS_SET_INFORMATION)?;
    if unsafe { SetPriorityClass(process.0, class.as_raw()) } == 0 {
        return Err(last_error("SetPriorityClass"));
    }
    Ok(())
}

pub fn set_process_affinity(pid: u32, mask: AffinityMask) -> TuningResult<()> {
    let process = open_process(pid, PROCESS_SET_INFORMATION | PROCESS_QUERY_LIMITED_INFORMATION)?;
    if unsafe { SetProcessAffinityMask(process.0, mask.0 as usize) } == 0 {
        return Err(last_error("SetProcessAffinityMask"));
    }
    Ok(())
}

pub fn set_thread_priority(tid: u32, priority: i32) -> TuningResult<()> {
    let thread = open_thread(tid)?;
    if unsafe { SetThreadPriority(thread.0, priority) } == 0 {
        return Err(last_error("SetThreadPriority"));
    }
    Ok(())
}

pub fn set_thread_affinity(tid: u32, mask: AffinityMask) -> TuningResult<()> {
    let thread = open_thread(tid)?;
    // Returns the previous mask, zero on failure.
    if unsafe { SetThreadAffinityMask(thread.0, mask.0 as usize) } == 0 {
        return Err(last_error("SetThreadAffinityMask"));
    }
    Ok(())
}

pub fn set_memory_priority(pid: u32, priority: MemoryPriority) -> TuningResult<()> {
    let process = open_process(pid, PROCESS_SET_INFORMATION)?;
    let info = MEMORY_PRIORITY_INFORMATION {
        MemoryPriority: priority.as_raw(),
    };
    let ok = unsafe {
        SetProcessInformation(
            process.0,
            ProcessMemoryPriority,
            &info as *const MEMORY_PRIORITY_INFORMATION as *const c_void,
            mem::size_of::<MEMORY_PRIORITY_INFORMATION>() as u32,
        )
    };
    if ok == 0 {
        return Err(last_error("SetProcessInformation(ProcessMemoryPriority)"));
    }
    Ok(())
}

pub fn empty_working_set(pid: u32) -> TuningResult<()> {
    let process = open_process(pid, PROCESS_SET_QUOTA | PROCESS_QUERY_INFORMATION)?;
    if unsafe { K32EmptyWorkingSet(process.0) } == 0 {
        return Err(last_error("EmptyWorkingSet"));
    }
    Ok(())
}
