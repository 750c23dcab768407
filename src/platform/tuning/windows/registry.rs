//! HKLM writes for network, scheduler and interrupt tuning.

use std::io;

use winreg::enums::*;
use winreg::RegKey;

use super::super::network::{network_plan, NDIS_PARAMETERS, TCPIP_INTERFACES, TCPIP_PARAMETERS};
use crate::core::tuning::{quantum, AffinityMask, NetworkMode, TuningError, TuningResult};

const PRIORITY_CONTROL: &str = r"SYSTEM\CurrentControlSet\Control\PriorityControl";
const PRIORITY_SEPARATION: &str = "Win32PrioritySeparation";
const DEVICE_POLICY_SPECIFIED_PROCESSORS: u32 = 4;

fn registry_error(path: &str, e: io::Error) -> TuningError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        TuningError::permission_denied(format!(r"HKLM\{}", path))
    } else {
        TuningError::registry(format!(r"HKLM\{}: {}", path, e))
    }
}

fn open(path: &str) -> TuningResult<RegKey> {
    RegKey::predef(HKEY_LOCAL_MACHINE)
        .open_subkey_with_flags(path, KEY_READ | KEY_WRITE)
        .map_err(|e| registry_error(path, e))
}

fn set_dword(key: &RegKey, path: &str, name: &str, value: u32) -> TuningResult<()> {
    key.set_value(name, &value)
        .map_err(|e| registry_error(&format!(r"{}\{}", path, name), e))
}

fn delete_if_present(key: &RegKey, path: &str, name: &str) -> TuningResult<()> {
    match key.delete_value(name) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(registry_error(&format!(r"{}\{}", path, name), e)),
    }
}

pub fn apply_network_mode(mode: NetworkMode) -> TuningResult<()> {
    let plan = network_plan(mode);
    let params = open(TCPIP_PARAMETERS)?;

    if !plan.interface_values.is_empty() || !plan.delete_values.is_empty() {
        let interfaces = open(TCPIP_INTERFACES)?;
        for name in interfaces.enum_keys().filter_map(|k| k.ok()) {
            let path = format!(r"{}\{}", TCPIP_INTERFACES, name);
            let interface = match open(&path) {
                Ok(key) => key,
                Err(e) => {
                    log::warn!("Skipping interface {}: {}", name, e);
                    continue;
                }
            };
            for (value_name, value) in &plan.interface_values {
                set_dword(&interface, &path, value_name, *value)?;
            }
            for value_name in &plan.delete_values {
                delete_if_present(&interface, &path, value_name)?;
            }
        }
    }

    for (name, value) in &plan.global_values {
        set_dword(&params, TCPIP_PARAMETERS, name, *value)?;
    }
    for name in &plan.delete_values {
        delete_if_present(&params, TCPIP_PARAMETERS, name)?;
    }

    if let Some(enable) = plan.rss {
        let ndis = open(NDIS_PARAMETERS)?;
        set_dword(&ndis, NDIS_PARAMETERS, "RSS", u32::from(enable))?;
    }

    log::debug!("Network registry values written for {} mode", mode);
    Ok(())
}

/// Set or clear one bit of `Win32PrioritySeparation`, keeping the others.
pub fn set_priority_separation_flag(bit: u32, enable: bool) -> TuningResult<u32> {
    let key = open(PRIORITY_CONTROL)?;
    let current = match key.get_value::<u32, _>(PRIORITY_SEPARATION) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!(
                "{} unreadable ({}), starting from 0x{:X}",
                PRIORITY_SEPARATION,
                e,
                quantum::FALLBACK_SEPARATION
            );
            None
        }
    };

    let value = quantum::with_flag(current, bit, enable);
    set_dword(&key, PRIORITY_CONTROL, PRIORITY_SEPARATION, value)?;
    Ok(value)
}

/// Pin a device's interrupts to `mask` via its affinity policy key.
pub fn set_interrupt_affinity(instance_id: &str, mask: AffinityMask) -> TuningResult<()> {
    let path = format!(
        r"SYSTEM\CurrentControlSet\Enum\{}\Device Parameters\Interrupt Management\Affinity Policy",
        instance_id
    );
    let (key, _) = RegKey::predef(HKEY_LOCAL_MACHINE)
        .create_subkey_with_flags(&path, KEY_READ | KEY_WRITE)
        .map_err(|e| registry_error(&path, e))?;

    set_dword(&key, &path, "DevicePolicy", DEVICE_POLICY_SPECIFIED_PROCESSORS)?;
    key.set_value("AssignmentSetOverride", &mask.0)
        .map_err(|e| registry_error(&path, e))
}
