use serde::Deserialize;

use super::command::run_powershell_json;
use crate::core::tuning::{DeviceCategory, TuningResult};

const LIST_DEVICES: &str = "Get-PnpDevice -PresentOnly | \
    Select-Object FriendlyName, InstanceId | ConvertTo-Json -Compress";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PnpDevice {
    pub friendly_name: Option<String>,
    pub instance_id: String,
}

// ConvertTo-Json emits a bare object when there is a single result.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<PnpDevice>),
    One(PnpDevice),
}

pub fn devices_in(category: DeviceCategory) -> TuningResult<Vec<PnpDevice>> {
    let devices = match run_powershell_json::<OneOrMany>(LIST_DEVICES)? {
        OneOrMany::Many(devices) => devices,
        OneOrMany::One(device) => vec![device],
    };

    Ok(devices
        .into_iter()
        .filter(|d| {
            d.friendly_name
                .as_deref()
                .is_some_and(|name| category.matches(name))
        })
        .collect())
}
