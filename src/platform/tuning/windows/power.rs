use super::super::powercfg::{self, PROCTHROTTLEMIN};
use super::command::run;
use crate::core::tuning::{CoreParking, PowerPlan, TuningError, TuningResult};

const POWERCFG: &str = "powercfg";

fn powercfg(args: Vec<String>) -> TuningResult<String> {
    run(POWERCFG, &args)
}

// Processor index changes only take effect once the scheme is re-applied.
fn reapply_current_scheme() -> TuningResult<()> {
    powercfg(vec!["/setactive".to_string(), "SCHEME_CURRENT".to_string()]).map(|_| ())
}

pub fn list_plans() -> TuningResult<Vec<PowerPlan>> {
    let output = powercfg(vec!["/list".to_string()])?;
    let plans = powercfg::parse_power_plans(&output);
    if plans.is_empty() {
        return Err(TuningError::command("powercfg /list returned no power schemes"));
    }
    Ok(plans)
}

pub fn set_active_plan(guid: &str) -> TuningResult<()> {
    if !powercfg::is_valid_guid(guid) {
        return Err(TuningError::invalid_parameter(format!(
            "'{}' is not a power scheme GUID",
            guid
        )));
    }
    powercfg(vec!["/setactive".to_string(), guid.to_string()]).map(|_| ())
}

pub fn set_core_parking(bounds: CoreParking) -> TuningResult<()> {
    for args in powercfg::core_parking_args(bounds) {
        powercfg(args)?;
    }
    reapply_current_scheme()
}

/// Pin the minimum processor state at 100%.
pub fn disable_throttling() -> TuningResult<()> {
    for args in powercfg::processor_value_args(PROCTHROTTLEMIN, 100) {
        powercfg(args)?;
    }
    reapply_current_scheme()
}
