//! Parsing and argument building for `powercfg`.

use regex::Regex;

use crate::core::tuning::{CoreParking, PowerPlan};

pub const SUB_PROCESSOR: &str = "SUB_PROCESSOR";
/// Minimum percentage of unparked cores.
pub const CPMINCORES: &str = "CPMINCORES";
pub const CPMAXCORES: &str = "CPMAXCORES";
/// Minimum processor state.
pub const PROCTHROTTLEMIN: &str = "PROCTHROTTLEMIN";

/// Parse `powercfg /list` output. Lines without a scheme GUID are skipped.
pub fn parse_power_plans(output: &str) -> Vec<PowerPlan> {
    let re = match Regex::new(
        r"(?i)([0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})\s*\(([^)]*)\)\s*(\*)?",
    ) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    output
        .lines()
        .filter_map(|line| re.captures(line))
        .map(|caps| PowerPlan {
            guid: caps[1].to_lowercase(),
            name: caps[2].trim().to_string(),
            active: caps.get(3).is_some(),
        })
        .collect()
}

/// A scheme GUID as accepted by `powercfg /setactive`.
pub fn is_valid_guid(guid: &str) -> bool {
    Regex::new(r"^(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .map(|re| re.is_match(guid))
        .unwrap_or(false)
}

/// Argument lists applying a processor setting on AC and DC power for the active scheme.
pub fn processor_value_args(setting: &str, value: u32) -> [Vec<String>; 2] {
    let value = value.to_string();
    ["/setacvalueindex", "/setdcvalueindex"].map(|verb| {
        vec![
            verb.to_string(),
            "SCHEME_CURRENT".to_string(),
            SUB_PROCESSOR.to_string(),
            setting.to_string(),
            value.clone(),
        ]
    })
}

pub fn core_parking_args(bounds: CoreParking) -> Vec<Vec<String>> {
    let mut args = Vec::new();
    args.extend(processor_value_args(CPMINCORES, u32::from(bounds.min_percent())));
    args.extend(processor_value_args(CPMAXCORES, u32::from(bounds.max_percent())));
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_OUTPUT: &str = "\
Existing Power Schemes (* Active)
-----------------------------------
Power Scheme GUID: 381b4222-f694-41f0-9685-ff5bb260df2e  (Balanced)
Power Scheme GUID: 8C5E7FDA-E8BF-4A96-9A85-A6E23A8C635C  (High performance) *
Power Scheme GUID: a1841308-3541-4fab-bc81-f71556f20b4a  (Power saver)
";

    #[test]
    fn test_parse_power_plans() {
        let plans = parse_power_plans(LIST_OUTPUT);
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].name, "Balanced");
        assert!(!plans[0].active);
        assert_eq!(plans[1].guid, "8c5e7fda-e8bf-4a96-9a85-a6e23a8c635c");
        assert_eq!(plans[1].name, "High performance");
        assert!(plans[1].active);
    }

    #[test]
    fn test_parse_garbage_is_empty() {
        assert!(parse_power_plans("Access denied.\r\n").is_empty());
    }

    #[test]
    fn test_guid_validation() {
        assert!(is_valid_guid("381b4222-f694-41f0-9685-ff5bb260df2e"));
        assert!(!is_valid_guid("381b4222; shutdown /s"));
        assert!(!is_valid_guid(""));
    }

    #[test]
    fn test_core_parking_args() {
        let args = core_parking_args(CoreParking::new(75, 100));
        assert_eq!(args.len(), 4);
        assert_eq!(
            args[0],
            vec!["/setacvalueindex", "SCHEME_CURRENT", "SUB_PROCESSOR", "CPMINCORES", "75"]
        );
        assert_eq!(args[3][4], "100");
    }
}
