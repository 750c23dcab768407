//! Registry values written by each network tuning mode.

use crate::core::tuning::NetworkMode;

pub const TCPIP_PARAMETERS: &str = r"SYSTEM\CurrentControlSet\Services\Tcpip\Parameters";
pub const TCPIP_INTERFACES: &str = r"SYSTEM\CurrentControlSet\Services\Tcpip\Parameters\Interfaces";
pub const NDIS_PARAMETERS: &str = r"SYSTEM\CurrentControlSet\Services\Ndis\Parameters";

const TCP_PARAMETERS: [(&str, u32); 6] = [
    ("TcpTimedWaitDelay", 30),
    ("MaxUserPort", 65534),
    ("TcpNumConnections", 16_777_214),
    ("DefaultTTL", 64),
    ("EnablePMTUDiscovery", 1),
    ("EnableTCPA", 1),
];

const RESET_VALUES: [&str; 5] = [
    "TcpAckFrequency",
    "TCPNoDelay",
    "TcpTimedWaitDelay",
    "MaxUserPort",
    "TcpNumConnections",
];

/// Values to write (or delete) for one mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkPlan {
    /// Written under every key in `Interfaces`.
    pub interface_values: Vec<(&'static str, u32)>,
    /// Written under `Tcpip\Parameters`.
    pub global_values: Vec<(&'static str, u32)>,
    /// `Ndis\Parameters\RSS`.
    pub rss: Option<bool>,
    /// Removed from `Tcpip\Parameters` and every interface key.
    pub delete_values: Vec<&'static str>,
}

pub fn network_plan(mode: NetworkMode) -> NetworkPlan {
    match mode {
        NetworkMode::Gaming => {
            let mut global_values = vec![("TCPNoDelay", 1)];
            global_values.extend(TCP_PARAMETERS);
            NetworkPlan {
                interface_values: vec![("TcpAckFrequency", 1), ("TCPNoDelay", 1)],
                global_values,
                rss: Some(true),
                delete_values: Vec::new(),
            }
        }
        NetworkMode::Streaming => {
            let mut global_values = vec![("TcpWindowSize", 65536)];
            global_values.extend(TCP_PARAMETERS);
            NetworkPlan {
                interface_values: vec![("TcpAckFrequency", 2), ("TCPNoDelay", 2)],
                global_values,
                rss: Some(true),
                delete_values: Vec::new(),
            }
        }
        NetworkMode::General => NetworkPlan {
            global_values: TCP_PARAMETERS.to_vec(),
            ..Default::default()
        },
        NetworkMode::Default => NetworkPlan {
            delete_values: RESET_VALUES.to_vec(),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaming_plan() {
        let plan = network_plan(NetworkMode::Gaming);
        assert_eq!(plan.interface_values, vec![("TcpAckFrequency", 1), ("TCPNoDelay", 1)]);
        assert_eq!(plan.global_values[0], ("TCPNoDelay", 1));
        assert!(plan.global_values.contains(&("MaxUserPort", 65534)));
        assert_eq!(plan.rss, Some(true));
    }

    #[test]
    fn test_streaming_plan_sets_receive_window() {
        let plan = network_plan(NetworkMode::Streaming);
        assert_eq!(plan.interface_values[0], ("TcpAckFrequency", 2));
        assert!(plan.global_values.contains(&("TcpWindowSize", 65536)));
    }

    #[test]
    fn test_general_plan_only_tunes_tcp() {
        let plan = network_plan(NetworkMode::General);
        assert!(plan.interface_values.is_empty());
        assert_eq!(plan.global_values.len(), 6);
        assert_eq!(plan.rss, None);
    }

    #[test]
    fn test_default_plan_deletes() {
        let plan = network_plan(NetworkMode::Default);
        assert!(plan.global_values.is_empty());
        assert_eq!(plan.delete_values.len(), 5);
    }
}
