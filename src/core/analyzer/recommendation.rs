use serde::Serialize;

use super::SystemAnalysisResult;
use crate::core::profiles::ProfileType;

const RAM_PRESSURE_PERCENT: f32 = 80.0;
const CPU_PRESSURE_PERCENT: f32 = 70.0;
const LOW_LOAD_PERCENT: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecommendationKind {
    GamingOpt,
    StreamingOpt,
    MemoryOpt,
    NetworkOpt,
    PowerOpt,
    WorkstationOpt,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub can_auto_apply: bool,
}

impl Recommendation {
    /// Built-in profile that acts on this recommendation, if any.
    pub fn suggested_profile(&self) -> Option<ProfileType> {
        match self.kind {
            RecommendationKind::GamingOpt => Some(ProfileType::Gaming),
            RecommendationKind::StreamingOpt => Some(ProfileType::Streaming),
            RecommendationKind::WorkstationOpt => Some(ProfileType::Workstation),
            _ => None,
        }
    }
}

/// Apply the fixed threshold rules and sort by priority, highest first.
///
/// The sort is stable, so equal priorities keep rule order.
pub fn build_recommendations(result: &SystemAnalysisResult) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if result.has_gaming_process {
        recommendations.push(Recommendation {
            kind: RecommendationKind::GamingOpt,
            title: "Gaming Process Detected".to_string(),
            description: "Apply Gaming profile for optimal performance: 0.5ms timer, \
                          disabled core parking, network optimizations"
                .to_string(),
            priority: 10,
            can_auto_apply: true,
        });
    }

    if result.has_streaming_process {
        recommendations.push(Recommendation {
            kind: RecommendationKind::StreamingOpt,
            title: "Streaming Software Detected".to_string(),
            description: "Apply Streaming profile: balanced CPU usage, optimized network \
                          buffers, long thread quantum"
                .to_string(),
            priority: 9,
            can_auto_apply: true,
        });
    }

    if result.ram_usage_percent > RAM_PRESSURE_PERCENT {
        recommendations.push(Recommendation {
            kind: RecommendationKind::MemoryOpt,
            title: "High Memory Usage".to_string(),
            description: format!(
                "RAM usage at {}%. Consider clearing standby list or optimizing memory priority.",
                result.ram_usage_percent.round() as i64
            ),
            priority: 7,
            can_auto_apply: false,
        });
    }

    if result.cpu_usage_percent > CPU_PRESSURE_PERCENT {
        recommendations.push(Recommendation {
            kind: RecommendationKind::PowerOpt,
            title: "High CPU Usage".to_string(),
            description: format!(
                "CPU usage at {}%. Ensure core parking is disabled and high performance power plan is active.",
                result.cpu_usage_percent.round() as i64
            ),
            priority: 6,
            can_auto_apply: true,
        });
    }

    if !result.has_gaming_process
        && !result.has_streaming_process
        && result.cpu_usage_percent < LOW_LOAD_PERCENT
    {
        recommendations.push(Recommendation {
            kind: RecommendationKind::WorkstationOpt,
            title: "Low System Load".to_string(),
            description: "System is underutilized. Consider Balanced or Workstation profile \
                          for better power efficiency."
                .to_string(),
            priority: 3,
            can_auto_apply: false,
        });
    }

    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
    recommendations
}
