use serde::{Deserialize, Serialize};

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_mothers: usize,
    pub total_children: usize,
    pub total_visits: usize,
    pub today_visits: usize,
    pub high_risk_mothers: usize,
    /// Children whose status is exactly `needs_attention`; critical children are not included.
    pub children_needing_attention: usize,
}
