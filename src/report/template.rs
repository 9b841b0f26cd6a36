//! Deterministic work-order generator for offline sites
//!
//! Produces the same three sections as the chat prompt asks for, filled from
//! fixed wording per state. Identical requests yield identical text.

use async_trait::async_trait;
use std::fmt;

use super::{ReportError, ReportGenerator, ReportRequest};
use crate::types::HealthState;

/// Kurtosis of a Gaussian signal; values above it indicate impulsive content.
const GAUSSIAN_KURTOSIS: f64 = 3.0;

pub struct TemplateReportGenerator;

struct Actions {
    immediate: &'static str,
    parts: &'static str,
    priority: &'static str,
}

const fn actions_for(state: HealthState) -> Actions {
    match state {
        HealthState::Normal => Actions {
            immediate: "Continue routine condition monitoring",
            parts: "None",
            priority: "Routine",
        },
        HealthState::Warning => Actions {
            immediate: "Shorten the monitoring interval, check lubrication and plan an inspection at the next scheduled stop",
            parts: "Specified grease; replacement bearing and seals on standby",
            priority: "Normal",
        },
        HealthState::Failure => Actions {
            immediate: "Stop the machine at the earliest safe opportunity and replace the bearing",
            parts: "Bearing of the same designation, seals, lock nut and washer, specified grease",
            priority: "Urgent",
        },
    }
}

fn kurtosis_finding(kurtosis: f64) -> &'static str {
    if kurtosis > GAUSSIAN_KURTOSIS {
        "impulsive content above the Gaussian baseline, consistent with a localized defect"
    } else {
        "no impulsive content beyond the Gaussian baseline"
    }
}

fn overall_finding(state: HealthState) -> &'static str {
    match state {
        HealthState::Normal => "Vibration levels are within the normal operating band.",
        HealthState::Warning => "Early-stage degradation; the bearing can run under closer monitoring.",
        HealthState::Failure => "Advanced degradation; continued running risks secondary damage.",
    }
}

/// Work order text for one request, written through `Display`.
pub struct WorkOrder<'a>(pub &'a ReportRequest);

impl fmt::Display for WorkOrder<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let request = self.0;
        let f = &request.features;
        let actions = actions_for(request.state);

        writeln!(out, "## Maintenance Work Order: {}", request.equipment)?;
        writeln!(out)?;
        writeln!(out, "### 1. Diagnosis Summary")?;
        writeln!(out, "- Current state: **{}** ({})", request.state, request.state.maintenance_hint())?;
        writeln!(out, "- Remaining useful life: approximately **{:.1} hours**", request.rul_hours)?;
        writeln!(out)?;
        writeln!(out, "### 2. Cause Analysis")?;
        writeln!(out, "- **RMS ({:.3})**: overall vibration energy; peak amplitude {:.3}", f.rms, f.max_amp)?;
        writeln!(out, "- **Kurtosis ({:.3})**: {}", f.kurtosis, kurtosis_finding(f.kurtosis))?;
        writeln!(out, "- Overall finding: {}", overall_finding(request.state))?;
        writeln!(out)?;
        writeln!(out, "### 3. Recommended Actions")?;
        writeln!(out, "- **Immediate action**: {}", actions.immediate)?;
        writeln!(out, "- **Replacement parts**: {}", actions.parts)?;
        writeln!(out, "- **Work priority**: {}", actions.priority)?;

        if !request.manual_context.is_empty() {
            writeln!(out)?;
            writeln!(out, "### Reference Manual")?;
            for excerpt in &request.manual_context {
                writeln!(out, "> {}", excerpt.replace('\n', "\n> "))?;
            }
        }
        Ok(())
    }
}

/// Render the work order. `generate` only wraps it.
pub fn render(request: &ReportRequest) -> String {
    WorkOrder(request).to_string()
}

#[async_trait]
impl ReportGenerator for TemplateReportGenerator {
    async fn generate(&self, request: &ReportRequest) -> Result<String, ReportError> {
        Ok(render(request))
    }

    fn name(&self) -> &'static str {
        "template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeatureSet;

    fn request(state: HealthState) -> ReportRequest {
        ReportRequest {
            equipment: "BEARING-1".to_string(),
            state,
            rul_hours: 24.0,
            features: FeatureSet::new(0.9, 0.4, 2.5, 6.2, 0.2),
            manual_context: vec!["Line one\nLine two".to_string()],
        }
    }

    #[tokio::test]
    async fn test_failure_work_order() {
        let report = TemplateReportGenerator
            .generate(&request(HealthState::Failure))
            .await
            .unwrap();
        assert!(report.contains("**Failure** (Urgent replacement required)"));
        assert!(report.contains("approximately **24.0 hours**"));
        assert!(report.contains("**Kurtosis (6.200)**: impulsive content"));
        assert!(report.contains("**Work priority**: Urgent"));
        assert!(report.contains("> Line one\n> Line two"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let req = request(HealthState::Warning);
        assert_eq!(render(&req), render(&req));
        assert!(render(&req).contains("**Work priority**: Normal"));
    }

    #[test]
    fn test_no_manual_section_without_context() {
        let mut req = request(HealthState::Warning);
        req.manual_context.clear();
        assert!(!render(&req).contains("Reference Manual"));
    }

    #[test]
    fn test_display_matches_render() {
        let req = request(HealthState::Failure);
        let text = format!("{}", WorkOrder(&req));
        assert_eq!(text, render(&req));
        assert!(text.starts_with("## Maintenance Work Order: BEARING-1\n\n### 1. Diagnosis Summary\n"));
        assert!(text.ends_with("> Line one\n> Line two\n"));
    }
}
