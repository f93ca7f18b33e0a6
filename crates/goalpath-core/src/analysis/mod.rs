//! Goal analysis: turning a free-text goal into a [`ParsedGoal`] and the four
//! planning strategies.
//!
//! A [`PlanAnalyzer`] is the only asynchronous boundary in the crate. Its
//! failures never reach the caller: [`analyze_goal`] substitutes
//! [`fallback_analysis`] and records why in [`AnalysisSource`].

pub mod fallback;
pub mod http;
pub mod parse;
pub mod text;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::strategy::{
    DailyTask, ParsedGoal, PlanningStrategy, StrategyError, StrategyKind, generate_strategy,
};

pub use fallback::fallback_analysis;
pub use http::HttpPlanAnalyzer;
pub use parse::{AnalysisOutcome, AnalysisRejection, AnalyzedGoal, parse_analysis};
pub use text::parse_goal_text;

/// A remote collaborator that turns goal text into a plan description.
#[async_trait]
pub trait PlanAnalyzer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Send `goal` and return the raw response body.
    async fn request_plan(&self, goal: &str) -> anyhow::Result<String>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn PlanAnalyzer) {}
};

/// Where an analysis came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisSource {
    /// The plan service answered with a usable body.
    Service,
    /// The service failed; `reason` says how.
    Fallback { reason: String },
    /// No service was consulted.
    Local,
}

/// An analysis together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalAnalysis {
    pub analysis: AnalyzedGoal,
    pub source: AnalysisSource,
}

impl GoalAnalysis {
    pub fn goal(&self) -> &ParsedGoal {
        &self.analysis.goal
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, AnalysisSource::Fallback { .. })
    }
}

/// Ask `analyzer` about `goal_text`. Never fails.
///
/// Network errors, non-success statuses, empty bodies and bodies rejected by
/// [`parse_analysis`] all yield the fixed fallback plan.
pub async fn analyze_goal(analyzer: &dyn PlanAnalyzer, goal_text: &str) -> GoalAnalysis {
    let reason = match analyzer.request_plan(goal_text).await {
        Ok(body) => match parse_analysis(&body) {
            AnalysisOutcome::Parsed(analysis) => {
                info!(
                    analyzer = analyzer.name(),
                    title = %analysis.goal.title,
                    days = analysis.goal.timeframe_days,
                    "goal analyzed"
                );
                return GoalAnalysis {
                    analysis,
                    source: AnalysisSource::Service,
                };
            }
            AnalysisOutcome::Rejected(rejection) => rejection.to_string(),
        },
        Err(e) => format!("{e:#}"),
    };

    warn!(analyzer = analyzer.name(), %reason, "plan service unusable, using fallback plan");
    GoalAnalysis {
        analysis: fallback_analysis(goal_text),
        source: AnalysisSource::Fallback { reason },
    }
}

/// Analyze `goal_text` with the local text parser only.
pub fn analyze_offline(goal_text: &str) -> GoalAnalysis {
    GoalAnalysis {
        analysis: AnalyzedGoal::local(parse_goal_text(goal_text)),
        source: AnalysisSource::Local,
    }
}

/// The four strategies for an analysis, in [`StrategyKind::ALL`] order.
///
/// Service-authored step-by-step and progressive-load plans replace the
/// local ones; milestone and time-blocked are always generated locally.
pub fn build_strategies(analysis: &AnalyzedGoal) -> Result<Vec<PlanningStrategy>, StrategyError> {
    analysis.goal.validate()?;

    StrategyKind::ALL
        .iter()
        .map(|&kind| match service_plan(analysis, kind) {
            Some(plan) => Ok(PlanningStrategy::from_plan(kind, plan.to_vec())),
            None => generate_strategy(kind, &analysis.goal),
        })
        .collect()
}

fn service_plan(analysis: &AnalyzedGoal, kind: StrategyKind) -> Option<&[DailyTask]> {
    match kind {
        StrategyKind::StepByStep => analysis.step_by_step.as_deref(),
        StrategyKind::ProgressiveLoad => analysis.progressive_load.as_deref(),
        StrategyKind::Milestone | StrategyKind::TimeBlocked => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(anyhow::Result<&'static str>);

    #[async_trait]
    impl PlanAnalyzer for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn request_plan(&self, _goal: &str) -> anyhow::Result<String> {
            match &self.0 {
                Ok(body) => Ok(body.to_string()),
                Err(e) => Err(anyhow::anyhow!("{e}")),
            }
        }
    }

    #[tokio::test]
    async fn service_body_is_used_when_valid() {
        let analyzer = Canned(Ok(r#"{"title":"Read more","duration":"10","dailyTime":"15"}"#));
        let result = analyze_goal(&analyzer, "read more").await;
        assert_eq!(result.source, AnalysisSource::Service);
        assert_eq!(result.goal().timeframe_days, 10);
    }

    #[tokio::test]
    async fn errors_fall_back() {
        let analyzer = Canned(Err(anyhow::anyhow!("connection refused")));
        let result = analyze_goal(&analyzer, "Read more").await;
        assert!(result.is_fallback());
        assert_eq!(result.goal().timeframe_days, 2);

        let analyzer = Canned(Ok("<html>oops</html>"));
        assert!(analyze_goal(&analyzer, "Read more").await.is_fallback());
    }

    #[test]
    fn offline_uses_text_parser() {
        let result = analyze_offline("Run 5k in 6 weeks, 30 minutes a day");
        assert_eq!(result.source, AnalysisSource::Local);
        assert_eq!(result.goal().timeframe_days, 42);
        assert_eq!(result.goal().daily_time_minutes, 30);
    }

    #[test]
    fn service_plans_replace_local_ones() {
        let analysis = fallback_analysis("Paint a mural");
        let strategies = build_strategies(&analysis).unwrap();
        let ids: Vec<StrategyKind> = strategies.iter().map(|s| s.id).collect();
        assert_eq!(ids, StrategyKind::ALL.to_vec());
        assert_eq!(strategies[0].plan, analysis.step_by_step.clone().unwrap());
        assert_eq!(strategies[1].plan, analysis.progressive_load.clone().unwrap());
    }
}
