//! Fixed persona and canned quick-action prompts

use serde_json::Value;

/// Persona sent as the system instruction on every provider call
pub const SYSTEM_PROMPT: &str = "You are an expert campaign analysis AI assistant specialized in digital advertising performance optimization. You have deep expertise in:

- Campaign performance metrics and KPI analysis
- ROI and ROAS optimization strategies
- A/B testing methodologies
- Audience segmentation and targeting
- Creative performance analysis
- Budget allocation optimization
- Multi-channel attribution modeling

Your responses should be:
- Highly actionable with specific recommendations
- Data-driven and analytical
- Professional and concise
- Focused on improving campaign performance
- Include relevant metrics and benchmarks when applicable

Always provide specific, implementable strategies rather than generic advice.";

/// Named shortcuts that expand to a canned analytic prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    AnalyzePerformance,
    OptimizeBudget,
    ImproveTargeting,
    CreativeInsights,
    CompetitorAnalysis,
    RoiOptimization,
}

impl QuickAction {
    pub const ALL: [QuickAction; 6] = [
        QuickAction::AnalyzePerformance,
        QuickAction::OptimizeBudget,
        QuickAction::ImproveTargeting,
        QuickAction::CreativeInsights,
        QuickAction::CompetitorAnalysis,
        QuickAction::RoiOptimization,
    ];

    /// Look up an action by its wire name (e.g. `optimize_budget`)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            QuickAction::AnalyzePerformance => "analyze_performance",
            QuickAction::OptimizeBudget => "optimize_budget",
            QuickAction::ImproveTargeting => "improve_targeting",
            QuickAction::CreativeInsights => "creative_insights",
            QuickAction::CompetitorAnalysis => "competitor_analysis",
            QuickAction::RoiOptimization => "roi_optimization",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            QuickAction::AnalyzePerformance => "Analyze the current campaign performance data and provide 3 specific optimization recommendations.",
            QuickAction::OptimizeBudget => "Review the budget allocation across channels and suggest reallocation strategies for better ROI.",
            QuickAction::ImproveTargeting => "Analyze the current audience targeting and suggest improvements for better engagement.",
            QuickAction::CreativeInsights => "Provide insights on creative performance and suggest A/B testing strategies.",
            QuickAction::CompetitorAnalysis => "Analyze competitor strategies and suggest differentiation tactics.",
            QuickAction::RoiOptimization => "Review ROI metrics and provide specific strategies to improve return on investment.",
        }
    }
}

/// Build the prompt for a quick action.
///
/// Known action names expand to their template; anything else is sent verbatim,
/// which lets callers use free text as an ad-hoc action. A non-empty `context`
/// is appended as compact JSON under a `Context:` label.
pub fn build_quick_action_prompt(action: &str, context: Option<&Value>) -> String {
    let mut prompt = match QuickAction::from_name(action) {
        Some(known) => known.template().to_string(),
        None => action.to_string(),
    };

    if let Some(context) = context.filter(|c| is_present(c)) {
        prompt.push_str("\n\nContext: ");
        prompt.push_str(&context.to_string());
    }

    prompt
}

/// Empty containers, empty strings, null, false and zero count as "no context"
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_action_round_trips_by_name() {
        for action in QuickAction::ALL {
            assert_eq!(QuickAction::from_name(action.name()), Some(action));
        }
        assert_eq!(QuickAction::from_name("Optimize_Budget"), None);
    }

    #[test]
    fn test_known_action_uses_template() {
        let prompt = build_quick_action_prompt("optimize_budget", None);
        assert_eq!(
            prompt,
            "Review the budget allocation across channels and suggest reallocation strategies for better ROI."
        );
    }

    #[test]
    fn test_unknown_action_is_forwarded_verbatim() {
        let prompt = build_quick_action_prompt("Why did CPC spike on Tuesday?", None);
        assert_eq!(prompt, "Why did CPC spike on Tuesday?");
    }

    #[test]
    fn test_context_is_appended() {
        let context = json!({"channel": "search", "spend": 1200});
        let prompt = build_quick_action_prompt("roi_optimization", Some(&context));

        assert!(prompt.starts_with(QuickAction::RoiOptimization.template()));
        assert!(prompt.ends_with("\n\nContext: {\"channel\":\"search\",\"spend\":1200}"));
    }

    #[test]
    fn test_empty_context_is_ignored() {
        for empty in [json!(null), json!({}), json!([]), json!(""), json!(false), json!(0)] {
            let prompt = build_quick_action_prompt("creative_insights", Some(&empty));
            assert_eq!(prompt, QuickAction::CreativeInsights.template());
        }
    }

    #[test]
    fn test_system_prompt_persona() {
        assert!(SYSTEM_PROMPT.starts_with("You are an expert campaign analysis AI assistant"));
        assert!(SYSTEM_PROMPT.contains("Highly actionable"));
        assert!(SYSTEM_PROMPT.contains("Data-driven"));
    }
}
