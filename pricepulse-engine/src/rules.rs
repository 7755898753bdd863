use pricepulse_shared::{PriceFactor, PricingRule, Product, RuleKind};
use tracing::warn;

/// Combined output of one pass over the active rule set.
#[derive(Debug, Default)]
pub struct RuleOutcome {
    pub adjustment: f64,
    pub factors: Vec<PriceFactor>,
}

/// Apply the active rules in priority order (higher first, stable for
/// ties), accumulating non-zero adjustments and one factor per applied
/// rule. A rule evaluating to exactly 0 contributes nothing.
pub fn apply_rules(product: &Product, rules: &[PricingRule], now_hour: u8) -> RuleOutcome {
    let mut active: Vec<&PricingRule> = rules.iter().filter(|r| r.active).collect();
    active.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut outcome = RuleOutcome::default();
    for rule in active {
        let adjustment = evaluate_rule(rule, product, now_hour);
        if adjustment != 0.0 {
            outcome.adjustment += adjustment;
            outcome.factors.push(PriceFactor {
                name: format!("Rule: {}", rule.name),
                impact: adjustment,
                description: format!(
                    "Applied pricing rule \"{}\" with {}{:.1}% adjustment",
                    rule.name,
                    if adjustment > 0.0 { "+" } else { "" },
                    adjustment * 100.0
                ),
            });
        }
    }
    outcome
}

/// Evaluate a single rule against the product. A malformed condition or a
/// guarded division makes the rule a no-op rather than failing the call.
pub fn evaluate_rule(rule: &PricingRule, product: &Product, now_hour: u8) -> f64 {
    let Some(parameter) = parse_condition(rule) else {
        return 0.0;
    };

    match rule.kind {
        RuleKind::Margin => {
            let current_margin = (product.current_price - product.base_price) / product.base_price;
            rule.adjustment * (current_margin - parameter).tanh()
        }
        RuleKind::Competitive => {
            if product.current_price == 0.0 {
                return 0.0;
            }
            let diff = (parameter - product.current_price) / product.current_price;
            rule.adjustment * diff.tanh()
        }
        RuleKind::Inventory => {
            if parameter == 0.0 {
                return 0.0;
            }
            let ratio = f64::from(product.inventory) / parameter;
            rule.adjustment * (1.0 - ratio).tanh()
        }
        RuleKind::Time => {
            let hour_diff = (f64::from(now_hour) - parameter).abs();
            rule.adjustment * (-hour_diff / 4.0).exp()
        }
    }
}

/// Parse the rule's numeric parameter. Non-numeric and non-finite
/// conditions disable the rule for this pass.
fn parse_condition(rule: &PricingRule) -> Option<f64> {
    match rule.condition.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!(
                rule_id = %rule.id,
                rule_name = %rule.name,
                condition = %rule.condition,
                "skipping rule with non-numeric condition"
            );
            None
        }
    }
}
