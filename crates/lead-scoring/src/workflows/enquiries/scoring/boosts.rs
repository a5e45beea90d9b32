use super::config::{BoostCondition, BoostField, BoostRule};
use super::{BoostHit, ScoringInput};

enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

fn field_value(input: &ScoringInput, field: BoostField) -> Option<FieldValue<'_>> {
    match field {
        BoostField::Source => input.source.as_deref().map(FieldValue::Text),
        BoostField::Postcode => input.postcode.as_deref().map(FieldValue::Text),
        BoostField::ValueEstimate => input.value_estimate.map(FieldValue::Number),
    }
}

/// Text conditions on `valueEstimate` compare against Rust's `f64` display form, so `1e21`
/// reads as `1000000000000000000000` and `-0.0` as `-0`.
fn condition_matches(value: &FieldValue<'_>, condition: BoostCondition, expected: &str) -> bool {
    match (condition, value) {
        (BoostCondition::Equals, FieldValue::Text(text)) => {
            text.to_lowercase() == expected.to_lowercase()
        }
        (BoostCondition::Equals, FieldValue::Number(number)) => {
            number.to_string() == expected.to_lowercase()
        }
        (BoostCondition::Contains, FieldValue::Text(text)) => text
            .to_lowercase()
            .contains(expected.to_lowercase().as_str()),
        (BoostCondition::Contains, FieldValue::Number(number)) => number
            .to_string()
            .contains(expected.to_lowercase().as_str()),
        (BoostCondition::Gte, FieldValue::Number(number)) => {
            parse_number(expected).is_some_and(|limit| *number >= limit)
        }
        (BoostCondition::Lte, FieldValue::Number(number)) => {
            parse_number(expected).is_some_and(|limit| *number <= limit)
        }
        (BoostCondition::Gte | BoostCondition::Lte, FieldValue::Text(_)) => false,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Configured boost rules that fire for `input`, in config order. Rules reading an absent
/// field are skipped.
pub(crate) fn evaluate_boost_rules(input: &ScoringInput, rules: &[BoostRule]) -> Vec<BoostHit> {
    rules
        .iter()
        .filter(|rule| {
            field_value(input, rule.field)
                .is_some_and(|value| condition_matches(&value, rule.condition, &rule.value))
        })
        .map(|rule| BoostHit {
            rule: rule.description(),
            points: rule.points,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(field: BoostField, condition: BoostCondition, value: &str, points: i32) -> BoostRule {
        BoostRule {
            field,
            condition,
            value: value.to_string(),
            points,
        }
    }

    #[test]
    fn text_conditions_ignore_case() {
        let input = ScoringInput {
            source: Some("Google Ads".to_string()),
            postcode: Some("SW1A 1AA".to_string()),
            ..ScoringInput::default()
        };
        let rules = vec![
            rule(BoostField::Source, BoostCondition::Equals, "google ads", 5),
            rule(BoostField::Postcode, BoostCondition::Contains, "sw1a", 4),
            rule(BoostField::Source, BoostCondition::Equals, "google", 9),
        ];

        let hits = evaluate_boost_rules(&input, &rules);

        assert_eq!(
            hits,
            vec![
                BoostHit {
                    rule: "source equals google ads".to_string(),
                    points: 5
                },
                BoostHit {
                    rule: "postcode contains sw1a".to_string(),
                    points: 4
                },
            ]
        );
    }

    #[test]
    fn numeric_conditions_compare_value_estimate() {
        let input = ScoringInput {
            value_estimate: Some(2500.0),
            ..ScoringInput::default()
        };
        let rules = vec![
            rule(BoostField::ValueEstimate, BoostCondition::Gte, "2500", 6),
            rule(BoostField::ValueEstimate, BoostCondition::Lte, "1000", 3),
            rule(BoostField::ValueEstimate, BoostCondition::Lte, " 3000 ", 2),
            rule(BoostField::ValueEstimate, BoostCondition::Equals, "2500", 1),
        ];

        let hits = evaluate_boost_rules(&input, &rules);

        let fired: Vec<_> = hits.iter().map(|hit| hit.rule.as_str()).collect();
        assert_eq!(
            fired,
            vec![
                "valueEstimate gte 2500",
                "valueEstimate lte  3000 ",
                "valueEstimate equals 2500"
            ]
        );
    }

    #[test]
    fn text_conditions_on_value_estimate_use_display_form() {
        let large = ScoringInput {
            value_estimate: Some(1e21),
            ..ScoringInput::default()
        };
        let negative_zero = ScoringInput {
            value_estimate: Some(-0.0),
            ..ScoringInput::default()
        };
        let rules = vec![
            rule(BoostField::ValueEstimate, BoostCondition::Equals, "1e21", 5),
            rule(
                BoostField::ValueEstimate,
                BoostCondition::Equals,
                "1000000000000000000000",
                4,
            ),
            rule(BoostField::ValueEstimate, BoostCondition::Equals, "-0", 3),
        ];

        let fired: Vec<_> = evaluate_boost_rules(&large, &rules)
            .into_iter()
            .map(|hit| hit.points)
            .collect();
        assert_eq!(fired, vec![4]);
        let fired: Vec<_> = evaluate_boost_rules(&negative_zero, &rules)
            .into_iter()
            .map(|hit| hit.points)
            .collect();
        assert_eq!(fired, vec![3]);
    }

    #[test]
    fn numeric_conditions_on_text_fields_never_match() {
        let input = ScoringInput {
            postcode: Some("90210".to_string()),
            ..ScoringInput::default()
        };
        let rules = vec![
            rule(BoostField::Postcode, BoostCondition::Gte, "1", 5),
            rule(BoostField::Postcode, BoostCondition::Lte, "99999", 5),
        ];

        assert!(evaluate_boost_rules(&input, &rules).is_empty());
    }

    #[test]
    fn absent_fields_skip_rules() {
        let rules = vec![
            rule(BoostField::ValueEstimate, BoostCondition::Gte, "0", 5),
            rule(BoostField::ValueEstimate, BoostCondition::Lte, "100000", 5),
            rule(BoostField::Source, BoostCondition::Contains, "", 5),
        ];

        assert!(evaluate_boost_rules(&ScoringInput::default(), &rules).is_empty());
    }

    #[test]
    fn unparseable_numeric_values_never_match() {
        let input = ScoringInput {
            value_estimate: Some(10.0),
            ..ScoringInput::default()
        };
        let rules = vec![
            rule(BoostField::ValueEstimate, BoostCondition::Gte, "ten", 5),
            rule(BoostField::ValueEstimate, BoostCondition::Lte, "", 5),
        ];

        assert!(evaluate_boost_rules(&input, &rules).is_empty());
    }
}
