use super::{BoostHit, ScoringInput};

const PHONE_MIN_LENGTH: usize = 5;
const PHONE_POINTS: i32 = 3;

/// Built-in boosts applied after configured rules: phone presence, then value-estimate tier.
pub(crate) fn fixed_boosts(input: &ScoringInput) -> Vec<BoostHit> {
    phone_boost(input.phone.as_deref())
        .into_iter()
        .chain(value_estimate_boost(input.value_estimate))
        .collect()
}

fn phone_boost(phone: Option<&str>) -> Option<BoostHit> {
    let phone = phone?;
    if phone.trim().chars().count() <= PHONE_MIN_LENGTH {
        return None;
    }

    Some(BoostHit {
        rule: "has phone number".to_string(),
        points: PHONE_POINTS,
    })
}

fn value_estimate_boost(value_estimate: Option<f64>) -> Option<BoostHit> {
    let value = value_estimate.filter(|value| *value > 0.0)?;
    let points = if value >= 5000.0 {
        10
    } else if value >= 1000.0 {
        5
    } else {
        2
    };

    Some(BoostHit {
        rule: format!("value estimate £{value}"),
        points,
    })
}
