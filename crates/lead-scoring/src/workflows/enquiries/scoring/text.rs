use super::ScoringInput;

/// Lowercased `name email message notes`, skipping absent or empty fields.
pub(crate) fn searchable_text(input: &ScoringInput) -> String {
    [&input.name, &input.email, &input.message, &input.notes]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
