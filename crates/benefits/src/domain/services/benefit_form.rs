//! Benefit Form
//!
//! Builds the complete MutationRequest a create or edit dialog submits.
//! Edits are merged over the previous entity here, never by the store.

use rust_decimal::Decimal;

use crate::domain::entities::{Benefit, MutationRequest, DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS};
use crate::domain::value_objects::FormViolation;

/// Fields the user touched; `None` keeps the previous value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenefitDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub active: Option<bool>,
}

impl BenefitDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Merge `draft` over `previous` and check the field constraints.
///
/// Blank text counts as missing. `active` falls back to the previous
/// value, then to `true`.
pub fn build_mutation_request(
    previous: Option<&Benefit>,
    draft: BenefitDraft,
) -> Result<MutationRequest, Vec<FormViolation>> {
    let name = draft
        .name
        .or_else(|| previous.map(|p| p.name.clone()))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let description = draft
        .description
        .or_else(|| previous.and_then(|p| p.description.clone()))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let amount = draft.amount.or_else(|| previous.map(|p| p.amount));
    let active = draft
        .active
        .or_else(|| previous.map(|p| p.active))
        .unwrap_or(true);

    let mut violations = Vec::new();

    match &name {
        None => violations.push(FormViolation::NameRequired),
        Some(n) if n.chars().count() > NAME_MAX_CHARS => violations.push(FormViolation::NameTooLong),
        Some(_) => {}
    }

    match &description {
        None => violations.push(FormViolation::DescriptionRequired),
        Some(d) if d.chars().count() > DESCRIPTION_MAX_CHARS => {
            violations.push(FormViolation::DescriptionTooLong)
        }
        Some(_) => {}
    }

    match amount {
        None => violations.push(FormViolation::AmountRequired),
        Some(a) if a <= Decimal::ZERO => violations.push(FormViolation::AmountNotPositive),
        Some(_) => {}
    }

    match (name, description, amount) {
        (Some(name), Some(description), Some(amount)) if violations.is_empty() => {
            Ok(MutationRequest {
                name,
                description,
                amount,
                active: Some(active),
            })
        }
        _ => Err(violations),
    }
}
