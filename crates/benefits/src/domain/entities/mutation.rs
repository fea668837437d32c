//! MutationRequest - Create/update payload for a Benefit

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum name length accepted by the store
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum description length accepted by the store
pub const DESCRIPTION_MAX_CHARS: usize = 255;

/// A Benefit without id, version or timestamps.
///
/// On update this is the full replacement of the mutable fields; build it
/// with [`crate::build_mutation_request`] so unedited fields are carried over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub amount: Decimal,
    /// Defaults to true on create when absent
    #[serde(rename = "ativo", default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl MutationRequest {
    /// Whether the field constraints hold. Callers are expected to only
    /// submit requests for which this is true.
    pub fn is_well_formed(&self) -> bool {
        !self.name.trim().is_empty()
            && self.name.chars().count() <= NAME_MAX_CHARS
            && !self.description.trim().is_empty()
            && self.description.chars().count() <= DESCRIPTION_MAX_CHARS
            && self.amount > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(name: &str, description: &str, amount: Decimal) -> MutationRequest {
        MutationRequest {
            name: name.to_string(),
            description: description.to_string(),
            amount,
            active: None,
        }
    }

    #[test]
    fn test_well_formed() {
        assert!(request("Meal", "Daily meal allowance", dec!(0.01)).is_well_formed());
        assert!(!request("  ", "Daily meal allowance", dec!(10)).is_well_formed());
        assert!(!request("Meal", "", dec!(10)).is_well_formed());
        assert!(!request("Meal", "Daily", dec!(0)).is_well_formed());
        assert!(!request(&"x".repeat(101), "Daily", dec!(1)).is_well_formed());
    }

    #[test]
    fn test_active_omitted_when_unset() {
        let value = serde_json::to_value(request("Meal", "Daily", dec!(5))).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "nome": "Meal", "descricao": "Daily", "valor": 5.0 })
        );

        let value = serde_json::to_value(MutationRequest {
            active: Some(false),
            ..request("Meal", "Daily", dec!(5))
        })
        .unwrap();
        assert_eq!(value["ativo"], false);
    }
}
