//! Benefit - A named monetary allowance
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store
pub type BenefitId = i64;

/// Benefit account holding a balance.
///
/// Serialized with the keys the benefits server uses (`nome`, `valor`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benefit {
    /// Absent until the store assigns one; never changes afterwards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BenefitId>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current balance, never negative
    #[serde(rename = "valor")]
    pub amount: Decimal,
    #[serde(rename = "ativo")]
    pub active: bool,
    /// Optimistic lock counter, echoed back untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Benefit {
    /// Create a not-yet-persisted, active Benefit
    pub fn new(name: impl Into<String>, description: Option<String>, amount: Decimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            amount,
            active: true,
            version: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether this Benefit carries the given id
    pub fn has_id(&self, id: BenefitId) -> bool {
        self.id == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_benefit_is_transient_and_active() {
        let benefit = Benefit::new("Meal", None, dec!(150.00));
        assert!(benefit.id.is_none());
        assert!(benefit.active);
        assert!(benefit.version.is_none());
    }

    #[test]
    fn test_deserialize_server_payload() {
        let data = serde_json::json!({
            "id": 7,
            "nome": "Transport",
            "descricao": "Monthly pass",
            "valor": 320.5,
            "ativo": true,
            "version": 3,
            "createdAt": "2024-03-01T09:30:00",
            "updatedAt": "2024-03-02T10:00:00.123456"
        });

        let benefit: Benefit = serde_json::from_value(data).unwrap();
        assert!(benefit.has_id(7));
        assert_eq!(benefit.name, "Transport");
        assert_eq!(benefit.description.as_deref(), Some("Monthly pass"));
        assert_eq!(benefit.amount, dec!(320.5));
        assert_eq!(benefit.version, Some(3));
        assert!(benefit.created_at.is_some());
        assert!(benefit.updated_at.is_some());
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let data = serde_json::json!({
            "nome": "Health",
            "valor": 0,
            "ativo": false
        });

        let benefit: Benefit = serde_json::from_value(data).unwrap();
        assert!(benefit.id.is_none());
        assert!(benefit.description.is_none());
        assert!(!benefit.active);
    }
}
