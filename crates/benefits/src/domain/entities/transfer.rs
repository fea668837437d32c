//! TransferRequest - Intent to move value between two benefits

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BenefitId;

/// A validated, single-use transfer intent. Never persisted or retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    #[serde(rename = "deId")]
    pub from_id: BenefitId,
    #[serde(rename = "paraId")]
    pub to_id: BenefitId,
    #[serde(rename = "valor")]
    pub amount: Decimal,
}
