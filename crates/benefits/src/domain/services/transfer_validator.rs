//! Transfer Validator
//!
//! Decides whether a proposed transfer is well formed against the caller's
//! snapshot of the source account. The snapshot may be stale; the store
//! repeats every check authoritatively.

use rust_decimal::Decimal;

use crate::domain::entities::{Benefit, BenefitId, TransferRequest};
use crate::domain::value_objects::TransferViolation;

/// Result of validating a transfer form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferValidation {
    Valid(TransferRequest),
    /// Destination violations first, then amount violations
    Invalid(Vec<TransferViolation>),
}

impl TransferValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, TransferValidation::Valid(_))
    }

    pub fn violations(&self) -> &[TransferViolation] {
        match self {
            TransferValidation::Valid(_) => &[],
            TransferValidation::Invalid(v) => v,
        }
    }

    pub fn into_result(self) -> Result<TransferRequest, Vec<TransferViolation>> {
        match self {
            TransferValidation::Valid(request) => Ok(request),
            TransferValidation::Invalid(violations) => Err(violations),
        }
    }
}

/// Validate a candidate transfer out of `source`.
///
/// Destination and amount are checked independently so a form can show
/// both problems at once. Amounts are compared at full precision; the
/// whole balance may be transferred.
pub fn validate_transfer(
    source: &Benefit,
    candidate_to_id: Option<BenefitId>,
    candidate_amount: Option<Decimal>,
) -> TransferValidation {
    let mut violations = Vec::new();

    if source.id.is_none() {
        violations.push(TransferViolation::SourceNotPersisted);
    }

    match candidate_to_id {
        None => violations.push(TransferViolation::DestinationRequired),
        Some(to_id) if source.has_id(to_id) => {
            violations.push(TransferViolation::DestinationEqualsSource)
        }
        Some(_) => {}
    }

    match candidate_amount {
        None => violations.push(TransferViolation::AmountRequired),
        Some(amount) if amount <= Decimal::ZERO => {
            violations.push(TransferViolation::AmountNotPositive)
        }
        Some(amount) if amount > source.amount => {
            violations.push(TransferViolation::AmountExceedsSourceBalance)
        }
        Some(_) => {}
    }

    match (source.id, candidate_to_id, candidate_amount) {
        (Some(from_id), Some(to_id), Some(amount)) if violations.is_empty() => {
            TransferValidation::Valid(TransferRequest {
                from_id,
                to_id,
                amount,
            })
        }
        _ => TransferValidation::Invalid(violations),
    }
}

/// Benefits a transfer out of `source_id` may target: active ones other
/// than the source, in their original order.
pub fn destination_candidates(source_id: BenefitId, candidates: &[Benefit]) -> Vec<Benefit> {
    candidates
        .iter()
        .filter(|b| b.active && !b.has_id(source_id))
        .cloned()
        .collect()
}

/// Check the chosen destination against what is known locally.
///
/// Only a destination present in `known` and inactive is rejected; an
/// unknown id is left for the store to judge.
pub fn check_destination(to_id: BenefitId, known: &[Benefit]) -> Option<TransferViolation> {
    known
        .iter()
        .find(|b| b.has_id(to_id))
        .filter(|b| !b.active)
        .map(|_| TransferViolation::DestinationInactive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn benefit(id: BenefitId, amount: Decimal, active: bool) -> Benefit {
        Benefit {
            id: Some(id),
            active,
            ..Benefit::new(format!("Benefit {}", id), None, amount)
        }
    }

    #[test]
    fn test_validation_table() {
        let source = benefit(1, dec!(1000.00), true);
        let cases: Vec<(Option<BenefitId>, Option<Decimal>, Vec<TransferViolation>)> = vec![
            (Some(2), Some(dec!(0.01)), vec![]),
            (Some(2), Some(dec!(999.99)), vec![]),
            (Some(2), Some(dec!(1000.00)), vec![]),
            (
                Some(2),
                Some(dec!(1000.01)),
                vec![TransferViolation::AmountExceedsSourceBalance],
            ),
            (Some(2), Some(dec!(0)), vec![TransferViolation::AmountNotPositive]),
            (Some(2), Some(dec!(-5)), vec![TransferViolation::AmountNotPositive]),
            (Some(2), None, vec![TransferViolation::AmountRequired]),
            (None, Some(dec!(10)), vec![TransferViolation::DestinationRequired]),
            (Some(1), Some(dec!(10)), vec![TransferViolation::DestinationEqualsSource]),
            (
                None,
                None,
                vec![
                    TransferViolation::DestinationRequired,
                    TransferViolation::AmountRequired,
                ],
            ),
            (
                Some(1),
                Some(dec!(5000)),
                vec![
                    TransferViolation::DestinationEqualsSource,
                    TransferViolation::AmountExceedsSourceBalance,
                ],
            ),
        ];

        for (to_id, amount, expected) in cases {
            let result = validate_transfer(&source, to_id, amount);
            assert_eq!(
                result.violations(),
                expected.as_slice(),
                "to_id={:?} amount={:?}",
                to_id,
                amount
            );
            assert_eq!(result.is_valid(), expected.is_empty());
        }
    }

    #[test]
    fn test_full_balance_transfer_builds_request() {
        let source = benefit(1, dec!(1000), true);
        let result = validate_transfer(&source, Some(2), Some(dec!(1000)));
        assert_eq!(
            result,
            TransferValidation::Valid(TransferRequest {
                from_id: 1,
                to_id: 2,
                amount: dec!(1000),
            })
        );
    }

    #[test]
    fn test_just_over_balance_is_rejected() {
        for balance in [dec!(0), dec!(0.01), dec!(57.30), dec!(1000000)] {
            let source = benefit(1, balance, true);
            let full = validate_transfer(&source, Some(2), Some(balance));
            let over = validate_transfer(&source, Some(2), Some(balance + dec!(0.0001)));

            if balance > Decimal::ZERO {
                assert!(full.is_valid(), "balance {}", balance);
            }
            assert!(over
                .violations()
                .contains(&TransferViolation::AmountExceedsSourceBalance));
        }
    }

    #[test]
    fn test_same_destination_fails_for_any_amount() {
        let source = benefit(4, dec!(250), true);
        for amount in [None, Some(dec!(-1)), Some(dec!(0)), Some(dec!(10)), Some(dec!(9999))] {
            let result = validate_transfer(&source, Some(4), amount);
            assert!(result
                .violations()
                .contains(&TransferViolation::DestinationEqualsSource));
        }
    }

    #[test]
    fn test_fractional_amounts_are_not_rounded() {
        let source = benefit(1, dec!(10.005), true);
        let result = validate_transfer(&source, Some(2), Some(dec!(10.005)));
        assert_eq!(
            result.into_result().map(|r| r.amount),
            Ok(dec!(10.005))
        );
    }

    #[test]
    fn test_validation_is_repeatable() {
        let source = benefit(1, dec!(300), true);
        let first = validate_transfer(&source, Some(3), Some(dec!(301)));
        let second = validate_transfer(&source, Some(3), Some(dec!(301)));
        assert_eq!(first, second);
    }

    #[test]
    fn test_unsaved_source_cannot_transfer() {
        let source = Benefit::new("Draft", None, dec!(100));
        let result = validate_transfer(&source, Some(2), Some(dec!(10)));
        assert_eq!(result.violations(), &[TransferViolation::SourceNotPersisted]);
    }

    #[test]
    fn test_destination_candidates_exclude_source_and_inactive() {
        let all = vec![
            benefit(1, dec!(1000), true),
            benefit(2, dec!(500), true),
            benefit(3, dec!(50), false),
            benefit(4, dec!(0), true),
        ];

        let ids: Vec<_> = destination_candidates(1, &all)
            .into_iter()
            .filter_map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_check_destination() {
        let known = vec![benefit(2, dec!(10), true), benefit(3, dec!(10), false)];
        assert_eq!(check_destination(2, &known), None);
        assert_eq!(
            check_destination(3, &known),
            Some(TransferViolation::DestinationInactive)
        );
        assert_eq!(check_destination(99, &known), None);
    }
}
