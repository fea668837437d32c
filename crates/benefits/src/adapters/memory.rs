//! In-memory Benefit Store
//!
//! A `BenefitStore` holding its data in process and applying the same
//! rules as the authoritative server: sequential ids, version bumps on
//! every write, and atomic, balance-checked transfers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::domain::{Benefit, BenefitId, DomainError, MutationRequest, TransferRequest};
use crate::ports::BenefitStore;

#[derive(Debug, Default)]
struct StoreState {
    benefits: BTreeMap<BenefitId, Benefit>,
    last_id: BenefitId,
}

/// Store backed by an ordered map keyed by id
#[derive(Debug, Default)]
pub struct InMemoryBenefitStore {
    state: RwLock<StoreState>,
}

impl InMemoryBenefitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `requests`, ids assigned in order
    pub async fn seeded(requests: impl IntoIterator<Item = MutationRequest>) -> Self {
        let store = Self::new();
        for request in requests {
            store.insert(&request).await;
        }
        store
    }

    async fn insert(&self, request: &MutationRequest) -> Benefit {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let id = state.last_id;
        let now = Utc::now().naive_utc();
        let benefit = Benefit {
            id: Some(id),
            name: request.name.clone(),
            description: Some(request.description.clone()),
            amount: request.amount,
            active: request.active.unwrap_or(true),
            version: Some(0),
            created_at: Some(now),
            updated_at: Some(now),
        };
        state.benefits.insert(id, benefit.clone());
        benefit
    }
}

fn touch(benefit: &mut Benefit) {
    benefit.version = Some(benefit.version.map_or(0, |v| v + 1));
    benefit.updated_at = Some(Utc::now().naive_utc());
}

fn check_request(request: &MutationRequest) -> Result<(), DomainError> {
    if request.name.trim().is_empty() {
        return Err(DomainError::Validation("Name must not be empty".to_string()));
    }
    if request.amount < Decimal::ZERO {
        return Err(DomainError::Validation("Amount must not be negative".to_string()));
    }
    Ok(())
}

#[async_trait]
impl BenefitStore for InMemoryBenefitStore {
    async fn list_all(&self) -> Result<Vec<Benefit>, DomainError> {
        let state = self.state.read().await;
        Ok(state.benefits.values().cloned().collect())
    }

    async fn list_active(&self) -> Result<Vec<Benefit>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .benefits
            .values()
            .filter(|b| b.active)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: BenefitId) -> Result<Benefit, DomainError> {
        let state = self.state.read().await;
        state
            .benefits
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Benefit", id))
    }

    async fn create(&self, request: &MutationRequest) -> Result<Benefit, DomainError> {
        check_request(request)?;
        let created = self.insert(request).await;
        tracing::info!(
            "Benefit created: id={:?}, name={}",
            created.id,
            created.name
        );
        Ok(created)
    }

    async fn update(
        &self,
        id: BenefitId,
        request: &MutationRequest,
    ) -> Result<Benefit, DomainError> {
        check_request(request)?;
        let mut state = self.state.write().await;
        let benefit = state
            .benefits
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Benefit", id))?;

        benefit.name = request.name.clone();
        benefit.description = Some(request.description.clone());
        benefit.amount = request.amount;
        if let Some(active) = request.active {
            benefit.active = active;
        }
        touch(benefit);

        tracing::info!("Benefit updated: id={}", id);
        Ok(benefit.clone())
    }

    async fn deactivate(&self, id: BenefitId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let benefit = state
            .benefits
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Benefit", id))?;

        benefit.active = false;
        touch(benefit);

        tracing::info!("Benefit deactivated: id={}", id);
        Ok(())
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<(), DomainError> {
        if request.from_id == request.to_id {
            return Err(DomainError::Validation(
                "Cannot transfer to the same benefit".to_string(),
            ));
        }
        if request.amount <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "Transfer amount must be positive".to_string(),
            ));
        }

        let mut state = self.state.write().await;
        let source = state
            .benefits
            .get(&request.from_id)
            .ok_or_else(|| DomainError::not_found("Source benefit", request.from_id))?;
        let destination = state
            .benefits
            .get(&request.to_id)
            .ok_or_else(|| DomainError::not_found("Destination benefit", request.to_id))?;

        if !source.active {
            return Err(DomainError::Conflict("Source benefit is inactive".to_string()));
        }
        if !destination.active {
            return Err(DomainError::Conflict(
                "Destination benefit is inactive".to_string(),
            ));
        }
        if source.amount < request.amount {
            return Err(DomainError::Validation(format!(
                "Insufficient balance in benefit {}. Current balance: {:.2}, requested: {:.2}",
                request.from_id, source.amount, request.amount
            )));
        }

        // Both lookups succeeded under the same write guard.
        if let Some(source) = state.benefits.get_mut(&request.from_id) {
            source.amount -= request.amount;
            touch(source);
        }
        if let Some(destination) = state.benefits.get_mut(&request.to_id) {
            destination.amount += request.amount;
            touch(destination);
        }

        tracing::info!(
            "Transfer completed: from={} to={} amount={}",
            request.from_id,
            request.to_id,
            request.amount
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(name: &str, amount: Decimal) -> MutationRequest {
        MutationRequest {
            name: name.to_string(),
            description: format!("{} allowance", name),
            amount,
            active: None,
        }
    }

    async fn store() -> InMemoryBenefitStore {
        InMemoryBenefitStore::seeded(vec![
            request("Meal", dec!(1000)),
            request("Transport", dec!(200)),
            MutationRequest {
                active: Some(false),
                ..request("Gym", dec!(50))
            },
        ])
        .await
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_listing_ordered() {
        let store = store().await;
        let ids: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let active = store.list_active().await.unwrap();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|b| b.active));
    }

    #[tokio::test]
    async fn test_create_assigns_next_id_and_stores_it() {
        let store = store().await;
        let created = store.create(&request("Childcare", dec!(300))).await.unwrap();

        assert_eq!(created.id, Some(4));
        assert_eq!(created.version, Some(0));
        assert!(created.active);
        assert_eq!(store.get_by_id(4).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_transfer_moves_balance() {
        let store = store().await;
        store
            .transfer(&TransferRequest {
                from_id: 1,
                to_id: 2,
                amount: dec!(1000),
            })
            .await
            .unwrap();

        let source = store.get_by_id(1).await.unwrap();
        let destination = store.get_by_id(2).await.unwrap();
        assert_eq!(source.amount, dec!(0));
        assert_eq!(destination.amount, dec!(1200));
        assert_eq!(source.version, Some(1));
    }

    #[tokio::test]
    async fn test_insufficient_balance_leaves_both_untouched() {
        let store = store().await;
        let err = store
            .transfer(&TransferRequest {
                from_id: 2,
                to_id: 1,
                amount: dec!(200.01),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Validation error: Insufficient balance in benefit 2. Current balance: 200.00, requested: 200.01"
        );
        assert_eq!(store.get_by_id(1).await.unwrap().amount, dec!(1000));
        assert_eq!(store.get_by_id(2).await.unwrap().amount, dec!(200));
    }

    #[tokio::test]
    async fn test_transfer_to_inactive_is_rejected() {
        let store = store().await;
        let err = store
            .transfer(&TransferRequest {
                from_id: 1,
                to_id: 3,
                amount: dec!(10),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_deactivate_is_repeatable_and_missing_is_not_found() {
        let store = store().await;
        store.deactivate(2).await.unwrap();
        store.deactivate(2).await.unwrap();
        assert!(!store.get_by_id(2).await.unwrap().active);

        let err = store.deactivate(42).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_bumps_version() {
        let store = store().await;
        let updated = store
            .update(
                1,
                &MutationRequest {
                    name: "Food".to_string(),
                    description: "Groceries".to_string(),
                    amount: dec!(750),
                    active: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Food");
        assert_eq!(updated.amount, dec!(750));
        assert!(updated.active);
        assert_eq!(updated.version, Some(1));
    }
}
