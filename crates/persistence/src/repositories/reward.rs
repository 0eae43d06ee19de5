//! Reward repository.

use uuid::Uuid;

use domain::models::Reward;

use crate::store::{Store, StoreError};

/// Repository for reward threshold definitions.
#[derive(Clone)]
pub struct RewardRepository {
    store: Store,
}

impl RewardRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn insert(&self, reward: Reward) -> Result<(), StoreError> {
        self.store.insert(reward)
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<Reward> {
        self.store.get_by_id(id)
    }

    pub fn list_active_by_commerce(&self, commerce_id: Uuid) -> Vec<Reward> {
        self.store
            .filter(|r: &Reward| r.commerce_id == commerce_id && r.is_active)
    }

    /// Soft-retire a reward; history keeps referencing it by id.
    pub fn deactivate(&self, id: Uuid) -> Result<Reward, StoreError> {
        self.store.update::<Reward>(id, |r| r.is_active = false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::models::{CreateRewardRequest, RewardKind};

    fn reward(commerce_id: Uuid, threshold: i64) -> Reward {
        Reward::create(
            commerce_id,
            CreateRewardRequest {
                name: "Café gratis".to_string(),
                kind: RewardKind::Points,
                points_threshold: Some(threshold),
                stars_threshold: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_list_active_excludes_deactivated() {
        let store = Store::in_memory();
        let repo = RewardRepository::new(store);
        let commerce_id = Uuid::new_v4();
        let keep = reward(commerce_id, 500);
        let retire = reward(commerce_id, 200);
        repo.insert(keep.clone()).unwrap();
        repo.insert(retire.clone()).unwrap();

        repo.deactivate(retire.id).unwrap();
        let active = repo.list_active_by_commerce(commerce_id);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, keep.id);
        // The retired reward is still addressable for audit lookups
        assert!(repo.find_by_id(retire.id).is_some());
    }
}
