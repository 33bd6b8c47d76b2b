//! Player repository

use crate::domain::entities::{
    skill_value, validate_skill_name, validate_skill_value, NewPlayer, Player,
};
use rosterboard_common::{Error, Result};
use rosterboard_docstore::{
    get_field, layout, Direction, FieldUpdate, Query, SharedStore, StoreError,
};
use serde_json::Value;

#[derive(Clone)]
pub struct PlayerRepository {
    store: SharedStore,
}

impl PlayerRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// List a team's players by rank, lowest first
    pub async fn list(&self, team_id: &str) -> Result<Vec<Player>> {
        let query = Query::new().order_by("rank", Direction::Ascending);
        self.store
            .query(&layout::players(team_id)?, &query)
            .await?
            .iter()
            .map(Player::from_document)
            .collect()
    }

    /// Find a player by ID
    pub async fn get(&self, team_id: &str, player_id: &str) -> Result<Option<Player>> {
        let path = match layout::player(team_id, player_id) {
            Ok(path) => path,
            Err(StoreError::InvalidPath(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        self.store
            .get(&path)
            .await?
            .map(|doc| Player::from_document(&doc))
            .transpose()
    }

    /// Add a player at the bottom of the ranking with the initial score.
    ///
    /// Two concurrent adds can read the same highest rank and both take the
    /// next one.
    pub async fn add(&self, team_id: &str, player: NewPlayer) -> Result<Player> {
        if self.store.get(&layout::team(team_id)?).await?.is_none() {
            return Err(Error::NotFound("Team not found".to_string()));
        }

        let collection = layout::players(team_id)?;
        let lowest = Query::new()
            .order_by("rank", Direction::Descending)
            .limit(1);
        // only the rank is read; the rest of that document may be anything
        let max_rank = self
            .store
            .query(&collection, &lowest)
            .await?
            .first()
            .and_then(|doc| get_field(&doc.data, "rank").and_then(Value::as_i64))
            .unwrap_or(0);
        let rank = max_rank.checked_add(1).ok_or_else(|| {
            Error::Conflict(format!("No rank left below {}", max_rank))
        })?;

        let path = self
            .store
            .add(&collection, Player::new_fields(&player, rank))
            .await?;

        tracing::info!(team_id = %team_id, player_id = %path.id(), rank, "Added player");

        let document = self
            .store
            .get(&path)
            .await?
            .ok_or_else(|| Error::Internal(format!("Player {} vanished after insert", path)))?;
        Player::from_document(&document)
    }

    /// Remove a player. Removing a missing player is not an error.
    pub async fn delete(&self, team_id: &str, player_id: &str) -> Result<()> {
        self.store.delete(&layout::player(team_id, player_id)?).await?;
        tracing::info!(team_id = %team_id, player_id = %player_id, "Deleted player");
        Ok(())
    }

    /// Set one skill counter, leaving every other field alone
    pub async fn update_skill(
        &self,
        team_id: &str,
        player_id: &str,
        skill: &str,
        value: f64,
    ) -> Result<()> {
        validate_skill_name(skill)?;
        validate_skill_value(value)?;

        let path = layout::player(team_id, player_id)?;
        let update = FieldUpdate::set(format!("skills.{}", skill), skill_value(value));

        match self.store.update(&path, vec![update]).await {
            Ok(()) => {}
            Err(StoreError::NotFound(_)) => {
                return Err(Error::NotFound("Player not found".to_string()))
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            team_id = %team_id,
            player_id = %player_id,
            skill = %skill,
            value,
            "Updated player skill"
        );
        Ok(())
    }
}
