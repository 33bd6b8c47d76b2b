//! Team repository

use crate::domain::entities::{CreatorPlayer, Team, User};
use futures::future::join_all;
use rosterboard_common::{Error, Result};
use rosterboard_docstore::{
    generate_id, layout, FieldUpdate, Query, SharedStore, StoreError, WriteOp,
};

/// Message shown when an invitation code matches no team
pub const INVALID_CODE_MESSAGE: &str = "No team found for that invitation code, check your code";

#[derive(Clone)]
pub struct TeamRepository {
    store: SharedStore,
}

impl TeamRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Find team by ID. Ids that cannot form a valid path simply do not exist.
    pub async fn get_by_id(&self, team_id: &str) -> Result<Option<Team>> {
        let path = match layout::team(team_id) {
            Ok(path) => path,
            Err(StoreError::InvalidPath(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        self.store
            .get(&path)
            .await?
            .map(|doc| Team::from_document(&doc))
            .transpose()
    }

    /// Create a team and add it to the creator's team list, optionally
    /// putting the creator on the roster at rank 1.
    ///
    /// All writes go in one batch; the creator's user document must exist.
    pub async fn create(
        &self,
        name: &str,
        creator_user_id: &str,
        creator_player: Option<&CreatorPlayer>,
    ) -> Result<Team> {
        let team = Team::new(name, creator_user_id)?;

        let mut ops = vec![
            WriteOp::Create {
                path: layout::team(&team.id)?,
                data: team.to_fields()?,
            },
            WriteOp::Update {
                path: layout::user(creator_user_id)?,
                updates: vec![FieldUpdate::append("teamIds", team.id.clone())],
            },
        ];
        if let Some(player) = creator_player {
            ops.push(WriteOp::Create {
                path: layout::players(&team.id)?.doc(&generate_id())?,
                data: player.to_fields(creator_user_id)?,
            });
        }
        self.store.commit(ops).await?;

        tracing::info!(
            team_id = %team.id,
            user_id = %creator_user_id,
            with_player = creator_player.is_some(),
            "Created team"
        );
        Ok(team)
    }

    /// Join the team whose id equals `invitation_code`.
    ///
    /// Joining a team twice appends the code twice.
    pub async fn join(&self, invitation_code: &str, user_id: &str) -> Result<Team> {
        let code = invitation_code.trim();
        let team = self
            .get_by_id(code)
            .await?
            .ok_or_else(|| Error::NotFound(INVALID_CODE_MESSAGE.to_string()))?;

        self.store
            .update(
                &layout::user(user_id)?,
                vec![FieldUpdate::append("teamIds", team.id.clone())],
            )
            .await?;

        tracing::info!(team_id = %team.id, user_id = %user_id, "User joined team");
        Ok(team)
    }

    /// Teams the user belongs to, resolved from their team list
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Team>> {
        let team_ids = match self.store.get(&layout::user(user_id)?).await? {
            Some(doc) => User::from_document(&doc)?.team_ids,
            None => Vec::new(),
        };
        self.list_by_ids(&team_ids).await
    }

    /// Resolve team ids, in list order, dropping ids that no longer resolve
    pub async fn list_by_ids(&self, team_ids: &[String]) -> Result<Vec<Team>> {
        let lookups = team_ids.iter().map(|id| self.get_by_id(id));
        let results = join_all(lookups).await;

        let mut teams = Vec::with_capacity(results.len());
        for (team_id, result) in team_ids.iter().zip(results) {
            match result? {
                Some(team) => teams.push(team),
                None => tracing::debug!(team_id = %team_id, "Skipping dangling team reference"),
            }
        }
        Ok(teams)
    }

    /// Delete a team and every player in its roster.
    ///
    /// Only the creator may delete. Members keep the dangling id in their lists.
    /// The roster is read before the batch, so a player added in between
    /// outlives the team.
    pub async fn delete(&self, team_id: &str, requested_by: &str) -> Result<()> {
        let team = self
            .get_by_id(team_id)
            .await?
            .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

        if team.created_by != requested_by {
            return Err(Error::Authorization(
                "Only the team creator can delete a team".to_string(),
            ));
        }

        let players_collection = layout::players(&team.id)?;
        let players = self
            .store
            .query(&players_collection, &Query::new())
            .await?;

        let mut ops = Vec::with_capacity(players.len() + 1);
        for player in &players {
            ops.push(WriteOp::Delete {
                path: players_collection.doc(&player.id)?,
            });
        }
        ops.push(WriteOp::Delete {
            path: layout::team(&team.id)?,
        });
        self.store.commit(ops).await?;

        tracing::info!(
            team_id = %team.id,
            players_deleted = players.len(),
            "Deleted team"
        );
        Ok(())
    }
}
