use std::future::Future;

use crate::data::Team;
use crate::error::Result;

/// Asynchronous source of team records.
///
/// # Implementations
///
/// - [`TeamsClient`](crate::TeamsClient): HTTP API via `reqwest`
/// - In-memory sources for testing
pub trait TeamSource: Send + Sync {
    /// Fetch every team.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success statuses, and responses that
    /// are not an array of valid teams.
    fn get_all_teams(&self) -> impl Future<Output = Result<Vec<Team>>> + Send;

    /// Fetch one team by identifier.
    ///
    /// # Errors
    ///
    /// An unknown `id` fails with an HTTP error in the client band (404).
    fn get_team_by_id(&self, id: &str) -> impl Future<Output = Result<Team>> + Send;
}
