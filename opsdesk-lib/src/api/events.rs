//! Event log

use crate::OpsClient;
use crate::error::Error;
use crate::model::Event;
use crate::response::ListEnvelope;

/// Window size the feed requests on every poll.
pub const DEFAULT_EVENT_LIMIT: usize = 60;

impl OpsClient {
    /// Fetches the `limit` most recent events, newest first.
    pub async fn events(&self, limit: usize) -> Result<Vec<Event>, Error> {
        let list: ListEnvelope<Event> = self.get_json(&format!("/events?limit={limit}")).await?;
        Ok(list.into_results())
    }
}
