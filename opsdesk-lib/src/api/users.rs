//! User and role administration

use crate::OpsClient;
use crate::error::Error;
use crate::model::Role;
use crate::model::RoleInput;
use crate::model::User;
use crate::model::UserInput;
use crate::model::UserUpdate;
use crate::response::ListEnvelope;

impl OpsClient {
    /// Lists users. Requires an administrator session.
    pub async fn users(&self) -> Result<Vec<User>, Error> {
        let list: ListEnvelope<User> = self.get_json("/users").await?;
        Ok(list.into_results())
    }

    pub async fn roles(&self) -> Result<Vec<Role>, Error> {
        let list: ListEnvelope<Role> = self.get_json("/roles").await?;
        Ok(list.into_results())
    }

    pub async fn create_user(&self, input: &UserInput) -> Result<i64, Error> {
        self.create("/users", input).await
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<(), Error> {
        self.put(&format!("/users/{id}"), update).await?;
        Ok(())
    }

    pub async fn create_role(&self, input: &RoleInput) -> Result<i64, Error> {
        self.create("/roles", input).await
    }
}
