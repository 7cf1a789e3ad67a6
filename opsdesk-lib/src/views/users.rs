//! Users and roles screen

use super::Action;
use super::Page;
use super::ViewContext;
use super::actions;
use super::or_dash;
use crate::error::Error;
use crate::model::Role;
use crate::model::RoleInput;
use crate::model::User;
use crate::model::UserInput;
use crate::model::UserUpdate;
use crate::model::parse_roles;
use crate::row;
use crate::table::Table;

pub const USER_COLUMNS: [&str; 6] = ["ID", "Login", "Email", "Blocked", "Roles", "Actions"];
pub const USER_SORTABLE: [usize; 4] = [0, 1, 2, 3];
pub const ROLE_COLUMNS: [&str; 2] = ["ID", "Role"];
pub const ROLE_SORTABLE: [usize; 1] = [0];

const TITLE: &str = "Users and roles";
const SUBTITLE: &str = "Access administration.";

pub fn users_table(users: &[User]) -> Table {
    Table::with_labels(&USER_COLUMNS, &USER_SORTABLE).with_rows(users.iter().map(|u| {
        let roles = u.roles.join(", ");
        row![
            u.id,
            &u.login,
            or_dash(u.email.as_deref()),
            if u.blocked { "Yes" } else { "No" },
            &roles,
            actions([
                Action::new(if u.blocked { "Unblock" } else { "Block" }, "toggle-block")
                    .attr("id", u.id)
                    .attr("blocked", u.blocked),
                Action::new("Roles", "edit-roles")
                    .attr("id", u.id)
                    .attr("roles", &roles),
            ])
        ]
    }))
}

pub fn roles_table(roles: &[Role]) -> Table {
    Table::with_labels(&ROLE_COLUMNS, &ROLE_SORTABLE)
        .with_rows(roles.iter().map(|r| row![r.id, &r.name]))
}

/// Lists users and roles.
///
/// Listing needs admin rights; when it fails the page carries a notice
/// instead of the tables rather than failing the navigation.
pub async fn page(ctx: &ViewContext) -> Result<Page, Error> {
    let page = Page::new(TITLE, SUBTITLE);
    match futures::try_join!(ctx.client.users(), ctx.client.roles()) {
        Ok((users, roles)) => Ok(page
            .table(Some("Users"), users_table(&users))
            .table(Some("Roles"), roles_table(&roles))),
        Err(e) => {
            log::warn!("user administration unavailable: {}", e);
            Ok(page.notice(format!(
                "Insufficient rights to administer users: {}",
                e.message()
            )))
        }
    }
}

pub async fn create_user(ctx: &ViewContext, input: &UserInput) -> Result<i64, Error> {
    ctx.perform(ctx.client.create_user(input), "User created").await
}

pub async fn create_role(ctx: &ViewContext, input: &RoleInput) -> Result<i64, Error> {
    ctx.perform(ctx.client.create_role(input), "Role created").await
}

/// Flips the user's blocked flag from its currently shown value.
pub async fn toggle_block(ctx: &ViewContext, id: i64, blocked: bool) -> Result<(), Error> {
    let update = UserUpdate {
        blocked: Some(!blocked),
        ..Default::default()
    };
    ctx.perform(ctx.client.update_user(id, &update), "Block status changed").await
}

/// Replaces the user's roles from comma-separated input.
pub async fn set_roles(ctx: &ViewContext, id: i64, input: &str) -> Result<(), Error> {
    let update = UserUpdate {
        roles: Some(parse_roles(input)),
        ..Default::default()
    };
    ctx.perform(ctx.client.update_user(id, &update), "Roles updated").await
}
