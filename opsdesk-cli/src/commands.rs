//! Command dispatch

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use opsdesk_lib::OpsClient;
use opsdesk_lib::confirm::AlwaysConfirm;
use opsdesk_lib::confirm::Confirm;
use opsdesk_lib::error::Error;
use opsdesk_lib::inbox::EventFilter;
use opsdesk_lib::inbox::Inbox;
use opsdesk_lib::inbox::InboxConfig;
use opsdesk_lib::inbox::InboxFrame;
use opsdesk_lib::inbox::ReadState;
use opsdesk_lib::model::Credentials;
use opsdesk_lib::model::EquipmentInput;
use opsdesk_lib::model::MaterialInput;
use opsdesk_lib::model::PlanInput;
use opsdesk_lib::model::PlanItemInput;
use opsdesk_lib::model::PurchaseOrderInput;
use opsdesk_lib::model::RoleInput;
use opsdesk_lib::model::SiteInput;
use opsdesk_lib::model::StockLevel;
use opsdesk_lib::model::SupplierInput;
use opsdesk_lib::model::UserInput;
use opsdesk_lib::model::WorkOrderInput;
use opsdesk_lib::model::parse_roles;
use opsdesk_lib::router::Router;
use opsdesk_lib::router::Screen;
use opsdesk_lib::router::View;
use opsdesk_lib::store::KvStore;
use opsdesk_lib::store::MemoryStore;
use opsdesk_lib::store::SqliteStore;
use opsdesk_lib::toast::Toasts;
use opsdesk_lib::views;
use opsdesk_lib::views::Page;
use opsdesk_lib::views::ViewContext;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::cli::Cli;
use crate::cli::Command;
use crate::cli::EquipmentCommand;
use crate::cli::EquipmentFields;
use crate::cli::MaterialCommand;
use crate::cli::MaterialFields;
use crate::cli::PlanCommand;
use crate::cli::PurchaseOrderCommand;
use crate::cli::RoleCommand;
use crate::cli::SiteCommand;
use crate::cli::SiteFields;
use crate::cli::SupplierCommand;
use crate::cli::UserCommand;
use crate::cli::WorkOrderCommand;
use crate::paths;
use crate::prompt::StdinConfirm;

/// Output settings shared by every command.
#[derive(Clone, Copy)]
struct Output {
    html: bool,
}

impl Output {
    fn page(&self, page: &Page) {
        if self.html {
            println!("{}", page.to_html());
        } else {
            print!("{}", page.to_text());
        }
    }

    fn frame(&self, frame: &InboxFrame) {
        if self.html {
            println!("{}", frame.to_html());
        } else {
            print!("{}", frame.to_text());
        }
    }
}

/// Wires client, store, feed and router together and runs one command.
pub async fn run(cli: Cli) -> Result<(), Error> {
    let mut builder = OpsClient::builder().url(cli.url.as_str());
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build()?;

    let confirm: Arc<dyn Confirm> = if cli.yes {
        Arc::new(AlwaysConfirm(true))
    } else {
        Arc::new(StdinConfirm)
    };
    let toasts = Toasts::new();
    let ctx = ViewContext::new(client.clone(), toasts.clone(), confirm);

    let store = open_store(cli.state_db.clone()).await;
    let read_state = ReadState::new(store);
    let config = InboxConfig {
        poll_interval: Duration::from_secs(cli.poll_interval),
        page_size: cli.page_size,
    };
    let (inbox, frames) = Inbox::new(Arc::new(client.clone()), read_state, config);
    let mut router = Router::new(ctx, inbox);

    if let (Some(login), Some(password)) = (&cli.login, &cli.password) {
        client.login(&Credentials::new(login, password)).await?;
        log::info!("logged in as {}", login);
    }

    let output = Output { html: cli.html };
    let result = dispatch(cli.command, &mut router, frames, output).await;
    router.shutdown().await;

    for toast in toasts.drain() {
        eprintln!("{}", toast);
    }
    result
}

/// The SQLite store, or an in-memory one when no database can be opened.
async fn open_store(path: Option<PathBuf>) -> Arc<dyn KvStore> {
    let Some(path) = path.or_else(paths::state_db) else {
        log::warn!("no data directory, read flags will not persist");
        return Arc::new(MemoryStore::new());
    };
    if let Some(dir) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(dir) {
            log::warn!("cannot create {}: {}", dir.display(), e);
        }
    }
    match SqliteStore::open(&path).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::warn!("cannot open {}: {}, read flags will not persist", path.display(), e);
            Arc::new(MemoryStore::new())
        }
    }
}

async fn dispatch(
    command: Command,
    router: &mut Router,
    mut frames: UnboundedReceiver<InboxFrame>,
    output: Output,
) -> Result<(), Error> {
    let ctx = router.context().clone();
    match command {
        Command::View {
            view,
            site,
            sort,
            table,
        } => {
            let view = match view {
                View::Inventory { .. } => View::Inventory { site },
                other => other,
            };
            match router.navigate(view).await? {
                Screen::Page(mut page) => {
                    if !sort.is_empty() {
                        let Some(target) = page.tables_mut().nth(table) else {
                            return Err(Error::invalid_input(format!("page has no table #{}", table)));
                        };
                        for column in sort {
                            if target.sort_by(column).is_none() {
                                return Err(Error::invalid_input(format!(
                                    "column {} is not sortable",
                                    column
                                )));
                            }
                        }
                    }
                    output.page(&page);
                }
                Screen::Inbox => {
                    let frame = router.inbox().refresh().await?;
                    output.frame(&frame);
                }
            }
        }
        Command::Inbox {
            follow,
            kind,
            severity,
        } => {
            let inbox = router.inbox().clone();
            inbox.set_filter(EventFilter::new(kind, severity)).await;

            if !follow {
                let frame = inbox.refresh().await?;
                output.frame(&frame);
                return Ok(());
            }

            router.navigate(View::Inbox).await?;
            loop {
                tokio::select! {
                    frame = frames.recv() => match frame {
                        Some(frame) => {
                            if !output.html {
                                println!("-- {} unread --", frame.unread());
                            }
                            output.frame(&frame);
                        }
                        None => break,
                    },
                    _ = tokio::signal::ctrl_c() => {
                        log::info!("interrupted, stopping the feed");
                        break;
                    }
                }
            }
        }
        Command::MarkRead { ids } => {
            for id in ids {
                router.inbox().mark_read(id).await;
            }
        }
        Command::ClearRead => router.inbox().clear_read().await,
        Command::Me => {
            let me = ctx.client.me().await?;
            println!("{} (#{})", me.login, me.id);
            if let Some(email) = me.email {
                println!("email: {}", email);
            }
            println!("roles: {}", me.roles.join(", "));
        }
        Command::Logout => {
            ctx.perform(ctx.client.logout(), "Logged out").await?;
        }
        Command::Site(command) => site(&ctx, command).await?,
        Command::Equipment(command) => equipment(&ctx, command).await?,
        Command::Material(command) => material(&ctx, command).await?,
        Command::Stock {
            site,
            material,
            qty,
            rop,
        } => {
            let level = StockLevel {
                qty_on_hand: qty,
                reorder_point: rop,
            };
            views::inventory::set_stock(&ctx, site, material, level).await?;
        }
        Command::WorkOrder(command) => work_order(&ctx, command).await?,
        Command::Supplier(SupplierCommand::Create { name, contact }) => {
            let id = views::supply::create_supplier(&ctx, &SupplierInput { name, contact }).await?;
            println!("{}", id);
        }
        Command::Po(command) => purchase_order(&ctx, command).await?,
        Command::Plan(command) => plan(&ctx, command, output).await?,
        Command::User(command) => user(&ctx, command).await?,
        Command::Role(RoleCommand::Create { name }) => {
            let id = views::users::create_role(&ctx, &RoleInput { name }).await?;
            println!("{}", id);
        }
    }
    Ok(())
}

impl From<SiteFields> for SiteInput {
    fn from(fields: SiteFields) -> Self {
        Self {
            name: fields.name,
            region: fields.region,
        }
    }
}

impl From<EquipmentFields> for EquipmentInput {
    fn from(fields: EquipmentFields) -> Self {
        Self {
            site_id: fields.site,
            equipment_type_id: fields.type_id,
            code: fields.code,
            name: fields.name,
            status: fields.status,
            commissioning_date: fields.date,
        }
    }
}

impl From<MaterialFields> for MaterialInput {
    fn from(fields: MaterialFields) -> Self {
        Self {
            name: fields.name,
            unit: fields.unit,
            reject_percent: fields.reject,
        }
    }
}

async fn site(ctx: &ViewContext, command: SiteCommand) -> Result<(), Error> {
    match command {
        SiteCommand::Create(fields) => {
            let id = views::sites::create(ctx, &fields.into()).await?;
            println!("{}", id);
        }
        SiteCommand::Update { id, fields } => views::sites::update(ctx, id, &fields.into()).await?,
        SiteCommand::Delete { id, name } => {
            let name = name.unwrap_or_else(|| format!("#{}", id));
            views::sites::delete(ctx, id, &name).await?;
        }
    }
    Ok(())
}

async fn equipment(ctx: &ViewContext, command: EquipmentCommand) -> Result<(), Error> {
    match command {
        EquipmentCommand::Create(fields) => {
            let id = views::equipment::create(ctx, &fields.into()).await?;
            println!("{}", id);
        }
        EquipmentCommand::Update { id, fields } => {
            views::equipment::update(ctx, id, &fields.into()).await?
        }
        EquipmentCommand::Delete { id, code } => {
            let code = code.unwrap_or_else(|| format!("#{}", id));
            views::equipment::delete(ctx, id, &code).await?;
        }
    }
    Ok(())
}

async fn material(ctx: &ViewContext, command: MaterialCommand) -> Result<(), Error> {
    match command {
        MaterialCommand::Create(fields) => {
            let id = views::inventory::create_material(ctx, &fields.into()).await?;
            println!("{}", id);
        }
        MaterialCommand::Update { id, fields } => {
            views::inventory::update_material(ctx, id, &fields.into()).await?
        }
        MaterialCommand::Delete { id, name } => {
            let name = name.unwrap_or_else(|| format!("#{}", id));
            views::inventory::delete_material(ctx, id, &name).await?;
        }
    }
    Ok(())
}

async fn work_order(ctx: &ViewContext, command: WorkOrderCommand) -> Result<(), Error> {
    match command {
        WorkOrderCommand::Create {
            site,
            title,
            kind,
            priority,
            description,
            planned,
            team,
        } => {
            let input = WorkOrderInput {
                kind,
                priority,
                description,
                planned_date: planned,
                assigned_team: team,
                ..WorkOrderInput::new(site, title)
            };
            let id = views::work_orders::create(ctx, input).await?;
            println!("{}", id);
        }
        WorkOrderCommand::Status { id, status } => {
            views::work_orders::set_status(ctx, id, &status).await?
        }
    }
    Ok(())
}

async fn purchase_order(ctx: &ViewContext, command: PurchaseOrderCommand) -> Result<(), Error> {
    match command {
        PurchaseOrderCommand::Create {
            supplier,
            site,
            comment,
        } => {
            let input = PurchaseOrderInput {
                supplier_id: supplier,
                site_id: site,
                comment,
            };
            let id = views::supply::create_order(ctx, &input).await?;
            println!("{}", id);
        }
        PurchaseOrderCommand::Status { id, status } => {
            views::supply::set_order_status(ctx, id, &status).await?
        }
    }
    Ok(())
}

async fn plan(ctx: &ViewContext, command: PlanCommand, output: Output) -> Result<(), Error> {
    match command {
        PlanCommand::Show { id } => {
            let page = views::planning::plan_page(ctx, id).await?;
            output.page(&page);
        }
        PlanCommand::Create {
            site,
            period,
            status,
        } => {
            let input = PlanInput {
                site_id: site,
                period,
                status,
            };
            let id = views::planning::create(ctx, &input).await?;
            println!("{}", id);
        }
        PlanCommand::AddItem { id, product, qty } => {
            let input = PlanItemInput {
                product_name: product,
                quantity: qty,
            };
            views::planning::add_item(ctx, id, &input).await?;
        }
    }
    Ok(())
}

async fn user(ctx: &ViewContext, command: UserCommand) -> Result<(), Error> {
    match command {
        UserCommand::Create {
            login,
            password,
            email,
            roles,
        } => {
            let input = UserInput {
                login,
                password,
                email,
                roles: parse_roles(&roles),
            };
            let id = views::users::create_user(ctx, &input).await?;
            println!("{}", id);
        }
        UserCommand::Block { id } => views::users::toggle_block(ctx, id, true).await?,
        UserCommand::Unblock { id } => views::users::toggle_block(ctx, id, false).await?,
        UserCommand::Roles { id, roles } => views::users::set_roles(ctx, id, &roles).await?,
    }
    Ok(())
}
