//! Command-line arguments

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use opsdesk_lib::model::EventCategory;
use opsdesk_lib::model::Severity;
use opsdesk_lib::router::View;

#[derive(Parser)]
#[command(name = "opsdesk")]
#[command(about = "Operations console for the holding's backend")]
pub struct Cli {
    /// Backend API base URL.
    #[arg(long, env = "OPSDESK_URL", default_value = "http://localhost:8000/api/v1", value_parser = parse_base_url)]
    pub url: String,

    /// Login; when set, a session is opened before the command runs.
    #[arg(long, env = "OPSDESK_LOGIN")]
    pub login: Option<String>,

    #[arg(long, env = "OPSDESK_PASSWORD", hide_env_values = true, requires = "login")]
    pub password: Option<String>,

    /// Seconds between feed polls.
    #[arg(long, env = "OPSDESK_POLL_INTERVAL", default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval: u64,

    /// Number of events fetched per poll.
    #[arg(long, env = "OPSDESK_EVENTS_LIMIT", default_value_t = 60)]
    pub page_size: usize,

    /// Key-value state database (read flags). Defaults to the platform data dir.
    #[arg(long, env = "OPSDESK_STATE_DB")]
    pub state_db: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Answer yes to every confirmation.
    #[arg(long, global = true, default_value_t = false)]
    pub yes: bool,

    /// Print HTML markup instead of text.
    #[arg(long, global = true, default_value_t = false)]
    pub html: bool,

    /// Debug-level logging.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a view.
    View {
        #[arg(value_parser = parse_view)]
        view: View,
        /// Site whose stock the inventory view shows.
        #[arg(long)]
        site: Option<i64>,
        /// Column to sort by; repeat to toggle direction.
        #[arg(long)]
        sort: Vec<usize>,
        /// Which table of the page `--sort` applies to.
        #[arg(long, default_value_t = 0)]
        table: usize,
    },
    /// Show the event feed.
    Inbox {
        /// Keep polling until interrupted.
        #[arg(long, default_value_t = false)]
        follow: bool,
        /// Type filter: plan, work_order, po_ or auth.
        #[arg(long = "type", value_parser = parse_category)]
        kind: Option<EventCategory>,
        #[arg(long, value_parser = parse_severity)]
        severity: Option<Severity>,
    },
    /// Flag events as read.
    MarkRead {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Forget all read flags.
    ClearRead,
    /// Show the logged-in user.
    Me,
    Logout,
    #[command(subcommand)]
    Site(SiteCommand),
    #[command(subcommand)]
    Equipment(EquipmentCommand),
    #[command(subcommand)]
    Material(MaterialCommand),
    /// Set stock level of a material at a site.
    Stock {
        #[arg(long)]
        site: i64,
        #[arg(long)]
        material: i64,
        #[arg(long)]
        qty: f64,
        #[arg(long)]
        rop: f64,
    },
    #[command(subcommand)]
    WorkOrder(WorkOrderCommand),
    #[command(subcommand)]
    Supplier(SupplierCommand),
    /// Purchase orders.
    #[command(subcommand)]
    Po(PurchaseOrderCommand),
    #[command(subcommand)]
    Plan(PlanCommand),
    #[command(subcommand)]
    User(UserCommand),
    #[command(subcommand)]
    Role(RoleCommand),
}

#[derive(Args)]
pub struct SiteFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub region: String,
}

#[derive(Subcommand)]
pub enum SiteCommand {
    Create(SiteFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: SiteFields,
    },
    Delete {
        id: i64,
        /// Name shown in the confirmation.
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Args)]
pub struct EquipmentFields {
    #[arg(long)]
    pub site: i64,
    #[arg(long = "type")]
    pub type_id: i64,
    #[arg(long)]
    pub code: String,
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "active")]
    pub status: String,
    /// Commissioning date, YYYY-MM-DD.
    #[arg(long)]
    pub date: NaiveDate,
}

#[derive(Subcommand)]
pub enum EquipmentCommand {
    Create(EquipmentFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: EquipmentFields,
    },
    Delete {
        id: i64,
        #[arg(long)]
        code: Option<String>,
    },
}

#[derive(Args)]
pub struct MaterialFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub unit: String,
    #[arg(long, default_value_t = 0.0)]
    pub reject: f64,
}

#[derive(Subcommand)]
pub enum MaterialCommand {
    Create(MaterialFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: MaterialFields,
    },
    Delete {
        id: i64,
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum WorkOrderCommand {
    Create {
        #[arg(long)]
        site: i64,
        #[arg(long, default_value = "Maintenance request")]
        title: String,
        /// corrective or preventive.
        #[arg(long = "type", default_value = "corrective")]
        kind: String,
        #[arg(long, default_value = "normal")]
        priority: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        planned: Option<NaiveDate>,
        #[arg(long)]
        team: Option<String>,
    },
    Status {
        id: i64,
        status: String,
    },
}

#[derive(Subcommand)]
pub enum SupplierCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        contact: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PurchaseOrderCommand {
    Create {
        #[arg(long)]
        supplier: i64,
        #[arg(long)]
        site: i64,
        #[arg(long)]
        comment: Option<String>,
    },
    Status {
        id: i64,
        status: String,
    },
}

#[derive(Subcommand)]
pub enum PlanCommand {
    /// Plan list plus one plan's items.
    Show { id: i64 },
    Create {
        #[arg(long)]
        site: i64,
        /// e.g. 2025, 2025-Q4 or 2025-11.
        #[arg(long)]
        period: String,
        #[arg(long, default_value = "draft")]
        status: String,
    },
    AddItem {
        id: i64,
        #[arg(long)]
        product: String,
        #[arg(long, default_value_t = 100)]
        qty: i64,
    },
}

#[derive(Subcommand)]
pub enum UserCommand {
    Create {
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: Option<String>,
        /// Comma-separated.
        #[arg(long, default_value = "")]
        roles: String,
    },
    Block { id: i64 },
    Unblock { id: i64 },
    /// Replace roles with a comma-separated list.
    Roles { id: i64, roles: String },
}

#[derive(Subcommand)]
pub enum RoleCommand {
    Create { name: String },
}

fn parse_base_url(s: &str) -> Result<String, String> {
    let url = url::Url::parse(s).map_err(|e| format!("invalid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(s.trim_end_matches('/').to_string()),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

fn parse_view(s: &str) -> Result<View, String> {
    s.parse::<View>().map_err(|e| e.message())
}

fn parse_category(s: &str) -> Result<EventCategory, String> {
    s.parse()
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    s.parse()
}
