//! Command line front end for the GramConnect store.
//!
//! # Responsibility
//! - Drive complaint, reminder and notice operations against a SQLite store.
//! - Render derived views (filtered feed, upcoming festivals, active notices).
//!
//! # Invariants
//! - Storage failures never abort a command; they surface as log events.
//! - Only argument and validation errors produce a non-zero exit code.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use gramconnect_core::view::{
    active_notices, days_until, format_date, format_timestamp_local, local_now, status_counts,
    upcoming_festivals, upcoming_reminders,
};
use gramconnect_core::{
    default_log_level, init_logging, reminder_notification, schedule_notification,
    ComplaintCategory, ComplaintDraft, ComplaintFilter, ComplaintStatus, FestivalCatalog,
    LocalStore, LogNotifier, NewNotice, NoticeKind, SqliteBackend, DEFAULT_UPCOMING_DAYS,
};
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

type Store = LocalStore<SqliteBackend>;

#[derive(Parser)]
#[command(name = "gramconnect", version, about = "Local civic complaints and festival reminders")]
struct Cli {
    /// SQLite file holding the app data.
    #[arg(long, env = "GRAMCONNECT_DB", default_value = "gramconnect.sqlite3")]
    db: PathBuf,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "GRAMCONNECT_LOG_DIR")]
    log_dir: Option<String>,
    /// trace|debug|info|warn|error
    #[arg(long, env = "GRAMCONNECT_LOG_LEVEL")]
    log_level: Option<String>,
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Complaint feed operations.
    Complaints {
        #[command(subcommand)]
        action: ComplaintAction,
    },
    /// Festival catalog views.
    Festivals {
        #[command(subcommand)]
        action: FestivalAction,
    },
    /// Festival reminder operations.
    Reminders {
        #[command(subcommand)]
        action: ReminderAction,
    },
    /// Notice administration.
    Notices {
        #[command(subcommand)]
        action: NoticeAction,
    },
    /// Complaint counts by status.
    Stats,
}

#[derive(Subcommand)]
enum ComplaintAction {
    /// List complaints, most recent first.
    List {
        #[arg(long)]
        category: Option<ComplaintCategory>,
        #[arg(long)]
        status: Option<ComplaintStatus>,
        /// Case-insensitive text matched against description or location.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Submit a new complaint.
    Add {
        #[arg(long)]
        category: Option<ComplaintCategory>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        location: String,
        /// Photo as a `data:image/...;base64,` URI.
        #[arg(long)]
        image: Option<String>,
    },
    /// Change a complaint's status.
    SetStatus { id: String, status: ComplaintStatus },
}

#[derive(Subcommand)]
enum FestivalAction {
    /// Festivals in the look-ahead window, soonest first.
    Upcoming {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long, default_value_t = DEFAULT_UPCOMING_DAYS)]
        days: i64,
    },
}

#[derive(Subcommand)]
enum ReminderAction {
    /// All reminders, or only upcoming ones.
    List {
        #[arg(long)]
        upcoming: bool,
    },
    /// Turn the reminder for a catalog festival on or off.
    ///
    /// The day-before notification is only dispatched while this process is
    /// still running.
    Toggle {
        festival_id: String,
        #[arg(long)]
        catalog: PathBuf,
    },
    /// Delete every reminder for a festival.
    Remove { festival_id: String },
}

#[derive(Subcommand)]
enum NoticeAction {
    /// All notices.
    List,
    /// Notices that would be shown today.
    Active,
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: String,
        #[arg(long = "type", default_value = "civic")]
        kind: NoticeKind,
        /// YYYY-MM-DD; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Activate { id: String },
    Deactivate { id: String },
    Delete { id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("initializing logging")?;
    }

    let backend = SqliteBackend::open(&cli.db)
        .with_context(|| format!("opening store `{}`", cli.db.display()))?;
    let store = LocalStore::new(backend);
    let out = Output { json: cli.json };

    match cli.command {
        Commands::Complaints { action } => run_complaints(&store, &out, action),
        Commands::Festivals { action } => run_festivals(&out, action),
        Commands::Reminders { action } => run_reminders(&store, &out, action),
        Commands::Notices { action } => run_notices(&store, &out, action),
        Commands::Stats => {
            let counts = status_counts(&store.list_complaints());
            out.print(
                &serde_json::json!({
                    "submitted": counts.submitted,
                    "in_review": counts.in_review,
                    "resolved": counts.resolved,
                    "total": counts.total(),
                }),
                || {
                    vec![format!(
                        "submitted={} in_review={} resolved={} total={}",
                        counts.submitted,
                        counts.in_review,
                        counts.resolved,
                        counts.total()
                    )]
                },
            )
        }
    }
}

fn run_complaints(store: &Store, out: &Output, action: ComplaintAction) -> Result<()> {
    match action {
        ComplaintAction::List {
            category,
            status,
            search,
        } => {
            let filter = ComplaintFilter {
                category,
                status,
                search,
            };
            let complaints = store.list_complaints();
            let matched = filter.apply(&complaints);
            out.print(&matched, || {
                matched
                    .iter()
                    .map(|c| {
                        format!(
                            "{}\t{}\t{}\t{}\t{}",
                            c.id,
                            c.category,
                            c.status,
                            c.location,
                            format_timestamp_local(c.created_at)
                        )
                    })
                    .collect()
            })
        }
        ComplaintAction::Add {
            category,
            description,
            location,
            image,
        } => {
            let draft = ComplaintDraft {
                category,
                description,
                location,
                image,
            };
            let new = match draft.validate() {
                Ok(new) => new,
                Err(errors) => {
                    for (field, message) in errors.iter() {
                        eprintln!("{}: {message}", field.as_str());
                    }
                    bail!("complaint rejected");
                }
            };
            let created = store.add_complaint(new);
            out.print(&created, || vec![created.id.clone()])
        }
        ComplaintAction::SetStatus { id, status } => {
            store.update_complaint_status(&id, status);
            Ok(())
        }
    }
}

fn run_festivals(out: &Output, action: FestivalAction) -> Result<()> {
    match action {
        FestivalAction::Upcoming { catalog, days } => {
            let catalog = FestivalCatalog::load(&catalog)?;
            let upcoming = upcoming_festivals(catalog.festivals(), days);
            out.print(&upcoming, || {
                upcoming
                    .iter()
                    .map(|f| {
                        format!(
                            "{}\t{}\t{}\tin {} days",
                            f.id,
                            f.name,
                            format_date(f.date),
                            days_until(f.date)
                        )
                    })
                    .collect()
            })
        }
    }
}

fn run_reminders(store: &Store, out: &Output, action: ReminderAction) -> Result<()> {
    match action {
        ReminderAction::List { upcoming } => {
            let mut reminders = store.list_reminders();
            if upcoming {
                reminders = upcoming_reminders(&reminders, DEFAULT_UPCOMING_DAYS);
            }
            out.print(&reminders, || {
                reminders
                    .iter()
                    .map(|r| {
                        format!(
                            "{}\t{}\t{}",
                            r.festival_id,
                            r.festival_name,
                            format_date(r.festival_date)
                        )
                    })
                    .collect()
            })
        }
        ReminderAction::Toggle {
            festival_id,
            catalog,
        } => {
            let catalog = FestivalCatalog::load(&catalog)?;
            let Some(festival) = catalog.find(&festival_id) else {
                bail!("festival `{festival_id}` is not in the catalog");
            };

            let active = store.toggle_reminder(&festival.id, &festival.name, festival.date);
            if active {
                // The timer thread dies with this process; a long-running
                // host keeps it alive until the notification fires.
                let notification = reminder_notification(&festival.name, festival.date, &Local);
                let outcome = schedule_notification(
                    Arc::new(LogNotifier::default()),
                    notification,
                    chrono::Utc::now(),
                );
                info!("event=reminder_notify module=cli status=ok outcome={outcome:?}");
            }
            out.print(
                &serde_json::json!({ "festival_id": festival.id, "active": active }),
                || vec![format!("{}\t{}", festival.id, if active { "on" } else { "off" })],
            )
        }
        ReminderAction::Remove { festival_id } => {
            let removed = store.has_reminder(&festival_id);
            store.remove_reminder(&festival_id);
            out.print(
                &serde_json::json!({ "festival_id": festival_id, "removed": removed }),
                || {
                    vec![format!(
                        "{festival_id}\t{}",
                        if removed { "removed" } else { "absent" }
                    )]
                },
            )
        }
    }
}

fn run_notices(store: &Store, out: &Output, action: NoticeAction) -> Result<()> {
    match action {
        NoticeAction::List => {
            let notices = store.list_notices();
            print_notices(out, &notices)
        }
        NoticeAction::Active => {
            let notices = active_notices(&store.list_notices(), local_now().date());
            print_notices(out, &notices)
        }
        NoticeAction::Add {
            title,
            message,
            kind,
            date,
        } => {
            let notice = store.add_notice(NewNotice {
                title,
                message,
                kind,
                date: date.unwrap_or_else(|| local_now().date()),
                is_active: true,
            });
            out.print(&notice, || vec![notice.id.clone()])
        }
        NoticeAction::Activate { id } => {
            store.set_notice_active(&id, true);
            Ok(())
        }
        NoticeAction::Deactivate { id } => {
            store.set_notice_active(&id, false);
            Ok(())
        }
        NoticeAction::Delete { id } => {
            store.delete_notice(&id);
            Ok(())
        }
    }
}

fn print_notices(out: &Output, notices: &[gramconnect_core::Notice]) -> Result<()> {
    out.print(&notices, || {
        notices
            .iter()
            .map(|n| {
                format!(
                    "{}\t{}\t{}\t{}\t{}",
                    n.id,
                    n.kind,
                    format_date(n.date),
                    if n.is_active { "active" } else { "inactive" },
                    n.title
                )
            })
            .collect()
    })
}

struct Output {
    json: bool,
}

impl Output {
    fn print<T: Serialize + ?Sized>(
        &self,
        value: &T,
        lines: impl FnOnce() -> Vec<String>,
    ) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            for line in lines() {
                println!("{line}");
            }
        }
        Ok(())
    }
}
