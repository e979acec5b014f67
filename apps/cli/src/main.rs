use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use client_core::{
    load_settings, prepare_api_base_url, HttpVisitorGateway, UiAction, ViewState, VisitorSession,
};
use shared::domain::{FormField, Page, VisitorDraft, VisitorId, VisitorRecord};
use tracing_subscriber::EnvFilter;

const CREATED_AT_DISPLAY: &str = "%d %b %Y, %H:%M";

#[derive(Parser, Debug)]
#[command(name = "visitor", about = "Visitor sign-in command-line client")]
struct Cli {
    /// Backend API base URL, e.g. http://localhost:5000/api
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every visitor record
    List,
    /// Register a visitor
    Add(AddArgs),
    /// Delete a visitor record by id
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
struct AddArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    email: String,
    /// Visit date; defaults to today
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "")]
    purpose: String,
    #[arg(long, default_value = "")]
    meets_whom: String,
    #[arg(long, default_value = "")]
    comments: String,
}

impl AddArgs {
    fn into_draft(self, today: &str) -> VisitorDraft {
        VisitorDraft {
            name: self.name,
            phone: self.phone,
            email: self.email,
            date: self.date.unwrap_or_else(|| today.to_string()),
            purpose: self.purpose,
            meets_whom: self.meets_whom,
            comments: self.comments,
        }
    }
}

fn init_tracing(verbose: u8, configured: &str) {
    let fallback = match verbose {
        0 => configured,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn render_record(record: &VisitorRecord) -> String {
    let mut out = format!(
        "{} (ID: #{})\n  Phone:      {}\n  Email:      {}\n  Date:       {}\n  Purpose:    {}\n  Meets Whom: {}\n",
        record.name,
        record.id,
        record.phone,
        record.email,
        record.date,
        record.purpose,
        record.meets_whom,
    );
    if let Some(comments) = record.comments() {
        out.push_str(&format!("  Comments:   {comments}\n"));
    }
    if let Some(created_at) = record.created_at() {
        out.push_str(&format!(
            "  Registered: {}\n",
            created_at.format(CREATED_AT_DISPLAY)
        ));
    }
    out
}

fn print_records(state: &ViewState) {
    println!("{} Total Records", state.record_count());
    for record in &state.records {
        println!();
        print!("{}", render_record(record));
    }
}

fn confirm(input: &mut impl BufRead, id: VisitorId) -> Result<bool> {
    print!("Are you sure you want to delete this visitor record (#{id})? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

async fn add(session: &mut VisitorSession<HttpVisitorGateway>, draft: VisitorDraft) -> Result<()> {
    for field in FormField::ALL {
        session
            .dispatch(UiAction::UpdateField {
                field,
                value: draft.get(field).to_string(),
            })
            .await;
    }

    let state = session.dispatch(UiAction::Submit).await;
    if !state.missing_fields.is_empty() {
        let names: Vec<_> = state
            .missing_fields
            .iter()
            .map(|field| format!("--{}", field.wire_name().replace('_', "-")))
            .collect();
        bail!("missing required values: {}", names.join(", "));
    }
    if let Some(alert) = &state.alert {
        match &alert.detail {
            Some(detail) => bail!("{} ({detail})", alert.message),
            None => bail!("{}", alert.message),
        }
    }
    println!("User details submitted successfully!");
    Ok(())
}

async fn delete(
    session: &mut VisitorSession<HttpVisitorGateway>,
    id: VisitorId,
    yes: bool,
) -> Result<()> {
    if !yes && !confirm(&mut io::stdin().lock(), id)? {
        println!("Cancelled");
        return Ok(());
    }
    session.dispatch(UiAction::SelectPage(Page::Records)).await;
    session.dispatch(UiAction::RequestDelete(id)).await;
    let state = session.dispatch(UiAction::ConfirmDelete).await;
    println!("{} Total Records", state.record_count());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings();
    init_tracing(cli.verbose, &settings.log_filter);

    let api_base_url = prepare_api_base_url(
        cli.api_url
            .as_deref()
            .unwrap_or(settings.api_base_url.as_str()),
    )
    .context("invalid backend API base URL")?;
    tracing::debug!(api_base_url = %api_base_url, "using visitor backend");

    let mut session = VisitorSession::new(HttpVisitorGateway::new(api_base_url));
    match cli.command {
        Command::List => {
            let state = session.dispatch(UiAction::SelectPage(Page::Records)).await;
            print_records(state);
        }
        Command::Add(args) => {
            let today = chrono::Local::now().format("%Y-%m-%d").to_string();
            add(&mut session, args.into_draft(&today)).await?;
        }
        Command::Delete { id, yes } => delete(&mut session, VisitorId(id), yes).await?,
    }
    Ok(())
}
