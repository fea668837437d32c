//! Benefits CLI - Benefit accounts and transfers
//!
//! Terminal front end over the benefits REST API.

mod api;
mod config;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use rust_decimal::Decimal;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

use benefits::{
    build_mutation_request, Benefit, BenefitDraft, BenefitId, BenefitOrchestrator, Confirmed,
    DialogResult, DomainError, MutationRequest, Notification,
};

use api::BenefitsClient;
use config::Config;

type Orchestrator = BenefitOrchestrator<BenefitsClient>;

#[derive(Parser)]
#[command(name = "benefits")]
#[command(about = "Benefits CLI - Manage benefit accounts and transfers", long_about = None)]
#[command(version)]
struct Cli {
    /// API base URL (overrides config and BENEFITS_API_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List benefits
    List {
        /// Only active benefits
        #[arg(short, long)]
        active: bool,
    },

    /// Show one benefit
    Show {
        id: BenefitId,
    },

    /// Create a benefit (prompts for missing fields)
    Create {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<Decimal>,
        /// Create as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Edit a benefit; unspecified fields keep their current values
    Edit {
        id: BenefitId,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<Decimal>,
        #[arg(long)]
        active: Option<bool>,
    },

    /// Deactivate a benefit
    Deactivate {
        id: BenefitId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Transfer value from one benefit to another
    Transfer {
        /// Source benefit ID
        from: BenefitId,
        /// Destination benefit ID (prompts when omitted)
        #[arg(long)]
        to: Option<BenefitId>,
        /// Amount to transfer (prompts when omitted)
        #[arg(long)]
        amount: Option<Decimal>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the API base URL
    SetUrl { url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Config { action } = cli.command {
        return cmd_config(action);
    }

    let mut config = Config::load()?.with_env_overrides();
    if let Some(url) = cli.url {
        config.set_base_url(url);
    }

    let client = BenefitsClient::new(&config.base_url, config.timeout())?;
    let (orchestrator, mut notifications) = BenefitOrchestrator::new(Arc::new(client));
    let console = Console {
        orchestrator,
        currency: config.currency.clone(),
    };

    let result = match cli.command {
        Commands::List { active } => console.list(active).await,
        Commands::Show { id } => console.show(id).await,
        Commands::Create { name, description, amount, inactive } => {
            let draft = BenefitDraft {
                name,
                description,
                amount,
                active: inactive.then_some(false),
            };
            console.create(draft).await
        }
        Commands::Edit { id, name, description, amount, active } => {
            let draft = BenefitDraft { name, description, amount, active };
            console.edit(id, draft).await
        }
        Commands::Deactivate { id, yes } => console.deactivate(id, yes).await,
        Commands::Transfer { from, to, amount } => console.transfer(from, to, amount).await,
        Commands::Config { .. } => Ok(()),
    };

    let failed = print_notifications(&mut notifications);
    result?;
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Print queued outcome notifications; true when any was a failure
fn print_notifications(notifications: &mut UnboundedReceiver<Notification>) -> bool {
    let mut failed = false;
    while let Ok(notification) = notifications.try_recv() {
        if notification.is_failure() {
            failed = true;
            eprintln!("{} {}", "✗".red(), notification);
        } else {
            println!("{} {}", "✓".green(), notification);
        }
    }
    failed
}

// ============================================
// Command Implementations
// ============================================

struct Console {
    orchestrator: Orchestrator,
    currency: String,
}

impl Console {
    fn money(&self, amount: Decimal) -> String {
        format!("{} {:.2}", self.currency, amount)
    }

    fn print_table(&self, benefits: &[Benefit]) {
        if benefits.is_empty() {
            println!("No benefits found.");
            return;
        }

        println!("{}", "Benefits:".bold());
        for benefit in benefits {
            let id = benefit.id.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string());
            let status = if benefit.active {
                "active".green()
            } else {
                "inactive".red()
            };

            println!(
                "  {:>4} {} {} [{}] {}",
                id.dimmed(),
                benefit.name.cyan().bold(),
                self.money(benefit.amount),
                status,
                truncate_string(benefit.description.as_deref().unwrap_or(""), 50).dimmed()
            );
        }
    }

    async fn list(&self, active_only: bool) -> Result<()> {
        if active_only {
            let active = self
                .orchestrator
                .list_active()
                .await
                .context("Failed to load active benefits")?;
            self.print_table(&active);
            return Ok(());
        }

        // Store failures surface as notifications.
        if let Ok(benefits) = self.orchestrator.load_all().await {
            self.print_table(&benefits);
        }
        Ok(())
    }

    async fn show(&self, id: BenefitId) -> Result<()> {
        let benefit = self
            .orchestrator
            .get(id)
            .await
            .with_context(|| format!("Could not load benefit {}", id))?;

        println!("{}", benefit.name.cyan().bold());
        println!("  ID: {}", id);
        println!(
            "  Description: {}",
            benefit.description.as_deref().unwrap_or("-")
        );
        println!("  Balance: {}", self.money(benefit.amount));
        println!(
            "  Status: {}",
            if benefit.active { "active".green() } else { "inactive".red() }
        );
        if let Some(version) = benefit.version {
            println!("  Version: {}", version);
        }
        if let Some(updated_at) = benefit.updated_at {
            println!("  Updated: {}", updated_at.format("%Y-%m-%d %H:%M:%S"));
        }
        Ok(())
    }

    async fn create(&self, draft: BenefitDraft) -> Result<()> {
        let request = match benefit_dialog(None, draft)? {
            DialogResult::Submitted(request) => request,
            DialogResult::Cancelled => {
                println!("Cancelled.");
                return Ok(());
            }
        };

        if let Ok(created) = self.orchestrator.create(&request).await {
            if let Some(id) = created.id {
                println!("  ID: {}", id.to_string().cyan());
            }
        }
        Ok(())
    }

    async fn edit(&self, id: BenefitId, draft: BenefitDraft) -> Result<()> {
        if self.orchestrator.load_all().await.is_err() {
            return Ok(());
        }
        let previous = self
            .orchestrator
            .cached(id)
            .await
            .with_context(|| format!("Benefit {} not found", id))?;

        let request = match benefit_dialog(Some(&previous), draft)? {
            DialogResult::Submitted(request) => request,
            DialogResult::Cancelled => {
                println!("Cancelled.");
                return Ok(());
            }
        };

        let _ = self.orchestrator.update(id, &request).await;
        Ok(())
    }

    async fn deactivate(&self, id: BenefitId, yes: bool) -> Result<()> {
        if self.orchestrator.load_all().await.is_err() {
            return Ok(());
        }
        let name = self
            .orchestrator
            .cached(id)
            .await
            .map(|b| b.name)
            .unwrap_or_else(|| format!("#{}", id));

        let confirmed = yes
            || Confirm::new()
                .with_prompt(format!("Really deactivate benefit \"{}\"?", name))
                .default(false)
                .interact()
                .context("Failed to read confirmation")?;

        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }

        let _ = self.orchestrator.deactivate(id, Confirmed::by_user()).await;
        Ok(())
    }

    async fn transfer(
        &self,
        from: BenefitId,
        to: Option<BenefitId>,
        amount: Option<Decimal>,
    ) -> Result<()> {
        if self.orchestrator.load_all().await.is_err() {
            return Ok(());
        }
        let source = self
            .orchestrator
            .cached(from)
            .await
            .with_context(|| format!("Benefit {} not found", from))?;

        println!(
            "From {} (available: {})",
            source.name.cyan().bold(),
            self.money(source.amount)
        );

        let to = match to {
            Some(id) => Some(id),
            None => match self.choose_destination(from).await? {
                DialogResult::Submitted(id) => Some(id),
                DialogResult::Cancelled => {
                    println!("Cancelled.");
                    return Ok(());
                }
            },
        };

        let amount = match amount {
            Some(a) => Some(a),
            None => prompt_amount("Amount to transfer", None)?,
        };

        match self.orchestrator.transfer(from, to, amount).await {
            Err(DomainError::InvalidTransfer(violations)) => {
                for violation in &violations {
                    eprintln!("  {} {}: {}", "✗".red(), violation.field(), violation);
                }
                bail!("Transfer not submitted");
            }
            Err(DomainError::NotFound { .. }) => bail!("Benefit {} not found", from),
            // Store failures are reported through notifications.
            Ok(_) | Err(_) => Ok(()),
        }
    }

    async fn choose_destination(&self, from: BenefitId) -> Result<DialogResult<BenefitId>> {
        let destinations = self
            .orchestrator
            .destinations(from)
            .await
            .context("Failed to load transfer destinations")?;

        if destinations.is_empty() {
            bail!("No active benefit available as destination");
        }

        let items: Vec<String> = destinations
            .iter()
            .map(|b| format!("{} - {}", b.name, self.money(b.amount)))
            .collect();

        let selection = Select::new()
            .with_prompt("Destination (Esc to cancel)")
            .items(&items)
            .default(0)
            .interact_opt()
            .context("Failed to read selection")?;

        Ok(selection
            .and_then(|index| destinations.get(index).and_then(|b| b.id))
            .into())
    }
}

/// Create/edit dialog. Prompts only when no field was given on the
/// command line, then asks for confirmation.
fn benefit_dialog(
    previous: Option<&Benefit>,
    mut draft: BenefitDraft,
) -> Result<DialogResult<MutationRequest>> {
    let interactive = draft == BenefitDraft::default()
        || (previous.is_none()
            && (draft.name.is_none() || draft.description.is_none() || draft.amount.is_none()));

    if interactive {
        if draft.name.is_none() {
            draft.name = Some(prompt_text("Name", previous.map(|p| p.name.as_str()))?);
        }
        if draft.description.is_none() {
            let current = previous.and_then(|p| p.description.as_deref());
            draft.description = Some(prompt_text("Description", current)?);
        }
        if draft.amount.is_none() {
            draft.amount = prompt_amount("Amount", previous.map(|p| p.amount))?;
        }
    }

    let request = match build_mutation_request(previous, draft) {
        Ok(request) => request,
        Err(violations) => {
            for violation in &violations {
                eprintln!("  {} {}", "✗".red(), violation);
            }
            bail!("Benefit not saved");
        }
    };

    if interactive {
        let save = Confirm::new()
            .with_prompt("Save benefit?")
            .default(true)
            .interact()
            .context("Failed to read confirmation")?;
        if !save {
            return Ok(DialogResult::Cancelled);
        }
    }

    Ok(DialogResult::Submitted(request))
}

fn prompt_text(prompt: &str, current: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(current) = current {
        input = input.default(current.to_string());
    }
    input.interact_text().context("Failed to read input")
}

/// Empty input means "not given"
fn prompt_amount(prompt: &str, current: Option<Decimal>) -> Result<Option<Decimal>> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(current) = current {
        input = input.default(current.to_string());
    }
    let raw = input.interact_text().context("Failed to read input")?;
    parse_amount(&raw)
}

fn parse_amount(raw: &str) -> Result<Option<Decimal>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let amount = raw
        .replace(',', ".")
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount: {}", raw))?;
    Ok(Some(amount))
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}

fn cmd_config(action: Option<ConfigAction>) -> Result<()> {
    let mut config = Config::load()?;

    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let effective = config.clone().with_env_overrides();
            println!("{}", "Configuration:".bold());
            println!("  Path: {:?}", Config::config_path()?);
            println!("  Base URL: {}", config.base_url);
            if effective.base_url != config.base_url {
                println!(
                    "  Effective URL: {} ({})",
                    effective.base_url.cyan(),
                    config::BASE_URL_ENV
                );
            }
            println!("  Timeout: {}s", config.timeout_secs);
            println!("  Currency: {}", config.currency);
        }
        ConfigAction::SetUrl { url } => {
            config.set_base_url(url);
            config.save()?;
            println!("{} Base URL set to {}", "✓".green(), config.base_url);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("").unwrap(), None);
        assert_eq!(parse_amount("  ").unwrap(), None);
        assert_eq!(parse_amount("1000").unwrap(), Some(dec!(1000)));
        assert_eq!(parse_amount("12,50").unwrap(), Some(dec!(12.50)));
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn test_flags_only_edit_is_not_interactive() {
        let previous = Benefit {
            id: Some(1),
            ..Benefit::new("Meal", Some("Daily".to_string()), dec!(100))
        };
        let draft = BenefitDraft::new().amount(dec!(250));

        let result = benefit_dialog(Some(&previous), draft).unwrap();
        let request = result.submitted().unwrap();
        assert_eq!(request.name, "Meal");
        assert_eq!(request.amount, dec!(250));
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("abcdef", 3), "abc...");
    }
}
