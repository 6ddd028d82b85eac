use chrono::{DateTime, Local, Utc};
use clap::{Args, Parser, Subcommand};
use ledger::{Amount, Catalog, Collection, Language, Ledger, SqlStore, Text, sort_newest_first};
use migration::{Migrator, MigratorTrait};
use uuid::Uuid;

use settings::Database;

mod settings;

#[derive(Parser, Debug)]
#[command(name = "khata")]
#[command(about = "Track personal expenses and incomes in a local ledger")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,

    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Display language (`en` or `bn`).
    #[arg(long)]
    language: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage the expense collection.
    Expense(Expense),
    /// Manage the income collection.
    Income(Income),
    /// Show the merged transaction list, newest first.
    Transactions,
}

#[derive(Args, Debug)]
struct Expense {
    #[command(subcommand)]
    command: EntryCommand,
}

#[derive(Args, Debug)]
struct Income {
    #[command(subcommand)]
    command: EntryCommand,
}

#[derive(Subcommand, Debug)]
enum EntryCommand {
    Add(AddArgs),
    List,
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    name: String,
    /// Decimal amount, e.g. `3.50`.
    #[arg(long)]
    amount: String,
}

#[derive(Args, Debug)]
struct DeleteArgs {
    #[arg(long)]
    id: Uuid,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "khata={level},ledger={level}",
            level = settings.app.level
        ))
        .init();

    let language = match &cli.language {
        Some(code) => Language::try_from(code.as_str())?,
        None => Language::try_from(settings.app.language.as_str())?,
    };
    let fallback = Language::try_from(settings.app.fallback_language.as_str())?;
    let catalog = Catalog::new(language, fallback);

    let db = connect_database(cli.database_url.as_deref(), &settings.database).await?;
    let mut ledger = Ledger::new(SqlStore::new(db));

    match cli.command {
        Command::Expense(Expense { command }) => {
            run_entry(&mut ledger, catalog, Collection::Expenses, command).await;
        }
        Command::Income(Income { command }) => {
            run_entry(&mut ledger, catalog, Collection::Incomes, command).await;
        }
        Command::Transactions => print_transactions(&ledger, catalog).await,
    }

    Ok(())
}

async fn connect_database(
    url_override: Option<&str>,
    database: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match url_override {
        Some(url) => url.to_string(),
        None => match database {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        },
    };

    let db = sea_orm::Database::connect(url).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Storage failures are logged and the command continues with an empty/no-op
/// result; nothing beyond the log line reaches the user.
async fn run_entry(
    ledger: &mut Ledger<SqlStore>,
    catalog: Catalog,
    collection: Collection,
    command: EntryCommand,
) {
    match command {
        EntryCommand::Add(args) => {
            let amount: Amount = match args.amount.parse() {
                Ok(amount) => amount,
                Err(err) => {
                    tracing::error!("rejected amount {:?}: {err}", args.amount);
                    return;
                }
            };

            match ledger.append(collection, &args.name, amount, Utc::now()).await {
                Ok(record) => {
                    let added = match collection {
                        Collection::Expenses => Text::ExpenseAdded,
                        Collection::Incomes => Text::IncomeAdded,
                    };
                    println!("{} ({})", catalog.text(added), record.id);
                }
                Err(err) => tracing::error!("failed to save {collection} record: {err}"),
            }
        }
        EntryCommand::List => print_list(ledger, catalog, collection).await,
        EntryCommand::Delete(args) => {
            if let Err(err) = ledger.delete(collection, args.id).await {
                tracing::error!("failed to delete from {collection}: {err}");
            }
        }
    }
}

async fn print_list(ledger: &Ledger<SqlStore>, catalog: Catalog, collection: Collection) {
    let mut records = match ledger.list(collection).await {
        Ok(records) => records,
        Err(err) => {
            tracing::error!("failed to load {collection}: {err}");
            Vec::new()
        }
    };
    sort_newest_first(&mut records);

    let (title, total_label) = match collection {
        Collection::Expenses => (Text::ExpenseList, Text::TotalExpense),
        Collection::Incomes => (Text::IncomeList, Text::TotalIncome),
    };
    println!("{}", catalog.text(title));

    if records.is_empty() {
        println!("{}", catalog.text(Text::NoEntry));
        return;
    }

    for record in &records {
        println!(
            "{}  {}  ${}  ({})",
            record.name,
            format_created(record.created_time),
            record.amount,
            record.id
        );
    }

    match ledger.total(collection).await {
        Ok(total) => println!("{}: ${total}", catalog.text(total_label)),
        Err(err) => tracing::error!("failed to total {collection}: {err}"),
    }
}

async fn print_transactions(ledger: &Ledger<SqlStore>, catalog: Catalog) {
    let transactions = match ledger.transactions().await {
        Ok(transactions) => transactions,
        Err(err) => {
            tracing::error!("failed to load transactions: {err}");
            Vec::new()
        }
    };

    println!("{}", catalog.text(Text::TransactionList));

    if transactions.is_empty() {
        println!("{}", catalog.text(Text::NoEntry));
        return;
    }

    for transaction in &transactions {
        let sign = match transaction.collection {
            Collection::Expenses => '-',
            Collection::Incomes => '+',
        };
        println!(
            "{}  {}{}",
            transaction.record.name, sign, transaction.record.amount
        );
    }
}

/// Formats a record's creation time for display, e.g. `Aug 25, 2026`.
fn format_created(created_time: DateTime<Utc>) -> String {
    created_time
        .with_timezone(&Local)
        .format("%b %-d, %Y")
        .to_string()
}
