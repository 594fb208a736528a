use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use client_manager::format::{format_credit, format_flag, or_placeholder, truncate};
use client_manager::validation::{ValidationErrors, validate_client};
use client_manager::{
    ClientFields, ClientRepo, RecordStore, SelectionMode, config, logging, seed,
};

/// Manage client records kept in a local SQLite file
#[derive(Parser)]
#[command(name = "client-manager", version, about, long_about = None)]
struct Cli {
    /// Client store file (defaults to CLIENT_MANAGER_DATABASE_PATH or clients.sqlite)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the store file and its schema if missing
    Init,

    /// Insert the demo clients
    Seed {
        /// Do not ask before adding to a store that already has clients
        #[arg(long)]
        yes: bool,
    },

    /// List clients whose name contains NAME (all clients when omitted)
    Search { name: Option<String> },

    /// Show every field of one client
    Show { id: i64 },

    /// Validate and save a new client
    Add {
        #[command(flatten)]
        fields: FieldArgs,

        #[arg(long)]
        good_client: bool,
    },

    /// Change fields of an existing client
    Edit {
        id: i64,

        #[command(flatten)]
        fields: FieldArgs,

        #[arg(long)]
        good_client: Option<bool>,
    },

    /// Delete clients by id
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Print the number of clients
    Count,

    /// Pick clients and print their `id<TAB>name` pairs
    Select {
        /// Allow several clients instead of exactly one
        #[arg(long)]
        many: bool,

        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

#[derive(Args)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    postal_code: Option<String>,
    #[arg(long)]
    city: Option<String>,
    /// DD/MM/YYYY
    #[arg(long)]
    birth_date: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    credit: Option<String>,
    /// brun, blond, roux or chauve
    #[arg(long)]
    hair_color: Option<String>,
}

impl FieldArgs {
    fn apply(self, fields: &mut ClientFields) {
        let FieldArgs {
            name,
            phone,
            address,
            postal_code,
            city,
            birth_date,
            credit,
            hair_color,
        } = self;

        let targets = [
            (name, &mut fields.name),
            (phone, &mut fields.phone),
            (address, &mut fields.address),
            (postal_code, &mut fields.postal_code),
            (city, &mut fields.city),
            (birth_date, &mut fields.birth_date),
            (credit, &mut fields.available_credit),
            (hair_color, &mut fields.hair_color),
        ];
        for (value, target) in targets {
            if let Some(value) = value {
                *target = value;
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::init()?;
    logging::init(&config.log)?;

    let path = cli.db.unwrap_or(config.database_path);
    let mut store = RecordStore::new();
    store
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let result = run(&mut store, cli.command);
    let closed = store.close();
    result?;
    closed?;
    Ok(())
}

fn run(store: &mut RecordStore, command: Command) -> Result<()> {
    match command {
        Command::Init => {
            if let Some(path) = store.path() {
                println!("Client store ready at {}", path.display());
            }
        }
        Command::Seed { yes } => {
            let report = seed::populate(store, |existing| {
                yes || confirm(&format!(
                    "The store already holds {existing} client(s). Add the demo clients anyway?"
                ))
                .unwrap_or(false)
            })?;

            if report.cancelled {
                println!("Cancelled.");
                return Ok(());
            }
            for (id, name) in &report.inserted {
                println!("  [OK] {name} (id {id})");
            }
            for (name, reason) in &report.failed {
                println!("  [ERROR] {name}: {reason}");
            }
            println!(
                "{}/{} demo clients inserted.",
                report.inserted.len(),
                report.inserted.len() + report.failed.len()
            );
        }
        Command::Search { name } => {
            let clients = ClientRepo::search(store, name.as_deref().unwrap_or(""))?;
            println!("{:>5}  {:<28}  {:<16}  {:>16}", "ID", "NAME", "CITY", "CREDIT");
            for client in &clients {
                println!(
                    "{:>5}  {:<28}  {:<16}  {:>16}",
                    client.id.unwrap_or_default(),
                    truncate(&client.name, 28, "…"),
                    truncate(&client.city, 16, "…"),
                    format_credit(client.available_credit),
                );
            }
            println!("{} client(s)", clients.len());
        }
        Command::Show { id } => {
            let client = ClientRepo::read(store, id)?;
            let fields = ClientFields::from_client(&client);
            println!("Id:               {id}");
            println!("Name:             {}", client.name);
            println!("Phone:            {}", or_placeholder(&client.phone, "-"));
            println!("Address:          {}", or_placeholder(&client.address, "-"));
            println!("Postal code:      {}", client.postal_code);
            println!("City:             {}", client.city);
            println!("Birth date:       {}", fields.birth_date);
            println!("Available credit: {}", format_credit(client.available_credit));
            println!("Good client:      {}", format_flag(client.is_good_client));
            println!(
                "Hair color:       {} ({})",
                client.hair_color,
                client.hair_color.label()
            );
        }
        Command::Add {
            fields: args,
            good_client,
        } => {
            let mut fields = ClientFields {
                is_good_client: good_client,
                ..ClientFields::default()
            };
            args.apply(&mut fields);

            let client = validate_client(&fields, None).or_else(report_invalid)?;
            let id = ClientRepo::create(store, &client)?;
            println!("Created client {id}.");
        }
        Command::Edit {
            id,
            fields: args,
            good_client,
        } => {
            let existing = ClientRepo::read(store, id)?;
            let mut fields = ClientFields::from_client(&existing);
            args.apply(&mut fields);
            if let Some(good_client) = good_client {
                fields.is_good_client = good_client;
            }

            let client = validate_client(&fields, existing.id).or_else(report_invalid)?;
            ClientRepo::update(store, &client)?;
            println!("Updated client {id}.");
        }
        Command::Delete { ids, yes } => {
            let ids: Vec<i64> = ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
            let label = if ids.len() == 1 {
                "this client".to_string()
            } else {
                format!("these {} clients", ids.len())
            };
            if !yes && !confirm(&format!("Delete {label}? This cannot be undone."))? {
                println!("Cancelled.");
                return Ok(());
            }

            let deleted = ClientRepo::delete_many(store, &ids)?;
            println!("Deleted {deleted} client(s).");
        }
        Command::Count => {
            println!("{}", ClientRepo::count(store)?);
        }
        Command::Select { many, ids } => {
            let mode = if many {
                SelectionMode::Multi
            } else {
                SelectionMode::Single
            };
            let picked = ids
                .iter()
                .map(|&id| ClientRepo::read(store, id))
                .collect::<Result<Vec<_>, _>>()?;

            for client_ref in mode.resolve(&picked)?.refs() {
                println!("{client_ref}");
            }
        }
    }
    Ok(())
}

fn report_invalid<T>(errors: ValidationErrors) -> Result<T> {
    eprintln!("The client was not saved:");
    for message in errors.messages() {
        eprintln!("  - {message}");
    }
    bail!("{} invalid field(s)", errors.errors().len())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "o" | "oui"
    ))
}
