//! `uco-admin`: command-line front end of the UCO administration API.
//!
//! # Usage
//!
//! ```bash
//! export UCO_ACCESS_TOKEN=...
//! uco-admin users list --size 20 --filter gómez
//! uco-admin users send-code 0199a0c4-1f6e-7a51-9c3e-5d2b7f0e8a11 --channel email
//! uco-admin watch countries
//! ```
//!
//! Exits 1 with a readable message when a call fails.

use clap::{Parser, Subcommand};

use uco_admin_console::client::ApiClient;
use uco_admin_console::config::{ConsoleConfig, normalize_base_url};
use uco_admin_console::error::ClientError;
use uco_admin_console::form::{UserForm, validate_user_form};
use uco_admin_console::model::{City, Country, Department, IdType};
use uco_admin_console::poll::Poller;
use uco_admin_console::{catalog, users};
use uco_domain::contact::VerificationChannel;

#[derive(Parser)]
#[command(name = "uco-admin", about = "Administer UCO users through the gateway")]
struct Args {
    /// Admin API root (overrides UCO_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token (overrides UCO_ACCESS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check access to the administration panel
    Dashboard,
    #[command(subcommand)]
    Users(UsersCommand),
    /// Confirm a contact with the code it received (no login needed)
    Verify {
        #[arg(long)]
        contact: String,
        #[arg(long)]
        code: String,
    },
    /// Print a catalog once
    #[command(subcommand)]
    Catalog(CatalogCommand),
    /// Print a catalog on every change until Ctrl-C
    #[command(subcommand)]
    Watch(CatalogCommand),
}

#[derive(Subcommand)]
enum UsersCommand {
    List {
        #[arg(long)]
        page: Option<String>,
        /// One of 10, 20, 30 or 50
        #[arg(long)]
        size: Option<String>,
        /// Keep rows matching this text
        #[arg(long)]
        filter: Option<String>,
    },
    Create(CreateArgs),
    SendCode {
        user_id: String,
        #[arg(long, value_parser = parse_channel)]
        channel: VerificationChannel,
    },
    ConfirmCode {
        user_id: String,
        #[arg(long, value_parser = parse_channel)]
        channel: VerificationChannel,
        #[arg(long)]
        code: String,
    },
}

#[derive(clap::Args)]
struct CreateArgs {
    #[arg(long)]
    id_type: String,
    #[arg(long)]
    id_number: String,
    #[arg(long)]
    first_name: String,
    #[arg(long, default_value = "")]
    second_name: String,
    #[arg(long)]
    first_surname: String,
    #[arg(long, default_value = "")]
    second_surname: String,
    #[arg(long)]
    country: String,
    #[arg(long)]
    department: String,
    #[arg(long)]
    home_city: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    mobile: String,
}

#[derive(Subcommand, Clone)]
enum CatalogCommand {
    IdTypes,
    Countries,
    Departments { country_id: String },
    Cities { department_id: String },
}

fn parse_channel(raw: &str) -> Result<VerificationChannel, String> {
    raw.parse()
        .map_err(|_| format!("unknown channel {raw:?}, expected email or mobile"))
}

#[tokio::main]
async fn main() {
    uco_core::tracing::init_cli_tracing();
    let args = Args::parse();

    let mut config = ConsoleConfig::from_env();
    if let Some(base) = &args.base_url {
        config.base_url = normalize_base_url(base);
    }
    if args.token.is_some() {
        config.access_token = args.token.clone();
    }

    if let Err(e) = run(args.command, &config).await {
        eprintln!("{}", e.friendly_message());
        if e.requires_login() {
            eprintln!("Define UCO_ACCESS_TOKEN con un token vigente.");
        }
        std::process::exit(1);
    }
}

async fn run(command: Command, config: &ConsoleConfig) -> Result<(), ClientError> {
    let client = ApiClient::new(config)?;
    match command {
        Command::Dashboard => {
            let dashboard = client.dashboard().await?;
            println!("{} ({}, {})", dashboard.message, dashboard.role, dashboard.section);
        }
        Command::Users(cmd) => run_users(&client, cmd).await?,
        Command::Verify { contact, code } => {
            client.verify_code(&contact, &code).await?;
            println!("Contacto verificado.");
        }
        Command::Catalog(which) => print_catalog(&client, which).await?,
        Command::Watch(which) => watch_catalog(&client, which, config).await,
    }
    Ok(())
}

async fn run_users(client: &ApiClient, command: UsersCommand) -> Result<(), ClientError> {
    match command {
        UsersCommand::List { page, size, filter } => {
            let page = users::sanitize_page(page.as_deref());
            let size = users::sanitize_size(size.as_deref());
            let result = client.list_users(page, size).await?;
            let rows = users::filter_users(&result.users, filter.as_deref().unwrap_or_default());
            for user in &rows {
                println!(
                    "{}  {}  {}  {}  {}",
                    user.id,
                    user.full_name(),
                    user.document_number.as_deref().unwrap_or("-"),
                    user.email.as_deref().unwrap_or("-"),
                    user.mobile_number.as_deref().unwrap_or("-"),
                );
            }
            println!(
                "{} de {} usuarios (página {}, tamaño {})",
                rows.len(),
                result.total_elements,
                result.page,
                result.size
            );
        }
        UsersCommand::Create(a) => {
            let form = UserForm {
                id_type: a.id_type,
                id_number: a.id_number,
                first_name: a.first_name,
                second_name: a.second_name,
                first_surname: a.first_surname,
                second_surname: a.second_surname,
                country_id: a.country,
                department_id: a.department,
                home_city: a.home_city,
                email: a.email,
                mobile_number: a.mobile,
            };
            let payload = match validate_user_form(&form) {
                Ok(payload) => payload,
                Err(errors) => {
                    for e in errors {
                        eprintln!("{}: {}", e.field, e.message);
                    }
                    std::process::exit(2);
                }
            };
            let user = client.create_user(&payload).await?;
            println!("Usuario registrado correctamente: {}", user.id);
        }
        UsersCommand::SendCode { user_id, channel } => {
            client.send_code(&user_id, channel).await?;
            println!("Código enviado por {channel}.");
        }
        UsersCommand::ConfirmCode {
            user_id,
            channel,
            code,
        } => {
            client.confirm_code(&user_id, channel, &code).await?;
            println!("Contacto confirmado.");
        }
    }
    Ok(())
}

fn id_type_line(t: &IdType) -> String {
    format!("{}  {}", t.id, t.name)
}

fn country_line(c: &Country) -> String {
    format!("{}  {}", c.id, c.name)
}

fn department_line(d: &Department) -> String {
    format!("{}  {}", d.id, d.name)
}

fn city_line(c: &City) -> String {
    format!("{}  {}", c.id, c.name)
}

fn print_lines<T>(items: &[T], line: fn(&T) -> String) {
    for item in items {
        println!("{}", line(item));
    }
}

async fn print_catalog(client: &ApiClient, which: CatalogCommand) -> Result<(), ClientError> {
    match which {
        CatalogCommand::IdTypes => print_lines(&client.id_types().await?, id_type_line),
        CatalogCommand::Countries => print_lines(&client.countries().await?, country_line),
        CatalogCommand::Departments { country_id } => {
            print_lines(&client.departments(&country_id).await?, department_line)
        }
        CatalogCommand::Cities { department_id } => {
            print_lines(&client.cities(&department_id).await?, city_line)
        }
    }
    Ok(())
}

async fn watch_catalog(client: &ApiClient, which: CatalogCommand, config: &ConsoleConfig) {
    let interval = config.poll_interval;
    match which {
        CatalogCommand::IdTypes => watch(catalog::id_types(client, interval), id_type_line).await,
        CatalogCommand::Countries => watch(catalog::countries(client, interval), country_line).await,
        CatalogCommand::Departments { country_id } => {
            watch(catalog::departments(client, &country_id, interval), department_line).await
        }
        CatalogCommand::Cities { department_id } => {
            watch(catalog::cities(client, &department_id, interval), city_line).await
        }
    }
}

async fn watch<T>(poller: Poller<Vec<T>>, line: fn(&T) -> String)
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let mut changes = poller.subscribe();
    loop {
        let state = changes.borrow_and_update().clone();
        if !state.loading {
            match &state.error {
                Some(message) => eprintln!("{message}"),
                None => {
                    println!("-- {} elementos", state.data.len());
                    print_lines(&state.data, line);
                }
            }
        }
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    // Idle poller: nothing more will arrive.
                    let _ = tokio::signal::ctrl_c().await;
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    poller.cancel();
}
