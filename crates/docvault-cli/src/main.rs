use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use docvault_cli::seeder::{self, SeedConfig};
use docvault_core::hash_password;
use docvault_models::{Email, system_roles};
use dotenvy::dotenv;
use sqlx::PgPool;

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Parser)]
#[command(name = "docvault-cli")]
#[command(about = "DocVault CLI - Administrative tools for DocVault", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account (signup can only create regular users)
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake users and documents
    Seed {
        /// Number of regular users to create
        #[arg(short = 'u', long, default_value = "20")]
        users: usize,

        /// Number of admins to create
        #[arg(long, default_value = "1")]
        admins: usize,

        /// Number of documents per user
        #[arg(short = 'd', long, default_value = "5")]
        documents: usize,
    },
    /// Clear all seeded users and their documents
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match docvault_db::init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => handle_create_admin(&pool, first_name, last_name, email, password).await,
        Commands::Seed {
            users,
            admins,
            documents,
        } => {
            let config = SeedConfig::new(users)
                .with_admins(admins)
                .with_documents_per_user(documents);
            seeder::seed_all(&pool, config).await
        }
        Commands::ClearSeed => seeder::clear_all(&pool).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn prompt_text(prompt: &str, value: Option<String>) -> Result<String, dialoguer::Error> {
    match value {
        Some(value) => Ok(value),
        None => Input::new().with_prompt(prompt).interact_text(),
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let first_name = prompt_text("First name", first_name)?;
    let last_name = prompt_text("Last name", last_name)?;
    let email = Email::new(prompt_text("Email address", email)?)?;

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err("First and last name are required".into());
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!("Password must be minimum of {MIN_PASSWORD_LENGTH} characters").into());
    }

    create_admin(pool, first_name.trim(), last_name.trim(), &email, &password).await?;

    println!("\n✅ Admin created successfully!");
    println!("   Email: {}", email);
    println!("   Name: {} {}", first_name.trim(), last_name.trim());
    Ok(())
}

async fn create_admin(
    db: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &Email,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let inserted = sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (first_name, last_name, email, password, role_id)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(&hashed_password)
    .bind(system_roles::ADMIN)
    .fetch_optional(db)
    .await?;

    if inserted.is_none() {
        return Err("User with this email already exists".into());
    }

    Ok(())
}
