//! Booknet CLI
//!
//! Command-line front end for the book social network.

use std::path::{Path, PathBuf};

use booknet::{
    App,
    error::{AppError, Result},
    models::{AuthenticationRequest, Config, RegistrationRequest},
    pages::PagedView,
};
use clap::{Args, Parser, Subcommand};

#[cfg(feature = "keycloak")]
use booknet::auth::Session;

/// Booknet - Book Social Network client
#[derive(Parser, Debug)]
#[command(
    name = "booknet",
    version,
    about = "Share, borrow and review books from the command line"
)]
struct Cli {
    /// Path to storage directory containing config and session files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        firstname: String,
        #[arg(long)]
        lastname: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Activate an account with the code received by email
    Activate { code: String },

    /// Forget the current session
    Logout,

    /// Show the connected user and the menu
    Whoami,

    /// Books: catalog, ownership, borrowing
    #[command(subcommand)]
    Books(BooksCommand),

    /// Articles
    #[command(subcommand)]
    Articles(ArticlesCommand),

    /// Article themes
    #[command(subcommand)]
    Themes(ThemesCommand),

    /// Log in through the identity broker
    #[cfg(feature = "keycloak")]
    #[command(subcommand)]
    Sso(SsoCommand),

    /// Inspect or create the configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Position in a paged list.
#[derive(Args, Debug, Clone, Default)]
struct PageArgs {
    /// Page number, starting at 1
    #[arg(long)]
    page: Option<u32>,

    /// Items per page (default from config)
    #[arg(long)]
    size: Option<u32>,

    /// Jump to the last page
    #[arg(long)]
    last: bool,
}

#[derive(Subcommand, Debug)]
enum BooksCommand {
    /// Books shared by other members
    List(PageArgs),
    /// Books you own
    Mine(PageArgs),
    /// Books you borrowed
    Borrowed(PageArgs),
    /// Your books that others borrowed
    Returned(PageArgs),
    /// One book with its feedback
    Show {
        id: i64,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Create a book, or update one with --id
    Save {
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        synopsis: Option<String>,
        /// Make the book visible in the catalog
        #[arg(long)]
        shareable: Option<bool>,
        /// Cover picture to upload after saving
        #[arg(long)]
        cover: Option<PathBuf>,
    },
    /// Borrow a book from the catalog
    Borrow { id: i64 },
    /// Return a borrowed book, optionally rating it
    Return {
        id: i64,
        /// Note from 0 to 5; leaving feedback needs a comment too
        #[arg(long)]
        note: Option<f64>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Approve the return of one of your books
    Approve { id: i64 },
    /// Toggle whether one of your books is shared
    Share { id: i64 },
    /// Toggle whether one of your books is archived
    Archive { id: i64 },
}

#[derive(Subcommand, Debug)]
enum ArticlesCommand {
    /// List articles, optionally of one theme
    List {
        #[arg(long)]
        theme: Option<i64>,
    },
    /// Show one article
    Show { id: i64 },
    /// Write a new article
    Create {
        #[arg(long)]
        title: String,
        /// Article body; read from --file when omitted
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        theme: Option<i64>,
    },
    /// Edit an article
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Delete an article
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum ThemesCommand {
    /// List themes
    List,
    /// Add a theme
    Add { name: String },
    /// Rename a theme
    Edit { id: i64, name: String },
    /// Delete a theme
    Delete { id: i64 },
}

#[cfg(feature = "keycloak")]
#[derive(Subcommand, Debug)]
enum SsoCommand {
    /// Log in with broker credentials
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// End the broker session
    Logout,
    /// Print the account management URL
    Account,
    /// Show the broker profile of the connected user
    Profile,
    /// Print the browser login URL
    Url {
        #[arg(long)]
        redirect: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate configuration
    Validate,
    /// Show configuration and session info
    Info,
    /// Write a default config.toml
    Init {
        #[arg(long)]
        force: bool,
    },
}

impl Command {
    /// Whether the command needs a valid session.
    fn requires_auth(&self) -> bool {
        match self {
            Command::Books(_) | Command::Articles(_) | Command::Themes(_) | Command::Whoami => true,
            Command::Login { .. }
            | Command::Register { .. }
            | Command::Activate { .. }
            | Command::Logout
            | Command::Config(_) => false,
            // Broker commands check their own tokens.
            #[cfg(feature = "keycloak")]
            Command::Sso(_) => false,
        }
    }

    /// Page size requested on the command line, if any.
    fn page_size(&self) -> Option<u32> {
        match self {
            Command::Books(
                BooksCommand::List(paging)
                | BooksCommand::Mine(paging)
                | BooksCommand::Borrowed(paging)
                | BooksCommand::Returned(paging)
                | BooksCommand::Show { paging, .. },
            ) => paging.size,
            _ => None,
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Move to the requested page, then load it.
async fn open_page<V: PagedView>(view: &mut V, paging: &PageArgs) -> Result<()> {
    match paging.page {
        Some(page) => view.open_at(page.saturating_sub(1)).await?,
        None => view.fetch().await?,
    }
    if paging.last {
        view.go_to_last_page().await?;
    }
    Ok(())
}

/// Article body from `--content` or `--file`.
async fn article_body(content: Option<String>, file: Option<&Path>) -> Result<Option<String>> {
    match (content, file) {
        (Some(content), _) => Ok(Some(content)),
        (None, Some(path)) => Ok(Some(tokio::fs::read_to_string(path).await?)),
        (None, None) => Ok(None),
    }
}

async fn run_books(app: &App, command: BooksCommand) -> Result<()> {
    match command {
        BooksCommand::List(paging) => {
            let mut page = app.book_list_page();
            open_page(&mut page, &paging).await?;
            print!("{}", page.render());
        }

        BooksCommand::Mine(paging) => {
            let mut page = app.my_books_page();
            open_page(&mut page, &paging).await?;
            print!("{}", page.render());
        }

        BooksCommand::Borrowed(paging) => {
            let mut page = app.borrowed_books_page();
            open_page(&mut page, &paging).await?;
            print!("{}", page.render());
        }

        BooksCommand::Returned(paging) => {
            let mut page = app.returned_books_page();
            open_page(&mut page, &paging).await?;
            print!("{}", page.render());
        }

        BooksCommand::Show { id, paging } => {
            let mut page = app.book_detail_page(id);
            page.load().await?;
            if paging.page.is_some() || paging.last {
                open_page(&mut page, &paging).await?;
            }
            print!("{}", page.render());
        }

        BooksCommand::Save {
            id,
            title,
            author,
            isbn,
            synopsis,
            shareable,
            cover,
        } => {
            let mut page = app.manage_book_page();
            if let Some(id) = id {
                page.load(id).await?;
            }
            let form = &mut page.book_request;
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(author) = author {
                form.author_name = author;
            }
            if let Some(isbn) = isbn {
                form.isbn = isbn;
            }
            if let Some(synopsis) = synopsis {
                form.synopsis = synopsis;
            }
            if let Some(shareable) = shareable {
                form.shareable = shareable;
            }
            if let Some(cover) = cover {
                page.select_cover(&cover).await?;
            }
            page.save_book().await?;
            print!("{}", page.render());
        }

        BooksCommand::Borrow { id } => {
            let mut page = app.book_list_page();
            page.fetch().await?;
            page.borrow_book(id).await?;
            print!("{}", page.render());
        }

        BooksCommand::Return { id, note, comment } => {
            let mut page = app.borrowed_books_page();
            page.fetch().await?;
            while page.select_for_return(id).is_err() {
                if page.is_last_page() {
                    return Err(AppError::validation(format!(
                        "Book {id} is not in your borrowed list"
                    )));
                }
                page.go_to_next_page().await?;
            }

            let with_feedback = note.is_some() || comment.is_some();
            if let Some(note) = note {
                page.feedback_request.note = note;
            }
            if let Some(comment) = comment {
                page.feedback_request.comment = comment;
            }
            page.return_book(with_feedback).await?;
            print!("{}", page.render());
        }

        BooksCommand::Approve { id } => {
            let mut page = app.returned_books_page();
            page.fetch().await?;
            while !page.returned_books.iter().any(|b| b.id == Some(id)) && !page.is_last_page() {
                page.go_to_next_page().await?;
            }
            page.approve_book_return(id).await?;
            print!("{}", page.render());
        }

        BooksCommand::Share { id } => {
            let mut page = app.my_books_page();
            page.share_book(id).await?;
            page.fetch().await?;
            print!("{}", page.render());
        }

        BooksCommand::Archive { id } => {
            let mut page = app.my_books_page();
            page.archive_book(id).await?;
            page.fetch().await?;
            print!("{}", page.render());
        }
    }
    Ok(())
}

async fn run_articles(app: &App, command: ArticlesCommand) -> Result<()> {
    match command {
        ArticlesCommand::List { theme } => {
            let mut page = app.article_list_page(theme);
            page.fetch().await?;
            print!("{}", page.render());
        }

        ArticlesCommand::Show { id } => {
            let mut page = app.article_detail_page();
            page.load(id).await?;
            print!("{}", page.render());
        }

        ArticlesCommand::Create {
            title,
            content,
            file,
            theme,
        } => {
            let mut page = app.create_article_page();
            page.article.title = title;
            page.article.content = article_body(content, file.as_deref())
                .await?
                .unwrap_or_default();
            page.article.theme_id = theme;
            page.submit().await?;
            print!("{}", page.render());
        }

        ArticlesCommand::Edit {
            id,
            title,
            content,
            file,
        } => {
            let mut page = app.create_article_page();
            page.load(id).await?;
            if let Some(title) = title {
                page.article.title = title;
            }
            if let Some(body) = article_body(content, file.as_deref()).await? {
                page.article.content = body;
            }
            page.submit().await?;
            print!("{}", page.render());
        }

        ArticlesCommand::Delete { id } => {
            let mut page = app.create_article_page();
            page.delete(id).await?;
            print!("{}", page.render());
        }
    }
    Ok(())
}

async fn run_themes(app: &App, command: ThemesCommand) -> Result<()> {
    let mut page = app.themes_page();
    match command {
        ThemesCommand::List => page.fetch().await?,
        ThemesCommand::Add { name } => page.add_theme(&name).await?,
        ThemesCommand::Edit { id, name } => page.edit_theme(id, &name).await?,
        ThemesCommand::Delete { id } => page.delete_theme(id).await?,
    }
    print!("{}", page.render());
    Ok(())
}

#[cfg(feature = "keycloak")]
async fn run_sso(app: &App, command: SsoCommand) -> Result<()> {
    let keycloak = &app.keycloak;
    match command {
        SsoCommand::Login { username, password } => {
            keycloak.login(&username, &password).await?;
            let name = Session::display_name(keycloak.as_ref()).await?;
            if app.uses_local_login() {
                log::warn!("auth.provider is \"local\"; set it to \"keycloak\" to use this session");
            }
            println!(
                "✓ Logged in as {}",
                name.as_deref().unwrap_or(&username)
            );
        }
        SsoCommand::Logout => {
            keycloak.logout().await?;
            println!("✓ Broker session closed");
        }
        SsoCommand::Account => println!("{}", keycloak.account_url()?),
        SsoCommand::Profile => match keycloak.init().await? {
            Some(profile) => {
                println!("{}", profile.display_name().unwrap_or("(no name)"));
                if let Some(email) = &profile.email {
                    println!("{email}");
                }
            }
            None => println!("Not authenticated"),
        },
        SsoCommand::Url { redirect } => {
            println!("{}", keycloak.login_url(redirect.as_deref())?);
        }
    }
    Ok(())
}

fn run_config(
    command: ConfigCommand,
    config: &Config,
    storage_dir: &Path,
    config_path: &Path,
) -> Result<()> {
    match command {
        ConfigCommand::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        ConfigCommand::Info => {
            log::info!("Storage directory: {}", storage_dir.display());
            log::info!(
                "Config file: {}",
                if config_path.exists() { "exists" } else { "not found, using defaults" }
            );
            log::info!("API root: {}", config.api.root_url);
            log::info!("Auth provider: {:?}", config.auth.provider);
            log::info!("Page size: {}", config.pagination.page_size);
            let session_path = storage_dir.join(&config.auth.storage_file);
            log::info!(
                "Session file: {}",
                if session_path.exists() { "exists" } else { "not found" }
            );
        }

        ConfigCommand::Init { force } => {
            if config_path.exists() && !force {
                log::warn!(
                    "Config already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
                return Ok(());
            }
            std::fs::create_dir_all(storage_dir)?;
            std::fs::write(config_path, Config::default().to_toml()?)?;
            log::info!("Config written to {}", config_path.display());
        }
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let mut config = if config_path.exists() {
        Config::load_or_default(&config_path)
    } else {
        Config::default()
    };
    config.apply_env();
    if let Some(size) = cli.command.page_size() {
        config.pagination.page_size = size;
    }
    log::debug!("Using storage directory {}", cli.storage_dir.display());

    let command = match cli.command {
        Command::Config(command) => {
            return run_config(command, &config, &cli.storage_dir, &config_path);
        }
        command => command,
    };

    let app = App::open(config, &cli.storage_dir)?;

    if command.requires_auth() {
        if let Err(e) = app.require_login().await {
            log::error!("{}", e);
            return Err(e);
        }
    }

    match command {
        Command::Login { email, password } => {
            if !app.uses_local_login() {
                log::warn!("auth.provider is not \"local\"; the stored token will not be used");
            }
            let mut page = app.login_page();
            page.auth_request = AuthenticationRequest::new(email, password);
            page.login().await?;
            print!("{}", page.render());
        }

        Command::Register {
            firstname,
            lastname,
            email,
            password,
        } => {
            let mut page = app.register_page();
            page.register_request = RegistrationRequest {
                firstname,
                lastname,
                email,
                password,
            };
            page.register().await?;
            print!("{}", page.render());
        }

        Command::Activate { code } => {
            let mut page = app.activate_account_page();
            page.confirm_account(&code).await?;
            print!("{}", page.render());
        }

        Command::Logout => {
            app.menu_page().logout().await?;
            println!("✓ Logged out");
        }

        Command::Whoami => {
            let mut menu = app.menu_page();
            menu.init().await?;
            print!("{}", menu.render());
        }

        Command::Books(command) => run_books(&app, command).await?,
        Command::Articles(command) => run_articles(&app, command).await?,
        Command::Themes(command) => run_themes(&app, command).await?,

        #[cfg(feature = "keycloak")]
        Command::Sso(command) => run_sso(&app, command).await?,

        Command::Config(_) => {}
    }

    Ok(())
}
