use anyhow::Context;
use clap::{Parser, Subcommand};
use polldance_client::{
    ApiClient, AuthContext, Config, PollId,
    render,
    storage::FileStore,
    views::{AccountView, MyPollsView, PollDetailView, PollDraft, PollListView, ViewState, session},
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[macro_use]
extern crate tracing;

#[derive(Parser)]
#[command(name = "polldance", about = "Terminal client for the polldance polling service", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every poll
    Polls,
    /// Show a poll with its results
    Show { poll_id: PollId },
    /// Vote for an option of a poll
    Vote { poll_id: PollId, option: String },
    /// Withdraw your vote from a poll
    CancelVote { poll_id: PollId },
    /// Create an account
    Register {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and remember the session
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show your account and the polls you voted in
    Account,
    /// List the polls you created
    MyPolls,
    /// Create a poll
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Repeat for each option
        #[arg(long = "option", required = true)]
        options: Vec<String>,
    },
    /// Delete one of your polls by title
    Delete { title: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "INFO");
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;
    let api = ApiClient::new(&config)?;
    let mut auth = AuthContext::restore(FileStore::new(&config.storage_path))
        .context("restoring saved session")?;
    debug!("Using server {}", api.base_url());

    let ok = match cli.command {
        Commands::Polls => {
            let mut view = PollListView::new();
            view.load(&api).await;
            print!("{}", render::poll_list(&view));
            true
        }
        Commands::Show { poll_id } => {
            let mut view = PollDetailView::new(api.clone(), poll_id);
            view.load().await;
            print!("{}", render::poll_detail(&view, auth.user()));
            matches!(view.state(), ViewState::Loaded(_))
        }
        Commands::Vote { poll_id, option } => {
            let mut view = PollDetailView::new(api.clone(), poll_id);
            view.load().await;
            let voted = view.poll().is_some()
                && view.select_option(auth.user(), &option).await.is_ok();
            print!("{}", render::poll_detail(&view, auth.user()));
            voted
        }
        Commands::CancelVote { poll_id } => {
            let mut view = PollDetailView::new(api.clone(), poll_id);
            view.load().await;
            let cancelled =
                view.poll().is_some() && view.cancel_vote(auth.user()).await.is_ok();
            print!("{}", render::poll_detail(&view, auth.user()));
            cancelled
        }
        Commands::Register { username, password } => {
            match session::register(&api, &username, &password).await {
                Ok(()) => {
                    println!("Registered {username}. Log in with: polldance login {username}");
                    true
                }
                Err(e) => {
                    eprintln!("{e}");
                    false
                }
            }
        }
        Commands::Login { username, password } => {
            match session::login(&api, &mut auth, &username, &password).await {
                Ok(user) => {
                    println!("Logged in as {}", user.username);
                    true
                }
                Err(e) => {
                    eprintln!("{e}");
                    false
                }
            }
        }
        Commands::Logout => {
            session::logout(&mut auth)?;
            println!("Logged out");
            true
        }
        Commands::Account => {
            let mut view = AccountView::new(auth.user())?;
            view.load(&api).await;
            print!("{}", render::account(&view));
            true
        }
        Commands::MyPolls => {
            let mut view = MyPollsView::new(auth.user())?;
            let loaded = view.refresh(&api).await.is_ok();
            print!("{}", render::my_polls(&view));
            loaded
        }
        Commands::Create {
            title,
            description,
            options,
        } => {
            let mut view = MyPollsView::new(auth.user())?;
            let created = match PollDraft::new(title, description).with_options(options) {
                Ok(draft) => view.create(&api, draft).await.is_ok(),
                Err(e) => {
                    eprintln!("{e}");
                    false
                }
            };
            print!("{}", render::my_polls(&view));
            created
        }
        Commands::Delete { title } => {
            let mut view = MyPollsView::new(auth.user())?;
            let deleted = view.delete(&api, &title).await.is_ok();
            print!("{}", render::my_polls(&view));
            deleted
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
