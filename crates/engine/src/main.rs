//! Wordday - command line entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordday_domain::{HistoryLedger, Notification};
use wordday_engine::infrastructure::config::{load_dotenv, AppConfig};
use wordday_engine::use_cases::{SessionController, SessionState};
use wordday_engine::App;

const USAGE: &str = "usage: wordday [show | new | history | clear-history | reset]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Show,
    New,
    History,
    ClearHistory,
    Reset,
}

impl Command {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg {
            None | Some("show") => Some(Self::Show),
            Some("new") => Some(Self::New),
            Some("history") => Some(Self::History),
            Some("clear-history") => Some(Self::ClearHistory),
            Some("reset") => Some(Self::Reset),
            Some(_) => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    // Logs go to stderr so they never mix with command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordday_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = Command::parse(args.first().map(String::as_str)) else {
        anyhow::bail!("unknown command '{}'\n{USAGE}", args[0]);
    };

    let config = AppConfig::from_env()?;
    let app = App::from_config(&config).await?;
    let session = &app.session;

    announce(&session.start().await?);

    match command {
        Command::Show => print_state(session).await,
        Command::New => {
            announce(&session.request_new_word().await?);
            print_state(session).await;
        }
        Command::History => {
            announce(&session.refresh_history().await?);
            print_history(&session.history().await);
        }
        Command::ClearHistory => {
            announce(&session.clear_history().await?);
            print_history(&session.history().await);
        }
        Command::Reset => {
            announce(&session.reset_all().await?);
            print_state(session).await;
        }
    }

    Ok(())
}

fn announce(notification: &Notification) {
    println!("{notification}");
}

async fn print_state(session: &SessionController) {
    match session.state().await {
        SessionState::WordAvailable(record) => {
            println!();
            println!("  {}", record.word());
            println!("  {}", record.definition());
            println!("  \"{}\"", record.example());
            println!("  shown on {}", record.date());
        }
        SessionState::Exhausted => {
            println!();
            println!("  All words have been shown. Run `wordday reset` to start over.");
        }
        SessionState::Loading => {}
    }
}

fn print_history(history: &HistoryLedger) {
    println!();
    if history.is_empty() {
        println!("No history found.");
        return;
    }
    for record in history.records() {
        println!("  {:<12} {}", record.date(), record.word());
    }
}
