//! ToyProject CLI
//!
//! Command-line front end for the auth, stats and board services:
//! - Sign up, log in and out
//! - Look up League of Legends match history
//! - Read and write board posts, remotely or in a local session

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use toyproject::auth::{availability_error, LoginForm, SignupField, SignupForm};
use toyproject::board::{Board, Post, PostDraft, PostEdit};
use toyproject::config::{generate_default_config, Config, LoggingConfig};
use toyproject::context::{AppContext, AppError};
use toyproject::format;
use toyproject::riot::{MatchDetail, MatchSearch, MatchSummary, PlayerMatches};

#[derive(Parser)]
#[command(name = "toyproject")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Discussion board and League of Legends match history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/toyproject/config.toml or ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL for all three services, overriding the config
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Signup {
        username: String,
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log in and store the session
    Login {
        username: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Check whether a username is still free
    CheckUsername { username: String },

    /// Check whether an email is still free
    CheckEmail { email: String },

    /// Recent matches and aggregate stats for a Riot id
    Matches {
        game_name: String,
        tag_line: String,
        /// Number of matches (default from config)
        #[arg(short = 'n', long)]
        count: Option<u32>,
        /// Match ids to show in full
        #[arg(short, long)]
        expand: Vec<String>,
    },

    /// One match from one player's point of view
    Match {
        match_id: String,
        #[arg(long)]
        puuid: String,
    },

    /// Posts on the board service
    Posts {
        #[command(subcommand)]
        action: PostsAction,
    },

    /// Interactive in-memory board session
    Board,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum PostsAction {
    /// List every post
    List,

    /// Write a new post
    Create {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        author: String,
        #[arg(long)]
        content: String,
        /// Password for later edits
        #[arg(short, long, default_value = "")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.set_base_url(url);
    }

    init_logging(&config.logging);

    if matches!(cli.command, Commands::Board) {
        return run_board_session();
    }

    let mut ctx = AppContext::init(config)?;
    let result = run(&cli, &mut ctx).await;
    ctx.shutdown();

    match result {
        Err(AppError::Api(e)) if e.is_unauthorized() => {
            bail!("Your session has expired. Please log in again (redirected to /login).")
        }
        other => Ok(other?),
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("toyproject={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

async fn run(cli: &Cli, ctx: &mut AppContext) -> Result<(), AppError> {
    match &cli.command {
        Commands::Signup {
            username,
            email,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => prompt("Password: ")?,
            };
            let password_confirm = prompt("Confirm password: ")?;

            let form = SignupForm {
                username: username.clone(),
                password,
                password_confirm,
                email: email.clone(),
            };

            match ctx.signup(&form).await {
                Ok(data) => println!("Account created for {}. You can now log in.", data.username),
                Err(AppError::Signup(errors)) => {
                    for (field, message) in errors.iter() {
                        eprintln!("  {}: {}", field.as_str(), message);
                    }
                    std::process::exit(1);
                }
                Err(AppError::Api(e)) if !e.is_unauthorized() => {
                    eprintln!("{}", e.signup_message());
                    std::process::exit(1);
                }
                Err(e) => return Err(e),
            }
        }

        Commands::Login { username, password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => prompt("Password: ")?,
            };
            let form = LoginForm {
                username: username.clone(),
                password,
            };

            match ctx.login(&form).await {
                Ok(user) => println!("Welcome, {}!", user.username),
                Err(AppError::Api(e)) => {
                    eprintln!("{}", e.login_message());
                    std::process::exit(1);
                }
                Err(e) => return Err(e),
            }
        }

        Commands::Logout => {
            ctx.logout().await?;
            println!("Logged out.");
        }

        Commands::Whoami => match ctx.session().user() {
            Some(user) if ctx.session().is_authenticated() => {
                if cli.json {
                    println!("{}", to_json(user));
                } else {
                    println!("{}", user.username);
                    if let Some(email) = &user.email {
                        println!("  email: {}", email);
                    }
                    if let Some(role) = &user.role {
                        println!("  role:  {}", role);
                    }
                }
            }
            _ => println!("Not logged in."),
        },

        Commands::CheckUsername { username } => {
            report_availability(ctx, SignupField::Username, username).await?;
        }

        Commands::CheckEmail { email } => {
            report_availability(ctx, SignupField::Email, email).await?;
        }

        Commands::Matches {
            game_name,
            tag_line,
            count,
            expand,
        } => {
            let mut search = MatchSearch::new();
            search.game_name = game_name.clone();
            search.tag_line = tag_line.clone();
            search.count = count.unwrap_or(ctx.config().riot.match_count);

            let query = match search.begin() {
                Ok(query) => query,
                Err(e) => {
                    eprintln!("{}", e);
                    return Ok(());
                }
            };

            let outcome = ctx.player_matches(&query).await;
            match outcome {
                Ok(data) => search.finish(Ok(data)),
                Err(AppError::Api(e)) if !e.is_unauthorized() => {
                    search.finish(Err(e.lookup_message()))
                }
                Err(e) => return Err(e),
            }

            for id in expand {
                search.toggle(id);
            }

            match (search.result(), search.error()) {
                (Some(data), _) if cli.json => println!("{}", to_json(data)),
                (Some(data), _) => print_player_matches(data, &search),
                (None, Some(message)) => eprintln!("{}", message),
                (None, None) => {}
            }
        }

        Commands::Match { match_id, puuid } => {
            let target =
                toyproject::riot::match_detail_target(Some(match_id.as_str()), Some(puuid.as_str()));
            let (match_id, puuid) = match target {
                Ok(target) => target,
                Err(e) => {
                    eprintln!("{}", e);
                    return Ok(());
                }
            };

            match ctx.match_detail(&match_id, &puuid).await {
                Ok(detail) if cli.json => println!("{}", to_json(&detail)),
                Ok(detail) => print_match_detail(&detail),
                Err(AppError::Api(e)) if !e.is_unauthorized() => {
                    eprintln!("{}", e.match_detail_message())
                }
                Err(e) => return Err(e),
            }
        }

        Commands::Posts { action } => match action {
            PostsAction::List => {
                let posts = ctx.client().list_posts().await?;
                if cli.json {
                    println!("{}", to_json(&posts));
                } else {
                    let refs: Vec<&Post> = posts.iter().collect();
                    print_post_table(&refs);
                }
            }
            PostsAction::Create {
                title,
                author,
                content,
                password,
            } => {
                let draft = PostDraft::new(title.as_str(), author.as_str(), content.as_str())
                    .password(password.as_str());
                let missing = draft.missing_fields();
                if !missing.is_empty() {
                    eprintln!("Please fill in every field ({})", missing.join(", "));
                    return Ok(());
                }

                let post = ctx.client().create_post(&draft).await?;
                println!("Created post #{}: {}", post.id, post.title);
            }
        },

        Commands::Board | Commands::Config { .. } => {}
    }

    Ok(())
}

async fn report_availability(
    ctx: &AppContext,
    field: SignupField,
    value: &str,
) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Ok(());
    }

    let available = match field {
        SignupField::Email => ctx.client().check_email(value).await?,
        _ => ctx.client().check_username(value).await?,
    };

    match availability_error(field, available) {
        Some(message) => println!("{}", message),
        None => println!("{} is available.", value),
    }
    Ok(())
}

fn prompt(label: &str) -> io::Result<String> {
    Ok(read_line(label)?.unwrap_or_default())
}

/// One line from stdin without its terminator; `None` at end of input
fn read_line(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

fn print_player_matches(data: &PlayerMatches, search: &MatchSearch) {
    let stats = &data.stats;
    let rating = stats.skill_rating();

    println!("{}", data.player.riot_id());
    println!();
    println!(
        "  {} games  {}W {}L  ({})  {}",
        stats.total_games,
        stats.wins,
        stats.losses,
        stats.win_rate_display(),
        rating.label()
    );
    println!("  Average KDA: {:.2}", stats.average_kda);
    println!("  Per game:    {}", stats.average_per_game());
    if let Some(champion) = &stats.most_played_champion {
        println!("  Most played: {}", champion);
    }
    println!();

    if data.matches.is_empty() {
        println!("No recent matches.");
        return;
    }

    let now = Utc::now();
    for summary in &data.matches {
        print_match_row(summary, search.is_expanded(&summary.match_id), now);
    }
}

fn print_match_row(summary: &MatchSummary, expanded: bool, now: chrono::DateTime<Utc>) {
    println!(
        "{:<8} {:<14} {:>2}/{:>2}/{:>2}  KDA {:<5}  {}  [{}]",
        summary.outcome_label(),
        summary.champion_name,
        summary.kills,
        summary.deaths,
        summary.assists,
        summary.kda_display(),
        format::relative_time(summary.game_date, now),
        summary.match_id
    );

    if expanded {
        println!("    Queue:   {}", summary.queue_type);
        println!("    Date:    {}", format::match_date(summary.game_date));
        println!("    Length:  {}", format::game_length(summary.game_length));
        println!(
            "    CS:      {} ({:.1}/min)",
            summary.cs,
            summary.cs_per_minute()
        );
        println!("    Gold:    {}", format::thousands(summary.gold_earned));
        println!("    Damage:  {}", format::thousands(summary.total_damage));
    }
}

fn print_match_detail(detail: &MatchDetail) {
    println!("{}  {}", detail.riot_id(), detail.outcome_label());
    println!();
    println!("  Champion: {}", detail.champion_name);
    println!(
        "  KDA:      {}/{}/{} ({})",
        detail.kills,
        detail.deaths,
        detail.assists,
        detail.kda_display()
    );
    println!(
        "  CS:       {} ({:.1}/min)",
        detail.cs,
        detail.cs_per_minute()
    );
    println!("  Gold:     {}", format::thousands(detail.gold_earned));
    println!("  Damage:   {}", format::thousands(detail.total_damage));
    println!("  Length:   {}", format::game_length(detail.game_length));
    println!("  Played:   {}", format::post_timestamp(detail.game_date));
    if !detail.queue_type.is_empty() {
        println!("  Queue:    {}", detail.queue_type);
    }
    if let Some(match_id) = &detail.match_id {
        println!("  Match ID: {}", match_id);
    }
    if let Some(puuid) = detail.short_puuid() {
        println!("  PUUID:    {}", puuid);
    }
}

fn print_post_table(posts: &[&Post]) {
    if posts.is_empty() {
        println!("No posts yet.");
        return;
    }

    println!(
        "{:<5} {:<32} {:<12} {:<10} {:>5}",
        "No", "Title", "Author", "Date", "Views"
    );
    println!("{}", "-".repeat(68));

    for post in posts {
        let title = if post.comment_count() > 0 {
            format!("{} [{}]", post.title, post.comment_count())
        } else {
            post.title.clone()
        };
        println!(
            "{:<5} {:<32} {:<12} {:<10} {:>5}",
            post.id,
            title,
            post.author,
            format::post_date(post.created_at),
            post.views
        );
    }
}

fn print_post(post: &Post) {
    println!("#{} {}", post.id, post.title);
    println!(
        "{} | {} | {} views",
        post.author,
        format::post_timestamp(post.created_at),
        post.views
    );
    println!();
    println!("{}", post.content);
    println!();
    println!("Comments ({})", post.comment_count());
    for comment in &post.comments {
        println!(
            "  {} ({}): {}",
            comment.author,
            format::post_timestamp(comment.created_at),
            comment.content
        );
    }
}

const BOARD_HELP: &str = "\
Commands:
  list                 Show every post
  search <term>        Filter by title, author or content
  open <id>            Read a post
  write                Write a new post
  comment <id> <text>  Add an anonymous comment
  edit <id>            Change a post's title or content
  delete <id>          Delete a post
  help                 Show this help
  quit                 Leave the board";

/// Local board: nothing is sent to the board service and nothing survives exit
fn run_board_session() -> anyhow::Result<()> {
    let mut board = Board::seeded(Utc::now());
    println!("Board ({} posts). Type 'help' for commands.", board.len());

    loop {
        let Some(line) = read_line("board> ")? else {
            println!();
            break;
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{}", BOARD_HELP),
            "list" => print_post_table(&board.search("")),
            "search" => {
                let hits = board.search(rest);
                if hits.is_empty() {
                    println!("No posts match '{}'.", rest);
                } else {
                    print_post_table(&hits);
                }
            }
            "open" => {
                let id = match parse_id(rest) {
                    Ok(id) => id,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                match board.open(id) {
                    Ok(post) => print_post(post),
                    Err(e) => println!("{}", e),
                }
            }
            "write" => {
                let mut draft = PostDraft::new(
                    prompt("Title: ")?,
                    prompt("Author: ")?,
                    prompt("Content: ")?,
                );
                draft.password = prompt("Password (optional): ")?;

                match board.submit(draft, Utc::now()) {
                    Ok(id) => println!("Post #{} created.", id),
                    Err(e) => println!("{}", e),
                }
            }
            "comment" => {
                let (id, text) = rest.split_once(' ').unwrap_or((rest, ""));
                let result = parse_id(id)
                    .and_then(|id| Ok(board.add_comment(id, text.trim(), Utc::now())?));
                match result {
                    Ok(_) => println!("Comment added."),
                    Err(e) => println!("{}", e),
                }
            }
            "edit" => {
                let id = match parse_id(rest) {
                    Ok(id) => id,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let password = prompt("Password: ")?;
                let edit = PostEdit {
                    title: Some(prompt("New title (blank keeps): ")?),
                    content: Some(prompt("New content (blank keeps): ")?),
                };
                match board.update(id, &password, edit) {
                    Ok(post) => println!("Post #{} updated.", post.id),
                    Err(e) => println!("{}", e),
                }
            }
            "delete" => {
                let id = match parse_id(rest) {
                    Ok(id) => id,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let password = prompt("Password: ")?;
                match board.delete(id, &password) {
                    Ok(post) => println!("Post #{} deleted.", post.id),
                    Err(e) => println!("{}", e),
                }
            }
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }

    Ok(())
}

fn parse_id(value: &str) -> anyhow::Result<u64> {
    value
        .parse()
        .with_context(|| format!("'{}' is not a post number", value))
}
