//! # tether
//!
//! Command-line front end for the Tether client.
//!
//! Each invocation restores the persisted session, runs one command through
//! the same controllers a graphical front end would use, and prints the
//! resulting screen.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use client_runtime::container::{ClientConfig, TetherClient};
use client_runtime::init_logging;
use shared_types::{MatchDetail, ReportRole, SubmissionId};
use tc_01_session::AccountDetails;
use tc_02_report_submission::{PhotoRef, SubmissionOutcome};
use tc_03_match_lifecycle::{LifecycleState, MatchScore};

/// Tether: report a missing or found child and review proposed matches.
#[derive(Parser, Debug)]
#[command(name = "tether", version)]
struct Cli {
    /// Backend URL (overrides TETHER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the saved session (overrides TETHER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and log in
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Log in with a username, email or phone
    Login {
        identifier: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Update the profile
    Profile {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    /// Change the password (logs out)
    Password {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
    },
    /// Restore the session and show any confirmed match
    Status,
    /// Submit a report
    Submit(SubmitArgs),
    /// Show a match
    Review { submission_id: String },
    /// Confirm a match
    Confirm { submission_id: String },
    /// Reject a match
    Reject { submission_id: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoleArg {
    Parent,
    Volunteer,
}

impl From<RoleArg> for ReportRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Parent => ReportRole::Parent,
            RoleArg::Volunteer => ReportRole::Volunteer,
        }
    }
}

#[derive(clap::Args, Debug)]
struct SubmitArgs {
    #[arg(long, value_enum)]
    role: RoleArg,
    /// Reporter name
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    alt_email: String,
    #[arg(long)]
    phone: String,
    #[arg(long, default_value = "")]
    alt_phone: String,
    #[arg(long, default_value = "")]
    child_name: String,
    /// Age, or approximate age for found children
    #[arg(long)]
    age: u32,
    #[arg(long)]
    skin: String,
    #[arg(long)]
    city: String,
    /// Repeat for several birthmarks
    #[arg(long = "birthmark")]
    birthmarks: Vec<String>,
    /// Where the child was found (volunteers)
    #[arg(long, default_value = "")]
    address: String,
    /// Photo of the child
    #[arg(long)]
    photo: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("reading configuration")?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    config.validate().context("invalid configuration")?;
    init_logging(&config.telemetry).context("initializing logging")?;

    let mut client = TetherClient::from_config(&config).context("building client")?;
    client.start().await;

    run(&mut client, cli.command).await?;
    println!("screen: {}", client.refresh());
    Ok(())
}

async fn run(client: &mut TetherClient, command: Command) -> Result<()> {
    match command {
        Command::Signup {
            username,
            email,
            phone,
            password,
        } => {
            let account = AccountDetails {
                username,
                email,
                phone,
            };
            let session = client.signup(&account, &password).await?;
            println!("Signed up as {}", session.user().username);
        }
        Command::Login {
            identifier,
            password,
        } => {
            let session = client.login(&identifier, &password).await?;
            println!("Logged in as {}", session.user().username);
        }
        Command::Logout => {
            client.logout();
            println!("Logged out");
        }
        Command::Whoami => match client.session() {
            Some(session) => {
                let user = session.user();
                println!("{} <{}> {}", user.username, user.email, user.phone);
            }
            None => println!("Not logged in"),
        },
        Command::Profile {
            username,
            email,
            phone,
        } => {
            let update = AccountDetails {
                username,
                email,
                phone,
            };
            let profile = client.update_profile(&update).await?;
            println!("Profile updated: {} <{}>", profile.username, profile.email);
        }
        Command::Password { old, new } => {
            let message = client.change_password(&old, &new).await?;
            println!("{}; please log in again", message);
        }
        Command::Status => match client.marker() {
            Some(marker) => println!("Confirmed match: {}", marker.submission_id),
            None => println!("No confirmed match"),
        },
        Command::Submit(args) => submit(client, args).await?,
        Command::Review { submission_id } => {
            client.open_match(&parse_id(&submission_id)?).await?;
            print_state(&client.lifecycle_state());
        }
        Command::Confirm { submission_id } => {
            client.open_match(&parse_id(&submission_id)?).await?;
            print_state(&client.lifecycle_state());
            let transition = client.confirm().await;
            if !transition.is_applied() {
                bail!("nothing to confirm (match is {:?})", transition.phase());
            }
            println!("Match confirmed");
            client.wait_for_navigation().await;
        }
        Command::Reject { submission_id } => {
            client.open_match(&parse_id(&submission_id)?).await?;
            print_state(&client.lifecycle_state());
            let transition = client.reject().await;
            if !transition.is_applied() {
                bail!("nothing to reject (match is {:?})", transition.phase());
            }
            println!("Match rejected");
            client.wait_for_navigation().await;
        }
    }
    Ok(())
}

async fn submit(client: &mut TetherClient, args: SubmitArgs) -> Result<()> {
    let bytes = tokio::fs::read(&args.photo)
        .await
        .with_context(|| format!("reading photo {}", args.photo.display()))?;
    let file_name = args
        .photo
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());

    let draft = client.draft_mut();
    draft.role = args.role.into();
    draft.reporter.name = args.name;
    draft.reporter.email = args.email;
    draft.reporter.alt_email = args.alt_email;
    draft.reporter.phone = args.phone;
    draft.reporter.alt_phone = args.alt_phone;
    draft.child.name = args.child_name;
    draft.child.approx_age = args.age;
    draft.child.skin_complexion = args.skin;
    draft.child.city = args.city;
    draft.child.birthmarks = args.birthmarks;
    draft.child.photo = Some(PhotoRef::new(file_name, content_type(&args.photo), bytes));
    draft.found_address = args.address;

    match client.submit_report().await? {
        SubmissionOutcome::NoMatch => println!("Report submitted; no match yet"),
        SubmissionOutcome::MatchFound(id) => {
            println!("Match found for submission {}", id);
            print_state(&client.lifecycle_state());
        }
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<SubmissionId> {
    let id = SubmissionId::new(raw.trim());
    if id.is_blank() {
        bail!("submission id must not be empty");
    }
    Ok(id)
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

fn print_state(state: &LifecycleState) {
    match state {
        LifecycleState::Idle => println!("No match loaded"),
        LifecycleState::Loading(id) => println!("Loading match {}", id),
        LifecycleState::Failed {
            submission_id,
            message,
        } => println!("Match {} unavailable: {}", submission_id, message),
        LifecycleState::Active(tracked) => {
            println!("Match {} [{:?}]", tracked.submission_id, tracked.status);
            if let Some(score) = tracked.score {
                println!("  score: {}", score);
            }
            if let Some(detail) = &tracked.detail {
                print_detail(detail);
            }
        }
    }
}

fn print_detail(detail: &MatchDetail) {
    let parent = &detail.parent_report;
    let volunteer = &detail.volunteer_report;
    println!(
        "  reported missing: {} ({}), {}, last seen in {}",
        parent.child_entered.name,
        parent.child_entered.age,
        parent.child_entered.skin,
        parent.child_entered.city
    );
    println!(
        "  parent: {} <{}> {}",
        parent.parent.name, parent.parent.email, parent.parent.phone
    );
    println!(
        "  found: ~{} years, {}, at {}, {}",
        volunteer.found_child.approx_age,
        volunteer.found_child.skin,
        volunteer.found_child.address_found,
        volunteer.found_child.city_found
    );
    println!(
        "  volunteer: {} <{}> {}",
        volunteer.volunteer.name, volunteer.volunteer.email, volunteer.volunteer.phone
    );
    println!("  similarity: {}", MatchScore::new(detail.match_score));
}
