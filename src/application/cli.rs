#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::error;
use std::fmt;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use super::app;
use super::render;
use crate::configuration::cache_dir;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ApiBox;
use crate::domain::models::AuthMode;
use crate::domain::models::CodeFilter;
use crate::domain::models::Session;
use crate::domain::models::StatusCode;
use crate::domain::services::logout;
use crate::domain::services::AuthForm;
use crate::domain::services::FormField;
use crate::domain::services::Gallery;
use crate::domain::services::ListManager;
use crate::domain::services::Outcome;
use crate::domain::services::SaveOutcome;
use crate::domain::services::SessionStore;
use crate::infrastructure::api::ApiManager;
use crate::infrastructure::prompts::ConfirmerManager;

const FETCH_FAILED: &str = "Failed to fetch lists. Run with RUST_LOG=dogcodes for details.";
const REQUEST_FAILED: &str = "The request failed. Run with RUST_LOG=dogcodes for details.";

/// A command that could not do what was asked because of its input or the
/// backend's answer. Reported on its own, without the crash report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError(pub String);

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

impl error::Error for CommandError {}

fn command_error(message: &str) -> anyhow::Error {
    return CommandError(message.to_string()).into();
}

/// Prints the outcome of a one-shot list command. Anything short of the
/// change going through, or the user declining it, fails the command.
fn check_outcome(outcome: Outcome, applied: &str, rejected: &str) -> Result<()> {
    match outcome {
        Outcome::Applied => println!("{}", Paint::green(applied)),
        Outcome::Cancelled => println!("Cancelled."),
        Outcome::Rejected => return Err(command_error(rejected)),
        Outcome::Failed => return Err(command_error(REQUEST_FAILED)),
    }

    return Ok(());
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn flag(matches: &ArgMatches, name: &str) -> Option<String> {
    return matches.get_one::<String>(name).map(|e| return e.to_string());
}

async fn run_auth(mode: AuthMode, matches: &ArgMatches) -> Result<()> {
    let mut form = AuthForm::new(mode);

    if mode == AuthMode::Signup {
        let name = match flag(matches, "name") {
            Some(name) => name,
            None => app::prompt_text("Name", "")?,
        };
        form.update(FormField::Name, &name);
    }

    let email = match flag(matches, "email") {
        Some(email) => email,
        None => app::prompt_text("Email", "")?,
    };
    form.update(FormField::Email, &email);

    if let Some(password) = flag(matches, "password") {
        form.update(FormField::Password, &password);
        if !form.can_submit() {
            return Err(command_error(&form.password_error));
        }
    } else {
        loop {
            form.update(FormField::Password, &app::prompt_password("Password")?);
            if form.can_submit() {
                break;
            }
            eprintln!("{}", Paint::red(&form.password_error));
        }
    }

    let store = SessionStore::default();
    if form.submit(&ApiManager::get(), &store).await?.is_none() {
        return Err(command_error(&form.error));
    }

    println!(
        "{}",
        Paint::green(format!("Logged in. Session saved to {}", store.file_path.display()))
    );
    return Ok(());
}

async fn run_search(matches: &ArgMatches) -> Result<()> {
    let filter = flag(matches, "filter").unwrap_or_default();
    if CodeFilter::parse(&filter).is_none() {
        return Err(command_error(&format!(
            "'{filter}' is not a valid filter. Use a code (203), a class (2xx), or a range (20x)."
        )));
    }

    let mut gallery = Gallery::default();
    gallery.search(&filter);
    println!("{}", render::format_images(&gallery.images()));

    let Some(list_name) = flag(matches, "save") else {
        return Ok(());
    };

    let session = SessionStore::default().require().await?;
    gallery.list_name = list_name;
    let outcome = gallery.save(&ApiManager::get(), &session).await;
    if outcome != SaveOutcome::Saved {
        return Err(command_error(&outcome.to_string()));
    }

    println!("{}", Paint::green(outcome));
    return Ok(());
}

/// Positions are 1-based on the command line.
fn element_index(matches: &ArgMatches) -> Result<usize> {
    let index = matches.get_one::<usize>("index").copied().unwrap_or_default();
    if index == 0 {
        return Err(command_error("--index starts at 1"));
    }

    return Ok(index - 1);
}

async fn run_lists(matches: &ArgMatches) -> Result<()> {
    let session = SessionStore::default().require().await?;
    return lists_command(&ApiManager::get(), &session, matches).await;
}

async fn lists_command(api: &ApiBox, session: &Session, matches: &ArgMatches) -> Result<()> {
    let mut manager = ListManager::default();

    match matches.subcommand() {
        Some(("show", show_matches)) => {
            if manager.fetch_all(api, session).await == Outcome::Failed {
                return Err(command_error(FETCH_FAILED));
            }

            let Some(list_id) = flag(show_matches, "id") else {
                if manager.lists.is_empty() {
                    println!("{}", render::format_lists(&manager));
                } else {
                    let summaries = manager
                        .lists
                        .iter()
                        .map(render::format_list_summary)
                        .collect::<Vec<String>>();
                    println!("{}", summaries.join("\n"));
                }
                return Ok(());
            };

            let Some(list) = manager.find(&list_id) else {
                return Err(command_error(&format!("No list with ID {list_id}")));
            };
            println!("{}", render::format_list_header(list, true));
            println!("{}", render::format_list_details(list, false));
        }
        Some(("rename", rename_matches)) => {
            let list_id = flag(rename_matches, "id").unwrap_or_default();
            let name = flag(rename_matches, "name").unwrap_or_default();
            let outcome = manager.rename(api, session, &list_id, &name).await;
            check_outcome(outcome, "List renamed.", "The new list name must not be empty.")?;
        }
        Some(("remove", remove_matches)) => {
            let list_id = flag(remove_matches, "id").unwrap_or_default();
            let index = element_index(remove_matches)?;
            let confirmer = ConfirmerManager::get(remove_matches.get_flag("yes"));

            if manager.fetch_all(api, session).await == Outcome::Failed {
                return Err(command_error(FETCH_FAILED));
            }
            let outcome = manager
                .remove_element(api, session, &confirmer, &list_id, index)
                .await;
            check_outcome(
                outcome,
                "List updated.",
                &format!("List {list_id} has no image at position {}.", index + 1),
            )?;
        }
        Some(("delete", delete_matches)) => {
            let list_id = flag(delete_matches, "id").unwrap_or_default();
            let confirmer = ConfirmerManager::get(delete_matches.get_flag("yes"));
            let outcome = manager.delete(api, session, &confirmer, &list_id).await;
            check_outcome(outcome, "List deleted.", "Nothing was deleted.")?;
        }
        _ => {
            subcommand_lists().print_long_help()?;
        }
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for dogcodes")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running dogcodes with environment variable RUST_LOG=dogcodes")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

fn arg_email() -> Arg {
    return Arg::new("email")
        .short('e')
        .long("email")
        .num_args(1)
        .help("Account email. Prompted for when omitted.");
}

fn arg_password() -> Arg {
    return Arg::new("password")
        .short('p')
        .long("password")
        .env("DOGCODES_PASSWORD")
        .hide_env_values(true)
        .num_args(1)
        .help("Account password. Prompted for when omitted.");
}

fn arg_list_id() -> Arg {
    return Arg::new("id")
        .short('i')
        .long("id")
        .help("List ID, as shown by 'lists show'.")
        .num_args(1)
        .required(true);
}

fn arg_yes() -> Arg {
    return Arg::new("yes")
        .short('y')
        .long("yes")
        .action(ArgAction::SetTrue)
        .help("Skip the confirmation prompt.");
}

fn subcommand_login() -> Command {
    return Command::new("login")
        .about("Log in and store the session for later commands.")
        .arg(arg_email())
        .arg(arg_password());
}

fn subcommand_signup() -> Command {
    return Command::new("signup")
        .about("Create an account and log in with it.")
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .num_args(1)
                .help("Display name. Prompted for when omitted."),
        )
        .arg(arg_email())
        .arg(arg_password());
}

fn subcommand_search() -> Command {
    return Command::new("search")
        .about("Find the dogs for a status code (203), a class (2xx), or a range (20x).")
        .arg(
            Arg::new("filter")
                .help("Code filter")
                .num_args(1)
                .required(true),
        )
        .arg(
            Arg::new("save")
                .short('s')
                .long("save")
                .num_args(1)
                .help("Save the matching codes as a new list with this name. Requires a login."),
        );
}

fn subcommand_lists() -> Command {
    return Command::new("lists")
        .about("Manage saved lists.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("show")
                .visible_alias("list")
                .about("List all saved lists, or show the images of one.")
                .arg(
                    Arg::new("id")
                        .short('i')
                        .long("id")
                        .help("List ID")
                        .num_args(1),
                ),
        )
        .subcommand(
            Command::new("rename")
                .about("Rename a list.")
                .arg(arg_list_id())
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .help("New list name")
                        .num_args(1)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove one image from a list. Removing the last image deletes the list.")
                .arg(arg_list_id())
                .arg(
                    Arg::new("index")
                        .short('x')
                        .long("index")
                        .help("Position of the image in the list, starting at 1.")
                        .num_args(1)
                        .value_parser(value_parser!(usize))
                        .required(true),
                )
                .arg(arg_yes()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a whole list.")
                .arg(arg_list_id())
                .arg(arg_yes()),
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("dogcodes")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(subcommand_login())
        .subcommand(subcommand_signup())
        .subcommand(Command::new("logout").about("Forget the stored session."))
        .subcommand(subcommand_search())
        .subcommand(subcommand_lists())
        .subcommand(Command::new("codes").about("Print every status code that has a dog."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .long(ConfigKey::ApiURL.to_string())
                .env("DOGCODES_API_URL")
                .num_args(1)
                .help(format!(
                    "Base URL of the lists backend. [default: {}]",
                    Config::default(ConfigKey::ApiURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("DOGCODES_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SessionFile.to_string())
                .long(ConfigKey::SessionFile.to_string())
                .env("DOGCODES_SESSION_FILE")
                .num_args(1)
                .help(format!(
                    "Where the login session is stored. [default: {}]",
                    Config::default(ConfigKey::SessionFile)
                ))
                .global(true),
        );
}

/// Runs a one-shot subcommand. Returns true when the interactive client
/// should start afterwards.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_dir = env::var("DOGCODES_LOG_DIR")
                        .map(path::PathBuf::from)
                        .unwrap_or_else(|_| return cache_dir());
                    println!("{}", log_dir.join("debug.log").to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some((auth @ ("login" | "signup"), subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            if let Some(mode) = AuthMode::parse(auth.to_string()) {
                run_auth(mode, subcmd_matches).await?;
            }
            return Ok(false);
        }
        Some(("logout", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            logout(&SessionStore::default()).await?;
            println!("Logged out.");
            return Ok(false);
        }
        Some(("search", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            run_search(subcmd_matches).await?;
            return Ok(false);
        }
        Some(("lists", subcmd_matches)) => {
            let leaf = subcmd_matches
                .subcommand()
                .map(|(_, e)| return e)
                .unwrap_or(subcmd_matches);
            Config::load(vec![&matches, subcmd_matches, leaf]).await?;
            run_lists(subcmd_matches).await?;
            return Ok(false);
        }
        Some(("codes", _)) => {
            let codes = StatusCode::reference()
                .iter()
                .map(|e| return e.to_string())
                .collect::<Vec<String>>();
            println!("{}", codes.join("\n"));
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
