#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Password;
use dialoguer::Select;
use yansi::Paint;

use super::render;
use crate::domain::models::ApiBox;
use crate::domain::models::AuthMode;
use crate::domain::models::ConfirmBox;
use crate::domain::models::Route;
use crate::domain::models::Session;
use crate::domain::services::logout;
use crate::domain::services::AppState;
use crate::domain::services::AuthForm;
use crate::domain::services::FormField;
use crate::domain::services::Gallery;
use crate::domain::services::ListManager;
use crate::domain::services::Outcome;
use crate::domain::services::SaveOutcome;
use crate::domain::services::SessionStore;

enum ListAction {
    Toggle(String),
    Edit(String),
    Delete(String),
    Rename(String),
    Remove(String),
    StopEditing,
    Back,
    Logout,
    Quit,
}

pub fn prompt_text(prompt: &str, initial: &str) -> Result<String> {
    let res = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;

    return Ok(res);
}

pub fn prompt_password(prompt: &str) -> Result<String> {
    let res = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?;

    return Ok(res);
}

/// `None` when the user backs out, or when there is nothing to pick from.
fn select(prompt: &str, items: &[String]) -> Result<Option<usize>> {
    if items.is_empty() {
        return Ok(None);
    }

    let res = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(items)
        .interact_opt()?;

    return Ok(res);
}

pub fn print_outcome(outcome: Outcome, applied: &str) {
    match outcome {
        Outcome::Applied => println!("{}", Paint::green(applied)),
        Outcome::Cancelled => println!("Cancelled."),
        Outcome::Rejected => eprintln!("{}", Paint::yellow("Nothing to do, check the list id, index, or name.")),
        Outcome::Failed => eprintln!(
            "{}",
            Paint::red("The request failed. Run with RUST_LOG=dogcodes for details.")
        ),
    }
}

fn print_save_outcome(outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Saved => println!("{}", Paint::green(outcome)),
        SaveOutcome::Invalid => eprintln!("{}", Paint::yellow(outcome)),
        SaveOutcome::Failed => eprintln!("{}", Paint::red(outcome)),
    }
}

/// Runs one pass of the login or signup screen. Returns where to go next and
/// the session if one was created.
async fn auth_screen(
    mode: AuthMode,
    api: &ApiBox,
    store: &SessionStore,
) -> Result<(Route, Option<Session>)> {
    let (title, action, switch_label, switch_route) = match mode {
        AuthMode::Login => ("Login", "Log in", "Don't have an account? Sign up", Route::Signup),
        AuthMode::Signup => ("Sign Up", "Sign up", "Already have an account? Login", Route::Login),
    };

    let items = vec![action.to_string(), switch_label.to_string(), "Quit".to_string()];
    match select(&Paint::new(title).bold().to_string(), &items)? {
        Some(0) => {}
        Some(1) => return Ok((switch_route, None)),
        _ => return Ok((Route::Exit, None)),
    }

    let mut form = AuthForm::new(mode);
    if mode == AuthMode::Signup {
        form.update(FormField::Name, &prompt_text("Name", "")?);
    }
    form.update(FormField::Email, &prompt_text("Email", "")?);

    loop {
        form.update(FormField::Password, &prompt_password("Password")?);
        if form.can_submit() {
            break;
        }
        eprintln!("{}", Paint::red(&form.password_error));
    }

    let Some(session) = form.submit(api, store).await? else {
        if !form.password_error.is_empty() {
            eprintln!("{}", Paint::red(&form.password_error));
        }
        if !form.error.is_empty() {
            eprintln!("{}", Paint::red(&form.error));
        }
        let retry = match mode {
            AuthMode::Login => Route::Login,
            AuthMode::Signup => Route::Signup,
        };
        return Ok((retry, None));
    };

    println!("{}", Paint::green("Welcome!"));
    return Ok((form.next_route(), Some(session)));
}

async fn search_screen(
    api: &ApiBox,
    session: &Session,
    store: &SessionStore,
    gallery: &mut Gallery,
) -> Result<Route> {
    let items = [
        "Search",
        "Save list",
        "Show lists",
        "Logout",
        "Quit",
    ]
    .iter()
    .map(|e| return e.to_string())
    .collect::<Vec<String>>();

    match select(&Paint::new("Search HTTP Dog Images").bold().to_string(), &items)? {
        Some(0) => {
            let filter = prompt_text("Enter code (e.g., 203, 2xx, 20x)", &gallery.filter)?;
            gallery.search(&filter);
            println!("{}", render::format_images(&gallery.images()));
        }
        Some(1) => {
            gallery.list_name = prompt_text("Enter list name", &gallery.list_name)?;
            let outcome = gallery.save(api, session).await;
            print_save_outcome(outcome);
        }
        Some(2) => return Ok(Route::Lists),
        Some(3) => return logout(store).await,
        _ => return Ok(Route::Exit),
    }

    return Ok(Route::Search);
}

fn list_actions(manager: &ListManager) -> Vec<(String, ListAction)> {
    let mut actions = vec![];

    for list in manager.lists.iter() {
        let expanded = manager.is_expanded(&list.id);
        actions.push((
            render::format_list_header(list, expanded),
            ListAction::Toggle(list.id.to_string()),
        ));

        if !expanded {
            continue;
        }

        if manager.is_editing(&list.id) {
            actions.push(("  Update name".to_string(), ListAction::Rename(list.id.to_string())));
            actions.push(("  Remove an image".to_string(), ListAction::Remove(list.id.to_string())));
            actions.push(("  Stop editing".to_string(), ListAction::StopEditing));
        } else {
            actions.push(("  Edit".to_string(), ListAction::Edit(list.id.to_string())));
        }
        actions.push(("  Delete List".to_string(), ListAction::Delete(list.id.to_string())));
    }

    actions.push(("Back to Search".to_string(), ListAction::Back));
    actions.push(("Logout".to_string(), ListAction::Logout));
    actions.push(("Quit".to_string(), ListAction::Quit));

    return actions;
}

async fn lists_screen(
    api: &ApiBox,
    session: &Session,
    store: &SessionStore,
    confirmer: &ConfirmBox,
    manager: &mut ListManager,
) -> Result<Route> {
    if manager.fetch_all(api, session).await == Outcome::Failed {
        print_outcome(Outcome::Failed, "");
    }

    loop {
        println!("\n{}", Paint::new("Saved Lists").bold());
        if let Some(list) = manager.expanded.as_deref().and_then(|id| return manager.find(id)) {
            println!(
                "{}",
                render::format_list_details(list, manager.is_editing(&list.id))
            );
        } else if manager.lists.is_empty() {
            println!("{}", render::format_lists(manager));
        }

        let mut actions = list_actions(manager);
        let labels = actions
            .iter()
            .map(|(label, _)| return label.to_string())
            .collect::<Vec<String>>();

        let Some(idx) = select("Pick a list or action", &labels)? else {
            return Ok(Route::Exit);
        };

        match actions.swap_remove(idx).1 {
            ListAction::Toggle(id) => manager.toggle(&id),
            ListAction::Edit(id) => {
                manager.start_edit(&id);
            }
            ListAction::StopEditing => manager.cancel_edit(),
            ListAction::Rename(id) => {
                manager.new_name = prompt_text("Enter new list name", &manager.new_name)?;
                let new_name = manager.new_name.to_string();
                let outcome = manager.rename(api, session, &id, &new_name).await;
                print_outcome(outcome, "List renamed.");
            }
            ListAction::Remove(id) => {
                let Some(list) = manager.find(&id) else {
                    continue;
                };
                if list.is_empty() {
                    eprintln!("{}", Paint::yellow("This list has no images to remove."));
                    continue;
                }
                let entries = list
                    .entries()
                    .iter()
                    .map(|(code, url)| return format!("{code} {url}"))
                    .collect::<Vec<String>>();
                if let Some(index) = select("Remove which image?", &entries)? {
                    let outcome = manager
                        .remove_element(api, session, confirmer, &id, index)
                        .await;
                    print_outcome(outcome, "List updated.");
                }
            }
            ListAction::Delete(id) => {
                let outcome = manager.delete(api, session, confirmer, &id).await;
                print_outcome(outcome, "List deleted.");
            }
            ListAction::Back => return Ok(Route::Search),
            ListAction::Logout => return logout(store).await,
            ListAction::Quit => return Ok(Route::Exit),
        }
    }
}

/// Interactive client. Starts on the search screen when a stored session
/// exists, otherwise on login, and moves between screens until the user quits.
pub async fn start(api: ApiBox, store: SessionStore, confirmer: ConfirmBox) -> Result<()> {
    let mut state = AppState::new(store.get().await?);
    let mut route = state.start_route();

    loop {
        tracing::debug!(route = %route, "Navigating");

        if route.requires_session() && state.session.is_none() {
            route = Route::Login;
        }

        route = match (route, state.session.as_ref()) {
            (Route::Exit, _) => return Ok(()),
            (Route::Search, Some(current)) => {
                search_screen(&api, current, &store, &mut state.gallery).await?
            }
            (Route::Lists, Some(current)) => {
                lists_screen(&api, current, &store, &confirmer, &mut state.lists).await?
            }
            (auth_route, _) => {
                let mode = if auth_route == Route::Signup {
                    AuthMode::Signup
                } else {
                    AuthMode::Login
                };
                let (next, new_session) = auth_screen(mode, &api, &store).await?;
                if let Some(new_session) = new_session {
                    state.sign_in(new_session);
                }
                next
            }
        };

        if route == Route::Login || route == Route::Signup {
            state.sign_out();
        }
    }
}
