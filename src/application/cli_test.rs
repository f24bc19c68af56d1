use anyhow::Result;
use clap::ArgMatches;

use super::build;
use super::lists_command;
use super::run_search;
use super::CommandError;
use crate::domain::models::ApiError;
use crate::domain::models::ListUpdate;
use crate::domain::models::SavedList;
use crate::domain::models::Session;
use crate::domain::models::StatusCode;
use crate::infrastructure::api::recording::RecordingApi;
use crate::infrastructure::api::recording::Request;

fn session() -> Session {
    return Session {
        token: "abc".to_string(),
        version: "0.1.0".to_string(),
        timestamp: "2024-05-14T09:30:00+00:00".to_string(),
    };
}

fn redirects() -> SavedList {
    let codes = vec![StatusCode(301), StatusCode(302)];
    return SavedList {
        id: "a".to_string(),
        name: "Redirects".to_string(),
        image_urls: codes.iter().map(|e| return e.image_url()).collect(),
        codes,
        created_at: "Tue, 14 May 2024 09:30:00 GMT".to_string(),
    };
}

fn unreachable_backend() -> RecordingApi {
    return RecordingApi::failing(ApiError {
        status: 503,
        message: None,
    });
}

fn subcommand_matches(args: Vec<&str>) -> Result<ArgMatches> {
    let matches = build().try_get_matches_from(args)?;
    let (_, subcmd_matches) = matches.subcommand().unwrap();
    return Ok(subcmd_matches.clone());
}

fn command_error(res: Result<()>) -> CommandError {
    let err = res.unwrap_err();
    return err.downcast_ref::<CommandError>().unwrap().clone();
}

#[tokio::test]
async fn it_fails_delete_when_the_backend_fails() -> Result<()> {
    let (api, _) = unreachable_backend().boxed();
    let matches = subcommand_matches(vec!["dogcodes", "lists", "delete", "--id", "a", "--yes"])?;

    let res = lists_command(&api, &session(), &matches).await;

    assert!(command_error(res).0.starts_with("The request failed."));
    return Ok(());
}

#[tokio::test]
async fn it_fails_rename_when_the_backend_fails() -> Result<()> {
    let (api, _) = unreachable_backend().boxed();
    let matches = subcommand_matches(vec![
        "dogcodes", "lists", "rename", "--id", "a", "--name", "Moved",
    ])?;

    let res = lists_command(&api, &session(), &matches).await;

    assert!(res.is_err());
    return Ok(());
}

#[tokio::test]
async fn it_reports_fetch_failures_before_removing() -> Result<()> {
    let (api, log) = unreachable_backend().boxed();
    let matches = subcommand_matches(vec![
        "dogcodes", "lists", "remove", "--id", "a", "--index", "1", "--yes",
    ])?;

    let res = lists_command(&api, &session(), &matches).await;

    assert!(command_error(res).0.starts_with("Failed to fetch lists."));
    assert_eq!(log.all(), vec![Request::GetLists]);
    return Ok(());
}

#[tokio::test]
async fn it_fails_removals_past_the_end() -> Result<()> {
    let (api, log) = RecordingApi::with_lists(vec![redirects()]).boxed();
    let matches = subcommand_matches(vec![
        "dogcodes", "lists", "remove", "--id", "a", "--index", "3", "--yes",
    ])?;

    let res = lists_command(&api, &session(), &matches).await;

    assert_eq!(
        command_error(res).0,
        "List a has no image at position 3."
    );
    assert_eq!(log.all(), vec![Request::GetLists]);
    return Ok(());
}

#[tokio::test]
async fn it_removes_by_one_based_index() -> Result<()> {
    let (api, log) = RecordingApi::with_lists(vec![redirects()]).boxed();
    let matches = subcommand_matches(vec![
        "dogcodes", "lists", "remove", "--id", "a", "--index", "1", "--yes",
    ])?;

    lists_command(&api, &session(), &matches).await?;

    assert_eq!(
        log.all()[1],
        Request::UpdateList(
            "a".to_string(),
            ListUpdate::Elements {
                codes: vec![StatusCode(302)],
                image_urls: vec!["https://http.dog/302.jpg".to_string()],
            }
        )
    );
    return Ok(());
}

#[tokio::test]
async fn it_refuses_index_zero() -> Result<()> {
    let (api, log) = RecordingApi::with_lists(vec![redirects()]).boxed();
    let matches = subcommand_matches(vec![
        "dogcodes", "lists", "remove", "--id", "a", "--index", "0", "--yes",
    ])?;

    let res = lists_command(&api, &session(), &matches).await;

    assert_eq!(command_error(res).0, "--index starts at 1");
    assert!(log.all().is_empty());
    return Ok(());
}

#[tokio::test]
async fn it_reports_invalid_filters_as_input_errors() -> Result<()> {
    let matches = subcommand_matches(vec!["dogcodes", "search", "2XX"])?;

    let res = run_search(&matches).await;

    assert_eq!(
        command_error(res).0,
        "'2XX' is not a valid filter. Use a code (203), a class (2xx), or a range (20x)."
    );
    return Ok(());
}

#[tokio::test]
async fn it_searches_without_a_session() -> Result<()> {
    let matches = subcommand_matches(vec!["dogcodes", "search", "2xx"])?;

    run_search(&matches).await?;
    return Ok(());
}
