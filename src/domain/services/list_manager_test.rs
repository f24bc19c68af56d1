use anyhow::bail;
use anyhow::Result;

use super::ListManager;
use super::Outcome;
use crate::domain::models::ApiBox;
use crate::domain::models::ApiError;
use crate::domain::models::ConfirmBox;
use crate::domain::models::Confirmer;
use crate::domain::models::ListUpdate;
use crate::domain::models::SavedList;
use crate::domain::models::Session;
use crate::domain::models::StatusCode;
use crate::infrastructure::api::recording::RecordingApi;
use crate::infrastructure::api::recording::Request;
use crate::infrastructure::api::recording::RequestLog;
use crate::infrastructure::prompts::assume::Assume;

struct BrokenPrompt {}

impl Confirmer for BrokenPrompt {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        bail!("not a terminal");
    }
}

fn session() -> Session {
    return Session {
        token: "abc".to_string(),
        version: "0.1.0".to_string(),
        timestamp: "2024-05-14T09:30:00+00:00".to_string(),
    };
}

fn list(id: &str, name: &str, codes: &[u16]) -> SavedList {
    let codes = codes.iter().map(|e| return StatusCode(*e)).collect::<Vec<_>>();
    return SavedList {
        id: id.to_string(),
        name: name.to_string(),
        image_urls: codes.iter().map(|e| return e.image_url()).collect(),
        codes,
        created_at: "Tue, 14 May 2024 09:30:00 GMT".to_string(),
    };
}

fn lists() -> Vec<SavedList> {
    return vec![
        list("a", "Redirects", &[301, 302, 307]),
        list("b", "Teapots", &[418]),
    ];
}

async fn loaded() -> (ListManager, ApiBox, RequestLog) {
    let (api, log) = RecordingApi::with_lists(lists()).boxed();
    let mut manager = ListManager::default();
    assert_eq!(manager.fetch_all(&api, &session()).await, Outcome::Applied);
    return (manager, api, log);
}

fn yes() -> ConfirmBox {
    return Box::new(Assume(true));
}

fn no() -> ConfirmBox {
    return Box::new(Assume(false));
}

fn is_delete(request: &Request) -> bool {
    return matches!(request, Request::DeleteList(_));
}

fn is_update(request: &Request) -> bool {
    return matches!(request, Request::UpdateList(_, _));
}

fn is_fetch(request: &Request) -> bool {
    return matches!(request, Request::GetLists);
}

#[tokio::test]
async fn it_fetches_all_lists() {
    let (manager, _, log) = loaded().await;

    assert_eq!(manager.lists, lists());
    assert_eq!(log.all(), vec![Request::GetLists]);
}

#[tokio::test]
async fn it_keeps_lists_when_fetch_fails() {
    let (mut manager, _, _) = loaded().await;
    let (failing, _) = RecordingApi::failing(ApiError {
        status: 500,
        message: None,
    })
    .boxed();

    let res = manager.fetch_all(&failing, &session()).await;

    assert_eq!(res, Outcome::Failed);
    assert_eq!(manager.lists.len(), 2);
}

#[tokio::test]
async fn it_expands_one_list_at_a_time() {
    let (mut manager, _, _) = loaded().await;

    manager.toggle("a");
    assert!(manager.is_expanded("a"));
    manager.toggle("b");
    assert!(manager.is_expanded("b"));
    assert!(!manager.is_expanded("a"));
    manager.toggle("b");
    assert_eq!(manager.expanded, None);
}

#[tokio::test]
async fn it_cancels_edits_when_toggling() {
    let (mut manager, _, _) = loaded().await;

    manager.toggle("a");
    assert!(manager.start_edit("a"));
    assert_eq!(manager.new_name, "Redirects");
    assert!(manager.is_editing("a"));

    manager.toggle("b");
    assert_eq!(manager.editing, None);
}

#[tokio::test]
async fn it_cannot_edit_unknown_lists() {
    let (mut manager, _, _) = loaded().await;

    assert!(!manager.start_edit("zzz"));
    assert_eq!(manager.editing, None);
}

#[tokio::test]
async fn it_deletes_after_confirmation() {
    let (mut manager, api, log) = loaded().await;

    let res = manager.delete(&api, &session(), &yes(), "a").await;

    assert_eq!(res, Outcome::Applied);
    assert_eq!(
        log.all(),
        vec![
            Request::GetLists,
            Request::DeleteList("a".to_string()),
            Request::GetLists
        ]
    );
}

#[tokio::test]
async fn it_does_not_delete_when_declined() {
    let (mut manager, api, log) = loaded().await;

    let res = manager.delete(&api, &session(), &no(), "a").await;

    assert_eq!(res, Outcome::Cancelled);
    assert_eq!(log.all(), vec![Request::GetLists]);
}

#[tokio::test]
async fn it_does_not_delete_when_prompt_fails() {
    let (mut manager, api, log) = loaded().await;
    let broken: ConfirmBox = Box::new(BrokenPrompt {});

    let res = manager.delete(&api, &session(), &broken, "a").await;

    assert_eq!(res, Outcome::Failed);
    assert_eq!(log.count(is_delete), 0);
}

#[tokio::test]
async fn it_does_not_refetch_when_delete_fails() {
    let (mut manager, _, _) = loaded().await;
    let (failing, log) = RecordingApi::failing(ApiError {
        status: 404,
        message: Some("List not found or not authorized".to_string()),
    })
    .boxed();

    let res = manager.delete(&failing, &session(), &yes(), "a").await;

    assert_eq!(res, Outcome::Failed);
    assert_eq!(log.all(), vec![Request::DeleteList("a".to_string())]);
    assert_eq!(manager.lists.len(), 2);
}

#[tokio::test]
async fn it_removes_elements_with_an_update() {
    let (mut manager, api, log) = loaded().await;
    manager.toggle("a");
    manager.start_edit("a");

    let res = manager
        .remove_element(&api, &session(), &no(), "a", 1)
        .await;

    assert_eq!(res, Outcome::Applied);
    assert_eq!(manager.editing, None);
    assert_eq!(log.count(is_delete), 0);
    assert_eq!(log.count(is_fetch), 2);
    assert_eq!(
        log.all()[1],
        Request::UpdateList(
            "a".to_string(),
            ListUpdate::Elements {
                codes: vec![StatusCode(301), StatusCode(307)],
                image_urls: vec![
                    "https://http.dog/301.jpg".to_string(),
                    "https://http.dog/307.jpg".to_string()
                ],
            }
        )
    );
}

#[tokio::test]
async fn it_deletes_emptied_lists_after_confirmation() {
    let (mut manager, api, log) = loaded().await;
    manager.start_edit("b");

    let res = manager
        .remove_element(&api, &session(), &yes(), "b", 0)
        .await;

    assert_eq!(res, Outcome::Applied);
    assert_eq!(log.count(is_delete), 1);
    assert_eq!(log.count(is_update), 0);
    assert_eq!(manager.editing, None);
}

#[tokio::test]
async fn it_leaves_emptied_lists_alone_when_declined() {
    let (mut manager, api, log) = loaded().await;
    manager.start_edit("b");

    let res = manager
        .remove_element(&api, &session(), &no(), "b", 0)
        .await;

    assert_eq!(res, Outcome::Cancelled);
    assert_eq!(log.count(is_delete), 0);
    assert_eq!(log.count(is_update), 0);
    assert_eq!(log.count(is_fetch), 1);
    assert_eq!(manager.editing, None);
    assert_eq!(manager.find("b").unwrap().len(), 1);
}

#[tokio::test]
async fn it_rejects_out_of_range_removals() {
    let (mut manager, api, log) = loaded().await;

    assert_eq!(
        manager
            .remove_element(&api, &session(), &yes(), "b", 1)
            .await,
        Outcome::Rejected
    );
    assert_eq!(
        manager
            .remove_element(&api, &session(), &yes(), "zzz", 0)
            .await,
        Outcome::Rejected
    );
    assert_eq!(log.all().len(), 1);
}

#[tokio::test]
async fn it_renames_lists() {
    let (mut manager, api, log) = loaded().await;
    manager.start_edit("a");

    let res = manager.rename(&api, &session(), "a", "Moved").await;

    assert_eq!(res, Outcome::Applied);
    assert_eq!(manager.editing, None);
    assert_eq!(
        log.all()[1],
        Request::UpdateList(
            "a".to_string(),
            ListUpdate::Rename {
                name: "Moved".to_string()
            }
        )
    );
    assert_eq!(log.count(is_fetch), 2);
}

#[tokio::test]
async fn it_rejects_empty_names() {
    let (mut manager, api, log) = loaded().await;
    manager.start_edit("a");

    let res = manager.rename(&api, &session(), "a", "").await;

    assert_eq!(res, Outcome::Rejected);
    assert!(manager.is_editing("a"));
    assert_eq!(log.all().len(), 1);
}

#[tokio::test]
async fn it_collapses_lists_that_disappeared() {
    let (mut manager, _, _) = loaded().await;
    manager.toggle("a");
    let (api, _) = RecordingApi::with_lists(vec![list("b", "Teapots", &[418])]).boxed();

    manager.fetch_all(&api, &session()).await;

    assert_eq!(manager.expanded, None);
}
