use mockito::{Matcher, Server};

use crate::config::CircleCiConfig;
use crate::error::BridgeError;

use super::CircleCiClient;

fn client_for(server: &Server) -> CircleCiClient {
    // Trailing slash on purpose: constructed paths must not double up.
    let config = CircleCiConfig::new(
        format!("{}/", server.url()),
        "test-key".to_owned(),
        "gh/acme/widget".to_owned(),
    )
    .unwrap();

    CircleCiClient::new(config).unwrap()
}

fn pipeline_json(id: &str, number: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "created_at": "2024-05-02T10:00:00Z",
        "updated_at": "2024-05-02T10:05:00Z",
        "number": number,
        "state": "created"
    })
}

#[tokio::test]
async fn create_pipeline_returns_the_new_pipeline_number() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/project/gh/acme/widget/pipeline")
        .match_header("authorization", Matcher::Regex("^Basic .+".to_owned()))
        .match_body(Matcher::Json(serde_json::json!({ "branch": "main" })))
        .with_status(201)
        .with_body(r#"{"number": 42, "state": "pending", "id": "p-new"}"#)
        .create_async()
        .await;

    let number = client_for(&server).create_pipeline("main").await.unwrap();

    assert_eq!(number, 42);
    mock.assert_async().await;
}

#[tokio::test]
async fn create_pipeline_failure_embeds_the_response_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/project/gh/acme/widget/pipeline")
        .with_status(400)
        .with_body("Ref not found")
        .create_async()
        .await;

    let err = client_for(&server).create_pipeline("ghost").await.unwrap_err();

    assert!(matches!(err, BridgeError::Api { status: 400, .. }));
    assert!(err.to_string().contains("Ref not found"));
}

#[tokio::test]
async fn branch_pipelines_parses_the_items_envelope() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/project/gh/acme/widget/pipeline")
        .match_query(Matcher::UrlEncoded("branch".into(), "main".into()))
        .with_status(200)
        .with_body(
            serde_json::json!({ "items": [pipeline_json("p1", 12), pipeline_json("p0", 11)] })
                .to_string(),
        )
        .create_async()
        .await;

    let pipelines = client_for(&server).branch_pipelines("main").await.unwrap();

    assert_eq!(pipelines.len(), 2);
    assert_eq!(pipelines[0].id, "p1");
    assert_eq!(pipelines[0].number, 12);
    assert_eq!(pipelines[0].state, "created");
    assert_eq!(pipelines[0].created_at.to_rfc3339(), "2024-05-02T10:00:00+00:00");
    assert_eq!(pipelines[0].updated_at.to_rfc3339(), "2024-05-02T10:05:00+00:00");
}

#[tokio::test]
async fn branch_pipelines_treats_an_empty_listing_as_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/project/gh/acme/widget/pipeline")
        .match_query(Matcher::UrlEncoded("branch".into(), "main".into()))
        .with_status(200)
        .with_body(r#"{"items": []}"#)
        .create_async()
        .await;

    let err = client_for(&server).branch_pipelines("main").await.unwrap_err();

    assert!(matches!(err, BridgeError::NoPipelines(_)));
}

#[tokio::test]
async fn pipeline_workflows_treats_an_empty_listing_as_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/pipeline/p1/workflow")
        .with_status(200)
        .with_body(r#"{"items": []}"#)
        .create_async()
        .await;

    let err = client_for(&server).pipeline_workflows("p1").await.unwrap_err();

    assert!(matches!(err, BridgeError::NoWorkflows(_)));
}

#[tokio::test]
async fn cancel_workflow_surfaces_a_failed_cancel() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/workflow/w1/cancel")
        .with_status(409)
        .with_body("Workflow already stopped")
        .create_async()
        .await;

    let err = client_for(&server).cancel_workflow("w1").await.unwrap_err();

    assert!(err.to_string().contains("Workflow already stopped"));
}

#[tokio::test]
async fn cancel_last_pipeline_workflows_cancels_only_matching_running_workflows() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/project/gh/acme/widget/pipeline")
        .match_query(Matcher::UrlEncoded("branch".into(), "main".into()))
        .with_status(200)
        .with_body(
            serde_json::json!({ "items": [pipeline_json("p1", 12), pipeline_json("p0", 11)] })
                .to_string(),
        )
        .create_async()
        .await;
    let workflows_mock = server
        .mock("GET", "/pipeline/p1/workflow")
        .with_status(200)
        .with_body(
            r#"{"items": [
                {"id": "w1", "name": "build", "status": "running"},
                {"id": "w2", "name": "build", "status": "success"},
                {"id": "w3", "name": "deploy", "status": "running"}
            ]}"#,
        )
        .create_async()
        .await;
    let cancel_mock = server
        .mock("POST", "/workflow/w1/cancel")
        .with_status(202)
        .with_body("{}")
        .create_async()
        .await;

    let cancelled = client_for(&server)
        .cancel_last_pipeline_workflows("main", "build")
        .await
        .unwrap();

    assert_eq!(cancelled, 1);
    workflows_mock.assert_async().await;
    cancel_mock.assert_async().await;
}

#[tokio::test]
async fn cancel_last_pipeline_workflows_aborts_on_the_first_failed_cancel() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/project/gh/acme/widget/pipeline")
        .match_query(Matcher::UrlEncoded("branch".into(), "main".into()))
        .with_status(200)
        .with_body(serde_json::json!({ "items": [pipeline_json("p1", 12)] }).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/pipeline/p1/workflow")
        .with_status(200)
        .with_body(
            r#"{"items": [
                {"id": "w1", "name": "build", "status": "running"},
                {"id": "w2", "name": "build", "status": "running"}
            ]}"#,
        )
        .create_async()
        .await;
    server
        .mock("POST", "/workflow/w1/cancel")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;
    let second_cancel = server
        .mock("POST", "/workflow/w2/cancel")
        .with_status(202)
        .expect(0)
        .create_async()
        .await;

    let err = client_for(&server)
        .cancel_last_pipeline_workflows("main", "build")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("internal error"));
    second_cancel.assert_async().await;
}

#[tokio::test]
async fn cancel_last_pipeline_workflows_errors_when_the_branch_has_no_pipelines() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/project/gh/acme/widget/pipeline")
        .match_query(Matcher::UrlEncoded("branch".into(), "main".into()))
        .with_status(200)
        .with_body(r#"{"items": []}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .cancel_last_pipeline_workflows("main", "build")
        .await
        .unwrap_err();

    assert!(matches!(err, BridgeError::NoPipelines(_)));
}
