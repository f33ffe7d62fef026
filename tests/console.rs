use pretty_assertions::assert_eq;
use resource_hub::{
    domain::datatype::{AuthorId, InstructorId, ResourceId},
    infra::{
        command::{Command, View},
        controller::{Flow, Prompt, Session},
        service::HttpGateway,
    },
};
use serde_json::{json, Value};

use crate::setup::{course_outline, courses, lab_manual, setup_test, MockBackend};

mod setup;

fn session(backend: &MockBackend) -> Session<HttpGateway> {
    Session::new(
        backend.gateway(),
        5,
        InstructorId::from(1),
        AuthorId::from("Student"),
    )
}

async fn run<P: Prompt>(session: &mut Session<HttpGateway>, line: &str, prompt: &mut P) -> String {
    let mut out = Vec::new();
    let cmd: Command = line.parse().unwrap();
    let flow = session.handle(cmd, &mut out, prompt).await.unwrap();
    assert_eq!(flow, Flow::Continue);
    String::from_utf8(out).unwrap()
}

fn handouts(count: u64) -> Value {
    let handouts: Vec<Value> = (1..=count)
        .map(|n| {
            let mut handout = lab_manual(n, "approved");
            handout["resourceTitle"] = json!(format!("Handout {n}"));
            handout["likes"] = json!(n % 3);
            handout
        })
        .collect();
    Value::Array(handouts)
}

fn no_prompt(_: &str) -> bool {
    panic!("no confirmation expected")
}

#[tokio::test]
async fn resource_table_pages_searches_and_sorts() {
    let backend = setup_test(handouts(7), courses()).await;
    let mut session = session(&backend);
    let mut prompt = no_prompt;

    let out = run(&mut session, "open resources", &mut prompt).await;
    assert!(out.contains("Handout 5"));
    assert!(!out.contains("Handout 6"));
    assert!(out.contains("page 1 of 2 (7 resources, 5 per page)"));

    let out = run(&mut session, "page 2", &mut prompt).await;
    assert!(out.contains("Handout 6"));
    assert!(out.contains("page 2 of 2"));

    let out = run(&mut session, "page-size 7", &mut prompt).await;
    assert_eq!(out, "error: invalid argument <size>: \"7\"\n");
    assert_eq!(session.view_state().page_size(), 5);

    let out = run(&mut session, "search handout 3", &mut prompt).await;
    assert!(out.contains("page 1 of 1 (1 resources, 5 per page)"));

    run(&mut session, "search", &mut prompt).await;
    let out = run(&mut session, "sort likes desc", &mut prompt).await;
    let first = out.find("Handout 2").unwrap();
    let second = out.find("Handout 5").unwrap();
    let third = out.find("Handout 1").unwrap();
    assert!(first < second && second < third);
}

#[tokio::test]
async fn form_commands_create_and_delete_resources() {
    let backend = setup_test(json!([]), courses()).await;
    let mut session = session(&backend);
    let mut prompt = no_prompt;

    let out = run(&mut session, "new", &mut prompt).await;
    assert!(out.contains("CoSc3081 - Web Programming"));

    run(&mut session, "set course CoSc3081", &mut prompt).await;
    run(&mut session, "set title Lab Manual", &mut prompt).await;
    run(&mut session, "set description Full course lab manual", &mut prompt).await;
    let out = run(&mut session, "attach notes.txt", &mut prompt).await;
    assert!(out.starts_with("error: notes.txt has unsupported type"));

    let out = run(&mut session, "submit", &mut prompt).await;
    assert_eq!(out, "saved resource 1\n");

    run(&mut session, "edit 1", &mut prompt).await;
    let mut questions = Vec::new();
    let mut refuse = |question: &str| {
        questions.push(question.to_owned());
        false
    };
    let out = run(&mut session, "delete", &mut refuse).await;
    assert_eq!(out, "error: operation cancelled\n");
    assert_eq!(questions, vec!["Delete resource 1 \"Lab Manual\"?"]);

    let mut accept = |_: &str| true;
    let out = run(&mut session, "delete", &mut accept).await;
    assert_eq!(out, "deleted resource 1\n");
    assert!(session.resources().get(&ResourceId::from(1)).is_none());

    run(&mut session, "reload", &mut prompt).await;
    assert!(session.resources().get(&ResourceId::from(1)).is_some());
}

#[tokio::test]
async fn invalid_drafts_print_field_messages() {
    let backend = setup_test(json!([]), courses()).await;
    let mut session = session(&backend);
    let mut prompt = no_prompt;

    let out = run(&mut session, "set title Lab", &mut prompt).await;
    assert_eq!(out, "error: no resource draft is open\n");

    run(&mut session, "new", &mut prompt).await;
    run(&mut session, "set title La", &mut prompt).await;
    let out = run(&mut session, "submit", &mut prompt).await;

    assert_eq!(
        out,
        "  courseCode: Please select a course\n\
         \x20 resourceTitle: Resource title must be at least 3 characters\n\
         \x20 description: Description must be at least 5 characters\n"
    );
    assert!(backend.requests_to("POST").is_empty());
}

#[tokio::test]
async fn review_assign_and_catalog_views() {
    let backend = setup_test(
        json!([lab_manual(1, "pending"), course_outline(2, "approved")]),
        courses(),
    )
    .await;
    let mut session = session(&backend);
    let mut prompt = no_prompt;

    let out = run(&mut session, "open review", &mut prompt).await;
    assert_eq!(session.view(), View::Review);
    assert!(out.contains("Lab Manual"));
    assert!(!out.contains("Course Outline"));

    let out = run(&mut session, "open assign", &mut prompt).await;
    assert!(out.contains("reviewer -"));
    let out = run(&mut session, "assign 1 2", &mut prompt).await;
    assert_eq!(out, "assigned reviewer 2 to resource 1\n");

    let out = run(&mut session, "approve 1", &mut prompt).await;
    assert_eq!(out, "approved resource 1\n");
    let out = run(&mut session, "pending", &mut prompt).await;
    assert_eq!(out, "no pending resources\n");

    run(&mut session, "open catalog", &mut prompt).await;
    run(&mut session, "like 2", &mut prompt).await;
    let out = run(&mut session, "comment 2 Clear and short", &mut prompt).await;
    assert!(out.contains("Course Outline [CoSc2015]  +1 -0"));
    assert!(out.contains("Student: Clear and short"));
}

#[tokio::test]
async fn unreachable_backend_shows_the_slice_error() {
    let backend = setup_test(json!([lab_manual(1, "pending")]), courses()).await;
    backend.set_failing(true);
    let mut session = session(&backend);
    let mut prompt = no_prompt;

    let out = run(&mut session, "open review", &mut prompt).await;
    assert!(out.starts_with("error: backend responded with HTTP 500"));

    let out = run(&mut session, "courses", &mut prompt).await;
    assert!(out.starts_with("error: Failed to fetch courses"));
}

#[tokio::test]
async fn quit_ends_the_session() {
    let backend = setup_test(json!([]), courses()).await;
    let mut session = session(&backend);
    let mut out = Vec::new();

    let flow = session
        .handle(Command::Quit, &mut out, &mut no_prompt)
        .await
        .unwrap();
    assert_eq!(flow, Flow::Quit);
}
