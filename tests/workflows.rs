use pretty_assertions::assert_eq;
use resource_hub::{
    app::{
        form::{DraftField, FormState, ResourceForm},
        store::{CourseStore, ResourceStore},
        use_case::{assignment, catalog, review},
    },
    domain::{
        datatype::{AuthorId, InstructorId, ResourceId, ResourceStatus, ReviewerId},
        entity::{AttachmentCandidate, Entity},
    },
    error::{app::ApplicationError, workflow::WorkflowError},
};
use serde_json::json;

use crate::setup::{course_outline, courses, lab_manual, setup_test};

mod setup;

#[tokio::test]
async fn new_draft_is_created_with_its_attachment() {
    let backend = setup_test(json!([]), courses()).await;
    let mut store = ResourceStore::new(backend.gateway());
    let mut course_store = CourseStore::new(backend.gateway());
    course_store.load().await.unwrap();

    let options = ResourceForm::course_options(&course_store);
    assert_eq!(options[0].value, "CoSc3081");
    assert_eq!(options[0].label, "CoSc3081 - Web Programming");

    let mut form = ResourceForm::new(InstructorId::from(1));
    form.new_resource();
    form.set_field(DraftField::CourseCode, options[0].value.clone())
        .unwrap();
    form.set_field(DraftField::ResourceTitle, "Lab Manual").unwrap();
    form.set_field(DraftField::Description, "Full course lab manual")
        .unwrap();
    form.select_attachment(&AttachmentCandidate::from_path("/home/instructor/lab-manual.pdf"))
        .unwrap();

    let created = form.submit(&mut store).await.unwrap();

    assert_eq!(form.state(), &FormState::Idle);
    assert_eq!(created.attachments().len(), 1);
    assert_eq!(created.attachments()[0].file_type(), "application/pdf");

    let body = backend.requests_to("POST")[0].body.clone().unwrap();
    assert_eq!(body["attachments"][0]["file_name"], json!("lab-manual.pdf"));
    assert_eq!(body.get("id"), None);
}

#[tokio::test]
async fn short_title_blocks_submission_without_a_request() {
    let backend = setup_test(json!([]), courses()).await;
    let mut store = ResourceStore::new(backend.gateway());
    let mut form = ResourceForm::new(InstructorId::from(1));
    form.new_resource();
    form.set_field(DraftField::CourseCode, "CoSc3081").unwrap();
    form.set_field(DraftField::ResourceTitle, "La").unwrap();
    form.set_field(DraftField::Description, "Full course lab manual")
        .unwrap();

    let err = form.submit(&mut store).await.unwrap_err();

    let err = match err {
        ApplicationError::Validation(err) => err,
        other => panic!("expected validation error, got {other:?}"),
    };
    assert_eq!(err.fields.len(), 1);
    assert_eq!(err.fields[0].path, "/resourceTitle");
    assert!(store.resources().is_empty());
    assert!(backend.requests().is_empty());
    assert!(matches!(form.state(), FormState::Creating(_)));
}

#[tokio::test]
async fn edited_resource_is_patched_in_place() {
    let backend = setup_test(json!([lab_manual(1, "pending")]), courses()).await;
    let mut store = ResourceStore::new(backend.gateway());
    store.load().await.unwrap();

    let id = ResourceId::from(1);
    let mut form = ResourceForm::new(InstructorId::from(1));
    form.select(store.get(&id).unwrap());
    form.set_field(DraftField::Description, "Lab manual with solutions")
        .unwrap();

    form.submit(&mut store).await.unwrap();

    assert_eq!(store.resources().len(), 1);
    assert_eq!(store.get(&id).unwrap().description(), "Lab manual with solutions");
    assert!(backend.requests_to("POST").is_empty());

    let patch = &backend.requests_to("PATCH")[0];
    assert_eq!(patch.path, "/resources/1");
    assert_eq!(
        patch.body,
        Some(json!({
            "resourceTitle": "Lab Manual",
            "description": "Lab manual with solutions",
            "courseCode": "CoSc3081",
            "attachments": []
        }))
    );
}

#[tokio::test]
async fn edit_commits_the_backend_copy_when_not_loaded_locally() {
    let backend = setup_test(json!([lab_manual(1, "pending")]), courses()).await;
    let mut loaded = ResourceStore::new(backend.gateway());
    loaded.load().await.unwrap();

    let id = ResourceId::from(1);
    let mut form = ResourceForm::new(InstructorId::from(1));
    form.select(loaded.get(&id).unwrap());
    form.set_field(DraftField::ResourceTitle, "Lab Manual v2").unwrap();

    let mut fresh = ResourceStore::new(backend.gateway());
    let committed = form.submit(&mut fresh).await.unwrap();

    assert_eq!(committed.id(), &id);
    assert_eq!(committed.resource_title(), "Lab Manual v2");
    assert_eq!(form.state(), &FormState::Idle);
    assert!(fresh.resources().is_empty());
    assert_eq!(backend.resources()[0]["resourceTitle"], json!("Lab Manual v2"));
}

#[tokio::test]
async fn review_queue_lists_pending_and_applies_decisions() {
    let backend = setup_test(
        json!([
            lab_manual(1, "pending"),
            course_outline(2, "pending"),
            lab_manual(3, "approved")
        ]),
        courses(),
    )
    .await;
    let mut store = ResourceStore::new(backend.gateway());
    review::mount(&mut store).await.unwrap();

    let pending: Vec<String> = review::pending(&store)
        .iter()
        .map(|r| r.ident().to_string())
        .collect();
    assert_eq!(pending, vec!["1", "2"]);

    review::approve(&mut store, &ResourceId::from(1)).await.unwrap();
    review::reject(&mut store, &ResourceId::from(2)).await.unwrap();

    assert!(review::pending(&store).is_empty());
    assert_eq!(
        store.get(&ResourceId::from(2)).unwrap().status(),
        ResourceStatus::Rejected
    );

    let bodies: Vec<_> = backend
        .requests_to("PATCH")
        .into_iter()
        .map(|req| req.body)
        .collect();
    assert_eq!(
        bodies,
        vec![
            Some(json!({ "status": "approved" })),
            Some(json!({ "status": "rejected" }))
        ]
    );
}

#[tokio::test]
async fn assignment_accepts_only_listed_reviewers() {
    let backend = setup_test(json!([lab_manual(1, "pending")]), courses()).await;
    let mut store = ResourceStore::new(backend.gateway());
    assignment::mount(&mut store).await.unwrap();

    let id = ResourceId::from(1);
    let err = assignment::assign(&mut store, &id, &ReviewerId::from(9))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Workflow(WorkflowError::UnknownReviewer(_))
    ));
    assert!(backend.requests_to("PATCH").is_empty());

    let reviewer = assignment::REVIEWER_CANDIDATES[0];
    assert_eq!(reviewer.name, "Reviewer 2");
    assignment::assign(&mut store, &id, &reviewer.reviewer_id())
        .await
        .unwrap();

    assert_eq!(
        store.get(&id).unwrap().reviewer_id(),
        &Some(ReviewerId::from(2))
    );
    assert_eq!(assignment::pending(&store).len(), 1);
}

#[tokio::test]
async fn catalog_interactions_stay_in_the_session() {
    let backend = setup_test(
        json!([lab_manual(1, "approved"), course_outline(2, "pending")]),
        courses(),
    )
    .await;
    let mut store = ResourceStore::new(backend.gateway());
    catalog::mount(&mut store).await.unwrap();

    let approved = catalog::approved(&store);
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].resource_title(), "Lab Manual");

    let id = ResourceId::from(1);
    catalog::like(&mut store, &id).unwrap();
    catalog::dislike(&mut store, &id).unwrap();
    let comment = catalog::comment(&mut store, &id, AuthorId::from("Student"), "Very helpful")
        .unwrap();

    let resource = store.get(&id).unwrap();
    assert_eq!(resource.likes(), 1);
    assert_eq!(resource.dislikes(), 1);
    assert_eq!(resource.comments(), &vec![comment.clone()]);
    assert_eq!(comment.author_id(), &AuthorId::from("Student"));
    assert!(!comment.timestamp().is_empty());

    assert!(matches!(
        catalog::comment(&mut store, &id, AuthorId::from("Student"), ""),
        Err(ApplicationError::Validation(_))
    ));
    assert_eq!(
        catalog::like(&mut store, &ResourceId::from(7)),
        Err(WorkflowError::UnknownResource(ResourceId::from(7)))
    );
    assert_eq!(backend.requests_to("PATCH"), vec![]);
    assert_eq!(backend.requests_to("POST"), vec![]);
}
