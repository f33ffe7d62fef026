#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use resource_hub::{config::env_var::EnvVar, infra::service::HttpGateway};
use salvo::{
    http::StatusCode,
    listener::TcpListener,
    writer::{Json, Text},
    Depot, FlowCtrl, Handler, Request, Response, Router, Server,
};
use serde_json::{json, Value};
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub struct BackendState {
    pub resources: Vec<Value>,
    pub courses: Vec<Value>,
    pub requests: Vec<RecordedRequest>,
    pub failing: bool,
    next_id: u64,
}

type SharedState = Arc<Mutex<BackendState>>;

fn record(state: &SharedState, method: &'static str, req: &Request, body: Option<Value>) -> bool {
    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method,
        path: req.uri().path().to_owned(),
        body,
    });
    state.failing
}

fn fail(res: &mut Response) {
    res.set_status_code(StatusCode::INTERNAL_SERVER_ERROR);
    res.render(Text::Plain("backend unavailable"));
}

fn same_id(resource: &Value, id: &str) -> bool {
    match &resource["id"] {
        Value::Number(n) => n.to_string() == id,
        Value::String(s) => s == id,
        _ => false,
    }
}

struct ListResources(SharedState);

#[async_trait]
impl Handler for ListResources {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        if record(&self.0, "GET", req, None) {
            return fail(res);
        }

        let resources = self.0.lock().unwrap().resources.clone();
        res.render(Json(resources));
    }
}

struct CreateResource(SharedState);

#[async_trait]
impl Handler for CreateResource {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let body: Value = req.parse_body().await.unwrap_or(Value::Null);
        if record(&self.0, "POST", req, Some(body.clone())) {
            return fail(res);
        }

        let mut created = body;
        {
            let mut state = self.0.lock().unwrap();
            state.next_id += 1;
            created["id"] = json!(state.next_id);
            state.resources.push(created.clone());
        }

        res.set_status_code(StatusCode::CREATED);
        res.render(Json(created));
    }
}

struct PatchResource(SharedState);

#[async_trait]
impl Handler for PatchResource {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let id = req.params().get("id").cloned().unwrap_or_default();
        let body: Value = req.parse_body().await.unwrap_or(Value::Null);
        if record(&self.0, "PATCH", req, Some(body.clone())) {
            return fail(res);
        }

        let updated = {
            let mut state = self.0.lock().unwrap();
            state
                .resources
                .iter_mut()
                .find(|resource| same_id(resource, &id))
                .map(|resource| {
                    if let Value::Object(fields) = body {
                        for (key, value) in fields {
                            resource[key] = value;
                        }
                    }
                    resource.clone()
                })
        };

        match updated {
            Some(resource) => res.render(Json(resource)),
            None => {
                res.set_status_code(StatusCode::NOT_FOUND);
                res.render(Text::Plain("Not Found"));
            }
        }
    }
}

struct ListCourses(SharedState);

#[async_trait]
impl Handler for ListCourses {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        if record(&self.0, "GET", req, None) {
            return fail(res);
        }

        let courses = self.0.lock().unwrap().courses.clone();
        res.render(Json(courses));
    }
}

/// In-process REST backend serving `/resources` and `/courses`.
pub struct MockBackend {
    pub url: Url,
    state: SharedState,
}

impl MockBackend {
    pub async fn start(resources: Value, courses: Value) -> Self {
        let resources: Vec<Value> = serde_json::from_value(resources).unwrap();
        let next_id = resources
            .iter()
            .filter_map(|resource| resource["id"].as_u64())
            .max()
            .unwrap_or(0);
        let state = Arc::new(Mutex::new(BackendState {
            resources,
            courses: serde_json::from_value(courses).unwrap(),
            next_id,
            ..Default::default()
        }));

        let router = Router::new()
            .push(
                Router::with_path("resources")
                    .get(ListResources(state.clone()))
                    .post(CreateResource(state.clone()))
                    .push(Router::with_path("<id>").patch(PatchResource(state.clone()))),
            )
            .push(Router::with_path("courses").get(ListCourses(state.clone())));

        let port = free_port();
        let address = format!("127.0.0.1:{port}");
        let listener = TcpListener::bind(&address);
        tokio::spawn(Server::new(listener).serve(router));

        Self {
            url: Url::parse(&format!("http://{address}")).unwrap(),
            state,
        }
    }

    pub fn config(&self) -> EnvVar {
        let url = self.url.to_string();
        EnvVar::from_lookup(|key| match key {
            "API_URL" => Some(url.clone()),
            _ => std::env::var(key).ok(),
        })
        .unwrap()
    }

    pub fn gateway(&self) -> Arc<HttpGateway> {
        Arc::new(HttpGateway::from_config(&self.config()).unwrap())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|req| req.method == method)
            .collect()
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    pub fn resources(&self) -> Vec<Value> {
        self.state.lock().unwrap().resources.clone()
    }

    pub fn push_resource(&self, resource: Value) {
        self.state.lock().unwrap().resources.push(resource);
    }
}

fn free_port() -> u16 {
    let probe = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    probe.local_addr().unwrap().port()
}

pub async fn setup_test(resources: Value, courses: Value) -> MockBackend {
    dotenv::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    MockBackend::start(resources, courses).await
}

pub fn lab_manual(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "resourceTitle": "Lab Manual",
        "description": "Full course lab manual",
        "courseCode": "CoSc3081",
        "attachments": [],
        "status": status,
        "instructorId": 1,
        "reviewerId": null,
        "likes": 0,
        "dislikes": 0,
        "comments": []
    })
}

pub fn course_outline(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "resourceTitle": "Course Outline",
        "description": "Weekly topics and grading",
        "courseCode": "CoSc2015",
        "attachments": [],
        "status": status,
        "instructorId": 1,
        "reviewerId": null,
        "likes": 0,
        "dislikes": 0,
        "comments": []
    })
}

pub fn courses() -> Value {
    json!([
        {
            "id": 1,
            "courseCode": "CoSc3081",
            "courseTitle": "Web Programming",
            "yearOfOffering": { "year": 3, "semester": 1 }
        },
        {
            "id": 2,
            "courseCode": "CoSc2015",
            "courseTitle": "Data Structures",
            "yearOfOffering": { "year": 2, "semester": 2 }
        }
    ])
}
