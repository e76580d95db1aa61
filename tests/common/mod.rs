//! Shared setup for integration tests.
//!
//! The full Actix app is assembled exactly as in `main.rs`, but backed by in-memory
//! stores so the suite runs without PostgreSQL.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    middleware::Logger,
    test, web, App,
};
use async_trait::async_trait;
use serde_json::json;

use tasktrack::{
    auth::{AuthService, BcryptHasher, JwtKeys, JwtStrategy, SignInResponse, UserRepository},
    db::{StoreError, TaskStore, UserStore},
    models::{GetTasksFilter, NewTask, NewUser, Task, User},
    routes,
    tasks::{TaskRepository, TasksService},
};

pub const TEST_SECRET: &str = "integration_test_secret";

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn remove(&self, username: &str) {
        self.users.lock().unwrap().retain(|u| u.username != username);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::UniqueViolation("users_username_key".into()));
        }
        let stored = User {
            id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            username: user.username,
            password: user.password,
            salt: user.salt,
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: Mutex<Vec<Task>>,
}

fn matches_filter(task: &Task, filter: &GetTasksFilter) -> bool {
    let status_ok = filter.status.map_or(true, |status| task.status == status);
    let search_ok = filter.search.as_ref().map_or(true, |search| {
        let needle = search.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
    });
    status_ok && search_ok
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let stored = Task {
            id: tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            title: task.title,
            description: task.description,
            status: task.status,
            user_id: task.user_id,
        };
        tasks.push(stored.clone());
        Ok(stored)
    }

    async fn find_one(&self, id: i32, user_id: i32) -> Result<Option<Task>, StoreError> {
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .iter()
            .find(|t| t.id == id && t.user_id == user_id)
            .cloned())
    }

    async fn find_many(
        &self,
        filter: &GetTasksFilter,
        user_id: i32,
    ) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .iter()
            .filter(|t| t.user_id == user_id && matches_filter(t, filter))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i32, user_id: i32) -> Result<u64, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| !(t.id == id && t.user_id == user_id));
        Ok((before - tasks.len()) as u64)
    }

    async fn save(&self, task: &Task) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let stored = tasks
            .iter_mut()
            .find(|t| t.id == task.id && t.user_id == task.user_id)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;
        *stored = task.clone();
        Ok(stored.clone())
    }
}

/// Everything the app needs in `app_data`, plus handles on the backing stores.
pub struct TestState {
    pub users: Arc<InMemoryUserStore>,
    pub tasks: Arc<InMemoryTaskStore>,
    auth: web::Data<AuthService>,
    strategy: web::Data<JwtStrategy>,
    tasks_service: web::Data<TasksService>,
    keys: web::Data<JwtKeys>,
}

impl TestState {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserStore::default());
        let tasks = Arc::new(InMemoryTaskStore::default());
        let keys = Arc::new(JwtKeys::new(TEST_SECRET, 3600));

        let repo = UserRepository::new(users.clone(), Arc::new(BcryptHasher::new(4)));
        let tasks_service = TasksService::new(TaskRepository::new(tasks.clone()));

        Self {
            users,
            tasks,
            auth: web::Data::new(AuthService::new(repo.clone(), keys.clone())),
            strategy: web::Data::new(JwtStrategy::new(repo)),
            tasks_service: web::Data::new(tasks_service),
            keys: web::Data::from(keys),
        }
    }
}

pub async fn init_app(
    state: &TestState,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(state.auth.clone())
            .app_data(state.strategy.clone())
            .app_data(state.tasks_service.clone())
            .app_data(state.keys.clone())
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::config),
    )
    .await
}

/// Status of a request whether it was answered by a handler or rejected by middleware.
pub async fn status_of(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: actix_http::Request,
) -> StatusCode {
    match test::try_call_service(app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.error_response().status(),
    }
}

pub async fn sign_up(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> StatusCode {
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    test::call_service(app, req).await.status()
}

pub async fn sign_in(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> Result<String, StatusCode> {
    let req = test::TestRequest::post()
        .uri("/auth/signin")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    if resp.status() != StatusCode::OK {
        return Err(resp.status());
    }
    let body: SignInResponse = test::read_body_json(resp).await;
    Ok(body.access_token)
}

/// Registers `username` and returns a bearer token for it.
pub async fn register_and_sign_in(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> String {
    assert_eq!(sign_up(app, username, password).await, StatusCode::CREATED);
    sign_in(app, username, password)
        .await
        .expect("sign in after sign up")
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
