//! User Controller
//!
//! 用户数据保存在进程内存中，重启后清空

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use crate::application::{Controller, HandlerError, ResponseWriter};
use crate::domain::routing::{Reply, Request};

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    name: String,
}

/// 进程内用户表
#[derive(Debug, Default)]
pub struct UserStore {
    users: DashMap<u64, User>,
    next_id: AtomicU64,
}

impl UserStore {
    pub fn global() -> &'static UserStore {
        static STORE: OnceLock<UserStore> = OnceLock::new();
        STORE.get_or_init(UserStore::default)
    }

    pub fn insert(&self, name: impl Into<String>) -> User {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            name: name.into(),
        };
        self.users.insert(id, user.clone());
        user
    }

    /// 按 id 升序
    pub fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        users
    }
}

pub struct UserController {
    store: &'static UserStore,
}

impl Default for UserController {
    fn default() -> Self {
        Self {
            store: UserStore::global(),
        }
    }
}

impl Controller for UserController {
    const NAME: &'static str = "UserController";
}

impl UserController {
    pub fn list(&mut self, _request: &Request, _response: &mut dyn ResponseWriter) -> Result<Reply, HandlerError> {
        Ok(Reply::json(&self.store.list())?)
    }

    pub fn create(&mut self, request: &Request, response: &mut dyn ResponseWriter) -> Result<Reply, HandlerError> {
        let input: CreateUserRequest = match serde_json::from_str(&request.body) {
            Ok(input) => input,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid create user body");
                response.set_status_code(400);
                return Ok(Reply::json(&serde_json::json!({ "error": e.to_string() }))?);
            }
        };

        let name = input.name.trim();
        if name.is_empty() {
            response.set_status_code(400);
            return Ok(Reply::json(&serde_json::json!({ "error": "name is required" }))?);
        }

        let user = self.store.insert(name);
        tracing::info!(user_id = user.id, "User created");

        response.set_status_code(201);
        Ok(Reply::json(&user)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::MemoryResponse;
    use crate::domain::routing::RequestMethod;
    use serde_json::json;

    fn controller(store: &'static UserStore) -> UserController {
        UserController { store }
    }

    fn leaked_store() -> &'static UserStore {
        Box::leak(Box::new(UserStore::default()))
    }

    #[test]
    fn test_create_then_list() {
        let store = leaked_store();
        let mut response = MemoryResponse::new();

        let request = Request::new(RequestMethod::Post, "/users").with_body(r#"{"name":"ada"}"#);
        let reply = controller(store).create(&request, &mut response).unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(reply, Reply::Json(json!({"id": 1, "name": "ada"})));

        let request = Request::new(RequestMethod::Post, "/users").with_body(r#"{"name":"grace"}"#);
        controller(store).create(&request, &mut MemoryResponse::new()).unwrap();

        let request = Request::new(RequestMethod::Get, "/users");
        let reply = controller(store).list(&request, &mut MemoryResponse::new()).unwrap();
        assert_eq!(
            reply,
            Reply::Json(json!([{"id": 1, "name": "ada"}, {"id": 2, "name": "grace"}]))
        );
    }

    #[test]
    fn test_empty_list_is_json_array() {
        let request = Request::new(RequestMethod::Get, "/users");
        let reply = controller(leaked_store())
            .list(&request, &mut MemoryResponse::new())
            .unwrap();
        assert_eq!(reply, Reply::Json(json!([])));
    }

    #[test]
    fn test_create_rejects_bad_body() {
        let store = leaked_store();

        let mut response = MemoryResponse::new();
        let request = Request::new(RequestMethod::Post, "/users").with_body("not json");
        let reply = controller(store).create(&request, &mut response).unwrap();
        assert_eq!(response.status, 400);
        assert!(matches!(reply, Reply::Json(ref v) if v.get("error").is_some()));

        let mut response = MemoryResponse::new();
        let request = Request::new(RequestMethod::Post, "/users").with_body(r#"{"name":"  "}"#);
        controller(store).create(&request, &mut response).unwrap();
        assert_eq!(response.status, 400);
        assert!(store.list().is_empty());
    }
}
