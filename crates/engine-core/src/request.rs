use serde::Serialize;

/// Evaluation input handed to the policy engine for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRequest {
    pub method: String,
    pub path: Vec<String>,
    pub user: String,
}

impl AccessRequest {
    /// Builds the input for a request path such as `/posts/3`.
    pub fn new(method: &str, url_path: &str, user: &str) -> Self {
        let path = url_path
            .trim_matches('/')
            .split('/')
            .map(str::to_string)
            .collect();

        Self {
            method: method.to_string(),
            path,
            user: user.to_string(),
        }
    }

    pub fn get(url_path: &str, user: &str) -> Self {
        Self::new("GET", url_path, user)
    }

    pub fn to_input(&self) -> serde_json::Value {
        serde_json::json!({
            "method": self.method,
            "path": self.path,
            "user": self.user,
        })
    }
}
