use crate::{api::ApiResponse, error::ServiceError, request::AccessRequest, settings::Settings};
use connectors::{
    FilterCompiler,
    elastic::{ElasticFilterCompiler, ElasticQuery, Post, SearchBackend},
    opa::{CompileRequest, PolicyEngine},
};
use model::{Decision, Value};
use tracing::{debug, info, warn};
use translator::{Translator, TranslatorConfig};

/// Serves post searches restricted to what the policy lets a principal see.
pub struct PostsService<P, S> {
    policy: P,
    backend: S,
    translator: Translator,
    query: String,
    relation: String,
}

impl<P, S> PostsService<P, S>
where
    P: PolicyEngine,
    S: SearchBackend,
{
    pub fn new(policy: P, backend: S, query: impl Into<String>, config: TranslatorConfig) -> Self {
        Self {
            policy,
            backend,
            relation: config.relation.clone(),
            translator: Translator::new(config),
            query: query.into(),
        }
    }

    pub fn from_settings(policy: P, backend: S, settings: &Settings) -> Self {
        Self::new(
            policy,
            backend,
            settings.policy_query.clone(),
            settings.translator.clone(),
        )
    }

    /// `GET /posts`
    pub async fn list_posts(&self, user: &str) -> ApiResponse {
        let request = AccessRequest::get(&format!("/{}", self.relation), user);
        match self.search(&request, ElasticQuery::match_all()).await {
            Ok(posts) => ApiResponse::ok(serde_json::json!(posts)),
            Err(err) => error_response(&err),
        }
    }

    /// `GET /posts/{id}`
    pub async fn get_post(&self, user: &str, id: &str) -> ApiResponse {
        if id.trim().is_empty() || id.contains('/') {
            return error_response(&ServiceError::InvalidRequest(format!(
                "invalid post id '{id}'"
            )));
        }

        let request = AccessRequest::get(&format!("/{}/{id}", self.relation), user);
        let base = ElasticQuery::term("id", &Value::from(id));
        match self.search(&request, base).await {
            Ok(posts) if posts.is_empty() => {
                error_response(&ServiceError::NotFound(format!("post '{id}'")))
            }
            Ok(posts) => ApiResponse::ok(serde_json::json!(posts)),
            Err(err) => error_response(&err),
        }
    }

    /// Runs `base` restricted by the policy decision for `request`.
    pub async fn search(
        &self,
        request: &AccessRequest,
        base: ElasticQuery,
    ) -> Result<Vec<Post>, ServiceError> {
        info!(
            "{} /{} for user '{}'",
            request.method,
            request.path.join("/"),
            request.user
        );

        let compile = CompileRequest::new(&self.query, request.to_input(), &self.relation);
        let residuals = self.policy.compile(&compile).await?;
        let decision = self.translator.translate(&residuals)?;

        let query = match decision {
            Decision::Denied => return Err(ServiceError::NotAuthorized),
            Decision::Allowed => base,
            Decision::Conditional(tree) => {
                let filter = ElasticFilterCompiler::compile(&tree);
                ElasticQuery::filter_all(vec![filter, base])
            }
        };

        debug!("Combined search query: {}", query);
        Ok(self.backend.search(&query).await?)
    }
}

fn error_response(err: &ServiceError) -> ApiResponse {
    match err {
        ServiceError::NotAuthorized | ServiceError::NotFound(_) | ServiceError::InvalidRequest(_) => {
            debug!("Request rejected: {err}")
        }
        _ => warn!("Request failed: {err}"),
    }
    ApiResponse::from(err)
}
