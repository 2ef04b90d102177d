//! HTTP contract of the gradebook backend.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ApiError;
use crate::form::Mutation;
use crate::model::{Grade, Role, Student, StudentId};
use crate::session::Session;

/// Everything the front end asks of the backend.
///
/// [`ApiClient`] talks HTTP; tests substitute an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn fetch_students(&self, session: &Session) -> Result<Vec<Student>, ApiError>;

    async fn fetch_grades(&self, session: &Session) -> Result<Vec<Grade>, ApiError>;

    /// `Ok(None)` when the backend has no prediction for the student.
    async fn predict(
        &self,
        session: &Session,
        student: StudentId,
    ) -> Result<Option<String>, ApiError>;

    async fn mutate(&self, session: &Session, mutation: &Mutation) -> Result<(), ApiError>;

    async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError>;

    /// Returns the backend's confirmation message.
    async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<String, ApiError>;
}

#[derive(Debug, Deserialize)]
struct MutationReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

impl MutationReply {
    fn into_result(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected {
                message: self.message,
            })
        }
    }
}

#[derive(Debug, Deserialize)]
struct PredictionReply {
    #[serde(default)]
    prediction: Option<String>,
}

impl PredictionReply {
    fn into_prediction(self) -> Option<String> {
        self.prediction.filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct LoginReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl LoginReply {
    fn into_session(self) -> Result<Session, ApiError> {
        match (self.success, self.session_id) {
            (true, Some(token)) if !token.is_empty() => {
                let role = Role::parse(self.role.as_deref().unwrap_or_default());
                Ok(Session::new(token, role))
            }
            _ => Err(ApiError::Rejected {
                message: self.message,
            }),
        }
    }
}

fn status_error(status: StatusCode) -> Option<ApiError> {
    match status {
        StatusCode::UNAUTHORIZED => Some(ApiError::Unauthorized),
        StatusCode::FORBIDDEN => Some(ApiError::Forbidden),
        s if !s.is_success() => Some(ApiError::Status(s.as_u16())),
        _ => None,
    }
}

/// reqwest-backed client rooted at the backend origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Transport(format!("Bad endpoint '{}': {}", path, e)))
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        if let Some(err) = status_error(response.status()) {
            warn!("{} answered {}", response.url().path(), response.status());
            return Err(err);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url.path());
        let response = self.http.get(url).query(query).send().await?;
        Self::read(response).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url.path());
        let response = self.http.post(url).form(fields).send().await?;
        Self::read(response).await
    }
}

impl Backend for ApiClient {
    async fn fetch_students(&self, session: &Session) -> Result<Vec<Student>, ApiError> {
        let students: Vec<Student> = self
            .get_json("/api/students", &[("session_id", session.token.as_str())])
            .await?;
        info!("Loaded {} students", students.len());
        Ok(students)
    }

    async fn fetch_grades(&self, session: &Session) -> Result<Vec<Grade>, ApiError> {
        let grades: Vec<Grade> = self
            .get_json("/api/grades", &[("session_id", session.token.as_str())])
            .await?;
        info!("Loaded {} grades", grades.len());
        Ok(grades)
    }

    async fn predict(
        &self,
        session: &Session,
        student: StudentId,
    ) -> Result<Option<String>, ApiError> {
        let student_id = student.to_string();
        let reply: PredictionReply = self
            .get_json(
                "/api/predict",
                &[("session_id", session.token.as_str()), ("student_id", student_id.as_str())],
            )
            .await?;
        Ok(reply.into_prediction())
    }

    async fn mutate(&self, session: &Session, mutation: &Mutation) -> Result<(), ApiError> {
        let fields = mutation.form_fields(&session.token);
        let reply: MutationReply = self.post_form(mutation.path(), &fields).await?;
        let result = reply.into_result();
        match &result {
            Ok(()) => info!("{} succeeded", mutation.path()),
            Err(e) => warn!("{} failed: {}", mutation.path(), e),
        }
        result
    }

    async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let fields = [
            ("username", username.to_string()),
            ("password", password.to_string()),
        ];
        let reply: LoginReply = self.post_form("/api/login", &fields).await?;
        let session = reply.into_session()?;
        info!("Logged in as {} (role: {})", username, session.role.as_str());
        Ok(session)
    }

    async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<String, ApiError> {
        let fields = [
            ("username", username.to_string()),
            ("password", password.to_string()),
            ("email", email.to_string()),
        ];
        let reply: MutationReply = self.post_form("/api/register", &fields).await?;
        let message = reply.message.clone().unwrap_or_default();
        reply.into_result()?;
        info!("Registered {}", username);
        Ok(message)
    }
}
