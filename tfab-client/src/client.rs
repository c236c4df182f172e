//! Controller and session handles.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::{Value, json};
use tracing::debug;

use crate::config::ControllerConfig;
use crate::error::{Error, Result};

const CSRF_COOKIE: &str = "_csrf";
const CSRF_HEADER: &str = "x-csrf-token";

/// Handle for one controller.
///
/// Carries the config-API surface directly; [`Controller::authenticate`]
/// opens the web-API surface as a [`Session`].
#[derive(Debug)]
pub struct Controller {
    http: reqwest::Client,
    config: ControllerConfig,
}

/// Authenticated web-API session.
///
/// Holds the CSRF token from login; the session cookie rides along in the
/// underlying client's cookie store. Valid for one invocation.
#[derive(Debug)]
pub struct Session<'a> {
    controller: &'a Controller,
    csrf_token: String,
}

/// Reference to a background job accepted by the controller.
///
/// Jobs are fire-and-forget: completion is observable only out-of-band, the
/// execution id is what log inspection can be correlated against.
#[derive(Debug, Clone)]
pub struct JobHandle {
    pub job_execution_id: Option<String>,
}

impl Controller {
    pub fn new(config: ControllerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Look up the identifier for `fq_name`, if the controller has a
    /// matching object.
    ///
    /// Never mutates remote state. 404 means the object does not exist and
    /// is a valid outcome; 401 and every other non-200 are errors, so a
    /// misconfigured environment is never mistaken for a missing object.
    pub async fn resolve(&self, object_type: &str, fq_name: &[String]) -> Result<Option<String>> {
        let url = format!("{}/fqname-to-id", self.config.config_api);
        let body = json!({ "type": object_type, "fq_name": fq_name });
        debug!(object_type, fq_name = ?fq_name, "Resolving fq_name");

        let response = send(self.http.post(&url).json(&body), &url).await?;
        match response.status() {
            StatusCode::OK => {
                let value: Value = read_json(response, &url).await?;
                let uuid = value
                    .get("uuid")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::Decode("fqname-to-id response without uuid".into()))?;
                Ok(Some(uuid.to_string()))
            }
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED => Err(Error::Authorization(read_text(response, &url).await?)),
            status => Err(Error::Remote {
                status: status.as_u16(),
                body: read_text(response, &url).await?,
            }),
        }
    }

    /// Log in to the web API and return a session carrying the CSRF token.
    pub async fn authenticate(&self) -> Result<Session<'_>> {
        let url = format!("{}/authenticate", self.config.web_api);
        let body = json!({
            "username": self.config.username,
            "password": self.config.password,
        });
        debug!(username = %self.config.username, "Authenticating web-API session");

        let response = send(self.http.post(&url).json(&body), &url).await?;
        let csrf_token = response
            .cookies()
            .find(|cookie| cookie.name() == CSRF_COOKIE)
            .map(|cookie| cookie.value().to_string());
        expect_success(response, &url).await?;

        let csrf_token = csrf_token
            .ok_or_else(|| Error::Decode("authenticate response without _csrf cookie".into()))?;
        Ok(Session {
            controller: self,
            csrf_token,
        })
    }

    /// Read an object's full document straight from the config API.
    ///
    /// Unlike [`Session::fetch_object`] this needs no login; it is used for
    /// read-only inspection before any mutation is decided on.
    pub async fn read_object(&self, object_type: &str, uuid: &str) -> Result<Value> {
        let url = format!("{}/{}/{}", self.config.config_api, object_type, uuid);
        debug!(object_type, %uuid, "Reading object");
        let response = send(self.http.get(&url), &url).await?;
        let text = expect_success(response, &url).await?;
        serde_json::from_str(&text).map_err(|e| Error::Decode(format!("{url}: {e}")))
    }

    /// Submit a background job to the config API.
    pub async fn execute_job(
        &self,
        job_template_fq_name: &[&str],
        job_input: Value,
    ) -> Result<JobHandle> {
        let url = format!("{}/execute-job", self.config.config_api);
        let body = json!({
            "job_template_fq_name": job_template_fq_name,
            "job_input": job_input,
        });
        debug!(template = ?job_template_fq_name, "Executing job");

        let response = send(self.http.post(&url).json(&body), &url).await?;
        let text = expect_success(response, &url).await?;
        let job_execution_id = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|value| {
                value
                    .get("job_execution_id")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            });
        Ok(JobHandle { job_execution_id })
    }
}

impl Session<'_> {
    /// Fetch the full current document for an existing object.
    ///
    /// Returns the `{"<type>": {...}}` envelope the CRUD endpoints expect
    /// back.
    pub async fn fetch_object(&self, object_type: &str, uuid: &str) -> Result<Value> {
        let body = json!({ "data": [{ "type": object_type, "uuid": [uuid] }] });
        let text = self.post("api/tenants/config/get-config-objects", &body).await?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| Error::Decode(format!("get-config-objects response: {e}")))?;
        value
            .get(0)
            .cloned()
            .ok_or_else(|| Error::Decode("get-config-objects returned no object".into()))
    }

    /// Create a fresh object from a full document.
    pub async fn create(&self, payload: &Value) -> Result<String> {
        self.post("api/tenants/config/create-config-object", payload)
            .await
    }

    /// Overwrite an existing object with a full document.
    pub async fn update(&self, payload: &Value) -> Result<String> {
        self.post("api/tenants/config/update-config-object", payload)
            .await
    }

    /// Delete an object by identifier.
    pub async fn delete(&self, object_type: &str, uuid: &str) -> Result<String> {
        let body = json!([{ "type": object_type, "deleteIDs": [uuid] }]);
        self.post("api/tenants/config/delete", &body).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<String> {
        let url = format!("{}/{}", self.controller.config.web_api, path);
        debug!(%url, "web-API call");
        let request = self
            .controller
            .http
            .post(&url)
            .header(CSRF_HEADER, &self.csrf_token)
            .json(body);
        let response = send(request, &url).await?;
        expect_success(response, &url).await
    }
}

async fn send(request: RequestBuilder, url: &str) -> Result<Response> {
    request.send().await.map_err(|e| {
        if e.is_timeout() {
            Error::Timeout {
                url: url.to_string(),
            }
        } else {
            Error::Network(e)
        }
    })
}

/// Map a response to its body text, turning non-success statuses into the
/// error taxonomy: 401 is an authorization failure, everything else carries
/// the response body as diagnostic.
async fn expect_success(response: Response, url: &str) -> Result<String> {
    let status = response.status();
    let body = read_text(response, url).await?;
    match status {
        StatusCode::UNAUTHORIZED => Err(Error::Authorization(body)),
        status if status.is_success() => Ok(body),
        status => Err(Error::Remote {
            status: status.as_u16(),
            body,
        }),
    }
}

async fn read_text(response: Response, url: &str) -> Result<String> {
    response.text().await.map_err(|e| {
        if e.is_timeout() {
            Error::Timeout {
                url: url.to_string(),
            }
        } else {
            Error::Network(e)
        }
    })
}

async fn read_json(response: Response, url: &str) -> Result<Value> {
    let text = read_text(response, url).await?;
    serde_json::from_str(&text).map_err(|e| Error::Decode(format!("{url}: {e}")))
}
