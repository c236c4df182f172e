//! firewall-rule module.
//!
//! Rules live either under a project or globally under the default
//! policy-management node. The web UI expects a fully-normalized document
//! (explicit nulls on unset endpoint fields, default direction and port
//! ranges), so the same normalization is applied here.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, ObjectType};

/// Desired attributes of a firewall rule.
#[derive(Debug, Clone, Default)]
pub struct FirewallRuleParams {
    pub name: String,
    pub domain: String,
    /// Project scope; `None` makes a global rule.
    pub project: Option<String>,
    pub endpoint_1: Option<Value>,
    pub endpoint_2: Option<Value>,
    pub service: Option<Value>,
    pub action_list: Option<Value>,
}

impl FirewallRuleParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: registry::DEFAULT_DOMAIN.to_string(),
            ..Self::default()
        }
    }
}

pub(crate) fn rule_fq_name(domain: &str, project: Option<&str>, name: &str) -> Vec<String> {
    match project {
        Some(project) => vec![domain.to_string(), project.to_string(), name.to_string()],
        None => registry::policy_management_fq(name),
    }
}

fn normalize_endpoint(endpoint: &mut Value) {
    if endpoint.get("address_group").is_none() {
        endpoint["address_group"] = Value::Null;
    }
    if endpoint.get("any").is_none() {
        endpoint["any"] = Value::Null;
    }
    if endpoint.get("tags").is_none() {
        endpoint["tags"] = json!([]);
    }
}

#[async_trait]
impl ConfigObject for FirewallRuleParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::FirewallRule
    }

    fn fq_name(&self) -> Vec<String> {
        rule_fq_name(&self.domain, self.project.as_deref(), &self.name)
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut doc = current.unwrap_or_else(|| {
            let parent = if self.project.is_some() {
                "project"
            } else {
                "policy-management"
            };
            registry::base_document(ObjectType::FirewallRule, &self.fq_name(), Some(parent))
        });
        let body = registry::body_mut(&mut doc, ObjectType::FirewallRule)?;

        if let Some(endpoint) = &self.endpoint_1 {
            body.insert("endpoint_1".to_string(), endpoint.clone());
        }
        if let Some(endpoint) = &self.endpoint_2 {
            body.insert("endpoint_2".to_string(), endpoint.clone());
        }
        if let Some(action_list) = &self.action_list {
            body.insert("action_list".to_string(), action_list.clone());
        }
        if let Some(service) = &self.service {
            body.insert("service".to_string(), service.clone());
        }

        for key in ["endpoint_1", "endpoint_2"] {
            let endpoint = body.entry(key.to_string()).or_insert_with(|| json!({}));
            normalize_endpoint(endpoint);
        }
        if body.get("direction").is_none() {
            body.insert("direction".to_string(), json!("<>"));
        }
        if body.get("match_tag_types").is_none() {
            body.insert("match_tag_types".to_string(), json!({ "tag_type": [] }));
        }

        let service = body.entry("service".to_string()).or_insert_with(|| json!({}));
        if service.get("protocol").is_none() {
            service["protocol"] = json!("any");
        }
        if service.get("src_ports").is_none() {
            service["src_ports"] = json!({ "start_port": 0, "end_port": 65535 });
        }
        if service.get("dst_ports").is_none() {
            service["dst_ports"] = json!({ "start_port": 0, "end_port": 65535 });
        }

        Ok(doc)
    }
}
