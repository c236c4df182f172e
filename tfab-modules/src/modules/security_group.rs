//! security-group module.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, ObjectType, ProjectScope};

/// Desired attributes of a security group.
#[derive(Debug, Clone, Default)]
pub struct SecurityGroupParams {
    pub name: String,
    pub scope: ProjectScope,
    /// Raw policy rule documents; unset fields get the controller's usual
    /// defaults (ingress from the local group, full port range).
    pub policy_rule: Option<Vec<Value>>,
}

impl SecurityGroupParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Fill the defaults the web UI applies to a security-group rule.
fn normalize_rule(rule: &mut Value) {
    if rule.get("direction").is_none() {
        rule["direction"] = json!(">");
    }
    if rule.get("src_addresses").is_none() {
        rule["src_addresses"] = json!([{ "security_group": "local" }]);
    }
    if rule.get("dst_addresses").is_none() {
        rule["dst_addresses"] = json!([{ "security_group": "local" }]);
    }
    if rule.get("src_ports").is_none() {
        rule["src_ports"] = json!([{ "start_port": 0, "end_port": 65535 }]);
    }
    if rule.get("dst_ports").is_none() {
        rule["dst_ports"] = json!([{ "start_port": 0, "end_port": 65535 }]);
    }
}

#[async_trait]
impl ConfigObject for SecurityGroupParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::SecurityGroup
    }

    fn fq_name(&self) -> Vec<String> {
        self.scope.fq_name(&self.name)
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(ObjectType::SecurityGroup, &self.fq_name(), Some("project"))
        });
        let body = registry::body_mut(&mut doc, ObjectType::SecurityGroup)?;

        if let Some(rules) = &self.policy_rule {
            let mut rules = rules.clone();
            for rule in &mut rules {
                normalize_rule(rule);
            }
            body.insert(
                "security_group_entries".to_string(),
                json!({ "policy_rule": rules }),
            );
        }

        Ok(doc)
    }
}
