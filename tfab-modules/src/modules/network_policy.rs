//! network-policy module.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, ObjectType, ProjectScope};

/// Desired attributes of a network policy.
#[derive(Debug, Clone, Default)]
pub struct NetworkPolicyParams {
    pub name: String,
    pub scope: ProjectScope,
    /// Raw policy rule documents; unset fields default to a pass-any rule
    /// between the policy's networks.
    pub policy_rule: Option<Vec<Value>>,
}

impl NetworkPolicyParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

fn normalize_rule(rule: &mut Value) {
    if rule.get("direction").is_none() {
        rule["direction"] = json!("<>");
    }
    if rule.get("protocol").is_none() {
        rule["protocol"] = json!("any");
    }
    if rule.get("src_ports").is_none() {
        rule["src_ports"] = json!([{ "start_port": -1, "end_port": -1 }]);
    }
    if rule.get("dst_ports").is_none() {
        rule["dst_ports"] = json!([{ "start_port": -1, "end_port": -1 }]);
    }
    if rule.get("action_list").is_none() {
        rule["action_list"] = json!({ "simple_action": "pass" });
    }
}

#[async_trait]
impl ConfigObject for NetworkPolicyParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::NetworkPolicy
    }

    fn fq_name(&self) -> Vec<String> {
        self.scope.fq_name(&self.name)
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut doc = current.unwrap_or_else(|| {
            registry::base_document(ObjectType::NetworkPolicy, &self.fq_name(), Some("project"))
        });
        let body = registry::body_mut(&mut doc, ObjectType::NetworkPolicy)?;

        if let Some(rules) = &self.policy_rule {
            let mut rules = rules.clone();
            for rule in &mut rules {
                normalize_rule(rule);
            }
            body.insert(
                "network_policy_entries".to_string(),
                json!({ "policy_rule": rules }),
            );
        }

        Ok(doc)
    }
}
