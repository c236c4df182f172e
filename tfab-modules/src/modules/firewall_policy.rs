//! firewall-policy module.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::{ConfigObject, resolve_required};
use crate::modules::firewall_rule::rule_fq_name;
use crate::registry::{self, ObjectType};

/// Desired attributes of a firewall policy: an ordered list of rules.
#[derive(Debug, Clone, Default)]
pub struct FirewallPolicyParams {
    pub name: String,
    pub domain: String,
    /// Project scope; `None` makes a global policy.
    pub project: Option<String>,
    /// Rule names, in evaluation order; all must already exist in the same
    /// scope as the policy.
    pub firewall_rules: Option<Vec<String>>,
}

impl FirewallPolicyParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: registry::DEFAULT_DOMAIN.to_string(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ConfigObject for FirewallPolicyParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::FirewallPolicy
    }

    fn fq_name(&self) -> Vec<String> {
        rule_fq_name(&self.domain, self.project.as_deref(), &self.name)
    }

    async fn render(&self, controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut rule_refs = Vec::new();
        if let Some(rules) = &self.firewall_rules {
            for (sequence, rule) in rules.iter().enumerate() {
                let fq = rule_fq_name(&self.domain, self.project.as_deref(), rule);
                let uuid = resolve_required(controller, ObjectType::FirewallRule, &fq).await?;
                rule_refs.push(json!({
                    "to": fq,
                    "uuid": uuid,
                    "attr": { "sequence": sequence.to_string() },
                }));
            }
        }

        let mut doc = current.unwrap_or_else(|| {
            let parent = if self.project.is_some() {
                "project"
            } else {
                "policy-management"
            };
            registry::base_document(ObjectType::FirewallPolicy, &self.fq_name(), Some(parent))
        });
        let body = registry::body_mut(&mut doc, ObjectType::FirewallPolicy)?;
        if self.firewall_rules.is_some() {
            body.insert("firewall_rule_refs".to_string(), json!(rule_refs));
        }

        Ok(doc)
    }
}
