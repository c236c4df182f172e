//! tag module.
//!
//! Tags encode `type=value` as the terminal fq-name segment; the bare name
//! is the value, the type is one of the predefined tag categories.

use async_trait::async_trait;
use serde_json::{Value, json};
use tfab_client::{Controller, Result};

use crate::apply::ConfigObject;
use crate::registry::{self, ObjectType};

/// Desired attributes of a tag.
#[derive(Debug, Clone)]
pub struct TagParams {
    /// The tag value.
    pub name: String,
    /// application, site, deployment, tier or label.
    pub tag_type: String,
    pub domain: String,
    /// Project scope; `None` makes a global tag.
    pub project: Option<String>,
}

impl TagParams {
    pub fn new(name: impl Into<String>, tag_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag_type: tag_type.into(),
            domain: registry::DEFAULT_DOMAIN.to_string(),
            project: None,
        }
    }

    fn terminal_segment(&self) -> String {
        format!("{}={}", self.tag_type, self.name)
    }
}

#[async_trait]
impl ConfigObject for TagParams {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tag
    }

    fn fq_name(&self) -> Vec<String> {
        match &self.project {
            Some(project) => vec![
                self.domain.clone(),
                project.clone(),
                self.terminal_segment(),
            ],
            None => vec![self.terminal_segment()],
        }
    }

    async fn render(&self, _controller: &Controller, current: Option<Value>) -> Result<Value> {
        let mut doc = current.unwrap_or_else(|| {
            let parent = self.project.as_ref().map(|_| "project");
            registry::base_document(ObjectType::Tag, &self.fq_name(), parent)
        });
        let body = registry::body_mut(&mut doc, ObjectType::Tag)?;
        body.insert("tag_type_name".to_string(), json!(self.tag_type));
        body.insert("tag_value".to_string(), json!(self.name));
        Ok(doc)
    }
}
