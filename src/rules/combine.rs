// Rule combinators: sequencing, guarding, and async checks

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::common::{Record, ValidationContext};
use crate::rules::field::{is_empty_value, FieldRule};

pub const CHECK_FAILED_MESSAGE: &str = "Validation failed";

/// Runs rules in order and reports the first failure; later rules are not
/// invoked once one fails.
pub fn compose(rules: Vec<FieldRule>) -> FieldRule {
    FieldRule::new("composed", move |value, field, record, ctx| {
        for rule in &rules {
            if let Some(message) = rule.check(value, field, record, ctx) {
                return Some(message);
            }
        }
        None
    })
}

/// Runs the wrapped rule only when the predicate holds; otherwise passes.
pub fn when<P>(predicate: P, rule: FieldRule) -> FieldRule
where
    P: Fn(&Value, &str, &Record) -> bool + Send + Sync + 'static,
{
    FieldRule::new("conditional", move |value, field, record, ctx| {
        if predicate(value, field, record) {
            rule.check(value, field, record, ctx)
        } else {
            None
        }
    })
}

/// An external boolean check, such as a uniqueness probe against the
/// registry store. `Ok(true)` means the value is acceptable.
#[async_trait]
pub trait AsyncCheck: Send + Sync {
    async fn check(
        &self,
        value: &Value,
        field: &str,
        record: &Record,
        ctx: &ValidationContext,
    ) -> anyhow::Result<bool>;
}

/// Wraps an [`AsyncCheck`] as a field rule. Empty values skip the check. A
/// faulted check is logged with its cause and reported to the user as the
/// generic [`CHECK_FAILED_MESSAGE`].
pub struct AsyncRule {
    name: &'static str,
    message: String,
    check: Arc<dyn AsyncCheck>,
}

impl AsyncRule {
    pub fn new(
        name: &'static str,
        message: impl Into<String>,
        check: Arc<dyn AsyncCheck>,
    ) -> Self {
        Self {
            name,
            message: message.into(),
            check,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn run(
        &self,
        value: &Value,
        field: &str,
        record: &Record,
        ctx: &ValidationContext,
    ) -> Option<String> {
        if is_empty_value(value) {
            return None;
        }
        match self.check.check(value, field, record, ctx).await {
            Ok(true) => None,
            Ok(false) => Some(self.message.clone()),
            Err(e) => {
                warn!(rule = self.name, field, error = %e, "async validation check faulted");
                Some(CHECK_FAILED_MESSAGE.to_string())
            }
        }
    }
}
