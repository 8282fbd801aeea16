// Utilities over validation results: merging, display helpers, and the
// async plumbing around whole-record validation (debounce, pipeline,
// timeout).

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use tracing::error;

use crate::common::{
    FieldIssue, Record, ValidationContext, ValidationFault, ValidationResult, PIPELINE_FIELD,
};
use crate::form::FormValidator;

pub const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";

/// Merges results left to right: error and warning maps union, later data
/// shallow-overrides earlier.
pub fn merge_all(results: Vec<ValidationResult>) -> ValidationResult {
    let mut merged = ValidationResult::new();
    for result in results {
        merged.merge(result);
    }
    merged
}

/// Flattens the error map into issue records for API responses. Entries
/// with blank messages are dropped.
pub fn flatten(result: &ValidationResult) -> Vec<FieldIssue> {
    result
        .errors()
        .iter()
        .filter(|(_, message)| !message.trim().is_empty())
        .map(|(field, message)| FieldIssue {
            field: field.clone(),
            message: message.clone(),
            code: VALIDATION_ERROR_CODE.to_string(),
        })
        .collect()
}

/// Drops error and warning entries whose messages are blank.
pub fn prune_blank(result: &ValidationResult) -> ValidationResult {
    let mut pruned = ValidationResult::new();
    for (field, message) in result.errors() {
        if !message.trim().is_empty() {
            pruned.add_error(field, message);
        }
    }
    for (field, message) in result.warnings() {
        if !message.trim().is_empty() {
            pruned.add_warning(field, message);
        }
    }
    if let Some(data) = result.data() {
        pruned.set_data(data.clone());
    }
    pruned
}

/// Turns a field key into display text: underscores become spaces, a space
/// goes before each interior capital, and the first letter is capitalized.
pub fn humanize_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (index, ch) in field.chars().enumerate() {
        if ch == '_' {
            out.push(' ');
        } else if ch.is_uppercase() && index > 0 {
            out.push(' ');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => out,
    }
}

/// One-line summary for status displays.
pub fn summarize(result: &ValidationResult) -> String {
    if !result.is_valid() {
        let n = result.error_count();
        format!("{} error{}", n, if n == 1 { "" } else { "s" })
    } else if result.has_warnings() {
        let n = result.warning_count();
        format!("Valid with {} warning{}", n, if n == 1 { "" } else { "s" })
    } else {
        "Valid".to_string()
    }
}

/// Delays a validation call and drops it when a newer call arrives during
/// the delay, for validate-as-you-type fields. A superseded call resolves
/// to `None`.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    seq: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn run<F, Fut>(&self, validate: F) -> Option<ValidationResult>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ValidationResult>,
    {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.seq.load(Ordering::SeqCst) != ticket {
            return None;
        }
        Some(validate().await)
    }
}

/// One stage of a validation pipeline: a whole-record validator that may
/// fault. Stages receive their own copy of the record and context.
pub type PipelineStage = Box<
    dyn Fn(Record, ValidationContext) -> BoxFuture<'static, anyhow::Result<ValidationResult>>
        + Send
        + Sync,
>;

/// Wraps a synchronous whole-record check as a pipeline stage.
pub fn sync_stage<F>(f: F) -> PipelineStage
where
    F: Fn(&Record, &ValidationContext) -> anyhow::Result<ValidationResult>
        + Send
        + Sync
        + 'static,
{
    Box::new(move |record, ctx| {
        let result = f(&record, &ctx);
        async move { result }.boxed()
    })
}

/// Wraps a form validator as a pipeline stage.
pub fn form_stage(validator: Arc<FormValidator>) -> PipelineStage {
    Box::new(move |record, ctx| {
        let validator = validator.clone();
        async move { Ok(validator.validate_async(&record, &ctx).await) }.boxed()
    })
}

/// Runs stages in order, stopping at the first invalid result. A faulted
/// stage is logged with its cause, recorded as a `_pipeline` error, and
/// halts the pipeline.
pub async fn run_pipeline(
    record: &Record,
    ctx: &ValidationContext,
    stages: &[PipelineStage],
) -> ValidationResult {
    let mut combined = ValidationResult::new();
    for stage in stages {
        match stage(record.clone(), ctx.clone()).await {
            Ok(result) => {
                let valid = result.is_valid();
                combined.merge(result);
                if !valid {
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "validation pipeline stage faulted");
                combined.add_error(PIPELINE_FIELD, "Validation pipeline failed");
                break;
            }
        }
    }
    combined
}

/// Races a validation future against a deadline. The loser keeps running to
/// completion with its result discarded; no cancellation is propagated.
pub async fn with_timeout<F>(
    validation: F,
    limit: Duration,
) -> Result<ValidationResult, ValidationFault>
where
    F: Future<Output = ValidationResult>,
{
    tokio::time::timeout(limit, validation)
        .await
        .map_err(|_| ValidationFault::Timeout)
}
