//! Async array schema.

use futures::future::{join_all, try_join_all, BoxFuture, FutureExt};
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::info::{ParseInfo, ValidateInfo};
use crate::path::PathItem;
use crate::pipe::actions;
use crate::{err, Parsed};

use super::pipe::{lift, run_async, AsyncPipe};
use super::traits::{AsyncSchema, AsyncValueSchema};

/// The async rendition of the array schema.
///
/// Items parse concurrently; the output vector is written in index order
/// regardless of completion order.
pub struct AsyncArraySchema {
    item: Box<dyn AsyncValueSchema>,
    pipe: AsyncPipe<Vec<Value>>,
    type_error_message: Option<String>,
}

impl AsyncArraySchema {
    /// Creates an async array schema from an async item schema.
    pub fn new<S: AsyncSchema + 'static>(item: S) -> Self {
        Self {
            item: Box::new(item),
            pipe: AsyncPipe::new(),
            type_error_message: None,
        }
    }

    /// Requires at least `min` elements.
    pub fn min_size(mut self, min: usize) -> Self {
        self.pipe.push(lift(actions::min_size(min)));
        self
    }

    /// Requires at most `max` elements.
    pub fn max_size(mut self, max: usize) -> Self {
        self.pipe.push(lift(actions::max_size(max)));
        self
    }

    /// Appends a custom action to the array-level pipe.
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Vec<Value>, &ValidateInfo) -> Parsed<Vec<Value>> + Send + Sync + 'static,
    {
        self.pipe.push(lift(actions::custom(check)));
        self
    }

    /// Overrides the type-gate error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the item schema.
    pub fn item(&self) -> &dyn AsyncValueSchema {
        self.item.as_ref()
    }
}

impl AsyncSchema for AsyncArraySchema {
    type Output = Vec<Value>;

    fn kind(&self) -> &'static str {
        "array"
    }

    fn reason(&self) -> Reason {
        Reason::Array
    }

    fn parse<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Vec<Value>>> {
        async move {
            let arr = match input.as_array() {
                Some(a) => a,
                None => {
                    let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                    return err(Issues::single(info.type_issue("array", message, input)));
                }
            };

            let tasks = arr.iter().enumerate().map(|(index, item)| {
                let child_info = info.descend(PathItem::array_index(input, index, item));
                async move { self.item.parse_value(item, &child_info).await }
            });

            let output = if info.abort_early() {
                let tasks = tasks.map(|task| async move {
                    match task.await {
                        Validation::Success(parsed) => Ok(parsed),
                        Validation::Failure(failure) => Err(failure),
                    }
                });
                match try_join_all(tasks).await {
                    Ok(output) => output,
                    Err(failure) => return err(failure),
                }
            } else {
                let results = join_all(tasks).await;
                let mut issues: Vec<Issue> = Vec::new();
                let mut output = Vec::with_capacity(results.len());
                for result in results {
                    match result {
                        Validation::Success(parsed) => output.push(parsed),
                        Validation::Failure(failure) => issues.extend(failure),
                    }
                }

                if !issues.is_empty() {
                    return err(Issues::from_vec(issues));
                }
                output
            };

            run_async(output, &self.pipe, &info.validate_info(Reason::Array)).await
        }
        .boxed()
    }

    fn parse_to_value<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Value>> {
        async move { self.parse(input, info).await.map(Value::Array) }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::IntoAsync;
    use crate::Assay;
    use serde_json::json;

    #[tokio::test]
    async fn test_preserves_index_order() {
        let schema = AsyncArraySchema::new(Assay::string().into_async());
        let output = schema
            .parse(&json!(["a", "b", "c"]), &ParseInfo::new())
            .await
            .into_result()
            .unwrap();
        assert_eq!(output, vec![json!("a"), json!("b"), json!("c")]);
    }

    #[tokio::test]
    async fn test_item_paths_and_accumulation() {
        let schema = AsyncArraySchema::new(Assay::number().min(0.0).into_async());
        let issues = schema
            .parse(&json!([-1, 2, -3]), &ParseInfo::new())
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(issues.len(), 2);
        let paths: Vec<_> = issues.iter().map(|i| i.path.to_string()).collect();
        assert!(paths.contains(&"[0]".to_string()));
        assert!(paths.contains(&"[2]".to_string()));
    }

    #[tokio::test]
    async fn test_size_bounds() {
        let schema = AsyncArraySchema::new(Assay::string().into_async()).min_size(2);
        let issues = schema
            .parse(&json!(["only"]), &ParseInfo::new())
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(issues.first().validation, "min_size");
    }
}
