//! Async tuple schema.

use futures::future::{join_all, try_join_all, BoxFuture, FutureExt};
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::info::ParseInfo;
use crate::path::PathItem;
use crate::{err, Parsed};

use super::pipe::{run_async, AsyncPipe};
use super::traits::{AsyncSchema, AsyncValueSchema};

/// The async rendition of the tuple schema.
///
/// Declared and rest positions go through the same concurrent join and the
/// same failure channel.
pub struct AsyncTupleSchema {
    items: Vec<Box<dyn AsyncValueSchema>>,
    rest: Option<Box<dyn AsyncValueSchema>>,
    pipe: AsyncPipe<Vec<Value>>,
    type_error_message: Option<String>,
}

impl AsyncTupleSchema {
    /// Creates an async tuple schema from its declared item schemas.
    pub fn new(items: Vec<Box<dyn AsyncValueSchema>>) -> Self {
        Self {
            items,
            rest: None,
            pipe: AsyncPipe::new(),
            type_error_message: None,
        }
    }

    /// Accepts extra trailing positions, each parsed through `rest`.
    pub fn rest<S: AsyncSchema + 'static>(mut self, rest: S) -> Self {
        self.rest = Some(Box::new(rest));
        self
    }

    /// Overrides the type-gate error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    fn length_matches(&self, len: usize) -> bool {
        match self.rest {
            Some(_) => len >= self.items.len(),
            None => len == self.items.len(),
        }
    }
}

impl AsyncSchema for AsyncTupleSchema {
    type Output = Vec<Value>;

    fn kind(&self) -> &'static str {
        "tuple"
    }

    fn reason(&self) -> Reason {
        Reason::Tuple
    }

    fn parse<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Vec<Value>>> {
        async move {
            let arr = match input.as_array() {
                Some(a) if self.length_matches(a.len()) => a,
                _ => {
                    let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                    return err(Issues::single(info.type_issue("tuple", message, input)));
                }
            };

            let tasks = arr.iter().enumerate().map(|(index, item)| {
                // The length gate guarantees a schema exists per position.
                let schema = self
                    .items
                    .get(index)
                    .unwrap_or_else(|| self.rest.as_ref().expect("length gate admits rest"));
                let child_info = info.descend(PathItem::tuple_index(input, index, item));
                async move { schema.parse_value(item, &child_info).await }
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

            run_async(output, &self.pipe, &info.validate_info(Reason::Tuple)).await
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

    fn pair() -> AsyncTupleSchema {
        AsyncTupleSchema::new(vec![
            Box::new(Assay::string().into_async()) as Box<dyn AsyncValueSchema>,
            Box::new(Assay::number().into_async()) as Box<dyn AsyncValueSchema>,
        ])
    }

    #[tokio::test]
    async fn test_positions_and_length_gate() {
        let output = pair()
            .parse(&json!(["id", 7]), &ParseInfo::new())
            .await
            .into_result()
            .unwrap();
        assert_eq!(output, vec![json!("id"), json!(7)]);

        let issues = pair()
            .parse(&json!(["id"]), &ParseInfo::new())
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(issues.first().validation, "tuple");
    }

    #[tokio::test]
    async fn test_rest_uses_same_failure_channel() {
        let schema = pair().rest(Assay::boolean().into_async());

        let issues = schema
            .parse(
                &json!([7, "id", "not-bool"]),
                &ParseInfo::new(),
            )
            .await
            .into_result()
            .unwrap_err();

        // Declared and rest failures arrive in one flat sequence.
        assert_eq!(issues.len(), 3);
        let paths: Vec<_> = issues.iter().map(|i| i.path.to_string()).collect();
        assert!(paths.contains(&"[2]".to_string()));
    }

    #[tokio::test]
    async fn test_abort_early_single_issue() {
        let issues = pair()
            .parse(&json!([7, "id"]), &ParseInfo::new().with_abort_early(true))
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(issues.len(), 1);
    }
}
