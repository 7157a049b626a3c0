/// Every problem found in one deserialization call, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .0.join("\n"))]
pub struct FieldErrors(Vec<String>);

impl FieldErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

/// Either the populated value or the complete list of field errors, never
/// both.
#[derive(Debug, Clone, PartialEq)]
pub struct DeserializeResult<T> {
    inner: Result<T, FieldErrors>,
}

impl<T> DeserializeResult<T> {
    pub fn success(data: T) -> Self {
        DeserializeResult { inner: Ok(data) }
    }

    /// `errors` must not be empty.
    pub fn failure(errors: Vec<String>) -> Self {
        debug_assert!(!errors.is_empty(), "failure without errors");
        DeserializeResult {
            inner: Err(FieldErrors(errors)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.inner.is_ok()
    }

    pub fn data(&self) -> Option<&T> {
        self.inner.as_ref().ok()
    }

    /// Empty on success.
    pub fn errors(&self) -> &[String] {
        match &self.inner {
            Ok(_) => &[],
            Err(errors) => errors.messages(),
        }
    }

    pub fn into_data(self) -> Option<T> {
        self.inner.ok()
    }

    pub fn into_result(self) -> Result<T, FieldErrors> {
        self.inner
    }
}

impl<T> From<DeserializeResult<T>> for Result<T, FieldErrors> {
    fn from(result: DeserializeResult<T>) -> Self {
        result.inner
    }
}
