use ddd_es_domain::error::DomainError;
use ddd_es_domain::value_object::ValueObject;

/// 去除首尾空白后非空的文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NonBlank {
    field: &'static str,
    value: String,
}

impl NonBlank {
    pub(crate) fn parse(field: &'static str, raw: &str) -> Result<Self, DomainError> {
        let text = Self {
            field,
            value: raw.trim().to_string(),
        };
        text.validate()?;
        Ok(text)
    }

    pub(crate) fn into_inner(self) -> String {
        self.value
    }
}

impl ValueObject for NonBlank {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.value.is_empty() {
            return Err(DomainError::validation(format!(
                "{} must be not null or whitespace",
                self.field
            )));
        }
        Ok(())
    }
}
