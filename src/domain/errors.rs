use std::fmt;

pub const INCOMPLETE_AUTHORIZATION: &str = "Incomplete Docker registry authorization credentials.";

#[derive(Debug)]
pub enum StepError {
    /// A server credential was configured but one of its required parts is missing.
    IncompleteAuthorization(String),
    Certificate(String),
    InvalidConfig(String),
    Settings(String),
    Connection(String),
    Docker(String),
    /// Failure surfaced to the caller of a step; `source` holds the cause.
    Execution { message: String, source: Box<StepError> },
}

impl StepError {
    pub fn incomplete_authorization(missing: &str) -> Self {
        StepError::IncompleteAuthorization(format!(
            "{} Please provide a {} for the configured server",
            INCOMPLETE_AUTHORIZATION, missing
        ))
    }

    pub fn execution(source: StepError) -> Self {
        StepError::Execution {
            message: "Exception caught".to_string(),
            source: Box::new(source),
        }
    }

    /// Innermost error of an `Execution` chain.
    pub fn root_cause(&self) -> &StepError {
        match self {
            StepError::Execution { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::IncompleteAuthorization(msg) => write!(f, "{}", msg),
            StepError::Certificate(msg) => write!(f, "Docker certificate error: {}", msg),
            StepError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            StepError::Settings(msg) => write!(f, "Settings error: {}", msg),
            StepError::Connection(msg) => write!(f, "Docker connection failed: {}", msg),
            StepError::Docker(msg) => write!(f, "Docker error: {}", msg),
            StepError::Execution { message, source } => write!(f, "{}: {}", message, source),
        }
    }
}

impl std::error::Error for StepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StepError::Execution { source, .. } => Some(&**source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StepError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_incomplete_authorization_message_prefix() {
        let err = StepError::incomplete_authorization("username");
        assert!(err.to_string().starts_with(INCOMPLETE_AUTHORIZATION));
    }

    #[test]
    fn test_execution_exposes_cause() {
        let err = StepError::execution(StepError::incomplete_authorization("email"));

        let cause = err.source().expect("execution error should carry a cause");
        assert!(cause.to_string().starts_with(INCOMPLETE_AUTHORIZATION));
        assert!(matches!(err.root_cause(), StepError::IncompleteAuthorization(_)));
    }
}
