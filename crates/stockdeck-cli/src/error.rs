use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
///
/// Backend failures are not here: they are rendered as the page's error
/// state and reported through the envelope, exiting with code 3.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] stockdeck_core::ValidationError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

/// Exit code for a page whose backend load failed.
pub const GATEWAY_FAILURE_EXIT_CODE: u8 = 3;

#[cfg(test)]
mod tests {
    use super::*;
    use stockdeck_core::ValidationError;

    #[test]
    fn maps_categories_to_exit_codes() {
        assert_eq!(CliError::from(ValidationError::EmptySymbol).exit_code(), 2);
        assert_eq!(
            CliError::from(std::io::Error::other("closed pipe")).exit_code(),
            10
        );
    }
}
