use anyhow::Error;
use recpanel_client::ClientError;
use recpanel_config::ConfigError;
use recpanel_core::CoreError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    /// The server (or the connection to it) refused the action. The message
    /// is what the panel shows in its status region.
    #[error("{message}")]
    Remote { status: Option<u16>, message: String },
}

pub fn remote(status: Option<u16>, message: impl Into<String>) -> Error {
    CliError::Remote {
        status,
        message: message.into(),
    }
    .into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &Error) -> u8 {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return cli_exit_code(cli_err);
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
        if let Some(client_err) = cause.downcast_ref::<ClientError>() {
            return client_exit_code(client_err);
        }
        if let Some(_core_err) = cause.downcast_ref::<CoreError>() {
            return EXIT_INVALID_INPUT;
        }
    }
    EXIT_FAILURE
}

fn cli_exit_code(err: &CliError) -> u8 {
    match err {
        CliError::Remote { status, .. } => match status {
            Some(404) => EXIT_NOT_FOUND,
            Some(400) | Some(422) => EXIT_INVALID_INPUT,
            _ => EXIT_FAILURE,
        },
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InvalidBaseUrl(_)
        | ConfigError::InvalidTimeout(_)
        | ConfigError::InvalidUserAgent
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn client_exit_code(err: &ClientError) -> u8 {
    match err {
        ClientError::Unavailable(_) => EXIT_FAILURE,
        ClientError::InvalidBaseUrl(_) => EXIT_INVALID_INPUT,
        #[cfg(feature = "http")]
        ClientError::Http(_) => EXIT_FAILURE,
        #[cfg(feature = "http")]
        ClientError::Url(_) => EXIT_INVALID_INPUT,
    }
}

#[cfg(test)]
mod tests {
    use super::{exit_status, remote};
    use anyhow::anyhow;
    use recpanel_core::CoreError;

    #[test]
    fn remote_not_found_maps_to_exit_two() {
        let err = remote(Some(404), "Recommendation 9 not found");
        assert_eq!(exit_status(&err), 2);
    }

    #[test]
    fn rejected_request_maps_to_exit_three() {
        let err = remote(Some(400), "Invalid Query Product ID: x");
        assert_eq!(exit_status(&err), 3);
        assert_eq!(err.to_string(), "Invalid Query Product ID: x");
    }

    #[test]
    fn transport_failure_maps_to_exit_one() {
        let err = remote(None, "Server error!");
        assert_eq!(exit_status(&err), 1);
    }

    #[test]
    fn local_errors_map_to_exit_three() {
        let err = anyhow::Error::from(CoreError::MissingRecordId).context("get");
        assert_eq!(exit_status(&err), 3);
        assert_eq!(exit_status(&anyhow!("boom")), 1);
    }
}
