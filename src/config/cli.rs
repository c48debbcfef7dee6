// Command line module
// Parses the three positional startup arguments: port, root directory, concurrency

use std::path::PathBuf;

use crate::error::StartupError;

/// Positional arguments given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub port: u16,
    pub root: PathBuf,
    pub concurrency: usize,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    ///
    /// Any count other than three yields `StartupError::Usage`.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, StartupError> {
        let [port, root, concurrency] = args else {
            return Err(StartupError::Usage);
        };

        Ok(Self {
            port: parse_number("port", port.as_ref())?,
            root: PathBuf::from(root.as_ref()),
            concurrency: parse_number("concurrency", concurrency.as_ref())?,
        })
    }
}

fn parse_number<T>(name: &'static str, value: &str) -> Result<T, StartupError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| StartupError::InvalidArgument {
            name,
            value: value.to_string(),
            reason: e.to_string(),
        })
}
