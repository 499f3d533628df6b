//! Positional job request parsing.
//!
//! A request is five fields joined by `&`, in order:
//! `port & image & memory & makespan & host`. Each field is percent-decoded
//! after splitting. Trailing extra fields are ignored.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::job::spec::{JobSpec, JobSpecError};

/// Field separator in a job request.
pub const FIELD_DELIMITER: char = '&';

/// Why a job request produced no worker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("field {0} is not valid percent-encoded UTF-8")]
    InvalidEncoding(&'static str),

    #[error("invalid port: {0:?}")]
    InvalidPort(String),

    #[error("invalid memory size: {0:?}")]
    InvalidMemory(String),

    #[error(transparent)]
    Spec(#[from] JobSpecError),
}

fn next_field<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<Cow<'a, str>, IntakeError> {
    let field = parts.next().ok_or(IntakeError::MissingField(name))?;
    percent_decode_str(field)
        .decode_utf8()
        .map_err(|_| IntakeError::InvalidEncoding(name))
}

/// Parse a raw job request into a `JobSpec`.
pub fn parse_job_request(raw: &str) -> Result<JobSpec, IntakeError> {
    let mut parts = raw.split(FIELD_DELIMITER);

    let port = next_field(&mut parts, "port")?;
    let image = next_field(&mut parts, "image")?;
    let memory = next_field(&mut parts, "memory")?;
    let makespan = next_field(&mut parts, "makespan")?;
    let host = next_field(&mut parts, "host")?;

    let port: u16 = port
        .parse()
        .map_err(|_| IntakeError::InvalidPort(port.to_string()))?;
    let memory: u64 = memory
        .parse()
        .map_err(|_| IntakeError::InvalidMemory(memory.to_string()))?;

    Ok(JobSpec::new(port, &image, memory, makespan, host)?)
}
