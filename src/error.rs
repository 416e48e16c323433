//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
include!(concat!(env!("OUT_DIR"), "/ua.rs"));

pub(crate) fn sdk_version() -> &'static str {
    SDK_VERSION
}

pub(crate) fn user_agent() -> &'static str {
    USER_AGENT
}

/// Error returned by all fallible operations in this library.
#[derive(Debug, Clone)]
pub struct MgmtError {
    pub code: MgmtErrorCode,
    pub message: String,
}

impl std::error::Error for MgmtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl std::fmt::Display for MgmtError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "code={:?} message=\"{}\"", self.code, self.message)
    }
}

impl MgmtError {
    pub fn new(code: MgmtErrorCode, msg: &str) -> MgmtError {
        MgmtError {
            code,
            message: msg.to_string(),
        }
    }

    pub(crate) fn illegal_state(msg: &str) -> MgmtError {
        MgmtError::new(MgmtErrorCode::IllegalState, msg)
    }
}

macro_rules! iv_error {
    ($($t:tt)*) => {{
        let m = format!($($t)*);
        MgmtError {
            code: crate::error::MgmtErrorCode::InvalidValue,
            message: format!("{} ({})", m, crate::error::sdk_version()),
        }
    }};
}

macro_rules! iv_err {
    ($($t:tt)*) => {{
        let m = format!($($t)*);
        Err(MgmtError {
            code: crate::error::MgmtErrorCode::InvalidValue,
            message: format!("{} ({})", m, crate::error::sdk_version()),
        })
    }};
}

pub(crate) use iv_err;

macro_rules! svc_err {
    ($($t:tt)*) => {{
        Err(MgmtError {
            code: crate::error::MgmtErrorCode::ServiceError,
            message: format!($($t)*),
        })
    }};
}

pub(crate) use svc_err;

impl From<reqwest::Error> for MgmtError {
    fn from(e: reqwest::Error) -> Self {
        let mut code = MgmtErrorCode::ServiceError;
        if e.is_timeout() {
            code = MgmtErrorCode::RequestTimeout;
        }
        MgmtError {
            code,
            message: format!("reqwest error: {} ({})", e, crate::error::sdk_version()),
        }
    }
}

impl From<diqwest::error::Error> for MgmtError {
    fn from(e: diqwest::error::Error) -> Self {
        MgmtError {
            code: MgmtErrorCode::ServiceError,
            message: format!(
                "digest auth error: {} ({})",
                e,
                crate::error::sdk_version()
            ),
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for MgmtError {
    fn from(e: reqwest::header::InvalidHeaderValue) -> Self {
        iv_error!("invalid header value: {}", e)
    }
}

impl From<url::ParseError> for MgmtError {
    fn from(e: url::ParseError) -> Self {
        iv_error!("error parsing url: {}", e)
    }
}

impl From<std::io::Error> for MgmtError {
    fn from(e: std::io::Error) -> Self {
        MgmtError {
            code: MgmtErrorCode::IoError,
            message: format!("io error: {} ({})", e, crate::error::sdk_version()),
        }
    }
}

impl From<serde_json::Error> for MgmtError {
    fn from(e: serde_json::Error) -> Self {
        MgmtError {
            code: MgmtErrorCode::IllegalState,
            message: format!("json error: {} ({})", e, crate::error::sdk_version()),
        }
    }
}

// MgmtErrorCode represents the error category.
//
// Local validation failures (InvalidValue) are raised before any network
// call is made. ServiceError carries the response body text of any HTTP
// response outside the accepted status set. A 404 on lookup or removal is
// never surfaced as an error; lookups yield None instead.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MgmtErrorCode {
    /// NoError represents there is no error.
    NoError,

    /// InvalidValue represents a locally-rejected value: an out-of-range
    /// integer or a token outside a closed set of accepted values. The
    /// entity being configured is left unchanged.
    InvalidValue,

    /// ServiceError represents an HTTP response with a status code outside
    /// the operation's accepted set. The message carries the response body.
    ServiceError,

    /// RequestTimeout represents a request that did not complete within
    /// the configured timeout.
    RequestTimeout,

    /// IoError represents a local filesystem or subprocess failure, raised
    /// by the bulk loaders before or instead of any HTTP call.
    IoError,

    /// IllegalState represents a response the server should not have sent,
    /// such as a listing document missing its expected structure.
    IllegalState,
}
