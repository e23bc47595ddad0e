use thiserror::Error;

/// SQL state reported by Hive drivers that cannot serve a given URL.
pub const SQL_STATE_NOT_SUPPORTED: &str = "0A000";

#[derive(Error, Debug)]
pub enum ShimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Got a local filesystem for cluster '{cluster}', was expecting a distributed connection")]
    LocalFileSystem { cluster: String },

    #[error("Named cluster '{cluster}' has no HDFS host configured")]
    MissingHost { cluster: String },

    #[error("Invalid JDBC URL: {0}")]
    InvalidUrl(String),

    #[error("URL syntax error: {0}")]
    UrlSyntax(#[from] url::ParseError),

    #[error("Named cluster not found: {0}")]
    ClusterNotFound(String),

    #[error("Named cluster lookup failed: {0}")]
    ClusterLookup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("No suitable driver found for {0}")]
    NoSuitableDriver(String),
}

impl ShimError {
    /// True for the filesystem I/O family of failures.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ShimError::Io(_) | ShimError::LocalFileSystem { .. } | ShimError::MissingHost { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ShimError>;

/// Errors raised by vendor JDBC drivers.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("SQL error (state {state:?}): {message}")]
    Sql {
        message: String,
        state: Option<String>,
        vendor_code: i32,
    },

    #[error("Feature not supported: {message}")]
    FeatureNotSupported {
        message: String,
        #[source]
        cause: Option<Box<DriverError>>,
    },

    #[error("Runtime error: {message}")]
    Runtime {
        message: String,
        #[source]
        cause: Option<Box<DriverError>>,
    },
}

impl DriverError {
    pub fn sql(message: impl Into<String>, state: Option<&str>) -> Self {
        DriverError::Sql {
            message: message.into(),
            state: state.map(str::to_string),
            vendor_code: 0,
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        DriverError::Runtime {
            message: message.into(),
            cause: None,
        }
    }

    /// Wrap `cause` in a runtime error, the way vendor drivers surface
    /// checked SQL failures from unchecked code paths.
    pub fn wrapped(message: impl Into<String>, cause: DriverError) -> Self {
        DriverError::Runtime {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn not_supported(message: impl Into<String>) -> Self {
        DriverError::FeatureNotSupported {
            message: message.into(),
            cause: None,
        }
    }

    /// SQL state carried directly by this error, if any.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            DriverError::Sql { state, .. } => state.as_deref(),
            _ => None,
        }
    }

    /// A runtime error whose direct cause is a SQL error in the
    /// not-supported state.
    pub fn is_wrapped_not_supported(&self) -> bool {
        match self {
            DriverError::Runtime {
                cause: Some(cause), ..
            } => cause.sql_state() == Some(SQL_STATE_NOT_SUPPORTED),
            _ => false,
        }
    }

    pub fn is_feature_not_supported(&self) -> bool {
        matches!(self, DriverError::FeatureNotSupported { .. })
    }
}
