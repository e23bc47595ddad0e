//! Delegating Hive driver
//!
//! Every shim registers one `HiveDriver` wrapping the vendor's Hive JDBC
//! driver. A `HiveDriver` only hands a URL to its vendor driver when the
//! cluster referenced by the URL belongs to its shim (or, for URLs without a
//! shim reference, when its shim is the active configuration). Everything
//! else is declined so the next registered driver can try.
//!
//! # Connect flow
//!
//! ```text
//! parse URL ──fail──────────────────────────────────▶ Declined
//!     │
//! resolve cluster ──fail────────────────────────────▶ Declined
//!     │
//! responsible? ──no─────────────────────────────────▶ Declined
//!     │
//! vendor accepts_url? ──no──────────────────────────▶ Declined
//!     │
//! vendor connect ──ok──▶ Accepted
//!                ──wrapped 0A000──▶ Declined
//!                ──other error────▶ Failed
//! ```

use super::driver::{Connection, Driver, DriverPropertyInfo, ParentLogger, Properties, UNKNOWN_VERSION};
use super::url::JdbcUrlParser;
use crate::cluster::{NamedCluster, ShimIdentity};
use crate::error::DriverError;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// URL parameter only understood by Simba Hive drivers
pub const SIMBA_SPECIFIC_URL_PARAMETER: &str = "AuthMech=";

/// Which family of vendor driver is wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverFlavor {
    /// Apache Hive driver; never takes Simba-specific URLs
    #[default]
    Apache,
    /// Simba Hive driver; only takes Simba-specific URLs
    Simba,
}

impl DriverFlavor {
    pub fn accepts_syntax(&self, url: &str) -> bool {
        let simba = url.contains(SIMBA_SPECIFIC_URL_PARAMETER);
        match self {
            DriverFlavor::Apache => !simba,
            DriverFlavor::Simba => simba,
        }
    }
}

/// Why a driver declined a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclineReason {
    /// No vendor driver is registered
    NoDelegate,
    /// The URL is meant for a different driver flavor
    VendorSpecificUrl,
    UnparsableUrl,
    ClusterLookupFailed,
    /// The URL's cluster belongs to another shim
    NotResponsible,
    /// The vendor driver does not accept the URL
    DelegateDeclined,
    /// The vendor driver reported the not-supported SQL state
    NotSupportedByVendor,
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeclineReason::NoDelegate => "no vendor driver",
            DeclineReason::VendorSpecificUrl => "url is for another driver flavor",
            DeclineReason::UnparsableUrl => "url could not be parsed",
            DeclineReason::ClusterLookupFailed => "named cluster lookup failed",
            DeclineReason::NotResponsible => "cluster belongs to another shim",
            DeclineReason::DelegateDeclined => "vendor driver declined",
            DeclineReason::NotSupportedByVendor => "vendor driver does not support url",
        };
        f.write_str(s)
    }
}

/// Result of one connect attempt
pub enum ConnectOutcome {
    Accepted(Box<dyn Connection>),
    Declined(DeclineReason),
    Failed(DriverError),
}

impl ConnectOutcome {
    /// Map to the `Driver::connect` convention: declines become `Ok(None)`.
    pub fn into_result(self) -> Result<Option<Box<dyn Connection>>, DriverError> {
        match self {
            ConnectOutcome::Accepted(conn) => Ok(Some(conn)),
            ConnectOutcome::Declined(_) => Ok(None),
            ConnectOutcome::Failed(err) => Err(err),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, ConnectOutcome::Accepted(_))
    }

    pub fn decline_reason(&self) -> Option<DeclineReason> {
        match self {
            ConnectOutcome::Declined(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Debug for ConnectOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectOutcome::Accepted(_) => f.write_str("Accepted(..)"),
            ConnectOutcome::Declined(reason) => f.debug_tuple("Declined").field(reason).finish(),
            ConnectOutcome::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

/// Hive driver that routes to one shim's vendor driver
///
/// Configured once and immutable afterwards; all per-call state stays on
/// the stack, so a `HiveDriver` is as thread-safe as its vendor driver.
pub struct HiveDriver {
    delegate: Option<Arc<dyn Driver>>,
    shim_id: Option<String>,
    default_configuration: bool,
    parser: Arc<dyn JdbcUrlParser>,
    flavor: DriverFlavor,
}

impl HiveDriver {
    pub fn new(
        delegate: Option<Arc<dyn Driver>>,
        shim_id: Option<String>,
        default_configuration: bool,
        parser: Arc<dyn JdbcUrlParser>,
    ) -> Self {
        Self {
            delegate,
            shim_id,
            default_configuration,
            parser,
            flavor: DriverFlavor::default(),
        }
    }

    /// Driver for the shim described by `identity`
    pub fn from_identity(
        delegate: Option<Arc<dyn Driver>>,
        identity: &ShimIdentity,
        parser: Arc<dyn JdbcUrlParser>,
    ) -> Self {
        Self::new(delegate, Some(identity.id.clone()), identity.active, parser)
    }

    pub fn with_flavor(mut self, flavor: DriverFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn shim_id(&self) -> Option<&str> {
        self.shim_id.as_deref()
    }

    pub fn is_default_configuration(&self) -> bool {
        self.default_configuration
    }

    pub fn flavor(&self) -> DriverFlavor {
        self.flavor
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// Whether this driver owns connections to `cluster`
    ///
    /// A cluster with a shim identifier is owned by the driver configured
    /// with that identifier, or by a default driver configured without one.
    /// Without a cluster or identifier, only the default configuration is
    /// responsible.
    pub fn is_responsible(&self, cluster: Option<&NamedCluster>) -> bool {
        match cluster.and_then(NamedCluster::shim_identifier) {
            Some(id) => match self.shim_id.as_deref() {
                Some(shim_id) => shim_id == id,
                None => self.default_configuration,
            },
            None => self.default_configuration,
        }
    }

    /// The vendor driver, if this driver is responsible for `url`
    fn active_delegate(&self, url: &str) -> Result<&Arc<dyn Driver>, DeclineReason> {
        let delegate = self.delegate.as_ref().ok_or(DeclineReason::NoDelegate)?;

        if !self.flavor.accepts_syntax(url) {
            return Err(DeclineReason::VendorSpecificUrl);
        }

        let jdbc_url = self.parser.parse(url).map_err(|e| {
            debug!(url, error = %e, "failed to parse jdbc url");
            DeclineReason::UnparsableUrl
        })?;

        let cluster = jdbc_url.named_cluster().map_err(|e| {
            debug!(url = %jdbc_url, error = %e, "failed to resolve named cluster");
            DeclineReason::ClusterLookupFailed
        })?;

        if !self.is_responsible(cluster.as_ref()) {
            return Err(DeclineReason::NotResponsible);
        }
        Ok(delegate)
    }

    /// Whether this driver takes `url`. Never fails; errors count as `false`.
    pub fn accepts(&self, url: &str) -> bool {
        let delegate = match self.active_delegate(url) {
            Ok(delegate) => delegate,
            Err(reason) => {
                debug!(url, shim = ?self.shim_id, %reason, "declined url");
                return false;
            }
        };
        match delegate.accepts_url(url) {
            Ok(accepted) => accepted,
            Err(e) => {
                debug!(url, error = %e, "vendor accepts_url failed");
                false
            }
        }
    }

    /// Attempt a connection through the vendor driver
    pub fn try_connect(&self, url: &str, properties: &Properties) -> ConnectOutcome {
        let delegate = match self.active_delegate(url) {
            Ok(delegate) => delegate,
            Err(reason) => {
                debug!(url, shim = ?self.shim_id, %reason, "declined connection");
                return ConnectOutcome::Declined(reason);
            }
        };

        match delegate.accepts_url(url) {
            Ok(true) => {}
            Ok(false) => return ConnectOutcome::Declined(DeclineReason::DelegateDeclined),
            Err(e) => {
                debug!(url, error = %e, "vendor accepts_url failed");
                return ConnectOutcome::Declined(DeclineReason::DelegateDeclined);
            }
        }

        match delegate.connect(url, properties) {
            Ok(Some(conn)) => ConnectOutcome::Accepted(conn),
            Ok(None) => ConnectOutcome::Declined(DeclineReason::DelegateDeclined),
            Err(e) if e.is_wrapped_not_supported() => {
                info!(url, shim = ?self.shim_id, error = %e, "vendor driver does not support url");
                ConnectOutcome::Declined(DeclineReason::NotSupportedByVendor)
            }
            Err(e) => ConnectOutcome::Failed(e),
        }
    }

    /// Vendor compliance, `false` when unknown
    pub fn is_jdbc_compliant(&self) -> bool {
        let Some(delegate) = &self.delegate else {
            return false;
        };
        delegate.jdbc_compliant().unwrap_or_else(|e| {
            debug!(error = %e, "vendor jdbc_compliant failed");
            false
        })
    }
}

impl Driver for HiveDriver {
    fn accepts_url(&self, url: &str) -> Result<bool, DriverError> {
        Ok(self.accepts(url))
    }

    fn connect(
        &self,
        url: &str,
        properties: &Properties,
    ) -> Result<Option<Box<dyn Connection>>, DriverError> {
        self.try_connect(url, properties).into_result()
    }

    fn property_info(
        &self,
        url: &str,
        properties: &Properties,
    ) -> Result<Option<Vec<DriverPropertyInfo>>, DriverError> {
        match &self.delegate {
            Some(delegate) => delegate.property_info(url, properties),
            None => Ok(None),
        }
    }

    fn major_version(&self) -> i32 {
        self.delegate
            .as_ref()
            .map(|d| d.major_version())
            .unwrap_or(UNKNOWN_VERSION)
    }

    fn minor_version(&self) -> i32 {
        self.delegate
            .as_ref()
            .map(|d| d.minor_version())
            .unwrap_or(UNKNOWN_VERSION)
    }

    fn jdbc_compliant(&self) -> Result<bool, DriverError> {
        Ok(self.is_jdbc_compliant())
    }

    /// Always fails with `FeatureNotSupported` when no logger is available
    fn parent_logger(&self) -> Result<ParentLogger, DriverError> {
        let Some(delegate) = &self.delegate else {
            return Err(DriverError::not_supported("no vendor driver registered"));
        };
        match delegate.parent_logger() {
            Ok(logger) => Ok(logger),
            Err(e) if e.is_feature_not_supported() => Err(e),
            Err(e) => Err(DriverError::FeatureNotSupported {
                message: e.to_string(),
                cause: Some(Box::new(e)),
            }),
        }
    }
}
