//! JDBC connection URL resolution
//!
//! Hive URLs have the shape
//! `jdbc:<subprotocol>://host[:port][,host[:port]...][/database][;key=value...][?key=value...]`.
//! Several comma-separated hosts appear in HA and ZooKeeper discovery URLs.
//! The referenced named cluster is carried in the `pentahoNamedCluster`
//! property and resolved through a `NamedClusterService`.

use crate::cluster::{NamedCluster, NamedClusterService};
use crate::error::{Result, ShimError};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// URL property naming the referenced cluster
pub const NAMED_CLUSTER_PROPERTY: &str = "pentahoNamedCluster";

const JDBC_PREFIX: &str = "jdbc:";

/// A parsed JDBC URL bound to the service that resolves its cluster reference
#[derive(Clone)]
pub struct JdbcUrl {
    original: String,
    subprotocol: String,
    hosts: Vec<(String, Option<u16>)>,
    database: Option<String>,
    session_vars: Vec<(String, String)>,
    query_params: Vec<(String, String)>,
    clusters: Arc<dyn NamedClusterService>,
}

impl JdbcUrl {
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn subprotocol(&self) -> &str {
        &self.subprotocol
    }

    /// First host of the authority
    pub fn host(&self) -> Option<&str> {
        self.hosts.first().map(|(host, _)| host.as_str())
    }

    /// Port of the first host
    pub fn port(&self) -> Option<u16> {
        self.hosts.first().and_then(|(_, port)| *port)
    }

    /// Every `host[:port]` listed in the authority, in order
    pub fn hosts(&self) -> &[(String, Option<u16>)] {
        &self.hosts
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// `;`-separated properties following the path
    pub fn session_vars(&self) -> &[(String, String)] {
        &self.session_vars
    }

    pub fn session_var(&self, key: &str) -> Option<&str> {
        lookup(&self.session_vars, key)
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        lookup(&self.query_params, key)
    }

    /// Name of the referenced cluster, from the session vars or the query
    pub fn named_cluster_name(&self) -> Option<&str> {
        self.session_var(NAMED_CLUSTER_PROPERTY)
            .or_else(|| self.query_param(NAMED_CLUSTER_PROPERTY))
            .filter(|name| !name.is_empty())
    }

    /// Resolve the referenced cluster
    ///
    /// `Ok(None)` when the URL references no cluster. A reference to an
    /// unknown cluster is `ShimError::ClusterNotFound`.
    pub fn named_cluster(&self) -> Result<Option<NamedCluster>> {
        let Some(name) = self.named_cluster_name() else {
            return Ok(None);
        };
        match self.clusters.read(name)? {
            Some(cluster) => Ok(Some(cluster)),
            None => Err(ShimError::ClusterNotFound(name.to_string())),
        }
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

impl fmt::Display for JdbcUrl {
    /// Normalized form of the URL
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}://", JDBC_PREFIX, self.subprotocol)?;
        for (i, (host, port)) in self.hosts.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", host)?;
            if let Some(port) = port {
                write!(f, ":{}", port)?;
            }
        }
        if let Some(database) = &self.database {
            write!(f, "/{}", database)?;
        }
        for (key, value) in &self.session_vars {
            write!(f, ";{}={}", key, value)?;
        }
        for (i, (key, value)) in self.query_params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

impl fmt::Debug for JdbcUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JdbcUrl")
            .field("subprotocol", &self.subprotocol)
            .field("hosts", &self.hosts)
            .field("database", &self.database)
            .field("session_vars", &self.session_vars)
            .field("query_params", &self.query_params)
            .finish()
    }
}

/// Parses connection strings into `JdbcUrl`s
pub trait JdbcUrlParser: Send + Sync {
    fn parse(&self, url: &str) -> Result<JdbcUrl>;
}

/// Parser resolving cluster references against a `NamedClusterService`
#[derive(Clone)]
pub struct DefaultJdbcUrlParser {
    clusters: Arc<dyn NamedClusterService>,
}

impl DefaultJdbcUrlParser {
    pub fn new(clusters: Arc<dyn NamedClusterService>) -> Self {
        Self { clusters }
    }
}

impl JdbcUrlParser for DefaultJdbcUrlParser {
    fn parse(&self, url: &str) -> Result<JdbcUrl> {
        let rest = url
            .strip_prefix(JDBC_PREFIX)
            .ok_or_else(|| ShimError::InvalidUrl(format!("missing '{}' prefix: {}", JDBC_PREFIX, url)))?;

        let (location, session, query) = split_sections(rest);
        let Some((subprotocol, address)) = location.split_once("://") else {
            return Err(ShimError::InvalidUrl(format!(
                "expected <subprotocol>://<authority>: {}",
                url
            )));
        };
        let (authority, path) = match address.find('/') {
            Some(i) => address.split_at(i),
            None => (address, ""),
        };

        let mut hosts = Vec::new();
        for host in authority.split(',') {
            let parsed = Url::parse(&format!("{}://{}", subprotocol, host.trim()))?;
            if let Some(name) = parsed.host_str().filter(|h| !h.is_empty()) {
                hosts.push((name.to_string(), parsed.port()));
            }
        }
        let database = Some(path.trim_start_matches('/'))
            .filter(|db| !db.is_empty())
            .map(str::to_string);

        Ok(JdbcUrl {
            original: url.to_string(),
            subprotocol: subprotocol.to_string(),
            hosts,
            database,
            session_vars: parse_pairs(session, &[';']),
            query_params: parse_pairs(query, &['&', ';']),
            clusters: Arc::clone(&self.clusters),
        })
    }
}

/// Split into location, `;` session section and `?` query section
///
/// The location ends at the first `;` or `?`. Inside the session section a
/// `?` only starts the query when a `key=value` pair follows it, so session
/// values may contain `?`.
fn split_sections(rest: &str) -> (&str, Option<&str>, Option<&str>) {
    let Some(end) = rest.find([';', '?']) else {
        return (rest, None, None);
    };
    let (location, tail) = (&rest[..end], &rest[end + 1..]);
    if rest[end..].starts_with('?') {
        return (location, None, Some(tail));
    }
    let query_start = tail.match_indices('?').map(|(i, _)| i).find(|&i| {
        tail[i + 1..]
            .split([';', '&'])
            .next()
            .is_some_and(|pair| pair.contains('='))
    });
    match query_start {
        Some(i) => (location, Some(&tail[..i]), Some(&tail[i + 1..])),
        None => (location, Some(tail), None),
    }
}

fn parse_pairs(section: Option<&str>, separators: &[char]) -> Vec<(String, String)> {
    let Some(section) = section else {
        return Vec::new();
    };
    section
        .split(separators)
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (segment.trim().to_string(), String::new()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::InMemoryClusterService;

    fn parser() -> DefaultJdbcUrlParser {
        let clusters = InMemoryClusterService::with_clusters(vec![
            NamedCluster::new("prod").with_shim("cdh61"),
        ]);
        DefaultJdbcUrlParser::new(Arc::new(clusters))
    }

    #[test]
    fn test_parse_full_url() {
        let url = parser()
            .parse("jdbc:hive2://namenode:10000/sales;principal=hive/_HOST;pentahoNamedCluster=prod?hive.exec=1")
            .unwrap();
        assert_eq!(url.subprotocol(), "hive2");
        assert_eq!(url.host(), Some("namenode"));
        assert_eq!(url.port(), Some(10000));
        assert_eq!(url.database(), Some("sales"));
        assert_eq!(url.session_var("principal"), Some("hive/_HOST"));
        assert_eq!(url.query_param("hive.exec"), Some("1"));
        assert_eq!(url.named_cluster_name(), Some("prod"));
    }

    #[test]
    fn test_parse_host_only() {
        let url = parser().parse("jdbc:hive2://testUrl").unwrap();
        assert_eq!(url.host(), Some("testUrl"));
        assert_eq!(url.port(), None);
        assert_eq!(url.database(), None);
        assert!(url.session_vars().is_empty());
        assert_eq!(url.to_string(), "jdbc:hive2://testUrl");
    }

    #[test]
    fn test_normalized_display() {
        let url = parser()
            .parse("jdbc:hive2://h:10000/db; a = 1 ;;b=2")
            .unwrap();
        assert_eq!(url.to_string(), "jdbc:hive2://h:10000/db;a=1;b=2");
    }

    #[test]
    fn test_parse_failures() {
        let parser = parser();
        assert!(matches!(
            parser.parse("fake-url"),
            Err(ShimError::InvalidUrl(_))
        ));
        assert!(matches!(
            parser.parse("jdbc:hive2//test;AuthMech=0"),
            Err(ShimError::InvalidUrl(_))
        ));
        assert!(parser.parse("jdbc:hive2://host:notaport/db").is_err());
    }

    #[test]
    fn test_named_cluster_resolution() {
        let parser = parser();

        let url = parser
            .parse("jdbc:hive2://h;pentahoNamedCluster=prod")
            .unwrap();
        let cluster = url.named_cluster().unwrap().unwrap();
        assert_eq!(cluster.shim_identifier(), Some("cdh61"));

        let url = parser.parse("jdbc:hive2://h/db").unwrap();
        assert!(url.named_cluster().unwrap().is_none());

        let url = parser
            .parse("jdbc:hive2://h;pentahoNamedCluster=missing")
            .unwrap();
        assert!(matches!(
            url.named_cluster(),
            Err(ShimError::ClusterNotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_named_cluster_in_query() {
        let url = parser()
            .parse("jdbc:hive2://h/db?pentahoNamedCluster=prod")
            .unwrap();
        assert_eq!(url.named_cluster_name(), Some("prod"));
    }

    #[test]
    fn test_parse_multi_host_url() {
        let url = parser()
            .parse("jdbc:hive2://zk1:2181,zk2:2181,zk3/default;serviceDiscoveryMode=zooKeeper;zooKeeperNamespace=hiveserver2;pentahoNamedCluster=prod")
            .unwrap();
        assert_eq!(url.host(), Some("zk1"));
        assert_eq!(url.port(), Some(2181));
        assert_eq!(
            url.hosts(),
            &[
                ("zk1".to_string(), Some(2181)),
                ("zk2".to_string(), Some(2181)),
                ("zk3".to_string(), None),
            ]
        );
        assert_eq!(url.database(), Some("default"));
        assert_eq!(url.session_var("serviceDiscoveryMode"), Some("zooKeeper"));
        assert_eq!(
            url.named_cluster().unwrap().unwrap().shim_identifier(),
            Some("cdh61")
        );
        assert_eq!(
            url.to_string(),
            "jdbc:hive2://zk1:2181,zk2:2181,zk3/default;serviceDiscoveryMode=zooKeeper;zooKeeperNamespace=hiveserver2;pentahoNamedCluster=prod"
        );

        assert!(parser().parse("jdbc:hive2://zk1:2181,zk2:bad/default").is_err());
    }

    #[test]
    fn test_session_value_with_question_mark() {
        let url = parser()
            .parse("jdbc:hive2://h/db;principal=hive/_HOST@EXAMPLE.COM?x;pentahoNamedCluster=prod?hive.exec=1;hive.fetch=2")
            .unwrap();
        assert_eq!(url.session_var("principal"), Some("hive/_HOST@EXAMPLE.COM?x"));
        assert_eq!(url.named_cluster_name(), Some("prod"));
        assert_eq!(url.query_param("hive.exec"), Some("1"));
        assert_eq!(url.query_param("hive.fetch"), Some("2"));
    }
}
