//! Port references shared by containers and services
//!
//! Kubernetes lets a container declare a port by name, by number, or both,
//! and lets a service target either form. Both representations live side by
//! side in the same list, so matching has to work across them.

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A symbolic or numeric port reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortRef {
    Numeric(i32),
    Named(String),
}

impl PortRef {
    /// Check whether two references point at the same port
    ///
    /// A named reference matches a numeric one when the name is the decimal
    /// form of the number. Snapshots written with every scalar quoted still
    /// correlate this way.
    pub fn matches(&self, other: &PortRef) -> bool {
        match (self, other) {
            (PortRef::Numeric(a), PortRef::Numeric(b)) => a == b,
            (PortRef::Named(a), PortRef::Named(b)) => a == b,
            (PortRef::Named(name), PortRef::Numeric(number))
            | (PortRef::Numeric(number), PortRef::Named(name)) => {
                name.trim().parse::<i32>().ok() == Some(*number)
            }
        }
    }

    /// Check whether this reference appears anywhere in `ports`
    pub fn is_in(&self, ports: &[PortRef]) -> bool {
        ports.iter().any(|port| self.matches(port))
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortRef::Numeric(number) => write!(f, "{}", number),
            PortRef::Named(name) => write!(f, "{}", name),
        }
    }
}

impl From<i32> for PortRef {
    fn from(number: i32) -> Self {
        PortRef::Numeric(number)
    }
}

impl From<&str> for PortRef {
    fn from(name: &str) -> Self {
        PortRef::Named(name.to_string())
    }
}

impl From<String> for PortRef {
    fn from(name: String) -> Self {
        PortRef::Named(name)
    }
}

impl From<&IntOrString> for PortRef {
    fn from(value: &IntOrString) -> Self {
        match value {
            IntOrString::Int(number) => PortRef::Numeric(*number),
            IntOrString::String(name) => PortRef::Named(name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_tag_matching() {
        assert!(PortRef::from(8080).matches(&PortRef::from(8080)));
        assert!(!PortRef::from(8080).matches(&PortRef::from(9090)));
        assert!(PortRef::from("http").matches(&PortRef::from("http")));
        assert!(!PortRef::from("http").matches(&PortRef::from("grpc")));
    }

    #[test]
    fn test_cross_tag_matching() {
        assert!(PortRef::from("8080").matches(&PortRef::from(8080)));
        assert!(PortRef::from(8080).matches(&PortRef::from("8080")));
        assert!(!PortRef::from("http").matches(&PortRef::from(80)));
    }

    #[test]
    fn test_is_in_mixed_list() {
        let ports = vec![PortRef::from("http"), PortRef::from(8080)];
        assert!(PortRef::from(8080).is_in(&ports));
        assert!(PortRef::from("http").is_in(&ports));
        assert!(!PortRef::from(9090).is_in(&ports));
        assert!(!PortRef::from(80).is_in(&[]));
    }

    #[test]
    fn test_yaml_scalars() {
        let ports: Vec<PortRef> = serde_yaml::from_str("[8080, http, '9090']").unwrap();
        assert_eq!(
            ports,
            vec![
                PortRef::Numeric(8080),
                PortRef::Named("http".to_string()),
                PortRef::Named("9090".to_string()),
            ]
        );
        let yaml = serde_yaml::to_string(&ports).unwrap();
        let reloaded: Vec<PortRef> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(reloaded, ports);
    }

    #[test]
    fn test_from_int_or_string() {
        assert_eq!(PortRef::from(&IntOrString::Int(80)), PortRef::Numeric(80));
        assert_eq!(
            PortRef::from(&IntOrString::String("web".to_string())),
            PortRef::Named("web".to_string())
        );
    }
}
