//! In-memory traversal
//!
//! The [`Sanitize`] trait rewrites a value in place. String leaves go
//! through [`Sanitizer::sanitize_value`] with the path built on the way
//! down, so an in-memory model is redacted exactly like its XML form.
//!
//! Paths are built as follows:
//! - record fields: `parent.segment`, where the segment is the field's tag
//!   if one is registered, else the field name
//! - sequence elements: `parent[i]`
//! - map entries: `parent.key`
//!
//! Record types register their fields with [`sanitize_fields!`](crate::sanitize_fields).

use super::Sanitizer;
use crate::domain::Result;
use std::collections::{BTreeMap, HashMap};

/// A value that can be sanitized in place
pub trait Sanitize {
    /// Rewrite every string leaf reachable from `self`
    fn sanitize(&mut self, sanitizer: &mut Sanitizer, path: &str) -> Result<()>;
}

/// Join a parent path and a child segment with a dot
pub fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

/// Path of a sequence element
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

impl Sanitize for String {
    fn sanitize(&mut self, sanitizer: &mut Sanitizer, path: &str) -> Result<()> {
        let sanitized = sanitizer.sanitize_value(path, self);
        if sanitized != *self {
            *self = sanitized;
        }
        Ok(())
    }
}

impl<T: Sanitize> Sanitize for Option<T> {
    fn sanitize(&mut self, sanitizer: &mut Sanitizer, path: &str) -> Result<()> {
        match self {
            Some(inner) => inner.sanitize(sanitizer, path),
            None => Ok(()),
        }
    }
}

impl<T: Sanitize + ?Sized> Sanitize for Box<T> {
    fn sanitize(&mut self, sanitizer: &mut Sanitizer, path: &str) -> Result<()> {
        (**self).sanitize(sanitizer, path)
    }
}

impl<T: Sanitize> Sanitize for [T] {
    fn sanitize(&mut self, sanitizer: &mut Sanitizer, path: &str) -> Result<()> {
        for (index, item) in self.iter_mut().enumerate() {
            item.sanitize(sanitizer, &index_path(path, index))?;
        }
        Ok(())
    }
}

impl<T: Sanitize> Sanitize for Vec<T> {
    fn sanitize(&mut self, sanitizer: &mut Sanitizer, path: &str) -> Result<()> {
        self.as_mut_slice().sanitize(sanitizer, path)
    }
}

impl<T: Sanitize> Sanitize for BTreeMap<String, T> {
    fn sanitize(&mut self, sanitizer: &mut Sanitizer, path: &str) -> Result<()> {
        for (key, value) in self.iter_mut() {
            value.sanitize(sanitizer, &join_path(path, key))?;
        }
        Ok(())
    }
}

impl<T: Sanitize, S: std::hash::BuildHasher> Sanitize for HashMap<String, T, S> {
    fn sanitize(&mut self, sanitizer: &mut Sanitizer, path: &str) -> Result<()> {
        // Sorted so pseudonyms are handed out in a stable order
        let mut keys: Vec<String> = self.keys().cloned().collect();
        keys.sort();
        for key in keys {
            if let Some(value) = self.get_mut(&key) {
                value.sanitize(sanitizer, &join_path(path, &key))?;
            }
        }
        Ok(())
    }
}

impl Sanitize for serde_json::Value {
    fn sanitize(&mut self, sanitizer: &mut Sanitizer, path: &str) -> Result<()> {
        match self {
            serde_json::Value::String(s) => s.sanitize(sanitizer, path),
            serde_json::Value::Array(items) => items.sanitize(sanitizer, path),
            serde_json::Value::Object(map) => {
                for (key, value) in map.iter_mut() {
                    value.sanitize(sanitizer, &join_path(path, key))?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

macro_rules! impl_sanitize_noop {
    ($($ty:ty),*) => {
        $(
            impl Sanitize for $ty {
                fn sanitize(&mut self, _sanitizer: &mut Sanitizer, _path: &str) -> Result<()> {
                    Ok(())
                }
            }
        )*
    };
}

impl_sanitize_noop!(bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

/// Implement [`Sanitize`] for a record by listing its fields
///
/// A field may carry a tag (`field => "tag"`), which then replaces the
/// field name in the path. Fields that are not listed are not visited.
///
/// # Example
///
/// ```
/// use dossier_sanitizer::sanitize_fields;
/// use dossier_sanitizer::sanitizer::{Mode, Sanitizer};
///
/// struct User {
///     name: String,
///     password: String,
///     uid: u32,
/// }
///
/// sanitize_fields!(User { name, password => "password", uid });
///
/// let mut user = User { name: "root".into(), password: "hunter2".into(), uid: 0 };
/// let mut sanitizer = Sanitizer::new(Mode::Minimal);
/// sanitizer.sanitize_struct(&mut user)?;
/// assert_eq!(user.password, "[REDACTED-PASSWORD]");
/// assert_eq!(user.name, "root");
/// # Ok::<(), dossier_sanitizer::domain::SanitizerError>(())
/// ```
#[macro_export]
macro_rules! sanitize_fields {
    (@segment $field:ident => $tag:literal) => {
        $tag
    };
    (@segment $field:ident) => {
        stringify!($field)
    };
    ($ty:ty { $($field:ident $(=> $tag:literal)?),* $(,)? }) => {
        impl $crate::sanitizer::Sanitize for $ty {
            #[allow(unused_variables)]
            fn sanitize(
                &mut self,
                sanitizer: &mut $crate::sanitizer::Sanitizer,
                path: &str,
            ) -> $crate::domain::Result<()> {
                $(
                    let child = $crate::sanitizer::traverse::join_path(
                        path,
                        $crate::sanitize_fields!(@segment $field $(=> $tag)?),
                    );
                    $crate::sanitizer::Sanitize::sanitize(&mut self.$field, sanitizer, &child)?;
                )*
                Ok(())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitizer::Mode;
    use serde_json::json;

    struct Peer {
        name: String,
        endpoint: Option<String>,
        allowed: Vec<String>,
    }

    crate::sanitize_fields!(Peer { name, endpoint => "serveraddress", allowed => "tunneladdress" });

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "system"), "system");
        assert_eq!(join_path("system", "hostname"), "system.hostname");
        assert_eq!(index_path("dns", 2), "dns[2]");
    }

    #[test]
    fn test_record_with_tags() {
        let mut peer = Peer {
            name: "branch".to_string(),
            endpoint: Some("vpn.corp.com".to_string()),
            allowed: vec!["10.10.0.2".to_string(), "127.0.0.1".to_string()],
        };
        let mut sanitizer = Sanitizer::new(Mode::Aggressive);
        peer.sanitize(&mut sanitizer, "wireguard").unwrap();

        assert_eq!(peer.name, "branch");
        assert_eq!(peer.endpoint.as_deref(), Some("host-001.example.com"));
        assert_eq!(peer.allowed, vec!["10.10.X.1", "127.0.0.1"]);
        assert_eq!(sanitizer.stats().total_fields, 4);
    }

    #[test]
    fn test_hashmap_visits_in_key_order() {
        let mut map = HashMap::new();
        map.insert("b".to_string(), "9.9.9.9".to_string());
        map.insert("a".to_string(), "8.8.8.8".to_string());

        let mut sanitizer = Sanitizer::new(Mode::Moderate);
        map.sanitize(&mut sanitizer, "dns").unwrap();
        assert_eq!(map["a"], "[REDACTED-PUBLIC-IP-1]");
        assert_eq!(map["b"], "[REDACTED-PUBLIC-IP-2]");
    }

    #[test]
    fn test_json_value() {
        let mut value = json!({
            "system": {
                "hostname": "fw01",
                "dnsserver": ["1.1.1.1", "192.168.1.1"],
                "user": [{"name": "root", "password": "toor"}],
                "timeout": 30
            }
        });
        let mut sanitizer = Sanitizer::new(Mode::Moderate);
        value.sanitize(&mut sanitizer, "").unwrap();

        assert_eq!(value["system"]["hostname"], "host-001.example.com");
        assert_eq!(value["system"]["dnsserver"][0], "[REDACTED-PUBLIC-IP-1]");
        assert_eq!(value["system"]["dnsserver"][1], "192.168.1.1");
        assert_eq!(value["system"]["user"][0]["name"], "user-001");
        assert_eq!(value["system"]["user"][0]["password"], "[REDACTED-PASSWORD]");
        assert_eq!(value["system"]["timeout"], 30);
    }
}
