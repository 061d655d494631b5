use itertools::Itertools;
use std::fmt::Display;

use crate::model::Stage;

/// Ordered query parameters for one request.
///
/// Parameters keep the order they were added in. Absent values are never
/// added, booleans become `true`/`false`, and values are stored unescaped;
/// escaping is left to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: &'static str, value: impl Display) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    pub fn opt<V: Display>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    pub fn flag(self, name: &'static str, value: bool) -> Self {
        self.param(name, value)
    }

    /// Add `value` only when it has non-whitespace content
    pub fn non_blank(self, name: &'static str, value: Option<&str>) -> Self {
        self.opt(name, value.filter(|v| !v.trim().is_empty()))
    }

    pub fn stage(self, stage: Stage) -> Self {
        self.param("stage", stage)
    }

    pub fn window(self, from: Option<u64>, size: Option<u64>) -> Self {
        self.opt("from", from).opt("size", size)
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Canonical `a=1&b=2` form, unescaped
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .join("&")
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Boolean toggles for instance reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstanceFlags {
    pub metadata: bool,
    pub return_alternatives: bool,
    pub return_permissions: bool,
    pub return_embedded: bool,
}

impl InstanceFlags {
    /// Everything the editor needs to open an instance for editing
    pub fn for_editing() -> Self {
        Self {
            metadata: true,
            return_alternatives: true,
            return_permissions: true,
            return_embedded: false,
        }
    }

    /// What list entries show: name, space, and the caller's permissions
    pub fn for_summary() -> Self {
        Self {
            metadata: true,
            return_permissions: true,
            ..Self::default()
        }
    }

    pub fn apply(&self, query: Query) -> Query {
        query
            .flag("metadata", self.metadata)
            .flag("returnAlternatives", self.return_alternatives)
            .flag("returnPermissions", self.return_permissions)
            .flag("returnEmbedded", self.return_embedded)
    }
}

/// Instance reads by id, single or bulk
pub fn instances_query(stage: Stage, flags: InstanceFlags) -> Query {
    flags.apply(Query::new().stage(stage))
}

/// Paged listing of a space
pub fn search_query(
    space: &str,
    type_name: Option<&str>,
    search_by_label: Option<&str>,
    from: Option<u64>,
    size: Option<u64>,
) -> Query {
    Query::new()
        .stage(Stage::InProgress)
        .flag("returnPermissions", true)
        .opt("type", type_name)
        .param("space", space)
        .opt("searchByLabel", search_by_label)
        .window(from, size)
}

/// Candidate values for one property of an instance
pub fn suggestion_query(
    property: &str,
    type_name: Option<&str>,
    search: Option<&str>,
    from: u64,
    size: u64,
) -> Query {
    Query::new()
        .stage(Stage::InProgress)
        .param("property", property)
        .param("from", from)
        .param("size", size)
        .non_blank("search", search)
        .non_blank("type", type_name)
}

/// Next window of instances linking to one instance through `property`
pub fn incoming_links_query(property: &str, type_name: &str, from: u64, size: u64) -> Query {
    Query::new()
        .stage(Stage::InProgress)
        .param("property", property)
        .param("type", type_name)
        .param("from", from)
        .param("size", size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_query_serializes_every_flag() {
        let query = instances_query(
            Stage::InProgress,
            InstanceFlags {
                metadata: false,
                return_alternatives: true,
                return_permissions: false,
                return_embedded: true,
            },
        );
        assert_eq!(
            query.to_query_string(),
            "stage=IN_PROGRESS&metadata=false&returnAlternatives=true\
             &returnPermissions=false&returnEmbedded=true"
        );
    }

    #[test]
    fn test_search_omits_absent_values() {
        let query = search_query("s", None, None, None, None);
        assert_eq!(query.to_query_string(), "stage=IN_PROGRESS&returnPermissions=true&space=s");
        assert!(!query.to_query_string().contains("from"));
        assert!(!query.to_query_string().contains("size"));
    }

    #[test]
    fn test_search_full_window() {
        let query = search_query("common", Some("Person"), Some("jane doe"), Some(20), Some(10));
        assert_eq!(
            query.to_query_string(),
            "stage=IN_PROGRESS&returnPermissions=true&type=Person&space=common\
             &searchByLabel=jane doe&from=20&size=10"
        );
    }

    #[test]
    fn test_suggestion_skips_blank_filters() {
        let query = suggestion_query("http://schema.org/author", Some("  "), Some(""), 0, 50);
        assert_eq!(
            query.to_query_string(),
            "stage=IN_PROGRESS&property=http://schema.org/author&from=0&size=50"
        );

        let query = suggestion_query("p", Some("T"), Some("neu"), 50, 50);
        assert_eq!(
            query.to_query_string(),
            "stage=IN_PROGRESS&property=p&from=50&size=50&search=neu&type=T"
        );
    }

    #[test]
    fn test_incoming_links_order() {
        let query = incoming_links_query("http://schema.org/author", "Person", 50, 50);
        assert_eq!(
            query.to_query_string(),
            "stage=IN_PROGRESS&property=http://schema.org/author&type=Person&from=50&size=50"
        );
    }

    #[test]
    fn test_summary_flags() {
        let query = instances_query(Stage::Released, InstanceFlags::for_summary());
        assert_eq!(
            query.to_query_string(),
            "stage=RELEASED&metadata=true&returnAlternatives=false\
             &returnPermissions=true&returnEmbedded=false"
        );
    }

    #[test]
    fn test_query_is_reproducible() {
        let a = search_query("s", Some("T"), None, Some(0), None);
        let b = search_query("s", Some("T"), None, Some(0), None);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_empty_query() {
        let query = Query::new().opt::<u64>("from", None);
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), "");
    }
}
