//! Property keys used by the remote graph store.

pub const ID: &str = "@id";
pub const TYPE: &str = "@type";

pub const SCHEMA_NAME: &str = "http://schema.org/name";
pub const SCHEMA_IDENTIFIER: &str = "http://schema.org/identifier";
pub const SCHEMA_ALTERNATE_NAME: &str = "http://schema.org/alternateName";
pub const SCHEMA_GIVEN_NAME: &str = "http://schema.org/givenName";
pub const SCHEMA_FAMILY_NAME: &str = "http://schema.org/familyName";
pub const SCHEMA_EMAIL: &str = "http://schema.org/email";
pub const SCHEMA_DESCRIPTION: &str = "http://schema.org/description";

/// Keys in the store's metadata namespace
macro_rules! meta {
    ($name:ident, $suffix:literal) => {
        pub const $name: &str = concat!("https://core.kg.ebrains.eu/vocab/meta/", $suffix);
    };
}

meta!(META_SPACE, "space");
meta!(META_PERMISSIONS, "permissions");
meta!(META_ALTERNATIVE, "alternative");
meta!(META_EMBEDDED, "embedded");
meta!(META_CREATED_AT, "createdAt");
meta!(META_LAST_MODIFIED_AT, "lastModifiedAt");
meta!(META_PICTURE, "picture");
meta!(META_AUTORELEASE, "autorelease");
meta!(META_CLIENT_SPACE, "clientSpace");
meta!(META_TYPE_COLOR, "color");
meta!(META_TYPE_LABEL_PROPERTY, "type/labelProperty");
meta!(META_OCCURRENCES, "occurrences");
