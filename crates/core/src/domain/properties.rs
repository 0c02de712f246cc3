use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ResourceKind;
use crate::error::{ProviderError, Result};

/// Keys injected by the orchestrator's transport that never reach an
/// external API.
pub const TRANSPORT_KEYS: &[&str] = &["ServiceToken"];

pub const MAX_TAG_KEY_LEN: usize = 128;
pub const MAX_TAG_VALUE_LEN: usize = 256;
pub const MAX_TAGS_PER_CALL: usize = 50;

/// String-keyed property map as supplied by the orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PropertyBag(BTreeMap<String, String>);

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Fetch a key that must be present and non-blank.
    pub fn require(&self, kind: ResourceKind, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            Some(_) => Err(ProviderError::invalid_properties(
                kind,
                format!("{} must not be empty", key),
            )),
            None => Err(ProviderError::invalid_properties(
                kind,
                format!("{} is required", key),
            )),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn without_transport_keys(&self) -> Self {
        self.0
            .iter()
            .filter(|(key, _)| !TRANSPORT_KEYS.contains(&key.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Every non-transport property as a flat, validated tag list in key
    /// order.
    pub fn to_tags(&self, kind: ResourceKind) -> Result<Vec<Tag>> {
        let tags: Vec<Tag> = self
            .without_transport_keys()
            .iter()
            .map(|(key, value)| Tag::new(key, value))
            .collect();

        if tags.len() > MAX_TAGS_PER_CALL {
            return Err(ProviderError::invalid_properties(
                kind,
                format!(
                    "{} tags exceed the limit of {}",
                    tags.len(),
                    MAX_TAGS_PER_CALL
                ),
            ));
        }

        for tag in &tags {
            tag.validate(kind)?;
        }

        Ok(tags)
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for PropertyBag {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for PropertyBag {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn validate(&self, kind: ResourceKind) -> Result<()> {
        let key_len = self.key.chars().count();
        if key_len == 0 || key_len > MAX_TAG_KEY_LEN {
            return Err(ProviderError::invalid_properties(
                kind,
                format!(
                    "tag key '{}' must be 1 to {} characters",
                    self.key, MAX_TAG_KEY_LEN
                ),
            ));
        }
        if self.value.chars().count() > MAX_TAG_VALUE_LEN {
            return Err(ProviderError::invalid_properties(
                kind,
                format!(
                    "tag value for '{}' exceeds {} characters",
                    self.key, MAX_TAG_VALUE_LEN
                ),
            ));
        }
        Ok(())
    }
}

fn validate_email_address(kind: ResourceKind, email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ProviderError::invalid_properties(
            kind,
            format!("'{}' is not a valid email address", email),
        ))
    }
}

/// Properties of an organization account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProperties {
    pub email: String,
    pub account_name: String,
    /// The whole property bag, `Email` and `AccountName` included.
    pub tags: Vec<Tag>,
}

impl AccountProperties {
    pub const EMAIL: &'static str = "Email";
    pub const ACCOUNT_NAME: &'static str = "AccountName";

    pub fn from_bag(bag: &PropertyBag) -> Result<Self> {
        let kind = ResourceKind::Account;
        let email = bag.require(kind, Self::EMAIL)?;
        validate_email_address(kind, email)?;
        let account_name = bag.require(kind, Self::ACCOUNT_NAME)?;

        Ok(Self {
            email: email.to_string(),
            account_name: account_name.to_string(),
            tags: bag.to_tags(kind)?,
        })
    }
}

/// Properties of an email identity awaiting verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailProperties {
    pub email: String,
}

impl EmailProperties {
    /// Both spellings are accepted; the stabilizer side has always sent the
    /// lower-case key.
    pub const EMAIL_KEYS: [&'static str; 2] = ["email", "Email"];

    pub fn from_bag(bag: &PropertyBag) -> Result<Self> {
        let kind = ResourceKind::EmailIdentity;
        let bag = bag.without_transport_keys();

        if let Some(unknown) = bag.keys().find(|key| !Self::EMAIL_KEYS.contains(key)) {
            return Err(ProviderError::invalid_properties(
                kind,
                format!("unknown property '{}'", unknown),
            ));
        }

        let mut addresses = Self::EMAIL_KEYS.iter().filter_map(|key| bag.get(key));
        let email = match (addresses.next(), addresses.next()) {
            (Some(a), Some(b)) if a != b => {
                return Err(ProviderError::invalid_properties(
                    kind,
                    format!("conflicting addresses '{}' and '{}'", a, b),
                ))
            }
            (Some(email), _) => email.trim(),
            (None, _) => {
                return Err(ProviderError::invalid_properties(kind, "email is required"))
            }
        };

        validate_email_address(kind, email)?;

        Ok(Self {
            email: email.to_string(),
        })
    }

    pub fn from_optional_bag(bag: Option<&PropertyBag>) -> Option<Self> {
        bag.and_then(|bag| Self::from_bag(bag).ok())
    }
}
