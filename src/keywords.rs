//! Keyword specifications: which calls carry translatable messages.
//!
//! A keyword spec maps a callee name (`gettext`, `ngettext`, `_`, …) to a
//! [`RoleMap`] saying which argument holds the msgid, the plural form and the
//! context. User input arrives as a [`RawKeywordSpec`] in one of several
//! shapes and is normalized once, at construction; nothing downstream
//! branches on input shape.
//!
//! Accepted raw entry shapes:
//!
//! ```json
//! {
//!   "_":        [0],                          // msgid only
//!   "n_":       [0, 1],                       // msgid, msgid_plural
//!   "ngettext": ["msgid", "msgid_plural"],    // role names by position
//!   "pgettext": { "msgctxt": 0, "msgid": 1 }  // explicit roles
//! }
//! ```

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// A translation role an argument can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Msgid,
    MsgidPlural,
    Msgctxt,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Msgid => "msgid",
            Role::MsgidPlural => "msgid_plural",
            Role::Msgctxt => "msgctxt",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "msgid" => Ok(Role::Msgid),
            "msgid_plural" => Ok(Role::MsgidPlural),
            "msgctxt" => Ok(Role::Msgctxt),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical argument positions (0-based) for one keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleMap {
    pub msgid: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msgid_plural: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msgctxt: Option<usize>,
}

impl RoleMap {
    pub const fn singular(msgid: usize) -> Self {
        Self {
            msgid,
            msgid_plural: None,
            msgctxt: None,
        }
    }

    pub const fn plural(msgid: usize, msgid_plural: usize) -> Self {
        Self {
            msgid,
            msgid_plural: Some(msgid_plural),
            msgctxt: None,
        }
    }

    pub const fn with_context(self, msgctxt: usize) -> Self {
        Self {
            msgctxt: Some(msgctxt),
            ..self
        }
    }

    pub fn get(&self, role: Role) -> Option<usize> {
        match role {
            Role::Msgid => Some(self.msgid),
            Role::MsgidPlural => self.msgid_plural,
            Role::Msgctxt => self.msgctxt,
        }
    }

    /// Present roles with their positions, in role order.
    pub fn roles(&self) -> impl Iterator<Item = (Role, usize)> + '_ {
        [Role::Msgid, Role::MsgidPlural, Role::Msgctxt]
            .into_iter()
            .filter_map(|role| self.get(role).map(|position| (role, position)))
    }

    /// Number of roles assigned.
    pub fn role_count(&self) -> usize {
        self.roles().count()
    }

    fn from_named_positions<'a>(
        keyword: &str,
        named: impl IntoIterator<Item = (&'a str, usize)>,
    ) -> Result<Self, SpecError> {
        let mut positions: BTreeMap<Role, usize> = BTreeMap::new();
        for (name, position) in named {
            let role: Role = name.parse().map_err(|_| SpecError::UnknownRole {
                keyword: keyword.to_string(),
                role: name.to_string(),
            })?;
            if positions.contains_key(&role) {
                return Err(SpecError::DuplicateRole {
                    keyword: keyword.to_string(),
                    role: name.to_string(),
                });
            }
            if positions.values().any(|p| *p == position) {
                return Err(SpecError::SharedPosition {
                    keyword: keyword.to_string(),
                    position,
                });
            }
            positions.insert(role, position);
        }

        let msgid = positions
            .get(&Role::Msgid)
            .copied()
            .ok_or_else(|| SpecError::MissingMsgid {
                keyword: keyword.to_string(),
            })?;
        Ok(Self {
            msgid,
            msgid_plural: positions.get(&Role::MsgidPlural).copied(),
            msgctxt: positions.get(&Role::Msgctxt).copied(),
        })
    }
}

/// One user-supplied keyword entry, in any accepted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRoleSpec {
    /// `[msgid]` or `[msgid, msgid_plural]`
    Positions(Vec<usize>),
    /// `[role_at_0, role_at_1]`
    Names(Vec<String>),
    /// `{ role: position, … }`
    Roles(BTreeMap<String, usize>),
}

impl RawRoleSpec {
    /// Convert to canonical positions. `keyword` is only used in errors.
    pub fn normalize(&self, keyword: &str) -> Result<RoleMap, SpecError> {
        match self {
            RawRoleSpec::Positions(positions) => match positions.as_slice() {
                [msgid] => Ok(RoleMap::singular(*msgid)),
                [msgid, plural] if msgid == plural => Err(SpecError::SharedPosition {
                    keyword: keyword.to_string(),
                    position: *msgid,
                }),
                [msgid, plural] => Ok(RoleMap::plural(*msgid, *plural)),
                _ => Err(SpecError::PositionCount {
                    keyword: keyword.to_string(),
                    count: positions.len(),
                }),
            },
            RawRoleSpec::Names(names) => {
                if names.len() != 2 {
                    return Err(SpecError::RoleNameCount {
                        keyword: keyword.to_string(),
                        count: names.len(),
                    });
                }
                RoleMap::from_named_positions(
                    keyword,
                    names.iter().enumerate().map(|(i, name)| (name.as_str(), i)),
                )
            }
            RawRoleSpec::Roles(roles) => RoleMap::from_named_positions(
                keyword,
                roles.iter().map(|(name, position)| (name.as_str(), *position)),
            ),
        }
    }
}

impl From<RoleMap> for RawRoleSpec {
    fn from(map: RoleMap) -> Self {
        RawRoleSpec::Roles(
            map.roles()
                .map(|(role, position)| (role.as_str().to_string(), position))
                .collect(),
        )
    }
}

/// User-supplied keyword table, before normalization.
pub type RawKeywordSpec = BTreeMap<String, RawRoleSpec>;

/// Built-in gettext keyword families.
const DEFAULT_KEYWORDS: &[(&str, RoleMap)] = &[
    ("_", RoleMap::singular(0)),
    ("gettext", RoleMap::singular(0)),
    ("dgettext", RoleMap::singular(1)),
    ("dcgettext", RoleMap::singular(1)),
    ("ngettext", RoleMap::plural(0, 1)),
    ("dngettext", RoleMap::plural(1, 2)),
    ("dcngettext", RoleMap::plural(1, 2)),
    ("pgettext", RoleMap::singular(1).with_context(0)),
    ("dpgettext", RoleMap::singular(2).with_context(1)),
    ("dcpgettext", RoleMap::singular(2).with_context(1)),
    ("npgettext", RoleMap::plural(1, 2).with_context(0)),
    ("dnpgettext", RoleMap::plural(2, 3).with_context(1)),
    ("dcnpgettext", RoleMap::plural(2, 3).with_context(1)),
];

/// Normalized keyword table: callee name to role positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeywordSpec {
    entries: BTreeMap<String, RoleMap>,
}

impl Default for KeywordSpec {
    fn default() -> Self {
        Self {
            entries: DEFAULT_KEYWORDS
                .iter()
                .map(|(name, map)| (name.to_string(), *map))
                .collect(),
        }
    }
}

/// Normalize a raw spec. `None` yields the built-in table; an explicit spec
/// replaces it entirely.
pub fn normalize(raw: Option<&RawKeywordSpec>) -> Result<KeywordSpec, SpecError> {
    match raw {
        None => Ok(KeywordSpec::default()),
        Some(raw) => KeywordSpec::from_raw(raw),
    }
}

impl KeywordSpec {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn from_raw(raw: &RawKeywordSpec) -> Result<Self, SpecError> {
        let mut spec = Self::empty();
        spec.overlay(raw)?;
        Ok(spec)
    }

    /// Built-in table with `raw` entries laid over it.
    pub fn with_defaults(raw: &RawKeywordSpec) -> Result<Self, SpecError> {
        let mut spec = Self::default();
        spec.overlay(raw)?;
        Ok(spec)
    }

    /// Add or replace entries. On error, `self` is left unchanged.
    pub fn overlay(&mut self, raw: &RawKeywordSpec) -> Result<(), SpecError> {
        let normalized = raw
            .iter()
            .map(|(name, entry)| entry.normalize(name).map(|map| (name.clone(), map)))
            .collect::<Result<Vec<_>, _>>()?;
        self.entries.extend(normalized);
        Ok(())
    }

    pub fn insert(&mut self, name: impl Into<String>, map: RoleMap) {
        self.entries.insert(name.into(), map);
    }

    pub fn get(&self, name: &str) -> Option<&RoleMap> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoleMap)> {
        self.entries.iter().map(|(name, map)| (name.as_str(), map))
    }

    /// Back to raw form, e.g. for writing a config file.
    pub fn to_raw(&self) -> RawKeywordSpec {
        self.entries
            .iter()
            .map(|(name, map)| (name.clone(), RawRoleSpec::from(*map)))
            .collect()
    }
}

/// A keyword given on the command line as `NAME[:SPEC]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordDefinition {
    pub name: String,
    pub spec: RawRoleSpec,
}

impl FromStr for KeywordDefinition {
    type Err = SpecError;

    /// Accepted forms:
    /// - `name`: msgid at position 0
    /// - `name:1` / `name:1,2`: positions, as in the array form
    /// - `name:msgctxt=0,msgid=1`: explicit roles
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SpecError::InvalidDefinition(s.to_string());
        let (name, spec) = match s.split_once(':') {
            Some((name, spec)) => (name.trim(), Some(spec.trim())),
            None => (s.trim(), None),
        };
        if name.is_empty() {
            return Err(invalid());
        }

        let spec = match spec {
            None => RawRoleSpec::Positions(vec![0]),
            Some(spec) if spec.contains('=') => {
                let mut roles = BTreeMap::new();
                for part in spec.split(',') {
                    let (role, position) = part.split_once('=').ok_or_else(invalid)?;
                    let position = position.trim().parse::<usize>().map_err(|_| invalid())?;
                    if roles.insert(role.trim().to_string(), position).is_some() {
                        return Err(SpecError::DuplicateRole {
                            keyword: name.to_string(),
                            role: role.trim().to_string(),
                        });
                    }
                }
                RawRoleSpec::Roles(roles)
            }
            Some(spec) => RawRoleSpec::Positions(
                spec.split(',')
                    .map(|p| p.trim().parse::<usize>().map_err(|_| invalid()))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        // reject malformed shapes at parse time
        spec.normalize(name)?;
        Ok(Self {
            name: name.to_string(),
            spec,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(entries: &[(&str, RawRoleSpec)]) -> RawKeywordSpec {
        entries
            .iter()
            .map(|(name, spec)| (name.to_string(), spec.clone()))
            .collect()
    }

    fn roles(pairs: &[(&str, usize)]) -> RawRoleSpec {
        RawRoleSpec::Roles(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }

    #[test]
    fn test_default_spec_is_not_empty() {
        let spec = normalize(None).unwrap();
        assert!(!spec.is_empty());
        assert!(spec.get("gettext").unwrap().role_count() > 0);
        assert_eq!(spec.get("ngettext"), Some(&RoleMap::plural(0, 1)));
        assert_eq!(
            spec.get("npgettext"),
            Some(&RoleMap::plural(1, 2).with_context(0))
        );
    }

    #[test]
    fn test_single_position() {
        let spec = normalize(Some(&raw(&[("_", RawRoleSpec::Positions(vec![0]))]))).unwrap();
        assert_eq!(spec.len(), 1);
        assert_eq!(spec.get("_"), Some(&RoleMap::singular(0)));
    }

    #[test]
    fn test_two_positions() {
        let spec = normalize(Some(&raw(&[("n_", RawRoleSpec::Positions(vec![0, 1]))]))).unwrap();
        assert_eq!(spec.get("n_"), Some(&RoleMap::plural(0, 1)));
    }

    #[test]
    fn test_positions_are_assigned_in_order() {
        let spec = normalize(Some(&raw(&[("n_", RawRoleSpec::Positions(vec![2, 1]))]))).unwrap();
        let map = spec.get("n_").unwrap();
        assert_eq!(map.role_count(), 2);
        assert_eq!(map.msgid, 2);
        assert_eq!(map.msgid_plural, Some(1));

        let spec = normalize(Some(&raw(&[("n_", RawRoleSpec::Positions(vec![1, 2]))]))).unwrap();
        let map = spec.get("n_").unwrap();
        assert_eq!(map.role_count(), 2);
        assert_eq!(map.msgid, 1);
        assert_eq!(map.msgid_plural, Some(2));
    }

    #[test]
    fn test_role_name_array() {
        let names = RawRoleSpec::Names(vec!["msgid".into(), "msgid_plural".into()]);
        let spec = normalize(Some(&raw(&[("ngettext", names)]))).unwrap();
        let map = spec.get("ngettext").unwrap();
        assert_eq!(map.role_count(), 2);
        assert_eq!(map.msgid, 0);
        assert_eq!(map.msgid_plural, Some(1));
    }

    #[test]
    fn test_object_form_passes_through() {
        let spec = normalize(Some(&raw(&[(
            "npgettext",
            roles(&[("msgctxt", 0), ("msgid", 1), ("msgid_plural", 2)]),
        )])))
        .unwrap();
        assert_eq!(
            spec.get("npgettext"),
            Some(&RoleMap::plural(1, 2).with_context(0))
        );
    }

    #[test]
    fn test_explicit_spec_replaces_defaults() {
        let spec = normalize(Some(&raw(&[("_", RawRoleSpec::Positions(vec![0]))]))).unwrap();
        assert!(!spec.contains("gettext"));
    }

    #[test]
    fn test_with_defaults_overlays() {
        let spec =
            KeywordSpec::with_defaults(&raw(&[("_", RawRoleSpec::Positions(vec![1, 2]))])).unwrap();
        assert!(spec.contains("gettext"));
        assert_eq!(spec.get("_"), Some(&RoleMap::plural(1, 2)));
    }

    #[test]
    fn test_normalize_does_not_mutate_input() {
        let input = raw(&[("_", RawRoleSpec::Positions(vec![2, 1]))]);
        let before = input.clone();
        normalize(Some(&input)).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_malformed_shapes_are_rejected() {
        let cases = [
            RawRoleSpec::Positions(vec![]),
            RawRoleSpec::Positions(vec![0, 1, 2]),
            RawRoleSpec::Positions(vec![1, 1]),
            RawRoleSpec::Names(vec!["msgid".into()]),
            RawRoleSpec::Names(vec!["msgid".into(), "msgid".into()]),
            RawRoleSpec::Names(vec!["msgid".into(), "domain".into()]),
            roles(&[("msgid_plural", 1)]),
            roles(&[("msgid", 0), ("msgctxt", 0)]),
        ];
        for case in cases {
            assert!(
                normalize(Some(&raw(&[("k", case.clone())]))).is_err(),
                "{case:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_error_names_keyword() {
        let err = normalize(Some(&raw(&[("bad", RawRoleSpec::Positions(vec![]))]))).unwrap_err();
        assert_eq!(
            err,
            SpecError::PositionCount {
                keyword: "bad".into(),
                count: 0
            }
        );
    }

    #[test]
    fn test_failed_overlay_leaves_spec_unchanged() {
        let mut spec = KeywordSpec::default();
        let before = spec.clone();
        let input = raw(&[
            ("a", RawRoleSpec::Positions(vec![0])),
            ("b", RawRoleSpec::Positions(vec![])),
        ]);
        assert!(spec.overlay(&input).is_err());
        assert_eq!(spec, before);
    }

    #[test]
    fn test_deserialize_all_shapes() {
        let input: RawKeywordSpec = serde_json::from_str(
            r#"{
                "_": [0],
                "n_": [2, 1],
                "ngettext": ["msgid", "msgid_plural"],
                "pgettext": {"msgctxt": 0, "msgid": 1}
            }"#,
        )
        .unwrap();
        assert_eq!(input["_"], RawRoleSpec::Positions(vec![0]));
        assert_eq!(input["n_"], RawRoleSpec::Positions(vec![2, 1]));
        assert!(matches!(input["ngettext"], RawRoleSpec::Names(_)));
        assert!(matches!(input["pgettext"], RawRoleSpec::Roles(_)));

        let spec = normalize(Some(&input)).unwrap();
        assert_eq!(spec.get("pgettext"), Some(&RoleMap::singular(1).with_context(0)));
    }

    #[test]
    fn test_serialize_canonical_form() {
        let mut spec = KeywordSpec::empty();
        spec.insert("_", RoleMap::singular(0));
        spec.insert("n_", RoleMap::plural(0, 1));
        assert_eq!(
            serde_json::to_string(&spec).unwrap(),
            r#"{"_":{"msgid":0},"n_":{"msgid":0,"msgid_plural":1}}"#
        );
    }

    #[test]
    fn test_raw_round_trip_of_defaults() {
        let spec = KeywordSpec::default();
        assert_eq!(KeywordSpec::from_raw(&spec.to_raw()).unwrap(), spec);
    }

    #[test]
    fn test_keyword_definition_forms() {
        let def: KeywordDefinition = "t".parse().unwrap();
        assert_eq!(def.name, "t");
        assert_eq!(def.spec, RawRoleSpec::Positions(vec![0]));

        let def: KeywordDefinition = "nt:0,1".parse().unwrap();
        assert_eq!(def.spec, RawRoleSpec::Positions(vec![0, 1]));

        let def: KeywordDefinition = "pt:msgctxt=0,msgid=1".parse().unwrap();
        assert_eq!(
            def.spec.normalize("pt").unwrap(),
            RoleMap::singular(1).with_context(0)
        );
    }

    #[test]
    fn test_keyword_definition_errors() {
        for input in [":0", "t:x", "t:0,1,2", "t:msgid=a", "t:msgctxt=0", "t:msgid=0,msgid=1"] {
            assert!(input.parse::<KeywordDefinition>().is_err(), "{input}");
        }
    }
}
