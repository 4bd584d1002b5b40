use crate::{
    error::Error,
    query::Condition,
    types::Record,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Record types with no `statecode` attribute at all.
const STATECODELESS: &[&str] = &[
    "activityparty",
    "activitymimeattachment",
    "annotation",
    "annualfiscalcalendar",
    "attachment",
    "customeraddress",
    "invoicedetail",
    "listmember",
    "notification",
    "opportunityproduct",
    "post",
    "postcomment",
    "postfollow",
    "postlike",
    "quotedetail",
    "report",
    "resource",
    "role",
    "salesorderdetail",
    "site",
    "subject",
    "systemuser",
    "team",
];

/// Record types whose "active" spans more than state 0.
const MULTI_STATE: &[(&str, &[i32])] = &[
    ("activitypointer", &[0, 3]),
    ("appointment", &[0, 3]),
    ("quote", &[0, 1]),
    ("salesorder", &[0, 1]),
];

///
/// ActiveStates
///
/// Which `statecode` values count as "active" per record type. The default
/// table matches the platform as historically shipped; deployments with
/// custom state models override single rows instead of patching code.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActiveStates {
    stateless: BTreeSet<String>,
    states: BTreeMap<String, Vec<i32>>,
}

impl ActiveStates {
    /// Empty table: every record type falls through to `statecode = 0`.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            stateless: BTreeSet::new(),
            states: BTreeMap::new(),
        }
    }

    /// Marks the active `statecode` values of one record type.
    pub fn set_states<I>(&mut self, entity: impl Into<String>, states: I)
    where
        I: IntoIterator<Item = i32>,
    {
        let entity = entity.into();
        self.stateless.remove(&entity);
        self.states.insert(entity, states.into_iter().collect());
    }

    /// Marks one record type as having no `statecode` attribute.
    pub fn set_stateless(&mut self, entity: impl Into<String>) {
        let entity = entity.into();
        self.states.remove(&entity);
        self.stateless.insert(entity);
    }

    /// Active `statecode` values, `None` for statecodeless types.
    #[must_use]
    pub fn states_for(&self, entity: &str) -> Option<&[i32]> {
        if self.stateless.contains(entity) {
            return None;
        }
        Some(self.states.get(entity).map_or(&[0], Vec::as_slice))
    }

    /// condition_for
    /// Query condition restricting `entity` rows to active ones. `None`
    /// means the type has no status at all and the query must not filter.
    #[must_use]
    pub fn condition_for(&self, entity: &str) -> Option<Condition> {
        let states = self.states_for(entity)?;
        match states {
            [single] => Some(Condition::equal("statecode", *single)),
            many => Some(Condition::is_in("statecode", many.iter().copied())),
        }
    }

    /// is_active
    /// Whether a retrieved record is in an active state. Statecodeless
    /// types are always active; everything else must carry a readable
    /// `statecode` attribute.
    pub fn is_active(&self, record: &Record) -> Result<bool, Error> {
        let Some(states) = self.states_for(&record.entity) else {
            return Ok(true);
        };

        let state = record
            .get("statecode")
            .and_then(|value| value.as_state())
            .ok_or_else(|| Error::MissingAttribute {
                entity: record.entity.clone(),
                attribute: "statecode".to_string(),
            })?;

        Ok(states.contains(&state))
    }
}

impl Default for ActiveStates {
    fn default() -> Self {
        let mut table = Self::empty();
        for entity in STATECODELESS {
            table.stateless.insert((*entity).to_string());
        }
        for (entity, states) in MULTI_STATE {
            table.states.insert((*entity).to_string(), states.to_vec());
        }
        table
    }
}

///
/// TESTS
///
