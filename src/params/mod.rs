//! Table Parameters
//!
//! The four control parameters {page, sort, dir, active} and their query
//! string form. The navigation location is the source of truth; these types
//! only decode it and encode updates back.
//!
//! Wire schema: `page` (omitted at 1), `sort` (omitted when unset), `dir`
//! (`asc`|`desc`, only alongside `sort`), `active` (`all`|`true`|`false`,
//! omitted at `all`). Malformed values degrade to their defaults.

pub mod navigation;
pub mod store;

use crate::tree::index::ActiveFilter;
use crate::tree::sort::{SortDirection, SortSpec};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::form_urlencoded;

pub use navigation::{
    FileNavigation, History, MemoryNavigation, Navigation, NavigationEvent, SubscriptionId,
};
pub use store::ParamStore;

pub const PAGE_KEY: &str = "page";
pub const SORT_KEY: &str = "sort";
pub const DIR_KEY: &str = "dir";
pub const ACTIVE_KEY: &str = "active";

const OWNED_KEYS: [&str; 4] = [PAGE_KEY, SORT_KEY, DIR_KEY, ACTIVE_KEY];

/// Decoded control parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableParams {
    /// 1-based requested page
    pub page: usize,
    pub sort: Option<String>,
    pub dir: SortDirection,
    pub active: ActiveFilter,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            page: 1,
            sort: None,
            dir: SortDirection::Asc,
            active: ActiveFilter::All,
        }
    }
}

/// Partial update merged over the current parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamUpdate {
    pub page: Option<usize>,
    /// `Some(None)` clears the sort key
    pub sort: Option<Option<String>>,
    pub dir: Option<SortDirection>,
    pub active: Option<ActiveFilter>,
}

impl ParamUpdate {
    pub fn page(page: usize) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn sort(key: Option<String>, dir: SortDirection) -> Self {
        Self {
            sort: Some(key),
            dir: Some(dir),
            ..Self::default()
        }
    }

    /// Filter change; always lands back on page 1.
    pub fn filter(active: ActiveFilter) -> Self {
        Self {
            page: Some(1),
            active: Some(active),
            ..Self::default()
        }
    }
}

impl TableParams {
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec {
            key: self.sort.clone(),
            direction: self.dir,
        }
    }

    /// Merge `update` over these parameters.
    pub fn merged(&self, update: ParamUpdate) -> Self {
        Self {
            page: update.page.unwrap_or(self.page),
            sort: update.sort.unwrap_or_else(|| self.sort.clone()),
            dir: update.dir.unwrap_or(self.dir),
            active: update.active.unwrap_or(self.active),
        }
        .normalized()
    }

    /// Canonical form: page at least 1, empty sort is no sort, and no
    /// direction without a sort key.
    fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        if self.sort.as_deref().is_some_and(str::is_empty) {
            self.sort = None;
        }
        if self.sort.is_none() {
            self.dir = SortDirection::Asc;
        }
        self
    }

    /// Decode from a query string (leading `?` optional).
    pub fn from_query(query: &str) -> Self {
        let mut page: Option<String> = None;
        let mut sort: Option<String> = None;
        let mut dir: Option<String> = None;
        let mut active: Option<String> = None;

        for (key, value) in form_urlencoded::parse(strip_question(query).as_bytes()) {
            let slot = match &*key {
                PAGE_KEY => &mut page,
                SORT_KEY => &mut sort,
                DIR_KEY => &mut dir,
                ACTIVE_KEY => &mut active,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self {
            page: page.as_deref().map(decode_page).unwrap_or(1),
            sort,
            dir: dir
                .as_deref()
                .map(|value| {
                    SortDirection::parse(value).unwrap_or_else(|| {
                        warn!(value, "Unknown sort direction in query, using asc");
                        SortDirection::Asc
                    })
                })
                .unwrap_or_default(),
            active: active
                .as_deref()
                .map(|value| {
                    ActiveFilter::parse(value).unwrap_or_else(|| {
                        warn!(value, "Unknown active filter in query, using all");
                        ActiveFilter::All
                    })
                })
                .unwrap_or_default(),
        }
        .normalized()
    }

    /// Encode only the owned keys, omitting defaults.
    pub fn to_query(&self) -> String {
        self.encode_over("")
    }

    /// Encode over an existing query string, keeping keys this type does not own.
    pub fn encode_over(&self, existing: &str) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        for (key, value) in form_urlencoded::parse(strip_question(existing).as_bytes()) {
            if !OWNED_KEYS.contains(&&*key) {
                serializer.append_pair(&key, &value);
            }
        }

        if self.page > 1 {
            serializer.append_pair(PAGE_KEY, &self.page.to_string());
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            serializer.append_pair(SORT_KEY, sort);
            serializer.append_pair(DIR_KEY, self.dir.as_str());
        }
        if self.active != ActiveFilter::All {
            serializer.append_pair(ACTIVE_KEY, self.active.as_str());
        }

        serializer.finish()
    }
}

fn strip_question(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}

/// Leading digits as a page number; anything else, or 0, is page 1.
fn decode_page(value: &str) -> usize {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<usize>() {
        Ok(page) if page >= 1 => page,
        _ => {
            warn!(value, "Invalid page in query, using 1");
            1
        }
    }
}
