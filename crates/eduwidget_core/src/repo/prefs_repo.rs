//! Widget display preference document.

use crate::repo::state_repo::RepoResult;
use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};

/// Storage key of the widget preference document, independent of the
/// application-state key.
pub const WIDGET_PREFS_KEY: &str = "edu_widget_prefs_v1";

/// Visual template the widget host renders the summary into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetLayout {
    #[default]
    Compact,
    Large,
    Vertical,
}

impl WidgetLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Large => "large",
            Self::Vertical => "vertical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "compact" => Some(Self::Compact),
            "large" => Some(Self::Large),
            "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WidgetPrefs {
    #[serde(default)]
    pub layout: WidgetLayout,
}

/// Owner of the persisted widget preference document.
pub struct PrefsRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PrefsRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the stored preferences, defaulting to the compact layout on
    /// absence, read failure or parse failure.
    pub fn get_prefs(&self) -> WidgetPrefs {
        self.store
            .get(WIDGET_PREFS_KEY)
            .ok()
            .flatten()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    pub fn set_prefs(&self, prefs: WidgetPrefs) -> RepoResult<()> {
        let text = serde_json::to_string(&prefs)?;
        self.store.put(WIDGET_PREFS_KEY, &text)?;
        Ok(())
    }
}
