//! Settings-backed display names
//!
//! A node's name starts as a computed default and may be overridden by the
//! user. Overrides live under `<identifier>/name` in the shared settings store.

use std::sync::Arc;

use tracing::debug;

use crate::constants::{ids, limits};
use crate::error::Result;
use crate::identification::Manufacturer;
use crate::identity::Identifier;
use crate::settings::Settings;

/// Default board name: `"<Manufacturer> <product>"`, the product alone when the
/// manufacturer is unknown, the manufacturer alone when the product is empty.
/// Both missing gives `"Unknown"`.
pub fn default_name(manufacturer: Manufacturer, product: Option<&str>) -> String {
    let product = product.map(str::trim).filter(|p| !p.is_empty());
    match (manufacturer, product) {
        (Manufacturer::Unknown, Some(product)) => product.to_string(),
        (manufacturer, Some(product)) => format!("{} {}", manufacturer, product),
        (manufacturer, None) => manufacturer.to_string(),
    }
}

/// Editable name bound to one identifier
#[derive(Clone)]
pub struct NameSetting {
    key: String,
    default: String,
    current: String,
    settings: Arc<dyn Settings>,
}

impl NameSetting {
    /// Resolve the persisted override for `identifier`, or use `default`.
    /// A blank stored override counts as no override.
    pub fn load(settings: Arc<dyn Settings>, identifier: &Identifier, default: impl Into<String>) -> Self {
        let key = identifier.child(ids::NAME).to_string();
        let default = default.into();
        let stored = settings.get_value(&key, &default);
        let current = match stored.trim() {
            "" => default.clone(),
            trimmed => trimmed.to_string(),
        };
        Self {
            key,
            default,
            current,
            settings,
        }
    }

    pub fn get(&self) -> &str {
        &self.current
    }

    /// Set or reset the name.
    ///
    /// `None`, empty or whitespace-only input resets to the default, and the
    /// default itself is what gets persisted. Over-long names are truncated on a
    /// character boundary. The in-memory name is updated before the write, so a
    /// store failure still leaves the node showing the requested name.
    pub fn set(&mut self, value: Option<&str>) -> Result<()> {
        self.current = match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => v.chars().take(limits::MAX_NAME_LEN).collect(),
            None => self.default.clone(),
        };
        debug!(key = %self.key, name = %self.current, "Updating name");
        self.settings.set_value(&self.key, &self.current)
    }
}

impl std::fmt::Debug for NameSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameSetting")
            .field("key", &self.key)
            .field("default", &self.default)
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardmonError;
    use crate::settings::{MemorySettings, MockSettings};
    use mockall::predicate::eq;

    #[test]
    fn test_default_name_fallback_chain() {
        assert_eq!(default_name(Manufacturer::Unknown, Some("")), "Unknown");
        assert_eq!(default_name(Manufacturer::Unknown, None), "Unknown");
        assert_eq!(default_name(Manufacturer::Unknown, Some("X123")), "X123");
        assert_eq!(default_name(Manufacturer::Gigabyte, Some("X123")), "Gigabyte X123");
        assert_eq!(default_name(Manufacturer::ASUS, None), "ASUS");
        assert_eq!(default_name(Manufacturer::ASUS, Some("   ")), "ASUS");
    }

    #[test]
    fn test_load_uses_override() {
        let settings = Arc::new(MemorySettings::new());
        settings.set_value("/mainboard/name", "Desk").unwrap();

        let id = Identifier::make("mainboard", None, None);
        let name = NameSetting::load(settings, &id, "ASUS P8P67");
        assert_eq!(name.get(), "Desk");
    }

    #[test]
    fn test_load_blank_override_uses_default() {
        let settings = Arc::new(MemorySettings::new());
        settings.set_value("/mainboard/name", "   ").unwrap();
        settings.set_value("/lpc/it8688e/0/name", "").unwrap();

        let board = NameSetting::load(settings.clone(), &Identifier::make("mainboard", None, None), "ASUS P8P67");
        assert_eq!(board.get(), "ASUS P8P67");

        let chip: Identifier = "/lpc/it8688e/0".parse().unwrap();
        assert_eq!(NameSetting::load(settings, &chip, "ITE IT8688E").get(), "ITE IT8688E");
    }

    #[test]
    fn test_empty_set_persists_default() {
        let settings = Arc::new(MemorySettings::new());
        let id = Identifier::make("mainboard", None, None);
        let mut name = NameSetting::load(settings.clone(), &id, "ASUS P8P67");

        name.set(Some("Desk")).unwrap();
        assert_eq!(settings.get_value("/mainboard/name", ""), "Desk");

        name.set(Some("")).unwrap();
        assert_eq!(name.get(), "ASUS P8P67");
        assert_eq!(settings.get_value("/mainboard/name", ""), "ASUS P8P67");

        name.set(None).unwrap();
        assert_eq!(settings.get_value("/mainboard/name", ""), "ASUS P8P67");
    }

    #[test]
    fn test_set_is_single_write_under_identity_key() {
        let mut mock = MockSettings::new();
        mock.expect_get_value()
            .returning(|_, default| default.to_string());
        mock.expect_set_value()
            .with(eq("/lpc/it8686e/1/name"), eq("Case SIO"))
            .times(1)
            .returning(|_, _| Ok(()));

        let id: Identifier = "/lpc/it8686e/1".parse().unwrap();
        let mut name = NameSetting::load(Arc::new(mock), &id, "ITE IT8686E");
        name.set(Some("  Case SIO ")).unwrap();
        assert_eq!(name.get(), "Case SIO");
    }

    #[test]
    fn test_store_failure_keeps_in_memory_name() {
        let mut mock = MockSettings::new();
        mock.expect_get_value()
            .returning(|_, default| default.to_string());
        mock.expect_set_value()
            .returning(|_, _| Err(BoardmonError::config("read-only")));

        let id = Identifier::make("mainboard", None, None);
        let mut name = NameSetting::load(Arc::new(mock), &id, "Unknown");
        assert!(name.set(Some("Rig")).is_err());
        assert_eq!(name.get(), "Rig");
    }
}
