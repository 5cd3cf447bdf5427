//! Collector mode selection.
//!
//! SMART queries need root. Whatever the configuration asks for, an
//! unprivileged daemon serves synthetic disks.

use snoknas_disks::CollectorMode;
use tracing::warn;

use crate::config::ModeSetting;

/// Environment variable that forces synthetic mode when set to "true".
pub const DUMMY_ENV_VAR: &str = "SNOKNAS_DUMMY";

/// Whether the process runs with an effective uid of 0.
#[cfg(unix)]
pub fn is_privileged() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn is_privileged() -> bool {
    false
}

/// Whether `SNOKNAS_DUMMY` is set to "true" (any case).
pub fn dummy_forced_by_env() -> bool {
    env_value_forces_dummy(std::env::var(DUMMY_ENV_VAR).ok().as_deref())
}

pub fn env_value_forces_dummy(value: Option<&str>) -> bool {
    value.map(|v| v.trim().eq_ignore_ascii_case("true")).unwrap_or(false)
}

/// Decide the collector mode from configuration and the environment.
pub fn resolve_mode(setting: ModeSetting, env_forces_dummy: bool, is_privileged: bool) -> CollectorMode {
    if env_forces_dummy {
        return CollectorMode::Dummy;
    }

    match setting {
        ModeSetting::Dummy => CollectorMode::Dummy,
        ModeSetting::Auto if is_privileged => CollectorMode::Live,
        ModeSetting::Auto => CollectorMode::Dummy,
        ModeSetting::Live if is_privileged => CollectorMode::Live,
        ModeSetting::Live => {
            warn!("Live disk collection requested but not running as root, using synthetic disks");
            CollectorMode::Dummy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follows_privilege() {
        assert_eq!(resolve_mode(ModeSetting::Auto, false, true), CollectorMode::Live);
        assert_eq!(resolve_mode(ModeSetting::Auto, false, false), CollectorMode::Dummy);
    }

    #[test]
    fn test_env_override_wins() {
        assert_eq!(resolve_mode(ModeSetting::Live, true, true), CollectorMode::Dummy);
        assert_eq!(resolve_mode(ModeSetting::Auto, true, true), CollectorMode::Dummy);
    }

    #[test]
    fn test_live_requires_privilege() {
        assert_eq!(resolve_mode(ModeSetting::Live, false, true), CollectorMode::Live);
        assert_eq!(resolve_mode(ModeSetting::Live, false, false), CollectorMode::Dummy);
    }

    #[test]
    fn test_dummy_setting() {
        assert_eq!(resolve_mode(ModeSetting::Dummy, false, true), CollectorMode::Dummy);
    }

    #[test]
    fn test_env_value_parsing() {
        assert!(env_value_forces_dummy(Some("true")));
        assert!(env_value_forces_dummy(Some("TRUE")));
        assert!(env_value_forces_dummy(Some("True ")));
        assert!(!env_value_forces_dummy(Some("1")));
        assert!(!env_value_forces_dummy(Some("false")));
        assert!(!env_value_forces_dummy(None));
    }
}
