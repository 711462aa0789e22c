use std::env;
use std::ffi::OsStr;
use std::fmt;
use std::str::FromStr;

use crate::constants::{API_COMPONENT, COMPONENT_VAR, CONVERTER_COMPONENT};
use crate::error::{DispatchError, Result};

/// The role this container should take on, chosen by `APP_COMPONENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Api,
    Converter,
}

impl Component {
    /// Reads the selector from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_selector(env::var_os(COMPONENT_VAR).as_deref())
    }

    /// Maps a raw selector value to a component.
    ///
    /// Unset and empty are both treated as missing. Matching is exact, so
    /// `"API"` or `" api"` are unknown values. A value that is not valid
    /// UTF-8 is reported lossily.
    pub fn from_selector(raw: Option<&OsStr>) -> Result<Self> {
        let raw = match raw {
            Some(value) if !value.is_empty() => value,
            _ => return Err(DispatchError::MissingComponent),
        };

        match raw.to_str() {
            Some(value) => value.parse(),
            None => Err(DispatchError::UnknownComponent(
                raw.to_string_lossy().into_owned(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Api => API_COMPONENT,
            Component::Converter => CONVERTER_COMPONENT,
        }
    }
}

impl FromStr for Component {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            API_COMPONENT => Ok(Component::Api),
            CONVERTER_COMPONENT => Ok(Component::Converter),
            "" => Err(DispatchError::MissingComponent),
            other => Err(DispatchError::UnknownComponent(other.to_string())),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors() {
        assert_eq!(
            Component::from_selector(Some(OsStr::new("api"))).unwrap(),
            Component::Api
        );
        assert_eq!(
            Component::from_selector(Some(OsStr::new("converter"))).unwrap(),
            Component::Converter
        );
    }

    #[test]
    fn test_missing_selector() {
        assert!(matches!(
            Component::from_selector(None),
            Err(DispatchError::MissingComponent)
        ));
        assert!(matches!(
            Component::from_selector(Some(OsStr::new(""))),
            Err(DispatchError::MissingComponent)
        ));
    }

    #[test]
    fn test_unknown_selector_keeps_value() {
        for value in ["API", "Converter", " api", "api ", "worker", "api,converter", "ünïcode"] {
            match Component::from_selector(Some(OsStr::new(value))) {
                Err(DispatchError::UnknownComponent(reported)) => assert_eq!(reported, value),
                other => panic!("expected unknown component for {value:?}, got {other:?}"),
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_selector_is_unknown() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"ap\xffi");
        match Component::from_selector(Some(raw)) {
            Err(DispatchError::UnknownComponent(reported)) => {
                assert_eq!(reported, "ap\u{fffd}i")
            }
            other => panic!("expected unknown component, got {other:?}"),
        }
    }

    #[test]
    fn test_display_matches_selector() {
        for name in [API_COMPONENT, CONVERTER_COMPONENT] {
            let component: Component = name.parse().unwrap();
            assert_eq!(component.to_string(), name);
        }
    }
}
