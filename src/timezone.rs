use chrono_tz::{TZ_VARIANTS, Tz};
use std::{env, fs, path::Path};
use tracing::debug;

/// Guesses the visitor's IANA timezone. `None` means no usable signal.
pub trait TimezoneDetector: Send + Sync {
    fn guess(&self) -> Option<String>;
}

/// The zone the visitor's browser reported (`Intl.DateTimeFormat` on the page),
/// passed back to the server as the `tz` query parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientTimezone(Option<Tz>);

impl ClientTimezone {
    pub fn from_reported(reported: Option<&str>) -> Self {
        Self(reported.and_then(parse_zone))
    }

    pub fn zone(&self) -> Option<Tz> {
        self.0
    }
}

impl TimezoneDetector for ClientTimezone {
    fn guess(&self) -> Option<String> {
        self.0.map(|tz| tz.name().to_string())
    }
}

/// Always answers with the same guess, valid or not.
#[derive(Debug, Clone, Default)]
pub struct FixedTimezone(pub Option<String>);

impl TimezoneDetector for FixedTimezone {
    fn guess(&self) -> Option<String> {
        self.0.clone()
    }
}

/// The host's own zone: `TZ`, then `/etc/timezone`, then the target of the
/// `/etc/localtime` link. Only used to date the page when the visitor's
/// browser reported nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimezone;

impl SystemTimezone {
    pub fn detect(&self) -> Option<Tz> {
        env::var("TZ")
            .ok()
            .and_then(|value| parse_zone(value.trim_start_matches(':')))
            .or_else(|| {
                fs::read_to_string("/etc/timezone")
                    .ok()
                    .and_then(|name| parse_zone(&name))
            })
            .or_else(|| {
                let target = fs::read_link(Path::new("/etc/localtime")).ok()?;
                zone_from_link_target(&target.to_string_lossy())
            })
    }
}

fn parse_zone(name: &str) -> Option<Tz> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            debug!("ignoring unknown timezone `{name}`");
            None
        }
    }
}

/// `/usr/share/zoneinfo/Europe/Paris` and the `posix/`/`right/` variants all
/// name `Europe/Paris`.
fn zone_from_link_target(target: &str) -> Option<Tz> {
    let (_, name) = target.split_once("zoneinfo/")?;
    let name = name
        .strip_prefix("posix/")
        .or_else(|| name.strip_prefix("right/"))
        .unwrap_or(name);
    parse_zone(name)
}

/// The `timezone` select control. The default option has an empty value.
#[derive(Debug, Clone, Default)]
pub struct TimezoneSelect {
    value: String,
}

impl TimezoneSelect {
    pub const DEFAULT_LABEL: &'static str = "Choose your timezone";

    pub fn options() -> impl Iterator<Item = &'static str> {
        TZ_VARIANTS.iter().map(|tz| tz.name())
    }

    pub fn has_option(value: &str) -> bool {
        value.parse::<Tz>().is_ok()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Selects `value` if the control offers it. Otherwise the current
    /// selection is kept and `false` is returned.
    pub fn select(&mut self, value: &str) -> bool {
        if !Self::has_option(value) {
            return false;
        }
        self.value = value.to_string();
        true
    }

    pub fn reset(&mut self) {
        self.value.clear();
    }
}
