//! Connection profiles: load/save simple JSON mapping of profile name -> { url, interval_secs }
//! Stored under XDG config dir: $XDG_CONFIG_HOME/hostdash/profiles.json (fallback ~/.config/hostdash/profiles.json)

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProfileEntry {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("hostdash")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hostdash")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn default_log_path() -> PathBuf {
    config_dir().join("hostdash.log")
}

/// Missing file means no profiles; a corrupt one is logged and ignored.
pub fn load_profiles() -> ProfilesFile {
    let path = profiles_path();
    let Ok(s) = fs::read_to_string(&path) else {
        return ProfilesFile::default();
    };
    match serde_json::from_str(&s) {
        Ok(pf) => pf,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable profiles file");
            ProfilesFile::default()
        }
    }
}

pub fn save_profiles(p: &ProfilesFile) -> Result<(), ConfigError> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p)?;
    fs::write(path, data)?;
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub enum ResolveProfile {
    /// Use the provided runtime inputs (maybe persisted by the caller).
    Direct(ProfileEntry),
    /// Loaded from an existing profile entry.
    Loaded(ProfileEntry),
    /// Should prompt user to select among profile names
    PromptSelect(Vec<String>),
    /// Should prompt user to create a new profile (name)
    PromptCreate(String),
    /// No profile could be resolved (e.g., missing arguments)
    None,
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub url: Option<String>,
    pub interval_secs: Option<u64>,
}

impl ProfileRequest {
    pub fn resolve(self, pf: &ProfilesFile) -> ResolveProfile {
        match (self.url, self.profile_name) {
            (Some(url), _) => ResolveProfile::Direct(ProfileEntry {
                url,
                interval_secs: self.interval_secs,
            }),
            (None, Some(name)) => match pf.profiles.get(&name) {
                Some(entry) => {
                    let mut entry = entry.clone();
                    // command line wins over the stored cadence
                    if self.interval_secs.is_some() {
                        entry.interval_secs = self.interval_secs;
                    }
                    ResolveProfile::Loaded(entry)
                }
                None => ResolveProfile::PromptCreate(name),
            },
            (None, None) if pf.profiles.is_empty() => ResolveProfile::None,
            (None, None) => ResolveProfile::PromptSelect(pf.profiles.keys().cloned().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(name: &str, url: &str) -> ProfilesFile {
        let mut pf = ProfilesFile::default();
        pf.profiles.insert(
            name.into(),
            ProfileEntry {
                url: url.into(),
                interval_secs: Some(10),
            },
        );
        pf
    }

    fn req(name: Option<&str>, url: Option<&str>, interval: Option<u64>) -> ProfileRequest {
        ProfileRequest {
            profile_name: name.map(Into::into),
            url: url.map(Into::into),
            interval_secs: interval,
        }
    }

    #[test]
    fn url_on_command_line_is_direct() {
        let pf = file_with("prod", "http://one:8000");
        let r = req(Some("prod"), Some("http://two:8000"), None).resolve(&pf);
        assert_eq!(
            r,
            ResolveProfile::Direct(ProfileEntry {
                url: "http://two:8000".into(),
                interval_secs: None
            })
        );
    }

    #[test]
    fn known_profile_loads_with_interval_override() {
        let pf = file_with("prod", "http://one:8000");
        let ResolveProfile::Loaded(e) = req(Some("prod"), None, Some(3)).resolve(&pf) else {
            panic!("expected loaded profile");
        };
        assert_eq!(e.url, "http://one:8000");
        assert_eq!(e.interval_secs, Some(3));
    }

    #[test]
    fn unknown_profile_prompts_create_and_empty_store_resolves_none() {
        let pf = file_with("prod", "http://one:8000");
        assert_eq!(
            req(Some("lab"), None, None).resolve(&pf),
            ResolveProfile::PromptCreate("lab".into())
        );
        assert_eq!(
            req(None, None, None).resolve(&pf),
            ResolveProfile::PromptSelect(vec!["prod".into()])
        );
        assert_eq!(req(None, None, None).resolve(&ProfilesFile::default()), ResolveProfile::None);
    }
}
