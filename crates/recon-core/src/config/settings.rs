//! Settings parsed from recon.toml and the environment

use crate::{Error, Result};
use recon_tools::{ArgSource, TargetContext};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the user config dir.
pub const CONFIG_FILE: &str = "recon.toml";

/// Ports that mark a target as serving HTTP.
pub const DEFAULT_WEB_PORTS: [u16; 4] = [80, 443, 8080, 8443];

/// Starting point written by `recon init`.
pub const TEMPLATE: &str = r#"# recon settings. Environment variables override every value here.

[target]
platform = ""     # CTF_PLATFORM
name = ""         # CTF_NAME, also the resources directory name
source_ip = ""    # IP_SOURCE
ip = ""           # IP_CIBLE
url = ""          # URL
domain = ""       # DOMAIN

[wordlists]
dns = "/usr/share/seclists/Discovery/DNS/subdomains-top1million-5000.txt"  # WORDLIST_DNS
dir = "/usr/share/seclists/Discovery/Web-Content/raft-medium-directories.txt"  # WORDLIST_DIR
passwords = "/usr/share/wordlists/rockyou.txt"  # WORDLIST_PASSWORDS, used by `recon hydra`

[users]
# current = "kali"   # RECON_CURRENT_USER, defaults to USER
# os = "www-data"    # RECON_OS_USER

[output]
root = "."

[scan]
web_ports = [80, 443, 8080, 8443]
"#;

/// Target description. Every field is required before a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSection {
    pub platform: Option<String>,
    pub name: Option<String>,
    pub source_ip: Option<String>,
    pub ip: Option<String>,
    pub url: Option<String>,
    pub domain: Option<String>,
}

/// Fuzzing wordlists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordlistSection {
    pub dns: Option<String>,
    pub dir: Option<String>,
    /// Login brute-force list; not bound to any catalog tool
    pub passwords: Option<String>,
}

/// User context passed to service and OS enumeration tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSection {
    pub current: Option<String>,
    pub os: Option<String>,
}

/// Where resources directories are created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSection {
    pub root: Option<PathBuf>,
}

/// Pipeline tuning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSection {
    pub web_ports: Option<Vec<u16>>,
}

/// Resolved recon settings.
///
/// All values are optional while loading so that file and environment can be
/// merged; [`Settings::require_target`] enforces what a run needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub target: TargetSection,
    #[serde(default)]
    pub wordlists: WordlistSection,
    #[serde(default)]
    pub users: UserSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub scan: ScanSection,
}

impl Settings {
    /// Parse settings from TOML content.
    ///
    /// Empty strings are treated as unset, so the `recon init` template
    /// parses to an empty target.
    pub fn parse(content: &str) -> Result<Self> {
        let mut settings: Settings = toml::from_str(content)?;
        settings.drop_empty();
        Ok(settings)
    }

    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Settings taken from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings taken from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            target: TargetSection {
                platform: get("CTF_PLATFORM"),
                name: get("CTF_NAME"),
                source_ip: get("IP_SOURCE"),
                ip: get("IP_CIBLE"),
                url: get("URL"),
                domain: get("DOMAIN"),
            },
            wordlists: WordlistSection {
                dns: get("WORDLIST_DNS"),
                dir: get("WORDLIST_DIR"),
                passwords: get("WORDLIST_PASSWORDS"),
            },
            users: UserSection {
                current: get("RECON_CURRENT_USER").or_else(|| get("USER")),
                os: get("RECON_OS_USER"),
            },
            output: OutputSection {
                root: get("RECON_OUTPUT_DIR").map(PathBuf::from),
            },
            scan: ScanSection::default(),
        }
    }

    /// Merge another settings value into this one.
    ///
    /// Every value set in `other` takes precedence.
    pub fn merge(&mut self, other: &Settings) {
        fn overlay<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
            if other.is_some() {
                base.clone_from(other);
            }
        }

        overlay(&mut self.target.platform, &other.target.platform);
        overlay(&mut self.target.name, &other.target.name);
        overlay(&mut self.target.source_ip, &other.target.source_ip);
        overlay(&mut self.target.ip, &other.target.ip);
        overlay(&mut self.target.url, &other.target.url);
        overlay(&mut self.target.domain, &other.target.domain);
        overlay(&mut self.wordlists.dns, &other.wordlists.dns);
        overlay(&mut self.wordlists.dir, &other.wordlists.dir);
        overlay(&mut self.wordlists.passwords, &other.wordlists.passwords);
        overlay(&mut self.users.current, &other.users.current);
        overlay(&mut self.users.os, &other.users.os);
        overlay(&mut self.output.root, &other.output.root);
        overlay(&mut self.scan.web_ports, &other.scan.web_ports);
    }

    /// Resolve settings from files and the process environment.
    ///
    /// An explicit `path` must exist. Without one, `./recon.toml` is used if
    /// present, else the user-level file, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let global = dirs::config_dir().map(|d| d.join("recon").join(CONFIG_FILE));
        Self::resolve_with(path, &cwd, global.as_deref(), &Self::from_env())
    }

    /// Resolution with every input explicit.
    pub fn resolve_with(
        path: Option<&Path>,
        cwd: &Path,
        global: Option<&Path>,
        env: &Settings,
    ) -> Result<Self> {
        let mut settings = match path {
            Some(p) => Self::load(p)?,
            None => {
                let local = cwd.join(CONFIG_FILE);
                if local.is_file() {
                    Self::load(&local)?
                } else {
                    match global.filter(|g| g.is_file()) {
                        Some(g) => Self::load(g)?,
                        None => Self::default(),
                    }
                }
            }
        };

        tracing::debug!(?settings, "Loaded settings file");
        settings.merge(env);
        Ok(settings)
    }

    /// Ensure every target value is present.
    ///
    /// Reports the first missing one with the environment variable that
    /// would provide it.
    pub fn require_target(&self) -> Result<()> {
        let t = &self.target;
        let required = [
            ("target.platform", "CTF_PLATFORM", &t.platform),
            ("target.name", "CTF_NAME", &t.name),
            ("target.source_ip", "IP_SOURCE", &t.source_ip),
            ("target.ip", "IP_CIBLE", &t.ip),
            ("target.url", "URL", &t.url),
            ("target.domain", "DOMAIN", &t.domain),
        ];

        for (key, env, value) in required {
            if value.is_none() {
                return Err(Error::MissingSetting {
                    key: key.to_string(),
                    env: env.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Directory under which resources directories are created.
    pub fn output_root(&self) -> &Path {
        self.output.root.as_deref().unwrap_or(Path::new("."))
    }

    /// `<output root>/<target name>`; `recon` when no name is set.
    pub fn resources_dir(&self) -> PathBuf {
        let name = self.target.name.as_deref().unwrap_or("recon");
        self.output_root().join(name)
    }

    /// Ports that gate the web phases.
    pub fn web_ports(&self) -> Vec<u16> {
        self.scan
            .web_ports
            .clone()
            .unwrap_or_else(|| DEFAULT_WEB_PORTS.to_vec())
    }

    /// Context holding every value that is set.
    pub fn to_context(&self) -> TargetContext {
        let mut ctx = TargetContext::new().with(
            ArgSource::ResourcesDir,
            self.resources_dir().to_string_lossy(),
        );

        let pairs = [
            (ArgSource::Url, &self.target.url),
            (ArgSource::IpAddress, &self.target.ip),
            (ArgSource::DomainName, &self.target.domain),
            (ArgSource::DnsWordlist, &self.wordlists.dns),
            (ArgSource::DirWordlist, &self.wordlists.dir),
            (ArgSource::CurrentUser, &self.users.current),
            (ArgSource::OsUser, &self.users.os),
        ];
        for (source, value) in pairs {
            if let Some(v) = value {
                ctx.set(source, v.as_str());
            }
        }
        ctx
    }

    fn drop_empty(&mut self) {
        let fields = [
            &mut self.target.platform,
            &mut self.target.name,
            &mut self.target.source_ip,
            &mut self.target.ip,
            &mut self.target.url,
            &mut self.target.domain,
            &mut self.wordlists.dns,
            &mut self.wordlists.dir,
            &mut self.wordlists.passwords,
            &mut self.users.current,
            &mut self.users.os,
        ];
        for field in fields {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
    }
}
