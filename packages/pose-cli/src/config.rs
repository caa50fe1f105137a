use std::{collections::BTreeSet, fs};

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use pose_nodes::ShadowMode;
use serde::Deserialize;

use crate::shell;

pub const CONFIG_FILE: &str = "pose.toml";

#[derive(Clone, Default, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub element: Element,
    pub prerender: Prerender,
}

#[derive(Clone, Default, Deserialize, Debug)]
#[serde(default, rename_all = "kebab-case")]
pub struct Element {
    pub mode: ShadowMode,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(default, rename_all = "kebab-case")]
pub struct Prerender {
    pub count: usize,
    pub title: String,
    pub out_file: Option<Utf8PathBuf>,
}

impl Default for Prerender {
    fn default() -> Self {
        Self {
            count: 1,
            title: pose_canvas::TAG_NAME.to_string(),
            out_file: None,
        }
    }
}

impl Config {
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("`{path}` is not a valid config file"))?;

        let (config, unused) =
            Self::parse(&contents).with_context(|| format!("failed to parse `{path}`"))?;
        for key in unused {
            shell().warn(format!("{path}: unused config key: {key}"));
        }
        Ok(config)
    }

    /// Parses a config, returning it along with the keys it did not recognize.
    pub fn parse(contents: &str) -> Result<(Self, BTreeSet<String>)> {
        let mut unused = BTreeSet::new();
        let config: Self = serde_ignored::deserialize(toml::Deserializer::new(contents), |path| {
            unused.insert(path.to_string());
        })?;

        tracing::debug!(?config, "parsed config");
        Ok((config, unused))
    }
}

#[cfg(test)]
mod tests {
    use pose_nodes::ShadowMode;

    use super::Config;

    #[test]
    fn empty_config_uses_defaults() {
        let (config, unused) = Config::parse("").unwrap();

        assert_eq!(config.element.mode, ShadowMode::Open);
        assert_eq!(config.prerender.count, 1);
        assert_eq!(config.prerender.title, "pose-canvas");
        assert!(config.prerender.out_file.is_none());
        assert!(unused.is_empty());
    }

    #[test]
    fn reads_every_section() {
        let (config, _) = Config::parse(
            r#"
            [element]
            mode = "closed"

            [prerender]
            count = 3
            title = "Demo"
            out-file = "dist/index.html"
            "#,
        )
        .unwrap();

        assert_eq!(config.element.mode, ShadowMode::Closed);
        assert_eq!(config.prerender.count, 3);
        assert_eq!(config.prerender.title, "Demo");
        assert_eq!(
            config.prerender.out_file.as_deref().map(|path| path.as_str()),
            Some("dist/index.html")
        );
    }

    #[test]
    fn unknown_keys_are_collected() {
        let (_, unused) = Config::parse(
            r#"
            theme = "dark"

            [element]
            mode = "open"
            slots = true
            "#,
        )
        .unwrap();

        assert_eq!(
            unused.into_iter().collect::<Vec<_>>(),
            ["element.slots", "theme"]
        );
    }

    #[test]
    fn invalid_mode_is_rejected() {
        assert!(Config::parse("[element]\nmode = \"sealed\"\n").is_err());
    }
}
