use std::{env, fs, io::Write};

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use pose_canvas::{STYLES, TAG_NAME};
use pose_nodes::ShadowMode;

use crate::{
    config::{Config, CONFIG_FILE},
    prerender::Page,
    shell,
    util::FileSize,
};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    shell().set_quiet(cli.quiet);

    match cli.command {
        Command::Prerender {
            project,
            mode,
            count,
            out_file,
        } => {
            let mut config = project.load()?;
            if let Some(mode) = mode {
                config.element.mode = mode;
            }
            if let Some(count) = count {
                config.prerender.count = count;
            }
            if out_file.is_some() {
                config.prerender.out_file = out_file;
            }
            prerender(&config)
        }
        Command::Inspect { project } => inspect(&project.load()?),
    }
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a static page of `<pose-canvas>` elements with declarative shadow roots
    Prerender {
        #[command(flatten)]
        project: Project,
        /// Shadow root mode of every element
        #[arg(long, value_parser = parse_mode)]
        mode: Option<ShadowMode>,
        /// Number of elements to render
        #[arg(long)]
        count: Option<usize>,
        /// Write the page here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out_file: Option<Utf8PathBuf>,
    },
    /// Print the element definition
    Inspect {
        #[command(flatten)]
        project: Project,
    },
}

#[derive(clap::Args)]
struct Project {
    /// Path to the pose.toml file
    #[arg(short, long, value_name = "PATH")]
    config: Option<Utf8PathBuf>,
}

impl Project {
    /// Loads the given config file, or `pose.toml` from the working directory
    /// when it exists.
    fn load(&self) -> Result<Config> {
        if let Some(path) = &self.config {
            return Config::load(path);
        }

        let cwd = env::current_dir().context("failed to read the working directory")?;
        let cwd = Utf8PathBuf::try_from(cwd).context("working directory is not valid UTF-8")?;
        load_from_dir(&cwd)
    }
}

fn load_from_dir(dir: &Utf8Path) -> Result<Config> {
    let path = dir.join(CONFIG_FILE);
    if path.is_file() {
        Config::load(&path)
    } else {
        shell().note(format!("no `{CONFIG_FILE}` in `{dir}`, using defaults"));
        Ok(Config::default())
    }
}

fn parse_mode(value: &str) -> Result<ShadowMode, String> {
    match value {
        "open" => Ok(ShadowMode::Open),
        "closed" => Ok(ShadowMode::Closed),
        _ => Err(format!("expected `open` or `closed`, found `{value}`")),
    }
}

fn prerender(config: &Config) -> Result<()> {
    let page = Page::new(config)?;
    let html = page.render();

    match &config.prerender.out_file {
        Some(path) => {
            write_file(path, &html)?;
            shell().status(
                "Prerendered",
                format!(
                    "{} element(s) to `{path}` ({})",
                    page.len(),
                    FileSize(html.len() as u64)
                ),
            );
        }
        None => {
            let mut stdout = anstream::stdout();
            stdout
                .write_all(html.as_bytes())
                .context("failed to write to stdout")?;
        }
    }
    Ok(())
}

fn write_file(path: &Utf8Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("failed to create `{dir}`"))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write `{path}`"))
}

fn inspect(config: &Config) -> Result<()> {
    shell().status("Element", format!("<{TAG_NAME}>"));
    shell().status("Shadow", format!("{} mode", config.element.mode));
    shell().status(
        "Stylesheet",
        format!(
            "{} ({} lines)",
            FileSize(STYLES.len() as u64),
            STYLES.as_str().lines().count()
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use clap::{CommandFactory, Parser};
    use pose_nodes::ShadowMode;

    use super::{load_from_dir, parse_mode, Cli, Command};
    use crate::config::CONFIG_FILE;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn prerender_flags() {
        let cli = Cli::try_parse_from([
            "pose",
            "prerender",
            "-c",
            "site/pose.toml",
            "--mode",
            "closed",
            "--count",
            "4",
            "-o",
            "out.html",
        ])
        .unwrap();

        let Command::Prerender {
            project,
            mode,
            count,
            out_file,
        } = cli.command
        else {
            panic!("expected prerender");
        };
        assert_eq!(project.config.as_deref().map(|p| p.as_str()), Some("site/pose.toml"));
        assert_eq!(mode, Some(ShadowMode::Closed));
        assert_eq!(count, Some(4));
        assert_eq!(out_file.as_deref().map(|p| p.as_str()), Some("out.html"));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(parse_mode("sealed").is_err());
        assert!(Cli::try_parse_from(["pose", "prerender", "--mode", "sealed"]).is_err());
    }

    #[test]
    fn config_file_is_optional() {
        let dir = Utf8PathBuf::try_from(std::env::temp_dir())
            .unwrap()
            .join(format!("pose-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let config = load_from_dir(&dir).unwrap();
        assert_eq!(config.element.mode, ShadowMode::Open);

        std::fs::write(dir.join(CONFIG_FILE), "[element]\nmode = \"closed\"\n").unwrap();
        let config = load_from_dir(&dir).unwrap();
        assert_eq!(config.element.mode, ShadowMode::Closed);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
