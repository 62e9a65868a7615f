//! Cache command implementations.
//!
//! Provides `rescache get`, `rescache path`, `rescache remove` and
//! `rescache list`.

use std::fs;
use std::io::Write;

use crate::cache::{resolve_entry, ResourceCache};
use crate::cli::args::{GetArgs, ListArgs, PathArgs, RemoveArgs};
use crate::config::Settings;
use crate::error::Result;

use super::dispatcher::Command;

/// The get command implementation.
pub struct GetCommand<'a> {
    settings: &'a Settings,
    args: GetArgs,
}

impl<'a> GetCommand<'a> {
    /// Create a new get command.
    pub fn new(settings: &'a Settings, args: GetArgs) -> Self {
        Self { settings, args }
    }
}

impl Command for GetCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let cache = ResourceCache::from_settings(self.args.template.as_str(), self.settings)?;
        let bytes = cache.get(&self.args.parameter)?;

        match &self.args.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, &bytes)?;
                writeln!(out, "Wrote {} bytes to {}", bytes.len(), path.display())?;
            }
            None => out.write_all(&bytes)?,
        }

        Ok(())
    }
}

/// The path command implementation.
pub struct PathCommand<'a> {
    settings: &'a Settings,
    args: PathArgs,
}

impl<'a> PathCommand<'a> {
    /// Create a new path command.
    pub fn new(settings: &'a Settings, args: PathArgs) -> Self {
        Self { settings, args }
    }
}

impl Command for PathCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let entry = resolve_entry(
            &self.args.template,
            &self.settings.resolved_cache_dir(),
            &self.args.parameter,
        )?;

        writeln!(out, "Path: {}", entry.path.display())?;
        writeln!(out, "Target: {}", entry.target)?;

        Ok(())
    }
}

/// The remove command implementation.
pub struct RemoveCommand<'a> {
    settings: &'a Settings,
    args: RemoveArgs,
}

impl<'a> RemoveCommand<'a> {
    /// Create a new remove command.
    pub fn new(settings: &'a Settings, args: RemoveArgs) -> Self {
        Self { settings, args }
    }
}

impl Command for RemoveCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let cache = ResourceCache::from_settings(self.args.template.as_str(), self.settings)?;
        let removed = cache.remove(self.args.parameter.as_deref())?;

        let noun = if removed == 1 { "entry" } else { "entries" };
        writeln!(out, "Removed {} {}", removed, noun)?;

        Ok(())
    }
}

/// The list command implementation.
pub struct ListCommand<'a> {
    settings: &'a Settings,
    args: ListArgs,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(settings: &'a Settings, args: ListArgs) -> Self {
        Self { settings, args }
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let cache = ResourceCache::from_settings(self.args.template.as_str(), self.settings)?;
        let entries = cache.entries()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&entries).map_err(anyhow::Error::from)?;
            writeln!(out, "{}", json)?;
            return Ok(());
        }

        if entries.is_empty() {
            writeln!(out, "Cache is empty")?;
            return Ok(());
        }

        writeln!(out, "{} cached entries:", entries.len())?;
        for entry in &entries {
            writeln!(
                out,
                "  {}  {} bytes  {}",
                entry.param_key,
                entry.size_bytes,
                entry.modified.format("%Y-%m-%d %H:%M:%S")
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    fn setup_settings() -> (TempDir, Settings) {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            cache_dir: Some(temp.path().to_path_buf()),
            ..Settings::default()
        };
        (temp, settings)
    }

    fn run(command: &dyn Command) -> Result<String> {
        let mut out = Vec::new();
        command.execute(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn get_prints_content_and_caches() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/groups/osi.json");
            then.status(200).body("{\"MIT\": {}}");
        });
        let (_temp, settings) = setup_settings();
        let args = GetArgs {
            template: server.url("/groups/{}.json"),
            parameter: "osi".to_string(),
            output: None,
        };

        let first = run(&GetCommand::new(&settings, args.clone())).unwrap();
        let second = run(&GetCommand::new(&settings, args)).unwrap();

        assert_eq!(first, "{\"MIT\": {}}");
        assert_eq!(first, second);
        mock.assert_calls(1);
    }

    #[test]
    fn get_writes_output_file() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/groups/all.json");
            then.status(200).body("[1, 2, 3]");
        });
        let (temp, settings) = setup_settings();
        let output = temp.path().join("out/all.json");
        let args = GetArgs {
            template: server.url("/groups/{}.json"),
            parameter: "all".to_string(),
            output: Some(output.clone()),
        };

        let text = run(&GetCommand::new(&settings, args)).unwrap();

        assert!(text.contains("Wrote 9 bytes"));
        assert_eq!(fs::read_to_string(output).unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn path_prints_entry_and_target() {
        let (_temp, settings) = setup_settings();
        let args = PathArgs {
            template: "https://example.com/{}.json".to_string(),
            parameter: "all".to_string(),
        };

        let text = run(&PathCommand::new(&settings, args.clone())).unwrap();

        let cache = ResourceCache::from_settings(args.template.as_str(), &settings).unwrap();
        let expected = cache.resolve("all");
        assert_eq!(
            text,
            format!(
                "Path: {}\nTarget: https://example.com/all.json\n",
                expected.path.display()
            )
        );
    }

    #[test]
    fn path_does_not_create_cache_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("never-created");
        let settings = Settings {
            cache_dir: Some(root.clone()),
            ..Settings::default()
        };
        let args = PathArgs {
            template: "https://example.com/{}.json".to_string(),
            parameter: "all".to_string(),
        };

        let text = run(&PathCommand::new(&settings, args)).unwrap();

        assert!(text.contains(&root.display().to_string()));
        assert!(!root.exists());
    }

    #[test]
    fn remove_missing_parameter_fails() {
        let (_temp, settings) = setup_settings();
        let args = RemoveArgs {
            template: "https://example.com/{}.json".to_string(),
            parameter: Some("nope".to_string()),
        };

        let err = run(&RemoveCommand::new(&settings, args)).unwrap_err();
        assert!(matches!(err, CacheError::EntryNotFound { .. }));
    }

    #[test]
    fn remove_all_reports_count() {
        let (_temp, settings) = setup_settings();
        let template = "https://example.com/{}.json";
        let cache = ResourceCache::from_settings(template, &settings).unwrap();
        fs::write(cache.resolve("a").path, "a").unwrap();
        fs::write(cache.resolve("b").path, "b").unwrap();

        let args = RemoveArgs {
            template: template.to_string(),
            parameter: None,
        };
        let text = run(&RemoveCommand::new(&settings, args.clone())).unwrap();
        assert_eq!(text, "Removed 2 entries\n");

        let text = run(&RemoveCommand::new(&settings, args)).unwrap();
        assert_eq!(text, "Removed 0 entries\n");
    }

    #[test]
    fn list_empty_cache() {
        let (_temp, settings) = setup_settings();
        let args = ListArgs {
            template: "https://example.com/{}.json".to_string(),
            json: false,
        };

        let text = run(&ListCommand::new(&settings, args)).unwrap();
        assert_eq!(text, "Cache is empty\n");
    }

    #[test]
    fn list_with_entries_as_json() {
        let (_temp, settings) = setup_settings();
        let template = "https://example.com/{}.json";
        let cache = ResourceCache::from_settings(template, &settings).unwrap();
        fs::write(cache.resolve("a").path, "12345").unwrap();

        let args = ListArgs {
            template: template.to_string(),
            json: true,
        };
        let text = run(&ListCommand::new(&settings, args)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["size_bytes"], 5);
    }

    #[test]
    fn list_with_entries_as_text() {
        let (_temp, settings) = setup_settings();
        let template = "https://example.com/{}.json";
        let cache = ResourceCache::from_settings(template, &settings).unwrap();
        fs::write(cache.resolve("a").path, "123").unwrap();
        fs::write(cache.resolve("b").path, "1234567").unwrap();

        let args = ListArgs {
            template: template.to_string(),
            json: false,
        };
        let text = run(&ListCommand::new(&settings, args)).unwrap();

        assert!(text.starts_with("2 cached entries:"));
        assert!(text.contains("3 bytes"));
        assert!(text.contains("7 bytes"));
    }
}
