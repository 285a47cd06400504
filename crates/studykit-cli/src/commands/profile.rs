//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            url,
            model,
            api_key_env,
            timeout,
        } => {
            let defaults = Profile::default();
            let profile = Profile {
                base_url: url,
                model,
                api_key_env: api_key_env.unwrap_or(defaults.api_key_env),
                timeout_secs: timeout.unwrap_or(defaults.timeout_secs),
                max_attempts: defaults.max_attempts,
            };
            set_profile(config, name, profile, formatter)
        }
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_profile(profile, "  ");
    if std::env::var_os(&profile.api_key_env).is_none() {
        println!(
            "{}",
            formatter.warning(&format!("{} is not set in this environment", profile.api_key_env))
        );
    }

    Ok(())
}

fn print_profile(profile: &Profile, indent: &str) {
    println!("{}URL: {}", indent, profile.base_url);
    println!("{}Model: {}", indent, profile.model);
    println!("{}API key variable: {}", indent, profile.api_key_env);
    println!("{}Timeout: {}s", indent, profile.timeout_secs);
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!("{}", formatter.success(&format!("Switched to profile '{}'", name)));
    Ok(())
}

/// Create or update a profile.
fn set_profile(config: &mut Config, name: String, profile: Profile, formatter: &Formatter) -> Result<()> {
    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!("{}", formatter.success(&format!("{} profile '{}'", action, name)));

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if config.remove_profile(&name)? {
        config.save()?;
        println!("{}", formatter.success(&format!("Deleted profile '{}'", name)));
    } else {
        println!("{}", formatter.warning(&format!("Profile '{}' does not exist", name)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    fn temp_config(dir: &TempDir) -> Config {
        Config::load_from(dir.path().join("config.toml")).unwrap()
    }

    #[test]
    fn test_set_and_switch_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Text, false);

        let args = ProfileArgs {
            action: ProfileAction::Set {
                name: "local".to_string(),
                url: "http://localhost:11434/v1".to_string(),
                model: "llama3".to_string(),
                api_key_env: Some("LOCAL_KEY".to_string()),
                timeout: None,
            },
        };
        execute_profile(args, &mut config, &formatter).unwrap();

        let profile = &config.profiles["local"];
        assert_eq!(profile.api_key_env, "LOCAL_KEY");
        assert_eq!(profile.timeout_secs, 120);

        switch_profile(&mut config, "local".to_string(), &formatter).unwrap();

        let reloaded = temp_config(&dir);
        assert_eq!(reloaded.active_profile, "local");
        assert_eq!(reloaded.profiles["local"].model, "llama3");
    }

    #[test]
    fn test_delete_active_profile() {
        let dir = TempDir::new().unwrap();
        let mut config = temp_config(&dir);
        let formatter = Formatter::new(OutputFormat::Text, false);

        let result = delete_profile(&mut config, "default".to_string(), &formatter);
        assert!(result.is_err());
    }
}
