//! `overlay-proxy check`: validate a config file and show what it means.

use crate::config::{ProxyConfig, HELPER_MOUNT_POINT};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Run the `overlay-proxy check` command.
pub fn run_check(config: &ProxyConfig, source: Option<&Path>) -> Result<()> {
    println!();
    println!("  {} Config is valid!", "✓".green().bold());
    match source {
        Some(path) => println!("  File:    {}", path.display().to_string().dimmed()),
        None => println!("  File:    {}", "(built-in defaults)".dimmed()),
    }
    println!();
    println!(
        "  Helper volume:   {}:{}:ro",
        config.helper_volume.cyan(),
        HELPER_MOUNT_POINT
    );
    println!(
        "  Wrapper command: {}",
        config.wrapper_command.join(" ").cyan()
    );
    println!(
        "  Hostname:        {} {} {}",
        match config.hostname.from_label {
            Some(ref label) => format!("label '{}' or name", label),
            None => "container name".to_string(),
        },
        "→".dimmed(),
        format!(
            "s/{}/{}/",
            config.hostname.pattern.as_str(),
            config.hostname.replacement
        )
        .cyan()
    );
    println!(
        "  DNS:             {} (agent '{}' on port {}, default domain {})",
        config.dns.injection.to_string().cyan(),
        config.dns.agent_container,
        config.dns.agent_port,
        config.dns.default_domain
    );
    println!("  DNS server:      {}", config.docker_bridge_ip);
    println!(
        "  Default IPAM:    {}",
        if config.no_default_ipam {
            "off".yellow()
        } else {
            "on".green()
        }
    );
    println!(
        "  Timeouts:        daemon {:?}, agent probe {:?}",
        config.timeouts.daemon, config.timeouts.probe
    );
    println!();

    Ok(())
}
