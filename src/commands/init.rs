use crate::output::UserOutput;
use std::path::Path;

const TEMPLATE: &str = r#"{
  "port": ":8087",
  "backends": [
    "http://backend1:80",
    "http://backend2:80",
    "http://backend3:80"
  ],
  "health_check_path": "/health",
  "health_check_interval": "5s",
  "rate_limit": { "capacity": 100, "rate": 10 },
  "client_configs": []
}
"#;

pub fn run_init(config: &Path, force: bool, out: &dyn UserOutput) -> anyhow::Result<()> {
    // Check if file exists and force flag not set
    if config.exists() && !force {
        out.error(&format!("Error: {} already exists", config.display()));
        out.error("Use --force to overwrite");
        return Err(anyhow::anyhow!("File already exists"));
    }

    if let Some(parent) = config.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config, TEMPLATE)?;

    out.success(&format!("Created {}", config.display()));
    out.status("\nNext steps:");
    out.status(&format!(
        "  1. List your backends in {}",
        config.display()
    ));
    out.status("  2. Add an nginx.conf next to it for the backends to share");
    out.status("  3. Run: lbc generate");

    Ok(())
}
