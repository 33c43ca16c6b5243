use crate::output::UserOutput;
use lb_compose::config::Parser as ConfigParser;
use lb_compose::manifest::backend_service_name;
use std::path::Path;

pub fn run_validate(config_path: &Path, base_port: u16, out: &dyn UserOutput) -> anyhow::Result<()> {
    out.status(&format!("Validating {}...", config_path.display()));

    let config = match ConfigParser::new().load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            out.error("Configuration failed to load");
            return Err(e.into());
        }
    };

    out.success("Configuration is valid");
    out.blank();

    // The parser already rejected an invalid port.
    if let Ok(port) = config.balancer_port() {
        out.status(&format!("Load balancer port: {}", port));
    }
    out.status(&format!("Health check path: {}", config.health_check_path()));
    out.blank();

    out.status(&format!("Backends: {}", config.backend_count()));
    for (position, source) in config.backends.iter().enumerate() {
        let index = position + 1;
        let start = u32::from(base_port) + position as u32;
        let probe = if start <= u32::from(u16::MAX) {
            format!("probes from {}", start)
        } else {
            "start port out of range".to_string()
        };
        out.status(&format!(
            "  - {} <- {} ({})",
            backend_service_name(index),
            source,
            probe
        ));
    }

    Ok(())
}
