use crate::cli::GenerateArgs;
use crate::output::UserOutput;
use lb_compose::{Generator, GeneratorSettings};
use std::path::Path;

pub fn run_generate(config: &Path, args: &GenerateArgs, out: &dyn UserOutput) -> anyhow::Result<()> {
    let settings = GeneratorSettings {
        config_path: config.to_path_buf(),
        output_path: args.output.clone(),
        assets_dir: args.assets_dir.clone(),
        base_port: args.base_port,
        max_attempts: args.max_attempts,
        dry_run: args.dry_run,
    };

    let report = Generator::new(settings).run()?;

    if !report.written {
        out.document(&report.rendered);
        out.warning("Dry run: nothing was written");
        return Ok(());
    }

    out.success(&format!(
        "Wrote {} with {} backend(s)",
        args.output.display(),
        report.backends.len()
    ));
    for backend in &report.backends {
        out.status(&format!(
            "  {} -> localhost:{} ({})",
            backend.service_name(),
            backend.port,
            backend.source
        ));
    }

    Ok(())
}
