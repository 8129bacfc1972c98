//! The tsbind binary: load a manifest, run one projection, write artifacts.

mod args;
mod logging;
mod output;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use tsbind_core::{Compiler, Settings};
use tsbind_model::ManifestModel;

use crate::args::CliArgs;

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = CliArgs::parse();

    // The manifest is the only fatal failure point of a run.
    let model = ManifestModel::from_path(&args.manifest)
        .with_context(|| format!("cannot load manifest {}", args.manifest.display()))?;

    let mut settings = Settings {
        recursion: args.recursion.into(),
        use_null: args.use_null,
        read_only: !args.mutable_fields,
        global_class: args.global_class,
        ..Settings::default()
    };
    if let Some(module) = args.module_name.or_else(|| model.module().map(String::from)) {
        settings.module_name = module;
    }
    settings.blacklist.extend(args.blacklist);

    let mut compiler = Compiler::new(settings, &model);
    compiler.add_all(
        model
            .exposed()
            .iter()
            .map(|s| s.as_str())
            .chain(args.root.iter().map(|s| s.as_str())),
    );
    compiler.walk();

    let artifacts = compiler.render();
    let written = output::write_artifacts(&args.out, &artifacts);
    info!(
        written,
        total = artifacts.len(),
        out = %args.out.display(),
        "projection complete"
    );
    Ok(())
}
