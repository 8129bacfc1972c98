use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use tsbind_core::Recursion;

/// CLI arguments for the tsbind binary.
#[derive(Parser, Debug)]
#[command(
    name = "tsbind",
    version,
    about = "Project a reflected class surface into TypeScript declarations and a Lua shim"
)]
pub struct CliArgs {
    /// Path to the class-surface manifest (JSON).
    #[arg(short = 'm', long)]
    pub manifest: PathBuf,

    /// Output directory for all generated artifacts.
    #[arg(short = 'o', long, default_value = "generated")]
    pub out: PathBuf,

    /// Module name to wrap declarations in. Overrides the manifest's value.
    #[arg(long = "moduleName", alias = "module-name")]
    pub module_name: Option<String>,

    /// Whether encountered-but-unregistered types are fully expanded.
    #[arg(long, value_enum, default_value_t = RecursionArg::None, ignore_case = true)]
    pub recursion: RecursionArg,

    /// Widen non-primitive parameter and return types with `| null`.
    #[arg(long = "useNull", alias = "use-null")]
    pub use_null: bool,

    /// Render fields as mutable instead of readonly.
    #[arg(long)]
    pub mutable_fields: bool,

    /// Exclude a fully-qualified member (`a.b.Type#member`). Repeatable.
    #[arg(long)]
    pub blacklist: Vec<String>,

    /// Class whose static methods are exported as free functions.
    #[arg(long = "globalClass", alias = "global-class")]
    pub global_class: Option<String>,

    /// Additional root class to register, beyond the manifest's exposed
    /// set. Repeatable.
    #[arg(long)]
    pub root: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecursionArg {
    None,
    All,
}

impl From<RecursionArg> for Recursion {
    fn from(value: RecursionArg) -> Self {
        match value {
            RecursionArg::None => Recursion::None,
            RecursionArg::All => Recursion::All,
        }
    }
}
