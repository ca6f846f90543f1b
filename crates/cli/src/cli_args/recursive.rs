use clap::Args;
use lock_export_converter::{Translator, WriteRecursive};
use miette::Context;
use std::path::Path;

#[derive(Debug, Args)]
pub struct RecursiveArgs {
    /// Stop at the first project that fails to convert.
    #[clap(long)]
    pub fail_fast: bool,
}

impl RecursiveArgs {
    pub async fn run(self, dir: &Path, translator: &Translator) -> miette::Result<()> {
        let RecursiveArgs { fail_fast } = self;
        WriteRecursive { lockfile_dir: dir, translator, fail_fast }
            .run()
            .await
            .wrap_err("convert the workspace lockfiles")
    }
}
