use lock_export_diagnostics::Result;

#[tokio::main(flavor = "multi_thread")]
pub async fn main() -> Result<()> {
    lock_export_cli::run_cli().await
}
