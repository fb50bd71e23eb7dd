fn main() -> anyhow::Result<()> {
    brrtrouter_redirect::cli::run_cli()
}
