fn main() -> anyhow::Result<()> {
    model_builder::cli::run()
}
