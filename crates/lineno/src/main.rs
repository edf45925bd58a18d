fn main() -> anyhow::Result<()> {
    lineno::init();

    lineno::cli::run()
}
