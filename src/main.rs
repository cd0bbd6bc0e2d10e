fn main() -> anyhow::Result<()> {
    mindwell_lib::run()
}
