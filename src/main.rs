fn main() -> anyhow::Result<()> {
    terradisc::flow::run()
}
