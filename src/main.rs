fn main() -> anyhow::Result<()> {
    dcmwrangle::app::run()
}
