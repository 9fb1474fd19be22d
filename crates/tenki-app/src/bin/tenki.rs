use anyhow::Result;

fn main() -> Result<()> {
    tenki_app::run(tenki_app::Variant::View)
}
