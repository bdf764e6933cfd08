use crate::map::MapProvider;

pub fn format_tsv(
    providers: &[MapProvider],
    w: &mut dyn std::io::Write,
) -> anyhow::Result<()> {
    writeln!(w, "type\tname\tpackage\tprimary")?;
    for provider in providers {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            provider.map_type, provider.map_name, provider.package_name, provider.is_primary
        )?;
    }
    Ok(())
}
