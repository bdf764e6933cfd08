use crate::map::MapProvider;

/// One provider field per line, in list order, for shell pipelines.
///
/// `Id` output is accepted back by `launch`/`directions`/`available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Name,
    Package,
}

impl Column {
    fn value(self, provider: &MapProvider) -> &str {
        match self {
            Column::Id => provider.map_type.as_str(),
            Column::Name => &provider.map_name,
            Column::Package => &provider.package_name,
        }
    }
}

pub fn format_column(
    providers: &[MapProvider],
    column: Column,
    w: &mut dyn std::io::Write,
) -> anyhow::Result<()> {
    for provider in providers {
        writeln!(w, "{}", column.value(provider))?;
    }
    Ok(())
}
