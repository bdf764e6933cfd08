use serde::Serialize;

use crate::map::MapProvider;

/// A provider record as listed on the CLI: the channel record plus `primary`.
#[derive(Serialize)]
struct ProviderRow<'a> {
    #[serde(flatten)]
    provider: &'a MapProvider,
    primary: bool,
}

pub fn format_json_list(
    providers: &[MapProvider],
    w: &mut dyn std::io::Write,
) -> anyhow::Result<()> {
    let rows: Vec<ProviderRow> = providers
        .iter()
        .map(|provider| ProviderRow {
            provider,
            primary: provider.is_primary,
        })
        .collect();
    let json = serde_json::to_string_pretty(&rows)?;
    writeln!(w, "{}", json)?;
    Ok(())
}
