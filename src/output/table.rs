use comfy_table::{Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;

use crate::map::MapProvider;

pub fn format_table(
    providers: &[MapProvider],
    w: &mut dyn std::io::Write,
    no_color: bool,
) -> anyhow::Result<()> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Type", "Name", "Package", "Primary"]);

    for provider in providers {
        let type_str = provider.map_type.to_string();
        let type_display = if no_color {
            type_str
        } else if provider.is_primary {
            type_str.green().bold().to_string()
        } else {
            type_str.cyan().to_string()
        };

        table.add_row(vec![
            Cell::new(type_display),
            Cell::new(&provider.map_name),
            Cell::new(&provider.package_name),
            Cell::new(if provider.is_primary { "yes" } else { "" }),
        ]);
    }

    writeln!(w, "{}", table)?;
    Ok(())
}
