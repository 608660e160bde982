use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::analysis::{FrequencyTag, NumberFrequency, Summary, RANGE_LABELS};
use crate::import::ImportResult;
use lottomaster_core::models::{color_band, ColorBand, Draw, GameMode, SavedDraw};

fn band_color(band: ColorBand) -> Color {
    match band {
        ColorBand::Yellow => Color::Yellow,
        ColorBand::Blue => Color::Blue,
        ColorBand::Red => Color::Red,
        ColorBand::Gray => Color::Grey,
        ColorBand::Green => Color::Green,
        ColorBand::PowerballMain => Color::White,
        ColorBand::PowerballSpecial => Color::Red,
    }
}

fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_generated(mode: GameMode, draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucune grille générée.");
        return;
    }

    println!("\n🎲 {} — {}\n", mode.label(), mode.description());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Numéros", mode.special_label()]);

    for (i, draw) in draws.iter().enumerate() {
        let special_color = band_color(color_band(mode, draw.special, true));
        table.add_row(vec![
            Cell::new(format!("{}", i + 1)),
            Cell::new(format_numbers(&draw.main)),
            Cell::new(format!("{:2}", draw.special)).fg(special_color),
        ]);
    }
    println!("{table}");
}

pub fn display_saved(saved: &[SavedDraw]) {
    if saved.is_empty() {
        println!("Aucune grille sauvegardée.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Sauvegardée le", "Mode", "Numéros", "Spécial"]);

    for entry in saved {
        let special_color = band_color(color_band(entry.mode, entry.draw.special, true));
        table.add_row(vec![
            Cell::new(entry.id.to_string()),
            Cell::new(&entry.saved_at),
            Cell::new(entry.mode.label()),
            Cell::new(format_numbers(&entry.draw.main)),
            Cell::new(format!("{:2}", entry.draw.special)).fg(special_color),
        ]);
    }
    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total tirages lus : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

pub fn display_stats(
    stats: &[NumberFrequency],
    ranges: &[u32; 5],
    odds: u32,
    evens: u32,
    summary: &Summary,
) {
    println!(
        "\n📊 Statistiques sur {} tirages (dernier : {})\n",
        summary.total_rounds, summary.latest_date
    );
    println!(
        "Numéro le plus fréquent : {} ({} sorties)\n",
        summary.top_number, summary.top_frequency
    );

    println!("── Fréquences par numéro ──");
    let max_freq = stats.iter().map(|s| s.frequency).max().unwrap_or(0).max(1);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Fréquence", "Bonus", "Retard", "Tag", ""]);

    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    for stat in &sorted {
        let tag_color = match stat.tag {
            FrequencyTag::Hot => Color::Green,
            FrequencyTag::Cold => Color::Red,
            FrequencyTag::Normal => Color::White,
        };
        let number_color = band_color(color_band(GameMode::Lotto645, stat.number, false));
        let bar_len = (stat.frequency * 30 / max_freq) as usize;
        table.add_row(vec![
            Cell::new(format!("{:2}", stat.number)).fg(number_color),
            Cell::new(stat.frequency.to_string()),
            Cell::new(stat.bonus_frequency.to_string()),
            Cell::new(stat.gap.to_string()),
            Cell::new(stat.tag.to_string()).fg(tag_color),
            Cell::new("█".repeat(bar_len)),
        ]);
    }
    println!("{table}");

    println!("\n── Répartition par tranche ──");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Tranche", "Sorties"]);
    for (label, count) in RANGE_LABELS.iter().zip(ranges.iter()) {
        table.add_row(vec![label.to_string(), count.to_string()]);
    }
    println!("{table}");

    println!("\n── Pairs / impairs ──");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Impairs", "Pairs"]);
    table.add_row(vec![odds.to_string(), evens.to_string()]);
    println!("{table}");
}

pub fn share_message(mode: GameMode, draw: &Draw) -> String {
    let numbers = draw
        .main
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "🍀 Numéros porte-bonheur {} de la semaine\nNuméros recommandés : {}\n{} : {}",
        mode.label(),
        numbers,
        mode.special_label(),
        draw.special
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numbers() {
        assert_eq!(format_numbers(&[3, 17, 42]), " 3 - 17 - 42");
    }

    #[test]
    fn test_share_message_lotto() {
        let draw = Draw {
            main: vec![3, 7, 12, 23, 34, 41],
            special: 15,
        };
        let msg = share_message(GameMode::Lotto645, &draw);
        assert!(msg.contains("Loto 6/45"));
        assert!(msg.contains("3, 7, 12, 23, 34, 41"));
        assert!(msg.contains("Bonus : 15"));
    }

    #[test]
    fn test_share_message_powerball() {
        let draw = Draw {
            main: vec![5, 19, 28, 50, 69],
            special: 22,
        };
        let msg = share_message(GameMode::Powerball, &draw);
        assert!(msg.contains("Powerball : 22"));
    }
}
