use lottomaster_core::models::HistoryDraw;

pub const POOL_SIZE: u8 = 45;
pub const RANGE_LABELS: [&str; 5] = ["1-10", "11-20", "21-30", "31-40", "41-45"];

#[derive(Debug, Clone)]
pub struct NumberFrequency {
    pub number: u8,
    pub frequency: u32,
    pub bonus_frequency: u32,
    pub gap: u32,
    pub tag: FrequencyTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyTag {
    Hot,
    Cold,
    Normal,
}

impl std::fmt::Display for FrequencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrequencyTag::Hot => write!(f, "HOT"),
            FrequencyTag::Cold => write!(f, "COLD"),
            FrequencyTag::Normal => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Summary {
    pub total_rounds: usize,
    pub top_number: u8,
    pub top_frequency: u32,
    pub latest_date: String,
}

/// Les tirages sont attendus du plus récent au plus ancien.
pub fn compute_frequencies(draws: &[HistoryDraw]) -> Vec<NumberFrequency> {
    let mut stats: Vec<NumberFrequency> = (1..=POOL_SIZE)
        .map(|n| NumberFrequency {
            number: n,
            frequency: 0,
            bonus_frequency: 0,
            gap: 0,
            tag: FrequencyTag::Normal,
        })
        .collect();

    for (i, draw) in draws.iter().enumerate() {
        for &n in &draw.numbers {
            let idx = (n - 1) as usize;
            if idx < stats.len() {
                // Première apparition : fréquence encore à zéro.
                if stats[idx].frequency == 0 {
                    stats[idx].gap = i as u32;
                }
                stats[idx].frequency += 1;
            }
        }
        let idx = (draw.bonus - 1) as usize;
        if idx < stats.len() {
            stats[idx].bonus_frequency += 1;
        }
    }

    for stat in &mut stats {
        if stat.frequency == 0 {
            stat.gap = draws.len() as u32;
        }
    }

    tag_frequencies(&mut stats, draws.len());
    stats
}

fn tag_frequencies(stats: &mut [NumberFrequency], draw_count: usize) {
    if draw_count == 0 {
        return;
    }
    let expected = draw_count as f64 * 6.0 / POOL_SIZE as f64;
    let threshold = 0.3;

    for stat in stats.iter_mut() {
        let deviation = (stat.frequency as f64 - expected) / expected;
        if deviation > threshold {
            stat.tag = FrequencyTag::Hot;
        } else if deviation < -threshold {
            stat.tag = FrequencyTag::Cold;
        } else {
            stat.tag = FrequencyTag::Normal;
        }
    }
}

pub fn range_distribution(draws: &[HistoryDraw]) -> [u32; 5] {
    let mut ranges = [0u32; 5];
    for draw in draws {
        for &n in &draw.numbers {
            let band = match n {
                1..=10 => 0,
                11..=20 => 1,
                21..=30 => 2,
                31..=40 => 3,
                _ => 4,
            };
            ranges[band] += 1;
        }
    }
    ranges
}

pub fn odd_even(draws: &[HistoryDraw]) -> (u32, u32) {
    let mut odds = 0u32;
    let mut evens = 0u32;
    for draw in draws {
        for &n in &draw.numbers {
            if n % 2 == 0 {
                evens += 1;
            } else {
                odds += 1;
            }
        }
    }
    (odds, evens)
}

pub fn summarize(draws: &[HistoryDraw], stats: &[NumberFrequency]) -> Option<Summary> {
    let latest = draws.first()?;
    let top = stats.iter().max_by_key(|s| s.frequency)?;
    Some(Summary {
        total_rounds: draws.len(),
        top_number: top.number,
        top_frequency: top.frequency,
        latest_date: latest.date.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(round: u32, numbers: [u8; 6], bonus: u8) -> HistoryDraw {
        HistoryDraw {
            round,
            date: format!("2024-01-{:02}", round),
            numbers,
            bonus,
        }
    }

    #[test]
    fn test_frequencies_and_gap() {
        let draws = vec![
            draw(3, [1, 2, 3, 4, 5, 6], 7),
            draw(2, [1, 11, 21, 31, 41, 45], 8),
            draw(1, [1, 2, 12, 22, 32, 42], 9),
        ];
        let stats = compute_frequencies(&draws);

        assert_eq!(stats[0].frequency, 3); // le 1 sort partout
        assert_eq!(stats[0].gap, 0);
        assert_eq!(stats[1].frequency, 2); // le 2 manque au tirage du milieu
        assert_eq!(stats[1].gap, 0);
        assert_eq!(stats[11].frequency, 1); // le 12, vu au plus ancien seulement
        assert_eq!(stats[11].gap, 2);
        assert_eq!(stats[43].frequency, 0); // le 44 jamais vu
        assert_eq!(stats[43].gap, 3);
    }

    #[test]
    fn test_gap_keeps_first_appearance() {
        // Le 5 sort au tirage le plus récent et à nouveau plus loin :
        // son retard reste 0, les sorties anciennes ne l'écrasent pas.
        let draws = vec![
            draw(4, [5, 10, 20, 30, 40, 45], 7),
            draw(3, [1, 2, 3, 4, 6, 8], 9),
            draw(2, [5, 11, 21, 31, 41, 44], 7),
            draw(1, [5, 12, 22, 32, 42, 43], 7),
        ];
        let stats = compute_frequencies(&draws);
        assert_eq!(stats[4].frequency, 3);
        assert_eq!(stats[4].gap, 0);
        assert_eq!(stats[10].gap, 2); // le 11, vu au tirage d'index 2 seulement
    }

    #[test]
    fn test_bonus_counted_separately() {
        let draws = vec![draw(1, [1, 2, 3, 4, 5, 6], 7)];
        let stats = compute_frequencies(&draws);
        assert_eq!(stats[6].frequency, 0);
        assert_eq!(stats[6].bonus_frequency, 1);
    }

    #[test]
    fn test_hot_cold_tags() {
        // 10 tirages, le 1 sort à chaque fois, le 44 jamais.
        let draws: Vec<HistoryDraw> = (1..=10)
            .map(|r| draw(r, [1, 2, 3, 4, 5, 6], 7))
            .collect();
        let stats = compute_frequencies(&draws);

        assert_eq!(stats[0].tag, FrequencyTag::Hot);
        assert_eq!(stats[43].tag, FrequencyTag::Cold);
    }

    #[test]
    fn test_no_tags_on_empty_history() {
        let stats = compute_frequencies(&[]);
        assert!(stats.iter().all(|s| s.tag == FrequencyTag::Normal));
        assert!(stats.iter().all(|s| s.frequency == 0));
    }

    #[test]
    fn test_range_distribution() {
        let draws = vec![draw(1, [1, 10, 11, 25, 37, 45], 7)];
        assert_eq!(range_distribution(&draws), [2, 1, 1, 1, 1]);
    }

    #[test]
    fn test_odd_even() {
        let draws = vec![draw(1, [1, 2, 3, 4, 5, 6], 7)];
        assert_eq!(odd_even(&draws), (3, 3));
    }

    #[test]
    fn test_summary() {
        let draws = vec![
            draw(2, [1, 2, 3, 4, 5, 6], 7),
            draw(1, [1, 11, 21, 31, 41, 45], 8),
        ];
        let stats = compute_frequencies(&draws);
        let summary = summarize(&draws, &stats).unwrap();

        assert_eq!(summary.total_rounds, 2);
        assert_eq!(summary.top_number, 1);
        assert_eq!(summary.top_frequency, 2);
        assert_eq!(summary.latest_date, "2024-01-02");
    }

    #[test]
    fn test_summary_empty() {
        let stats = compute_frequencies(&[]);
        assert!(summarize(&[], &stats).is_none());
    }
}
