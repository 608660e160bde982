use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Lotto645,
    Powerball,
}

impl GameMode {
    pub fn config(&self) -> DrawConfig {
        match self {
            GameMode::Lotto645 => DrawConfig {
                max_main: 45,
                main_count: 6,
                special_range: 45,
                special_from_main_pool: true,
            },
            GameMode::Powerball => DrawConfig {
                max_main: 69,
                main_count: 5,
                special_range: 26,
                special_from_main_pool: false,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Lotto645 => "Loto 6/45",
            GameMode::Powerball => "Powerball",
        }
    }

    pub fn special_label(&self) -> &'static str {
        match self {
            GameMode::Lotto645 => "Bonus",
            GameMode::Powerball => "Powerball",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameMode::Lotto645 => "6 numéros parmi 1-45, plus un bonus tiré du même panier.",
            GameMode::Powerball => "5 numéros parmi 1-69, plus un Powerball parmi 1-26.",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            GameMode::Lotto645 => "lotto",
            GameMode::Powerball => "powerball",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "lotto" => Ok(GameMode::Lotto645),
            "powerball" => Ok(GameMode::Powerball),
            other => bail!("Mode inconnu : '{}'", other),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DrawConfig {
    pub max_main: u8,
    pub main_count: usize,
    pub special_range: u8,
    pub special_from_main_pool: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub main: Vec<u8>,
    pub special: u8,
}

#[derive(Debug, Clone)]
pub struct SavedDraw {
    pub id: i64,
    pub saved_at: String,
    pub mode: GameMode,
    pub draw: Draw,
}

#[derive(Debug, Clone)]
pub struct HistoryDraw {
    pub round: u32,
    pub date: String,
    pub numbers: [u8; 6],
    pub bonus: u8,
}

pub fn validate_history(numbers: &[u8; 6], bonus: u8) -> Result<()> {
    for &n in numbers {
        if n < 1 || n > 45 {
            bail!("Numéro {} hors limites (1-45)", n);
        }
    }
    if bonus < 1 || bonus > 45 {
        bail!("Bonus {} hors limites (1-45)", bonus);
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Numéro en double : {}", numbers[i]);
            }
        }
    }
    if numbers.contains(&bonus) {
        bail!("Bonus {} déjà présent parmi les numéros", bonus);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBand {
    Yellow,
    Blue,
    Red,
    Gray,
    Green,
    PowerballMain,
    PowerballSpecial,
}

pub fn color_band(mode: GameMode, number: u8, is_special: bool) -> ColorBand {
    if mode == GameMode::Powerball {
        return if is_special {
            ColorBand::PowerballSpecial
        } else {
            ColorBand::PowerballMain
        };
    }
    match number {
        1..=10 => ColorBand::Yellow,
        11..=20 => ColorBand::Blue,
        21..=30 => ColorBand::Red,
        31..=40 => ColorBand::Gray,
        _ => ColorBand::Green,
    }
}

pub fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn parse_numbers(s: &str) -> Result<Vec<u8>> {
    s.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<u8>()
                .map_err(|_| anyhow::anyhow!("Impossible de parser le numéro : '{}'", part))
        })
        .collect()
}
