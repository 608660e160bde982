use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::models::{Draw, DrawConfig};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Numéro {number} hors limites (1-{max})")]
    OutOfRange { number: u8, max: u8 },

    #[error("Le numéro {0} est à la fois à inclure et à exclure")]
    Conflict(u8),

    #[error("Panier insuffisant : {available} candidats pour {needed} numéros à tirer")]
    PoolExhausted { available: usize, needed: usize },
}

#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub exclude: Vec<u8>,
    pub include: Option<u8>,
    pub games: usize,
}

pub fn generate(
    config: &DrawConfig,
    request: &GenerationRequest,
    seed: Option<u64>,
) -> Result<Vec<Draw>, GenerateError> {
    validate(config, request)?;

    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut draws = Vec::with_capacity(request.games);
    for _ in 0..request.games {
        draws.push(draw_one(config, request, &mut rng)?);
    }
    Ok(draws)
}

fn validate(config: &DrawConfig, request: &GenerationRequest) -> Result<(), GenerateError> {
    if let Some(n) = request.include {
        if n < 1 || n > config.max_main {
            return Err(GenerateError::OutOfRange {
                number: n,
                max: config.max_main,
            });
        }
    }
    for &n in &request.exclude {
        if n < 1 || n > config.max_main {
            return Err(GenerateError::OutOfRange {
                number: n,
                max: config.max_main,
            });
        }
    }
    if let Some(n) = request.include {
        if request.exclude.contains(&n) {
            return Err(GenerateError::Conflict(n));
        }
    }

    let available = base_pool(config, request).len();
    let mut needed = config
        .main_count
        .saturating_sub(usize::from(request.include.is_some()));
    if config.special_from_main_pool {
        needed += 1;
    }
    if available < needed {
        return Err(GenerateError::PoolExhausted { available, needed });
    }
    Ok(())
}

fn base_pool(config: &DrawConfig, request: &GenerationRequest) -> Vec<u8> {
    (1..=config.max_main)
        .filter(|n| !request.exclude.contains(n))
        .filter(|n| request.include != Some(*n))
        .collect()
}

fn draw_one(
    config: &DrawConfig,
    request: &GenerationRequest,
    rng: &mut StdRng,
) -> Result<Draw, GenerateError> {
    let mut pool = base_pool(config, request);

    let mut main = Vec::with_capacity(config.main_count);
    if let Some(n) = request.include {
        if config.main_count > 0 {
            main.push(n);
        }
    }
    while main.len() < config.main_count {
        let idx = rng.random_range(0..pool.len());
        main.push(pool.remove(idx));
    }
    main.sort_unstable();

    let special = if config.special_from_main_pool {
        pool[rng.random_range(0..pool.len())]
    } else {
        // Plage indépendante : on écarte tout de même les numéros déjà tirés
        // au cas où les deux plages se recouvrent.
        let candidates: Vec<u8> = (1..=config.special_range)
            .filter(|n| !main.contains(n))
            .collect();
        if candidates.is_empty() {
            return Err(GenerateError::PoolExhausted {
                available: 0,
                needed: 1,
            });
        }
        candidates[rng.random_range(0..candidates.len())]
    };

    Ok(Draw { main, special })
}
