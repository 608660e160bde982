use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use lottomaster_core::db::insert_history;
use lottomaster_core::models::{validate_history, HistoryDraw};
use lottomaster_core::rusqlite::Connection;

#[derive(Debug, Deserialize)]
struct RawRound {
    #[serde(alias = "drwNo")]
    round: u32,

    #[serde(alias = "drwNoDate", default)]
    date: String,

    #[serde(alias = "drwtNo1")]
    no1: u8,
    #[serde(alias = "drwtNo2")]
    no2: u8,
    #[serde(alias = "drwtNo3")]
    no3: u8,
    #[serde(alias = "drwtNo4")]
    no4: u8,
    #[serde(alias = "drwtNo5")]
    no5: u8,
    #[serde(alias = "drwtNo6")]
    no6: u8,

    #[serde(alias = "bnusNo")]
    bonus: u8,
}

fn normalize(raw: RawRound) -> Result<HistoryDraw> {
    let mut numbers = [raw.no1, raw.no2, raw.no3, raw.no4, raw.no5, raw.no6];
    numbers.sort_unstable();
    validate_history(&numbers, raw.bonus)
        .with_context(|| format!("Tirage {} invalide", raw.round))?;
    Ok(HistoryDraw {
        round: raw.round,
        date: raw.date,
        numbers,
        bonus: raw.bonus,
    })
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_json(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).context("JSON invalide")?;

    // Le fichier officiel est un objet indexé par tirage ; on accepte
    // aussi un tableau plat.
    let records: Vec<serde_json::Value> = match value {
        serde_json::Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        serde_json::Value::Array(items) => items,
        _ => bail!("Format inattendu : objet ou tableau de tirages attendu"),
    };

    let tx = conn
        .unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for record in records {
        result.total_records += 1;
        let parsed = serde_json::from_value::<RawRound>(record)
            .context("Champs manquants ou illisibles")
            .and_then(normalize);
        match parsed {
            Ok(draw) => match insert_history(&tx, &draw) {
                Ok(true) => result.inserted += 1,
                Ok(false) => result.skipped += 1,
                Err(e) => {
                    eprintln!("Erreur insertion tirage {} : {}", result.total_records, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                eprintln!("Erreur parsing tirage {} : {:#}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    Ok(result)
}
