use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use crate::models::{join_numbers, parse_numbers, Draw, GameMode, HistoryDraw, SavedDraw};

pub const SAVED_LIMIT: u32 = 20;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS saved_draws (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    saved_at  TEXT NOT NULL,
    mode      TEXT NOT NULL,
    main      TEXT NOT NULL,
    special   INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS history (
    round   INTEGER PRIMARY KEY,
    date    TEXT NOT NULL,
    num_1   INTEGER NOT NULL,
    num_2   INTEGER NOT NULL,
    num_3   INTEGER NOT NULL,
    num_4   INTEGER NOT NULL,
    num_5   INTEGER NOT NULL,
    num_6   INTEGER NOT NULL,
    bonus   INTEGER NOT NULL
);
";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lottomaster.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

pub fn save_draws(conn: &Connection, mode: GameMode, draws: &[Draw]) -> Result<u32> {
    let tx = conn
        .unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let saved_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut saved = 0u32;
    // Insertion en ordre inverse : la lecture (id décroissant) restitue
    // le lot dans l'ordre de génération.
    for draw in draws.iter().rev() {
        tx.execute(
            "INSERT INTO saved_draws (saved_at, mode, main, special) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![saved_at, mode.tag(), join_numbers(&draw.main), draw.special],
        )
        .context("Échec de la sauvegarde")?;
        saved += 1;
    }

    tx.execute(
        "DELETE FROM saved_draws WHERE id NOT IN
         (SELECT id FROM saved_draws ORDER BY id DESC LIMIT ?1)",
        [SAVED_LIMIT],
    )
    .context("Échec de la purge des anciennes grilles")?;

    tx.commit().context("Échec du commit")?;
    Ok(saved)
}

pub fn fetch_saved(conn: &Connection) -> Result<Vec<SavedDraw>> {
    let mut stmt = conn.prepare(
        "SELECT id, saved_at, mode, main, special
         FROM saved_draws ORDER BY id DESC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, u8>(4)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut saved = Vec::with_capacity(rows.len());
    for (id, saved_at, mode, main, special) in rows {
        saved.push(SavedDraw {
            id,
            saved_at,
            mode: GameMode::from_tag(&mode)?,
            draw: Draw {
                main: parse_numbers(&main)?,
                special,
            },
        });
    }
    Ok(saved)
}

pub fn delete_saved(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn
        .execute("DELETE FROM saved_draws WHERE id = ?1", [id])
        .context("Échec de la suppression")?;
    Ok(changed > 0)
}

pub fn clear_saved(conn: &Connection) -> Result<u32> {
    let deleted = conn
        .execute("DELETE FROM saved_draws", [])
        .context("Échec de la suppression")?;
    Ok(deleted as u32)
}

pub fn count_saved(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM saved_draws", [], |row| row.get(0))?;
    Ok(count)
}

pub fn insert_history(conn: &Connection, draw: &HistoryDraw) -> Result<bool> {
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO history (round, date, num_1, num_2, num_3, num_4, num_5, num_6, bonus)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                draw.round,
                draw.date,
                draw.numbers[0],
                draw.numbers[1],
                draw.numbers[2],
                draw.numbers[3],
                draw.numbers[4],
                draw.numbers[5],
                draw.bonus,
            ],
        )
        .context("Échec de l'insertion")?;
    Ok(changed > 0)
}

pub fn fetch_history(conn: &Connection, limit: Option<u32>) -> Result<Vec<HistoryDraw>> {
    let mut stmt = conn.prepare(
        "SELECT round, date, num_1, num_2, num_3, num_4, num_5, num_6, bonus
         FROM history ORDER BY round DESC LIMIT ?1",
    )?;
    // LIMIT -1 : pas de limite en SQLite.
    let limit = limit.map(|l| l as i64).unwrap_or(-1);
    let draws = stmt
        .query_map([limit], |row| {
            Ok(HistoryDraw {
                round: row.get(0)?,
                date: row.get(1)?,
                numbers: [
                    row.get::<_, u8>(2)?,
                    row.get::<_, u8>(3)?,
                    row.get::<_, u8>(4)?,
                    row.get::<_, u8>(5)?,
                    row.get::<_, u8>(6)?,
                    row.get::<_, u8>(7)?,
                ],
                bonus: row.get(8)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

pub fn count_history(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        conn
    }

    fn test_draw(first: u8) -> Draw {
        Draw {
            main: vec![first, first + 1, first + 2, first + 3, first + 4, first + 5],
            special: 45,
        }
    }

    fn test_history(round: u32, date: &str) -> HistoryDraw {
        HistoryDraw {
            round,
            date: date.to_string(),
            numbers: [1, 2, 3, 4, 5, 6],
            bonus: 7,
        }
    }

    #[test]
    fn test_save_and_fetch() {
        let conn = test_conn();
        save_draws(&conn, GameMode::Lotto645, &[test_draw(1), test_draw(10)]).unwrap();

        let saved = fetch_saved(&conn).unwrap();
        assert_eq!(saved.len(), 2);
        // Le lot ressort dans l'ordre de génération.
        assert_eq!(saved[0].draw.main, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(saved[0].mode, GameMode::Lotto645);
        assert_eq!(saved[1].draw.main, vec![10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_batches_newest_first_in_generation_order() {
        let conn = test_conn();
        save_draws(&conn, GameMode::Lotto645, &[test_draw(1), test_draw(10)]).unwrap();
        save_draws(&conn, GameMode::Lotto645, &[test_draw(20), test_draw(30)]).unwrap();

        let saved = fetch_saved(&conn).unwrap();
        assert_eq!(saved.len(), 4);
        // Lot le plus récent d'abord, chaque lot dans l'ordre de génération.
        assert_eq!(saved[0].draw.main[0], 20);
        assert_eq!(saved[1].draw.main[0], 30);
        assert_eq!(saved[2].draw.main[0], 1);
        assert_eq!(saved[3].draw.main[0], 10);
    }

    #[test]
    fn test_save_caps_at_limit() {
        let conn = test_conn();
        for i in 0..30 {
            save_draws(&conn, GameMode::Lotto645, &[test_draw((i % 40) as u8 + 1)]).unwrap();
        }
        assert_eq!(count_saved(&conn).unwrap(), SAVED_LIMIT);

        let saved = fetch_saved(&conn).unwrap();
        assert_eq!(saved.len(), SAVED_LIMIT as usize);
        // Les 20 plus récentes survivent (ids 11 à 30).
        assert_eq!(saved[0].id, 30);
        assert_eq!(saved[19].id, 11);
    }

    #[test]
    fn test_delete_saved() {
        let conn = test_conn();
        save_draws(&conn, GameMode::Powerball, &[test_draw(1)]).unwrap();
        let saved = fetch_saved(&conn).unwrap();

        assert!(delete_saved(&conn, saved[0].id).unwrap());
        assert!(!delete_saved(&conn, saved[0].id).unwrap());
        assert_eq!(count_saved(&conn).unwrap(), 0);
    }

    #[test]
    fn test_clear_saved() {
        let conn = test_conn();
        save_draws(&conn, GameMode::Lotto645, &[test_draw(1), test_draw(2)]).unwrap();
        assert_eq!(clear_saved(&conn).unwrap(), 2);
        assert_eq!(count_saved(&conn).unwrap(), 0);
    }

    #[test]
    fn test_history_insert_and_duplicate() {
        let conn = test_conn();
        assert!(insert_history(&conn, &test_history(1001, "2024-01-06")).unwrap());
        assert!(!insert_history(&conn, &test_history(1001, "2024-01-06")).unwrap());
        assert_eq!(count_history(&conn).unwrap(), 1);
    }

    #[test]
    fn test_history_fetch_order_and_window() {
        let conn = test_conn();
        insert_history(&conn, &test_history(1001, "2024-01-06")).unwrap();
        insert_history(&conn, &test_history(1003, "2024-01-20")).unwrap();
        insert_history(&conn, &test_history(1002, "2024-01-13")).unwrap();

        let all = fetch_history(&conn, None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].round, 1003);
        assert_eq!(all[2].round, 1001);

        let windowed = fetch_history(&conn, Some(2)).unwrap();
        assert_eq!(windowed.len(), 2);
        assert_eq!(windowed[0].round, 1003);
    }

    #[test]
    fn test_saved_mode_roundtrip() {
        let conn = test_conn();
        save_draws(
            &conn,
            GameMode::Powerball,
            &[Draw {
                main: vec![3, 17, 25, 40, 69],
                special: 12,
            }],
        )
        .unwrap();

        let saved = fetch_saved(&conn).unwrap();
        assert_eq!(saved[0].mode, GameMode::Powerball);
        assert_eq!(saved[0].draw.special, 12);
    }
}
