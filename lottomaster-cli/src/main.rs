mod analysis;
mod display;
mod import;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::analysis::{compute_frequencies, odd_even, range_distribution, summarize};
use crate::display::{
    display_generated, display_import_summary, display_saved, display_stats, share_message,
};
use lottomaster_core::db::{
    clear_saved, count_history, count_saved, db_path, delete_saved, fetch_history, fetch_saved,
    migrate, open_db, save_draws,
};
use lottomaster_core::generator::{generate, GenerationRequest};
use lottomaster_core::models::{parse_numbers, GameMode};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum ModeArg {
    #[default]
    Lotto,
    Powerball,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Lotto => GameMode::Lotto645,
            ModeArg::Powerball => GameMode::Powerball,
        }
    }
}

#[derive(Parser)]
#[command(name = "lottomaster", about = "Générateur de grilles Loto 6/45 et Powerball")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Générer des grilles de numéros
    Generate {
        /// Mode de jeu
        #[arg(short, long, default_value = "lotto")]
        mode: ModeArg,

        /// Nombre de grilles (1 à 5)
        #[arg(short, long, default_value = "1")]
        games: usize,

        /// Numéros à exclure, séparés par des virgules (ex: 1,15,30)
        #[arg(short, long)]
        exclude: Option<String>,

        /// Numéro à inclure obligatoirement
        #[arg(short, long)]
        include: Option<u8>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Sauvegarder les grilles générées
        #[arg(long)]
        save: bool,

        /// Afficher le message de partage de la première grille
        #[arg(long)]
        share: bool,
    },

    /// Lister les grilles sauvegardées
    Saved {
        /// Supprimer la grille portant cet identifiant
        #[arg(short, long)]
        delete: Option<i64>,
    },

    /// Supprimer toutes les grilles sauvegardées
    Clear,

    /// Importer l'historique des tirages depuis un fichier JSON
    Import {
        /// Chemin vers le fichier JSON
        #[arg(short, long, default_value = "assets/all.json")]
        file: PathBuf,
    },

    /// Afficher les statistiques de l'historique
    Stats {
        /// Fenêtre d'analyse (nombre de tirages, tout par défaut)
        #[arg(short, long)]
        window: Option<u32>,
    },

    /// Afficher le chemin de la base de données
    DbPath,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Generate {
            mode,
            games,
            exclude,
            include,
            seed,
            save,
            share,
        } => cmd_generate(&conn, mode.into(), games, exclude, include, seed, save, share),
        Command::Saved { delete } => cmd_saved(&conn, delete),
        Command::Clear => cmd_clear(&conn),
        Command::Import { file } => cmd_import(&conn, &file),
        Command::Stats { window } => cmd_stats(&conn, window),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_generate(
    conn: &lottomaster_core::rusqlite::Connection,
    mode: GameMode,
    games: usize,
    exclude: Option<String>,
    include: Option<u8>,
    seed: Option<u64>,
    save: bool,
    share: bool,
) -> Result<()> {
    if !(1..=5).contains(&games) {
        bail!("Le nombre de grilles doit être entre 1 et 5");
    }

    let exclude = match exclude {
        Some(raw) => parse_numbers(&raw).context("Liste d'exclusions invalide")?,
        None => Vec::new(),
    };

    let request = GenerationRequest {
        exclude,
        include,
        games,
    };
    let draws = generate(&mode.config(), &request, seed)?;

    display_generated(mode, &draws);

    if share {
        println!("\n{}", share_message(mode, &draws[0]));
    }

    if save {
        let saved = save_draws(conn, mode, &draws)?;
        println!(
            "\n{} grille(s) sauvegardée(s) ({} plus récentes conservées).",
            saved,
            lottomaster_core::db::SAVED_LIMIT
        );
    }

    Ok(())
}

fn cmd_saved(conn: &lottomaster_core::rusqlite::Connection, delete: Option<i64>) -> Result<()> {
    if let Some(id) = delete {
        if delete_saved(conn, id)? {
            println!("Grille {} supprimée.", id);
        } else {
            println!("Aucune grille avec l'identifiant {}.", id);
        }
    }
    display_saved(&fetch_saved(conn)?);
    Ok(())
}

fn cmd_clear(conn: &lottomaster_core::rusqlite::Connection) -> Result<()> {
    let n = count_saved(conn)?;
    if n == 0 {
        println!("Aucune grille sauvegardée.");
        return Ok(());
    }

    let confirm = prompt(&format!("Supprimer les {} grilles sauvegardées ? (o/n) : ", n))?;
    if confirm.trim().to_lowercase() == "o" {
        let deleted = clear_saved(conn)?;
        println!("{} grille(s) supprimée(s).", deleted);
    } else {
        println!("Suppression annulée.");
    }
    Ok(())
}

fn cmd_import(conn: &lottomaster_core::rusqlite::Connection, file: &PathBuf) -> Result<()> {
    let result = import::import_json(conn, file)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_stats(conn: &lottomaster_core::rusqlite::Connection, window: Option<u32>) -> Result<()> {
    let n = count_history(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : lottomaster import");
        return Ok(());
    }

    let draws = fetch_history(conn, window)?;
    let stats = compute_frequencies(&draws);
    let ranges = range_distribution(&draws);
    let (odds, evens) = odd_even(&draws);
    let summary = summarize(&draws, &stats)
        .context("Historique vide après fenêtrage")?;

    display_stats(&stats, &ranges, odds, evens, &summary);
    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}
