use color_eyre::eyre::WrapErr;
use database::{ConfigLoader, DatabaseGenerator, DatabaseLoader};
use env_logger::Env;
use league_core::utils::TimeEstimation;
use league_core::{CompetitionConfig, SeasonSimulator};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let (database, estimated) = TimeEstimation::estimate(DatabaseLoader::load);
    let database = database?;

    info!("database loaded: {} ms", estimated);

    let config = load_config(&database.config)?;

    let seed = match env::var("SEED") {
        Ok(seed) => seed.parse::<u64>().wrap_err("SEED must be an unsigned integer")?,
        Err(_) => rand::random(),
    };

    info!("season seed: {}", seed);

    let mut rng = StdRng::seed_from_u64(seed);

    let registry = DatabaseGenerator::generate(&database, &mut rng)?;

    let mut simulator = SeasonSimulator::new(&registry, config, &mut rng)?;

    let (summary, estimated) = TimeEstimation::estimate(|| simulator.run(&registry, &mut rng));
    let summary = summary?;

    info!("season simulated in {} ms over {} days", estimated, summary.days);

    for (position, row) in summary.standings.rows().iter().enumerate() {
        let name = registry
            .club(row.club_id)
            .map_or("unknown", |club| club.name.as_str());

        info!(
            "{:>2}. {:<24} played {:>2}  sets {:>3}  games {:>4}",
            position + 1,
            name,
            row.played,
            row.sets_won,
            row.games_won
        );
    }

    for club_id in &summary.champions {
        if let Some(club) = registry.club(*club_id) {
            info!("champion: {}", club.name);
        }
    }

    if env::var("OUTPUT").is_ok_and(|output| output == "json") {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn load_config(default: &CompetitionConfig) -> color_eyre::Result<CompetitionConfig> {
    let Ok(path) = env::var("LEAGUE_CONFIG") else {
        return Ok(default.clone());
    };

    let json = std::fs::read_to_string(&path).wrap_err_with(|| format!("cannot read {path}"))?;
    let config = ConfigLoader::load_from_str(&json).wrap_err_with(|| format!("invalid config {path}"))?;

    info!("config loaded from {}", path);

    Ok(config)
}
