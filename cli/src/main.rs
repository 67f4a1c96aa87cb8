use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use engine::api::{EncounterConfig, simulate_encounter};
use engine::dice::{Dice, Roller};
use engine::magic::{
    available_spells, natural_inclination_check, perform_cast, resolve_effect, spell_by_name,
    validate_cast,
};
use engine::{Character, Characteristic};

#[derive(Subcommand)]
enum Cmd {
    /// Roll 2d6 repeatedly with a fixed seed
    Roll {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Number of rolls
        #[arg(long, default_value_t = 5)]
        rolls: u32,
    },
    /// Roll a fresh characteristic set and show the derived LP pool
    Stats {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// List the spells castable in a given context
    Spells {
        /// List the combat-context catalog
        #[arg(long)]
        in_combat: bool,
        /// List the spells available at 0 LP or below
        #[arg(long)]
        dead: bool,
    },
    /// Validate and cast a single spell against supplied resources
    Cast {
        /// Spell name, e.g. FIREBALL
        spell: String,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Current POW available
        #[arg(long, default_value_t = 0)]
        pow: i32,
        /// Current LP (for sacrifice checks)
        #[arg(long, default_value_t = 100)]
        lp: i32,
        /// Cast during combat
        #[arg(long)]
        in_combat: bool,
        /// Cast while at 0 LP or below
        #[arg(long)]
        dead: bool,
        /// Confirm the LP sacrifice if one is required
        #[arg(long)]
        confirm_sacrifice: bool,
    },
    /// Simulate a full combat encounter and print the log
    Fight {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Builtin enemy id (goblin, demonspawn_warrior)
        #[arg(long, default_value = "goblin")]
        enemy: String,
        /// Path to an enemy JSON file (overrides --enemy)
        #[arg(long)]
        enemy_file: Option<String>,
        /// Weapon to wield, by catalog name
        #[arg(long, default_value = "Sword")]
        weapon: String,
        /// Armor to wear, by catalog name
        #[arg(long)]
        armor: Option<String>,
        /// Carry a shield
        #[arg(long)]
        shield: bool,
        /// Wield Doombringer (overrides --weapon)
        #[arg(long)]
        doombringer: bool,
        /// Hold The Orb in the left hand
        #[arg(long)]
        orb: bool,
        /// Forbid the death save
        #[arg(long)]
        no_death_save: bool,
        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Parser)]
#[command(name = "saga-cli")]
#[command(about = "Sagas of the Demonspawn rules-engine harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Roll { seed, rolls } => {
            let mut dice = Dice::from_seed(seed);
            for _ in 0..rolls {
                println!("{}", dice.roll_2d6());
            }
        }
        Cmd::Stats { seed } => {
            let mut dice = Dice::from_seed(seed);
            let rolled: Vec<i32> = (0..7).map(|_| dice.roll_characteristic()).collect();
            let character = Character::new(
                rolled[0], rolled[1], rolled[2], rolled[3], rolled[4], rolled[5], rolled[6],
            )?;
            for which in Characteristic::ALL {
                println!("{:<12} {}", which.name(), character.characteristic(which));
            }
            println!(
                "{:<12} {}/{}",
                "LP", character.current_lp, character.maximum_lp
            );
        }
        Cmd::Spells { in_combat, dead } => {
            for spell in available_spells(in_combat, dead) {
                println!(
                    "{:<14} {:>3} POW  [{:?}] {}",
                    spell.name, spell.power_cost, spell.category, spell.description
                );
            }
        }
        Cmd::Cast {
            spell,
            seed,
            pow,
            lp,
            in_combat,
            dead,
            confirm_sacrifice,
        } => {
            let spell = spell_by_name(&spell.to_uppercase())
                .with_context(|| format!("unknown spell '{spell}'"))?;
            let mut dice = Dice::from_seed(seed);

            let (inclined, roll) = natural_inclination_check(&mut dice);
            println!(
                "Natural inclination: rolled {roll} → {}",
                if inclined { "overcome" } else { "reluctant" }
            );

            let mut lp = lp;
            let mut pow = pow;
            let validation = validate_cast(spell, pow, lp, in_combat, dead);
            if validation.requires_sacrifice {
                if !confirm_sacrifice {
                    bail!("{} (re-run with --confirm-sacrifice)", validation.message);
                }
                lp -= validation.sacrifice_amount;
                pow += validation.sacrifice_amount;
                println!(
                    "Sacrificed {} LP for {} POW (LP now {lp})",
                    validation.sacrifice_amount, validation.sacrifice_amount
                );
            } else if !validation.success {
                bail!("{}", validation.message);
            }

            pow -= spell.power_cost;
            let cast = perform_cast(spell, &mut dice);
            println!("{}", cast.message);
            println!("POW spent: {} (remaining {pow})", cast.power_spent);

            if cast.success {
                let effect = resolve_effect(spell, in_combat, None, &mut dice);
                println!("{}", effect.message);
            }
        }
        Cmd::Fight {
            seed,
            enemy,
            enemy_file,
            weapon,
            armor,
            shield,
            doombringer,
            orb,
            no_death_save,
            json,
        } => {
            let cfg = EncounterConfig {
                enemy_id: Some(enemy),
                enemy_path: enemy_file,
                seed,
                weapon,
                armor,
                shield,
                doombringer,
                orb_equipped: orb,
                allow_death_save: !no_death_save,
                ..EncounterConfig::default()
            };
            let result = simulate_encounter(cfg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for line in &result.log {
                    println!("{line}");
                }
                println!(
                    "winner={} rounds={} player_lp={} enemy_lp={}",
                    result.winner, result.rounds, result.player_lp_end, result.enemy_lp_end
                );
            }
        }
    }
    Ok(())
}
