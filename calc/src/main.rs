use std::env;

use tunnel_calc::{calculate, Calculation, Character, CharacterStore, LastEntry};

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    println!("⛏️  Tunnel Layout Calculator");
    println!("{}", "=".repeat(70));
    println!();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "calculate" => {
            if args.len() < 4 {
                eprintln!(
                    "Usage: {} calculate <player_id> <level> [--name <name>]",
                    args[0]
                );
                std::process::exit(1);
            }

            let player_id: u32 = args[2].parse().unwrap_or_else(|_| {
                eprintln!(
                    "❌ Error: Invalid player id '{}'. Must be a non-negative integer.",
                    args[2]
                );
                std::process::exit(1);
            });

            let level: u32 = args[3].parse().unwrap_or_else(|_| {
                eprintln!(
                    "❌ Error: Invalid tunnel level '{}'. Must be a non-negative integer.",
                    args[3]
                );
                std::process::exit(1);
            });

            // Parse optional --name flag
            let mut name = None;
            if args.len() > 4 && args[4] == "--name" {
                if args.len() < 6 {
                    eprintln!("❌ Error: --name requires a value");
                    std::process::exit(1);
                }
                name = Some(args[5].as_str());
            }

            calculate_command(player_id, level, name);
        }

        "recall" => {
            if args.len() < 3 {
                eprintln!("Usage: {} recall <name>", args[0]);
                std::process::exit(1);
            }

            recall_command(&args[2]);
        }

        "characters" => {
            characters_command();
        }

        "remove-character" => {
            if args.len() < 3 {
                eprintln!("Usage: {} remove-character <name>", args[0]);
                std::process::exit(1);
            }

            remove_character_command(&args[2]);
        }

        _ => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  calculate <player_id> <level> [--name <name>]");
    eprintln!("      Calculate the tunnel layout for a player and level");
    eprintln!("      - player_id: non-negative integer player identifier");
    eprintln!("      - level: tunnel level, at least 1");
    eprintln!("      - --name: save the inputs under a character name");
    eprintln!();
    eprintln!("  recall <name>");
    eprintln!("      Recalculate using a saved character's inputs");
    eprintln!();
    eprintln!("  characters");
    eprintln!("      List saved characters");
    eprintln!();
    eprintln!("  remove-character <name>");
    eprintln!("      Delete a saved character");
    eprintln!();
    eprintln!("Saved data lives under $TUNNEL_DATA_DIR (default: ./tunnel-data)");
    eprintln!();
    eprintln!("Example workflow:");
    eprintln!("  1. Calculate:  {} calculate 57 10 --name Miner", program);
    eprintln!("  2. Next level: {} calculate 57 11 --name Miner", program);
    eprintln!("  3. Later:      {} recall Miner", program);
}

fn calculate_command(player_id: u32, level: u32, name: Option<&str>) {
    match calculate(player_id, level) {
        Ok(calculation) => {
            print_calculation(&calculation);
            persist_calculation(&calculation, name);
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn recall_command(name: &str) {
    let store = CharacterStore::from_env();

    let character = match store.find(name) {
        Some(character) => character,
        None => {
            eprintln!("❌ No saved data for character '{}' yet.", name);
            std::process::exit(1);
        }
    };

    println!(
        "📦 Loaded saved character '{}' (ID {}, Level {})",
        character.name, character.player_id, character.level
    );
    println!();

    calculate_command(
        character.player_id,
        character.level,
        Some(character.name.as_str()),
    );
}

fn characters_command() {
    let store = CharacterStore::from_env();
    let characters = store.characters();

    if characters.is_empty() {
        println!("No saved characters yet.");
        return;
    }

    println!("📇 Saved characters:");
    for character in characters {
        println!(
            "  {} (ID {}, Level {})",
            character.name, character.player_id, character.level
        );
    }
}

fn remove_character_command(name: &str) {
    let store = CharacterStore::from_env();

    match store.remove(name) {
        Ok(true) => {
            println!("🗑️  Removed saved character '{}'.", name);
        }
        Ok(false) => {
            eprintln!("❌ No saved character matched '{}'.", name);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Error removing character: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_calculation(calculation: &Calculation) {
    println!("📋 Inputs");
    println!("  Player ID: {}", calculation.player_id);
    println!("  Tunnel level: {}", calculation.level);
    println!();

    println!("🎲 Seed: {}", calculation.seed);
    println!(
        "  Draws: {}, {}, {}",
        calculation.draws[0], calculation.draws[1], calculation.draws[2]
    );
    println!(
        "  Rolls: {}, {}, {}",
        calculation.rolls[0], calculation.rolls[1], calculation.rolls[2]
    );
    println!();

    println!("🧭 Directions");
    for (index, area) in calculation.areas.iter().enumerate() {
        println!("  Area {}: {}", index + 1, area);
    }
    println!("  Area 1 creepers: {}", calculation.creepers.summary);
    println!();
    println!("{}", "=".repeat(70));
}

fn persist_calculation(calculation: &Calculation, name: Option<&str>) {
    let store = CharacterStore::from_env();

    let entry = LastEntry {
        player_id: calculation.player_id,
        level: calculation.level,
        name: name.unwrap_or("").to_string(),
    };
    if let Err(e) = store.set_last_entry(&entry) {
        tracing::warn!("Unable to save entry: {}", e);
    }

    let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) else {
        return;
    };

    let character = Character {
        name: name.to_string(),
        player_id: calculation.player_id,
        level: calculation.level,
    };

    match store.save(&character) {
        Ok(()) => println!("💾 Saved character '{}'", name),
        Err(e) => {
            eprintln!("❌ Error saving character: {}", e);
            std::process::exit(1);
        }
    }
}
