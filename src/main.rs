//! Emberhold - Entry Point
//!
//! A small interactive loop around the game context: advance time, play
//! matches, manage heroes, craft and shop from stdin commands. The save
//! file is plain JSON next to the binary.

use emberhold::core::error::Result;
use emberhold::core::types::{Location, PoolId};
use emberhold::game::GameContext;
use emberhold::hero::EquipSlot;

use std::io::{self, Write};

const SAVE_FILE: &str = "emberhold_save.json";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("emberhold=debug")
        .init();

    tracing::info!("Emberhold starting...");

    let mut game = match std::fs::read_to_string(SAVE_FILE) {
        Ok(json) => GameContext::from_json(&json),
        Err(_) => GameContext::new(),
    };

    println!("\n=== EMBERHOLD ===");
    println!("An idle RPG of matches, crafting and a slowly filling warehouse");
    println!();
    println!("Commands:");
    println!("  tick <secs>         - Advance game time");
    println!("  status / s          - Resources, warehouse and quests");
    println!("  heroes              - Show the roster");
    println!("  select <id>         - Switch the active hero");
    println!("  match <location>    - Play a match (forest, mountains, ruins)");
    println!("  equip <slot> <idx>  - Equip inventory item <idx> into <slot>");
    println!("  unequip <slot>      - Move an equipped item back to inventory");
    println!("  use <idx>           - Use a consumable from inventory");
    println!("  mix <pool:n> ...    - Create a recipe from ingredients");
    println!("  recipes             - List known recipes");
    println!("  craft <recipe_id>   - Craft a known recipe");
    println!("  shop                - Show the current shop rotation");
    println!("  buy <item_id>       - Buy from the shop");
    println!("  upgrade <pool>      - Upgrade a pool's warehouse");
    println!("  save                - Write the save file");
    println!("  quit / q            - Save and exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            std::fs::write(SAVE_FILE, game.to_json()?)?;
            break;
        }

        if input == "save" {
            std::fs::write(SAVE_FILE, game.to_json()?)?;
            println!("Saved to {}.", SAVE_FILE);
            continue;
        }

        if input == "status" || input == "s" {
            display_status(&game);
            continue;
        }

        if input == "heroes" {
            display_heroes(&game);
            continue;
        }

        if let Some(rest) = input.strip_prefix("tick ") {
            match rest.parse::<u64>() {
                Ok(secs) => {
                    game.advance_time(secs);
                    println!(
                        "Advanced {}s. Day {}, {}s total.",
                        secs,
                        game.clock().current_day(),
                        game.clock().total_seconds()
                    );
                }
                Err(_) => println!("Usage: tick <seconds>"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("select ") {
            match rest.parse::<u32>() {
                Ok(id) => match game.select_hero(emberhold::core::types::HeroId(id)) {
                    Ok(()) => println!("Active hero is now {}.", id),
                    Err(e) => println!("Cannot select: {}", e),
                },
                Err(_) => println!("Usage: select <id>"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("match ") {
            match Location::from_name(rest) {
                Some(location) => match game.play_match(location) {
                    Ok(outcome) => {
                        println!("Match won! +{} exp.", outcome.exp_gained);
                        if outcome.levels_gained > 0 {
                            println!("Level up! (+{})", outcome.levels_gained);
                        }
                    }
                    Err(e) => println!("Cannot play: {}", e),
                },
                None => println!("Unknown location. Try forest, mountains or ruins."),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("equip ") {
            let mut parts = rest.split_whitespace();
            match (
                parts.next().and_then(EquipSlot::from_name),
                parts.next().and_then(|s| s.parse::<usize>().ok()),
            ) {
                (Some(slot), Some(index)) => match game.equip(index, slot) {
                    Ok(()) => println!("Equipped."),
                    Err(e) => println!("Cannot equip: {}", e),
                },
                _ => println!("Usage: equip <weapon|armor|accessory> <inventory index>"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("unequip ") {
            match EquipSlot::from_name(rest) {
                Some(slot) => match game.unequip(slot) {
                    Ok(()) => println!("Unequipped."),
                    Err(e) => println!("Cannot unequip: {}", e),
                },
                None => println!("Usage: unequip <weapon|armor|accessory>"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("use ") {
            match rest.parse::<usize>() {
                Ok(index) => match game.use_consumable(index) {
                    Ok(()) => println!("Used."),
                    Err(e) => println!("Cannot use: {}", e),
                },
                Err(_) => println!("Usage: use <inventory index>"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("mix ") {
            match parse_ingredients(rest) {
                Some(ingredients) => match game.create_recipe(None, &ingredients) {
                    Ok(id) => println!("Recipe created: {}", id),
                    Err(e) => println!("Cannot create recipe: {}", e),
                },
                None => println!("Usage: mix <pool:count> [pool:count ...], e.g. mix wood:2 cloth:1"),
            }
            continue;
        }

        if input == "recipes" {
            for recipe in game.crafting().recipes() {
                let inputs: Vec<String> = recipe
                    .inputs
                    .iter()
                    .map(|(pool, n)| format!("{}x{}", n, pool))
                    .collect();
                println!("  {} - {} [{}]", recipe.id, recipe.name, inputs.join(", "));
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("craft ") {
            match game.craft(rest) {
                Ok(()) => println!("Crafted."),
                Err(e) => println!("Cannot craft: {}", e),
            }
            continue;
        }

        if input == "shop" {
            for item in game.shop().stock() {
                println!(
                    "  {} - {} ({:?}, {:?}) {} provisions",
                    item.id, item.name, item.category, item.rarity, item.price
                );
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("buy ") {
            match game.buy(rest) {
                Ok(()) => println!("Bought."),
                Err(e) => println!("Cannot buy: {}", e),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("upgrade ") {
            match PoolId::from_name(rest) {
                Some(pool) => {
                    let level = game.upgrade_warehouse(pool);
                    println!(
                        "{} warehouse is now level {} ({} capacity).",
                        pool,
                        level,
                        game.warehouse().capacity_for(pool)
                    );
                }
                None => println!("Unknown pool."),
            }
            continue;
        }

        println!("Unknown command. Try status, tick <secs>, match <location>, shop, quit.");
    }

    let (done, total) = game.achievements().progress();
    println!(
        "\nGoodbye! Day {}, {} matches played, {}/{} achievements.",
        game.clock().current_day(),
        game.achievements().stats.matches_played,
        done,
        total
    );
    Ok(())
}

/// Parse "wood:2 cloth:1" style ingredient lists
fn parse_ingredients(input: &str) -> Option<Vec<(PoolId, u32)>> {
    let mut ingredients = Vec::new();
    for part in input.split_whitespace() {
        let (name, count) = part.split_once(':')?;
        let pool = PoolId::from_name(name)?;
        let count = count.parse::<u32>().ok()?;
        if count == 0 {
            return None;
        }
        ingredients.push((pool, count));
    }
    if ingredients.is_empty() {
        None
    } else {
        Some(ingredients)
    }
}

fn display_status(game: &GameContext) {
    println!("Day {} | {}s elapsed", game.clock().current_day(), game.clock().total_seconds());
    println!("Resources:");
    for (pool, amount) in game.ledger().iter() {
        println!(
            "  {:12} {:>5} / {:>5}  (lv {})",
            pool.to_string(),
            amount,
            game.warehouse().capacity_for(pool),
            game.warehouse().level(pool)
        );
    }
    println!("Quests:");
    for quest in game.quests().active() {
        let mark = if game.quests().is_completed(&quest.id) { "x" } else { " " };
        println!("  [{}] {} ({}/{})", mark, quest.name, quest.progress, quest.target);
    }
    let (done, total) = game.achievements().progress();
    println!("Achievements: {}/{}", done, total);
}

fn display_heroes(game: &GameContext) {
    let active = game.roster().active_id();
    for hero in game.roster().iter() {
        let marker = if Some(hero.id) == active { "*" } else { " " };
        println!(
            "{} [{}] {} the {} - lv {} ({}/{} exp), hp {} atk {} def {}",
            marker,
            hero.id.0,
            hero.name,
            hero.archetype.name(),
            hero.level,
            hero.exp,
            hero.exp_to_next,
            hero.current_stats.hp,
            hero.current_stats.attack,
            hero.current_stats.defense
        );
        for (index, slot) in hero.inventory().iter().enumerate() {
            if let Some(item) = slot {
                println!("      [{}] {}", index, item.name);
            }
        }
        for item in hero.equipment().equipped() {
            println!("      equipped: {}", item.name);
        }
    }
}
