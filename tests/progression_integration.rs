//! Progression integration tests: matches, levelling, trackers, quests
//! and save round-trips

use std::cell::RefCell;
use std::rc::Rc;

use emberhold::core::config::SECONDS_PER_DAY;
use emberhold::core::types::{HeroId, Location, PoolId};
use emberhold::game::events::{GameEvent, Observer};
use emberhold::game::GameContext;

#[test]
fn test_levelling_curve_through_matches() {
    let mut ctx = GameContext::with_seed(3);
    ctx.adjust_pool(PoolId::Provisions, 100);

    // 100 exp per match: level 2 after one, level 3 after 150 more
    ctx.play_match(Location::Forest).unwrap();
    let hero = ctx.active_hero().unwrap();
    assert_eq!(hero.level, 2);
    assert_eq!(hero.exp, 0);
    assert_eq!(hero.exp_to_next, 150);

    ctx.play_match(Location::Forest).unwrap();
    assert_eq!(ctx.active_hero().unwrap().level, 2);
    ctx.play_match(Location::Forest).unwrap();
    let hero = ctx.active_hero().unwrap();
    assert_eq!(hero.level, 3);
    assert_eq!(hero.exp, 50);
    // Level 3 grants a skill point and warrior growth twice over
    assert_eq!(hero.skill_points, 1);
    assert_eq!(hero.base_stats.hp, 120 + 2 * 15);
}

#[test]
fn test_achievements_pay_exactly_once() {
    let mut ctx = GameContext::with_seed(3);
    ctx.adjust_pool(PoolId::Provisions, 50);

    ctx.play_match(Location::Forest).unwrap();
    assert!(ctx.achievements().is_completed("first_match"));
    let after_first = ctx.ledger().get(PoolId::Provisions);

    // The reward does not repeat on later matches
    ctx.play_match(Location::Forest).unwrap();
    assert_eq!(ctx.ledger().get(PoolId::Provisions), after_first - 1);
}

#[test]
fn test_veteran_achievement_after_ten_matches() {
    let mut ctx = GameContext::with_seed(3);
    ctx.adjust_pool(PoolId::Provisions, 90);
    for _ in 0..10 {
        ctx.play_match(Location::Forest).unwrap();
    }
    assert!(ctx.achievements().is_completed("veteran"));
    assert!(ctx.ledger().get(PoolId::Fuel) >= 10);
}

#[test]
fn test_daily_quests_roll_and_reset() {
    let mut ctx = GameContext::with_seed(3);
    ctx.advance_time(1);
    assert_eq!(ctx.quests().active().len(), 3);
    let first_day: Vec<String> = ctx
        .quests()
        .active()
        .iter()
        .map(|q| q.id.clone())
        .collect();
    assert!(first_day.iter().all(|id| id.starts_with("daily_0_")));

    // Day rollover draws a fresh set and discards completions
    ctx.advance_time(SECONDS_PER_DAY);
    let second_day: Vec<String> = ctx
        .quests()
        .active()
        .iter()
        .map(|q| q.id.clone())
        .collect();
    assert_eq!(second_day.len(), 3);
    assert!(second_day.iter().all(|id| id.starts_with("daily_1_")));
}

#[test]
fn test_hero_selection_routes_rewards() {
    let mut ctx = GameContext::with_seed(3);
    ctx.select_hero(HeroId(3)).unwrap();
    assert_eq!(ctx.active_hero().unwrap().name, "Merlin");

    ctx.play_match(Location::Forest).unwrap();
    assert_eq!(ctx.roster().get(HeroId(3)).unwrap().level, 2);
    // Nobody else gained experience
    assert_eq!(ctx.roster().get(HeroId(1)).unwrap().level, 1);
}

struct Recorder(Rc<RefCell<Vec<GameEvent>>>);

impl Observer for Recorder {
    fn on_event(&mut self, event: &GameEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

#[test]
fn test_observers_see_batched_events_after_the_mutation() {
    let mut ctx = GameContext::with_seed(3);
    let seen = Rc::new(RefCell::new(Vec::new()));
    ctx.subscribe(Box::new(Recorder(seen.clone())));

    ctx.play_match(Location::Forest).unwrap();

    let events = seen.borrow();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::LedgerChanged { pool: PoolId::Provisions, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::HeroLeveledUp { level: 2, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::AchievementCompleted { id } if id == "first_match")));
}

#[test]
fn test_save_round_trip_preserves_progress() {
    let mut ctx = GameContext::with_seed(3);
    ctx.adjust_pool(PoolId::Provisions, 50);
    ctx.adjust_pool(PoolId::Wood, 30);
    ctx.play_match(Location::Forest).unwrap();
    ctx.unlock_location(Location::Mountains);
    ctx.advance_time(40);
    let recipe_id = ctx
        .create_recipe(Some("Keepsake".into()), &[(PoolId::Wood, 5)])
        .unwrap();

    let json = ctx.to_json().unwrap();
    let restored = GameContext::from_json(&json);

    assert_eq!(restored.ledger().get(PoolId::Wood), ctx.ledger().get(PoolId::Wood));
    assert_eq!(
        restored.roster().get(HeroId(1)).unwrap().level,
        ctx.roster().get(HeroId(1)).unwrap().level
    );
    assert!(restored.achievements().is_completed("first_match"));
    assert_eq!(
        restored.achievements().stats.matches_played,
        ctx.achievements().stats.matches_played
    );
    assert!(restored.unlocked_locations().contains(&Location::Mountains));
    assert!(restored.crafting().get(&recipe_id).is_some());
    assert_eq!(restored.quests().active().len(), 3);
}

#[test]
fn test_restored_hero_keeps_inventory_and_equipment() {
    let mut ctx = GameContext::with_seed(3);
    ctx.advance_time(1);
    ctx.adjust_pool(PoolId::Provisions, 200);
    let item_id = ctx.shop().stock_ids()[0].clone();
    ctx.buy(item_id.as_str()).unwrap();

    let json = ctx.to_json().unwrap();
    let restored = GameContext::from_json(&json);
    let hero = restored.roster().get(HeroId(1)).unwrap();
    assert!(hero
        .inventory()
        .iter()
        .flatten()
        .any(|item| item.id == item_id));
}
