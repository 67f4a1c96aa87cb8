use engine::dice::ScriptedRoller;
use engine::{
    Character, CombatOutcome, CombatPhase, EngineError, Enemy, apply_armor_reduction,
    attempt_death_save, calculate_damage, calculate_to_hit_requirement, check_defeat,
    check_endurance, check_victory, execute_enemy_attack, execute_player_attack, next_turn,
    process_enemy_rest, process_rest, resolve_combat_victory, start_combat,
};

fn firewolf() -> Character {
    let mut c = Character::new(64, 56, 72, 48, 80, 40, 56).unwrap();
    c.equip_weapon(Some(engine::Weapon {
        name: "Sword".to_string(),
        damage_bonus: 10,
        description: String::new(),
        special: false,
    }));
    c
}

fn goblin() -> Enemy {
    Enemy::new("Goblin", 40, 35, 30, 25, 20, 0, 150, 150, 5, 0, false).unwrap()
}

#[test]
fn enemy_constructor_validates_every_field() {
    assert_eq!(
        Enemy::new("", 1, 1, 1, 1, 1, 1, 10, 10, 0, 0, false),
        Err(EngineError::EmptyEnemyName)
    );
    assert_eq!(
        Enemy::new("Ghoul", -1, 1, 1, 1, 1, 1, 10, 10, 0, 0, false),
        Err(EngineError::NegativeEnemyStat {
            what: "strength",
            value: -1
        })
    );
    assert_eq!(
        Enemy::new("Ghoul", 1, 1, 1, 1, 1, 1, 10, 0, 0, 0, false),
        Err(EngineError::NonPositiveMaximumLp(0))
    );
    assert_eq!(
        Enemy::new("Ghoul", 1, 1, 1, 1, 1, 1, 10, 10, -2, 0, false),
        Err(EngineError::NegativeEnemyStat {
            what: "weapon bonus",
            value: -2
        })
    );
    assert!(Enemy::new("Ghoul", 1, 1, 1, 1, 1, 1, 10, 10, 0, 0, true).is_ok());
}

#[test]
fn to_hit_requirement_follows_skill_and_luck() {
    assert_eq!(calculate_to_hit_requirement(0, 0), 7);
    assert_eq!(calculate_to_hit_requirement(9, 0), 7);
    assert_eq!(calculate_to_hit_requirement(10, 0), 6);
    assert_eq!(calculate_to_hit_requirement(35, 0), 4);
    assert_eq!(calculate_to_hit_requirement(0, 71), 7);
    assert_eq!(calculate_to_hit_requirement(0, 72), 6);
    assert_eq!(calculate_to_hit_requirement(40, 72), 2);
    // Floored at 2 however high skill climbs.
    assert_eq!(calculate_to_hit_requirement(500, 99), 2);
}

#[test]
fn damage_formula_and_armor_reduction() {
    assert_eq!(calculate_damage(9, 64, 10), 9 * 5 + 6 * 5 + 10);
    assert_eq!(calculate_damage(2, 0, 0), 10);
    assert_eq!(calculate_damage(12, 109, 20), 60 + 50 + 20);

    assert_eq!(apply_armor_reduction(75, 8), 67);
    assert_eq!(apply_armor_reduction(20, 20), 0);
    assert_eq!(apply_armor_reduction(5, 12), 0);
}

#[test]
fn endurance_forces_rest_only_with_a_positive_limit() {
    assert!(!check_endurance(100, 0));
    assert!(!check_endurance(100, -1));
    assert!(!check_endurance(6, 7));
    assert!(check_endurance(7, 7));
    assert!(check_endurance(8, 7));
}

#[test]
fn initiative_ties_favor_the_enemy() {
    let player = firewolf();
    // Enemy statline mirrors the player's Speed+Courage+Luck total (184).
    let enemy = Enemy::new("Mirror", 10, 100, 10, 44, 40, 0, 50, 50, 0, 0, false).unwrap();
    let mut roller = ScriptedRoller::new([6, 6]);
    let cs = start_combat(&player, enemy, &mut roller);
    assert_eq!(cs.player_initiative, cs.enemy_initiative);
    assert!(!cs.player_first_strike);
    assert!(!cs.player_turn);
}

#[test]
fn start_combat_fixes_endurance_limits_from_stamina() {
    let player = firewolf();
    let mut roller = ScriptedRoller::new([8, 5]);
    let cs = start_combat(&player, goblin(), &mut roller);
    assert_eq!(cs.endurance_limit, 7); // 72 / 10
    assert_eq!(cs.enemy_endurance_limit, 3); // 30 / 10
    assert_eq!(cs.current_round, 1);
    assert!(cs.is_active);
}

#[test]
fn scripted_goblin_opening_matches_the_rulebook() {
    let player = firewolf();
    let mut roller = ScriptedRoller::new([8, 5, 9]);
    let mut cs = start_combat(&player, goblin(), &mut roller);

    assert_eq!(cs.player_initiative, 8 + 56 + 48 + 80); // 192
    assert_eq!(cs.enemy_initiative, 5 + 35 + 25 + 20); // 85
    assert!(cs.player_first_strike);
    assert_eq!(cs.phase(&player), CombatPhase::PlayerActing);

    let result = execute_player_attack(&mut cs, &player, &mut roller);
    // Luck 80 ≥ 72 trims the base 7 to 6.
    assert_eq!(result.requirement, 6);
    assert_eq!(result.roll, 9);
    assert!(result.hit);
    assert_eq!(result.damage_before_armor, 85);
    assert_eq!(result.final_damage, 85);
    assert_eq!(result.target_lp, 65);
    assert_eq!(cs.enemy.current_lp, 65);
}

#[test]
fn enemy_hits_respect_player_armor_and_can_drive_lp_negative() {
    let mut player = firewolf();
    player.equip_armor(Some(engine::Armor {
        name: "Chain Mail".to_string(),
        protection: 8,
        description: String::new(),
    }));
    player.toggle_shield();
    player.set_lp(10);

    let mut roller = ScriptedRoller::new([2, 12, 12]);
    let mut cs = start_combat(&player, goblin(), &mut roller);

    let result = execute_enemy_attack(&mut cs, &mut player, &mut roller);
    assert!(result.hit);
    // 12*5 + (40/10)*5 + 5 = 85, less 13 protection (8 armor + 5 shield).
    assert_eq!(result.damage_before_armor, 85);
    assert_eq!(result.final_damage, 72);
    assert_eq!(player.current_lp, 10 - 72);
    assert!(check_defeat(&player));
}

#[test]
fn misses_deal_nothing_and_leave_lp_alone() {
    let player = firewolf();
    let mut roller = ScriptedRoller::new([8, 5, 2]);
    let mut cs = start_combat(&player, goblin(), &mut roller);

    let result = execute_player_attack(&mut cs, &player, &mut roller);
    assert!(!result.hit);
    assert_eq!(result.final_damage, 0);
    assert_eq!(cs.enemy.current_lp, 150);
}

#[test]
fn rounds_advance_when_control_returns_to_the_first_striker() {
    let player = firewolf();
    let mut roller = ScriptedRoller::new([8, 5]);
    let mut cs = start_combat(&player, goblin(), &mut roller);
    assert!(cs.player_first_strike);

    next_turn(&mut cs);
    assert!(!cs.player_turn);
    assert_eq!(cs.current_round, 1);
    assert_eq!(cs.rounds_since_last_rest, 0);

    next_turn(&mut cs);
    assert!(cs.player_turn);
    assert_eq!(cs.current_round, 2);
    assert_eq!(cs.rounds_since_last_rest, 1);
    assert_eq!(cs.enemy_rounds_since_last_rest, 1);
}

#[test]
fn rest_clears_only_the_resting_side() {
    let player = firewolf();
    let mut roller = ScriptedRoller::new([8, 5]);
    let mut cs = start_combat(&player, goblin(), &mut roller);
    cs.rounds_since_last_rest = 7;
    cs.enemy_rounds_since_last_rest = 3;

    assert_eq!(cs.phase(&player), CombatPhase::PlayerRestPending);
    process_rest(&mut cs);
    assert_eq!(cs.rounds_since_last_rest, 0);
    assert_eq!(cs.enemy_rounds_since_last_rest, 3);

    cs.player_turn = false;
    assert_eq!(cs.phase(&player), CombatPhase::EnemyRestPending);
    process_enemy_rest(&mut cs);
    assert_eq!(cs.enemy_rounds_since_last_rest, 0);
}

#[test]
fn victory_resolution_awards_skill_and_the_kill_count() {
    let mut player = firewolf();
    let mut roller = ScriptedRoller::new([8, 5]);
    let mut cs = start_combat(&player, goblin(), &mut roller);
    cs.enemy.current_lp = 0;

    assert!(check_victory(&cs));
    assert_eq!(cs.phase(&player), CombatPhase::VictoryPending);
    resolve_combat_victory(&mut player);
    assert_eq!(player.enemies_defeated, 1);
    assert_eq!(player.skill, 1);
}

#[test]
fn death_save_success_resets_the_encounter_and_rerolls_initiative() {
    let mut player = firewolf();
    let mut roller = ScriptedRoller::new([8, 5]);
    let mut cs = start_combat(&player, goblin(), &mut roller);

    player.set_lp(-5);
    cs.current_round = 4;
    cs.rounds_since_last_rest = 3;
    cs.enemy_rounds_since_last_rest = 3;
    cs.enemy.current_lp = 90;
    assert_eq!(cs.phase(&player), CombatPhase::DeathSaveOffered);

    // Save roll 7 → 70 ≤ luck 80; two more rolls re-seed initiative.
    let mut roller = ScriptedRoller::new([7, 3, 9]);
    let (roll, success) = attempt_death_save(&mut player, &mut cs, &mut roller);
    assert_eq!(roll, 70);
    assert!(success);
    assert!(cs.death_save_used);
    assert_eq!(roller.remaining(), 0);
    assert_eq!(player.current_lp, player.maximum_lp);
    assert_eq!(cs.current_round, 1);
    assert_eq!(cs.rounds_since_last_rest, 0);
    assert_eq!(cs.enemy_rounds_since_last_rest, 0);
    // The enemy keeps the damage it already took.
    assert_eq!(cs.enemy.current_lp, 90);
    assert_eq!(cs.player_initiative, 3 + 56 + 48 + 80);
    assert_eq!(cs.enemy_initiative, 9 + 35 + 25 + 20);
    assert!(cs.player_first_strike);
    assert!(cs.player_turn);
}

#[test]
fn death_save_roll_bounds_and_one_shot_rule() {
    let mut player = firewolf();
    let mut roller = ScriptedRoller::new([8, 5]);
    let mut cs = start_combat(&player, goblin(), &mut roller);
    player.set_lp(0);

    // Roll 9 → 90 > luck 80: failure, save spent.
    let mut roller = ScriptedRoller::new([9]);
    let (roll, success) = attempt_death_save(&mut player, &mut cs, &mut roller);
    assert_eq!(roll, 90);
    assert!(roll % 10 == 0 && (20..=120).contains(&roll));
    assert!(!success);
    assert!(cs.death_save_used);
    assert_eq!(cs.phase(&player), CombatPhase::DefeatPending);

    // Second attempt returns (0, false) without consuming a roll.
    let mut roller = ScriptedRoller::new([12]);
    let (roll, success) = attempt_death_save(&mut player, &mut cs, &mut roller);
    assert_eq!((roll, success), (0, false));
    assert_eq!(roller.remaining(), 1);
}

#[test]
fn ended_combat_reports_its_outcome_as_the_phase() {
    let player = firewolf();
    let mut roller = ScriptedRoller::new([8, 5]);
    let mut cs = start_combat(&player, goblin(), &mut roller);

    cs.end_combat(CombatOutcome::Fled);
    assert!(!cs.is_active);
    assert_eq!(cs.phase(&player), CombatPhase::Ended(CombatOutcome::Fled));
}
